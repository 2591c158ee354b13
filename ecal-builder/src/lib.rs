use std::sync::LazyLock;

use crate::time::TimeStamp;

pub mod assembly;
pub mod config;
pub mod io;
pub mod time;

pub static EPOCH: LazyLock<TimeStamp> = LazyLock::new(TimeStamp::now);
