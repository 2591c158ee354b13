use crate::geometry::Quantity;
use crate::util::assertions;

/// One element of an [`Arrangement`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slot<Q> {
    /// Signed index, 0 is the central element (odd counts only)
    pub index: i64,
    pub offset: Q,
}

/// Where `n` identical elements of width `pitch` go, centered around zero.
/// Produced by [`symmetric_arrangement`].
#[derive(Clone, Debug, PartialEq)]
pub struct Arrangement<Q> {
    pitch: Q,
    slots: Vec<Slot<Q>>,
}

/// Arranges `n` elements of width `pitch` symmetrically around zero.
///
/// For even `n`, indices `±1..=±n/2` sit at `±pitch·(i - 0.5)`.
/// For odd `n`, indices `0..=±(n-1)/2` sit at `±pitch·i`, index 0 appearing exactly once.
/// Slots are ordered `0, 1, -1, 2, -2, ...` (without 0 for even `n`).
pub fn symmetric_arrangement<Q: Quantity>(n: usize, pitch: Q) -> Arrangement<Q> {
    let mut slots = Vec::new();
    let (first, last, shift) = match n % 2 {
        0 => (1, n / 2, 0.5),
        _ => (0, (n - 1) / 2, 0.0),
    };
    for i in first..=last {
        let offset = pitch * (i as f64 - shift);
        let index = i as i64;
        slots.push(Slot { index, offset });
        if index != 0 {
            slots.push(Slot {
                index: -index,
                offset: -offset,
            });
        }
    }
    debug_assert!(slots.len() == n);
    let arr = Arrangement { pitch, slots };
    debug_assert!(assertions::arrangement_is_symmetric(&arr));
    arr
}

impl<Q: Quantity> Arrangement<Q> {
    pub fn pitch(&self) -> Q {
        self.pitch
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot<Q>] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, Q)> + '_ {
        self.slots.iter().map(|s| (s.index, s.offset))
    }

    pub fn offsets(&self) -> impl Iterator<Item = Q> + '_ {
        self.slots.iter().map(|s| s.offset)
    }

    /// Total space occupied: `n·pitch`
    pub fn extent(&self) -> Q {
        self.pitch * self.slots.len() as f64
    }

    /// Offset of the outermost element on the positive side, `None` if empty
    pub fn max_offset(&self) -> Option<Q> {
        self.offsets()
            .fold(None, |max, o| match max {
                Some(m) if m >= o => Some(m),
                _ => Some(o),
            })
    }
}
