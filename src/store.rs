use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};

use crate::buffer::LimbBuffer;
use crate::error::Result;
use crate::Limb;

#[derive(Clone)]
enum Repr {
    // Slots at or beyond 'len' are always zero.
    Inline { len: usize, limbs: [Limb; LimbStore::INLINE_CAP] },
    Shared(LimbBuffer),
}

/// Growable limb sequence with value semantics.
///
/// Up to [`LimbStore::INLINE_CAP`] limbs live inline. Appending past that moves the
/// contents, once and for good, into a [`LimbBuffer`] that clones share until one of
/// them writes. Callers see the same index/append/pop/reverse contract in either mode.
#[derive(Clone)]
pub struct LimbStore {
    repr: Repr,
}

impl Default for LimbStore {
    fn default() -> Self {
        LimbStore::new()
    }
}

impl LimbStore {
    pub const INLINE_CAP: usize = 5;

    pub fn new() -> Self {
        LimbStore { repr: Repr::Inline { len: 0, limbs: [0; LimbStore::INLINE_CAP] } }
    }

    /// `len` zero limbs. Starts out shared when `len` exceeds the inline capacity.
    pub fn zeroed(len: usize) -> Result<Self> {
        if len <= LimbStore::INLINE_CAP {
            Ok(LimbStore { repr: Repr::Inline { len, limbs: [0; LimbStore::INLINE_CAP] } })
        } else {
            let mut buf = LimbBuffer::from_slice(&[], len)?;
            buf.make_mut()?.resize(len, 0);
            Ok(LimbStore { repr: Repr::Shared(buf) })
        }
    }

    pub fn from_slice(limbs: &[Limb]) -> Result<Self> {
        if limbs.len() <= LimbStore::INLINE_CAP {
            Ok(LimbStore::inline(limbs))
        } else {
            Ok(LimbStore { repr: Repr::Shared(LimbBuffer::from_slice(limbs, 0)?) })
        }
    }

    // Never allocates. Panics if 'limbs' does not fit inline.
    pub(crate) fn inline(limbs: &[Limb]) -> Self {
        assert!(limbs.len() <= LimbStore::INLINE_CAP,
                "LimbStore::inline - {} limbs exceed the inline capacity", limbs.len());
        let mut slots = [0; LimbStore::INLINE_CAP];
        slots[..limbs.len()].copy_from_slice(limbs);
        LimbStore { repr: Repr::Inline { len: limbs.len(), limbs: slots } }
    }

    fn valid(&self) {
        #[cfg(any(debug_assertions, release_test))]
        if let Repr::Inline { len, limbs } = &self.repr {
            assert!(*len <= LimbStore::INLINE_CAP, "LimbStore::valid - inline length {len} out of range");
            assert!(limbs[*len..].iter().all(|&l| l == 0), "LimbStore::valid - stale inline slot");
        }
    }

    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Inline { len, .. } => *len,
            Repr::Shared(buf) => buf.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[Limb] {
        match &self.repr {
            Repr::Inline { len, limbs } => &limbs[..*len],
            Repr::Shared(buf) => buf.as_slice(),
        }
    }

    /// The limb at `i`, or a logical zero past the end.
    pub fn get(&self, i: usize) -> Limb {
        self.as_slice().get(i).copied().unwrap_or(0)
    }

    pub fn last(&self) -> Option<Limb> {
        self.as_slice().last().copied()
    }

    pub fn set(&mut self, i: usize, limb: Limb) -> Result<()> {
        assert!(i < self.len(), "LimbStore::set - invalid index {i} >= {}", self.len());
        match &mut self.repr {
            Repr::Inline { limbs, .. } => limbs[i] = limb,
            Repr::Shared(buf) => buf.set(i, limb)?,
        }
        Ok(())
    }

    pub fn push(&mut self, limb: Limb) -> Result<()> {
        match &mut self.repr {
            Repr::Inline { len, limbs } if *len < LimbStore::INLINE_CAP => {
                limbs[*len] = limb;
                *len += 1;
            }
            Repr::Inline { limbs, .. } => {
                // build the shared buffer to completion before touching the inline limbs.
                let mut buf = LimbBuffer::from_slice(&limbs[..], 1)?;
                buf.push(limb)?;
                log::debug!("store - promoted {} inline limbs to a shared buffer", LimbStore::INLINE_CAP);
                self.repr = Repr::Shared(buf);
            }
            Repr::Shared(buf) => buf.push(limb)?,
        }
        self.valid();
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Option<Limb>> {
        let limb = match &mut self.repr {
            Repr::Inline { len: 0, .. } => None,
            Repr::Inline { len, limbs } => {
                *len -= 1;
                Some(std::mem::replace(&mut limbs[*len], 0))
            }
            Repr::Shared(buf) => buf.pop()?,
        };
        self.valid();
        Ok(limb)
    }

    pub fn reverse(&mut self) -> Result<()> {
        match &mut self.repr {
            Repr::Inline { len, limbs } => limbs[..*len].reverse(),
            Repr::Shared(buf) => buf.reverse()?,
        }
        Ok(())
    }

    pub fn swap(&mut self, other: &mut LimbStore) {
        std::mem::swap(&mut self.repr, &mut other.repr);
    }

    #[cfg(test)]
    pub(crate) fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline { .. })
    }

    #[cfg(test)]
    pub(crate) fn ref_count(&self) -> usize {
        match &self.repr {
            Repr::Inline { .. } => 1,
            Repr::Shared(buf) => buf.ref_count(),
        }
    }
}

impl PartialEq for LimbStore {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for LimbStore {}

impl Hash for LimbStore {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl Debug for LimbStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:X?}", self.as_slice())
    }
}
