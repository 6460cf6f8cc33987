use std::rc::Rc;

use crate::error::{BigIntError, Result};
use crate::Limb;

/// Refcounted heap payload of limbs.
///
/// Cloning a `LimbBuffer` only bumps the reference count. Every mutating method first
/// makes the payload unique (copy-on-write), so other holders never observe the change.
/// The count is not atomic: a buffer and its clones must stay on one thread.
#[derive(Clone)]
pub struct LimbBuffer {
    payload: Rc<Vec<Limb>>,
}

// Reserve room for 'additional' more limbs.
// Leaves 'v' untouched when the allocation cannot be satisfied.
pub(crate) fn reserve(v: &mut Vec<Limb>, additional: usize) -> Result<()> {
    grow(v, additional, false)
}

// Like 'reserve' but without amortized over-allocation.
pub(crate) fn reserve_exact(v: &mut Vec<Limb>, additional: usize) -> Result<()> {
    grow(v, additional, true)
}

fn grow(v: &mut Vec<Limb>, additional: usize, exact: bool) -> Result<()> {
    if v.capacity() - v.len() >= additional {
        return Ok(())
    }
    let requested = v.len().saturating_add(additional);
    #[cfg(test)]
    if failpoint::hit() {
        log::warn!("buffer - injected allocation failure for {requested} limbs");
        return Err(BigIntError::AllocFailed { requested })
    }
    let res = if exact {
        v.try_reserve_exact(additional)
    } else {
        v.try_reserve(additional)
    };
    res.map_err(|_| {
        log::warn!("buffer - allocation failure for {requested} limbs");
        BigIntError::AllocFailed { requested }
    })
}

impl LimbBuffer {
    /// Copies `limbs` into a fresh, unshared buffer with room for `spare` more limbs.
    pub fn from_slice(limbs: &[Limb], spare: usize) -> Result<Self> {
        let mut v = Vec::new();
        reserve_exact(&mut v, limbs.len().saturating_add(spare))?;
        v.extend_from_slice(limbs);
        Ok(LimbBuffer { payload: Rc::new(v) })
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn as_slice(&self) -> &[Limb] {
        self.payload.as_slice()
    }

    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.payload)
    }

    pub fn is_shared(&self) -> bool {
        self.ref_count() > 1
    }

    // Detach from the other holders by copying the payload.
    // On failure self still shares the old payload.
    fn unshare(&mut self, spare: usize) -> Result<()> {
        if self.is_shared() {
            let copy = LimbBuffer::from_slice(self.as_slice(), spare)?;
            log::debug!("buffer - unshared {} limbs from {} holders", self.len(), self.ref_count());
            *self = copy;
        }
        Ok(())
    }

    /// Unique access to the payload, copying it first when shared.
    pub fn make_mut(&mut self) -> Result<&mut Vec<Limb>> {
        self.unshare(0)?;
        Ok(Rc::make_mut(&mut self.payload))
    }

    pub fn push(&mut self, limb: Limb) -> Result<()> {
        self.unshare(1)?;
        let v = Rc::make_mut(&mut self.payload);
        reserve(v, 1)?;
        v.push(limb);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Option<Limb>> {
        if self.is_empty() {
            return Ok(None)
        }
        Ok(self.make_mut()?.pop())
    }

    pub fn set(&mut self, i: usize, limb: Limb) -> Result<()> {
        assert!(i < self.len(), "LimbBuffer::set - invalid index {i} >= {}", self.len());
        self.make_mut()?[i] = limb;
        Ok(())
    }

    pub fn reverse(&mut self) -> Result<()> {
        self.make_mut()?.reverse();
        Ok(())
    }
}

// Counts down allocations on the current thread and fails the one that reaches zero.
#[cfg(test)]
pub(crate) mod failpoint {
    use std::cell::Cell;

    thread_local! {
        static COUNTDOWN: Cell<Option<usize>> = const { Cell::new(None) };
    }

    // Let 'n' allocations through, then fail the next one.
    pub fn fail_after(n: usize) {
        COUNTDOWN.with(|c| c.set(Some(n)));
    }

    pub fn clear() {
        COUNTDOWN.with(|c| c.set(None));
    }

    pub(super) fn hit() -> bool {
        COUNTDOWN.with(|c| match c.get() {
            Some(0) => {
                c.set(None);
                true
            }
            Some(n) => {
                c.set(Some(n - 1));
                false
            }
            None => false,
        })
    }
}
