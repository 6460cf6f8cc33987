use std::cmp::{max, min, Ordering};
use std::fmt::{Debug, Formatter};

use crate::bits::{add_with_carry, div_wide, join, leading_zeroes_count, mul_add, split, sub_with_borrow};
use crate::error::{BigIntError, Result};
use crate::store::LimbStore;
use crate::{BigInt, Limb, Wide};

impl Debug for BigInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BigInt{{neg:{};limbs:{:?}}}", self.neg, self.mag)
    }
}

// Pop most-significant zero limbs.
pub(crate) fn trim(mag: &mut LimbStore) -> Result<()> {
    while mag.last() == Some(0) {
        mag.pop()?;
    }
    Ok(())
}

// Compare two magnitudes: by length first, then limb by limb from the most-significant end.
// Both must be trimmed.
pub(crate) fn cmp_mag(a: &LimbStore, b: &LimbStore) -> Ordering {
    a.len().cmp(&b.len())
        .then_with(|| a.as_slice().iter().rev().cmp(b.as_slice().iter().rev()))
}

fn add_mag(a: &LimbStore, b: &LimbStore) -> Result<LimbStore> {
    let mut sum = LimbStore::new();
    let mut carry: Limb = 0;
    for i in 0..max(a.len(), b.len()) {
        let (s, c) = add_with_carry(a.get(i), b.get(i), carry);
        sum.push(s)?;
        carry = c;
    }
    if carry > 0 {
        sum.push(carry)?;
    }
    Ok(sum)
}

// a - b, where a >= b. The result is not trimmed.
fn sub_mag(a: &LimbStore, b: &LimbStore) -> Result<LimbStore> {
    let mut diff = LimbStore::new();
    let mut borrow: Limb = 0;
    for i in 0..a.len() {
        let (d, b_out) = sub_with_borrow(a.get(i), b.get(i), borrow);
        diff.push(d)?;
        borrow = b_out;
    }
    debug_assert_eq!(borrow, 0, "sub_mag - minuend smaller than subtrahend");
    Ok(diff)
}

// a * m, one limb longer than 'a' when the final carry is non-zero.
pub(crate) fn mul_limb(a: &LimbStore, m: Limb) -> Result<LimbStore> {
    let mut prod = LimbStore::new();
    let mut carry: Limb = 0;
    for &x in a.as_slice() {
        let (lo, c) = mul_add(x, m, 0, carry);
        prod.push(lo)?;
        carry = c;
    }
    if carry > 0 {
        prod.push(carry)?;
    }
    Ok(prod)
}

// Divide by a single non-zero limb.
// The quotient keeps the length of 'a' and is not trimmed.
pub(crate) fn short_div(a: &LimbStore, d: Limb) -> Result<(/* quotient */ LimbStore, /* remainder */ Limb)> {
    let mut q = LimbStore::zeroed(a.len())?;
    let mut rem: Limb = 0;
    for i in (0..a.len()).rev() {
        let (qi, r) = div_wide(rem, a.get(i), d);
        q.set(i, qi)?;
        rem = r;
    }
    Ok((q, rem))
}

// Is the window rem[at..at + width] below 'trial'? Compares from the most-significant limb.
fn window_less(rem: &LimbStore, trial: &LimbStore, at: usize, width: usize) -> bool {
    for k in (0..width).rev() {
        let (x, y) = (rem.get(at + k), trial.get(k));
        if x != y {
            return x < y
        }
    }
    false
}

// rem[at..at + width] -= trial
fn sub_window(rem: &mut LimbStore, trial: &LimbStore, at: usize, width: usize) -> Result<()> {
    let mut borrow: Limb = 0;
    for k in 0..width {
        let (d, b_out) = sub_with_borrow(rem.get(at + k), trial.get(k), borrow);
        rem.set(at + k, d)?;
        borrow = b_out;
    }
    debug_assert_eq!(borrow, 0, "sub_window - trial product exceeds the window");
    Ok(())
}

// Knuth's Algorithm D on magnitudes.
// pre-conditions: 'b' is trimmed with at least two limbs; a >= b.
fn long_div(a: &LimbStore, b: &LimbStore) -> Result<LimbStore> {
    let n = b.len();
    debug_assert!(n >= 2 && a.len() >= n);
    // scale both operands so the leading divisor limb is at least BASE/2.
    let f = (BigInt::BASE / (b.get(n - 1) as Wide + 1)) as Limb;
    let divisor = mul_limb(b, f)?;
    debug_assert_eq!(divisor.len(), n);
    let mut rem = mul_limb(a, f)?;
    rem.push(0)?;
    let top = divisor.get(n - 1) as Wide;
    log::trace!("long_div - {} by {} limbs, scale {f}", a.len(), n);

    let mut quotient = LimbStore::new();
    for i in (0..rem.len() - n).rev() {
        // estimate from the two leading limbs of the window; never too small.
        let r = join(rem.get(i + n), rem.get(i + n - 1));
        let mut qt = min(r / top, BigInt::BASE - 1) as Limb;
        let mut trial = mul_limb(&divisor, qt)?;
        while window_less(&rem, &trial, i, n + 1) {
            qt -= 1;
            trial = sub_mag(&trial, &divisor)?;
            log::trace!("long_div - corrected quotient limb {i} to {qt:#x}");
        }
        sub_window(&mut rem, &trial, i, n + 1)?;
        quotient.push(qt)?;
    }
    // limbs were collected most-significant first.
    quotient.reverse()?;
    Ok(quotient)
}

impl BigInt {
    pub const BASE: Wide = 1 << Limb::BITS;

    pub(crate) fn valid(&self) {
        #[cfg(any(debug_assertions, release_test))]
        {
            assert_ne!(self.mag.last(), Some(0), "BigInt::valid - most-significant zero limb");
            assert!(!(self.neg && self.mag.is_empty()), "BigInt::valid - negative zero");
        }
    }

    pub fn zero() -> Self {
        BigInt { neg: false, mag: LimbStore::new() }
    }

    pub fn one() -> Self {
        BigInt::from_wide(false, 1)
    }

    // Never allocates: a wide word fits inline.
    fn from_wide(neg: bool, v: Wide) -> Self {
        let mag = match split(v) {
            (0, 0) => LimbStore::new(),
            (lo, 0) => LimbStore::inline(&[lo]),
            (lo, hi) => LimbStore::inline(&[lo, hi]),
        };
        let n = BigInt { neg: neg && v != 0, mag };
        n.valid();
        n
    }

    /// Builds a value from a sign and little-endian limbs, trimming most-significant zeros.
    pub fn from_parts(neg: bool, mut mag: LimbStore) -> Result<Self> {
        trim(&mut mag)?;
        let n = BigInt { neg: neg && !mag.is_empty(), mag };
        n.valid();
        Ok(n)
    }

    pub fn from_limbs(neg: bool, limbs: &[Limb]) -> Result<Self> {
        BigInt::from_parts(neg, LimbStore::from_slice(limbs)?)
    }

    pub fn is_zero(&self) -> bool {
        self.mag.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.neg
    }

    // -1, 0 or 1
    pub fn signum(&self) -> i32 {
        match (self.neg, self.is_zero()) {
            (_, true) => 0,
            (true, _) => -1,
            _ => 1,
        }
    }

    /// The magnitude, least-significant limb first.
    pub fn limbs(&self) -> &[Limb] {
        self.mag.as_slice()
    }

    pub(crate) fn mag(&self) -> &LimbStore {
        &self.mag
    }

    pub fn limb_len(&self) -> usize {
        self.mag.len()
    }

    // number of significant bits in the magnitude
    pub fn bits(&self) -> u64 {
        match self.mag.last() {
            None => 0,
            Some(top) => self.mag.len() as u64 * Limb::BITS as u64 - leading_zeroes_count(top) as u64,
        }
    }

    pub fn negated(&self) -> BigInt {
        let mut n = self.clone();
        n.neg = !n.neg && !n.is_zero();
        n
    }

    pub fn abs(&self) -> BigInt {
        BigInt { neg: false, mag: self.mag.clone() }
    }

    /// Exchanges two values without copying limbs.
    pub fn swap(&mut self, other: &mut BigInt) {
        std::mem::swap(&mut self.neg, &mut other.neg);
        self.mag.swap(&mut other.mag);
    }

    pub fn try_add(&self, rhs: &BigInt) -> Result<BigInt> {
        if self.neg == rhs.neg {
            return BigInt::from_parts(self.neg, add_mag(&self.mag, &rhs.mag)?)
        }
        // differing signs: subtract the smaller magnitude from the larger one,
        // whose sign the result takes.
        match cmp_mag(&self.mag, &rhs.mag) {
            Ordering::Less => BigInt::from_parts(rhs.neg, sub_mag(&rhs.mag, &self.mag)?),
            _ => BigInt::from_parts(self.neg, sub_mag(&self.mag, &rhs.mag)?),
        }
    }

    pub fn try_sub(&self, rhs: &BigInt) -> Result<BigInt> {
        self.try_add(&rhs.negated())
    }

    // elementary school-book multiplication
    pub fn try_mul(&self, rhs: &BigInt) -> Result<BigInt> {
        if self.is_zero() || rhs.is_zero() {
            return Ok(BigInt::zero())
        }
        let (a, b) = (self.mag.as_slice(), rhs.mag.as_slice());
        // sized up front so the accumulation never reallocates.
        let mut acc = LimbStore::zeroed(a.len() + b.len() + 1)?;
        for (i, &x) in a.iter().enumerate() {
            // clear carry when starting with a new row
            let mut carry: Limb = 0;
            for (j, &y) in b.iter().enumerate() {
                let (lo, c) = mul_add(x, y, acc.get(i + j), carry);
                acc.set(i + j, lo)?;
                carry = c;
            }
            // the column right of this row has not been written yet
            acc.set(i + b.len(), carry)?;
        }
        BigInt::from_parts(self.neg ^ rhs.neg, acc)
    }

    fn quotient(&self, divisor: &BigInt) -> Result<BigInt> {
        if divisor.is_zero() {
            log::debug!("quotient - division by zero");
            return Err(BigIntError::DivideByZero)
        }
        let q = if cmp_mag(&self.mag, &divisor.mag) == Ordering::Less {
            LimbStore::new()
        } else if divisor.mag.len() == 1 {
            short_div(&self.mag, divisor.mag.get(0))?.0
        } else {
            long_div(&self.mag, &divisor.mag)?
        };
        BigInt::from_parts(self.neg ^ divisor.neg, q)
    }

    /// Truncating division: the quotient rounds toward zero and the remainder,
    /// `self - q * divisor`, takes the sign of `self`.
    pub fn divide(&self, divisor: &BigInt) -> Result<(/* quotient */ BigInt, /* remainder */ BigInt)> {
        let q = self.quotient(divisor)?;
        let r = self.try_sub(&q.try_mul(divisor)?)?;
        Ok((q, r))
    }

    pub fn try_div(&self, divisor: &BigInt) -> Result<BigInt> {
        self.quotient(divisor)
    }

    pub fn try_rem(&self, divisor: &BigInt) -> Result<BigInt> {
        Ok(self.divide(divisor)?.1)
    }

    /// Shifts left by `n` bits; a negative `n` shifts right.
    pub fn try_shl(&self, n: i64) -> Result<BigInt> {
        if n < 0 {
            self.shr_bits(n.unsigned_abs())
        } else {
            self.shl_bits(n as u64)
        }
    }

    /// Arithmetic right shift by `n` bits, rounding toward negative infinity.
    /// A negative `n` shifts left.
    pub fn try_shr(&self, n: i64) -> Result<BigInt> {
        if n < 0 {
            self.shl_bits(n.unsigned_abs())
        } else {
            self.shr_bits(n as u64)
        }
    }

    fn shl_bits(&self, n: u64) -> Result<BigInt> {
        if self.is_zero() {
            return Ok(BigInt::zero())
        }
        let small = (n % Limb::BITS as u64) as u32;
        let whole = usize::try_from(n / Limb::BITS as u64)
            .map_err(|_| BigIntError::AllocFailed { requested: usize::MAX })?;
        let scaled = mul_limb(&self.mag, 1 << small)?;
        // the whole-limb part becomes zero limbs below the scaled magnitude.
        let mut mag = LimbStore::zeroed(whole)?;
        for &l in scaled.as_slice() {
            mag.push(l)?;
        }
        BigInt::from_parts(self.neg, mag)
    }

    fn shr_bits(&self, n: u64) -> Result<BigInt> {
        let small = (n % Limb::BITS as u64) as u32;
        let whole = min(n / Limb::BITS as u64, self.mag.len() as u64) as usize;
        let (dropped, kept) = self.mag.as_slice().split_at(whole);
        let (mut q, rem) = short_div(&LimbStore::from_slice(kept)?, 1 << small)?;
        if self.neg && (rem != 0 || dropped.iter().any(|&l| l != 0)) {
            // discarded one-bits round a negative value down
            q = add_mag(&q, &LimbStore::inline(&[1]))?;
        }
        BigInt::from_parts(self.neg, q)
    }

    pub fn inc(&mut self) -> Result<()> {
        let mut next = self.try_add(&BigInt::one())?;
        self.swap(&mut next);
        Ok(())
    }

    pub fn dec(&mut self) -> Result<()> {
        let mut next = self.try_sub(&BigInt::one())?;
        self.swap(&mut next);
        Ok(())
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.neg, other.neg) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => cmp_mag(&self.mag, &other.mag),
            (true, true) => cmp_mag(&other.mag, &self.mag),
        }
    }
}

impl From<i64> for BigInt {
    fn from(v: i64) -> Self {
        BigInt::from_wide(v < 0, v.unsigned_abs())
    }
}

impl From<i32> for BigInt {
    fn from(v: i32) -> Self {
        BigInt::from(v as i64)
    }
}

impl From<u64> for BigInt {
    fn from(v: u64) -> Self {
        BigInt::from_wide(false, v)
    }
}

impl From<u32> for BigInt {
    fn from(v: u32) -> Self {
        BigInt::from_wide(false, v as Wide)
    }
}

impl TryFrom<&BigInt> for i64 {
    type Error = BigIntError;

    fn try_from(n: &BigInt) -> Result<i64> {
        let overflow = BigIntError::Overflow { target: "i64" };
        if n.mag.len() > 2 {
            return Err(overflow)
        }
        let m = join(n.mag.get(1), n.mag.get(0));
        match n.neg {
            false if m <= i64::MAX as u64 => Ok(m as i64),
            true if m <= i64::MIN.unsigned_abs() => Ok((m as i64).wrapping_neg()),
            _ => Err(overflow),
        }
    }
}
