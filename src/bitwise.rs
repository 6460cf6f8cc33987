use std::cmp::max;

use crate::bits::add_with_carry;
use crate::error::Result;
use crate::store::LimbStore;
use crate::{BigInt, Limb};

// Two's complement view of a value: 'limbs' extended by infinitely many 'fill' limbs,
// where the fill is all ones for negative values and zero otherwise.
struct TwosComplement {
    limbs: LimbStore,
    fill: Limb,
}

// !x + 1 over the limbs of x. A carry out of the top limb is kept as an extra limb.
fn complement_and_increment(x: &LimbStore) -> Result<LimbStore> {
    let mut out = LimbStore::new();
    let mut carry: Limb = 1;
    for &l in x.as_slice() {
        let (s, c) = add_with_carry(!l, 0, carry);
        out.push(s)?;
        carry = c;
    }
    if carry > 0 {
        out.push(carry)?;
    }
    Ok(out)
}

impl TwosComplement {
    fn from_int(n: &BigInt) -> Result<Self> {
        if !n.is_negative() {
            return Ok(TwosComplement { limbs: n.mag().clone(), fill: 0 })
        }
        Ok(TwosComplement { limbs: complement_and_increment(n.mag())?, fill: Limb::MAX })
    }

    fn get(&self, i: usize) -> Limb {
        if i < self.limbs.len() {
            self.limbs.get(i)
        } else {
            self.fill
        }
    }

    fn into_int(self) -> Result<BigInt> {
        match self.fill {
            0 => BigInt::from_parts(false, self.limbs),
            _ => BigInt::from_parts(true, complement_and_increment(&self.limbs)?),
        }
    }
}

// Applies 'op' limb-wise over the two's complement forms of 'a' and 'b'.
// The fill of the result, and so its sign, is 'op' applied to the operands' fills.
fn combine(a: &BigInt, b: &BigInt, op: impl Fn(Limb, Limb) -> Limb) -> Result<BigInt> {
    let (x, y) = (TwosComplement::from_int(a)?, TwosComplement::from_int(b)?);
    let mut limbs = LimbStore::new();
    for i in 0..max(x.limbs.len(), y.limbs.len()) {
        limbs.push(op(x.get(i), y.get(i)))?;
    }
    TwosComplement { limbs, fill: op(x.fill, y.fill) }.into_int()
}

impl BigInt {
    pub fn try_and(&self, rhs: &BigInt) -> Result<BigInt> {
        combine(self, rhs, |x, y| x & y)
    }

    pub fn try_or(&self, rhs: &BigInt) -> Result<BigInt> {
        combine(self, rhs, |x, y| x | y)
    }

    pub fn try_xor(&self, rhs: &BigInt) -> Result<BigInt> {
        combine(self, rhs, |x, y| x ^ y)
    }

    /// Bitwise complement, `-(self + 1)`.
    pub fn try_not(&self) -> Result<BigInt> {
        Ok(self.try_add(&BigInt::one())?.negated())
    }
}

#[cfg(test)]
mod bitwise_tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::BigInt;

    fn init() {
        crate::init_logger(true)
    }

    fn int(s: &str) -> BigInt {
        s.parse().unwrap()
    }

    #[test]
    fn known_answers() {
        init();
        // a, b, a & b, a | b, a ^ b, !a
        let cases = [
            ("12", "10", "8", "14", "6", "-13"),
            ("-12", "10", "0", "-2", "-2", "11"),
            ("12", "-10", "4", "-2", "-6", "-13"),
            ("-12", "-10", "-12", "-10", "2", "11"),
            ("-1", "1180591620717411303429", "1180591620717411303429", "-1", "-1180591620717411303430", "0"),
            ("18446744073709551616", "-1", "18446744073709551616", "-1", "-18446744073709551617",
             "-18446744073709551617"),
            ("-18446744073709551616", "18446744073709551615", "0", "-1", "-1", "18446744073709551615"),
            ("-4294967296", "-4294967295", "-4294967296", "-4294967295", "1", "4294967295"),
            ("-123456789012345678901234567890", "987654321098765432109876543210",
             "985710360914275162674813760554", "-121512828827855409466171785234",
             "-1107223189742130572140985545788", "123456789012345678901234567889"),
        ];
        for (a, b, and, or, xor, not) in cases {
            let (a, b) = (int(a), int(b));
            assert_eq!(a.try_and(&b).unwrap(), int(and), "{a} & {b}");
            assert_eq!(a.try_or(&b).unwrap(), int(or), "{a} | {b}");
            assert_eq!(a.try_xor(&b).unwrap(), int(xor), "{a} ^ {b}");
            assert_eq!(a.try_not().unwrap(), int(not), "!{a}");
        }
    }

    #[test]
    fn zero_and_minus_one() {
        init();
        let zero = BigInt::zero();
        let minus_one = int("-1");
        assert_eq!(zero.try_not().unwrap(), minus_one);
        assert_eq!(minus_one.try_not().unwrap(), zero);
        assert_eq!(zero.try_and(&minus_one).unwrap(), zero);
        assert_eq!(zero.try_or(&minus_one).unwrap(), minus_one);
        assert_eq!(zero.try_xor(&zero).unwrap(), zero);
        assert!(!minus_one.try_xor(&minus_one).unwrap().is_negative());
    }

    #[test]
    fn identities() {
        init();
        let mut rng = StdRng::seed_from_u64(99);
        let minus_one = int("-1");
        for _ in 0..300 {
            let limbs: Vec<u32> = (0..rng.gen_range(0..9)).map(|_| rng.gen()).collect();
            let a = BigInt::from_limbs(rng.gen(), &limbs).unwrap();
            let limbs: Vec<u32> = (0..rng.gen_range(0..9)).map(|_| rng.gen()).collect();
            let b = BigInt::from_limbs(rng.gen(), &limbs).unwrap();

            let not_a = a.try_not().unwrap();
            assert_eq!(not_a, a.try_add(&BigInt::one()).unwrap().negated());
            assert_eq!(not_a.try_not().unwrap(), a);
            assert_eq!(a.try_and(&a).unwrap(), a);
            assert_eq!(a.try_or(&a).unwrap(), a);
            assert!(a.try_xor(&a).unwrap().is_zero());
            assert_eq!(a.try_or(&not_a).unwrap(), minus_one);
            assert!(a.try_and(&not_a).unwrap().is_zero());
            assert_eq!(a.try_xor(&minus_one).unwrap(), not_a);
            // a + b == (a ^ b) + 2 * (a & b)
            let twice_and = a.try_and(&b).unwrap().try_shl(1).unwrap();
            assert_eq!(a.try_add(&b).unwrap(), a.try_xor(&b).unwrap().try_add(&twice_and).unwrap());
        }
    }

    #[test]
    fn agrees_with_native() {
        init();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1000 {
            let (x, y): (i64, i64) = (rng.gen(), rng.gen());
            let (a, b) = (BigInt::from(x), BigInt::from(y));
            assert_eq!(a.try_and(&b).unwrap(), BigInt::from(x & y));
            assert_eq!(a.try_or(&b).unwrap(), BigInt::from(x | y));
            assert_eq!(a.try_xor(&b).unwrap(), BigInt::from(x ^ y));
            assert_eq!(a.try_not().unwrap(), BigInt::from(!x));
        }
    }
}
