use std::fmt::{Display, Formatter, Write};
use std::str::FromStr;

use crate::bits::mul_add;
use crate::error::{BigIntError, Result};
use crate::int::{short_div, trim};
use crate::store::LimbStore;
use crate::{BigInt, Limb};

// decimal digits that always fit in one limb
const CHUNK_DIGITS: usize = 9;
const CHUNK: Limb = 1_000_000_000;

pub fn val(c: u8) -> std::result::Result<u8, char> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        _ => {
            log::error!("dec - reject '{}'", c as char);
            Err(c as char)
        },
    }
}

// mag = mag * m + a
fn mul_add_in_place(mag: &mut LimbStore, m: Limb, a: Limb) -> Result<()> {
    let mut carry = a;
    for i in 0..mag.len() {
        let (lo, c) = mul_add(mag.get(i), m, 0, carry);
        mag.set(i, lo)?;
        carry = c;
    }
    if carry > 0 {
        mag.push(carry)?;
    }
    Ok(())
}

impl BigInt {
    /// Parses an optional leading `-` followed by one or more decimal digits.
    /// Anything else, including an empty string, a lone `-` and a leading `+`, is a format error.
    pub fn parse(s: &str) -> Result<BigInt> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        let start = s.len() - digits.len();
        if digits.is_empty() {
            log::error!("dec - no digits in '{s}'");
            return Err(BigIntError::format(s, s.len()))
        }
        let mut mag = LimbStore::new();
        // fold nine digits at a time: mag = mag * 10^k + chunk
        for (k, chunk) in digits.as_bytes().chunks(CHUNK_DIGITS).enumerate() {
            let mut v: Limb = 0;
            for (j, &c) in chunk.iter().enumerate() {
                let d = val(c).map_err(|_| BigIntError::format(s, start + k * CHUNK_DIGITS + j))?;
                v = v * 10 + d as Limb;
            }
            mul_add_in_place(&mut mag, (10 as Limb).pow(chunk.len() as u32), v)?;
        }
        BigInt::from_parts(start == 1, mag)
    }

    // Decimal digits of the magnitude, without sign.
    fn magnitude_digits(&self) -> Result<String> {
        if self.is_zero() {
            return Ok("0".to_string())
        }
        // base 10^9 digits, least-significant first
        let mut chunks: Vec<Limb> = Vec::new();
        let mut rest = self.mag().clone();
        while !rest.is_empty() {
            let (mut q, r) = short_div(&rest, CHUNK)?;
            trim(&mut q)?;
            chunks.push(r);
            rest = q;
        }
        let mut s = String::with_capacity(chunks.len() * CHUNK_DIGITS);
        for (i, c) in chunks.iter().rev().enumerate() {
            // only the leading chunk goes without zero padding
            let _ = match i {
                0 => write!(s, "{c}"),
                _ => write!(s, "{c:09}"),
            };
        }
        Ok(s)
    }
}

impl FromStr for BigInt {
    type Err = BigIntError;

    fn from_str(s: &str) -> Result<BigInt> {
        BigInt::parse(s)
    }
}

impl Display for BigInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let digits = self.magnitude_digits().map_err(|_| std::fmt::Error)?;
        f.pad_integral(!self.is_negative(), "", &digits)
    }
}

#[cfg(test)]
mod dec_tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::dec::val;
    use crate::error::BigIntError;
    use crate::BigInt;

    fn init() {
        crate::init_logger(true)
    }

    #[test]
    fn digit_values() {
        init();
        assert_eq!(val(b'0'), Ok(0));
        assert_eq!(val(b'9'), Ok(9));
        assert_eq!(val(b'a'), Err('a'));
        assert_eq!(val(b'-'), Err('-'));
    }

    #[test]
    fn round_trip() {
        init();
        for s in ["0", "7", "-7", "4294967295", "4294967296", "-18446744073709551616",
            "1000000000", "999999999", "1000000000000000000000000000001",
            "-123456789012345678901234567890123456789012345678901234567890"] {
            assert_eq!(s.parse::<BigInt>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn parse_values() {
        init();
        assert_eq!("4294967296".parse::<BigInt>().unwrap().limbs(), [0, 1]);
        assert_eq!("-0".parse::<BigInt>().unwrap(), BigInt::zero());
        assert!(!"-0".parse::<BigInt>().unwrap().is_negative());
        assert_eq!("000123".parse::<BigInt>().unwrap(), BigInt::from(123));
        assert_eq!("-000".parse::<BigInt>().unwrap().to_string(), "0");
        assert_eq!("-9223372036854775808".parse::<BigInt>().unwrap(), BigInt::from(i64::MIN));
    }

    #[test]
    fn rejects_malformed() {
        init();
        assert_eq!("12a3".parse::<BigInt>(),
                   Err(BigIntError::Format { input: "12a3".to_string(), position: 2, found: Some('a') }));
        assert_eq!("".parse::<BigInt>(),
                   Err(BigIntError::Format { input: "".to_string(), position: 0, found: None }));
        assert_eq!("-".parse::<BigInt>(),
                   Err(BigIntError::Format { input: "-".to_string(), position: 1, found: None }));
        assert_eq!("+5".parse::<BigInt>(),
                   Err(BigIntError::Format { input: "+5".to_string(), position: 0, found: Some('+') }));
        assert_eq!("--5".parse::<BigInt>(),
                   Err(BigIntError::Format { input: "--5".to_string(), position: 1, found: Some('-') }));
        assert_eq!(" 5".parse::<BigInt>().unwrap_err().to_string(),
                   "invalid decimal integer ' 5': unexpected Some(' ') at byte 0");
        // the offending digit sits past the first nine-digit chunk
        assert_eq!("1234567890x".parse::<BigInt>(),
                   Err(BigIntError::Format { input: "1234567890x".to_string(), position: 10, found: Some('x') }));
        assert_eq!("12é".parse::<BigInt>(),
                   Err(BigIntError::Format { input: "12é".to_string(), position: 2, found: Some('é') }));
    }

    #[test]
    fn formatting_flags() {
        init();
        let n = BigInt::from(-42);
        assert_eq!(format!("{n:>6}"), "   -42");
        assert_eq!(format!("{n:06}"), "-00042");
        assert_eq!(format!("{:+}", BigInt::from(42)), "+42");
        assert_eq!(format!("{:<4}|", BigInt::zero()), "0   |");
    }

    #[test]
    fn agrees_with_native() {
        init();
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..500 {
            let x: i128 = rng.gen::<i128>() >> rng.gen_range(0..127u32);
            let s = x.to_string();
            let n: BigInt = s.parse().unwrap();
            assert_eq!(n.to_string(), s);
        }
    }
}
