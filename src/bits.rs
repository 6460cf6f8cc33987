use crate::{Limb, Wide};

// sub_with_borrow calculates: diff = x - y - borrow.
// The borrow input must be 0 or 1.
// The borrow_out is guaranteed to be 0 or 1.
pub fn sub_with_borrow(x: Limb, y: Limb, borrow: Limb) -> (/* diff */ Limb, /* borrow_out */ Limb) {
    debug_assert!(borrow <= 1);
    let (diff, o1) = x.overflowing_sub(y);
    let (diff, o2) = diff.overflowing_sub(borrow);
    (diff, o1 as Limb | o2 as Limb)
}

pub fn add_with_carry(x: Limb, y: Limb, carry: Limb) -> (/* sum */ Limb, /* carry_out */ Limb) {
    debug_assert!(carry <= 1);
    let (sum, o1) = x.overflowing_add(y);
    let (sum, o2) = sum.overflowing_add(carry);
    (sum, o1 as Limb | o2 as Limb)
}

// x * y + acc + carry never exceeds Wide::MAX:
// (B-1)^2 + 2(B-1) == B^2 - 1
pub fn mul_add(x: Limb, y: Limb, acc: Limb, carry: Limb) -> (/* lo */ Limb, /* carry_out */ Limb) {
    let w: Wide = x as Wide * y as Wide + acc as Wide + carry as Wide;
    split(w)
}

pub fn split(w: Wide) -> (/* lo */ Limb, /* hi */ Limb) {
    (w as Limb, (w >> Limb::BITS) as Limb)
}

pub fn join(hi: Limb, lo: Limb) -> Wide {
    (hi as Wide) << Limb::BITS | lo as Wide
}

// Divide the two-limb value (hi, lo) by a single limb.
// Requires hi < divisor so the quotient fits in one limb.
pub fn div_wide(hi: Limb, lo: Limb, divisor: Limb) -> (/* quotient */ Limb, /* remainder */ Limb) {
    assert!(divisor > 0, "div_wide - divide by zero error");
    debug_assert!(hi < divisor, "div_wide - quotient overflow error");
    let n = join(hi, lo);
    let d = divisor as Wide;
    ((n / d) as Limb, (n % d) as Limb)
}

// number of significant bits in x; zero for x == 0.
pub fn len_binary_limb(a: Limb) -> u32 {
    let mut len = 0;
    let mut x = a as usize;
    if x >= 1 << 16 {
        x >>= 16;
        len += 16;
    }
    if x >= 1 << 8 {
        x >>= 8;
        len += 8;
    }
    len + LEN_8[x] as u32
}

pub fn leading_zeroes_count(x: Limb) -> u32 {
    Limb::BITS - len_binary_limb(x)
}

// "length" of a 8-bit value in binary representation.
pub const LEN_8: [u8; 256] = [
    0, 1, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8
];

#[cfg(test)]
mod bits_test {
    use crate::bits::{add_with_carry, div_wide, join, leading_zeroes_count, len_binary_limb, mul_add, split, sub_with_borrow};
    use crate::Limb;

    fn init() {
        crate::init_logger(true)
    }

    #[test]
    fn carry_and_borrow() {
        init();
        assert_eq!(add_with_carry(1, 2, 0), (3, 0));
        assert_eq!(add_with_carry(Limb::MAX, 1, 0), (0, 1));
        assert_eq!(add_with_carry(Limb::MAX, Limb::MAX, 1), (Limb::MAX, 1));
        assert_eq!(add_with_carry(Limb::MAX, 0, 1), (0, 1));

        assert_eq!(sub_with_borrow(3, 2, 0), (1, 0));
        assert_eq!(sub_with_borrow(0, 1, 0), (Limb::MAX, 1));
        assert_eq!(sub_with_borrow(0, 0, 1), (Limb::MAX, 1));
        assert_eq!(sub_with_borrow(5, 5, 1), (Limb::MAX, 1));
        assert_eq!(sub_with_borrow(5, 4, 1), (0, 0));
    }

    #[test]
    fn limb_multiply() {
        init();
        assert_eq!(mul_add(3, 7, 0, 0), (21, 0));
        assert_eq!(mul_add(Limb::MAX, Limb::MAX, 0, 0), (1, Limb::MAX - 1));
        // the largest value the accumulator can ever produce
        assert_eq!(mul_add(Limb::MAX, Limb::MAX, Limb::MAX, Limb::MAX), (Limb::MAX, Limb::MAX));
        assert_eq!(mul_add(1 << 31, 2, 0, 1), (1, 1));
    }

    #[test]
    fn wide_words() {
        init();
        assert_eq!(split(0x0000_0001_FFFF_FFFE), (0xFFFF_FFFE, 1));
        assert_eq!(join(1, 0xFFFF_FFFE), 0x0000_0001_FFFF_FFFE);
        assert_eq!(div_wide(0, 100, 35), (2, 30));
        assert_eq!(div_wide(1, 0, 2), (1 << 31, 0));
        assert_eq!(div_wide(34, 100, 35), (0xF8AF_8AFB, 19));
        assert_eq!(div_wide(0xFFFF_FFFE, 0xFFFF_FFFF, Limb::MAX), (Limb::MAX, 0xFFFF_FFFE));
    }

    #[test]
    fn binary_length() {
        init();
        assert_eq!(len_binary_limb(0), 0);
        assert_eq!(len_binary_limb(1), 1);
        assert_eq!(len_binary_limb(255), 8);
        assert_eq!(len_binary_limb(256), 9);
        assert_eq!(len_binary_limb(0x0001_0000), 17);
        assert_eq!(len_binary_limb(Limb::MAX), 32);
        assert_eq!(leading_zeroes_count(1), 31);
        assert_eq!(leading_zeroes_count(1 << 31), 0);
        assert_eq!(leading_zeroes_count(0), 32);
    }
}
