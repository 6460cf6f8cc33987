use std::ops::{Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign,
               Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign};

use crate::error::Result;
use crate::BigInt;

// Operators cannot report errors: a failed operation panics with the error's message,
// like primitive division by zero does. Use the try_* methods to recover instead.
fn settle(res: Result<BigInt>) -> BigInt {
    match res {
        Ok(n) => n,
        Err(e) => panic!("{e}"),
    }
}

// Binary operator over every owned/borrowed pairing and native right-hand sides,
// plus the compound form. The compound form computes into a temporary and swaps it in,
// so a panic leaves the left operand unchanged.
macro_rules! bigint_binop {
    ( $tr:ident, $f:ident, $tra:ident, $fa:ident, $try_f:ident ) => {
        impl $tr<&BigInt> for &BigInt {
            type Output = BigInt;

            fn $f(self, rhs: &BigInt) -> BigInt {
                settle(self.$try_f(rhs))
            }
        }

        impl $tr<BigInt> for BigInt {
            type Output = BigInt;

            fn $f(self, rhs: BigInt) -> BigInt {
                settle(self.$try_f(&rhs))
            }
        }

        impl $tr<&BigInt> for BigInt {
            type Output = BigInt;

            fn $f(self, rhs: &BigInt) -> BigInt {
                settle(self.$try_f(rhs))
            }
        }

        impl $tr<BigInt> for &BigInt {
            type Output = BigInt;

            fn $f(self, rhs: BigInt) -> BigInt {
                settle(self.$try_f(&rhs))
            }
        }

        impl $tra<&BigInt> for BigInt {
            fn $fa(&mut self, rhs: &BigInt) {
                let mut res = settle(self.$try_f(rhs));
                self.swap(&mut res);
            }
        }

        impl $tra<BigInt> for BigInt {
            fn $fa(&mut self, rhs: BigInt) {
                let mut res = settle(self.$try_f(&rhs));
                self.swap(&mut res);
            }
        }

        bigint_binop!(@native $tr, $f, $tra, $fa, $try_f, i32);
        bigint_binop!(@native $tr, $f, $tra, $fa, $try_f, i64);
    };

    ( @native $tr:ident, $f:ident, $tra:ident, $fa:ident, $try_f:ident, $t:ty ) => {
        impl $tr<$t> for BigInt {
            type Output = BigInt;

            fn $f(self, rhs: $t) -> BigInt {
                settle(self.$try_f(&BigInt::from(rhs)))
            }
        }

        impl $tr<$t> for &BigInt {
            type Output = BigInt;

            fn $f(self, rhs: $t) -> BigInt {
                settle(self.$try_f(&BigInt::from(rhs)))
            }
        }

        impl $tra<$t> for BigInt {
            fn $fa(&mut self, rhs: $t) {
                let mut res = settle(self.$try_f(&BigInt::from(rhs)));
                self.swap(&mut res);
            }
        }
    };
}

bigint_binop!(Add, add, AddAssign, add_assign, try_add);
bigint_binop!(Sub, sub, SubAssign, sub_assign, try_sub);
bigint_binop!(Mul, mul, MulAssign, mul_assign, try_mul);
bigint_binop!(Div, div, DivAssign, div_assign, try_div);
bigint_binop!(Rem, rem, RemAssign, rem_assign, try_rem);
bigint_binop!(BitAnd, bitand, BitAndAssign, bitand_assign, try_and);
bigint_binop!(BitOr, bitor, BitOrAssign, bitor_assign, try_or);
bigint_binop!(BitXor, bitxor, BitXorAssign, bitxor_assign, try_xor);

// shift amounts are bit counts; a negative count shifts the other way.
macro_rules! bigint_shift {
    ( $tr:ident, $f:ident, $tra:ident, $fa:ident, $try_f:ident, $t:ty ) => {
        impl $tr<$t> for &BigInt {
            type Output = BigInt;

            fn $f(self, n: $t) -> BigInt {
                settle(self.$try_f(n as i64))
            }
        }

        impl $tr<$t> for BigInt {
            type Output = BigInt;

            fn $f(self, n: $t) -> BigInt {
                settle(self.$try_f(n as i64))
            }
        }

        impl $tra<$t> for BigInt {
            fn $fa(&mut self, n: $t) {
                let mut res = settle(self.$try_f(n as i64));
                self.swap(&mut res);
            }
        }
    };
}

bigint_shift!(Shl, shl, ShlAssign, shl_assign, try_shl, i32);
bigint_shift!(Shl, shl, ShlAssign, shl_assign, try_shl, i64);
bigint_shift!(Shr, shr, ShrAssign, shr_assign, try_shr, i32);
bigint_shift!(Shr, shr, ShrAssign, shr_assign, try_shr, i64);

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        self.negated()
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        self.negated()
    }
}

impl Not for BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        settle(self.try_not())
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        settle(self.try_not())
    }
}
