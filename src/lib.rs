use std::io::Write;

use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;

use crate::store::LimbStore;

pub fn init_logger(is_test: bool) {
    let _ = Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                     "{} [{}] - {}",
                     Local::now().format("%Y-%m-%dT%H:%M:%S"),
                     record.level(),
                     record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .is_test(is_test)
        .try_init();
}

// One base-2^32 digit of a magnitude.
pub type Limb = u32;
// Wide enough to hold a limb product plus two limbs of carry.
pub type Wide = u64;

/// Arbitrary-precision signed integer in sign-magnitude form.
///
/// Copies are cheap: a magnitude longer than [`LimbStore::INLINE_CAP`] limbs is shared
/// between copies until one of them is mutated.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigInt {
    // true for negative values. The value zero is never negative.
    // This invariant is maintained by all operations.
    neg: bool,
    // The magnitude, least-significant limb first.
    // Never carries a most-significant zero limb; zero is the empty sequence.
    mag: LimbStore,
}

pub mod bits;
pub mod bitwise;
pub mod buffer;
pub mod dec;
pub mod error;
pub mod int;
pub mod ops;
pub mod store;

pub use error::{BigIntError, Result};
