use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BigIntError {
    /// Decimal text that does not match `-?[0-9]+`.
    #[error("invalid decimal integer '{input}': unexpected {found:?} at byte {position}")]
    Format {
        input: String,
        position: usize,
        found: Option<char>,
    },

    #[error("division by zero")]
    DivideByZero,

    /// A limb allocation failed while growing, promoting or unsharing a magnitude.
    #[error("failed to allocate {requested} limbs")]
    AllocFailed { requested: usize },

    #[error("value does not fit in {target}")]
    Overflow { target: &'static str },
}

pub type Result<T> = std::result::Result<T, BigIntError>;

impl BigIntError {
    pub(crate) fn format(input: &str, position: usize) -> Self {
        BigIntError::Format {
            input: input.to_string(),
            position,
            found: input[position..].chars().next(),
        }
    }
}
