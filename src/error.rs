use ruint::aliases::U256;

/// Every failure the field, curve, signature and encoding layers can report.
///
/// All of them end the operation that raised them; nothing in this crate
/// retries or returns partial results.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("value {num} is not in field range 0 to {prime} - 1")]
    OutOfRange { num: U256, prime: U256 },
    #[error("cannot combine elements of different fields (prime {left} and prime {right})")]
    FieldMismatch { left: U256, right: U256 },
    #[error("point is not on the curve y^2 = x^3 + a*x + b: {0}")]
    NotOnCurve(String),
    #[error("points are not on the same curve")]
    CurveMismatch,
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid scalar: {0}")]
    InvalidScalar(String),
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),
    #[error("integer {0} is too large")]
    IntegerTooLarge(U256),
    #[error("base58check checksum mismatch")]
    InvalidChecksum,
    #[error("unsupported prefix byte {0:#04x}")]
    InvalidPrefix(u8),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedEncoding(msg.into())
    }
}
