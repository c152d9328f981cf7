pub mod error;
pub mod types;

#[cfg(feature = "diagnosis")]
pub mod diagnosis;

pub use error::DiagnosisError;
pub use types::*;

/// Standard result type for all fin-diagnosis operations
pub type DiagnosisResult<T> = Result<T, DiagnosisError>;
