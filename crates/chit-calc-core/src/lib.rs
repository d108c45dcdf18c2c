pub mod error;
pub mod format;
pub mod limits;
pub mod report;
pub mod time_value;
pub mod types;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "chit")]
pub mod chit;

pub use error::CalcError;
pub use report::{Report, ReportField, ReportTable, ToReport};
pub use types::*;

/// Standard result type for all chit-calc operations
pub type CalcResult<T> = Result<T, CalcError>;
