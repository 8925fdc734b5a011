//! ErrorCode trait for structured error reporting.

/// Trait for mapping lowcount errors to stable error code strings.
/// Every error enum implements this so callers can match on a code
/// without depending on message text.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "DOMAIN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
pub const PVALUE_UNDERFLOW: &str = "PVALUE_UNDERFLOW";
pub const NO_CONVERGENCE: &str = "NO_CONVERGENCE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
