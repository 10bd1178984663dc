use thiserror::Error;

/// Failure reading or writing the persisted best time.
///
/// Never fatal: callers fall back to "no best time".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("best-time store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("best-time value is corrupt: {0}")]
    Corrupt(String),
    #[error("best-time store unavailable")]
    Unavailable,
}
