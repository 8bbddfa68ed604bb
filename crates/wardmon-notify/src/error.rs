/// Errors that can occur within the delivery subsystem.
///
/// # Examples
///
/// ```rust
/// use wardmon_notify::error::NotifyError;
///
/// let err = NotifyError::Closed {
///     sink: "memory".to_string(),
/// };
/// assert!(err.to_string().contains("memory"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Writing to the underlying file or stream failed.
    #[error("Notify: I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink has been closed and no longer accepts deliveries.
    #[error("Notify: sink '{sink}' is closed")]
    Closed { sink: String },
}

/// Convenience `Result` alias for delivery operations.
pub type Result<T> = std::result::Result<T, NotifyError>;
