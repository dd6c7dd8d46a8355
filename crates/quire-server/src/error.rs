//! Server startup errors.

/// Failure to start serving. Request-time problems never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to watch for changes: {0}")]
    Watch(#[from] notify::Error),
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
