//! Error types for tetralib.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Transport-layer, codec-layer, and
//! reassembly-layer errors are all captured here.

/// The error type for all tetralib operations.
///
/// Variants cover the full range of failure modes encountered when driving a
/// TETRA terminal over its PEI: physical transport failures, malformed
/// headers and PDUs, command-error lines, timeouts, and cancellation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (serial port, in-memory test device).
    #[error("transport error: {0}")]
    Transport(String),

    /// A framing or parse error (malformed +CTSDSR header, short PDU,
    /// invalid field value).
    #[error("parse error: {0}")]
    Parse(String),

    /// A protocol variant this library does not handle (unknown protocol
    /// identifier, unsupported AI service, unexpected message type).
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// The terminal answered a command with an error line.
    ///
    /// The message is the original line, verbatim (`ERROR`,
    /// `+CME ERROR: ...`, `+CMS ERROR ...`).
    #[error("{0}")]
    Command(String),

    /// A command in an [`ats`](crate::Requester) style sequence failed.
    #[error("{request} failed: {source}")]
    CommandFailed {
        /// The request that failed.
        request: String,
        /// The underlying error.
        source: Box<Error>,
    },

    /// The command could not be enqueued within the sending-queue timeout.
    #[error("AT sending queue timeout")]
    QueueTimeout,

    /// The caller's cancellation token fired.
    #[error("cancelled")]
    Cancelled,

    /// An incoming concatenation part does not belong to the pending message
    /// with the same identifier.
    #[error("reassembly error: {0}")]
    Reassembly(String),

    /// The AT channel has shut down (the byte stream reached end-of-stream).
    #[error("channel closed")]
    Closed,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_transport() {
        let e = Error::Transport("port busy".into());
        assert_eq!(e.to_string(), "transport error: port busy");
    }

    #[test]
    fn error_display_command_is_verbatim_line() {
        let e = Error::Command("+CME ERROR: 35".into());
        assert_eq!(e.to_string(), "+CME ERROR: 35");
    }

    #[test]
    fn error_display_command_failed_names_request() {
        let e = Error::CommandFailed {
            request: "AT+CTSDS=12,0,0,0,1".into(),
            source: Box::new(Error::QueueTimeout),
        };
        assert_eq!(
            e.to_string(),
            "AT+CTSDS=12,0,0,0,1 failed: AT sending queue timeout"
        );
    }

    #[test]
    fn error_display_queue_timeout() {
        assert_eq!(Error::QueueTimeout.to_string(), "AT sending queue timeout");
    }

    #[test]
    fn error_display_cancelled() {
        assert_eq!(Error::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("pipe broken"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<Error>();
    }
}
