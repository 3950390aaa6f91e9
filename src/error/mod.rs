use thiserror::Error;

/// Failures surfaced by the transport hubs. Everything inside the
/// registry itself degrades to a no-op instead of erroring.
#[derive(Debug, Error)]
pub enum HubError {
    #[error("listener io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("hub has no listener bound")]
    NotBound,
}

/// A frame that reached the transport but could not be decoded into a
/// client message. Adapters return this instead of tearing the
/// connection down; the read loop answers with a non-fatal `error`
/// event and keeps serving.
#[derive(Debug, Error)]
#[error("malformed frame: {0}")]
pub struct FrameError(pub String);

impl FrameError {
    pub fn new(reason: impl Into<String>) -> Self {
        FrameError(reason.into())
    }
}
