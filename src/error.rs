//! Error types for tone generation and playback

/// Error type for the tone engine
#[derive(thiserror::Error, Debug)]
pub enum ToneError {
    /// The negotiated format has no quantization rule
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A zero-length buffer was about to be streamed
    #[error("Refusing to stream an empty buffer")]
    EmptyBuffer,

    /// Zero frequency or zero duration
    #[error("Invalid tone request: {0}")]
    InvalidRequest(String),

    /// No usable output device
    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),

    /// Failed to create the device stream
    #[error("Stream create error: {0}")]
    StreamCreate(String),

    /// Failed to play or pause the device stream
    #[error("Playback error: {0}")]
    Playback(String),
}

/// Result type for tone engine operations
pub type Result<T> = std::result::Result<T, ToneError>;
