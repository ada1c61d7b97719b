/// Errors that can occur in the transport layer.
///
/// A non-2xx response is NOT a transport error: the transport delivered
/// it fine. Status handling belongs to the API surface.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The base URL or a request path could not be turned into a URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// A header name or value isn't valid HTTP.
    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The request never got a response (DNS, refused, reset, timeout).
    #[cfg(feature = "reqwest")]
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response arrived but its body couldn't be read.
    #[cfg(feature = "reqwest")]
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// A transport without a real network (tests, offline mode) failed.
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}
