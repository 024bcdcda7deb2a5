use thiserror::Error;

#[derive(Debug, Error)]
/// Failures talking to the repository host.
pub enum DiscoveryError {
    #[error("request to {path} failed: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("repository host returned {status} for {path}")]
    Status { status: u16, path: String },
    #[error("could not decode {path}: {message}")]
    Decode { path: String, message: String },
}
