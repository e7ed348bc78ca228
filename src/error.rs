use crate::clients::common::ClientError;

/// Failure of a slot resolution, independent of how it reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] ClientError),
    #[error("failed to decode upstream response: {0}")]
    Decode(String),
    #[error("data integrity anomaly: {0}")]
    DataIntegrity(String),
}

pub type ResolutionResult<T> = Result<T, ResolutionError>;

impl From<ClientError> for ResolutionError {
    fn from(err: ClientError) -> Self {
        if err.is_decode() {
            return ResolutionError::Decode(err.to_string());
        }

        ResolutionError::UpstreamUnavailable(err)
    }
}
