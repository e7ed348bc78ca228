use std::fmt::Display;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum NumericOrTextCode {
    String(String),
    Number(usize),
}
/// API Error response
#[derive(Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    /// Error code
    pub code: NumericOrTextCode,
    /// Error message
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Reqwest Error
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// API Error
    #[error("API usage error: {0}")]
    ApiError(ErrorResponse),

    /// Non-success status without a recognizable error body
    #[error("unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Execution node JSON-RPC Error
    #[error(transparent)]
    Provider(#[from] alloy::transports::TransportError),

    /// Other Error
    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// Url Parsing Error
    #[error("{0}")]
    UrlParse(#[from] url::ParseError),

    /// Serde Json deser Error
    #[error("{0}")]
    SerdeError(#[from] serde_json::Error),
}

/// API Response
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ClientResponse<T> {
    /// Error
    Error(ErrorResponse),
    /// Success w/ value
    Success(T),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl<T> ClientResponse<T> {
    pub(crate) fn into_client_result(self) -> ClientResult<T> {
        match self {
            ClientResponse::Error(e) => Err(e.into()),
            ClientResponse::Success(t) => Ok(t),
        }
    }
}

/// Turns a raw upstream response into a typed result.
///
/// A `404` yields `Ok(None)`. Any other non-success status is surfaced as an
/// [`ClientError::ApiError`] when the body carries a `{code, message}` payload, or as
/// [`ClientError::UnexpectedStatus`] otherwise. A success whose body is empty or
/// `null` is a decode failure, never an absent resource.
pub(crate) async fn handle_json_response<T>(
    resp: reqwest::Response,
    method: &str,
    url: &reqwest::Url,
) -> ClientResult<Option<T>>
where
    T: serde::de::DeserializeOwned,
{
    let status = resp.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        tracing::debug!(method, url = %url, "Resource not found");

        return Ok(None);
    }

    let text = resp.text().await?;

    if !status.is_success() {
        tracing::warn!(
            method,
            url = %url,
            status = status.as_u16(),
            response = text.as_str(),
            "Unexpected response from server"
        );

        return match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(err) => Err(err.into()),
            Err(_) => Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body: text,
            }),
        };
    }

    match serde_json::from_str::<ClientResponse<T>>(&text) {
        Err(e) => {
            tracing::warn!(
                method,
                url = %url,
                response = text.as_str(),
                error = %e,
                "Unexpected response from server"
            );

            Err(e.into())
        }
        Ok(response) => response.into_client_result().map(Some),
    }
}

impl ClientError {
    /// True when the upstream answered but the payload did not have the expected shape.
    pub fn is_decode(&self) -> bool {
        match self {
            Self::SerdeError(_) => true,
            Self::Reqwest(err) => err.is_decode(),
            Self::Provider(err) => err.is_deser_error(),
            _ => false,
        }
    }
}

impl From<ErrorResponse> for ClientError {
    fn from(err: ErrorResponse) -> Self {
        Self::ApiError(err)
    }
}

impl Display for NumericOrTextCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => f.write_str(s.to_string().as_ref()),
            Self::Number(n) => f.write_str(n.to_string().as_ref()),
        }
    }
}
impl Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!(
            "Code: {}, Message: \"{}\"",
            self.code,
            self.message.as_deref().unwrap_or(""),
        ))
    }
}
