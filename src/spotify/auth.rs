use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;

use crate::{
    config, info,
    management::TokenManager,
    types::{ApiErrorEnvelope, TokenResponse},
    warning,
};

#[derive(Debug)]
pub enum AuthError {
    Transport(reqwest::Error),
    /// The token probe answered with a status that is neither the
    /// valid-token nor the invalid-token convention.
    AmbiguousProbe(u16),
    Malformed(String),
    Cache(std::io::Error),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Transport(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Transport(e) => write!(f, "transport error: {e}"),
            AuthError::AmbiguousProbe(status) => {
                write!(f, "token probe answered with unknown status {status}")
            }
            AuthError::Malformed(msg) => write!(f, "malformed token response: {msg}"),
            AuthError::Cache(e) => write!(f, "cannot cache token: {e}"),
        }
    }
}

impl std::error::Error for AuthError {}

enum TokenProbe {
    Valid,
    Invalid,
}

/// Obtains a bearer token for the catalog API.
///
/// Run once per process by the CLI; the token is passed down explicitly to
/// every subsequent API call. A token cached by an earlier run is reused when
/// the probe request accepts it, otherwise the client credentials from the
/// configuration are exchanged for a fresh token, which is persisted for
/// future runs.
///
/// # Errors
///
/// - [`AuthError::Transport`] when the probe or the grant request cannot
///   complete
/// - [`AuthError::AmbiguousProbe`] when the probe answers outside the
///   400/401 convention; this state is unrecoverable
/// - [`AuthError::Malformed`] when the grant response carries no usable token
pub async fn authenticate() -> Result<String, AuthError> {
    if let Ok(manager) = TokenManager::load().await {
        match probe_token(manager.token()).await? {
            TokenProbe::Valid => {
                info!("Cached token is still valid");
                return Ok(manager.token().to_string());
            }
            TokenProbe::Invalid => {
                warning!("Cached token was rejected, requesting a new one");
            }
        }
    }

    let token = request_token().await?;

    TokenManager::new(token.clone())
        .persist()
        .await
        .map_err(AuthError::Cache)?;

    Ok(token)
}

/// Validates a cached token with a minimal request against the API root.
///
/// The root URL does not support `GET`, so the answer is always an error
/// body; status 400 means the credential itself was accepted, 401 means it
/// was not.
async fn probe_token(token: &str) -> Result<TokenProbe, AuthError> {
    let client = Client::new();
    let response = client
        .get(&config::spotify_apiurl())
        .bearer_auth(token)
        .send()
        .await?;

    let envelope = response
        .json::<ApiErrorEnvelope>()
        .await
        .map_err(|e| AuthError::Malformed(e.to_string()))?;

    match envelope.error.status {
        400 => Ok(TokenProbe::Valid),
        401 => Ok(TokenProbe::Invalid),
        other => Err(AuthError::AmbiguousProbe(other)),
    }
}

/// Exchanges the configured client credentials for a bearer token.
async fn request_token() -> Result<String, AuthError> {
    let credentials = STANDARD.encode(format!(
        "{}:{}",
        config::spotify_client_id(),
        config::spotify_client_secret()
    ));

    let client = Client::new();
    let response = client
        .post(&config::spotify_apitoken_url())
        .header("Authorization", format!("Basic {credentials}"))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let token = response
        .json::<TokenResponse>()
        .await
        .map_err(|e| AuthError::Malformed(e.to_string()))?;

    Ok(token.access_token)
}
