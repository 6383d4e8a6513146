use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ReportingError;

pub const ANALYTICS_SCOPES: &str =
    "https://www.googleapis.com/auth/analytics https://www.googleapis.com/auth/analytics.readonly";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Google service-account key file. Fields the client does not use are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub fn assertion_claims(key: &ServiceAccountKey, issued_at: i64) -> AssertionClaims {
    AssertionClaims {
        iss: key.client_email.clone(),
        scope: ANALYTICS_SCOPES.to_string(),
        aud: key.token_uri.clone(),
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME_SECS,
    }
}

pub fn signing_key(key: &ServiceAccountKey) -> Result<EncodingKey, ReportingError> {
    EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|err| ReportingError::Auth(format!("invalid service-account private key: {err}")))
}

fn sign_assertion(key: &ServiceAccountKey, signing_key: &EncodingKey) -> Result<String, ReportingError> {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    encode(&header, &assertion_claims(key, Utc::now().timestamp()), signing_key)
        .map_err(|err| ReportingError::Auth(format!("failed to sign assertion: {err}")))
}

/// Exchanges a signed assertion for a bearer token at the key's token endpoint.
pub fn fetch_access_token(
    client: &Client,
    key: &ServiceAccountKey,
    signing_key: &EncodingKey,
) -> Result<String, ReportingError> {
    let assertion = sign_assertion(key, signing_key)?;

    debug!(client_email = %key.client_email, token_uri = %key.token_uri, "requesting access token");

    let response = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .map_err(ReportingError::from_transport)?;

    let status = response.status();
    let body = response.text().map_err(ReportingError::from_transport)?;
    if !status.is_success() {
        return Err(ReportingError::Auth(format!(
            "token endpoint returned {status}: {}",
            body.trim()
        )));
    }

    let token: TokenResponse = serde_json::from_str(&body).map_err(ReportingError::Decode)?;
    Ok(token.access_token)
}
