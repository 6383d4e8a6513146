mod auth;
#[cfg(test)]
pub(crate) mod test_support;

use std::cell::RefCell;
use std::error::Error as StdError;
use std::io;

use jsonwebtoken::EncodingKey;
use reqwest::blocking::Client;
use thiserror::Error;
use tracing::info;

use crate::model::{GetReportsRequest, GetReportsResponse};

pub use auth::ServiceAccountKey;

pub const APPLICATION_NAME: &str = "Google Analytics ETL BioRegistra";
pub const BATCH_GET_URL: &str = "https://analyticsreporting.googleapis.com/v4/reports:batchGet";

#[derive(Debug, Error)]
pub enum ReportingError {
    #[error("reporting service unreachable: {0}")]
    Unreachable(String),

    #[error("reporting request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("reporting service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("failed to decode reporting response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ReportingError {
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || source_chain_has_reset(&err) {
            Self::Unreachable(err.to_string())
        } else {
            Self::Transport(err)
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

fn source_chain_has_reset(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(cause) = current {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted
            ) {
                return true;
            }
        }
        current = cause.source();
    }
    false
}

/// Anything that can answer a batched report request.
pub trait ReportSource {
    fn batch_get(&self, request: &GetReportsRequest) -> Result<GetReportsResponse, ReportingError>;
}

/// Analytics Reporting v4 client authenticated with a service-account key.
pub struct AnalyticsReporting {
    http: Client,
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    endpoint: String,
    access_token: RefCell<Option<String>>,
}

impl AnalyticsReporting {
    /// Fails on a private key that cannot sign assertions; no request is sent.
    pub fn new(key: ServiceAccountKey, application_name: &str) -> Result<Self, ReportingError> {
        let signing_key = auth::signing_key(&key)?;
        let http = Client::builder()
            .user_agent(format!(
                "{application_name} {}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(ReportingError::Transport)?;

        Ok(Self {
            http,
            key,
            signing_key,
            endpoint: BATCH_GET_URL.to_string(),
            access_token: RefCell::new(None),
        })
    }

    fn access_token(&self) -> Result<String, ReportingError> {
        if let Some(token) = self.access_token.borrow().as_ref() {
            return Ok(token.clone());
        }

        let token = auth::fetch_access_token(&self.http, &self.key, &self.signing_key)?;
        *self.access_token.borrow_mut() = Some(token.clone());
        Ok(token)
    }
}

impl ReportSource for AnalyticsReporting {
    fn batch_get(&self, request: &GetReportsRequest) -> Result<GetReportsResponse, ReportingError> {
        let token = self.access_token()?;

        for report_request in &request.report_requests {
            info!(view_id = %report_request.view_id, "requesting report");
        }

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&token)
            .json(request)
            .send()
            .map_err(ReportingError::from_transport)?;

        let status = response.status();
        let body = response.text().map_err(ReportingError::from_transport)?;
        if !status.is_success() {
            return Err(ReportingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(ReportingError::Decode)
    }
}
