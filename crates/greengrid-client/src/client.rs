//! ---
//! gg_section: "02-backend-client"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Data model and HTTP client for the prediction service."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::params::SimulationParameters;
use crate::types::{
    ForecastPoint, HistoricalPoint, NotifyReceipt, NotifyRequest, PredictionResult,
    RecommendationResult, RiskTier,
};

/// Errors surfaced by [`BackendClient`] operations. Connection failures,
/// non-2xx responses, and malformed payloads all collapse into the same
/// taxonomy: the caller treats every variant as "request failed" and keeps
/// its last-known-good data.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure, non-2xx status, or undecodable response body.
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The configured base address cannot be combined with an endpoint path.
    #[error("invalid backend endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Stateless HTTP client for the prediction service. Holds a pooled
/// [`reqwest::Client`] so repeated polls reuse connections; keeps no cache
/// beyond what the transport layer pools.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base: Url,
}

impl BackendClient {
    /// Build a client for the given base address. The request timeout keeps a
    /// slow backend from wedging the dashboard refresh loop.
    pub fn new(base: Url, request_timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(request_timeout).build()?;
        // `Url::join` drops the last path segment of a base without a
        // trailing slash, so `http://host/api` would lose `/api` entirely.
        let mut base = base;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }

    /// GET `/data`: the recent community load series, chronologically ordered.
    pub async fn fetch_history(&self) -> Result<Vec<HistoricalPoint>, ClientError> {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            data: Vec<HistoricalPoint>,
        }

        let url = self.endpoint("data")?;
        debug!(%url, "fetching historical load data");
        let envelope: Envelope = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.data)
    }

    /// POST `/predict`: point prediction for the given parameter snapshot.
    pub async fn fetch_prediction(
        &self,
        params: &SimulationParameters,
    ) -> Result<PredictionResult, ClientError> {
        let url = self.endpoint("predict")?;
        debug!(%url, "fetching prediction");
        let result = self
            .http
            .post(url)
            .json(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(result)
    }

    /// POST `/recommendation`: free-text advice for the given snapshot.
    pub async fn fetch_recommendation(
        &self,
        params: &SimulationParameters,
    ) -> Result<RecommendationResult, ClientError> {
        let url = self.endpoint("recommendation")?;
        debug!(%url, "fetching recommendation");
        let result = self
            .http
            .post(url)
            .json(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(result)
    }

    /// POST `/forecast`: now plus three forward hours for the given snapshot.
    pub async fn fetch_forecast(
        &self,
        params: &SimulationParameters,
    ) -> Result<Vec<ForecastPoint>, ClientError> {
        let url = self.endpoint("forecast")?;
        debug!(%url, "fetching short-range forecast");
        let result = self
            .http
            .post(url)
            .json(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(result)
    }

    /// POST `/notify`: ask the backend to alert customers about the current
    /// risk situation.
    pub async fn notify_customers(
        &self,
        params: &SimulationParameters,
        predicted_load: f64,
        risk: RiskTier,
    ) -> Result<NotifyReceipt, ClientError> {
        let url = self.endpoint("notify")?;
        debug!(%url, %risk, predicted_load, "notifying customers");
        let request = NotifyRequest {
            params: params.clone(),
            predicted_load,
            risk,
        };
        let receipt = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(receipt)
    }
}
