//! ---
//! gg_section: "02-backend-client"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Data model and HTTP client for the prediction service."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
//! Data model and HTTP client for the GreenGrid backend.
//!
//! The backend owns all forecasting, risk scoring, and recommendation logic;
//! this crate only carries the parameter snapshot to it and brings the typed
//! responses back. Results are treated as immutable once received and are
//! replaced wholesale on each fetch.

pub mod client;
pub mod params;
pub mod types;

pub use client::{BackendClient, ClientError};
pub use params::{ParamKey, ParamSpec, SimulationParameters};
pub use types::{
    ForecastPoint, HistoricalPoint, NotifyReceipt, NotifyRequest, PredictionResult,
    RecommendationResult, RiskTier,
};
