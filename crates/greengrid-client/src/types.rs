//! ---
//! gg_section: "02-backend-client"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Data model and HTTP client for the prediction service."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::params::SimulationParameters;

/// Backend-assigned category summarising grid-overload likelihood.
///
/// Anything the backend sends outside the three known tiers deserialises to
/// [`RiskTier::Unknown`] so a protocol drift degrades to a neutral rendering
/// instead of a failed fetch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    #[default]
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
            RiskTier::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Point forecast for the upcoming period, replaced wholesale on each fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub predicted_load: f64,
    pub risk: RiskTier,
    /// Named contributing factors reported by the backend model.
    #[serde(default)]
    pub components: BTreeMap<String, f64>,
}

impl Default for PredictionResult {
    fn default() -> Self {
        Self {
            predicted_load: 0.0,
            risk: RiskTier::Low,
            components: BTreeMap::new(),
        }
    }
}

/// Free-text advice from the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RecommendationResult {
    #[serde(default)]
    pub recommendation: String,
}

/// One observed point of the community load series. Order within the fetched
/// sequence is chronological and meaningful for chart rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalPoint {
    pub hour: u32,
    pub load_kw: f64,
}

/// One entry of the short forward forecast (`/forecast` returns four:
/// now plus three hours ahead).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    pub hour_offset: u32,
    pub time_of_day: u32,
    pub predicted_load: f64,
    pub risk: RiskTier,
}

/// Payload for the customer-notification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotifyRequest {
    pub params: SimulationParameters,
    pub predicted_load: f64,
    pub risk: RiskTier,
}

/// Acknowledgement returned by the notification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotifyReceipt {
    pub status: String,
    pub risk: RiskTier,
    pub predicted_load: f64,
    pub notified_customers: u64,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_tier_parses_known_values() {
        assert_eq!(
            serde_json::from_str::<RiskTier>("\"LOW\"").unwrap(),
            RiskTier::Low
        );
        assert_eq!(
            serde_json::from_str::<RiskTier>("\"MEDIUM\"").unwrap(),
            RiskTier::Medium
        );
        assert_eq!(
            serde_json::from_str::<RiskTier>("\"HIGH\"").unwrap(),
            RiskTier::High
        );
    }

    #[test]
    fn unrecognised_risk_degrades_to_unknown() {
        assert_eq!(
            serde_json::from_str::<RiskTier>("\"CRITICAL\"").unwrap(),
            RiskTier::Unknown
        );
        assert_eq!(
            serde_json::from_str::<RiskTier>("\"low\"").unwrap(),
            RiskTier::Unknown
        );
    }

    #[test]
    fn prediction_tolerates_missing_components() {
        let result: PredictionResult =
            serde_json::from_str(r#"{"predicted_load": 150.0, "risk": "LOW"}"#).unwrap();
        assert_eq!(result.predicted_load, 150.0);
        assert!(result.components.is_empty());
    }
}
