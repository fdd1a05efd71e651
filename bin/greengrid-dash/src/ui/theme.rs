//! ---
//! gg_section: "03-dashboard-ui"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Risk palette and capacity scaling shared by the views."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
use greengrid_client::RiskTier;
use ratatui::style::Color;

/// Nominal grid ceiling used only for the visual capacity bar; nothing
/// enforces it as a physical limit.
pub const GRID_CAPACITY_KW: f64 = 300.0;

/// Colours and status phrase for one risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskStyle {
    pub indicator: Color,
    pub background: Color,
    pub message: &'static str,
}

/// Fixed lookup table from risk tier to presentation. Total over every
/// possible input: anything outside the three known tiers renders neutrally.
pub fn risk_style(risk: RiskTier) -> RiskStyle {
    match risk {
        RiskTier::High => RiskStyle {
            indicator: Color::Red,
            background: Color::LightRed,
            message: "Overload risk",
        },
        RiskTier::Medium => RiskStyle {
            indicator: Color::Yellow,
            background: Color::LightYellow,
            message: "Peak building",
        },
        RiskTier::Low => RiskStyle {
            indicator: Color::Green,
            background: Color::LightGreen,
            message: "Grid stable",
        },
        RiskTier::Unknown => RiskStyle {
            indicator: Color::Gray,
            background: Color::DarkGray,
            message: "Unknown",
        },
    }
}

/// Capacity-bar fill as a ratio of the nominal ceiling, clamped so the bar
/// never overflows even when the prediction exceeds capacity.
pub fn capacity_ratio(predicted_load: f64) -> f64 {
    if !predicted_load.is_finite() || predicted_load <= 0.0 {
        return 0.0;
    }
    (predicted_load / GRID_CAPACITY_KW).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_total_and_unknown_is_neutral() {
        assert_eq!(risk_style(RiskTier::High).message, "Overload risk");
        assert_eq!(risk_style(RiskTier::Medium).message, "Peak building");
        assert_eq!(risk_style(RiskTier::Low).message, "Grid stable");
        let unknown = risk_style(RiskTier::Unknown);
        assert_eq!(unknown.message, "Unknown");
        assert_eq!(unknown.indicator, Color::Gray);
    }

    #[test]
    fn capacity_ratio_is_clamped_and_monotonic() {
        assert_eq!(capacity_ratio(0.0), 0.0);
        assert_eq!(capacity_ratio(150.0), 0.5);
        assert_eq!(capacity_ratio(300.0), 1.0);
        assert_eq!(capacity_ratio(600.0), 1.0);
        assert!(capacity_ratio(100.0) < capacity_ratio(200.0));
    }

    #[test]
    fn capacity_ratio_tolerates_bad_input() {
        assert_eq!(capacity_ratio(-50.0), 0.0);
        assert_eq!(capacity_ratio(f64::NAN), 0.0);
    }
}
