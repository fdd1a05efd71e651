//! ---
//! gg_section: "03-dashboard-ui"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Recommendation card with the projected monthly impact."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
use greengrid_client::{PredictionResult, RecommendationResult, RiskTier};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Electricity price used for the savings projection, in $/kWh.
const PRICE_PER_KWH: f64 = 0.12;
/// Emissions factor, in kg CO2 per kWh.
const EMISSIONS_PER_KWH: f64 = 0.5;
/// Projection horizon in days.
const HORIZON_DAYS: f64 = 30.0;
/// Load level the grid is steered back towards under overload, in kW.
const SAFE_LOAD_KW: f64 = 200.0;

/// Fallback shown when the backend returns an empty recommendation.
const OPTIMAL_TEXT: &str = "Usage is optimal.";

/// Projected monthly effect of following the recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub load_reduction_kw: f64,
    pub money_saved: f64,
    pub emissions_saved_kg: f64,
}

/// Impact figures per risk tier. High risk scales with the excess over the
/// safe load level; medium risk uses fixed trim figures; everything else
/// projects no impact.
pub fn impact(prediction: &PredictionResult) -> Impact {
    match prediction.risk {
        RiskTier::High => {
            let reduction = (prediction.predicted_load - SAFE_LOAD_KW).max(0.0);
            Impact {
                load_reduction_kw: reduction,
                money_saved: reduction * PRICE_PER_KWH * HORIZON_DAYS,
                emissions_saved_kg: reduction * EMISSIONS_PER_KWH * HORIZON_DAYS,
            }
        }
        RiskTier::Medium => Impact {
            load_reduction_kw: 15.0,
            money_saved: 15.0 * HORIZON_DAYS,
            emissions_saved_kg: 7.5 * HORIZON_DAYS,
        },
        RiskTier::Low | RiskTier::Unknown => Impact {
            load_reduction_kw: 0.0,
            money_saved: 0.0,
            emissions_saved_kg: 0.0,
        },
    }
}

/// Recommendation text as displayed, with the empty-response fallback.
pub fn display_text(recommendation: &RecommendationResult) -> &str {
    let trimmed = recommendation.recommendation.trim();
    if trimmed.is_empty() {
        OPTIMAL_TEXT
    } else {
        trimmed
    }
}

/// Whether the impact panel accompanies the advice. Only a stable grid hides
/// it; an unknown tier still shows the zeroed projection.
pub fn shows_impact(risk: RiskTier) -> bool {
    risk != RiskTier::Low
}

/// Render the advice text and, outside the stable tier, the projected
/// monthly impact figures.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    recommendation: &RecommendationResult,
    prediction: &PredictionResult,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            "AI Recommendation",
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let with_panel = shows_impact(prediction.risk);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if with_panel {
            [Constraint::Min(2), Constraint::Length(3)]
        } else {
            [Constraint::Min(2), Constraint::Length(0)]
        })
        .split(inner);

    let advice = Paragraph::new(display_text(recommendation))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White));
    frame.render_widget(advice, rows[0]);

    if with_panel {
        let figures = impact(prediction);
        let panel = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Load reduction  ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:.1} kW", figures.load_reduction_kw),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            Line::from(vec![
                Span::styled("Monthly savings ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("${:.0}", figures.money_saved),
                    Style::default().fg(Color::Green),
                ),
            ]),
            Line::from(vec![
                Span::styled("CO2 avoided     ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:.0} kg", figures.emissions_saved_kg),
                    Style::default().fg(Color::Green),
                ),
            ]),
        ]);
        frame.render_widget(panel, rows[1]);
    }
}
