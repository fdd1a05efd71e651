//! ---
//! gg_section: "03-dashboard-ui"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Bounded parameter sliders for the load simulation controls."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
use greengrid_client::{ParamKey, SimulationParameters};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, LineGauge, Paragraph};
use ratatui::Frame;

/// Current value of one control, formatted as the panel displays it.
pub fn format_value(key: ParamKey, value: f64) -> String {
    match key {
        ParamKey::CurrentLoad | ParamKey::ApplianceLoad => format!("{value:.1} kW"),
        ParamKey::Temperature => format!("{value:.1} °C"),
        ParamKey::EvCount => format!("{value:.0} vehicles"),
        ParamKey::AcUsage | ParamKey::HeatingUsage => format!("{value:.0}%"),
        ParamKey::TimeOfDay => format!("{value:.0}:00"),
        ParamKey::CommunitySize => format!("{value:.0} homes"),
    }
}

/// Position of `value` within the control's `[min, max]`, for the slider fill.
fn slider_ratio(key: ParamKey, value: f64) -> f64 {
    let spec = key.spec();
    ((value - spec.min) / (spec.max - spec.min)).clamp(0.0, 1.0)
}

/// Render one slider row per parameter. The panel is fully controlled by the
/// snapshot: it holds no state of its own, and the highlighted row only marks
/// where the next nudge lands.
pub fn render(frame: &mut Frame, area: Rect, params: &SimulationParameters, selected: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Load Simulation Controls");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = ParamKey::ALL
        .iter()
        .flat_map(|_| [Constraint::Length(1), Constraint::Length(1)])
        .collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, key) in ParamKey::ALL.into_iter().enumerate() {
        let spec = key.spec();
        let value = params.get(key);
        let highlighted = index == selected;

        let marker = if highlighted { "▶ " } else { "  " };
        let label_style = if highlighted {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let label = Line::from(vec![
            Span::styled(format!("{marker}{}", spec.label), label_style),
            Span::raw("  "),
            Span::styled(
                format_value(key, value),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        frame.render_widget(Paragraph::new(label), rows[index * 2]);

        let gauge = LineGauge::default()
            .ratio(slider_ratio(key, value))
            .line_set(symbols::line::THICK)
            .gauge_style(if highlighted {
                Style::default().fg(Color::Yellow).bg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Cyan).bg(Color::DarkGray)
            })
            .label(format!("{:.0}–{:.0}", spec.min, spec.max));
        frame.render_widget(gauge, rows[index * 2 + 1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_format_like_the_panel() {
        assert_eq!(format_value(ParamKey::CurrentLoad, 100.0), "100.0 kW");
        assert_eq!(format_value(ParamKey::Temperature, 25.5), "25.5 °C");
        assert_eq!(format_value(ParamKey::EvCount, 7.0), "7 vehicles");
        assert_eq!(format_value(ParamKey::AcUsage, 45.0), "45%");
        assert_eq!(format_value(ParamKey::TimeOfDay, 18.0), "18:00");
        assert_eq!(format_value(ParamKey::CommunitySize, 250.0), "250 homes");
    }

    #[test]
    fn slider_ratio_spans_the_control_bounds() {
        assert_eq!(slider_ratio(ParamKey::CurrentLoad, 50.0), 0.0);
        assert_eq!(slider_ratio(ParamKey::CurrentLoad, 300.0), 1.0);
        assert_eq!(slider_ratio(ParamKey::AcUsage, 50.0), 0.5);
        // out-of-range values never overflow the track
        assert_eq!(slider_ratio(ParamKey::CurrentLoad, 400.0), 1.0);
    }
}
