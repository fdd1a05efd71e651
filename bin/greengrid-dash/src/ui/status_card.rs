//! ---
//! gg_section: "03-dashboard-ui"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Predicted-load status card with risk badge and capacity bar."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
use greengrid_client::PredictionResult;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use super::theme::{capacity_ratio, risk_style, GRID_CAPACITY_KW};

/// Predicted load formatted the way the card displays it.
pub fn format_load(predicted_load: f64) -> String {
    format!("{predicted_load:.1} kW")
}

/// Render the status card: risk badge, headline load figure, capacity bar,
/// and status phrase. A pure function of the latest prediction.
pub fn render(frame: &mut Frame, area: Rect, prediction: &PredictionResult) {
    let style = risk_style(prediction.risk);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            "AI Predicted Load",
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // risk badge
            Constraint::Length(2), // headline figure
            Constraint::Length(1), // forecast horizon
            Constraint::Length(1), // capacity bar
            Constraint::Length(1), // capacity labels
            Constraint::Min(0),    // status phrase
        ])
        .split(inner);

    let badge = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!(" {} ", prediction.risk),
            Style::default()
                .fg(Color::Black)
                .bg(style.indicator)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(badge), rows[0]);

    let headline = Paragraph::new(Line::from(Span::styled(
        format_load(prediction.predicted_load),
        Style::default()
            .fg(style.indicator)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(headline, rows[1]);

    frame.render_widget(
        Paragraph::new("Next 1-hour forecast").style(Style::default().fg(Color::Gray)),
        rows[2],
    );

    let ratio = capacity_ratio(prediction.predicted_load);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(style.indicator).bg(Color::Black))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, rows[3]);

    frame.render_widget(
        Paragraph::new(format!("0 kW ─ {GRID_CAPACITY_KW:.0} kW capacity"))
            .style(Style::default().fg(Color::Gray)),
        rows[4],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            style.message,
            Style::default().fg(style.indicator),
        )),
        rows[5],
    );
}
