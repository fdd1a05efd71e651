//! ---
//! gg_section: "03-dashboard-ui"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Top-level frame layout composing the dashboard views."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
pub mod control_panel;
pub mod load_chart;
pub mod recommendation;
pub mod status_card;
pub mod theme;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, ChartVariant, Phase};

/// Draw one frame. Everything on screen is a pure function of [`App`].
pub fn draw(frame: &mut Frame, app: &App) {
    if app.phase == Phase::Loading {
        draw_loading(frame);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // body
            Constraint::Length(1), // footer
        ])
        .split(frame.size());

    draw_header(frame, rows[0], app.engine_active);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(6)])
        .split(columns[0]);
    status_card::render(frame, left[0], &app.prediction);
    recommendation::render(frame, left[1], &app.recommendation, &app.prediction);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(18), Constraint::Min(8)])
        .split(columns[1]);
    control_panel::render(frame, right[0], &app.params, app.selected);
    match app.chart {
        ChartVariant::Trend => {
            load_chart::render_trend(frame, right[1], &app.history, &app.prediction)
        }
        ChartVariant::Forecast => {
            load_chart::render_forecast(frame, right[1], &app.forecast, &app.prediction)
        }
    }

    draw_footer(frame, rows[2], app.notify_status.as_deref());
}

fn draw_loading(frame: &mut Frame) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(frame.size());
    let banner = Paragraph::new("Loading community grid data...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(banner, rows[1]);
}

fn draw_header(frame: &mut Frame, area: Rect, engine_active: bool) {
    let (engine_text, engine_color) = if engine_active {
        ("● AI Forecast Engine Active", Color::Green)
    } else {
        ("○ AI Forecast Engine Inactive", Color::Red)
    };
    let header = Line::from(vec![
        Span::styled(
            " GreenGrid Community Energy Dashboard ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(engine_text, Style::default().fg(engine_color)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, notify_status: Option<&str>) {
    let mut spans = vec![Span::styled(
        " ↑/↓ select  ←/→ adjust  c chart  n notify  r reset  q quit ",
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(status) = notify_status {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(status, Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
