//! ---
//! gg_section: "03-dashboard-ui"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Load chart renderings: 24h trend and short-range forecast."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
use greengrid_client::{ForecastPoint, HistoricalPoint, PredictionResult, RiskTier};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use super::theme::risk_style;

/// Fixed floor for the forecast y-axis so a small prediction still leaves
/// headroom and the curve never clips against the frame.
const FORECAST_Y_FLOOR_KW: f64 = 320.0;

/// The trend view's data split: interior points, the highlighted "current"
/// point, and the appended prediction point. Only defined for non-empty
/// history; the caller renders the no-data state otherwise.
#[derive(Debug, PartialEq)]
pub struct TrendSeries {
    pub interior: Vec<(f64, f64)>,
    pub current: (f64, f64),
    pub predicted: (f64, f64),
}

/// Split history plus the latest prediction into the trend view's series.
/// The prediction point is appended one slot past the last observation.
pub fn trend_series(
    history: &[HistoricalPoint],
    prediction: &PredictionResult,
) -> Option<TrendSeries> {
    let last = history.last()?;
    let last_x = (history.len() - 1) as f64;
    let interior = history[..history.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, point)| (i as f64, point.load_kw))
        .collect();
    Some(TrendSeries {
        interior,
        current: (last_x, last.load_kw),
        predicted: (last_x + 1.0, prediction.predicted_load),
    })
}

/// The forecast view's exactly-four points: "now" plus three forward hours.
/// Each slot falls back independently to the current prediction when the
/// backend forecast has no entry for it.
pub fn forecast_points(
    forecast: &[ForecastPoint],
    prediction: &PredictionResult,
) -> [(f64, f64, RiskTier); 4] {
    core::array::from_fn(|i| match forecast.get(i) {
        Some(point) => (i as f64, point.predicted_load, point.risk),
        None => (i as f64, prediction.predicted_load, prediction.risk),
    })
}

/// Forecast y-axis ceiling: 1.5x the current prediction, but never below the
/// fixed floor.
pub fn forecast_y_max(predicted_load: f64) -> f64 {
    (predicted_load * 1.5).max(FORECAST_Y_FLOOR_KW)
}

fn trend_y_max(series: &TrendSeries) -> f64 {
    let observed = series
        .interior
        .iter()
        .map(|(_, y)| *y)
        .fold(series.current.1.max(series.predicted.1), f64::max);
    (observed * 1.2).max(10.0)
}

/// Render the 24-hour trend: the historical curve with the current point and
/// the appended prediction point visually distinguished.
pub fn render_trend(
    frame: &mut Frame,
    area: Rect,
    history: &[HistoricalPoint],
    prediction: &PredictionResult,
) {
    let Some(series) = trend_series(history, prediction) else {
        render_no_data(frame, area);
        return;
    };

    let current = [series.current];
    let predicted = [series.predicted];
    let datasets = vec![
        Dataset::default()
            .name("Load (kW)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&series.interior),
        Dataset::default()
            .name("Current")
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Green))
            .data(&current),
        Dataset::default()
            .name("Prediction")
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&predicted),
    ];

    let x_max = series.predicted.0.max(1.0);
    let y_max = trend_y_max(&series);
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Community Load Trend (Last 24 Hours)"),
        )
        .x_axis(
            Axis::default()
                .title("Time")
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw("H0"),
                    Span::styled("Current", Style::default().fg(Color::Green)),
                    Span::styled("Prediction", Style::default().fg(Color::Yellow)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Load (kW)")
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{y_max:.0}")),
                ]),
        );
    frame.render_widget(chart, area);
}

/// Render the short-range forecast: four points coloured by their own risk
/// tier, joined by a neutral line.
pub fn render_forecast(
    frame: &mut Frame,
    area: Rect,
    forecast: &[ForecastPoint],
    prediction: &PredictionResult,
) {
    let points = forecast_points(forecast, prediction);
    let curve: Vec<(f64, f64)> = points.iter().map(|(x, y, _)| (*x, *y)).collect();
    let singles: Vec<[(f64, f64); 1]> = points.iter().map(|(x, y, _)| [(*x, *y)]).collect();

    let mut datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::DarkGray))
        .data(&curve)];
    for (i, single) in singles.iter().enumerate() {
        let style = risk_style(points[i].2);
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(style.indicator))
                .data(single),
        );
    }

    let y_max = forecast_y_max(prediction.predicted_load);
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Short-Range Forecast (Now + 3 Hours)"),
        )
        .x_axis(
            Axis::default()
                .title("Hours ahead")
                .bounds([0.0, 3.0])
                .labels(vec![
                    Span::raw("now"),
                    Span::raw("+1h"),
                    Span::raw("+2h"),
                    Span::raw("+3h"),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Load (kW)")
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{y_max:.0}")),
                ]),
        );
    frame.render_widget(chart, area);
}

fn render_no_data(frame: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new("No data available")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::DIM))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Community Load Trend (Last 24 Hours)"),
        );
    frame.render_widget(placeholder, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(load: f64, risk: RiskTier) -> PredictionResult {
        PredictionResult {
            predicted_load: load,
            risk,
            ..PredictionResult::default()
        }
    }

    fn history(loads: &[f64]) -> Vec<HistoricalPoint> {
        loads
            .iter()
            .enumerate()
            .map(|(i, load)| HistoricalPoint {
                hour: i as u32,
                load_kw: *load,
            })
            .collect()
    }

    #[test]
    fn empty_history_yields_no_trend_series() {
        assert_eq!(trend_series(&[], &prediction(150.0, RiskTier::Low)), None);
    }

    #[test]
    fn trend_appends_prediction_after_last_observation() {
        let series =
            trend_series(&history(&[120.0, 135.0, 140.0]), &prediction(150.0, RiskTier::Low))
                .unwrap();
        assert_eq!(series.interior, vec![(0.0, 120.0), (1.0, 135.0)]);
        assert_eq!(series.current, (2.0, 140.0));
        assert_eq!(series.predicted, (3.0, 150.0));
    }

    #[test]
    fn single_observation_still_charts() {
        let series =
            trend_series(&history(&[120.0]), &prediction(90.0, RiskTier::Low)).unwrap();
        assert!(series.interior.is_empty());
        assert_eq!(series.current, (0.0, 120.0));
        assert_eq!(series.predicted, (1.0, 90.0));
    }

    #[test]
    fn forecast_slots_fall_back_independently() {
        let partial = vec![
            ForecastPoint {
                hour_offset: 0,
                time_of_day: 18,
                predicted_load: 150.0,
                risk: RiskTier::Low,
            },
            ForecastPoint {
                hour_offset: 1,
                time_of_day: 19,
                predicted_load: 280.0,
                risk: RiskTier::High,
            },
        ];
        let now = prediction(150.0, RiskTier::Low);
        let points = forecast_points(&partial, &now);
        assert_eq!(points[1], (1.0, 280.0, RiskTier::High));
        // missing entries inherit the "now" prediction and risk
        assert_eq!(points[2], (2.0, 150.0, RiskTier::Low));
        assert_eq!(points[3], (3.0, 150.0, RiskTier::Low));
    }

    #[test]
    fn forecast_y_axis_never_clips() {
        assert_eq!(forecast_y_max(100.0), 320.0); // floor wins
        assert_eq!(forecast_y_max(300.0), 450.0); // 1.5x wins
    }
}
