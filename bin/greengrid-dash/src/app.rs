//! ---
//! gg_section: "03-dashboard-ui"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Dashboard controller state and fetch orchestration."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
use greengrid_client::{
    ForecastPoint, HistoricalPoint, ParamKey, PredictionResult, RecommendationResult,
    SimulationParameters,
};
use tracing::debug;

use crate::fetch::{FetchCommand, FetchOutcome};

/// Lifecycle of the dashboard. `Loading` is entered exactly once at startup
/// and left once the initial fetch round completes; later fetches update data
/// in place without revisiting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// Which chart rendering is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartVariant {
    Trend,
    Forecast,
}

impl ChartVariant {
    pub fn toggled(self) -> Self {
        match self {
            ChartVariant::Trend => ChartVariant::Forecast,
            ChartVariant::Forecast => ChartVariant::Trend,
        }
    }
}

/// All dashboard state. The parameter snapshot is the only mutable input and
/// is replaced wholesale on every edit; fetch results are last-known-good and
/// only superseded by a successful newer response.
pub struct App {
    pub phase: Phase,
    pub params: SimulationParameters,
    pub prediction: PredictionResult,
    pub recommendation: RecommendationResult,
    pub history: Vec<HistoricalPoint>,
    pub forecast: Vec<ForecastPoint>,
    /// False while the most recent prediction fetch failed.
    pub engine_active: bool,
    pub chart: ChartVariant,
    /// Index into [`ParamKey::ALL`] for the highlighted slider.
    pub selected: usize,
    /// Footer feedback from the latest customer notification.
    pub notify_status: Option<String>,
    initial_history_pending: bool,
    initial_prediction_pending: bool,
    initial_recommendation_pending: bool,
    next_seq: u64,
    issued_prediction: u64,
    issued_recommendation: u64,
    issued_forecast: u64,
}

impl App {
    pub fn new(params: SimulationParameters) -> Self {
        Self {
            phase: Phase::Loading,
            params,
            prediction: PredictionResult::default(),
            recommendation: RecommendationResult::default(),
            history: Vec::new(),
            forecast: Vec::new(),
            engine_active: true,
            chart: ChartVariant::Trend,
            selected: 0,
            notify_status: None,
            initial_history_pending: false,
            initial_prediction_pending: false,
            initial_recommendation_pending: false,
            next_seq: 0,
            issued_prediction: 0,
            issued_recommendation: 0,
            issued_forecast: 0,
        }
    }

    /// Commands for the initial fetch round. History, prediction, and
    /// recommendation gate the `Loading -> Ready` transition; the forecast
    /// fetch rides along without gating it.
    pub fn start(&mut self) -> Vec<FetchCommand> {
        self.initial_history_pending = true;
        self.initial_prediction_pending = true;
        self.initial_recommendation_pending = true;
        let mut commands = vec![FetchCommand::History];
        commands.extend(self.refetch_commands());
        commands
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Fresh prediction + recommendation + forecast fetches for the current
    /// snapshot, each stamped with a new sequence number. Whatever was in
    /// flight for an older snapshot becomes stale the moment these are issued.
    fn refetch_commands(&mut self) -> Vec<FetchCommand> {
        self.issued_prediction = self.bump_seq();
        self.issued_recommendation = self.bump_seq();
        self.issued_forecast = self.bump_seq();
        vec![
            FetchCommand::Prediction {
                seq: self.issued_prediction,
                params: self.params.clone(),
            },
            FetchCommand::Recommendation {
                seq: self.issued_recommendation,
                params: self.params.clone(),
            },
            FetchCommand::Forecast {
                seq: self.issued_forecast,
                params: self.params.clone(),
            },
        ]
    }

    /// Replace one parameter and return the re-fetch commands this edit
    /// triggers. Every edit fires immediately; there is no debounce.
    pub fn set_param(&mut self, key: ParamKey, value: f64) -> Vec<FetchCommand> {
        self.params.set(key, value);
        self.refetch_commands()
    }

    /// Restore the default snapshot, with `time_of_day` pinned to the current
    /// wall-clock hour at the moment of reset.
    pub fn reset_params(&mut self) -> Vec<FetchCommand> {
        self.params = SimulationParameters::defaults_now();
        self.refetch_commands()
    }

    pub fn selected_key(&self) -> ParamKey {
        ParamKey::ALL[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % ParamKey::ALL.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(ParamKey::ALL.len() - 1);
    }

    /// Nudge the highlighted slider by `steps` increments, clamped to the
    /// control's bounds. A nudge that lands on the same value issues no fetch.
    pub fn nudge_selected(&mut self, steps: i32) -> Vec<FetchCommand> {
        let key = self.selected_key();
        let spec = key.spec();
        let current = self.params.get(key);
        let next = (current + spec.step * f64::from(steps)).clamp(spec.min, spec.max);
        if next == current {
            return Vec::new();
        }
        self.set_param(key, next)
    }

    pub fn toggle_chart(&mut self) {
        self.chart = self.chart.toggled();
    }

    /// Ask the backend to alert customers about the currently displayed risk.
    pub fn notify_command(&self) -> FetchCommand {
        FetchCommand::Notify {
            params: self.params.clone(),
            predicted_load: self.prediction.predicted_load,
            risk: self.prediction.risk,
        }
    }

    /// Fold one fetch outcome into the state. Failures leave the last-known
    /// data untouched; prediction failures additionally mark the forecast
    /// engine inactive until the next success. Outcomes whose sequence number
    /// is not the latest issued for their kind are discarded outright, so the
    /// display always reflects the most recent snapshot.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::History(result) => {
                // Only the first history outcome settles the initial round;
                // a fast periodic refresh must not stand in for the gating
                // prediction and recommendation fetches.
                if std::mem::take(&mut self.initial_history_pending) {
                    self.maybe_ready();
                }
                if let Ok(points) = result {
                    self.history = points;
                }
            }
            FetchOutcome::Prediction { seq, result } => {
                if std::mem::take(&mut self.initial_prediction_pending) {
                    self.maybe_ready();
                }
                if seq != self.issued_prediction {
                    debug!(seq, latest = self.issued_prediction, "stale prediction discarded");
                    return;
                }
                match result {
                    Ok(prediction) => {
                        self.prediction = prediction;
                        self.engine_active = true;
                    }
                    Err(_) => self.engine_active = false,
                }
            }
            FetchOutcome::Recommendation { seq, result } => {
                if std::mem::take(&mut self.initial_recommendation_pending) {
                    self.maybe_ready();
                }
                if seq != self.issued_recommendation {
                    debug!(
                        seq,
                        latest = self.issued_recommendation,
                        "stale recommendation discarded"
                    );
                    return;
                }
                if let Ok(recommendation) = result {
                    self.recommendation = recommendation;
                }
            }
            FetchOutcome::Forecast { seq, result } => {
                if seq != self.issued_forecast {
                    debug!(seq, latest = self.issued_forecast, "stale forecast discarded");
                    return;
                }
                if let Ok(points) = result {
                    self.forecast = points;
                }
            }
            FetchOutcome::Notify(result) => {
                self.notify_status = Some(match result {
                    Ok(receipt) => format!(
                        "Notified {} customers ({} risk)",
                        receipt.notified_customers, receipt.risk
                    ),
                    Err(_) => "Customer notification failed".to_owned(),
                });
            }
        }
    }

    /// Enter `Ready` once each of the three gating fetches of the initial
    /// round has reported, succeeding or not.
    fn maybe_ready(&mut self) {
        if self.phase == Phase::Loading
            && !self.initial_history_pending
            && !self.initial_prediction_pending
            && !self.initial_recommendation_pending
        {
            self.phase = Phase::Ready;
        }
    }
}
