//! ---
//! gg_section: "03-dashboard-ui"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Fetch worker bridging the UI loop and the backend client."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
use std::time::Duration;

use greengrid_client::{
    BackendClient, ClientError, ForecastPoint, HistoricalPoint, NotifyReceipt, PredictionResult,
    RecommendationResult, RiskTier, SimulationParameters,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A request issued by the controller. Prediction-style commands carry the
/// sequence number the controller stamped them with so stale responses can be
/// recognised on the way back in.
#[derive(Debug, Clone)]
pub enum FetchCommand {
    History,
    Prediction {
        seq: u64,
        params: SimulationParameters,
    },
    Recommendation {
        seq: u64,
        params: SimulationParameters,
    },
    Forecast {
        seq: u64,
        params: SimulationParameters,
    },
    Notify {
        params: SimulationParameters,
        predicted_load: f64,
        risk: RiskTier,
    },
}

/// The response side of [`FetchCommand`]. Failures travel back as data so the
/// controller can apply its keep-last-known-good policy on the UI thread.
#[derive(Debug)]
pub enum FetchOutcome {
    History(Result<Vec<HistoricalPoint>, ClientError>),
    Prediction {
        seq: u64,
        result: Result<PredictionResult, ClientError>,
    },
    Recommendation {
        seq: u64,
        result: Result<RecommendationResult, ClientError>,
    },
    Forecast {
        seq: u64,
        result: Result<Vec<ForecastPoint>, ClientError>,
    },
    Notify(Result<NotifyReceipt, ClientError>),
}

/// Run the fetch worker: receive commands, execute each as an independent
/// task so overlapping requests genuinely overlap, and report outcomes back.
/// In-flight requests are not cancelled when superseded; the controller's
/// sequence check discards whatever arrives late.
pub fn spawn_worker(
    client: BackendClient,
    mut commands: mpsc::UnboundedReceiver<FetchCommand>,
    outcomes: mpsc::UnboundedSender<FetchOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            let client = client.clone();
            let outcomes = outcomes.clone();
            tokio::spawn(async move {
                let outcome = execute(&client, command).await;
                // The receiver only disappears during shutdown.
                let _ = outcomes.send(outcome);
            });
        }
        info!("fetch worker stopped: command channel closed");
    })
}

async fn execute(client: &BackendClient, command: FetchCommand) -> FetchOutcome {
    match command {
        FetchCommand::History => {
            let result = client.fetch_history().await;
            if let Err(err) = &result {
                warn!(error = %err, "history fetch failed");
            }
            FetchOutcome::History(result)
        }
        FetchCommand::Prediction { seq, params } => {
            let result = client.fetch_prediction(&params).await;
            if let Err(err) = &result {
                warn!(seq, error = %err, "prediction fetch failed");
            }
            FetchOutcome::Prediction { seq, result }
        }
        FetchCommand::Recommendation { seq, params } => {
            let result = client.fetch_recommendation(&params).await;
            if let Err(err) = &result {
                warn!(seq, error = %err, "recommendation fetch failed");
            }
            FetchOutcome::Recommendation { seq, result }
        }
        FetchCommand::Forecast { seq, params } => {
            let result = client.fetch_forecast(&params).await;
            if let Err(err) = &result {
                warn!(seq, error = %err, "forecast fetch failed");
            }
            FetchOutcome::Forecast { seq, result }
        }
        FetchCommand::Notify {
            params,
            predicted_load,
            risk,
        } => {
            let result = client.notify_customers(&params, predicted_load, risk).await;
            if let Err(err) = &result {
                warn!(error = %err, "customer notification failed");
            }
            FetchOutcome::Notify(result)
        }
    }
}

/// Handle to the periodic history-refresh task. The timer is owned state
/// with an explicit shutdown, not an ambient interval.
pub struct RefreshHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop the refresh loop and wait for it to wind down.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.task.await;
    }
}

/// Re-fetch history only, on a fixed cadence, until shut down. Prediction and
/// recommendation refreshes are driven by parameter edits, not by this timer.
pub fn spawn_history_refresher(
    commands: mpsc::UnboundedSender<FetchCommand>,
    interval: Duration,
) -> RefreshHandle {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The immediate first tick would duplicate the initial fetch.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if commands.send(FetchCommand::History).is_err() {
                        break;
                    }
                }
                _ = &mut shutdown_rx => {
                    info!("history refresh timer stopped");
                    break;
                }
            }
        }
    });
    RefreshHandle {
        shutdown: Some(shutdown_tx),
        task,
    }
}
