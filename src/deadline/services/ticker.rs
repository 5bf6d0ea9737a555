//! Background loop driving the deadline evaluator.

use crate::deadline::{
    ports::{DeadlineFindingSink, WatermarkStore},
    services::DeadlineEvaluator,
};
use crate::task::ports::TaskStore;
use mockable::Clock;
use tokio::sync::watch;
use tracing::{info, warn};

/// Runs evaluation passes at the evaluator's tick interval until shutdown.
///
/// The first tick fires immediately. Send `true` on the shutdown channel
/// (or drop its sender) to stop the loop after the in-flight pass.
pub async fn run_deadline_ticker<T, W, F, C>(
    evaluator: &DeadlineEvaluator<T, W, F, C>,
    mut shutdown: watch::Receiver<bool>,
) where
    T: TaskStore,
    W: WatermarkStore,
    F: DeadlineFindingSink,
    C: Clock + Send + Sync,
{
    info!(
        interval_secs = evaluator.tick().as_secs(),
        "deadline ticker started"
    );
    let mut interval = tokio::time::interval(evaluator.tick());
    loop {
        tokio::select! {
            _ = interval.tick() => {
                match evaluator.run_pass().await {
                    Ok(n) if n > 0 => info!(forwarded = n, "deadline ticker forwarded findings"),
                    Ok(_) => {}
                    Err(e) => warn!(err = %e, "deadline ticker pass failed"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    info!("deadline ticker stopped");
                    return;
                }
            }
        }
    }
}
