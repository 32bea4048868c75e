//! Keystroke debouncing for interactive search.
//!
//! Only the initiation of a search is delayed. Once a query has been
//! forwarded it runs to completion; a slower earlier response can still land
//! after a faster later one.

use std::time::Duration;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{sleep_until, Instant};
use tracing::debug;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Forwards the latest query from `input` to `output` once `quiet_period`
/// passes without a newer one. A blank query cancels whatever is pending.
/// When `input` closes, the pending query (if any) is flushed immediately.
pub async fn debounce_queries(
    mut input: Receiver<String>,
    output: Sender<String>,
    quiet_period: Duration,
) {
    let mut pending: Option<String> = None;
    let mut deadline = Instant::now();

    loop {
        tokio::select! {
            next = input.recv() => match next {
                Some(query) if query.trim().is_empty() => {
                    pending = None;
                }
                Some(query) => {
                    pending = Some(query);
                    deadline = Instant::now() + quiet_period;
                }
                None => break,
            },
            _ = sleep_until(deadline), if pending.is_some() => {
                if let Some(query) = pending.take() {
                    debug!(%query, "debounced query ready");
                    if output.send(query).await.is_err() {
                        return;
                    }
                }
            }
        }
    }

    if let Some(query) = pending {
        let _ = output.send(query).await;
    }
}
