//! One-second tick driver for a running countdown

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    sync::watch,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::state::{Session, SessionSnapshot};

/// Period between countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Guard for the periodic task that ticks one running period of the countdown.
///
/// The task stops as soon as the guard is dropped. The session drops it while
/// holding its own lock, and the task re-checks the token under that same lock
/// before ticking, so a released driver never touches the session again.
#[derive(Debug)]
pub struct TickDriver {
    token: CancellationToken,
    generation: u64,
}

impl TickDriver {
    /// Spawn a driver whose first tick lands one period from now
    pub fn spawn(
        session: Arc<Mutex<Session>>,
        updates: Arc<watch::Sender<SessionSnapshot>>,
        generation: u64,
    ) -> Self {
        let token = CancellationToken::new();
        tokio::spawn(tick_task(session, updates, token.clone()));
        Self { token, generation }
    }

    /// Running period this driver was armed for
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn tick_task(
    session: Arc<Mutex<Session>>,
    updates: Arc<watch::Sender<SessionSnapshot>>,
    token: CancellationToken,
) {
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!("Tick driver stopped");
                break;
            }
            _ = interval.tick() => {
                let mut session = match session.lock() {
                    Ok(session) => session,
                    Err(e) => {
                        error!("Failed to lock session for tick: {}", e);
                        break;
                    }
                };
                if token.is_cancelled() {
                    break;
                }

                if session.tick() {
                    info!("Egg timer finished");
                }
                // Published while still locked, so snapshots go out in order
                updates.send_replace(session.snapshot());
            }
        }
    }
}
