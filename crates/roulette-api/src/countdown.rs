//! Per-game countdown tickers.
//!
//! A ticker is a tokio task that ticks the game's [`Countdown`] once per
//! period until it expires. Expiry is logged at `info` level; that log line
//! is the cue for the presentation layer's audible alert. An expired
//! countdown stays readable (at zero) until the game's next command
//! replaces or cancels it, or until any game starts a new countdown, which
//! sweeps every finished ticker out of the registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use roulette_core::error::DomainError;
use roulette_game::domain::countdown::{Countdown, CountdownTick};
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

struct Ticker {
    countdown: Arc<Mutex<Countdown>>,
    task: JoinHandle<()>,
}

/// Running countdowns keyed by game.
#[derive(Clone)]
pub struct CountdownRegistry {
    period: Duration,
    tickers: Arc<Mutex<HashMap<Uuid, Ticker>>>,
}

impl Default for CountdownRegistry {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl CountdownRegistry {
    /// A registry whose tickers fire every `period`.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            tickers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Ticker>>, DomainError> {
        self.tickers
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("countdown registry poisoned: {e}")))
    }

    /// Starts ticking `countdown` for `game_id`, replacing any running one
    /// and dropping tickers that have already expired.
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn start(&self, game_id: Uuid, countdown: Countdown) -> Result<(), DomainError> {
        let shared = Arc::new(Mutex::new(countdown));
        let task = tokio::spawn(tick_until_expired(
            game_id,
            Arc::clone(&shared),
            self.period,
        ));
        let mut tickers = self.lock()?;
        tickers.retain(|_, ticker| !ticker.task.is_finished());
        let replaced = tickers.insert(
            game_id,
            Ticker {
                countdown: shared,
                task,
            },
        );
        drop(tickers);
        if let Some(previous) = replaced {
            previous.task.abort();
        }
        info!(%game_id, seconds = countdown.total_seconds, "countdown started");
        Ok(())
    }

    /// Stops and forgets the game's countdown, if any.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn cancel(&self, game_id: Uuid) -> Result<(), DomainError> {
        if let Some(ticker) = self.lock()?.remove(&game_id) {
            let was_running = !ticker.task.is_finished();
            ticker.task.abort();
            if was_running {
                info!(%game_id, "countdown cancelled");
            }
        }
        Ok(())
    }

    /// Current state of the game's countdown.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a lock is poisoned.
    pub fn current(&self, game_id: Uuid) -> Result<Option<Countdown>, DomainError> {
        let tickers = self.lock()?;
        let Some(ticker) = tickers.get(&game_id) else {
            return Ok(None);
        };
        let countdown = ticker
            .countdown
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("countdown poisoned: {e}")))?;
        Ok(Some(*countdown))
    }
}

async fn tick_until_expired(game_id: Uuid, countdown: Arc<Mutex<Countdown>>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    // The first tick completes immediately.
    interval.tick().await;
    loop {
        interval.tick().await;
        let tick = match countdown.lock() {
            Ok(mut countdown) => countdown.tick(),
            Err(_) => return,
        };
        if tick == CountdownTick::Expired {
            info!(%game_id, "countdown expired");
            return;
        }
    }
}
