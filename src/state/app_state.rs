//! Main application state management

use std::{
    ops::ControlFlow,
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, error, info};

use super::{Action, Stopwatch, Transition};
use crate::tasks::{Ticker, TICK_PERIOD};

/// The stopwatch together with the ticker driving it
#[derive(Debug)]
struct Session {
    stopwatch: Stopwatch,
    ticker: Option<Ticker>,
    next_ticker_id: u64,
    /// Set on unmount; no action or tick may change the stopwatch afterwards
    disposed: bool,
}

impl Session {
    fn ticker_id(&self) -> Option<u64> {
        self.ticker.as_ref().map(Ticker::id)
    }
}

/// Main application state: the single stopwatch plus server metadata
#[derive(Debug)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
    /// Publishes a snapshot after every applied action and tick
    snapshot_tx: Arc<watch::Sender<Stopwatch>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Mount a fresh stopwatch at `initial_seconds`
    pub fn new(port: u16, host: String, initial_seconds: u64) -> Self {
        let stopwatch = Stopwatch::new(initial_seconds);
        let (snapshot_tx, _) = watch::channel(stopwatch.clone());

        Self {
            session: Arc::new(Mutex::new(Session {
                stopwatch,
                ticker: None,
                next_ticker_id: 0,
                disposed: false,
            })),
            snapshot_tx: Arc::new(snapshot_tx),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    fn lock_session(&self) -> Result<MutexGuard<'_, Session>, String> {
        self.session
            .lock()
            .map_err(|e| format!("Failed to lock stopwatch state: {}", e))
    }

    /// Apply a user action and acquire or release the ticker to match.
    ///
    /// The ticker is swapped under the session lock, so once this returns
    /// from a stop or reset no further tick can change the count. Every
    /// action is ignored once the stopwatch has been disposed.
    pub fn dispatch(&self, action: Action) -> Result<(Transition, Stopwatch), String> {
        let mut session = self.lock_session()?;

        let transition = if session.disposed {
            Transition::Ignored
        } else {
            session.stopwatch.apply(action)
        };
        if transition.is_applied() {
            self.sync_ticker(&mut session);
            self.snapshot_tx.send_replace(session.stopwatch.clone());
        }
        let snapshot = session.stopwatch.clone();
        drop(session);

        match transition {
            Transition::Applied => info!(
                "Action {:?} applied: elapsed={}s status={:?} laps={}",
                action,
                snapshot.elapsed_seconds(),
                snapshot.status(),
                snapshot.laps().len()
            ),
            Transition::Ignored => debug!(
                "Action {:?} ignored in status {:?}",
                action,
                snapshot.status()
            ),
        }

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.name().to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok((transition, snapshot))
    }

    pub fn start(&self) -> Result<(Transition, Stopwatch), String> {
        self.dispatch(Action::Start)
    }

    pub fn stop(&self) -> Result<(Transition, Stopwatch), String> {
        self.dispatch(Action::Stop)
    }

    pub fn reset(&self) -> Result<(Transition, Stopwatch), String> {
        self.dispatch(Action::Reset)
    }

    pub fn lap(&self) -> Result<(Transition, Stopwatch), String> {
        self.dispatch(Action::Lap)
    }

    pub fn delete_lap(&self, index: usize) -> Result<(Transition, Stopwatch), String> {
        self.dispatch(Action::DeleteLap(index))
    }

    /// Make the ticker exist exactly when the stopwatch is running
    fn sync_ticker(&self, session: &mut Session) {
        match (session.stopwatch.is_running(), session.ticker.is_some()) {
            (true, false) if !session.disposed => {
                session.next_ticker_id += 1;
                let id = session.next_ticker_id;
                let on_tick = tick_handler(
                    Arc::downgrade(&self.session),
                    Arc::clone(&self.snapshot_tx),
                    id,
                );
                session.ticker = Some(Ticker::spawn(id, TICK_PERIOD, on_tick));
            }
            (false, true) => {
                // Dropping the handle aborts the task
                session.ticker = None;
            }
            _ => {}
        }
    }

    /// Release the ticker and freeze the stopwatch, as on unmount
    pub fn dispose(&self) {
        match self.lock_session() {
            Ok(mut session) => {
                session.disposed = true;
                if session.ticker.take().is_some() {
                    info!("Stopwatch disposed while running, ticker released");
                }
            }
            Err(e) => error!("Failed to dispose stopwatch: {}", e),
        }
    }

    /// Get a copy of the current stopwatch
    pub fn snapshot(&self) -> Result<Stopwatch, String> {
        self.lock_session().map(|session| session.stopwatch.clone())
    }

    /// Whether a tick task is currently scheduled
    pub fn has_active_ticker(&self) -> Result<bool, String> {
        self.lock_session()
            .map(|session| session.ticker.as_ref().is_some_and(|t| !t.is_finished()))
    }

    /// Watch stopwatch snapshots as they change
    pub fn subscribe(&self) -> watch::Receiver<Stopwatch> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

/// Build the per-tick callback for ticker `id`.
///
/// Holds the session weakly so a dropped `AppState` ends the task. A tick
/// only counts while `id` is still the session's ticker.
fn tick_handler(
    weak_session: Weak<Mutex<Session>>,
    snapshot_tx: Arc<watch::Sender<Stopwatch>>,
    id: u64,
) -> impl FnMut() -> ControlFlow<()> + Send + 'static {
    move || {
        let Some(shared) = weak_session.upgrade() else {
            return ControlFlow::Break(());
        };
        let mut session = match shared.lock() {
            Ok(session) => session,
            Err(e) => {
                error!("Failed to lock stopwatch state on tick: {}", e);
                return ControlFlow::Break(());
            }
        };

        if session.disposed || session.ticker_id() != Some(id) {
            return ControlFlow::Break(());
        }

        session.stopwatch.tick();
        snapshot_tx.send_replace(session.stopwatch.clone());
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimerStatus;
    use std::time::Duration;
    use tokio::time::sleep;

    fn new_state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), 0)
    }

    /// Sleep past `seconds` tick boundaries without landing on one
    async fn wait_seconds(seconds: u64) {
        sleep(Duration::from_secs(seconds) + Duration::from_millis(500)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_lap_scenario() {
        let state = new_state();
        state.start().unwrap();

        sleep(Duration::from_millis(5_500)).await;
        let (_, sw) = state.lap().unwrap();
        assert_eq!(sw.laps(), &[5]);

        sleep(Duration::from_secs(3)).await;
        let (_, sw) = state.lap().unwrap();
        assert_eq!(sw.laps(), &[5, 8]);

        state.stop().unwrap();
        let (transition, sw) = state.reset().unwrap();
        assert_eq!(transition, Transition::Applied);
        assert_eq!(sw.elapsed_seconds(), 0);
        assert!(sw.laps().is_empty());
        assert_eq!(sw.status(), TimerStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_count() {
        let state = new_state();
        state.start().unwrap();
        wait_seconds(3).await;

        let (_, stopped) = state.stop().unwrap();
        assert_eq!(stopped.elapsed_seconds(), 3);
        assert!(!state.has_active_ticker().unwrap());

        wait_seconds(10).await;
        assert_eq!(state.snapshot().unwrap().elapsed_seconds(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_single_ticker() {
        let state = new_state();
        assert_eq!(state.start().unwrap().0, Transition::Applied);
        assert_eq!(state.start().unwrap().0, Transition::Ignored);

        wait_seconds(4).await;
        assert_eq!(state.snapshot().unwrap().elapsed_seconds(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resumes_from_stopped_count() {
        let state = new_state();
        state.start().unwrap();
        wait_seconds(2).await;
        state.stop().unwrap();
        wait_seconds(5).await;

        state.start().unwrap();
        sleep(Duration::from_millis(900)).await;
        assert_eq!(state.snapshot().unwrap().elapsed_seconds(), 2);
        sleep(Duration::from_millis(200)).await;
        assert_eq!(state.snapshot().unwrap().elapsed_seconds(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_refused_while_running() {
        let state = new_state();
        state.start().unwrap();
        wait_seconds(2).await;

        let (transition, sw) = state.reset().unwrap();
        assert_eq!(transition, Transition::Ignored);
        assert_eq!(sw.elapsed_seconds(), 2);
        assert!(state.has_active_ticker().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_releases_ticker() {
        let state = new_state();
        state.start().unwrap();
        wait_seconds(1).await;

        state.dispose();
        assert!(!state.has_active_ticker().unwrap());
        wait_seconds(5).await;
        assert_eq!(state.snapshot().unwrap().elapsed_seconds(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_actions_after_dispose_do_not_restart_ticker() {
        let state = new_state();
        state.start().unwrap();
        wait_seconds(1).await;
        state.dispose();

        let (transition, sw) = state.lap().unwrap();
        assert_eq!(transition, Transition::Ignored);
        assert!(sw.laps().is_empty());
        assert_eq!(state.delete_lap(0).unwrap().0, Transition::Ignored);
        assert_eq!(state.stop().unwrap().0, Transition::Ignored);
        assert_eq!(state.start().unwrap().0, Transition::Ignored);

        wait_seconds(5).await;
        assert!(!state.has_active_ticker().unwrap());
        assert_eq!(state.snapshot().unwrap().elapsed_seconds(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_while_running_ends_tick_task() {
        let state = new_state();
        state.start().unwrap();
        let session = Arc::downgrade(&state.session);

        drop(state);
        wait_seconds(2).await;
        assert!(session.upgrade().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_ticks() {
        let state = AppState::new(0, "127.0.0.1".to_string(), 58);
        let mut rx = state.subscribe();
        state.start().unwrap();
        let _ = rx.borrow_and_update();

        wait_seconds(2).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().elapsed_seconds(), 60);
    }

    #[tokio::test]
    async fn test_last_action_tracking() {
        let state = new_state();
        assert_eq!(state.get_last_action(), (None, None));

        state.lap().unwrap();
        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("lap"));
        assert!(time.is_some());
    }

    #[tokio::test]
    async fn test_delete_lap_out_of_range() {
        let state = new_state();
        let (transition, sw) = state.delete_lap(0).unwrap();
        assert_eq!(transition, Transition::Ignored);
        assert!(sw.laps().is_empty());
    }
}
