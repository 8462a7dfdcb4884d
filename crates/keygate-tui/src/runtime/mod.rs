//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers send `UiEvent`s directly to `inbox_tx`
//! - Runtime drains `inbox_rx` each frame to collect results
//!
//! Every spawned handler races a shared shutdown token, so nothing calls
//! back into the inbox once the user quits.

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use keygate_core::api::AuthClient;
use keygate_core::forms::FormSettings;
use keygate_core::token::TokenSink;
use keygate_core::workflow::Navigator;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while a request is in flight (spinner animation).
pub const BUSY_TICK: Duration = Duration::from_millis(80);

/// Tick cadence when idle.
pub const IDLE_TICK: Duration = Duration::from_millis(250);

/// Side-effect collaborators the runtime hands to handlers.
pub struct Services {
    pub client: AuthClient,
    pub tokens: Arc<dyn TokenSink>,
    pub navigator: Arc<dyn Navigator>,
}

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop or panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    services: Services,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    shutdown: CancellationToken,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Enters the alternate screen and builds the initial state.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(settings: &FormSettings, services: Services) -> Result<Self> {
        // Panic hook goes in BEFORE the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(settings, services.client.base_url());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            services,
            inbox_tx,
            inbox_rx,
            shutdown: CancellationToken::new(),
            last_tick: Instant::now(),
        })
    }

    /// Runs the event loop until the user quits.
    ///
    /// Must be called from inside a tokio runtime; handlers are spawned on it.
    ///
    /// # Errors
    /// Returns an error if reading terminal input or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let result = self.event_loop();
        self.shutdown.cancel();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }

            let events = self.collect_events()?;
            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
                dirty = true;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let tick_interval = if self.state.is_busy() {
            BUSY_TICK
        } else {
            IDLE_TICK
        };
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    /// Spawns a handler and forwards its result to the inbox, unless the
    /// runtime shuts down first.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        self.spawn_effect_until(self.shutdown.clone(), f);
    }

    /// Like `spawn_effect`, but the handler is also dropped once `cancel`
    /// fires (the screen that asked for it was torn down).
    fn spawn_effect_until<F, Fut>(&self, cancel: CancellationToken, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        spawn_guarded(
            self.inbox_tx.clone(),
            self.shutdown.clone(),
            cancel,
            f(),
        );
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
                self.shutdown.cancel();
            }
            UiEffect::SubmitLogin { id, request } => {
                let client = self.services.client.clone();
                self.spawn_effect(move || handlers::submit_login(client, id, request));
            }
            UiEffect::SubmitRegister { id, request } => {
                let client = self.services.client.clone();
                self.spawn_effect(move || handlers::submit_register(client, id, request));
            }
            UiEffect::StoreToken { token } => {
                let event = handlers::store_token(self.services.tokens.as_ref(), &token);
                self.dispatch_event(event);
            }
            UiEffect::ScheduleStatusExpiry { form, ticket } => {
                self.spawn_effect(move || handlers::status_expiry(form, ticket));
            }
            UiEffect::ScheduleRedirect {
                id,
                redirect,
                cancel,
            } => {
                let navigator = Arc::clone(&self.services.navigator);
                self.spawn_effect_until(cancel, move || {
                    handlers::redirect(id, redirect, navigator)
                });
            }
        }
    }
}

/// Runs `handler` on the tokio runtime and sends its event to `tx`. Nothing
/// is sent if either token is cancelled before the handler finishes.
fn spawn_guarded<Fut>(
    tx: UiEventSender,
    shutdown: CancellationToken,
    cancel: CancellationToken,
    handler: Fut,
) -> JoinHandle<()>
where
    Fut: Future<Output = UiEvent> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            () = shutdown.cancelled() => {}
            () = cancel.cancelled() => {}
            event = handler => {
                let _ = tx.send(event);
            }
        }
    })
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        self.shutdown.cancel();
        let _ = terminal::restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use keygate_core::forms::{ScheduledRedirect, SubmissionId};

    use super::*;

    #[derive(Default)]
    struct RecordingNavigator(Mutex<Vec<String>>);

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &str) -> Result<()> {
            self.0.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn spawn_redirect(
        navigator: &Arc<RecordingNavigator>,
        shutdown: &CancellationToken,
        cancel: &CancellationToken,
    ) -> (JoinHandle<()>, UiEventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_guarded(
            tx,
            shutdown.clone(),
            cancel.clone(),
            handlers::redirect(
                SubmissionId(1),
                ScheduledRedirect {
                    url: "https://example.com/dashboard".to_string(),
                    delay: Duration::from_millis(1500),
                },
                Arc::clone(navigator) as Arc<dyn Navigator>,
            ),
        );
        (handle, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_redirect_reaches_inbox_when_not_cancelled() {
        let navigator = Arc::new(RecordingNavigator::default());
        let (handle, mut rx) = spawn_redirect(
            &navigator,
            &CancellationToken::new(),
            &CancellationToken::new(),
        );
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(1500)).await;
        handle.await.unwrap();

        assert_eq!(navigator.0.lock().unwrap().len(), 1);
        assert!(matches!(
            rx.try_recv(),
            Ok(UiEvent::Redirected {
                id: SubmissionId(1),
                ..
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_redirect_never_navigates() {
        let navigator = Arc::new(RecordingNavigator::default());
        let cancel = CancellationToken::new();
        let (handle, mut rx) = spawn_redirect(&navigator, &CancellationToken::new(), &cancel);
        tokio::task::yield_now().await;

        // Screen torn down halfway through the delay.
        tokio::time::advance(Duration::from_millis(700)).await;
        cancel.cancel();
        handle.await.unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;

        assert!(navigator.0.lock().unwrap().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_pending_redirect() {
        let navigator = Arc::new(RecordingNavigator::default());
        let shutdown = CancellationToken::new();
        let (handle, mut rx) = spawn_redirect(&navigator, &shutdown, &CancellationToken::new());
        tokio::task::yield_now().await;

        shutdown.cancel();
        handle.await.unwrap();

        assert!(navigator.0.lock().unwrap().is_empty());
        assert!(rx.try_recv().is_err());
    }
}
