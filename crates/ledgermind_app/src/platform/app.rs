use anyhow::Result;
use ledgermind_core::{update, AppState, Msg};
use ledgermind_engine::{AskSettings, ServiceConfig, BASE_URL_VAR};
use ledgermind_logging::{ledger_info, ledger_warn};
use tokio::sync::mpsc;

use super::effects::EffectRunner;
use super::input::{self, InputAction};
use super::logging;
use super::terminal::{self, TerminalEvent, TerminalEvents, Tui};
use super::ui::render::{self, TranscriptScroll};

pub async fn run_app() -> Result<()> {
    logging::initialize(logging::level_from_env());

    let config = ServiceConfig::from_env();
    match config.base_url.as_deref() {
        Some(base_url) => ledger_info!("Answering service at {}", base_url),
        None => ledger_warn!(
            "{} is not set; every question will get the fallback answer",
            BASE_URL_VAR
        ),
    }
    let settings = AskSettings::from_env();

    let (msg_tx, msg_rx) = mpsc::unbounded_channel::<Msg>();
    let effects = EffectRunner::new(config, settings, msg_tx);

    terminal::install_panic_hook();
    let mut tui = terminal::init()?;
    let result = Session::new(effects).run(&mut tui, msg_rx).await;
    terminal::restore()?;
    ledger_info!("Session closed");
    result
}

/// Owns the session state for the lifetime of the screen, plus UI-local
/// presentation state (scroll position, spinner frame).
struct Session {
    state: AppState,
    effects: EffectRunner,
    scroll: TranscriptScroll,
    tick: usize,
}

impl Session {
    fn new(effects: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            effects,
            scroll: TranscriptScroll::default(),
            tick: 0,
        }
    }

    async fn run(mut self, tui: &mut Tui, mut msg_rx: mpsc::UnboundedReceiver<Msg>) -> Result<()> {
        let mut events = TerminalEvents::new();
        self.draw(tui)?;

        loop {
            let redraw = tokio::select! {
                Some(event) = events.next() => match event {
                    TerminalEvent::Key(key) => match input::map_key(key, self.state.draft()) {
                        InputAction::Quit => break,
                        InputAction::Dispatch(msg) => self.dispatch(msg),
                        InputAction::ScrollUp => {
                            self.scroll.up();
                            true
                        }
                        InputAction::ScrollDown => {
                            self.scroll.down();
                            true
                        }
                        InputAction::Ignore => false,
                    },
                    TerminalEvent::Resize => true,
                    TerminalEvent::Tick => {
                        let dirty = self.dispatch(Msg::Tick);
                        if self.state.is_pending() {
                            self.tick = self.tick.wrapping_add(1);
                            true
                        } else {
                            dirty
                        }
                    }
                },
                Some(msg) = msg_rx.recv() => self.dispatch(msg),
                else => break,
            };

            if redraw {
                self.draw(tui)?;
            }
        }
        Ok(())
    }

    /// Applies one message, runs its effects, and reports whether anything changed.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let before = self.state.transcript().len();
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let dirty = state.consume_dirty();
        if state.transcript().len() != before {
            self.scroll.follow();
        }
        self.state = state;
        self.effects.enqueue(effects);
        dirty
    }

    fn draw(&mut self, tui: &mut Tui) -> Result<()> {
        let view = self.state.view();
        let scroll = &mut self.scroll;
        let tick = self.tick;
        tui.draw(|frame| render::render(frame, &view, scroll, tick))?;
        Ok(())
    }
}
