use std::collections::VecDeque;
use std::io::Write;
use std::sync::mpsc::{self, TryRecvError};

use compressor_core::{update, AppState, AppViewModel, EngineStatus, Msg, Phase};
use compressor_engine::MessageSink;
use engine_logging::{engine_info, engine_warn};

use super::effects::EffectRunner;
use super::input::Input;
use super::picker::read_drop;
use super::ui::constants::TICK_INTERVAL;
use super::ui::render::Renderer;

/// Outcome of one page lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub posted: usize,
    pub failures: usize,
}

/// One page lifetime: owns the state and feeds every message through `update`.
pub struct Session<S: MessageSink, W: Write> {
    state: AppState,
    runner: EffectRunner<S>,
    renderer: Renderer,
    screen: W,
    failures: usize,
}

impl<S: MessageSink, W: Write> Session<S, W> {
    pub fn new(
        component_id: Option<String>,
        runner: EffectRunner<S>,
        renderer: Renderer,
        screen: W,
    ) -> Self {
        Self {
            state: AppState::new(component_id),
            runner,
            renderer,
            screen,
            failures: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn runner(&self) -> &EffectRunner<S> {
        &self.runner
    }

    /// Processes inputs until `Quit` (or the input channel closes), then tears down.
    ///
    /// Cancel and reload act immediately; drops and quit wait until no run is in flight.
    pub fn run(mut self, inputs: mpsc::Receiver<Input>) -> SessionSummary {
        self.dispatch(Msg::Mounted);
        let mut pending: VecDeque<Input> = VecDeque::new();
        let mut inputs_open = true;

        loop {
            while let Some(msg) = self.runner.poll() {
                self.dispatch(msg);
            }

            while inputs_open {
                match inputs.try_recv() {
                    Ok(input) => pending.push_back(input),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        inputs_open = false;
                        pending.push_back(Input::Quit);
                    }
                }
            }

            if let Some(idx) = pending
                .iter()
                .position(|input| matches!(input, Input::Cancel | Input::Reload))
            {
                match pending.remove(idx) {
                    Some(Input::Cancel) => self.dispatch(Msg::CancelClicked),
                    Some(Input::Reload) => self.dispatch(Msg::ReloadRequested),
                    _ => {}
                }
                continue;
            }

            if !self.busy() {
                match pending.pop_front() {
                    Some(Input::Drop(paths)) => {
                        self.dispatch(Msg::FilesDropped(read_drop(&paths)));
                        continue;
                    }
                    Some(Input::Quit) => break,
                    Some(Input::Cancel | Input::Reload) | None => {}
                }
            }

            match self.runner.wait(TICK_INTERVAL) {
                Some(msg) => self.dispatch(msg),
                None => self.dispatch(Msg::Tick),
            }
        }

        self.dispatch(Msg::Teardown);
        let summary = SessionSummary {
            posted: self.runner.posted(),
            failures: self.failures,
        };
        engine_info!(
            "Session finished: posted={} failures={}",
            summary.posted,
            summary.failures
        );
        summary
    }

    fn busy(&self) -> bool {
        self.state.phase() == Phase::Compressing || self.state.engine() == EngineStatus::Loading
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let user_action = matches!(
                msg,
                Msg::FilesDropped(_) | Msg::CompressionFinished { .. }
            );
            let load_failed = matches!(msg, Msg::EngineLoaded(Err(_)));

            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            let was_dirty = state.consume_dirty();
            if load_failed || (user_action && was_dirty && state.error().is_some()) {
                self.failures += 1;
            }
            let view = state.view();
            self.state = state;

            if was_dirty {
                self.draw(&view);
            }
            inbox.extend(self.runner.run(effects));
        }
    }

    fn draw(&mut self, view: &AppViewModel) {
        for line in self.renderer.render(view) {
            if let Err(err) = writeln!(self.screen, "{line}") {
                engine_warn!("Status display unavailable: {}", err);
                return;
            }
        }
    }
}
