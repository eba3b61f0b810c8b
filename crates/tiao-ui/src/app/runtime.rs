//! Effect runtime: feeds events into the store's engine and executes the
//! effects it returns.

use gloo_timers::callback::Timeout;
use tracing::warn;
use yewdux::prelude::Dispatch;

use crate::app::host::{focus_panel, now_ms};
use crate::app::transport::FetchTransport;
use crate::core::commands::UiCommand;
use crate::core::effects::{Effect, Millis, TimerEvent};
use crate::core::engine::UiEngine;
use crate::core::panels::PanelId;
use crate::core::store::AppStore;
use crate::core::transport::{UiShell, run_effects};

#[derive(Clone)]
pub(crate) struct Runtime {
    dispatch: Dispatch<AppStore>,
}

impl Runtime {
    pub(crate) fn new() -> Self {
        Self {
            dispatch: Dispatch::<AppStore>::new(),
        }
    }

    pub(crate) fn command(&self, command: UiCommand) {
        self.drive(move |engine, now| engine.handle_command(command, now));
    }

    pub(crate) fn timer(&self, timer: TimerEvent) {
        self.drive(move |engine, now| engine.handle_timer(timer, now));
    }

    pub(crate) fn host_json(&self, raw: &str) {
        let now = now_ms();
        let mut outcome = Ok(Vec::new());
        self.dispatch.reduce_mut(|store| {
            outcome = store.engine.handle_host_json(raw, now);
        });
        match outcome {
            Ok(effects) => self.execute(effects),
            Err(err) => warn!(error = %err, "host message ignored"),
        }
    }

    fn drive(&self, step: impl FnOnce(&mut UiEngine, Millis) -> Vec<Effect>) {
        let now = now_ms();
        let mut effects = Vec::new();
        self.dispatch.reduce_mut(|store| {
            effects = step(&mut store.engine, now);
        });
        self.execute(effects);
    }

    fn execute(&self, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        let transport = FetchTransport::new(self.dispatch.get().engine.config().host_base_url());
        run_effects(effects, &transport, self);
    }
}

impl UiShell for Runtime {
    fn schedule(&self, delay_ms: Millis, timer: TimerEvent) {
        let runtime = self.clone();
        let delay = u32::try_from(delay_ms).unwrap_or(u32::MAX);
        Timeout::new(delay, move || runtime.timer(timer)).forget();
    }

    fn focus(&self, panel: PanelId) {
        focus_panel(panel);
    }
}
