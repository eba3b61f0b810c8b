//! Seams between the engine and the outside world.
//!
//! # Design
//! - [`HostTransport`] posts requests to the host; the wasm shell uses
//!   `gloo-net`, tests record requests in memory.
//! - [`UiShell`] runs timers and moves focus.
//! - [`run_effects`] is the only place effects are interpreted, so every shell
//!   executes them in the same order.

use tiao_protocol::HostRequest;

use crate::core::effects::{Effect, Millis, TimerEvent};
use crate::core::panels::PanelId;

/// Content type of every host request.
pub const CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Fire-and-forget delivery of host requests.
pub trait HostTransport {
    /// Send `request`. Failures are the transport's to log and swallow.
    fn post(&self, request: &HostRequest);
}

/// Timers and focus handling provided by the runtime.
pub trait UiShell {
    /// Deliver `timer` back to the engine after `delay_ms`.
    fn schedule(&self, delay_ms: Millis, timer: TimerEvent);
    /// Focus the first focusable control inside `panel`.
    fn focus(&self, panel: PanelId);
}

/// URL a request is posted to.
#[must_use]
pub fn request_url(base_url: &str, request: &HostRequest) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), request.event())
}

/// Execute `effects` in order.
pub fn run_effects<T, S>(effects: Vec<Effect>, transport: &T, shell: &S)
where
    T: HostTransport + ?Sized,
    S: UiShell + ?Sized,
{
    for effect in effects {
        match effect {
            Effect::Post(request) => transport.post(&request),
            Effect::Schedule { delay_ms, timer } => shell.schedule(delay_ms, timer),
            Effect::Focus(panel) => shell.focus(panel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Log {
        entries: RefCell<Vec<String>>,
    }

    impl HostTransport for Log {
        fn post(&self, request: &HostRequest) {
            self.entries.borrow_mut().push(format!("post:{}", request.event()));
        }
    }

    impl UiShell for Log {
        fn schedule(&self, delay_ms: Millis, _timer: TimerEvent) {
            self.entries.borrow_mut().push(format!("schedule:{delay_ms}"));
        }

        fn focus(&self, panel: PanelId) {
            self.entries.borrow_mut().push(format!("focus:{panel}"));
        }
    }

    #[test]
    fn effects_run_in_order() {
        let log = Log::default();
        run_effects(
            vec![
                Effect::Post(HostRequest::Ready),
                Effect::Schedule {
                    delay_ms: 40,
                    timer: TimerEvent::PaymentFeedback,
                },
                Effect::Focus(PanelId::Payment),
            ],
            &log,
            &log,
        );
        assert_eq!(
            log.entries.into_inner(),
            vec!["post:ready", "schedule:40", "focus:payment"]
        );
    }

    #[test]
    fn urls_join_base_and_event() {
        assert_eq!(
            request_url("https://space_economy/", &HostRequest::ForceClose),
            "https://space_economy/forceClose"
        );
    }
}
