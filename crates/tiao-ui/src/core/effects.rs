//! Side effects requested by the engine.
//!
//! # Design
//! - The engine never touches timers, the network or the DOM; it returns
//!   [`Effect`]s and the shell executes them.
//! - Timer firings come back as [`TimerEvent`]s. Events that can go stale carry
//!   the generation they were scheduled under so the engine can drop them.

use tiao_protocol::HostRequest;

use crate::core::panels::PanelId;

/// Milliseconds on the shell's monotonic clock.
pub type Millis = u64;

/// Deferred work scheduled by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// Auto-release of the busy lock acquired under `generation`.
    BusyExpired {
        /// Lock generation at acquisition time.
        generation: u64,
    },
    /// Move keyboard focus into a freshly opened panel.
    FocusPanel {
        /// Panel that was opened.
        panel: PanelId,
        /// Router generation at open time.
        generation: u64,
    },
    /// End of the overlay close transition.
    FinishClose {
        /// Router generation at close time.
        generation: u64,
    },
    /// Optimistic "request sent" feedback for tax issuance.
    IssueFeedback {
        /// Lock generation held by the submission.
        generation: u64,
    },
    /// Optimistic payment success.
    PaymentFeedback,
    /// Re-enable controls after a tax estimate request.
    CalculatorUnlock {
        /// Lock generation held by the estimate request.
        generation: u64,
    },
}

/// Work the shell must perform after an engine call.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fire-and-forget POST to the host.
    Post(HostRequest),
    /// Run `timer` through the engine after `delay_ms`.
    Schedule {
        /// Delay before firing.
        delay_ms: Millis,
        /// Event delivered back to the engine.
        timer: TimerEvent,
    },
    /// Focus the first focusable control inside `panel`.
    Focus(PanelId),
}

impl Effect {
    /// Host request carried by a [`Effect::Post`], if any.
    #[must_use]
    pub const fn as_post(&self) -> Option<&HostRequest> {
        match self {
            Self::Post(request) => Some(request),
            _ => None,
        }
    }
}

/// Collect the host requests out of an effect list.
#[must_use]
pub fn posted(effects: &[Effect]) -> Vec<&HostRequest> {
    effects.iter().filter_map(Effect::as_post).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posted_keeps_only_requests_in_order() {
        let effects = vec![
            Effect::Post(HostRequest::Ready),
            Effect::Schedule {
                delay_ms: 10,
                timer: TimerEvent::PaymentFeedback,
            },
            Effect::Focus(PanelId::Payment),
            Effect::Post(HostRequest::ForceClose),
        ];
        assert_eq!(
            posted(&effects),
            vec![&HostRequest::Ready, &HostRequest::ForceClose]
        );
    }
}
