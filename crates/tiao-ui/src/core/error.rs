//! Error types surfaced by the UI engine.

use thiserror::Error;
use tiao_protocol::ProtocolError;

/// Failures the engine reports instead of applying a change.
#[derive(Debug, Error)]
pub enum UiError {
    /// A panel identifier did not name any known panel.
    #[error("unknown panel '{id}'")]
    UnknownPanel {
        /// Identifier that failed to resolve.
        id: String,
    },
    /// The host pushed something that is not an action envelope.
    #[error("malformed host message")]
    MalformedMessage {
        /// Underlying decode failure.
        #[source]
        source: ProtocolError,
    },
    /// A known action carried a payload of the wrong shape.
    #[error("unexpected payload for '{context}'")]
    UnexpectedPayload {
        /// Mode, key or event the payload belonged to.
        context: &'static str,
        /// Underlying decode failure.
        #[source]
        source: ProtocolError,
    },
}

impl From<ProtocolError> for UiError {
    fn from(source: ProtocolError) -> Self {
        match source {
            ProtocolError::MalformedMessage { .. } => Self::MalformedMessage { source },
            ProtocolError::UnexpectedPayload { context, .. } => {
                Self::UnexpectedPayload { context, source }
            }
            ProtocolError::Encode { event, .. } => Self::UnexpectedPayload {
                context: event,
                source,
            },
        }
    }
}

/// Result alias for engine operations.
pub type UiResult<T> = Result<T, UiError>;
