//! Error primitives for decoding host messages and encoding requests.

use thiserror::Error;

/// Failure while translating between JSON and the typed wire contract.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The inbound message was not a decodable action envelope.
    #[error("malformed host message")]
    MalformedMessage {
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// A payload attached to a known action/key did not match its schema.
    #[error("unexpected payload for '{context}'")]
    UnexpectedPayload {
        /// Action, mode or key the payload belonged to.
        context: &'static str,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// An outbound request body could not be serialized.
    #[error("failed to encode '{event}' request body")]
    Encode {
        /// Event name of the request.
        event: &'static str,
        /// Underlying encode failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn unexpected_payload_names_context_and_keeps_source() {
        let source = serde_json::from_str::<u32>("\"nope\"").expect_err("string is not u32");
        let err = ProtocolError::UnexpectedPayload {
            context: "debt_specific",
            source,
        };
        assert_eq!(err.to_string(), "unexpected payload for 'debt_specific'");
        assert!(err.source().is_some());
    }
}
