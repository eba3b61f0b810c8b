//! App-wide yewdux store.
//!
//! # Design
//! - The whole UI state lives in one [`UiEngine`]; the store only wraps it so
//!   components can subscribe with selectors.

use yewdux::store::Store;

use crate::core::engine::UiEngine;

/// Global application store.
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct AppStore {
    /// UI state machine.
    pub engine: UiEngine,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::panels::UiVisibility;

    #[test]
    fn default_store_shows_nothing() {
        let store = AppStore::default();
        assert_eq!(store.engine.visibility(), UiVisibility::default());
        assert!(!store.engine.busy().controls_disabled());
    }
}
