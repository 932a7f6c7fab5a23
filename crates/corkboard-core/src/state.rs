//! The application-state aggregate selectors read from.
//!
//! [`AppState`] bundles the relational cache with the two upstream derived
//! values selectors depend on: the parsed route and the current user's id.
//! It is replaced or mutated wholesale by upstream reducers between render
//! passes and treated as immutable within one.

use crate::id::Id;
use crate::route::Path;
use crate::store::Store;

/// Everything a selector may read.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    store: Store,
    path: Path,
    current_user_id: Option<Id>,
}

impl AppState {
    /// Create an empty state: empty store, root path, nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The relational cache.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable access to the cache, for the upstream sync layer and tests.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// The parsed current path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the routing state (navigation).
    pub fn set_path(&mut self, path: Path) {
        tracing::trace!(board_id = ?path.board_id, "route changed");
        self.path = path;
    }

    /// The signed-in user's id, if any.
    #[must_use]
    pub fn current_user_id(&self) -> Option<&Id> {
        self.current_user_id.as_ref()
    }

    /// Replace the signed-in user (sign-in/out).
    pub fn set_current_user_id(&mut self, user_id: Option<Id>) {
        self.current_user_id = user_id;
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use std::str::FromStr;

    use crate::id::Id;
    use crate::route::Path;

    #[test]
    fn defaults_to_nothing_selected() {
        let state = AppState::new();
        assert!(state.path().board_id.is_none());
        assert!(state.current_user_id().is_none());
        assert_eq!(state.store().revision(), 0);
    }

    #[test]
    fn route_and_user_are_replaceable() {
        let mut state = AppState::new();
        state.set_path(Path::parse("/boards/b1"));
        state.set_current_user_id(Some(Id::from_str("u1").unwrap()));

        assert_eq!(state.path().board_id, Some(Id::from_str("b1").unwrap()));
        assert_eq!(state.current_user_id(), Some(&Id::from_str("u1").unwrap()));
    }
}
