//! Derived view selectors.
//!
//! Selectors turn [`crate::state::AppState`] into plain, render-ready view
//! slices. They are pure reads: each call composes a route lookup, an
//! entity lookup, and a small projection, memoized per combination of
//! tracked inputs (store revision, resolved board id, current user id).
//!
//! Nothing in this layer raises errors. Unresolvable references degrade to
//! absent values ([`Resolved::NoBoard`], [`Resolved::Missing`], `None`, or
//! `false`), and the caller decides what "absent" means for it (typically
//! "not yet loaded").

pub mod boards;

pub use boards::{
    BoardByIdSelector, BoardSelectors, LabelView, MembershipView, UserView,
};

use serde::Serialize;

// ---------------------------------------------------------------------------
// Resolved
// ---------------------------------------------------------------------------

/// Outcome of resolving the routed board and projecting through it.
///
/// The two absent variants stay distinct: [`Resolved::NoBoard`] means
/// navigation has not selected a board at all, while [`Resolved::Missing`]
/// means a board is selected but its row has not reached the cache. A
/// rendering layer typically shows nothing for the former and a loading
/// state for the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Resolved<T> {
    /// The route carries no board id. Never an empty collection.
    NoBoard,
    /// A board id is routed but absent from the model.
    Missing,
    /// The board resolved; the projected payload.
    Found(T),
}

impl<T> Resolved<T> {
    /// The payload, if the board resolved.
    #[allow(clippy::missing_const_for_fn)] // const drop of T is unstable
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NoBoard | Self::Missing => None,
        }
    }

    /// A reference to the payload, if the board resolved.
    pub const fn as_found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NoBoard | Self::Missing => None,
        }
    }

    /// Returns `true` for [`Resolved::Found`].
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns `true` for either absent variant.
    pub const fn is_absent(&self) -> bool {
        !self.is_found()
    }

    /// Map the payload, preserving the absent variants.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        match self {
            Self::NoBoard => Resolved::NoBoard,
            Self::Missing => Resolved::Missing,
            Self::Found(value) => Resolved::Found(f(value)),
        }
    }
}
