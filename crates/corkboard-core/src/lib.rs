#![forbid(unsafe_code)]
//! corkboard-core: the client-side board state layer.
//!
//! An in-memory relational cache of boards and their satellites (lists,
//! labels, users, memberships, filter selections) plus the memoized
//! selectors that project render-ready view slices out of it.
//!
//! The crate is a pure, single-threaded read/write model: upstream sync
//! code writes entities through [`store::Store`], navigation and session
//! land in [`state::AppState`], and rendering code pulls derived values
//! through [`selectors::BoardSelectors`]. Selectors recompute only when a
//! tracked input (store revision, routed board, current user) changes.
//!
//! # Conventions
//!
//! - **Errors**: the selector surface never fails; absence is a value
//!   ([`selectors::Resolved`], `Option`, `false`). The one typed error is
//!   [`id::ParseIdError`] on identifier parsing.
//! - **Logging**: `tracing` macros; no subscriber is installed here.

pub mod id;
pub mod memo;
pub mod model;
pub mod route;
pub mod selectors;
pub mod state;
pub mod store;

pub use id::Id;
pub use selectors::{BoardByIdSelector, BoardSelectors, Resolved};
pub use state::AppState;
pub use store::Store;
