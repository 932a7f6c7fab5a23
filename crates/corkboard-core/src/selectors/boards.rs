//! Board view selectors.
//!
//! The read surface for everything board-shaped: the current board row,
//! its memberships, labels, list ids, and filter selections, each derived
//! from [`AppState`] and memoized on (store revision, routed board id,
//! current user id).
//!
//! # Short-circuit policy
//!
//! Uniform across every "for current board" selector: no board id in the
//! route → [`Resolved::NoBoard`]; a routed id that does not resolve →
//! [`Resolved::Missing`]. Only a resolved board proceeds to project fields
//! and relations, never partial data. The boolean membership check
//! collapses both absences to `false`.
//!
//! # Reference stability
//!
//! Payloads are `Rc`-shared. While the tracked inputs are unchanged, every
//! call returns the same allocation (`Rc::ptr_eq` holds), so a rendering
//! layer can use pointer identity to skip re-diffing.

use std::rc::Rc;

use serde::Serialize;

use super::Resolved;
use crate::id::Id;
use crate::memo::MemoCell;
use crate::model::{Board, BoardMembership, Label, User};
use crate::state::AppState;
use crate::store::Store;

// ---------------------------------------------------------------------------
// View snapshots
// ---------------------------------------------------------------------------

/// A user snapshot embedded in a membership view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: User,
    /// True iff this is the signed-in user.
    pub is_current: bool,
}

/// A membership snapshot with its user embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipView {
    #[serde(flatten)]
    pub membership: BoardMembership,
    /// Negation of the local-id recognizer on the membership id.
    pub is_persisted: bool,
    pub user: UserView,
}

/// A label snapshot annotated with persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelView {
    #[serde(flatten)]
    pub label: Label,
    pub is_persisted: bool,
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

type BoardKey = (u64, Option<Id>);
type BoardUserKey = (u64, Option<Id>, Option<Id>);

fn board_key(state: &AppState) -> BoardKey {
    (state.store().revision(), state.path().board_id.clone())
}

fn board_user_key(state: &AppState) -> BoardUserKey {
    (
        state.store().revision(),
        state.path().board_id.clone(),
        state.current_user_id().cloned(),
    )
}

/// Resolve the routed board against the store.
fn routed_board(state: &AppState) -> Resolved<&Board> {
    let Some(board_id) = state.path().board_id.as_ref() else {
        return Resolved::NoBoard;
    };
    state
        .store()
        .board(board_id)
        .map_or(Resolved::Missing, Resolved::Found)
}

fn membership_view(
    store: &Store,
    membership: &BoardMembership,
    current_user_id: Option<&Id>,
) -> Option<MembershipView> {
    let user = store.user(&membership.user_id)?;
    Some(MembershipView {
        is_persisted: membership.id.is_persisted(),
        user: UserView {
            is_current: current_user_id == Some(&user.id),
            user: user.clone(),
        },
        membership: membership.clone(),
    })
}

// ---------------------------------------------------------------------------
// BoardByIdSelector
// ---------------------------------------------------------------------------

/// Per-instance board-by-id selector.
///
/// Construct one per call site that queries with its own id, so each site
/// owns an independent memoization slot and repeated reads with different
/// ids do not evict each other.
#[derive(Debug)]
pub struct BoardByIdSelector {
    cell: MemoCell<(u64, Id), Option<Rc<Board>>>,
}

impl BoardByIdSelector {
    /// A fresh selector with an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: MemoCell::new("boards.board_by_id"),
        }
    }

    /// Resolve a board by id to a flat snapshot (no relations).
    #[must_use]
    pub fn select(&self, state: &AppState, id: &Id) -> Option<Rc<Board>> {
        let key = (state.store().revision(), id.clone());
        self.cell
            .get_or_compute(key, || state.store().board(id).map(|b| Rc::new(b.clone())))
    }
}

impl Default for BoardByIdSelector {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// BoardSelectors
// ---------------------------------------------------------------------------

/// The aggregate of all board view selectors.
///
/// One instance per consumer (typically one per UI root). Each operation
/// owns a private memoization cell; the aggregate as a whole is the
/// default export rendering code pulls from.
#[derive(Debug)]
pub struct BoardSelectors {
    board_by_id: BoardByIdSelector,
    current_board: MemoCell<BoardKey, Resolved<Rc<Board>>>,
    memberships: MemoCell<BoardUserKey, Resolved<Rc<Vec<MembershipView>>>>,
    labels: MemoCell<BoardKey, Resolved<Rc<Vec<LabelView>>>>,
    list_ids: MemoCell<BoardKey, Resolved<Rc<Vec<Id>>>>,
    filter_users: MemoCell<BoardKey, Resolved<Rc<Vec<User>>>>,
    filter_labels: MemoCell<BoardKey, Resolved<Rc<Vec<Label>>>>,
    is_member: MemoCell<BoardUserKey, bool>,
    own_membership: MemoCell<BoardUserKey, Resolved<Option<Rc<MembershipView>>>>,
}

impl BoardSelectors {
    /// A fresh aggregate with empty caches.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            board_by_id: BoardByIdSelector::new(),
            current_board: MemoCell::new("boards.current_board"),
            memberships: MemoCell::new("boards.memberships"),
            labels: MemoCell::new("boards.labels"),
            list_ids: MemoCell::new("boards.list_ids"),
            filter_users: MemoCell::new("boards.filter_users"),
            filter_labels: MemoCell::new("boards.filter_labels"),
            is_member: MemoCell::new("boards.is_member"),
            own_membership: MemoCell::new("boards.own_membership"),
        }
    }

    /// Resolve a board by explicit id; `None` when absent.
    ///
    /// Shares one cache slot across all ids; a call site that polls a
    /// fixed id should hold its own [`BoardByIdSelector`] instead.
    #[must_use]
    pub fn board_by_id(&self, state: &AppState, id: &Id) -> Option<Rc<Board>> {
        self.board_by_id.select(state, id)
    }

    /// The routed board as a flat snapshot.
    #[must_use]
    pub fn current_board(&self, state: &AppState) -> Resolved<Rc<Board>> {
        self.current_board.get_or_compute(board_key(state), || {
            routed_board(state).map(|board| Rc::new(board.clone()))
        })
    }

    /// Ordered membership views for the current board.
    ///
    /// Ordering follows the board's membership display order. Each view
    /// carries `is_persisted` and an embedded user annotated with
    /// `is_current`. Memberships whose user is not in the cache are
    /// omitted.
    #[must_use]
    pub fn memberships_for_current_board(
        &self,
        state: &AppState,
    ) -> Resolved<Rc<Vec<MembershipView>>> {
        self.memberships.get_or_compute(board_user_key(state), || {
            routed_board(state).map(|board| {
                let store = state.store();
                let views = store
                    .memberships_for(&board.id)
                    .into_iter()
                    .filter_map(|m| membership_view(store, m, state.current_user_id()))
                    .collect();
                Rc::new(views)
            })
        })
    }

    /// Ordered label views for the current board.
    #[must_use]
    pub fn labels_for_current_board(&self, state: &AppState) -> Resolved<Rc<Vec<LabelView>>> {
        self.labels.get_or_compute(board_key(state), || {
            routed_board(state).map(|board| {
                let views = state
                    .store()
                    .labels_for(&board.id)
                    .into_iter()
                    .map(|label| LabelView {
                        is_persisted: label.id.is_persisted(),
                        label: label.clone(),
                    })
                    .collect();
                Rc::new(views)
            })
        })
    }

    /// Ordered list ids (not full rows) for the current board.
    #[must_use]
    pub fn list_ids_for_current_board(&self, state: &AppState) -> Resolved<Rc<Vec<Id>>> {
        self.list_ids.get_or_compute(board_key(state), || {
            routed_board(state).map(|board| {
                let ids = state
                    .store()
                    .lists_for(&board.id)
                    .into_iter()
                    .map(|list| list.id.clone())
                    .collect();
                Rc::new(ids)
            })
        })
    }

    /// The current board's active member-filter selections, in selection
    /// order.
    #[must_use]
    pub fn filter_users_for_current_board(&self, state: &AppState) -> Resolved<Rc<Vec<User>>> {
        self.filter_users.get_or_compute(board_key(state), || {
            routed_board(state).map(|board| {
                let users = state
                    .store()
                    .filter_users_for(&board.id)
                    .into_iter()
                    .cloned()
                    .collect();
                Rc::new(users)
            })
        })
    }

    /// The current board's active label-filter selections, in selection
    /// order.
    #[must_use]
    pub fn filter_labels_for_current_board(&self, state: &AppState) -> Resolved<Rc<Vec<Label>>> {
        self.filter_labels.get_or_compute(board_key(state), || {
            routed_board(state).map(|board| {
                let labels = state
                    .store()
                    .filter_labels_for(&board.id)
                    .into_iter()
                    .cloned()
                    .collect();
                Rc::new(labels)
            })
        })
    }

    /// Whether the signed-in user is a member of the current board.
    ///
    /// `false` when no board is routed, when the board is unresolved, or
    /// when nobody is signed in.
    #[must_use]
    pub fn is_current_user_member_for_current_board(&self, state: &AppState) -> bool {
        self.is_member.get_or_compute(board_user_key(state), || {
            let Some(user_id) = state.current_user_id() else {
                return false;
            };
            match routed_board(state) {
                Resolved::Found(board) => state.store().has_member(&board.id, user_id),
                Resolved::NoBoard | Resolved::Missing => false,
            }
        })
    }

    /// The signed-in user's own membership view for the current board.
    ///
    /// `Found(None)` when the board resolves but the user holds no
    /// membership (or nobody is signed in).
    #[must_use]
    pub fn current_user_membership_for_current_board(
        &self,
        state: &AppState,
    ) -> Resolved<Option<Rc<MembershipView>>> {
        self.own_membership
            .get_or_compute(board_user_key(state), || {
                routed_board(state).map(|board| {
                    let store = state.store();
                    state
                        .current_user_id()
                        .and_then(|user_id| store.membership_of_user(&board.id, user_id))
                        .and_then(|m| membership_view(store, m, state.current_user_id()))
                        .map(Rc::new)
                })
            })
    }
}

impl Default for BoardSelectors {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{BoardByIdSelector, BoardSelectors};
    use std::rc::Rc;
    use std::str::FromStr;

    use crate::id::Id;
    use crate::model::{Board, BoardMembership, Label, LabelColor, List, Role, User};
    use crate::route::Path;
    use crate::selectors::Resolved;
    use crate::state::AppState;

    fn id(s: &str) -> Id {
        Id::from_str(s).unwrap()
    }

    fn seed_board(state: &mut AppState, bid: &str) {
        state.store_mut().upsert_board(Board {
            id: id(bid),
            name: format!("Board {bid}"),
            position: 0,
            created_at: None,
            updated_at: None,
        });
    }

    fn seed_user(state: &mut AppState, uid: &str) {
        state.store_mut().upsert_user(User {
            id: id(uid),
            name: format!("User {uid}"),
            username: None,
            email: None,
            avatar_url: None,
            created_at: None,
        });
    }

    fn seed_membership(state: &mut AppState, mid: &str, bid: &str, uid: &str, position: i64) {
        state.store_mut().upsert_membership(BoardMembership {
            id: id(mid),
            board_id: id(bid),
            user_id: id(uid),
            role: Role::Editor,
            can_comment: true,
            position,
            created_at: None,
        });
    }

    fn seed_list(state: &mut AppState, lid: &str, bid: &str, position: i64) {
        state.store_mut().upsert_list(List {
            id: id(lid),
            board_id: id(bid),
            name: format!("List {lid}"),
            position,
            created_at: None,
        });
    }

    fn seed_label(state: &mut AppState, lid: &str, bid: &str, position: i64) {
        state.store_mut().upsert_label(Label {
            id: id(lid),
            board_id: id(bid),
            name: format!("Label {lid}"),
            color: LabelColor::BerryRed,
            position,
            created_at: None,
        });
    }

    // === short-circuit policy =============================================

    #[test]
    fn no_routed_board_is_no_board_everywhere() {
        let state = AppState::new();
        let selectors = BoardSelectors::new();

        assert_eq!(selectors.current_board(&state), Resolved::NoBoard);
        assert_eq!(
            selectors.memberships_for_current_board(&state),
            Resolved::NoBoard
        );
        assert_eq!(
            selectors.labels_for_current_board(&state),
            Resolved::NoBoard
        );
        assert_eq!(
            selectors.list_ids_for_current_board(&state),
            Resolved::NoBoard
        );
        assert_eq!(
            selectors.filter_users_for_current_board(&state),
            Resolved::NoBoard
        );
        assert_eq!(
            selectors.filter_labels_for_current_board(&state),
            Resolved::NoBoard
        );
        assert_eq!(
            selectors.current_user_membership_for_current_board(&state),
            Resolved::NoBoard
        );
        assert!(!selectors.is_current_user_member_for_current_board(&state));
    }

    #[test]
    fn unresolved_board_is_missing_everywhere() {
        let mut state = AppState::new();
        state.set_path(Path::parse("/boards/b1"));
        let selectors = BoardSelectors::new();

        assert_eq!(selectors.current_board(&state), Resolved::Missing);
        assert_eq!(
            selectors.memberships_for_current_board(&state),
            Resolved::Missing
        );
        assert_eq!(
            selectors.list_ids_for_current_board(&state),
            Resolved::Missing
        );
        assert!(!selectors.is_current_user_member_for_current_board(&state));
    }

    // === board_by_id ======================================================

    #[test]
    fn board_by_id_resolves_to_a_flat_snapshot() {
        let mut state = AppState::new();
        seed_board(&mut state, "b1");
        let selectors = BoardSelectors::new();

        let board = selectors.board_by_id(&state, &id("b1")).unwrap();
        assert_eq!(board.name, "Board b1");
        assert!(selectors.board_by_id(&state, &id("b2")).is_none());
    }

    #[test]
    fn independent_factory_instances_do_not_share_slots() {
        let mut state = AppState::new();
        seed_board(&mut state, "b1");
        seed_board(&mut state, "b2");

        let for_b1 = BoardByIdSelector::new();
        let for_b2 = BoardByIdSelector::new();

        let first = for_b1.select(&state, &id("b1")).unwrap();
        let _ = for_b2.select(&state, &id("b2"));
        let second = for_b1.select(&state, &id("b1")).unwrap();

        // The other instance's read did not evict this one's slot.
        assert!(Rc::ptr_eq(&first, &second));
    }

    // === annotations ======================================================

    #[test]
    fn membership_views_annotate_persistence_and_current_user() {
        let mut state = AppState::new();
        seed_board(&mut state, "b1");
        seed_user(&mut state, "u1");
        seed_user(&mut state, "u2");
        seed_membership(&mut state, "m1", "b1", "u2", 1);
        state.store_mut().upsert_membership(BoardMembership {
            id: Id::local(3),
            board_id: id("b1"),
            user_id: id("u1"),
            role: Role::Viewer,
            can_comment: false,
            position: 2,
            created_at: None,
        });
        state.set_path(Path::parse("/boards/b1"));
        state.set_current_user_id(Some(id("u1")));

        let selectors = BoardSelectors::new();
        let views = selectors
            .memberships_for_current_board(&state)
            .found()
            .unwrap();

        assert_eq!(views.len(), 2);
        assert!(views[0].is_persisted);
        assert!(!views[0].user.is_current);
        assert!(!views[1].is_persisted); // local id
        assert!(views[1].user.is_current);
    }

    #[test]
    fn memberships_without_a_cached_user_are_omitted() {
        let mut state = AppState::new();
        seed_board(&mut state, "b1");
        seed_user(&mut state, "u1");
        seed_membership(&mut state, "m1", "b1", "u1", 1);
        seed_membership(&mut state, "m2", "b1", "ghost", 2);
        state.set_path(Path::parse("/boards/b1"));

        let selectors = BoardSelectors::new();
        let views = selectors
            .memberships_for_current_board(&state)
            .found()
            .unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].membership.id, id("m1"));
    }

    #[test]
    fn label_views_annotate_persistence() {
        let mut state = AppState::new();
        seed_board(&mut state, "b1");
        seed_label(&mut state, "x1", "b1", 1);
        state.store_mut().upsert_label(Label {
            id: Id::local(9),
            board_id: id("b1"),
            name: "Pending".to_string(),
            color: LabelColor::BrightMoss,
            position: 2,
            created_at: None,
        });
        state.set_path(Path::parse("/boards/b1"));

        let selectors = BoardSelectors::new();
        let views = selectors.labels_for_current_board(&state).found().unwrap();
        assert_eq!(views.len(), 2);
        assert!(views[0].is_persisted);
        assert!(!views[1].is_persisted);
    }

    // === list ids =========================================================

    #[test]
    fn list_ids_follow_list_order() {
        let mut state = AppState::new();
        seed_board(&mut state, "b1");
        seed_list(&mut state, "l2", "b1", 20);
        seed_list(&mut state, "l1", "b1", 10);
        seed_list(&mut state, "l3", "b1", 30);
        state.set_path(Path::parse("/boards/b1"));

        let selectors = BoardSelectors::new();
        let ids = selectors.list_ids_for_current_board(&state).found().unwrap();
        let ids: Vec<&str> = ids.iter().map(Id::as_str).collect();
        assert_eq!(ids, ["l1", "l2", "l3"]);
    }

    // === membership checks ================================================

    #[test]
    fn membership_check_requires_a_signed_in_member() {
        let mut state = AppState::new();
        seed_board(&mut state, "b1");
        seed_user(&mut state, "u1");
        seed_membership(&mut state, "m1", "b1", "u1", 1);
        state.set_path(Path::parse("/boards/b1"));

        let selectors = BoardSelectors::new();

        // Nobody signed in.
        assert!(!selectors.is_current_user_member_for_current_board(&state));

        state.set_current_user_id(Some(id("u1")));
        assert!(selectors.is_current_user_member_for_current_board(&state));

        state.set_current_user_id(Some(id("u2")));
        assert!(!selectors.is_current_user_member_for_current_board(&state));
    }

    #[test]
    fn own_membership_is_found_none_for_non_members() {
        let mut state = AppState::new();
        seed_board(&mut state, "b1");
        seed_user(&mut state, "u1");
        seed_user(&mut state, "u2");
        seed_membership(&mut state, "m1", "b1", "u1", 1);
        state.set_path(Path::parse("/boards/b1"));
        state.set_current_user_id(Some(id("u2")));

        let selectors = BoardSelectors::new();
        assert_eq!(
            selectors.current_user_membership_for_current_board(&state),
            Resolved::Found(None)
        );

        state.set_current_user_id(Some(id("u1")));
        let own = selectors
            .current_user_membership_for_current_board(&state)
            .found()
            .unwrap()
            .unwrap();
        assert_eq!(own.membership.id, id("m1"));
        assert!(own.user.is_current);
    }

    // === memoization ======================================================

    #[test]
    fn unchanged_inputs_replay_the_same_allocation() {
        let mut state = AppState::new();
        seed_board(&mut state, "b1");
        seed_user(&mut state, "u1");
        seed_membership(&mut state, "m1", "b1", "u1", 1);
        state.set_path(Path::parse("/boards/b1"));
        state.set_current_user_id(Some(id("u1")));

        let selectors = BoardSelectors::new();
        let first = selectors
            .memberships_for_current_board(&state)
            .found()
            .unwrap();
        let second = selectors
            .memberships_for_current_board(&state)
            .found()
            .unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn a_store_mutation_invalidates_the_cache() {
        let mut state = AppState::new();
        seed_board(&mut state, "b1");
        seed_list(&mut state, "l1", "b1", 1);
        state.set_path(Path::parse("/boards/b1"));

        let selectors = BoardSelectors::new();
        let before = selectors.list_ids_for_current_board(&state).found().unwrap();

        seed_list(&mut state, "l0", "b1", 0);

        let after = selectors.list_ids_for_current_board(&state).found().unwrap();
        assert!(!Rc::ptr_eq(&before, &after));
        let ids: Vec<&str> = after.iter().map(Id::as_str).collect();
        assert_eq!(ids, ["l0", "l1"]);
    }
}
