//! The in-memory relational cache.
//!
//! [`Store`] holds one indexed table per entity plus explicit adjacency
//! lists for the board-scoped relations (lists, labels, memberships, and
//! the two filter selections). It is the denormalized mirror the upstream
//! sync layer writes into and the selector layer reads out of.
//!
//! # Ordering
//!
//! Ordered relations (lists, labels, memberships) sort children by
//! `(position, id)` at query time; the id tie-break keeps the order total
//! and deterministic when positions collide. Filter selections keep
//! insertion order.
//!
//! # Revision
//!
//! Every mutation bumps a monotonically increasing revision counter.
//! Selectors fold the revision into their memoization key, so a cached
//! projection stays valid exactly as long as the model has not changed.
//!
//! # Referential integrity
//!
//! None is enforced. Rows may reference ids that are not (or no longer)
//! resolvable; lookups return `None` and relation traversal skips rows
//! whose referenced entities are absent. "Not found" is a value here,
//! never an error.

use std::collections::HashMap;

use crate::id::Id;
use crate::model::{Board, BoardMembership, Label, List, User};

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Indexed entity tables plus relation adjacency lists.
#[derive(Debug, Clone, Default)]
pub struct Store {
    boards: HashMap<Id, Board>,
    users: HashMap<Id, User>,
    lists: HashMap<Id, List>,
    labels: HashMap<Id, Label>,
    memberships: HashMap<Id, BoardMembership>,

    /// board id → child ids, in insertion order.
    board_lists: HashMap<Id, Vec<Id>>,
    board_labels: HashMap<Id, Vec<Id>>,
    board_memberships: HashMap<Id, Vec<Id>>,

    /// board id → selected filter ids, in selection order.
    board_filter_users: HashMap<Id, Vec<Id>>,
    board_filter_labels: HashMap<Id, Vec<Id>>,

    revision: u64,
}

impl Store {
    /// Create an empty store at revision 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The store's mutation counter.
    ///
    /// Strictly increases with every mutation; equal revisions imply an
    /// unchanged model.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
        tracing::trace!(revision = self.revision, "store mutated");
    }

    // -----------------------------------------------------------------------
    // Entity lookups
    // -----------------------------------------------------------------------

    /// Resolve a board by id.
    #[must_use]
    pub fn board(&self, id: &Id) -> Option<&Board> {
        self.boards.get(id)
    }

    /// Resolve a user by id.
    #[must_use]
    pub fn user(&self, id: &Id) -> Option<&User> {
        self.users.get(id)
    }

    /// Resolve a list by id.
    #[must_use]
    pub fn list(&self, id: &Id) -> Option<&List> {
        self.lists.get(id)
    }

    /// Resolve a label by id.
    #[must_use]
    pub fn label(&self, id: &Id) -> Option<&Label> {
        self.labels.get(id)
    }

    /// Resolve a membership by id.
    #[must_use]
    pub fn membership(&self, id: &Id) -> Option<&BoardMembership> {
        self.memberships.get(id)
    }

    // -----------------------------------------------------------------------
    // Relation traversal
    // -----------------------------------------------------------------------

    /// A board's memberships, ordered by `(position, id)`.
    ///
    /// Rows whose membership record is gone are skipped.
    #[must_use]
    pub fn memberships_for(&self, board_id: &Id) -> Vec<&BoardMembership> {
        let mut rows: Vec<&BoardMembership> = Self::child_ids(&self.board_memberships, board_id)
            .iter()
            .filter_map(|id| self.memberships.get(id))
            .collect();
        rows.sort_by(|a, b| (a.position, &a.id).cmp(&(b.position, &b.id)));
        rows
    }

    /// A board's labels, ordered by `(position, id)`.
    #[must_use]
    pub fn labels_for(&self, board_id: &Id) -> Vec<&Label> {
        let mut rows: Vec<&Label> = Self::child_ids(&self.board_labels, board_id)
            .iter()
            .filter_map(|id| self.labels.get(id))
            .collect();
        rows.sort_by(|a, b| (a.position, &a.id).cmp(&(b.position, &b.id)));
        rows
    }

    /// A board's lists, ordered by `(position, id)`.
    #[must_use]
    pub fn lists_for(&self, board_id: &Id) -> Vec<&List> {
        let mut rows: Vec<&List> = Self::child_ids(&self.board_lists, board_id)
            .iter()
            .filter_map(|id| self.lists.get(id))
            .collect();
        rows.sort_by(|a, b| (a.position, &a.id).cmp(&(b.position, &b.id)));
        rows
    }

    /// Users selected into a board's member filter, in selection order.
    ///
    /// Selections referencing a user no longer in the cache are skipped.
    #[must_use]
    pub fn filter_users_for(&self, board_id: &Id) -> Vec<&User> {
        Self::child_ids(&self.board_filter_users, board_id)
            .iter()
            .filter_map(|id| self.users.get(id))
            .collect()
    }

    /// Labels selected into a board's label filter, in selection order.
    #[must_use]
    pub fn filter_labels_for(&self, board_id: &Id) -> Vec<&Label> {
        Self::child_ids(&self.board_filter_labels, board_id)
            .iter()
            .filter_map(|id| self.labels.get(id))
            .collect()
    }

    /// Returns `true` if the user holds a membership on the board.
    #[must_use]
    pub fn has_member(&self, board_id: &Id, user_id: &Id) -> bool {
        self.membership_of_user(board_id, user_id).is_some()
    }

    /// The user's membership on the board, if any.
    #[must_use]
    pub fn membership_of_user(&self, board_id: &Id, user_id: &Id) -> Option<&BoardMembership> {
        Self::child_ids(&self.board_memberships, board_id)
            .iter()
            .filter_map(|id| self.memberships.get(id))
            .find(|m| &m.user_id == user_id)
    }

    fn child_ids<'a>(index: &'a HashMap<Id, Vec<Id>>, board_id: &Id) -> &'a [Id] {
        index.get(board_id).map_or(&[], Vec::as_slice)
    }

    // -----------------------------------------------------------------------
    // Mutation: boards and users
    // -----------------------------------------------------------------------

    /// Insert or replace a board.
    pub fn upsert_board(&mut self, board: Board) {
        self.boards.insert(board.id.clone(), board);
        self.bump();
    }

    /// Remove a board and detach everything scoped to it: lists, labels,
    /// memberships, and both filter selections.
    ///
    /// Returns `true` if the board existed.
    pub fn remove_board(&mut self, id: &Id) -> bool {
        let existed = self.boards.remove(id).is_some();

        for child in self.board_lists.remove(id).unwrap_or_default() {
            self.lists.remove(&child);
        }
        for child in self.board_labels.remove(id).unwrap_or_default() {
            self.labels.remove(&child);
        }
        for child in self.board_memberships.remove(id).unwrap_or_default() {
            self.memberships.remove(&child);
        }
        self.board_filter_users.remove(id);
        self.board_filter_labels.remove(id);

        self.bump();
        existed
    }

    /// Insert or replace a user.
    pub fn upsert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
        self.bump();
    }

    /// Remove a user. Memberships and filter selections referencing the
    /// user stay behind and are skipped during traversal.
    pub fn remove_user(&mut self, id: &Id) -> bool {
        let existed = self.users.remove(id).is_some();
        self.bump();
        existed
    }

    // -----------------------------------------------------------------------
    // Mutation: board children
    // -----------------------------------------------------------------------

    /// Insert or replace a list, keeping the board adjacency in sync.
    pub fn upsert_list(&mut self, list: List) {
        let id = list.id.clone();
        let board_id = list.board_id.clone();
        let previous = self.lists.insert(id.clone(), list);
        Self::reattach(&mut self.board_lists, previous.map(|p| p.board_id), board_id, &id);
        self.bump();
    }

    /// Remove a list.
    pub fn remove_list(&mut self, id: &Id) -> bool {
        let Some(list) = self.lists.remove(id) else {
            return false;
        };
        Self::detach(&mut self.board_lists, &list.board_id, id);
        self.bump();
        true
    }

    /// Insert or replace a label, keeping the board adjacency in sync.
    pub fn upsert_label(&mut self, label: Label) {
        let id = label.id.clone();
        let board_id = label.board_id.clone();
        let previous = self.labels.insert(id.clone(), label);
        Self::reattach(&mut self.board_labels, previous.map(|p| p.board_id), board_id, &id);
        self.bump();
    }

    /// Remove a label, also dropping it from any label filter it is
    /// selected into.
    pub fn remove_label(&mut self, id: &Id) -> bool {
        let Some(label) = self.labels.remove(id) else {
            return false;
        };
        Self::detach(&mut self.board_labels, &label.board_id, id);
        if let Some(selected) = self.board_filter_labels.get_mut(&label.board_id) {
            selected.retain(|s| s != id);
        }
        self.bump();
        true
    }

    /// Insert or replace a membership, keeping the board adjacency in sync.
    pub fn upsert_membership(&mut self, membership: BoardMembership) {
        let id = membership.id.clone();
        let board_id = membership.board_id.clone();
        let previous = self.memberships.insert(id.clone(), membership);
        Self::reattach(
            &mut self.board_memberships,
            previous.map(|p| p.board_id),
            board_id,
            &id,
        );
        self.bump();
    }

    /// Remove a membership.
    pub fn remove_membership(&mut self, id: &Id) -> bool {
        let Some(membership) = self.memberships.remove(id) else {
            return false;
        };
        Self::detach(&mut self.board_memberships, &membership.board_id, id);
        self.bump();
        true
    }

    // -----------------------------------------------------------------------
    // Mutation: filter selections
    // -----------------------------------------------------------------------

    /// Select a user into a board's member filter. Re-selecting is a no-op
    /// for ordering purposes (the original position is kept).
    pub fn add_filter_user(&mut self, board_id: &Id, user_id: &Id) {
        let selected = self.board_filter_users.entry(board_id.clone()).or_default();
        if !selected.contains(user_id) {
            selected.push(user_id.clone());
        }
        self.bump();
    }

    /// Drop a user from a board's member filter.
    pub fn remove_filter_user(&mut self, board_id: &Id, user_id: &Id) {
        if let Some(selected) = self.board_filter_users.get_mut(board_id) {
            selected.retain(|s| s != user_id);
        }
        self.bump();
    }

    /// Select a label into a board's label filter.
    pub fn add_filter_label(&mut self, board_id: &Id, label_id: &Id) {
        let selected = self.board_filter_labels.entry(board_id.clone()).or_default();
        if !selected.contains(label_id) {
            selected.push(label_id.clone());
        }
        self.bump();
    }

    /// Drop a label from a board's label filter.
    pub fn remove_filter_label(&mut self, board_id: &Id, label_id: &Id) {
        if let Some(selected) = self.board_filter_labels.get_mut(board_id) {
            selected.retain(|s| s != label_id);
        }
        self.bump();
    }

    // -----------------------------------------------------------------------
    // Adjacency bookkeeping
    // -----------------------------------------------------------------------

    fn reattach(
        index: &mut HashMap<Id, Vec<Id>>,
        previous_board: Option<Id>,
        board_id: Id,
        child: &Id,
    ) {
        if let Some(previous) = previous_board {
            if previous == board_id {
                return; // update in place, adjacency unchanged
            }
            Self::detach(index, &previous, child);
        }
        index.entry(board_id).or_default().push(child.clone());
    }

    fn detach(index: &mut HashMap<Id, Vec<Id>>, board_id: &Id, child: &Id) {
        if let Some(children) = index.get_mut(board_id) {
            children.retain(|c| c != child);
            if children.is_empty() {
                index.remove(board_id);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
