//! Equality-checked memoization for derived values.
//!
//! [`MemoCell`] is a single-slot cache: it remembers the key and value of
//! the most recent computation and replays the value while the key compares
//! equal. Selectors build their key from the tracked inputs (store
//! revision, resolved board id, current user id), so a cached projection
//! stays live exactly until one of those inputs changes.
//!
//! A selector called with alternating keys evicts its slot on every call;
//! call sites in that position construct their own selector instance so
//! each owns an independent cell.
//!
//! Values are cloned out of the cell. Selector payloads are `Rc`, so a hit
//! is a pointer copy and the returned value is reference-stable across
//! hits.

use std::cell::RefCell;

/// A single-slot, equality-checked cache cell.
///
/// Interior mutability via `RefCell`: the cell is privately owned by one
/// selector instance and the whole layer is single-threaded by design.
#[derive(Debug)]
pub struct MemoCell<K, V> {
    name: &'static str,
    slot: RefCell<Option<(K, V)>>,
}

impl<K, V> MemoCell<K, V>
where
    K: PartialEq,
    V: Clone,
{
    /// Create an empty cell. `name` tags trace events.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: RefCell::new(None),
        }
    }

    /// Return the cached value if `key` matches the stored key, otherwise
    /// run `compute`, cache the result under `key`, and return it.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some((cached_key, cached_value)) = self.slot.borrow().as_ref() {
            if *cached_key == key {
                tracing::trace!(selector = self.name, "memo hit");
                return cached_value.clone();
            }
        }

        tracing::trace!(selector = self.name, "memo miss");
        let value = compute();
        *self.slot.borrow_mut() = Some((key, value.clone()));
        value
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
