use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::Id;

/// A board: the top-level organizational entity owning lists, labels, and
/// memberships.
///
/// Child collections are navigated through the store's relation indexes;
/// the row itself carries only flat attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: Id,
    pub name: String,
    /// Display order among sibling boards.
    pub position: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::Board;
    use std::str::FromStr;

    use crate::id::Id;

    #[test]
    fn serde_roundtrip() {
        let board = Board {
            id: Id::from_str("b1").unwrap(),
            name: "Roadmap".to_string(),
            position: 65536,
            created_at: None,
            updated_at: None,
        };
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
