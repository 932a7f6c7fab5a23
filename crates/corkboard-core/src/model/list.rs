use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::Id;

/// A list (column) on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: Id,
    pub board_id: Id,
    pub name: String,
    /// Board-scoped display order.
    pub position: i64,
    pub created_at: Option<DateTime<Utc>>,
}
