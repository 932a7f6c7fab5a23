use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize};
use crate::id::Id;

/// What a member may do on a board.
///
/// Editors have full write access. Viewers are read-only; whether a viewer
/// may comment is a separate flag on the membership, so the role stays a
/// two-value enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Editor,
    Viewer,
}

impl Role {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            _ => Err(ParseEnumError {
                expected: "role",
                got: s.to_string(),
            }),
        }
    }
}

/// Association between a [`crate::model::User`] and a [`crate::model::Board`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMembership {
    pub id: Id,
    pub board_id: Id,
    pub user_id: Id,
    pub role: Role,
    /// Only meaningful for viewers; editors can always comment.
    pub can_comment: bool,
    /// Membership display order on the board.
    pub position: i64,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::Role;
    use std::str::FromStr;

    #[test]
    fn role_json_roundtrips() {
        assert_eq!(serde_json::to_string(&Role::Editor).unwrap(), "\"editor\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"viewer\"").unwrap(),
            Role::Viewer
        );
    }

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        assert_eq!(Role::from_str(" Editor ").unwrap(), Role::Editor);
        assert!(Role::from_str("owner").is_err());
    }
}
