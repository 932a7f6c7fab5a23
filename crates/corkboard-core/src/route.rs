//! Parsed routing state.
//!
//! [`Path`] is the routing reducer's output: the segments of the current
//! location that the view layer cares about. Selectors only consume the
//! optional board id; everything else about navigation lives upstream.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::id::Id;

/// The parsed current path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// The routed board, when the location is a board (or something on
    /// one). `None` everywhere else, never an empty id.
    pub board_id: Option<Id>,
}

impl Path {
    /// The root location: nothing selected.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// A board location.
    #[must_use]
    pub fn board(board_id: Id) -> Self {
        Self {
            board_id: Some(board_id),
        }
    }

    /// Parse a location pathname into routing state.
    ///
    /// Recognizes `/boards/<id>`; any other shape parses to the root path.
    /// Unknown locations are not an error: the router simply has no board
    /// to offer and selectors short-circuit accordingly.
    #[must_use]
    pub fn parse(pathname: &str) -> Self {
        let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["boards", raw] => Id::from_str(raw).map_or_else(|_| Self::root(), Self::board),
            _ => Self::root(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Path;
    use std::str::FromStr;

    use crate::id::Id;

    #[test]
    fn parses_board_locations() {
        let path = Path::parse("/boards/b1");
        assert_eq!(path.board_id, Some(Id::from_str("b1").unwrap()));

        // Trailing slash is tolerated.
        let path = Path::parse("/boards/b1/");
        assert_eq!(path.board_id, Some(Id::from_str("b1").unwrap()));
    }

    #[test]
    fn unknown_locations_parse_to_root() {
        assert_eq!(Path::parse("/"), Path::root());
        assert_eq!(Path::parse(""), Path::root());
        assert_eq!(Path::parse("/settings"), Path::root());
        assert_eq!(Path::parse("/boards"), Path::root());
        assert_eq!(Path::parse("/boards/b1/extra"), Path::root());
    }
}
