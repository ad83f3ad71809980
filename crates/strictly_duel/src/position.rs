//! Named cells of the 3x3 duel board and their king-move adjacency.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell on the duel board (0-8, row-major).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (position 0)
    TopLeft,
    /// Top-center (position 1)
    TopCenter,
    /// Top-right (position 2)
    TopRight,
    /// Middle-left (position 3)
    MiddleLeft,
    /// Center (position 4)
    Center,
    /// Middle-right (position 5)
    MiddleRight,
    /// Bottom-left (position 6)
    BottomLeft,
    /// Bottom-center (position 7)
    BottomCenter,
    /// Bottom-right (position 8)
    BottomRight,
}

use Position::*;

impl Position {
    /// All 9 positions in index order.
    pub const ALL: [Position; 9] = [
        TopLeft,
        TopCenter,
        TopRight,
        MiddleLeft,
        Center,
        MiddleRight,
        BottomLeft,
        BottomCenter,
        BottomRight,
    ];

    /// The four corner cells.
    pub const CORNERS: [Position; 4] = [TopLeft, TopRight, BottomLeft, BottomRight];

    /// Label for display.
    pub fn label(&self) -> &'static str {
        match self {
            TopLeft => "Top-left",
            TopCenter => "Top-center",
            TopRight => "Top-right",
            MiddleLeft => "Middle-left",
            Center => "Center",
            MiddleRight => "Middle-right",
            BottomLeft => "Bottom-left",
            BottomCenter => "Bottom-center",
            BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse from a board index (0-8) or a label.
    ///
    /// Labels match case-insensitively and ignore `-`, `_` and spaces,
    /// so `"top left"` and `"TopLeft"` both resolve.
    #[instrument]
    pub fn from_label_or_number(s: &str) -> Option<Position> {
        let s = s.trim();
        if let Ok(num) = s.parse::<usize>() {
            return Self::from_index(num);
        }

        let wanted = normalize(s);
        if wanted.is_empty() {
            return None;
        }
        <Position as strum::IntoEnumIterator>::iter().find(|pos| normalize(pos.label()) == wanted)
    }

    /// Cells reachable in one king-move step.
    pub fn neighbors(self) -> &'static [Position] {
        match self {
            TopLeft => &[TopCenter, MiddleLeft, Center],
            TopCenter => &[TopLeft, TopRight, MiddleLeft, Center, MiddleRight],
            TopRight => &[TopCenter, Center, MiddleRight],
            MiddleLeft => &[TopLeft, TopCenter, Center, BottomLeft, BottomCenter],
            Center => &[
                TopLeft,
                TopCenter,
                TopRight,
                MiddleLeft,
                MiddleRight,
                BottomLeft,
                BottomCenter,
                BottomRight,
            ],
            MiddleRight => &[TopCenter, TopRight, Center, BottomCenter, BottomRight],
            BottomLeft => &[MiddleLeft, Center, BottomCenter],
            BottomCenter => &[MiddleLeft, Center, MiddleRight, BottomLeft, BottomRight],
            BottomRight => &[Center, MiddleRight, BottomCenter],
        }
    }

    /// Returns true if `other` is one king-move step away.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.neighbors().contains(&other)
    }

    /// Returns true for the four corner cells.
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_is_ordered() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.to_index(), i);
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        for a in Position::ALL {
            for &b in a.neighbors() {
                assert!(b.is_adjacent(a), "{a} -> {b} is not mirrored");
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_neighbor_counts() {
        assert_eq!(Center.neighbors().len(), 8);
        for corner in Position::CORNERS {
            assert_eq!(corner.neighbors().len(), 3);
        }
        for edge in [TopCenter, MiddleLeft, MiddleRight, BottomCenter] {
            assert_eq!(edge.neighbors().len(), 5);
        }
    }

    #[test]
    fn test_corners_are_not_adjacent_to_each_other() {
        assert!(!TopLeft.is_adjacent(TopRight));
        assert!(!TopLeft.is_adjacent(BottomRight));
        assert!(!TopLeft.is_adjacent(TopLeft));
    }

    #[test]
    fn test_parse_label_or_number() {
        assert_eq!(Position::from_label_or_number("4"), Some(Center));
        assert_eq!(Position::from_label_or_number(" 0 "), Some(TopLeft));
        assert_eq!(Position::from_label_or_number("top left"), Some(TopLeft));
        assert_eq!(Position::from_label_or_number("Bottom-Right"), Some(BottomRight));
        assert_eq!(Position::from_label_or_number("9"), None);
        assert_eq!(Position::from_label_or_number("nowhere"), None);
        assert_eq!(Position::from_label_or_number(""), None);
    }
}
