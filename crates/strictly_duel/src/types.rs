//! Core domain types for the duel.

use super::action::Move;
use super::position::Position;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// One of the two seats in a match.
///
/// `X` is always a human. `O` is the second human or the computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Side {
    /// The first human seat.
    X,
    /// The second seat (player two or the computer).
    O,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }
}

/// Visual token a side plays with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, strum::Display,
)]
pub enum Token {
    /// 🐱
    Cat,
    /// 🐶
    Dog,
    /// ⭐
    Star,
    /// ❤️
    Heart,
}

impl Token {
    /// Glyph shown on the board.
    pub fn glyph(self) -> &'static str {
        match self {
            Token::Cat => "🐱",
            Token::Dog => "🐶",
            Token::Star => "⭐",
            Token::Heart => "❤️",
        }
    }
}

/// Side-to-token binding for one match. The two tokens always differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    x: Token,
    o: Token,
}

impl TokenPair {
    /// Binds tokens to sides, or `None` if they are the same token.
    pub fn new(x: Token, o: Token) -> Option<Self> {
        (x != o).then_some(Self { x, o })
    }

    /// Draws two distinct tokens at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let all: Vec<Token> = Token::iter().collect();
        let x = all[rng.gen_range(0..all.len())];
        let rest: Vec<Token> = all.into_iter().filter(|t| *t != x).collect();
        let o = rest[rng.gen_range(0..rest.len())];
        Self { x, o }
    }

    /// Token played by `side`.
    pub fn token(&self, side: Side) -> Token {
        match side {
            Side::X => self.x,
            Side::O => self.o,
        }
    }

    /// Side that plays `token`, if either does.
    pub fn side_of(&self, token: Token) -> Option<Side> {
        if token == self.x {
            Some(Side::X)
        } else if token == self.o {
            Some(Side::O)
        } else {
            None
        }
    }
}

/// A square on the duel board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square holding a token.
    Occupied(Token),
}

impl Square {
    /// Token on this square, if any.
    pub fn token(self) -> Option<Token> {
        match self {
            Square::Empty => None,
            Square::Occupied(token) => Some(token),
        }
    }
}

/// 3x3 duel board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns true if `pos` holds `token`.
    pub fn holds(&self, pos: Position, token: Token) -> bool {
        self.get(pos) == Square::Occupied(token)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Empty positions in index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Positions holding `token`, in index order.
    pub fn positions_of(&self, token: Token) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|pos| self.holds(*pos, token))
            .collect()
    }

    /// Number of squares holding `token`.
    pub fn count(&self, token: Token) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(token))
            .count()
    }

    /// Copy of this board with `token` placed at `pos`.
    pub fn with_placement(&self, pos: Position, token: Token) -> Self {
        let mut next = *self;
        next.set(pos, Square::Occupied(token));
        next
    }

    /// Copy of this board with the token at `mv.from` relocated to `mv.to`.
    pub fn with_move(&self, mv: Move) -> Self {
        let mut next = *self;
        next.set(mv.to, self.get(mv.from));
        next.set(mv.from, Square::Empty);
        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_token_pair_rejects_duplicates() {
        assert!(TokenPair::new(Token::Cat, Token::Cat).is_none());
        let pair = TokenPair::new(Token::Cat, Token::Star).unwrap();
        assert_eq!(pair.token(Side::O), Token::Star);
        assert_eq!(pair.side_of(Token::Cat), Some(Side::X));
        assert_eq!(pair.side_of(Token::Dog), None);
    }

    #[test]
    fn test_random_tokens_are_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let pair = TokenPair::random(&mut rng);
            assert_ne!(pair.token(Side::X), pair.token(Side::O));
        }
    }

    #[test]
    fn test_with_move_relocates() {
        let board = Board::new().with_placement(Position::TopLeft, Token::Dog);
        let moved = board.with_move(Move::new(Position::TopLeft, Position::TopCenter));
        assert!(moved.is_empty(Position::TopLeft));
        assert!(moved.holds(Position::TopCenter, Token::Dog));
        // Source board untouched
        assert!(board.holds(Position::TopLeft, Token::Dog));
    }

    #[test]
    fn test_empty_positions_and_counts() {
        let board = Board::new()
            .with_placement(Position::Center, Token::Cat)
            .with_placement(Position::BottomRight, Token::Cat);
        assert_eq!(board.empty_positions().len(), 7);
        assert_eq!(board.count(Token::Cat), 2);
        assert_eq!(
            board.positions_of(Token::Cat),
            vec![Position::Center, Position::BottomRight]
        );
    }
}
