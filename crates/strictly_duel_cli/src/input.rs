//! Parsing of play-loop commands.

use strictly_duel::Position;

/// A line typed at the play prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Bare cell: place, select or move depending on the turn.
    Cell(Position),
    /// Place on a cell.
    Place(Position),
    /// Select an own token.
    Select(Position),
    /// Move the selected token.
    Move(Position),
    /// Take back the last turn.
    Undo,
    /// Start over with the same settings.
    Reset,
    /// Toggle sound.
    Mute,
    /// Show commands.
    Help,
    /// Leave.
    Quit,
}

/// Help text for the prompt.
pub const HELP: &str = "\
Commands:
  <cell>          place, select or move, depending on the turn
  place <cell>    place a token
  select <cell>   pick up one of your tokens
  move <cell>     move the picked-up token
  undo            take back the last turn
  reset           start a new match
  mute            toggle sound
  help            show this text
  quit            leave
Cells are 0-8 (row by row) or names like top-left, center.";

/// Parses one line, or explains what was wrong with it.
pub fn parse(line: &str) -> Result<Input, String> {
    let line = line.trim().to_ascii_lowercase();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line.as_str(), ""),
    };

    let cell = |arg: &str| {
        Position::from_label_or_number(arg).ok_or_else(|| format!("Unknown cell: {arg:?}"))
    };

    match word {
        "" => Err("Type a cell or a command (help lists them)".to_string()),
        "undo" | "u" => Ok(Input::Undo),
        "reset" | "r" => Ok(Input::Reset),
        "mute" | "m" => Ok(Input::Mute),
        "help" | "h" | "?" => Ok(Input::Help),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        "place" | "p" => cell(rest).map(Input::Place),
        "select" | "s" => cell(rest).map(Input::Select),
        "move" => cell(rest).map(Input::Move),
        _ => cell(&line).map(Input::Cell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_number_is_a_cell() {
        assert_eq!(parse("4"), Ok(Input::Cell(Position::Center)));
        assert_eq!(parse(" top-left "), Ok(Input::Cell(Position::TopLeft)));
    }

    #[test]
    fn test_verbs() {
        assert_eq!(parse("move 1"), Ok(Input::Move(Position::TopCenter)));
        assert_eq!(parse("SELECT 8"), Ok(Input::Select(Position::BottomRight)));
        assert_eq!(parse("undo"), Ok(Input::Undo));
        assert_eq!(parse("q"), Ok(Input::Quit));
    }

    #[test]
    fn test_bad_cell() {
        assert!(parse("place 9").is_err());
        assert!(parse("").is_err());
    }
}
