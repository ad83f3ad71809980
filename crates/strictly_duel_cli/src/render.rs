//! Plain-text rendering of snapshots and events.

use strictly_duel::{DuelEvent, Position, Snapshot, Square};

/// Draws the board with cell numbers on empty cells.
///
/// The selected token is wrapped in brackets and legal destinations are
/// marked with `*`.
pub fn board(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .filter_map(|col| Position::from_index(row * 3 + col))
            .map(|pos| cell(snapshot, pos))
            .collect();
        out.push_str(&cells.join("|"));
        if row < 2 {
            out.push_str("\n-----+-----+-----\n");
        }
    }
    out
}

fn cell(snapshot: &Snapshot, pos: Position) -> String {
    match snapshot.board().get(pos) {
        Square::Occupied(token) if *snapshot.selected() == Some(pos) => {
            format!("[{}]", token.glyph())
        }
        Square::Occupied(token) => format!(" {} ", token.glyph()),
        Square::Empty if snapshot.legal_destinations().contains(&pos) => {
            format!(" *{} ", pos.to_index())
        }
        Square::Empty => format!("  {}  ", pos.to_index()),
    }
}

/// Status line with mode and undo availability.
pub fn status(snapshot: &Snapshot) -> String {
    let mut line = format!("[{}] {}", snapshot.mode().label(), snapshot.status());
    if *snapshot.center_lock() {
        line.push_str(" (center lock)");
    }
    line
}

/// Human-readable line for an event, if it is worth showing.
pub fn event(event: &DuelEvent) -> Option<String> {
    let text = match event {
        DuelEvent::MatchStarted { tokens, first, mode } => format!(
            "New match ({}): X plays {}, O plays {}, {} opens",
            mode.label(),
            tokens.token(strictly_duel::Side::X).glyph(),
            tokens.token(strictly_duel::Side::O).glyph(),
            first
        ),
        DuelEvent::Placed { side, at } => format!("{side} placed on {at}"),
        DuelEvent::Moved { side, mv } => format!("{side} moved {mv}"),
        DuelEvent::MovementBegan => "All tokens placed. Movement begins.".to_string(),
        DuelEvent::CenterLockEngaged { owner } => {
            format!("Center lock! {owner} may only move the center token")
        }
        DuelEvent::CenterLockReleased => "Center lock released".to_string(),
        DuelEvent::TurnPassed { side } => format!("{side} has no legal move and passes"),
        DuelEvent::GameOver(outcome) => format!("*** {outcome} ***"),
        DuelEvent::Rejected(reason) => format!("Invalid move: {reason}"),
        DuelEvent::Undone { remaining } => format!("Undone ({remaining} left)"),
        DuelEvent::Selected { .. } | DuelEvent::ComputerThinking { .. } => return None,
    };
    Some(text)
}
