//! Tests for the session controller: turn ownership, tickets and undo.

use strictly_duel::rules::winner;
use strictly_duel::{
    Difficulty, DuelConfig, DuelEvent, DuelSession, FirstPlayer, InvalidAction, Mode, Phase,
    Position, Side,
};
use tokio::sync::mpsc;
use Position::*;

fn config() -> DuelConfig {
    DuelConfig::default().with_seed(2024).without_delay()
}

fn vs_computer(difficulty: Difficulty, first: FirstPlayer) -> DuelSession {
    let mut session = DuelSession::new(config());
    session.start_match(Mode::VsComputer(difficulty), first);
    session
}

/// Resolves every pending computer turn.
fn settle(session: &mut DuelSession) {
    while let Some(ticket) = session.pending_computer_turn() {
        assert!(session.resolve_computer_turn(ticket).is_some());
    }
}

#[test]
fn test_human_move_schedules_computer() {
    let mut session = vs_computer(Difficulty::Easy, FirstPlayer::Human);
    assert!(session.pending_computer_turn().is_none());

    session.place_at(Center).unwrap();
    let ticket = session.pending_computer_turn().unwrap();
    assert!(*session.snapshot().computer_thinking());
    assert_eq!(*ticket.generation(), session.generation());

    session.resolve_computer_turn(ticket).unwrap();
    assert_eq!(session.state().active(), Side::X);
    assert_eq!(session.state().placed(Side::O), 1);
}

#[test]
fn test_input_rejected_while_computer_thinks() {
    let mut session = vs_computer(Difficulty::Medium, FirstPlayer::Human);
    session.place_at(TopLeft).unwrap();
    let before = session.state().clone();
    assert_eq!(
        session.place_at(BottomRight),
        Err(InvalidAction::ComputerThinking)
    );
    assert_eq!(session.state(), &before);
}

#[test]
fn test_ticket_discarded_after_reset() {
    let mut session = vs_computer(Difficulty::Hard, FirstPlayer::Opponent);
    let stale = session.pending_computer_turn().unwrap();

    session.reset();
    assert!(session.resolve_computer_turn(stale).is_none());
    assert!(session.state().board().empty_positions().len() == 9);

    let fresh = session.pending_computer_turn().unwrap();
    assert_ne!(fresh, stale);
    assert!(session.resolve_computer_turn(fresh).is_some());
}

#[test]
fn test_ticket_discarded_after_undo() {
    let mut session = vs_computer(Difficulty::Easy, FirstPlayer::Human);
    session.place_at(Center).unwrap();
    let stale = session.pending_computer_turn().unwrap();

    assert!(session.undo());
    assert!(session.pending_computer_turn().is_none());
    assert!(session.resolve_computer_turn(stale).is_none());
    assert!(session.state().board().is_empty(Center));
    assert_eq!(session.state().active(), Side::X);
}

#[test]
fn test_ticket_resolves_once() {
    let mut session = vs_computer(Difficulty::Easy, FirstPlayer::Opponent);
    let ticket = session.pending_computer_turn().unwrap();
    assert!(session.resolve_computer_turn(ticket).is_some());
    assert!(session.resolve_computer_turn(ticket).is_none());
    assert_eq!(session.state().placed(Side::O), 1);
}

#[test]
fn test_undo_against_computer_rewinds_the_human_turn() {
    let mut session = vs_computer(Difficulty::Medium, FirstPlayer::Human);
    session.place_at(TopLeft).unwrap();
    settle(&mut session);
    session.place_at(BottomRight).unwrap();
    settle(&mut session);
    assert_eq!(session.state().placed(Side::X), 2);

    assert!(session.undo());
    assert_eq!(session.state().placed(Side::X), 1);
    assert_eq!(session.state().placed(Side::O), 1);
    assert_eq!(session.state().active(), Side::X);
    assert!(session.pending_computer_turn().is_none());
}

#[test]
fn test_undo_to_computer_opening_reissues_ticket() {
    let mut session = vs_computer(Difficulty::Easy, FirstPlayer::Opponent);
    settle(&mut session);
    session.place_at(Center).unwrap_or_else(|_| session.place_at(TopLeft).unwrap());
    settle(&mut session);

    while session.undo() {}
    assert_eq!(session.state().board().empty_positions().len(), 9);
    assert!(session.pending_computer_turn().is_some());
}

#[test]
fn test_human_vs_human_alternates() {
    let mut session = DuelSession::new(config());
    session.place_at(Center).unwrap();
    assert!(session.pending_computer_turn().is_none());
    assert_eq!(session.state().active(), Side::O);
    session.place_at(TopLeft).unwrap();
    assert_eq!(session.state().active(), Side::X);
}

#[test]
fn test_act_on_walks_through_phases() {
    let mut session = DuelSession::new(config());
    for pos in [TopLeft, Center, MiddleRight, MiddleLeft, BottomCenter, BottomRight] {
        session.act_on(pos).unwrap();
    }
    assert_eq!(session.state().phase(), Phase::Movement);

    session.act_on(TopLeft).unwrap();
    assert_eq!(session.state().selected(), Some(TopLeft));
    session.act_on(TopCenter).unwrap();
    assert!(session.state().board().is_empty(TopLeft));
    assert_eq!(session.state().move_count(), 1);
    assert_eq!(session.state().active(), Side::O);
}

#[test]
fn test_settings_wait_for_next_match() {
    let mut session = DuelSession::new(config());
    session.set_mode(Mode::VsComputer(Difficulty::Easy));
    session.set_first_player(FirstPlayer::Opponent);
    assert_eq!(session.mode(), Mode::VsComputer(Difficulty::Easy));
    assert_eq!(session.first_player(), FirstPlayer::Opponent);
    assert_eq!(session.match_mode(), Mode::HumanVsHuman);
    assert_eq!(session.state().active(), Side::X);
    assert!(session.pending_computer_turn().is_none());

    session.reset();
    assert_eq!(session.match_mode(), Mode::VsComputer(Difficulty::Easy));
    assert_eq!(session.state().active(), Side::O);
    assert!(session.pending_computer_turn().is_some());
}

#[test]
fn test_mute_is_not_match_state() {
    let mut session = DuelSession::new(config());
    let before = session.state().clone();
    session.set_muted(true);
    assert!(session.is_muted());
    assert_eq!(session.state(), &before);
}

#[test]
fn test_events_describe_the_turn() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = DuelSession::new(config()).with_events(tx);
    session.start_match(Mode::HumanVsHuman, FirstPlayer::Human);
    session.place_at(Center).unwrap();
    let _ = session.place_at(Center);

    assert!(matches!(rx.try_recv(), Ok(DuelEvent::MatchStarted { first: Side::X, .. })));
    assert_eq!(
        rx.try_recv().unwrap(),
        DuelEvent::Placed {
            side: Side::X,
            at: Center
        }
    );
    assert_eq!(
        rx.try_recv().unwrap(),
        DuelEvent::Rejected(InvalidAction::CellOccupied(Center))
    );
}

#[tokio::test]
async fn test_full_match_against_hard_terminates_cleanly() {
    let mut session = vs_computer(Difficulty::Hard, FirstPlayer::Human);
    for _ in 0..200 {
        if let Some(ticket) = session.pending_computer_turn() {
            ticket.wait().await;
            session.resolve_computer_turn(ticket);
            continue;
        }
        if session.state().is_over() {
            break;
        }
        let state = session.state().clone();
        match state.phase() {
            Phase::Placement => {
                let pos = state.board().empty_positions()[0];
                session.place_at(pos).unwrap();
            }
            Phase::Movement => {
                let mv = state.legal_moves_for(state.active())[0];
                session.select_cell(mv.from).unwrap();
                session.move_selected_to(mv.to).unwrap();
            }
        }
    }
    if let Some(outcome) = session.state().outcome() {
        assert_eq!(winner(session.state().board()), Some(outcome.token));
    }
}
