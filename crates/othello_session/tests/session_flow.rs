//! End-to-end games driven through the public session API.

use std::thread;
use std::time::Duration;

use othello_session::{
    Board, Difficulty, GameMode, GameSession, Outcome, Phase, Position, SessionConfig, SessionError, Side,
};

fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col).unwrap()
}

fn vs_ai(difficulty: Difficulty, seed: u64) -> GameSession {
    GameSession::new(
        SessionConfig::default()
            .with_mode(GameMode::HumanVsAi { ai_side: Side::White })
            .with_difficulty(difficulty)
            .with_seed(seed),
    )
}

/// Plays to the end: the human always takes the first legal move.
fn play_out(session: &mut GameSession) -> Vec<Option<Position>> {
    let mut moves = Vec::new();
    while !session.is_terminal() {
        let before = session.score().total();
        let result = if session.is_ai_turn() {
            session.play_ai_move().unwrap()
        } else {
            let mv = session.legal_moves()[0];
            session.submit_move(mv).unwrap()
        };
        assert_eq!(session.score().total(), before + 1);
        moves.push(result.placed);
    }
    moves
}

#[test]
fn full_game_against_each_difficulty() {
    for difficulty in Difficulty::ALL {
        let mut session = vs_ai(difficulty, 17);
        let moves = play_out(&mut session);

        assert!(session.board().is_terminal());
        assert_eq!(session.history().len(), moves.len());
        let outcome = session.outcome().unwrap();
        assert_eq!(outcome, session.score().outcome());
        assert_eq!(session.phase(), Phase::Terminal(outcome));
        assert_eq!(session.stats().games_played, 1);
        assert_eq!(session.request_ai_move(), Err(SessionError::GameOver));
    }
}

#[test]
fn seeded_sessions_replay_the_same_game() {
    let first = play_out(&mut vs_ai(Difficulty::Easy, 2024));
    let second = play_out(&mut vs_ai(Difficulty::Easy, 2024));
    assert_eq!(first, second);
}

#[test]
fn undo_walks_back_to_the_opening() {
    let mut session = GameSession::new(SessionConfig::default().with_mode(GameMode::HumanVsHuman));
    let mut snapshots = vec![(*session.board(), session.side_to_move())];
    // no game can end within eight moves
    for _ in 0..8 {
        let mv = *session.legal_moves().last().unwrap();
        session.submit_move(mv).unwrap();
        snapshots.push((*session.board(), session.side_to_move()));
    }

    snapshots.pop();
    while let Some((board, side)) = snapshots.pop() {
        session.undo().unwrap();
        assert_eq!(session.board(), &board);
        assert_eq!(session.side_to_move(), side);
    }
    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.undo(), Err(SessionError::EmptyHistory));
}

#[test]
fn thinking_blocks_other_requests() {
    let mut session = GameSession::new(
        SessionConfig::default()
            .with_difficulty(Difficulty::Hard)
            .with_seed(5),
    );
    session.request_ai_move().unwrap();
    assert!(session.is_thinking());
    assert_eq!(session.phase(), Phase::Thinking(Side::Black));

    assert_eq!(session.request_ai_move(), Err(SessionError::SearchInFlight));
    assert_eq!(session.undo(), Err(SessionError::SearchInFlight));
    let rejected = session.submit_move(pos(2, 3)).unwrap_err();
    assert!(rejected.is_state_error());
    assert!(session.hint_moves().is_empty());

    let result = session.wait_for_ai().unwrap();
    assert_eq!(result.side, Side::Black);
    assert!(!session.is_thinking());
    assert_eq!(session.side_to_move(), Side::White);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn polling_eventually_applies_the_move() {
    let mut session = GameSession::new(SessionConfig::default().with_seed(8));
    assert_eq!(session.poll_ai(), Err(SessionError::NoSearchPending));
    session.request_ai_move().unwrap();

    let result = loop {
        if let Some(result) = session.poll_ai().unwrap() {
            break result;
        }
        thread::sleep(Duration::from_millis(5));
    };
    assert_eq!(result.placed, session.last_move());
    assert_eq!(session.phase(), Phase::AwaitingMove(Side::White));
}

#[test]
fn cancelled_search_is_never_applied() {
    let mut session = GameSession::new(
        SessionConfig::default()
            .with_difficulty(Difficulty::Hard)
            .with_seed(5),
    );
    session.request_ai_move().unwrap();
    assert!(session.cancel_ai());
    assert!(!session.cancel_ai());

    thread::sleep(Duration::from_millis(50));
    assert_eq!(session.board(), &Board::new());
    assert!(session.history().is_empty());
    assert_eq!(session.phase(), Phase::AwaitingMove(Side::Black));
    assert_eq!(session.poll_ai(), Err(SessionError::NoSearchPending));

    // the AI can be asked again afterwards
    session.play_ai_move().unwrap();
    assert_eq!(session.history().len(), 1);
}

#[test]
fn new_game_discards_a_running_search() {
    let mut session = GameSession::new(SessionConfig::default().with_seed(4));
    session.request_ai_move().unwrap();
    session.new_game();
    assert!(!session.is_thinking());
    thread::sleep(Duration::from_millis(50));
    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.side_to_move(), Side::Black);
}

#[test]
fn two_humans_finish_a_game() {
    let mut session = GameSession::new(SessionConfig::default().with_mode(GameMode::HumanVsHuman));
    assert_eq!(session.request_ai_move(), Err(SessionError::NotAiTurn(Side::Black)));
    play_out(&mut session);

    let stats = session.stats();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.human_wins + stats.ai_wins + stats.draws, 0);
    assert!(matches!(session.outcome(), Some(Outcome::Win(_)) | Some(Outcome::Draw)));
}
