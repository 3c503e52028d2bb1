//! The game session controller.
//!
//! [`GameSession`] owns the live board, the side to move and the undo history.
//! Every change goes through one of two paths: applying a legal move or
//! applying a forced pass. AI moves are searched on a copy of the board in the
//! background; while that search runs the session is `Thinking` and refuses
//! human moves, undo and further AI requests.
//!
//! ```text
//!   AwaitingMove(side) --request_ai_move--> Thinking(side)
//!   Thinking(side)     --poll_ai/wait_for_ai--> AwaitingMove(next) | Terminal
//!   AwaitingMove(side) --submit_move--> AwaitingMove(next) | Terminal
//!   any                --undo--> AwaitingMove(restored side)   (not while Thinking)
//! ```

use std::sync::mpsc::TryRecvError;

use log::{info, trace, warn};
use othello_core::{Board, Move, Outcome, Position, Score, Side};
use othello_engine::Difficulty;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::worker::PendingSearch;
use crate::{GameMode, GameStats, History, HistoryEntry, SessionConfig, SessionError};

/// Where the session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingMove(Side),
    Thinking(Side),
    Terminal(Outcome),
}

/// What happened as a result of one applied move or pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Side that moved (or passed).
    pub side: Side,
    /// Cell played, `None` for a pass.
    pub placed: Option<Move>,
    pub flipped: Vec<Position>,
    /// Side whose turn was skipped automatically afterwards.
    pub passed: Option<Side>,
    /// Set when this move ended the game.
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GameState {
    board: Board,
    to_move: Side,
    terminal: bool,
}

impl GameState {
    fn initial() -> Self {
        Self {
            board: Board::new(),
            to_move: Side::Black,
            terminal: false,
        }
    }
}

pub struct GameSession {
    config: SessionConfig,
    state: GameState,
    history: History,
    pending: Option<PendingSearch>,
    rng: StdRng,
    stats: GameStats,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            "new session: {:?}, difficulty {}",
            config.mode, config.difficulty
        );
        Self {
            config,
            state: GameState::initial(),
            history: History::new(),
            pending: None,
            rng,
            stats: GameStats::default(),
        }
    }

    /// Resets the board and history. A running search is cancelled and its
    /// result will never be applied.
    pub fn new_game(&mut self) {
        self.cancel_ai();
        self.state = GameState::initial();
        self.history.clear();
        info!("new game ({:?})", self.config.mode);
    }

    /// Switching modes always starts a fresh game.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.config.mode = mode;
        self.new_game();
    }

    /// Takes effect from the next AI request.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!("difficulty set to {difficulty}");
        self.config.difficulty = difficulty;
    }

    /// Returns the new hint setting.
    pub fn toggle_hints(&mut self) -> bool {
        self.config.hints = !self.config.hints;
        self.config.hints
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn hints_enabled(&self) -> bool {
        self.config.hints
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn side_to_move(&self) -> Side {
        self.state.to_move
    }

    pub fn score(&self) -> Score {
        self.state.board.score()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.terminal
    }

    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    /// Final result once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.terminal.then(|| self.score().outcome())
    }

    pub fn phase(&self) -> Phase {
        if let Some(outcome) = self.outcome() {
            Phase::Terminal(outcome)
        } else if let Some(pending) = &self.pending {
            Phase::Thinking(pending.side())
        } else {
            Phase::AwaitingMove(self.state.to_move)
        }
    }

    pub fn is_human_turn(&self) -> bool {
        !self.state.terminal && self.config.mode.is_human(self.state.to_move)
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.state.terminal && self.config.mode.is_ai(self.state.to_move)
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.state.terminal {
            return Vec::new();
        }
        self.state.board.legal_moves(self.state.to_move)
    }

    /// Moves to highlight: only with hints on, and only for a human player.
    pub fn hint_moves(&self) -> Vec<Move> {
        if self.config.hints && self.is_human_turn() && !self.is_thinking() {
            self.legal_moves()
        } else {
            Vec::new()
        }
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|entry| entry.mv)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    /// Plays a human move for the side to move.
    pub fn submit_move(&mut self, mv: Move) -> Result<MoveOutcome, SessionError> {
        self.ensure_accepting()?;
        let side = self.state.to_move;
        if !self.config.mode.is_human(side) {
            warn!("rejected human move {mv}: {side} is played by the AI");
            return Err(SessionError::NotHumanTurn(side));
        }
        self.apply_legal_move(mv)
    }

    /// [`GameSession::submit_move`] with raw coordinates from the UI.
    pub fn submit_move_at(&mut self, row: i32, col: i32) -> Result<MoveOutcome, SessionError> {
        let mv = Position::try_new(row, col)?;
        self.submit_move(mv)
    }

    /// Starts the AI search for the side to move without blocking.
    pub fn request_ai_move(&mut self) -> Result<(), SessionError> {
        self.ensure_accepting()?;
        let side = self.state.to_move;
        if !self.config.mode.is_ai(side) {
            return Err(SessionError::NotAiTurn(side));
        }

        let seed = self.rng.gen::<u64>();
        self.pending = Some(PendingSearch::spawn(
            self.state.board,
            side,
            self.config.difficulty,
            self.config.search_depth,
            seed,
        ));
        trace!("AI search started for {side}");
        Ok(())
    }

    /// Applies the AI's move if its search has finished; `Ok(None)` while it is
    /// still running.
    pub fn poll_ai(&mut self) -> Result<Option<MoveOutcome>, SessionError> {
        let pending = self.pending.as_ref().ok_or(SessionError::NoSearchPending)?;
        match pending.try_result() {
            Ok(choice) => {
                self.pending = None;
                self.finish_ai_move(choice).map(Some)
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                Err(SessionError::SearchAborted)
            }
        }
    }

    /// Blocks until the running search answers, then applies its move.
    pub fn wait_for_ai(&mut self) -> Result<MoveOutcome, SessionError> {
        let pending = self.pending.take().ok_or(SessionError::NoSearchPending)?;
        let choice = pending.wait().map_err(|_| SessionError::SearchAborted)?;
        self.finish_ai_move(choice)
    }

    /// Synchronous AI turn: request and wait.
    pub fn play_ai_move(&mut self) -> Result<MoveOutcome, SessionError> {
        self.request_ai_move()?;
        self.wait_for_ai()
    }

    /// Abandons a running search. Returns whether there was one.
    pub fn cancel_ai(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                warn!("cancelling AI search for {}", pending.side());
                pending.cancel();
                true
            }
            None => false,
        }
    }

    /// Restores the state from before the most recent move, including whose
    /// turn it was. Leaves a finished game.
    pub fn undo(&mut self) -> Result<(), SessionError> {
        if self.is_thinking() {
            return Err(SessionError::SearchInFlight);
        }
        let entry = self.history.pop().ok_or(SessionError::EmptyHistory)?;
        self.state = GameState {
            board: entry.board,
            to_move: entry.to_move,
            terminal: false,
        };
        trace!("undid {} by {}", entry.mv, entry.to_move);
        Ok(())
    }

    fn ensure_accepting(&self) -> Result<(), SessionError> {
        if self.state.terminal {
            return Err(SessionError::GameOver);
        }
        if self.is_thinking() {
            return Err(SessionError::SearchInFlight);
        }
        Ok(())
    }

    fn finish_ai_move(&mut self, choice: Option<Move>) -> Result<MoveOutcome, SessionError> {
        match choice {
            Some(mv) => self.apply_legal_move(mv),
            None if !self.state.board.has_any_move(self.state.to_move) => Ok(self.apply_pass()),
            None => Err(SessionError::SearchAborted),
        }
    }

    fn apply_legal_move(&mut self, mv: Move) -> Result<MoveOutcome, SessionError> {
        let side = self.state.to_move;
        // Validate before touching anything.
        let next = self.state.board.apply_move(side, mv)?;
        let flipped = self.state.board.flips(side, mv);

        self.history.push(HistoryEntry {
            board: self.state.board,
            to_move: side,
            mv,
        });
        self.state.board = next;
        trace!("{side} played {mv}");

        let (passed, outcome) = self.advance_turn(side);
        Ok(MoveOutcome {
            side,
            placed: Some(mv),
            flipped,
            passed,
            outcome,
        })
    }

    fn apply_pass(&mut self) -> MoveOutcome {
        let side = self.state.to_move;
        info!("{side} has no legal move and passes");
        let opponent = side.opposite();
        let outcome = if self.state.board.has_any_move(opponent) {
            self.state.to_move = opponent;
            None
        } else {
            Some(self.finish_game(opponent))
        };
        MoveOutcome {
            side,
            placed: None,
            flipped: Vec::new(),
            passed: None,
            outcome,
        }
    }

    /// Hands the turn to the opponent of `mover`, skipping them when they are
    /// blocked, and ends the game when both are.
    fn advance_turn(&mut self, mover: Side) -> (Option<Side>, Option<Outcome>) {
        let opponent = mover.opposite();
        let board = &self.state.board;

        if board.has_any_move(opponent) {
            self.state.to_move = opponent;
            (None, None)
        } else if board.has_any_move(mover) {
            info!("{opponent} has no legal move, {mover} plays again");
            self.state.to_move = mover;
            (Some(opponent), None)
        } else {
            (None, Some(self.finish_game(opponent)))
        }
    }

    fn finish_game(&mut self, next: Side) -> Outcome {
        self.state.to_move = next;
        self.state.terminal = true;
        let score = self.score();
        let outcome = score.outcome();
        self.stats.record(self.config.mode, outcome);
        info!(
            "game over: {outcome} (Black {} - White {})",
            score.black, score.white
        );
        outcome
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn pvp() -> GameSession {
        GameSession::new(SessionConfig::default().with_mode(GameMode::HumanVsHuman).with_seed(1))
    }

    /// Puts the session into an arbitrary position.
    fn with_position(session: &mut GameSession, board: Board, to_move: Side) {
        session.state = GameState {
            board,
            to_move,
            terminal: false,
        };
    }

    #[test]
    fn starts_with_black_to_move() {
        let session = pvp();
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.side_to_move(), Side::Black);
        assert_eq!(session.phase(), Phase::AwaitingMove(Side::Black));
        assert!(session.history().is_empty());
        assert_eq!(session.last_move(), None);
    }

    #[test]
    fn move_alternates_turns_and_reports_flips() {
        let mut session = pvp();
        let result = session.submit_move(pos(2, 3)).unwrap();
        assert_eq!(
            result,
            MoveOutcome {
                side: Side::Black,
                placed: Some(pos(2, 3)),
                flipped: vec![pos(3, 3)],
                passed: None,
                outcome: None,
            }
        );
        assert_eq!(session.side_to_move(), Side::White);
        assert_eq!(session.last_move(), Some(pos(2, 3)));
        assert_eq!(session.score(), Score { black: 4, white: 1 });
    }

    #[test]
    fn illegal_move_leaves_state_untouched() {
        let mut session = pvp();
        let before = session.state;
        assert!(matches!(
            session.submit_move(pos(0, 0)),
            Err(SessionError::InvalidMove(_))
        ));
        assert!(matches!(
            session.submit_move_at(-1, 8),
            Err(SessionError::InvalidMove(_))
        ));
        assert_eq!(session.state, before);
        assert!(session.history().is_empty());
    }

    #[test]
    fn undo_restores_the_exact_snapshot() {
        let mut session = pvp();
        session.submit_move(pos(2, 3)).unwrap();
        let mid = session.state;
        session.submit_move(pos(2, 2)).unwrap();

        session.undo().unwrap();
        assert_eq!(session.state, mid);
        session.undo().unwrap();
        assert_eq!(session.state, GameState::initial());
        assert_eq!(session.undo(), Err(SessionError::EmptyHistory));
        assert_eq!(session.state, GameState::initial());
    }

    #[test]
    fn blocked_opponent_is_skipped_until_the_game_ends() {
        let board: Board = "
            WWWWWWWW
            WWWWWWWW
            WWWWWWWW
            WWWWWWWW
            WWWWWWWW
            WWWWWWWW
            WWWWWWBB
            WWWWW..."
            .parse()
            .unwrap();
        let mut session = pvp();
        with_position(&mut session, board, Side::White);

        // g8 leaves Black with h7 only and nothing to capture.
        let result = session.submit_move(pos(7, 6)).unwrap();
        assert_eq!(result.passed, Some(Side::Black));
        assert_eq!(result.outcome, None);
        assert_eq!(session.side_to_move(), Side::White);
        assert!(!session.is_terminal());

        // h8 takes the last black disc.
        let result = session.submit_move(pos(7, 7)).unwrap();
        assert_eq!(result.outcome, Some(Outcome::Win(Side::White)));
        assert_eq!(session.score().black, 0);
        assert!(session.is_terminal());
        assert!(session.board().empty_count() > 0);
    }

    #[test]
    fn blocked_side_passes_instead_of_ending_the_game() {
        // Black plays c8; White then has no reply but Black still can move.
        let board: Board = "
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            BW.W...."
            .parse()
            .unwrap();
        let mut session = pvp();
        with_position(&mut session, board, Side::Black);
        assert!(board.is_legal(Side::Black, pos(7, 2)));

        let result = session.submit_move(pos(7, 2)).unwrap();
        // a8..c8 black, d8 white: White cannot capture, Black can take e8.
        assert_eq!(result.passed, Some(Side::White));
        assert_eq!(result.outcome, None);
        assert_eq!(session.side_to_move(), Side::Black);
        assert_eq!(session.phase(), Phase::AwaitingMove(Side::Black));
    }

    #[test]
    fn game_ends_when_nobody_can_move() {
        let board: Board = "
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            BW......"
            .parse()
            .unwrap();
        let mut session = pvp();
        with_position(&mut session, board, Side::Black);

        let result = session.submit_move(pos(7, 2)).unwrap();
        assert_eq!(result.outcome, Some(Outcome::Win(Side::Black)));
        assert!(session.is_terminal());
        assert_eq!(session.phase(), Phase::Terminal(Outcome::Win(Side::Black)));
        assert!(session.legal_moves().is_empty());
        assert_eq!(session.submit_move(pos(0, 0)), Err(SessionError::GameOver));
        assert_eq!(session.stats().games_played, 1);

        // undo leaves the finished game
        session.undo().unwrap();
        assert!(!session.is_terminal());
        assert_eq!(session.board(), &board);
    }

    #[test]
    fn human_cannot_move_for_the_ai() {
        let mut session = GameSession::new(SessionConfig::default().with_seed(3));
        assert!(session.is_ai_turn());
        assert_eq!(
            session.submit_move(pos(2, 3)),
            Err(SessionError::NotHumanTurn(Side::Black))
        );
        session.play_ai_move().unwrap();
        assert_eq!(session.request_ai_move(), Err(SessionError::NotAiTurn(Side::White)));
    }

    #[test]
    fn pass_without_moves_hands_over_or_ends() {
        let mut session = GameSession::new(SessionConfig::default().with_seed(3));
        let mut board = Board::empty();
        board.set(pos(0, 0), Some(Side::White));
        with_position(&mut session, board, Side::Black);

        let result = session.finish_ai_move(None).unwrap();
        assert_eq!(result.placed, None);
        assert_eq!(result.outcome, Some(Outcome::Win(Side::White)));
        assert!(session.is_terminal());
        assert_eq!(session.stats().human_wins, 1);
    }

    #[test]
    fn hints_only_for_humans() {
        let mut session = GameSession::new(SessionConfig::default().with_seed(9));
        assert!(session.hint_moves().is_empty());
        assert!(session.toggle_hints());
        // Black is the AI here
        assert!(session.hint_moves().is_empty());
        session.play_ai_move().unwrap();
        assert_eq!(session.hint_moves(), session.legal_moves());
        assert!(!session.hint_moves().is_empty());
        assert!(!session.toggle_hints());
        assert!(session.hint_moves().is_empty());
    }

    #[test]
    fn set_mode_resets_the_game() {
        let mut session = pvp();
        session.submit_move(pos(2, 3)).unwrap();
        session.set_mode(GameMode::HumanVsAi { ai_side: Side::White });
        assert_eq!(session.board(), &Board::new());
        assert!(session.history().is_empty());
        assert!(session.is_human_turn());

        session.set_difficulty(Difficulty::Easy);
        assert_eq!(session.difficulty(), Difficulty::Easy);
    }
}
