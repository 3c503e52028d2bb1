use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use log::debug;
use othello_session::{
    Difficulty, GameMode, GameSession, MoveOutcome, Phase, Position, SessionConfig, SessionError, Side,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Play against the computer
    Ai,
    /// Two players at one keyboard
    Pvp,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideArg {
    Black,
    White,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Black => Side::Black,
            SideArg::White => Side::White,
        }
    }
}

/// Othello in the terminal.
#[derive(Debug, Parser)]
#[command(name = "othello", version)]
struct Args {
    #[arg(long, value_enum, default_value_t = ModeArg::Ai)]
    mode: ModeArg,
    /// Side played by the computer
    #[arg(long, value_enum, default_value_t = SideArg::Black)]
    ai_side: SideArg,
    /// easy, medium or hard
    #[arg(long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,
    /// Search depth for hard
    #[arg(long, default_value_t = 4)]
    depth: u8,
    /// Seed for reproducible AI play
    #[arg(long)]
    seed: Option<u64>,
    /// Mark legal moves on the board
    #[arg(long)]
    hints: bool,
}

impl Args {
    fn mode(&self) -> GameMode {
        match self.mode {
            ModeArg::Ai => GameMode::HumanVsAi {
                ai_side: self.ai_side.into(),
            },
            ModeArg::Pvp => GameMode::HumanVsHuman,
        }
    }

    fn config(&self) -> SessionConfig {
        let config = SessionConfig::default()
            .with_mode(self.mode())
            .with_difficulty(self.difficulty)
            .with_hints(self.hints)
            .with_search_depth(self.depth);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

const HELP: &str = "commands: <cell> (e.g. d3) | u(ndo) | h(ints) | n(ew) | mode ai|pvp | level easy|medium|hard | q(uit)";

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    debug!("{args:?}");
    let mut session = GameSession::new(args.config());
    let ai_side: Side = args.ai_side.into();

    println!("{HELP}");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        render(&session)?;

        if session.is_ai_turn() {
            println!("AI is thinking...");
            match session.play_ai_move() {
                Ok(result) => report(&result),
                Err(err) => eprintln!("AI failed: {err}"),
            }
            continue;
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let mut words = line.split_whitespace();

        match (words.next(), words.next()) {
            (None, _) => {}
            (Some("q" | "quit"), _) => break,
            (Some("n" | "new"), _) => session.new_game(),
            (Some("h" | "hints"), _) => {
                let on = session.toggle_hints();
                println!("hints {}", if on { "on" } else { "off" });
            }
            (Some("u" | "undo"), _) => undo_to_human_turn(&mut session),
            (Some("mode"), Some("ai")) => session.set_mode(GameMode::HumanVsAi { ai_side }),
            (Some("mode"), Some("pvp")) => session.set_mode(GameMode::HumanVsHuman),
            (Some("level"), Some(level)) => match level.parse::<Difficulty>() {
                Ok(difficulty) => session.set_difficulty(difficulty),
                Err(err) => println!("{err}"),
            },
            (Some(cell), None) => match cell.parse::<Position>() {
                Ok(mv) => match session.submit_move(mv) {
                    Ok(result) => report(&result),
                    Err(err) => println!("{err}"),
                },
                Err(err) => println!("{err}\n{HELP}"),
            },
            _ => println!("{HELP}"),
        }
    }

    Ok(())
}

/// Undo one move, then keep going while the restored turn belongs to the AI,
/// so the human gets their own move back.
fn undo_to_human_turn(session: &mut GameSession) {
    if let Err(err) = session.undo() {
        println!("{err}");
        return;
    }
    while session.is_ai_turn() {
        match session.undo() {
            Ok(()) => {}
            Err(SessionError::EmptyHistory) => break,
            Err(err) => {
                println!("{err}");
                break;
            }
        }
    }
}

fn report(result: &MoveOutcome) {
    match result.placed {
        Some(mv) => println!("{} plays {mv}, flipping {}", result.side, result.flipped.len()),
        None => println!("{} passes", result.side),
    }
    if let Some(skipped) = result.passed {
        println!("{skipped} has no legal move and passes");
    }
}

fn render(session: &GameSession) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let hints = session.hint_moves();
    let last = session.last_move();

    writeln!(out)?;
    writeln!(out, "  a b c d e f g h")?;
    for (r, row) in session.board().rows().iter().enumerate() {
        write!(out, "{}", r + 1)?;
        for (c, cell) in row.iter().enumerate() {
            let here = Position::new(r as u8, c as u8);
            let symbol = match cell {
                Some(side) => side.symbol(),
                None if here.is_some_and(|p| hints.contains(&p)) => '*',
                None => '.',
            };
            write!(out, " {symbol}")?;
        }
        writeln!(out)?;
    }

    let score = session.score();
    writeln!(out, "Black {}  White {}", score.black, score.white)?;
    if let Some(mv) = last {
        writeln!(out, "last move {mv}")?;
    }
    match session.phase() {
        Phase::AwaitingMove(side) => writeln!(out, "{side} to move")?,
        Phase::Thinking(side) => writeln!(out, "{side} (AI) is thinking")?,
        Phase::Terminal(outcome) => {
            let stats = session.stats();
            writeln!(out, "Game over: {outcome}")?;
            writeln!(
                out,
                "games {}  human wins {}  AI wins {}  draws {}  (n = new game, q = quit)",
                stats.games_played, stats.human_wins, stats.ai_wins, stats.draws
            )?;
        }
    }
    Ok(())
}
