//! Line-based terminal play.
//!
//! Each input line is one command: a cell number `1`-`9`, `undo`, `hint`,
//! `reset`, `tier <name>` or `quit`. After a human move against the AI the
//! loop waits for the delayed reply before printing the board again.

use crate::{Arena, ArenaError, ArenaSnapshot};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, instrument};
use xo_engine::{InMemoryLedger, Outcome, Position, Tier};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// Place the active mark.
    Place(Position),
    /// Spend an undo charge.
    Undo,
    /// Spend a hint charge.
    Hint,
    /// Start a new game.
    Reset,
    /// Switch AI tier.
    Tier(Tier),
    /// Leave the loop.
    Quit,
}

impl FromStr for PlayCommand {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        let mut words = input.split_whitespace();
        let command = match (words.next(), words.next()) {
            (Some("undo" | "u"), None) => PlayCommand::Undo,
            (Some("hint" | "h"), None) => PlayCommand::Hint,
            (Some("reset" | "r" | "new"), None) => PlayCommand::Reset,
            (Some("quit" | "q" | "exit"), None) => PlayCommand::Quit,
            (Some("tier"), Some(name)) => PlayCommand::Tier(
                Tier::from_str(name).map_err(|_| ArenaError::new(format!("Unknown tier: {}", name)))?,
            ),
            (Some(cell), None) => PlayCommand::Place(
                Position::from_cell_number(cell)
                    .ok_or_else(|| ArenaError::new(format!("Not a square: {}", cell)))?,
            ),
            _ => return Err(ArenaError::new(format!("Unrecognized command: {}", s.trim()))),
        };
        Ok(command)
    }
}

/// Writes the board and status lines for `snapshot`.
pub fn render(snapshot: &ArenaSnapshot, ledger: &InMemoryLedger, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", snapshot.board.display())?;
    match snapshot.outcome {
        Outcome::InProgress if snapshot.ai_thinking => writeln!(out, "AI ({}) is thinking...", snapshot.tier.label())?,
        Outcome::InProgress => writeln!(out, "{} to move", snapshot.active)?,
        outcome => writeln!(out, "{}", outcome)?,
    }
    if let Some(hint) = snapshot.hint {
        writeln!(out, "Hint: square {} ({})", hint.to_index() + 1, hint)?;
    }
    writeln!(
        out,
        "Hints: {}  Undos: {}  |  W {} L {} D {}  streak {} (best {})",
        charges(ledger.hints()),
        charges(ledger.undos()),
        snapshot.stats.wins,
        snapshot.stats.losses,
        snapshot.stats.draws,
        snapshot.stats.win_streak,
        snapshot.stats.best_win_streak,
    )
}

fn charges(remaining: Option<u32>) -> String {
    remaining.map_or_else(|| "unlimited".to_string(), |n| n.to_string())
}

/// Reads commands from `input` until `quit` or end of input.
#[instrument(skip_all)]
pub async fn run_session<R, W>(arena: &Arena<InMemoryLedger>, input: R, out: &mut W) -> Result<(), ArenaError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    print_state(arena, out).await?;
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<PlayCommand>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{}", err.message)?;
                continue;
            }
        };
        debug!(?command, "Command received");
        match command {
            PlayCommand::Place(position) => match arena.apply_move(position).await {
                Ok(_) => {
                    if arena.snapshot().await.ai_thinking {
                        print_state(arena, out).await?;
                        arena.settle().await;
                    }
                }
                Err(rejection) => writeln!(out, "Rejected: {}", rejection)?,
            },
            PlayCommand::Undo => match arena.undo().await {
                Ok(reverted) => writeln!(out, "Reverted {} move(s)", reverted)?,
                Err(rejection) => writeln!(out, "Rejected: {}", rejection)?,
            },
            PlayCommand::Hint => {
                if let Err(rejection) = arena.hint().await {
                    writeln!(out, "Rejected: {}", rejection)?;
                }
            }
            PlayCommand::Reset => {
                arena.reset().await;
                arena.settle().await;
            }
            PlayCommand::Tier(tier) => {
                arena.set_tier(tier).await;
                writeln!(out, "Tier set to {}", tier.label())?;
            }
            PlayCommand::Quit => break,
        }
        print_state(arena, out).await?;
    }
    Ok(())
}

async fn print_state(arena: &Arena<InMemoryLedger>, out: &mut impl Write) -> Result<(), ArenaError> {
    let snapshot = arena.snapshot().await;
    let ledger = arena.with_ledger(|ledger| *ledger).await;
    render(&snapshot, &ledger, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_cells_and_words() {
        assert_eq!("1".parse::<PlayCommand>().unwrap(), PlayCommand::Place(Position::TopLeft));
        assert_eq!(" 9 ".parse::<PlayCommand>().unwrap(), PlayCommand::Place(Position::BottomRight));
        assert_eq!("UNDO".parse::<PlayCommand>().unwrap(), PlayCommand::Undo);
        assert_eq!("h".parse::<PlayCommand>().unwrap(), PlayCommand::Hint);
        assert_eq!("reset".parse::<PlayCommand>().unwrap(), PlayCommand::Reset);
        assert_eq!("q".parse::<PlayCommand>().unwrap(), PlayCommand::Quit);
        assert_eq!("tier chaos".parse::<PlayCommand>().unwrap(), PlayCommand::Tier(Tier::Chaos));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("0".parse::<PlayCommand>().is_err());
        assert!("10".parse::<PlayCommand>().is_err());
        assert!("tier impossible".parse::<PlayCommand>().is_err());
        assert!("undo twice".parse::<PlayCommand>().is_err());
    }
}
