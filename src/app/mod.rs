// Thin text front end over TeamEngine. Rendering only; all rules live in core.

use crate::config::cli::Command;
use crate::core::engine::{GenerateOutcome, TeamEngine};
use crate::domain::model::PartitionResult;
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use std::io::Write;

/// Execute one command against the engine, writing human-readable output.
pub async fn execute<S: KeyValueStore, W: Write>(
    engine: &mut TeamEngine<S>,
    command: Command,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Add { names } => {
            let raw = names.join(engine.name_separator());
            let added = engine.add_players(&raw)?;
            if added.is_empty() {
                writeln!(out, "No new players added.")?;
            } else {
                writeln!(out, "Added: {}", added.join(", "))?;
            }
            render_players(engine.players(), out)?;
        }
        Command::Remove { position } => {
            // 顯示的編號從 1 開始；0 或超出範圍時不做任何事
            let removed = match position.checked_sub(1) {
                Some(index) => engine.remove_player(index)?,
                None => None,
            };
            match removed {
                Some(name) => writeln!(out, "Removed: {}", name)?,
                None => writeln!(out, "No player at position {}.", position)?,
            }
            render_players(engine.players(), out)?;
        }
        Command::List => render_players(engine.players(), out)?,
        Command::Clear => {
            engine.clear_players()?;
            render_players(engine.players(), out)?;
        }
        Command::Size { size: Some(size) } => {
            engine.set_team_size(size)?;
            writeln!(out, "Team size: {}", engine.team_size())?;
        }
        Command::Size { size: None } => writeln!(out, "Team size: {}", engine.team_size())?,
        Command::Generate => {
            writeln!(out, "Generating teams...")?;
            out.flush()?;
            match engine.generate().await? {
                GenerateOutcome::Completed(result) => render_result(&result, out)?,
                GenerateOutcome::Ignored => writeln!(out, "A generation is already running.")?,
            }
        }
        Command::Show => match engine.last_result() {
            Some(result) => render_result(result, out)?,
            None => writeln!(out, "No team generated yet.")?,
        },
    }

    Ok(())
}

pub fn render_players<W: Write>(players: &[String], out: &mut W) -> Result<()> {
    writeln!(out, "Players ({}):", players.len())?;
    for (i, name) in players.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, name)?;
    }
    Ok(())
}

pub fn render_result<W: Write>(result: &PartitionResult, out: &mut W) -> Result<()> {
    writeln!(out, "Team:")?;
    for name in &result.team {
        writeln!(out, "  - {}", name)?;
    }
    writeln!(out, "Spectators:")?;
    if result.spectators.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for name in &result.spectators {
        writeln!(out, "  - {}", name)?;
    }
    Ok(())
}
