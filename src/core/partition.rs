use crate::domain::model::PartitionResult;
use crate::utils::error::{Result, TeamError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Randomly split `roster` into a team of `team_size` players and the
/// remaining spectators.
pub fn partition(roster: &[String], team_size: usize) -> Result<PartitionResult> {
    partition_with_rng(roster, team_size, &mut rand::thread_rng())
}

/// Partition with a specific RNG (useful for testing).
pub fn partition_with_rng<R: Rng + ?Sized>(
    roster: &[String],
    team_size: usize,
    rng: &mut R,
) -> Result<PartitionResult> {
    if team_size == 0 {
        return Err(TeamError::InvalidTeamSize {
            value: team_size.to_string(),
        });
    }

    if roster.len() < team_size {
        return Err(TeamError::InsufficientPlayers {
            required: team_size,
            available: roster.len(),
        });
    }

    // Fisher–Yates: every permutation is equally likely
    let mut shuffled = roster.to_vec();
    shuffled.shuffle(rng);

    let spectators = shuffled.split_off(team_size);
    Ok(PartitionResult {
        team: shuffled,
        spectators,
    })
}
