use crate::utils::error::TeamError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of players in the generated team. Only the sizes offered by the
/// interface are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TeamSize {
    Two,
    Three,
    #[default]
    Five,
}

impl TeamSize {
    pub const ALL: [TeamSize; 3] = [TeamSize::Two, TeamSize::Three, TeamSize::Five];

    pub fn get(self) -> usize {
        match self {
            TeamSize::Two => 2,
            TeamSize::Three => 3,
            TeamSize::Five => 5,
        }
    }
}

impl TryFrom<usize> for TeamSize {
    type Error = TeamError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(TeamSize::Two),
            3 => Ok(TeamSize::Three),
            5 => Ok(TeamSize::Five),
            other => Err(TeamError::InvalidTeamSize {
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for TeamSize {
    type Err = TeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s.trim().parse().map_err(|_| TeamError::InvalidTeamSize {
            value: s.to_string(),
        })?;
        TeamSize::try_from(value)
    }
}

impl fmt::Display for TeamSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Outcome of one partition: the selected team and everyone left over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionResult {
    pub team: Vec<String>,
    pub spectators: Vec<String>,
}
