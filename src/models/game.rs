//! Match (game), set scores, and the per-match result state machine.

use crate::models::team::TeamRef;
use crate::models::tournament::{SetRejection, TournamentError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// A match is best of this many sets.
pub const MAX_SETS: usize = 3;

/// Set wins needed to take a match.
pub const SETS_TO_WIN: u32 = 2;

/// Side of a match. Fixed when the match is created.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

/// Who side B of a match is.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opponent {
    Team(TeamRef),
    /// No opponent: side A advances automatically.
    Bye,
}

impl Opponent {
    pub fn team(&self) -> Option<&TeamRef> {
        match self {
            Opponent::Team(t) => Some(t),
            Opponent::Bye => None,
        }
    }
}

/// Points for one set, in side order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub points_a: u32,
    pub points_b: u32,
}

impl SetScore {
    pub fn new(points_a: u32, points_b: u32) -> Self {
        Self { points_a, points_b }
    }

    /// Side with strictly more points; `None` for a tie.
    pub fn winner(&self) -> Option<Side> {
        use std::cmp::Ordering::*;
        match self.points_a.cmp(&self.points_b) {
            Greater => Some(Side::A),
            Less => Some(Side::B),
            Equal => None,
        }
    }
}

/// Progress of a single match. Transitions only move forward.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Undecided,
    InProgress,
    Decided,
}

/// A single match between two teams, or one team and a BYE.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub side_a: TeamRef,
    pub side_b: Opponent,
    /// Category for group-stage matches; `None` in the knockout.
    pub category: Option<String>,
    pub sets: Vec<SetScore>,
    /// None until one side has won `SETS_TO_WIN` sets (set immediately for a BYE).
    pub winner: Option<TeamRef>,
}

impl GameMatch {
    pub fn new(side_a: TeamRef, side_b: TeamRef, category: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            side_a,
            side_b: Opponent::Team(side_b),
            category,
            sets: Vec::new(),
            winner: None,
        }
    }

    /// Automatic advance: `team` wins without any sets being played.
    pub fn bye(team: TeamRef, category: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            winner: Some(team.clone()),
            side_a: team,
            side_b: Opponent::Bye,
            category,
            sets: Vec::new(),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.side_b == Opponent::Bye
    }

    pub fn winner(&self) -> Option<&TeamRef> {
        self.winner.as_ref()
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub fn status(&self) -> MatchStatus {
        if self.is_decided() {
            MatchStatus::Decided
        } else if self.sets.is_empty() {
            MatchStatus::Undecided
        } else {
            MatchStatus::InProgress
        }
    }

    /// Sets won by (side A, side B).
    pub fn sets_won(&self) -> (u32, u32) {
        self.sets
            .iter()
            .fold((0, 0), |(a, b), set| match set.winner() {
                Some(Side::A) => (a + 1, b),
                Some(Side::B) => (a, b + 1),
                None => (a, b),
            })
    }

    /// True if `team` plays on either side of this match.
    pub fn involves(&self, team: &TeamRef) -> bool {
        &self.side_a == team || self.side_b.team() == Some(team)
    }

    /// Record one set and recompute the winner.
    ///
    /// Rejected without any change if the match is already decided (every BYE match is),
    /// if `MAX_SETS` sets are already recorded, or if the set is tied.
    pub fn record_set(&mut self, points_a: u32, points_b: u32) -> Result<(), TournamentError> {
        if self.winner.is_some() {
            return Err(TournamentError::MatchAlreadyDecided(self.id));
        }
        if self.sets.len() >= MAX_SETS {
            return Err(TournamentError::SetLimitExceeded {
                match_id: self.id,
                reason: SetRejection::TooManySets,
            });
        }
        let set = SetScore::new(points_a, points_b);
        if set.winner().is_none() {
            return Err(TournamentError::SetLimitExceeded {
                match_id: self.id,
                reason: SetRejection::TiedScore,
            });
        }
        self.sets.push(set);

        let (won_a, won_b) = self.sets_won();
        if won_a >= SETS_TO_WIN {
            self.winner = Some(self.side_a.clone());
        } else if won_b >= SETS_TO_WIN {
            self.winner = self.side_b.team().cloned();
        }
        Ok(())
    }
}
