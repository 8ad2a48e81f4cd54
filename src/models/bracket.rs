//! Round and Bracket: layers of matches and their append-only history.

use crate::models::game::{GameMatch, MatchId};
use crate::models::team::TeamRef;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Which part of the tournament a round belongs to.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundScope {
    /// Group stage of one category.
    Group { category: String },
    /// Knockout across all category champions.
    Knockout,
}

impl RoundScope {
    pub fn group(category: impl Into<String>) -> Self {
        RoundScope::Group {
            category: category.into(),
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            RoundScope::Group { category } => Some(category),
            RoundScope::Knockout => None,
        }
    }
}

/// One layer of pairings; all of them must be decided before the next layer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based position within its bracket.
    pub number: u32,
    pub scope: RoundScope,
    pub matches: Vec<GameMatch>,
}

impl Round {
    pub fn new(number: u32, scope: RoundScope, matches: Vec<GameMatch>) -> Self {
        Self {
            number,
            scope,
            matches,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(GameMatch::is_decided)
    }

    /// Winners in match order, once every match is decided.
    pub fn winners(&self) -> Option<Vec<TeamRef>> {
        self.matches
            .iter()
            .map(|m| m.winner().cloned())
            .collect()
    }

    /// Matches still waiting for a winner.
    pub fn pending(&self) -> usize {
        self.matches.iter().filter(|m| !m.is_decided()).count()
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }
}

/// Ordered history of rounds, ending in a champion.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub rounds: Vec<Round>,
    pub champion: Option<TeamRef>,
}

impl Bracket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bracket starting from an already generated first round.
    pub fn with_first_round(round: Round) -> Self {
        Self {
            rounds: vec![round],
            champion: None,
        }
    }

    /// Bracket that is decided without playing a match (single participant).
    pub fn decided(champion: TeamRef) -> Self {
        Self {
            rounds: Vec::new(),
            champion: Some(champion),
        }
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    pub fn current_round_mut(&mut self) -> Option<&mut Round> {
        self.rounds.last_mut()
    }

    pub fn is_decided(&self) -> bool {
        self.champion.is_some()
    }

    /// Current round is complete (or there is none) and no champion yet.
    pub fn ready_to_advance(&self) -> bool {
        !self.is_decided() && self.current_round().map_or(true, Round::is_complete)
    }

    pub fn next_round_number(&self) -> u32 {
        self.rounds.len() as u32 + 1
    }

    /// Append the next round. The previous round must be complete.
    pub fn push_round(&mut self, round: Round) -> Result<(), TournamentError> {
        if self.is_decided() {
            return Err(TournamentError::InvalidState);
        }
        if !self.current_round().map_or(true, Round::is_complete) {
            return Err(TournamentError::IncompleteResults);
        }
        self.rounds.push(round);
        Ok(())
    }

    /// Close the bracket. The current round (if any) must be complete.
    pub fn set_champion(&mut self, champion: TeamRef) -> Result<(), TournamentError> {
        if self.is_decided() {
            return Err(TournamentError::InvalidState);
        }
        if !self.current_round().map_or(true, Round::is_complete) {
            return Err(TournamentError::IncompleteResults);
        }
        self.champion = Some(champion);
        Ok(())
    }

    pub fn find_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.rounds.iter().find_map(|r| r.get_match(id))
    }
}
