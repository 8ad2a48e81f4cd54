//! Tournament, TournamentState, and TournamentError.

use crate::models::bracket::{Bracket, Round};
use crate::models::game::{GameMatch, MatchId};
use crate::models::registry::{RegistryEvent, TeamRegistry};
use crate::models::team::{Team, TeamRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Why a set score was refused.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetRejection {
    /// The match already holds the maximum number of sets.
    TooManySets,
    /// Both sides have the same points; a set needs a winner.
    TiedScore,
}

/// Errors that can occur during tournament operations.
///
/// Every operation returning one of these leaves the tournament unchanged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A team with this name is already registered in this category.
    DuplicateTeam { category: String, name: String },
    /// The match already has a winner (late or duplicate score).
    MatchAlreadyDecided(MatchId),
    /// The set cannot be recorded on this match.
    SetLimitExceeded { match_id: MatchId, reason: SetRejection },
    /// Pairing attempted with nobody to pair.
    InsufficientParticipants,
    /// No registered team with this identity.
    TeamNotFound(TeamRef),
    /// No match with this id among the active rounds.
    MatchNotFound(MatchId),
    /// Not all matches of the round have a winner.
    IncompleteResults,
    /// Need at least 2 teams to start.
    NotEnoughTeams,
    /// Tournament is not in a state that allows this action.
    InvalidState,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::DuplicateTeam { category, name } => {
                write!(f, "A team named {} is already registered in {}", name, category)
            }
            TournamentError::MatchAlreadyDecided(_) => write!(f, "Match already has a winner"),
            TournamentError::SetLimitExceeded { reason, .. } => match reason {
                SetRejection::TooManySets => write!(f, "Match already has the maximum number of sets"),
                SetRejection::TiedScore => write!(f, "A set cannot end in a tie"),
            },
            TournamentError::InsufficientParticipants => write!(f, "No participants to pair"),
            TournamentError::TeamNotFound(team) => write!(f, "Team {} not found", team),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::IncompleteResults => write!(f, "Not all matches have a result"),
            TournamentError::NotEnoughTeams => write!(f, "Need at least 2 teams to start"),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Teams register; pairings are previews regenerated on every change.
    #[default]
    Registration,
    /// Each category plays down to a category champion.
    GroupStage,
    /// Category champions play down to the overall champion.
    Knockout,
    /// Champion decided.
    Completed,
}

/// Full tournament state: teams, category brackets, knockout bracket, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub state: TournamentState,
    pub registry: TeamRegistry,
    /// Group-stage bracket per category.
    pub categories: BTreeMap<String, Bracket>,
    /// Knockout across category champions (empty until the group stage is over).
    pub knockout: Bracket,
    pub champion: Option<TeamRef>,
    pub created_at: DateTime<Utc>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Create a new tournament in Registration state with no teams.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: TournamentState::Registration,
            registry: TeamRegistry::new(),
            categories: BTreeMap::new(),
            knockout: Bracket::new(),
            champion: None,
            created_at: Utc::now(),
        }
    }

    /// Subscribe to team registrations and removals.
    pub fn observe_registry<F>(&mut self, callback: F)
    where
        F: FnMut(&RegistryEvent, &[Team]) + Send + Sync + 'static,
    {
        self.registry.observe(callback);
    }

    /// Rounds currently waiting for results: the open category rounds during the group
    /// stage, the current knockout round during the knockout.
    pub fn active_rounds(&self) -> Vec<&Round> {
        match self.state {
            TournamentState::GroupStage => self
                .categories
                .values()
                .filter(|b| !b.is_decided())
                .filter_map(Bracket::current_round)
                .collect(),
            TournamentState::Knockout => self.knockout.current_round().into_iter().collect(),
            TournamentState::Registration | TournamentState::Completed => Vec::new(),
        }
    }

    pub fn active_rounds_mut(&mut self) -> Vec<&mut Round> {
        match self.state {
            TournamentState::GroupStage => self
                .categories
                .values_mut()
                .filter(|b| !b.is_decided())
                .filter_map(Bracket::current_round_mut)
                .collect(),
            TournamentState::Knockout => self.knockout.current_round_mut().into_iter().collect(),
            TournamentState::Registration | TournamentState::Completed => Vec::new(),
        }
    }

    /// Look up a match anywhere in the tournament's history.
    pub fn find_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.categories
            .values()
            .chain(std::iter::once(&self.knockout))
            .find_map(|b| b.find_match(id))
    }

    /// Mutable access to a match of an active round.
    pub fn active_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.active_rounds_mut()
            .into_iter()
            .find_map(|r| r.get_match_mut(id))
    }

    /// Champions of decided categories, in category order.
    pub fn category_champions(&self) -> Vec<TeamRef> {
        self.categories
            .values()
            .filter_map(|b| b.champion.clone())
            .collect()
    }

    pub fn all_categories_decided(&self) -> bool {
        self.categories.values().all(Bracket::is_decided)
    }
}
