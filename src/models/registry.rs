//! TeamRegistry: registered teams and change notification.

use crate::models::team::{Team, TeamRef};
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What changed in the registry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryEvent {
    Registered(TeamRef),
    Removed(TeamRef),
}

impl RegistryEvent {
    pub fn team(&self) -> &TeamRef {
        match self {
            RegistryEvent::Registered(t) | RegistryEvent::Removed(t) => t,
        }
    }
}

/// Callback run after every successful mutation with the event and the new snapshot.
pub type RegistryObserver = Box<dyn FnMut(&RegistryEvent, &[Team]) + Send + Sync>;

/// Registered teams in insertion order. Names are unique within a category.
#[derive(Default, Serialize, Deserialize)]
pub struct TeamRegistry {
    teams: Vec<Team>,
    #[serde(skip)]
    observers: Vec<RegistryObserver>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a team. Fails if the same name is already registered in the same category.
    pub fn register(&mut self, team: Team) -> Result<(), TournamentError> {
        let team_ref = team.team_ref();
        if self.contains(&team_ref) {
            return Err(TournamentError::DuplicateTeam {
                category: team_ref.category,
                name: team_ref.name,
            });
        }
        self.teams.push(team);
        self.notify(RegistryEvent::Registered(team_ref));
        Ok(())
    }

    /// Remove a team by identity, returning it.
    pub fn remove(&mut self, team: &TeamRef) -> Result<Team, TournamentError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.is(team))
            .ok_or_else(|| TournamentError::TeamNotFound(team.clone()))?;
        let removed = self.teams.remove(idx);
        self.notify(RegistryEvent::Removed(team.clone()));
        Ok(removed)
    }

    /// Current teams, insertion order.
    pub fn snapshot(&self) -> &[Team] {
        &self.teams
    }

    /// Teams of one category, registry order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Team> + 'a {
        self.teams.iter().filter(move |t| t.category == category)
    }

    /// Distinct categories in order of first registration.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for t in &self.teams {
            if !seen.iter().any(|c| *c == t.category) {
                seen.push(t.category.clone());
            }
        }
        seen
    }

    pub fn get(&self, team: &TeamRef) -> Option<&Team> {
        self.teams.iter().find(|t| t.is(team))
    }

    pub fn contains(&self, team: &TeamRef) -> bool {
        self.get(team).is_some()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Subscribe to registry changes. Callbacks run synchronously, in subscription order.
    pub fn observe<F>(&mut self, callback: F)
    where
        F: FnMut(&RegistryEvent, &[Team]) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(callback));
    }

    fn notify(&mut self, event: RegistryEvent) {
        for observer in &mut self.observers {
            observer(&event, &self.teams);
        }
    }
}

// Observers belong to whoever subscribed; a clone starts without any.
impl Clone for TeamRegistry {
    fn clone(&self) -> Self {
        Self {
            teams: self.teams.clone(),
            observers: Vec::new(),
        }
    }
}

impl fmt::Debug for TeamRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeamRegistry")
            .field("teams", &self.teams)
            .field("observers", &self.observers.len())
            .finish()
    }
}
