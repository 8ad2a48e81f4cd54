//! Registration phase: register/remove teams, start and restart the tournament.

use crate::logic::group_play::seed_category;
use crate::logic::knockout::start_knockout;
use crate::models::{Bracket, Team, TeamRef, Tournament, TournamentError, TournamentState};
use rand::Rng;

/// Register a team and regenerate the pairing preview of its category.
pub fn register_team<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    team: Team,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Registration {
        return Err(TournamentError::InvalidState);
    }
    let category = team.category.clone();
    tournament.registry.register(team)?;
    repair_category(tournament, &category, rng);
    Ok(())
}

/// Remove a team (Registration only) and regenerate its category's preview.
pub fn remove_team<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    team: &TeamRef,
    rng: &mut R,
) -> Result<Team, TournamentError> {
    if tournament.state != TournamentState::Registration {
        return Err(TournamentError::InvalidState);
    }
    let removed = tournament.registry.remove(team)?;
    repair_category(tournament, &team.category, rng);
    Ok(removed)
}

/// Replace the category's bracket with a fresh pairing; drop it if the category is empty.
fn repair_category<R: Rng + ?Sized>(tournament: &mut Tournament, category: &str, rng: &mut R) {
    match seed_category(tournament.registry.snapshot(), category, rng) {
        Ok(bracket) => {
            tournament.categories.insert(category.to_string(), bracket);
        }
        Err(_) => {
            tournament.categories.remove(category);
        }
    }
}

/// Start the tournament: the current pairings become the first group-stage rounds.
/// Needs at least 2 teams. If no category has anything to play, the knockout starts at once.
pub fn start_tournament<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Registration {
        return Err(TournamentError::InvalidState);
    }
    if tournament.registry.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }
    tournament.state = TournamentState::GroupStage;
    log::debug!(
        "Tournament {} started: {} teams in {} categories",
        tournament.id,
        tournament.registry.len(),
        tournament.categories.len()
    );
    if tournament.all_categories_decided() {
        start_knockout(tournament, rng)?;
    }
    Ok(())
}

/// Back to Registration with the same teams; results are discarded and pairings regenerated.
pub fn restart_tournament<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.state == TournamentState::Registration {
        return Err(TournamentError::InvalidState);
    }
    let mut categories = std::collections::BTreeMap::new();
    for category in tournament.registry.categories() {
        let bracket = seed_category(tournament.registry.snapshot(), &category, rng)?;
        categories.insert(category, bracket);
    }
    tournament.categories = categories;
    tournament.knockout = Bracket::new();
    tournament.champion = None;
    tournament.state = TournamentState::Registration;
    Ok(())
}
