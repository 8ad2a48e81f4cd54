//! Group stage: pair the teams of each category into a first round.

use crate::logic::shuffle::shuffle;
use crate::models::{Bracket, GameMatch, Round, RoundScope, Team, TeamRef, TournamentError};
use rand::Rng;
use std::collections::BTreeMap;

/// Pair participants consecutively, each used once. An odd one out gets a BYE.
///
/// Shared by the group stage and the knockout; `category` is `None` for knockout matches.
pub fn pair_participants(participants: Vec<TeamRef>, category: Option<&str>) -> Vec<GameMatch> {
    let category = category.map(str::to_string);
    let mut matches = Vec::with_capacity((participants.len() + 1) / 2);
    let mut remaining = participants.into_iter();
    while let Some(side_a) = remaining.next() {
        let game = match remaining.next() {
            Some(side_b) => GameMatch::new(side_a, side_b, category.clone()),
            None => GameMatch::bye(side_a, category.clone()),
        };
        matches.push(game);
    }
    matches
}

/// Generate the first round of one category.
///
/// 1. Filter to the category, keeping registry order.
/// 2. Shuffle.
/// 3. Pair consecutively; a leftover team gets a BYE match it has already won.
///
/// Returns `Ok(None)` for a single team (nothing to play) and `InsufficientParticipants`
/// when the category has no teams.
pub fn pair_category<R: Rng + ?Sized>(
    teams: &[Team],
    category: &str,
    rng: &mut R,
) -> Result<Option<Round>, TournamentError> {
    let members: Vec<TeamRef> = teams
        .iter()
        .filter(|t| t.category == category)
        .map(Team::team_ref)
        .collect();

    match members.len() {
        0 => Err(TournamentError::InsufficientParticipants),
        1 => Ok(None),
        n => {
            let matches = pair_participants(shuffle(&members, rng), Some(category));
            log::debug!("Paired {} teams in {} into {} matches", n, category, matches.len());
            Ok(Some(Round::new(1, RoundScope::group(category), matches)))
        }
    }
}

/// Pair every category with at least 2 teams. Categories are visited in order of first
/// registration so a seeded source always gives the same result for the same teams.
pub fn pair_groups<R: Rng + ?Sized>(teams: &[Team], rng: &mut R) -> BTreeMap<String, Round> {
    let mut categories: Vec<&str> = Vec::new();
    for t in teams {
        if !categories.contains(&t.category.as_str()) {
            categories.push(&t.category);
        }
    }

    let mut rounds = BTreeMap::new();
    for category in categories {
        if let Ok(Some(round)) = pair_category(teams, category, rng) {
            rounds.insert(category.to_string(), round);
        }
    }
    rounds
}

/// Group-stage bracket for one category. A lone team is its category's champion
/// straight away, without a match.
pub fn seed_category<R: Rng + ?Sized>(
    teams: &[Team],
    category: &str,
    rng: &mut R,
) -> Result<Bracket, TournamentError> {
    match pair_category(teams, category, rng)? {
        Some(round) => Ok(Bracket::with_first_round(round)),
        None => teams
            .iter()
            .find(|t| t.category == category)
            .map(|t| Bracket::decided(t.team_ref()))
            .ok_or(TournamentError::InsufficientParticipants),
    }
}
