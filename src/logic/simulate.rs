//! Play out undecided matches with random scores (demo and test mode).

use crate::models::{GameMatch, Round, Tournament, TournamentError, TournamentState};
use rand::Rng;

/// Points that win a simulated set; the loser scores less.
const SET_POINTS: u32 = 11;

/// Record random sets until the match has a winner. Decided matches are left alone.
pub fn simulate_match<R: Rng + ?Sized>(game: &mut GameMatch, rng: &mut R) -> Result<(), TournamentError> {
    while !game.is_decided() {
        let loser = rng.gen_range(0..SET_POINTS - 1);
        let (points_a, points_b) = if rng.gen_bool(0.5) {
            (SET_POINTS, loser)
        } else {
            (loser, SET_POINTS)
        };
        game.record_set(points_a, points_b)?;
    }
    Ok(())
}

/// Decide every pending match of `round`. Returns how many were played.
pub fn simulate_round<R: Rng + ?Sized>(round: &mut Round, rng: &mut R) -> Result<usize, TournamentError> {
    let mut played = 0;
    for game in round.matches.iter_mut().filter(|m| !m.is_decided()) {
        simulate_match(game, rng)?;
        played += 1;
    }
    Ok(played)
}

/// Decide every pending match of the tournament's active rounds.
pub fn simulate_active_rounds<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<usize, TournamentError> {
    if !matches!(
        tournament.state,
        TournamentState::GroupStage | TournamentState::Knockout
    ) {
        return Err(TournamentError::InvalidState);
    }
    let mut played = 0;
    for round in tournament.active_rounds_mut() {
        played += simulate_round(round, rng)?;
    }
    Ok(played)
}
