//! Set scores for the matches of the active rounds.

use crate::models::{MatchId, TeamRef, Tournament, TournamentError, TournamentState};

/// Record one set on a match of an active round (group stage or knockout).
///
/// A match from an earlier, already advanced round is reported as decided, also once the
/// tournament is completed.
pub fn record_set_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    points_a: u32,
    points_b: u32,
) -> Result<(), TournamentError> {
    if tournament.state == TournamentState::Registration {
        return Err(TournamentError::InvalidState);
    }

    if let Some(game) = tournament.active_match_mut(match_id) {
        game.record_set(points_a, points_b)?;
        if let Some(winner) = game.winner() {
            log::debug!("Match {} won by {}", match_id, winner);
        }
        return Ok(());
    }

    match tournament.find_match(match_id) {
        Some(_) => Err(TournamentError::MatchAlreadyDecided(match_id)),
        None => Err(TournamentError::MatchNotFound(match_id)),
    }
}

/// Winner of any match in the tournament, if decided.
pub fn match_winner(tournament: &Tournament, match_id: MatchId) -> Option<&TeamRef> {
    tournament.find_match(match_id).and_then(|m| m.winner())
}
