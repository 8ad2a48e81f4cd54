//! Knockout progression: pair the winners of a finished round until one is left.

use crate::logic::group_play::pair_participants;
use crate::logic::shuffle::shuffle;
use crate::models::{Bracket, Round, RoundScope, TeamRef, Tournament, TournamentError, TournamentState};
use rand::Rng;

/// Result of feeding a round's winners back into the bracket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Advance {
    /// Next round to play.
    Round(Round),
    /// Only one entry was left.
    Champion(TeamRef),
}

/// Produce the next round from `winners`, or the champion if only one remains.
///
/// The winners are shuffled and paired like a group-stage round, BYE included. `number`
/// is the 1-based position of the new round in its bracket.
pub fn advance<R: Rng + ?Sized>(
    winners: &[TeamRef],
    scope: RoundScope,
    number: u32,
    rng: &mut R,
) -> Result<Advance, TournamentError> {
    match winners {
        [] => Err(TournamentError::InsufficientParticipants),
        [champion] => Ok(Advance::Champion(champion.clone())),
        _ => {
            let matches = pair_participants(shuffle(winners, rng), scope.category());
            Ok(Advance::Round(Round::new(number, scope, matches)))
        }
    }
}

/// Advance a bracket whose current round is complete: append the next round or close it
/// with a champion.
pub fn advance_bracket<R: Rng + ?Sized>(
    bracket: &mut Bracket,
    scope: RoundScope,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if bracket.is_decided() {
        return Err(TournamentError::InvalidState);
    }
    let winners = bracket
        .current_round()
        .ok_or(TournamentError::InsufficientParticipants)?
        .winners()
        .ok_or(TournamentError::IncompleteResults)?;

    match advance(&winners, scope, bracket.next_round_number(), rng)? {
        Advance::Round(round) => {
            log::debug!(
                "Round {} ({:?}): {} matches for {} teams",
                round.number,
                round.scope,
                round.matches.len(),
                winners.len()
            );
            bracket.push_round(round)
        }
        Advance::Champion(champion) => {
            log::debug!("Bracket decided: {}", champion);
            bracket.set_champion(champion)
        }
    }
}

/// Move the tournament forward once results are in.
///
/// Group stage: every category whose current round is complete advances; once all
/// categories have a champion the knockout starts. Knockout: the knockout bracket advances
/// and the tournament completes when it has a champion.
pub fn advance_round<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    match tournament.state {
        TournamentState::GroupStage => advance_group_stage(tournament, rng),
        TournamentState::Knockout => {
            advance_bracket(&mut tournament.knockout, RoundScope::Knockout, rng)?;
            if let Some(champion) = tournament.knockout.champion.clone() {
                complete(tournament, champion);
            }
            Ok(())
        }
        TournamentState::Registration | TournamentState::Completed => {
            Err(TournamentError::InvalidState)
        }
    }
}

fn advance_group_stage<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    let ready: Vec<String> = tournament
        .categories
        .iter()
        .filter(|(_, b)| b.ready_to_advance() && b.current_round().is_some())
        .map(|(category, _)| category.clone())
        .collect();
    if ready.is_empty() && !tournament.all_categories_decided() {
        return Err(TournamentError::IncompleteResults);
    }

    for category in ready {
        if let Some(bracket) = tournament.categories.get_mut(&category) {
            advance_bracket(bracket, RoundScope::group(category), rng)?;
        }
    }

    if tournament.all_categories_decided() {
        start_knockout(tournament, rng)?;
    }
    Ok(())
}

/// Merge the category champions into one pool and generate the first knockout round.
pub(crate) fn start_knockout<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    let champions = tournament.category_champions();
    match advance(&champions, RoundScope::Knockout, 1, rng)? {
        Advance::Round(round) => {
            log::debug!("Knockout starts with {} category champions", champions.len());
            tournament.knockout = Bracket::with_first_round(round);
            tournament.state = TournamentState::Knockout;
        }
        Advance::Champion(champion) => {
            tournament.knockout = Bracket::decided(champion.clone());
            complete(tournament, champion);
        }
    }
    Ok(())
}

fn complete(tournament: &mut Tournament, champion: TeamRef) {
    log::info!("Tournament {} won by {}", tournament.id, champion);
    tournament.champion = Some(champion);
    tournament.state = TournamentState::Completed;
}
