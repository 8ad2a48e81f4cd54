//! Data structures for the tournament: teams, matches, rounds, brackets, tournament state.

mod bracket;
mod game;
mod registry;
mod team;
mod tournament;

pub use bracket::{Bracket, Round, RoundScope};
pub use game::{GameMatch, MatchId, MatchStatus, Opponent, SetScore, Side, MAX_SETS, SETS_TO_WIN};
pub use registry::{RegistryEvent, RegistryObserver, TeamRegistry};
pub use team::{Team, TeamRef};
pub use tournament::{SetRejection, Tournament, TournamentError, TournamentId, TournamentState};
