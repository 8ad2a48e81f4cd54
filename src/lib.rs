//! Team tournament web app: library with models and business logic.
//!
//! Teams register into categories, each category plays single-elimination rounds down to a
//! category champion, and the category champions meet in a knockout for the overall title.

pub mod config;
pub mod logic;
pub mod models;
pub mod registration;

pub use config::ServerConfig;
pub use logic::{
    advance, advance_bracket, advance_round, match_winner, pair_category, pair_groups,
    pair_participants, record_set_score, register_team, remove_team, restart_tournament,
    seed_category, shuffle, simulate_active_rounds, simulate_match, simulate_round,
    start_tournament, Advance,
};
pub use models::{
    Bracket, GameMatch, MatchId, MatchStatus, Opponent, RegistryEvent, RegistryObserver, Round,
    RoundScope, SetRejection, SetScore, Side, Team, TeamRef, TeamRegistry, Tournament,
    TournamentError, TournamentId, TournamentState, MAX_SETS, SETS_TO_WIN,
};
pub use registration::{forms_from_csv, import_teams, RegistrationError, RegistrationForm};
