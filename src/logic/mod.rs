//! Tournament business logic: registration, pairing, results, knockout progression.

mod group_play;
mod knockout;
mod results;
mod setup;
mod shuffle;
mod simulate;

pub use group_play::{pair_category, pair_groups, pair_participants, seed_category};
pub use knockout::{advance, advance_bracket, advance_round, Advance};
pub use results::{match_winner, record_set_score};
pub use setup::{register_team, remove_team, restart_tournament, start_tournament};
pub use shuffle::shuffle;
pub use simulate::{simulate_active_rounds, simulate_match, simulate_round};
