//! Integration tests for group-stage pairing.

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use team_tournament_web::{
    pair_category, pair_groups, seed_category, Opponent, RoundScope, Team, TeamRef,
    TournamentError,
};

fn teams_in(category: &str, n: usize) -> Vec<Team> {
    (0..n).map(|i| Team::new(format!("T{i}"), category)).collect()
}

#[test]
fn pairs_every_team_exactly_once() {
    for n in 2..=11 {
        let teams = teams_in("U10", n);
        let round = pair_category(&teams, "U10", &mut StdRng::seed_from_u64(n as u64))
            .unwrap()
            .unwrap();

        assert_eq!(round.matches.len(), (n + 1) / 2, "n = {n}");
        let mut used = HashSet::new();
        for m in &round.matches {
            assert!(used.insert(m.side_a.clone()));
            if let Opponent::Team(b) = &m.side_b {
                assert!(used.insert(b.clone()));
            }
        }
        assert_eq!(used.len(), n);

        let last = round.matches.last().unwrap();
        assert_eq!(last.is_bye(), n % 2 == 1, "n = {n}");
        assert_eq!(round.matches.iter().filter(|m| m.is_bye()).count(), n % 2);
    }
}

#[test]
fn three_teams_give_one_match_and_one_bye() {
    let teams = vec![
        Team::new("A", "U10"),
        Team::new("B", "U10"),
        Team::new("C", "U10"),
    ];
    let round = pair_category(&teams, "U10", &mut StepRng::new(0, 0))
        .unwrap()
        .unwrap();

    assert_eq!(round.scope, RoundScope::group("U10"));
    assert_eq!(round.matches.len(), 2);

    let played = &round.matches[0];
    assert_eq!(played.side_a, TeamRef::new("U10", "B"));
    assert_eq!(played.side_b, Opponent::Team(TeamRef::new("U10", "C")));
    assert!(played.winner().is_none());

    let bye = &round.matches[1];
    assert!(bye.is_bye());
    assert_eq!(bye.winner(), Some(&TeamRef::new("U10", "A")));
    assert!(bye.sets.is_empty());
}

#[test]
fn two_teams_give_exactly_one_match() {
    let round = pair_category(&teams_in("U12", 2), "U12", &mut StdRng::seed_from_u64(3))
        .unwrap()
        .unwrap();
    assert_eq!(round.matches.len(), 1);
    assert!(!round.matches[0].is_bye());
    assert_eq!(round.matches[0].category.as_deref(), Some("U12"));
}

#[test]
fn single_team_has_no_round_and_empty_category_is_an_error() {
    let teams = teams_in("U10", 1);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(pair_category(&teams, "U10", &mut rng), Ok(None));
    assert_eq!(
        pair_category(&teams, "U14", &mut rng),
        Err(TournamentError::InsufficientParticipants)
    );

    let bracket = seed_category(&teams, "U10", &mut rng).unwrap();
    assert!(bracket.rounds.is_empty());
    assert_eq!(bracket.champion, Some(TeamRef::new("U10", "T0")));
}

#[test]
fn groups_are_split_by_category() {
    let mut teams = teams_in("U10", 4);
    teams.extend(teams_in("U12", 3));
    teams.extend(teams_in("U14", 1));
    let rounds = pair_groups(&teams, &mut StdRng::seed_from_u64(11));

    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds["U10"].matches.len(), 2);
    assert_eq!(rounds["U12"].matches.len(), 2);
    assert!(!rounds.contains_key("U14"));
    for (category, round) in &rounds {
        for m in &round.matches {
            assert_eq!(&m.side_a.category, category);
            assert_eq!(m.category.as_deref(), Some(category.as_str()));
        }
    }
}

#[test]
fn same_name_in_two_categories_stays_apart() {
    let teams = vec![
        Team::new("Lions", "U10"),
        Team::new("Wolves", "U10"),
        Team::new("Lions", "U12"),
        Team::new("Hawks", "U12"),
    ];
    let rounds = pair_groups(&teams, &mut StdRng::seed_from_u64(5));
    assert!(rounds["U10"].matches[0].involves(&TeamRef::new("U10", "Lions")));
    assert!(rounds["U12"].matches[0].involves(&TeamRef::new("U12", "Lions")));
    assert!(!rounds["U12"].matches[0].involves(&TeamRef::new("U10", "Lions")));
}

#[test]
fn repairing_gives_a_valid_round_each_time() {
    let teams = teams_in("U10", 6);
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..5 {
        let round = pair_category(&teams, "U10", &mut rng).unwrap().unwrap();
        assert_eq!(round.matches.len(), 3);
        assert!(round.matches.iter().all(|m| !m.is_bye()));
    }
}
