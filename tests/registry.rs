//! Integration tests for the team registry and its observers.

use std::sync::{Arc, Mutex};
use team_tournament_web::{RegistryEvent, Team, TeamRef, TeamRegistry, TournamentError};

#[test]
fn register_keeps_insertion_order() {
    let mut registry = TeamRegistry::new();
    registry.register(Team::new("Lions", "U10")).unwrap();
    registry.register(Team::new("Wolves", "U12")).unwrap();
    registry.register(Team::new("Dolphins", "U10")).unwrap();

    let names: Vec<_> = registry.snapshot().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Lions", "Wolves", "Dolphins"]);
    assert_eq!(registry.categories(), ["U10", "U12"]);
    assert_eq!(registry.in_category("U10").count(), 2);
}

#[test]
fn duplicate_name_in_same_category_is_rejected() {
    let mut registry = TeamRegistry::new();
    registry.register(Team::new("Lions", "U10")).unwrap();
    let err = registry.register(Team::new("Lions", "U10")).unwrap_err();
    assert_eq!(
        err,
        TournamentError::DuplicateTeam {
            category: "U10".into(),
            name: "Lions".into()
        }
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn same_name_in_other_category_is_a_different_team() {
    let mut registry = TeamRegistry::new();
    registry.register(Team::new("Lions", "U10")).unwrap();
    registry.register(Team::new("Lions", "U12")).unwrap();
    assert_eq!(registry.len(), 2);
    assert!(registry.contains(&TeamRef::new("U12", "Lions")));
}

#[test]
fn observers_see_each_change_with_new_snapshot() {
    let seen: Arc<Mutex<Vec<(RegistryEvent, usize)>>> = Arc::default();
    let mut registry = TeamRegistry::new();
    let sink = Arc::clone(&seen);
    registry.observe(move |event, teams| {
        sink.lock().unwrap().push((event.clone(), teams.len()));
    });

    registry.register(Team::new("Lions", "U10")).unwrap();
    registry.register(Team::new("Wolves", "U10")).unwrap();
    // Rejected: no notification.
    assert!(registry.register(Team::new("Lions", "U10")).is_err());
    registry.remove(&TeamRef::new("U10", "Lions")).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (RegistryEvent::Registered(TeamRef::new("U10", "Lions")), 1),
            (RegistryEvent::Registered(TeamRef::new("U10", "Wolves")), 2),
            (RegistryEvent::Removed(TeamRef::new("U10", "Lions")), 1),
        ]
    );
}

#[test]
fn removing_unknown_team_fails() {
    let mut registry = TeamRegistry::new();
    registry.register(Team::new("Lions", "U10")).unwrap();
    let missing = TeamRef::new("U12", "Lions");
    assert_eq!(
        registry.remove(&missing),
        Err(TournamentError::TeamNotFound(missing))
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn snapshot_serializes_without_observers() {
    let mut registry = TeamRegistry::new();
    registry.observe(|_, _| {});
    registry.register(Team::with_contact("Lions", "U10", "Rossi", "a@b.it", "123")).unwrap();

    let json = serde_json::to_string(&registry).unwrap();
    let back: TeamRegistry = serde_json::from_str(&json).unwrap();
    assert_eq!(back.snapshot(), registry.snapshot());
}
