//! Integration tests for set scores and match winners.

use team_tournament_web::{
    GameMatch, MatchStatus, SetRejection, SetScore, TeamRef, TournamentError, MAX_SETS,
};

fn a() -> TeamRef {
    TeamRef::new("U10", "A")
}

fn b() -> TeamRef {
    TeamRef::new("U10", "B")
}

fn new_match() -> GameMatch {
    GameMatch::new(a(), b(), Some("U10".into()))
}

#[test]
fn two_sets_to_one_decides_after_third_set() {
    let mut m = new_match();
    m.record_set(11, 5).unwrap();
    assert_eq!(m.status(), MatchStatus::InProgress);
    m.record_set(3, 11).unwrap();
    assert!(m.winner().is_none());
    m.record_set(11, 7).unwrap();

    assert_eq!(m.winner(), Some(&a()));
    assert_eq!(m.sets_won(), (2, 1));
    assert_eq!(m.status(), MatchStatus::Decided);
    assert_eq!(
        m.record_set(11, 0),
        Err(TournamentError::MatchAlreadyDecided(m.id))
    );
    assert_eq!(m.sets.len(), 3);
}

#[test]
fn straight_sets_leave_third_slot_empty() {
    let mut m = new_match();
    m.record_set(4, 11).unwrap();
    m.record_set(9, 11).unwrap();
    assert_eq!(m.winner(), Some(&b()));
    assert_eq!(m.sets.len(), 2);
    assert!(m.record_set(11, 2).is_err());
    assert_eq!(m.sets.len(), 2);
}

#[test]
fn tied_set_is_rejected_without_change() {
    let mut m = new_match();
    m.record_set(11, 8).unwrap();
    assert_eq!(
        m.record_set(10, 10),
        Err(TournamentError::SetLimitExceeded {
            match_id: m.id,
            reason: SetRejection::TiedScore
        })
    );
    assert_eq!(m.sets, vec![SetScore::new(11, 8)]);
    assert!(m.winner().is_none());
}

#[test]
fn set_limit_is_enforced() {
    // A malformed snapshot with three sets and no winner still refuses a fourth set.
    let mut m = new_match();
    m.sets = vec![SetScore::new(11, 2), SetScore::new(2, 11), SetScore::new(5, 5)];
    assert_eq!(m.sets.len(), MAX_SETS);
    assert_eq!(
        m.record_set(11, 3),
        Err(TournamentError::SetLimitExceeded {
            match_id: m.id,
            reason: SetRejection::TooManySets
        })
    );
}

#[test]
fn bye_match_is_decided_and_takes_no_sets() {
    let mut m = GameMatch::bye(a(), Some("U10".into()));
    assert_eq!(m.winner(), Some(&a()));
    assert_eq!(m.status(), MatchStatus::Decided);
    assert_eq!(
        m.record_set(11, 0),
        Err(TournamentError::MatchAlreadyDecided(m.id))
    );
    assert!(m.sets.is_empty());
}

#[test]
fn winner_iff_a_side_reaches_two_set_wins() {
    // Every sequence of set outcomes: true = side A takes the set.
    for len in 1..=3u32 {
        for bits in 0..(1u32 << len) {
            let mut m = new_match();
            let mut accepted = 0;
            for i in 0..len {
                let a_wins = bits & (1 << i) != 0;
                let (pa, pb) = if a_wins { (11, 6) } else { (6, 11) };
                let decided_before = m.winner().is_some();
                let result = m.record_set(pa, pb);
                assert_eq!(result.is_ok(), !decided_before);
                if result.is_ok() {
                    accepted += 1;
                }
            }
            let (wa, wb) = m.sets_won();
            assert_eq!(wa + wb, accepted);
            match m.winner() {
                Some(w) if *w == a() => assert!(wa >= 2 && wa > wb),
                Some(_) => assert!(wb >= 2 && wb > wa),
                None => assert!(wa < 2 && wb < 2),
            }
        }
    }
}
