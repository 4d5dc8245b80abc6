//! Property-based tests for domain invariants
//!
//! These tests verify that the seat-shuffle, the run report, and the
//! credential snapshot hold their invariants across arbitrary valid inputs,
//! not just the handful of fixtures the unit tests use.

use overbook::domain::{
    available_in_random_order, ActorId, ActorTerminal, AttemptOutcome, AuthToken, EmailAddress,
    Identity, Password, ProvisionedAccount, RunId, Seat, SeatId, SeatNumber, SeatQuota, SimEvent,
    SimEventKind, Username,
};
use overbook::sim::{ActorSummary, ContentionReport};
use overbook::store::CredentialStore;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

// Property test generators
pub mod generators {
    use super::*;
    use proptest::collection::vec;
    use proptest::string::string_regex;

    /// Generate valid usernames
    pub fn username() -> impl Strategy<Value = Username> {
        string_regex("[a-z][a-z0-9._]{2,15}")
            .unwrap()
            .prop_filter_map("Invalid username", |s| Username::try_new(s).ok())
    }

    /// Generate valid email addresses
    pub fn email_address() -> impl Strategy<Value = EmailAddress> {
        string_regex(r"[a-z]{1,8}@[a-z]{1,8}\.[a-z]{2,3}")
            .unwrap()
            .prop_filter_map("Invalid email", |s| EmailAddress::try_new(s).ok())
    }

    /// Generate valid passwords
    pub fn password() -> impl Strategy<Value = Password> {
        string_regex("[a-zA-Z0-9]{8,24}")
            .unwrap()
            .prop_filter_map("Invalid password", |s| Password::try_new(s).ok())
    }

    /// Generate valid auth tokens
    pub fn auth_token() -> impl Strategy<Value = AuthToken> {
        string_regex("[A-Za-z0-9._-]{8,40}")
            .unwrap()
            .prop_filter_map("Invalid token", |s| AuthToken::try_new(s).ok())
    }

    /// Generate provisioned accounts with matching identity and token
    pub fn provisioned_account() -> impl Strategy<Value = ProvisionedAccount> {
        (username(), email_address(), password(), auth_token()).prop_map(
            |(username, email, password, token)| {
                ProvisionedAccount::new(Identity::new(username, email, password), token)
            },
        )
    }

    /// Generate a single seat row with an arbitrary availability flag
    pub fn seat() -> impl Strategy<Value = Seat> {
        (1i64..500, string_regex("[1-9][0-9]?[A-F]").unwrap(), any::<bool>()).prop_map(
            |(id, number, available)| {
                Seat::new(SeatId::from(id), SeatNumber::from(number), available)
            },
        )
    }

    /// Generate a full seat listing as the service would return it
    pub fn seat_snapshot() -> impl Strategy<Value = Vec<Seat>> {
        vec(seat(), 0..60)
    }

    /// Generate a stream of booking attempts: (actor index, seat id, granted)
    pub fn attempts() -> impl Strategy<Value = Vec<(usize, i64, bool)>> {
        vec((0usize..5, 1i64..20, any::<bool>()), 0..48)
    }
}

const ACTOR_COUNT: usize = 5;

fn actor_handle(index: usize) -> ActorId {
    let email = EmailAddress::try_new(format!("actor{index}@example.com")).unwrap();
    ActorId::for_replica(&email, 1)
}

/// Build a report from an attempt stream the way the driver would: one
/// `AttemptSettled` event per attempt plus one summary per actor whose
/// claim count matches its granted attempts.
fn report_from_attempts(attempts: &[(usize, i64, bool)]) -> ContentionReport {
    let mut events = Vec::new();
    let mut claimed = [0u32; ACTOR_COUNT];
    for (actor, seat, granted) in attempts {
        let outcome = if *granted {
            AttemptOutcome::Claimed
        } else {
            AttemptOutcome::Rejected
        };
        events.push(SimEvent::now(
            actor_handle(*actor),
            SimEventKind::AttemptSettled {
                seat_id: SeatId::from(*seat),
                seat_number: SeatNumber::from(format!("{seat}A")),
                outcome,
            },
        ));
        if *granted {
            claimed[*actor] += 1;
        }
    }
    let summaries = (0..ACTOR_COUNT)
        .map(|index| ActorSummary {
            actor: actor_handle(index),
            claimed: claimed[index],
            terminal: if claimed[index] > 0 {
                ActorTerminal::QuotaReached
            } else {
                ActorTerminal::NoProgress
            },
        })
        .collect();
    ContentionReport::new(RunId::generate(), events, summaries)
}

proptest! {
    #[test]
    fn prop_shuffle_keeps_exactly_the_open_seats(
        snapshot in generators::seat_snapshot(),
        seed in any::<u64>(),
    ) {
        let mut expected: Vec<i64> = snapshot
            .iter()
            .filter(|seat| seat.available)
            .map(|seat| seat.id.into_inner())
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let shuffled = available_in_random_order(snapshot, &mut rng);

        prop_assert!(shuffled.iter().all(|seat| seat.available));
        let mut got: Vec<i64> = shuffled.iter().map(|seat| seat.id.into_inner()).collect();
        expected.sort_unstable();
        got.sort_unstable();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_report_totals_match_the_attempt_stream(attempts in generators::attempts()) {
        let report = report_from_attempts(&attempts);

        let granted = attempts.iter().filter(|(_, _, g)| *g).count();
        prop_assert_eq!(report.total_claims(), granted);
        prop_assert_eq!(report.total_rejections(), attempts.len() - granted);

        let per_actor: u32 = report.claims_by_actor().values().sum();
        prop_assert_eq!(per_actor as usize, granted);

        let terminals: usize = report.terminal_counts().values().sum();
        prop_assert_eq!(terminals, report.summaries().len());
    }

    #[test]
    fn prop_double_grants_are_always_flagged(attempts in generators::attempts()) {
        let report = report_from_attempts(&attempts);

        let mut grants_per_seat: BTreeMap<i64, usize> = BTreeMap::new();
        for (_, seat, granted) in &attempts {
            if *granted {
                *grants_per_seat.entry(*seat).or_default() += 1;
            }
        }
        let expected: Vec<i64> = grants_per_seat
            .iter()
            .filter(|(_, grants)| **grants > 1)
            .map(|(seat, _)| *seat)
            .collect();

        let flagged: Vec<i64> = report
            .double_claimed_seats()
            .iter()
            .map(|seat| seat.into_inner())
            .collect();
        prop_assert_eq!(report.is_clean(), expected.is_empty());
        prop_assert_eq!(flagged, expected);
    }

    #[test]
    fn prop_quota_violations_are_exactly_the_actors_above_quota(
        claims in proptest::collection::vec(0u32..8, 1..6),
        quota in 1u32..6,
    ) {
        let summaries: Vec<ActorSummary> = claims
            .iter()
            .enumerate()
            .map(|(index, &claimed)| ActorSummary {
                actor: actor_handle(index),
                claimed,
                terminal: ActorTerminal::QuotaReached,
            })
            .collect();
        let report = ContentionReport::new(RunId::generate(), Vec::new(), summaries);

        let expected: Vec<(ActorId, u32)> = claims
            .iter()
            .enumerate()
            .filter(|(_, &claimed)| claimed > quota)
            .map(|(index, &claimed)| (actor_handle(index), claimed))
            .collect();
        prop_assert_eq!(
            report.quota_violations(SeatQuota::try_new(quota).unwrap()),
            expected
        );
    }

    #[test]
    fn prop_credential_snapshot_survives_a_write_read_cycle(
        accounts in proptest::collection::vec(generators::provisioned_account(), 0..8),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("accounts.json"));
        store.write(&accounts).unwrap();
        prop_assert_eq!(store.read_all().unwrap(), accounts);
    }
}
