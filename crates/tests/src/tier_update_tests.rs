use crate::common::*;
use pretty_assertions::assert_eq;
use shared_types::{AccountTier, AccountType, RedirectDecision};
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Five requests 200ms apart collapse into one backend call, made one quiet
/// window after the last request.
#[tokio::test(start_paused = true)]
async fn burst_of_requests_makes_one_backend_call() {
    let identity = FakeIdentity::signed_in(claims(true, "", ""));
    let service = FakeTierService::promoting(&identity, claims(true, "main", "pro"));
    let guard = guard_with(&identity, service);
    let user = credential("user-1");
    let start = Instant::now();

    let request = |n: u64| {
        let guard = &guard;
        let user = &user;
        async move {
            sleep(Duration::from_millis(200 * n)).await;
            guard.updater().request_tier_update(user).await
        }
    };

    let (a, b, c, d, e) = tokio::join!(request(0), request(1), request(2), request(3), request(4));

    assert!(a.is_none() && b.is_none() && c.is_none() && d.is_none());
    let refreshed = e.expect("last request should run");
    assert_eq!(refreshed.account_tier, AccountTier::Active("pro".to_string()));

    let service = guard.updater().service();
    assert_eq!(service.call_count(), 1);
    assert_eq!(service.called_uids(), vec!["user-1".to_string()]);

    let called_after = service.call_times()[0] - start;
    assert!(called_after >= Duration::from_millis(1800), "{:?}", called_after);
    assert!(called_after < Duration::from_millis(1900), "{:?}", called_after);
}

#[tokio::test(start_paused = true)]
async fn successful_update_forces_token_refresh() {
    let identity = FakeIdentity::signed_in(claims(true, "", ""));
    let service = FakeTierService::promoting(&identity, claims(true, "leg", "legacy"));
    let guard = guard_with(&identity, service);

    let refreshed = guard
        .updater()
        .request_tier_update(&credential("user-1"))
        .await
        .expect("update should run");

    assert_eq!(refreshed.account_type, AccountType::Leg);
    assert_eq!(identity.forced_refreshes(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_update_returns_nothing() {
    let identity = FakeIdentity::signed_in(claims(true, "main", "not active"));
    let guard = guard_for(&identity);

    let result = guard
        .updater()
        .request_tier_update(&credential("user-1"))
        .await;

    assert!(result.is_none());
    assert_eq!(guard.updater().service().call_count(), 1);
    assert_eq!(identity.forced_refreshes(), 0);
}

/// Refresh failing after a successful backend call is reported as no result.
#[tokio::test(start_paused = true)]
async fn refresh_failure_returns_nothing() {
    let identity = FakeIdentity::signed_in(claims(true, "", ""));
    let service = FakeTierService::accepting(&identity);
    let guard = guard_with(&identity, service);
    identity.fail_claims();

    let result = guard
        .updater()
        .request_tier_update(&credential("user-1"))
        .await;

    assert!(result.is_none());
    assert_eq!(guard.updater().service().call_count(), 1);
    assert_eq!(identity.forced_refreshes(), 1);
}

/// Promoted claims replace the incomplete ones before rules run.
#[tokio::test(start_paused = true)]
async fn guard_uses_promoted_claims() {
    let identity = FakeIdentity::signed_in(claims(true, "main", "not active"));
    let service = FakeTierService::promoting(&identity, claims(true, "main", "pro"));
    let guard = guard_with(&identity, service);

    let decision = guard.decide(&to("/dashboard")).await;

    assert_eq!(decision, RedirectDecision::Proceed);
    assert_eq!(identity.reads(), vec![false, true]);
}

/// A failed promotion leaves the incomplete claims in place.
#[tokio::test(start_paused = true)]
async fn guard_keeps_prior_claims_when_update_fails() {
    let identity = FakeIdentity::signed_in(claims(true, "main", "not active"));
    let guard = guard_for(&identity);

    let decision = guard.decide(&to("/dashboard")).await;

    assert_eq!(decision, RedirectDecision::redirect("/payment"));
    assert_eq!(guard.updater().service().call_count(), 1);
}

/// Two overlapping navigations share one backend call; the superseded one
/// decides on the claims it already had.
#[tokio::test(start_paused = true)]
async fn overlapping_navigations_share_one_update() {
    let identity = FakeIdentity::signed_in(claims(true, "main", "not active"));
    let service = FakeTierService::promoting(&identity, claims(true, "main", "pro"));
    let guard = guard_with(&identity, service);

    let nav = to("/dashboard");
    let first = guard.decide(&nav);
    let second = async {
        sleep(Duration::from_millis(300)).await;
        guard.decide(&nav).await
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first, RedirectDecision::redirect("/payment"));
    assert_eq!(second, RedirectDecision::Proceed);
    assert_eq!(guard.updater().service().call_count(), 1);
}
