use crate::common::*;
use pretty_assertions::assert_eq;
use shared_types::{CredentialState, GuardState, RedirectDecision};
use std::time::Duration;
use tokio::time::Instant;

/// Account pages require a user; signed-out visitors are sent to login.
#[tokio::test(start_paused = true)]
async fn account_pages_redirect_to_login() {
    let identity = FakeIdentity::signed_out();
    let guard = guard_for(&identity);

    for destination in ["/account", "/account/x", "/account/primarysettings"] {
        assert_eq!(
            guard.decide(&to(destination)).await,
            RedirectDecision::redirect("/login"),
            "destination {destination}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn login_and_signup_proceed() {
    let identity = FakeIdentity::signed_out();
    let guard = guard_for(&identity);

    for destination in ["/login", "/signup", "/signup/x", "/login?next=/account"] {
        assert_eq!(
            guard.decide(&to(destination)).await,
            RedirectDecision::Proceed,
            "destination {destination}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn other_pages_redirect_home() {
    let identity = FakeIdentity::signed_out();
    let guard = guard_for(&identity);

    for destination in ["/", "/dashboard", "/payment", "/confirmemail", "/Account/LegSettings"] {
        assert_eq!(
            guard.decide(&to(destination)).await,
            RedirectDecision::redirect("/"),
            "destination {destination}"
        );
    }
}

/// A signed-out navigation never reads claims or calls the backend.
#[tokio::test(start_paused = true)]
async fn signed_out_touches_no_claims() {
    let identity = FakeIdentity::signed_out();
    let guard = guard_for(&identity);

    guard.decide(&to("/account")).await;

    assert!(identity.reads().is_empty());
    assert_eq!(guard.updater().service().call_count(), 0);
}

/// The guard waits for a late identity callback and decides on its value.
#[tokio::test(start_paused = true)]
async fn waits_for_delayed_identity_state() {
    let identity = FakeIdentity::unresolved();
    identity.set_claims(claims(true, "main", "pro"));
    let guard = guard_for(&identity);

    let setter = identity.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(3000)).await;
        setter.set_state(CredentialState::SignedIn(credential("late-user")));
    });

    let start = Instant::now();
    let decision = guard.decide(&to("/login")).await;

    assert_eq!(decision, RedirectDecision::redirect("/account"));
    assert!(start.elapsed() >= Duration::from_millis(3000));
    assert!(start.elapsed() < IDENTITY_TIMEOUT);
}

#[tokio::test(start_paused = true)]
async fn delayed_sign_out_takes_signed_out_path() {
    let identity = FakeIdentity::unresolved();
    let guard = guard_for(&identity);

    let setter = identity.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        setter.set_state(CredentialState::SignedOut);
    });

    assert_eq!(
        guard.decide(&to("/account")).await,
        RedirectDecision::redirect("/login")
    );
}

/// No identity state within the timeout is treated as signed out.
#[tokio::test(start_paused = true)]
async fn identity_timeout_falls_back_to_signed_out() {
    let identity = FakeIdentity::unresolved();
    let guard = guard_for(&identity);

    let start = Instant::now();
    let decision = guard.decide(&to("/account/settings")).await;

    assert_eq!(decision, RedirectDecision::redirect("/login"));
    assert!(start.elapsed() >= IDENTITY_TIMEOUT);
    assert!(identity.reads().is_empty());
}

#[tokio::test(start_paused = true)]
async fn run_resolves_guard_state() {
    let identity = FakeIdentity::signed_out();
    let guard = guard_for(&identity);

    assert!(TestGuard::pending().is_loading());

    let state = guard.run(&to("/dashboard")).await;
    assert!(!state.is_loading());
    assert_eq!(state, GuardState::Resolved(RedirectDecision::redirect("/")));
}
