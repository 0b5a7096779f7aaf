//! Ordered routing rules for signed-in and signed-out navigation.
//!
//! Rules are checked top to bottom and the first match decides. A
//! navigation that matches nothing proceeds.

use shared_types::paths::*;
use shared_types::{AccountTier, AccountType, Claims, NavigationIntent, RedirectDecision};

/// Identifies which rule produced a decision, for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// New user on the signup flow before any account is assigned.
    SignupInProgress,
    /// Unverified non-legacy user, not returning from a successful checkout.
    EmailUnverified,
    /// Unverified user trying to reach account pages.
    AccountNeedsVerification,
    /// Payment provider sent the user back with `success=true`.
    PaymentSucceeded,
    /// Verified user revisiting the confirmation page.
    EmailAlreadyConfirmed,
    /// Standard account without an active tier.
    PaymentRequired,
    /// Legacy accounts never pay.
    LegacySkipsPayment,
    /// Verified user on login or signup.
    AlreadySignedIn,
    /// Legacy users land on the primary settings page.
    LegacySettings,
    /// Signup with a tier already assigned.
    SignupAfterTier,
}

struct RuleEntry {
    rule: Rule,
    matches: fn(&Claims, &NavigationIntent) -> bool,
    /// `None` lets the navigation proceed.
    target: Option<&'static str>,
}

const SIGNED_IN_RULES: &[RuleEntry] = &[
    RuleEntry {
        rule: Rule::SignupInProgress,
        matches: |c, i| {
            i.destination_path.starts_with(SIGNUP)
                && c.account_tier.is_inactive()
                && c.account_type.is_unset()
        },
        target: None,
    },
    RuleEntry {
        rule: Rule::EmailUnverified,
        matches: |c, i| {
            !c.email_verified
                && c.account_type != AccountType::Leg
                && i.origin_param("success") != Some("true")
                && i.destination_path != CONFIRM_EMAIL
        },
        target: Some(CONFIRM_EMAIL),
    },
    RuleEntry {
        rule: Rule::AccountNeedsVerification,
        matches: |c, i| !c.email_verified && i.destination_path.starts_with(ACCOUNT),
        target: Some(CONFIRM_EMAIL),
    },
    RuleEntry {
        rule: Rule::PaymentSucceeded,
        matches: |c, i| {
            c.email_verified
                && i.origin_path == PAYMENT
                && i.destination_path.starts_with(PAYMENT)
                && i.destination_param("success") == Some("true")
        },
        target: Some(ACCOUNT_PAYMENT_SUCCESS),
    },
    RuleEntry {
        rule: Rule::EmailAlreadyConfirmed,
        matches: |c, i| {
            c.email_verified
                && !c.account_type.is_unset()
                && i.destination_path.starts_with(CONFIRM_EMAIL)
        },
        target: Some(ACCOUNT),
    },
    RuleEntry {
        rule: Rule::PaymentRequired,
        matches: |c, i| {
            c.email_verified
                && c.account_tier.is_inactive()
                && c.account_type == AccountType::Main
                && !i.destination_path.starts_with(PAYMENT)
        },
        target: Some(PAYMENT),
    },
    RuleEntry {
        rule: Rule::LegacySkipsPayment,
        matches: |c, i| {
            c.email_verified
                && c.account_type == AccountType::Leg
                && i.destination_path.starts_with(PAYMENT)
        },
        target: Some(ACCOUNT),
    },
    RuleEntry {
        rule: Rule::AlreadySignedIn,
        matches: |c, i| {
            c.email_verified
                && (i.destination_path == LOGIN || i.destination_path.starts_with(SIGNUP))
        },
        target: Some(ACCOUNT),
    },
    RuleEntry {
        rule: Rule::LegacySettings,
        matches: |c, i| {
            c.email_verified
                && c.account_type == AccountType::Leg
                && (i.destination_path == PRIMARY_SETTINGS
                    || i.destination_path.starts_with(LEG_SETTINGS))
        },
        target: Some(PRIMARY_SETTINGS),
    },
    // Shadowed by AlreadySignedIn for verified users; only unverified
    // legacy users reach it.
    RuleEntry {
        rule: Rule::SignupAfterTier,
        matches: |c, i| {
            i.destination_path.starts_with(SIGNUP) && c.account_tier != AccountTier::Unset
        },
        target: Some(ACCOUNT),
    },
];

/// First signed-in rule matching `claims` and `intent`, with its decision.
pub fn matching_rule(
    claims: &Claims,
    intent: &NavigationIntent,
) -> Option<(Rule, RedirectDecision)> {
    SIGNED_IN_RULES
        .iter()
        .find(|entry| (entry.matches)(claims, intent))
        .map(|entry| {
            let decision = match entry.target {
                Some(path) => RedirectDecision::redirect(path),
                None => RedirectDecision::Proceed,
            };
            (entry.rule, decision)
        })
}

/// Decide a signed-in navigation.
pub fn evaluate(claims: &Claims, intent: &NavigationIntent) -> RedirectDecision {
    match matching_rule(claims, intent) {
        Some((rule, decision)) => {
            tracing::debug!(
                ?rule,
                ?decision,
                destination = %intent.destination_path,
                "Routing rule matched"
            );
            decision
        }
        None => RedirectDecision::Proceed,
    }
}

/// Decide a navigation with no signed-in user.
pub fn signed_out(intent: &NavigationIntent) -> RedirectDecision {
    let destination = intent.destination_path.as_str();
    if destination.starts_with(ACCOUNT) {
        tracing::info!(destination, "No signed-in user on an account page, redirecting to login");
        return RedirectDecision::redirect(LOGIN);
    }
    if destination.starts_with(LOGIN) || destination.starts_with(SIGNUP) {
        tracing::debug!(destination, "No signed-in user on login or signup, no redirect needed");
        return RedirectDecision::Proceed;
    }
    tracing::info!(destination, "No signed-in user, redirecting home");
    RedirectDecision::redirect(HOME)
}
