use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Tier value the backend writes while a subscription is lapsed or unpaid.
pub const TIER_NOT_ACTIVE: &str = "not active";

/// Coarse account category carried in the `accountType` claim.
///
/// - `Main`: standard account, expected to hold a paid tier.
/// - `Leg`: legacy account, exempt from email confirmation and payment.
/// - `Unset`: claim empty or absent (not yet assigned by the backend).
/// - `Other`: a value this client does not know about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "Option<String>", into = "String")]
pub enum AccountType {
    Main,
    Leg,
    #[default]
    Unset,
    Other(String),
}

impl AccountType {
    /// Parse a claim value. Empty strings count as unset.
    pub fn parse(s: &str) -> Self {
        match s {
            "" => AccountType::Unset,
            "main" => AccountType::Main,
            "leg" => AccountType::Leg,
            other => AccountType::Other(other.to_string()),
        }
    }

    /// Claim string as stored by the backend.
    pub fn as_str(&self) -> &str {
        match self {
            AccountType::Main => "main",
            AccountType::Leg => "leg",
            AccountType::Unset => "",
            AccountType::Other(s) => s,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, AccountType::Unset)
    }
}

impl From<Option<String>> for AccountType {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl From<AccountType> for String {
    fn from(value: AccountType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing tier carried in the `accountTier` claim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "Option<String>", into = "String")]
pub enum AccountTier {
    /// Claim empty or absent.
    #[default]
    Unset,
    /// Subscription lapsed or never paid.
    NotActive,
    /// Any assigned plan name.
    Active(String),
}

impl AccountTier {
    pub fn parse(s: &str) -> Self {
        match s {
            "" => AccountTier::Unset,
            TIER_NOT_ACTIVE => AccountTier::NotActive,
            other => AccountTier::Active(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AccountTier::Unset => "",
            AccountTier::NotActive => TIER_NOT_ACTIVE,
            AccountTier::Active(s) => s,
        }
    }

    /// True when no paid plan is in effect (unset or not active).
    pub fn is_inactive(&self) -> bool {
        matches!(self, AccountTier::Unset | AccountTier::NotActive)
    }
}

impl From<Option<String>> for AccountTier {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl From<AccountTier> for String {
    fn from(value: AccountTier) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AccountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account-status claims read from the identity provider's token result.
///
/// Deserializes from the provider's claim map; keys other than the three
/// below are ignored and missing keys fall back to unverified / unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Claims {
    #[serde(default, deserialize_with = "null_as_false")]
    pub email_verified: bool,
    #[serde(default, rename = "accountType")]
    pub account_type: AccountType,
    #[serde(default, rename = "accountTier")]
    pub account_tier: AccountTier,
}

impl Claims {
    /// Whether the backend still has to assign a tier or type to this account.
    pub fn is_incomplete(&self) -> bool {
        self.account_tier.is_inactive() || self.account_type.is_unset()
    }

    /// Take tier and type from a refreshed token, keeping `email_verified`.
    pub fn merge_tier(&mut self, refreshed: Claims) {
        self.account_tier = refreshed.account_tier;
        self.account_type = refreshed.account_type;
    }
}

/// Providers send `null` for accounts that never went through verification.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// A signed-in session as handed out by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    pub uid: String,
    pub id_token: String,
}

/// Value published by the provider's credential-state subscription.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CredentialState {
    /// The provider has not reported a state yet.
    #[default]
    Unresolved,
    SignedOut,
    SignedIn(Credential),
}

impl CredentialState {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, CredentialState::Unresolved)
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            CredentialState::SignedIn(c) => Some(c),
            _ => None,
        }
    }
}
