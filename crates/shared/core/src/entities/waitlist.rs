use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::email::{validate_email, validate_phone};

/// How a visitor heard about the launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferralSource {
    SocialMedia,
    Friend,
    Search,
    Blog,
    Other,
}

impl ReferralSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferralSource::SocialMedia => "social-media",
            ReferralSource::Friend => "friend",
            ReferralSource::Search => "search",
            ReferralSource::Blog => "blog",
            ReferralSource::Other => "other",
        }
    }
}

impl fmt::Display for ReferralSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferralSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "social-media" => Ok(ReferralSource::SocialMedia),
            "friend" => Ok(ReferralSource::Friend),
            "search" => Ok(ReferralSource::Search),
            "blog" => Ok(ReferralSource::Blog),
            "other" => Ok(ReferralSource::Other),
            other => Err(format!("unknown referral source: {}", other)),
        }
    }
}

/// Field-level validation failures, keyed by field name
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("invalid signup: {}", summary(.0))]
pub struct ValidationErrors(BTreeMap<&'static str, &'static str>);

fn summary(errors: &BTreeMap<&'static str, &'static str>) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("{}: {}", field, msg))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    /// Message for a single field, if it failed
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    /// Failed fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(field, msg)| (*field, *msg))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Waitlist form as entered by a visitor (untrimmed, unvalidated)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitlistSignup {
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub referral_source: Option<ReferralSource>,
}

impl WaitlistSignup {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_referral(mut self, source: ReferralSource) -> Self {
        self.referral_source = Some(source);
        self
    }

    /// Validate every field and produce the normalized row to store
    ///
    /// All failures are collected rather than stopping at the first one.
    pub fn validate(&self) -> Result<NewWaitlistEntry, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "Email is required");
        } else if !validate_email(email) {
            errors.add("email", "Please enter a valid email address");
        }

        let phone = non_blank(self.phone.as_deref());
        if let Some(phone) = phone {
            if !validate_phone(phone) {
                errors.add("phone", "Please enter a valid phone number");
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewWaitlistEntry {
            email: email.to_lowercase(),
            name: non_blank(self.name.as_deref()).map(str::to_string),
            phone: phone.map(str::to_string),
            referral_source: self.referral_source,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Normalized waitlist row, ready for insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWaitlistEntry {
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub referral_source: Option<ReferralSource>,
}
