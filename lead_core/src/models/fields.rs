//! The fixed set of form fields and the control each one is rendered as

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Phone,
    Email,
    Topic,
    ContactPref,
    Msg,
    Consent,
    UtmSource,
    UtmMedium,
    UtmCampaign,
    UtmContent,
    UtmTerm,
    Referrer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    TextArea,
    Select,
    Radio,
    Checkbox,
    Hidden,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Name,
        Field::Phone,
        Field::Email,
        Field::Topic,
        Field::ContactPref,
        Field::Msg,
        Field::Consent,
        Field::UtmSource,
        Field::UtmMedium,
        Field::UtmCampaign,
        Field::UtmContent,
        Field::UtmTerm,
        Field::Referrer,
    ];

    /// Fields that carry an error slot and are checked on submit.
    pub const VALIDATED: [Field; 6] = [
        Field::Name,
        Field::Phone,
        Field::Email,
        Field::Topic,
        Field::ContactPref,
        Field::Consent,
    ];

    pub const UTM: [Field; 5] = [
        Field::UtmSource,
        Field::UtmMedium,
        Field::UtmCampaign,
        Field::UtmContent,
        Field::UtmTerm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Topic => "topic",
            Field::ContactPref => "contact_pref",
            Field::Msg => "msg",
            Field::Consent => "consent",
            Field::UtmSource => "utm_source",
            Field::UtmMedium => "utm_medium",
            Field::UtmCampaign => "utm_campaign",
            Field::UtmContent => "utm_content",
            Field::UtmTerm => "utm_term",
            Field::Referrer => "referrer",
        }
    }

    pub fn control_kind(&self) -> ControlKind {
        match self {
            Field::Name | Field::Phone | Field::Email => ControlKind::Text,
            Field::Msg => ControlKind::TextArea,
            Field::Topic => ControlKind::Select,
            Field::ContactPref => ControlKind::Radio,
            Field::Consent => ControlKind::Checkbox,
            Field::UtmSource
            | Field::UtmMedium
            | Field::UtmCampaign
            | Field::UtmContent
            | Field::UtmTerm
            | Field::Referrer => ControlKind::Hidden,
        }
    }

    pub fn is_attribution(&self) -> bool {
        self.control_kind() == ControlKind::Hidden
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown form field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A single user edit as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Checked(bool),
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        FieldInput::Text(value.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        FieldInput::Text(value)
    }
}

impl From<bool> for FieldInput {
    fn from(value: bool) -> Self {
        FieldInput::Checked(value)
    }
}
