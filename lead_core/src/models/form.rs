//! Live form values and the rules for writing into each control

use super::fields::{ControlKind, Field, FieldInput};
use crate::attribution::AttributionSnapshot;
use crate::config::FormConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub topic: String,
    /// `None` while no radio option is checked; such a group is left out of form data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_pref: Option<String>,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub consent: bool,
    #[serde(flatten)]
    pub attribution: AttributionSnapshot,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently held by a field. The checkbox reports `"on"` when checked.
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Topic => &self.topic,
            Field::ContactPref => self.contact_pref.as_deref().unwrap_or(""),
            Field::Msg => &self.msg,
            Field::Consent => {
                if self.consent {
                    "on"
                } else {
                    ""
                }
            }
            Field::UtmSource => &self.attribution.utm_source,
            Field::UtmMedium => &self.attribution.utm_medium,
            Field::UtmCampaign => &self.attribution.utm_campaign,
            Field::UtmContent => &self.attribution.utm_content,
            Field::UtmTerm => &self.attribution.utm_term,
            Field::Referrer => &self.attribution.referrer,
        }
    }

    /// Applies a user edit. Returns `false` when the control rejects the input,
    /// e.g. a radio value outside its option set.
    pub fn apply_input(&mut self, field: Field, input: FieldInput, form: &FormConfig) -> bool {
        match (field.control_kind(), input) {
            (ControlKind::Checkbox, FieldInput::Checked(checked)) => {
                self.consent = checked;
                true
            }
            (ControlKind::Radio, FieldInput::Text(value)) => {
                if form.contact_prefs.iter().any(|option| *option == value) {
                    self.contact_pref = Some(value);
                    true
                } else {
                    false
                }
            }
            (ControlKind::Select, FieldInput::Text(value)) => {
                if value.is_empty() || form.topics.iter().any(|option| *option == value) {
                    self.topic = value;
                    true
                } else {
                    false
                }
            }
            (ControlKind::Checkbox, FieldInput::Text(_)) | (_, FieldInput::Checked(_)) => false,
            (_, FieldInput::Text(value)) => {
                self.set_plain(field, value);
                true
            }
        }
    }

    /// Writes a stored draft value back into its control, coercing it the way
    /// a browser coerces assignments to form elements.
    pub fn restore(&mut self, field: Field, value: &Value, form: &FormConfig) {
        match field.control_kind() {
            ControlKind::Checkbox => self.consent = is_truthy(value),
            ControlKind::Radio => {
                let wanted = coerce_to_string(value);
                if form.contact_prefs.iter().any(|option| *option == wanted) {
                    self.contact_pref = Some(wanted);
                }
            }
            ControlKind::Select => {
                let wanted = coerce_to_string(value);
                self.topic = if form.topics.iter().any(|option| *option == wanted) {
                    wanted
                } else {
                    String::new()
                };
            }
            ControlKind::Text | ControlKind::TextArea | ControlKind::Hidden => {
                self.set_plain(field, coerce_to_string(value));
            }
        }
    }

    pub fn set_attribution(&mut self, snapshot: AttributionSnapshot) {
        self.attribution = snapshot;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    fn set_plain(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::Msg => &mut self.msg,
            Field::UtmSource => &mut self.attribution.utm_source,
            Field::UtmMedium => &mut self.attribution.utm_medium,
            Field::UtmCampaign => &mut self.attribution.utm_campaign,
            Field::UtmContent => &mut self.attribution.utm_content,
            Field::UtmTerm => &mut self.attribution.utm_term,
            Field::Referrer => &mut self.attribution.referrer,
            Field::Topic => &mut self.topic,
            Field::ContactPref | Field::Consent => return,
        };
        *slot = value;
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(coerce_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
