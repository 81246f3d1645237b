//! What the host should currently render

use crate::config::FormConfig;
use crate::models::Field;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    Editing,
    Submitting,
    Success,
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormState::Editing => write!(f, "editing"),
            FormState::Submitting => write!(f, "submitting"),
            FormState::Success => write!(f, "success"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub state: FormState,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub inputs_visible: bool,
    pub success_visible: bool,
    /// One slot per validated field; a missing entry is an empty slot.
    pub errors: BTreeMap<Field, String>,
    pub notice: Option<String>,
    pub anchor: Option<String>,
}

impl FormView {
    pub fn editing(form: &FormConfig) -> Self {
        Self {
            state: FormState::Editing,
            submit_enabled: true,
            submit_label: form.submit_label.clone(),
            inputs_visible: true,
            success_visible: false,
            errors: BTreeMap::new(),
            notice: None,
            anchor: None,
        }
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub(crate) fn enter_submitting(&mut self, form: &FormConfig) {
        self.state = FormState::Submitting;
        self.submit_enabled = false;
        self.submit_label = form.submitting_label.clone();
        self.notice = None;
    }

    pub(crate) fn enter_success(&mut self) {
        self.state = FormState::Success;
        self.submit_enabled = false;
        self.inputs_visible = false;
        self.success_visible = true;
    }

    pub(crate) fn return_to_editing(&mut self, form: &FormConfig, notice: Option<String>) {
        self.state = FormState::Editing;
        self.submit_enabled = true;
        self.submit_label = form.submit_label.clone();
        self.notice = notice;
    }
}
