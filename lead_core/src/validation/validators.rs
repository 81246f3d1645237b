//! Whole-form validation

use super::{Validatable, ValidationResult, rules::*};
use crate::config::FormConfig;
use crate::models::{Field, FormValues};
use crate::validate_fields;

/// Checks every validated field of a form against its rule. There is no
/// short-circuit: one pass reports all problems.
#[derive(Debug, Clone, Copy)]
pub struct LeadValidator<'a> {
    values: &'a FormValues,
    form: &'a FormConfig,
}

impl<'a> LeadValidator<'a> {
    pub fn new(values: &'a FormValues, form: &'a FormConfig) -> Self {
        Self { values, form }
    }
}

impl Validatable for LeadValidator<'_> {
    fn validate_comprehensive(&self) -> ValidationResult {
        let values = self.values;

        validate_fields! {
            Field::Name => validate_name(&values.name),
            Field::Phone => validate_phone(&values.phone),
            Field::Email => validate_email(&values.email),
            Field::Topic => validate_topic(&values.topic, &self.form.topics),
            Field::ContactPref => validate_contact_pref(values.contact_pref.as_deref(), &self.form.contact_prefs),
            Field::Consent => validate_consent(values.consent),
        }
    }
}

pub fn validate_form(values: &FormValues, form: &FormConfig) -> ValidationResult {
    LeadValidator::new(values, form).validate_comprehensive()
}
