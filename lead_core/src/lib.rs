//! Core library for the landing-page lead form: validation, attribution,
//! draft persistence, submission dispatch and the form state machine.

pub mod attribution;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod draft;
pub mod error;
pub mod host;
pub mod models;
pub mod validation;

pub use attribution::AttributionSnapshot;
pub use config::LeadConfig;
pub use controller::{FormState, FormView, LeadFormController, SubmitOutcome, SubmitStart};
pub use dispatch::{Delivery, Dispatch, SubmissionDispatcher};
pub use draft::DraftStore;
pub use error::{LeadError, Result};
pub use host::{DraftStorage, FileStorage, MemoryStorage, Navigator, PageContext, StaticPage};
pub use models::{Field, FieldInput, FormValues, SubmissionPayload};
pub use validation::{validate_form, ValidationResult};

use std::sync::Arc;

/// Wires a controller for a deployment from its configuration.
pub fn mount_form<S: DraftStorage, P: PageContext>(
    config: &LeadConfig,
    storage: S,
    page: P,
    navigator: Arc<dyn Navigator>,
) -> Result<LeadFormController<S, P>> {
    let dispatcher = SubmissionDispatcher::from_config(&config.dispatch, navigator.clone())?;
    let drafts = DraftStore::new(storage, config.draft.storage_key.clone());

    Ok(LeadFormController::mount(
        config.form.clone(),
        drafts,
        page,
        navigator,
        Arc::new(dispatcher),
    ))
}
