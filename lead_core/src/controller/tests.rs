#[cfg(test)]
mod tests {
    use crate::config::{FormConfig, DEFAULT_STORAGE_KEY};
    use crate::controller::{FormState, LeadFormController, SubmitOutcome, SubmitStart};
    use crate::dispatch::{Delivery, Dispatch, SubmissionDispatcher};
    use crate::config::DispatchConfig;
    use crate::draft::DraftStore;
    use crate::error::{LeadError, Result};
    use crate::host::{DraftStorage, MemoryStorage, RecordingNavigator, StaticPage};
    use crate::models::{Field, SubmissionPayload};
    use crate::validation::CONSENT_MESSAGE;
    use async_trait::async_trait;
    use http::StatusCode;
    use parking_lot::Mutex;
    use std::sync::Arc;

    const PAGE: &str = "https://versicherung.example.de/check?utm_source=google&utm_campaign=spring";

    /// Answers every dispatch with the configured status and keeps the payloads.
    struct ScriptedDispatcher {
        status: StatusCode,
        received: Mutex<Vec<SubmissionPayload>>,
    }

    impl ScriptedDispatcher {
        fn answering(status: StatusCode) -> Arc<Self> {
            Arc::new(Self {
                status,
                received: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.received.lock().len()
        }
    }

    #[async_trait]
    impl Dispatch for ScriptedDispatcher {
        async fn dispatch(&self, payload: &SubmissionPayload) -> Result<Delivery> {
            self.received.lock().push(payload.clone());
            if self.status.is_success() {
                Ok(Delivery::Webhook { status: self.status })
            } else {
                Err(LeadError::WebhookStatus(self.status))
            }
        }
    }

    struct Harness {
        storage: Arc<MemoryStorage>,
        page: Arc<StaticPage>,
        navigator: Arc<RecordingNavigator>,
        dispatcher: Arc<ScriptedDispatcher>,
    }

    impl Harness {
        fn new(status: StatusCode) -> Self {
            Self {
                storage: Arc::new(MemoryStorage::new()),
                page: Arc::new(StaticPage::new(PAGE, "https://www.google.com/")),
                navigator: Arc::new(RecordingNavigator::new()),
                dispatcher: ScriptedDispatcher::answering(status),
            }
        }

        fn mount(&self) -> LeadFormController<Arc<MemoryStorage>, Arc<StaticPage>> {
            LeadFormController::mount(
                FormConfig::default(),
                DraftStore::new(self.storage.clone(), DEFAULT_STORAGE_KEY),
                self.page.clone(),
                self.navigator.clone(),
                self.dispatcher.clone(),
            )
        }

        fn draft(&self) -> Option<String> {
            self.storage.get_item(DEFAULT_STORAGE_KEY).unwrap()
        }
    }

    fn fill_valid(controller: &mut LeadFormController<Arc<MemoryStorage>, Arc<StaticPage>>) {
        assert!(controller.on_input(Field::Name, "Anna Muster"));
        assert!(controller.on_input(Field::Phone, "+49 170 1234567"));
        assert!(controller.on_input(Field::Topic, "haftpflicht"));
        assert!(controller.on_input(Field::ContactPref, "phone"));
        assert!(controller.on_input(Field::Msg, "Bitte abends anrufen"));
        assert!(controller.on_input(Field::Consent, true));
    }

    #[test]
    fn test_mount_captures_attribution() {
        let harness = Harness::new(StatusCode::OK);
        let controller = harness.mount();
        let utm = &controller.values().attribution;

        assert_eq!(controller.state(), FormState::Editing);
        assert_eq!(utm.utm_source, "google");
        assert_eq!(utm.utm_campaign, "spring");
        assert_eq!(utm.utm_medium, "");
        assert_eq!(utm.utm_content, "");
        assert_eq!(utm.utm_term, "");
        assert_eq!(utm.referrer, "https://www.google.com/");
    }

    #[test]
    fn test_every_input_saves_a_draft_and_mount_restores_it() {
        let harness = Harness::new(StatusCode::OK);
        let mut controller = harness.mount();
        assert!(harness.draft().is_none());

        controller.on_input(Field::Name, "Anna Muster");
        assert!(harness.draft().unwrap().contains("Anna Muster"));

        fill_valid(&mut controller);
        let before = controller.values().clone();

        let reloaded = harness.mount();
        assert_eq!(reloaded.values(), &before);
        assert!(reloaded.values().consent);
    }

    #[tokio::test]
    async fn test_missing_consent_blocks_dispatch() {
        let harness = Harness::new(StatusCode::OK);
        let mut controller = harness.mount();
        fill_valid(&mut controller);
        controller.on_input(Field::Consent, false);

        let outcome = controller.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(harness.dispatcher.calls(), 0);
        assert_eq!(controller.state(), FormState::Editing);
        assert_eq!(controller.view().error_for(Field::Consent), Some(CONSENT_MESSAGE));
        assert_eq!(controller.view().error_for(Field::Name), None);
        assert!(controller.view().submit_enabled);
    }

    #[tokio::test]
    async fn test_fixed_fields_clear_their_errors() {
        let harness = Harness::new(StatusCode::OK);
        let mut controller = harness.mount();

        controller.submit().await;
        assert_eq!(controller.view().errors.len(), 5);

        fill_valid(&mut controller);
        controller.on_input(Field::Email, "kaputt@");
        controller.submit().await;

        let errors: Vec<Field> = controller.view().errors.keys().copied().collect();
        assert_eq!(errors, vec![Field::Email]);
    }

    #[tokio::test]
    async fn test_successful_dispatch_shows_success_and_clears_draft() {
        let harness = Harness::new(StatusCode::OK);
        let mut controller = harness.mount();
        fill_valid(&mut controller);
        assert!(harness.draft().is_some());

        let outcome = controller.submit().await;

        assert!(outcome.is_delivered());
        assert_eq!(controller.state(), FormState::Success);
        assert!(harness.draft().is_none());

        let view = controller.view();
        assert!(view.success_visible);
        assert!(!view.inputs_visible);
        assert!(!view.submit_enabled);

        let sent = harness.dispatcher.received.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].page, PAGE);
        assert_eq!(sent[0].values.name, "Anna Muster");
        assert!(sent[0].values.consent);
        assert!(sent[0].timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_failed_dispatch_returns_to_editing_and_keeps_draft() {
        let harness = Harness::new(StatusCode::INTERNAL_SERVER_ERROR);
        let mut controller = harness.mount();
        fill_valid(&mut controller);
        let draft_before = harness.draft();

        let outcome = controller.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Failed(LeadError::WebhookStatus(s)) if s == StatusCode::INTERNAL_SERVER_ERROR));
        let view = controller.view();
        assert_eq!(view.state, FormState::Editing);
        assert!(view.submit_enabled);
        assert_eq!(view.submit_label, FormConfig::default().submit_label);
        assert!(view.inputs_visible);
        assert!(!view.success_visible);
        assert_eq!(view.notice.as_deref(), Some(FormConfig::default().failure_notice.as_str()));
        assert_eq!(harness.draft(), draft_before);

        // The user may simply try again.
        assert!(controller.on_input(Field::Msg, "Zweiter Versuch"));
        assert!(matches!(controller.begin_submit(), SubmitStart::Ready(_)));
        assert!(controller.view().notice.is_none());
    }

    #[tokio::test]
    async fn test_failure_notice_cleared_by_next_attempt_even_when_invalid() {
        let harness = Harness::new(StatusCode::BAD_GATEWAY);
        let mut controller = harness.mount();
        fill_valid(&mut controller);

        assert!(matches!(controller.submit().await, SubmitOutcome::Failed(_)));
        assert!(controller.view().notice.is_some());

        controller.on_input(Field::Consent, false);
        assert!(matches!(controller.submit().await, SubmitOutcome::Invalid(_)));
        assert!(controller.view().notice.is_none());
        assert_eq!(controller.view().error_for(Field::Consent), Some(CONSENT_MESSAGE));
    }

    #[test]
    fn test_serialization_failure_also_returns_to_editing() {
        let harness = Harness::new(StatusCode::OK);
        let mut controller = harness.mount();
        fill_valid(&mut controller);
        assert!(matches!(controller.begin_submit(), SubmitStart::Ready(_)));

        let err = LeadError::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert!(!err.is_dispatch_failure());
        let outcome = controller.finish_submit(Err(err));

        assert!(matches!(outcome, SubmitOutcome::Failed(LeadError::JsonError(_))));
        assert_eq!(controller.state(), FormState::Editing);
        assert!(controller.view().submit_enabled);
    }

    #[test]
    fn test_submitting_blocks_second_submit_and_input() {
        let harness = Harness::new(StatusCode::OK);
        let mut controller = harness.mount();
        fill_valid(&mut controller);

        let SubmitStart::Ready(payload) = controller.begin_submit() else {
            panic!("valid form should be ready to send");
        };
        assert_eq!(payload.values.topic, "haftpflicht");

        let view = controller.view();
        assert_eq!(view.state, FormState::Submitting);
        assert!(!view.submit_enabled);
        assert_eq!(view.submit_label, "Sende …");

        assert!(matches!(controller.begin_submit(), SubmitStart::Ignored(FormState::Submitting)));
        assert!(!controller.on_input(Field::Name, "Jemand anders"));
        assert_eq!(controller.values().name, "Anna Muster");

        let outcome = controller.finish_submit(Ok(Delivery::Webhook { status: StatusCode::CREATED }));
        assert!(outcome.is_delivered());
        assert!(matches!(
            controller.finish_submit(Ok(Delivery::Webhook { status: StatusCode::OK })),
            SubmitOutcome::Ignored(FormState::Success)
        ));
    }

    #[tokio::test]
    async fn test_reset_after_success() {
        let harness = Harness::new(StatusCode::OK);
        let mut controller = harness.mount();
        assert!(!controller.reset());

        fill_valid(&mut controller);
        controller.submit().await;
        assert_eq!(controller.state(), FormState::Success);

        // A stale draft from somewhere else must go as well.
        harness.storage.set_item(DEFAULT_STORAGE_KEY, "{\"name\":\"alt\"}").unwrap();
        harness.page.set_href("https://versicherung.example.de/check?utm_source=newsletter&utm_medium=email");
        harness.page.set_referrer("");

        assert!(controller.reset());

        let values = controller.values();
        assert_eq!(values.name, "");
        assert_eq!(values.phone, "");
        assert_eq!(values.topic, "");
        assert_eq!(values.contact_pref, None);
        assert!(!values.consent);
        assert_eq!(values.attribution.utm_source, "newsletter");
        assert_eq!(values.attribution.utm_medium, "email");
        assert_eq!(values.attribution.utm_campaign, "");
        assert_eq!(values.attribution.referrer, "");
        assert!(harness.draft().is_none());

        let view = controller.view();
        assert_eq!(view.state, FormState::Editing);
        assert!(view.inputs_visible);
        assert!(!view.success_visible);
        assert!(view.submit_enabled);
        assert_eq!(view.anchor.as_deref(), Some("#formular"));
        assert_eq!(harness.navigator.last().as_deref(), Some("#formular"));
    }

    #[tokio::test]
    async fn test_broken_storage_does_not_break_the_form() {
        let dispatcher = ScriptedDispatcher::answering(StatusCode::OK);
        let mut controller = LeadFormController::mount(
            FormConfig::default(),
            DraftStore::new(MemoryStorage::disabled(), DEFAULT_STORAGE_KEY),
            StaticPage::new(PAGE, ""),
            Arc::new(RecordingNavigator::new()),
            dispatcher.clone(),
        );

        assert!(controller.on_input(Field::Name, "Anna Muster"));
        assert!(controller.on_input(Field::Phone, "0170 1234567"));
        assert!(controller.on_input(Field::Topic, "kfz"));
        assert!(controller.on_input(Field::ContactPref, "whatsapp"));
        assert!(controller.on_input(Field::Consent, true));

        assert!(controller.submit().await.is_delivered());
        assert!(controller.reset());
        assert_eq!(dispatcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_mail_fallback_counts_as_success() {
        let storage = Arc::new(MemoryStorage::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let dispatcher =
            SubmissionDispatcher::from_config(&DispatchConfig::default(), navigator.clone()).unwrap();

        let mut controller = LeadFormController::mount(
            FormConfig::default(),
            DraftStore::new(storage.clone(), DEFAULT_STORAGE_KEY),
            StaticPage::new(PAGE, ""),
            navigator.clone(),
            Arc::new(dispatcher),
        );
        controller.on_input(Field::Name, "Anna Muster");
        controller.on_input(Field::Phone, "+49 170 1234567");
        controller.on_input(Field::Topic, "hausrat");
        controller.on_input(Field::ContactPref, "email");
        controller.on_input(Field::Email, "anna@example.de");
        controller.on_input(Field::Consent, true);

        let outcome = controller.submit().await;

        let SubmitOutcome::Delivered(Delivery::Mailto { url }) = outcome else {
            panic!("expected mail fallback");
        };
        assert!(url.starts_with("mailto:deinmail@domain.de?subject=Neuer%20Lead%20Versicherungs-Check&body="));
        assert!(url.contains("anna%40example.de"));
        assert_eq!(navigator.last(), Some(url));
        assert_eq!(controller.state(), FormState::Success);
        assert!(!storage.contains_key(DEFAULT_STORAGE_KEY));
    }
}
