//! State of a single contact form session.
//!
//! [`ContactForm`] holds the draft the user is editing, validates it locally
//! and hands valid drafts to a [`ContactApiService`]. All methods take `&self`
//! so a front end can share the form between its input handling and a running
//! submission; at most one submission is in flight at any time.

use std::sync::{Mutex, MutexGuard, PoisonError};

use contactform_extern_contracts::{ContactApiError, ContactApiService};
use contactform_models::contact::{
    ContactMethod, ContactMethodDefinition, ContactSubmission, UnknownContactMethod,
    ValidationErrors,
};
use tracing::{info, warn};

pub const SUCCESS_MESSAGE: &str = "Thank you for your submission!";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

pub const SUBMIT_LABEL: &str = "Send Message";
pub const SUBMITTING_LABEL: &str = "Sending...";

#[derive(Debug)]
pub struct ContactForm<Api> {
    api: Api,
    state: Mutex<FormState>,
}

#[derive(Debug, Default)]
struct FormState {
    draft: ContactSubmission,
    errors: ValidationErrors,
    submitting: bool,
}

impl FormState {
    fn validate(&mut self) -> bool {
        self.errors = self.draft.validate();
        self.errors.is_empty()
    }
}

/// Snapshot of the form, used to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormView {
    pub name: String,
    pub contact_method: ContactMethod,
    pub contact_info: String,
    pub errors: ValidationErrors,
    pub submitting: bool,
}

impl ContactFormView {
    pub fn contact_method_definition(&self) -> &'static ContactMethodDefinition {
        self.contact_method.definition()
    }

    pub fn contact_info_label(&self) -> String {
        format!("{} Information", self.contact_method.label())
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// The submit control is disabled while a submission is in flight.
    pub fn submit_enabled(&self) -> bool {
        !self.submitting
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The submission was accepted. Name and contact info have been cleared.
    Sent,
    /// Local validation failed, nothing was sent.
    Invalid(ValidationErrors),
    /// Another submission is still in flight, nothing was sent.
    InProgress,
    /// The request failed. The entered values are kept.
    Failed(ContactApiError),
}

impl SubmitOutcome {
    /// The message shown to the user after the attempt, if any. Validation
    /// errors are shown inline instead.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Sent => Some(SUCCESS_MESSAGE),
            Self::Failed(_) => Some(FAILURE_MESSAGE),
            Self::Invalid(_) | Self::InProgress => None,
        }
    }
}

impl<Api> ContactForm<Api> {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            state: Default::default(),
        }
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.state().draft.name = name.into();
    }

    /// Store the contact info, normalized for the input type of the currently
    /// selected contact method.
    pub fn set_contact_info(&self, contact_info: impl AsRef<str>) {
        let mut state = self.state();
        let input_type = state.draft.contact_method.definition().input_type;
        state.draft.contact_info = input_type.sanitize(contact_info.as_ref());
    }

    pub fn select_contact_method(&self, method: ContactMethod) {
        self.state().draft.contact_method = method;
    }

    pub fn select_contact_method_by_id(
        &self,
        id: &str,
    ) -> Result<ContactMethod, UnknownContactMethod> {
        let method = id.parse()?;
        self.select_contact_method(method);
        Ok(method)
    }

    /// Validate the current draft against the rule of the currently selected
    /// contact method and store the resulting errors.
    pub fn validate(&self) -> bool {
        self.state().validate()
    }

    pub fn view(&self) -> ContactFormView {
        let state = self.state();
        ContactFormView {
            name: state.draft.name.clone(),
            contact_method: state.draft.contact_method,
            contact_info: state.draft.contact_info.clone(),
            errors: state.errors.clone(),
            submitting: state.submitting,
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<Api> ContactForm<Api>
where
    Api: ContactApiService,
{
    pub async fn submit(&self) -> SubmitOutcome {
        let submission = {
            let mut state = self.state();
            if state.submitting {
                return SubmitOutcome::InProgress;
            }
            if !state.validate() {
                return SubmitOutcome::Invalid(state.errors.clone());
            }
            state.submitting = true;
            state.draft.clone()
        };

        let result = self.api.submit(submission).await;

        let mut state = self.state();
        state.submitting = false;
        match result {
            Ok(()) => {
                info!("contact form submitted");
                state.draft.name.clear();
                state.draft.contact_info.clear();
                SubmitOutcome::Sent
            }
            Err(err) => {
                warn!("Failed to submit contact form: {err}");
                SubmitOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use contactform_extern_contracts::MockContactApiService;
    use contactform_models::contact::{FormField, ValidationError};
    use contactform_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Max Mustermann".into(),
            contact_method: ContactMethod::Phone,
            contact_info: "+1 (555) 000-0000".into(),
        }
    }

    fn fill<Api>(form: &ContactForm<Api>) {
        form.set_name("Max Mustermann");
        form.select_contact_method(ContactMethod::Phone);
        form.set_contact_info("+1 (555) 000-0000");
    }

    #[test]
    fn defaults() {
        let sut = ContactForm::new(MockContactApiService::new());

        let view = sut.view();

        assert_eq!(view.contact_method, ContactMethod::Email);
        assert_eq!(view.contact_info_label(), "Email Information");
        assert_eq!(view.contact_method_definition().placeholder, "your@email.com");
        assert_eq!(view.submit_label(), "Send Message");
        assert!(view.submit_enabled());
        assert!(view.errors.is_empty());
    }

    #[test]
    fn select_by_id() {
        let sut = ContactForm::new(MockContactApiService::new());

        assert_eq!(
            sut.select_contact_method_by_id("whatsapp"),
            Ok(ContactMethod::Whatsapp)
        );
        assert_eq!(sut.view().contact_info_label(), "WhatsApp Information");

        assert_matches!(sut.select_contact_method_by_id("pigeon"), Err(_));
        assert_eq!(sut.view().contact_method, ContactMethod::Whatsapp);
    }

    #[test]
    fn validate_populates_errors() {
        let sut = ContactForm::new(MockContactApiService::new());
        sut.set_name("   ");
        sut.set_contact_info("notanemail");

        assert!(!sut.validate());

        let errors = sut.view().errors;
        assert_eq!(errors.get(FormField::Name), Some(ValidationError::NameRequired));
        assert_eq!(
            errors.get(FormField::ContactInfo),
            Some(ValidationError::ContactInfoInvalid(ContactMethod::Email))
        );

        sut.set_name("Max");
        sut.set_contact_info("a@b.com");
        assert!(sut.validate());
        assert!(sut.view().errors.is_empty());
    }

    #[test]
    fn contact_info_is_normalized_for_its_input() {
        let sut = ContactForm::new(MockContactApiService::new());

        sut.set_contact_info("  a@b.com \n");
        assert_eq!(sut.view().contact_info, "a@b.com");

        sut.select_contact_method(ContactMethod::Phone);
        sut.set_contact_info(" +1 (555)\r\n 000-0000");
        assert_eq!(sut.view().contact_info, " +1 (555) 000-0000");
    }

    #[tokio::test]
    async fn invalid_draft_is_not_sent() {
        // Arrange
        let sut = ContactForm::new(MockContactApiService::new());
        sut.set_contact_info("a@b.com");

        // Act
        let outcome = sut.submit().await;

        // Assert
        assert_matches!(
            &outcome,
            SubmitOutcome::Invalid(errors)
                if errors.get(FormField::Name) == Some(ValidationError::NameRequired)
        );
        assert_eq!(outcome.message(), None);
        let view = sut.view();
        assert_eq!(view.errors.get(FormField::Name), Some(ValidationError::NameRequired));
        assert!(!view.submitting);
    }

    #[tokio::test]
    async fn switching_method_revalidates() {
        // Arrange
        let api = MockContactApiService::new().with_submit(submission(), Ok(()));
        let sut = ContactForm::new(api);
        sut.set_name("Max Mustermann");
        sut.set_contact_info("+1 (555) 000-0000");

        // Act
        let first = sut.submit().await;
        sut.select_contact_method(ContactMethod::Phone);
        let second = sut.submit().await;

        // Assert
        assert_matches!(first, SubmitOutcome::Invalid(_));
        assert_matches!(second, SubmitOutcome::Sent);
    }

    #[tokio::test]
    async fn success_clears_draft() {
        // Arrange
        let api = MockContactApiService::new().with_submit(submission(), Ok(()));
        let sut = ContactForm::new(api);
        fill(&sut);

        // Act
        let outcome = sut.submit().await;

        // Assert
        assert_matches!(&outcome, SubmitOutcome::Sent);
        assert_eq!(outcome.message(), Some("Thank you for your submission!"));
        assert_eq!(
            sut.view(),
            ContactFormView {
                name: "".into(),
                contact_method: ContactMethod::Phone,
                contact_info: "".into(),
                errors: ValidationErrors::default(),
                submitting: false,
            }
        );
    }

    #[tokio::test]
    async fn failure_keeps_draft() {
        // Arrange
        let api = MockContactApiService::new().with_submit(
            submission(),
            Err(ContactApiError::Rejected {
                status: 500,
                message: Some("Failed to submit form".into()),
            }),
        );
        let sut = ContactForm::new(api);
        fill(&sut);

        // Act
        let outcome = sut.submit().await;

        // Assert
        assert_matches!(
            &outcome,
            SubmitOutcome::Failed(ContactApiError::Rejected { status: 500, .. })
        );
        assert_eq!(
            outcome.message(),
            Some("Something went wrong. Please try again.")
        );
        let view = sut.view();
        assert_eq!(view.name, "Max Mustermann");
        assert_eq!(view.contact_info, "+1 (555) 000-0000");
        assert!(!view.submitting);
    }

    #[tokio::test]
    async fn no_second_request_while_in_flight() {
        // Arrange
        let (release, released) = tokio::sync::oneshot::channel::<()>();
        let mut api = MockContactApiService::new();
        api.expect_submit().once().return_once(move |_| {
            Box::pin(async move {
                let _ = released.await;
                Ok(())
            })
        });
        let sut = ContactForm::new(api);
        fill(&sut);
        let sut = Arc::new(sut);

        let first = tokio::spawn({
            let sut = Arc::clone(&sut);
            async move { sut.submit().await }
        });
        while !sut.view().submitting {
            tokio::task::yield_now().await;
        }

        // Act
        let view = sut.view();
        let second = sut.submit().await;
        release.send(()).unwrap();
        let first = first.await.unwrap();

        // Assert
        assert_eq!(view.submit_label(), "Sending...");
        assert!(!view.submit_enabled());
        assert_matches!(second, SubmitOutcome::InProgress);
        assert_matches!(first, SubmitOutcome::Sent);
        assert!(!sut.view().submitting);
    }
}
