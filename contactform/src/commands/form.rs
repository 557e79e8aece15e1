use std::io::Write;

use anyhow::Context;
use contactform_config::Config;
use contactform_extern_contracts::ContactApiService;
use contactform_form::{ContactForm, SubmitOutcome};
use contactform_models::contact::{ContactMethod, FormField, ValidationErrors, CONTACT_METHODS};
use contactform_utils::Apply;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use url::Url;

use crate::environment::ConfigProvider;

pub async fn form(config: Config, endpoint: Option<Url>) -> anyhow::Result<()> {
    let form = config_provider(&config, endpoint).contact_form()?;
    run(
        &form,
        BufReader::new(tokio::io::stdin()),
        &mut std::io::stdout(),
    )
    .await
}

pub(crate) fn config_provider(config: &Config, endpoint: Option<Url>) -> ConfigProvider {
    ConfigProvider::new(config).apply_map(endpoint, ConfigProvider::with_endpoint)
}

/// Drive `form` from line based `input` until a submission was accepted, the
/// user gives up after a failed attempt or the input ends.
///
/// An empty line keeps the current value of a field.
pub async fn run<Api>(
    form: &ContactForm<Api>,
    input: impl AsyncBufRead + Unpin,
    output: &mut impl Write,
) -> anyhow::Result<()>
where
    Api: ContactApiService,
{
    let mut lines = input.lines();

    loop {
        if !fill(form, &mut lines, output).await? {
            return Ok(());
        }

        let submit = form.submit();
        tokio::pin!(submit);
        let outcome = tokio::select! {
            biased;
            outcome = &mut submit => outcome,
            () = std::future::ready(()) => {
                // the request is in flight
                writeln!(output, "{}", form.view().submit_label())?;
                submit.await
            }
        };
        if let Some(message) = outcome.message() {
            writeln!(output, "{message}")?;
        }

        match outcome {
            SubmitOutcome::Sent => return Ok(()),
            SubmitOutcome::Invalid(errors) => print_errors(form, &errors, output)?,
            SubmitOutcome::InProgress => {}
            SubmitOutcome::Failed(err) => {
                let retry = prompt(&mut lines, output, "Try again? [Y/n]", "", "")
                    .await?
                    .is_some_and(|answer| !answer.trim().eq_ignore_ascii_case("n"));
                if !retry {
                    return Err(err).context("Failed to submit contact form");
                }
            }
        }
    }
}

/// Ask for every field of the form. Returns `false` if the input ended.
async fn fill<Api, R>(
    form: &ContactForm<Api>,
    lines: &mut Lines<R>,
    output: &mut impl Write,
) -> anyhow::Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    let view = form.view();
    let Some(name) = prompt(lines, output, "Name", &view.name, "Your name").await? else {
        return Ok(false);
    };
    form.set_name(name);

    writeln!(output, "Preferred Contact Method")?;
    for (n, definition) in CONTACT_METHODS.iter().enumerate() {
        writeln!(output, "  {}) {}", n + 1, definition.label)?;
    }
    loop {
        let current = form.view().contact_method.id();
        let Some(input) = prompt(lines, output, "Contact method", current, "").await? else {
            return Ok(false);
        };
        match select_contact_method(form, input.trim()) {
            Ok(_) => break,
            Err(err) => writeln!(output, "  {err}")?,
        }
    }

    let view = form.view();
    let definition = view.contact_method_definition();
    let Some(contact_info) = prompt(
        lines,
        output,
        &view.contact_info_label(),
        &view.contact_info,
        definition.placeholder,
    )
    .await?
    else {
        return Ok(false);
    };
    form.set_contact_info(contact_info);

    Ok(true)
}

/// Accepts either the position in the list or the id of a contact method.
fn select_contact_method<Api>(
    form: &ContactForm<Api>,
    input: &str,
) -> anyhow::Result<ContactMethod> {
    let by_position = input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|n| ContactMethod::ALL.get(n).copied());

    match by_position {
        Some(method) => {
            form.select_contact_method(method);
            Ok(method)
        }
        None => Ok(form.select_contact_method_by_id(&input.to_lowercase())?),
    }
}

fn print_errors<Api>(
    form: &ContactForm<Api>,
    errors: &ValidationErrors,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    let view = form.view();
    for (field, error) in errors.iter() {
        let label = match field {
            FormField::Name => "Name".into(),
            FormField::ContactInfo => view.contact_info_label(),
        };
        writeln!(output, "  {label}: {error}")?;
    }
    Ok(())
}

async fn prompt<R>(
    lines: &mut Lines<R>,
    output: &mut impl Write,
    label: &str,
    current: &str,
    placeholder: &str,
) -> anyhow::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    if !current.is_empty() {
        write!(output, "{label} [{current}]: ")?;
    } else if !placeholder.is_empty() {
        write!(output, "{label} ({placeholder}): ")?;
    } else {
        write!(output, "{label}: ")?;
    }
    output.flush()?;

    let Some(line) = lines.next_line().await? else {
        return Ok(None);
    };
    Ok(Some(if line.is_empty() { current.into() } else { line }))
}

#[cfg(test)]
mod tests {
    use contactform_extern_contracts::{ContactApiError, MockContactApiService};
    use contactform_models::contact::ContactSubmission;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn drive(
        form: &ContactForm<MockContactApiService>,
        input: &str,
    ) -> (anyhow::Result<()>, String) {
        let mut output = Vec::new();
        let result = run(form, input.as_bytes(), &mut output).await;
        (result, String::from_utf8(output).unwrap())
    }

    fn phone_submission() -> ContactSubmission {
        ContactSubmission {
            name: "Max Mustermann".into(),
            contact_method: ContactMethod::Phone,
            contact_info: "+1 (555) 000-0000".into(),
        }
    }

    #[tokio::test]
    async fn submit() {
        // Arrange
        let api = MockContactApiService::new().with_submit(phone_submission(), Ok(()));
        let form = ContactForm::new(api);

        // Act
        let (result, output) = drive(&form, "Max Mustermann\n2\n+1 (555) 000-0000\n").await;

        // Assert
        result.unwrap();
        assert!(output.contains("Phone Information (+1 (555) 000-0000): "));
        assert!(output.ends_with("Thank you for your submission!\n"));
        assert!(!output.contains("Sending..."));
        assert_eq!(form.view().name, "");
    }

    #[tokio::test]
    async fn shows_sending_while_in_flight() {
        // Arrange
        let mut api = MockContactApiService::new();
        api.expect_submit()
            .once()
            .with(mockall::predicate::eq(phone_submission()))
            .return_once(|_| {
                Box::pin(async {
                    tokio::task::yield_now().await;
                    Ok(())
                })
            });
        let form = ContactForm::new(api);

        // Act
        let (result, output) = drive(&form, "Max Mustermann
2
+1 (555) 000-0000
").await;

        // Assert
        result.unwrap();
        assert!(output.ends_with("Sending...\nThank you for your submission!\n"));
        assert_eq!(form.view().submit_label(), "Send Message");
    }

    #[tokio::test]
    async fn invalid_then_corrected() {
        // Arrange
        let api = MockContactApiService::new().with_submit(
            ContactSubmission {
                name: "Max".into(),
                contact_method: ContactMethod::Email,
                contact_info: "a@b.com".into(),
            },
            Ok(()),
        );
        let form = ContactForm::new(api);

        // Act
        let (result, output) = drive(&form, "  \n\nnotanemail\nMax\nemail\na@b.com\n").await;

        // Assert
        result.unwrap();
        assert!(output.contains("  Name: Name is required\n"));
        assert!(output.contains("  Email Information: Please enter a valid email\n"));
        assert!(output.contains("Email Information [notanemail]: "));
        assert!(output.ends_with("Thank you for your submission!\n"));
    }

    #[tokio::test]
    async fn unknown_contact_method() {
        // Arrange
        let api = MockContactApiService::new().with_submit(
            ContactSubmission {
                contact_method: ContactMethod::Whatsapp,
                ..phone_submission()
            },
            Ok(()),
        );
        let form = ContactForm::new(api);

        // Act
        let (result, output) = drive(
            &form,
            "Max Mustermann\npigeon\n7\nWhatsApp\n+1 (555) 000-0000\n",
        )
        .await;

        // Assert
        result.unwrap();
        assert!(output.contains("Unknown contact method: \"pigeon\""));
        assert!(output.contains("WhatsApp Information"));
    }

    #[tokio::test]
    async fn failure_keeps_values() {
        // Arrange
        let api = MockContactApiService::new().with_submit(
            phone_submission(),
            Err(ContactApiError::Rejected {
                status: 500,
                message: Some("Failed to submit form".into()),
            }),
        );
        let form = ContactForm::new(api);

        // Act
        let (result, output) =
            drive(&form, "Max Mustermann\nphone\n+1 (555) 000-0000\nn\n").await;

        // Assert
        assert!(result.is_err());
        assert!(output.contains("Something went wrong. Please try again.\n"));
        let view = form.view();
        assert_eq!(view.name, "Max Mustermann");
        assert_eq!(view.contact_method, ContactMethod::Phone);
        assert_eq!(view.contact_info, "+1 (555) 000-0000");
    }

    #[tokio::test]
    async fn retry_after_failure() {
        // Arrange
        let mut api = MockContactApiService::new();
        let mut seq = mockall::Sequence::new();
        api.expect_submit()
            .once()
            .in_sequence(&mut seq)
            .return_once(|_| {
                let err = ContactApiError::Other(anyhow::anyhow!("connection refused"));
                Box::pin(std::future::ready(Err(err)))
            });
        api.expect_submit()
            .once()
            .in_sequence(&mut seq)
            .with(mockall::predicate::eq(phone_submission()))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        let form = ContactForm::new(api);

        // Act
        let (result, output) = drive(
            &form,
            "Max Mustermann\nphone\n+1 (555) 000-0000\n\n\n\n\n",
        )
        .await;

        // Assert
        result.unwrap();
        assert!(output.contains("Name [Max Mustermann]: "));
        assert!(output.ends_with("Thank you for your submission!\n"));
    }

    #[tokio::test]
    async fn input_ends() {
        let form = ContactForm::new(MockContactApiService::new());

        let (result, output) = drive(&form, "Max\n").await;

        result.unwrap();
        assert!(output.ends_with("Contact method [email]: "));
        assert_eq!(form.view().name, "Max");
    }
}
