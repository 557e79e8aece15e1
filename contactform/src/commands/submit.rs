use anyhow::{bail, Context};
use clap::Args;
use contactform_config::Config;
use contactform_form::{SubmitOutcome, FAILURE_MESSAGE, SUCCESS_MESSAGE};
use contactform_models::contact::ContactMethod;
use url::Url;

use super::form::config_provider;

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Your name
    #[arg(long)]
    name: String,
    /// Preferred contact method
    #[arg(long, short, default_value = "email")]
    method: ContactMethod,
    /// Email address or phone number, depending on the contact method
    #[arg(long, short)]
    contact_info: String,
    /// Submit to this endpoint instead of the configured one
    #[arg(long)]
    endpoint: Option<Url>,
}

pub async fn submit(config: Config, args: SubmitArgs) -> anyhow::Result<()> {
    let form = config_provider(&config, args.endpoint).contact_form()?;
    form.set_name(args.name);
    form.select_contact_method(args.method);
    form.set_contact_info(args.contact_info);

    let outcome = form.submit().await;
    match outcome {
        SubmitOutcome::Sent => {
            println!("{SUCCESS_MESSAGE}");
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            for (field, error) in errors.iter() {
                eprintln!("{}: {error}", field.as_str());
            }
            bail!("Invalid form submission")
        }
        SubmitOutcome::Failed(err) => {
            eprintln!("{FAILURE_MESSAGE}");
            Err(err).context("Failed to submit contact form")
        }
        SubmitOutcome::InProgress => unreachable!(),
    }
}
