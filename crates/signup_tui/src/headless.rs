//! `signup submit` and `signup regions`: the same form rules without a terminal UI.

use std::io::Write;

use color_eyre::{Result, eyre::bail};
use serde_json::json;
use signup::{
    FieldKey, FormErrors, InputOutcome, REGIONS, SignupForm, Submitter,
    form::{FIRST_NAME_REQUIRED, LAST_NAME_REQUIRED},
    regions::{find_region_ignore_case, region_names},
};
use tracing::info;

use crate::{cli::SubmitArgs, config::Config};

/// Fill a form from flags, applying the interactive input rules and then full validation.
///
/// Unlike typing, a rejected name is reported instead of being silently dropped.
pub fn build_form(args: &SubmitArgs) -> Result<SignupForm, FormErrors> {
    let mut form = SignupForm::new();
    let mut rejected = FormErrors::new();

    for (field, value, message) in [
        (FieldKey::FirstName, &args.first_name, FIRST_NAME_REQUIRED),
        (FieldKey::LastName, &args.last_name, LAST_NAME_REQUIRED),
    ] {
        if form.apply_input(field, value.trim()) == InputOutcome::Rejected {
            rejected.insert(field, format!("{message} (letters and spaces only)"));
        }
    }

    match find_region_ignore_case(&args.region) {
        Some(region) => form.select_region(region.name),
        None if args.region.trim().is_empty() => {}
        None => rejected.insert(
            FieldKey::Region,
            format!(
                "Unknown region {:?}, expected one of: {}",
                args.region,
                region_names().collect::<Vec<_>>().join(", ")
            ),
        ),
    }

    form.apply_input(FieldKey::PhoneNumber, &args.phone);
    form.apply_input(FieldKey::Email, args.email.trim());

    let mut errors = match form.validate() {
        Ok(()) => FormErrors::new(),
        Err(errors) => errors,
    };
    for (field, message) in rejected.iter() {
        errors.insert(field, message);
    }

    if errors.is_empty() {
        Ok(form)
    } else {
        Err(errors)
    }
}

pub async fn submit(args: SubmitArgs, config: &Config) -> Result<()> {
    let form = match build_form(&args) {
        Ok(form) => form,
        Err(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("{}: {message}", field.label());
            }
            bail!(errors);
        }
    };

    let endpoint = args.endpoint.as_deref().unwrap_or(&config.endpoint);
    let submitter = Submitter::new(endpoint, config.request_timeout())?;
    info!(endpoint, "submitting sign-up form from the command line");

    match submitter.submit(form.values()).await {
        Ok(receipt) => {
            println!("Form submitted successfully! (HTTP {})", receipt.status);
            Ok(())
        }
        Err(err) => bail!("{}: {err}", err.summary()),
    }
}

pub fn print_regions(as_json: bool) -> Result<()> {
    let mut out = std::io::stdout().lock();
    if as_json {
        let list: Vec<_> = REGIONS
            .iter()
            .map(|r| json!({ "name": r.name, "code": r.code }))
            .collect();
        serde_json::to_writer_pretty(&mut out, &list)?;
        writeln!(out)?;
    } else {
        for region in REGIONS {
            writeln!(out, "{:<24}{}", region.name, region.code)?;
        }
    }
    Ok(())
}
