//! Flat form-field state.
//!
//! `SignupForm` owns the six submitted values plus the per-field error
//! strings. Change events go through [`SignupForm::apply_input`], which is
//! where name filtering and phone grouping happen; [`SignupForm::validate`]
//! runs the required/format checks right before submission.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};

use crate::{
    error::FormErrors,
    phone::{digit_count, format_phone},
    regions::region_code,
    validation::{is_valid_email, is_valid_name},
};

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const REGION_REQUIRED: &str = "Region is required";
pub const PHONE_INVALID: &str = "Phone number must be 10 digits";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email address";

/// Editable fields, in display order. The region code is derived and has no key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    AsRefStr,
    EnumIter,
    Serialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    FirstName,
    LastName,
    Region,
    PhoneNumber,
    Email,
}

impl FieldKey {
    pub fn label(self) -> &'static str {
        match self {
            FieldKey::FirstName => "First Name",
            FieldKey::LastName => "Last Name",
            FieldKey::Region => "Region",
            FieldKey::PhoneNumber => "Phone Number",
            FieldKey::Email => "Email",
        }
    }
}

/// Result of a single change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Accepted,
    /// The value was refused and the previous one kept.
    Rejected,
}

/// The JSON body posted to the backend.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupValues {
    pub first_name: String,
    pub last_name: String,
    pub region: String,
    pub region_code: String,
    pub phone_number: String,
    pub email: String,
}

#[derive(Debug, Default, Clone)]
pub struct SignupForm {
    values: SignupValues,
    errors: FormErrors,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &SignupValues {
        &self.values
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, field: FieldKey) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn value(&self, field: FieldKey) -> &str {
        match field {
            FieldKey::FirstName => &self.values.first_name,
            FieldKey::LastName => &self.values.last_name,
            FieldKey::Region => &self.values.region,
            FieldKey::PhoneNumber => &self.values.phone_number,
            FieldKey::Email => &self.values.email,
        }
    }

    pub fn region_code(&self) -> &str {
        &self.values.region_code
    }

    /// Handle a change event for `field`.
    ///
    /// Names only take letters and spaces (an empty value is always allowed so
    /// the field can be cleared). Phone input is regrouped. An accepted text
    /// change clears that field's error; a region change does not.
    pub fn apply_input(&mut self, field: FieldKey, value: &str) -> InputOutcome {
        match field {
            FieldKey::FirstName | FieldKey::LastName => {
                if !value.is_empty() && !is_valid_name(value) {
                    return InputOutcome::Rejected;
                }
                let slot = if field == FieldKey::FirstName {
                    &mut self.values.first_name
                } else {
                    &mut self.values.last_name
                };
                *slot = value.to_string();
            }
            FieldKey::PhoneNumber => self.values.phone_number = format_phone(value),
            FieldKey::Email => self.values.email = value.to_string(),
            FieldKey::Region => {
                self.select_region(value);
                return InputOutcome::Accepted;
            }
        }
        self.errors.clear_field(field);
        InputOutcome::Accepted
    }

    /// Set the region and derive its dial code. Unknown names leave the code empty.
    ///
    /// A pending "Region is required" message stays until the next `validate`.
    pub fn select_region(&mut self, name: &str) {
        self.values.region = name.to_string();
        self.values.region_code = region_code(name).unwrap_or_default().to_string();
    }

    /// Run every field check and replace the stored errors with the result.
    pub fn validate(&mut self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        let v = &self.values;

        if v.first_name.is_empty() {
            errors.insert(FieldKey::FirstName, FIRST_NAME_REQUIRED);
        }
        if v.last_name.is_empty() {
            errors.insert(FieldKey::LastName, LAST_NAME_REQUIRED);
        }
        if v.region.is_empty() {
            errors.insert(FieldKey::Region, REGION_REQUIRED);
        }
        if v.phone_number.is_empty() || digit_count(&v.phone_number) > 10 {
            errors.insert(FieldKey::PhoneNumber, PHONE_INVALID);
        }
        if v.email.is_empty() {
            errors.insert(FieldKey::Email, EMAIL_REQUIRED);
        } else if !is_valid_email(&v.email) {
            errors.insert(FieldKey::Email, EMAIL_INVALID);
        }

        self.errors = errors.clone();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use strum::IntoEnumIterator;

    fn filled() -> SignupForm {
        let mut form = SignupForm::new();
        form.apply_input(FieldKey::FirstName, "Ada");
        form.apply_input(FieldKey::LastName, "Lovelace");
        form.select_region("United Kingdom");
        form.apply_input(FieldKey::PhoneNumber, "2071234567");
        form.apply_input(FieldKey::Email, "ada@example.com");
        form
    }

    #[test]
    fn field_keys_use_wire_names() {
        let names: Vec<String> = FieldKey::iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            ["firstName", "lastName", "region", "phoneNumber", "email"]
        );
    }

    #[test]
    fn names_refuse_non_letters_and_keep_previous_value() {
        let mut form = SignupForm::new();
        assert_eq!(
            form.apply_input(FieldKey::FirstName, "Ada"),
            InputOutcome::Accepted
        );
        assert_eq!(
            form.apply_input(FieldKey::FirstName, "Ada1"),
            InputOutcome::Rejected
        );
        assert_eq!(form.value(FieldKey::FirstName), "Ada");

        // clearing is always allowed
        assert_eq!(
            form.apply_input(FieldKey::FirstName, ""),
            InputOutcome::Accepted
        );
        assert_eq!(form.value(FieldKey::FirstName), "");
    }

    #[test]
    fn phone_input_is_grouped_on_change() {
        let mut form = SignupForm::new();
        form.apply_input(FieldKey::PhoneNumber, "(555) 123-4567");
        assert_eq!(form.value(FieldKey::PhoneNumber), "555-123-4567");
    }

    #[test]
    fn region_selection_derives_code() {
        let mut form = SignupForm::new();
        form.select_region("India");
        assert_eq!(form.value(FieldKey::Region), "India");
        assert_eq!(form.region_code(), "+91");

        form.apply_input(FieldKey::Region, "Nowhere");
        assert_eq!(form.value(FieldKey::Region), "Nowhere");
        assert_eq!(form.region_code(), "");
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let mut form = SignupForm::new();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(FieldKey::FirstName), Some(FIRST_NAME_REQUIRED));
        assert_eq!(errors.get(FieldKey::LastName), Some(LAST_NAME_REQUIRED));
        assert_eq!(errors.get(FieldKey::Region), Some(REGION_REQUIRED));
        assert_eq!(errors.get(FieldKey::PhoneNumber), Some(PHONE_INVALID));
        assert_eq!(errors.get(FieldKey::Email), Some(EMAIL_REQUIRED));
        assert_eq!(form.errors(), &errors);
    }

    #[test]
    fn malformed_email_and_long_phone_are_flagged() {
        let mut form = filled();
        form.apply_input(FieldKey::Email, "ada@example");
        form.apply_input(FieldKey::PhoneNumber, "20712345678");

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(FieldKey::Email), Some(EMAIL_INVALID));
        assert_eq!(errors.get(FieldKey::PhoneNumber), Some(PHONE_INVALID));
    }

    #[test]
    fn short_phone_numbers_pass() {
        let mut form = filled();
        form.apply_input(FieldKey::PhoneNumber, "12345");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = SignupForm::new();
        let _ = form.validate();
        form.apply_input(FieldKey::Email, "a");
        assert_eq!(form.error(FieldKey::Email), None);
        assert_eq!(form.error(FieldKey::FirstName), Some(FIRST_NAME_REQUIRED));

        form.select_region("Japan");
        assert_eq!(form.error(FieldKey::Region), Some(REGION_REQUIRED));
    }

    #[test]
    fn region_error_survives_selection_until_revalidated() {
        let mut form = SignupForm::new();
        let _ = form.validate();
        form.select_region("India");
        assert_eq!(form.error(FieldKey::Region), Some(REGION_REQUIRED));
        assert_eq!(form.region_code(), "+91");

        let _ = form.validate();
        assert_eq!(form.error(FieldKey::Region), None);
    }

    #[test]
    fn rejected_input_keeps_the_error() {
        let mut form = SignupForm::new();
        let _ = form.validate();
        form.apply_input(FieldKey::LastName, "42");
        assert_eq!(form.error(FieldKey::LastName), Some(LAST_NAME_REQUIRED));
    }

    #[test]
    fn valid_form_clears_previous_errors() {
        let mut form = SignupForm::new();
        let _ = form.validate();
        let mut form = SignupForm { values: filled().values, ..form };
        assert!(form.validate().is_ok());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn serialises_to_the_six_camel_case_keys() {
        let form = filled();
        let body = serde_json::to_value(form.values()).unwrap();
        assert_eq!(
            body,
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "region": "United Kingdom",
                "regionCode": "+44",
                "phoneNumber": "207-123-4567",
                "email": "ada@example.com",
            })
        );
    }

    #[test]
    fn reset_empties_values_and_errors() {
        let mut form = filled();
        form.apply_input(FieldKey::Email, "bad");
        let _ = form.validate();
        form.reset();
        assert_eq!(form.values(), &SignupValues::default());
        assert!(form.errors().is_empty());
    }
}
