//! Domain side of the sign-up form.
//!
//! Everything in here is terminal-agnostic: the region table, the two
//! pattern matchers, phone digit grouping, the flat form state and the
//! client that posts a finished form to the backend.

pub mod error;
pub mod form;
pub mod phone;
pub mod regions;
pub mod submit;
pub mod validation;

pub use error::{FormErrors, SubmitError};
pub use form::{FieldKey, InputOutcome, SignupForm};
pub use regions::{Region, REGIONS};
pub use submit::{SubmitReceipt, Submitter, DEFAULT_ENDPOINT};
