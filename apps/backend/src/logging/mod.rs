//! Log hygiene helpers.

pub mod redact;

pub use redact::Redacted;
