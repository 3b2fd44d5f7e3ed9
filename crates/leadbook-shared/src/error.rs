use thiserror::Error;

/// Violations of the lead intake rules.
#[derive(Error, Debug)]
pub enum LeadValidationError {
    #[error("Full name must not be empty")]
    EmptyFullName,

    #[error("Primary contact must not be empty")]
    EmptyPrimaryContact,

    #[error("Secondary contact must be at least {min} characters, got {got}")]
    SecondaryContactTooShort { min: usize, got: usize },

    #[error("Primary and secondary contact must be different")]
    ContactsIdentical,
}

/// Failures surfaced by the lead and distributor backends.
///
/// Report operations catch both variants and render them as textual
/// markers; the split only changes how the failure is logged.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backing store could not be reached or refused the query.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Anything else: malformed records, conversion failures.
    #[error("Unexpected backend error: {0}")]
    Unexpected(String),
}
