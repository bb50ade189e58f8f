use thiserror::Error;

/// Errors raised at the inquiry boundary.
///
/// Thread reconstruction itself never fails; these only come from normalizing
/// raw API records and from authoring new separators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InquiryError {
    /// A field the record cannot exist without was absent or null.
    #[error("inquiry is missing required field `{0}`")]
    MissingField(&'static str),

    /// A date field was present but not in a recognised format.
    #[error("inquiry field `{field}` is not a valid date: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    /// Appending an empty (or whitespace-only) message to a blob.
    #[error("message text is empty")]
    EmptyMessage,
}
