use crate::attribute::Attribute;

/// Alias for `Result<T, ContentError>`.
pub type ContentResult<T> = Result<T, ContentError>;

/// Malformed story content, detected while the character graph is assembled.
///
/// Every variant carries a path such as `Nora > scenario 3 > response 2`
/// locating the defect in the authored data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// A required text field is empty.
    #[error("{path}: required field `{field}` is empty")]
    EmptyField {
        /// Location of the defect.
        path: String,
        /// The empty field.
        field: &'static str,
    },

    /// A scenario has no responses, so the player could never leave it.
    #[error("{path}: scenario has no responses")]
    NoResponses {
        /// Location of the defect.
        path: String,
    },

    /// A starting attribute value lies outside 0..=100.
    #[error("{path}: starting {attribute} {value} is outside 0..=100")]
    StartOutOfRange {
        /// Location of the defect.
        path: String,
        /// The offending attribute.
        attribute: Attribute,
        /// The authored value.
        value: i32,
    },

    /// The character's overwhelm threshold lies outside 0..=100.
    #[error("{path}: overwhelm threshold {value} is outside 0..=100")]
    ThresholdOutOfRange {
        /// Location of the defect.
        path: String,
        /// The authored value.
        value: i32,
    },
}
