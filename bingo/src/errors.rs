/// The error type for [`import_labels`](crate::import_labels), i.e. for
/// loading a card from a share link.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImportError {
    /// The payload is not valid JSON at all.
    MalformedPayload,
    /// The payload parsed, but is not an array of strings.
    InvalidShape,
}

impl std::error::Error for ImportError {}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::MalformedPayload => write!(f, "The link you pasted has bad data"),
            ImportError::InvalidShape => write!(f, "Failed to load cards from your link"),
        }
    }
}
