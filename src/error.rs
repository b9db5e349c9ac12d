//! Error types for rendering.

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a render.
///
/// A field that matches no node is not an error, and neither is a null or empty
/// (sub)model. Only configurations the binder cannot honour end up here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A collection with items was bound to a container that has nothing to clone.
    #[error("Collection field '{field}' is bound to {container}, which has no child to use as a template")]
    EmptyContainer { field: String, container: String },

    /// A `serde::Serialize` model could not be turned into a reflected value.
    #[error("Failed to reflect model: {0}")]
    Model(#[source] serde_json::Error),

    /// Render options JSON did not parse.
    #[error("Invalid render options: {0}")]
    Options(#[source] serde_json::Error),

    /// Writing the serialized document failed.
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] std::io::Error),
}

impl Error {
    /// Create an empty-container error.
    pub fn empty_container(field: impl Into<String>, container: impl Into<String>) -> Self {
        Self::EmptyContainer {
            field: field.into(),
            container: container.into(),
        }
    }
}
