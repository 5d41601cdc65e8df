use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the embedding layer.
///
/// Degenerate selections and out-of-range navigation are policy outcomes,
/// not errors, and never appear here: a zero-area drag resolves to "no
/// selection" and navigating past either end of the document is a no-op.
#[derive(Debug, Error)]
pub enum PickerError {
    /// The document source could not open the file. The previously loaded
    /// document, if any, is left untouched.
    #[error("failed to open document {}: {source}", path.display())]
    DocumentOpen {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// A page could not be rendered or measured.
    #[error("failed to render page {page}: {source}")]
    Render {
        page: usize,
        #[source]
        source: anyhow::Error,
    },
}
