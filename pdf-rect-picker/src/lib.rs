//! Rectangular region selection on rendered PDF pages.
//!
//! Maps between the on-screen raster (zoom scale, centering offset,
//! viewport size) and a page's fixed coordinate system (origin top-left,
//! units independent of zoom), and tracks a pointer-dragged selection
//! rectangle across zoom and page changes. Windowing, scrolling and the
//! concrete rendering engine stay behind the [`DocumentSource`] /
//! [`DocumentPages`] traits; a pdfium-backed implementation is provided.

pub mod app;
pub mod document;
pub mod error;
pub mod geometry;
pub mod renderer;
pub mod selection;
pub mod viewport;

pub use app::RectPicker;
pub use document::OpenDocument;
pub use error::PickerError;
pub use geometry::{CoordinateMapper, PageGeometry, PageRect, ScreenPoint, ScreenRect};
pub use renderer::{DocumentPages, DocumentSource, PdfiumDocument, PdfiumRenderer, RenderedPage};
pub use selection::{Selection, SelectionController, SelectionListener};
pub use viewport::Viewport;
