use std::path::Path;
use std::rc::Rc;

use crate::document::OpenDocument;
use crate::error::PickerError;
use crate::geometry::{PageGeometry, ScreenPoint, ScreenRect};
use crate::renderer::{DocumentSource, RenderedPage};
use crate::selection::{Selection, SelectionController};
use crate::viewport::Viewport;

/// Command surface over one open document: navigation, zoom, pointer-driven
/// selection, and the formatted forms of the committed rectangle.
///
/// Every operation runs synchronously on the caller's thread and completes
/// before the next one starts; there is nothing to lock.
pub struct RectPicker<S: DocumentSource> {
    source: S,
    document: Option<OpenDocument<S::Doc>>,
    viewport: Viewport,
    page_geometry: Option<PageGeometry>,
    selection: SelectionController,
}

impl<S: DocumentSource> RectPicker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            document: None,
            viewport: Viewport::new(0),
            page_geometry: None,
            selection: SelectionController::new(),
        }
    }

    /// Opens a document and shows its first page at 100% zoom. On failure
    /// the previously open document and its selection are left untouched.
    pub fn open_document(&mut self, path: &Path) -> Result<(), PickerError> {
        let document = match self.source.open(path) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Failed to open PDF: {}", e);
                return Err(e);
            }
        };
        let document = OpenDocument::new(path.to_path_buf(), document);
        let geometry = document.page_geometry(0)?;

        let (width, height) = self.viewport.viewport_size();
        let mut viewport = Viewport::new(document.page_count());
        viewport.set_viewport_size(width, height);

        self.viewport = viewport;
        self.document = Some(document);
        self.page_geometry = Some(geometry);
        self.selection.page_changed();
        tracing::debug!("Opened {}", path.display());
        Ok(())
    }

    pub fn document(&self) -> Option<&OpenDocument<S::Doc>> {
        self.document.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Advances to the next page; a no-op at the last page. Any selection
    /// or in-flight drag is discarded on an actual switch.
    pub fn next_page(&mut self) {
        if self.viewport.next_page() {
            self.page_switched();
        }
    }

    /// Goes back one page; a no-op at the first page.
    pub fn prev_page(&mut self) {
        if self.viewport.previous_page() {
            self.page_switched();
        }
    }

    pub fn zoom_in(&mut self) {
        if self.document.is_some() {
            self.viewport.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if self.document.is_some() {
            self.viewport.zoom_out();
        }
    }

    pub fn reset_zoom(&mut self) {
        if self.document.is_some() {
            self.viewport.reset_zoom();
        }
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport.set_viewport_size(width, height);
    }

    pub fn pointer_down(&mut self, at: ScreenPoint) {
        if self.document.is_some() && self.page_geometry.is_some() {
            self.selection.pointer_down(at);
        }
    }

    pub fn pointer_move(&mut self, at: ScreenPoint) -> Option<ScreenRect> {
        self.selection.pointer_move(at)
    }

    pub fn pointer_up(&mut self, at: ScreenPoint) -> Option<Selection> {
        let Some(geometry) = self.page_geometry else {
            // Page went away mid-drag; abandon without committing.
            if self.selection.is_dragging() {
                self.selection.clear();
            }
            return None;
        };
        let mapper = self.viewport.mapper(geometry);
        self.selection
            .pointer_up(at, mapper, geometry, self.viewport.current_page())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection.selection()
    }

    /// Registers a listener for committed-selection changes.
    pub fn subscribe(&mut self, listener: impl FnMut(Option<Selection>) + 'static) {
        self.selection.subscribe(listener);
    }

    /// Overlay rectangle for the current view: the committed selection
    /// re-projected at the current scale and centering, or the live drag
    /// preview.
    pub fn overlay_rect(&self) -> Option<ScreenRect> {
        let geometry = self.page_geometry?;
        self.selection.overlay_rect(self.viewport.mapper(geometry))
    }

    /// Raster of the current page at the current scale.
    pub fn rendered_page(&mut self) -> Option<Rc<RenderedPage>> {
        let page_index = self.viewport.current_page();
        let scale = self.viewport.scale();
        self.document.as_mut()?.rendered_page(page_index, scale)
    }

    /// Copyable text form of the committed rectangle, or `None` when there
    /// is no selection.
    pub fn copy_selection(&self) -> Option<String> {
        let selection = self.selection.selection()?;
        let r = selection.rect;
        Some(format!(
            "Rect({:.2}, {:.2}, {:.2}, {:.2})",
            r.x0, r.y0, r.x1, r.y1
        ))
    }

    /// Serialized form of the committed rectangle with a 1-based page index.
    pub fn selection_json(&self) -> Option<String> {
        let selection = self.selection.selection()?;
        let r = selection.rect;
        let value = serde_json::json!({
            "page": selection.page_index + 1,
            "rect": [r.x0, r.y0, r.x1, r.y1],
        });
        serde_json::to_string_pretty(&value).ok()
    }

    /// Readout lines for an info panel: rect and size at two decimals.
    pub fn selection_readout(&self) -> (String, String) {
        match self.selection.selection() {
            Some(selection) => {
                let r = selection.rect;
                (
                    format!("Rect: ({:.2}, {:.2}, {:.2}, {:.2})", r.x0, r.y0, r.x1, r.y1),
                    format!("Size: {:.2} x {:.2}", r.width(), r.height()),
                )
            }
            None => ("Rect: -".to_string(), "Size: -".to_string()),
        }
    }

    pub fn page_display(&self) -> String {
        match &self.document {
            Some(_) => format!(
                "Page {} of {}",
                self.viewport.current_page() + 1,
                self.viewport.page_count()
            ),
            None => "Page: -".to_string(),
        }
    }

    fn page_switched(&mut self) {
        let page_index = self.viewport.current_page();
        self.page_geometry = match &self.document {
            Some(document) => match document.page_geometry(page_index) {
                Ok(geometry) => Some(geometry),
                Err(e) => {
                    tracing::error!("Failed to read geometry of page {}: {}", page_index, e);
                    None
                }
            },
            None => None,
        };
        self.selection.page_changed();
        tracing::debug!("Switched to page {}", page_index + 1);
    }
}
