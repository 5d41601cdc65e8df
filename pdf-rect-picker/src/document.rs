use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::PickerError;
use crate::geometry::PageGeometry;
use crate::renderer::{DocumentPages, RenderedPage};

/// An open document with a bounded cache of rendered page rasters.
///
/// The cache is keyed by (page_index, zoom_percent); the mapping core never
/// caches anything itself.
pub struct OpenDocument<D: DocumentPages> {
    path: PathBuf,
    document: D,
    page_cache: HashMap<(usize, u32), Rc<RenderedPage>>,
}

impl<D: DocumentPages> std::fmt::Debug for OpenDocument<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenDocument")
            .field("path", &self.path)
            .field("page_count", &self.document.page_count())
            .finish()
    }
}

impl<D: DocumentPages> OpenDocument<D> {
    const MAX_CACHED_PAGES: usize = 10;

    pub fn new(path: PathBuf, document: D) -> Self {
        Self {
            path,
            document,
            page_cache: HashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled")
            .to_string()
    }

    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    pub fn page_geometry(&self, page_index: usize) -> Result<PageGeometry, PickerError> {
        self.document.page_geometry(page_index)
    }

    /// Raster for `page_index` at `scale`, rendered on demand. Render
    /// failures are logged and yield `None` rather than tearing down the
    /// view.
    pub fn rendered_page(&mut self, page_index: usize, scale: f32) -> Option<Rc<RenderedPage>> {
        let zoom_percent = (scale * 100.0) as u32;
        let cache_key = (page_index, zoom_percent);

        if let Some(rendered) = self.page_cache.get(&cache_key) {
            return Some(Rc::clone(rendered));
        }

        match self.document.render_page(page_index, scale) {
            Ok(rendered) => {
                let rendered = Rc::new(rendered);
                self.page_cache.insert(cache_key, Rc::clone(&rendered));

                // Bound memory; eviction order is arbitrary, which is fine
                // for a cache this small
                if self.page_cache.len() > Self::MAX_CACHED_PAGES {
                    let excess: Vec<_> = self
                        .page_cache
                        .keys()
                        .filter(|key| **key != cache_key)
                        .take(self.page_cache.len() - Self::MAX_CACHED_PAGES)
                        .cloned()
                        .collect();
                    for key in excess {
                        self.page_cache.remove(&key);
                    }
                }

                Some(rendered)
            }
            Err(e) => {
                tracing::error!("Failed to render page {}: {}", page_index, e);
                None
            }
        }
    }

    pub fn clear_cache(&mut self) {
        self.page_cache.clear();
    }
}
