use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use pdfium_render::prelude::*;

use crate::error::PickerError;
use crate::geometry::PageGeometry;

/// A page rendered at some scale: the raster plus the page's intrinsic
/// geometry in page units.
pub struct RenderedPage {
    pub image: RgbaImage,
    pub geometry: PageGeometry,
}

/// Opens documents. An open failure must leave the caller's state untouched.
pub trait DocumentSource {
    type Doc: DocumentPages;

    fn open(&self, path: &Path) -> Result<Self::Doc, PickerError>;
}

/// Page access for one open document.
pub trait DocumentPages {
    fn page_count(&self) -> usize;

    /// Page dimensions in page units, independent of any display scale.
    fn page_geometry(&self, page_index: usize) -> Result<PageGeometry, PickerError>;

    /// Renders the page raster at `scale` times its native size.
    fn render_page(&self, page_index: usize, scale: f32) -> Result<RenderedPage, PickerError>;
}

/// PDF renderer using pdfium-render
pub struct PdfiumRenderer {
    pdfium: &'static Pdfium,
}

impl PdfiumRenderer {
    pub fn new() -> Result<Self> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .context("Failed to bind to PDFium library. Please install PDFium or download the library from https://github.com/bblanchon/pdfium-binaries")?,
        );
        // Open documents borrow the binding, so it lives for the process.
        Ok(Self {
            pdfium: Box::leak(Box::new(pdfium)),
        })
    }
}

impl DocumentSource for PdfiumRenderer {
    type Doc = PdfiumDocument;

    fn open(&self, path: &Path) -> Result<PdfiumDocument, PickerError> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .context("Failed to load PDF document")
            .map_err(|source| PickerError::DocumentOpen {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(PdfiumDocument { inner: document })
    }
}

pub struct PdfiumDocument {
    inner: PdfDocument<'static>,
}

impl PdfiumDocument {
    fn page(&self, page_index: usize) -> Result<PdfPage<'_>> {
        self.inner
            .pages()
            .get(page_index as u16)
            .context("Page index out of bounds")
    }

    fn render_page_inner(&self, page_index: usize, scale: f32) -> Result<RenderedPage> {
        let page = self.page(page_index)?;

        let width = page.width();
        let height = page.height();
        let geometry = PageGeometry::new(width.value, height.value);

        // Raster size at the requested zoom
        let render_width = (width.value * scale) as u32;
        let render_height = (height.value * scale) as u32;

        let render_config = PdfRenderConfig::new()
            .set_target_width(render_width as i32)
            .set_maximum_height(render_height as i32)
            .rotate_if_landscape(PdfPageRenderRotation::None, false);

        let bitmap = page
            .render_with_config(&render_config)
            .context("Failed to render page")?;

        let buffer = bitmap.as_raw_bytes();
        let image = RgbaImage::from_raw(
            bitmap.width() as u32,
            bitmap.height() as u32,
            buffer.to_vec(),
        )
        .context("Failed to create image from bitmap")?;

        Ok(RenderedPage { image, geometry })
    }
}

impl DocumentPages for PdfiumDocument {
    fn page_count(&self) -> usize {
        self.inner.pages().len() as usize
    }

    fn page_geometry(&self, page_index: usize) -> Result<PageGeometry, PickerError> {
        self.page(page_index)
            .map(|page| PageGeometry::new(page.width().value, page.height().value))
            .map_err(|source| PickerError::Render {
                page: page_index,
                source,
            })
    }

    fn render_page(&self, page_index: usize, scale: f32) -> Result<RenderedPage, PickerError> {
        self.render_page_inner(page_index, scale)
            .map_err(|source| PickerError::Render {
                page: page_index,
                source,
            })
    }
}
