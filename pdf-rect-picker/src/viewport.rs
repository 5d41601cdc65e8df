use crate::geometry::{CoordinateMapper, PageGeometry};

/// Viewport manages the current view state of a document
#[derive(Debug, Clone)]
pub struct Viewport {
    current_page: usize,
    page_count: usize,
    scale: f32,
    viewport_width: f32,
    viewport_height: f32,
}

impl Viewport {
    const MIN_SCALE: f32 = 0.2;
    const MAX_SCALE: f32 = 6.0;
    const SCALE_STEP: f32 = 1.25;
    const DEFAULT_SCALE: f32 = 1.0;

    pub fn new(page_count: usize) -> Self {
        Self {
            current_page: 0,
            page_count,
            scale: Self::DEFAULT_SCALE,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * Self::SCALE_STEP).min(Self::MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale / Self::SCALE_STEP).max(Self::MIN_SCALE);
    }

    pub fn reset_zoom(&mut self) {
        self.scale = Self::DEFAULT_SCALE;
    }

    /// Size of the scroll area's content region, in screen pixels. Updated
    /// by the embedding layer on every viewport resize.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn next_page(&mut self) -> bool {
        if self.current_page + 1 < self.page_count {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 0 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Rendered raster size in screen pixels at the current scale.
    pub fn content_size(&self, page: PageGeometry) -> (f32, f32) {
        (page.width * self.scale, page.height * self.scale)
    }

    /// Centering offset of the raster inside the content area. Zero on an
    /// axis once the raster is at least as large as the content area.
    pub fn offsets(&self, page: PageGeometry) -> (f32, f32) {
        let (content_width, content_height) = self.content_size(page);
        (
            ((self.viewport_width - content_width) / 2.0).max(0.0),
            ((self.viewport_height - content_height) / 2.0).max(0.0),
        )
    }

    /// Coordinate mapper for the current scale and centering of `page`.
    pub fn mapper(&self, page: PageGeometry) -> CoordinateMapper {
        CoordinateMapper::new(self.scale, self.offsets(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zoom_steps_are_multiplicative() {
        let mut viewport = Viewport::new(1);
        viewport.zoom_in();
        assert_eq!(viewport.scale(), 1.25);
        viewport.zoom_out();
        assert_eq!(viewport.scale(), 1.0);
    }

    #[test]
    fn repeated_zoom_in_caps_at_max() {
        let mut viewport = Viewport::new(1);
        for _ in 0..50 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.scale(), 6.0);
    }

    #[test]
    fn repeated_zoom_out_floors_at_min() {
        let mut viewport = Viewport::new(1);
        for _ in 0..50 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.scale(), 0.2);
    }

    #[test]
    fn reset_zoom_restores_default_scale() {
        let mut viewport = Viewport::new(1);
        viewport.zoom_in();
        viewport.zoom_in();
        viewport.reset_zoom();
        assert_eq!(viewport.scale(), 1.0);
    }

    #[test]
    fn navigation_stops_at_document_bounds() {
        let mut viewport = Viewport::new(2);
        assert!(!viewport.previous_page());
        assert!(viewport.next_page());
        assert!(!viewport.next_page());
        assert_eq!(viewport.current_page(), 1);
        assert!(viewport.previous_page());
        assert_eq!(viewport.current_page(), 0);
    }

    #[test]
    fn raster_is_centered_when_smaller_than_viewport() {
        let mut viewport = Viewport::new(1);
        viewport.set_viewport_size(800.0, 600.0);
        viewport.zoom_in(); // 1.25
        let page = PageGeometry::new(160.0, 160.0);
        assert_eq!(viewport.content_size(page), (200.0, 200.0));
        assert_eq!(viewport.offsets(page), (300.0, 200.0));
    }

    #[test]
    fn offset_is_zero_when_raster_fills_viewport() {
        let mut viewport = Viewport::new(1);
        viewport.set_viewport_size(100.0, 100.0);
        let page = PageGeometry::new(400.0, 50.0);
        assert_eq!(viewport.offsets(page), (0.0, 25.0));
    }
}
