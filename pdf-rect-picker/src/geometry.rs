/// A point in widget-local screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in widget-local screen pixels.
///
/// A raw drag rectangle is not necessarily normalized; the user may drag
/// up-left, leaving `x1 < x0` or `y1 < y0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl ScreenRect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn from_points(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Reorders the corners so width and height are non-negative.
    pub fn normalized(self) -> Self {
        Self {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// Dimensions of a loaded page in page units (origin top-left, y down).
/// Replaced wholesale whenever the active page changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
}

impl PageGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in page units.
///
/// Invariant: `x0 <= x1`, `y0 <= y1`, positive area, and fully contained in
/// the owning page's bounds. Values that cannot satisfy this never become a
/// `PageRect`; [`CoordinateMapper::screen_to_page`] returns `None` instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl PageRect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// Converts between screen space and page space for one view configuration.
///
/// Pure value type: `scale` is the zoom factor applied to the page raster,
/// `offset` the centering offset of the raster inside the content area.
/// Holds no other state and is cheap to rebuild after every view change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl CoordinateMapper {
    pub fn new(scale: f32, offset: (f32, f32)) -> Self {
        Self {
            scale,
            offset_x: offset.0,
            offset_y: offset.1,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Maps a raw drag rectangle into page units.
    ///
    /// Undoes the centering offset and zoom, normalizes the corners, then
    /// intersects edge by edge with the page bounds. Returns `None` when the
    /// clamped rectangle has no area: a zero-size drag, or a drag entirely
    /// off the page. The degeneracy check is exact, not epsilon-based, so
    /// sub-pixel selections survive.
    pub fn screen_to_page(&self, rect: ScreenRect, page: PageGeometry) -> Option<PageRect> {
        let x0 = (rect.x0 - self.offset_x) / self.scale;
        let y0 = (rect.y0 - self.offset_y) / self.scale;
        let x1 = (rect.x1 - self.offset_x) / self.scale;
        let y1 = (rect.y1 - self.offset_y) / self.scale;

        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };

        let clamped = PageRect::new(
            x0.max(0.0),
            y0.max(0.0),
            x1.min(page.width),
            y1.min(page.height),
        );
        if clamped.width() <= 0.0 || clamped.height() <= 0.0 {
            return None;
        }
        Some(clamped)
    }

    /// Projects a page rectangle back into screen space for the current view.
    ///
    /// No clamping: by invariant the input is already within page bounds,
    /// and the result may legitimately extend past the visible scroll
    /// region. Scrolling is the caller's concern.
    pub fn page_to_screen(&self, rect: PageRect) -> ScreenRect {
        ScreenRect::new(
            rect.x0 * self.scale + self.offset_x,
            rect.y0 * self.scale + self.offset_y,
            rect.x1 * self.scale + self.offset_x,
            rect.y1 * self.scale + self.offset_y,
        )
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const PAGE: PageGeometry = PageGeometry {
        width: 100.0,
        height: 100.0,
    };

    #[test]
    fn maps_drag_into_page_units() {
        let mapper = CoordinateMapper::new(2.0, (0.0, 0.0));
        let rect = mapper
            .screen_to_page(ScreenRect::new(20.0, 20.0, 80.0, 80.0), PAGE)
            .unwrap();
        assert_eq!(rect, PageRect::new(10.0, 10.0, 40.0, 40.0));
    }

    #[test]
    fn clamps_drag_spilling_past_the_origin() {
        let mapper = CoordinateMapper::new(2.0, (0.0, 0.0));
        let rect = mapper
            .screen_to_page(ScreenRect::new(-10.0, -10.0, 30.0, 30.0), PAGE)
            .unwrap();
        assert_eq!(rect, PageRect::new(0.0, 0.0, 15.0, 15.0));
    }

    #[test]
    fn normalizes_reverse_drags() {
        let mapper = CoordinateMapper::new(2.0, (0.0, 0.0));
        let rect = mapper
            .screen_to_page(ScreenRect::new(80.0, 80.0, 20.0, 20.0), PAGE)
            .unwrap();
        assert_eq!(rect, PageRect::new(10.0, 10.0, 40.0, 40.0));
    }

    #[test]
    fn undoes_centering_offset() {
        let mapper = CoordinateMapper::new(1.0, (150.0, 150.0));
        let rect = mapper
            .screen_to_page(ScreenRect::new(150.0, 150.0, 250.0, 250.0), PAGE)
            .unwrap();
        assert_eq!(rect, PageRect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn zero_area_drag_yields_no_selection() {
        let mapper = CoordinateMapper::new(2.0, (0.0, 0.0));
        assert_eq!(
            mapper.screen_to_page(ScreenRect::new(40.0, 40.0, 40.0, 40.0), PAGE),
            None
        );
        assert_eq!(
            mapper.screen_to_page(ScreenRect::new(10.0, 40.0, 90.0, 40.0), PAGE),
            None
        );
    }

    #[test]
    fn drag_entirely_off_the_page_yields_no_selection() {
        let mapper = CoordinateMapper::new(2.0, (0.0, 0.0));
        assert_eq!(
            mapper.screen_to_page(ScreenRect::new(250.0, 250.0, 300.0, 300.0), PAGE),
            None
        );
        assert_eq!(
            mapper.screen_to_page(ScreenRect::new(-60.0, -60.0, -10.0, -10.0), PAGE),
            None
        );
    }

    #[test]
    fn sub_pixel_selection_is_preserved() {
        let mapper = CoordinateMapper::new(1.0, (0.0, 0.0));
        let rect = mapper
            .screen_to_page(ScreenRect::new(10.0, 10.0, 10.25, 50.0), PAGE)
            .unwrap();
        assert!(rect.width() > 0.0 && rect.width() < 1.0);
    }

    #[test]
    fn clamping_in_bounds_rect_is_identity() {
        let mapper = CoordinateMapper::new(1.0, (0.0, 0.0));
        let rect = mapper
            .screen_to_page(ScreenRect::new(10.0, 20.0, 60.0, 70.0), PAGE)
            .unwrap();
        assert_eq!(rect, PageRect::new(10.0, 20.0, 60.0, 70.0));
    }

    #[test]
    fn projects_page_rect_to_screen() {
        let mapper = CoordinateMapper::new(1.25, (40.0, 10.0));
        let rect = mapper.page_to_screen(PageRect::new(10.0, 10.0, 50.0, 50.0));
        assert_eq!(rect, ScreenRect::new(52.5, 22.5, 102.5, 72.5));
    }

    proptest! {
        #[test]
        fn screen_page_round_trip(
            page_w in 50.0f32..2000.0,
            page_h in 50.0f32..2000.0,
            fx in 0.0f32..1.0,
            fy in 0.0f32..1.0,
            fw in 0.05f32..1.0,
            fh in 0.05f32..1.0,
            scale in 0.2f32..6.0,
            off_x in 0.0f32..400.0,
            off_y in 0.0f32..400.0,
        ) {
            let x0 = fx * (page_w - 1.0);
            let y0 = fy * (page_h - 1.0);
            let x1 = (x0 + fw * (page_w - x0)).min(page_w);
            let y1 = (y0 + fh * (page_h - y0)).min(page_h);
            prop_assume!(x1 - x0 > 0.5 && y1 - y0 > 0.5);

            let page = PageGeometry::new(page_w, page_h);
            let rect = PageRect::new(x0, y0, x1, y1);
            let mapper = CoordinateMapper::new(scale, (off_x, off_y));

            let back = mapper
                .screen_to_page(mapper.page_to_screen(rect), page)
                .expect("in-bounds rect must survive the round trip");
            prop_assert!((back.x0 - rect.x0).abs() < 0.05);
            prop_assert!((back.y0 - rect.y0).abs() < 0.05);
            prop_assert!((back.x1 - rect.x1).abs() < 0.05);
            prop_assert!((back.y1 - rect.y1).abs() < 0.05);
        }
    }
}
