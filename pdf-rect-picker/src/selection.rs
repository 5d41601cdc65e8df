use crate::geometry::{CoordinateMapper, PageGeometry, PageRect, ScreenPoint, ScreenRect};

/// A committed selection: a clamped page-space rectangle and the page that
/// owns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub page_index: usize,
    pub rect: PageRect,
}

/// Callback invoked whenever the committed selection changes. `None` means
/// "no selection".
pub type SelectionListener = Box<dyn FnMut(Option<Selection>)>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Dragging {
        anchor: ScreenPoint,
        current: ScreenPoint,
    },
    Committed(Selection),
}

/// Tracks a pointer-dragged rectangle and owns the committed selection.
///
/// Pointer events arrive in widget-local screen space; the committed
/// selection is stored in page space only, so zoom changes re-project it
/// without loss. While a drag is in flight nothing is stored in page space:
/// move events only refresh a screen-space preview rectangle, and the
/// drag resolves against the page bounds once, on release.
pub struct SelectionController {
    state: State,
    listeners: Vec<SelectionListener>,
}

// Manual Debug impl since listeners are opaque closures
impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener for committed-selection changes.
    pub fn subscribe(&mut self, listener: impl FnMut(Option<Selection>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn selection(&self) -> Option<Selection> {
        match self.state {
            State::Committed(selection) => Some(selection),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// Begins a drag at `at`. Any committed selection is superseded; nothing
    /// is emitted until the drag resolves.
    pub fn pointer_down(&mut self, at: ScreenPoint) {
        self.state = State::Dragging {
            anchor: at,
            current: at,
        };
    }

    /// Updates the drag-end point and returns the normalized preview
    /// rectangle for the rubber-band overlay. Screen space only; no
    /// page-space work happens until release.
    pub fn pointer_move(&mut self, at: ScreenPoint) -> Option<ScreenRect> {
        match &mut self.state {
            State::Dragging { anchor, current } => {
                *current = at;
                Some(ScreenRect::from_points(*anchor, at).normalized())
            }
            _ => None,
        }
    }

    /// Ends the drag spanning anchor to `at` and resolves it against `page`.
    ///
    /// A drag with a positive-area intersection commits and is broadcast; a
    /// degenerate one (zero-size drag, or entirely off the page) clears any
    /// prior selection and broadcasts "no selection". Not an error either
    /// way.
    pub fn pointer_up(
        &mut self,
        at: ScreenPoint,
        mapper: CoordinateMapper,
        page: PageGeometry,
        page_index: usize,
    ) -> Option<Selection> {
        let State::Dragging { anchor, .. } = self.state else {
            return self.selection();
        };
        match mapper.screen_to_page(ScreenRect::from_points(anchor, at), page) {
            Some(rect) => {
                let selection = Selection { page_index, rect };
                self.state = State::Committed(selection);
                self.notify(Some(selection));
                Some(selection)
            }
            None => {
                self.state = State::Idle;
                self.notify(None);
                None
            }
        }
    }

    /// Drops the committed selection (or abandons an in-flight drag) and
    /// broadcasts "no selection".
    pub fn clear(&mut self) {
        self.state = State::Idle;
        self.notify(None);
    }

    /// Page switches invalidate everything, mid-drag included.
    pub fn page_changed(&mut self) {
        self.clear();
    }

    /// Screen rectangle of the current overlay under the given view: the
    /// committed rect re-projected, or the live drag preview. The committed
    /// page rect itself never changes here; zoom is lossless re-projection.
    pub fn overlay_rect(&self, mapper: CoordinateMapper) -> Option<ScreenRect> {
        match self.state {
            State::Idle => None,
            State::Dragging { anchor, current } => {
                Some(ScreenRect::from_points(anchor, current).normalized())
            }
            State::Committed(selection) => Some(mapper.page_to_screen(selection.rect)),
        }
    }

    fn notify(&mut self, selection: Option<Selection>) {
        for listener in &mut self.listeners {
            listener(selection);
        }
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}
