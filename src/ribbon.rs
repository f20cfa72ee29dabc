//! Rubber-band gesture tracking for marquee selection and figure creation.

use kurbo::{Point, Rect};

/// What the ribbon preview should look like while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RibbonMode {
    /// Draw nothing.
    None,
    /// Dotted rectangle, the marquee-selection preview.
    #[default]
    DotRectangle,
    /// Solid rectangle, the new-polygon preview.
    SolidRectangle,
    /// Solid line between the raw endpoints, the new-polyline preview.
    SolidLine,
}

/// Tracks a press-drag-release gesture, normalizing the two corner points
/// into a non-negative-size rectangle regardless of drag direction. In line
/// mode the two raw endpoints are tracked instead.
#[derive(Debug, Clone, Default)]
pub struct RibbonSelector {
    mode: RibbonMode,
    disabled: bool,
    origin: Point,
    /// Normalized drag rectangle; `None` until the pointer actually moves.
    rect: Option<Rect>,
    endpoints: (Point, Point),
}

impl RibbonSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> RibbonMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RibbonMode) {
        self.mode = mode;
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Disable while a figure drag is in progress; marquee and figure-drag
    /// are mutually exclusive. Disabling discards any gesture in flight.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        self.mode = if disabled {
            RibbonMode::None
        } else {
            RibbonMode::DotRectangle
        };
        self.rect = None;
    }

    /// Begin a gesture at `point`.
    pub fn press(&mut self, point: Point) {
        if self.disabled {
            return;
        }
        self.origin = point;
        self.endpoints = (point, point);
        self.rect = None;
    }

    /// Update the gesture with the current pointer position.
    pub fn drag(&mut self, point: Point) {
        if self.disabled {
            return;
        }
        self.rect = Some(Rect::new(
            self.origin.x.min(point.x),
            self.origin.y.min(point.y),
            self.origin.x.max(point.x),
            self.origin.y.max(point.y),
        ));
        self.endpoints = (self.origin, point);
    }

    /// Finish the gesture, yielding the final rectangle if the pointer
    /// moved at all.
    pub fn release(&mut self) -> Option<Rect> {
        let completed = self.rect.take();
        self.endpoints = (Point::ZERO, Point::ZERO);
        if self.disabled { None } else { completed }
    }

    /// Rectangle to paint while the gesture is live.
    pub fn preview_rect(&self) -> Option<Rect> {
        if self.disabled || self.mode == RibbonMode::None {
            return None;
        }
        self.rect
    }

    /// Raw endpoints for line-mode previews.
    pub fn preview_line(&self) -> Option<(Point, Point)> {
        if self.disabled || self.mode != RibbonMode::SolidLine || self.rect.is_none() {
            return None;
        }
        Some(self.endpoints)
    }
}
