// ABOUTME: Pixel-space rectangles used to describe pane and divider bounds.
// ABOUTME: Knows how to cut a rectangle in two along an axis.

/// Axis a length is measured along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right (widths)
    X,
    /// Top to bottom (heights)
    Y,
}

impl Axis {
    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Rectangle in pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Start coordinate along an axis
    pub fn origin(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Finite position and non-negative finite dimensions
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// Cut into a leading part of `lead` pixels and the remainder.
    ///
    /// `lead` is clamped into `0..=extent` so the halves always tile `self`.
    /// A negative or NaN extent is treated as empty.
    pub fn cut(&self, axis: Axis, lead: f32) -> (Rect, Rect) {
        let total = self.extent(axis).max(0.0);
        let lead = lead.max(0.0).min(total);
        match axis {
            Axis::X => (
                Rect::new(self.x, self.y, lead, self.height),
                Rect::new(self.x + lead, self.y, total - lead, self.height),
            ),
            Axis::Y => (
                Rect::new(self.x, self.y, self.width, lead),
                Rect::new(self.x, self.y + lead, self.width, total - lead),
            ),
        }
    }

    /// Band of `thickness` pixels centered on the line `offset` pixels into the rectangle
    pub fn band(&self, axis: Axis, offset: f32, thickness: f32) -> Rect {
        let start = self.origin(axis) + offset - thickness / 2.0;
        match axis {
            Axis::X => Rect::new(start, self.y, thickness, self.height),
            Axis::Y => Rect::new(self.x, start, self.width, thickness),
        }
    }
}
