//! Geometry primitives for widget layout and damage tracking
//!
//! All coordinates are unsigned pixel values. Every operation that could
//! underflow clamps instead of wrapping, so degenerate input degrades to an
//! empty area rather than to a huge one.

use embedded_graphics::prelude::{Point as EgPoint, Size as EgSize};
use embedded_graphics::primitives::Rectangle;

/// Sentinel length meaning "as large as available".
///
/// Half of `u16::MAX` so that two sentinels can be added without overflow.
pub const MAX_LEN: u16 = u16::MAX / 2;

/// Clamp a widened length back into the `0..=MAX_LEN` range.
fn max_len_or(len: u32) -> u16 {
    len.min(MAX_LEN as u32) as u16
}

// ============================================================================
// Point
// ============================================================================

/// A point on the display, `(0, 0)` is the top left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> EgPoint {
        EgPoint::new(self.x as i32, self.y as i32)
    }
}

// ============================================================================
// Size
// ============================================================================

/// A width and a height.
///
/// Either length may be [`MAX_LEN`] when used as a preferred size, meaning
/// the widget takes whatever is available along that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    /// Neither width nor height.
    pub const EMPTY: Self = Self::new(0, 0);

    /// As large as available in both directions.
    pub const MAX: Self = Self::new(MAX_LEN, MAX_LEN);

    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// True if both width and height are 0.
    pub fn is_empty(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    /// Limit both lengths to [`MAX_LEN`].
    pub fn clamped(self) -> Self {
        Self::new(self.width.min(MAX_LEN), self.height.min(MAX_LEN))
    }

    /// Add widths and heights, saturating at [`MAX_LEN`].
    pub fn cumulate(self, other: Self) -> Self {
        Self::new(
            max_len_or(self.width as u32 + other.width as u32),
            max_len_or(self.height as u32 + other.height as u32),
        )
    }

    /// Maximum of the widths, sum of the heights (stacking one below the other).
    pub fn stack_vertical(self, other: Self) -> Self {
        Self::new(
            self.width.max(other.width),
            max_len_or(self.height as u32 + other.height as u32),
        )
    }

    /// Sum of the widths, maximum of the heights (stacking side by side).
    pub fn stack_horizontal(self, other: Self) -> Self {
        Self::new(
            max_len_or(self.width as u32 + other.width as u32),
            self.height.max(other.height),
        )
    }

    /// Element-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Element-wise minimum, i.e. shrink this size so it fits into `other`.
    pub fn min(self, other: Self) -> Self {
        Self::new(self.width.min(other.width), self.height.min(other.height))
    }

    pub fn to_size(self) -> EgSize {
        EgSize::new(self.width as u32, self.height as u32)
    }
}

// ============================================================================
// Alignment and friends
// ============================================================================

/// Alignment of an element within a larger area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Position along a single axis: start, middle or end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    /// Start coordinate of an element of `len` placed between `start` and `end`.
    fn place(self, start: u16, end: u16, len: u16) -> u16 {
        match self {
            Anchor::Start => start,
            Anchor::Middle => ((start as u32 + end as u32).saturating_sub(len as u32) / 2) as u16,
            Anchor::End => end.saturating_sub(len),
        }
    }
}

impl Alignment {
    fn horizontal(self) -> Anchor {
        match self {
            Alignment::TopLeft | Alignment::CenterLeft | Alignment::BottomLeft => Anchor::Start,
            Alignment::TopCenter | Alignment::Center | Alignment::BottomCenter => Anchor::Middle,
            Alignment::TopRight | Alignment::CenterRight | Alignment::BottomRight => Anchor::End,
        }
    }

    fn vertical(self) -> Anchor {
        match self {
            Alignment::TopLeft | Alignment::TopCenter | Alignment::TopRight => Anchor::Start,
            Alignment::CenterLeft | Alignment::Center | Alignment::CenterRight => Anchor::Middle,
            Alignment::BottomLeft | Alignment::BottomCenter | Alignment::BottomRight => Anchor::End,
        }
    }
}

/// Axes along which a widget reports "as large as possible" regardless of
/// its content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Expansion {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl Expansion {
    pub fn horizontal(self) -> bool {
        matches!(self, Expansion::Horizontal | Expansion::Both)
    }

    pub fn vertical(self) -> bool {
        matches!(self, Expansion::Vertical | Expansion::Both)
    }
}

/// Direction in which an oriented widget grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    LeftToRight,
    TopToDown,
    RightToLeft,
    DownToTop,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::LeftToRight | Direction::RightToLeft)
    }
}

// ============================================================================
// Area
// ============================================================================

/// Rectangle with inclusive `left`/`top` and exclusive `right`/`bottom`.
///
/// An area is empty if `right <= left` or `bottom <= top`; the actual values
/// do not matter then, and all empty areas compare equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Area {
    pub left: u16,
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
}

impl Area {
    /// All coordinates 0.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    pub const fn new(left: u16, top: u16, right: u16, bottom: u16) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Area of `size` with its top left corner at `top_left`.
    pub fn from_point_size(top_left: Point, size: Size) -> Self {
        Self::new(
            top_left.x,
            top_left.y,
            top_left.x.saturating_add(size.width),
            top_left.y.saturating_add(size.height),
        )
    }

    /// True if the area covers at least one pixel.
    pub fn has_area(&self) -> bool {
        self.right > self.left && self.bottom > self.top
    }

    pub fn is_empty(&self) -> bool {
        !self.has_area()
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn width(&self) -> u16 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u16 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Smallest area enclosing both areas. An empty operand is the identity.
    ///
    /// The union of two distant areas can be much larger than both together:
    /// `(1,15,4,17)` united with `(19,2,22,3)` is `(1,2,22,17)`.
    pub fn union(self, other: Self) -> Self {
        if other.is_empty() {
            self
        } else if self.is_empty() {
            other
        } else {
            Self::new(
                self.left.min(other.left),
                self.top.min(other.top),
                self.right.max(other.right),
                self.bottom.max(other.bottom),
            )
        }
    }

    /// Common part of both areas; empty if they do not overlap.
    ///
    /// An inverted edge pair in `self` (left beyond right, top beyond bottom),
    /// typically left behind by an earlier underflow, is replaced by the
    /// corresponding edge of `other` instead of being trusted.
    pub fn intersect(self, other: Self) -> Self {
        if other.is_empty() {
            return Self::EMPTY;
        }
        let left = if self.left > self.right {
            other.left
        } else {
            self.left.max(other.left)
        };
        let top = if self.top > self.bottom {
            other.top
        } else {
            self.top.max(other.top)
        };
        Self::new(
            left,
            top,
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }

    /// Inset every edge by `by`; an edge never crosses its opposite edge.
    pub fn shrink(self, by: Size) -> Self {
        let left = self.left.saturating_add(by.width);
        let top = self.top.saturating_add(by.height);
        Self::new(
            left,
            top,
            self.right.saturating_sub(by.width).max(left),
            self.bottom.saturating_sub(by.height).max(top),
        )
    }

    /// Top left corner of an element of `element` size aligned in this area.
    pub fn aligned_top_left(&self, alignment: Alignment, element: Size) -> Point {
        Point::new(
            alignment
                .horizontal()
                .place(self.left, self.right, element.width),
            alignment
                .vertical()
                .place(self.top, self.bottom, element.height),
        )
    }

    /// Clamp the area to a canvas of the given size.
    pub fn clamp_to(self, canvas: Size) -> Self {
        self.intersect(Self::new(0, 0, canvas.width, canvas.height))
    }
}

impl PartialEq for Area {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => true,
            (false, false) => {
                self.left == other.left
                    && self.top == other.top
                    && self.right == other.right
                    && self.bottom == other.bottom
            }
            _ => false,
        }
    }
}

impl Eq for Area {}

impl From<Area> for Rectangle {
    fn from(area: Area) -> Self {
        Rectangle::new(area.top_left().to_point(), area.size().to_size())
    }
}
