//! Geometry types and the hit-area mapping used to place proxy elements.
//!
//! Everything here is a pure function of the current frame: the caller does
//! change detection, so mapping has to be cheap enough to run every frame for
//! every active node.

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A rectangle defined by origin and size.
///
/// Used both for scene-space bounds and for DOM-space placement (CSS pixels,
/// `origin` = `left`/`top`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Left edge x coordinate.
    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    /// Top edge y coordinate.
    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }
}

/// The translation and axis-scale components of a node's world transform.
///
/// Accessibility targets are treated as axis-aligned, so rotation and skew
/// are deliberately not represented.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldTransform {
    /// Horizontal translation.
    pub tx: f32,
    /// Vertical translation.
    pub ty: f32,
    /// Horizontal scale component.
    pub sx: f32,
    /// Vertical scale component.
    pub sy: f32,
}

impl WorldTransform {
    /// Create a transform from translation and per-axis scale.
    #[inline]
    pub const fn new(tx: f32, ty: f32, sx: f32, sy: f32) -> Self {
        Self { tx, ty, sx, sy }
    }

    /// The identity transform.
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        sx: 1.0,
        sy: 1.0,
    };
}

/// Per-frame metrics describing how the render target maps onto the screen.
///
/// Supplied by the host's render loop on every frame so that camera and
/// device-pixel-ratio changes are tracked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewMetrics {
    /// Logical render resolution of the target.
    pub render_size: Size,
    /// On-screen bounding rectangle of the canvas element, in CSS pixels.
    pub view_rect: Rect,
    /// Device pixel ratio of the render target.
    pub device_pixel_ratio: f32,
}

impl ViewMetrics {
    /// Ratio of on-screen CSS width to logical render width.
    #[inline]
    pub fn scale_x(&self) -> f32 {
        self.view_rect.width() / self.render_size.width
    }

    /// Ratio of on-screen CSS height to logical render height.
    #[inline]
    pub fn scale_y(&self) -> f32 {
        self.view_rect.height() / self.render_size.height
    }

    /// DOM-space rectangle the overlay container should occupy.
    ///
    /// The container sits over the canvas element; its extent is the logical
    /// render size divided back out by the device pixel ratio.
    pub fn container_rect(&self) -> Rect {
        Rect::new(
            self.view_rect.left(),
            self.view_rect.top(),
            self.render_size.width / self.device_pixel_ratio,
            self.render_size.height / self.device_pixel_ratio,
        )
    }
}

/// Map an explicit hit-area rectangle through a node's world transform into
/// DOM pixels.
///
/// Only the translation and axis-scale components participate; width takes
/// the horizontal scale component and height the vertical one.
pub fn map_hit_area(hit: Rect, wt: WorldTransform, metrics: &ViewMetrics) -> Rect {
    let sx = metrics.scale_x();
    let sy = metrics.scale_y();
    non_negative(Rect::new(
        (wt.tx + hit.left() * wt.sx) * sx,
        (wt.ty + hit.top() * wt.sy) * sy,
        hit.width() * wt.sx * sx,
        hit.height() * wt.sy * sy,
    ))
}

/// Map a node's world-space bounding box into DOM pixels, clamping it to the
/// render target first.
///
/// A box clipped entirely off the target collapses to a zero-size rectangle.
pub fn map_bounds(bounds: Rect, metrics: &ViewMetrics) -> Rect {
    let capped = cap_hit_area(bounds, metrics.render_size);
    let sx = metrics.scale_x() * metrics.device_pixel_ratio;
    let sy = metrics.scale_y() * metrics.device_pixel_ratio;
    if capped.size.is_empty() {
        return Rect::new(capped.left() * sx, capped.top() * sy, 0.0, 0.0);
    }
    Rect::new(
        capped.left() * sx,
        capped.top() * sy,
        capped.width() * sx,
        capped.height() * sy,
    )
}

/// Clamp a derived hit area to the render target's visible rectangle.
///
/// A negative origin is absorbed into the extent, then any overflow past the
/// target's width/height is clipped.
pub fn cap_hit_area(mut rect: Rect, target: Size) -> Rect {
    if rect.origin.x < 0.0 {
        rect.size.width += rect.origin.x;
        rect.origin.x = 0.0;
    }

    if rect.origin.y < 0.0 {
        rect.size.height += rect.origin.y;
        rect.origin.y = 0.0;
    }

    if rect.origin.x + rect.size.width > target.width {
        rect.size.width = target.width - rect.origin.x;
    }

    if rect.origin.y + rect.size.height > target.height {
        rect.size.height = target.height - rect.origin.y;
    }

    rect
}

/// A malformed source box must never become a negative-size DOM rectangle.
fn non_negative(mut rect: Rect) -> Rect {
    rect.size.width = rect.size.width.max(0.0);
    rect.size.height = rect.size.height.max(0.0);
    rect
}
