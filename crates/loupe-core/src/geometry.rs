use loupe_types::{Point, Rect};

/// Canonical rectangle spanned by two arbitrary corners.
///
/// The result is the same whichever direction the user dragged in.
pub fn normalize(start: Point, current: Point) -> Rect {
    Rect {
        left: start.x.min(current.x),
        top: start.y.min(current.y),
        right: start.x.max(current.x),
        bottom: start.y.max(current.y),
    }
}

/// True when both sides reach `min_size` pixels.
pub fn is_capturable(rect: &Rect, min_size: u32) -> bool {
    rect.width() >= min_size && rect.height() >= min_size
}

/// Width and height to request from the capture primitive, never below 1×1.
pub fn capture_size(rect: &Rect) -> (u32, u32) {
    (rect.width().max(1), rect.height().max(1))
}
