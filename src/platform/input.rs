//! Pointer input mapping

use glam::Vec2;

use super::Surface;

/// Map a pointer position in client (CSS pixel) space to world coordinates
///
/// `rect_origin` and `rect_size` describe where the canvas element sits on
/// the page; the canvas backing store may be scaled relative to it. Results
/// are clamped to be non-negative.
pub fn client_to_world(client: Vec2, rect_origin: Vec2, rect_size: Vec2, surface: Surface) -> Vec2 {
    let relative = client - rect_origin;
    let scale = Vec2::new(
        if rect_size.x > 0.0 { surface.width / rect_size.x } else { 1.0 },
        if rect_size.y > 0.0 { surface.height / rect_size.y } else { 1.0 },
    );
    (relative * scale).max(Vec2::ZERO)
}
