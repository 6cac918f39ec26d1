//! Screen-space geometry for the overlay window.

/// Integer screen-space rectangle of the host-owned overlay window.
///
/// X-Plane reports coordinates in global desktop boxels with the Y axis
/// growing upward, while the UI library expects Y growing downward from the
/// window top. The tracked `top` edge is what every mouse, cursor, and wheel
/// event is flipped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowGeometry {
    /// Left edge in global screen coordinates.
    pub left: i32,
    /// Top edge in global screen coordinates.
    pub top: i32,
    /// Right edge in global screen coordinates.
    pub right: i32,
    /// Bottom edge in global screen coordinates.
    pub bottom: i32,
    /// Cached `right - left`.
    pub width: i32,
    /// Cached `top - bottom`.
    pub height: i32,
}

impl WindowGeometry {
    /// Builds a geometry record from the host-reported window bounds.
    #[must_use]
    pub fn from_bounds(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            width: right - left,
            height: top - bottom,
        }
    }

    /// Converts a host screen position into UI coordinate space.
    ///
    /// The X coordinate passes through unchanged (the overlay spans the full
    /// screen, so its left edge sits at zero); the Y coordinate is inverted
    /// against the tracked top edge.
    #[must_use]
    pub fn to_ui_pos(&self, x: i32, y: i32) -> [f32; 2] {
        [x as f32, (self.top - y) as f32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bounds_dimensions() {
        let geo = WindowGeometry::from_bounds(0, 1080, 1920, 0);
        assert_eq!(geo.width, 1920);
        assert_eq!(geo.height, 1080);

        let offset = WindowGeometry::from_bounds(100, 900, 700, 300);
        assert_eq!(offset.width, 600);
        assert_eq!(offset.height, 600);
    }

    #[test]
    fn test_to_ui_pos_flips_y_against_top() {
        let geo = WindowGeometry::from_bounds(0, 1080, 1920, 0);
        assert_eq!(geo.to_ui_pos(0, 1080), [0.0, 0.0]);
        assert_eq!(geo.to_ui_pos(640, 1000), [640.0, 80.0]);
        assert_eq!(geo.to_ui_pos(1920, 0), [1920.0, 1080.0]);
    }
}
