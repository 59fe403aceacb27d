//! Affine transforms of a single path, applied in place.

use pathfinder_geometry::transform2d::{Matrix2x2F, Transform2F};
use pathfinder_geometry::vector::vec2f;

use crate::outline::Path;

/// Move every coordinate of `path` by `(dx, dy)`.
pub fn translate(path: &mut Path, dx: f32, dy: f32) {
    path.transform(Transform2F::from_translation(vec2f(dx, dy)));
}

/// Map every coordinate `(x, y)` of `path` to `(x * sx + dx, y * sy + dy)` in a single pass.
///
/// Passing `-1` for one of the scales reflects the path about that axis, which reverses its
/// winding. See `reverse_winding`.
pub fn scale_and_translate(path: &mut Path, sx: f32, sy: f32, dx: f32, dy: f32) {
    path.transform(Transform2F {
        matrix: Matrix2x2F::from_scale(vec2f(sx, sy)),
        vector: vec2f(dx, dy),
    });
}

/// Rotate `path` by `angle` radians counter-clockwise about `(cx, cy)`.
pub fn rotate(path: &mut Path, angle: f32, cx: f32, cy: f32) {
    if angle == 0. {
        return;
    }

    let center = vec2f(cx, cy);
    let rotation = Matrix2x2F::from_rotation(angle);
    path.map_points(|point| center + rotation * (point - center));
}

/// Reverse the drawing direction of `path`, turning a clockwise contour counter-clockwise and
/// vice versa.
pub fn reverse_winding(path: &mut Path) {
    path.reverse();
}
