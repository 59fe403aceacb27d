//! Rigid-body operations on groups of paths.
//!
//! Each operation computes one bound over the entire group and transforms every path relative
//! to it, so the paths keep their positions relative to each other. The group is taken by value
//! and returned so operations chain:
//!
//! ```
//! # use fontedit::outline::{Path, PathGroup};
//! # use fontedit::pathfinder_geometry::vector::vec2f;
//! let group = PathGroup::from(vec![Path::new(vec2f(1., 2.))]);
//! let group = group.mirror().flip().move_to(0., 0.);
//! assert_eq!(group.paths[0].start(), vec2f(0., 0.));
//! ```

use crate::outline::bounds::compute_path;
use crate::outline::transform::{reverse_winding, rotate, scale_and_translate, translate};
use crate::outline::PathGroup;

impl PathGroup {
    /// Move the group so the top-left corner of its bound lands on `(x, y)`.
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        let bound = compute_path(&self);
        let (dx, dy) = (x - bound.x, y - bound.y);
        for path in &mut self.paths {
            translate(path, dx, dy);
        }
        self
    }

    /// Rotate the group by `angle` radians about the centre of its bound.
    pub fn rotate(mut self, angle: f32) -> Self {
        if angle == 0. {
            return self;
        }

        let center = compute_path(&self).center();
        for path in &mut self.paths {
            rotate(path, angle, center.x(), center.y());
        }
        self
    }

    /// Reflect the group about the vertical centreline of its bound.
    ///
    /// The bound is unchanged and the winding of every path is reversed so fills are
    /// preserved.
    pub fn mirror(mut self) -> Self {
        let bound = compute_path(&self);
        for path in &mut self.paths {
            // x -> bound.x - x -> 2 * bound.x + width - x
            scale_and_translate(path, -1., 1., bound.x, 0.);
            translate(path, bound.x + bound.width, 0.);
            reverse_winding(path);
        }
        self
    }

    /// Reflect the group about the horizontal centreline of its bound.
    ///
    /// The bound is unchanged and the winding of every path is reversed.
    pub fn flip(mut self) -> Self {
        let bound = compute_path(&self);
        for path in &mut self.paths {
            scale_and_translate(path, 1., -1., 0., bound.y);
            translate(path, 0., bound.y + bound.height);
            reverse_winding(path);
        }
        self
    }
}
