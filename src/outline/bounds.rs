//! Bounding boxes of paths.

use pathfinder_geometry::rect::RectF;
use pathfinder_geometry::vector::{vec2f, Vector2F};

use crate::outline::Path;

/// An axis-aligned bounding box. `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bound {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bound {
    pub fn center(&self) -> Vector2F {
        vec2f(self.x + self.width / 2., self.y + self.height / 2.)
    }
}

impl From<RectF> for Bound {
    fn from(rect: RectF) -> Self {
        Bound {
            x: rect.min_x(),
            y: rect.min_y(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

impl From<Bound> for RectF {
    fn from(bound: Bound) -> Self {
        RectF::new(vec2f(bound.x, bound.y), vec2f(bound.width, bound.height))
    }
}

/// Compute the bounding box of every coordinate of `paths`, including control points.
///
/// The bound of no points at all is `Bound::default()`, all zeros.
pub fn compute_path<'a, I>(paths: I) -> Bound
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut points = paths.into_iter().flat_map(Path::points);
    match points.next() {
        Some(first) => {
            let (min, max) = points.fold((first, first), |(min, max), point| {
                (min.min(point), max.max(point))
            });
            Bound::from(RectF::from_points(min, max))
        }
        None => Bound::default(),
    }
}
