//! Glyph outlines as editable paths.
//!
//! A `Path` is one closed contour: a start point followed by drawing commands. A `PathGroup` is
//! the set of contours making up a glyph, or a selection of contours within one. Groups are
//! transformed as rigid bodies: every operation computes a single bound over the whole group
//! and applies the same transform to each path.
//!
//! Outlines are exchanged with glyph sources and renderers through `OutlineSink`. Use a
//! `PathCollector` to capture drawing commands as a `PathGroup` and `PathGroup::visit` to replay
//! a group into any sink.
//!
//! ### Example
//!
//! ```
//! use fontedit::outline::{Path, PathGroup};
//! use fontedit::outline::bounds::{compute_path, Bound};
//! use fontedit::pathfinder_geometry::vector::vec2f;
//!
//! let mut square = Path::new(vec2f(10., 10.));
//! square.line_to(vec2f(30., 10.));
//! square.line_to(vec2f(30., 30.));
//! square.line_to(vec2f(10., 30.));
//!
//! let group = PathGroup::from(vec![square]).move_to(0., 0.).mirror();
//! assert_eq!(
//!     compute_path(&group),
//!     Bound { x: 0., y: 0., width: 20., height: 20. }
//! );
//! ```

pub mod bounds;
mod contour;
pub mod group;
pub mod transform;

use log::warn;
use pathfinder_geometry::line_segment::LineSegment2F;
use pathfinder_geometry::transform2d::Transform2F;
use pathfinder_geometry::vector::Vector2F;

// `OutlineSink` is from font-kit, font-kit/src/outline.rs:
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// A trait for visiting a glyph outline
pub trait OutlineSink {
    /// Moves the pen to a point.
    fn move_to(&mut self, to: Vector2F);
    /// Draws a line to a point.
    fn line_to(&mut self, to: Vector2F);
    /// Draws a quadratic Bézier curve to a point.
    fn quadratic_curve_to(&mut self, ctrl: Vector2F, to: Vector2F);
    /// Draws a cubic Bézier curve to a point.
    fn cubic_curve_to(&mut self, ctrl: LineSegment2F, to: Vector2F);
    /// Closes the path, returning to the first point in it.
    fn close(&mut self);
}

/// A single drawing command. The command starts where the previous one ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    LineTo(Vector2F),
    QuadTo {
        ctrl: Vector2F,
        to: Vector2F,
    },
    CubicTo {
        ctrl1: Vector2F,
        ctrl2: Vector2F,
        to: Vector2F,
    },
}

/// A closed contour.
///
/// The contour is implicitly closed by a line from the end of the last command back to
/// `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    start: Vector2F,
    commands: Vec<PathCommand>,
}

/// An on- or off-curve point of a TrueType style quadratic contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourPoint {
    pub point: Vector2F,
    pub on_curve: bool,
}

/// An ordered collection of paths transformed together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathGroup {
    pub paths: Vec<Path>,
}

/// An `OutlineSink` that collects the outline drawn into it as a `PathGroup`.
#[derive(Debug, Default)]
pub struct PathCollector {
    paths: Vec<Path>,
    current: Option<Path>,
}

impl PathCommand {
    /// The point this command ends at.
    pub fn to(&self) -> Vector2F {
        match *self {
            PathCommand::LineTo(to)
            | PathCommand::QuadTo { to, .. }
            | PathCommand::CubicTo { to, .. } => to,
        }
    }

    /// All coordinates of this command, control points first.
    pub fn points(&self) -> impl Iterator<Item = Vector2F> {
        let (points, len) = match *self {
            PathCommand::LineTo(to) => ([to, to, to], 1),
            PathCommand::QuadTo { ctrl, to } => ([ctrl, to, to], 2),
            PathCommand::CubicTo { ctrl1, ctrl2, to } => ([ctrl1, ctrl2, to], 3),
        };
        points.into_iter().take(len)
    }

    fn map_points<F: FnMut(Vector2F) -> Vector2F>(&mut self, mut f: F) {
        match self {
            PathCommand::LineTo(to) => *to = f(*to),
            PathCommand::QuadTo { ctrl, to } => {
                *ctrl = f(*ctrl);
                *to = f(*to);
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                *ctrl1 = f(*ctrl1);
                *ctrl2 = f(*ctrl2);
                *to = f(*to);
            }
        }
    }

    /// Turn this command into the same curve drawn backwards, ending at `from`.
    fn reverse_from(&mut self, from: Vector2F) {
        match self {
            PathCommand::LineTo(to) | PathCommand::QuadTo { to, .. } => *to = from,
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                std::mem::swap(ctrl1, ctrl2);
                *to = from;
            }
        }
    }
}

impl Path {
    /// Start a new contour at `start`.
    pub fn new(start: Vector2F) -> Self {
        Path {
            start,
            commands: Vec::new(),
        }
    }

    /// Build a contour from TrueType style quadratic points.
    ///
    /// An implied on-curve point is inserted midway between consecutive off-curve points.
    /// Returns `None` if `points` is empty.
    pub fn from_contour(points: &[ContourPoint]) -> Option<Self> {
        let contour = contour::Contour::new(points)?;
        let origin = contour.origin();
        let mut path = Path::new(origin);

        // It's assumed that the current location is on curve each time through this loop
        let mut curve_points = contour.points();
        while let Some(next) = curve_points.next() {
            match next {
                contour::CurvePoint::OnCurve(to) => path.line_to(to),
                contour::CurvePoint::Control(ctrl) => match curve_points.next() {
                    Some(contour::CurvePoint::OnCurve(to)) => path.quad_to(ctrl, to),
                    Some(contour::CurvePoint::Control(_)) => {
                        // Can't happen as the Points iterator inserts on curve mid-points
                        // when two consecutive control points are encountered
                        unreachable!("consecutive control points")
                    }
                    None => {
                        // Wrap around to the first point
                        path.quad_to(ctrl, origin);
                        break;
                    }
                },
            }
        }

        Some(path)
    }

    pub fn start(&self) -> Vector2F {
        self.start
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn line_to(&mut self, to: Vector2F) {
        self.commands.push(PathCommand::LineTo(to));
    }

    pub fn quad_to(&mut self, ctrl: Vector2F, to: Vector2F) {
        self.commands.push(PathCommand::QuadTo { ctrl, to });
    }

    pub fn cubic_to(&mut self, ctrl1: Vector2F, ctrl2: Vector2F, to: Vector2F) {
        self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
    }

    /// Every coordinate of the path: the start point then the points of each command.
    pub fn points(&self) -> impl Iterator<Item = Vector2F> + '_ {
        std::iter::once(self.start).chain(self.commands.iter().flat_map(PathCommand::points))
    }

    /// Replace every coordinate `p` of the path with `f(p)`.
    pub fn map_points<F: FnMut(Vector2F) -> Vector2F>(&mut self, mut f: F) {
        self.start = f(self.start);
        for command in &mut self.commands {
            command.map_points(&mut f);
        }
    }

    /// Apply `transform` to every coordinate of the path.
    pub fn transform(&mut self, transform: Transform2F) {
        self.map_points(|point| transform * point);
    }

    /// Reverse the direction the contour is drawn in, in place.
    ///
    /// The reversed path starts where the last command ended and visits the same points in the
    /// opposite order. Reversing twice restores the original path exactly.
    pub fn reverse(&mut self) {
        let mut from = self.start;
        for command in &mut self.commands {
            let to = command.to();
            command.reverse_from(from);
            from = to;
        }
        self.commands.reverse();
        self.start = from;
    }

    /// Draw this path into `sink`.
    pub fn visit<S: OutlineSink>(&self, sink: &mut S) {
        sink.move_to(self.start);
        for command in &self.commands {
            match *command {
                PathCommand::LineTo(to) => sink.line_to(to),
                PathCommand::QuadTo { ctrl, to } => sink.quadratic_curve_to(ctrl, to),
                PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                    sink.cubic_curve_to(LineSegment2F::new(ctrl1, ctrl2), to)
                }
            }
        }
        sink.close();
    }
}

impl PathGroup {
    pub fn new() -> Self {
        PathGroup::default()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Draw every path in the group into `sink`.
    pub fn visit<S: OutlineSink>(&self, sink: &mut S) {
        for path in &self.paths {
            path.visit(sink);
        }
    }
}

impl From<Vec<Path>> for PathGroup {
    fn from(paths: Vec<Path>) -> Self {
        PathGroup { paths }
    }
}

impl<'a> IntoIterator for &'a PathGroup {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl PathCollector {
    pub fn new() -> Self {
        PathCollector::default()
    }

    /// Finish the current path and return everything collected.
    pub fn into_group(mut self) -> PathGroup {
        self.finish_path();
        PathGroup::from(self.paths)
    }

    fn finish_path(&mut self) {
        if let Some(path) = self.current.take() {
            self.paths.push(path);
        }
    }

    fn current_path(&mut self) -> &mut Path {
        self.current.get_or_insert_with(|| {
            warn!("outline drawn without move_to, starting contour at origin");
            Path::new(Vector2F::zero())
        })
    }
}

impl OutlineSink for PathCollector {
    fn move_to(&mut self, to: Vector2F) {
        self.finish_path();
        self.current = Some(Path::new(to));
    }

    fn line_to(&mut self, to: Vector2F) {
        self.current_path().line_to(to);
    }

    fn quadratic_curve_to(&mut self, ctrl: Vector2F, to: Vector2F) {
        self.current_path().quad_to(ctrl, to);
    }

    fn cubic_curve_to(&mut self, ctrl: LineSegment2F, to: Vector2F) {
        self.current_path().cubic_to(ctrl.from(), ctrl.to(), to);
    }

    fn close(&mut self) {
        self.finish_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_geometry::vector::vec2f;
    use std::fmt::Write;

    struct DebugVisitor {
        outlines: String,
    }

    impl OutlineSink for DebugVisitor {
        fn move_to(&mut self, to: Vector2F) {
            writeln!(&mut self.outlines, "move_to({}, {})", to.x(), to.y()).unwrap();
        }

        fn line_to(&mut self, to: Vector2F) {
            writeln!(&mut self.outlines, "line_to({}, {})", to.x(), to.y()).unwrap();
        }

        fn quadratic_curve_to(&mut self, ctrl: Vector2F, to: Vector2F) {
            writeln!(
                &mut self.outlines,
                "quad_to({}, {}, {}, {})",
                ctrl.x(),
                ctrl.y(),
                to.x(),
                to.y()
            )
            .unwrap();
        }

        fn cubic_curve_to(&mut self, ctrl: LineSegment2F, to: Vector2F) {
            writeln!(
                &mut self.outlines,
                "curve_to({}, {}, {}, {}, {}, {})",
                ctrl.from_x(),
                ctrl.from_y(),
                ctrl.to_x(),
                ctrl.to_y(),
                to.x(),
                to.y()
            )
            .unwrap();
        }

        fn close(&mut self) {
            writeln!(&mut self.outlines, "close()").unwrap();
        }
    }

    fn mixed_path() -> Path {
        let mut path = Path::new(vec2f(0., 0.));
        path.line_to(vec2f(10., 0.));
        path.quad_to(vec2f(20., 0.), vec2f(20., 10.));
        path.cubic_to(vec2f(20., 20.), vec2f(10., 30.), vec2f(0., 20.));
        path
    }

    #[test]
    fn points_include_control_points() {
        let points = mixed_path().points().collect::<Vec<_>>();
        let expected = vec![
            vec2f(0., 0.),
            vec2f(10., 0.),
            vec2f(20., 0.),
            vec2f(20., 10.),
            vec2f(20., 20.),
            vec2f(10., 30.),
            vec2f(0., 20.),
        ];
        assert_eq!(points, expected);
    }

    #[test]
    fn reverse_path() {
        let mut path = mixed_path();
        path.reverse();

        let mut expected = Path::new(vec2f(0., 20.));
        expected.cubic_to(vec2f(10., 30.), vec2f(20., 20.), vec2f(20., 10.));
        expected.quad_to(vec2f(20., 0.), vec2f(10., 0.));
        expected.line_to(vec2f(0., 0.));
        assert_eq!(path, expected);

        path.reverse();
        assert_eq!(path, mixed_path());
    }

    #[test]
    fn reverse_single_point() {
        let mut path = Path::new(vec2f(3., 4.));
        path.reverse();
        assert_eq!(path, Path::new(vec2f(3., 4.)));
    }

    #[test]
    fn visit_group() {
        let group = PathGroup::from(vec![mixed_path(), Path::new(vec2f(5., 5.))]);
        let mut visitor = DebugVisitor {
            outlines: String::new(),
        };
        group.visit(&mut visitor);

        let expected = "move_to(0, 0)
line_to(10, 0)
quad_to(20, 0, 20, 10)
curve_to(20, 20, 10, 30, 0, 20)
close()
move_to(5, 5)
close()
";
        assert_eq!(visitor.outlines, expected);
    }

    #[test]
    fn collect_group() {
        let group = PathGroup::from(vec![mixed_path(), Path::new(vec2f(5., 5.))]);
        let mut collector = PathCollector::new();
        group.visit(&mut collector);
        assert_eq!(collector.into_group(), group);
    }

    #[test]
    fn collect_without_move_to() {
        let mut collector = PathCollector::new();
        collector.line_to(vec2f(1., 2.));
        collector.move_to(vec2f(4., 4.));
        collector.line_to(vec2f(5., 5.));
        let group = collector.into_group();

        let mut first = Path::new(Vector2F::zero());
        first.line_to(vec2f(1., 2.));
        let mut second = Path::new(vec2f(4., 4.));
        second.line_to(vec2f(5., 5.));
        assert_eq!(group, PathGroup::from(vec![first, second]));
    }

    #[test]
    fn path_from_contour() {
        let points = [
            ContourPoint {
                point: vec2f(0., 0.),
                on_curve: true,
            },
            ContourPoint {
                point: vec2f(10., 40.),
                on_curve: false,
            },
            ContourPoint {
                point: vec2f(30., 40.),
                on_curve: false,
            },
            ContourPoint {
                point: vec2f(40., 10.),
                on_curve: true,
            },
        ];
        let path = Path::from_contour(&points).unwrap();

        let mut expected = Path::new(vec2f(0., 0.));
        expected.quad_to(vec2f(10., 40.), vec2f(20., 40.));
        expected.quad_to(vec2f(30., 40.), vec2f(40., 10.));
        assert_eq!(path, expected);
        assert_eq!(Path::from_contour(&[]), None);
    }

    #[test]
    fn path_from_contour_wraps_to_origin() {
        let points = [
            ContourPoint {
                point: vec2f(0., 0.),
                on_curve: true,
            },
            ContourPoint {
                point: vec2f(10., 0.),
                on_curve: true,
            },
            ContourPoint {
                point: vec2f(5., 10.),
                on_curve: false,
            },
        ];
        let path = Path::from_contour(&points).unwrap();

        let mut expected = Path::new(vec2f(0., 0.));
        expected.line_to(vec2f(10., 0.));
        expected.quad_to(vec2f(5., 10.), vec2f(0., 0.));
        assert_eq!(path, expected);
    }
}
