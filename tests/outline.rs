mod common;

use std::f32::consts::FRAC_PI_2;

use fontedit::outline::bounds::{compute_path, Bound};
use fontedit::outline::{ContourPoint, OutlineSink, Path, PathCollector, PathGroup};
use fontedit::pathfinder_geometry::line_segment::LineSegment2F;
use fontedit::pathfinder_geometry::vector::vec2f;

use crate::common::assert_vector_close;

fn on(x: f32, y: f32) -> ContourPoint {
    ContourPoint {
        point: vec2f(x, y),
        on_curve: true,
    }
}

fn off(x: f32, y: f32) -> ContourPoint {
    ContourPoint {
        point: vec2f(x, y),
        on_curve: false,
    }
}

// An "o" shape: a rounded outer contour and a rectangular counter.
fn letter_o() -> PathGroup {
    let outer = Path::from_contour(&[
        on(100., 0.),
        off(200., 0.),
        on(200., 150.),
        off(200., 300.),
        on(100., 300.),
        off(0., 300.),
        on(0., 150.),
        off(0., 0.),
    ])
    .unwrap();
    let counter = Path::from_contour(&[on(60., 60.), on(140., 60.), on(140., 240.), on(60., 240.)])
        .unwrap();
    PathGroup::from(vec![outer, counter])
}

#[test]
fn test_bound_of_glyph() {
    assert_eq!(
        compute_path(&letter_o()),
        Bound {
            x: 0.,
            y: 0.,
            width: 200.,
            height: 300.,
        }
    );
}

#[test]
fn test_collect_from_sink() {
    let mut collector = PathCollector::new();
    collector.move_to(vec2f(0., 0.));
    collector.line_to(vec2f(10., 0.));
    collector.cubic_curve_to(
        LineSegment2F::new(vec2f(15., 5.), vec2f(15., 10.)),
        vec2f(10., 15.),
    );
    collector.close();
    collector.move_to(vec2f(2., 2.));
    collector.quadratic_curve_to(vec2f(4., 4.), vec2f(6., 2.));
    let group = collector.into_group();

    assert_eq!(group.len(), 2);
    assert_eq!(
        compute_path(&group),
        Bound {
            x: 0.,
            y: 0.,
            width: 15.,
            height: 15.,
        }
    );

    let mut replayed = PathCollector::new();
    group.visit(&mut replayed);
    assert_eq!(replayed.into_group(), group);
}

#[test]
fn test_editing_session() {
    let glyph = letter_o().move_to(500., -100.);
    let bound = compute_path(&glyph);
    assert_eq!((bound.x, bound.y), (500., -100.));
    assert_eq!((bound.width, bound.height), (200., 300.));

    let glyph = glyph.mirror().flip().flip().mirror();
    assert_eq!(glyph, letter_o().move_to(500., -100.));

    // A quarter turn about the centre swaps width and height
    let turned = glyph.rotate(FRAC_PI_2);
    let bound = compute_path(&turned);
    assert_vector_close(vec2f(bound.width, bound.height), vec2f(300., 200.));
    assert_vector_close(bound.center(), vec2f(600., 50.));
}

#[test]
fn test_mirror_keeps_counter_inside() {
    let glyph = letter_o().mirror();
    let outer = compute_path([&glyph.paths[0]]);
    let counter = compute_path([&glyph.paths[1]]);
    assert!(outer.x < counter.x && counter.x + counter.width < outer.x + outer.width);
    assert_eq!(counter.x, 60.);
}
