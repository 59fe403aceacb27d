//! Iteration over TrueType style quadratic contours.

use pathfinder_geometry::vector::Vector2F;

use crate::outline::ContourPoint;

pub struct Contour<'points> {
    points: &'points [ContourPoint],
}

#[derive(Debug, PartialEq)]
pub enum CurvePoint {
    OnCurve(Vector2F),
    Control(Vector2F),
}

pub struct Points<'a, 'points> {
    contour: &'a Contour<'points>,
    i: usize,
    until: usize,
    mid: Option<Vector2F>,
}

impl<'points> Contour<'points> {
    pub fn new(points: &'points [ContourPoint]) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Contour { points })
        }
    }

    pub fn origin(&self) -> Vector2F {
        self.calculate_origin().0
    }

    fn calculate_origin(&self) -> (Vector2F, usize, usize) {
        match (self.first(), self.last()) {
            (CurvePoint::OnCurve(first), _) => {
                // Origin is the first point, so start on the second point
                (first, 1, self.len())
            }
            (CurvePoint::Control(_), CurvePoint::OnCurve(last)) => {
                // Origin is the last point, so start on the first point and consider
                // the last point already processed
                (last, 0, self.len() - 1)
            }
            (CurvePoint::Control(first), CurvePoint::Control(last)) => {
                // Origin is the mid-point between first and last control points.
                // Start on the first point
                (first.lerp(last, 0.5), 0, self.len())
            }
        }
    }

    pub fn points<'a>(&'a self) -> Points<'a, 'points> {
        let (_, start, until) = self.calculate_origin();
        Points {
            contour: self,
            i: start,
            until,
            mid: None,
        }
    }

    fn first(&self) -> CurvePoint {
        self.get(0)
    }

    fn last(&self) -> CurvePoint {
        self.get(self.points.len() - 1)
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn get(&self, index: usize) -> CurvePoint {
        CurvePoint::from(self.points[index])
    }
}

impl<'a, 'points> Iterator for Points<'a, 'points> {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(mid) = self.mid {
            self.mid = None;
            return Some(CurvePoint::OnCurve(mid));
        }

        if self.i >= self.until {
            return None;
        }

        let point = match self.contour.get(self.i) {
            point @ CurvePoint::OnCurve(_) => point,
            CurvePoint::Control(control) => {
                // Check the next point, wrapping around if needed
                match self.contour.get((self.i + 1) % self.contour.len()) {
                    CurvePoint::OnCurve(_) => CurvePoint::Control(control),
                    CurvePoint::Control(control2) => {
                        // Next point is a control point, yield mid point as on curve point
                        // after this one
                        self.mid = Some(control.lerp(control2, 0.5));
                        CurvePoint::Control(control)
                    }
                }
            }
        };

        self.i += 1;
        Some(point)
    }
}

impl From<ContourPoint> for CurvePoint {
    fn from(point: ContourPoint) -> Self {
        if point.on_curve {
            CurvePoint::OnCurve(point.point)
        } else {
            CurvePoint::Control(point.point)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_geometry::vector::vec2f;

    fn off(x: f32, y: f32) -> ContourPoint {
        ContourPoint {
            point: vec2f(x, y),
            on_curve: false,
        }
    }

    #[test]
    fn all_control_points() {
        let points = [off(0., 0.), off(10., 0.), off(10., 10.), off(0., 10.)];
        let contour = Contour::new(&points).unwrap();
        assert_eq!(contour.origin(), vec2f(0., 5.));

        let points = contour.points().collect::<Vec<_>>();
        let expected = &[
            CurvePoint::Control(vec2f(0., 0.)),
            CurvePoint::OnCurve(vec2f(5., 0.)),
            CurvePoint::Control(vec2f(10., 0.)),
            CurvePoint::OnCurve(vec2f(10., 5.)),
            CurvePoint::Control(vec2f(10., 10.)),
            CurvePoint::OnCurve(vec2f(5., 10.)),
            CurvePoint::Control(vec2f(0., 10.)),
            CurvePoint::OnCurve(vec2f(0., 5.)),
        ];
        assert_eq!(&points, expected);
    }

    #[test]
    fn origin_is_last_on_curve_point() {
        let points = [
            off(5., 10.),
            ContourPoint {
                point: vec2f(10., 0.),
                on_curve: true,
            },
        ];
        let contour = Contour::new(&points).unwrap();
        assert_eq!(contour.origin(), vec2f(10., 0.));
        assert_eq!(
            contour.points().collect::<Vec<_>>(),
            vec![CurvePoint::Control(vec2f(5., 10.))]
        );
    }
}
