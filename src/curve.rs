use std::f64::consts::PI;

use ::geom::{Coord, Point, Vector};
use ::path::ArcFlags;

/// Center parameterization of an elliptic arc.  Angles are in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcParameters {
    pub center: Point,
    /// Radii, possibly scaled up so the arc can reach both of its endpoints
    pub radius: Vector,
    /// Rotation of the ellipse's x axis
    pub rotation: Coord,
    pub angle_start: Coord,
    /// Swept angle; negative means clockwise (for y pointing up)
    pub angle_delta: Coord,
}

impl ArcParameters {
    /** Point on the ellipse at the given parametric angle */
    pub fn point_at(&self, angle: Coord) -> Point {
        let (sin_phi, cos_phi) = self.rotation.sin_cos();
        let x = angle.cos() * self.radius.x;
        let y = angle.sin() * self.radius.y;
        return Point::new(
            cos_phi * x - sin_phi * y + self.center.x,
            sin_phi * x + cos_phi * y + self.center.y,
        );
    }
}

/** Signed angle that rotates u onto v */
fn angle_between(u: Vector, v: Vector) -> Coord {
    let cos = (u.dot(v) / (u.length() * v.length())).max(-1.).min(1.);
    let angle = cos.acos();
    if u.cross(v) < 0. {
        return -angle;
    }
    return angle;
}

/// Converts an SVG-style endpoint arc into its center parameterization.
///
/// Returns None when the arc degenerates into a straight line: either radius is zero, or the
/// endpoints coincide.  `rotation` is in degrees.
pub fn arc_endpoint_to_center(start: Point, end: Point, radius: Vector, rotation: Coord, flags: ArcFlags) -> Option<ArcParameters> {
    if radius.x == 0. || radius.y == 0. || start == end {
        return None;
    }
    let mut rx = radius.x.abs();
    let mut ry = radius.y.abs();
    let phi = rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Half the chord, in the ellipse's own frame
    let half = (start - end) * 0.5;
    let p1 = Vector::new(
        cos_phi * half.x + sin_phi * half.y,
        -sin_phi * half.x + cos_phi * half.y,
    );

    // Radii too small to span the chord get scaled up just enough
    let delta = (p1.x * p1.x) / (rx * rx) + (p1.y * p1.y) / (ry * ry);
    if delta > 1. {
        let scale = delta.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let px2 = p1.x * p1.x;
    let py2 = p1.y * p1.y;
    // Rounding can push this a hair below zero after scaling
    let numerator = (rx2 * ry2 - rx2 * py2 - ry2 * px2).max(0.);
    let mut coef = (numerator / (rx2 * py2 + ry2 * px2)).sqrt();
    if flags.contains(ArcFlags::LARGE_ARC) == flags.contains(ArcFlags::SWEEP) {
        coef = -coef;
    }
    let c1 = Vector::new(coef * rx * p1.y / ry, -coef * ry * p1.x / rx);

    let mid = (start.to_vector() + end.to_vector()) * 0.5;
    let center = Point::new(
        cos_phi * c1.x - sin_phi * c1.y + mid.x,
        sin_phi * c1.x + cos_phi * c1.y + mid.y,
    );

    let u = Vector::new((p1.x - c1.x) / rx, (p1.y - c1.y) / ry);
    let v = Vector::new((-p1.x - c1.x) / rx, (-p1.y - c1.y) / ry);
    let angle_start = angle_between(Vector::new(1., 0.), u);
    let mut angle_delta = angle_between(u, v);
    let sweep = flags.contains(ArcFlags::SWEEP);
    if ! sweep && angle_delta > 0. {
        angle_delta -= 2. * PI;
    }
    else if sweep && angle_delta < 0. {
        angle_delta += 2. * PI;
    }

    return Some(ArcParameters{
        center,
        radius: Vector::new(rx, ry),
        rotation: phi,
        angle_start,
        angle_delta,
    });
}

/// Samples `resolution + 1` points along an arc, starting at `start` and finishing at `end`.
///
/// A degenerate arc yields just its end point.
pub fn sample_arc(start: Point, end: Point, radius: Vector, rotation: Coord, flags: ArcFlags, resolution: usize) -> Vec<Point> {
    let arc = match arc_endpoint_to_center(start, end, radius, rotation, flags) {
        Some(arc) => arc,
        None => return vec![end],
    };
    let steps = resolution.max(1);
    return (0 ..= steps)
        .map(|i| arc.point_at(arc.angle_start + arc.angle_delta * (i as Coord / steps as Coord)))
        .collect();
}

pub fn sample_quadratic_bezier(p0: Point, p1: Point, p2: Point, resolution: usize) -> Vec<Point> {
    let steps = resolution.max(1);
    return (0 ..= steps)
        .map(|i| {
            let t = i as Coord / steps as Coord;
            let mt = 1. - t;
            let (a, b, c) = (mt * mt, 2. * mt * t, t * t);
            Point::new(
                a * p0.x + b * p1.x + c * p2.x,
                a * p0.y + b * p1.y + c * p2.y,
            )
        })
        .collect();
}

pub fn sample_cubic_bezier(p0: Point, p1: Point, p2: Point, p3: Point, resolution: usize) -> Vec<Point> {
    let steps = resolution.max(1);
    return (0 ..= steps)
        .map(|i| {
            let t = i as Coord / steps as Coord;
            let mt = 1. - t;
            let (a, b, c, d) = (mt * mt * mt, 3. * mt * mt * t, 3. * mt * t * t, t * t * t);
            Point::new(
                a * p0.x + b * p1.x + c * p2.x + d * p3.x,
                a * p0.y + b * p1.y + c * p2.y + d * p3.y,
            )
        })
        .collect();
}


#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: Coord = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a - b).length() < TOLERANCE
    }

    #[test]
    fn quarter_circle_center() {
        let r = 2.;
        let arc = arc_endpoint_to_center(
            Point::new(r, 0.), Point::new(0., r), Vector::new(r, r), 0., ArcFlags::SWEEP).unwrap();
        assert!(close(arc.center, Point::new(0., 0.)));
        assert!((arc.angle_start - 0.).abs() < TOLERANCE);
        assert!((arc.angle_delta - PI / 2.).abs() < TOLERANCE);
        assert_eq!(arc.radius, Vector::new(r, r));
    }

    #[test]
    fn quarter_circle_samples_stay_on_circle() {
        let r = 2.;
        let samples = sample_arc(
            Point::new(r, 0.), Point::new(0., r), Vector::new(r, r), 0., ArcFlags::SWEEP, 100);
        assert_eq!(samples.len(), 101);
        for point in &samples {
            assert!((point.to_vector().length() - r).abs() < TOLERANCE, "{:?} is off the circle", point);
        }
        assert!(close(samples[0], Point::new(r, 0.)));
        assert!(close(samples[100], Point::new(0., r)));
    }

    #[test]
    fn sweep_flag_picks_the_other_center() {
        let r = 2.;
        let arc = arc_endpoint_to_center(
            Point::new(r, 0.), Point::new(0., r), Vector::new(r, r), 0., ArcFlags::empty()).unwrap();
        assert!(close(arc.center, Point::new(r, r)));
        assert!(arc.angle_delta < 0.);

        let arc = arc_endpoint_to_center(
            Point::new(r, 0.), Point::new(0., r), Vector::new(r, r), 0., ArcFlags::LARGE_ARC | ArcFlags::SWEEP).unwrap();
        assert!(close(arc.center, Point::new(r, r)));
        assert!((arc.angle_delta - 3. * PI / 2.).abs() < TOLERANCE);
    }

    #[test]
    fn small_radius_is_scaled_up() {
        let arc = arc_endpoint_to_center(
            Point::new(0., 0.), Point::new(2., 0.), Vector::new(0.1, 0.1), 0., ArcFlags::empty()).unwrap();
        assert!(close(arc.center, Point::new(1., 0.)));
        assert!((arc.radius.x - 1.).abs() < TOLERANCE);
        assert!((arc.radius.y - 1.).abs() < TOLERANCE);
        for point in sample_arc(Point::new(0., 0.), Point::new(2., 0.), Vector::new(0.1, 0.1), 0., ArcFlags::empty(), 16) {
            assert!(((point - Point::new(1., 0.)).length() - 1.).abs() < 1e-6);
        }
    }

    #[test]
    fn rotated_ellipse_reaches_its_end() {
        let start = Point::new(1., 1.);
        let end = Point::new(4., 3.);
        let samples = sample_arc(start, end, Vector::new(3., 1.5), 30., ArcFlags::SWEEP, 50);
        assert_eq!(samples.len(), 51);
        assert!((samples[0] - start).length() < 1e-6);
        assert!((samples[50] - end).length() < 1e-6);
    }

    #[test]
    fn degenerate_arcs_are_lines() {
        let end = Point::new(5., 5.);
        assert_eq!(arc_endpoint_to_center(Point::new(0., 0.), end, Vector::new(0., 3.), 0., ArcFlags::empty()), None);
        assert_eq!(sample_arc(Point::new(0., 0.), end, Vector::new(0., 3.), 0., ArcFlags::empty(), 100), vec![end]);
        assert_eq!(sample_arc(end, end, Vector::new(1., 1.), 0., ArcFlags::SWEEP, 100), vec![end]);
    }

    #[test]
    fn bezier_endpoints_and_midpoints() {
        let p0 = Point::new(0., 0.);
        let p1 = Point::new(1., 2.);
        let p2 = Point::new(2., 0.);
        let quad = sample_quadratic_bezier(p0, p1, p2, 10);
        assert_eq!(quad.len(), 11);
        assert_eq!(quad[0], p0);
        assert_eq!(quad[10], p2);
        assert!(close(quad[5], Point::new(1., 1.)));

        let p3 = Point::new(3., 3.);
        let cubic = sample_cubic_bezier(p0, p1, p2, p3, 4);
        assert_eq!(cubic.len(), 5);
        assert_eq!(cubic[0], p0);
        assert_eq!(cubic[4], p3);
        // t = 1/2: (p0 + 3 p1 + 3 p2 + p3) / 8
        assert!(close(cubic[2], Point::new(12. / 8., 9. / 8.)));
    }
}
