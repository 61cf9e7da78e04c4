use std::cmp::Ordering;

use ::geom::Point;
use ::path::{Path, Segment};

/// Lexicographic order on (x, y): the order in which the sweep line meets points.
pub fn compare_point(a: Point, b: Point) -> Ordering {
    return a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)
        .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal));
}

/// Orders segments by the point they draw to.  END segments have no such point and sort last.
pub fn compare_by_endpoint(a: &Segment, b: &Segment) -> Ordering {
    match (a.end_point(), b.end_point()) {
        (Some(a), Some(b)) => compare_point(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Every segment of every path, ordered by `compare_by_endpoint`.  Ties keep path order.
pub fn sort_segments<'a>(paths: &[&'a Path]) -> Vec<&'a Segment> {
    let mut segments: Vec<&Segment> = paths.iter()
        .flat_map(|&path| path.iter().map(|(_, segment)| segment))
        .collect();
    segments.sort_by(|a, b| compare_by_endpoint(a, b));
    return segments;
}


#[cfg(test)]
mod tests {
    use super::*;
    use ::parse::parse_path;
    use ::path::SegmentKind;

    #[test]
    fn points_sort_by_x_then_y() {
        let a = Point::new(0., 5.);
        let b = Point::new(1., 0.);
        let c = Point::new(1., 2.);
        assert_eq!(compare_point(a, b), Ordering::Less);
        assert_eq!(compare_point(c, b), Ordering::Greater);
        assert_eq!(compare_point(b, b), Ordering::Equal);
    }

    #[test]
    fn sorting_two_paths() {
        let first = parse_path("M 2,2 L 0,1 L 1,1 Z").unwrap();
        let second = parse_path("M 1,0 Q 5,5 0,0 Z").unwrap();
        let sorted = sort_segments(&[&first, &second]);
        assert_eq!(sorted.len(), 7);

        let ends: Vec<_> = sorted.iter().filter_map(|segment| segment.end_point()).collect();
        assert_eq!(ends, vec![
            Point::new(0., 0.), Point::new(0., 1.), Point::new(1., 0.),
            Point::new(1., 1.), Point::new(2., 2.)]);
        assert_eq!(sorted[5].kind(), SegmentKind::End);
        assert_eq!(sorted[6].kind(), SegmentKind::End);
        assert_eq!(sorted[0].kind(), SegmentKind::QuadraticBezier);
    }
}
