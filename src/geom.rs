use euclid::{TypedPoint2D, TypedRect, TypedSize2D, TypedVector2D};

pub struct PathSpace;
pub type Coord = f64;
pub type Point = TypedPoint2D<Coord, PathSpace>;
pub type Vector = TypedVector2D<Coord, PathSpace>;
pub type Rect = TypedRect<Coord, PathSpace>;
pub type Size = TypedSize2D<Coord, PathSpace>;

// NOTE: assumes the y axis points UP; positive means (a, b, c) winds counter-clockwise
pub fn triangle_signed_area(a: Point, b: Point, c: Point) -> Coord {
    return (a.x - c.x) * (b.y - c.y) - (b.x - c.x) * (a.y - c.y);
}

/// Smallest rect containing every point, or None if there are no points.
pub fn bounding_rect<I: IntoIterator<Item=Point>>(points: I) -> Option<Rect> {
    let mut points = points.into_iter();
    let first = points.next()?;
    let (min, max) = points.fold((first, first), |(min, max), point| (
        Point::new(min.x.min(point.x), min.y.min(point.y)),
        Point::new(max.x.max(point.x), max.y.max(point.y)),
    ));
    return Some(Rect::new(min, Size::new(max.x - min.x, max.y - min.y)));
}

pub trait RectExt {
    fn touches(&self, other: &Self) -> bool;
}
impl RectExt for Rect {
    // Inclusive, unlike euclid's intersects(); boxes sharing an edge still touch
    fn touches(&self, other: &Self) -> bool {
        self.origin.x <= other.origin.x + other.size.width &&
       other.origin.x <=  self.origin.x + self.size.width &&
        self.origin.y <= other.origin.y + other.size.height &&
       other.origin.y <=  self.origin.y + self.size.height
    }
}
