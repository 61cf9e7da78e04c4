// Boolean operations on polygons, after:
// A simple algorithm for Boolean operations on polygons (2013), Martínez et al.
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use bit_vec::BitVec;

use ::errors::Result;
use ::events::{build_event_queue, EdgeType, EventId, EventQueue, PolygonType};
use ::geom::{bounding_rect, triangle_signed_area, Coord, Point, Rect, RectExt};
use ::linearize::Linearizer;
use ::ordering::compare_point;
use ::path::Path;
use ::validate::validate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BooleanOp {
    And,
    Or,
    Xor,
    Difference,
}

#[derive(Debug)]
struct Segment2 {
    source: Point,
    target: Point,
}

impl Segment2 {
    fn new(source: Point, target: Point) -> Self {
        return Self{ source, target };
    }
}


// -----------------------------------------------------------------------------
// utilities

fn check_span_overlap(u0: Coord, u1: Coord, v0: Coord, v1: Coord) -> Option<(Coord, Coord)> {
    if u1 < v0 || u0 > v1 {
        return None;
    }
    if u1 > v0 {
        if u0 < v1 {
            return Some((u0.max(v0), u1.min(v1)));
        } else {
            // u0 == v1
            return Some((u0, u0));
        }
    }
    else {
        // u1 == v0
        return Some((u1, u1));
    }
}

#[derive(Debug, PartialEq)]
enum SegmentIntersection {
    None,
    Point(Point),
    Segment(Point, Point),
}

const SQR_EPSILON: Coord = 0.0000001;
const EPSILON: Coord = 0.000000000000001;

// Rounds to the nearest segment endpoint to absorb precision errors
fn snap_to_endpoint(mut point: Point, seg0: &Segment2, seg1: &Segment2) -> Point {
    for &endpoint in [seg0.source, seg0.target, seg1.source, seg1.target].iter() {
        if (point - endpoint).square_length() < EPSILON {
            point = endpoint;
        }
    }
    return point;
}

fn intersect_segments(seg0: &Segment2, seg1: &Segment2) -> SegmentIntersection {
    let p0 = seg0.source;
    let d0 = seg0.target - p0;
    let p1 = seg1.source;
    let d1 = seg1.target - p1;
    let e = p1 - p0;
    let kross = d0.cross(d1);
    let sqr_len0 = d0.square_length();
    let sqr_len1 = d1.square_length();

    if kross * kross > SQR_EPSILON * sqr_len0 * sqr_len1 {
        // Lines containing these segments intersect; check whether the segments themselves do
        let s = e.cross(d1) / kross;
        if s < 0. || s > 1. {
            return SegmentIntersection::None;
        }
        let t = e.cross(d0) / kross;
        if t < 0. || t > 1. {
            return SegmentIntersection::None;
        }
        return SegmentIntersection::Point(snap_to_endpoint(p0 + d0 * s, seg0, seg1));
    }

    // Segments are parallel; check if they're collinear
    let sqr_len_e = e.square_length();
    let kross = e.cross(d0);
    if kross * kross > SQR_EPSILON * sqr_len0 * sqr_len_e {
        return SegmentIntersection::None;
    }

    // Segments are collinear; check whether their spans overlap
    let s0 = d0.dot(e) / sqr_len0;
    let s1 = s0 + d0.dot(d1) / sqr_len0;
    let smin = s0.min(s1);
    let smax = s0.max(s1);
    if let Some((begin, end)) = check_span_overlap(0., 1., smin, smax) {
        let start = snap_to_endpoint(p0 + d0 * begin, seg0, seg1);
        if begin == end {
            return SegmentIntersection::Point(start);
        }
        return SegmentIntersection::Segment(start, snap_to_endpoint(p0 + d0 * end, seg0, seg1));
    }

    return SegmentIntersection::None;
}

fn bounding_box(path: &Path) -> Option<Rect> {
    bounding_rect(path.iter().filter_map(|(_, segment)| segment.end_point()))
}

fn append_path(into: &mut Path, from: &Path) -> Result<()> {
    for (_, segment) in from.iter() {
        let id = into.append_segment(segment.kind())?;
        for (index, &point) in segment.points().iter().enumerate() {
            into.set_point(id, index, point);
        }
        into.set_flags(id, segment.flags());
    }
    Ok(())
}

fn ring_area(points: &[Point]) -> Coord {
    let mut area = 0.;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        area += a.to_vector().cross(b.to_vector());
    }
    return area / 2.;
}


// -----------------------------------------------------------------------------
// sweep

/// Heap entry for an event.  The far endpoint is captured when the event is queued; splitting an
/// edge only ever moves that endpoint along the same line, so the ordering it implies never
/// changes.
#[derive(Clone, Copy, Debug)]
struct QueuedEvent {
    point: Point,
    other_point: Point,
    is_left: bool,
    polygon: PolygonType,
    id: EventId,
}

impl QueuedEvent {
    /** Is the edge below p? */
    fn is_below(&self, p: Point) -> bool {
        if self.is_left {
            return triangle_signed_area(self.point, self.other_point, p) > 0.;
        }
        else {
            return triangle_signed_area(self.other_point, self.point, p) > 0.;
        }
    }
}

/// Order in which the sweep processes events: by point, then right events before left ones, then
/// the lower edge first, then subject before clipping.
fn compare_events(a: &QueuedEvent, b: &QueuedEvent) -> Ordering {
    return compare_point(a.point, b.point)
        .then(a.is_left.cmp(&b.is_left))
        .then_with(|| {
            if triangle_signed_area(a.point, a.other_point, b.other_point) == 0. {
                Ordering::Equal
            }
            else if a.is_below(b.other_point) {
                Ordering::Less
            }
            else {
                Ordering::Greater
            }
        })
        .then(a.polygon.cmp(&b.polygon))
        .then(a.id.cmp(&b.id));
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        compare_events(self, other) == Ordering::Equal
    }
}
impl Eq for QueuedEvent {}
impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(compare_events(self, other))
    }
}
impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_events(self, other)
    }
}

struct Sweep {
    queue: EventQueue,
    operation: BooleanOp,
    heap: BinaryHeap<Reverse<QueuedEvent>>,
    // left events of edges crossing the sweep line, bottom to top
    status: Vec<EventId>,
    // left events in the order they were processed
    swept: Vec<EventId>,
}

impl Sweep {
    fn new(queue: EventQueue, operation: BooleanOp) -> Sweep {
        let mut sweep = Sweep{
            queue,
            operation,
            heap: BinaryHeap::new(),
            status: Vec::new(),
            swept: Vec::new(),
        };
        let ids: Vec<EventId> = sweep.queue.iter().collect();
        for id in ids {
            // Unpaired events and zero-length edges draw nothing
            match sweep.queue[id].other {
                Some(other) if sweep.queue[other].point != sweep.queue[id].point => {
                    sweep.enqueue(id);
                }
                _ => {}
            }
        }
        return sweep;
    }

    fn other(&self, id: EventId) -> EventId {
        match self.queue[id].other {
            Some(other) => other,
            None => panic!("sweep event {:?} has no partner", id),
        }
    }

    fn other_point(&self, id: EventId) -> Point {
        self.queue[self.other(id)].point
    }

    fn snapshot(&self, id: EventId) -> QueuedEvent {
        let event = &self.queue[id];
        return QueuedEvent{
            point: event.point,
            other_point: self.other_point(id),
            is_left: event.is_left,
            polygon: event.polygon,
            id,
        };
    }

    fn enqueue(&mut self, id: EventId) {
        let queued = self.snapshot(id);
        self.heap.push(Reverse(queued));
    }

    fn is_below(&self, id: EventId, p: Point) -> bool {
        self.snapshot(id).is_below(p)
    }

    fn is_vertical(&self, id: EventId) -> bool {
        self.queue[id].point.x == self.other_point(id).x
    }

    /// Vertical order of two edges in the status line; Less means le1 is below le2.
    fn compare_segments(&self, le1: EventId, le2: EventId) -> Ordering {
        if le1 == le2 {
            return Ordering::Equal;
        }
        let p1 = self.queue[le1].point;
        let q1 = self.other_point(le1);
        let p2 = self.queue[le2].point;
        let q2 = self.other_point(le2);

        if triangle_signed_area(p1, q1, p2) != 0. || triangle_signed_area(p1, q1, q2) != 0. {
            // Segments are not collinear
            let below = if p1 == p2 {
                self.is_below(le1, q2)
            }
            else if p1.x == p2.x {
                p1.y < p2.y
            }
            else if compare_events(&self.snapshot(le1), &self.snapshot(le2)) == Ordering::Greater {
                // le1 was inserted after le2
                ! self.is_below(le2, p1)
            }
            else {
                self.is_below(le1, p2)
            };
            return if below { Ordering::Less } else { Ordering::Greater };
        }

        // Segments are collinear
        let polygon1 = self.queue[le1].polygon;
        let polygon2 = self.queue[le2].polygon;
        if polygon1 != polygon2 {
            return polygon1.cmp(&polygon2);
        }
        if p1 == p2 {
            return le1.cmp(&le2);
        }
        if compare_events(&self.snapshot(le1), &self.snapshot(le2)) == Ordering::Greater {
            return Ordering::Less;
        }
        return Ordering::Greater;
    }

    fn status_insert(&mut self, id: EventId) -> usize {
        let pos = match self.status.binary_search_by(|&probe| self.compare_segments(probe, id)) {
            Ok(pos) | Err(pos) => pos,
        };
        self.status.insert(pos, id);
        return pos;
    }

    fn status_position(&self, id: EventId) -> Option<usize> {
        match self.status.binary_search_by(|&probe| self.compare_segments(probe, id)) {
            Ok(pos) if self.status[pos] == id => Some(pos),
            // Rounding can leave the status slightly out of order
            _ => self.status.iter().position(|&probe| probe == id),
        }
    }

    fn status_below(&self, id: EventId) -> Option<EventId> {
        let pos = self.status_position(id)?;
        if pos == 0 {
            return None;
        }
        return Some(self.status[pos - 1]);
    }

    /** Does the edge belong to the result of the operation? */
    fn in_result(&self, id: EventId) -> bool {
        let event = &self.queue[id];
        return match event.edge_type {
            EdgeType::Normal => match self.operation {
                BooleanOp::And => event.inside,
                BooleanOp::Or => ! event.inside,
                BooleanOp::Difference =>
                    (event.polygon == PolygonType::Subject && ! event.inside) ||
                    (event.polygon == PolygonType::Clipping && event.inside),
                BooleanOp::Xor => true,
            },
            EdgeType::SameTransition => self.operation == BooleanOp::And || self.operation == BooleanOp::Or,
            EdgeType::DifferentTransition => self.operation == BooleanOp::Difference,
            EdgeType::NonContributing => false,
        };
    }

    /// Derives `in_out`, `inside` and the nearest contributing edge below from the edge just
    /// below this one.
    fn compute_fields(&mut self, id: EventId, below: Option<EventId>) {
        let below = match below {
            Some(below) => below,
            None => {
                let event = &mut self.queue[id];
                event.in_out = false;
                event.inside = false;
                event.below_in_result = None;
                return;
            }
        };

        let vertical = self.is_vertical(below);
        let below_in_result = if ! self.in_result(below) || vertical {
            self.queue[below].below_in_result
        }
        else {
            Some(below)
        };
        let (b_polygon, b_in_out, b_inside) = {
            let b = &self.queue[below];
            (b.polygon, b.in_out, b.inside)
        };

        let event = &mut self.queue[id];
        if event.polygon == b_polygon {
            event.in_out = ! b_in_out;
            event.inside = b_inside;
        }
        else {
            event.in_out = b_inside;
            event.inside = if vertical { b_in_out } else { ! b_in_out };
        }
        event.below_in_result = below_in_result;
    }

    /// Splits the edge of left event `le` at `p`, queueing the two new events.
    fn divide_segment(&mut self, le: EventId, p: Point) {
        let right = self.other(le);
        if p == self.queue[le].point || p == self.queue[right].point {
            return;
        }
        let polygon = self.queue[le].polygon;
        let contour = self.queue[le].contour;

        // right end of the first half
        let r = self.queue.push_detached(p, polygon, contour);
        self.queue[r].other = Some(le);
        // left end of the second half
        let l = self.queue.push_detached(p, polygon, contour);
        self.queue[l].is_left = true;
        self.queue[l].other = Some(right);

        self.queue[right].other = Some(l);
        self.queue[le].other = Some(r);
        self.enqueue(r);
        self.enqueue(l);
    }

    fn push_pair_ordered(&self, events: &mut Vec<Option<EventId>>, a: EventId, b: EventId) {
        if self.queue[a].point == self.queue[b].point {
            events.push(None);
        }
        else if compare_events(&self.snapshot(a), &self.snapshot(b)) == Ordering::Greater {
            events.push(Some(b));
            events.push(Some(a));
        }
        else {
            events.push(Some(a));
            events.push(Some(b));
        }
    }

    /// Checks two neighbouring edges for intersection, splitting them as needed.
    ///
    /// Returns 0 for no split, 1 for a crossing, 2 when the edges overlap from a shared left end
    /// (which reclassifies both), and 3 for any other overlap.
    fn possible_intersection(&mut self, le1: EventId, le2: EventId) -> u8 {
        let p1 = self.queue[le1].point;
        let q1 = self.other_point(le1);
        let p2 = self.queue[le2].point;
        let q2 = self.other_point(le2);

        match intersect_segments(&Segment2::new(p1, q1), &Segment2::new(p2, q2)) {
            SegmentIntersection::None => {
                return 0;
            }
            SegmentIntersection::Point(intersection) => {
                if p1 == p2 || q1 == q2 {
                    // the edges meet at an endpoint of both
                    return 0;
                }
                if p1 != intersection && q1 != intersection {
                    self.divide_segment(le1, intersection);
                }
                if p2 != intersection && q2 != intersection {
                    self.divide_segment(le2, intersection);
                }
                return 1;
            }
            SegmentIntersection::Segment(a, b) => {
                if self.queue[le1].polygon == self.queue[le2].polygon {
                    warn!("edges of the same polygon overlap between {:?} and {:?}", a, b);
                    return 0;
                }

                let mut events = Vec::with_capacity(4);
                let r1 = self.other(le1);
                let r2 = self.other(le2);
                self.push_pair_ordered(&mut events, le1, le2);
                self.push_pair_ordered(&mut events, r1, r2);

                if events.len() == 2 || (events.len() == 3 && events[2].is_some()) {
                    // Both edges are equal, or share their left end
                    self.queue[le1].edge_type = EdgeType::NonContributing;
                    self.queue[le2].edge_type = if self.queue[le1].in_out == self.queue[le2].in_out {
                        EdgeType::SameTransition
                    }
                    else {
                        EdgeType::DifferentTransition
                    };
                    if events.len() == 3 {
                        if let (Some(first), Some(last)) = (events[1], events[2]) {
                            let longer = self.other(last);
                            let cut = self.queue[first].point;
                            self.divide_segment(longer, cut);
                        }
                    }
                    return 2;
                }

                let ends: Vec<EventId> = events.iter().filter_map(|&e| e).collect();
                if events.len() == 3 {
                    // Edges share their right end
                    let cut = self.queue[ends[1]].point;
                    self.divide_segment(ends[0], cut);
                    return 3;
                }

                let cut1 = self.queue[ends[1]].point;
                let cut2 = self.queue[ends[2]].point;
                if ends[0] != self.other(ends[3]) {
                    // Neither edge contains the other
                    self.divide_segment(ends[0], cut1);
                    self.divide_segment(ends[1], cut2);
                }
                else {
                    // One edge contains the other
                    self.divide_segment(ends[0], cut1);
                    let outer = self.other(ends[3]);
                    self.divide_segment(outer, cut2);
                }
                return 3;
            }
        }
    }

    fn process_left(&mut self, id: EventId) {
        self.swept.push(id);
        let pos = self.status_insert(id);
        let below = if pos > 0 { Some(self.status[pos - 1]) } else { None };
        let above = self.status.get(pos + 1).cloned();
        self.compute_fields(id, below);

        if let Some(above) = above {
            if self.possible_intersection(id, above) == 2 {
                self.compute_fields(id, below);
                self.compute_fields(above, Some(id));
            }
        }
        if let Some(below) = below {
            if self.possible_intersection(below, id) == 2 {
                let below_below = self.status_below(below);
                self.compute_fields(below, below_below);
                self.compute_fields(id, Some(below));
            }
        }
    }

    fn process_right(&mut self, id: EventId) {
        let left = self.other(id);
        let pos = match self.status_position(left) {
            Some(pos) => pos,
            None => return,
        };
        let below = if pos > 0 { Some(self.status[pos - 1]) } else { None };
        let above = self.status.get(pos + 1).cloned();
        self.status.remove(pos);
        if let (Some(below), Some(above)) = (below, above) {
            self.possible_intersection(below, above);
        }
    }

    /// Runs the sweep, stopping early once events pass `limit` on the x axis.
    fn run(&mut self, limit: Option<Coord>) {
        while let Some(Reverse(event)) = self.heap.pop() {
            if let Some(limit) = limit {
                if event.point.x > limit {
                    break;
                }
            }
            trace!("{} event at {:?}", if event.is_left { "left" } else { "right" }, event.point);
            if event.is_left {
                self.process_left(event.id);
            }
            else {
                self.process_right(event.id);
            }
        }
        debug!("swept {} edges; {} events in total", self.swept.len(), self.queue.len());
    }

    /// Chains the contributing edges into closed contours.
    ///
    /// Exterior contours wind counter-clockwise and holes clockwise; nesting depth comes from the
    /// nearest contributing edge below each contour's first edge.
    fn assemble(&self, capacity: usize) -> Result<Path> {
        let edges: Vec<EventId> = self.swept.iter().cloned()
            .filter(|&id| self.in_result(id) && self.queue[id].point != self.other_point(id))
            .collect();

        let mut endpoints: Vec<(Point, usize)> = Vec::with_capacity(edges.len() * 2);
        for (i, &id) in edges.iter().enumerate() {
            endpoints.push((self.queue[id].point, i));
            endpoints.push((self.other_point(id), i));
        }
        endpoints.sort_by(|a, b| compare_point(a.0, b.0).then(a.1.cmp(&b.1)));

        let mut processed = BitVec::from_elem(edges.len(), false);
        let mut contour_of: Vec<Option<usize>> = vec![None; self.queue.len()];
        let mut result_in_out = BitVec::from_elem(self.queue.len(), false);
        let mut depths: Vec<usize> = Vec::new();
        let mut output = Path::with_capacity(capacity);

        for (i, &edge) in edges.iter().enumerate() {
            if processed[i] {
                continue;
            }

            let contour = depths.len();
            let depth = match self.queue[edge].below_in_result {
                Some(below) => match contour_of[below.index()] {
                    Some(lower) if ! result_in_out[below.index()] => depths[lower] + 1,
                    Some(lower) => depths[lower],
                    None => 0,
                },
                None => 0,
            };
            depths.push(depth);

            // Walk around until we come back to the starting point
            let start = self.queue[edge].point;
            let mut points = vec![start];
            let mut current = i;
            let mut at = start;
            loop {
                processed.set(current, true);
                let id = edges[current];
                contour_of[id.index()] = Some(contour);
                let backwards = at != self.queue[id].point;
                result_in_out.set(id.index(), backwards);
                at = if backwards { self.queue[id].point } else { self.other_point(id) };
                if at == start {
                    break;
                }
                points.push(at);

                match next_unprocessed(&endpoints, &processed, at) {
                    Some(next) => current = next,
                    None => {
                        warn!("result contour starting at {:?} does not close", start);
                        break;
                    }
                }
            }

            if points.len() < 3 {
                debug!("dropping degenerate contour at {:?}", start);
                continue;
            }
            let counter_clockwise = ring_area(&points) > 0.;
            if counter_clockwise == (depth % 2 == 1) {
                points.reverse();
            }

            output.move_to(points[0])?;
            for &point in &points[1..] {
                output.line_to(point)?;
            }
            output.close()?;
        }

        return Ok(output);
    }
}

fn next_unprocessed(endpoints: &[(Point, usize)], processed: &BitVec, point: Point) -> Option<usize> {
    // Never Equal, so this finds the first endpoint at `point`
    let first = match endpoints.binary_search_by(|probe| compare_point(probe.0, point).then(Ordering::Greater)) {
        Ok(pos) | Err(pos) => pos,
    };
    return endpoints[first..].iter()
        .take_while(|&&(p, _)| p == point)
        .map(|&(_, edge)| edge)
        .find(|&edge| ! processed[edge]);
}


// -----------------------------------------------------------------------------
// entry points

/// Combines two paths with a Boolean operation, flattening curves with the default resolution.
pub fn clip(subject: &Path, clipping: &Path, operation: BooleanOp) -> Result<Path> {
    clip_with(subject, clipping, operation, &Linearizer::default())
}

/// Combines two paths with a Boolean operation.
///
/// Both inputs are validated, then linearized as private copies; the caller's paths are left
/// alone.  The result is a fresh path of closed polygons with the subject's capacity.
///
/// Each input must be a simple polygon set.  Edges of one input that overlap each other, as in
/// a zero-area sub-path like `M 0,0 L 1,0 L 2,0 Z`, are logged and skipped rather than resolved,
/// and the result for such input is unspecified.
pub fn clip_with(subject: &Path, clipping: &Path, operation: BooleanOp, linearizer: &Linearizer) -> Result<Path> {
    validate(subject)?;
    validate(clipping)?;
    let mut subject_lines = subject.copy();
    linearizer.linearize(&mut subject_lines)?;
    let mut clipping_lines = clipping.copy();
    linearizer.linearize(&mut clipping_lines)?;
    let capacity = subject.capacity();

    // ---------------------------------------------------------------------------------------------
    // Detect trivial cases that can be answered without doing any work

    let boxes = match (bounding_box(&subject_lines), bounding_box(&clipping_lines)) {
        (Some(subject_box), Some(clipping_box)) if subject_box.touches(&clipping_box) => {
            Some((subject_box, clipping_box))
        }
        _ => None,
    };
    let (subject_box, clipping_box) = match boxes {
        Some(boxes) => boxes,
        None => {
            debug!("{:?} of paths that do not overlap", operation);
            let mut result = Path::with_capacity(capacity);
            match operation {
                BooleanOp::And => {}
                BooleanOp::Difference => append_path(&mut result, &subject_lines)?,
                BooleanOp::Or | BooleanOp::Xor => {
                    append_path(&mut result, &subject_lines)?;
                    append_path(&mut result, &clipping_lines)?;
                }
            }
            return Ok(result);
        }
    };

    // ---------------------------------------------------------------------------------------------
    // Perform a sweep

    let limit = match operation {
        BooleanOp::And => Some(subject_box.max_x().min(clipping_box.max_x())),
        BooleanOp::Difference => Some(subject_box.max_x()),
        BooleanOp::Or | BooleanOp::Xor => None,
    };
    let mut sweep = Sweep::new(build_event_queue(&subject_lines, &clipping_lines), operation);
    sweep.run(limit);
    let result = sweep.assemble(capacity)?;
    debug!("{:?} produced {} contours", operation, result.counts().moves);
    return Ok(result);
}


#[cfg(test)]
mod tests {
    use super::*;
    use ::errors::ErrorKind;
    use ::parse::parse_path;
    use ::path::SegmentKind;

    fn square(x: Coord, y: Coord, size: Coord) -> Path {
        parse_path(&format!("M {},{} L {},{} L {},{} L {},{} Z",
            x, y, x + size, y, x + size, y + size, x, y + size)).unwrap()
    }

    fn assert_close(actual: Coord, expected: Coord) {
        assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
    }

    fn points(path: &Path) -> Vec<Point> {
        path.iter().filter_map(|(_, segment)| segment.end_point()).collect()
    }

    #[test]
    fn crossing_segments() {
        let a = Segment2::new(Point::new(0., 0.), Point::new(2., 2.));
        let b = Segment2::new(Point::new(0., 2.), Point::new(2., 0.));
        assert_eq!(intersect_segments(&a, &b), SegmentIntersection::Point(Point::new(1., 1.)));

        let c = Segment2::new(Point::new(3., 0.), Point::new(3., 5.));
        assert_eq!(intersect_segments(&a, &c), SegmentIntersection::None);

        let d = Segment2::new(Point::new(2., 2.), Point::new(5., 0.));
        assert_eq!(intersect_segments(&a, &d), SegmentIntersection::Point(Point::new(2., 2.)));
    }

    #[test]
    fn parallel_and_collinear_segments() {
        let a = Segment2::new(Point::new(0., 0.), Point::new(2., 0.));
        let above = Segment2::new(Point::new(0., 1.), Point::new(2., 1.));
        assert_eq!(intersect_segments(&a, &above), SegmentIntersection::None);

        let overlap = Segment2::new(Point::new(1., 0.), Point::new(3., 0.));
        assert_eq!(intersect_segments(&a, &overlap),
            SegmentIntersection::Segment(Point::new(1., 0.), Point::new(2., 0.)));

        let touching = Segment2::new(Point::new(2., 0.), Point::new(4., 0.));
        assert_eq!(intersect_segments(&a, &touching), SegmentIntersection::Point(Point::new(2., 0.)));
    }

    #[test]
    fn span_overlap() {
        assert_eq!(check_span_overlap(0., 1., 0.5, 2.), Some((0.5, 1.)));
        assert_eq!(check_span_overlap(0., 1., 1., 2.), Some((1., 1.)));
        assert_eq!(check_span_overlap(0., 1., 1.5, 2.), None);
    }

    #[test]
    fn intersection_of_overlapping_squares() {
        let result = clip(&square(0., 0., 1.), &square(0.5, 0.5, 1.), BooleanOp::And).unwrap();
        validate(&result).unwrap();
        assert_eq!(result.counts().moves, 1);
        assert_close(result.signed_area(), 0.25);

        let mut corners = points(&result);
        corners.sort_by(|&a, &b| compare_point(a, b));
        corners.dedup();
        assert_eq!(corners, vec![
            Point::new(0.5, 0.5), Point::new(0.5, 1.), Point::new(1., 0.5), Point::new(1., 1.)]);
    }

    #[test]
    fn union_of_overlapping_squares() {
        let result = clip(&square(0., 0., 1.), &square(0.5, 0.5, 1.), BooleanOp::Or).unwrap();
        validate(&result).unwrap();
        assert_eq!(result.counts().moves, 1);
        assert_eq!(result.counts().ends, 1);
        // two corners poke out of each square
        assert_eq!(result.counts().lines, 7);
        assert_close(result.signed_area(), 1.75);
    }

    #[test]
    fn difference_of_overlapping_squares() {
        let result = clip(&square(0., 0., 1.), &square(0.5, 0.5, 1.), BooleanOp::Difference).unwrap();
        validate(&result).unwrap();
        assert_eq!(result.counts().moves, 1);
        assert_eq!(result.counts().lines, 5);
        assert_close(result.signed_area(), 0.75);
        for point in points(&result) {
            assert!(point.x <= 1. && point.y <= 1.);
        }
    }

    #[test]
    fn xor_of_overlapping_squares() {
        let result = clip(&square(0., 0., 1.), &square(0.5, 0.5, 1.), BooleanOp::Xor).unwrap();
        validate(&result).unwrap();
        // two L shapes meeting at (1, 0.5) and (0.5, 1)
        assert_eq!(result.counts().moves, 2);
        assert_eq!(result.counts().ends, 2);
        assert_close(result.signed_area(), 1.5);
        assert_eq!(bounding_box(&result), bounding_box(&parse_path("M 0,0 L 1.5,1.5 Z").unwrap()));
    }

    #[test]
    fn identical_inputs_cancel() {
        let a = square(0., 0., 1.);
        let b = square(0., 0., 1.);
        for &operation in &[BooleanOp::Xor, BooleanOp::Difference] {
            let result = clip(&a, &b, operation).unwrap();
            assert!(result.is_empty(), "{:?} left {}", operation, result);
        }
    }

    #[test]
    fn hole_winds_clockwise() {
        let outer = square(0., 0., 4.);
        let inner = square(1., 1., 2.);

        let result = clip(&outer, &inner, BooleanOp::Difference).unwrap();
        validate(&result).unwrap();
        assert_eq!(result.counts().moves, 2);
        assert_close(result.signed_area(), 12.);

        let result = clip(&outer, &inner, BooleanOp::And).unwrap();
        assert_eq!(result.counts().moves, 1);
        assert_close(result.signed_area(), 4.);

        let result = clip(&outer, &inner, BooleanOp::Or).unwrap();
        assert_eq!(result.counts().moves, 1);
        assert_close(result.signed_area(), 16.);
    }

    #[test]
    fn shared_edge_merges() {
        let result = clip(&square(0., 0., 1.), &square(1., 0., 1.), BooleanOp::Or).unwrap();
        validate(&result).unwrap();
        assert_eq!(result.counts().moves, 1);
        assert_close(result.signed_area(), 2.);
    }

    #[test]
    fn disjoint_squares() {
        let a = square(0., 0., 1.);
        let b = square(5., 5., 1.);

        assert!(clip(&a, &b, BooleanOp::And).unwrap().is_empty());

        let result = clip(&a, &b, BooleanOp::Or).unwrap();
        assert_eq!(result.counts().moves, 2);
        assert_close(result.signed_area(), 2.);

        let result = clip(&a, &b, BooleanOp::Xor).unwrap();
        assert_eq!(result.len(), a.len() + b.len());

        let result = clip(&a, &b, BooleanOp::Difference).unwrap();
        assert_eq!(format!("{:?}", result), format!("{:?}", a));
    }

    #[test]
    fn empty_inputs() {
        let a = square(0., 0., 1.);
        let empty = Path::new();
        assert!(clip(&a, &empty, BooleanOp::And).unwrap().is_empty());
        assert_eq!(clip(&a, &empty, BooleanOp::Difference).unwrap().len(), a.len());
        assert_eq!(clip(&empty, &a, BooleanOp::Or).unwrap().len(), a.len());
        assert!(clip(&empty, &a, BooleanOp::Difference).unwrap().is_empty());
    }

    #[test]
    fn invalid_input_is_rejected() {
        let open = parse_path("M 0,0 L 1,0 L 1,1").unwrap();
        match clip(&open, &square(0., 0., 1.), BooleanOp::Or) {
            Err(ref err) => match *err.kind() {
                ErrorKind::NoMoveBeforeEnd => {}
                ref other => panic!("unexpected error {:?}", other),
            },
            Ok(path) => panic!("clipped into {:?}", path),
        }
    }

    #[test]
    fn output_respects_the_cap() {
        let mut a = Path::with_capacity(6);
        a.move_to(Point::new(0., 0.)).unwrap();
        a.line_to(Point::new(1., 0.)).unwrap();
        a.line_to(Point::new(1., 1.)).unwrap();
        a.line_to(Point::new(0., 1.)).unwrap();
        a.close().unwrap();

        // the union needs nine segments
        match clip(&a, &square(0.5, 0.5, 1.), BooleanOp::Or) {
            Err(ref err) => match *err.kind() {
                ErrorKind::PathTooLong(6) => {}
                ref other => panic!("unexpected error {:?}", other),
            },
            Ok(path) => panic!("clipped into {:?}", path),
        }
    }

    #[test]
    fn curves_are_flattened_and_inputs_untouched() {
        let circle = parse_path("M 1,0 A 1,1 0 0 1 -1,0 A 1,1 0 0 1 1,0 Z").unwrap();
        let frame = square(-2., -2., 4.);
        let linearizer = Linearizer::with_resolution(32);

        let result = clip_with(&circle, &frame, BooleanOp::And, &linearizer).unwrap();
        assert_eq!(circle.counts().arcs, 2);
        assert_eq!(circle.len(), 4);
        for (_, segment) in result.iter() {
            assert!(! segment.kind().is_curve());
        }

        let mut flat = circle.copy();
        linearizer.linearize(&mut flat).unwrap();
        assert!((result.signed_area() - flat.signed_area()).abs() < 1e-6);
        assert!(result.counts().of(SegmentKind::Line) > 32);
    }
}
