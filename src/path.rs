use std::fmt;
use std::ops;

use ::errors::{ErrorKind, Result};
use ::geom::{Coord, Point, Vector};

/// Default hard cap on the number of segments in one path.
pub const DEFAULT_MAX_SEGMENTS: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    End,
    Move,
    Line,
    Arc,
    QuadraticBezier,
    CubicBezier,
}

impl SegmentKind {
    /// Number of points this kind of segment stores.
    pub fn point_count(self) -> usize {
        match self {
            SegmentKind::End => 0,
            SegmentKind::Move | SegmentKind::Line => 1,
            SegmentKind::QuadraticBezier => 2,
            SegmentKind::Arc | SegmentKind::CubicBezier => 3,
        }
    }

    pub fn is_curve(self) -> bool {
        match self {
            SegmentKind::Arc | SegmentKind::QuadraticBezier | SegmentKind::CubicBezier => true,
            _ => false,
        }
    }
}

bitflags! {
    pub struct ArcFlags: u8 {
        const LARGE_ARC = 0x01;
        const SWEEP = 0x02;
    }
}

/// One drawing instruction.
///
/// Points are stored in a fixed array and only the first `point_count()` of them are meaningful.
/// Arcs pack their parameters as `(rx, ry)`, `(rotation in degrees, 0)`, `(end x, end y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    kind: SegmentKind,
    points: [Point; 3],
    flags: ArcFlags,
}

impl Segment {
    pub fn new(kind: SegmentKind) -> Segment {
        return Segment{
            kind,
            points: [Point::origin(); 3],
            flags: ArcFlags::empty(),
        };
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn point_count(&self) -> usize {
        self.kind.point_count()
    }

    pub fn points(&self) -> &[Point] {
        &self.points[.. self.kind.point_count()]
    }

    pub fn flags(&self) -> ArcFlags {
        self.flags
    }

    /// The point this segment draws to, or None for END.
    pub fn end_point(&self) -> Option<Point> {
        self.points().last().cloned()
    }

    pub fn arc_radius(&self) -> Vector {
        Vector::new(self.points[0].x, self.points[0].y)
    }

    pub fn arc_rotation(&self) -> Coord {
        self.points[1].x
    }

    fn translate(&mut self, delta: Vector) {
        let moved = match self.kind {
            SegmentKind::End => 0 .. 0,
            // radius and rotation aren't coordinates
            SegmentKind::Arc => 2 .. 3,
            kind => 0 .. kind.point_count(),
        };
        for point in self.points[moved].iter_mut() {
            *point = *point + delta;
        }
    }
}


/// Handle to a node of one particular `Path`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node {
    segment: Segment,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Running per-kind tallies of a path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SegmentCounts {
    pub total: usize,
    pub ends: usize,
    pub moves: usize,
    pub lines: usize,
    pub arcs: usize,
    pub quadratic_beziers: usize,
    pub cubic_beziers: usize,
}

impl SegmentCounts {
    pub fn of(&self, kind: SegmentKind) -> usize {
        match kind {
            SegmentKind::End => self.ends,
            SegmentKind::Move => self.moves,
            SegmentKind::Line => self.lines,
            SegmentKind::Arc => self.arcs,
            SegmentKind::QuadraticBezier => self.quadratic_beziers,
            SegmentKind::CubicBezier => self.cubic_beziers,
        }
    }

    fn slot(&mut self, kind: SegmentKind) -> &mut usize {
        match kind {
            SegmentKind::End => &mut self.ends,
            SegmentKind::Move => &mut self.moves,
            SegmentKind::Line => &mut self.lines,
            SegmentKind::Arc => &mut self.arcs,
            SegmentKind::QuadraticBezier => &mut self.quadratic_beziers,
            SegmentKind::CubicBezier => &mut self.cubic_beziers,
        }
    }

    fn add(&mut self, kind: SegmentKind) {
        self.total += 1;
        *self.slot(kind) += 1;
    }

    fn remove(&mut self, kind: SegmentKind) {
        self.total -= 1;
        *self.slot(kind) -= 1;
    }

    fn merge(&mut self, other: &SegmentCounts) {
        self.total += other.total;
        self.ends += other.ends;
        self.moves += other.moves;
        self.lines += other.lines;
        self.arcs += other.arcs;
        self.quadratic_beziers += other.quadratic_beziers;
        self.cubic_beziers += other.cubic_beziers;
    }
}


/// A list of segments in drawing order.
///
/// Nodes live in an arena owned by the path and are linked by index, so splicing a run of
/// segments in place of another (see `replace`) is only a matter of relinking.  The path itself
/// owns the head and tail handles, the per-kind counters, and the segment cap; every append is
/// checked against the cap.
pub struct Path {
    nodes: Vec<Option<Node>>,
    vacant: Vec<usize>,
    first: Option<NodeId>,
    last: Option<NodeId>,
    counts: SegmentCounts,
    capacity: usize,
}

impl Path {
    pub fn new() -> Path {
        return Path::with_capacity(DEFAULT_MAX_SEGMENTS);
    }

    pub fn with_capacity(capacity: usize) -> Path {
        return Path{
            nodes: Vec::new(),
            vacant: Vec::new(),
            first: None,
            last: None,
            counts: SegmentCounts::default(),
            capacity,
        };
    }

    /// Maximum number of segments this path accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.counts.total
    }

    pub fn is_empty(&self) -> bool {
        self.counts.total == 0
    }

    pub fn counts(&self) -> &SegmentCounts {
        &self.counts
    }

    pub fn first(&self) -> Option<NodeId> {
        self.first
    }

    pub fn last(&self) -> Option<NodeId> {
        self.last
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev
    }

    pub fn iter(&self) -> Iter {
        Iter{ path: self, cursor: self.first }
    }

    fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.0) {
            Some(&Some(ref node)) => node,
            _ => panic!("{:?} does not belong to this path", id),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes.get_mut(id.0) {
            Some(&mut Some(ref mut node)) => node,
            _ => panic!("{:?} does not belong to this path", id),
        }
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.vacant.pop() {
            self.nodes[index] = Some(node);
            return NodeId(index);
        }
        self.nodes.push(Some(node));
        return NodeId(self.nodes.len() - 1);
    }

    fn release(&mut self, id: NodeId) -> Node {
        match self.nodes.get_mut(id.0).and_then(|slot| slot.take()) {
            Some(node) => {
                self.vacant.push(id.0);
                node
            }
            None => panic!("{:?} does not belong to this path", id),
        }
    }

    // Links a segment at the tail without consulting the cap
    fn link(&mut self, segment: Segment) -> NodeId {
        let prev = self.last;
        let id = self.allocate(Node{ segment, prev, next: None });
        match prev {
            Some(prev) => self.node_mut(prev).next = Some(id),
            None => self.first = Some(id),
        }
        self.last = Some(id);
        self.counts.add(segment.kind);
        return id;
    }

    /// Appends an empty segment of the given kind, failing once the path is full.
    pub fn append_segment(&mut self, kind: SegmentKind) -> Result<NodeId> {
        if self.counts.total >= self.capacity {
            bail!(ErrorKind::PathTooLong(self.capacity));
        }
        Ok(self.link(Segment::new(kind)))
    }

    /// Overwrites one point of a segment.
    ///
    /// Panics if `index` is not below the segment kind's point count, or if `id` belongs to
    /// another path.  Both are caller bugs, like indexing a slice out of range.
    pub fn set_point(&mut self, id: NodeId, index: usize, point: Point) {
        let segment = &mut self.node_mut(id).segment;
        assert!(index < segment.point_count(), "{:?} has no point {}", segment.kind, index);
        segment.points[index] = point;
    }

    pub fn set_flags(&mut self, id: NodeId, flags: ArcFlags) {
        self.node_mut(id).segment.flags = flags;
    }

    // -------------------------------------------------------------------------
    // builder

    pub fn move_to(&mut self, to: Point) -> Result<NodeId> {
        let id = self.append_segment(SegmentKind::Move)?;
        self.set_point(id, 0, to);
        Ok(id)
    }

    pub fn line_to(&mut self, to: Point) -> Result<NodeId> {
        let id = self.append_segment(SegmentKind::Line)?;
        self.set_point(id, 0, to);
        Ok(id)
    }

    pub fn arc_to(&mut self, radius: Vector, rotation: Coord, flags: ArcFlags, to: Point) -> Result<NodeId> {
        let id = self.append_segment(SegmentKind::Arc)?;
        self.set_point(id, 0, Point::new(radius.x, radius.y));
        self.set_point(id, 1, Point::new(rotation, 0.));
        self.set_point(id, 2, to);
        self.set_flags(id, flags);
        Ok(id)
    }

    pub fn quadratic_to(&mut self, control: Point, to: Point) -> Result<NodeId> {
        let id = self.append_segment(SegmentKind::QuadraticBezier)?;
        self.set_point(id, 0, control);
        self.set_point(id, 1, to);
        Ok(id)
    }

    pub fn cubic_to(&mut self, control1: Point, control2: Point, to: Point) -> Result<NodeId> {
        let id = self.append_segment(SegmentKind::CubicBezier)?;
        self.set_point(id, 0, control1);
        self.set_point(id, 1, control2);
        self.set_point(id, 2, to);
        Ok(id)
    }

    pub fn close(&mut self) -> Result<NodeId> {
        self.append_segment(SegmentKind::End)
    }

    // -------------------------------------------------------------------------
    // whole-path operations

    /// Drops every segment.  The capacity is kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.vacant.clear();
        self.first = None;
        self.last = None;
        self.counts = SegmentCounts::default();
    }

    /// Deep copy with a compacted arena; handles into `self` are not valid for the copy.
    pub fn copy(&self) -> Path {
        let mut copy = Path::with_capacity(self.capacity);
        copy.nodes.reserve(self.len());
        for (_, segment) in self.iter() {
            copy.link(*segment);
        }
        return copy;
    }

    /// Translates every coordinate of the path by `delta`.
    pub fn offset(&mut self, delta: Vector) {
        let mut cursor = self.first;
        while let Some(id) = cursor {
            let node = self.node_mut(id);
            node.segment.translate(delta);
            cursor = node.next;
        }
    }

    /// Splices `replacement` into this path where `old` used to be.
    ///
    /// `old` is released, and the replacement's nodes move into this path's arena; its counters
    /// are merged into ours.  An empty replacement simply removes `old`.
    pub fn replace(&mut self, old: NodeId, mut replacement: Path) {
        let removed = self.release(old);
        let before = removed.prev;
        let after = removed.next;

        let mut head = None;
        let mut tail = None;
        let mut cursor = replacement.first;
        while let Some(id) = cursor {
            let node = replacement.release(id);
            cursor = node.next;
            let new_id = self.allocate(Node{ segment: node.segment, prev: tail.or(before), next: None });
            match tail {
                Some(tail) => self.node_mut(tail).next = Some(new_id),
                None => head = Some(new_id),
            }
            tail = Some(new_id);
        }

        let (head, tail) = match (head, tail) {
            (Some(head), Some(tail)) => {
                self.node_mut(tail).next = after;
                (Some(head), Some(tail))
            }
            _ => (after, before),
        };
        match before {
            Some(before) => self.node_mut(before).next = head,
            None => self.first = head,
        }
        match after {
            Some(after) => self.node_mut(after).prev = tail,
            None => self.last = tail,
        }

        self.counts.remove(removed.segment.kind);
        self.counts.merge(&replacement.counts);
    }

    /// Shoelace area of the closed sub-paths, counter-clockwise positive.
    ///
    /// Only segment end points are used, so curves should be linearized first for a meaningful
    /// answer.
    pub fn signed_area(&self) -> Coord {
        let mut area = 0.;
        let mut ring: Vec<Point> = Vec::new();
        for (_, segment) in self.iter() {
            match segment.kind {
                SegmentKind::Move => {
                    ring.clear();
                    ring.extend(segment.end_point());
                }
                SegmentKind::End => {
                    if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
                        area += last.to_vector().cross(first.to_vector());
                        for (a, b) in ring.iter().zip(ring.iter().skip(1)) {
                            area += a.to_vector().cross(b.to_vector());
                        }
                    }
                    ring.clear();
                }
                _ => ring.extend(segment.end_point()),
            }
        }
        return area / 2.;
    }
}

impl Default for Path {
    fn default() -> Path {
        Path::new()
    }
}

impl Clone for Path {
    fn clone(&self) -> Path {
        self.copy()
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|(_, segment)| segment)).finish()
    }
}

impl ops::Index<NodeId> for Path {
    type Output = Segment;

    fn index(&self, id: NodeId) -> &Segment {
        &self.node(id).segment
    }
}

pub struct Iter<'a> {
    path: &'a Path,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeId, &'a Segment);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.path.node(id);
        self.cursor = node.next;
        Some((id, &node.segment))
    }
}
