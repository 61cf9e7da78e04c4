use std::cmp::Ordering;
use std::ops;

use ::geom::Point;
use ::ordering::compare_point;
use ::path::{Path, SegmentKind};

/// Which input an event came from.  Subject sorts first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PolygonType {
    Subject,
    Clipping,
}

/// How an edge contributes when it coincides with an edge of the other polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeType {
    Normal,
    NonContributing,
    SameTransition,
    DifferentTransition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(usize);

impl EventId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One endpoint of one polygon edge.
///
/// `edge_type`, `in_out` and `inside` are only meaningful on left events, and only once the
/// clipping sweep has classified the edge.
#[derive(Clone, Debug)]
pub struct SweepEvent {
    pub point: Point,
    pub polygon: PolygonType,
    /// Sub-path the edge came from, numbered across both polygons
    pub contour: usize,
    pub edge_type: EdgeType,
    /// Crossing this edge upwards leaves its own polygon
    pub in_out: bool,
    /// The edge lies inside the other polygon
    pub inside: bool,
    pub is_left: bool,
    /// The event at the far end of the same edge
    pub other: Option<EventId>,
    pub prev: Option<EventId>,
    pub next: Option<EventId>,
    // Closest edge below this one that made it into the result
    pub(crate) below_in_result: Option<EventId>,
}

impl SweepEvent {
    fn new(point: Point, polygon: PolygonType, contour: usize) -> SweepEvent {
        return SweepEvent{
            point,
            polygon,
            contour,
            edge_type: EdgeType::Normal,
            in_out: false,
            inside: false,
            is_left: false,
            other: None,
            prev: None,
            next: None,
            below_in_result: None,
        };
    }
}

/// Arena of sweep events, threaded into a doubly linked queue.
pub struct EventQueue {
    events: Vec<SweepEvent>,
    head: Option<EventId>,
    tail: Option<EventId>,
    contours: usize,
}

impl EventQueue {
    pub fn new() -> EventQueue {
        return EventQueue{
            events: Vec::new(),
            head: None,
            tail: None,
            contours: 0,
        };
    }

    /// Number of events in the arena, linked or not.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn head(&self) -> Option<EventId> {
        self.head
    }

    pub fn tail(&self) -> Option<EventId> {
        self.tail
    }

    /// Walks the queue in link order.
    pub fn iter(&self) -> Iter {
        Iter{ queue: self, cursor: self.head }
    }

    // Adds an event to the arena without queueing it
    pub(crate) fn push_detached(&mut self, point: Point, polygon: PolygonType, contour: usize) -> EventId {
        self.events.push(SweepEvent::new(point, polygon, contour));
        return EventId(self.events.len() - 1);
    }

    fn push(&mut self, point: Point, polygon: PolygonType, contour: usize) -> EventId {
        let id = self.push_detached(point, polygon, contour);
        self.events[id.0].prev = self.tail;
        match self.tail {
            Some(tail) => self.events[tail.0].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        return id;
    }

    /// Makes two events the ends of one edge.
    pub(crate) fn pair(&mut self, a: EventId, b: EventId) {
        let order = compare_point(self.events[a.0].point, self.events[b.0].point);
        self.events[a.0].other = Some(b);
        self.events[a.0].is_left = order == Ordering::Less;
        self.events[b.0].other = Some(a);
        self.events[b.0].is_left = order == Ordering::Greater;
    }

    /// Appends two events per drawn segment of `path`, pairing them into edges.
    ///
    /// Both events of a segment sit on its end point: the first closes the edge arriving there,
    /// the second opens the edge leaving.  END closes the sub-path by pairing its last outgoing
    /// event with the event left by the MOVE.  Curves are treated as straight edges to their end
    /// points, so the path should be linearized first.
    pub fn insert_path(&mut self, path: &Path, polygon: PolygonType) {
        let mut start = None;
        let mut outgoing = None;
        for (_, segment) in path.iter() {
            let point = match segment.end_point() {
                Some(point) => point,
                None => {
                    // END
                    if let (Some(start), Some(last)) = (start, outgoing) {
                        self.pair(last, start);
                    }
                    start = None;
                    outgoing = None;
                    self.contours += 1;
                    continue;
                }
            };

            let contour = self.contours;
            let incoming = self.push(point, polygon, contour);
            if segment.kind() == SegmentKind::Move {
                if start.is_some() {
                    // The previous sub-path was never closed, so it gets no closing edge
                    self.contours += 1;
                    self.events[incoming.0].contour = self.contours;
                }
                start = Some(incoming);
            }
            else if let Some(last) = outgoing {
                self.pair(last, incoming);
            }
            let contour = self.events[incoming.0].contour;
            outgoing = Some(self.push(point, polygon, contour));
        }
        if start.is_some() {
            self.contours += 1;
        }
    }

    /// Orders the queue by point, with left events ahead of right events at the same point.
    ///
    /// Ties beyond that keep insertion order.
    pub fn sort(&mut self) {
        let mut order: Vec<EventId> = self.iter().collect();
        {
            let events = &self.events;
            order.sort_by(|&a, &b| {
                let (a, b) = (&events[a.0], &events[b.0]);
                compare_point(a.point, b.point).then(b.is_left.cmp(&a.is_left))
            });
        }

        let mut prev = None;
        for &id in &order {
            self.events[id.0].prev = prev;
            if let Some(prev) = prev {
                self.events[prev.0].next = Some(id);
            }
            prev = Some(id);
        }
        if let Some(last) = prev {
            self.events[last.0].next = None;
        }
        self.head = order.first().cloned();
        self.tail = prev;
    }
}

impl ops::Index<EventId> for EventQueue {
    type Output = SweepEvent;

    fn index(&self, id: EventId) -> &SweepEvent {
        &self.events[id.0]
    }
}
impl ops::IndexMut<EventId> for EventQueue {
    fn index_mut(&mut self, id: EventId) -> &mut SweepEvent {
        &mut self.events[id.0]
    }
}

pub struct Iter<'a> {
    queue: &'a EventQueue,
    cursor: Option<EventId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = EventId;

    fn next(&mut self) -> Option<EventId> {
        let id = self.cursor?;
        self.cursor = self.queue.events[id.0].next;
        Some(id)
    }
}

/// Builds the sorted event queue for a subject and a clipping path.
pub fn build_event_queue(subject: &Path, clipping: &Path) -> EventQueue {
    let mut queue = EventQueue::new();
    queue.insert_path(subject, PolygonType::Subject);
    queue.insert_path(clipping, PolygonType::Clipping);
    queue.sort();
    debug!("built {} sweep events", queue.len());
    return queue;
}
