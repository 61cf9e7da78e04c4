use ::curve;
use ::errors::{ErrorKind, Result, ResultExt};
use ::geom::Point;
use ::path::{Path, Segment, SegmentKind};

/// Default number of steps used to approximate one curve.
pub const DEFAULT_RESOLUTION: usize = 100;

/// Replaces curves with polylines.
///
/// Each curve becomes `resolution + 1` LINE segments, one per sample, including the sample at the
/// curve's start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Linearizer {
    pub arc_resolution: usize,
    pub bezier_resolution: usize,
}

impl Default for Linearizer {
    fn default() -> Linearizer {
        Linearizer::with_resolution(DEFAULT_RESOLUTION)
    }
}

impl Linearizer {
    pub fn with_resolution(resolution: usize) -> Linearizer {
        Linearizer{
            arc_resolution: resolution,
            bezier_resolution: resolution,
        }
    }

    /// Flattens every curve in the path, in place.
    ///
    /// Curves are sampled relative to the end of the previous segment; after an END that
    /// reference resets to the origin.  Fails with `PathTooLong` if the flattened path would no
    /// longer fit in the path's capacity, in which case the path is left partially flattened.
    pub fn linearize(&self, path: &mut Path) -> Result<()> {
        let mut reference = Point::origin();
        let mut replaced = 0;
        let mut cursor = path.first();
        while let Some(id) = cursor {
            cursor = path.next(id);
            let segment = path[id];
            match segment.kind() {
                SegmentKind::End => {
                    reference = Point::origin();
                }
                SegmentKind::Move | SegmentKind::Line => {
                    reference = segment.points()[0];
                }
                SegmentKind::Arc | SegmentKind::QuadraticBezier | SegmentKind::CubicBezier => {
                    // The node being replaced frees up one slot
                    let room = path.capacity() - path.len() + 1;
                    let capacity = path.capacity();
                    let polyline = self.flatten(reference, &segment, room)
                        .chain_err(|| ErrorKind::PathTooLong(capacity))?;
                    path.replace(id, polyline);
                    replaced += 1;
                    if let Some(end) = segment.end_point() {
                        reference = end;
                    }
                }
            }
        }
        debug!("linearized {} curves; path now has {} segments", replaced, path.len());
        Ok(())
    }

    fn flatten(&self, start: Point, segment: &Segment, capacity: usize) -> Result<Path> {
        let points = segment.points();
        let samples = match segment.kind() {
            SegmentKind::Arc => curve::sample_arc(
                start, points[2], segment.arc_radius(), segment.arc_rotation(), segment.flags(),
                self.arc_resolution),
            SegmentKind::QuadraticBezier => curve::sample_quadratic_bezier(
                start, points[0], points[1], self.bezier_resolution),
            SegmentKind::CubicBezier => curve::sample_cubic_bezier(
                start, points[0], points[1], points[2], self.bezier_resolution),
            _ => Vec::new(),
        };

        let mut polyline = Path::with_capacity(capacity);
        for point in samples {
            polyline.line_to(point)?;
        }
        Ok(polyline)
    }
}

/// Flattens every curve in the path using the default resolution.
pub fn linearize(path: &mut Path) -> Result<()> {
    Linearizer::default().linearize(path)
}
