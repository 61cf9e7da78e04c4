//! Path data serialization and SVG output.

use std::fmt;

use svg::Document;
use svg::node::element::Path as SvgPath;

use ::geom::{Coord, Point};
use ::path::{ArcFlags, Path, SegmentKind};

struct Pair(Point);

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.0.x, self.0.y)
    }
}

fn flag(flags: ArcFlags, flag: ArcFlags) -> u8 {
    if flags.contains(flag) { 1 } else { 0 }
}

/// Serializes the path back into path data, one command per segment, each followed by a space.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (_, segment) in self.iter() {
            let points = segment.points();
            match segment.kind() {
                SegmentKind::End => write!(f, "Z ")?,
                SegmentKind::Move => write!(f, "M {} ", Pair(points[0]))?,
                SegmentKind::Line => write!(f, "L {} ", Pair(points[0]))?,
                SegmentKind::Arc => {
                    let radius = segment.arc_radius();
                    write!(f, "A {:.4} {:.4} {:.4} {} {} {} ",
                        radius.x, radius.y, segment.arc_rotation(),
                        flag(segment.flags(), ArcFlags::LARGE_ARC),
                        flag(segment.flags(), ArcFlags::SWEEP),
                        Pair(points[2]))?;
                }
                SegmentKind::QuadraticBezier => {
                    write!(f, "Q {} {} ", Pair(points[0]), Pair(points[1]))?;
                }
                SegmentKind::CubicBezier => {
                    write!(f, "C {} {} {} ", Pair(points[0]), Pair(points[1]), Pair(points[2]))?;
                }
            }
        }
        Ok(())
    }
}

/// Presentation attributes for one rendered path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathStyle {
    pub stroke_width: Coord,
    pub stroke: Option<String>,
    pub fill: Option<String>,
    pub fill_opacity: Option<Coord>,
}

impl Default for PathStyle {
    fn default() -> PathStyle {
        PathStyle{
            stroke_width: 1.,
            stroke: Some("black".to_string()),
            fill: None,
            fill_opacity: None,
        }
    }
}

/// Builds a `<path>` element for the given path.  Unset colors render as "none".
pub fn path_element(path: &Path, style: &PathStyle) -> SvgPath {
    let mut element = SvgPath::new()
        .set("d", path.to_string())
        .set("stroke-width", format!("{:.4}px", style.stroke_width))
        .set("stroke", style.stroke.clone().unwrap_or_else(|| "none".to_string()))
        .set("fill", style.fill.clone().unwrap_or_else(|| "none".to_string()));
    if let Some(opacity) = style.fill_opacity {
        element = element.set("fill-opacity", format!("{:.4}", opacity));
    }
    return element;
}

/// Builds a document of the given size with one `<path>` per layer, bottom layer first.
pub fn document(width: Coord, height: Coord, layers: &[(&Path, &PathStyle)]) -> Document {
    let mut document = Document::new()
        .set("width", format!("{:.4}", width))
        .set("height", format!("{:.4}", height))
        .set("viewBox", (0., 0., width, height));
    for &(path, style) in layers {
        document = document.add(path_element(path, style));
    }
    return document;
}


#[cfg(test)]
mod tests {
    use super::*;
    use ::geom::Vector;
    use ::parse::parse_path;

    #[test]
    fn serialization_format() {
        let mut path = Path::new();
        path.move_to(Point::new(0., 1.1)).unwrap();
        path.line_to(Point::new(10., 23.5432)).unwrap();
        path.arc_to(Vector::new(0.42, 50.), 49., ArcFlags::LARGE_ARC, Point::new(10.2, -3.)).unwrap();
        path.quadratic_to(Point::new(1., 2.), Point::new(3., 4.)).unwrap();
        path.cubic_to(Point::new(50.2, 0.567), Point::new(40., 10.), Point::new(5., 5.69)).unwrap();
        path.close().unwrap();

        assert_eq!(path.to_string(), concat!(
            "M 0.0000,1.1000 ",
            "L 10.0000,23.5432 ",
            "A 0.4200 50.0000 49.0000 1 0 10.2000,-3.0000 ",
            "Q 1.0000,2.0000 3.0000,4.0000 ",
            "C 50.2000,0.5670 40.0000,10.0000 5.0000,5.6900 ",
            "Z "));
        assert_eq!(Path::new().to_string(), "");
    }

    #[test]
    fn serialized_data_parses_back() {
        let data = "M 0,0 L 10,0 A 5,5 0 0 1 10,10 Q 5,15 0,10 C -1,8 -1,2 0,0 Z";
        let once = parse_path(data).unwrap().to_string();
        let twice = parse_path(&once).unwrap().to_string();
        assert_eq!(once, twice);
    }

    #[test]
    fn copies_serialize_identically() {
        let path = parse_path("M 1,2 L 3,4 Q 5,6 7,8 Z").unwrap();
        assert_eq!(path.copy().to_string(), path.to_string());
    }

    #[test]
    fn document_attributes() {
        let path = parse_path("M 0,0 L 1,0 L 1,1 Z").unwrap();
        let style = PathStyle{
            stroke_width: 2.,
            stroke: Some("red".to_string()),
            fill: Some("blue".to_string()),
            fill_opacity: Some(0.5),
        };
        let svg = document(100., 50., &[(&path, &style), (&path, &PathStyle::default())]).to_string();
        assert!(svg.contains("width=\"100.0000\""));
        assert!(svg.contains("height=\"50.0000\""));
        assert!(svg.contains("d=\"M 0.0000,0.0000 L 1.0000,0.0000 L 1.0000,1.0000 Z \""));
        assert!(svg.contains("stroke-width=\"2.0000px\""));
        assert!(svg.contains("stroke=\"red\""));
        assert!(svg.contains("fill=\"blue\""));
        assert!(svg.contains("fill-opacity=\"0.5000\""));
        assert!(svg.contains("stroke=\"black\""));
        assert!(svg.contains("fill=\"none\""));
        assert_eq!(svg.matches("<path").count(), 2);
    }
}
