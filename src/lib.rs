//! Segment-list representation of SVG-like paths, curve flattening, and Boolean clipping of
//! polygons with a sweep line.

extern crate bit_vec;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate error_chain;
extern crate euclid;
#[macro_use]
extern crate log;
extern crate memmap;
#[macro_use]
extern crate nom;
extern crate svg;

pub mod clip;
pub mod curve;
pub mod errors;
pub mod events;
pub mod geom;
pub mod input_buffer;
pub mod linearize;
pub mod ordering;
pub mod parse;
pub mod path;
pub mod render;
pub mod validate;

pub use clip::{clip, clip_with, BooleanOp};
pub use errors::{Error, ErrorKind, Result};
pub use linearize::{linearize, Linearizer};
pub use parse::{parse_path, parse_path_with_capacity};
pub use path::{ArcFlags, NodeId, Path, Segment, SegmentKind};
pub use render::{document, path_element, PathStyle};
pub use validate::validate;
