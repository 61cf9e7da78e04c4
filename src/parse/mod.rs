//! Path data parser.
//!
//! Accepts the absolute SVG path commands `M`, `L`, `A`, `Q`, `C` and `Z`, each followed by
//! exactly the numbers it needs.  Numbers are separated by whitespace and/or commas.

mod util;

use nom::types::CompleteStr;

use self::util::{coordinate, flag, point, separator};
use ::errors::{ErrorKind, Result};
use ::geom::{Coord, Point, Vector};
use ::path::{ArcFlags, Path, DEFAULT_MAX_SEGMENTS};


#[derive(Clone, Copy, Debug, PartialEq)]
enum Command {
    Move(Point),
    Line(Point),
    Arc{ radius: Point, rotation: Coord, large_arc: bool, sweep: bool, to: Point },
    Quadratic(Point, Point),
    Cubic(Point, Point, Point),
    Close,
}

impl Command {
    fn append_to(self, path: &mut Path) -> Result<()> {
        match self {
            Command::Move(to) => path.move_to(to)?,
            Command::Line(to) => path.line_to(to)?,
            Command::Arc{ radius, rotation, large_arc, sweep, to } => {
                let mut flags = ArcFlags::empty();
                flags.set(ArcFlags::LARGE_ARC, large_arc);
                flags.set(ArcFlags::SWEEP, sweep);
                path.arc_to(Vector::new(radius.x, radius.y), rotation, flags, to)?
            }
            Command::Quadratic(control, to) => path.quadratic_to(control, to)?,
            Command::Cubic(control1, control2, to) => path.cubic_to(control1, control2, to)?,
            Command::Close => path.close()?,
        };
        Ok(())
    }
}

named!(move_to<CompleteStr, Command>, do_parse!(
    char!('M') >>
    to: point >>
    (Command::Move(to))
));

named!(line_to<CompleteStr, Command>, do_parse!(
    char!('L') >>
    to: point >>
    (Command::Line(to))
));

named!(arc_to<CompleteStr, Command>, do_parse!(
    char!('A') >>
    radius: point >>
    rotation: coordinate >>
    large_arc: flag >>
    sweep: flag >>
    to: point >>
    (Command::Arc{ radius, rotation, large_arc, sweep, to })
));

named!(quadratic_to<CompleteStr, Command>, do_parse!(
    char!('Q') >>
    control: point >>
    to: point >>
    (Command::Quadratic(control, to))
));

named!(cubic_to<CompleteStr, Command>, do_parse!(
    char!('C') >>
    control1: point >>
    control2: point >>
    to: point >>
    (Command::Cubic(control1, control2, to))
));

named!(close<CompleteStr, Command>, value!(Command::Close, char!('Z')));

named!(command<CompleteStr, Command>,
    alt!(move_to | line_to | arc_to | quadratic_to | cubic_to | close)
);


/// Parses path data into a new path with the default segment cap.
pub fn parse_path(data: &str) -> Result<Path> {
    parse_path_with_capacity(data, DEFAULT_MAX_SEGMENTS)
}

/// Parses path data into a new path holding at most `capacity` segments.
///
/// Each command is appended as soon as it is read, so an over-long input fails with
/// `PathTooLong` at the first command past the cap, whatever follows it.  Otherwise fails with
/// `ParsingFailed` carrying the byte offset of the first command that could not be read.
/// Nothing is returned on failure.
pub fn parse_path_with_capacity(data: &str, capacity: usize) -> Result<Path> {
    let mut path = Path::with_capacity(capacity);
    let mut input = CompleteStr(data);
    loop {
        if let Ok((rest, _)) = separator(input) {
            input = rest;
        }
        if input.0.is_empty() {
            break;
        }

        match command(input) {
            Ok((rest, command)) => {
                command.append_to(&mut path)?;
                input = rest;
            }
            Err(_) => bail!(ErrorKind::ParsingFailed(data.len() - input.0.len())),
        }
    }
    Ok(path)
}
