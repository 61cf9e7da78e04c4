use std::io::Write;

extern crate env_logger;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate svg;
extern crate termcolor;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
#[macro_use]
extern crate clap;

extern crate pathclip;
use pathclip::errors::{Error, Result, ResultExt};
use pathclip::geom::{bounding_rect, Coord, Rect, Vector};
use pathclip::input_buffer::InputBuffer;
use pathclip::linearize::{Linearizer, DEFAULT_RESOLUTION};
use pathclip::path::{Path, DEFAULT_MAX_SEGMENTS};
use pathclip::render::{document, PathStyle};
use pathclip::{clip_with, validate, BooleanOp};

// Blank space around the drawing, in path units
const MARGIN: Coord = 8.;

fn main() {
    env_logger::init();
    match run() {
        Ok(()) => {}
        Err(err) => {
            drop(write_err(err));
            std::process::exit(1);
        }
    }
}

fn write_err(err: Error) -> Result<()> {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(&mut stderr, "error: ")?;
    stderr.set_color(&ColorSpec::new())?;
    writeln!(&mut stderr, "{}", err)?;
    for cause in err.iter().skip(1) {
        writeln!(&mut stderr, "  caused by: {}", cause)?;
    }
    if let Some(backtrace) = err.backtrace() {
        writeln!(&mut stderr, "{:?}", backtrace)?;
    }
    Ok(())
}

struct Options {
    capacity: usize,
    linearizer: Linearizer,
}

fn run() -> Result<()> {
    let args = clap_app!(pathclip =>
        (about: "Parse, flatten and combine SVG-style paths")
        (@arg cap: -n --cap +takes_value +global "Maximum number of segments per path")
        (@arg resolution: -r --resolution +takes_value +global "Number of steps used to flatten each curve")
        (@subcommand show =>
            (about: "Print a path, its segment counts and its area")
            (@arg file: +required "Path data file, or - for stdin")
            (@arg linearize: -l --linearize "Flatten curves into lines first")
        )
        (@subcommand clip =>
            (about: "Combine two closed paths")
            (@arg subject: +required "Subject path data file, or - for stdin")
            (@arg clipping: +required "Clipping path data file")
            (@arg op: -o --op +takes_value "One of and, or, xor, diff (default: and)")
            (@arg outfile: -w --write +takes_value "Also render the inputs and the result as SVG")
        )
        (@subcommand offset =>
            (about: "Translate a path")
            (@arg file: +required "Path data file, or - for stdin")
            (@arg dx: +required +allow_hyphen_values "Horizontal offset")
            (@arg dy: +required +allow_hyphen_values "Vertical offset")
        )
    ).get_matches();

    let options = Options{
        capacity: parse_number(&args, "cap", DEFAULT_MAX_SEGMENTS)?,
        linearizer: Linearizer::with_resolution(parse_number(&args, "resolution", DEFAULT_RESOLUTION)?),
    };

    // Dispatch!
    match args.subcommand() {
        ("show", Some(subargs)) => { do_show(&options, &subargs)? },
        ("clip", Some(subargs)) => { do_clip(&options, &subargs)? },
        ("offset", Some(subargs)) => { do_offset(&options, &subargs)? },
        _ => { println!("{}", args.usage()); },
    }

    Ok(())
}

fn parse_number<T: std::str::FromStr>(args: &clap::ArgMatches, name: &str, default: T) -> Result<T> {
    match args.value_of(name) {
        Some(value) => value.parse().map_err(|_| format!("--{} expects a number, got {:?}", name, value).into()),
        None => Ok(default),
    }
}

fn read_path(options: &Options, filename: &str) -> Result<Path> {
    let input = InputBuffer::open(filename)
        .chain_err(|| format!("couldn't read {}", filename))?;
    let path = input.parse_path(options.capacity)
        .chain_err(|| format!("couldn't parse {}", filename))?;
    debug!("read {} segments from {}", path.len(), filename);
    Ok(path)
}

fn do_show(options: &Options, subargs: &clap::ArgMatches) -> Result<()> {
    let filename = subargs.value_of("file").unwrap();
    let mut path = read_path(options, filename)?;
    validate(&path).chain_err(|| format!("{} is not a closed path", filename))?;
    if subargs.is_present("linearize") {
        options.linearizer.linearize(&mut path)?;
    }

    println!("{}", path);
    let counts = path.counts();
    println!("segments: {} (M {}, L {}, A {}, Q {}, C {}, Z {})",
        counts.total, counts.moves, counts.lines, counts.arcs,
        counts.quadratic_beziers, counts.cubic_beziers, counts.ends);
    println!("area: {:.4}", path.signed_area());
    Ok(())
}

fn parse_op(name: &str) -> Result<BooleanOp> {
    Ok(match name {
        "and" => BooleanOp::And,
        "or" => BooleanOp::Or,
        "xor" => BooleanOp::Xor,
        "diff" => BooleanOp::Difference,
        _ => bail!("unknown operation {:?}; expected and, or, xor or diff", name),
    })
}

fn do_clip(options: &Options, subargs: &clap::ArgMatches) -> Result<()> {
    let subject = read_path(options, subargs.value_of("subject").unwrap())?;
    let clipping = read_path(options, subargs.value_of("clipping").unwrap())?;
    let operation = parse_op(subargs.value_of("op").unwrap_or("and"))?;

    let result = clip_with(&subject, &clipping, operation, &options.linearizer)?;
    println!("{}", result);
    info!("{:?}: {} segments, area {:.4}", operation, result.len(), result.signed_area());

    if let Some(outfile) = subargs.value_of("outfile") {
        let doc = clip_as_svg(options, &subject, &clipping, &result)?;
        svg::save(outfile, &doc)?;
    }
    Ok(())
}

fn clip_as_svg(options: &Options, subject: &Path, clipping: &Path, result: &Path) -> Result<svg::Document> {
    // Curve control points can sit well outside the drawn shape, so bounds come from flattened
    // copies
    let mut layers = Vec::new();
    for path in &[subject, clipping, result] {
        let mut flat = path.copy();
        options.linearizer.linearize(&mut flat)?;
        layers.push(flat);
    }

    let bounds = bounding_rect(layers.iter().flat_map(|path| {
        path.iter().filter_map(|(_, segment)| segment.end_point())
    })).unwrap_or(Rect::zero());

    // Shift everything into the document's positive quadrant
    let shift = Vector::new(MARGIN - bounds.origin.x, MARGIN - bounds.origin.y);
    let mut subject = subject.copy();
    let mut clipping = clipping.copy();
    let mut result = result.copy();
    for path in &mut [&mut subject, &mut clipping, &mut result] {
        path.offset(shift);
    }

    let subject_style = PathStyle{
        stroke_width: 1.,
        stroke: Some("#aaa".to_string()),
        fill: Some("#aaa".to_string()),
        fill_opacity: Some(0.25),
    };
    let clipping_style = PathStyle{
        stroke: Some("#88c".to_string()),
        fill: Some("#88c".to_string()),
        ..subject_style.clone()
    };
    let result_style = PathStyle{
        stroke_width: 2.,
        stroke: Some("darkgreen".to_string()),
        fill: Some("green".to_string()),
        fill_opacity: Some(0.5),
    };
    Ok(document(
        bounds.size.width + MARGIN * 2., bounds.size.height + MARGIN * 2.,
        &[(&subject, &subject_style), (&clipping, &clipping_style), (&result, &result_style)]))
}

fn do_offset(options: &Options, subargs: &clap::ArgMatches) -> Result<()> {
    let mut path = read_path(options, subargs.value_of("file").unwrap())?;
    let dx = parse_number(subargs, "dx", 0.)?;
    let dy = parse_number(subargs, "dy", 0.)?;
    path.offset(Vector::new(dx, dy));
    println!("{}", path);
    Ok(())
}
