use std::num::ParseFloatError;
use std::str::FromStr;

use nom::digit;
use nom::types::CompleteStr;

use ::geom::{Coord, Point};


fn to_coord(input: CompleteStr) -> ::std::result::Result<Coord, ParseFloatError> {
    Coord::from_str(input.0)
}

fn is_set(value: Coord) -> bool {
    value != 0.
}

// Any run of whitespace and commas separates numbers
named!(pub separator<CompleteStr, CompleteStr>, is_a!(" ,\t\r\n"));

// No exponents; path data never needs them
named!(pub number<CompleteStr, Coord>, map_res!(
    recognize!(tuple!(
        opt!(char!('-')),
        alt!(
            recognize!(tuple!(digit, opt!(tuple!(char!('.'), opt!(digit))))) |
            recognize!(tuple!(char!('.'), digit))
        )
    )),
    to_coord
));

named!(pub coordinate<CompleteStr, Coord>, preceded!(opt!(separator), number));

named!(pub point<CompleteStr, Point>, do_parse!(
    x: coordinate >>
    y: coordinate >>
    (Point::new(x, y))
));

named!(pub flag<CompleteStr, bool>, map!(coordinate, is_set));


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(number(CompleteStr("12")), Ok((CompleteStr(""), 12.)));
        assert_eq!(number(CompleteStr("-0.5,")), Ok((CompleteStr(","), -0.5)));
        assert_eq!(number(CompleteStr(".25 ")), Ok((CompleteStr(" "), 0.25)));
        assert_eq!(number(CompleteStr("3.")), Ok((CompleteStr(""), 3.)));
        assert!(number(CompleteStr("x1")).is_err());
        assert!(number(CompleteStr("-")).is_err());
    }

    #[test]
    fn points_accept_any_separator() {
        let expected = Point::new(1.5, -2.);
        for input in &["1.5,-2", " 1.5 -2", ",1.5,,-2", "1.5\n-2", "1.5-2"] {
            let (rest, parsed) = point(CompleteStr(input)).unwrap();
            assert_eq!(parsed, expected, "parsing {:?}", input);
            assert!(rest.0.is_empty());
        }
    }

    #[test]
    fn flags() {
        assert_eq!(flag(CompleteStr(" 1")), Ok((CompleteStr(""), true)));
        assert_eq!(flag(CompleteStr(" 0")), Ok((CompleteStr(""), false)));
    }
}
