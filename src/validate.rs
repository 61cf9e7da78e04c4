use ::errors::{ErrorKind, Result};
use ::path::{Path, SegmentKind};

/// Checks that every sub-path opens with MOVE, closes with END, and draws at least two segments
/// in between.
pub fn validate(path: &Path) -> Result<()> {
    let mut in_subpath = false;
    let mut drawn = 0;
    for (_, segment) in path.iter() {
        match segment.kind() {
            SegmentKind::Move => {
                if in_subpath {
                    bail!(ErrorKind::NoMoveBeforeEnd);
                }
                in_subpath = true;
                drawn = 0;
            }
            SegmentKind::End => {
                if ! in_subpath {
                    bail!(ErrorKind::NoMoveBeforeEnd);
                }
                if drawn < 2 {
                    bail!(ErrorKind::SectionTooShort);
                }
                in_subpath = false;
            }
            _ => {
                if ! in_subpath {
                    bail!(ErrorKind::NoMoveBeforeEnd);
                }
                drawn += 1;
            }
        }
    }
    if in_subpath {
        bail!(ErrorKind::NoMoveBeforeEnd);
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use ::parse::parse_path;

    fn check(data: &str) -> Result<()> {
        validate(&parse_path(data).unwrap())
    }

    fn assert_rejected(data: &str, expected: ErrorKind) {
        match check(data) {
            Ok(()) => panic!("{:?} should not validate", data),
            Err(err) => assert_eq!(err.kind().to_string(), expected.to_string(), "for {:?}", data),
        }
    }

    #[test]
    fn accepts_closed_subpaths() {
        check("M 0,0 L 1,0 L 1,1 Z").unwrap();
        check("M 0,0 L 1,0 L 1,1 Z M 5,5 Q 6,6 7,5 L 6,4 Z").unwrap();
        check("").unwrap();
    }

    #[test]
    fn rejects_unbalanced_subpaths() {
        assert_rejected("L 1,0 Z", ErrorKind::NoMoveBeforeEnd);
        assert_rejected("Z", ErrorKind::NoMoveBeforeEnd);
        assert_rejected("M 0,0 L 1,0 L 1,1 M 2,2 L 3,3 L 3,2 Z", ErrorKind::NoMoveBeforeEnd);
        assert_rejected("M 0,0 L 1,0 L 1,1", ErrorKind::NoMoveBeforeEnd);
        assert_rejected("M 0,0 L 1,0 L 1,1 Z Z", ErrorKind::NoMoveBeforeEnd);
    }

    #[test]
    fn rejects_short_subpaths() {
        assert_rejected("M 0,0 L 1,0 Z", ErrorKind::SectionTooShort);
        assert_rejected("M 0,0 Z", ErrorKind::SectionTooShort);
        // the count starts over at every MOVE
        assert_rejected("M 0,0 L 1,0 L 1,1 Z M 3,3 L 4,4 Z", ErrorKind::SectionTooShort);
    }
}
