use std::io;
use std::str;

error_chain! {
    foreign_links {
        Io(io::Error);
        Utf8(str::Utf8Error);
    }

    errors {
        ParsingFailed(offset: usize) {
            description("malformed path data")
            display("malformed path data at byte {}", offset)
        }
        PathTooLong(capacity: usize) {
            description("path has too many segments")
            display("path has too many segments (limit is {})", capacity)
        }
        NoMoveBeforeEnd {
            description("unbalanced sub-path")
            display("sub-path is not opened with M and closed with Z")
        }
        SectionTooShort {
            description("sub-path too short")
            display("sub-path needs at least two segments before Z")
        }
    }
}
