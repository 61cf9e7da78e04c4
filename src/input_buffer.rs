use std::fs::File;
use std::io::{self, Read};
use std::path::Path as FilePath;
use std::str;

use memmap::{Mmap, MmapOptions};

use ::errors::Result;
use ::parse::parse_path_with_capacity;
use ::path::Path;

/// Path data read from stdin or a mapped file.
pub enum InputBuffer {
    Stdin(Vec<u8>),
    File(Mmap),
}

impl InputBuffer {
    /// Reads all of stdin.
    pub fn new_from_stdin() -> Result<InputBuffer> {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;

        Ok(InputBuffer::Stdin(buf))
    }

    /// Maps a file read-only.
    pub fn new_from_file<P>(path: P) -> Result<InputBuffer>
    where
        P: AsRef<FilePath>,
    {
        let file = File::open(path)?;
        // Zero-length files can't be mapped
        if file.metadata()?.len() == 0 {
            return Ok(InputBuffer::Stdin(Vec::new()));
        }
        let mmap = unsafe { MmapOptions::new().map(&file)? };

        Ok(InputBuffer::File(mmap))
    }

    /// Opens `name`, or stdin when `name` is "-".
    pub fn open(name: &str) -> Result<InputBuffer> {
        if name == "-" {
            InputBuffer::new_from_stdin()
        }
        else {
            InputBuffer::new_from_file(name)
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match *self {
            InputBuffer::Stdin(ref v) => &*v,
            InputBuffer::File(ref m) => &*m,
        }
    }

    /// The buffer as text; path data must be UTF-8.
    pub fn text(&self) -> Result<&str> {
        Ok(str::from_utf8(self.bytes())?)
    }

    /// Parses the whole buffer as path data.
    pub fn parse_path(&self, capacity: usize) -> Result<Path> {
        parse_path_with_capacity(self.text()?, capacity)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use ::errors::ErrorKind;

    #[test]
    fn buffered_text_parses() {
        let buffer = InputBuffer::Stdin(b"M 0,0 L 1,0 L 1,1 Z\n".to_vec());
        assert_eq!(buffer.text().unwrap(), "M 0,0 L 1,0 L 1,1 Z\n");
        assert_eq!(buffer.parse_path(10).unwrap().len(), 4);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let buffer = InputBuffer::Stdin(vec![b'M', 0xff, 0xfe]);
        match buffer.text() {
            Err(ref err) => match *err.kind() {
                ErrorKind::Utf8(_) => {}
                ref other => panic!("unexpected error {:?}", other),
            },
            Ok(text) => panic!("decoded {:?}", text),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        match InputBuffer::new_from_file("/nonexistent/pathclip/input") {
            Err(ref err) => match *err.kind() {
                ErrorKind::Io(_) => {}
                ref other => panic!("unexpected error {:?}", other),
            },
            Ok(_) => panic!("opened a file that doesn't exist"),
        }
    }
}
