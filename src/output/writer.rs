//! Framing of file sections in the bundle

use std::io::{self, Write};

/// Line written after every file section.
pub const SEPARATOR: &str =
    "################################################################################";

/// Header line introducing a file section.
pub fn file_header(relative: &str) -> String {
    format!("<FILENAME: {}>", relative)
}

/// Inline marker written in place of content that could not be read.
pub fn read_error_marker(err: &io::Error) -> String {
    format!("[Error reading file: {}]\n", err)
}

/// Sequential writer for the bundle artifact.
///
/// Each section is `header`, blank line, content, then the separator on its own
/// line. Content is written as-is; no trailing newline is added to it.
pub struct BundleWriter<W: Write> {
    out: W,
}

impl<W: Write> BundleWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one file section. `content` carries either the decoded text or the
    /// error from reading it.
    pub fn write_section(
        &mut self,
        relative: &str,
        content: Result<&str, &io::Error>,
    ) -> io::Result<()> {
        writeln!(self.out, "{}", file_header(relative))?;
        writeln!(self.out)?;
        match content {
            Ok(text) => self.out.write_all(text.as_bytes())?,
            Err(e) => self.out.write_all(read_error_marker(e).as_bytes())?,
        }
        write!(self.out, "\n{}\n", SEPARATOR)
    }

    /// Append raw text (used for the tree listing and its notices).
    pub fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
