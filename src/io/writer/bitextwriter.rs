//! Tab-separated bitext writer.
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use super::WriterTrait;
use crate::error::Error;
use crate::io::LINE_SEPARATOR;

fn is_separator(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

/// Replaces tabs and line breaks with spaces, so that a field can't break the line format.
fn sanitize(field: &str) -> Cow<'_, str> {
    if field.contains(is_separator) {
        Cow::Owned(
            field
                .chars()
                .map(|c| if is_separator(c) { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(field)
    }
}

/// Writes one `source\ttarget` line per pair.
///
/// Lines are only guaranteed to be on disk once [BitextWriter::finish] has been called.
pub struct BitextWriter<W: Write> {
    inner: W,
    nb_pairs: u64,
}

impl BitextWriter<BufWriter<File>> {
    /// Create (or truncate) a bitext file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        debug!("creating {:?}", path.as_ref());
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> BitextWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, nb_pairs: 0 }
    }

    /// Flush and give back the inner writer.
    pub fn finish(mut self) -> Result<W, Error> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> WriterTrait for BitextWriter<W> {
    fn write_pair(&mut self, source: &str, target: &str) -> Result<(), Error> {
        write!(
            self.inner,
            "{}\t{}{}",
            sanitize(source),
            sanitize(target),
            LINE_SEPARATOR
        )?;
        self.nb_pairs += 1;
        Ok(())
    }

    fn nb_pairs(&self) -> u64 {
        self.nb_pairs
    }
}
