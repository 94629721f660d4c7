//! Tab-separated bitext reader.
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::path::Path;

use log::warn;

use crate::error::Error;

/// Reads (source, target) pairs from a bitext file, line by line.
///
/// Fields are trimmed. Empty lines are ignored, lines that do not hold exactly
/// one tab are skipped (see [BitextReader::nb_skipped]).
pub struct BitextReader<R> {
    lines: Lines<R>,
    line_nb: u64,
    nb_skipped: u64,
}

impl BitextReader<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> BitextReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_nb: 0,
            nb_skipped: 0,
        }
    }

    /// Number of malformed lines skipped so far.
    pub fn nb_skipped(&self) -> u64 {
        self.nb_skipped
    }
}

impl<R: BufRead> Iterator for BitextReader<R> {
    type Item = Result<(String, String), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    return Some(Err(Error::UnsupportedEncoding(format!(
                        "line {} is not valid UTF-8",
                        self.line_nb + 1
                    ))));
                }
                Err(e) => return Some(Err(e.into())),
            };
            self.line_nb += 1;

            if line.trim().is_empty() {
                continue;
            }

            match line.split_once('\t') {
                Some((source, target)) if !target.contains('\t') => {
                    return Some(Ok((source.trim().to_string(), target.trim().to_string())));
                }
                _ => {
                    warn!("skipping malformed line {}: {:?}", self.line_nb, line);
                    self.nb_skipped += 1;
                }
            }
        }
    }
}
