//! Streaming TMX reader.
//!
//! The document is read event by event, and translation units are yielded
//! as soon as their `</tu>` is met.
//!
//! States:
//!
//! ```text
//! Idle --<tu>--> InUnit --<tuv xml:lang>--> InEntry --<seg>--> InSegment
//!  ^               |  ^                        |  ^               |
//!  +----</tu>------+  +---------</tuv>---------+  +----</seg>-----+
//! ```
//!
//! Anything read while `Idle` (header, notes outside units) is ignored.
//! The document itself must be complete: a single root element, closed before the end of input.
//! While `InSegment`, any element other than `<seg>` is written back into the segment
//! (`<name attr="v">`, `</name>`, or `<name/>`). A `<seg>` opened inside a segment is an error.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::mem;
use std::path::Path;

use flate2::read::MultiGzDecoder;
use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::TranslationUnit;
use crate::error::Error;

const UNIT: &[u8] = b"tu";
const ENTRY: &[u8] = b"tuv";
const SEGMENT: &[u8] = b"seg";

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    InUnit(TranslationUnit),
    /// `lang` is taken once the entry's segment is stored.
    InEntry {
        unit: TranslationUnit,
        lang: Option<String>,
    },
    InSegment {
        unit: TranslationUnit,
        lang: String,
        text: String,
        /// number of open inline elements
        depth: usize,
    },
}

fn structural(position: u64, reason: impl Into<String>) -> Error {
    Error::Structural {
        position,
        reason: reason.into(),
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(bytes).map_err(|e| Error::UnsupportedEncoding(format!("{}", e)))
}

/// Serializes an inline element's opening tag, keeping attributes in document order.
///
/// Attribute values are kept escaped, as they are found in the document.
fn inline_tag(e: &BytesStart, self_closing: bool) -> Result<String, Error> {
    let mut tag = format!("<{}", utf8(e.name().as_ref())?);
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = utf8(attr.key.as_ref())?;
        let value = utf8(&attr.value)?;
        let quote = if value.contains('"') { '\'' } else { '"' };
        tag.push_str(&format!(" {}={}{}{}", key, quote, value, quote));
    }
    tag.push_str(if self_closing { "/>" } else { ">" });
    Ok(tag)
}

/// Language of a `<tuv>`, from `xml:lang` or, for TMX 1.1 documents, `lang`.
fn entry_lang(e: &BytesStart, position: u64) -> Result<String, Error> {
    for key in ["xml:lang", "lang"] {
        if let Some(attr) = e.try_get_attribute(key).map_err(quick_xml::Error::from)? {
            let lang = attr.unescape_value()?;
            if !lang.is_empty() {
                return Ok(lang.into_owned());
            }
        }
    }

    Err(structural(position, "<tuv> without language attribute"))
}

impl State {
    fn store(unit: &mut TranslationUnit, lang: String, text: String) {
        if let Some(previous) = unit.insert(lang, text) {
            warn!("duplicate language in unit, dropping {:?}", previous);
        }
    }

    /// Handles `<name ...>` (or `<name/>` when `empty`).
    fn start(
        &mut self,
        e: &BytesStart,
        empty: bool,
        position: u64,
    ) -> Result<Option<TranslationUnit>, Error> {
        let name = e.name();
        let name = name.as_ref();
        match mem::take(self) {
            State::Idle if name == UNIT => {
                if empty {
                    return Ok(Some(TranslationUnit::new()));
                }
                *self = State::InUnit(TranslationUnit::new());
            }
            State::Idle => (),

            State::InUnit(_) | State::InEntry { .. } if name == UNIT => {
                return Err(structural(position, "<tu> nested in another <tu>"));
            }
            State::InUnit(unit) if name == ENTRY => {
                let lang = entry_lang(e, position)?;
                *self = if empty {
                    State::InUnit(unit)
                } else {
                    State::InEntry {
                        unit,
                        lang: Some(lang),
                    }
                };
            }
            State::InUnit(_) if name == SEGMENT => {
                return Err(structural(position, "<seg> outside of a <tuv>"));
            }
            State::InUnit(unit) => *self = State::InUnit(unit),

            State::InEntry { .. } if name == ENTRY => {
                return Err(structural(position, "<tuv> nested in another <tuv>"));
            }
            State::InEntry { unit, lang } if name == SEGMENT => {
                let lang = lang
                    .ok_or_else(|| structural(position, "more than one <seg> in a <tuv>"))?;
                *self = if empty {
                    let mut unit = unit;
                    Self::store(&mut unit, lang, String::new());
                    State::InEntry { unit, lang: None }
                } else {
                    State::InSegment {
                        unit,
                        lang,
                        text: String::new(),
                        depth: 0,
                    }
                };
            }
            State::InEntry { unit, lang } => *self = State::InEntry { unit, lang },

            State::InSegment { .. } if name == SEGMENT => {
                return Err(structural(position, "<seg> nested in another <seg>"));
            }
            State::InSegment {
                unit,
                lang,
                mut text,
                depth,
            } => {
                text.push_str(&inline_tag(e, empty)?);
                *self = State::InSegment {
                    unit,
                    lang,
                    text,
                    depth: if empty { depth } else { depth + 1 },
                };
            }
        }

        Ok(None)
    }

    /// Handles `</name>`.
    fn end(&mut self, name: &[u8], position: u64) -> Result<Option<TranslationUnit>, Error> {
        match mem::take(self) {
            State::InSegment {
                unit,
                lang,
                mut text,
                depth,
            } if depth > 0 => {
                text.push_str(&format!("</{}>", utf8(name)?));
                *self = State::InSegment {
                    unit,
                    lang,
                    text,
                    depth: depth - 1,
                };
            }
            State::InSegment {
                mut unit,
                lang,
                text,
                ..
            } if name == SEGMENT => {
                Self::store(&mut unit, lang, text);
                *self = State::InEntry { unit, lang: None };
            }
            State::InSegment { .. } => {
                return Err(structural(
                    position,
                    format!("unexpected </{}> in <seg>", String::from_utf8_lossy(name)),
                ));
            }

            State::InEntry { unit, .. } if name == ENTRY => *self = State::InUnit(unit),
            State::InUnit(unit) if name == UNIT => return Ok(Some(unit)),

            other => *self = other,
        }

        Ok(None)
    }

    fn text(&mut self, content: &str) {
        if let State::InSegment { text, .. } = self {
            text.push_str(content);
        }
    }
}

/// Document-level element nesting, independent of the unit state.
///
/// A document holds exactly one root element, and nothing but whitespace,
/// comments and processing instructions around it.
#[derive(Debug, Default)]
struct Nesting {
    depth: usize,
    root_seen: bool,
}

impl Nesting {
    fn open(&mut self, position: u64) -> Result<(), Error> {
        if self.depth == 0 && self.root_seen {
            return Err(structural(position, "content after the root element"));
        }
        self.root_seen = true;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Lazily reads [TranslationUnit]s from a TMX document.
///
/// Generic over reader type, in order to read both plain and gzipped documents.
/// A reader holds the parsing state of exactly one document.
///
/// The first error ends the iteration: the unit that was being read is discarded,
/// and no further unit is yielded.
pub struct TmxReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    state: State,
    nesting: Nesting,
    started: bool,
    finished: bool,
}

impl TmxReader<BufReader<File>> {
    /// Create a new reader from a TMX file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl TmxReader<BufReader<MultiGzDecoder<File>>> {
    /// Create a new reader from a gzipped TMX file.
    pub fn from_path_gzip<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(MultiGzDecoder::new(file))))
    }
}

impl<R: BufRead> TmxReader<R> {
    pub fn new(inner: R) -> Self {
        let mut reader = Reader::from_reader(inner);
        reader.config_mut().trim_text(false);

        Self {
            reader,
            buf: Vec::new(),
            state: State::Idle,
            nesting: Nesting::default(),
            started: false,
            finished: false,
        }
    }

    /// Fails on UTF-16 byte order marks, since documents are expected to be UTF-8.
    fn check_bom(&mut self) -> Result<(), Error> {
        let head = self.reader.get_mut().fill_buf()?;
        if head.starts_with(&[0xFF, 0xFE]) || head.starts_with(&[0xFE, 0xFF]) {
            return Err(Error::UnsupportedEncoding("UTF-16".to_string()));
        }
        Ok(())
    }

    fn next_unit(&mut self) -> Result<Option<TranslationUnit>, Error> {
        if !self.started {
            self.started = true;
            self.check_bom()?;
        }

        loop {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf)?;
            let position = self.reader.buffer_position() as u64;

            let unit = match event {
                Event::Decl(d) => {
                    if let Some(Ok(encoding)) = d.encoding() {
                        let encoding = String::from_utf8_lossy(&encoding).to_string();
                        if !["utf-8", "utf8"].contains(&encoding.to_ascii_lowercase().as_str()) {
                            return Err(Error::UnsupportedEncoding(encoding));
                        }
                    }
                    None
                }
                Event::Start(e) => {
                    self.nesting.open(position)?;
                    self.state.start(&e, false, position)?
                }
                Event::Empty(e) => {
                    self.nesting.open(position)?;
                    self.nesting.close();
                    self.state.start(&e, true, position)?
                }
                Event::End(e) => {
                    self.nesting.close();
                    self.state.end(e.name().as_ref(), position)?
                }
                Event::Text(t) => {
                    if self.nesting.depth == 0 {
                        let text = String::from_utf8_lossy(&t);
                        if !text
                            .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
                            .is_empty()
                        {
                            return Err(structural(position, "text outside of the root element"));
                        }
                    } else if matches!(self.state, State::InSegment { .. }) {
                        self.state.text(&t.unescape()?);
                    }
                    None
                }
                Event::CData(c) => {
                    if self.nesting.depth == 0 {
                        return Err(structural(position, "text outside of the root element"));
                    }
                    self.state.text(utf8(&c)?);
                    None
                }
                Event::Eof => {
                    if !self.nesting.root_seen {
                        return Err(structural(position, "no root element"));
                    }
                    return match self.state {
                        State::Idle if self.nesting.depth == 0 => Ok(None),
                        _ => Err(structural(position, "unexpected end of document")),
                    };
                }
                // comments, processing instructions, doctype
                _ => None,
            };

            if let Some(unit) = unit {
                debug!("unit with {} languages", unit.len());
                return Ok(Some(unit));
            }
        }
    }
}

impl<R: BufRead> Iterator for TmxReader<R> {
    type Item = Result<TranslationUnit, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_unit() {
            Ok(Some(unit)) => Some(Ok(unit)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                self.state = State::Idle;
                Some(Err(e))
            }
        }
    }
}
