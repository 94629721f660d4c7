//! Minimal TMX writer.
//!
//! Writes a TMX 1.4 document with one `<tu>` per sentence pair,
//! the source `<tuv>` always coming first.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Error;
use crate::io::WriterTrait;
use crate::lang::LanguageCode;

const CREATION_TOOL: &str = "tmxbitext";
const DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Sentence pair TMX writer.
///
/// The declaration, header and `<body>` opening are written on creation.
/// [TmxWriter::finish] has to be called to close the document.
pub struct TmxWriter<W: Write> {
    writer: Writer<W>,
    source: String,
    target: String,
    nb_units: u64,
}

impl TmxWriter<BufWriter<File>> {
    /// Create (or truncate) a TMX file at `path`.
    pub fn create<P: AsRef<Path>>(
        path: P,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<Self, Error> {
        debug!("creating {:?}", path.as_ref());
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), source, target)
    }
}

impl<W: Write> TmxWriter<W> {
    pub fn new(inner: W, source: &LanguageCode, target: &LanguageCode) -> Result<Self, Error> {
        Self::with_creation_date(inner, source, target, Utc::now())
    }

    pub fn with_creation_date(
        inner: W,
        source: &LanguageCode,
        target: &LanguageCode,
        date: DateTime<Utc>,
    ) -> Result<Self, Error> {
        let mut writer = Writer::new_with_indent(inner, b' ', 4);
        let source = source.tmx_form();
        let creation_date = date.format(DATE_FORMAT).to_string();

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("tmx").with_attributes([("version", "1.4")]),
        ))?;
        writer.write_event(Event::Empty(BytesStart::new("header").with_attributes([
            ("creationtool", CREATION_TOOL),
            ("creationtoolversion", env!("CARGO_PKG_VERSION")),
            ("datatype", "PlainText"),
            ("segtype", "sentence"),
            ("adminlang", "en-US"),
            ("srclang", source.as_str()),
            ("creationdate", creation_date.as_str()),
        ])))?;
        writer.write_event(Event::Start(BytesStart::new("body")))?;

        Ok(Self {
            writer,
            source,
            target: target.tmx_form(),
            nb_units: 0,
        })
    }

    fn write_entry(&mut self, lang: &str, text: &str) -> Result<(), Error> {
        self.writer.write_event(Event::Start(
            BytesStart::new("tuv").with_attributes([("xml:lang", lang)]),
        ))?;
        self.writer.write_event(Event::Start(BytesStart::new("seg")))?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
        self.writer.write_event(Event::End(BytesEnd::new("seg")))?;
        self.writer.write_event(Event::End(BytesEnd::new("tuv")))?;
        Ok(())
    }

    /// Close `<body>` and `<tmx>`, flush and give back the inner writer.
    pub fn finish(mut self) -> Result<W, Error> {
        self.writer.write_event(Event::End(BytesEnd::new("body")))?;
        self.writer.write_event(Event::End(BytesEnd::new("tmx")))?;

        let mut inner = self.writer.into_inner();
        inner.write_all(b"\n")?;
        inner.flush()?;
        Ok(inner)
    }
}

impl<W: Write> WriterTrait for TmxWriter<W> {
    /// Write a translation unit holding `source` then `target`.
    ///
    /// Text is escaped (`&`, `<`, `>`), never interpreted as markup.
    fn write_pair(&mut self, source: &str, target: &str) -> Result<(), Error> {
        let source_lang = self.source.clone();
        let target_lang = self.target.clone();

        self.writer.write_event(Event::Start(
            BytesStart::new("tu").with_attributes([("srclang", source_lang.as_str())]),
        ))?;
        self.write_entry(&source_lang, source)?;
        self.write_entry(&target_lang, target)?;
        self.writer.write_event(Event::End(BytesEnd::new("tu")))?;

        self.nb_units += 1;
        Ok(())
    }

    fn nb_pairs(&self) -> u64 {
        self.nb_units
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::tmx::TmxReader;

    fn langs() -> (LanguageCode, LanguageCode) {
        (
            LanguageCode::parse("en").unwrap(),
            LanguageCode::parse("zh").unwrap(),
        )
    }

    #[test]
    fn header() {
        let (src, tgt) = langs();
        let date = Utc.with_ymd_and_hms(2013, 5, 17, 8, 30, 0).unwrap();
        let w = TmxWriter::with_creation_date(Vec::new(), &src, &tgt, date).unwrap();
        let doc = String::from_utf8(w.finish().unwrap()).unwrap();

        assert!(doc.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(doc.contains(r#"srclang="en-US""#));
        assert!(doc.contains(r#"creationdate="20130517T083000Z""#));
        assert!(doc.contains("<body>"));
        assert!(doc.trim_end().ends_with("</tmx>"));
    }

    #[test]
    fn escaped_text() {
        let (src, tgt) = langs();
        let mut w = TmxWriter::new(Vec::new(), &src, &tgt).unwrap();
        w.write_pair("a <b> & c", "甲 < 乙").unwrap();
        assert_eq!(w.nb_pairs(), 1);
        let doc = String::from_utf8(w.finish().unwrap()).unwrap();

        assert!(doc.contains("<seg>a &lt;b&gt; &amp; c</seg>"));
        assert!(doc.contains("<seg>甲 &lt; 乙</seg>"));
        assert!(doc.contains(r#"<tuv xml:lang="zh-CN">"#));
    }

    #[test]
    fn read_back() {
        let (src, tgt) = langs();
        let pairs = vec![
            ("Hello <b>world</b>!", "你好世界！"),
            ("Tom & Jerry", "猫和老鼠"),
        ];

        let mut w = TmxWriter::new(Vec::new(), &src, &tgt).unwrap();
        for (s, t) in &pairs {
            w.write_pair(s, t).unwrap();
        }
        let doc = w.finish().unwrap();

        let read: Vec<(String, String)> = TmxReader::new(doc.as_slice())
            .map(|unit| {
                let unit = unit.unwrap();
                (
                    unit.get("en-US").unwrap().to_string(),
                    unit.get("zh-CN").unwrap().to_string(),
                )
            })
            .collect();

        let expected: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(s, t)| (s.to_string(), t.to_string()))
            .collect();
        assert_eq!(read, expected);
    }
}
