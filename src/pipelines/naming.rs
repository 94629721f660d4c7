//! File naming conventions and input discovery.
//!
//! - bitext files derived from TMX are named `<stem>.<xx>-<yy>.bitext`, `<stem>` being
//!   the TMX file name without its `.tmx` (or `.tmx.gz`) extension,
//! - bitext files given to `bitext2tmx` must be named `<stem>.<xx>-<yy>.bitext`,
//!   and produce `<stem>.<xx>-<yy>.tmx`.
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Error;
use crate::lang::LanguageCode;

/// Get the file name of `path` as UTF-8.
fn file_name(path: &Path) -> Result<&str, Error> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidNamingConvention(format!("{:?}", path)))
}

/// Name of the bitext file derived from the TMX file at `input`.
pub fn bitext_filename(
    input: &Path,
    source: &LanguageCode,
    target: &LanguageCode,
) -> Result<String, Error> {
    let name = file_name(input)?;
    let name = name.strip_suffix(".gz").unwrap_or(name);
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };

    Ok(format!("{}.{}-{}.bitext", stem, source.xx(), target.xx()))
}

/// A parsed `<stem>.<xx>-<yy>.bitext` file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitextName {
    stem: String,
    source: LanguageCode,
    target: LanguageCode,
}

impl BitextName {
    /// Parse and validate the file name of `path`.
    pub fn parse(path: &Path) -> Result<Self, Error> {
        let name = file_name(path)?;
        let invalid = || {
            Error::InvalidNamingConvention(format!(
                "{} (expected a name like 'resource.en-zh.bitext')",
                name
            ))
        };

        let parts: Vec<&str> = name.split('.').collect();
        let (stem, pair) = match parts.as_slice() {
            [stem, pair, "bitext"] if !stem.is_empty() => (*stem, *pair),
            _ => return Err(invalid()),
        };
        let (source, target) = pair.split_once('-').ok_or_else(invalid)?;

        Ok(Self {
            stem: stem.to_string(),
            source: LanguageCode::parse(source)?,
            target: LanguageCode::parse(target)?,
        })
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn source(&self) -> &LanguageCode {
        &self.source
    }

    pub fn target(&self) -> &LanguageCode {
        &self.target
    }

    /// `<stem>.<xx>-<yy>.tmx`
    pub fn tmx_filename(&self) -> String {
        format!(
            "{}.{}-{}.tmx",
            self.stem,
            self.source.xx(),
            self.target.xx()
        )
    }
}

/// List the files of `src` matching any of `patterns` (sorted),
/// or `src` itself if it is a file.
pub fn inputs(src: &Path, patterns: &[&str]) -> Result<Vec<PathBuf>, Error> {
    if src.is_file() {
        return Ok(vec![src.to_path_buf()]);
    }
    if !src.is_dir() {
        return Err(Error::InputNotFound(src.to_path_buf()));
    }

    let dir = src
        .to_str()
        .ok_or_else(|| Error::Custom(format!("invalid source directory: {:?}", src)))?;
    let dir = glob::Pattern::escape(dir);

    let mut files = Vec::new();
    for pattern in patterns {
        let pattern = format!("{}/{}", dir, pattern);
        debug!("looking for {}", pattern);
        for path in glob::glob(&pattern)? {
            files.push(path?);
        }
    }
    files.sort();
    files.dedup();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use super::*;

    fn lc(code: &str) -> LanguageCode {
        LanguageCode::parse(code).unwrap()
    }

    #[test]
    fn bitext_from_tmx() {
        let (en, de) = (lc("en-US"), lc("de-DE"));
        let name = |p: &str| bitext_filename(Path::new(p), &en, &de).unwrap();

        assert_eq!(name("/data/corpus.tmx"), "corpus.en-de.bitext");
        assert_eq!(name("corpus.v2.tmx"), "corpus.v2.en-de.bitext");
        assert_eq!(name("corpus.tmx.gz"), "corpus.en-de.bitext");
        assert_eq!(name("corpus"), "corpus.en-de.bitext");
    }

    #[test]
    fn parse_bitext_name() {
        let name = BitextName::parse(Path::new("/data/resource.en-zh.bitext")).unwrap();
        assert_eq!(name.stem(), "resource");
        assert_eq!(name.source().tmx_form(), "en-US");
        assert_eq!(name.target().tmx_form(), "zh-CN");
        assert_eq!(name.tmx_filename(), "resource.en-zh.tmx");
    }

    #[test]
    fn invalid_bitext_names() {
        for name in [
            "resource.bitext",
            "resource.en-zh.txt",
            "resource.v2.en-zh.bitext",
            "resource.enzh.bitext",
        ] {
            assert!(
                matches!(
                    BitextName::parse(Path::new(name)),
                    Err(Error::InvalidNamingConvention(_))
                ),
                "{}",
                name
            );
        }

        assert!(matches!(
            BitextName::parse(Path::new("resource.en-xx.bitext")),
            Err(Error::InvalidLanguageTag(_))
        ));
    }

    #[test]
    fn list_inputs() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.tmx", "a.tmx.gz", "c.bitext", "d.txt"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let found = inputs(dir.path(), &["*.tmx", "*.tmx.gz"]).unwrap();
        let names: Vec<&str> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.tmx.gz", "b.tmx"]);

        let single = dir.path().join("d.txt");
        assert_eq!(inputs(&single, &["*.tmx"]).unwrap(), vec![single.clone()]);

        assert!(matches!(
            inputs(&dir.path().join("missing"), &["*.tmx"]),
            Err(Error::InputNotFound(_))
        ));
    }
}
