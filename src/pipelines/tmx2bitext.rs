//! TMX to bitext conversion.
//!
//! For each TMX file (plain or gzipped), the segments of the source and target languages
//! are extracted from each translation unit, filtered, and written as a tab-separated
//! `<stem>.<xx>-<yy>.bitext` file.
//!
//! Files are independent: a malformed file fails on its own (its partial output is removed),
//! the other ones are still converted.
use std::collections::HashSet;
use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use rayon::prelude::*;

use crate::error::Error;
use crate::filtering::SegmentFilter;
use crate::io::{BitextWriter, WriterTrait};
use crate::lang::LanguageCode;
use crate::pipelines::naming::{bitext_filename, inputs};
use crate::pipelines::pipeline::Pipeline;
use crate::pipelines::report::{BatchReport, FileReport, FileStats};
use crate::tmx::TmxReader;

const PATTERNS: [&str; 2] = ["*.tmx", "*.tmx.gz"];

/// Removes `path` if it exists, logging failures.
pub(crate) fn remove_partial(path: &Path) {
    if path.exists() {
        debug!("removing partial output {:?}", path);
        if let Err(e) = fs::remove_file(path) {
            warn!("could not remove partial output {:?}: {}", path, e);
        }
    }
}

/// Output directory: `dst` if given, else the input directory (or the parent of the input file).
pub(crate) fn output_dir(src: &Path, dst: Option<&Path>) -> PathBuf {
    match dst {
        Some(dst) => dst.to_path_buf(),
        None if src.is_dir() => src.to_path_buf(),
        None => match src.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

pub struct Tmx2Bitext {
    src: PathBuf,
    dst: Option<PathBuf>,
    source: LanguageCode,
    target: LanguageCode,
    filter: SegmentFilter,
}

impl Tmx2Bitext {
    pub fn new(
        src: PathBuf,
        dst: Option<PathBuf>,
        source: LanguageCode,
        target: LanguageCode,
        filter: SegmentFilter,
    ) -> Self {
        Self {
            src,
            dst,
            source,
            target,
            filter,
        }
    }

    /// Extract, filter and write the pairs of `reader`.
    ///
    /// Returns at the first error of the reader or of the writer.
    pub fn convert<R: BufRead, W: WriterTrait>(
        &self,
        reader: TmxReader<R>,
        writer: &mut W,
    ) -> Result<FileStats, Error> {
        let source = self.source.tmx_form();
        let target = self.target.tmx_form();
        let mut stats = FileStats::default();

        for unit in reader {
            let unit = unit?;
            stats.nb_units += 1;

            let (s, t) = unit.pair(&source, &target);
            match self.filter.filter(s, t) {
                Ok((s, t)) => writer.write_pair(&s, &t)?,
                Err(rejection) => {
                    debug!("unit {} rejected: {}", stats.nb_units, rejection);
                    stats.reject(rejection);
                }
            }
        }

        stats.nb_pairs = writer.nb_pairs();
        Ok(stats)
    }

    fn write_bitext<R: BufRead>(
        &self,
        reader: TmxReader<R>,
        output: &Path,
    ) -> Result<FileStats, Error> {
        let mut writer = BitextWriter::create(output)?;
        let stats = self.convert(reader, &mut writer)?;
        writer.finish()?;
        Ok(stats)
    }

    fn convert_file(&self, input: &Path, output: &Path) -> Result<FileStats, Error> {
        info!("converting {:?} into {:?}", input, output);

        let result = if is_gzip(input) {
            let reader = TmxReader::from_path_gzip(input)?;
            self.write_bitext(reader, output)
        } else {
            let reader = TmxReader::from_path(input)?;
            self.write_bitext(reader, output)
        };

        if result.is_err() {
            remove_partial(output);
        }
        result
    }
}

impl Pipeline<BatchReport> for Tmx2Bitext {
    fn run(&self) -> Result<BatchReport, Error> {
        let files = inputs(&self.src, &PATTERNS)?;
        let dst = output_dir(&self.src, self.dst.as_deref());
        if !dst.is_dir() {
            return Err(Error::InputNotFound(dst));
        }
        info!(
            "{} files to convert ({} -> {}) into {:?}",
            files.len(),
            self.source,
            self.target,
            dst
        );

        // outputs are decided before going parallel,
        // so that two inputs never write to the same file.
        let mut seen = HashSet::new();
        let jobs: Vec<(PathBuf, Result<PathBuf, Error>)> = files
            .into_iter()
            .map(|input| {
                let output = bitext_filename(&input, &self.source, &self.target)
                    .map(|name| dst.join(name))
                    .and_then(|output| {
                        if seen.insert(output.clone()) {
                            Ok(output)
                        } else {
                            Err(Error::Custom(format!(
                                "{:?} is already produced by another input",
                                output
                            )))
                        }
                    });
                (input, output)
            })
            .collect();

        let reports = jobs
            .into_par_iter()
            .map(|(input, output)| match output {
                Ok(output) => {
                    let outcome = self.convert_file(&input, &output);
                    if let Err(e) = &outcome {
                        error!("{:?}: {}", input, e);
                    }
                    FileReport {
                        input,
                        output,
                        outcome,
                    }
                }
                Err(e) => {
                    error!("{:?}: {}", input, e);
                    FileReport {
                        input,
                        output: PathBuf::new(),
                        outcome: Err(e),
                    }
                }
            })
            .collect();

        Ok(BatchReport::new(reports))
    }
}
