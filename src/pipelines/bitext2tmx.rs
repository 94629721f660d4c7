//! Bitext to TMX conversion.
//!
//! Input files have to follow the `<stem>.<xx>-<yy>.bitext` naming convention,
//! which gives the source and target languages of each line.
//! Every name is checked before any file is converted.
use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::{error, info};
use rayon::prelude::*;

use crate::error::Error;
use crate::io::{BitextReader, WriterTrait};
use crate::pipelines::naming::{inputs, BitextName};
use crate::pipelines::pipeline::Pipeline;
use crate::pipelines::report::{BatchReport, FileReport, FileStats};
use crate::pipelines::tmx2bitext::{output_dir, remove_partial};
use crate::tmx::TmxWriter;

const PATTERNS: [&str; 1] = ["*.bitext"];

pub struct Bitext2Tmx {
    src: PathBuf,
    dst: Option<PathBuf>,
}

impl Bitext2Tmx {
    pub fn new(src: PathBuf, dst: Option<PathBuf>) -> Self {
        Self { src, dst }
    }

    /// Write every pair of `reader` into `writer`.
    pub fn convert<R: BufRead, W: WriterTrait>(
        reader: &mut BitextReader<R>,
        writer: &mut W,
    ) -> Result<FileStats, Error> {
        for pair in reader.by_ref() {
            let (source, target) = pair?;
            writer.write_pair(&source, &target)?;
        }

        Ok(FileStats {
            nb_pairs: writer.nb_pairs(),
            nb_skipped: reader.nb_skipped(),
            ..Default::default()
        })
    }

    fn write_tmx(input: &Path, name: &BitextName, output: &Path) -> Result<FileStats, Error> {
        let mut reader = BitextReader::from_path(input)?;
        let mut writer = TmxWriter::create(output, name.source(), name.target())?;
        let stats = Self::convert(&mut reader, &mut writer)?;
        writer.finish()?;
        Ok(stats)
    }

    fn convert_file(input: &Path, name: &BitextName, output: &Path) -> Result<FileStats, Error> {
        info!("converting {:?} into {:?}", input, output);

        let result = Self::write_tmx(input, name, output);
        if result.is_err() {
            remove_partial(output);
        }
        result
    }
}

impl Pipeline<BatchReport> for Bitext2Tmx {
    fn run(&self) -> Result<BatchReport, Error> {
        let files = inputs(&self.src, &PATTERNS)?;

        // a single badly named file aborts the whole batch.
        let names = files
            .iter()
            .map(|path| BitextName::parse(path))
            .collect::<Result<Vec<_>, Error>>()?;

        let dst = output_dir(&self.src, self.dst.as_deref());
        if !dst.is_dir() {
            return Err(Error::InputNotFound(dst));
        }
        info!("{} files to convert into {:?}", files.len(), dst);

        let reports = files
            .into_par_iter()
            .zip(names)
            .map(|(input, name)| {
                let output = dst.join(name.tmx_filename());
                let outcome = Self::convert_file(&input, &name, &output);
                if let Err(e) = &outcome {
                    error!("{:?}: {}", input, e);
                }
                FileReport {
                    input,
                    output,
                    outcome,
                }
            })
            .collect();

        Ok(BatchReport::new(reports))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::LanguageCode;
    use crate::tmx::TmxReader;

    #[test]
    fn convert_lines() {
        let text = "Hello\tHallo\nbroken line\nBye\tTschüss\n";
        let mut reader = BitextReader::new(text.as_bytes());
        let mut writer = TmxWriter::new(
            Vec::new(),
            &LanguageCode::parse("en").unwrap(),
            &LanguageCode::parse("de").unwrap(),
        )
        .unwrap();

        let stats = Bitext2Tmx::convert(&mut reader, &mut writer).unwrap();
        assert_eq!(stats.nb_pairs, 2);
        assert_eq!(stats.nb_skipped, 1);

        let doc = writer.finish().unwrap();
        let units: Vec<_> = TmxReader::new(doc.as_slice())
            .map(Result::unwrap)
            .collect();
        assert_eq!(units.len(), 2);
        assert_eq!(units[1].pair("en-US", "de-DE"), (Some("Bye"), Some("Tschüss")));
    }
}
