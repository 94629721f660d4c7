//! Command line arguments and parameters management/parsing.
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use structopt::StructOpt;

use tmxbitext::error::Error;
use tmxbitext::filtering::pair::{LengthDiff, LengthLimit, SentenceRatio};
use tmxbitext::filtering::{CleanStep, MultilinePolicy, SegmentFilter};

#[derive(Debug, StructOpt)]
#[structopt(name = "tmxbitext", about = "TMX <-> bitext conversion tool.")]
/// Holds every command that is callable by the `tmxbitext` command.
pub enum Tmxbitext {
    #[structopt(about = "Extract sentence pairs from TMX files into bitext files")]
    Tmx2bitext(Tmx2bitext),
    #[structopt(about = "Build TMX files from bitext files")]
    Bitext2tmx(Bitext2tmx),
}

impl Tmxbitext {
    pub fn debug(&self) -> bool {
        match self {
            Tmxbitext::Tmx2bitext(c) => c.debug,
            Tmxbitext::Bitext2tmx(c) => c.debug,
        }
    }

    pub fn report(&self) -> Option<&PathBuf> {
        match self {
            Tmxbitext::Tmx2bitext(c) => c.report.as_ref(),
            Tmxbitext::Bitext2tmx(c) => c.report.as_ref(),
        }
    }
}

/// Parses `MIN-MAX` token bounds.
fn parse_bounds(src: &str) -> Result<(usize, usize), String> {
    let (min, max) = src
        .split_once('-')
        .ok_or_else(|| format!("expected MIN-MAX, got {:?}", src))?;
    let min: usize = min.trim().parse().map_err(|e| format!("{}: {}", min, e))?;
    let max: usize = max.trim().parse().map_err(|e| format!("{}: {}", max, e))?;
    if min > max {
        return Err(format!("{} is greater than {}", min, max));
    }
    Ok((min, max))
}

#[derive(Debug, StructOpt)]
/// tmx2bitext command and parameters.
pub struct Tmx2bitext {
    #[structopt(parse(from_os_str), help = "TMX file, or directory of .tmx/.tmx.gz files")]
    pub src: PathBuf,
    #[structopt(help = "source language (en, en_US, en-US...)")]
    pub source_lang: String,
    #[structopt(help = "target language")]
    pub target_lang: String,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "output",
        help = "output directory (defaults to the input directory)"
    )]
    pub dst: Option<PathBuf>,
    #[structopt(
        long = "keep-multilines",
        help = "join the lines of multiline segments instead of discarding them"
    )]
    pub keep_multilines: bool,
    #[structopt(
        long = "length-diff",
        help = "discard pairs whose token counts differ by this much or more"
    )]
    pub length_diff: Option<usize>,
    #[structopt(
        long = "length-limit",
        parse(try_from_str = parse_bounds),
        help = "keep pairs with MIN-MAX tokens on each side"
    )]
    pub length_limit: Option<(usize, usize)>,
    #[structopt(
        long = "sentence-ratio",
        help = "discard pairs whose longest side has more than R times the tokens of the shortest"
    )]
    pub sentence_ratio: Option<f64>,
    #[structopt(
        parse(from_os_str),
        long = "clean-steps",
        help = "JSON file holding a list of cleaning steps, applied after the ones above"
    )]
    pub clean_steps: Option<PathBuf>,
    #[structopt(parse(from_os_str), long = "report", help = "write a JSON report there")]
    pub report: Option<PathBuf>,
    #[structopt(long = "debug", help = "debug logging (unless RUST_LOG is set)")]
    pub debug: bool,
}

impl Tmx2bitext {
    /// Build the segment filter from flags, then from the `--clean-steps` file.
    pub fn segment_filter(&self) -> Result<SegmentFilter, Error> {
        let multiline = if self.keep_multilines {
            MultilinePolicy::Join
        } else {
            MultilinePolicy::Blank
        };

        let mut steps = Vec::new();
        if let Some(diff) = self.length_diff {
            steps.push(CleanStep::LengthDiff(LengthDiff::new(diff)));
        }
        if let Some(bounds) = self.length_limit {
            steps.push(CleanStep::LengthLimit(LengthLimit::new(bounds, bounds)));
        }
        if let Some(ratio) = self.sentence_ratio {
            steps.push(CleanStep::SentenceRatio(SentenceRatio::new(ratio)));
        }
        if let Some(path) = &self.clean_steps {
            let f = File::open(path)?;
            let from_file: Vec<CleanStep> = serde_json::from_reader(BufReader::new(f))?;
            steps.extend(from_file);
        }

        Ok(SegmentFilter::new(multiline, steps))
    }
}

#[derive(Debug, StructOpt)]
/// bitext2tmx command and parameters.
pub struct Bitext2tmx {
    #[structopt(
        parse(from_os_str),
        help = "bitext file, or directory of <stem>.<xx>-<yy>.bitext files"
    )]
    pub src: PathBuf,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "output",
        help = "output directory (defaults to the input directory)"
    )]
    pub dst: Option<PathBuf>,
    #[structopt(parse(from_os_str), long = "report", help = "write a JSON report there")]
    pub report: Option<PathBuf>,
    #[structopt(long = "debug", help = "debug logging (unless RUST_LOG is set)")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(parse_bounds("1-80"), Ok((1, 80)));
        assert!(parse_bounds("80").is_err());
        assert!(parse_bounds("80-1").is_err());
        assert!(parse_bounds("a-b").is_err());
    }

    #[test]
    fn filter_from_flags() {
        let opt = Tmxbitext::from_iter(&[
            "tmxbitext",
            "tmx2bitext",
            "data",
            "en",
            "de",
            "--length-diff",
            "3",
            "--length-limit",
            "2-40",
            "--debug",
        ]);
        assert!(opt.debug());

        let cmd = match opt {
            Tmxbitext::Tmx2bitext(cmd) => cmd,
            _ => panic!("wrong subcommand"),
        };
        let filter = cmd.segment_filter().unwrap();
        assert_eq!(
            filter.steps(),
            &[
                CleanStep::LengthDiff(LengthDiff::new(3)),
                CleanStep::LengthLimit(LengthLimit::new((2, 40), (2, 40))),
            ]
        );
    }

    #[test]
    fn filter_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steps.json");
        std::fs::write(&path, r#"[{"name": "sentence_ratio", "ratio": 2}]"#).unwrap();

        let opt = Tmxbitext::from_iter(&[
            "tmxbitext",
            "tmx2bitext",
            "data",
            "en",
            "de",
            "--clean-steps",
            path.to_str().unwrap(),
        ]);
        let cmd = match opt {
            Tmxbitext::Tmx2bitext(cmd) => cmd,
            _ => panic!("wrong subcommand"),
        };
        assert_eq!(
            cmd.segment_filter().unwrap().steps(),
            &[CleanStep::SentenceRatio(SentenceRatio::new(2.0))]
        );
    }
}
