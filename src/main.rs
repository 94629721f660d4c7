//! # tmxbitext
//!
//! Conversion between TMX translation memories and bitext files.
//!
//! ```sh
//! tmxbitext 1.0.0
//! TMX <-> bitext conversion tool.
//!
//! USAGE:
//!     tmxbitext <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     bitext2tmx    Build TMX files from bitext files
//!     help          Prints this message or the help of the given subcommand(s)
//!     tmx2bitext    Extract sentence pairs from TMX files into bitext files
//! ```
use std::process;

use log::{debug, error};
use structopt::StructOpt;

use tmxbitext::error::Error;
use tmxbitext::lang::LanguageCode;
use tmxbitext::pipelines::{BatchReport, Bitext2Tmx, Pipeline, Tmx2Bitext};

mod cli;

fn init_logger(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run(opt: &cli::Tmxbitext) -> Result<BatchReport, Error> {
    match opt {
        cli::Tmxbitext::Tmx2bitext(c) => {
            let p = Tmx2Bitext::new(
                c.src.clone(),
                c.dst.clone(),
                LanguageCode::parse(&c.source_lang)?,
                LanguageCode::parse(&c.target_lang)?,
                c.segment_filter()?,
            );
            p.run()
        }
        cli::Tmxbitext::Bitext2tmx(c) => {
            let p = Bitext2Tmx::new(c.src.clone(), c.dst.clone());
            p.run()
        }
    }
}

fn main() {
    let opt = cli::Tmxbitext::from_args();
    init_logger(opt.debug());
    debug!("cli args\n{:#?}", opt);

    let report = match run(&opt) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    };

    report.log_summary();
    if let Some(path) = opt.report() {
        if let Err(e) = report.write_json(path) {
            error!("could not write report to {:?}: {}", path, e);
            process::exit(2);
        }
    }

    if !report.is_success() {
        process::exit(1);
    }
}
