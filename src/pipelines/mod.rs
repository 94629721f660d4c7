//! Pipelines.
//!
//! The two conversions are implemented here, and the module
//! provides a light [pipeline::Pipeline] trait that both implement.
pub mod bitext2tmx;
pub mod naming;
pub mod pipeline;
pub mod report;
pub mod tmx2bitext;

pub use bitext2tmx::Bitext2Tmx;
pub use pipeline::Pipeline;
pub use report::{BatchReport, FileReport, FileStats};
pub use tmx2bitext::Tmx2Bitext;
