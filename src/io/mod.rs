/*!
# IO utilities

Bitext reading and writing.
!*/
pub mod reader;
pub mod writer;

pub use reader::BitextReader;
pub use writer::{BitextWriter, WriterTrait};

/// Line terminator of bitext files.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
/// Line terminator of bitext files.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";
