/*! # tmxbitext

Conversion between TMX translation memories and tab-separated bitext files.

- [pipelines::Tmx2Bitext] extracts the (source, target) pairs of TMX files, filtering out pairs
  that are unusable as training data ([filtering::SegmentFilter]),
- [pipelines::Bitext2Tmx] builds TMX files from `<stem>.<xx>-<yy>.bitext` files.

TMX documents are read as a stream of [tmx::TranslationUnit]s ([tmx::TmxReader]), so that
memory use does not grow with the document size.
!*/
pub mod error;
pub mod filtering;
pub mod io;
pub mod lang;
pub mod pipelines;
pub mod tmx;
