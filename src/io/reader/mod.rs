/*! Corpus reading utilities

TMX documents are read through [crate::tmx::TmxReader], bitext files through [BitextReader].
Readers implement [Iterator].
!*/
mod bitextreader;

pub use bitextreader::BitextReader;
