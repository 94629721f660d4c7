/*!
# Sentence pair writing

[BitextWriter] writes tab-separated bitext, [crate::tmx::TmxWriter] TMX documents.
Both implement [WriterTrait].
!*/
mod bitextwriter;
mod writertrait;

pub use bitextwriter::BitextWriter;
pub use writertrait::WriterTrait;
