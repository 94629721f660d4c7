use crate::error::Error;

/// Sentence pair writers.
pub trait WriterTrait {
    /// Write a single (source, target) pair.
    fn write_pair(&mut self, source: &str, target: &str) -> Result<(), Error>;

    /// Write pairs in order.
    fn write(&mut self, pairs: &[(String, String)]) -> Result<(), Error> {
        for (source, target) in pairs {
            self.write_pair(source, target)?;
        }
        Ok(())
    }

    /// Number of pairs written so far.
    fn nb_pairs(&self) -> u64;
}
