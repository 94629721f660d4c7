//! Pipeline trait.
use crate::error::Error;

/// Implemented by each conversion, generic over the return type
/// so that pipelines can hand back what they produced (see [super::BatchReport]).
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
