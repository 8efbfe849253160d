//! Execution strategy for per-index work

use crate::maybe_rayon::*;
use patcorr_core::Result;
use std::ops::Range;

/// Processing mode for algorithms with independent per-index steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingMode {
    /// Single-threaded processing, in index order
    Sequential,
    /// Parallel processing on the rayon pool (sequential without the `parallel` feature)
    #[default]
    Parallel,
}

impl ProcessingMode {
    /// Map a fallible function over indices, collecting results in index order.
    ///
    /// The first error aborts the whole map; no partial output is returned.
    pub fn try_map<T, F>(&self, range: Range<usize>, f: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(usize) -> Result<T> + Sync + Send,
    {
        match self {
            ProcessingMode::Sequential => range.map(f).collect(),
            ProcessingMode::Parallel => range.into_par_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patcorr_core::Error;

    #[test]
    fn test_modes_preserve_order() {
        let square = |i: usize| Ok(i * i);
        let seq = ProcessingMode::Sequential.try_map(0..50, square).unwrap();
        let par = ProcessingMode::Parallel.try_map(0..50, square).unwrap();
        assert_eq!(seq, par);
        assert_eq!(seq[7], 49);
    }

    #[test]
    fn test_error_aborts() {
        let result = ProcessingMode::Parallel.try_map(0..10, |i| {
            if i == 3 {
                Err(Error::Other("step 3".into()))
            } else {
                Ok(i)
            }
        });
        assert_eq!(result.unwrap_err(), Error::Other("step 3".into()));
    }
}
