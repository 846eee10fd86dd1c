//! Per-file upload progress.

use serde::Serialize;

/// How many files of a generation have been stored so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadProgress {
    /// Files uploaded so far.
    pub completed: usize,
    /// Files in the generation.
    pub total: usize,
}

impl UploadProgress {
    /// Progress at the start of a generation of `total` files.
    pub fn start(total: usize) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    /// Completed share in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        assert_eq!(UploadProgress::start(0).fraction(), 0.0);
        let p = UploadProgress {
            completed: 1,
            total: 4,
        };
        assert_eq!(p.fraction(), 0.25);
        assert_eq!(
            UploadProgress {
                completed: 4,
                total: 4
            }
            .fraction(),
            1.0
        );
    }
}
