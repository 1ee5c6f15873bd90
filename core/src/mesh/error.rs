//! Recoverable mesh errors.
//!
//! Contract violations (non-triangle index counts, out-of-range indices)
//! panic instead; these are the states a caller is expected to handle.

use thiserror::Error;

/// Mesh error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("cannot represent indices of a {vertex_count}-vertex mesh in 16 bits")]
    IndexOverflow { vertex_count: usize },
    #[error("CPU-side vertex and index data was released")]
    CpuDataReleased,
}

pub type MeshResult<T> = Result<T, MeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::IndexOverflow {
            vertex_count: 70000,
        };
        assert_eq!(
            err.to_string(),
            "cannot represent indices of a 70000-vertex mesh in 16 bits"
        );
        assert_eq!(
            MeshError::CpuDataReleased.to_string(),
            "CPU-side vertex and index data was released"
        );
    }
}
