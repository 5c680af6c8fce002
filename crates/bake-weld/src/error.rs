//! Error types for welding operations.

use thiserror::Error;

/// Result type for welding operations.
pub type WeldResult<T> = Result<T, WeldError>;

/// Errors that can occur while welding a triangle soup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeldError {
    /// The soup contains no corners.
    #[error("triangle soup is empty")]
    EmptySoup,

    /// The corner count is not a multiple of three.
    #[error("corner count {count} is not a multiple of 3, soup is not triangulated")]
    NotTriangulated {
        /// Number of corners in the soup.
        count: usize,
    },

    /// A present attribute array does not have one entry per corner.
    #[error(
        "attribute arrays disagree: {positions} positions, {normals} normals, \
         {texcoords} texcoords"
    )]
    AttributeMismatch {
        /// Number of corner positions.
        positions: usize,
        /// Number of corner normals.
        normals: usize,
        /// Number of corner texture coordinates.
        texcoords: usize,
    },

    /// The soup has more corners than a `u32` index stream can address.
    #[error("soup has {count} corners, too many for 32-bit indices")]
    TooManyCorners {
        /// Number of corners in the soup.
        count: usize,
    },

    /// The welding tolerance is negative or not finite.
    #[error("tolerance must be finite and non-negative, got {value}")]
    InvalidTolerance {
        /// The rejected tolerance.
        value: f32,
    },

    /// The bounding margin factor is negative or not finite.
    #[error("margin factor must be finite and non-negative, got {value}")]
    InvalidMarginFactor {
        /// The rejected margin factor.
        value: f32,
    },

    /// The grid resolution cap is zero.
    #[error("maximum grid resolution must be at least 1")]
    ZeroGridResolution,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_problem() {
        let err = WeldError::NotTriangulated { count: 7 };
        assert!(err.to_string().contains('7'));

        let err = WeldError::InvalidTolerance { value: -1.0 };
        assert!(err.to_string().contains("-1"));
    }
}
