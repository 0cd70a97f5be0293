use thiserror::Error;

/// Top-level error type for the Figura geometry core.
#[derive(Debug, Error)]
pub enum FiguraError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Entity(#[from] EntityError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("degenerate matrix (determinant {determinant})")]
    DegenerateMatrix { determinant: f64 },
}

/// Errors raised at the entity model boundary.
#[derive(Debug, Error, PartialEq)]
pub enum EntityError {
    #[error("{entity}: invalid {parameter} = {value}")]
    InvalidParameter {
        entity: &'static str,
        parameter: &'static str,
        value: f64,
    },

    #[error("invalid vertex at index {index}")]
    InvalidVertex { index: usize },

    #[error("swept parameter has {found} values, expected {expected}")]
    SweepLengthMismatch { expected: usize, found: usize },

    #[error("entity not found")]
    NotFound,
}

impl EntityError {
    /// Builds an [`EntityError::InvalidParameter`] and logs the rejection.
    pub(crate) fn invalid_parameter(entity: &'static str, parameter: &'static str, value: f64) -> Self {
        tracing::error!(entity, parameter, value, "rejected entity parameter");
        Self::InvalidParameter {
            entity,
            parameter,
            value,
        }
    }

    /// Builds an [`EntityError::InvalidVertex`] and logs the rejection.
    pub(crate) fn invalid_vertex(index: usize) -> Self {
        tracing::error!(index, "rejected non-finite polyline vertex");
        Self::InvalidVertex { index }
    }
}

/// Convenience type alias for results using [`FiguraError`].
pub type Result<T> = std::result::Result<T, FiguraError>;
