use thiserror::Error;

/// Top-level error type for the Catoptric optics kernel.
#[derive(Debug, Error)]
pub enum CatoptricError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("mirror radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to scenario configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("radius is zero")]
    ZeroRadius,

    #[error("radius is negative: {0}")]
    NegativeRadius(f64),

    #[error("observer distance {distance} must exceed the mirror radius {radius}")]
    ObserverInsideMirror { distance: f64, radius: f64 },
}

/// Errors related to result analysis and reporting.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("unrecognized metric name: {0}")]
    UnknownMetric(String),
}

/// Convenience type alias for results using [`CatoptricError`].
pub type Result<T> = std::result::Result<T, CatoptricError>;
