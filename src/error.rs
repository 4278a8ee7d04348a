use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Rejected chart setting: start angle, duration, offset or label font.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Malformed slice, color, label or snapshot payload.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Property animation a surface refuses to apply.
    #[error("invalid animation: {0}")]
    InvalidAnimation(String),
}
