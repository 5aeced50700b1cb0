#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid {axis} {value}: must be odd and at least {min}")]
    InvalidDimension {
        axis: &'static str,
        value: usize,
        min: usize,
    },

    #[error("invalid layout: {0}")]
    Layout(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
