use thiserror::Error;

#[derive(Error, Debug)]
pub enum PixError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("capacity error: {0}")]
    Capacity(String),

    #[error("input ended early: expected {expected} bytes, read {got}")]
    ShortInput { expected: u64, got: u64 },
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, PixError>;
