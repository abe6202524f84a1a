use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("no legal anchor for a {width}x{height} piece in the current container")]
    PlacementImpossible { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, PackError>;
