use thiserror::Error;

/// Errors raised by pixel buffer access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The buffer holds pixels that may not be read back (foreign-origin image).
    #[error("surface pixels are not readable")]
    AccessDenied,
    #[error("pixel data has {actual} bytes, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("surface dimensions must be positive, got {width}x{height}")]
    EmptySurface { width: u32, height: u32 },
}

/// Errors raised while loading into or exporting from a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
