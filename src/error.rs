use thiserror::Error;

/// Why a drawable could not be rasterized into a pixel buffer.
///
/// Never surfaced to callers of the image setters: the flattener logs it and
/// the view renders without an image.
#[derive(Error, Debug)]
pub enum FlattenError {
    #[error("drawable has no usable size ({width}x{height})")]
    EmptySize { width: u32, height: u32 },
    #[error("could not allocate a {width}x{height} pixel buffer")]
    Allocation { width: u32, height: u32 },
    #[error("drawable failed to draw: {0}")]
    Draw(String),
}

/// Failure to turn an [`ImageSource`](crate::widgets::ImageSource) into a drawable.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("SVG error: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error(transparent)]
    Flatten(#[from] FlattenError),
}

pub type Result<T> = std::result::Result<T, ImageLoadError>;
