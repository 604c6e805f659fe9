use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoiceError {
    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image dimensions {width}x{height} exceed the format limit of 65535")]
    ImageTooLarge { width: u32, height: u32 },
}
