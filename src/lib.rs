//! Convert raster images to the compact indexed-color Noice format.
//!
//! The interesting work is palette construction: pixels are counted into a
//! bounded table of approximately-distinct colors, the table is ranked by
//! popularity, and candidates that a blend of two already-kept colors can
//! reproduce are pruned. The resulting palette (at most 31 colors plus a
//! reserved transparent slot) drives the binary encoder in [`format`].

pub mod color;
pub mod counter;
pub mod error;
pub mod format;
pub mod geometry;
pub mod selector;

pub use color::{Color, near_enough};
pub use counter::PopularityTable;
pub use error::NoiceError;
pub use selector::{MAX_PALETTE, Palette, PaletteEntry, select_palette};

use image::RgbaImage;

/// The outcome of one conversion run.
#[derive(Debug)]
pub struct Conversion {
    /// The encoded Noice file.
    pub data: Vec<u8>,
    /// The palette the encoder used, most popular colors first.
    pub palette: Palette,
    /// Pixels dropped because the frequency table filled up.
    pub dropped_pixels: u64,
    /// A bounded sample of the dropped colors, for warnings.
    pub dropped_sample: Vec<Color>,
}

/// Convert decoded RGBA pixels to a Noice file.
pub fn convert(image: &RgbaImage) -> Result<Conversion, NoiceError> {
    let table = PopularityTable::count_image(image);
    let palette = select_palette(&table);
    let data = format::encode(image, &palette)?;
    Ok(Conversion {
        data,
        palette,
        dropped_pixels: table.dropped_pixels(),
        dropped_sample: table.dropped_sample().to_vec(),
    })
}

/// Decode an image from its encoded bytes, then convert it.
pub fn convert_bytes(input: &[u8]) -> Result<Conversion, NoiceError> {
    let img = image::load_from_memory(input)?;
    convert(&img.to_rgba8())
}
