//! The Noice binary container.
//!
//! Little-endian layout:
//!
//! ```text
//! 0  4  magic
//! 4  2  flags
//! 6  1  bits per pointer (8, 16, or 24; this writer always emits 8)
//! 7  1  palette size in entries, a multiple of 4 up to 32
//! 8  4  file size
//! 12 2  width
//! 14 2  height
//! 16 3n palette, RGB triples
//! ..    pixel data, one palette index per pixel, row-major
//! ```
//!
//! Slot 15 is the reserved transparent sentinel whenever the palette spans
//! it; a palette size of 0 means an implicit black/transparent image.

use image::RgbaImage;

use crate::color::Color;
use crate::error::NoiceError;
use crate::selector::Palette;

pub const MAGIC: u32 = 0x000901CE;
pub const HEADER_LEN: usize = 16;
pub const BITS_PER_POINTER: u8 = 8;

/// Index of the reserved transparent slot.
pub const TRANSPARENT_SLOT: u8 = 15;
pub const MAX_SLOTS: usize = 32;

/// One persisted palette position.
///
/// The sentinel is a tagged variant rather than a bare index convention so
/// the writer cannot misplace it when serializing around slot 15.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Opaque(Color),
    Transparent,
    /// Padding before the sentinel when the palette is short. Serialized as
    /// black but never a remap target.
    Unused,
}

/// Assign palette colors to persisted slots.
///
/// Colors fill slots 0..=14 in palette order, then continue at 16 so slot
/// 15 stays free for the sentinel. The sentinel is materialized when the
/// image needs it or when the colors spill past slot 15; a short palette
/// for a fully opaque image omits it.
pub fn layout_slots(palette: &Palette, needs_transparency: bool) -> Vec<Slot> {
    let count = palette.len();
    let spills_past_sentinel = count > TRANSPARENT_SLOT as usize;

    let mut slots = Vec::with_capacity(MAX_SLOTS);
    for color in palette.colors() {
        if slots.len() == TRANSPARENT_SLOT as usize {
            slots.push(Slot::Transparent);
        }
        slots.push(Slot::Opaque(color));
    }
    if needs_transparency && !spills_past_sentinel {
        while slots.len() < TRANSPARENT_SLOT as usize {
            slots.push(Slot::Unused);
        }
        slots.push(Slot::Transparent);
    }
    debug_assert!(slots.len() <= MAX_SLOTS);
    slots
}

/// Entry count as stored in the header: rounded up to a multiple of 4.
fn palette_size_field(slot_count: usize) -> u8 {
    (slot_count.div_ceil(4) * 4) as u8
}

fn image_needs_transparency(image: &RgbaImage) -> bool {
    image.pixels().any(|p| p.0[3] < crate::color::TRANSPARENT_CUTOFF)
}

/// Map one normalized pixel to its palette index.
///
/// Transparent pixels take the sentinel; everything else takes the nearest
/// opaque slot by squared RGB distance. With no opaque slots at all the
/// index falls back to 0, the implicit black of an empty palette.
fn nearest_slot(slots: &[Slot], color: Color) -> u8 {
    if color.is_transparent() {
        return TRANSPARENT_SLOT;
    }
    let mut best_idx = 0u8;
    let mut best_dist = i32::MAX;
    for (idx, slot) in slots.iter().enumerate() {
        let Slot::Opaque(c) = slot else { continue };
        let dr = i32::from(color.r) - i32::from(c.r);
        let dg = i32::from(color.g) - i32::from(c.g);
        let db = i32::from(color.b) - i32::from(c.b);
        let dist = dr * dr + dg * dg + db * db;
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx as u8;
        }
    }
    best_idx
}

/// Serialize the image against its selected palette.
pub fn encode(image: &RgbaImage, palette: &Palette) -> Result<Vec<u8>, NoiceError> {
    let (width, height) = image.dimensions();
    if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(NoiceError::ImageTooLarge { width, height });
    }

    let slots = layout_slots(palette, image_needs_transparency(image));
    let palette_size = palette_size_field(slots.len());

    let total = HEADER_LEN + usize::from(palette_size) * 3 + (width * height) as usize;
    let mut buf = Vec::with_capacity(total);

    buf.extend_from_slice(&MAGIC.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // flags
    buf.push(BITS_PER_POINTER);
    buf.push(palette_size);
    buf.extend_from_slice(&(total as u32).to_le_bytes());
    buf.extend_from_slice(&(width as u16).to_le_bytes());
    buf.extend_from_slice(&(height as u16).to_le_bytes());

    for i in 0..usize::from(palette_size) {
        match slots.get(i) {
            Some(Slot::Opaque(c)) => buf.extend_from_slice(&[c.r, c.g, c.b]),
            // Sentinel and padding slots both serialize as black; the
            // sentinel's transparency is implied by its position.
            Some(Slot::Transparent) | Some(Slot::Unused) | None => {
                buf.extend_from_slice(&[0, 0, 0])
            }
        }
    }

    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let color = Color::new(r, g, b, a).normalize();
        buf.push(nearest_slot(&slots, color));
    }

    debug_assert_eq!(buf.len(), total);
    Ok(buf)
}
