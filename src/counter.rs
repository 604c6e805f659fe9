use image::RgbaImage;

use crate::color::{Color, near_enough};

/// Default number of approximately-distinct colors tracked per image.
pub const DEFAULT_TABLE_CAPACITY: usize = 10_000;

/// How many dropped colors are kept verbatim for diagnostics.
const DROPPED_SAMPLE_LIMIT: usize = 16;

/// One approximately-distinct color and how many pixels landed in it.
#[derive(Clone, Copy, Debug)]
pub struct ColorCount {
    pub color: Color,
    pub count: u32,
}

/// Bounded frequency table of approximately-distinct colors.
///
/// Records are matched by linear scan with the near-enough predicate, so a
/// pixel joins the first cluster within tolerance rather than an exact
/// bucket. At most one record matches any given pixel at insertion time;
/// earlier records are never merged after the fact.
pub struct PopularityTable {
    entries: Vec<ColorCount>,
    capacity: usize,
    dropped_pixels: u64,
    dropped_sample: Vec<Color>,
}

impl PopularityTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TABLE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            dropped_pixels: 0,
            dropped_sample: Vec::new(),
        }
    }

    /// Count one already-normalized pixel.
    ///
    /// When every slot is occupied and none is near enough, the pixel is
    /// dropped from the statistics. That under-represents the image's color
    /// population but never aborts the run; the drop is counted and a small
    /// sample of dropped colors retained so callers can warn.
    pub fn record(&mut self, color: Color) {
        for entry in &mut self.entries {
            if near_enough(color, entry.color) {
                entry.count += 1;
                return;
            }
        }
        if self.entries.len() < self.capacity {
            self.entries.push(ColorCount { color, count: 1 });
        } else {
            self.dropped_pixels += 1;
            if self.dropped_sample.len() < DROPPED_SAMPLE_LIMIT {
                self.dropped_sample.push(color);
            }
        }
    }

    /// Normalize and count every pixel of the image in one row-major pass.
    pub fn count_image(image: &RgbaImage) -> Self {
        let mut table = Self::new();
        table.add_image(image);
        table
    }

    pub fn add_image(&mut self, image: &RgbaImage) {
        for pixel in image.pixels() {
            let [r, g, b, a] = pixel.0;
            self.record(Color::new(r, g, b, a).normalize());
        }
    }

    pub fn entries(&self) -> &[ColorCount] {
        &self.entries
    }

    /// Pixels lost to table exhaustion.
    pub fn dropped_pixels(&self) -> u64 {
        self.dropped_pixels
    }

    /// Up to a handful of the colors that were dropped, for diagnostics.
    pub fn dropped_sample(&self) -> &[Color] {
        &self.dropped_sample
    }

    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.count)).sum()
    }
}

impl Default for PopularityTable {
    fn default() -> Self {
        Self::new()
    }
}
