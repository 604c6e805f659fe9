use crate::color::Color;
use crate::counter::{ColorCount, PopularityTable};
use crate::geometry::between_pair;

/// Most colors a palette can hold; the 32nd slot is the reserved
/// transparent sentinel and never comes out of selection.
pub const MAX_PALETTE: usize = 31;

/// One chosen palette color and the pixel count that earned its place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: Color,
    pub popularity: u32,
}

/// Ordered palette, most important colors first.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.entries.iter().map(|e| e.color)
    }
}

/// Pick up to [`MAX_PALETTE`] colors from the counted records.
///
/// Records are ranked by descending popularity and admitted greedily.
/// Fully transparent records never compete (transparency lives in the
/// reserved sentinel slot), and partially transparent records are not
/// admitted either: the format's color table holds opaque colors only.
///
/// A candidate is rejected when it sits on the line between two colors
/// already admitted, on the theory that a blend of two more popular colors
/// covers it well enough. Greedy and order-dependent, so the result is a
/// good palette rather than an optimal one.
pub fn select_palette(table: &PopularityTable) -> Palette {
    let mut ranked: Vec<ColorCount> = table.entries().to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    let mut palette = Palette::default();
    for record in &ranked {
        if palette.len() >= MAX_PALETTE {
            break;
        }
        if !record.color.is_opaque() {
            continue;
        }
        if is_redundant(record.color, &palette) {
            continue;
        }
        palette.entries.push(PaletteEntry {
            color: record.color,
            popularity: record.count,
        });
    }
    palette
}

fn is_redundant(candidate: Color, palette: &Palette) -> bool {
    for (j, c1) in palette.colors().enumerate() {
        for c2 in palette.colors().skip(j + 1) {
            if between_pair(candidate, c1, c2) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_of(records: &[(Color, u32)]) -> PopularityTable {
        let mut table = PopularityTable::new();
        for &(color, count) in records {
            for _ in 0..count {
                table.record(color);
            }
        }
        table
    }

    #[test]
    fn most_popular_opaque_color_leads() {
        let table = table_of(&[
            (Color::new(0, 0, 0, 0), 50),
            (Color::new(10, 200, 10, 255), 3),
            (Color::new(200, 10, 10, 255), 7),
        ]);
        let palette = select_palette(&table);
        assert_eq!(palette.entries[0].color, Color::new(200, 10, 10, 255));
        assert_eq!(palette.entries[0].popularity, 7);
    }

    #[test]
    fn transparent_and_partial_alpha_are_excluded() {
        let table = table_of(&[
            (Color::new(0, 0, 0, 0), 100),
            (Color::new(40, 40, 40, 128), 90),
            (Color::new(250, 250, 250, 255), 1),
        ]);
        let palette = select_palette(&table);
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.entries[0].color, Color::new(250, 250, 250, 255));
    }

    #[test]
    fn blend_of_two_kept_colors_is_pruned() {
        let table = table_of(&[
            (Color::new(0, 0, 0, 255), 100),
            (Color::new(254, 0, 0, 255), 90),
            (Color::new(128, 2, 0, 255), 80), // sits on the black-red line
            (Color::new(0, 200, 0, 255), 70),
        ]);
        let palette = select_palette(&table);
        let colors: Vec<Color> = palette.colors().collect();
        assert_eq!(
            colors,
            vec![
                Color::new(0, 0, 0, 255),
                Color::new(254, 0, 0, 255),
                Color::new(0, 200, 0, 255),
            ]
        );
    }

    #[test]
    fn palette_never_exceeds_the_cap() {
        // 40 widely spaced opaque colors, none collinear within tolerance.
        let mut records = Vec::new();
        for i in 0..40u32 {
            let c = Color::new(
                (i * 37 % 256) as u8,
                (i * 91 % 256) as u8,
                (i * 151 % 256) as u8,
                255,
            );
            records.push((c, 100 - i));
        }
        let table = table_of(&records);
        let palette = select_palette(&table);
        assert!(palette.len() <= MAX_PALETTE);
    }

    #[test]
    fn empty_table_gives_empty_palette() {
        let table = PopularityTable::new();
        assert!(select_palette(&table).is_empty());
    }
}
