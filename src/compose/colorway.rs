//! Colorway arrangement.
//!
//! Two and three colorways sit on one dedicated row with their own label
//! baseline. Any other count wraps into a three-column grid whose last row
//! sits on the fixed baseline, with earlier rows stacked upward. The
//! arrangement is decided once per product and carried as an explicit
//! variant rather than re-derived per item.

use crate::common::unit::{Bounds, mm_to_emu};
use crate::compose::product::ColorwayItem;
use crate::compose::spec::ColorwaySpec;

/// Circled ordinal glyphs prefixed to colorway labels.
///
/// The glyph set ends at ⑩; items beyond it keep their slot but render
/// with no ordinal.
const CIRCLED_ORDINALS: [&str; 10] = ["①", "②", "③", "④", "⑤", "⑥", "⑦", "⑧", "⑨", "⑩"];

/// The ordinal glyph for a zero-based item index, or "" past the set.
pub fn circled_ordinal(index: usize) -> &'static str {
    CIRCLED_ORDINALS.get(index).copied().unwrap_or("")
}

/// The arrangement chosen for a product's colorway count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorwayLayout {
    /// Two or three items on the dedicated row
    SingleRow { count: usize },
    /// Row-major grid, last row on the baseline
    Grid { rows: usize },
}

impl ColorwayLayout {
    /// Decide the arrangement for an item count.
    pub fn for_count(count: usize, per_row: usize) -> Self {
        match count {
            2 | 3 => Self::SingleRow { count },
            _ => Self::Grid {
                rows: count.div_ceil(per_row).max(1),
            },
        }
    }
}

/// Where one colorway's swatch and label land.
#[derive(Debug, Clone)]
pub struct ColorwayPlacement {
    /// Top-left origin of the swatch image, in EMUs
    pub image_left: i64,
    pub image_top: i64,
    /// Fixed swatch width; height follows the image aspect
    pub image_width: i64,
    /// The label text box
    pub label_box: Bounds,
    /// `circled_ordinal(i)` + uppercased name
    pub label_text: String,
}

/// Computes colorway placements from the injected spec.
pub struct ColorwayLayoutEngine<'a> {
    spec: &'a ColorwaySpec,
}

impl<'a> ColorwayLayoutEngine<'a> {
    pub fn new(spec: &'a ColorwaySpec) -> Self {
        Self { spec }
    }

    /// Lay out `colorways`, returning the chosen arrangement and one
    /// placement per item in display order.
    ///
    /// An item with an empty name still consumes its ordinal slot and
    /// renders an empty name after the glyph.
    pub fn layout(&self, colorways: &[ColorwayItem]) -> (ColorwayLayout, Vec<ColorwayPlacement>) {
        let arrangement = ColorwayLayout::for_count(colorways.len(), self.spec.grid_per_row);
        let placements = colorways
            .iter()
            .enumerate()
            .map(|(i, item)| self.place_item(arrangement, i, &item.name))
            .collect();
        (arrangement, placements)
    }

    fn place_item(&self, arrangement: ColorwayLayout, i: usize, name: &str) -> ColorwayPlacement {
        let spec = self.spec;
        let label_text = format!("{}{}", circled_ordinal(i), name.trim().to_uppercase());

        match arrangement {
            ColorwayLayout::SingleRow { count } => {
                let row = if count == 2 {
                    &spec.two_items
                } else {
                    &spec.three_items
                };
                let x_mm = row.start_left_mm + i as f64 * row.gap_mm;
                ColorwayPlacement {
                    image_left: mm_to_emu(x_mm),
                    image_top: mm_to_emu(spec.image_top_mm),
                    image_width: mm_to_emu(spec.image_width_mm),
                    // The label row sits above the swatch row on its own
                    // fixed baseline
                    label_box: Bounds::from_mm(
                        x_mm,
                        row.label_top_mm,
                        spec.row_label_width_mm,
                        spec.row_label_height_mm,
                    ),
                    label_text,
                }
            }
            ColorwayLayout::Grid { rows } => {
                let row = i / spec.grid_per_row;
                let col = i % spec.grid_per_row;
                let x_mm = spec.grid_start_left_mm
                    + col as f64 * (spec.image_width_mm + spec.grid_col_gap_mm);
                let row_pitch_mm = spec.grid_image_height_mm
                    + spec.grid_row_gap_mm
                    + spec.grid_label_allowance_mm;
                // Earlier rows stack upward from the baseline row
                let y_mm =
                    spec.image_top_mm - (rows - 1 - row) as f64 * row_pitch_mm;
                ColorwayPlacement {
                    image_left: mm_to_emu(x_mm),
                    image_top: mm_to_emu(y_mm),
                    image_width: mm_to_emu(spec.image_width_mm),
                    label_box: Bounds::from_mm(
                        x_mm,
                        y_mm + spec.grid_image_height_mm + spec.grid_label_offset_mm,
                        spec.image_width_mm,
                        spec.grid_label_height_mm,
                    ),
                    label_text,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::spec::SheetSpec;

    fn engine_spec() -> ColorwaySpec {
        SheetSpec::default().colorway
    }

    fn items(names: &[&str]) -> Vec<ColorwayItem> {
        names.iter().map(|n| ColorwayItem::new(n)).collect()
    }

    #[test]
    fn test_arrangement_decision() {
        assert_eq!(
            ColorwayLayout::for_count(0, 3),
            ColorwayLayout::Grid { rows: 1 }
        );
        assert_eq!(
            ColorwayLayout::for_count(1, 3),
            ColorwayLayout::Grid { rows: 1 }
        );
        assert_eq!(
            ColorwayLayout::for_count(2, 3),
            ColorwayLayout::SingleRow { count: 2 }
        );
        assert_eq!(
            ColorwayLayout::for_count(3, 3),
            ColorwayLayout::SingleRow { count: 3 }
        );
        assert_eq!(
            ColorwayLayout::for_count(4, 3),
            ColorwayLayout::Grid { rows: 2 }
        );
        assert_eq!(
            ColorwayLayout::for_count(7, 3),
            ColorwayLayout::Grid { rows: 3 }
        );
    }

    #[test]
    fn test_two_items_share_one_row() {
        let spec = engine_spec();
        let engine = ColorwayLayoutEngine::new(&spec);
        let (arrangement, placements) = engine.layout(&items(&["camel", "black"]));

        assert_eq!(arrangement, ColorwayLayout::SingleRow { count: 2 });
        for (i, p) in placements.iter().enumerate() {
            assert_eq!(p.image_left, mm_to_emu(169.9 + i as f64 * 28.0));
            assert_eq!(p.image_top, mm_to_emu(120.0));
            assert_eq!(p.label_box.y, mm_to_emu(114.8));
        }
        assert_eq!(placements[0].label_text, "①CAMEL");
        assert_eq!(placements[1].label_text, "②BLACK");
    }

    #[test]
    fn test_three_items_share_one_row() {
        let spec = engine_spec();
        let engine = ColorwayLayoutEngine::new(&spec);
        let (_, placements) = engine.layout(&items(&["a", "b", "c"]));
        let ys: Vec<i64> = placements.iter().map(|p| p.image_top).collect();
        assert!(ys.iter().all(|&y| y == mm_to_emu(120.0)));
        assert_eq!(placements[2].image_left, mm_to_emu(169.9 + 2.0 * 28.0));
    }

    #[test]
    fn test_five_items_grid_stacks_upward_from_baseline() {
        let spec = engine_spec();
        let engine = ColorwayLayoutEngine::new(&spec);
        let (arrangement, placements) = engine.layout(&items(&["a", "b", "c", "d", "e"]));

        assert_eq!(arrangement, ColorwayLayout::Grid { rows: 2 });
        // First three items form the upper row, one pitch above baseline
        let pitch = 30.0 + 8.0 + 10.0;
        for p in &placements[..3] {
            assert_eq!(p.image_top, mm_to_emu(120.0 - pitch));
        }
        // The leftover two sit on the baseline row
        for p in &placements[3..] {
            assert_eq!(p.image_top, mm_to_emu(120.0));
        }
        // Row-major columns restart on the second row
        assert_eq!(placements[3].image_left, placements[0].image_left);
        assert_eq!(placements[4].image_left, placements[1].image_left);
        assert_eq!(placements[0].image_left, mm_to_emu(180.0));
        assert_eq!(placements[1].image_left, mm_to_emu(180.0 + 32.0));
    }

    #[test]
    fn test_single_item_sits_on_baseline() {
        let spec = engine_spec();
        let engine = ColorwayLayoutEngine::new(&spec);
        let (_, placements) = engine.layout(&items(&["solo"]));
        assert_eq!(placements[0].image_top, mm_to_emu(120.0));
        assert_eq!(placements[0].image_left, mm_to_emu(180.0));
        assert_eq!(placements[0].label_text, "①SOLO");
    }

    #[test]
    fn test_grid_label_under_image() {
        let spec = engine_spec();
        let engine = ColorwayLayoutEngine::new(&spec);
        let (_, placements) = engine.layout(&items(&["a", "b", "c", "d"]));
        let p = &placements[3];
        assert_eq!(p.label_box.x, p.image_left);
        assert_eq!(p.label_box.y, p.image_top + mm_to_emu(30.0 + 2.0));
    }

    #[test]
    fn test_empty_name_keeps_ordinal_slot() {
        let spec = engine_spec();
        let engine = ColorwayLayoutEngine::new(&spec);
        let (_, placements) = engine.layout(&items(&["first", "", "third"]));
        assert_eq!(placements[1].label_text, "②");
        assert_eq!(placements[2].label_text, "③THIRD");
    }

    #[test]
    fn test_ordinals_exhaust_without_panic() {
        let names: Vec<String> = (0..12).map(|i| format!("c{i}")).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let spec = engine_spec();
        let engine = ColorwayLayoutEngine::new(&spec);
        let (_, placements) = engine.layout(&items(&refs));
        assert_eq!(placements[9].label_text, "⑩C9");
        // Past the glyph set: name only, no wrap-around
        assert_eq!(placements[10].label_text, "C10");
        assert_eq!(placements[11].label_text, "C11");
    }
}
