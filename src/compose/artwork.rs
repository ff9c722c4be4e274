//! Artwork stacking.
//!
//! Artworks stack top-down on a fixed horizontal axis: the first item's top
//! is the fixed start coordinate, and each subsequent top is the previous
//! top plus the previous item's actual rendered height plus the fixed gap.
//! An unresolvable artwork is skipped without reserving space, so the items
//! after it close the gap.

use tracing::warn;

use crate::assets::{ArtworkModeLookup, AssetKind, AssetResolver};
use crate::common::unit::{Bounds, mm_to_emu};
use crate::compose::placer::{ImagePlacer, TargetDim};
use crate::compose::product::{ArtworkDisplayMode, ArtworkRef};
use crate::compose::spec::SheetSpec;
use crate::pptx::format::ImageFormat;
use crate::pptx::slide::SlideBuilder;

/// Stacks artwork images down the artwork column.
pub struct ArtworkStacker<'a> {
    spec: &'a SheetSpec,
}

impl<'a> ArtworkStacker<'a> {
    pub fn new(spec: &'a SheetSpec) -> Self {
        Self { spec }
    }

    /// The target dimension for a display mode.
    fn target_for(&self, mode: ArtworkDisplayMode) -> TargetDim {
        match mode {
            ArtworkDisplayMode::Small => {
                TargetDim::Width(mm_to_emu(self.spec.artwork_small_width_mm))
            }
            ArtworkDisplayMode::Horizontal => {
                TargetDim::Width(mm_to_emu(self.spec.artwork_default_width_mm))
            }
            ArtworkDisplayMode::Default => {
                TargetDim::Height(mm_to_emu(self.spec.artwork_portrait_height_mm))
            }
        }
    }

    /// Place every resolvable artwork onto `slide`, returning the bounds
    /// actually rendered, in stacking order.
    pub fn stack(
        &self,
        slide: &mut SlideBuilder,
        artworks: &[ArtworkRef],
        assets: &dyn AssetResolver,
        modes: &dyn ArtworkModeLookup,
    ) -> Vec<Bounds> {
        let center_x = mm_to_emu(self.spec.artwork_center_x_mm);
        let gap = mm_to_emu(self.spec.artwork_vertical_gap_mm);
        let mut top = mm_to_emu(self.spec.artwork_start_top_mm);
        let mut placed = Vec::new();

        for artwork in artworks {
            let key = artwork.asset_key.as_str();
            let Some(data) = assets.resolve(AssetKind::Artwork, key) else {
                warn!(asset = key, "artwork not found, skipping");
                continue;
            };
            let Some(format) = ImageFormat::detect_from_bytes(&data) else {
                warn!(asset = key, "artwork has unknown image format, skipping");
                continue;
            };
            let mode = modes.mode_for(key);
            let Some((cx, cy)) = ImagePlacer::scaled_extent(&data, self.target_for(mode)) else {
                warn!(asset = key, "artwork is not decodable, skipping");
                continue;
            };

            let bounds = Bounds {
                x: center_x - cx / 2,
                y: top,
                cx,
                cy,
            };
            slide.add_picture(data.to_vec(), format, bounds, key);
            placed.push(bounds);
            top += cy + gap;
        }

        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{JsonModeLookup, MemoryAssetResolver};
    use bytes::Bytes;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Bytes {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([9, 9, 9, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        Bytes::from(out.into_inner())
    }

    fn artwork_refs(keys: &[&str]) -> Vec<ArtworkRef> {
        keys.iter().map(|k| ArtworkRef::new(k)).collect()
    }

    #[test]
    fn test_stack_accumulates_rendered_heights() {
        let spec = SheetSpec::default();
        let mut assets = MemoryAssetResolver::new();
        // Square images in default (portrait) mode render 20mm x 20mm
        assets.insert(AssetKind::Artwork, "a.png", png(50, 50));
        assets.insert(AssetKind::Artwork, "b.png", png(50, 50));
        let modes = JsonModeLookup::default();

        let mut slide = SlideBuilder::new(256);
        let placed = ArtworkStacker::new(&spec).stack(
            &mut slide,
            &artwork_refs(&["a.png", "b.png"]),
            &assets,
            &modes,
        );

        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].y, mm_to_emu(77.2));
        assert_eq!(placed[0].cy, mm_to_emu(20.0));
        assert_eq!(placed[1].y, placed[0].y + placed[0].cy + mm_to_emu(5.0));
        // Centered on the artwork axis
        let (center_x, _) = placed[0].center();
        assert!((center_x - mm_to_emu(148.4)).abs() <= 1);
    }

    #[test]
    fn test_display_modes_pick_dimension() {
        let spec = SheetSpec::default();
        let mut assets = MemoryAssetResolver::new();
        assets.insert(AssetKind::Artwork, "wide.png", png(100, 50));
        assets.insert(AssetKind::Artwork, "tag.png", png(100, 50));
        let modes = JsonModeLookup::from_json_bytes(
            br#"{"wide.png": "horizontal", "tag.png": "small"}"#,
        );

        let mut slide = SlideBuilder::new(256);
        let placed = ArtworkStacker::new(&spec).stack(
            &mut slide,
            &artwork_refs(&["wide.png", "tag.png"]),
            &assets,
            &modes,
        );

        // horizontal: fixed 30mm width
        assert_eq!(placed[0].cx, mm_to_emu(30.0));
        assert_eq!(placed[0].cy, mm_to_emu(15.0));
        // small: fixed 12mm width
        assert_eq!(placed[1].cx, mm_to_emu(12.0));
        assert_eq!(placed[1].cy, mm_to_emu(6.0));
    }

    #[test]
    fn test_missing_artwork_closes_the_gap() {
        let spec = SheetSpec::default();
        let mut assets = MemoryAssetResolver::new();
        assets.insert(AssetKind::Artwork, "a.png", png(50, 50));
        assets.insert(AssetKind::Artwork, "c.png", png(50, 50));
        let modes = JsonModeLookup::default();

        let mut slide = SlideBuilder::new(256);
        let placed = ArtworkStacker::new(&spec).stack(
            &mut slide,
            &artwork_refs(&["a.png", "missing.png", "c.png"]),
            &assets,
            &modes,
        );

        // The missing middle item leaves no hole in the stack
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[1].y, placed[0].y + placed[0].cy + mm_to_emu(5.0));
        assert_eq!(slide.shape_count(), 2);
    }

    #[test]
    fn test_undecodable_artwork_is_skipped() {
        let spec = SheetSpec::default();
        let mut assets = MemoryAssetResolver::new();
        assets.insert(AssetKind::Artwork, "bad.png", Bytes::from_static(b"nope"));
        let modes = JsonModeLookup::default();

        let mut slide = SlideBuilder::new(256);
        let placed = ArtworkStacker::new(&spec).stack(
            &mut slide,
            &artwork_refs(&["bad.png"]),
            &assets,
            &modes,
        );
        assert!(placed.is_empty());
        assert_eq!(slide.shape_count(), 0);
    }
}
