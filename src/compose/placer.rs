//! Aspect-preserving image placement.
//!
//! Given a target width or height, the companion dimension is derived from
//! the image's native pixel dimensions, so the rendered aspect ratio always
//! matches the source. Callers receive the actual rendered bounds and must
//! use those for any subsequent stacking math, never the nominal request.

use std::io::Cursor;

use image::ImageReader;

use crate::common::unit::Bounds;

/// The one fixed dimension of a placement request, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDim {
    Width(i64),
    Height(i64),
}

/// Computes placements that preserve the native aspect ratio.
pub struct ImagePlacer;

impl ImagePlacer {
    /// Probe the native pixel dimensions of encoded image bytes.
    ///
    /// Decodes headers only. Returns `None` for bytes no decoder accepts,
    /// which callers treat as a recoverable skip.
    pub fn native_dimensions(data: &[u8]) -> Option<(u32, u32)> {
        let (w, h) = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()?;
        if w == 0 || h == 0 {
            return None;
        }
        Some((w, h))
    }

    /// The rendered extent for `target`, preserving the native aspect of
    /// `data`.
    pub fn scaled_extent(data: &[u8], target: TargetDim) -> Option<(i64, i64)> {
        let (native_w, native_h) = Self::native_dimensions(data)?;
        Some(match target {
            TargetDim::Width(cx) => {
                let cy = (cx as f64 * native_h as f64 / native_w as f64).round() as i64;
                (cx, cy)
            }
            TargetDim::Height(cy) => {
                let cx = (cy as f64 * native_w as f64 / native_h as f64).round() as i64;
                (cx, cy)
            }
        })
    }

    /// Bounds that center the image on `(center_x, center_y)` at the
    /// requested target dimension.
    pub fn place_centered(
        data: &[u8],
        center_x: i64,
        center_y: i64,
        target: TargetDim,
    ) -> Option<Bounds> {
        let (cx, cy) = Self::scaled_extent(data, target)?;
        Some(Bounds {
            x: center_x - cx / 2,
            y: center_y - cy / 2,
            cx,
            cy,
        })
    }

    /// Bounds anchored at a top-left origin at the requested target
    /// dimension.
    pub fn place_at(data: &[u8], left: i64, top: i64, target: TargetDim) -> Option<Bounds> {
        let (cx, cy) = Self::scaled_extent(data, target)?;
        Some(Bounds {
            x: left,
            y: top,
            cx,
            cy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::unit::mm_to_emu;

    /// Encode a solid PNG of the given pixel dimensions.
    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([40, 40, 40, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_native_dimensions() {
        let png = png_bytes(64, 16);
        assert_eq!(ImagePlacer::native_dimensions(&png), Some((64, 16)));
        assert_eq!(ImagePlacer::native_dimensions(b"not an image"), None);
    }

    #[test]
    fn test_scaled_extent_preserves_aspect() {
        let png = png_bytes(200, 100);
        let (cx, cy) =
            ImagePlacer::scaled_extent(&png, TargetDim::Width(mm_to_emu(90.0))).unwrap();
        assert_eq!(cx, mm_to_emu(90.0));
        assert_eq!(cy, mm_to_emu(45.0));

        let (cx, cy) =
            ImagePlacer::scaled_extent(&png, TargetDim::Height(mm_to_emu(20.0))).unwrap();
        assert_eq!(cy, mm_to_emu(20.0));
        assert_eq!(cx, mm_to_emu(40.0));
    }

    #[test]
    fn test_place_centered_lands_on_center() {
        let png = png_bytes(100, 100);
        let center = (mm_to_emu(65.0), mm_to_emu(94.3));
        let bounds =
            ImagePlacer::place_centered(&png, center.0, center.1, TargetDim::Width(mm_to_emu(90.0)))
                .unwrap();
        let (got_x, got_y) = bounds.center();
        // Integer EMU math may be off by a single unit
        assert!((got_x - center.0).abs() <= 1);
        assert!((got_y - center.1).abs() <= 1);
    }

    proptest::proptest! {
        #[test]
        fn prop_aspect_ratio_preserved(
            w in 1u32..64,
            h in 1u32..64,
            target_mm in 5.0f64..200.0,
        ) {
            let png = png_bytes(w, h);
            let (cx, cy) =
                ImagePlacer::scaled_extent(&png, TargetDim::Width(mm_to_emu(target_mm))).unwrap();
            let native = h as f64 / w as f64;
            let rendered = cy as f64 / cx as f64;
            proptest::prop_assert!((native - rendered).abs() / native < 1e-3);
        }
    }
}
