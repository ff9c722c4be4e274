//! The per-product slide composer.
//!
//! One compose call: validate the batch, prepare the template once, then
//! for each product add a slide and run the placement steps in order
//! (text, main image, logo, artworks, colorways). A step whose input is
//! absent is a no-op, never an error; only batch-level preconditions fail
//! the call.

use tracing::{debug, warn};

use crate::assets::{ArtworkModeLookup, AssetKind, AssetResolver};
use crate::common::unit::{Bounds, mm_to_emu};
use crate::common::{Error, Result};
use crate::compose::anchors::{AnchorResolver, LayoutAnchors};
use crate::compose::artwork::ArtworkStacker;
use crate::compose::colorway::{ColorwayLayout, ColorwayLayoutEngine};
use crate::compose::placer::{ImagePlacer, TargetDim};
use crate::compose::product::{ProductRecord, parse_hex_color};
use crate::compose::spec::{SheetSpec, TextSpec};
use crate::pptx::format::ImageFormat;
use crate::pptx::layout::select_layout;
use crate::pptx::package::TemplatePackage;
use crate::pptx::slide::{Align, SlideBuilder, TextStyle};

/// MIME type of the produced document, for the serving layer.
pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Composes one slide per product record against a template.
pub struct SlideComposer {
    spec: SheetSpec,
}

impl SlideComposer {
    pub fn new(spec: SheetSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &SheetSpec {
        &self.spec
    }

    /// Compose `products` into `template` and serialize the result.
    ///
    /// The call is atomic: either every product yields a slide and the
    /// whole document is returned, or a batch-level error is raised before
    /// any output exists. Missing assets and undecodable images degrade
    /// only the affected slide element.
    pub fn compose(
        &self,
        template: &[u8],
        products: &[ProductRecord],
        assets: &dyn AssetResolver,
        modes: &dyn ArtworkModeLookup,
    ) -> Result<Vec<u8>> {
        // Validate before composing: a bad record fails the batch while the
        // output still has zero new slides
        for (index, product) in products.iter().enumerate() {
            if product.code.trim().is_empty() {
                return Err(Error::MissingCode { index });
            }
        }

        let mut package = TemplatePackage::from_bytes(template)?;

        let markers: Vec<&str> = self
            .spec
            .watermark_markers
            .iter()
            .map(|s| s.as_str())
            .collect();
        package.strip_vendor_watermarks(&markers)?;
        package.ensure_slide_number()?;

        let layout_index = select_layout(package.layouts())
            .ok_or_else(|| Error::Template("template has no slide layouts".to_string()))?;
        let anchors = AnchorResolver::new().resolve(&mut package.layouts_mut()[layout_index]);
        debug!(
            ?anchors,
            layout_index,
            existing_slides = package.existing_slide_count(),
            products = products.len(),
            "template prepared"
        );

        for product in products {
            let slide = package.add_slide(layout_index);
            self.compose_slide(slide, product, &anchors, assets, modes);
        }

        package.save()
    }

    /// Run the ordered placement steps for one product.
    fn compose_slide(
        &self,
        slide: &mut SlideBuilder,
        product: &ProductRecord,
        anchors: &LayoutAnchors,
        assets: &dyn AssetResolver,
        modes: &dyn ArtworkModeLookup,
    ) {
        let spec = &self.spec;
        debug!(code = %product.code, "composing slide");

        // Season label, with per-product color override
        if let Some(season) = product.season_label.as_deref()
            && !season.trim().is_empty()
        {
            let color = product.season_color.as_deref().and_then(parse_hex_color);
            self.add_spec_text(slide, season, &spec.season, color.as_deref());
        }

        // Category and code are unconditional; the code was validated
        // upstream
        self.add_spec_text(slide, &product.category_name, &spec.category, None);
        self.add_spec_text(slide, &product.code, &spec.code, None);

        // RRP at the resolved anchor, or the fixed fallback
        if let Some(rrp) = product.rrp.as_deref()
            && !rrp.trim().is_empty()
        {
            let (left, top) = match anchors.rrp_label {
                Some(anchor) => (anchor.x, anchor.y),
                None => (
                    mm_to_emu(spec.rrp_fallback_left_mm),
                    mm_to_emu(spec.rrp_fallback_top_mm),
                ),
            };
            slide.add_text_box(
                &format!("RRP : {rrp}"),
                Bounds {
                    x: left,
                    y: top,
                    cx: mm_to_emu(spec.rrp_width_mm),
                    cy: mm_to_emu(spec.rrp_height_mm),
                },
                TextStyle::plain(Align::Right),
            );
        }

        // Main image, centered at a fixed point with fixed width
        if let Some(data) = &product.main_image {
            self.add_centered_picture(
                slide,
                data,
                mm_to_emu(spec.main_image_center_x_mm),
                mm_to_emu(spec.main_image_center_y_mm),
                TargetDim::Width(mm_to_emu(spec.main_image_width_mm)),
                "main image",
            );
        }

        // Logo, only when the key is not the sentinel and resolves
        if let Some(logo_name) = product.logo_key() {
            match assets.resolve(AssetKind::Logo, logo_name) {
                Some(data) => {
                    self.add_centered_picture(
                        slide,
                        &data,
                        mm_to_emu(spec.logo_center_x_mm),
                        mm_to_emu(spec.logo_center_y_mm),
                        TargetDim::Height(mm_to_emu(spec.logo_height_mm)),
                        logo_name,
                    );
                }
                None => warn!(logo = logo_name, "logo not found, skipping"),
            }
        }

        // Artwork stack
        if !product.artworks.is_empty() {
            ArtworkStacker::new(spec).stack(slide, &product.artworks, assets, modes);
        }

        // Colorway row or grid
        if !product.colorways.is_empty() {
            self.add_colorways(slide, product);
        }
    }

    fn add_colorways(&self, slide: &mut SlideBuilder, product: &ProductRecord) {
        let colorway_spec = &self.spec.colorway;
        let engine = ColorwayLayoutEngine::new(colorway_spec);
        let (arrangement, placements) = engine.layout(&product.colorways);

        let label_style = match arrangement {
            ColorwayLayout::SingleRow { .. } => TextStyle {
                font: Some(colorway_spec.row_label_font.clone()),
                size_pt: Some(colorway_spec.row_label_size_pt),
                bold: false,
                color_hex: Some("000000".to_string()),
                align: Align::Left,
                tight_frame: true,
            },
            ColorwayLayout::Grid { .. } => TextStyle {
                size_pt: Some(colorway_spec.grid_label_size_pt),
                align: Align::Center,
                ..TextStyle::default()
            },
        };

        for (item, placement) in product.colorways.iter().zip(&placements) {
            if let Some(data) = &item.image {
                match ImageFormat::detect_from_bytes(data).and_then(|format| {
                    ImagePlacer::place_at(
                        data,
                        placement.image_left,
                        placement.image_top,
                        TargetDim::Width(placement.image_width),
                    )
                    .map(|bounds| (format, bounds))
                }) {
                    Some((format, bounds)) => {
                        slide.add_picture(data.to_vec(), format, bounds, &item.name);
                    }
                    None => {
                        warn!(colorway = %item.name, "swatch not decodable, skipping image")
                    }
                }
            }
            slide.add_text_box(&placement.label_text, placement.label_box, label_style.clone());
        }
    }

    fn add_spec_text(
        &self,
        slide: &mut SlideBuilder,
        text: &str,
        spec: &TextSpec,
        color_override: Option<&str>,
    ) {
        let color = color_override.unwrap_or(&spec.color_hex);
        slide.add_text_box(
            text,
            Bounds::from_mm(spec.left_mm, spec.top_mm, spec.width_mm, spec.height_mm),
            TextStyle::spec(&spec.font_name, spec.font_size_pt, spec.bold, color),
        );
    }

    fn add_centered_picture(
        &self,
        slide: &mut SlideBuilder,
        data: &[u8],
        center_x: i64,
        center_y: i64,
        target: TargetDim,
        description: &str,
    ) {
        match ImageFormat::detect_from_bytes(data).and_then(|format| {
            ImagePlacer::place_centered(data, center_x, center_y, target)
                .map(|bounds| (format, bounds))
        }) {
            Some((format, bounds)) => {
                slide.add_picture(data.to_vec(), format, bounds, description);
            }
            None => warn!(description, "image not decodable, skipping"),
        }
    }
}

impl Default for SlideComposer {
    fn default() -> Self {
        Self::new(SheetSpec::default())
    }
}
