//! The sheet specification: every fixed coordinate the composer places
//! against, as one immutable configuration value.
//!
//! `SheetSpec::default()` carries the brand template's measurements. A
//! different template is supported by constructing an alternate spec, not
//! by editing code.

/// Position, size and type styling for one named text field.
#[derive(Debug, Clone)]
pub struct TextSpec {
    pub left_mm: f64,
    pub top_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub font_name: String,
    pub font_size_pt: f64,
    pub bold: bool,
    /// Six hex digits, no '#'
    pub color_hex: String,
}

impl TextSpec {
    fn new(
        left_mm: f64,
        top_mm: f64,
        width_mm: f64,
        height_mm: f64,
        font_name: &str,
        font_size_pt: f64,
        bold: bool,
        color_hex: &str,
    ) -> Self {
        Self {
            left_mm,
            top_mm,
            width_mm,
            height_mm,
            font_name: font_name.to_string(),
            font_size_pt,
            bold,
            color_hex: color_hex.to_string(),
        }
    }
}

/// Fixed coordinates of one single-row colorway arrangement.
///
/// The two-item and three-item rows carry their own constant sets. The
/// values currently coincide, but the template defines them independently
/// and they are kept apart on purpose.
#[derive(Debug, Clone)]
pub struct SingleRowSpec {
    pub start_left_mm: f64,
    pub label_top_mm: f64,
    pub gap_mm: f64,
}

/// Fixed coordinates and gaps of the colorway area.
#[derive(Debug, Clone)]
pub struct ColorwaySpec {
    /// Swatch image width; height follows the image aspect
    pub image_width_mm: f64,
    /// Baseline: the y of single rows and of the grid's last row
    pub image_top_mm: f64,
    pub two_items: SingleRowSpec,
    pub three_items: SingleRowSpec,
    /// Label box under a single-row swatch
    pub row_label_width_mm: f64,
    pub row_label_height_mm: f64,
    pub row_label_font: String,
    pub row_label_size_pt: f64,
    /// Grid geometry for 0, 1 or 4+ items
    pub grid_start_left_mm: f64,
    pub grid_per_row: usize,
    pub grid_col_gap_mm: f64,
    pub grid_row_gap_mm: f64,
    /// Nominal swatch height used for row pitch
    pub grid_image_height_mm: f64,
    /// Extra row pitch reserved for the label line
    pub grid_label_allowance_mm: f64,
    /// Gap between a grid swatch and its label
    pub grid_label_offset_mm: f64,
    pub grid_label_height_mm: f64,
    pub grid_label_size_pt: f64,
}

/// The complete sheet layout configuration.
#[derive(Debug, Clone)]
pub struct SheetSpec {
    pub season: TextSpec,
    pub category: TextSpec,
    pub code: TextSpec,

    /// RRP box placement when the layout carries no RRP label anchor
    pub rrp_fallback_left_mm: f64,
    pub rrp_fallback_top_mm: f64,
    pub rrp_width_mm: f64,
    pub rrp_height_mm: f64,

    pub main_image_center_x_mm: f64,
    pub main_image_center_y_mm: f64,
    pub main_image_width_mm: f64,

    pub logo_center_x_mm: f64,
    pub logo_center_y_mm: f64,
    pub logo_height_mm: f64,

    pub artwork_center_x_mm: f64,
    pub artwork_start_top_mm: f64,
    /// `Horizontal` display mode width
    pub artwork_default_width_mm: f64,
    /// `Default` (portrait) display mode height
    pub artwork_portrait_height_mm: f64,
    /// `Small` display mode width
    pub artwork_small_width_mm: f64,
    pub artwork_vertical_gap_mm: f64,

    pub colorway: ColorwaySpec,

    /// Uppercased substrings that flag template shapes as vendor
    /// watermarks to be cleared
    pub watermark_markers: Vec<String>,
}

impl Default for SheetSpec {
    fn default() -> Self {
        Self {
            season: TextSpec::new(
                22.5,
                12.5,
                83.33,
                9.49,
                "Averta PE Extrabold",
                12.0,
                true,
                "000000",
            ),
            category: TextSpec::new(
                9.5,
                24.1,
                117.05,
                13.85,
                "Averta PE Extrabold",
                24.0,
                true,
                "987147",
            ),
            code: TextSpec::new(
                9.5,
                32.5,
                117.05,
                13.85,
                "Averta PE Extrabold",
                24.0,
                true,
                "000000",
            ),

            rrp_fallback_left_mm: 250.0,
            rrp_fallback_top_mm: 15.0,
            rrp_width_mm: 50.0,
            rrp_height_mm: 15.0,

            main_image_center_x_mm: 65.0,
            main_image_center_y_mm: 94.3,
            main_image_width_mm: 90.0,

            logo_center_x_mm: 148.4,
            logo_center_y_mm: 53.9,
            logo_height_mm: 23.7,

            artwork_center_x_mm: 148.4,
            artwork_start_top_mm: 77.2,
            artwork_default_width_mm: 30.0,
            artwork_portrait_height_mm: 20.0,
            artwork_small_width_mm: 12.0,
            artwork_vertical_gap_mm: 5.0,

            colorway: ColorwaySpec {
                image_width_mm: 27.0,
                image_top_mm: 120.0,
                two_items: SingleRowSpec {
                    start_left_mm: 169.9,
                    label_top_mm: 114.8,
                    gap_mm: 28.0,
                },
                three_items: SingleRowSpec {
                    start_left_mm: 169.9,
                    label_top_mm: 114.8,
                    gap_mm: 28.0,
                },
                row_label_width_mm: 32.0,
                row_label_height_mm: 5.0,
                row_label_font: "Averta Light".to_string(),
                row_label_size_pt: 10.0,
                grid_start_left_mm: 180.0,
                grid_per_row: 3,
                grid_col_gap_mm: 5.0,
                grid_row_gap_mm: 8.0,
                grid_image_height_mm: 30.0,
                grid_label_allowance_mm: 10.0,
                grid_label_offset_mm: 2.0,
                grid_label_height_mm: 10.0,
                grid_label_size_pt: 9.0,
            },

            watermark_markers: vec![
                "VORLAGENBAUER".to_string(),
                "ERSTELLT DURCH".to_string(),
            ],
        }
    }
}
