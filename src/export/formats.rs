use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder};

/// Fill of every data value; reviewers recolor mismatches by hand.
pub const DATA_FILL: u32 = 0xC6EFCE;
pub const HEADER_FILL: u32 = 0xD9D9D9;

pub const IDENTIFIER_COLUMN_WIDTH: f64 = 50.0;
pub const PERIOD_COLUMN_WIDTH: f64 = 16.0;

/// Cell formats shared by every view worksheet.
pub struct ViewFormats {
    pub identifier_header: Format,
    pub period_header: Format,
    pub data: Format,
    pub plain: Format,
}

impl ViewFormats {
    pub fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_border(FormatBorder::Thin);

        Self {
            identifier_header: header.clone(),
            period_header: header.set_align(FormatAlign::Center),
            data: Format::new()
                .set_background_color(Color::RGB(DATA_FILL))
                .set_align(FormatAlign::Center)
                .set_border(FormatBorder::Thin),
            plain: Format::new().set_border(FormatBorder::Thin),
        }
    }

    /// Bold white title on the view color.
    pub fn title(color: u32) -> Format {
        Format::new()
            .set_bold()
            .set_font_size(11)
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(color))
    }
}

impl Default for ViewFormats {
    fn default() -> Self {
        Self::new()
    }
}
