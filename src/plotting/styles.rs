use plotters::style::RGBAColor;

/// Chart theme configuration
#[derive(Debug, Clone, Copy)]
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub axis_color: RGBAColor,
    pub marker_color: RGBAColor,
    pub annotation_color: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(255, 255, 255, 1.0),
            text_color: RGBAColor(0, 0, 0, 1.0),
            axis_color: RGBAColor(0, 0, 0, 1.0),
            marker_color: RGBAColor(0x00, 0x20, 0xb0, 1.0),
            annotation_color: RGBAColor(0x9c, 0x27, 0x2f, 1.0),
        }
    }
}

/// Chart style configuration
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    pub font_size: u32,
    pub title_font_size: u32,
    pub axis_labels: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_size: 15,
            title_font_size: 19,
            axis_labels: 10,
        }
    }
}
