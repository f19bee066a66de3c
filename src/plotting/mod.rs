mod chart;
pub mod layout;
mod styles;

#[cfg(test)]
mod tests;

pub use chart::{
    draw_plot, export_file_name, export_svg, render_plot, PlotSurface, RenderError,
    PRICE_CAPTION, SCORE_CAPTION,
};
pub use layout::{
    hit_test, layout_plot, Annotation, AxisBounds, Marker, PlotLayout, ScenePlan, Viewport,
};
pub use styles::{ChartStyle, ChartTheme};
