use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::spawn_blocking;

use super::layout::{layout_plot, PlotLayout, ScenePlan, Viewport, MARKER_RADIUS};
use super::styles::{ChartStyle, ChartTheme};

pub const PRICE_CAPTION: &str = "Average Price (dollars)";
pub const SCORE_CAPTION: &str = "Average Score (0-100)";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("failed to prepare {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Plotters errors are generic over the backend; keep only the message
fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// A rendered scatter scene: RGB pixels plus the marker geometry for hovering
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSurface {
    pub title: String,
    /// Tightly packed RGB rows, `viewport.width * viewport.height * 3` bytes
    pub pixels: Vec<u8>,
    pub layout: PlotLayout,
}

impl PlotSurface {
    pub fn viewport(&self) -> Viewport {
        self.layout.viewport
    }
}

/// Draw a scene onto any plotters backend.
///
/// The chart occupies the area inside a [`super::layout::PLOT_MARGIN`] frame,
/// which is what [`layout_plot`] assumes when placing markers.
pub fn draw_plot<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plan: &ScenePlan,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), RenderError> {
    let margin = super::layout::PLOT_MARGIN;
    let (width, height) = root.dim_in_pixel();
    let bounds = plan.bounds;

    root.fill(&theme.background_color).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(root)
        .margin_top(margin)
        .margin_right(margin)
        .x_label_area_size(margin)
        .y_label_area_size(margin)
        .build_cartesian_2d(bounds.min_x..bounds.max_x, bounds.min_y..bounds.max_y)
        .map_err(draw_err)?;

    let label_font = ("sans-serif", style.font_size)
        .into_font()
        .color(&theme.text_color);

    chart
        .configure_mesh()
        .disable_mesh()
        .axis_style(theme.axis_color)
        .label_style(label_font.clone())
        .x_labels(style.axis_labels)
        .y_labels(style.axis_labels)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()
        .map_err(draw_err)?;

    let marker_style = theme.marker_color.filled();
    chart
        .draw_series(
            plan.aggregates
                .iter()
                .map(|group| group.position())
                .filter(|(price, points)| price.is_finite() && points.is_finite())
                .map(|position| Circle::new(position, MARKER_RADIUS as u32, marker_style)),
        )
        .map_err(draw_err)?;

    if let Some(annotation) = &plan.annotation {
        let stroke = ShapeStyle::from(&theme.annotation_color).stroke_width(1);
        // Leader line starts where the circle meets the diagonal
        let edge = (annotation.radius as f64 / std::f64::consts::SQRT_2) as i32;
        let (note_x, note_y) = annotation.note_offset;
        let note_font = ("sans-serif", style.font_size)
            .into_font()
            .color(&theme.annotation_color)
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart
            .draw_series(std::iter::once(
                EmptyElement::at((annotation.x, annotation.y))
                    + Circle::new((0, 0), annotation.radius, stroke)
                    + PathElement::new(vec![(edge, edge), (note_x, note_y)], stroke)
                    + Text::new(annotation.label, (note_x + 4, note_y), note_font),
            ))
            .map_err(draw_err)?;
    }

    let centered = Pos::new(HPos::Center, VPos::Center);
    let title_font = ("sans-serif", style.title_font_size)
        .into_font()
        .color(&theme.text_color)
        .pos(centered);
    root.draw(&Text::new(
        plan.title.as_str(),
        ((width / 2) as i32, 14),
        title_font,
    ))
    .map_err(draw_err)?;

    root.draw(&Text::new(
        PRICE_CAPTION,
        ((width / 2) as i32, height as i32 - 10),
        label_font.clone().pos(centered),
    ))
    .map_err(draw_err)?;

    root.draw(&Text::new(
        SCORE_CAPTION,
        (12, (height / 2) as i32),
        label_font
            .transform(FontTransform::Rotate270)
            .pos(centered),
    ))
    .map_err(draw_err)?;

    Ok(())
}

/// Render a scene into an RGB buffer on the blocking pool
pub async fn render_plot(
    plan: Arc<ScenePlan>,
    viewport: Viewport,
    theme: ChartTheme,
    style: ChartStyle,
) -> Result<PlotSurface, RenderError> {
    spawn_blocking(move || {
        let mut pixels = vec![0u8; (viewport.width * viewport.height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (viewport.width, viewport.height))
                .into_drawing_area();
            draw_plot(&root, &plan, &theme, &style)?;
            root.present().map_err(draw_err)?;
        }

        let layout = layout_plot(&plan, viewport);
        log::debug!(
            "Rendered '{}' at {}x{} with {} markers",
            plan.title,
            viewport.width,
            viewport.height,
            layout.markers.len()
        );

        Ok::<_, RenderError>(PlotSurface {
            title: plan.title.clone(),
            pixels,
            layout,
        })
    })
    .await?
}

/// File name for an exported scene, e.g. `scene-3-20240101-120000.svg`
pub fn export_file_name(scene_index: usize) -> String {
    format!(
        "scene-{}-{}.svg",
        scene_index,
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    )
}

/// Write a scene as SVG into `dir`, returning the file written
pub async fn export_svg(
    plan: Arc<ScenePlan>,
    viewport: Viewport,
    scene_index: usize,
    dir: &Path,
    theme: ChartTheme,
    style: ChartStyle,
) -> Result<PathBuf, RenderError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| RenderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    let path = dir.join(export_file_name(scene_index));

    let target = path.clone();
    spawn_blocking(move || {
        let root = SVGBackend::new(&target, (viewport.width, viewport.height)).into_drawing_area();
        draw_plot(&root, &plan, &theme, &style)?;
        root.present().map_err(draw_err)
    })
    .await??;

    log::info!("Exported scene {} to {}", scene_index, path.display());
    Ok(path)
}
