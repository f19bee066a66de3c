//! Pure geometry for scatter scenes.
//!
//! Everything here is deterministic: the same plan and viewport always give
//! the same pixel coordinates. The bitmap drawn by [`super::chart`] uses the
//! same margins, so hover hit-testing can run on these numbers alone.

use crate::types::{GroupAggregate, TooltipData};

/// Blank space around the plotting area on every side, in pixels
pub const PLOT_MARGIN: u32 = 50;
/// Radius of a group marker, in pixels
pub const MARKER_RADIUS: f64 = 3.0;
/// Extra pixels around a marker that still count as hovering it
pub const HOVER_TOLERANCE: f64 = 2.0;

/// Smallest surface we lay out; below this the plotting area would vanish
const MIN_SIDE: u32 = 2 * PLOT_MARGIN + 50;

/// Pixel size of the render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(MIN_SIDE),
            height: height.max(MIN_SIDE),
        }
    }

    /// Width of the plotting area between the margins
    pub fn plot_width(&self) -> f64 {
        (self.width - 2 * PLOT_MARGIN) as f64
    }

    /// Height of the plotting area between the margins
    pub fn plot_height(&self) -> f64 {
        (self.height - 2 * PLOT_MARGIN) as f64
    }
}

/// Data-space extent of both axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl AxisBounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Price axis from `min_x` to the largest average price; fixed score axis.
    ///
    /// An empty or all-`NaN` scene, or one whose top price does not exceed
    /// `min_x`, gets a unit-wide price axis instead of a degenerate one.
    pub fn for_aggregates(
        aggregates: &[GroupAggregate],
        min_x: f64,
        score_range: (f64, f64),
    ) -> Self {
        let max_x = aggregates
            .iter()
            .map(|group| group.position().0)
            .filter(|price| price.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        let max_x = if max_x.is_finite() && max_x > min_x {
            max_x
        } else {
            min_x + 1.0
        };
        Self::new(min_x, score_range.0, max_x, score_range.1)
    }
}

/// Maps a data interval onto a pixel interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// A fixed callout drawn on top of a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation {
    pub label: &'static str,
    /// Data-space centre (price)
    pub x: f64,
    /// Data-space centre (score)
    pub y: f64,
    /// Circle radius in pixels
    pub radius: u32,
    /// Pixel offset from the centre to the note text
    pub note_offset: (i32, i32),
}

/// Everything the renderer needs to draw one scatter scene
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePlan {
    pub title: String,
    pub aggregates: Vec<GroupAggregate>,
    pub bounds: AxisBounds,
    pub annotation: Option<Annotation>,
}

/// A hoverable marker in surface pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub tooltip: TooltipData,
}

/// Pixel placement of an annotation callout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationLayout {
    pub label: &'static str,
    pub center: (f64, f64),
    pub radius: f64,
    pub note: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotLayout {
    pub viewport: Viewport,
    pub markers: Vec<Marker>,
    pub annotation: Option<AnnotationLayout>,
}

/// Horizontal scale from price to surface pixels
pub fn x_scale(bounds: &AxisBounds, viewport: Viewport) -> LinearScale {
    let left = PLOT_MARGIN as f64;
    LinearScale::new(
        (bounds.min_x, bounds.max_x),
        (left, left + viewport.plot_width()),
    )
}

/// Vertical scale from score to surface pixels, higher scores nearer the top
pub fn y_scale(bounds: &AxisBounds, viewport: Viewport) -> LinearScale {
    let top = PLOT_MARGIN as f64;
    LinearScale::new(
        (bounds.min_y, bounds.max_y),
        (top + viewport.plot_height(), top),
    )
}

/// Place every aggregate on the surface.
///
/// Groups whose averages are not finite have no position and get no marker.
pub fn layout_plot(plan: &ScenePlan, viewport: Viewport) -> PlotLayout {
    let xs = x_scale(&plan.bounds, viewport);
    let ys = y_scale(&plan.bounds, viewport);

    let markers: Vec<Marker> = plan
        .aggregates
        .iter()
        .filter_map(|group| {
            let (price, points) = group.position();
            if !(price.is_finite() && points.is_finite()) {
                log::debug!("Skipping group {:?} without a finite position", group.key);
                return None;
            }
            Some(Marker {
                x: xs.apply(price),
                y: ys.apply(points),
                tooltip: group.tooltip.clone(),
            })
        })
        .collect();

    let annotation = plan.annotation.map(|a| {
        let center = (xs.apply(a.x), ys.apply(a.y));
        AnnotationLayout {
            label: a.label,
            center,
            radius: a.radius as f64,
            note: (
                center.0 + a.note_offset.0 as f64,
                center.1 + a.note_offset.1 as f64,
            ),
        }
    });

    PlotLayout {
        viewport,
        markers,
        annotation,
    }
}

/// The marker under `pointer`, nearest first.
pub fn hit_test(markers: &[Marker], pointer: (f64, f64)) -> Option<&Marker> {
    let reach = MARKER_RADIUS + HOVER_TOLERANCE;
    markers
        .iter()
        .map(|marker| {
            let dx = marker.x - pointer.0;
            let dy = marker.y - pointer.1;
            (marker, (dx * dx + dy * dy).sqrt())
        })
        .filter(|(_, distance)| *distance <= reach)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(marker, _)| marker)
}
