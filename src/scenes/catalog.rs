//! The fixed narrative: six scenes, declared as data.

use crate::plotting::{Annotation, AxisBounds, ScenePlan};
use crate::types::{Review, ScoredReview, TooltipData};
use crate::utils::aggregate;

/// Left edge of the price axis in every data scene
pub const MIN_PRICE_AXIS: f64 = 1.0;
/// Score axis shared by every data scene
pub const SCORE_AXIS: (f64, f64) = (78.0, 100.0);

pub const INTRO_HEADLINE: &str = "Is it really worth splurging on that bottle of wine?";

/// A categorical review field used for grouping and tooltips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Country,
    Province,
    Region,
    Winery,
}

impl GroupKey {
    pub fn field(self, review: &Review) -> &Option<String> {
        match self {
            GroupKey::Country => &review.country,
            GroupKey::Province => &review.province,
            GroupKey::Region => &review.region_1,
            GroupKey::Winery => &review.winery,
        }
    }

    /// Tooltip label for this field
    pub fn label(self) -> &'static str {
        match self {
            GroupKey::Country => "Country",
            GroupKey::Province => "Province",
            GroupKey::Region => "Region",
            GroupKey::Winery => "Winery",
        }
    }
}

/// A scatter scene: which reviews to keep, how to group them, what to say
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScene {
    pub title: &'static str,
    pub group_by: GroupKey,
    pub tooltip_fields: &'static [GroupKey],
    /// Inclusive upper bound on bottle price
    pub max_price: Option<f64>,
    pub annotation: Option<Annotation>,
}

impl PlotScene {
    /// Whether a parsed review takes part in this scene.
    ///
    /// Price must be positive (and within the cap); a zero score counts as missing.
    pub fn accepts(&self, entry: &ScoredReview<'_>) -> bool {
        let priced = entry.price > 0.0 && self.max_price.map_or(true, |cap| entry.price <= cap);
        let scored = entry.points != 0.0 && !entry.points.is_nan();
        priced && scored
    }

    pub fn select<'a>(&self, reviews: &'a [Review]) -> Vec<ScoredReview<'a>> {
        reviews
            .iter()
            .filter_map(|review| review.scored().ok())
            .filter(|entry| self.accepts(entry))
            .collect()
    }

    pub fn tooltip(&self, review: &Review) -> TooltipData {
        self.tooltip_fields
            .iter()
            .fold(TooltipData::new(), |tooltip, field| {
                tooltip.with(field.label(), Review::label(field.field(review)))
            })
    }

    /// Filter, group and bound the dataset for drawing
    pub fn plan(&self, reviews: &[Review]) -> ScenePlan {
        let entries = self.select(reviews);
        let group_by = self.group_by;
        let aggregates = aggregate(
            &entries,
            |review| group_by.field(review).clone(),
            |review| self.tooltip(review),
        );
        if aggregates.is_empty() {
            log::warn!("Scene '{}' has no reviews to show", self.title);
        }
        let bounds = AxisBounds::for_aggregates(&aggregates, MIN_PRICE_AXIS, SCORE_AXIS);

        ScenePlan {
            title: self.title.to_string(),
            aggregates,
            bounds,
            annotation: self.annotation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroScene {
    pub headline: &'static str,
    /// Display height of the intro image, in points
    pub image_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scene {
    Intro(IntroScene),
    Plot(PlotScene),
}

impl Scene {
    pub fn title(&self) -> &'static str {
        match self {
            Scene::Intro(intro) => intro.headline,
            Scene::Plot(plot) => plot.title,
        }
    }

    pub fn needs_data(&self) -> bool {
        matches!(self, Scene::Plot(_))
    }
}

pub const SWEET_SPOT: Annotation = Annotation {
    label: "Sweet Spot",
    x: 65.0,
    y: 90.0,
    radius: 90,
    note_offset: (150, 150),
};

const PRICE_CAP: f64 = 200.0;

const COUNTRY: &[GroupKey] = &[GroupKey::Country];
const PROVINCE: &[GroupKey] = &[GroupKey::Country, GroupKey::Province];
const REGION: &[GroupKey] = &[GroupKey::Country, GroupKey::Province, GroupKey::Region];
const WINERY: &[GroupKey] = &[
    GroupKey::Country,
    GroupKey::Province,
    GroupKey::Region,
    GroupKey::Winery,
];

/// The narrative, in viewing order
pub static SCENES: [Scene; 6] = [
    Scene::Intro(IntroScene {
        headline: INTRO_HEADLINE,
        image_height: 150.0,
    }),
    Scene::Plot(PlotScene {
        title: "Wine Scores grouped by Countries",
        group_by: GroupKey::Country,
        tooltip_fields: COUNTRY,
        max_price: None,
        annotation: None,
    }),
    Scene::Plot(PlotScene {
        title: "Wine Scores grouped by Province",
        group_by: GroupKey::Province,
        tooltip_fields: PROVINCE,
        max_price: None,
        annotation: None,
    }),
    Scene::Plot(PlotScene {
        title: "Wine Scores grouped by Regions",
        group_by: GroupKey::Region,
        tooltip_fields: REGION,
        max_price: None,
        annotation: None,
    }),
    Scene::Plot(PlotScene {
        title: "Wine Scores grouped by Regions < $200",
        group_by: GroupKey::Region,
        tooltip_fields: REGION,
        max_price: Some(PRICE_CAP),
        annotation: None,
    }),
    Scene::Plot(PlotScene {
        title: "Wine Scores grouped by Wineries < $200",
        group_by: GroupKey::Winery,
        tooltip_fields: WINERY,
        max_price: Some(PRICE_CAP),
        annotation: Some(SWEET_SPOT),
    }),
];
