mod catalog;
mod render;
mod sequencer;

pub use catalog::{
    GroupKey, IntroScene, PlotScene, Scene, INTRO_HEADLINE, MIN_PRICE_AXIS, SCENES, SCORE_AXIS,
    SWEET_SPOT,
};
pub use render::{SceneError, SceneRenderer, SceneSurface};
pub use sequencer::{NavControls, PendingStep, Sequencer};
