use eframe::App as EApp;
use egui::TextureHandle;
use std::sync::{Arc, Mutex};

use crate::config::NarrativeConfig;
use crate::data::DatasetCache;
use crate::plotting::Viewport;
use crate::scenes::{PendingStep, SceneError, SceneRenderer, SceneSurface, Sequencer, SCENES};

/// Main application state
pub struct App {
    pub config: NarrativeConfig,
    pub renderer: Arc<SceneRenderer>,
    pub sequencer: Sequencer,
    /// What is currently on screen; `None` while the surface is cleared
    pub surface: Option<Arc<SceneSurface>>,
    pub surface_texture: Option<TextureHandle>,
    pub intro_texture: Option<TextureHandle>,
    pub intro_image_attempted: bool,
    /// Size the current surface was rendered for
    pub viewport: Option<Viewport>,
    pub is_rendering: bool,
    pub is_exporting: bool,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: NarrativeConfig) -> Self {
        let dataset = Arc::new(DatasetCache::new(config.dataset_path.clone()));
        let renderer = Arc::new(SceneRenderer::new(dataset, config.render_cache_size));
        Self {
            config,
            sequencer: Sequencer::new(renderer.scene_count()),
            renderer,
            surface: None,
            surface_texture: None,
            intro_texture: None,
            intro_image_attempted: false,
            viewport: None,
            is_rendering: false,
            is_exporting: false,
            error_message: None,
            status_message: None,
        }
    }

    /// Start navigating to `target`.
    ///
    /// Out-of-range targets, and any request while another step is still
    /// rendering, are ignored. Otherwise the surface is cleared.
    pub fn begin_step(&mut self, target: isize) -> Option<PendingStep> {
        if self.is_rendering {
            log::debug!("Step {} requested while rendering, ignoring", target);
            return None;
        }
        let step = self.sequencer.begin(target)?;
        self.surface = None;
        self.surface_texture = None;
        self.error_message = None;
        self.is_rendering = true;
        Some(step)
    }

    /// Apply the outcome of a step started with [`App::begin_step`]
    pub fn finish_step(
        &mut self,
        step: PendingStep,
        result: Result<Arc<SceneSurface>, SceneError>,
    ) {
        self.is_rendering = false;
        match result {
            Ok(surface) => {
                self.surface = Some(surface);
                self.sequencer.commit(step);
            }
            Err(e) => {
                log::error!("Failed to render step {}: {}", step.index() + 1, e);
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Whether the surface has to be redrawn for `viewport`
    pub fn needs_render(&self, viewport: Viewport) -> bool {
        !self.is_rendering && self.viewport != Some(viewport)
    }

    /// Step to render when the viewport changes: the first step on startup,
    /// otherwise whatever is showing now
    pub fn resize_target(&self) -> isize {
        if self.viewport.is_none() {
            0
        } else {
            self.sequencer.cursor() as isize
        }
    }

    pub fn current_title(&self) -> &'static str {
        SCENES[self.sequencer.cursor()].title()
    }

    pub fn can_export(&self) -> bool {
        !self.is_rendering
            && !self.is_exporting
            && matches!(self.surface.as_deref(), Some(SceneSurface::Plot(_)))
    }

    pub fn format_progress(&self) -> String {
        format!(
            "Step {} of {}",
            self.sequencer.cursor() + 1,
            self.sequencer.len()
        )
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(NarrativeConfig::default())
    }
}

/// Thread-safe wrapper around App for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut app) = self.app.lock() {
            super::ui::draw_ui(&mut app, ctx, Arc::clone(&self.app));
        } else {
            log::error!("Failed to acquire app lock in update");
        }
    }
}
