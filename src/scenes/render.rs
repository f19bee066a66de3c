use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex as TokioMutex;

use super::catalog::{IntroScene, Scene, SCENES};
use crate::data::{DataError, DatasetCache};
use crate::plotting::{
    export_svg, render_plot, ChartStyle, ChartTheme, PlotSurface, RenderError, ScenePlan, Viewport,
};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("there is no scene {0}")]
    UnknownScene(usize),
    #[error("scene {0} has no chart to export")]
    NotExportable(usize),
}

/// What a scene puts on screen
#[derive(Debug, Clone, PartialEq)]
pub enum SceneSurface {
    Intro(IntroScene),
    Plot(PlotSurface),
}

#[derive(Hash, Eq, PartialEq)]
struct SurfaceCacheKey {
    scene: usize,
    viewport: Viewport,
}

/// Renders scenes against the shared dataset.
///
/// Finished surfaces are kept in a small LRU keyed by scene and viewport;
/// scenes are pure functions of the dataset, so a hit is identical to a re-render.
pub struct SceneRenderer {
    dataset: Arc<DatasetCache>,
    surfaces: TokioMutex<LruCache<SurfaceCacheKey, Arc<SceneSurface>>>,
    theme: ChartTheme,
    style: ChartStyle,
}

impl SceneRenderer {
    pub fn new(dataset: Arc<DatasetCache>, cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            dataset,
            surfaces: TokioMutex::new(LruCache::new(capacity)),
            theme: ChartTheme::default(),
            style: ChartStyle::default(),
        }
    }

    pub fn dataset(&self) -> &DatasetCache {
        &self.dataset
    }

    pub fn scene_count(&self) -> usize {
        SCENES.len()
    }

    /// Filter and aggregate the dataset for a data scene
    pub async fn plan(&self, index: usize) -> Result<Option<ScenePlan>, SceneError> {
        match SCENES.get(index) {
            Some(Scene::Plot(scene)) => {
                let reviews = self.dataset.get_or_fetch().await?;
                Ok(Some(scene.plan(&reviews)))
            }
            _ => Ok(None),
        }
    }

    /// Produce the surface for scene `index` at `viewport`
    pub async fn render(
        &self,
        index: usize,
        viewport: Viewport,
    ) -> Result<Arc<SceneSurface>, SceneError> {
        let key = SurfaceCacheKey {
            scene: index,
            viewport,
        };
        if let Some(surface) = self.surfaces.lock().await.get(&key) {
            log::debug!("Reusing cached surface for scene {}", index);
            return Ok(Arc::clone(surface));
        }

        let surface = match SCENES.get(index) {
            Some(Scene::Plot(scene)) => {
                let reviews = self.dataset.get_or_fetch().await?;
                let plan = Arc::new(scene.plan(&reviews));
                SceneSurface::Plot(render_plot(plan, viewport, self.theme, self.style).await?)
            }
            Some(Scene::Intro(intro)) => SceneSurface::Intro(*intro),
            None => return Err(SceneError::UnknownScene(index)),
        };

        let surface = Arc::new(surface);
        self.surfaces.lock().await.put(key, Arc::clone(&surface));
        Ok(surface)
    }

    /// Write scene `index` as SVG into `dir`
    pub async fn export(
        &self,
        index: usize,
        viewport: Viewport,
        dir: &Path,
    ) -> Result<PathBuf, SceneError> {
        let plan = self
            .plan(index)
            .await?
            .ok_or(SceneError::NotExportable(index))?;
        let path = export_svg(Arc::new(plan), viewport, index, dir, self.theme, self.style).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Review;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup_renderer() -> SceneRenderer {
        let reviews = vec![
            Review {
                points: Some(json!(90)),
                price: Some(json!(10)),
                country: Some("A".to_string()),
                ..Review::default()
            },
            Review {
                points: Some(json!(92)),
                price: Some(json!(30)),
                country: Some("A".to_string()),
                ..Review::default()
            },
            Review {
                points: Some(json!(80)),
                price: Some(json!(5)),
                country: Some("B".to_string()),
                ..Review::default()
            },
        ];
        SceneRenderer::new(Arc::new(DatasetCache::preloaded(reviews)), 4)
    }

    #[tokio::test]
    async fn test_intro_needs_no_data() {
        let renderer = SceneRenderer::new(Arc::new(DatasetCache::new("/nonexistent.json")), 4);

        let surface = renderer.render(0, Viewport::new(800, 600)).await.unwrap();

        assert!(matches!(*surface, SceneSurface::Intro(_)));
        assert!(!renderer.dataset().is_loaded());
    }

    #[tokio::test]
    async fn test_surfaces_are_cached_per_viewport() {
        let renderer = setup_renderer();

        let first = renderer.render(0, Viewport::new(800, 600)).await.unwrap();
        let again = renderer.render(0, Viewport::new(800, 600)).await.unwrap();
        let resized = renderer.render(0, Viewport::new(900, 600)).await.unwrap();

        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &resized));
        assert_eq!(*first, *resized);
    }

    #[tokio::test]
    async fn test_plan_for_data_scene() {
        let renderer = setup_renderer();

        let plan = renderer.plan(1).await.unwrap().unwrap();

        assert_eq!(plan.aggregates.len(), 2);
        assert_eq!(plan.aggregates[0].average_points, "91.00");
        assert!(renderer.plan(0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_scene() {
        let renderer = setup_renderer();
        let err = renderer.render(6, Viewport::new(800, 600)).await.unwrap_err();
        assert!(matches!(err, SceneError::UnknownScene(6)));
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_typed_error() {
        let renderer = SceneRenderer::new(Arc::new(DatasetCache::new("/nonexistent.json")), 4);

        let err = renderer.render(1, Viewport::new(800, 600)).await.unwrap_err();

        assert!(matches!(err, SceneError::Data(DataError::Io { .. })));
    }

    #[tokio::test]
    async fn test_intro_is_not_exportable() {
        let renderer = setup_renderer();
        let dir = TempDir::new().unwrap();

        let err = renderer
            .export(0, Viewport::new(800, 600), dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, SceneError::NotExportable(0)));
    }
}
