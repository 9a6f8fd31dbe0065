//! Asynchronous model loading.
//!
//! Fetching and parsing run on a worker thread. The finished [`LoadedModel`] is handed back over a
//! channel and only touches the [`Scene`] when the render loop calls [`PendingLoad::poll`], so the
//! scene is never mutated off the main thread.

use crate::assets::{AssetSource, LoadedModel, Material, SceneLoader};
use crate::core::{NodeId, Scene};
use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};
use snafu::Snafu;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum LoadError {
    #[snafu(display("Failed to fetch {}: {source}", path.display()))]
    Fetch {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Asset source unavailable: {reason}"))]
    Unavailable { reason: String },

    #[snafu(display("Failed to parse glTF: {source}"))]
    Parse { source: gltf::Error },

    #[snafu(display("glTF contains no scenes"))]
    NoScene,

    #[snafu(display("Couldn't start the loader thread: {source}"))]
    Spawn { source: std::io::Error },

    #[snafu(display("Loader thread exited without a result"))]
    WorkerGone,
}

type LoadResult = Result<LoadedModel, LoadError>;

/// Describes one model load. Call [`ModelLoader::spawn`] to start it.
#[derive(Debug)]
pub struct ModelLoader<S: AssetSource> {
    source: S,
    material_override: Option<Material>,
}

impl<S: AssetSource> ModelLoader<S> {
    pub fn new(source: S) -> Self {
        ModelLoader {
            source,
            material_override: None,
        }
    }

    /// Every mesh of the loaded model gets this material, whatever the asset specified.
    pub fn override_material(mut self, material: Material) -> Self {
        self.material_override = Some(material);
        self
    }

    pub fn spawn(self) -> PendingLoad {
        let (tx, rx) = bounded(1);
        let name = self.source.describe();
        let source = self.source;

        info!("Loading model {name:?}");

        let worker_tx: Sender<LoadResult> = tx.clone();
        let spawned = std::thread::Builder::new()
            .name("model-loader".to_string())
            .spawn(move || {
                let base = source.base_dir();
                let result = source.fetch().and_then(|bytes| {
                    SceneLoader::parse(&source.describe(), &bytes, base.as_deref())
                });
                // the pending load might have been dropped already
                let _ = worker_tx.send(result);
            });

        if let Err(source) = spawned {
            let _ = tx.send(Err(LoadError::Spawn { source }));
        }

        PendingLoad {
            name,
            rx: Some(rx),
            material_override: self.material_override,
        }
    }
}

/// A model load that hasn't been applied to the scene yet.
#[derive(Debug)]
pub struct PendingLoad {
    name: String,
    rx: Option<Receiver<LoadResult>>,
    material_override: Option<Material>,
}

impl PendingLoad {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once the outcome has been handed out by [`poll`](Self::poll) or [`wait`](Self::wait)
    pub fn is_finished(&self) -> bool {
        self.rx.is_none()
    }

    /// Applies the load to `scene` if the worker is done.
    ///
    /// Returns `None` while the worker is still busy and after the outcome was reported.
    /// The outcome itself is returned exactly once. On failure the scene stays untouched.
    pub fn poll(&mut self, scene: &mut Scene) -> Option<Result<NodeId, LoadError>> {
        let result = match self.rx.as_ref()?.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LoadError::WorkerGone),
        };

        self.rx = None;
        Some(self.apply(scene, result))
    }

    /// Blocks until the worker is done and applies the result, like [`poll`](Self::poll).
    pub fn wait(&mut self, scene: &mut Scene) -> Option<Result<NodeId, LoadError>> {
        let result = self
            .rx
            .take()?
            .recv()
            .unwrap_or(Err(LoadError::WorkerGone));
        Some(self.apply(scene, result))
    }

    fn apply(&self, scene: &mut Scene, result: LoadResult) -> Result<NodeId, LoadError> {
        let model = result?;
        let mesh_count = model.mesh_count();
        let root = SceneLoader::instantiate(scene, model);

        if let Some(material) = &self.material_override {
            let replaced = scene.override_materials(root, material);
            debug!("Replaced {replaced} material(s) of {:?}", self.name);
        }

        if let Err(e) = scene.add_root(root) {
            warn!("Couldn't add {:?} to the scene: {e}", self.name);
        }

        info!("Loaded model {:?} with {mesh_count} mesh(es)", self.name);
        Ok(root)
    }
}
