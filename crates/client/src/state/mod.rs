pub mod scene;
pub mod selection;
pub mod settings;
pub mod status;
pub mod view;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{Polygon, ProjectSummary};

pub use scene::SceneState;
pub use settings::ClientSettings;
pub use status::{StatusKind, StatusLog};
pub use view::{GizmoMode, ViewState};

/// Project currently open in the builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMeta {
    /// `None` until the project has been saved once
    pub id: Option<String>,
    pub name: String,
}

/// Combined application state
pub struct AppState {
    pub scene: SceneState,
    pub status: StatusLog,
    /// Room footprints of the current blueprint
    pub blueprint: Vec<Polygon>,
    pub project: ProjectMeta,
    /// Last project list received from the server
    pub projects: Vec<ProjectSummary>,
    pub view: ViewState,
    pub settings: ClientSettings,
}

impl AppState {
    pub fn new(settings: ClientSettings, rng: StdRng) -> Self {
        let view = ViewState::default().with_environment(settings.environment.clone());
        Self {
            scene: SceneState::new(settings.clone(), rng),
            status: StatusLog::default(),
            blueprint: Vec::new(),
            project: ProjectMeta::default(),
            projects: Vec::new(),
            view,
            settings,
        }
    }

    /// Default settings and a fixed rng seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(ClientSettings::default(), StdRng::seed_from_u64(seed))
    }

    /// Swap in a new view value
    pub fn set_view(&mut self, view: ViewState) {
        self.view = view;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ClientSettings::load(), StdRng::from_entropy())
    }
}
