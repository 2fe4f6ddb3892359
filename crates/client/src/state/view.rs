//! Viewer presentation state.
//!
//! `ViewState` is a plain value: changes produce a new value through the
//! `with_*` builders and the owner swaps it in.

/// Active manipulation gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl GizmoMode {
    pub fn label(&self) -> &'static str {
        match self {
            GizmoMode::Translate => "Move",
            GizmoMode::Rotate => "Rotate",
            GizmoMode::Scale => "Scale",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    gizmo_mode: GizmoMode,
    environment: String,
    sidebar_open: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            gizmo_mode: GizmoMode::default(),
            environment: "city".to_string(),
            sidebar_open: false,
        }
    }
}

impl ViewState {
    pub fn gizmo_mode(&self) -> GizmoMode {
        self.gizmo_mode
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn with_gizmo_mode(self, gizmo_mode: GizmoMode) -> Self {
        Self { gizmo_mode, ..self }
    }

    pub fn with_environment(self, environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            ..self
        }
    }

    pub fn with_sidebar_open(self, sidebar_open: bool) -> Self {
        Self {
            sidebar_open,
            ..self
        }
    }
}
