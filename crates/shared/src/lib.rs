use serde::{Deserialize, Serialize};

/// Unique identifier of a placed scene object
pub type ObjectId = String;

/// Lower bound for primitive width/height in the scene
pub const MIN_SIZE: f64 = 0.1;

/// Upper bound for primitive width/height
pub const MAX_SIZE: f64 = 20.0;

/// Size used when the user does not name one
pub const DEFAULT_SIZE: f64 = 2.0;

/// Accent color for primitives without an explicit color
pub const ACCENT_COLOR: &str = "#3b82f6";

/// Parametric primitive shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Box,
    Sphere,
    Cylinder,
    Cone,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Box => "box",
            Shape::Sphere => "sphere",
            Shape::Cylinder => "cylinder",
            Shape::Cone => "cone",
        }
    }

    /// Parse a shape name as it appears in remote model output
    pub fn from_name(name: &str) -> Option<Shape> {
        match name.trim().to_ascii_lowercase().as_str() {
            "box" | "cube" | "square" => Some(Shape::Box),
            "sphere" | "ball" => Some(Shape::Sphere),
            "cylinder" => Some(Shape::Cylinder),
            "cone" | "pyramid" => Some(Shape::Cone),
            _ => None,
        }
    }
}

/// Parameters of a generated primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveParams {
    pub shape: Shape,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

impl PrimitiveParams {
    pub fn new(shape: Shape, size: f64, color: impl Into<String>) -> Self {
        Self {
            shape,
            width: size,
            height: size,
            color: color.into(),
        }
    }

    /// The small accent box substituted whenever a request cannot be honored
    pub fn fallback() -> Self {
        Self::new(Shape::Box, DEFAULT_SIZE, ACCENT_COLOR)
    }

    /// Clamp width/height into `[min, MAX_SIZE]`; non-finite values become the default size
    pub fn clamped(mut self, min: f64) -> Self {
        self.width = clamp_size(self.width, min);
        self.height = clamp_size(self.height, min);
        self
    }
}

fn clamp_size(value: f64, min: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, MAX_SIZE)
    } else {
        DEFAULT_SIZE
    }
}

/// Object transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: [f64; 3],
    /// Euler angles in radians
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// What a scene object is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    /// Parametric primitive built locally
    Primitive(PrimitiveParams),
    /// Pre-made asset fetched from a catalog
    Asset {
        #[serde(rename = "sourceUrl")]
        source_url: String,
    },
}

impl ObjectKind {
    /// Height used to rest the object on the ground plane
    pub fn rest_height(&self) -> f64 {
        match self {
            ObjectKind::Primitive(params) => params.height,
            ObjectKind::Asset { .. } => 0.0,
        }
    }
}

/// A placed entity in the editable scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    #[serde(default)]
    pub transform: Transform,
}

/// 2D point of a room footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Closed ring of points; the first point is repeated at the end
pub type Polygon = Vec<Point2D>;

/// True if the ring has at least three distinct corners and is closed
pub fn is_closed_polygon(points: &[Point2D]) -> bool {
    points.len() >= 4 && points.first() == points.last()
}

/// Structured output of the intent resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum IntentDecision {
    Chat {
        reply: String,
    },
    GeneratePrimitive(PrimitiveParams),
    SearchAsset {
        keyword: String,
    },
    GenerateLayout {
        project_name: String,
        rooms: Vec<Polygon>,
    },
}

/// Payload of the `draw_3d_house` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawPayload {
    Math { params: PrimitiveParams },
    Model { url: String },
}

impl DrawPayload {
    /// Object kind a client creates for this payload; sizes are clamped to `[MIN_SIZE, MAX_SIZE]`
    pub fn to_kind(&self) -> ObjectKind {
        match self {
            DrawPayload::Math { params } => ObjectKind::Primitive(params.clone().clamped(MIN_SIZE)),
            DrawPayload::Model { url } => ObjectKind::Asset {
                source_url: url.clone(),
            },
        }
    }
}

/// Payload of the `start_blueprint_pipeline` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintPayload {
    pub project_name: String,
    pub auto_nodes: Vec<Polygon>,
}

/// Entry of the project list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
}

/// A stored project: blueprint footprint plus placed objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Polygon>,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl ProjectRecord {
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Save request; `id: None` creates a new project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveProjectRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Polygon>,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

/// Client → server events of the command channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    BuildHouse(String),
    GetAllProjects,
    LoadProject(String),
    SaveProject(SaveProjectRequest),
}

/// Server → client events of the command channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Human-readable status or chat line
    CopReply(String),
    #[serde(rename = "draw_3d_house")]
    Draw3dHouse(DrawPayload),
    StartBlueprintPipeline(BlueprintPayload),
    ProjectsList(Vec<ProjectSummary>),
    ProjectLoaded(ProjectRecord),
}
