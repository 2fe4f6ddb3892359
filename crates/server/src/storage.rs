//! Project persistence.
//!
//! Projects live in memory, oldest first, and are optionally mirrored to a
//! JSON file after every save.

use std::path::{Path, PathBuf};

use shared::{ProjectRecord, ProjectSummary, SaveProjectRequest};
use tokio::sync::RwLock;

use crate::error::StoreError;

const UNTITLED: &str = "Untitled Blueprint";

#[derive(Default)]
pub struct ProjectStore {
    projects: RwLock<Vec<ProjectRecord>>,
    path: Option<PathBuf>,
}

impl ProjectStore {
    /// Empty store without a backing file
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Store mirrored to `path`; existing contents are loaded
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let projects = match tokio::fs::read_to_string(&path).await {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::info!("Loaded {} projects from {}", projects.len(), path.display());
        Ok(Self {
            projects: RwLock::new(projects),
            path: Some(path),
        })
    }

    /// Project summaries, newest first
    pub async fn list(&self) -> Vec<ProjectSummary> {
        self.projects
            .read()
            .await
            .iter()
            .rev()
            .map(ProjectRecord::summary)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<ProjectRecord, StoreError> {
        self.projects
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Create (`id: None`) or overwrite a project and return the stored record
    pub async fn save(&self, request: SaveProjectRequest) -> Result<ProjectRecord, StoreError> {
        let name = if request.name.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            request.name
        };

        let mut projects = self.projects.write().await;
        // changes land in memory only once the file write succeeded
        let mut next = projects.clone();
        let saved = match request.id {
            Some(id) => {
                let existing = next
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| StoreError::NotFound(id.clone()))?;
                existing.name = name;
                existing.nodes = request.nodes;
                existing.objects = request.objects;
                existing.clone()
            }
            None => {
                let record = ProjectRecord {
                    id: uuid::Uuid::new_v4().to_string(),
                    name,
                    nodes: request.nodes,
                    objects: request.objects,
                };
                next.push(record.clone());
                record
            }
        };

        if let Some(path) = &self.path {
            persist(path, &next).await?;
        }
        *projects = next;

        Ok(saved)
    }
}

async fn persist(path: &Path, projects: &[ProjectRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(projects)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json).await?;
    Ok(())
}
