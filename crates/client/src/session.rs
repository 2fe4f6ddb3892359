//! Client session: applies server events to the application state.
//!
//! `project_loaded` answers both `load_project` and `save_project`. Only an
//! answer to a requested load replaces the scene; a save echo carries the
//! objects as they were when the save was sent and only updates project meta.

use std::collections::HashSet;

use shared::{ClientEvent, SaveProjectRequest, ServerEvent};

use crate::channel::{ChannelError, CommandChannel, MemoryChannel};
use crate::state::{AppState, StatusKind};

pub struct ClientSession<C: CommandChannel> {
    pub state: AppState,
    channel: C,
    /// Project ids requested through `load_project` and not yet answered
    pending_loads: HashSet<String>,
}

impl<C: CommandChannel> ClientSession<C> {
    pub fn new(state: AppState, channel: C) -> Self {
        Self {
            state,
            channel,
            pending_loads: HashSet::new(),
        }
    }

    fn send(&mut self, event: ClientEvent) -> Result<(), ChannelError> {
        let result = self.channel.send(event);
        if let Err(e) = &result {
            tracing::warn!("Send failed: {e}");
            self.state.status.push(StatusKind::Error, e.to_string());
        }
        result
    }

    /// Ask the server to build from free text
    pub fn build(&mut self, text: &str) -> Result<(), ChannelError> {
        self.send(ClientEvent::BuildHouse(text.to_string()))
    }

    pub fn request_projects(&mut self) -> Result<(), ChannelError> {
        self.send(ClientEvent::GetAllProjects)
    }

    pub fn load_project(&mut self, id: &str) -> Result<(), ChannelError> {
        self.send(ClientEvent::LoadProject(id.to_string()))?;
        self.pending_loads.insert(id.to_string());
        Ok(())
    }

    /// Save blueprint and objects under `name`, updating the open project if it has an id
    pub fn save_project(&mut self, name: &str) -> Result<(), ChannelError> {
        let request = SaveProjectRequest {
            id: self.state.project.id.clone(),
            name: name.to_string(),
            nodes: self.state.blueprint.clone(),
            objects: self.state.scene.objects().to_vec(),
        };
        self.send(ClientEvent::SaveProject(request))
    }

    /// Apply every pending server event; returns how many were applied
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.channel.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Apply one server event
    pub fn apply(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::CopReply(message) => {
                self.state.status.push(StatusKind::Server, message);
            }
            ServerEvent::Draw3dHouse(payload) => {
                self.state.scene.add_object(&payload);
            }
            ServerEvent::StartBlueprintPipeline(blueprint) => {
                tracing::info!(rooms = blueprint.auto_nodes.len(), "Blueprint received");
                self.state.blueprint = blueprint.auto_nodes;
                self.state.project.id = None;
                self.state.project.name = blueprint.project_name;
            }
            ServerEvent::ProjectsList(projects) => {
                self.state.projects = projects;
            }
            ServerEvent::ProjectLoaded(record) => {
                if self.pending_loads.remove(&record.id) {
                    tracing::info!(id = %record.id, "Project loaded");
                    self.state.blueprint = record.nodes;
                    self.state.scene.load_objects(record.objects);
                } else {
                    tracing::debug!(id = %record.id, "Save acknowledged");
                }
                self.state.project.id = Some(record.id);
                self.state.project.name = record.name;
            }
        }
    }
}

impl ClientSession<MemoryChannel> {
    /// Wait for one server event and apply it; `false` once the server is gone
    pub async fn next(&mut self) -> bool {
        match self.channel.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }
}
