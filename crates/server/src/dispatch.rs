//! Server side of the command channel.
//!
//! Each session hands its client events to [`Dispatcher::handle`], which
//! answers on the session's outbox. Project list refreshes go to every
//! session through a broadcast channel, whether the save came over a session
//! or over REST.

use std::sync::Arc;
use std::time::Duration;

use shared::{
    BlueprintPayload, ClientEvent, DrawPayload, IntentDecision, PrimitiveParams, ProjectRecord,
    SaveProjectRequest, ServerEvent,
};
use tokio::sync::{broadcast, mpsc};

use crate::error::{with_timeout, StoreError};
use crate::resolver::{vocab, Resolver};
use crate::search::{AssetSearch, SearchOutcome};
use crate::storage::ProjectStore;

/// Capacity of the project-list broadcast
const BROADCAST_CAPACITY: usize = 16;

const THINKING: &str = "Thinking really hard...";

pub type Outbox = mpsc::UnboundedSender<ServerEvent>;

pub struct Dispatcher {
    resolver: Resolver,
    search: Option<Arc<dyn AssetSearch>>,
    store: Arc<ProjectStore>,
    updates: broadcast::Sender<ServerEvent>,
    timeout: Duration,
}

fn emit(outbox: &Outbox, event: ServerEvent) {
    if outbox.send(event).is_err() {
        tracing::debug!("Session closed, dropping event");
    }
}

fn say(outbox: &Outbox, message: impl Into<String>) {
    emit(outbox, ServerEvent::CopReply(message.into()));
}

fn draw_primitive(outbox: &Outbox, params: PrimitiveParams) {
    emit(outbox, ServerEvent::Draw3dHouse(DrawPayload::Math { params }));
}

impl Dispatcher {
    pub fn new(
        resolver: Resolver,
        search: Option<Arc<dyn AssetSearch>>,
        store: Arc<ProjectStore>,
        timeout: Duration,
    ) -> Self {
        let (updates, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            resolver,
            search,
            store,
            updates,
            timeout,
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Receiver for events addressed to every session
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.updates.subscribe()
    }

    /// Handle one client event, answering on `outbox`
    pub async fn handle(&self, event: ClientEvent, outbox: &Outbox) {
        match event {
            ClientEvent::BuildHouse(text) => self.build(&text, outbox).await,
            ClientEvent::GetAllProjects => {
                emit(outbox, ServerEvent::ProjectsList(self.store.list().await));
            }
            ClientEvent::LoadProject(id) => match self.store.get(&id).await {
                Ok(project) => emit(outbox, ServerEvent::ProjectLoaded(project)),
                Err(e) => {
                    tracing::warn!("Load failed: {e}");
                    say(outbox, "Error loading project.");
                }
            },
            ClientEvent::SaveProject(request) => match self.save_project(request).await {
                Ok(saved) => emit(outbox, ServerEvent::ProjectLoaded(saved)),
                Err(e) => {
                    tracing::warn!("Save failed: {e}");
                    say(outbox, "Error saving project.");
                }
            },
        }
    }

    /// Store a project and push the refreshed list to every session
    pub async fn save_project(
        &self,
        request: SaveProjectRequest,
    ) -> Result<ProjectRecord, StoreError> {
        let saved = self.store.save(request).await?;
        tracing::info!(id = %saved.id, "Project saved");
        // no receivers is not an error
        let _ = self
            .updates
            .send(ServerEvent::ProjectsList(self.store.list().await));
        Ok(saved)
    }

    /// Resolve a build request and emit the resulting events
    pub async fn build(&self, text: &str, outbox: &Outbox) {
        let decision = match self.resolver.resolve_local(text) {
            Some(decision) => decision,
            None => {
                say(outbox, THINKING);
                self.resolver.resolve_remote(text).await
            }
        };
        tracing::info!(?decision, "Resolved build request");

        match decision {
            IntentDecision::Chat { reply } => say(outbox, reply),
            IntentDecision::GeneratePrimitive(params) => {
                say(
                    outbox,
                    format!(
                        "Building a {} ({} x {})!",
                        params.shape.as_str(),
                        params.width,
                        params.height
                    ),
                );
                draw_primitive(outbox, params);
            }
            IntentDecision::SearchAsset { keyword } => {
                say(outbox, format!("Searching the catalog for a {keyword}..."));
                match self.find_asset(&keyword).await {
                    Some(url) => {
                        emit(outbox, ServerEvent::Draw3dHouse(DrawPayload::Model { url }));
                        say(outbox, format!("Here is your {keyword}!"));
                    }
                    None => {
                        say(
                            outbox,
                            format!("Couldn't fetch a {keyword} model, building a stand-in instead."),
                        );
                        draw_primitive(outbox, vocab::prop_fallback(&keyword));
                    }
                }
            }
            IntentDecision::GenerateLayout {
                project_name,
                rooms,
            } => {
                say(outbox, format!("Slicing the floor plan for your {project_name}..."));
                let count = rooms.len();
                emit(
                    outbox,
                    ServerEvent::StartBlueprintPipeline(BlueprintPayload {
                        project_name,
                        auto_nodes: rooms,
                    }),
                );
                say(outbox, format!("Done! Drew {count} room(s)."));
            }
        }
    }

    /// Usable asset URL, or `None` for any failure (HTML page, no hits, transport, timeout)
    async fn find_asset(&self, keyword: &str) -> Option<String> {
        let search = self.search.as_ref()?;
        match with_timeout(self.timeout, search.search(keyword)).await {
            Ok(SearchOutcome::Found { url }) => Some(url),
            Ok(SearchOutcome::Unusable { reason }) => {
                tracing::warn!(keyword, "Asset search unusable: {reason}");
                None
            }
            Err(e) => {
                tracing::warn!(keyword, "Asset search failed: {e}");
                None
            }
        }
    }

    /// Drive one session: client events from `inbox`, replies and broadcasts to `outbox`.
    /// Builds run in their own task so a slow remote tier never holds up
    /// project replies or broadcasts. Returns when the inbox closes or the
    /// outbox is dropped.
    pub async fn serve_channel(
        self: Arc<Self>,
        mut inbox: mpsc::UnboundedReceiver<ClientEvent>,
        outbox: Outbox,
    ) {
        let mut updates = self.subscribe();
        loop {
            tokio::select! {
                event = inbox.recv() => match event {
                    Some(ClientEvent::BuildHouse(text)) => {
                        let this = Arc::clone(&self);
                        let outbox = outbox.clone();
                        tokio::spawn(async move { this.build(&text, &outbox).await });
                    }
                    Some(event) => self.handle(event, &outbox).await,
                    None => break,
                },
                update = updates.recv() => match update {
                    Ok(event) => {
                        if outbox.send(event).is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("Session lagged, skipped {skipped} updates");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
        tracing::debug!("Session finished");
    }
}
