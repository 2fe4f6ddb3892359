//! End-to-end: client session ⇄ in-memory channel ⇄ dispatcher.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use scene_client::channel::{memory_pair, MemoryChannel};
use scene_client::session::ClientSession;
use scene_client::state::AppState as ClientState;
use scene_server::dispatch::Dispatcher;
use scene_server::error::AdapterError;
use scene_server::resolver::Resolver;
use scene_server::routes::{self, ResolveRequest};
use scene_server::search::{classify_body, AssetSearch, SearchOutcome};
use scene_server::storage::ProjectStore;
use scene_server::AppState;
use shared::{
    IntentDecision, ObjectKind, PrimitiveParams, SaveProjectRequest, ServerEvent, Shape,
};

/// Search backend that answers with an HTML error page
struct HtmlSearch;

#[async_trait]
impl AssetSearch for HtmlSearch {
    async fn search(&self, _keyword: &str) -> Result<SearchOutcome, AdapterError> {
        Ok(classify_body("  <!DOCTYPE html><html><body>502</body></html>"))
    }
}

fn dispatcher(search: Option<Arc<dyn AssetSearch>>) -> Arc<Dispatcher> {
    Arc::new(Dispatcher::new(
        Resolver::local_only(),
        search,
        Arc::new(ProjectStore::in_memory()),
        Duration::from_secs(5),
    ))
}

/// Session wired to a dispatcher task
fn connect(dispatcher: &Arc<Dispatcher>, seed: u64) -> ClientSession<MemoryChannel> {
    let (channel, server) = memory_pair();
    tokio::spawn(dispatcher.clone().serve_channel(server.inbox, server.outbox));
    ClientSession::new(ClientState::seeded(seed), channel)
}

/// Apply events until `done` holds
async fn settle<F>(session: &mut ClientSession<MemoryChannel>, done: F)
where
    F: Fn(&ClientState) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        while !done(&session.state) {
            assert!(session.next().await, "server end closed");
        }
    })
    .await
    .expect("session did not settle");
}

#[tokio::test]
async fn test_car_with_html_search_yields_default_box() {
    let d = dispatcher(Some(Arc::new(HtmlSearch)));
    let mut session = connect(&d, 1);

    session.build("car").unwrap();
    settle(&mut session, |s| s.scene.len() == 1).await;

    let object = &session.state.scene.objects()[0];
    assert_eq!(object.kind, ObjectKind::Primitive(PrimitiveParams::fallback()));
    assert!(session
        .state
        .status
        .lines()
        .iter()
        .any(|line| line.text.contains("stand-in")));
}

#[tokio::test]
async fn test_typo_shape_builds_primitive() {
    let d = dispatcher(None);
    let mut session = connect(&d, 2);

    session.build("red bxo").unwrap();
    settle(&mut session, |s| s.scene.len() == 1).await;

    match &session.state.scene.objects()[0].kind {
        ObjectKind::Primitive(params) => {
            assert_eq!(params.shape, Shape::Box);
            assert_eq!(params.color, "#ff0000");
            assert_eq!(params.width, 2.0);
        }
        other => panic!("Expected primitive, got {other:?}"),
    }
}

#[tokio::test]
async fn test_layout_reaches_blueprint() {
    let d = dispatcher(None);
    let mut session = connect(&d, 3);

    session.build("2bhk").unwrap();
    settle(&mut session, |s| !s.blueprint.is_empty()).await;

    assert_eq!(session.state.blueprint.len(), 5);
    assert!(session.state.blueprint.iter().all(|room| shared::is_closed_polygon(room)));
    assert!(session.state.scene.is_empty());
}

#[tokio::test]
async fn test_save_broadcasts_to_other_sessions() {
    let d = dispatcher(None);
    let mut saver = connect(&d, 4);
    let mut watcher = connect(&d, 5);

    saver.build("blue sphere 3").unwrap();
    settle(&mut saver, |s| s.scene.len() == 1).await;

    saver.save_project("Garden").unwrap();
    settle(&mut saver, |s| s.project.id.is_some()).await;
    settle(&mut watcher, |s| !s.projects.is_empty()).await;

    assert_eq!(watcher.state.projects[0].name, "Garden");
    let id = saver.state.project.id.clone().unwrap();

    watcher.load_project(&id).unwrap();
    settle(&mut watcher, |s| s.scene.len() == 1).await;
    assert_eq!(watcher.state.scene.objects(), saver.state.scene.objects());
    assert_eq!(watcher.state.project.name, "Garden");
}

#[tokio::test]
async fn test_rest_handlers() {
    let store = Arc::new(ProjectStore::in_memory());
    let state = AppState {
        dispatcher: Arc::new(Dispatcher::new(
            Resolver::local_only(),
            None,
            store.clone(),
            Duration::from_secs(5),
        )),
        store,
    };

    let mut updates = state.dispatcher.subscribe();

    let Json(decision) = routes::resolve(
        State(state.clone()),
        Json(ResolveRequest { text: "hello".into() }),
    )
    .await;
    assert!(matches!(decision, IntentDecision::Chat { .. }));

    let created = routes::save_project(
        State(state.clone()),
        Json(SaveProjectRequest {
            id: None,
            name: "Loft".into(),
            nodes: vec![],
            objects: vec![],
        }),
    )
    .await
    .map(|(status, _)| status);
    assert_eq!(created, Ok(StatusCode::CREATED));
    match updates.recv().await.unwrap() {
        ServerEvent::ProjectsList(list) => assert_eq!(list[0].name, "Loft"),
        other => panic!("Expected ProjectsList, got {other:?}"),
    }

    let missing = routes::save_project(
        State(state.clone()),
        Json(SaveProjectRequest {
            id: Some("nope".into()),
            name: "Loft".into(),
            nodes: vec![],
            objects: vec![],
        }),
    )
    .await
    .map(|(status, _)| status);
    assert_eq!(missing, Err(StatusCode::NOT_FOUND));

    let Json(projects) = routes::list_projects(State(state)).await;
    assert_eq!(projects.len(), 1);
}

#[tokio::test]
async fn test_rest_save_reaches_connected_session() {
    let store = Arc::new(ProjectStore::in_memory());
    let state = AppState {
        dispatcher: Arc::new(Dispatcher::new(
            Resolver::local_only(),
            None,
            store.clone(),
            Duration::from_secs(5),
        )),
        store,
    };
    let mut watcher = connect(&state.dispatcher, 6);
    // round trip so the session is subscribed before the save
    watcher.request_projects().unwrap();
    assert!(watcher.next().await);

    routes::save_project(
        State(state.clone()),
        Json(SaveProjectRequest {
            id: None,
            name: "Studio".into(),
            nodes: vec![],
            objects: vec![],
        }),
    )
    .await
    .unwrap();

    settle(&mut watcher, |s| !s.projects.is_empty()).await;
    assert_eq!(watcher.state.projects[0].name, "Studio");
}
