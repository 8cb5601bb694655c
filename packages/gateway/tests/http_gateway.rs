//! HttpGateway against an in-process axum template server

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use blockmail_editor::{
    ComponentInstance, ComponentType, EditSession, EditorError, Gesture, MemoryGateway, Template,
    TemplateGateway, TemplatePatch,
};
use blockmail_gateway::{GatewayError, HttpGateway};
use serde::Deserialize;
use std::sync::Arc;

type Store = Arc<MemoryGateway>;

#[derive(Deserialize)]
struct CreateBody {
    name: String,
    components: Vec<ComponentInstance>,
}

async fn list_templates(State(store): State<Store>) -> Json<Vec<Template>> {
    Json(store.templates())
}

async fn create_template(
    State(store): State<Store>,
    Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<Template>), StatusCode> {
    store
        .create(&body.name, &body.components)
        .await
        .map(|template| (StatusCode::CREATED, Json(template)))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn update_template(
    State(store): State<Store>,
    Path(id): Path<String>,
    Json(patch): Json<TemplatePatch>,
) -> Result<Json<Template>, (StatusCode, String)> {
    store
        .update(&id, patch)
        .await
        .map(Json)
        .map_err(|err| (StatusCode::NOT_FOUND, err.to_string()))
}

async fn delete_template(State(store): State<Store>, Path(id): Path<String>) -> StatusCode {
    match store.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(_) => StatusCode::NOT_FOUND,
    }
}

/// Start the fake store; returns its base URL and backing storage
async fn start_server() -> anyhow::Result<(String, Store)> {
    let store: Store = Arc::new(MemoryGateway::new());

    let app = Router::new()
        .route("/api/templates", get(list_templates).post(create_template))
        .route(
            "/api/templates/:id",
            axum::routing::patch(update_template).delete(delete_template),
        )
        .with_state(store.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok((format!("http://{}", addr), store))
}

#[tokio::test]
async fn test_session_round_trip_over_http() -> anyhow::Result<()> {
    let (url, store) = start_server().await?;
    let gateway = HttpGateway::new(&url)?;

    let mut session = EditSession::default();
    session.drop_gesture(&Gesture::insert(ComponentType::Header, None));
    session.drop_gesture(&Gesture::insert(ComponentType::DataTable, None));

    session.save_as(&gateway, "Quarterly").await?;
    let template = session.template().cloned().ok_or_else(|| anyhow::anyhow!("not associated"))?;
    assert_eq!(template.name, "Quarterly");

    session.drop_gesture(&Gesture::insert(ComponentType::Footer, None));
    session.save(&gateway).await?;
    assert_eq!(store.templates()[0].components.len(), 3);

    let listed = session.list_templates(&gateway).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].components, session.document().components());

    let mut other = EditSession::default();
    other.load(listed[0].clone());
    assert_eq!(other.export()?, session.export()?);

    session.delete_template(&gateway, &template.id).await?;
    assert!(gateway.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_rejected_request_carries_status_and_body() -> anyhow::Result<()> {
    let (url, _store) = start_server().await?;
    let gateway = HttpGateway::new(&url)?;

    let err = gateway
        .update("404", TemplatePatch::name("ghost"))
        .await
        .expect_err("update of a missing template must fail");

    match err {
        GatewayError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Template not found: 404");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_unreachable_store_leaves_session_untouched() -> anyhow::Result<()> {
    // nothing listens on port 9 (discard) on a test host
    let gateway = HttpGateway::new("http://127.0.0.1:9")?;

    let mut session = EditSession::default();
    session.drop_gesture(&Gesture::insert(ComponentType::Text, None));
    let history_len = session.history().len();

    let err = session.save_as(&gateway, "Offline").await.unwrap_err();
    assert!(matches!(err, EditorError::Gateway { action: "save template", .. }));
    assert_eq!(session.template(), None);
    assert_eq!(session.history().len(), history_len);
    Ok(())
}
