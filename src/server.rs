use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::analysis::quality::{inspect, QualityFinding};
use crate::analysis::schema::response_schema;
use crate::analysis::{AnalysisClient, AnalysisError};
use crate::output::page::render_page;
use crate::view::{DisplayMode, ViewController, ViewError, ViewPhase, ViewState};

/// One session: the screen state plus the client that feeds it.
#[derive(Clone)]
pub struct ApiState {
    controller: Arc<Mutex<ViewController>>,
    client: AnalysisClient,
    topic: Arc<str>,
}

impl ApiState {
    pub fn new(controller: ViewController, client: AnalysisClient, topic: &str) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            client,
            topic: Arc::from(topic),
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ViewError> for ApiError {
    fn from(err: ViewError) -> Self {
        let status = match err {
            ViewError::EnvironmentUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ViewError::AlreadyLoading | ViewError::KeyNotSelected | ViewError::NoResult => {
                StatusCode::CONFLICT
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct StateResponse {
    phase: ViewPhase,
    state: ViewState,
    findings: Vec<QualityFinding>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/key/select", post(select_key))
        .route("/generate", post(generate))
        .route("/mode/:mode", post(switch_mode))
        .route("/health", get(health))
        .route("/v1/state", get(view_state))
        .route("/v1/schema", get(schema))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(state: ApiState, bind: SocketAddr) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("strategy generator listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index(State(state): State<ApiState>) -> Html<String> {
    let controller = state.controller.lock().await;
    Html(render_page(controller.state()))
}

/// The selection dialog runs without the session lock so the page stays readable.
async fn select_key(State(state): State<ApiState>) -> Result<Redirect, ApiError> {
    state.controller.lock().await.begin_key_selection()?;
    let outcome = state.client.gate().prompt_key_selection().await;
    state.controller.lock().await.finish_key_selection(outcome);
    Ok(Redirect::to("/"))
}

/// Starts a request in the background; the page polls until it resolves.
async fn generate(State(state): State<ApiState>) -> Result<Redirect, ApiError> {
    state.controller.lock().await.begin_generate()?;
    info!("analysis started");

    let controller = state.controller.clone();
    let client = state.client.clone();
    let topic = state.topic.clone();
    tokio::spawn(async move {
        let task = tokio::spawn(async move { client.run_analysis(&topic).await });
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("analysis task aborted: {err}");
                Err(AnalysisError::UnknownFailure(format!("analysis task aborted: {err}")))
            }
        };
        controller.lock().await.complete(outcome);
        info!("analysis finished");
    });
    Ok(Redirect::to("/"))
}

async fn switch_mode(
    State(state): State<ApiState>,
    Path(mode): Path<String>,
) -> Result<Redirect, ApiError> {
    let mode = mode
        .parse::<DisplayMode>()
        .map_err(|err| ApiError::bad_request(err.to_string()))?;
    state.controller.lock().await.switch_mode(mode)?;
    Ok(Redirect::to("/"))
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse { status: "ok" })
}

async fn view_state(State(state): State<ApiState>) -> ApiResult<StateResponse> {
    let controller = state.controller.lock().await;
    let view = controller.state().clone();
    let findings = view
        .analysis_result
        .as_ref()
        .map(inspect)
        .unwrap_or_default();
    Ok(ok(StateResponse {
        phase: view.phase(),
        state: view,
        findings,
    }))
}

async fn schema() -> Json<ApiResponse<Value>> {
    ok(response_schema().clone())
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::extract::{Path, State};
    use axum::http::StatusCode;

    use super::{generate, index, select_key, switch_mode, view_state, ApiState};
    use crate::analysis::fixtures::sample_result;
    use crate::analysis::AnalysisClient;
    use crate::backend::testing::{FakeBackend, Scripted};
    use crate::keygate::testing::FakeCapability;
    use crate::keygate::KeyGate;
    use crate::view::{DisplayMode, ViewController, ViewPhase};

    async fn session(backend: Arc<FakeBackend>, capability: FakeCapability) -> ApiState {
        let gate = Arc::new(KeyGate::new(Some(Arc::new(capability))));
        let mut controller = ViewController::new();
        controller.init(&gate).await;
        ApiState::new(controller, AnalysisClient::new(gate, backend), "topic")
    }

    async fn wait_until_settled(state: &ApiState) {
        for _ in 0..200 {
            if !state.controller.lock().await.state().is_loading {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("analysis never settled");
    }

    #[tokio::test]
    async fn second_generate_while_loading_is_rejected() {
        let text = serde_json::to_string(&sample_result()).expect("serialize");
        let backend = Arc::new(
            FakeBackend::replying(vec![Scripted::Text(text)]).with_delay(Duration::from_millis(50)),
        );
        let state = session(backend.clone(), FakeCapability::selected()).await;

        assert!(generate(State(state.clone())).await.is_ok());
        let err = generate(State(state.clone())).await.expect_err("second generate");
        assert_eq!(err.status, StatusCode::CONFLICT);

        wait_until_settled(&state).await;
        assert_eq!(backend.calls(), 1);
        assert_eq!(backend.max_in_flight(), 1);
        assert_eq!(
            state.controller.lock().await.phase(),
            ViewPhase::Ready(DisplayMode::Analysis)
        );
    }

    #[tokio::test]
    async fn key_selection_then_mode_switch() {
        let text = serde_json::to_string(&sample_result()).expect("serialize");
        let backend = Arc::new(FakeBackend::replying(vec![Scripted::Text(text)]));
        let state = session(backend, FakeCapability::default()).await;

        let err = generate(State(state.clone())).await.expect_err("no key yet");
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert!(select_key(State(state.clone())).await.is_ok());
        assert!(generate(State(state.clone())).await.is_ok());
        wait_until_settled(&state).await;

        assert!(switch_mode(State(state.clone()), Path("brandB".to_string()))
            .await
            .is_ok());
        let err = switch_mode(State(state.clone()), Path("sideways".to_string()))
            .await
            .expect_err("bad mode");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let response = view_state(State(state)).await.expect("state");
        assert!(response.0.ok);
        assert_eq!(response.0.data.phase, ViewPhase::Ready(DisplayMode::BrandB));
        assert!(response.0.data.findings.is_empty());
    }

    #[tokio::test]
    async fn page_stays_readable_while_key_dialog_is_open() {
        let backend = Arc::new(FakeBackend::replying(Vec::new()));
        let capability = FakeCapability::default().with_select_delay(Duration::from_millis(300));
        let state = session(backend, capability).await;

        let selecting = tokio::spawn(select_key(State(state.clone())));
        tokio::time::sleep(Duration::from_millis(20)).await;
        let page = tokio::time::timeout(Duration::from_millis(100), index(State(state.clone())))
            .await
            .expect("index answered while the dialog was open");
        assert!(page.0.contains("API Key Required"));
        let snapshot = tokio::time::timeout(Duration::from_millis(100), view_state(State(state.clone())))
            .await
            .expect("state answered while the dialog was open")
            .expect("state");
        assert_eq!(snapshot.0.data.phase, ViewPhase::AwaitingKey);

        assert!(selecting.await.expect("join").is_ok());
        assert_eq!(state.controller.lock().await.phase(), ViewPhase::Idle);
    }

    #[tokio::test]
    async fn aborted_analysis_task_surfaces_as_error() {
        let backend = Arc::new(FakeBackend::replying(vec![Scripted::Panic]));
        let state = session(backend, FakeCapability::selected()).await;

        assert!(generate(State(state.clone())).await.is_ok());
        wait_until_settled(&state).await;

        let controller = state.controller.lock().await;
        assert_eq!(controller.phase(), ViewPhase::Error);
        let message = controller.state().last_error.clone().expect("error recorded");
        assert!(message.starts_with("Failed to perform business analysis:"));
        assert!(controller.state().is_key_selected);
    }
}
