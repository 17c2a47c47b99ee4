use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use log::{LevelFilter, Log, Metadata, Record};
use processo_api::{build_router, state::AppState};
use processo_core::{open_db_in_memory, Database};
use std::sync::Mutex;
use tower::ServiceExt;

struct CapturedLines {
    lines: Mutex<Vec<String>>,
}

impl Log for CapturedLines {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static CAPTURED: CapturedLines = CapturedLines {
    lines: Mutex::new(Vec::new()),
};

fn install_capture() {
    if log::set_logger(&CAPTURED).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

fn captured_containing(fragment: &str) -> Vec<String> {
    CAPTURED
        .lines
        .lock()
        .expect("captured lines lock")
        .iter()
        .filter(|line| line.contains(fragment))
        .cloned()
        .collect()
}

fn app() -> Router {
    let db = Database::new(open_db_in_memory().expect("in-memory db should open"));
    build_router(AppState::from_database(db))
}

async fn status_of(app: &Router, request: Request<Body>) -> StatusCode {
    app.clone()
        .oneshot(request)
        .await
        .expect("response expected")
        .status()
}

#[tokio::test]
async fn rejected_input_is_logged_with_operation_and_numero() {
    install_capture();
    let app = app();

    let invalid_date = Request::builder()
        .method(Method::PUT)
        .uri("/processo/atualizar")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"numero":"log-7","descricao":"d","data_inicio":"2024-1-1","data_fim":"2024-01-02"}"#,
        ))
        .expect("request should build");
    assert_eq!(status_of(&app, invalid_date).await, StatusCode::BAD_REQUEST);

    let lines = captured_containing("event=processo_update module=api status=invalid");
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].contains("numero=log-7"));
    assert!(lines[0].contains("data_inicio"));

    let malformed = Request::builder()
        .method(Method::POST)
        .uri("/processo")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{broken"))
        .expect("request should build");
    assert_eq!(status_of(&app, malformed).await, StatusCode::BAD_REQUEST);

    let lines = captured_containing("event=processo_create module=api status=invalid");
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].contains("numero=-"));

    let no_numero = Request::builder()
        .method(Method::DELETE)
        .uri("/del_processo")
        .body(Body::empty())
        .expect("request should build");
    assert_eq!(status_of(&app, no_numero).await, StatusCode::BAD_REQUEST);

    assert_eq!(
        captured_containing("event=processo_delete module=api status=invalid").len(),
        1
    );
}
