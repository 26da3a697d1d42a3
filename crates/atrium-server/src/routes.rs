//! HTTP route handlers.
//!
//! All endpoints operate on the single server-owned [`Session`]; uploads
//! and mapping changes fully re-derive the asset list and tree and reset
//! the selection.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use atrium_core::{Asset, ColumnMapping};
use atrium_ingest::WorkbookFormat;

use crate::errors::{ApiError, Result};
use crate::state::{AppState, AssetKey, View};
use crate::view::TreeNodeView;

/// Build the Axum router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/workbook", post(upload_workbook).get(get_workbook))
        .route("/api/mapping", get(get_mapping).put(put_mapping))
        .route("/api/assets", get(get_assets))
        .route("/api/tree", get(get_tree))
        .route("/api/selection", post(post_selection).delete(delete_selection))
        .route("/api/view", get(get_view))
        .with_state(state)
}

/// GET /health response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Seconds since server start.
    pub uptime_secs: u64,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Summary of the loaded workbook.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookResponse {
    /// Header row, in source order.
    pub columns: Vec<String>,
    /// Number of data rows.
    pub row_count: usize,
}

#[derive(Deserialize)]
struct UploadParams {
    format: String,
}

/// POST /api/workbook?format= — upload spreadsheet bytes.
async fn upload_workbook(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<Json<WorkbookResponse>> {
    let format = match params.format.as_str() {
        "xlsx" | "xls" | "xlsb" | "ods" => WorkbookFormat::Xlsx,
        "csv" => WorkbookFormat::Csv,
        other => return Err(ApiError::BadRequest(format!("unsupported format: {other}"))),
    };
    let table = atrium_ingest::read_table_bytes(&body, format)?;
    let response = WorkbookResponse {
        columns: table.columns.clone(),
        row_count: table.row_count(),
    };
    state.session.write().load_table(table);
    Ok(Json(response))
}

/// GET /api/workbook — current columns and row count.
async fn get_workbook(State(state): State<AppState>) -> Result<Json<WorkbookResponse>> {
    let session = state.session.read();
    let table = session.table.as_ref().ok_or(ApiError::NoWorkbook)?;
    Ok(Json(WorkbookResponse {
        columns: table.columns.clone(),
        row_count: table.row_count(),
    }))
}

/// GET /api/mapping
async fn get_mapping(State(state): State<AppState>) -> Json<ColumnMapping> {
    Json(state.session.read().mapping.clone())
}

/// PUT /api/mapping — replace the mapping; re-derives and clears filters.
async fn put_mapping(
    State(state): State<AppState>,
    Json(mapping): Json<ColumnMapping>,
) -> Json<ColumnMapping> {
    let mut session = state.session.write();
    session.set_mapping(mapping);
    Json(session.mapping.clone())
}

/// GET /api/assets — the normalized asset list.
async fn get_assets(State(state): State<AppState>) -> Json<Vec<Asset>> {
    Json(state.session.read().assets.clone())
}

/// GET /api/tree — the tree in rendering order.
async fn get_tree(State(state): State<AppState>) -> Json<TreeNodeView> {
    Json(TreeNodeView::from_node(&state.session.read().tree))
}

/// POST /api/selection body: either a node path or a parent path plus an
/// asset key.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectionRequest {
    path: Option<String>,
    parent_path: Option<String>,
    asset_id: Option<String>,
    name: Option<String>,
}

/// POST /api/selection — select a node or a single asset.
async fn post_selection(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<View>> {
    let mut session = state.session.write();
    match request {
        SelectionRequest { path: Some(path), .. } => session.select_path(&path)?,
        SelectionRequest { parent_path: Some(parent), asset_id, name, .. } => {
            let key = match (asset_id, name) {
                (Some(id), _) => AssetKey::Id(id),
                (None, Some(name)) => AssetKey::Name(name),
                (None, None) => {
                    return Err(ApiError::BadRequest(
                        "selection needs assetId or name".into(),
                    ))
                }
            };
            session.select_asset(&parent, &key)?;
        }
        _ => {
            return Err(ApiError::BadRequest(
                "selection needs path or parentPath".into(),
            ))
        }
    }
    Ok(Json(session.view()))
}

/// DELETE /api/selection — clear filters; full lists restored.
async fn delete_selection(State(state): State<AppState>) -> Json<View> {
    let mut session = state.session.write();
    session.clear_selection();
    Json(session.view())
}

/// GET /api/view — the current filtered view.
async fn get_view(State(state): State<AppState>) -> Json<View> {
    Json(state.session.read().view())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
