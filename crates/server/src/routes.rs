//! API route handlers

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use analysis::AnalysisReport;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{NaiveDate, Utc};
use data_facade::{
    load_bytes, DataFormat, Dataset, DatasetId, GroundwaterRecord, LoadOptionsBuilder,
    StoredForecast,
};
use forecast_facade::{ForecastConfig, ForecastDiagnostics, ForecastEngine, ForecastPoint};
use narrative::{ChatMessage, ReportLanguage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

fn parse_id(raw: &str) -> ApiResult<DatasetId> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid dataset id '{}'", raw)))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Liveness probe - is the server running?
pub async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - which features can serve requests?
pub async fn readiness(State(state): State<AppState>) -> Json<serde_json::Value> {
    let predictor_loaded = state.predictor.is_some();
    let llm_configured = state.llm.is_some();
    let status = if predictor_loaded && llm_configured {
        "ready"
    } else {
        "degraded"
    };
    Json(serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "predictor_loaded": predictor_loaded,
        "predictor": state.predictor.as_ref().map(|p| p.name().to_string()),
        "llm_configured": llm_configured,
        "datasets": state.store.len(),
    }))
}

// ---------------------------------------------------------------------------
// Datasets
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct UploadParams {
    pub format: Option<String>,
    pub date_column: Option<String>,
    pub level_column: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub dataset_id: DatasetId,
    pub records: usize,
    pub dropped_rows: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// `?format=` wins; otherwise a JSON content type selects JSON and anything
/// else is read as CSV.
fn upload_format(params: &UploadParams, headers: &HeaderMap) -> ApiResult<DataFormat> {
    if let Some(format) = &params.format {
        return Ok(format.parse()?);
    }
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false);
    Ok(if is_json {
        DataFormat::Json
    } else {
        DataFormat::Csv
    })
}

pub async fn upload(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let mut builder = LoadOptionsBuilder::new().format(upload_format(&params, &headers)?);
    if let Some(name) = &params.date_column {
        builder = builder.date_column(name);
    }
    if let Some(name) = &params.level_column {
        builder = builder.level_column(name);
    }
    let options = builder.build()?;

    let dataset = load_bytes(&body, &options)?;
    let records = dataset.len();
    let dropped_rows = dataset.dropped_rows();
    let start_date = dataset.first_date();
    let end_date = dataset.last_date();
    let dataset_id = state.store.insert(dataset);
    info!(dataset = %dataset_id, records, "Dataset uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            dataset_id,
            records,
            dropped_rows,
            start_date,
            end_date,
        }),
    ))
}

pub async fn analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AnalysisReport>> {
    let dataset = state.store.dataset(&parse_id(&id)?)?;
    Ok(Json(analysis::analyze(&dataset)))
}

pub async fn last_forecast(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StoredForecast>> {
    let id = parse_id(&id)?;
    state
        .store
        .last_forecast(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no forecast computed for dataset {}", id)))
}

pub async fn delete_dataset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state
        .store
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiError::NotFound(format!("dataset {}", id)))
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    /// A previously uploaded dataset
    pub dataset_id: Option<DatasetId>,
    /// Inline readings, used instead of `dataset_id` when present
    pub data: Option<Vec<GroundwaterRecord>>,
    #[serde(default = "default_months")]
    pub months: usize,
    /// Defaults to the window the model expects, else 1
    pub time_steps: Option<usize>,
    pub confidence_level: Option<f64>,
    pub with_confidence: Option<bool>,
}

fn default_months() -> usize {
    12
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetrics {
    pub rmse: f64,
    pub mae: f64,
    pub mape: f64,
}

impl From<&ForecastDiagnostics> for ForecastMetrics {
    fn from(d: &ForecastDiagnostics) -> Self {
        Self {
            rmse: d.rmse,
            mae: d.mae,
            mape: d.mape,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub dataset_id: Option<DatasetId>,
    pub forecast: Vec<ForecastPoint>,
    pub metrics: Option<ForecastMetrics>,
    pub diagnostics: Option<ForecastDiagnostics>,
}

fn request_dataset(state: &AppState, req: &mut ForecastRequest) -> ApiResult<Dataset> {
    if let Some(records) = req.data.take() {
        return Ok(Dataset::from_records(records)?);
    }
    match &req.dataset_id {
        Some(id) => Ok(state.store.dataset(id)?),
        None => Err(ApiError::BadRequest(
            "either 'dataset_id' or 'data' is required".into(),
        )),
    }
}

pub async fn forecast(
    State(state): State<AppState>,
    Json(mut req): Json<ForecastRequest>,
) -> ApiResult<Json<ForecastResponse>> {
    let predictor = state
        .predictor
        .clone()
        .ok_or_else(|| ApiError::Unavailable("no forecasting model is loaded".into()))?;

    let inline = req.data.is_some();
    let dataset = request_dataset(&state, &mut req)?;
    let defaults = ForecastConfig::default();
    let config = ForecastConfig {
        horizon: req.months,
        time_steps: req
            .time_steps
            .or_else(|| predictor.expected_time_steps())
            .unwrap_or(defaults.time_steps),
        confidence_level: req.confidence_level.unwrap_or(defaults.confidence_level),
        with_confidence: req.with_confidence.unwrap_or(defaults.with_confidence),
        ..defaults
    };
    let engine = ForecastEngine::new(config)?;
    let series = dataset.to_series()?;

    let report = tokio::task::spawn_blocking(move || engine.forecast(&series, predictor.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("forecast task failed: {}", e)))??;

    // Inline data is not stored, so only a stored dataset keeps its forecast.
    let dataset_id = req.dataset_id.filter(|_| !inline);
    if let Some(id) = &dataset_id {
        state.store.record_forecast(
            id,
            StoredForecast::new(report.points.clone(), report.diagnostics.clone()),
        )?;
    }

    Ok(Json(ForecastResponse {
        dataset_id,
        metrics: report.diagnostics.as_ref().map(ForecastMetrics::from),
        forecast: report.points,
        diagnostics: report.diagnostics,
    }))
}

// ---------------------------------------------------------------------------
// Narrative
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub dataset_id: DatasetId,
    #[serde(default)]
    pub language: ReportLanguage,
}

fn llm(state: &AppState) -> ApiResult<Arc<dyn narrative::LlmProvider>> {
    state
        .llm
        .clone()
        .ok_or_else(|| ApiError::Unavailable("no LLM API key is configured".into()))
}

/// Forecast points stored with a dataset, empty when none was run.
fn stored_points(state: &AppState, id: &DatasetId) -> ApiResult<Vec<ForecastPoint>> {
    Ok(state
        .store
        .last_forecast(id)?
        .map(|f| f.points)
        .unwrap_or_default())
}

pub async fn report(
    State(state): State<AppState>,
    Json(req): Json<ReportRequest>,
) -> ApiResult<Response> {
    let provider = llm(&state)?;
    let dataset = state.store.dataset(&req.dataset_id)?;
    let forecast = stored_points(&state, &req.dataset_id)?;

    let document = narrative::generate_report(
        provider.as_ref(),
        req.language,
        dataset.records(),
        &forecast,
        Utc::now().date_naive(),
    )
    .await?;

    let filename = format!("groundwater_report_{}.md", req.language.code());
    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        document,
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub dataset_id: Option<DatasetId>,
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let provider = llm(&state)?;
    let (records, forecast) = match &req.dataset_id {
        Some(id) => (
            state.store.dataset(id)?.records().to_vec(),
            stored_points(&state, id)?,
        ),
        None => (Vec::new(), Vec::new()),
    };

    let response =
        narrative::chat(provider.as_ref(), &req.chat_history, &records, &forecast).await?;
    Ok(Json(ChatResponse { response }))
}
