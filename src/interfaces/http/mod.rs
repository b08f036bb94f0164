use crate::application::{table_editor, LoadedTable, TableExporter, TableLoader, UploadState};
use crate::domain::error::{AppError, Result};
use crate::domain::table::{DelimiterChoice, EditStep, ExportArtifact, LoadOptions, RawFile};
use crate::infrastructure::config::AppConfig;
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder, Scope};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

/// Bounded in-memory log shown to the user. Never holds cell data.
pub struct LogBook {
    entries: Mutex<Vec<LogEntry>>,
    capacity: usize,
}

impl LogBook {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

pub fn add_log_entry(logs: &LogBook, level: &str, source: &str, message: &str) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut entries = logs
        .entries
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    entries.push(entry.clone());
    if entries.len() > logs.capacity {
        let overflow = entries.len() - logs.capacity;
        entries.drain(..overflow);
    }
    entry
}

pub fn add_log(logs: &LogBook, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub struct HttpState {
    pub config: Arc<AppConfig>,
    pub logs: Arc<LogBook>,
}

/// One upload plus the editor steps to replay on it
#[derive(Debug, Default, Deserialize)]
pub struct TableRequest {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub content_base64: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub delimiter: Option<String>,
    #[serde(default)]
    pub edits: Vec<EditStep>,
}

#[derive(Debug, Deserialize)]
pub struct SpreadsheetRequest {
    #[serde(flatten)]
    pub table: TableRequest,
    pub time_column: String,
}

#[derive(Debug, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PreviewResponse {
    Idle {
        message: String,
    },
    Loaded {
        encoding: String,
        columns: Vec<ColumnInfo>,
        row_count: usize,
        rows: Vec<Vec<String>>,
    },
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

const IDLE_MESSAGE: &str = "Bitte lade eine CSV-Datei hoch, um fortzufahren.";

impl TableRequest {
    fn load_options(&self) -> Result<LoadOptions> {
        let mut options = LoadOptions::new();
        if let Some(label) = self.encoding.as_deref().filter(|l| !l.trim().is_empty()) {
            options = options.with_encoding(label);
        }
        if let Some(delimiter) = self.delimiter.as_deref() {
            options = options.with_delimiter(DelimiterChoice::parse(delimiter)?);
        }
        Ok(options)
    }

    fn upload(&self) -> Result<Option<RawFile>> {
        let Some(content) = self.content_base64.as_deref() else {
            return Ok(None);
        };
        let bytes = BASE64.decode(content.trim()).map_err(|e| {
            AppError::ValidationError(format!("content_base64 is not valid base64: {}", e))
        })?;
        Ok(Some(RawFile::new(self.file_name.clone(), bytes)))
    }

    /// Load the upload and replay the edits. `None` means nothing was uploaded.
    fn edited_table(&self) -> Result<Option<LoadedTable>> {
        let loader = TableLoader::new(self.load_options()?);
        match loader.open(self.upload()?)? {
            UploadState::Idle => Ok(None),
            UploadState::Loaded(loaded) => {
                let table = table_editor::apply_edits(&loaded.table, &self.edits)?;
                Ok(Some(LoadedTable { table, ..loaded }))
            }
        }
    }
}

fn build_preview(loaded: &LoadedTable, preview_rows: usize) -> PreviewResponse {
    let table = &loaded.table;
    let columns = table
        .columns()
        .iter()
        .map(|c| ColumnInfo {
            name: c.name().to_string(),
            kind: c.kind().to_string(),
        })
        .collect();
    let rows = (0..table.row_count().min(preview_rows))
        .filter_map(|idx| table.row(idx))
        .map(|row| row.iter().map(|cell| cell.to_display_string()).collect())
        .collect();

    PreviewResponse::Loaded {
        encoding: loaded.encoding.name().to_string(),
        columns,
        row_count: table.row_count(),
        rows,
    }
}

fn error_response(err: &AppError) -> HttpResponse {
    let body = ErrorBody {
        error: err.kind(),
        message: err.to_string(),
    };
    match err {
        AppError::DecodeError(_) | AppError::ParseError(_) => {
            HttpResponse::UnprocessableEntity().json(body)
        }
        AppError::ColumnNotFound(_) => HttpResponse::NotFound().json(body),
        AppError::ValidationError(_) | AppError::EmptyInput => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

fn artifact_response(artifact: ExportArtifact) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(artifact.mime_type.as_str())
        .insert_header(("Content-Disposition", artifact.content_disposition()))
        .body(artifact.bytes)
}

fn fail(data: &HttpState, action: &str, err: &AppError) -> HttpResponse {
    add_log(
        &data.logs,
        "ERROR",
        "HttpApi",
        &format!("{} failed: {}", action, err),
    );
    error_response(err)
}

#[post("/tables/preview")]
async fn preview_table(data: web::Data<HttpState>, req: web::Json<TableRequest>) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Preview requested (edits={})", req.edits.len()),
    );

    match req.edited_table() {
        Ok(None) => HttpResponse::Ok().json(PreviewResponse::Idle {
            message: IDLE_MESSAGE.to_string(),
        }),
        Ok(Some(loaded)) => {
            add_log(
                &data.logs,
                "INFO",
                "HttpApi",
                &format!("Detected encoding: {}", loaded.encoding),
            );
            HttpResponse::Ok().json(build_preview(&loaded, data.config.preview_rows))
        }
        Err(e) => fail(&data, "Preview", &e),
    }
}

#[post("/tables/export/csv")]
async fn export_csv(data: web::Data<HttpState>, req: web::Json<TableRequest>) -> impl Responder {
    let exporter = TableExporter::new(data.config.export.clone());
    let result = req.edited_table().and_then(|loaded| {
        let loaded = loaded.ok_or(AppError::EmptyInput)?;
        exporter.export_csv(&loaded.table, &loaded.file_name)
    });

    match result {
        Ok(artifact) => {
            add_log(
                &data.logs,
                "INFO",
                "HttpApi",
                &format!("CSV export: {}", artifact.file_name),
            );
            artifact_response(artifact)
        }
        Err(e) => fail(&data, "CSV export", &e),
    }
}

#[post("/tables/export/xlsx")]
async fn export_xlsx(
    data: web::Data<HttpState>,
    req: web::Json<SpreadsheetRequest>,
) -> impl Responder {
    let exporter = TableExporter::new(data.config.export.clone());
    let result = req.table.edited_table().and_then(|loaded| {
        let loaded = loaded.ok_or(AppError::EmptyInput)?;
        exporter.export_spreadsheet(&loaded.table, &req.time_column, &loaded.file_name)
    });

    match result {
        Ok(artifact) => {
            add_log(
                &data.logs,
                "INFO",
                "HttpApi",
                &format!("Spreadsheet export: {}", artifact.file_name),
            );
            artifact_response(artifact)
        }
        Err(e) => fail(&data, "Spreadsheet export", &e),
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.logs.snapshot())
}

pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(preview_table)
        .service(export_csv)
        .service(export_xlsx)
        .service(get_logs)
}

pub fn start_server(config: Arc<AppConfig>, logs: Arc<LogBook>) -> std::io::Result<Server> {
    let bind = (config.server.host.clone(), config.server.port);
    let state = web::Data::new(HttpState { config, logs });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(64 * 1024 * 1024))
            .service(api_scope())
    })
    .bind(bind)?
    .run();

    Ok(server)
}
