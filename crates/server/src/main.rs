// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use slotbook_api::{
    AddSlotRequest, ApiError, BookingResponse, BookingSummaryResponse, CalendarQuery,
    CalendarResponse, ConfirmRequest, MyBookingResponse, RemoveSlotResponse, SubmitRequest,
    USER_ID_HEADER, add_slot, calendar, confirm, my_booking, remove_slot, resolve_trainee, submit,
};
use slotbook_audit::{Actor, AuditSink, ExecutionContext, RequestMeta, TracingAuditSink};
use slotbook_domain::{UserId, parse_date};
use slotbook_persistence::{Persistence, PersistenceConfig, RetryPolicy, SeedSummary};
use std::sync::Arc;
use std::time::{Duration, Instant};
use time::{Date, OffsetDateTime};
use tracing::{error, info, warn};

/// Slotbook Server - HTTP server for training slot booking
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = 8)]
    pool_size: u32,

    /// Milliseconds `SQLite` waits on a held write lock
    #[arg(long, default_value_t = 250)]
    busy_timeout_ms: u64,

    /// Attempts per write transaction before reporting a conflict
    #[arg(long, default_value_t = 5)]
    max_attempts: u32,

    /// Initial retry delay in milliseconds, doubled per attempt
    #[arg(long, default_value_t = 10)]
    retry_delay_ms: u64,

    /// Seed the default curriculum and schedule on startup
    #[arg(long)]
    seed: bool,

    /// First seeded date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    seed_start: Option<String>,

    /// Months of training days to seed
    #[arg(long, default_value_t = 6)]
    seed_months: u32,

    /// Seats per seeded training day
    #[arg(long, default_value_t = 10)]
    seed_capacity: u32,
}

impl Args {
    fn persistence_config(&self) -> PersistenceConfig {
        PersistenceConfig {
            pool_size: self.pool_size,
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
            retry: RetryPolicy {
                max_attempts: self.max_attempts,
                initial_delay: Duration::from_millis(self.retry_delay_ms),
                ..RetryPolicy::default()
            },
        }
    }
}

/// Application state shared across handlers.
///
/// The persistence layer owns a connection pool and is shared without a
/// lock; all coordination between requests happens in the database.
#[derive(Clone)]
struct AppState {
    /// The booking store.
    persistence: Arc<Persistence>,
    /// Receives every finished write request.
    sink: Arc<dyn AuditSink>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Stable error kind.
    kind: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error kind.
    kind: &'static str,
    /// The error message.
    message: String,
}

impl HttpError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "invalid_input",
            message,
        }
    }

    fn internal(message: String) -> Self {
        error!(error = %message, "Internal error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "internal",
            message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            kind: self.kind.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::CapacityExhausted { .. } => StatusCode::CONFLICT,
            ApiError::Busy { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => return Self::internal(err.to_string()),
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// Resolves the trainee forwarded by the identity provider.
fn trainee_from_headers(headers: &HeaderMap) -> Result<UserId, HttpError> {
    let value: Option<&str> = match headers.get(USER_ID_HEADER) {
        Some(raw) => Some(raw.to_str().map_err(|_| {
            HttpError::from(ApiError::AuthenticationFailed {
                reason: format!("{USER_ID_HEADER} header is not valid text"),
            })
        })?),
        None => None,
    };
    resolve_trainee(value).map_err(|e| HttpError::from(ApiError::from(e)))
}

/// Runs a write operation on the blocking pool and reports it to the audit
/// sink once the response status is known.
async fn run_write<T, F>(
    app_state: AppState,
    method: &'static str,
    path: String,
    user_id: UserId,
    operation: F,
) -> Result<T, HttpError>
where
    T: Send + 'static,
    F: FnOnce(&Persistence, &mut ExecutionContext, &UserId) -> Result<T, ApiError>
        + Send
        + 'static,
{
    let started: Instant = Instant::now();
    let persistence: Arc<Persistence> = Arc::clone(&app_state.persistence);

    let (result, mut context) = tokio::task::spawn_blocking(move || {
        let mut context: ExecutionContext =
            ExecutionContext::new(RequestMeta::new(method, &path), Actor::trainee(&user_id));
        let result: Result<T, ApiError> = operation(&persistence, &mut context, &user_id);
        (result, context)
    })
    .await
    .map_err(|e| HttpError::internal(format!("worker task failed: {e}")))?;

    let result: Result<T, HttpError> = result.map_err(HttpError::from);
    let status: u16 = match &result {
        Ok(_) => StatusCode::OK.as_u16(),
        Err(e) => e.status.as_u16(),
    };
    context.finish(status, started.elapsed());
    app_state.sink.emit(&context);

    result
}

/// Runs a read on the blocking pool.
async fn run_read<T, F>(app_state: AppState, operation: F) -> Result<T, HttpError>
where
    T: Send + 'static,
    F: FnOnce(&Persistence) -> Result<T, ApiError> + Send + 'static,
{
    let persistence: Arc<Persistence> = Arc::clone(&app_state.persistence);
    tokio::task::spawn_blocking(move || operation(&persistence))
        .await
        .map_err(|e| HttpError::internal(format!("worker task failed: {e}")))?
        .map_err(HttpError::from)
}

/// Handler for POST `/booking/submit` endpoint.
///
/// Replaces the trainee's slot set and confirms it.
async fn handle_submit(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<BookingSummaryResponse>, HttpError> {
    let user_id: UserId = trainee_from_headers(&headers)?;
    let Json(req) = payload?;
    info!(
        user_id = %user_id,
        days = req.training_day_ids.len(),
        "Handling submit request"
    );

    run_write(
        app_state,
        "POST",
        String::from("/booking/submit"),
        user_id,
        move |persistence, context, user_id| submit(persistence, context, user_id, &req),
    )
    .await
    .map(Json)
}

/// Handler for POST `/booking/slots` endpoint.
///
/// Adds one training day to the trainee's booking.
async fn handle_add_slot(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AddSlotRequest>, JsonRejection>,
) -> Result<Json<BookingResponse>, HttpError> {
    let user_id: UserId = trainee_from_headers(&headers)?;
    let Json(req) = payload?;
    info!(
        user_id = %user_id,
        training_day_id = req.training_day_id,
        "Handling add_slot request"
    );

    run_write(
        app_state,
        "POST",
        String::from("/booking/slots"),
        user_id,
        move |persistence, context, user_id| add_slot(persistence, context, user_id, &req),
    )
    .await
    .map(Json)
}

/// Handler for DELETE `/booking/slots/{training_day_id}` endpoint.
///
/// Removes one training day from the trainee's booking.
async fn handle_remove_slot(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    training_day_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<RemoveSlotResponse>, HttpError> {
    let user_id: UserId = trainee_from_headers(&headers)?;
    let Path(training_day_id) = training_day_id?;
    info!(user_id = %user_id, training_day_id, "Handling remove_slot request");

    run_write(
        app_state,
        "DELETE",
        format!("/booking/slots/{training_day_id}"),
        user_id,
        move |persistence, context, user_id| {
            remove_slot(persistence, context, user_id, training_day_id)
        },
    )
    .await
    .map(Json)
}

/// Handler for POST `/booking/confirm` endpoint.
///
/// Confirms the trainee's draft booking.
async fn handle_confirm(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ConfirmRequest>, JsonRejection>,
) -> Result<Json<BookingSummaryResponse>, HttpError> {
    let user_id: UserId = trainee_from_headers(&headers)?;
    let Json(req) = payload?;
    info!(
        user_id = %user_id,
        booking_id = req.booking_id,
        "Handling confirm request"
    );

    run_write(
        app_state,
        "POST",
        String::from("/booking/confirm"),
        user_id,
        move |persistence, context, user_id| confirm(persistence, context, user_id, &req),
    )
    .await
    .map(Json)
}

/// Handler for GET `/booking` endpoint.
///
/// Returns the trainee's active booking, or `null`.
async fn handle_my_booking(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<MyBookingResponse>, HttpError> {
    let user_id: UserId = trainee_from_headers(&headers)?;

    run_read(app_state, move |persistence| my_booking(persistence, &user_id))
        .await
        .map(Json)
}

/// Handler for GET `/calendar` endpoint.
///
/// Lists training days with confirmed occupancy for a date range.
async fn handle_calendar(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> Result<Json<CalendarResponse>, HttpError> {
    let Query(query) = query?;

    run_read(app_state, move |persistence| calendar(persistence, &query))
        .await
        .map(Json)
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/booking", get(handle_my_booking))
        .route("/booking/submit", post(handle_submit))
        .route("/booking/slots", post(handle_add_slot))
        .route("/booking/slots/{training_day_id}", delete(handle_remove_slot))
        .route("/booking/confirm", post(handle_confirm))
        .route("/calendar", get(handle_calendar))
        .with_state(app_state)
}

/// Seeds the default curriculum when requested on the command line.
fn seed_if_requested(persistence: &Persistence, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if !args.seed {
        return Ok(());
    }

    let start: Date = match &args.seed_start {
        Some(value) => parse_date(value)?,
        None => OffsetDateTime::now_utc().date(),
    };
    let summary: SeedSummary =
        persistence.seed_curriculum(start, args.seed_months, args.seed_capacity)?;
    if summary.days_inserted == 0 {
        warn!(%start, "Seeding added no training days; schedule already present");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Slotbook Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let config: PersistenceConfig = args.persistence_config();
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path, config)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory_with_config(config)?
    };

    seed_if_requested(&persistence, &args)?;

    let app_state: AppState = AppState {
        persistence: Arc::new(persistence),
        sink: Arc::new(TracingAuditSink),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
