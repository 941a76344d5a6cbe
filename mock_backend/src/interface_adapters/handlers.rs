use crate::domain::entities::{Principal, Record};
use crate::domain::errors::BackendError;
use crate::interface_adapters::payload::Payload;
use crate::interface_adapters::protocol::{
    BrandResponse, DeleteResponse, ErrorResponse, GuestTokenRequest, GuestTokenResponse,
    ListResponse, LoginRequest, LoginResponse, LogoutResponse, OrderSearchRequest, OrderSearchResponse,
    ValidationResponse,
};
use crate::interface_adapters::state::{AppState, RESOURCES};
use crate::use_cases::guest_token::GuestTokenUseCase;
use crate::use_cases::orders::{OrderFilter, OrderStatistics, order_statistics, search_orders};
use crate::use_cases::sign_in::SignInUseCase;
use crate::use_cases::sign_out::SignOutUseCase;
use crate::use_cases::verify_token::{VerifyTokenUseCase, bearer_token};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value, json};
use std::collections::HashMap;

// Handler for staff sign-in.
#[tracing::instrument(name = "login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Response> {
    let use_case = SignInUseCase {
        accounts: &state.accounts,
        store: state.token_store(),
    };

    let result = use_case
        .execute(&payload.email, &payload.password)
        .await
        .map_err(map_backend_error)?;

    tracing::info!(account_id = result.account.id, "staff signed in.");
    Ok(Json(LoginResponse {
        token: result.token,
        user: result.account,
    }))
}

// Handler revoking the caller's bearer token.
#[tracing::instrument(name = "logout", skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, Response> {
    authenticate(&state, &headers).await?;
    let token = request_token(&headers).unwrap_or_default();

    let use_case = SignOutUseCase {
        store: state.token_store(),
    };
    let revoked = use_case.execute(token).await.map_err(map_backend_error)?;
    Ok(Json(LogoutResponse { revoked }))
}

// Handler returning whoever the bearer token belongs to.
pub async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, Response> {
    match authenticate(&state, &headers).await? {
        Principal::Staff { account_id } => {
            let account = state
                .accounts
                .iter()
                .find(|account| account.id == account_id)
                .ok_or_else(|| map_backend_error(BackendError::Unauthenticated))?;
            Ok(Json(json!(account)))
        }
        Principal::Guest {
            table,
            employee_id,
            guest_id,
        } => Ok(Json(json!({
            "table": table,
            "employee_id": employee_id,
            "guest_id": guest_id,
        }))),
    }
}

// Handler resolving a table link into a guest token.
#[tracing::instrument(name = "get_token", skip_all, fields(table = %payload.table))]
pub async fn get_token(
    State(state): State<AppState>,
    Json(payload): Json<GuestTokenRequest>,
) -> Result<Json<GuestTokenResponse>, Response> {
    let use_case = GuestTokenUseCase {
        tables: &state.tables,
        store: state.token_store(),
    };

    let result = use_case
        .execute(&payload.table)
        .await
        .map_err(map_backend_error)?;

    Ok(Json(GuestTokenResponse {
        token: result.token,
        employee_id: result.employee_id,
        guest_id: result.guest_id,
    }))
}

// Handler registering guest details; echoes the stored row.
pub async fn register_guest(
    State(state): State<AppState>,
    headers: HeaderMap,
    Payload(fields): Payload,
) -> Result<(StatusCode, Json<Record>), Response> {
    authenticate(&state, &headers).await?;
    let record = store_record(&state, "guest", fields).await;
    Ok((StatusCode::CREATED, Json(record)))
}

// Public brand information for the guest landing page.
pub async fn brand() -> Json<BrandResponse> {
    Json(BrandResponse {
        name: "Mock Bistro".to_string(),
        logo: "images/brand/logo.png".to_string(),
    })
}

pub async fn list_resources(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(resource): Path<String>,
) -> Result<Json<ListResponse>, Response> {
    authenticate(&state, &headers).await?;
    ensure_resource(&resource)?;

    let resources = state.resources.lock().await;
    let data = resources.get(&resource).cloned().unwrap_or_default();
    Ok(Json(ListResponse { data }))
}

pub async fn create_resource(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(resource): Path<String>,
    Payload(fields): Payload,
) -> Result<(StatusCode, Json<Record>), Response> {
    authenticate(&state, &headers).await?;
    ensure_resource(&resource)?;
    if fields.is_empty() {
        return Err(map_backend_error(BackendError::Validation(vec![(
            "name".to_string(),
            "The name field is required.".to_string(),
        )])));
    }

    let record = store_record(&state, &resource, fields).await;
    Ok((StatusCode::CREATED, Json(record)))
}

// Update through POST; `_method=put` may arrive in the body or the query.
pub async fn update_resource(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((resource, id)): Path<(String, u64)>,
    Query(query): Query<HashMap<String, String>>,
    Payload(mut fields): Payload,
) -> Result<Json<Record>, Response> {
    authenticate(&state, &headers).await?;
    ensure_resource(&resource)?;

    let method_override = fields
        .remove("_method")
        .and_then(|value| value.as_str().map(str::to_string))
        .or_else(|| query.get("_method").cloned());
    tracing::debug!(%resource, id, method_override = ?method_override, "updating resource");

    let mut resources = state.resources.lock().await;
    let row = resources
        .get_mut(&resource)
        .and_then(|rows| rows.iter_mut().find(|row| row_id(row) == Some(id)))
        .ok_or_else(|| map_backend_error(BackendError::NotFound))?;
    for (key, value) in fields {
        if key != "id" {
            row.insert(key, value);
        }
    }
    Ok(Json(row.clone()))
}

pub async fn delete_resource(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((resource, id)): Path<(String, u64)>,
) -> Result<Json<DeleteResponse>, Response> {
    authenticate(&state, &headers).await?;
    ensure_resource(&resource)?;

    let mut resources = state.resources.lock().await;
    let rows = resources.entry(resource).or_default();
    let before = rows.len();
    rows.retain(|row| row_id(row) != Some(id));
    if rows.len() == before {
        return Err(map_backend_error(BackendError::NotFound));
    }
    Ok(Json(DeleteResponse { deleted: true }))
}

pub async fn search_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<OrderSearchRequest>,
) -> Result<Json<OrderSearchResponse>, Response> {
    authenticate(&state, &headers).await?;
    let orders = state.orders.lock().await;
    Ok(Json(OrderSearchResponse {
        data: search_orders(&orders, &order_filter(payload)),
    }))
}

pub async fn get_statistics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<OrderSearchRequest>,
) -> Result<Json<OrderStatistics>, Response> {
    authenticate(&state, &headers).await?;
    let orders = state.orders.lock().await;
    Ok(Json(order_statistics(&orders, &order_filter(payload))))
}

fn request_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    bearer_token(header)
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Principal, Response> {
    let token = request_token(headers).unwrap_or_default();

    let use_case = VerifyTokenUseCase {
        store: state.token_store(),
    };
    use_case.execute(token).await.map_err(map_backend_error)
}

fn ensure_resource(resource: &str) -> Result<(), Response> {
    if RESOURCES.contains(&resource) {
        Ok(())
    } else {
        Err(map_backend_error(BackendError::NotFound))
    }
}

async fn store_record(state: &AppState, resource: &str, mut fields: Map<String, Value>) -> Record {
    fields.remove("_method");
    fields.insert("id".to_string(), json!(state.allocate_id()));
    let mut resources = state.resources.lock().await;
    resources
        .entry(resource.to_string())
        .or_default()
        .push(fields.clone());
    fields
}

fn row_id(row: &Record) -> Option<u64> {
    row.get("id").and_then(Value::as_u64)
}

fn order_filter(payload: OrderSearchRequest) -> OrderFilter {
    OrderFilter {
        from: payload.from,
        to: payload.to,
        status: payload.status,
        employee_id: payload.employee_id,
    }
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

fn map_backend_error(err: BackendError) -> Response {
    match err {
        BackendError::Validation(fields) => {
            let mut errors = Map::new();
            for (field, message) in fields {
                let entry = errors
                    .entry(field)
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let Value::Array(messages) = entry {
                    messages.push(Value::String(message));
                }
            }
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationResponse {
                    message: "The given data was invalid.".to_string(),
                    errors,
                }),
            )
                .into_response()
        }
        BackendError::InvalidCredentials => {
            error_response(StatusCode::UNAUTHORIZED, "invalid credentials")
        }
        BackendError::Unauthenticated => error_response(StatusCode::UNAUTHORIZED, "unauthenticated"),
        BackendError::UnknownTable => error_response(StatusCode::NOT_FOUND, "unknown table"),
        BackendError::NotFound => error_response(StatusCode::NOT_FOUND, "not found"),
        BackendError::StorageFailure => error_response(StatusCode::BAD_GATEWAY, "storage error"),
    }
}
