use crate::app::envelope::Envelope;
use crate::app::server::AppState;
use crate::domain::model::{Card, CardUpdate};
use crate::utils::error::{CardError, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

fn decode<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| CardError::invalid_input(rejection.body_text()))
}

pub async fn create_card(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Card>, JsonRejection>,
) -> Result<Envelope> {
    tracing::debug!("create card endpoint hit");
    let card = decode(payload)?;
    let created = state.repository.create(card).await?;
    tracing::info!(id = ?created.id, name = %created.name, "Card created");
    Ok(Envelope::success(StatusCode::CREATED, created))
}

pub async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Envelope> {
    tracing::debug!(%id, "get card endpoint hit");
    let card = state.repository.get(&id).await?;
    Ok(Envelope::success(StatusCode::OK, card))
}

pub async fn list_cards(State(state): State<Arc<AppState>>) -> Result<Envelope> {
    tracing::debug!("list cards endpoint hit");
    let cards = state.repository.list().await?;
    Ok(Envelope::success(StatusCode::OK, cards))
}

pub async fn update_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<CardUpdate>, JsonRejection>,
) -> Result<Envelope> {
    tracing::debug!(%id, "update card endpoint hit");
    let update = decode(payload)?;
    let card = state.repository.update(&id, update).await?;
    tracing::info!(%id, "Card updated");
    Ok(Envelope::success(StatusCode::OK, card))
}

pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Envelope> {
    tracing::debug!(%id, "delete card endpoint hit");
    if state.repository.delete(&id).await? == 0 {
        return Err(CardError::NotFound);
    }
    tracing::info!(%id, "Card deleted");
    Ok(Envelope::success(StatusCode::OK, "Card deleted successfully"))
}

#[derive(Debug, Serialize)]
struct HealthReport {
    state: &'static str,
    store: &'static str,
    uptime_seconds: u64,
    checked_at: DateTime<Utc>,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Envelope {
    match state.repository.ping().await {
        Ok(()) => Envelope::success(
            StatusCode::OK,
            HealthReport {
                state: "ok",
                store: state.repository.store_kind(),
                uptime_seconds: state.start_time.elapsed().as_secs(),
                checked_at: Utc::now(),
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            Envelope::error(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}

pub async fn unknown_route(method: Method, uri: Uri) -> Envelope {
    Envelope::error(
        StatusCode::NOT_FOUND,
        format!("No route for {} {}", method, uri.path()),
    )
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> Envelope {
    Envelope::error(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {} not allowed on {}", method, uri.path()),
    )
}
