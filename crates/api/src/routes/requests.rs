//! Wash request endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::{
    record_notification_outcome, record_request_created, record_status_transition,
};
use crate::services::email::{order_body, order_subject};
use domain::models::wash_request::{sort_by_exit_date, FILTER_DATE_FORMAT};
use domain::models::{CreateWashRequest, StatusFlag, WashRequest};
use domain::services::UpdateEvent;
use persistence::repositories::{
    OverviewFilter, RequestView, WashRequestInput, WashRequestRepository,
};

/// Response for a created wash request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestResponse {
    pub request: WashRequest,
    pub email_sent: bool,
    pub message: String,
}

/// Response for a status transition or location update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResponse {
    pub id: i64,
    pub status: String,
    pub message: String,
}

/// The live overview, grouped by pipeline stage.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub awaiting: Vec<WashRequest>,
    pub in_progress: Vec<WashRequest>,
    pub ready: Vec<WashRequest>,
}

/// Query parameters for the overview endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct OverviewQuery {
    pub search: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Request body for a parked location update.
///
/// The location is free text; only emptiness is rejected.
#[derive(Debug, Deserialize, Validate)]
pub struct LocationUpdateRequest {
    #[validate(length(min = 1, message = "Lokasjon kan ikke være tom"))]
    pub location: String,
}

/// Create a new wash request and notify the wash partner.
///
/// POST /api/v1/requests
pub async fn create_request(
    State(state): State<AppState>,
    Json(request): Json<CreateWashRequest>,
) -> Result<(StatusCode, Json<CreateRequestResponse>), ApiError> {
    request.validate()?;

    let product = request.resolved_product();
    let repo = WashRequestRepository::new(state.pool.clone());

    let input = WashRequestInput {
        license_plate: request.license_plate.clone(),
        name: request.name.clone(),
        phone_number: request.phone_number.clone(),
        email: request.email.clone(),
        exit_date: request.exit_date.clone(),
        product: product.clone(),
        comments: request.comments.clone(),
    };
    let entity = repo.create(&input).await?;
    let mut created: WashRequest = entity.into();

    record_request_created(&product);
    info!(
        id = created.id,
        license_plate = %created.license_plate,
        product = %created.product,
        "Wash request created"
    );

    // Notify the partner. Delivery failure never rolls back the request.
    let subject = order_subject(&created.license_plate);
    let body = order_body(&created);
    let result = state
        .notifier
        .send(&subject, &body, &state.config.email.company_email)
        .await;

    let delivered = result.delivered();
    record_notification_outcome(delivered);

    let message = if delivered {
        repo.mark_email_sent(created.id).await?;
        created.email_sent = true;
        "Autofresh er kontaktet på mail, bestillingen finnes nå på oversikt.".to_string()
    } else {
        warn!(
            id = created.id,
            license_plate = %created.license_plate,
            "Partner notification was not delivered"
        );
        "Noe gikk galt, dobbeltsjekk at bestillingen er riktig lagt til og at Autofresh er informert."
            .to_string()
    };

    Ok((
        StatusCode::CREATED,
        Json(CreateRequestResponse {
            request: created,
            email_sent: delivered,
            message,
        }),
    ))
}

/// Mark a request as collected by the wash partner.
///
/// POST /api/v1/requests/:id/partner-pickup
pub async fn partner_pickup(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TransitionResponse>, ApiError> {
    transition(&state, id, StatusFlag::CarwashPickup).await
}

/// Mark a request as washed.
///
/// POST /api/v1/requests/:id/washed
pub async fn washed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TransitionResponse>, ApiError> {
    transition(&state, id, StatusFlag::Washed).await
}

/// Mark a request as picked up by the customer.
///
/// POST /api/v1/requests/:id/picked-up
pub async fn picked_up(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TransitionResponse>, ApiError> {
    transition(&state, id, StatusFlag::PickedUp).await
}

async fn transition(
    state: &AppState,
    id: i64,
    flag: StatusFlag,
) -> Result<Json<TransitionResponse>, ApiError> {
    let repo = WashRequestRepository::new(state.pool.clone());

    let plate = repo
        .license_plate_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Wash request {} not found", id)))?;

    if !repo.set_status_flag(id, flag).await? {
        return Err(ApiError::NotFound(format!("Wash request {} not found", id)));
    }

    record_status_transition(flag.as_str());
    info!(id, flag = %flag, license_plate = %plate, "Status transition applied");

    state
        .publisher
        .publish(UpdateEvent::update(format!("{} updated", flag)));

    let message = match flag {
        StatusFlag::CarwashPickup => format!(
            "{plate} er hentet av Autofresh, {plate} ligger nå i oversikt over biler som er på vask."
        ),
        StatusFlag::Washed => format!(
            "{plate} er nå ferdigvasket, {plate} ligger nå i oversikt over biler som er klare til å hentes."
        ),
        StatusFlag::PickedUp => {
            format!("{plate} er nå hentet av kunde og fjernet fra oversikten.")
        }
    };

    Ok(Json(TransitionResponse {
        id,
        status: flag.as_str().to_string(),
        message,
    }))
}

/// Record where a washed car is parked.
///
/// POST /api/v1/requests/:id/location
pub async fn set_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<LocationUpdateRequest>,
) -> Result<Json<TransitionResponse>, ApiError> {
    request.validate()?;

    let repo = WashRequestRepository::new(state.pool.clone());

    let plate = repo
        .license_plate_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Wash request {} not found", id)))?;

    if !repo.set_parked_location(id, &request.location).await? {
        return Err(ApiError::NotFound(format!("Wash request {} not found", id)));
    }

    info!(id, license_plate = %plate, location = %request.location, "Parked location updated");

    state.publisher.publish(UpdateEvent::update("Location updated"));

    Ok(Json(TransitionResponse {
        id,
        status: "location".to_string(),
        message: format!("{} er nå parkert på {}.", plate, request.location),
    }))
}

/// The three-part overview of live requests.
///
/// GET /api/v1/requests/overview
pub async fn overview(
    State(state): State<AppState>,
    Query(query): Query<OverviewQuery>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let filter = OverviewFilter {
        search: query.search.clone(),
        start_date: parse_filter_date(query.start_date.as_deref(), "start_date")?,
        end_date: parse_filter_date(query.end_date.as_deref(), "end_date")?,
    };

    let repo = WashRequestRepository::new(state.pool.clone());

    let mut awaiting: Vec<WashRequest> = repo
        .list_view(RequestView::Awaiting, &filter)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let mut in_progress: Vec<WashRequest> = repo
        .list_view(RequestView::InProgress, &filter)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let ready: Vec<WashRequest> = repo
        .list_view(RequestView::Ready, &filter)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    // Queue views are ordered by planned exit time; the ready list keeps
    // storage order so freshly finished cars stay where staff expect them.
    sort_by_exit_date(&mut awaiting);
    sort_by_exit_date(&mut in_progress);

    Ok(Json(OverviewResponse {
        awaiting,
        in_progress,
        ready,
    }))
}

fn parse_filter_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, ApiError> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, FILTER_DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                ApiError::Validation(format!("{}: forventet format dd/mm/åååå", field))
            }),
    }
}
