//! Order statistics endpoint handler.

use axum::{extract::State, Json};
use chrono::Local;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::wash_request::{ADD_ON_PRODUCT, ADD_ON_SUFFIX};
use domain::models::{ReportingPeriods, StatisticsSummary};
use persistence::repositories::WashRequestRepository;

/// Order counts per calendar window and product category.
///
/// GET /api/v1/statistics
///
/// Windows are anchored in local time. The `lading` counts cover every
/// product containing the add-on name, the `vask_lading` counts only the
/// combined product.
pub async fn statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsSummary>, ApiError> {
    let repo = WashRequestRepository::new(state.pool.clone());
    let periods = ReportingPeriods::for_date(Local::now().date_naive());

    let daily_count = repo.count(Some(periods.today), None).await?;
    let weekly_count = repo.count(Some(periods.week_start), None).await?;
    let monthly_count = repo.count(Some(periods.month_start), None).await?;
    let yearly_count = repo.count(Some(periods.year_start), None).await?;
    let total_count = repo.count(None, None).await?;

    let total_lading_count = repo.count(None, Some(ADD_ON_PRODUCT)).await?;
    let total_vask_lading_count = repo.count(None, Some(ADD_ON_SUFFIX)).await?;

    let daily_lading_count = repo.count(Some(periods.today), Some(ADD_ON_PRODUCT)).await?;
    let weekly_lading_count = repo
        .count(Some(periods.week_start), Some(ADD_ON_PRODUCT))
        .await?;
    let monthly_lading_count = repo
        .count(Some(periods.month_start), Some(ADD_ON_PRODUCT))
        .await?;
    let yearly_lading_count = repo
        .count(Some(periods.year_start), Some(ADD_ON_PRODUCT))
        .await?;

    let daily_vask_lading_count = repo.count(Some(periods.today), Some(ADD_ON_SUFFIX)).await?;
    let weekly_vask_lading_count = repo
        .count(Some(periods.week_start), Some(ADD_ON_SUFFIX))
        .await?;
    let monthly_vask_lading_count = repo
        .count(Some(periods.month_start), Some(ADD_ON_SUFFIX))
        .await?;
    let yearly_vask_lading_count = repo
        .count(Some(periods.year_start), Some(ADD_ON_SUFFIX))
        .await?;

    Ok(Json(StatisticsSummary {
        daily_count,
        weekly_count,
        monthly_count,
        yearly_count,
        total_count,
        total_lading_count,
        total_vask_lading_count,
        daily_lading_count,
        weekly_lading_count,
        monthly_lading_count,
        yearly_lading_count,
        daily_vask_lading_count,
        weekly_vask_lading_count,
        monthly_vask_lading_count,
        yearly_vask_lading_count,
    }))
}
