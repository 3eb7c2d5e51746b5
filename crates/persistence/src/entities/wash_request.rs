//! Wash request entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::WashRequest;
use sqlx::FromRow;

/// Database row mapping for the car_wash_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct WashRequestEntity {
    pub id: i64,
    pub license_plate: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub exit_date: String,
    pub product: String,
    pub comments: String,
    pub email_sent: bool,
    pub washed: bool,
    pub parked_location: Option<String>,
    pub picked_up: bool,
    pub carwash_pickup: bool,
    pub request_date: DateTime<Utc>,
}

impl From<WashRequestEntity> for WashRequest {
    fn from(entity: WashRequestEntity) -> Self {
        WashRequest {
            id: entity.id,
            license_plate: entity.license_plate,
            name: entity.name,
            phone_number: entity.phone_number,
            email: entity.email,
            exit_date: entity.exit_date,
            product: entity.product,
            comments: entity.comments,
            email_sent: entity.email_sent,
            washed: entity.washed,
            parked_location: entity.parked_location,
            picked_up: entity.picked_up,
            carwash_pickup: entity.carwash_pickup,
            request_date: entity.request_date,
        }
    }
}
