//! Wash request repository for database operations.

use chrono::{NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::entities::WashRequestEntity;
use crate::metrics::QueryTimer;
use domain::models::StatusFlag;

const SELECT_COLUMNS: &str = "id, license_plate, name, phone_number, email, exit_date, product, \
     comments, email_sent, washed, parked_location, picked_up, carwash_pickup, request_date";

/// Input for creating a new wash request row.
///
/// Status flags and `email_sent` always start false; id and request_date are
/// assigned by the store and never change afterwards.
#[derive(Debug, Clone)]
pub struct WashRequestInput {
    pub license_plate: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub exit_date: String,
    pub product: String,
    pub comments: String,
}

/// The three live views over the request table.
///
/// A terminal request (`picked_up = 1`) is excluded from every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestView {
    /// Submitted, nothing has happened yet.
    Awaiting,
    /// Collected by the wash partner, not washed yet.
    InProgress,
    /// Washed and waiting for the customer.
    Ready,
}

impl RequestView {
    fn predicate(&self) -> &'static str {
        match self {
            RequestView::Awaiting => "picked_up = 0 AND carwash_pickup = 0 AND washed = 0",
            RequestView::InProgress => "carwash_pickup = 1 AND picked_up = 0 AND washed = 0",
            RequestView::Ready => "washed = 1 AND picked_up = 0",
        }
    }
}

/// Optional filters composed onto a view query.
#[derive(Debug, Clone, Default)]
pub struct OverviewFilter {
    /// Case-insensitive substring match against license plate OR name.
    pub search: Option<String>,
    /// Inclusive lower bound on the calendar date of request_date.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the calendar date of request_date.
    pub end_date: Option<NaiveDate>,
}

/// Repository for wash request database operations.
#[derive(Clone)]
pub struct WashRequestRepository {
    pool: SqlitePool,
}

impl WashRequestRepository {
    /// Creates a new WashRequestRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a new wash request with defaulted flags.
    pub async fn create(
        &self,
        input: &WashRequestInput,
    ) -> Result<WashRequestEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_wash_request");
        let result = sqlx::query_as::<_, WashRequestEntity>(&format!(
            r#"
            INSERT INTO car_wash_requests
                (license_plate, name, phone_number, email, exit_date, product, comments,
                 email_sent, request_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(&input.license_plate)
        .bind(&input.name)
        .bind(&input.phone_number)
        .bind(&input.email)
        .bind(&input.exit_date)
        .bind(&input.product)
        .bind(&input.comments)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a wash request by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<WashRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_wash_request_by_id");
        let result = sqlx::query_as::<_, WashRequestEntity>(&format!(
            "SELECT {SELECT_COLUMNS} FROM car_wash_requests WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Look up the license plate for an id, for confirmation messages.
    pub async fn license_plate_by_id(&self, id: i64) -> Result<Option<String>, sqlx::Error> {
        let timer = QueryTimer::new("find_license_plate_by_id");
        let result = sqlx::query_scalar::<_, String>(
            "SELECT license_plate FROM car_wash_requests WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List the requests of one live view, composed with the given filters.
    ///
    /// Rows come back in storage order; callers needing chronological order
    /// sort by parsed exit date.
    pub async fn list_view(
        &self,
        view: RequestView,
        filter: &OverviewFilter,
    ) -> Result<Vec<WashRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_wash_requests_view");
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {SELECT_COLUMNS} FROM car_wash_requests WHERE {}",
            view.predicate()
        ));

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            query.push(" AND (license_plate LIKE '%' || ");
            query.push_bind(search.to_string());
            query.push(" || '%' OR name LIKE '%' || ");
            query.push_bind(search.to_string());
            query.push(" || '%')");
        }
        if let Some(start) = filter.start_date {
            query.push(" AND DATE(request_date) >= DATE(");
            query.push_bind(start);
            query.push(")");
        }
        if let Some(end) = filter.end_date {
            query.push(" AND DATE(request_date) <= DATE(");
            query.push_bind(end);
            query.push(")");
        }

        let result = query
            .build_query_as::<WashRequestEntity>()
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Set a single status flag to true.
    ///
    /// Returns whether a row was affected; callers surface `NotFound` for an
    /// unknown id instead of broadcasting a no-op change. Setting an already
    /// set flag is idempotent.
    pub async fn set_status_flag(&self, id: i64, flag: StatusFlag) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("set_wash_request_status_flag");
        let sql = match flag {
            StatusFlag::CarwashPickup => {
                "UPDATE car_wash_requests SET carwash_pickup = 1 WHERE id = ?"
            }
            StatusFlag::Washed => "UPDATE car_wash_requests SET washed = 1 WHERE id = ?",
            StatusFlag::PickedUp => "UPDATE car_wash_requests SET picked_up = 1 WHERE id = ?",
        };
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }

    /// Set the parked location.
    pub async fn set_parked_location(
        &self,
        id: i64,
        location: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("set_wash_request_parked_location");
        let result = sqlx::query("UPDATE car_wash_requests SET parked_location = ? WHERE id = ?")
            .bind(location)
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }

    /// Mark the partner notification as delivered.
    pub async fn mark_email_sent(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("mark_wash_request_email_sent");
        let result = sqlx::query("UPDATE car_wash_requests SET email_sent = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }

    /// Count requests, optionally bounded below by the calendar date of
    /// request_date and filtered to products containing the given substring.
    pub async fn count(
        &self,
        floor_date: Option<NaiveDate>,
        product_contains: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_wash_requests");
        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM car_wash_requests WHERE 1=1");

        if let Some(floor) = floor_date {
            query.push(" AND DATE(request_date) >= DATE(");
            query.push_bind(floor);
            query.push(")");
        }
        if let Some(product) = product_contains {
            query.push(" AND product LIKE '%' || ");
            query.push_bind(product.to_string());
            query.push(" || '%'");
        }

        let result = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }
}
