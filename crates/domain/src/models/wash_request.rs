//! Car-wash request domain model.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Format of the customer-facing exit date, e.g. `01/03/2024 10:00`.
pub const EXIT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Format of the overview date filters, e.g. `01/03/2024`.
pub const FILTER_DATE_FORMAT: &str = "%d/%m/%Y";

/// Name of the standalone charging add-on product.
pub const ADD_ON_PRODUCT: &str = "Lading";

/// Suffix appended to the base product when the charging add-on is requested.
pub const ADD_ON_SUFFIX: &str = " + Lading";

/// A car-wash service request.
///
/// The three status flags are independently monotonic (false to true only).
/// `picked_up` is terminal: once set, the request leaves all live views and
/// only remains visible to statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WashRequest {
    pub id: i64,
    pub license_plate: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    /// Planned exit date and time, formatted as [`EXIT_DATE_FORMAT`].
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

impl WashRequest {
    /// The request has been submitted but nothing has happened yet.
    pub fn is_awaiting(&self) -> bool {
        !self.carwash_pickup && !self.washed && !self.picked_up
    }

    /// The wash partner has collected the car and it is not washed yet.
    pub fn is_in_progress(&self) -> bool {
        self.carwash_pickup && !self.washed && !self.picked_up
    }

    /// The car is washed and waiting for the customer.
    pub fn is_ready_for_pickup(&self) -> bool {
        self.washed && !self.picked_up
    }

    /// Parses `exit_date`; `None` if it does not conform to the format.
    ///
    /// Creation validates the format, so stored rows always parse.
    pub fn parsed_exit_date(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.exit_date, EXIT_DATE_FORMAT).ok()
    }
}

/// Sorts requests ascending by parsed exit date (earliest departure first).
///
/// Rows with an unparseable exit date sort first rather than poisoning the
/// order of the rest.
pub fn sort_by_exit_date(requests: &mut [WashRequest]) {
    requests.sort_by_key(|r| r.parsed_exit_date().unwrap_or(NaiveDateTime::MIN));
}

/// The updatable status flags of a request.
///
/// A closed enum so that every status update maps to a known column; there is
/// no free-form field-name update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFlag {
    CarwashPickup,
    Washed,
    PickedUp,
}

impl StatusFlag {
    /// Stable identifier, also the column name in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFlag::CarwashPickup => "carwash_pickup",
            StatusFlag::Washed => "washed",
            StatusFlag::PickedUp => "picked_up",
        }
    }
}

impl std::fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload for creating a new wash request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWashRequest {
    #[validate(length(min = 1, message = "License plate is required"))]
    pub license_plate: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Planned exit date and time, must match [`EXIT_DATE_FORMAT`].
    #[validate(custom(function = "validate_exit_date"))]
    pub exit_date: String,

    #[validate(length(min = 1, message = "Product is required"))]
    pub product: String,

    #[serde(default)]
    pub comments: String,

    /// Whether to add the charging add-on to the chosen product.
    #[serde(default)]
    pub add_lading: bool,
}

impl CreateWashRequest {
    /// The product that will actually be stored.
    ///
    /// When the add-on flag is set the suffix marker is appended, unless the
    /// product already is the add-on itself (no `"Lading + Lading"`).
    pub fn resolved_product(&self) -> String {
        if self.add_lading && self.product != ADD_ON_PRODUCT {
            format!("{}{}", self.product, ADD_ON_SUFFIX)
        } else {
            self.product.clone()
        }
    }
}

/// Validates that an exit date string conforms to [`EXIT_DATE_FORMAT`].
pub fn validate_exit_date(value: &str) -> Result<(), ValidationError> {
    if NaiveDateTime::parse_from_str(value, EXIT_DATE_FORMAT).is_ok() {
        Ok(())
    } else {
        let mut err = ValidationError::new("exit_date_format");
        err.message = Some("Exit date must be formatted as DD/MM/YYYY HH:MM".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(carwash_pickup: bool, washed: bool, picked_up: bool) -> WashRequest {
        WashRequest {
            id: 1,
            license_plate: "AB12345".to_string(),
            name: "Kari Nordmann".to_string(),
            phone_number: "12345678".to_string(),
            email: "kari@example.com".to_string(),
            exit_date: "01/03/2024 10:00".to_string(),
            product: "Vask".to_string(),
            comments: String::new(),
            email_sent: false,
            washed,
            parked_location: None,
            picked_up,
            carwash_pickup,
            request_date: Utc::now(),
        }
    }

    #[test]
    fn test_awaiting_requires_all_flags_clear() {
        assert!(request(false, false, false).is_awaiting());
        assert!(!request(true, false, false).is_awaiting());
        assert!(!request(false, true, false).is_awaiting());
        assert!(!request(false, false, true).is_awaiting());
    }

    #[test]
    fn test_in_progress_requires_partner_pickup_only() {
        assert!(request(true, false, false).is_in_progress());
        assert!(!request(false, false, false).is_in_progress());
        assert!(!request(true, true, false).is_in_progress());
        assert!(!request(true, false, true).is_in_progress());
    }

    #[test]
    fn test_ready_ignores_partner_pickup() {
        // washed can be reached without carwash_pickup ever being recorded
        assert!(request(false, true, false).is_ready_for_pickup());
        assert!(request(true, true, false).is_ready_for_pickup());
        assert!(!request(true, true, true).is_ready_for_pickup());
    }

    #[test]
    fn test_picked_up_is_excluded_from_every_view() {
        let terminal = request(true, true, true);
        assert!(!terminal.is_awaiting());
        assert!(!terminal.is_in_progress());
        assert!(!terminal.is_ready_for_pickup());
    }

    #[test]
    fn test_parsed_exit_date() {
        let r = request(false, false, false);
        let parsed = r.parsed_exit_date().expect("valid exit date");
        assert_eq!(parsed.format(EXIT_DATE_FORMAT).to_string(), r.exit_date);
    }

    #[test]
    fn test_sort_by_exit_date_earliest_first() {
        let mut later = request(false, false, false);
        later.exit_date = "02/03/2024 09:00".to_string();
        let mut earlier = request(false, false, false);
        earlier.exit_date = "01/03/2024 09:00".to_string();

        let mut rows = vec![later, earlier];
        sort_by_exit_date(&mut rows);
        assert_eq!(rows[0].exit_date, "01/03/2024 09:00");
        assert_eq!(rows[1].exit_date, "02/03/2024 09:00");
    }

    #[test]
    fn test_status_flag_as_str() {
        assert_eq!(StatusFlag::CarwashPickup.as_str(), "carwash_pickup");
        assert_eq!(StatusFlag::Washed.as_str(), "washed");
        assert_eq!(StatusFlag::PickedUp.as_str(), "picked_up");
    }

    fn create_payload(product: &str, add_lading: bool) -> CreateWashRequest {
        CreateWashRequest {
            license_plate: "AB12345".to_string(),
            name: "Kari Nordmann".to_string(),
            phone_number: "12345678".to_string(),
            email: "kari@example.com".to_string(),
            exit_date: "01/03/2024 10:00".to_string(),
            product: product.to_string(),
            comments: String::new(),
            add_lading,
        }
    }

    #[test]
    fn test_resolved_product_appends_suffix() {
        assert_eq!(create_payload("Vask", true).resolved_product(), "Vask + Lading");
    }

    #[test]
    fn test_resolved_product_without_add_on() {
        assert_eq!(create_payload("Vask", false).resolved_product(), "Vask");
    }

    #[test]
    fn test_resolved_product_same_name_guard() {
        // "Lading" with the add-on flag set must not become "Lading + Lading"
        assert_eq!(create_payload("Lading", true).resolved_product(), "Lading");
    }

    #[test]
    fn test_create_request_valid() {
        assert!(create_payload("Vask", false).validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_malformed_exit_date() {
        let mut payload = create_payload("Vask", false);
        payload.exit_date = "2024-03-01 10:00".to_string();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_missing_fields() {
        let mut payload = create_payload("Vask", false);
        payload.license_plate = String::new();
        assert!(payload.validate().is_err());

        let mut payload = create_payload("Vask", false);
        payload.email = "not-an-email".to_string();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_validate_exit_date_rejects_nonsense_date() {
        assert!(validate_exit_date("32/13/2024 10:00").is_err());
        assert!(validate_exit_date("01/03/2024").is_err());
        assert!(validate_exit_date("01/03/2024 10:00").is_ok());
    }
}
