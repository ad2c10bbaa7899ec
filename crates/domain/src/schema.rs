//! Collection schemas — what distinguishes the car service from the employee
//! service.

use crate::document::Fields;
use crate::error::ValidationError;

/// Static description of one entity collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSchema {
    /// Collection name, also used as the URL path segment (`/cars`).
    pub collection: &'static str,
    /// Key of the counter that mints identifiers for this collection.
    pub counter_key: &'static str,
    /// Singular label used in messages, e.g. `Car`.
    pub label: &'static str,
    /// Fields that must be present when a document is created.
    pub required_fields: &'static [&'static str],
}

/// Vehicle inventory.
pub const CARS: CollectionSchema = CollectionSchema {
    collection: "cars",
    counter_key: "vehicle_id_counter",
    label: "Car",
    required_fields: &[
        "brand",
        "model",
        "year",
        "price",
        "mileage",
        "color",
        "engine_type",
        "transmission_type",
    ],
};

/// Employee records.
pub const EMPLOYEES: CollectionSchema = CollectionSchema {
    collection: "employees",
    counter_key: "employee_id_counter",
    label: "Employee",
    required_fields: &["name", "position", "salary", "hire_date", "address"],
};

impl CollectionSchema {
    /// Check that every required field is present.
    ///
    /// Only presence is checked; values may be of any JSON type, including `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] naming every absent field.
    pub fn validate(&self, fields: &Fields) -> Result<(), ValidationError> {
        let missing: Vec<&'static str> = self
            .required_fields
            .iter()
            .copied()
            .filter(|name| !fields.contains_key(*name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields { fields: missing })
        }
    }
}
