//! Coffee catalog models for request and response payloads

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coffee catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CoffeeItem {
    /// Build a new item from a validated create request
    ///
    /// Text fields are taken as-is; validation already trimmed them.
    pub fn new(request: CreateCoffeeRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            description: request.description,
            price: request.price,
            category: request.category,
            available: request.available.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Normalized payload for creating a coffee
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCoffeeRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub available: Option<bool>,
}

/// Normalized payload for a partial coffee update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateCoffeeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

impl UpdateCoffeeRequest {
    /// Whether any editable field is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.available.is_none()
    }
}

/// Attributes of a coffee item that can be assigned after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoffeeField {
    Name,
    Description,
    Price,
    Category,
    Available,
    UpdatedAt,
}

impl CoffeeField {
    /// User-editable fields in their canonical order
    pub const EDITABLE: [CoffeeField; 5] = [
        CoffeeField::Name,
        CoffeeField::Description,
        CoffeeField::Price,
        CoffeeField::Category,
        CoffeeField::Available,
    ];

    /// Attribute name as it appears in payloads and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            CoffeeField::Name => "name",
            CoffeeField::Description => "description",
            CoffeeField::Price => "price",
            CoffeeField::Category => "category",
            CoffeeField::Available => "available",
            CoffeeField::UpdatedAt => "updatedAt",
        }
    }
}

impl fmt::Display for CoffeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON envelope for successful responses
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Response for coffee listing
#[derive(Debug, Serialize)]
pub struct CoffeeListResponse {
    pub count: usize,
    pub coffees: Vec<CoffeeItem>,
}

/// Response for coffee deletion
#[derive(Debug, Serialize)]
pub struct DeleteCoffeeResponse {
    pub message: String,
    pub id: String,
}
