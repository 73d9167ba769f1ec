//! Response DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hotelsite_core::types::PageResponse;
use hotelsite_entity::promo::{DiscountType, PromoCode};
use hotelsite_service::promo::PROMO_REJECTED;
use hotelsite_service::PromoEligibility;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Total item count.
    pub total: u64,
    /// Current page.
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Total pages.
    pub total_pages: u64,
}

impl<T: Serialize> From<PageResponse<T>> for PaginatedResponse<T> {
    fn from(page: PageResponse<T>) -> Self {
        Self {
            items: page.items,
            total: page.total_items,
            page: page.page,
            per_page: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Server time.
    pub time: DateTime<Utc>,
}

/// Outcome of a promo code check. Rejections carry a single message
/// whatever the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<PromoEligibility> for PromoValidationResponse {
    fn from(eligibility: PromoEligibility) -> Self {
        match eligibility {
            PromoEligibility::Eligible(PromoCode {
                code,
                discount_type,
                discount_value,
                ..
            }) => Self {
                valid: true,
                code: Some(code),
                discount_type: Some(discount_type),
                discount_value: Some(discount_value),
                message: None,
            },
            PromoEligibility::NotEligible => Self {
                valid: false,
                code: None,
                discount_type: None,
                discount_value: None,
                message: Some(PROMO_REJECTED.to_string()),
            },
        }
    }
}
