//! Hotel entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use hotelsite_core::types::{HotelId, OwnerId};

use crate::validate::not_blank;

/// A hotel provisioned by an owner through the onboarding wizard.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate)]
pub struct Hotel {
    /// Unique hotel identifier.
    pub id: HotelId,
    /// Owner account.
    pub user_id: OwnerId,
    /// Display name.
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// URL slug of the public website (`/hotel/{slug}`).
    #[validate(length(min = 1, max = 120))]
    pub slug: String,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Marketing description.
    pub description: Option<String>,
    /// Visual template of the public website.
    pub template_id: String,
    /// Whether the hotel is enabled by the platform.
    pub is_active: bool,
    /// Whether the public website is live.
    pub is_published: bool,
    /// When the hotel was created.
    pub created_at: DateTime<Utc>,
    /// When the hotel was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    /// Whether guests can reach and book through the public website.
    pub fn accepts_bookings(&self) -> bool {
        self.is_active && self.is_published
    }

    /// Path of the public website relative to the site root.
    pub fn website_path(&self) -> String {
        format!("/hotel/{}", self.slug)
    }
}
