//! Month calendar, availability toggling and nightly price overrides.

use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use hotelsite_core::error::AppError;
use hotelsite_core::types::RoomId;
use hotelsite_database::{AvailabilityStore, CatalogStore};
use hotelsite_entity::availability::{Availability, AvailabilityPatch};
use hotelsite_entity::room::Room;

/// One day of a room's calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// Calendar date.
    pub date: NaiveDate,
    /// Whether the room can be booked on this date.
    pub is_available: bool,
    /// Effective nightly price: the override if set, the room price otherwise.
    pub price: Decimal,
    /// Override stored for this date, if any.
    pub price_override: Option<Decimal>,
    /// Minimum nights for stays starting on this date.
    pub min_stay: i32,
}

impl CalendarDay {
    fn resolve(date: NaiveDate, room: &Room, row: Option<&Availability>) -> Self {
        match row {
            Some(row) => Self {
                date,
                is_available: row.is_available,
                price: row.price_override.unwrap_or(room.price),
                price_override: row.price_override,
                min_stay: row.min_stay,
            },
            None => Self {
                date,
                is_available: true,
                price: room.price,
                price_override: None,
                min_stay: 1,
            },
        }
    }
}

/// A room's calendar for one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthCalendar {
    /// Room the calendar belongs to.
    pub room_id: RoomId,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Every day of the month in order.
    pub days: Vec<CalendarDay>,
}

/// Reads and edits per-date availability of rooms.
#[derive(Clone)]
pub struct AvailabilityService {
    catalog: Arc<dyn CatalogStore>,
    availability: Arc<dyn AvailabilityStore>,
}

impl AvailabilityService {
    /// Creates a new availability service.
    pub fn new(catalog: Arc<dyn CatalogStore>, availability: Arc<dyn AvailabilityStore>) -> Self {
        Self {
            catalog,
            availability,
        }
    }

    /// The calendar of `room_id` for `month` of `year`, with overrides
    /// merged over the room defaults.
    pub async fn month_calendar(
        &self,
        room_id: RoomId,
        year: i32,
        month: u32,
    ) -> Result<MonthCalendar, AppError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::validation("Invalid calendar month"))?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| AppError::validation("Invalid calendar month"))?;
        let room = self.room(room_id).await?;

        let rows = self
            .availability
            .list_availability(room_id, first, last)
            .await?;

        let days = first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| {
                let row = rows.iter().find(|row| row.date == date);
                CalendarDay::resolve(date, &room, row)
            })
            .collect();

        Ok(MonthCalendar {
            room_id,
            year: first.year(),
            month: first.month(),
            days,
        })
    }

    /// Flip availability of a date. A date without an override becomes
    /// blocked.
    pub async fn toggle(&self, room_id: RoomId, date: NaiveDate) -> Result<CalendarDay, AppError> {
        let room = self.room(room_id).await?;
        let current = self.availability.find_availability(room_id, date).await?;
        let is_available = current.as_ref().is_some_and(|row| !row.is_available);

        let patch = AvailabilityPatch {
            is_available: Some(is_available),
            ..Default::default()
        };
        let row = self
            .availability
            .upsert_availability(room_id, date, &patch)
            .await?;

        info!(room_id = %room_id, %date, is_available, "Availability toggled");
        Ok(CalendarDay::resolve(date, &room, Some(&row)))
    }

    /// Set or clear the nightly price override of a date.
    pub async fn set_price_override(
        &self,
        room_id: RoomId,
        date: NaiveDate,
        price: Option<Decimal>,
    ) -> Result<CalendarDay, AppError> {
        self.update(
            room_id,
            date,
            AvailabilityPatch {
                price_override: Some(price),
                ..Default::default()
            },
        )
        .await
    }

    /// Apply an arbitrary patch to a date.
    pub async fn update(
        &self,
        room_id: RoomId,
        date: NaiveDate,
        patch: AvailabilityPatch,
    ) -> Result<CalendarDay, AppError> {
        if patch
            .price_override
            .flatten()
            .is_some_and(|price| price.is_sign_negative())
        {
            return Err(AppError::validation("Price override cannot be negative"));
        }
        if patch.min_stay.is_some_and(|nights| nights < 1) {
            return Err(AppError::validation("Minimum stay must be at least one night"));
        }

        let room = self.room(room_id).await?;
        let row = self
            .availability
            .upsert_availability(room_id, date, &patch)
            .await?;

        info!(room_id = %room_id, %date, "Availability updated");
        Ok(CalendarDay::resolve(date, &room, Some(&row)))
    }

    async fn room(&self, room_id: RoomId) -> Result<Room, AppError> {
        self.catalog
            .find_room(room_id)
            .await?
            .ok_or_else(|| AppError::not_found("Room not found"))
    }
}
