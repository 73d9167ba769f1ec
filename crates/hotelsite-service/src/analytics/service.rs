//! Analytics over a hotel's recent bookings.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use hotelsite_core::error::AppError;
use hotelsite_core::types::HotelId;
use hotelsite_database::{BookingStore, CatalogStore, HotelStore};

use super::summary::{AnalyticsReport, summarize};

/// Length of the reporting window, counted back from now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsPeriod {
    /// The last seven days.
    Week,
    /// The last calendar month.
    #[default]
    Month,
    /// The last twelve months.
    Year,
}

impl AnalyticsPeriod {
    /// Start of the window that ends at `end`.
    pub fn start_before(&self, end: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
        let start = match self {
            Self::Week => end.checked_sub_signed(Duration::days(7)),
            Self::Month => end.checked_sub_months(Months::new(1)),
            Self::Year => end.checked_sub_months(Months::new(12)),
        };
        start.ok_or_else(|| AppError::validation("Analytics period out of range"))
    }

    /// Return the period as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for AnalyticsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyticsPeriod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(AppError::validation(format!(
                "Unknown analytics period: {other}"
            ))),
        }
    }
}

/// Builds analytics reports for a hotel.
#[derive(Clone)]
pub struct AnalyticsService {
    hotels: Arc<dyn HotelStore>,
    catalog: Arc<dyn CatalogStore>,
    bookings: Arc<dyn BookingStore>,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(
        hotels: Arc<dyn HotelStore>,
        catalog: Arc<dyn CatalogStore>,
        bookings: Arc<dyn BookingStore>,
    ) -> Self {
        Self {
            hotels,
            catalog,
            bookings,
        }
    }

    /// Report for `period` ending at `now`, compared with the equally long
    /// period before it.
    pub async fn report(
        &self,
        hotel_id: HotelId,
        period: AnalyticsPeriod,
        now: DateTime<Utc>,
    ) -> Result<AnalyticsReport, AppError> {
        self.hotels
            .find_hotel(hotel_id)
            .await?
            .ok_or_else(|| AppError::not_found("Hotel not found"))?;

        let start = period.start_before(now)?;
        let previous_start = period.start_before(start)?;

        let (current, previous, rooms) = tokio::try_join!(
            self.bookings
                .list_bookings_created_between(hotel_id, start, now),
            self.bookings
                .list_bookings_created_between(hotel_id, previous_start, start),
            self.catalog.list_rooms(hotel_id),
        )?;

        debug!(
            hotel_id = %hotel_id,
            %period,
            current = current.len(),
            previous = previous.len(),
            "Summarizing bookings"
        );
        Ok(summarize(&current, &previous, &rooms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hotelsite_core::error::ErrorKind;
    use hotelsite_entity::booking::BookingStatus;
    use rust_decimal_macros::dec;

    use crate::booking::{BookingDraft, DraftEdit, GuestDetails};
    use crate::fixtures::{booking_service, seeded};

    #[test]
    fn test_period_starts() {
        let end = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        assert_eq!(
            AnalyticsPeriod::Week.start_before(end).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 24, 12, 0, 0).unwrap()
        );
        assert_eq!(
            AnalyticsPeriod::Month.start_before(end).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
        );
        assert_eq!(
            AnalyticsPeriod::Year.start_before(end).unwrap(),
            Utc.with_ymd_and_hms(2023, 3, 31, 12, 0, 0).unwrap()
        );
        assert!("quarter".parse::<AnalyticsPeriod>().is_err());
    }

    #[tokio::test]
    async fn test_report_over_submitted_bookings() {
        let seed = seeded();
        let bookings = booking_service(&seed.stores);
        let draft = BookingDraft::default().apply_all([
            DraftEdit::SelectRoom {
                room_id: seed.room.id,
            },
            DraftEdit::SetDates {
                check_in: chrono::NaiveDate::from_ymd_opt(2025, 5, 1),
                check_out: chrono::NaiveDate::from_ymd_opt(2025, 5, 3),
            },
            DraftEdit::SetGuest {
                guest: GuestDetails {
                    name: "Kabir Shah".to_string(),
                    email: "kabir@example.com".to_string(),
                    phone: "+91 90000 11111".to_string(),
                },
            },
        ]);
        let created_at = Utc::now() - Duration::days(1);
        bookings.submit(seed.hotel.id, &draft, created_at).await.unwrap();
        let cancelled = bookings
            .submit(seed.hotel.id, &draft, created_at)
            .await
            .unwrap()
            .booking;
        bookings
            .update_status(cancelled.id, BookingStatus::Cancelled, None, created_at)
            .await
            .unwrap();

        let service = AnalyticsService::new(
            seed.stores.hotels.clone(),
            seed.stores.catalog.clone(),
            seed.stores.bookings.clone(),
        );
        let report = service
            .report(seed.hotel.id, AnalyticsPeriod::Week, Utc::now())
            .await
            .unwrap();

        assert_eq!(report.total_bookings, 1);
        assert_eq!(report.total_revenue, dec!(4000));
        assert_eq!(report.occupancy_rate, dec!(100));
        assert_eq!(report.top_rooms.len(), 1);
    }

    #[tokio::test]
    async fn test_report_for_unknown_hotel() {
        let seed = seeded();
        let service = AnalyticsService::new(
            seed.stores.hotels.clone(),
            seed.stores.catalog.clone(),
            seed.stores.bookings.clone(),
        );
        let err = service
            .report(HotelId::new(), AnalyticsPeriod::Month, Utc::now())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }
}
