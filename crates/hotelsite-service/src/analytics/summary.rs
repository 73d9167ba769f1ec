//! Pure aggregation of a period's bookings into an [`AnalyticsReport`].

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hotelsite_core::types::RoomId;
use hotelsite_entity::booking::{Booking, BookingSource};
use hotelsite_entity::room::Room;

/// Rooms listed in [`AnalyticsReport::top_rooms`].
pub const TOP_ROOMS: usize = 5;

/// Revenue of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    /// Abbreviated month name, e.g. `"Jan"`.
    pub month: String,
    /// Revenue of bookings created that month.
    pub revenue: Decimal,
}

/// Number of bookings from one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCount {
    /// Booking channel.
    pub source: BookingSource,
    /// Bookings from that channel.
    pub count: u64,
}

/// Bookings and revenue of one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPerformance {
    /// Room.
    pub room_id: RoomId,
    /// Room title.
    pub title: String,
    /// Bookings of the room.
    pub bookings: u64,
    /// Revenue of those bookings.
    pub revenue: Decimal,
}

/// Figures for one period compared with the period before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Sum of `total_amount`.
    pub total_revenue: Decimal,
    /// Number of bookings.
    pub total_bookings: u64,
    /// Mean booking value, zero without bookings.
    pub avg_booking_value: Decimal,
    /// Distinct booked rooms over total rooms, in percent.
    pub occupancy_rate: Decimal,
    /// Revenue change against the previous period, in percent.
    pub revenue_growth: Decimal,
    /// Booking count change against the previous period, in percent.
    pub bookings_growth: Decimal,
    /// Revenue per month in order of first booking.
    pub revenue_by_month: Vec<MonthlyRevenue>,
    /// Bookings per source in order of first booking.
    pub bookings_by_source: Vec<SourceCount>,
    /// Best rooms by revenue.
    pub top_rooms: Vec<RoomPerformance>,
}

/// Aggregate `current` against `previous`. Cancelled bookings in either
/// slice are ignored; `rooms` is every room of the hotel.
pub fn summarize(current: &[Booking], previous: &[Booking], rooms: &[Room]) -> AnalyticsReport {
    let current: Vec<&Booking> = current.iter().filter(|b| b.status.is_billable()).collect();
    let previous: Vec<&Booking> = previous.iter().filter(|b| b.status.is_billable()).collect();

    let total_revenue = revenue(&current);
    let total_bookings = current.len() as u64;
    let avg_booking_value = if total_bookings > 0 {
        (total_revenue / Decimal::from(total_bookings)).round_dp(2)
    } else {
        Decimal::ZERO
    };

    let booked_rooms: HashSet<RoomId> = current.iter().filter_map(|b| b.room_id).collect();
    let total_rooms = rooms.len().max(1);
    let occupancy_rate = (Decimal::from(booked_rooms.len() as u64) * Decimal::ONE_HUNDRED
        / Decimal::from(total_rooms as u64))
    .round_dp(2);

    AnalyticsReport {
        total_revenue,
        total_bookings,
        avg_booking_value,
        occupancy_rate,
        revenue_growth: growth(total_revenue, revenue(&previous)),
        bookings_growth: growth(
            Decimal::from(total_bookings),
            Decimal::from(previous.len() as u64),
        ),
        revenue_by_month: revenue_by_month(&current),
        bookings_by_source: bookings_by_source(&current),
        top_rooms: top_rooms(&current, rooms),
    }
}

fn revenue(bookings: &[&Booking]) -> Decimal {
    bookings.iter().map(|b| b.total_amount).sum()
}

fn growth(current: Decimal, previous: Decimal) -> Decimal {
    if previous > Decimal::ZERO {
        ((current - previous) / previous * Decimal::ONE_HUNDRED).round_dp(2)
    } else {
        Decimal::ZERO
    }
}

fn revenue_by_month(bookings: &[&Booking]) -> Vec<MonthlyRevenue> {
    let mut months: Vec<MonthlyRevenue> = Vec::new();
    for booking in bookings {
        let label = booking.created_at.format("%b").to_string();
        match months.iter_mut().find(|m| m.month == label) {
            Some(entry) => entry.revenue += booking.total_amount,
            None => months.push(MonthlyRevenue {
                month: label,
                revenue: booking.total_amount,
            }),
        }
    }
    months
}

fn bookings_by_source(bookings: &[&Booking]) -> Vec<SourceCount> {
    let mut sources: Vec<SourceCount> = Vec::new();
    for booking in bookings {
        match sources.iter_mut().find(|s| s.source == booking.booking_source) {
            Some(entry) => entry.count += 1,
            None => sources.push(SourceCount {
                source: booking.booking_source,
                count: 1,
            }),
        }
    }
    sources
}

fn top_rooms(bookings: &[&Booking], rooms: &[Room]) -> Vec<RoomPerformance> {
    let mut stats: Vec<RoomPerformance> = Vec::new();
    for booking in bookings {
        let Some(room) = booking
            .room_id
            .and_then(|id| rooms.iter().find(|room| room.id == id))
        else {
            continue;
        };
        match stats.iter_mut().find(|s| s.room_id == room.id) {
            Some(entry) => {
                entry.bookings += 1;
                entry.revenue += booking.total_amount;
            }
            None => stats.push(RoomPerformance {
                room_id: room.id,
                title: room.title.clone(),
                bookings: 1,
                revenue: booking.total_amount,
            }),
        }
    }
    stats.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    stats.truncate(TOP_ROOMS);
    stats
}
