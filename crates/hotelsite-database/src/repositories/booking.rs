//! Booking repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use hotelsite_core::error::{AppError, ErrorKind};
use hotelsite_core::result::AppResult;
use hotelsite_core::types::{BookingId, HotelId, PageRequest, PageResponse, PromoCodeId};
use hotelsite_entity::Validated;
use hotelsite_entity::booking::{
    Booking, BookingAddon, BookingGuest, BookingPackage, BookingStatus, CreateBooking, GuestType,
};

use super::{validated_all, write_error};
use crate::store::{BookingStore, PROMO_NOT_REDEEMABLE};

/// Repository for bookings and their attached lines.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Conditionally increment a promo code's usage inside `tx`.
    async fn redeem_promo_code(
        tx: &mut Transaction<'_, Postgres>,
        id: PromoCodeId,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE promo_codes SET used_count = used_count + 1 \
             WHERE id = $1 AND is_active = TRUE AND valid_from <= $2 AND valid_to >= $2 \
             AND (usage_limit IS NULL OR used_count < usage_limit)",
        )
        .bind(id)
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to redeem promo code", e))?;

        if result.rows_affected() == 0 {
            debug!(promo_code_id = %id, "Promo code redemption guard rejected the update");
            return Err(AppError::conflict(PROMO_NOT_REDEEMABLE));
        }
        Ok(())
    }

    /// Insert the add-on, package and guest lines of a new booking.
    async fn insert_lines(
        tx: &mut Transaction<'_, Postgres>,
        booking_id: BookingId,
        data: &CreateBooking,
    ) -> AppResult<()> {
        for addon in &data.addons {
            sqlx::query(
                "INSERT INTO booking_addons (id, booking_id, addon_id, quantity, price) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(Uuid::now_v7())
            .bind(booking_id)
            .bind(addon.addon_id)
            .bind(addon.quantity)
            .bind(addon.price)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert booking add-on", e)
            })?;
        }

        if let Some(package) = &data.package {
            sqlx::query(
                "INSERT INTO booking_packages (id, booking_id, package_id, quantity, price) \
                 VALUES ($1, $2, $3, 1, $4)",
            )
            .bind(Uuid::now_v7())
            .bind(booking_id)
            .bind(package.package_id)
            .bind(package.price)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert booking package", e)
            })?;
        }

        for guest in &data.guests {
            sqlx::query(
                "INSERT INTO booking_guests (id, booking_id, guest_type, name, age) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(Uuid::now_v7())
            .bind(booking_id)
            .bind(GuestType::Additional)
            .bind(&guest.name)
            .bind(guest.age)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert booking guest", e)
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn create_booking(
        &self,
        data: &CreateBooking,
        now: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to start transaction", e)
        })?;

        if let Some(promo_code_id) = data.promo_code_id {
            Self::redeem_promo_code(&mut tx, promo_code_id, now).await?;
        }

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, booking_reference, hotel_id, room_id, guest_name, \
             guest_email, guest_phone, check_in, check_out, num_guests, num_rooms, num_adults, \
             num_children, total_amount, discount_amount, promo_code, payment_status, status, \
             special_requests, early_checkin, late_checkout, room_preferences, booking_source, \
             created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20, $21, $22, $23, $24, $24) RETURNING *",
        )
        .bind(BookingId::new())
        .bind(&data.booking_reference)
        .bind(data.hotel_id)
        .bind(data.room_id)
        .bind(&data.guest_name)
        .bind(&data.guest_email)
        .bind(&data.guest_phone)
        .bind(data.check_in)
        .bind(data.check_out)
        .bind(data.num_guests())
        .bind(data.num_rooms)
        .bind(data.num_adults)
        .bind(data.num_children)
        .bind(data.total_amount)
        .bind(data.discount_amount)
        .bind(&data.promo_code)
        .bind(data.payment_status)
        .bind(data.status)
        .bind(&data.special_requests)
        .bind(data.early_checkin)
        .bind(data.late_checkout)
        .bind(&data.room_preferences)
        .bind(data.booking_source)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error(e, "create booking", "Booking reference already exists"))?;

        // Dropping `tx` on error rolls back the promo redemption too.
        let booking = booking.validated()?;
        Self::insert_lines(&mut tx, booking.id, data).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking", e)
        })?;

        Ok(booking)
    }

    async fn find_booking(&self, id: BookingId) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))?
            .map(Validated::validated)
            .transpose()
    }

    async fn list_bookings(
        &self,
        hotel_id: HotelId,
        status: Option<BookingStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE hotel_id = $1 \
             AND ($2::booking_status IS NULL OR status = $2)",
        )
        .bind(hotel_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;

        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE hotel_id = $1 \
             AND ($2::booking_status IS NULL OR status = $2) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(hotel_id)
        .bind(status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))?;

        Ok(PageResponse::new(
            validated_all(bookings)?,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn list_bookings_created_between(
        &self,
        hotel_id: HotelId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE hotel_id = $1 AND created_at >= $2 AND created_at < $3 \
             ORDER BY created_at ASC",
        )
        .bind(hotel_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list bookings in range", e)
        })?;
        validated_all(bookings)
    }

    async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
        cancellation_reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Booking>> {
        let cancelled = status == BookingStatus::Cancelled;
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2, updated_at = $3, \
             cancelled_at = CASE WHEN $4 THEN $3 ELSE cancelled_at END, \
             cancellation_reason = CASE WHEN $4 THEN $5 ELSE cancellation_reason END \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .bind(cancelled)
        .bind(cancellation_reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update booking status", e)
        })?
        .map(Validated::validated)
        .transpose()
    }

    async fn list_booking_addons(&self, booking_id: BookingId) -> AppResult<Vec<BookingAddon>> {
        let addons = sqlx::query_as::<_, BookingAddon>(
            "SELECT * FROM booking_addons WHERE booking_id = $1 ORDER BY created_at ASC",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list booking add-ons", e)
        })?;
        validated_all(addons)
    }

    async fn find_booking_package(
        &self,
        booking_id: BookingId,
    ) -> AppResult<Option<BookingPackage>> {
        sqlx::query_as::<_, BookingPackage>(
            "SELECT * FROM booking_packages WHERE booking_id = $1 LIMIT 1",
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find booking package", e)
        })?
        .map(Validated::validated)
        .transpose()
    }

    async fn list_booking_guests(&self, booking_id: BookingId) -> AppResult<Vec<BookingGuest>> {
        let guests = sqlx::query_as::<_, BookingGuest>(
            "SELECT * FROM booking_guests WHERE booking_id = $1 ORDER BY created_at ASC",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list booking guests", e)
        })?;
        validated_all(guests)
    }
}
