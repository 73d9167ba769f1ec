//! HTTP integration tests. Every test drives the full router against a
//! fresh in-memory store.

mod helpers;

mod analytics_test;
mod availability_test;
mod booking_test;
mod catalog_test;
mod promo_test;
