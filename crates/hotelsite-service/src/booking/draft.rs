//! The booking form as an immutable value.
//!
//! Every form interaction is a [`DraftEdit`] applied with
//! [`BookingDraft::apply`], which returns the next draft. The quote is
//! derived from a draft on demand and never stored on it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use hotelsite_core::error::AppError;
use hotelsite_core::types::{AddonId, PackageId, RoomId};
use hotelsite_entity::catalog::{Addon, Package};
use hotelsite_entity::promo::{PromoCode, normalize_code};
use hotelsite_entity::room::Room;

use crate::pricing::{PricingRules, Quote, QuoteInput, calculate_quote};

/// Message for a submission missing guest details, room or dates.
pub const REQUIRED_FIELDS: &str = "Please fill all required fields";

/// Most rooms one booking may hold.
pub const MAX_ROOMS: u32 = 50;

/// Most adults plus children one booking may hold.
pub const MAX_GUESTS: u32 = 200;

/// Longest stay, in nights.
pub const MAX_NIGHTS: i64 = 365;

/// Largest quantity of a single add-on.
pub const MAX_ADDON_QUANTITY: u32 = 100;

/// Lead guest contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestDetails {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
}

/// Free-form room preferences, stored as JSON on the booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomPreferences {
    /// Preferred floor.
    pub floor: String,
    /// Preferred bed type.
    pub bed_type: String,
    /// Preferred view.
    pub view: String,
}

/// A companion listed on the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalGuest {
    /// Full name.
    pub name: String,
    /// Age in years.
    #[serde(default)]
    pub age: Option<i32>,
}

/// State of the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingDraft {
    /// Room being booked.
    pub room_id: Option<RoomId>,
    /// Arrival date.
    pub check_in: Option<NaiveDate>,
    /// Departure date.
    pub check_out: Option<NaiveDate>,
    /// Rooms requested.
    pub num_rooms: u32,
    /// Adults.
    pub num_adults: u32,
    /// Children.
    pub num_children: u32,
    /// Lead guest.
    pub guest: GuestDetails,
    /// Early check-in requested.
    pub early_checkin: bool,
    /// Late check-out requested.
    pub late_checkout: bool,
    /// Room preferences.
    pub room_preferences: RoomPreferences,
    /// Free-text requests.
    pub special_requests: String,
    /// Promo code as typed, upper-cased.
    pub promo_code: String,
    /// Requested quantity per add-on.
    pub addon_selections: BTreeMap<AddonId, u32>,
    /// Selected package.
    pub selected_package_id: Option<PackageId>,
    /// Companions.
    pub additional_guests: Vec<AdditionalGuest>,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            room_id: None,
            check_in: None,
            check_out: None,
            num_rooms: 1,
            num_adults: 1,
            num_children: 0,
            guest: GuestDetails::default(),
            early_checkin: false,
            late_checkout: false,
            room_preferences: RoomPreferences::default(),
            special_requests: String::new(),
            promo_code: String::new(),
            addon_selections: BTreeMap::new(),
            selected_package_id: None,
            additional_guests: Vec::new(),
        }
    }
}

/// One form interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftEdit {
    /// Pick the room.
    SelectRoom { room_id: RoomId },
    /// Set or clear the stay dates.
    SetDates {
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    },
    /// Set the number of rooms.
    SetRoomCount { rooms: u32 },
    /// Set adults and children.
    SetOccupancy { adults: u32, children: u32 },
    /// Replace the lead guest details.
    SetGuest { guest: GuestDetails },
    /// Toggle early check-in.
    SetEarlyCheckin { enabled: bool },
    /// Toggle late check-out.
    SetLateCheckout { enabled: bool },
    /// Replace the room preferences.
    SetPreferences { preferences: RoomPreferences },
    /// Replace the special requests.
    SetSpecialRequests { text: String },
    /// Type a promo code.
    SetPromoCode { code: String },
    /// Set the quantity of an add-on; zero removes it.
    SetAddonQuantity { addon_id: AddonId, quantity: u32 },
    /// Select or clear the package.
    SelectPackage { package_id: Option<PackageId> },
    /// Append a companion.
    AddGuest { guest: AdditionalGuest },
    /// Remove the companion at `index`; out-of-range indexes are ignored.
    RemoveGuest { index: usize },
}

/// The parts of a draft that a submission cannot do without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaySelection {
    /// Room.
    pub room_id: RoomId,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
}

impl BookingDraft {
    /// Apply one edit and return the resulting draft.
    pub fn apply(mut self, edit: DraftEdit) -> Self {
        match edit {
            DraftEdit::SelectRoom { room_id } => self.room_id = Some(room_id),
            DraftEdit::SetDates {
                check_in,
                check_out,
            } => {
                self.check_in = check_in;
                self.check_out = check_out;
            }
            DraftEdit::SetRoomCount { rooms } => self.num_rooms = rooms,
            DraftEdit::SetOccupancy { adults, children } => {
                self.num_adults = adults;
                self.num_children = children;
            }
            DraftEdit::SetGuest { guest } => self.guest = guest,
            DraftEdit::SetEarlyCheckin { enabled } => self.early_checkin = enabled,
            DraftEdit::SetLateCheckout { enabled } => self.late_checkout = enabled,
            DraftEdit::SetPreferences { preferences } => self.room_preferences = preferences,
            DraftEdit::SetSpecialRequests { text } => self.special_requests = text,
            DraftEdit::SetPromoCode { code } => self.promo_code = normalize_code(&code),
            DraftEdit::SetAddonQuantity { addon_id, quantity } => {
                if quantity == 0 {
                    self.addon_selections.remove(&addon_id);
                } else {
                    self.addon_selections.insert(addon_id, quantity);
                }
            }
            DraftEdit::SelectPackage { package_id } => self.selected_package_id = package_id,
            DraftEdit::AddGuest { guest } => self.additional_guests.push(guest),
            DraftEdit::RemoveGuest { index } => {
                if index < self.additional_guests.len() {
                    self.additional_guests.remove(index);
                }
            }
        }
        self
    }

    /// Apply a sequence of edits in order.
    pub fn apply_all(self, edits: impl IntoIterator<Item = DraftEdit>) -> Self {
        edits.into_iter().fold(self, Self::apply)
    }

    /// Whether a promo code has been typed.
    pub fn has_promo_code(&self) -> bool {
        !self.promo_code.trim().is_empty()
    }

    /// Quote of this draft for `room`, resolving selections against the
    /// given catalog. `promo` must already have passed eligibility.
    pub fn quote(
        &self,
        room: &Room,
        addons: &[Addon],
        packages: &[Package],
        promo: Option<&PromoCode>,
        rules: &PricingRules,
    ) -> Quote {
        let input = QuoteInput {
            check_in: self.check_in,
            check_out: self.check_out,
            room_rate: room.price,
            room_count: self.num_rooms,
            early_checkin: self.early_checkin,
            late_checkout: self.late_checkout,
            addon_selections: &self.addon_selections,
            selected_package_id: self.selected_package_id,
            promo_code: promo,
            addons,
            packages,
        };
        calculate_quote(&input, rules)
    }

    /// Reject counts and stay lengths no real booking reaches, so pricing
    /// and the stored guest count stay within range.
    pub fn check_limits(&self) -> Result<(), AppError> {
        if self.num_rooms > MAX_ROOMS {
            return Err(AppError::validation(format!(
                "At most {MAX_ROOMS} rooms can be booked at once"
            )));
        }
        let guests = u64::from(self.num_adults) + u64::from(self.num_children);
        if guests > u64::from(MAX_GUESTS) {
            return Err(AppError::validation(format!(
                "At most {MAX_GUESTS} guests can be booked at once"
            )));
        }
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if (check_out - check_in).num_days() > MAX_NIGHTS {
                return Err(AppError::validation(format!(
                    "Stays are limited to {MAX_NIGHTS} nights"
                )));
            }
        }
        if self
            .addon_selections
            .values()
            .any(|quantity| *quantity > MAX_ADDON_QUANTITY)
        {
            return Err(AppError::validation(format!(
                "At most {MAX_ADDON_QUANTITY} of each add-on can be booked"
            )));
        }
        Ok(())
    }

    /// Check everything a submission requires, before any lookup or write.
    pub fn validate_for_submission(&self) -> Result<StaySelection, AppError> {
        let guest = &self.guest;
        let (Some(room_id), Some(check_in), Some(check_out)) =
            (self.room_id, self.check_in, self.check_out)
        else {
            return Err(AppError::validation(REQUIRED_FIELDS));
        };
        if [&guest.name, &guest.email, &guest.phone]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(AppError::validation(REQUIRED_FIELDS));
        }
        if !guest.email.trim().validate_email() {
            return Err(AppError::validation("Please enter a valid email address"));
        }
        if check_out <= check_in {
            return Err(AppError::validation("Check-out must be after check-in"));
        }
        if self.num_rooms < 1 {
            return Err(AppError::validation("At least one room is required"));
        }
        if self.num_adults < 1 {
            return Err(AppError::validation("At least one adult is required"));
        }
        if self
            .additional_guests
            .iter()
            .any(|g| g.name.trim().is_empty())
        {
            return Err(AppError::validation("Every additional guest needs a name"));
        }
        self.check_limits()?;

        Ok(StaySelection {
            room_id,
            check_in,
            check_out,
        })
    }
}
