// crates/user-directory-core/src/user.rs
// ============================================================================
// Module: User Records
// Description: Typed view of directory user records.
// Purpose: Decode user payloads and filter them by address locality.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`User`] is created server-side and is read-only from the client's
//! perspective. Only the identity fields are mandatory when decoding; address
//! parts and contact details are optional so partially populated records still
//! decode and simply fail to match locality filters.
//! Unknown fields are ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Record Types
// ============================================================================

/// Directory user record.
///
/// # Invariants
/// - `id` is assigned by the remote service and unique within a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Service-assigned identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Login handle.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Postal address, when the service returned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Personal website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Employer details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

impl User {
    /// Returns the address city, if both the address and city are present.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.address.as_ref().and_then(|address| address.city.as_deref())
    }

    /// Returns true when the user's city equals `city` exactly.
    ///
    /// Matching is case-sensitive with no trimming; a missing address or city
    /// never matches.
    #[must_use]
    pub fn lives_in(&self, city: &str) -> bool {
        self.city() == Some(city)
    }
}

/// Postal address attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    /// Street name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// Suite or apartment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    /// City or locality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    /// Coordinates, as strings on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

/// Geographic coordinates of an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    /// Latitude.
    pub lat: String,
    /// Longitude.
    pub lng: String,
}

/// Employer details for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company name.
    pub name: String,
    /// Marketing tagline.
    #[serde(rename = "catchPhrase", default, skip_serializing_if = "Option::is_none")]
    pub catch_phrase: Option<String>,
    /// Business summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bs: Option<String>,
}

// ============================================================================
// SECTION: Filters
// ============================================================================

/// Keeps only users whose `address.city` equals `city` exactly.
///
/// Order of the input listing is preserved.
#[must_use]
pub fn filter_by_city(users: Vec<User>, city: &str) -> Vec<User> {
    users.into_iter().filter(|user| user.lives_in(city)).collect()
}
