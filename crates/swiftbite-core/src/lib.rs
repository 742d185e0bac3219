//! # swiftbite-core: Pure Business Logic for SwiftBite
//!
//! Everything a delivery client needs to price a cart, place an order, and
//! estimate a delivery, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Frontend (mobile app)                                           │
//! │    Browse ──► Cart ──► Checkout ──► Order Tracking               │
//! └───────────────────────────┬──────────────────────────────────────┘
//!                             │
//! ┌───────────────────────────▼──────────────────────────────────────┐
//! │  swiftbite-session: per-session carts, order book                │
//! └───────────────────────────┬──────────────────────────────────────┘
//!                             │
//! ┌───────────────────────────▼──────────────────────────────────────┐
//! │            ★ swiftbite-core (THIS CRATE) ★                       │
//! │                                                                  │
//! │   ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ ┌────────────┐     │
//! │   │ money  │ │  cart  │ │ types  │ │  geo   │ │ validation │     │
//! │   │ Money  │ │  Cart  │ │ Order  │ │GeoPoint│ │   rules    │     │
//! │   │TaxRate │ │CartItem│ │ Status │ │  ETA   │ │   checks   │     │
//! │   └────────┘ └────────┘ └────────┘ └────────┘ └────────────┘     │
//! │                                                                  │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS             │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - same input = same output
//! 2. **No I/O**: the document store, identity provider, and geolocation
//!    device are external collaborators reached only through plain data
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: typed errors, never strings or panics

pub mod cart;
pub mod error;
pub mod geo;
pub mod money;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartItem, CartSnapshot, SelectedOption};
pub use error::{CoreError, CoreResult, ValidationError};
pub use geo::{estimate_travel_time_minutes, haversine_distance_km, GeoPoint, TravelMode};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat sales tax applied to every cart subtotal, in basis points (800 = 8%).
///
/// A single hardcoded rate is a deliberate v0.1 simplification; per-region
/// rates belong to a later catalog/config layer.
pub const SALES_TAX_BPS: u32 = 800;

/// Maximum number of distinct line items allowed in a single cart.
///
/// Prevents runaway carts; can be made configurable per business later.
pub const MAX_CART_ITEMS: usize = 50;

/// Maximum quantity of a single line item.
///
/// Prevents accidental over-ordering (e.g. typing 100 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Minutes added to the placement time to produce the delivery estimate.
///
/// A flat offset until a real dispatch/routing provider supplies one.
pub const ESTIMATED_DELIVERY_MINUTES: i64 = 30;
