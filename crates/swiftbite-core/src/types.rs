//! # Domain Types
//!
//! Core domain types for the SwiftBite delivery client.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                             │
//! │                                                                 │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐      │
//! │  │   MenuItem    │   │     Order     │   │  StatusEntry  │      │
//! │  │ ───────────── │   │ ───────────── │   │ ───────────── │      │
//! │  │ id            │   │ id (UUID)     │   │ status        │      │
//! │  │ business_id   │   │ status        │   │ timestamp     │      │
//! │  │ name, price   │   │ totals        │   │ notes?        │      │
//! │  └───────────────┘   └───────────────┘   └───────────────┘      │
//! │                                                                 │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐      │
//! │  │  OrderStatus  │   │ PaymentMethod │   │    Address    │      │
//! │  │ ───────────── │   │ ───────────── │   │ ───────────── │      │
//! │  │ Placed        │   │ Credit        │   │ street, city  │      │
//! │  │ Preparing     │   │ Paypal        │   │ state, zip    │      │
//! │  │ OutForDelivery│   │ Cash          │   │ location?     │      │
//! │  │ Delivered     │   └───────────────┘   └───────────────┘      │
//! │  │ Cancelled     │                                              │
//! │  └───────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Status and payment method are closed enums on purpose: unrecognized
//! strings are rejected at the boundary instead of being stored silently.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartItem};
use crate::error::CoreError;
use crate::geo::GeoPoint;
use crate::money::Money;
use crate::ESTIMATED_DELIVERY_MINUTES;

// =============================================================================
// Menu Item
// =============================================================================

/// An orderable entry in a business's catalog.
///
/// Catalog storage and retrieval live outside this crate; a `MenuItem` is the
/// plain-data shape handed in when the user adds something to the cart. The
/// business identity rides along because a cart is bound to exactly one
/// business at a time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    /// Identifier of the product within its business's catalog.
    pub id: String,

    /// Business this item belongs to.
    pub business_id: String,

    /// Display name of the business (frozen onto the cart when added).
    pub business_name: String,

    /// Display name shown in the cart and on the receipt.
    pub name: String,

    /// Optional description for the item detail view.
    pub description: Option<String>,

    /// Base price; selected-option add-ons are carried separately.
    pub price: Money,
}

// =============================================================================
// Address
// =============================================================================

/// A delivery address, optionally pinned to map coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Address {
    pub street: String,
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,

    /// Standing instructions saved with the address ("ring bell twice").
    pub instructions: Option<String>,

    /// Map-picked coordinates, when the user placed a pin.
    pub location: Option<GeoPoint>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays at checkout.
///
/// Payment *processing* is out of scope; this is a tag copied onto the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Credit,
    Paypal,
    Cash,
}

impl PaymentMethod {
    /// Stable string form, matching the serialized representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Credit => "credit",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit" => Ok(PaymentMethod::Credit),
            "paypal" => Ok(PaymentMethod::Paypal),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(CoreError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle state of a placed order.
///
/// Serialized kebab-case (`out-for-delivery`) to match the wire shape the
/// frontend and document store already use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Order received, not yet acknowledged by the business.
    Placed,
    /// The business is preparing the order.
    Preparing,
    /// A driver has the order.
    OutForDelivery,
    /// Order arrived. Terminal in intent.
    Delivered,
    /// Order was cancelled. Terminal in intent.
    Cancelled,
}

impl OrderStatus {
    /// Stable string form, matching the serialized representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the status ends the lifecycle.
    ///
    /// Used for grouping order lists into active and past. Transitions *out*
    /// of a terminal status are not blocked anywhere: any status may be set
    /// from any status, so an operator can correct a mis-tap.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Placed
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placed" => Ok(OrderStatus::Placed),
            "preparing" => Ok(OrderStatus::Preparing),
            "out-for-delivery" => Ok(OrderStatus::OutForDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Status History
// =============================================================================

/// One entry in an order's append-only status trail.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusEntry {
    pub status: OrderStatus,

    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,

    /// Free-form annotation ("left at door", "kitchen backed up").
    pub notes: Option<String>,
}

// =============================================================================
// Order
// =============================================================================

/// A checked-out cart, frozen at placement time.
///
/// Uses the snapshot pattern: every figure is copied from the cart when the
/// order is created, so later catalog or cart changes cannot rewrite a placed
/// order. Only `status` and `status_history` mutate afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Unique identifier (UUID v4), assigned at creation.
    pub id: String,

    pub business_id: String,
    pub business_name: String,

    /// Line items at placement time (frozen).
    pub items: Vec<CartItem>,

    pub subtotal: Money,
    pub tax: Money,
    pub delivery_fee: Money,
    pub discount: Money,
    pub total: Money,

    /// Coupon code behind `discount`, if one was applied.
    pub coupon_code: Option<String>,

    pub payment_method: PaymentMethod,

    pub delivery_address: Option<Address>,
    pub delivery_instructions: Option<String>,

    /// Current lifecycle state; the latest entry of `status_history`.
    pub status: OrderStatus,

    /// Append-only transition trail, seeded with the initial `Placed` entry.
    pub status_history: Vec<StatusEntry>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Flat placement-time estimate; a routing provider may overwrite it.
    #[ts(as = "String")]
    pub estimated_delivery_time: DateTime<Utc>,
}

impl Order {
    /// Snapshots a cart into a new order. The cart itself is not touched;
    /// clearing it after a successful checkout is the caller's decision.
    ///
    /// ## Errors
    /// `CoreError::EmptyCart` when the cart has no items.
    pub fn from_cart(cart: &Cart, payment_method: PaymentMethod) -> Result<Order, CoreError> {
        Order::from_cart_at(cart, payment_method, Utc::now())
    }

    /// As [`Order::from_cart`], with an explicit placement time.
    pub fn from_cart_at(
        cart: &Cart,
        payment_method: PaymentMethod,
        placed_at: DateTime<Utc>,
    ) -> Result<Order, CoreError> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        // Non-empty carts always carry a business identity.
        let business_id = cart.business_id().ok_or(CoreError::EmptyCart)?.to_string();
        let business_name = cart
            .business_name()
            .unwrap_or_default()
            .to_string();

        Ok(Order {
            id: Uuid::new_v4().to_string(),
            business_id,
            business_name,
            items: cart.items().to_vec(),
            subtotal: cart.subtotal(),
            tax: cart.tax(),
            delivery_fee: cart.delivery_fee(),
            discount: cart.discount(),
            total: cart.total(),
            coupon_code: cart.coupon_code().map(str::to_string),
            payment_method,
            delivery_address: cart.delivery_address().cloned(),
            delivery_instructions: cart.delivery_instructions().map(str::to_string),
            status: OrderStatus::Placed,
            status_history: vec![StatusEntry {
                status: OrderStatus::Placed,
                timestamp: placed_at,
                notes: None,
            }],
            created_at: placed_at,
            estimated_delivery_time: placed_at + Duration::minutes(ESTIMATED_DELIVERY_MINUTES),
        })
    }

    /// Moves the order to `status`, appending to the history trail.
    ///
    /// No transition table is enforced: `Delivered` and `Cancelled` are
    /// terminal by convention only, and support staff may move an order
    /// backwards to correct a mistake.
    pub fn set_status(&mut self, status: OrderStatus, notes: Option<String>) {
        self.status_history.push(StatusEntry {
            status,
            timestamp: Utc::now(),
            notes,
        });
        self.status = status;
    }

    /// Whether the order has reached a terminal status.
    pub fn is_closed(&self) -> bool {
        self.status.is_terminal()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Placed,
            OrderStatus::Preparing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_serde_is_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out-for-delivery\"");

        let parsed: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = "refunded".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownStatus(s) if s == "refunded"));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Placed.is_terminal());
        assert!(!OrderStatus::Preparing.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("credit".parse::<PaymentMethod>().unwrap(), PaymentMethod::Credit);
        assert_eq!("PayPal".parse::<PaymentMethod>().unwrap(), PaymentMethod::Paypal);
        assert_eq!(" cash ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);

        let err = "bitcoin".parse::<PaymentMethod>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownPaymentMethod(s) if s == "bitcoin"));
    }

    #[test]
    fn test_status_default_is_placed() {
        assert_eq!(OrderStatus::default(), OrderStatus::Placed);
    }
}
