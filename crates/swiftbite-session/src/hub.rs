//! # Session Hub
//!
//! Per-session carts plus the order book, behind one thread-safe handle.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     SessionHub Operations                           │
//! │                                                                     │
//! │  Frontend Action         Hub Operation          State Change        │
//! │  ───────────────         ─────────────          ────────────        │
//! │  Tap menu item ────────► add_to_cart() ───────► carts[session]      │
//! │  Enter promo ──────────► apply_coupon() ──────► carts[session]      │
//! │  Confirm checkout ─────► place_order() ───────► orders[new id],     │
//! │                                                 cart cleared        │
//! │  Courier update ───────► set_order_status() ──► orders[id] history  │
//! │  Orders screen ────────► orders() ────────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, info};

use swiftbite_core::{
    validation::validate_instructions, Address, Cart, CartSnapshot, CoreError, CoreResult,
    MenuItem, Money, Order, OrderStatus, PaymentMethod, SelectedOption,
};

/// Shared handle over the per-session carts and the order book.
///
/// ## Why Mutex and not RwLock?
/// Operations are quick and most of them write. An RwLock would add
/// complexity with minimal benefit.
#[derive(Debug, Default)]
pub struct SessionHub {
    carts: Mutex<HashMap<String, Cart>>,
    orders: Mutex<HashMap<String, Order>>,
}

impl SessionHub {
    /// Creates a hub with no sessions and no orders.
    pub fn new() -> Self {
        SessionHub::default()
    }

    // -------------------------------------------------------------------------
    // Cart access
    // -------------------------------------------------------------------------

    /// Runs `f` with read access to the session's cart. A session that has
    /// never been touched gets a fresh empty cart.
    pub fn with_cart<F, R>(&self, session_id: &str, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let mut carts = self.carts.lock().expect("cart mutex poisoned");
        let cart = carts.entry(session_id.to_string()).or_default();
        f(cart)
    }

    /// Runs `f` with write access to the session's cart.
    pub fn with_cart_mut<F, R>(&self, session_id: &str, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut carts = self.carts.lock().expect("cart mutex poisoned");
        let cart = carts.entry(session_id.to_string()).or_default();
        f(cart)
    }

    /// Current cart contents and totals for the session.
    pub fn cart(&self, session_id: &str) -> CartSnapshot {
        debug!(session_id, "get cart");
        self.with_cart(session_id, Cart::snapshot)
    }

    // -------------------------------------------------------------------------
    // Cart mutations
    // -------------------------------------------------------------------------

    /// Adds a catalog item to the session's cart and returns the updated
    /// snapshot. Adding from a different business replaces the cart's lines;
    /// see [`Cart::add_item`].
    pub fn add_to_cart(
        &self,
        session_id: &str,
        item: &MenuItem,
        quantity: i64,
        options: Vec<SelectedOption>,
    ) -> CoreResult<CartSnapshot> {
        debug!(session_id, item_id = %item.id, quantity, "add_to_cart");
        self.with_cart_mut(session_id, |cart| {
            cart.add_item(item, quantity, options)?;
            Ok(cart.snapshot())
        })
    }

    /// Sets a line's quantity; zero removes the line.
    pub fn update_cart_item(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> CoreResult<CartSnapshot> {
        debug!(session_id, product_id, quantity, "update_cart_item");
        self.with_cart_mut(session_id, |cart| {
            cart.update_quantity(product_id, quantity)?;
            Ok(cart.snapshot())
        })
    }

    /// Removes a line from the session's cart.
    pub fn remove_from_cart(
        &self,
        session_id: &str,
        product_id: &str,
    ) -> CoreResult<CartSnapshot> {
        debug!(session_id, product_id, "remove_from_cart");
        self.with_cart_mut(session_id, |cart| {
            cart.remove_item(product_id)?;
            Ok(cart.snapshot())
        })
    }

    /// Empties the session's cart, including fee, coupon, and address.
    pub fn clear_cart(&self, session_id: &str) -> CartSnapshot {
        debug!(session_id, "clear_cart");
        self.with_cart_mut(session_id, |cart| {
            cart.clear();
            cart.snapshot()
        })
    }

    /// Applies an already-validated coupon to the session's cart.
    pub fn apply_coupon(
        &self,
        session_id: &str,
        code: &str,
        discount: Money,
    ) -> CoreResult<CartSnapshot> {
        debug!(session_id, code, discount = %discount, "apply_coupon");
        self.with_cart_mut(session_id, |cart| {
            cart.apply_coupon(code, discount)?;
            Ok(cart.snapshot())
        })
    }

    /// Drops any applied coupon.
    pub fn remove_coupon(&self, session_id: &str) -> CartSnapshot {
        debug!(session_id, "remove_coupon");
        self.with_cart_mut(session_id, |cart| {
            cart.remove_coupon();
            cart.snapshot()
        })
    }

    /// Sets the delivery fee for the session's cart.
    pub fn set_delivery_fee(&self, session_id: &str, fee: Money) -> CoreResult<CartSnapshot> {
        debug!(session_id, fee = %fee, "set_delivery_fee");
        self.with_cart_mut(session_id, |cart| {
            cart.set_delivery_fee(fee)?;
            Ok(cart.snapshot())
        })
    }

    /// Attaches the delivery address ahead of checkout.
    pub fn set_delivery_address(&self, session_id: &str, address: Address) -> CartSnapshot {
        debug!(session_id, street = %address.street, "set_delivery_address");
        self.with_cart_mut(session_id, |cart| {
            cart.set_delivery_address(address);
            cart.snapshot()
        })
    }

    /// Attaches delivery instructions ahead of checkout.
    pub fn set_delivery_instructions(
        &self,
        session_id: &str,
        text: &str,
    ) -> CoreResult<CartSnapshot> {
        debug!(session_id, "set_delivery_instructions");
        validate_instructions(text)?;
        self.with_cart_mut(session_id, |cart| {
            cart.set_delivery_instructions(text);
            Ok(cart.snapshot())
        })
    }

    // -------------------------------------------------------------------------
    // Checkout & order lifecycle
    // -------------------------------------------------------------------------

    /// Checks out the session's cart: snapshots it into a new order, files
    /// the order in the book, and clears the cart.
    ///
    /// ## Errors
    /// `CoreError::EmptyCart` when there is nothing to check out; the cart
    /// is left untouched on any error.
    pub fn place_order(&self, session_id: &str, method: PaymentMethod) -> CoreResult<Order> {
        debug!(session_id, method = %method, "place_order");

        let order = self.with_cart_mut(session_id, |cart| {
            let order = Order::from_cart(cart, method)?;
            cart.clear();
            Ok::<Order, CoreError>(order)
        })?;

        let mut orders = self.orders.lock().expect("order mutex poisoned");
        orders.insert(order.id.clone(), order.clone());

        info!(
            order_id = %order.id,
            business_id = %order.business_id,
            total = %order.total,
            items = order.items.len(),
            "order placed"
        );
        Ok(order)
    }

    /// Moves an order to a new status, appending to its history trail.
    ///
    /// ## Errors
    /// `CoreError::OrderNotFound` when no order has `order_id`.
    pub fn set_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
        notes: Option<String>,
    ) -> CoreResult<Order> {
        debug!(order_id, status = %status, "set_order_status");

        let mut orders = self.orders.lock().expect("order mutex poisoned");
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

        order.set_status(status, notes);
        info!(order_id, status = %status, "order status updated");
        Ok(order.clone())
    }

    /// Looks up a single order by id.
    pub fn order(&self, order_id: &str) -> Option<Order> {
        let orders = self.orders.lock().expect("order mutex poisoned");
        orders.get(order_id).cloned()
    }

    /// All orders placed through this hub, newest first.
    pub fn orders(&self) -> Vec<Order> {
        let orders = self.orders.lock().expect("order mutex poisoned");
        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
