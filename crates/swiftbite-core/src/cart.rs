//! # Cart Ledger
//!
//! The single active cart a user assembles before checkout, bound to exactly
//! one business at a time.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                │
//! │                                                                     │
//! │  Frontend Action           Operation              State Change      │
//! │  ───────────────           ─────────              ────────────      │
//! │  Tap menu item ──────────► add_item() ──────────► merge or append   │
//! │    (other business)                               replace cart      │
//! │  Change quantity ────────► update_quantity() ───► set / remove      │
//! │  Tap remove ─────────────► remove_item() ───────► drop line         │
//! │  Enter promo code ───────► apply_coupon() ──────► set discount      │
//! │  Cancel order ───────────► clear() ─────────────► empty cart        │
//! │                                                                     │
//! │  Totals are derived on read, never stored, so they cannot go        │
//! │  stale between mutations.                                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by product id (adding the same product merges quantity)
//! - `business_id`/`business_name` are `Some` iff the cart has items
//! - Adding an item from a different business replaces the whole cart; the
//!   delivery fee, coupon, and address survive the switch
//! - Delivery fee and discount are non-negative; the *total* may still go
//!   negative when a trusted discount exceeds everything else

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, TaxRate};
use crate::types::{Address, MenuItem};
use crate::validation::{validate_coupon_code, validate_non_negative, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, SALES_TAX_BPS};

// =============================================================================
// Selected Option
// =============================================================================

/// A customization chosen for a line item ("extra cheese", "no onions").
///
/// The add-on price is carried for display but intentionally does not enter
/// the line total; only the base unit price is charged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectedOption {
    pub name: String,

    /// Additive price; zero when the option is free.
    #[serde(default)]
    pub price: Money,
}

impl SelectedOption {
    /// A free customization.
    pub fn free(name: impl Into<String>) -> Self {
        SelectedOption {
            name: name.into(),
            price: Money::zero(),
        }
    }

    /// A customization with an add-on price.
    pub fn priced(name: impl Into<String>, price: Money) -> Self {
        SelectedOption {
            name: name.into(),
            price,
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// One product line in the cart.
///
/// Uses the snapshot pattern: name and unit price are frozen at the moment
/// the item is added, so a later catalog edit cannot reprice a cart the user
/// is already looking at.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Product id within the business's catalog.
    pub product_id: String,

    /// Display name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Quantity in cart (1..=[`MAX_ITEM_QUANTITY`]).
    pub quantity: i64,

    /// Customizations selected for this line.
    pub options: Vec<SelectedOption>,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a cart line from a catalog item, freezing name and price.
    pub fn from_menu_item(item: &MenuItem, quantity: i64, options: Vec<SelectedOption>) -> Self {
        CartItem {
            product_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
            options,
            added_at: Utc::now(),
        }
    }

    /// Line total: unit price × quantity. Option add-ons are excluded.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Sum of the option add-on prices, for display alongside the line.
    pub fn options_total(&self) -> Money {
        self.options.iter().map(|o| o.price).sum()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The active cart for one session.
///
/// Fields are private so the invariants above cannot be broken from outside;
/// reads go through accessors or [`Cart::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    business_id: Option<String>,
    business_name: Option<String>,
    delivery_fee: Money,
    coupon_code: Option<String>,
    discount: Money,
    delivery_address: Option<Address>,
    delivery_instructions: Option<String>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a catalog item to the cart.
    ///
    /// ## Behavior
    /// - Empty cart, or item from a *different* business: the cart's lines
    ///   are replaced with this single item and the business identity is
    ///   updated. Dropping the previous lines is intentional — it models
    ///   starting a new order at another business, and is not an error.
    /// - Item already in the cart: its quantity is incremented (the existing
    ///   line's options are kept).
    /// - Otherwise the item is appended as a new line.
    pub fn add_item(
        &mut self,
        item: &MenuItem,
        quantity: i64,
        options: Vec<SelectedOption>,
    ) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let same_business = self
            .business_id
            .as_deref()
            .is_some_and(|id| id == item.business_id);

        if self.items.is_empty() || !same_business {
            self.items = vec![CartItem::from_menu_item(item, quantity, options)];
            self.business_id = Some(item.business_id.clone());
            self.business_name = Some(item.business_name.clone());
            return Ok(());
        }

        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == item.id) {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items
            .push(CartItem::from_menu_item(item, quantity, options));
        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line entirely, so the UI can
    /// wire its stepper straight through.
    ///
    /// ## Errors
    /// `CoreError::ItemNotFound` when no line has `product_id`.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.items.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ItemNotFound(product_id.to_string())),
        }
    }

    /// Removes a line by product id. When the last line goes, the business
    /// binding is cleared too.
    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|l| l.product_id != product_id);

        if self.items.len() == initial_len {
            return Err(CoreError::ItemNotFound(product_id.to_string()));
        }

        if self.items.is_empty() {
            self.business_id = None;
            self.business_name = None;
        }
        Ok(())
    }

    /// Resets the cart to its initial empty state: items, business binding,
    /// delivery fee, coupon, address, and instructions all go.
    pub fn clear(&mut self) {
        *self = Cart::default();
    }

    /// Applies a coupon. The discount amount is trusted as given — coupon
    /// legitimacy is validated by the caller against the promotions service.
    pub fn apply_coupon(&mut self, code: &str, discount: Money) -> CoreResult<()> {
        validate_coupon_code(code)?;
        validate_non_negative("discount", discount)?;
        self.coupon_code = Some(code.trim().to_string());
        self.discount = discount;
        Ok(())
    }

    /// Removes any applied coupon and its discount.
    pub fn remove_coupon(&mut self) {
        self.coupon_code = None;
        self.discount = Money::zero();
    }

    /// Sets the delivery fee, as decided by the business or by distance.
    pub fn set_delivery_fee(&mut self, fee: Money) -> CoreResult<()> {
        validate_non_negative("delivery fee", fee)?;
        self.delivery_fee = fee;
        Ok(())
    }

    /// Attaches the delivery address, stored verbatim.
    pub fn set_delivery_address(&mut self, address: Address) {
        self.delivery_address = Some(address);
    }

    /// Attaches delivery instructions, stored verbatim.
    pub fn set_delivery_instructions(&mut self, text: impl Into<String>) {
        self.delivery_instructions = Some(text.into());
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Lines currently in the cart.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Business the cart is bound to; `None` iff the cart is empty.
    pub fn business_id(&self) -> Option<&str> {
        self.business_id.as_deref()
    }

    /// Display name of the bound business.
    pub fn business_name(&self) -> Option<&str> {
        self.business_name.as_deref()
    }

    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }

    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn delivery_address(&self) -> Option<&Address> {
        self.delivery_address.as_ref()
    }

    pub fn delivery_instructions(&self) -> Option<&str> {
        self.delivery_instructions.as_deref()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Subtotal: Σ unit price × quantity. Option add-ons do not contribute.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|l| l.line_total()).sum()
    }

    /// Tax on the subtotal at the flat [`SALES_TAX_BPS`] rate.
    pub fn tax(&self) -> Money {
        self.subtotal().calculate_tax(TaxRate::from_bps(SALES_TAX_BPS))
    }

    /// Grand total: subtotal + tax + delivery fee − discount.
    ///
    /// Not clamped at zero: a discount larger than the rest produces a
    /// negative total, which the checkout layer decides how to present.
    pub fn total(&self) -> Money {
        self.subtotal() + self.tax() + self.delivery_fee - self.discount
    }

    /// Read-only view of the whole cart for the frontend.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            business_id: self.business_id.clone(),
            business_name: self.business_name.clone(),
            subtotal: self.subtotal(),
            tax: self.tax(),
            delivery_fee: self.delivery_fee,
            discount: self.discount,
            total: self.total(),
            coupon_code: self.coupon_code.clone(),
            delivery_address: self.delivery_address.clone(),
            delivery_instructions: self.delivery_instructions.clone(),
        }
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Everything the cart screen renders, in one serializable value.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub business_id: Option<String>,
    pub business_name: Option<String>,
    pub subtotal: Money,
    pub tax: Money,
    pub delivery_fee: Money,
    pub discount: Money,
    pub total: Money,
    pub coupon_code: Option<String>,
    pub delivery_address: Option<Address>,
    pub delivery_instructions: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_item(id: &str, business_id: &str, price_cents: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            business_id: business_id.to_string(),
            business_name: format!("Business {}", business_id),
            name: format!("Item {}", id),
            description: None,
            price: Money::from_cents(price_cents),
        }
    }

    /// The ledger identity that must hold after every mutation.
    fn assert_total_identity(cart: &Cart) {
        assert_eq!(
            cart.total(),
            cart.subtotal() + cart.tax() + cart.delivery_fee() - cart.discount()
        );
        assert_eq!(
            cart.tax(),
            cart.subtotal()
                .calculate_tax(TaxRate::from_bps(SALES_TAX_BPS))
        );
    }

    #[test]
    fn test_add_first_item_binds_business() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("p1", "b1", 1000), 2, vec![]).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.business_id(), Some("b1"));
        assert_eq!(cart.business_name(), Some("Business b1"));

        // $10.00 × 2 = $20.00 subtotal, 8% tax = $1.60, total $21.60
        assert_eq!(cart.subtotal().cents(), 2000);
        assert_eq!(cart.tax().cents(), 160);
        assert_eq!(cart.delivery_fee().cents(), 0);
        assert_eq!(cart.discount().cents(), 0);
        assert_eq!(cart.total().cents(), 2160);
        assert_total_identity(&cart);
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut cart = Cart::new();
        let item = menu_item("p1", "b1", 899);

        cart.add_item(&item, 2, vec![]).unwrap();
        cart.add_item(&item, 3, vec![]).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.subtotal().cents(), 899 * 5);
        assert_total_identity(&cart);
    }

    #[test]
    fn test_add_from_other_business_replaces_cart() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("p1", "b1", 1000), 2, vec![]).unwrap();
        cart.add_item(&menu_item("p2", "b2", 1299), 1, vec![]).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].product_id, "p2");
        assert_eq!(cart.business_id(), Some("b2"));
        assert_total_identity(&cart);
    }

    #[test]
    fn test_business_switch_keeps_fee_and_coupon() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("p1", "b1", 1000), 1, vec![]).unwrap();
        cart.set_delivery_fee(Money::from_cents(299)).unwrap();
        cart.apply_coupon("SAVE5", Money::from_cents(500)).unwrap();

        cart.add_item(&menu_item("p2", "b2", 1500), 1, vec![]).unwrap();

        assert_eq!(cart.delivery_fee().cents(), 299);
        assert_eq!(cart.coupon_code(), Some("SAVE5"));
        assert_eq!(cart.discount().cents(), 500);
        assert_total_identity(&cart);
    }

    #[test]
    fn test_options_do_not_affect_subtotal() {
        let mut cart = Cart::new();
        let options = vec![
            SelectedOption::priced("Extra cheese", Money::from_cents(150)),
            SelectedOption::free("No onions"),
        ];
        cart.add_item(&menu_item("p1", "b1", 1000), 1, options).unwrap();

        assert_eq!(cart.subtotal().cents(), 1000);
        assert_eq!(cart.items()[0].options_total().cents(), 150);
        assert_total_identity(&cart);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("p1", "b1", 500), 1, vec![]).unwrap();

        cart.update_quantity("p1", 4).unwrap();
        assert_eq!(cart.total_quantity(), 4);
        assert_eq!(cart.subtotal().cents(), 2000);
        assert_total_identity(&cart);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let mut a = Cart::new();
        let mut b = Cart::new();
        for cart in [&mut a, &mut b] {
            cart.add_item(&menu_item("p1", "b1", 500), 2, vec![]).unwrap();
            cart.add_item(&menu_item("p2", "b1", 700), 1, vec![]).unwrap();
        }

        a.update_quantity("p1", 0).unwrap();
        b.remove_item("p1").unwrap();

        assert_eq!(a.item_count(), b.item_count());
        assert_eq!(a.subtotal(), b.subtotal());
        assert_eq!(a.total(), b.total());
    }

    #[test]
    fn test_unknown_id_is_reported() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("p1", "b1", 500), 1, vec![]).unwrap();

        assert!(matches!(
            cart.update_quantity("ghost", 2),
            Err(CoreError::ItemNotFound(id)) if id == "ghost"
        ));
        assert!(matches!(
            cart.remove_item("ghost"),
            Err(CoreError::ItemNotFound(id)) if id == "ghost"
        ));
    }

    #[test]
    fn test_removing_last_item_clears_business() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("p1", "b1", 500), 1, vec![]).unwrap();
        cart.remove_item("p1").unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.business_id(), None);
        assert_eq!(cart.business_name(), None);
        assert_total_identity(&cart);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("p1", "b1", 500), 1, vec![]).unwrap();
        cart.set_delivery_fee(Money::from_cents(399)).unwrap();
        cart.apply_coupon("WELCOME", Money::from_cents(200)).unwrap();
        cart.set_delivery_address(Address {
            street: "123 Main St".to_string(),
            apartment: None,
            city: "Anytown".to_string(),
            state: "CA".to_string(),
            zip_code: "12345".to_string(),
            instructions: None,
            location: None,
        });
        cart.set_delivery_instructions("Leave at door");

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.business_id(), None);
        assert_eq!(cart.delivery_fee(), Money::zero());
        assert_eq!(cart.coupon_code(), None);
        assert_eq!(cart.discount(), Money::zero());
        assert_eq!(cart.delivery_address(), None);
        assert_eq!(cart.delivery_instructions(), None);
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_coupon_apply_and_remove() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("p1", "b1", 2000), 1, vec![]).unwrap();

        cart.apply_coupon("TENOFF", Money::from_cents(1000)).unwrap();
        assert_eq!(cart.total().cents(), 2000 + 160 - 1000);
        assert_total_identity(&cart);

        cart.remove_coupon();
        assert_eq!(cart.coupon_code(), None);
        assert_eq!(cart.total().cents(), 2160);
    }

    #[test]
    fn test_oversized_discount_drives_total_negative() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("p1", "b1", 500), 1, vec![]).unwrap();
        cart.apply_coupon("BIGCOMP", Money::from_cents(10_000)).unwrap();

        assert!(cart.total().is_negative());
        assert_total_identity(&cart);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut cart = Cart::new();
        let item = menu_item("p1", "b1", 500);

        assert!(cart.add_item(&item, 0, vec![]).is_err());
        assert!(cart.add_item(&item, MAX_ITEM_QUANTITY + 1, vec![]).is_err());

        cart.add_item(&item, 1, vec![]).unwrap();
        assert!(matches!(
            cart.update_quantity("p1", MAX_ITEM_QUANTITY + 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert!(cart.set_delivery_fee(Money::from_cents(-1)).is_err());
        assert!(cart.apply_coupon("", Money::zero()).is_err());
        assert!(cart.apply_coupon("X", Money::from_cents(-5)).is_err());
    }

    #[test]
    fn test_cart_line_cap() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_item(&menu_item(&format!("p{}", i), "b1", 100), 1, vec![])
                .unwrap();
        }
        assert!(matches!(
            cart.add_item(&menu_item("overflow", "b1", 100), 1, vec![]),
            Err(CoreError::CartTooLarge { .. })
        ));
    }

    #[test]
    fn test_snapshot_mirrors_cart() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("p1", "b1", 1099), 2, vec![]).unwrap();
        cart.set_delivery_fee(Money::from_cents(299)).unwrap();

        let snap = cart.snapshot();
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.business_id.as_deref(), Some("b1"));
        assert_eq!(snap.subtotal, cart.subtotal());
        assert_eq!(snap.tax, cart.tax());
        assert_eq!(snap.total, cart.total());
    }
}
