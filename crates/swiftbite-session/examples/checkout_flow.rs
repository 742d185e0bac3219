//! End-to-end walk through a session: build a cart, switch businesses,
//! apply a coupon, check out, and track the order.
//!
//! Run with logs:
//! ```sh
//! RUST_LOG=debug cargo run -p swiftbite-session --example checkout_flow
//! ```

use swiftbite_core::{
    estimate_travel_time_minutes, GeoPoint, MenuItem, Money, OrderStatus, PaymentMethod,
    SelectedOption, TravelMode,
};
use swiftbite_session::SessionHub;

fn item(id: &str, business_id: &str, business_name: &str, name: &str, cents: i64) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        business_id: business_id.to_string(),
        business_name: business_name.to_string(),
        name: name.to_string(),
        description: None,
        price: Money::from_cents(cents),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let hub = SessionHub::new();
    let session = "demo-session";

    // Browse one business, then change minds — the cart follows the switch.
    hub.add_to_cart(
        session,
        &item("pz-1", "biz-pizza", "Pizza Express", "Pepperoni Pizza", 1299),
        1,
        vec![],
    )?;
    hub.add_to_cart(
        session,
        &item("bg-1", "biz-burger", "Burger Palace", "Chicken Burger", 899),
        2,
        vec![SelectedOption::priced(
            "Extra cheese",
            Money::from_cents(150),
        )],
    )?;
    hub.add_to_cart(
        session,
        &item("bg-7", "biz-burger", "Burger Palace", "French Fries", 399),
        1,
        vec![],
    )?;

    // Delivery fee from the distance between customer and business.
    let customer = GeoPoint::new(37.7858, -122.4064)?;
    let business = GeoPoint::new(37.7749, -122.4194)?;
    let eta = estimate_travel_time_minutes(customer, business, TravelMode::Driving);
    println!("courier ETA to customer: ~{} min", eta);

    hub.set_delivery_fee(session, Money::from_cents(299))?;
    hub.apply_coupon(session, "WELCOME10", Money::from_cents(200))?;

    let snapshot = hub.cart(session);
    println!("cart before checkout:\n{}", serde_json::to_string_pretty(&snapshot)?);

    let order = hub.place_order(session, PaymentMethod::Credit)?;
    println!(
        "placed order {} at {}: total {}",
        order.id, order.business_name, order.total
    );

    hub.set_order_status(&order.id, OrderStatus::Preparing, None)?;
    hub.set_order_status(&order.id, OrderStatus::OutForDelivery, None)?;
    let done = hub.set_order_status(
        &order.id,
        OrderStatus::Delivered,
        Some("left at door".to_string()),
    )?;

    println!("status trail:");
    for entry in &done.status_history {
        println!("  {} at {}", entry.status, entry.timestamp);
    }

    Ok(())
}
