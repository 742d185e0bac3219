//! # swiftbite-session: Session Orchestration for SwiftBite
//!
//! The layer between the pure core and the surrounding app. It owns:
//!
//! - one [`swiftbite_core::Cart`] per session id, created lazily, and
//! - the order book: every order placed through the hub, looked up by id.
//!
//! ## Thread Safety
//! Both maps live behind a `std::sync::Mutex`, making every mutation a
//! critical section. A client app has one active user, but embedding this
//! hub server-side with many sessions stays sound: one writer at a time,
//! carts keyed per session.
//!
//! All operations are synchronous and in-memory; pushing placed orders into
//! the remote document store is the embedding app's job.

mod hub;

pub use hub::SessionHub;
