//! Event system for authentication actions.
//!
//! Events are fired from the actions and the session registry. If no
//! listeners are registered, dispatch is a no-op.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use authcore::register_event_listeners;
//! use authcore::events::listeners::LoggingListener;
//!
//! fn main() {
//!     // register listeners at startup
//!     register_event_listeners(|registry| {
//!         registry.listen(LoggingListener::new());
//!     });
//!
//!     // events will now be logged
//! }
//! ```
//!
//! # Custom Listeners
//!
//! Implement the [`Listener`] trait to create custom event handlers:
//!
//! ```rust,ignore
//! use authcore::events::{AuthEvent, Listener};
//! use async_trait::async_trait;
//!
//! struct MetricsListener;
//!
//! #[async_trait]
//! impl Listener for MetricsListener {
//!     async fn handle(&self, event: &AuthEvent) {
//!         match event {
//!             AuthEvent::LoginFailed { .. } => {
//!                 // increment login failure counter
//!             }
//!             AuthEvent::SessionsPruned { count, .. } => {
//!                 // record reclaimed sessions
//!             }
//!             _ => {}
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::AuthEvent;
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners, EventRegistry};
