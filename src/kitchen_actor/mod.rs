//! # Kitchen Actor
//!
//! The actor that owns every shelf, plus its messages, errors and test mocks.
//!
//! ## Structure
//!
//! - [`actor`] - [`KitchenActor`], the request loop around the [`ShelfManager`]
//! - [`message`] - [`KitchenRequest`] and the [`Response`] channel type
//! - [`error`] - [`KitchenError`]
//! - [`mock`] - a scripted stand-in for the actor, for testing collaborators
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use kitchen_shelves::config::ShelvesConfig;
//! use kitchen_shelves::kitchen_actor;
//! use kitchen_shelves::manager::ShelfManager;
//! use kitchen_shelves::model::{OrderTicket, ShelfKind, Temperature};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = ShelfManager::new(&ShelvesConfig::default());
//!     let (actor, client) = kitchen_actor::new(manager, 32);
//!     tokio::spawn(actor.run());
//!
//!     let ticket = OrderTicket::new("Kale Salad", Temperature::Cold, 250.0, 0.3);
//!     let placement = client.place(ticket).await?;
//!     assert_eq!(placement.shelf, Some(ShelfKind::Cold));
//!
//!     assert!(client.pickup(placement.order_id).await?);
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::*;
pub use error::*;
pub use message::*;

use crate::clients::KitchenClient;
use crate::manager::ShelfManager;

/// Creates a new kitchen actor around `manager` and its client.
pub fn new(manager: ShelfManager, buffer_size: usize) -> (KitchenActor, KitchenClient) {
    KitchenActor::new(manager, buffer_size)
}
