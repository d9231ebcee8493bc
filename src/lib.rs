//! # Kitchen Shelves
//!
//! > **An order-holding kitchen simulated with Tokio actors.**
//!
//! Orders arrive continuously and are held on temperature-matched shelves with
//! limited capacity until a courier collects them. While they wait they lose
//! value at a rate set by the order and by the shelf it sits on. An order leaves
//! the kitchen exactly once: picked up by its courier, wasted by decay, or evicted
//! from the overflow shelf to make room for a newer arrival.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One owner for all shelf state
//! The four shelves and the order index live inside a single [`ShelfManager`](manager::ShelfManager),
//! owned by a single [`KitchenActor`](kitchen_actor::KitchenActor) task. Placement, pickup
//! and decay arrive as messages and are handled one at a time, so "who removed this
//! order" always has exactly one answer and no lock is ever taken.
//!
//! ### Pure core, async shell
//! [`decay`], [`shelf`] and [`manager`] are synchronous and take `now` explicitly.
//! They are tested directly, without a runtime. The async layers only move
//! requests to that core and back.
//!
//! ### Races are outcomes, not errors
//! A courier that arrives after its order decayed gets `Ok(false)`. Errors are
//! reserved for things that are actually wrong: an invalid ticket, a malformed
//! order feed, a closed actor.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Core ([`model`], [`decay`], [`shelf`], [`manager`])
//! - **Role**: orders, the value formula, capacity-bounded shelves, placement and eviction policy.
//! - **Key items**: [`Order`](model::Order), [`ShelfManager::place`](manager::ShelfManager::place),
//!   [`ShelfManager::sweep_decay`](manager::ShelfManager::sweep_decay).
//!
//! ### 2. The Actor ([`kitchen_actor`], [`clients`])
//! - **Role**: serializes every operation on the manager; the typed client hides the channels.
//! - **Key items**: [`KitchenClient`](clients::KitchenClient), [`MockKitchen`](kitchen_actor::mock::MockKitchen).
//!
//! ### 3. The Collaborators ([`dispatch`], [`source`])
//! - **Role**: couriers with random travel times, and the feed of incoming tickets.
//! - **Key items**: [`Dispatcher`](dispatch::Dispatcher), [`JsonOrderSource`](source::JsonOrderSource).
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`])
//! - **Role**: wires everything together from a TOML config and shuts it down cleanly.
//! - **Key items**: [`KitchenSystem`](lifecycle::KitchenSystem), [`KitchenConfig`](config::KitchenConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --orders demos/orders.json --config demos/kitchen.toml
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod decay;
pub mod dispatch;
pub mod kitchen_actor;
pub mod lifecycle;
pub mod manager;
pub mod model;
pub mod shelf;
pub mod source;
