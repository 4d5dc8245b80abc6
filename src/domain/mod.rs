//! Domain types for the booking-contention simulator
//!
//! This module contains the core domain types of the simulation: synthetic
//! identities, seat snapshots, and the structured events actors emit,
//! following type-driven development principles.

pub mod events;
pub mod identity;
pub mod seat;
pub mod types;

pub use events::*;
pub use identity::*;
pub use seat::*;
pub use types::*;
