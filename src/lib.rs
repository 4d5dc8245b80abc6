//! Overbook - a contention simulator for a seat-booking service
//!
//! Overbook provisions disposable identities against a flight-booking HTTP
//! API and then replays the classic overselling experiment: many concurrent
//! actors racing to book the same seats, each capped by a per-actor quota.
//! Every observable outcome is captured as a structured event so a run ends
//! in an aggregated report instead of a scroll of console lines.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod provision;
pub mod service;
pub mod sim;
pub mod store;

pub use application::{Application, Phase};
pub use error::{Error, Result};
