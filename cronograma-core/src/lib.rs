//! Core types for cronograma.
//!
//! This crate provides everything the front end needs to show an event
//! schedule:
//! - `schedule` and `loader` for reading the day-partitioned activity list
//! - `filter_state` and `storage` for remembered day and category choices
//! - `render` and `visibility` for building the list and its entrance triggers
//! - `session` tying them together behind user actions

pub mod category;
pub mod config;
pub mod error;
pub mod filter_state;
pub mod loader;
pub mod render;
pub mod schedule;
pub mod session;
pub mod storage;
pub mod visibility;

pub use category::{Category, Filter};
pub use error::{CronogramaError, CronogramaResult};
pub use schedule::{Day, ScheduleEntry, ScheduleStore};
