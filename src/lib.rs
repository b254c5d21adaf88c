// src/lib.rs
//! SILVER - RustSec ID call-chain analyzer demo.
//!
//! Analysis is simulated: records resolve after a fixed delay with a random
//! confidence score or a synthetic failure. The [`state::ResultSet`] owns the
//! records and every transition on them; the `ui` and `app` modules draw it
//! with egui.

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod file;
pub mod state;
pub mod ui;

pub use error::{Result, SilverError};
