//! `markpreview-gateway` — HTTP glue around the markdown core.
//!
//! Serves the editor page, converts submitted documents on
//! `POST /preview`, and exposes a health probe.

pub mod health;
pub mod preview;
pub mod server;
pub mod static_assets;

pub use server::{router, start_server, GatewayState};
