//! Shared types for the BrandForge service
//!
//! Schemas, configuration, the provider error taxonomy, prompt templates,
//! and the tone palette table. The daemon crate holds everything that talks
//! to the network.

pub mod config;
pub mod error;
pub mod palette;
pub mod prompts;
pub mod schemas;

pub use config::{credential, ForgeConfig};
pub use error::{snippet, ProviderError, MAX_DIAGNOSTIC_LEN};
pub use palette::{is_hex_triplet, palette_for, PALETTE_LEN};
pub use schemas::*;
