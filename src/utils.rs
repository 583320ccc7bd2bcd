//! Utility functions and helpers.

pub mod general;
pub mod settings;

pub use general::{describe_token, mask_token};
pub use settings::{base_url_env_var, token_env_var, Settings};
