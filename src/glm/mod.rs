//! GLM API client module

pub mod provider;
pub mod types;
