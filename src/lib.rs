pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::session::Session;
pub use crate::config::{cli::LocalStorage, Settings};
pub use crate::core::aggregator::{aggregate, render, AggregatedList};
pub use crate::core::spoonacular::SpoonacularClient;
pub use crate::utils::error::{PlannerError, Result};
