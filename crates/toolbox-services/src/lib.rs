//! Toolbox services
//!
//! Concrete tools and resources (greeting, calculator, weather, daily-hot)
//! registered on top of the `toolbox` core, plus service assembly.

pub mod config;
pub mod error;
pub mod logging;
pub mod resources;
pub mod services;
pub mod tools;
