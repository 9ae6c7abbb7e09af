//! Concrete tools
//!
//! Each module exposes a `register` function that adds its commands to a
//! `CommandRegistry`. Tools that call an upstream take their client as a
//! `JsonSource` so tests can substitute a fake.

pub mod calculator;
pub mod daily_hot;
pub mod forecast;
pub mod greeting;
pub mod hot_source;
pub mod weather;

#[cfg(test)]
pub(crate) mod testing;
