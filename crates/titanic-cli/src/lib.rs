//! CLI library components for the Titanic explorer.

pub mod charts;
pub mod logging;
pub mod sections;
pub mod selection;
