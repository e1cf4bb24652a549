//! Headless driver for the flock simulation: settings loading, scripted
//! pointer input and JSON-lines frame output.

pub mod runner;
pub mod script;
pub mod settings;

pub use runner::{run, snapshot, RunOptions};
pub use script::PointerScript;
pub use settings::{load_settings, to_config, Overrides};
