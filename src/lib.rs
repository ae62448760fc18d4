pub mod config;
pub mod error;
pub mod fetch;
pub mod geo;
pub mod model;
pub mod rank;
pub mod score;
pub mod store;
pub mod sync;
// cmd, reports, and tui are binary modules (declared in main.rs); everything
// testable lives here in the library.
