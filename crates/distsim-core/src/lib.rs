pub mod columns;
pub mod config;
pub mod dims;
pub mod error;
pub mod fakes;
pub mod geo;
pub mod graph;
pub mod lock;
pub mod master;
pub mod orchestrate;
pub mod output;
pub mod table;
pub mod weights;

// Re-export key types for convenience
pub use config::SimConfig;
pub use error::{DistSimError, Result};
pub use master::MasterData;
pub use orchestrate::{GenContext, Orchestrator, Registry};
pub use table::Table;
