pub mod config;
pub mod driver;
pub mod metrics;
pub mod report;
pub mod workload;

pub use config::SimulationRequest;
pub use driver::{Sim, compare};
pub use metrics::Metrics;
pub use report::{ProcessResult, SimReport};
pub use workload::{ProcessSpec, Workload};
