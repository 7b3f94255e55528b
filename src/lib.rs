//! Electric propulsion performance lab.
//!
//! The physics lives in the workspace crates; this crate re-exports them so
//! front-ends (CLI, plotting, notebooks) share one entry point.

pub use thruster_config as config;
pub use thruster_core as physics;
pub use thruster_export as export;
pub use thruster_propulsion as propulsion;
pub use thruster_sweep as sweep;
