//! # cascade-telemetry
//!
//! Event bus for simulation telemetry. Emits structured events
//! (timing, mass balance, stability reports) that can be consumed
//! by pluggable sinks (log output, files, live dashboards).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
