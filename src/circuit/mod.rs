//! The drag-and-drop circuit workspace and circuit analysis.
//!
//! [`Workspace`] holds placed components, wires, and the selection and drag
//! state of the builder canvas. [`analyze_circuit`] classifies what has been
//! built, and [`Workspace::to_config`] turns a valid circuit into the
//! [`CircuitConfig`](crate::model::CircuitConfig) the model evaluates.

mod graph;
mod types;
mod validate;

pub use graph::{PlacedComponent, Wire, Workspace};
pub use types::*;
pub use validate::{analyze_circuit, CircuitAnalysis, CircuitKind};
