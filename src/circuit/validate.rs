//! Circuit analysis.

use std::fmt;

use crate::components::ComponentKind;
use crate::model::Topology;

use super::graph::PlacedComponent;

/// What a set of placed components amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitKind {
    HalfWave,
    HalfWaveWithFilter,
    Invalid,
}

impl fmt::Display for CircuitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitKind::HalfWave => write!(f, "Half Wave Rectifier"),
            CircuitKind::HalfWaveWithFilter => write!(f, "Half Wave Rectifier with Filter"),
            CircuitKind::Invalid => write!(f, "Invalid Circuit"),
        }
    }
}

/// Result of analyzing the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitAnalysis {
    pub kind: CircuitKind,
    pub component_count: usize,
    pub is_valid: bool,
}

impl CircuitAnalysis {
    /// The rectifier topology, if the circuit is valid.
    pub fn topology(&self) -> Option<Topology> {
        match self.kind {
            CircuitKind::HalfWave => Some(Topology::WithoutFilter),
            CircuitKind::HalfWaveWithFilter => Some(Topology::WithFilter),
            CircuitKind::Invalid => None,
        }
    }
}

impl fmt::Display for CircuitAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit Analysis:")?;
        writeln!(f, "Type: {}", self.kind)?;
        writeln!(f, "Components: {}", self.component_count)?;
        write!(f, "Valid: {}", if self.is_valid { "Yes" } else { "No" })
    }
}

/// Classify the placed components.
///
/// A circuit is a rectifier when it has at least a diode and a resistor;
/// a capacitor makes it the filtered variant. Wiring is not inspected.
pub fn analyze_circuit(components: &[PlacedComponent]) -> CircuitAnalysis {
    let has = |kind: ComponentKind| components.iter().any(|c| c.kind() == kind);

    let has_diode = has(ComponentKind::Diode);
    let has_resistor = has(ComponentKind::Resistor);
    let has_capacitor = has(ComponentKind::Capacitor);

    let is_valid = has_diode && has_resistor;
    let kind = match (is_valid, has_capacitor) {
        (false, _) => CircuitKind::Invalid,
        (true, true) => CircuitKind::HalfWaveWithFilter,
        (true, false) => CircuitKind::HalfWave,
    };

    CircuitAnalysis {
        kind,
        component_count: components.len(),
        is_valid,
    }
}
