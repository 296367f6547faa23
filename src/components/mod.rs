//! Component models for the circuit workspace.
//!
//! This module provides the parts that can be placed in a rectifier:
//! - Sources: AC source (transformer secondary)
//! - Nonlinear: Diode
//! - Linear: Resistor, Capacitor
//! - Ground and free-standing wire segments
//!
//! Each component carries the editable properties shown in the
//! properties panel, with defaults matching a 6V / 50Hz IN4001 rectifier.

mod diode;
mod linear;
mod sources;

pub use diode::DiodeParams;
pub use linear::{Capacitor, Resistor};
pub use sources::AcSource;

use std::fmt;
use std::str::FromStr;

use crate::error::{RectifierError, Result};

/// The kind of a placed component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    AcSource,
    Diode,
    Resistor,
    Capacitor,
    Ground,
    Wire,
}

impl ComponentKind {
    /// All kinds, in palette order.
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::AcSource,
        ComponentKind::Diode,
        ComponentKind::Resistor,
        ComponentKind::Capacitor,
        ComponentKind::Ground,
        ComponentKind::Wire,
    ];

    /// Identifier used by the palette and drag-and-drop payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::AcSource => "ac-source",
            ComponentKind::Diode => "diode",
            ComponentKind::Resistor => "resistor",
            ComponentKind::Capacitor => "capacitor",
            ComponentKind::Ground => "ground",
            ComponentKind::Wire => "wire",
        }
    }

    /// Default properties for a freshly placed component of this kind.
    pub fn default_properties(&self) -> Component {
        match self {
            ComponentKind::AcSource => Component::AcSource(AcSource::default()),
            ComponentKind::Diode => Component::Diode(DiodeParams::default()),
            ComponentKind::Resistor => Component::Resistor(Resistor::default()),
            ComponentKind::Capacitor => Component::Capacitor(Capacitor::default()),
            ComponentKind::Ground => Component::Ground,
            ComponentKind::Wire => Component::Wire { length: 100.0 },
        }
    }
}

impl FromStr for ComponentKind {
    type Err = RectifierError;

    fn from_str(s: &str) -> Result<Self> {
        ComponentKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| RectifierError::UnknownComponentType { kind: s.to_string() })
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component and its editable properties.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    AcSource(AcSource),
    Diode(DiodeParams),
    Resistor(Resistor),
    Capacitor(Capacitor),
    Ground,
    Wire { length: f64 },
}

impl Component {
    /// Get the component kind.
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::AcSource(_) => ComponentKind::AcSource,
            Component::Diode(_) => ComponentKind::Diode,
            Component::Resistor(_) => ComponentKind::Resistor,
            Component::Capacitor(_) => ComponentKind::Capacitor,
            Component::Ground => ComponentKind::Ground,
            Component::Wire { .. } => ComponentKind::Wire,
        }
    }

    /// Set a numeric property by name.
    pub fn set(&mut self, property: &str, value: f64) -> Result<()> {
        match self {
            Component::AcSource(s) => s.set(property, value),
            Component::Diode(d) => d.set(property, value),
            Component::Resistor(r) => r.set(property, value),
            Component::Capacitor(c) => c.set(property, value),
            Component::Wire { length } if property == "length" => {
                *length = value;
                Ok(())
            }
            other => Err(RectifierError::unknown_property(other.kind().as_str(), property)),
        }
    }

    /// Numeric properties in display order.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        match self {
            Component::AcSource(s) => s.entries(),
            Component::Diode(d) => d.entries(),
            Component::Resistor(r) => r.entries(),
            Component::Capacitor(c) => c.entries(),
            Component::Ground => Vec::new(),
            Component::Wire { length } => vec![("length", *length)],
        }
    }

    /// Short label drawn beneath the symbol.
    pub fn label(&self) -> String {
        match self {
            Component::AcSource(_) => "AC".to_string(),
            Component::Diode(_) => "Diode".to_string(),
            Component::Resistor(r) => crate::units::format_ohms(r.resistance),
            Component::Capacitor(c) => crate::units::format_micro_farads(c.capacitance),
            Component::Ground => String::new(),
            Component::Wire { .. } => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip_identifiers() {
        for kind in ComponentKind::ALL {
            assert_eq!(kind.as_str().parse::<ComponentKind>().unwrap(), kind);
            assert_eq!(kind.default_properties().kind(), kind);
        }
        assert!("transistor".parse::<ComponentKind>().is_err());
    }

    #[test]
    fn test_default_properties() {
        let Component::AcSource(src) = ComponentKind::AcSource.default_properties() else {
            panic!("expected AC source");
        };
        assert_eq!((src.voltage, src.frequency, src.phase), (6.0, 50.0, 0.0));

        let Component::Diode(d) = ComponentKind::Diode.default_properties() else {
            panic!("expected diode");
        };
        assert_eq!(d.model, "IN4001");
        assert_eq!(d.vf, 0.7);

        assert!(ComponentKind::Ground.default_properties().entries().is_empty());
        assert_eq!(
            ComponentKind::Wire.default_properties().entries(),
            vec![("length", 100.0)]
        );
    }

    #[test]
    fn test_set_dispatch() {
        let mut c = ComponentKind::Capacitor.default_properties();
        c.set("capacitance", 470.0).unwrap();
        assert_eq!(c.label(), "470μF");

        let mut g = Component::Ground;
        assert!(g.set("length", 1.0).is_err());

        let mut w = ComponentKind::Wire.default_properties();
        w.set("length", 60.0).unwrap();
        assert_eq!(w.entries(), vec![("length", 60.0)]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ComponentKind::Resistor.default_properties().label(), "1kΩ");
        assert_eq!(ComponentKind::Capacitor.default_properties().label(), "100μF");
        assert_eq!(ComponentKind::AcSource.default_properties().label(), "AC");
    }
}
