//! The circuit workspace: placed components and the wires between them.

use crate::components::{Component, ComponentKind};
use crate::error::{RectifierError, Result};
use crate::model::{CircuitConfig, Topology};

use super::types::{ComponentId, Point, WireId, HIT_RADIUS, TERMINAL_OFFSET};
use super::validate::{analyze_circuit, CircuitAnalysis};

/// A component placed on the workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedComponent {
    pub id: ComponentId,
    /// Centre of the symbol, always on the grid
    pub position: Point,
    pub component: Component,
    /// Components wired to this one
    pub connections: Vec<ComponentId>,
}

impl PlacedComponent {
    pub fn kind(&self) -> ComponentKind {
        self.component.kind()
    }

    /// Right-hand wire terminal.
    pub fn output_terminal(&self) -> Point {
        Point::new(self.position.x + TERMINAL_OFFSET, self.position.y)
    }

    /// Left-hand wire terminal.
    pub fn input_terminal(&self) -> Point {
        Point::new(self.position.x - TERMINAL_OFFSET, self.position.y)
    }
}

/// A straight wire between two components.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub id: WireId,
    pub from: ComponentId,
    pub to: ComponentId,
    pub points: [Point; 2],
}

/// The drag-and-drop circuit workspace.
///
/// Holds placement, wiring, selection and drag state. Rendering is left to
/// the caller.
#[derive(Debug, Default)]
pub struct Workspace {
    components: Vec<PlacedComponent>,
    wires: Vec<Wire>,
    selected: Option<ComponentId>,
    dragging: bool,
    drag_offset: Point,
    next_id: u64,
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// All placed components, in placement order.
    pub fn components(&self) -> &[PlacedComponent] {
        &self.components
    }

    /// All wires, in creation order.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// The selected component id, if any.
    pub fn selected(&self) -> Option<ComponentId> {
        self.selected
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Look up a component by id.
    pub fn component(&self, id: ComponentId) -> Option<&PlacedComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    fn component_mut(&mut self, id: ComponentId) -> Result<&mut PlacedComponent> {
        self.components
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RectifierError::ComponentNotFound { id: id.0 })
    }

    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Drop a component with default properties at `(x, y)`, snapped to the grid.
    pub fn add_component(&mut self, kind: ComponentKind, x: f64, y: f64) -> ComponentId {
        let id = ComponentId(self.fresh_id());
        let position = Point::new(x, y).snapped();
        tracing::debug!(%id, %kind, x = position.x, y = position.y, "placing component");

        self.components.push(PlacedComponent {
            id,
            position,
            component: kind.default_properties(),
            connections: Vec::new(),
        });
        id
    }

    /// Wire the components at placement indices `from` and `to`.
    pub fn add_wire(&mut self, from: usize, to: usize) -> Result<WireId> {
        let count = self.components.len();
        for index in [from, to] {
            if index >= count {
                return Err(RectifierError::InvalidWireEndpoint { index, count });
            }
        }

        let from_id = self.components[from].id;
        let to_id = self.components[to].id;
        let points = [
            self.components[from].output_terminal(),
            self.components[to].input_terminal(),
        ];

        self.components[from].connections.push(to_id);
        self.components[to].connections.push(from_id);

        let id = WireId(self.fresh_id());
        tracing::debug!(%id, from = %from_id, to = %to_id, "adding wire");
        self.wires.push(Wire {
            id,
            from: from_id,
            to: to_id,
            points,
        });
        Ok(id)
    }

    /// Remove everything and clear the selection.
    pub fn clear(&mut self) {
        self.components.clear();
        self.wires.clear();
        self.selected = None;
        self.dragging = false;
    }

    /// Lay out the basic half-wave rectifier.
    pub fn build_half_wave(&mut self) -> Result<()> {
        tracing::info!("building half-wave rectifier");
        self.clear();

        self.add_component(ComponentKind::AcSource, 100.0, 200.0);
        self.add_component(ComponentKind::Diode, 250.0, 200.0);
        self.add_component(ComponentKind::Resistor, 400.0, 200.0);
        self.add_component(ComponentKind::Ground, 550.0, 200.0);

        self.add_wire(0, 1)?; // source to diode
        self.add_wire(1, 2)?; // diode to load
        self.add_wire(2, 3)?; // load to ground
        Ok(())
    }

    /// Lay out the half-wave rectifier with a smoothing capacitor.
    pub fn build_half_wave_with_filter(&mut self) -> Result<()> {
        tracing::info!("building half-wave rectifier with filter");
        self.clear();

        self.add_component(ComponentKind::AcSource, 100.0, 200.0);
        self.add_component(ComponentKind::Diode, 250.0, 200.0);
        self.add_component(ComponentKind::Capacitor, 350.0, 150.0);
        self.add_component(ComponentKind::Resistor, 400.0, 200.0);
        self.add_component(ComponentKind::Ground, 550.0, 200.0);

        self.add_wire(0, 1)?; // source to diode
        self.add_wire(1, 2)?; // diode to capacitor
        self.add_wire(1, 3)?; // diode to load
        self.add_wire(2, 4)?; // capacitor to ground
        self.add_wire(3, 4)?; // load to ground
        Ok(())
    }

    /// First component whose centre lies within [`HIT_RADIUS`] of `(x, y)`.
    pub fn find_component_at(&self, x: f64, y: f64) -> Option<&PlacedComponent> {
        let pointer = Point::new(x, y);
        self.components
            .iter()
            .find(|c| c.position.distance(pointer) < HIT_RADIUS)
    }

    /// Handle a pointer press: select and start dragging the component
    /// under the pointer, or clear the selection on a miss.
    pub fn select_at(&mut self, x: f64, y: f64) -> Option<ComponentId> {
        match self.find_component_at(x, y).map(|c| (c.id, c.position)) {
            Some((id, position)) => {
                self.selected = Some(id);
                self.dragging = true;
                self.drag_offset = Point::new(x - position.x, y - position.y);
                Some(id)
            }
            None => {
                self.selected = None;
                self.dragging = false;
                None
            }
        }
    }

    /// Handle pointer motion. Returns true if a component moved.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let Some(id) = self.selected.filter(|_| self.dragging) else {
            return false;
        };

        let target = Point::new(x - self.drag_offset.x, y - self.drag_offset.y).snapped();
        let Ok(placed) = self.component_mut(id) else {
            return false;
        };
        if placed.position == target {
            return false;
        }
        placed.position = target;
        self.reroute_wires(id);
        true
    }

    /// Handle pointer release.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Recompute the endpoints of wires touching a moved component.
    fn reroute_wires(&mut self, moved: ComponentId) {
        let components = &self.components;
        for wire in self.wires.iter_mut().filter(|w| w.from == moved || w.to == moved) {
            let from = components.iter().find(|c| c.id == wire.from);
            let to = components.iter().find(|c| c.id == wire.to);
            if let (Some(from), Some(to)) = (from, to) {
                wire.points = [from.output_terminal(), to.input_terminal()];
            }
        }
    }

    /// Edit a numeric property of a placed component.
    pub fn update_property(&mut self, id: ComponentId, property: &str, value: f64) -> Result<()> {
        tracing::debug!(%id, property, value, "updating property");
        self.component_mut(id)?.component.set(property, value)
    }

    /// Properties of a component for the properties panel.
    pub fn properties(&self, id: ComponentId) -> Result<Vec<(&'static str, f64)>> {
        self.component(id)
            .map(|c| c.component.entries())
            .ok_or(RectifierError::ComponentNotFound { id: id.0 })
    }

    /// Classify the current circuit.
    pub fn analyze(&self) -> CircuitAnalysis {
        analyze_circuit(&self.components)
    }

    /// Derive the model configuration from the placed parts.
    ///
    /// Uses the first source, diode, resistor and capacitor found. A
    /// missing source falls back to the default 6V / 50Hz supply.
    pub fn to_config(&self) -> Result<CircuitConfig> {
        let analysis = self.analyze();
        let topology = analysis.topology().ok_or_else(|| {
            RectifierError::invalid_circuit("a rectifier needs at least a diode and a resistor")
        })?;

        let mut config = CircuitConfig::new().with_topology(topology);
        let mut seen_source = false;
        let mut seen_diode = false;
        let mut seen_resistor = false;
        let mut seen_capacitor = false;

        for placed in &self.components {
            match &placed.component {
                Component::AcSource(src) if !seen_source => {
                    seen_source = true;
                    config = config
                        .with_input_voltage_rms(src.voltage)
                        .with_frequency(src.frequency)
                        .with_phase(src.phase_radians());
                }
                Component::Diode(d) if !seen_diode => {
                    seen_diode = true;
                    config = config.with_diode_drop(d.vf);
                }
                Component::Resistor(r) if !seen_resistor => {
                    seen_resistor = true;
                    config = config.with_load_resistance(r.resistance);
                }
                Component::Capacitor(c) if !seen_capacitor => {
                    seen_capacitor = true;
                    config = config.with_capacitance_micro_farads(c.capacitance);
                }
                _ => {}
            }
        }

        if topology == Topology::WithoutFilter {
            tracing::debug!("no capacitor placed; capacitance left at default");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CircuitKind;

    #[test]
    fn test_add_component_snaps_to_grid() {
        let mut ws = Workspace::new();
        let id = ws.add_component(ComponentKind::Diode, 253.0, 191.0);
        let placed = ws.component(id).unwrap();
        assert_eq!(placed.position, Point::new(260.0, 200.0));
        assert_eq!(placed.kind(), ComponentKind::Diode);
        assert_eq!(ws.selected(), None);
    }

    #[test]
    fn test_half_wave_preset() {
        let mut ws = Workspace::new();
        ws.build_half_wave().unwrap();
        assert_eq!(ws.components().len(), 4);
        assert_eq!(ws.wires().len(), 3);

        let analysis = ws.analyze();
        assert_eq!(analysis.kind, CircuitKind::HalfWave);
        assert_eq!(analysis.component_count, 4);
        assert!(analysis.is_valid);

        // diode placed at x=250 lands on 260
        assert_eq!(ws.components()[1].position, Point::new(260.0, 200.0));
        assert_eq!(ws.wires()[0].points, [Point::new(140.0, 200.0), Point::new(220.0, 200.0)]);
    }

    #[test]
    fn test_filter_preset() {
        let mut ws = Workspace::new();
        ws.build_half_wave_with_filter().unwrap();
        assert_eq!(ws.components().len(), 5);
        assert_eq!(ws.wires().len(), 5);
        assert_eq!(ws.analyze().kind, CircuitKind::HalfWaveWithFilter);

        let diode = &ws.components()[1];
        assert_eq!(diode.connections.len(), 3);
    }

    #[test]
    fn test_presets_replace_previous_layout() {
        let mut ws = Workspace::new();
        ws.build_half_wave_with_filter().unwrap();
        ws.build_half_wave().unwrap();
        assert_eq!(ws.components().len(), 4);
        assert_eq!(ws.wires().len(), 3);
    }

    #[test]
    fn test_invalid_circuit() {
        let mut ws = Workspace::new();
        ws.add_component(ComponentKind::AcSource, 100.0, 100.0);
        ws.add_component(ComponentKind::Capacitor, 200.0, 100.0);

        let analysis = ws.analyze();
        assert_eq!(analysis.kind, CircuitKind::Invalid);
        assert!(!analysis.is_valid);
        assert_eq!(
            analysis.to_string(),
            "Circuit Analysis:\nType: Invalid Circuit\nComponents: 2\nValid: No"
        );
        assert!(matches!(ws.to_config(), Err(RectifierError::InvalidCircuit { .. })));
    }

    #[test]
    fn test_wire_index_out_of_range() {
        let mut ws = Workspace::new();
        ws.add_component(ComponentKind::Diode, 0.0, 0.0);
        let err = ws.add_wire(0, 3).unwrap_err();
        assert!(matches!(err, RectifierError::InvalidWireEndpoint { index: 3, count: 1 }));
        assert!(ws.wires().is_empty());
    }

    #[test]
    fn test_select_and_drag() {
        let mut ws = Workspace::new();
        ws.build_half_wave().unwrap();

        // press 10px right of the resistor centre (400, 200)
        let id = ws.select_at(410.0, 200.0).unwrap();
        assert_eq!(ws.component(id).unwrap().kind(), ComponentKind::Resistor);
        assert!(ws.is_dragging());

        assert!(ws.drag_to(473.0, 262.0));
        assert_eq!(ws.component(id).unwrap().position, Point::new(460.0, 260.0));

        // wire from diode to resistor now ends at the moved terminal
        assert_eq!(ws.wires()[1].points[1], Point::new(420.0, 260.0));

        ws.release();
        assert!(!ws.drag_to(600.0, 600.0));
        assert_eq!(ws.component(id).unwrap().position, Point::new(460.0, 260.0));
    }

    #[test]
    fn test_drag_past_origin_snaps_upwards() {
        let mut ws = Workspace::new();
        let id = ws.add_component(ComponentKind::Diode, 0.0, 0.0);

        // grab 15px right of centre, then move so the centre lands at x = -10
        ws.select_at(15.0, 0.0).unwrap();
        assert!(ws.drag_to(5.0, 40.0));
        assert_eq!(ws.component(id).unwrap().position, Point::new(0.0, 40.0));
    }

    #[test]
    fn test_click_on_empty_space_deselects() {
        let mut ws = Workspace::new();
        ws.build_half_wave().unwrap();
        ws.select_at(100.0, 200.0).unwrap();
        assert!(ws.select_at(700.0, 20.0).is_none());
        assert_eq!(ws.selected(), None);
        assert!(!ws.is_dragging());
    }

    #[test]
    fn test_to_config_from_properties() {
        let mut ws = Workspace::new();
        ws.build_half_wave_with_filter().unwrap();
        let source = ws.components()[0].id;
        let capacitor = ws.components()[2].id;
        let resistor = ws.components()[3].id;

        ws.update_property(source, "voltage", 12.0).unwrap();
        ws.update_property(capacitor, "capacitance", 470.0).unwrap();
        ws.update_property(resistor, "resistance", 2200.0).unwrap();

        let config = ws.to_config().unwrap();
        assert_eq!(config.topology, Topology::WithFilter);
        assert_eq!(config.input_voltage_rms, 12.0);
        assert_eq!(config.capacitance_micro_farads, 470.0);
        assert_eq!(config.load_resistance_ohms, 2200.0);
        assert_eq!(config.diode_forward_drop_volts, 0.7);
    }

    #[test]
    fn test_update_unknown_property_and_component() {
        let mut ws = Workspace::new();
        ws.build_half_wave().unwrap();
        let diode = ws.components()[1].id;
        assert!(ws.update_property(diode, "resistance", 1.0).is_err());
        assert!(matches!(
            ws.update_property(ComponentId(999), "voltage", 1.0),
            Err(RectifierError::ComponentNotFound { id: 999 })
        ));
        assert_eq!(
            ws.properties(diode).unwrap(),
            vec![("forwardVoltage", 0.7), ("maxCurrent", 1.0)]
        );
    }

    #[test]
    fn test_clear() {
        let mut ws = Workspace::new();
        ws.build_half_wave().unwrap();
        ws.select_at(100.0, 200.0);
        ws.clear();
        assert!(ws.components().is_empty());
        assert!(ws.wires().is_empty());
        assert_eq!(ws.selected(), None);
    }
}
