//! Series/parallel resistance fold.

use std::collections::HashSet;

use tracing::debug;

use crate::circuit::{Circuit, TerminalId, Wire};
use crate::components::{Component, VoltageSource};
use crate::error::{CircuitSimError, Result};

use super::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use super::index::WireIndex;
use super::DEFAULT_MIN_BRANCH_RESISTANCE;

/// Configuration for the resistance solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Report every terminal visit and target hit as a diagnostic.
    pub trace_visits: bool,
    /// Parallel branches must resolve to more than this many ohms to be combined.
    pub min_branch_resistance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            trace_visits: true,
            min_branch_resistance: DEFAULT_MIN_BRANCH_RESISTANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable per-terminal trace diagnostics.
    pub fn with_trace_visits(mut self, trace_visits: bool) -> Self {
        self.trace_visits = trace_visits;
        self
    }

    /// Set the branch threshold (in ohms). Negative values are clamped to 0.
    pub fn with_min_branch_resistance(mut self, ohms: f64) -> Self {
        self.min_branch_resistance = ohms.max(0.0);
        self
    }
}

/// Result of a full analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    /// Name of the measured voltage source
    pub source: String,
    /// Source voltage in volts
    pub source_voltage: f64,
    /// Equivalent resistance seen by the source, in ohms
    pub resistance: f64,
    /// Current drawn from the source (V / R); `None` when R is zero
    pub source_current: Option<f64>,
    /// Number of distinct terminals the traversal entered
    pub visited_terminals: usize,
}

/// Computes the resistance a voltage source sees by folding the network
/// into series and parallel groups.
///
/// The fold walks wires depth-first from the source's positive terminal to
/// its negative terminal:
///
/// - A wire with one other terminal is a series step: if that terminal
///   belongs to a resistor, its resistance is added and the walk continues
///   from the resistor's far end.
/// - A wire with several other terminals is a junction: each resistor on it
///   starts a branch, and branches are combined by summing conductances.
/// - A wire touching the negative terminal ends the walk.
///
/// Each terminal is entered at most once per solve, so the walk terminates
/// on any graph, including ones with loops. A revisited terminal contributes
/// nothing. Topologies that are not series/parallel reducible (bridges,
/// several sources) produce an approximation, not an error.
#[derive(Debug, Clone, Default)]
pub struct ResistanceSolver {
    config: SolverConfig,
}

impl ResistanceSolver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Equivalent resistance, with diagnostics forwarded to `tracing`.
    pub fn solve(&self, circuit: &Circuit) -> Result<f64> {
        self.solve_with(circuit, &mut TracingSink)
    }

    /// Equivalent resistance, with diagnostics delivered to `sink`.
    pub fn solve_with(&self, circuit: &Circuit, sink: &mut dyn DiagnosticSink) -> Result<f64> {
        self.analyze_with(circuit, sink).map(|report| report.resistance)
    }

    /// Full analysis, with diagnostics forwarded to `tracing`.
    pub fn analyze(&self, circuit: &Circuit) -> Result<SolveReport> {
        self.analyze_with(circuit, &mut TracingSink)
    }

    /// Full analysis, with diagnostics delivered to `sink`.
    pub fn analyze_with(&self, circuit: &Circuit, sink: &mut dyn DiagnosticSink) -> Result<SolveReport> {
        let source = select_source(circuit, sink)?;
        let index = WireIndex::build(circuit, sink);

        let mut traversal = Traversal {
            circuit,
            index: &index,
            config: &self.config,
            target: source.negative(),
            visited: HashSet::new(),
            sink,
        };
        let resistance = traversal.resistance_from(source.positive())?;
        let visited_terminals = traversal.visited.len();

        let source_current = if resistance > 0.0 {
            Some(source.voltage() / resistance)
        } else {
            None
        };

        debug!(
            source = %source.name,
            resistance,
            visited_terminals,
            "solved equivalent resistance"
        );

        Ok(SolveReport {
            source: source.name.clone(),
            source_voltage: source.voltage(),
            resistance,
            source_current,
            visited_terminals,
        })
    }
}

/// Pick the first voltage source in component order.
fn select_source<'c>(circuit: &'c Circuit, sink: &mut dyn DiagnosticSink) -> Result<&'c VoltageSource> {
    let mut sources = circuit.voltage_sources();
    let source = sources.next().ok_or(CircuitSimError::NoSourceFound)?;

    let ignored: Vec<String> = sources.map(|v| v.name.clone()).collect();
    if !ignored.is_empty() {
        sink.report(Diagnostic::MultipleSources {
            used: source.name.clone(),
            ignored,
        });
    }
    Ok(source)
}

/// State of one solve: the read-only graph plus the visited set.
struct Traversal<'a> {
    circuit: &'a Circuit,
    index: &'a WireIndex,
    config: &'a SolverConfig,
    target: TerminalId,
    visited: HashSet<TerminalId>,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Traversal<'a> {
    /// Resistance from `terminal` to the target along unvisited terminals.
    fn resistance_from(&mut self, terminal: TerminalId) -> Result<f64> {
        if !self.visited.insert(terminal) {
            return Ok(0.0);
        }
        self.trace(|label| Diagnostic::Visit { terminal: label }, terminal);

        let circuit = self.circuit;
        let wire = self
            .index
            .wire_at(terminal)
            .and_then(|id| circuit.wire(id))
            .ok_or_else(|| CircuitSimError::DisconnectedTerminal {
                terminal: circuit.terminal_label(terminal),
            })?;

        if wire.contains(self.target) {
            self.trace(|label| Diagnostic::TargetReached { terminal: label }, terminal);
            return Ok(0.0);
        }

        let others: Vec<TerminalId> = wire.others(terminal).collect();
        match others.as_slice() {
            [] => Ok(0.0),
            [other] => self.series(terminal, *other),
            _ => self.parallel(wire, &others),
        }
    }

    /// Step across the single other terminal on a two-terminal wire.
    fn series(&mut self, from: TerminalId, other: TerminalId) -> Result<f64> {
        let circuit = self.circuit;
        let Some(component) = circuit.owner(other) else {
            return Ok(0.0);
        };

        match component {
            Component::Resistor(resistor) => {
                let far = far_end(component, other);
                Ok(resistor.resistance() + self.resistance_from(far)?)
            }
            _ => {
                self.sink.report(Diagnostic::NonResistiveStep {
                    terminal: circuit.terminal_label(from),
                    component: format!("{} ({})", component.name(), component.kind_name()),
                });
                Ok(0.0)
            }
        }
    }

    /// Fold every resistor branch leaving a junction into one value.
    fn parallel(&mut self, junction: &Wire, others: &[TerminalId]) -> Result<f64> {
        let circuit = self.circuit;
        let mut branches = Vec::with_capacity(others.len());

        for &other in others {
            let Some(component) = circuit.owner(other) else {
                continue;
            };
            if let Component::Resistor(resistor) = component {
                let far = far_end(component, other);
                branches.push(resistor.resistance() + self.resistance_from(far)?);
            }
        }

        Ok(self.combine_parallel(&junction.name, &branches))
    }

    fn combine_parallel(&mut self, junction: &str, branches: &[f64]) -> f64 {
        let mut conductance = 0.0;
        for &branch in branches {
            if branch > self.config.min_branch_resistance {
                conductance += 1.0 / branch;
            } else {
                self.sink.report(Diagnostic::InvalidBranchResistance {
                    junction: junction.to_string(),
                    resistance: branch,
                });
            }
        }

        if conductance > 0.0 {
            1.0 / conductance
        } else {
            self.sink.report(Diagnostic::NoValidParallelBranches {
                junction: junction.to_string(),
            });
            0.0
        }
    }

    fn trace(&mut self, make: impl FnOnce(String) -> Diagnostic, terminal: TerminalId) {
        if self.config.trace_visits {
            let label = self.circuit.terminal_label(terminal);
            self.sink.report(make(label));
        }
    }
}

/// The terminal of a two-terminal component opposite `terminal`.
fn far_end(component: &Component, terminal: TerminalId) -> TerminalId {
    // `terminal` was reached through its owner, so it is always one of the two.
    component.far_terminal(terminal).unwrap_or(terminal)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::dsl;
    use crate::solver::{Console, NullSink};

    /// Circuit with a 10 V source `V1`; returns (circuit, positive, negative).
    fn with_source() -> (Circuit, TerminalId, TerminalId) {
        let mut c = Circuit::new();
        c.add_voltage_source("V1", 10.0).unwrap();
        let p = c.find_terminal("V1:pos").unwrap();
        let n = c.find_terminal("V1:neg").unwrap();
        (c, p, n)
    }

    fn resistor(c: &mut Circuit, name: &str, ohms: f64) -> (TerminalId, TerminalId) {
        let id = c.add_resistor(name, ohms).unwrap();
        let [a, b] = *c.component(id).unwrap().terminals();
        (a, b)
    }

    fn wire(c: &mut Circuit, terminals: &[TerminalId]) {
        let name = format!("W{}", c.wires().len() + 1);
        c.connect(&name, terminals).unwrap();
    }

    fn solve(c: &Circuit) -> f64 {
        ResistanceSolver::new().solve_with(c, &mut NullSink).unwrap()
    }

    #[test]
    fn test_single_resistor() {
        let (mut c, p, n) = with_source();
        let (a, b) = resistor(&mut c, "R1", 10.0);
        wire(&mut c, &[p, a]);
        wire(&mut c, &[b, n]);

        assert_relative_eq!(solve(&c), 10.0);
    }

    #[test]
    fn test_series_chain() {
        let (mut c, p, n) = with_source();
        let values = [10.0, 22.0, 47.0, 100.0];
        let mut previous = p;
        for (i, &r) in values.iter().enumerate() {
            let (a, b) = resistor(&mut c, &format!("R{}", i + 1), r);
            wire(&mut c, &[previous, a]);
            previous = b;
        }
        wire(&mut c, &[previous, n]);

        assert_relative_eq!(solve(&c), values.iter().sum::<f64>());
    }

    #[test]
    fn test_parallel_group() {
        let (mut c, p, n) = with_source();
        let values = [100.0, 220.0, 330.0];
        let mut top = vec![p];
        let mut bottom = Vec::new();
        for (i, &r) in values.iter().enumerate() {
            let (a, b) = resistor(&mut c, &format!("R{}", i + 1), r);
            top.push(a);
            bottom.push(b);
        }
        bottom.push(n);
        wire(&mut c, &top);
        wire(&mut c, &bottom);

        let expected = 1.0 / values.iter().map(|r| 1.0 / r).sum::<f64>();
        assert_relative_eq!(solve(&c), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_series_then_parallel() {
        let (mut c, p, n) = with_source();
        let (r1a, r1b) = resistor(&mut c, "R1", 100.0);
        let (r2a, r2b) = resistor(&mut c, "R2", 220.0);
        let (r3a, r3b) = resistor(&mut c, "R3", 330.0);
        wire(&mut c, &[p, r1a]);
        wire(&mut c, &[r1b, r2a, r3a]);
        wire(&mut c, &[r2b, r3b, n]);

        let expected = 100.0 + 1.0 / (1.0 / 220.0 + 1.0 / 330.0);
        assert_relative_eq!(solve(&c), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_parallel_series_branches() {
        // (R1 + R2) || (R3 + R4)
        let (mut c, p, n) = with_source();
        let (r1a, r1b) = resistor(&mut c, "R1", 10.0);
        let (r2a, r2b) = resistor(&mut c, "R2", 20.0);
        let (r3a, r3b) = resistor(&mut c, "R3", 30.0);
        let (r4a, r4b) = resistor(&mut c, "R4", 60.0);
        wire(&mut c, &[p, r1a, r3a]);
        wire(&mut c, &[r1b, r2a]);
        wire(&mut c, &[r3b, r4a]);
        wire(&mut c, &[r2b, r4b, n]);

        let expected = 1.0 / (1.0 / 30.0 + 1.0 / 90.0);
        assert_relative_eq!(solve(&c), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_solve_is_idempotent() {
        let (mut c, p, n) = with_source();
        let (r1a, r1b) = resistor(&mut c, "R1", 100.0);
        let (r2a, r2b) = resistor(&mut c, "R2", 220.0);
        let (r3a, r3b) = resistor(&mut c, "R3", 330.0);
        wire(&mut c, &[p, r1a]);
        wire(&mut c, &[r1b, r2a, r3a]);
        wire(&mut c, &[r2b, r3b, n]);

        let solver = ResistanceSolver::new();
        let first = solver.solve_with(&c, &mut NullSink).unwrap();
        let second = solver.solve_with(&c, &mut NullSink).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_loop_terminates_and_visits_each_terminal_once() {
        // R4 and R5 form a ring hanging off the R1/R2 junction.
        let (mut c, p, n) = with_source();
        let (r1a, r1b) = resistor(&mut c, "R1", 10.0);
        let (r2a, r2b) = resistor(&mut c, "R2", 20.0);
        let (r4a, r4b) = resistor(&mut c, "R4", 30.0);
        let (r5a, r5b) = resistor(&mut c, "R5", 40.0);
        wire(&mut c, &[p, r1a]);
        wire(&mut c, &[r1b, r2a, r4a, r5b]);
        wire(&mut c, &[r2b, n]);
        wire(&mut c, &[r4b, r5a]);

        let mut console = Console::new();
        let report = ResistanceSolver::new().analyze_with(&c, &mut console).unwrap();

        // Inside the ring each side re-enters the junction, where the
        // already-entered terminals contribute nothing.
        let via_r4 = 30.0 + 40.0 + 1.0 / (1.0 / 10.0 + 1.0 / 20.0 + 1.0 / 30.0);
        let via_r5 = 40.0 + 30.0 + 1.0 / (1.0 / 10.0 + 1.0 / 20.0 + 1.0 / 40.0);
        let expected = 10.0 + 1.0 / (1.0 / 20.0 + 1.0 / via_r4 + 1.0 / via_r5);
        assert_relative_eq!(report.resistance, expected, epsilon = 1e-9);

        // Every terminal except V1:neg and R2:a is entered exactly once.
        assert_eq!(report.visited_terminals, 8);
        assert!(console
            .diagnostics()
            .iter()
            .any(|d| matches!(d, Diagnostic::NonResistiveStep { .. })));

        let visits: Vec<&Diagnostic> = console
            .diagnostics()
            .iter()
            .filter(|d| matches!(d, Diagnostic::Visit { .. }))
            .collect();
        assert_eq!(visits.len(), report.visited_terminals);
        let unique: HashSet<String> = visits.iter().map(|d| d.to_string()).collect();
        assert_eq!(unique.len(), visits.len());
    }

    #[test]
    fn test_zero_ohm_branch_is_skipped() {
        let (mut c, p, n) = with_source();
        let (r1a, r1b) = resistor(&mut c, "R1", 10.0);
        let (r2a, r2b) = resistor(&mut c, "R2", 0.0);
        wire(&mut c, &[p, r1a, r2a]);
        wire(&mut c, &[r1b, r2b, n]);

        let mut console = Console::new();
        let r = ResistanceSolver::new().solve_with(&c, &mut console).unwrap();

        assert_relative_eq!(r, 10.0);
        assert_eq!(
            console.warnings().cloned().collect::<Vec<_>>(),
            vec![Diagnostic::InvalidBranchResistance {
                junction: "W1".to_string(),
                resistance: 0.0,
            }]
        );
    }

    #[test]
    fn test_no_valid_parallel_branches() {
        let (mut c, p, n) = with_source();
        let (r1a, r1b) = resistor(&mut c, "R1", 0.0);
        let (r2a, r2b) = resistor(&mut c, "R2", 0.0);
        wire(&mut c, &[p, r1a, r2a]);
        wire(&mut c, &[r1b, r2b, n]);

        let mut console = Console::new();
        let r = ResistanceSolver::new().solve_with(&c, &mut console).unwrap();

        assert_eq!(r, 0.0);
        assert_eq!(console.warnings().count(), 3);
        assert!(console
            .diagnostics()
            .contains(&Diagnostic::NoValidParallelBranches {
                junction: "W1".to_string()
            }));
    }

    #[test]
    fn test_min_branch_resistance_threshold() {
        let (mut c, p, n) = with_source();
        let (r1a, r1b) = resistor(&mut c, "R1", 10.0);
        let (r2a, r2b) = resistor(&mut c, "R2", 100.0);
        wire(&mut c, &[p, r1a, r2a]);
        wire(&mut c, &[r1b, r2b, n]);

        let solver = ResistanceSolver::with_config(SolverConfig::new().with_min_branch_resistance(50.0));
        assert_relative_eq!(solver.solve_with(&c, &mut NullSink).unwrap(), 100.0);
    }

    #[test]
    fn test_no_source() {
        let mut c = Circuit::new();
        let (a, b) = resistor(&mut c, "R1", 10.0);
        wire(&mut c, &[a, b]);

        let err = ResistanceSolver::new().solve_with(&c, &mut NullSink).unwrap_err();
        assert!(matches!(err, CircuitSimError::NoSourceFound));
    }

    #[test]
    fn test_disconnected_terminal() {
        let (mut c, p, _n) = with_source();
        let (a, _b) = resistor(&mut c, "R1", 10.0);
        wire(&mut c, &[p, a]);

        let err = ResistanceSolver::new().solve_with(&c, &mut NullSink).unwrap_err();
        assert!(matches!(err, CircuitSimError::DisconnectedTerminal { terminal } if terminal == "R1:b"));
    }

    #[test]
    fn test_unwired_source() {
        let (c, _p, _n) = with_source();
        let err = ResistanceSolver::new().solve_with(&c, &mut NullSink).unwrap_err();
        assert!(matches!(err, CircuitSimError::DisconnectedTerminal { terminal } if terminal == "V1:pos"));
    }

    #[test]
    fn test_direct_short_is_zero() {
        let (mut c, p, n) = with_source();
        wire(&mut c, &[p, n]);

        let report = ResistanceSolver::new().analyze_with(&c, &mut NullSink).unwrap();
        assert_eq!(report.resistance, 0.0);
        assert_eq!(report.source_current, None);
    }

    #[test]
    fn test_non_resistive_step_contributes_nothing() {
        let (mut c, p, n) = with_source();
        c.add_device("X1", "lamp").unwrap();
        let xa = c.find_terminal("X1:a").unwrap();
        let xb = c.find_terminal("X1:b").unwrap();
        wire(&mut c, &[p, xa]);
        wire(&mut c, &[xb, n]);

        let mut console = Console::new();
        let r = ResistanceSolver::new().solve_with(&c, &mut console).unwrap();

        assert_eq!(r, 0.0);
        assert!(console.diagnostics().contains(&Diagnostic::NonResistiveStep {
            terminal: "V1:pos".to_string(),
            component: "X1 (lamp)".to_string(),
        }));
    }

    #[test]
    fn test_first_source_is_measured() {
        let (mut c, p, n) = with_source();
        c.add_voltage_source("V2", 1.0).unwrap();
        let (a, b) = resistor(&mut c, "R1", 10.0);
        wire(&mut c, &[p, a]);
        wire(&mut c, &[b, n]);

        let mut console = Console::new();
        let report = ResistanceSolver::new().analyze_with(&c, &mut console).unwrap();

        assert_eq!(report.source, "V1");
        assert_relative_eq!(report.source_current.unwrap(), 1.0);
        assert_eq!(
            console.diagnostics().first(),
            Some(&Diagnostic::MultipleSources {
                used: "V1".to_string(),
                ignored: vec!["V2".to_string()],
            })
        );
    }

    #[test]
    fn test_trace_visits() {
        let (mut c, p, n) = with_source();
        let (a, b) = resistor(&mut c, "R1", 10.0);
        wire(&mut c, &[p, a]);
        wire(&mut c, &[b, n]);

        let mut console = Console::new();
        ResistanceSolver::new().solve_with(&c, &mut console).unwrap();
        assert_eq!(
            console.messages(),
            vec![
                "Current terminal: V1:pos".to_string(),
                "Current terminal: R1:b".to_string(),
                "Target terminal found from R1:b".to_string(),
            ]
        );

        let quiet = ResistanceSolver::with_config(SolverConfig::new().with_trace_visits(false));
        let mut console = Console::new();
        quiet.solve_with(&c, &mut console).unwrap();
        assert!(console.is_empty());
    }

    #[test]
    fn test_from_dsl() {
        let ast = dsl::parse("V1 5\nR1 10\nW1 V1:pos R1:a\nW2 R1:b V1:neg\n").unwrap();
        let c = Circuit::from_ast(ast).unwrap();

        let report = ResistanceSolver::new().analyze(&c).unwrap();
        assert_relative_eq!(report.resistance, 10.0);
        assert_relative_eq!(report.source_voltage, 5.0);
        assert_relative_eq!(report.source_current.unwrap(), 0.5);
        assert_eq!(report.visited_terminals, 2);
    }
}
