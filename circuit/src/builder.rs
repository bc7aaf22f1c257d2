//! Symbolic constraint recording.

use std::collections::HashMap;

use field::Fr;
use serde::{Deserialize, Serialize};

use crate::api::{compare, Circuit, CircuitApi, Derived, Slot, Visibility};
use crate::assignment::Assignment;
use crate::error::{AssertionKind, CircuitError, Result, Violation};
use crate::evaluator::Evaluation;

/// Index of a gate output in a [`ConstraintSystem`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Wire(pub usize);

/// A node of the constraint graph. Operands always refer to earlier gates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    /// Value of the input slot at this position.
    Input { slot: usize },
    Constant(Fr),
    Add(Wire, Wire),
    Mul(Wire, Wire),
    /// `-1`, `0` or `1` on canonical representatives.
    Cmp(Wire, Wire),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    pub kind: AssertionKind,
    pub lhs: Wire,
    pub rhs: Wire,
    pub section: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSlot {
    pub name: String,
    pub visibility: Visibility,
    pub wire: Wire,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSlot {
    pub name: String,
    pub wire: Wire,
}

/// Gate and assertion counts of a compiled circuit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintStats {
    pub public_inputs: usize,
    pub secret_inputs: usize,
    pub constants: usize,
    pub additions: usize,
    pub multiplications: usize,
    pub comparisons: usize,
    pub assertions: usize,
}

/// The constraint graph a proof backend consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSystem {
    pub inputs: Vec<InputSlot>,
    pub gates: Vec<Gate>,
    pub assertions: Vec<Assertion>,
    pub outputs: Vec<OutputSlot>,
}

impl ConstraintSystem {
    pub fn slots(&self) -> Vec<Slot> {
        self.inputs
            .iter()
            .map(|input| Slot {
                name: input.name.clone(),
                visibility: input.visibility,
            })
            .collect()
    }

    pub fn stats(&self) -> ConstraintStats {
        let mut stats = ConstraintStats {
            assertions: self.assertions.len(),
            ..Default::default()
        };
        for input in &self.inputs {
            match input.visibility {
                Visibility::Public => stats.public_inputs += 1,
                Visibility::Secret => stats.secret_inputs += 1,
            }
        }
        for gate in &self.gates {
            match gate {
                Gate::Input { .. } => {}
                Gate::Constant(_) => stats.constants += 1,
                Gate::Add(..) => stats.additions += 1,
                Gate::Mul(..) => stats.multiplications += 1,
                Gate::Cmp(..) => stats.comparisons += 1,
            }
        }
        stats
    }

    /// Replay the graph on a concrete assignment.
    ///
    /// A structurally malformed graph is reported as an error before any gate runs.
    pub fn check(&self, assignment: &Assignment) -> Result<Evaluation> {
        self.validate()?;
        let mut values: Vec<Fr> = Vec::with_capacity(self.gates.len());
        for gate in &self.gates {
            let value = match *gate {
                Gate::Input { slot } => {
                    let name = &self.inputs[slot].name;
                    assignment
                        .get(name)
                        .ok_or_else(|| CircuitError::MissingInput(name.clone()))?
                }
                Gate::Constant(c) => c,
                Gate::Add(a, b) => values[a.0] + values[b.0],
                Gate::Mul(a, b) => values[a.0] * values[b.0],
                Gate::Cmp(a, b) => compare(values[a.0], values[b.0]),
            };
            values.push(value);
        }

        let violations = self
            .assertions
            .iter()
            .enumerate()
            .filter_map(|(index, assertion)| {
                let lhs = values[assertion.lhs.0];
                let rhs = values[assertion.rhs.0];
                (!assertion.kind.holds(lhs, rhs)).then(|| Violation {
                    index,
                    section: assertion.section.clone(),
                    kind: assertion.kind,
                    lhs,
                    rhs,
                })
            })
            .collect();

        let outputs = self
            .outputs
            .iter()
            .map(|output| Derived::new(&output.name, values[output.wire.0]))
            .collect();

        Ok(Evaluation {
            outputs,
            violations,
        })
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let system: Self = postcard::from_bytes(bytes)?;
        system.validate()?;
        Ok(system)
    }

    /// Check that every wire refers to an earlier gate and every input gate to a slot.
    pub fn validate(&self) -> Result<()> {
        let malformed =
            |what: String| CircuitError::Serialization(format!("malformed graph: {what}"));
        for (index, gate) in self.gates.iter().enumerate() {
            let operands = match *gate {
                Gate::Input { slot } => {
                    if self.inputs.get(slot).map(|input| input.wire) != Some(Wire(index)) {
                        return Err(malformed(format!("gate {index} reads unknown slot {slot}")));
                    }
                    continue;
                }
                Gate::Constant(_) => continue,
                Gate::Add(a, b) | Gate::Mul(a, b) | Gate::Cmp(a, b) => [a, b],
            };
            if operands.iter().any(|wire| wire.0 >= index) {
                return Err(malformed(format!("gate {index} reads a later wire")));
            }
        }

        let gates = self.gates.len();
        let wires = self
            .assertions
            .iter()
            .flat_map(|assertion| [assertion.lhs, assertion.rhs])
            .chain(self.inputs.iter().map(|input| input.wire))
            .chain(self.outputs.iter().map(|output| output.wire));
        for wire in wires {
            if wire.0 >= gates {
                return Err(malformed(format!("wire {} out of range", wire.0)));
            }
        }
        Ok(())
    }
}

/// [`CircuitApi`] implementation recording gates instead of computing values.
#[derive(Debug, Default)]
pub struct ConstraintBuilder {
    system: ConstraintSystem,
    constants: HashMap<Fr, Wire>,
    section: Option<&'static str>,
}

impl ConstraintBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, gate: Gate) -> Wire {
        let wire = Wire(self.system.gates.len());
        self.system.gates.push(gate);
        wire
    }

    fn assert(&mut self, kind: AssertionKind, lhs: Wire, rhs: Wire) {
        self.system.assertions.push(Assertion {
            kind,
            lhs,
            rhs,
            section: self.section.map(str::to_string),
        });
    }

    /// Expose `wire` as a named output.
    pub fn output(&mut self, name: &str, wire: Wire) {
        self.system.outputs.push(OutputSlot {
            name: name.to_string(),
            wire,
        });
    }

    pub fn build(self) -> ConstraintSystem {
        self.system
    }
}

impl CircuitApi for ConstraintBuilder {
    type Var = Wire;

    fn input(&mut self, name: &str, visibility: Visibility) -> Result<Wire> {
        if self.system.inputs.iter().any(|input| input.name == name) {
            return Err(CircuitError::DuplicateInput(name.to_string()));
        }
        let slot = self.system.inputs.len();
        let wire = self.push(Gate::Input { slot });
        self.system.inputs.push(InputSlot {
            name: name.to_string(),
            visibility,
            wire,
        });
        Ok(wire)
    }

    fn constant(&mut self, value: Fr) -> Wire {
        if let Some(&wire) = self.constants.get(&value) {
            return wire;
        }
        let wire = self.push(Gate::Constant(value));
        self.constants.insert(value, wire);
        wire
    }

    fn add(&mut self, a: Wire, b: Wire) -> Wire {
        self.push(Gate::Add(a, b))
    }

    fn mul(&mut self, a: Wire, b: Wire) -> Wire {
        self.push(Gate::Mul(a, b))
    }

    fn cmp(&mut self, a: Wire, b: Wire) -> Wire {
        self.push(Gate::Cmp(a, b))
    }

    fn assert_equal(&mut self, a: Wire, b: Wire) {
        self.assert(AssertionKind::Equal, a, b);
    }

    fn assert_less_or_equal(&mut self, a: Wire, b: Wire) {
        self.assert(AssertionKind::LessOrEqual, a, b);
    }

    fn section(&mut self, name: &'static str) {
        self.section = Some(name);
    }
}

/// Declare `circuit` symbolically.
pub fn compile<C: Circuit>(circuit: &C) -> Result<ConstraintSystem> {
    let mut builder = ConstraintBuilder::new();
    let derived = circuit.define(&mut builder)?;
    for output in derived {
        builder.output(&output.name, output.value);
    }
    let system = builder.build();

    let stats = system.stats();
    tracing::debug!(
        gates = system.gates.len(),
        multiplications = stats.multiplications,
        comparisons = stats.comparisons,
        assertions = stats.assertions,
        "compiled circuit"
    );
    Ok(system)
}
