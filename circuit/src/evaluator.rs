//! Concrete evaluation of a circuit on a witness.

use std::collections::HashSet;

use field::Fr;

use crate::api::{compare, Circuit, CircuitApi, Derived, Visibility};
use crate::assignment::Assignment;
use crate::error::{AssertionKind, CircuitError, Result, Violation};

/// Derived outputs and violated assertions of one witness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub outputs: Vec<Derived<Fr>>,
    pub violations: Vec<Violation>,
}

impl Evaluation {
    pub fn is_satisfied(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn output(&self, name: &str) -> Option<Fr> {
        self.outputs
            .iter()
            .find(|output| output.name == name)
            .map(|output| output.value)
    }

    /// Outputs if every assertion holds, otherwise [`CircuitError::Unsatisfied`].
    pub fn into_result(self) -> Result<Vec<Derived<Fr>>> {
        match self.violations.first() {
            None => Ok(self.outputs),
            Some(first) => Err(CircuitError::Unsatisfied {
                count: self.violations.len(),
                first: first.clone(),
            }),
        }
    }
}

/// [`CircuitApi`] implementation computing values eagerly from an [`Assignment`].
pub struct WitnessEvaluator<'a> {
    assignment: &'a Assignment,
    declared: HashSet<String>,
    section: Option<&'static str>,
    assertions: usize,
    violations: Vec<Violation>,
}

impl<'a> WitnessEvaluator<'a> {
    pub fn new(assignment: &'a Assignment) -> Self {
        Self {
            assignment,
            declared: HashSet::new(),
            section: None,
            assertions: 0,
            violations: Vec::new(),
        }
    }

    fn assert(&mut self, kind: AssertionKind, lhs: Fr, rhs: Fr) {
        let index = self.assertions;
        self.assertions += 1;
        if !kind.holds(lhs, rhs) {
            tracing::trace!(index, section = ?self.section, %lhs, %rhs, "assertion violated");
            self.violations.push(Violation {
                index,
                section: self.section.map(str::to_string),
                kind,
                lhs,
                rhs,
            });
        }
    }

    pub fn finish(self, outputs: Vec<Derived<Fr>>) -> Evaluation {
        Evaluation {
            outputs,
            violations: self.violations,
        }
    }
}

impl CircuitApi for WitnessEvaluator<'_> {
    type Var = Fr;

    fn input(&mut self, name: &str, _visibility: Visibility) -> Result<Fr> {
        if !self.declared.insert(name.to_string()) {
            return Err(CircuitError::DuplicateInput(name.to_string()));
        }
        self.assignment
            .get(name)
            .ok_or_else(|| CircuitError::MissingInput(name.to_string()))
    }

    fn constant(&mut self, value: Fr) -> Fr {
        value
    }

    fn add(&mut self, a: Fr, b: Fr) -> Fr {
        a + b
    }

    fn mul(&mut self, a: Fr, b: Fr) -> Fr {
        a * b
    }

    fn cmp(&mut self, a: Fr, b: Fr) -> Fr {
        compare(a, b)
    }

    fn assert_equal(&mut self, a: Fr, b: Fr) {
        self.assert(AssertionKind::Equal, a, b);
    }

    fn assert_less_or_equal(&mut self, a: Fr, b: Fr) {
        self.assert(AssertionKind::LessOrEqual, a, b);
    }

    fn section(&mut self, name: &'static str) {
        self.section = Some(name);
    }
}

/// Run `circuit` on `assignment`.
pub fn evaluate<C: Circuit>(circuit: &C, assignment: &Assignment) -> Result<Evaluation> {
    let mut evaluator = WitnessEvaluator::new(assignment);
    let outputs = circuit.define(&mut evaluator)?;
    let evaluation = evaluator.finish(outputs);
    tracing::debug!(
        satisfied = evaluation.is_satisfied(),
        violations = evaluation.violations.len(),
        "evaluated witness"
    );
    Ok(evaluation)
}
