//! Witness assignments.

use std::collections::BTreeMap;

use field::Fr;
use serde::{Deserialize, Serialize};

use crate::api::{Slot, Visibility};
use crate::error::Result;
use crate::evaluator::Evaluation;

/// Slot name to value. Serialises as a JSON object of decimal strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(BTreeMap<String, Fr>);

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: Fr) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: Fr) -> Option<Fr> {
        self.0.insert(name.to_string(), value)
    }

    pub fn get(&self, name: &str) -> Option<Fr> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Fr)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The values of the public slots among `slots`.
    pub fn public_part(&self, slots: &[Slot]) -> Self {
        Self(
            slots
                .iter()
                .filter(|slot| slot.visibility == Visibility::Public)
                .filter_map(|slot| self.0.get_key_value(&slot.name))
                .map(|(name, value)| (name.clone(), *value))
                .collect(),
        )
    }

    /// Copy with the derived outputs of `evaluation` filled in.
    pub fn complete(&self, evaluation: &Evaluation) -> Self {
        let mut completed = self.clone();
        for output in &evaluation.outputs {
            completed.set(&output.name, output.value);
        }
        completed
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FromIterator<(String, Fr)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (String, Fr)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
