// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! Segregation index: how cleanly axon and dendrite separate outputs from
//! inputs, measured against the entropy of the unsplit neuron.

use neurite_structures::CompartmentLabel;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::record::NodeRecord;

/// Segregation index above which a neuron is called an interneuron
pub const INTERNEURON_SEGREGATION_THRESHOLD: f64 = 0.05;

/// Input/output totals of one compartment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynapseCounts {
    pub post: u64,
    pub pre: u64,
}

impl SynapseCounts {
    pub fn total(&self) -> u64 {
        self.post + self.pre
    }

    /// Entropy of picking an input versus an output from this compartment
    pub fn entropy(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => binary_entropy(self.post as f64 / total as f64),
        }
    }
}

/// Binary Shannon entropy in nats; 0 at p = 0, p = 1 and for non-finite p
pub fn binary_entropy(p: f64) -> f64 {
    if !p.is_finite() || p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    -(p * p.ln() + (1.0 - p) * (1.0 - p).ln())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SegregationScore {
    pub dendrite: SynapseCounts,
    pub axon: SynapseCounts,
    /// Synapse-weighted mean entropy of axon and dendrite
    pub entropy_score: f64,
    /// Entropy of axon and dendrite pooled together
    pub control_score: f64,
    pub index: f64,
}

impl SegregationScore {
    /// Score from precomputed compartment totals
    pub fn from_counts(dendrite: SynapseCounts, axon: SynapseCounts) -> Self {
        let total = dendrite.total() + axon.total();
        let entropy_score = if total == 0 {
            0.0
        } else {
            (dendrite.entropy() * dendrite.total() as f64 + axon.entropy() * axon.total() as f64)
                / total as f64
        };

        let pooled = SynapseCounts {
            post: dendrite.post + axon.post,
            pre: dendrite.pre + axon.pre,
        };
        let control_score = pooled.entropy();

        let ratio = entropy_score / control_score;
        let index = if control_score == 0.0 || !ratio.is_finite() {
            0.0
        } else {
            1.0 - ratio
        };

        Self {
            dendrite,
            axon,
            entropy_score,
            control_score,
            index,
        }
    }

    pub fn neuron_type(&self) -> NeuronType {
        NeuronType::from_index(self.index)
    }
}

/// Sum synapses over axon- and dendrite-labelled nodes and score them.
///
/// Primary neurite, primary dendrite and null nodes are left out.
pub fn segregation_index(records: &[NodeRecord]) -> SegregationScore {
    let mut dendrite = SynapseCounts::default();
    let mut axon = SynapseCounts::default();
    for record in records {
        let counts = match record.label {
            CompartmentLabel::Dendrite => &mut dendrite,
            CompartmentLabel::Axon => &mut axon,
            _ => continue,
        };
        counts.post += record.post;
        counts.pre += record.pre;
    }
    SegregationScore::from_counts(dendrite, axon)
}

/// Coarse type label derived from the segregation index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeuronType {
    Interneuron,
    ProjectionNeuron,
}

impl NeuronType {
    pub fn from_index(index: f64) -> Self {
        if index > INTERNEURON_SEGREGATION_THRESHOLD {
            NeuronType::Interneuron
        } else {
            NeuronType::ProjectionNeuron
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NeuronType::Interneuron => "interneuron",
            NeuronType::ProjectionNeuron => "projection neuron",
        }
    }
}

impl Display for NeuronType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
