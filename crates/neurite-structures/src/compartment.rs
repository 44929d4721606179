// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Functional compartment assigned to a skeleton node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompartmentLabel {
    #[default]
    Dendrite,
    Axon,
    PrimaryNeurite,
    PrimaryDendrite,
    /// Zero-flow node cut off from the primary neurite
    Null,
}

impl CompartmentLabel {
    pub const ALL: [CompartmentLabel; 5] = [
        CompartmentLabel::Dendrite,
        CompartmentLabel::Axon,
        CompartmentLabel::PrimaryNeurite,
        CompartmentLabel::PrimaryDendrite,
        CompartmentLabel::Null,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompartmentLabel::Dendrite => "dendrite",
            CompartmentLabel::Axon => "axon",
            CompartmentLabel::PrimaryNeurite => "primary neurite",
            CompartmentLabel::PrimaryDendrite => "primary dendrite",
            CompartmentLabel::Null => "null",
        }
    }
}

impl Display for CompartmentLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which directed synaptic paths a flow-centrality score counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowMode {
    /// Proximal inputs to distal outputs
    Centrifugal,
    /// Proximal outputs to distal inputs
    Centripetal,
    /// Sum of centrifugal and centripetal
    #[default]
    Average,
}

impl FlowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowMode::Centrifugal => "centrifugal",
            FlowMode::Centripetal => "centripetal",
            FlowMode::Average => "average",
        }
    }
}

impl Display for FlowMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "centrifugal" => Ok(FlowMode::Centrifugal),
            "centripetal" => Ok(FlowMode::Centripetal),
            // "sum" is the historical name of the combined mode
            "average" | "sum" => Ok(FlowMode::Average),
            other => Err(format!("unknown flow mode '{}'", other)),
        }
    }
}
