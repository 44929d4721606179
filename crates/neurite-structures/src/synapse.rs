// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::skeleton::NodeId;

/// Connector identifier (one connector may link several synaptic partners)
pub type ConnectorId = u64;

/// Which side of the synapse the skeleton is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynapseDirection {
    /// Postsynaptic site: the neuron receives input here
    Input,
    /// Presynaptic site: the neuron sends output from here
    Output,
}

/// One synaptic site attached to a skeleton node.
///
/// `partners` is the number of distinct downstream partners of the connector.
/// It is only consulted for outputs when polyadic weighting is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynapseRecord {
    pub connector_id: ConnectorId,
    pub node_id: NodeId,
    pub direction: SynapseDirection,
    #[serde(default = "default_partners")]
    pub partners: u32,
}

fn default_partners() -> u32 {
    1
}

impl SynapseRecord {
    pub fn input(connector_id: ConnectorId, node_id: NodeId) -> Self {
        Self {
            connector_id,
            node_id,
            direction: SynapseDirection::Input,
            partners: 1,
        }
    }

    pub fn output(connector_id: ConnectorId, node_id: NodeId, partners: u32) -> Self {
        Self {
            connector_id,
            node_id,
            direction: SynapseDirection::Output,
            partners,
        }
    }

    pub fn is_input(&self) -> bool {
        self.direction == SynapseDirection::Input
    }
}
