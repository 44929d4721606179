// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! Per-neuron classification pipeline and its result type.

use ahash::AHashMap;
use neurite_structures::{
    CompartmentLabel, ConnectorId, FlowMode, NodeId, Point3, SkeletonNode, SkeletonTree,
    SynapseDirection, SynapseRecord,
};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::centrality::score_flow_centrality;
use crate::classifier::{classify_compartments, Partition};
use crate::error::{ClassificationWarning, CompartmentResult};
use crate::flow::propagate_flow;
use crate::options::ClassifierOptions;
use crate::record::NodeRecord;
use crate::segregation::{segregation_index, NeuronType, SegregationScore};
use crate::synapse_mapper::map_synapses;

/// One neuron as delivered by the data-acquisition side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronInput {
    #[serde(default)]
    pub skeleton_id: Option<String>,
    pub nodes: Vec<SkeletonNode>,
    #[serde(default)]
    pub synapses: Vec<SynapseRecord>,
}

impl NeuronInput {
    pub fn new(nodes: Vec<SkeletonNode>, synapses: Vec<SynapseRecord>) -> Self {
        Self {
            skeleton_id: None,
            nodes,
            synapses,
        }
    }

    pub fn with_skeleton_id(mut self, skeleton_id: impl Into<String>) -> Self {
        self.skeleton_id = Some(skeleton_id.into());
        self
    }

    /// Rebuild an input from a previous result and the synapses it was made from
    pub fn from_result(result: &ClassificationResult, synapses: Vec<SynapseRecord>) -> Self {
        Self {
            skeleton_id: result.skeleton_id.clone(),
            nodes: result.records.iter().map(|r| r.node.clone()).collect(),
            synapses,
        }
    }
}

/// Synapse location for overlay rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynapseSite {
    pub connector_id: ConnectorId,
    pub node_id: NodeId,
    pub position: Point3,
}

/// Synapse positions split by direction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynapseOverlay {
    pub inputs: Vec<SynapseSite>,
    pub outputs: Vec<SynapseSite>,
}

/// Node and synapse totals for one compartment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompartmentTotals {
    pub label: CompartmentLabel,
    pub nodes: usize,
    pub post: u64,
    pub pre: u64,
}

/// Everything the rendering and selection side needs about one neuron
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub skeleton_id: Option<String>,
    pub mode: FlowMode,
    /// One record per skeleton node, in input order
    pub records: Vec<NodeRecord>,
    pub axon_initiation_site: NodeId,
    pub axon_partition: Option<Partition>,
    pub max_flow_centrality: u64,
    pub segregation: SegregationScore,
    pub neuron_type: NeuronType,
    pub compartments: Vec<CompartmentTotals>,
    pub overlay: SynapseOverlay,
    pub warnings: Vec<ClassificationWarning>,
    #[serde(skip)]
    record_index: RecordIndex,
}

/// Node id to position in `records`, built on first lookup.
///
/// Derived data only, so it never affects equality.
#[derive(Debug, Clone, Default)]
struct RecordIndex(OnceLock<AHashMap<NodeId, usize>>);

impl PartialEq for RecordIndex {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl ClassificationResult {
    pub fn segregation_index(&self) -> f64 {
        self.segregation.index
    }

    pub fn record(&self, node_id: NodeId) -> Option<&NodeRecord> {
        let index = self.record_index.0.get_or_init(|| {
            self.records
                .iter()
                .enumerate()
                .map(|(position, r)| (r.node.id, position))
                .collect()
        });
        match index.get(&node_id).and_then(|&position| self.records.get(position)) {
            Some(record) if record.node.id == node_id => Some(record),
            // Miss, or `records` was edited after the index was built
            _ => self.records.iter().find(|r| r.node.id == node_id),
        }
    }

    pub fn label(&self, node_id: NodeId) -> Option<CompartmentLabel> {
        self.record(node_id).map(|r| r.label)
    }

    pub fn labels(&self) -> AHashMap<NodeId, CompartmentLabel> {
        self.records.iter().map(|r| (r.node.id, r.label)).collect()
    }

    pub fn nodes_labelled(&self, label: CompartmentLabel) -> Vec<NodeId> {
        self.records
            .iter()
            .filter(|r| r.label == label)
            .map(|r| r.node.id)
            .collect()
    }

    pub fn totals(&self, label: CompartmentLabel) -> Option<&CompartmentTotals> {
        self.compartments.iter().find(|c| c.label == label)
    }
}

/// Classify one neuron.
///
/// # Errors
///
/// Returns error if the options are invalid or the skeleton is malformed.
/// Missing synapse data is not an error; it is reported in
/// [`ClassificationResult::warnings`].
pub fn classify_neuron(
    input: &NeuronInput,
    options: &ClassifierOptions,
) -> CompartmentResult<ClassificationResult> {
    options.validate()?;
    let tree = SkeletonTree::new(input.nodes.clone())?;
    let label = input.skeleton_id.as_deref().unwrap_or("<unnamed>");

    let (mut records, mapping) = map_synapses(&tree, &input.synapses, options.polypre);
    let mut warnings = Vec::new();
    if mapping.unmapped > 0 {
        warnings.push(ClassificationWarning::UnmappedSynapses {
            count: mapping.unmapped,
        });
    }

    let totals = propagate_flow(&tree, &mut records);
    if totals.is_degenerate() {
        warn!(
            "Skeleton {}: no synapse data ({} inputs, {} outputs); scores are degenerate",
            label, totals.inputs, totals.outputs
        );
        warnings.push(ClassificationWarning::NoSynapseData {
            inputs: totals.inputs,
            outputs: totals.outputs,
        });
    }

    let max_flow_centrality = score_flow_centrality(&mut records, totals, options.mode);
    let outcome =
        classify_compartments(&tree, &mut records, options.primary_dendrite_threshold);
    let segregation = segregation_index(&records);
    let neuron_type = segregation.neuron_type();

    debug!(
        "Skeleton {}: AIS {}, segregation index {:.4} ({})",
        label,
        tree.id_of(outcome.axon_initiation_site),
        segregation.index,
        neuron_type
    );

    Ok(ClassificationResult {
        skeleton_id: input.skeleton_id.clone(),
        mode: options.mode,
        axon_initiation_site: tree.id_of(outcome.axon_initiation_site),
        axon_partition: outcome.axon,
        max_flow_centrality,
        segregation,
        neuron_type,
        compartments: compartment_totals(&records),
        overlay: synapse_overlay(&tree, &input.synapses),
        records,
        warnings,
        record_index: RecordIndex::default(),
    })
}

fn compartment_totals(records: &[NodeRecord]) -> Vec<CompartmentTotals> {
    CompartmentLabel::ALL
        .iter()
        .map(|&label| {
            let mut totals = CompartmentTotals {
                label,
                nodes: 0,
                post: 0,
                pre: 0,
            };
            for record in records.iter().filter(|r| r.label == label) {
                totals.nodes += 1;
                totals.post += record.post;
                totals.pre += record.pre;
            }
            totals
        })
        .collect()
}

fn synapse_overlay(tree: &SkeletonTree, synapses: &[SynapseRecord]) -> SynapseOverlay {
    let mut overlay = SynapseOverlay::default();
    for synapse in synapses {
        let Some(idx) = tree.index_of(synapse.node_id) else {
            continue;
        };
        let site = SynapseSite {
            connector_id: synapse.connector_id,
            node_id: synapse.node_id,
            position: tree.node(idx).position,
        };
        match synapse.direction {
            SynapseDirection::Input => overlay.inputs.push(site),
            SynapseDirection::Output => overlay.outputs.push(site),
        }
    }
    overlay
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompartmentError;
    use neurite_structures::MalformedTreeError;

    fn chain_input() -> NeuronInput {
        let nodes = (1..=5)
            .map(|id| {
                SkeletonNode::new(
                    id,
                    if id == 1 { None } else { Some(id - 1) },
                    Point3::new(id as f64, 0.0, 0.0),
                    1.0,
                )
            })
            .collect();
        NeuronInput::new(
            nodes,
            vec![SynapseRecord::input(10, 5), SynapseRecord::output(20, 2, 3)],
        )
        .with_skeleton_id("chain")
    }

    #[test]
    fn test_overlay_uses_node_positions() {
        let result = classify_neuron(&chain_input(), &ClassifierOptions::default()).unwrap();
        assert_eq!(result.overlay.inputs.len(), 1);
        assert_eq!(result.overlay.inputs[0].position, Point3::new(5.0, 0.0, 0.0));
        assert_eq!(result.overlay.outputs[0].node_id, 2);
    }

    #[test]
    fn test_compartment_totals_cover_every_node() {
        let result = classify_neuron(&chain_input(), &ClassifierOptions::default()).unwrap();
        let nodes: usize = result.compartments.iter().map(|c| c.nodes).sum();
        assert_eq!(nodes, 5);
        assert_eq!(result.compartments.len(), CompartmentLabel::ALL.len());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let options = ClassifierOptions::default().with_primary_dendrite_threshold(Some(2.0));
        assert!(matches!(
            classify_neuron(&chain_input(), &options),
            Err(CompartmentError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_malformed_tree_rejected() {
        let input = NeuronInput::new(
            vec![SkeletonNode::bare(1, None), SkeletonNode::bare(2, None)],
            vec![],
        );
        assert_eq!(
            classify_neuron(&input, &ClassifierOptions::default()),
            Err(CompartmentError::MalformedTree(
                MalformedTreeError::MultipleRoots(vec![1, 2])
            ))
        );
    }

    #[test]
    fn test_unmapped_synapses_warned() {
        let mut input = chain_input();
        input.synapses.push(SynapseRecord::input(99, 1234));
        let result = classify_neuron(&input, &ClassifierOptions::default()).unwrap();
        assert!(result
            .warnings
            .contains(&ClassificationWarning::UnmappedSynapses { count: 1 }));
    }

    #[test]
    fn test_result_serializes() {
        let result = classify_neuron(&chain_input(), &ClassifierOptions::default()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["skeleton_id"], "chain");
        assert_eq!(json["mode"], "average");
        assert_eq!(json["records"].as_array().unwrap().len(), 5);
        assert!(json.get("record_index").is_none());
    }

    #[test]
    fn test_record_lookup_by_id() {
        let result = classify_neuron(&chain_input(), &ClassifierOptions::default()).unwrap();
        for id in 1..=5 {
            assert_eq!(result.record(id).map(|r| r.node.id), Some(id));
        }
        assert!(result.record(42).is_none());
        assert_eq!(result.label(5), result.labels().get(&5).copied());
    }

    #[test]
    fn test_record_lookup_after_deserialize() {
        let result = classify_neuron(&chain_input(), &ClassifierOptions::default()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let restored: ClassificationResult = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, result);
        assert_eq!(restored.record(3), result.record(3));
        assert_eq!(restored.label(2), result.label(2));
    }

    #[test]
    fn test_record_lookup_after_records_edited() {
        let mut result = classify_neuron(&chain_input(), &ClassifierOptions::default()).unwrap();
        assert!(result.record(4).is_some());

        result.records.retain(|r| r.node.id != 2);
        assert!(result.record(2).is_none());
        assert_eq!(result.record(4).map(|r| r.node.id), Some(4));
        assert_eq!(result.record(5).map(|r| r.node.id), Some(5));
    }
}
