// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

/*!
End-to-end tests through the `neurite` facade:
- neurons decoded from the JSON interchange format
- classifier options taken from a configuration file
- batches mixing valid and malformed skeletons
*/

use neurite::compartments::{BatchReport, CompartmentError};
use neurite::config::ConfigError;
use neurite::prelude::*;
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

/// Soma 1, shaft 2-3, dendrite branch 10-13 with inputs, axon branch 20-23 with outputs
const BRANCHED_NEURON: &str = r#"{
    "skeleton_id": "LN-7",
    "nodes": [
        {"id": 1, "position": {"x": 0.0, "y": 0.0, "z": 0.0}, "radius": 4.0},
        {"id": 2, "parent": 1, "position": {"x": 0.0, "y": 10.0, "z": 0.0}},
        {"id": 3, "parent": 2, "position": {"x": 0.0, "y": 20.0, "z": 0.0}},
        {"id": 10, "parent": 3, "position": {"x": -10.0, "y": 30.0, "z": 0.0}},
        {"id": 11, "parent": 10, "position": {"x": -20.0, "y": 40.0, "z": 0.0}},
        {"id": 12, "parent": 11, "position": {"x": -30.0, "y": 50.0, "z": 0.0}},
        {"id": 13, "parent": 12, "position": {"x": -40.0, "y": 60.0, "z": 0.0}},
        {"id": 20, "parent": 3, "position": {"x": 10.0, "y": 30.0, "z": 0.0}},
        {"id": 21, "parent": 20, "position": {"x": 20.0, "y": 40.0, "z": 0.0}},
        {"id": 22, "parent": 21, "position": {"x": 30.0, "y": 50.0, "z": 0.0}},
        {"id": 23, "parent": 22, "position": {"x": 40.0, "y": 60.0, "z": 0.0}}
    ],
    "synapses": [
        {"connector_id": 1, "node_id": 10, "direction": "input"},
        {"connector_id": 2, "node_id": 10, "direction": "input"},
        {"connector_id": 3, "node_id": 11, "direction": "input"},
        {"connector_id": 4, "node_id": 11, "direction": "input"},
        {"connector_id": 5, "node_id": 11, "direction": "input"},
        {"connector_id": 6, "node_id": 12, "direction": "input"},
        {"connector_id": 7, "node_id": 12, "direction": "input"},
        {"connector_id": 8, "node_id": 12, "direction": "input"},
        {"connector_id": 9, "node_id": 21, "direction": "output"},
        {"connector_id": 10, "node_id": 21, "direction": "output"},
        {"connector_id": 11, "node_id": 21, "direction": "output"},
        {"connector_id": 12, "node_id": 22, "direction": "output", "partners": 1},
        {"connector_id": 13, "node_id": 22, "direction": "output", "partners": 1},
        {"connector_id": 14, "node_id": 22, "direction": "output", "partners": 1}
    ]
}"#;

fn branched_neuron() -> NeuronInput {
    serde_json::from_str(BRANCHED_NEURON).unwrap()
}

#[test]
fn test_json_neuron_classifies_as_interneuron() {
    let neuron = branched_neuron();
    assert_eq!(neuron.skeleton_id.as_deref(), Some("LN-7"));
    assert_eq!(neuron.synapses[0].partners, 1);

    let result = classify_neuron(&neuron, &ClassifierOptions::default()).unwrap();

    assert_eq!(result.axon_initiation_site, 20);
    assert_eq!(result.label(21), Some(CompartmentLabel::Axon));
    assert_eq!(result.label(10), Some(CompartmentLabel::Dendrite));
    assert_eq!(result.label(11), Some(CompartmentLabel::Dendrite));
    assert_eq!(result.label(1), Some(CompartmentLabel::PrimaryNeurite));
    assert!((result.segregation_index() - 1.0).abs() < 1e-9);
    assert_eq!(result.neuron_type, NeuronType::Interneuron);
    assert!(result.warnings.is_empty());

    assert_eq!(result.overlay.inputs.len(), 8);
    assert_eq!(result.overlay.outputs.len(), 6);
    let tip_input = result.overlay.inputs.iter().find(|s| s.node_id == 12).unwrap();
    assert_eq!(tip_input.position, Point3::new(-30.0, 50.0, 0.0));
}

#[test]
fn test_result_json_keeps_labels() {
    let result = classify_neuron(&branched_neuron(), &ClassifierOptions::default()).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["skeleton_id"], "LN-7");
    assert_eq!(json["neuron_type"], "interneuron");
    let labels: Vec<&str> = json["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels.len(), 11);
    assert!(labels.contains(&"axon"));
    assert!(labels.contains(&"primary_neurite"));
}

#[test]
fn test_options_from_configuration_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("neurite_configuration.toml");
    fs::write(
        &path,
        "[classifier]\nmode = \"centripetal\"\npolypre = false\nprimary_dendrite = false\n\n[batch]\nworkers = 2\n",
    )
    .unwrap();

    let config = load_config(Some(path.as_path()), None).unwrap();
    validate_config(&config).unwrap();
    let options = neurite::classifier_options(&config).unwrap();
    assert_eq!(options.mode, FlowMode::Centripetal);
    assert!(!options.polypre);
    assert_eq!(options.primary_dendrite_threshold, None);

    let report = classify_batch(&[branched_neuron()], &options, config.batch.workers).unwrap();
    let result = &report.results[0];
    assert_eq!(result.mode, FlowMode::Centripetal);
    assert!(result.nodes_labelled(CompartmentLabel::PrimaryDendrite).is_empty());
}

#[test]
fn test_misspelled_command_line_setting_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("neurite_configuration.toml");
    fs::write(&path, "[classifier]\nmode = \"centripetal\"\n").unwrap();

    let overrides = HashMap::from([("mode".to_string(), "centrifugl".to_string())]);
    let result = load_config(Some(path.as_path()), Some(&overrides));
    assert!(matches!(result, Err(ConfigError::InvalidOverride { ref key, .. }) if key == "mode"));

    let overrides = HashMap::from([("primary_dendrite".to_string(), "0.8".to_string())]);
    let result = load_config(Some(path.as_path()), Some(&overrides));
    assert!(matches!(result, Err(ConfigError::InvalidOverride { ref key, .. }) if key == "primary_dendrite"));
}

#[test]
fn test_batch_isolates_malformed_neuron() {
    let two_roots = NeuronInput::new(
        vec![SkeletonNode::bare(1, None), SkeletonNode::bare(2, None)],
        vec![],
    )
    .with_skeleton_id("broken");

    let inputs = vec![branched_neuron(), two_roots, branched_neuron()];
    let report: BatchReport = classify_batch(&inputs, &ClassifierOptions::default(), 2).unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.position, 1);
    assert_eq!(failure.skeleton_id.as_deref(), Some("broken"));
    assert_eq!(
        failure.error,
        CompartmentError::MalformedTree(MalformedTreeError::MultipleRoots(vec![1, 2]))
    );
}

#[test]
fn test_invalid_threshold_rejects_whole_batch() {
    let options = ClassifierOptions::default().with_primary_dendrite_threshold(Some(0.0));
    let result = classify_batch(&[branched_neuron()], &options, 0);
    assert!(matches!(result, Err(CompartmentError::InvalidOption(_))));
}
