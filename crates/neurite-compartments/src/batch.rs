// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! Batch classification across neurons.
//!
//! Neurons share nothing, so each one is an independent rayon task. A failed
//! neuron is recorded and skipped; it never aborts the rest of the batch.

use rayon::prelude::*;
use tracing::{error, info};

use crate::error::{CompartmentError, CompartmentResult};
use crate::options::ClassifierOptions;
use crate::pipeline::{classify_neuron, ClassificationResult, NeuronInput};

/// A neuron that could not be classified
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    /// Position of the neuron in the batch input
    pub position: usize,
    pub skeleton_id: Option<String>,
    pub error: CompartmentError,
}

/// Results of a batch, in input order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub results: Vec<ClassificationResult>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.succeeded() + self.failed()
    }
}

/// Classify every neuron in `inputs`.
///
/// `workers == 0` uses rayon's global pool; otherwise a dedicated pool of that
/// many threads runs the batch.
///
/// # Errors
///
/// Returns error only for problems affecting the whole batch: invalid options
/// or a worker pool that cannot be started.
pub fn classify_batch(
    inputs: &[NeuronInput],
    options: &ClassifierOptions,
    workers: usize,
) -> CompartmentResult<BatchReport> {
    options.validate()?;

    let outcomes: Vec<CompartmentResult<ClassificationResult>> = if workers == 0 {
        run(inputs, options)
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("neurite-classify-{}", i))
            .build()
            .map_err(|e| CompartmentError::WorkerPool(e.to_string()))?;
        pool.install(|| run(inputs, options))
    };

    let mut report = BatchReport::default();
    for (position, outcome) in outcomes.into_iter().enumerate() {
        let skeleton_id = inputs[position].skeleton_id.clone();
        match outcome {
            Ok(result) => {
                info!(
                    "Classified skeleton {}: segregation index {:.4} ({})",
                    skeleton_id.as_deref().unwrap_or("<unnamed>"),
                    result.segregation.index,
                    result.neuron_type
                );
                report.results.push(result);
            }
            Err(err) => {
                error!(
                    "Skipping skeleton {} at position {}: {}",
                    skeleton_id.as_deref().unwrap_or("<unnamed>"),
                    position,
                    err
                );
                report.failures.push(BatchFailure {
                    position,
                    skeleton_id,
                    error: err,
                });
            }
        }
    }

    info!(
        "Batch complete: {} classified, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}

fn run(
    inputs: &[NeuronInput],
    options: &ClassifierOptions,
) -> Vec<CompartmentResult<ClassificationResult>> {
    inputs
        .par_iter()
        .map(|input| classify_neuron(input, options))
        .collect()
}
