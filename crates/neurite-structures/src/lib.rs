// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! The core crate for neurite. Defines the data model shared by every stage of
//! compartment classification:
//!
//! - [`SkeletonNode`]: one traced point of a neuron skeleton
//! - [`SynapseRecord`]: one synaptic site attached to a skeleton node
//! - [`CompartmentLabel`] and [`FlowMode`]: classification vocabulary
//! - [`SkeletonTree`]: the validated rooted tree with children lookup,
//!   depths, leaves and segment decomposition

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod compartment;
mod error;
mod skeleton;
mod synapse;
pub mod tree;

pub use compartment::{CompartmentLabel, FlowMode};
pub use error::{MalformedTreeError, StructureResult};
pub use skeleton::{NodeId, Point3, SkeletonNode};
pub use synapse::{ConnectorId, SynapseDirection, SynapseRecord};
pub use tree::{NodeIndex, Segment, SkeletonTree};
