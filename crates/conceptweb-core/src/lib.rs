#![forbid(unsafe_code)]

//! Data side of `conceptweb`: the concept graph, the built-in datasets and the cross-reference
//! CSV loader.
//!
//! Everything here is in-memory and deterministic; layout and rendering live in
//! `conceptweb-render`.

pub mod dataset;
pub mod error;
pub mod model;
pub mod xref;

pub use dataset::{NetworkVariant, build_network, main_chapters};
pub use error::{Error, Result};
pub use model::{Concept, ConceptGraph, HubRule, Link};
pub use xref::{
    Chapter, CrossReference, RefDirection, load_cross_references, partition_by_direction,
    read_cross_references,
};
