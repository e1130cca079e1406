//! Error types for content building and page merging.

use std::collections::BTreeSet;

use docforge_model::Dri;

/// Contract violation while building content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A divergent instance was built before its `divergent` slot was set.
    #[error("divergent instance for [{}] was built without divergent content", join_dris(.dri))]
    MissingDivergent { dri: BTreeSet<Dri> },
}

/// Error from a page merging strategy.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Strategy invoked without pages.
    #[error("no pages to merge at `{path}`")]
    Empty { path: String },

    /// Strategy only merges class-like pages.
    #[error("page `{name}` at `{path}` is not class-like and cannot be merged")]
    NotClasslike { path: String, name: String },
}

fn join_dris(dri: &BTreeSet<Dri>) -> String {
    let names: Vec<String> = dri.iter().map(ToString::to_string).collect();
    names.join(", ")
}
