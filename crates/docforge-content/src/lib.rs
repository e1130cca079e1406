//! Content tree construction for generated documentation pages.
//!
//! The [`PageContentBuilder`] DSL assembles immutable content trees from
//! documentables, tracking identity, platforms, styles and extra properties
//! at every node. [`PageMerger`] reconciles pages generated once per platform
//! for the same entity.
//!
//! Signature rendering and comment conversion are pluggable through
//! [`SignatureProvider`] and [`CommentsToContentConverter`].

mod builder;
mod comments;
mod error;
mod merger;
mod signature;

#[cfg(test)]
mod test_support;

pub use builder::{
    ContentParams, DivergentBuilder, DivergentInstanceBuilder, DocumentableContentBuilder,
    PageContentBuilder, ScopeDefaults,
};
pub use comments::{CommentsToContentConverter, DocTagToContentConverter};
pub use error::{ContentError, MergeError};
pub use merger::{
    DefaultPageMergerStrategy, PageMerger, PageMergerStrategy, SameClassNamePageMergerStrategy,
};
pub use signature::SignatureProvider;
