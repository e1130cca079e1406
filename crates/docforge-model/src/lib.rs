//! Documentable, content node and page model for docforge.
//!
//! This crate provides the data shared by every stage of page generation:
//! - [`Dri`]: platform-independent identity of a documented entity
//! - [`PlatformData`] and [`PlatformDependent`]: target platforms and per-platform values
//! - [`PropertyContainer`]: type-indexed extra properties
//! - [`ContentNode`]: the immutable, renderer-agnostic content tree
//! - [`PageNode`]: generated pages holding content trees
//!
//! Content trees are built with the `docforge-content` crate.

mod content;
mod doc;
mod documentable;
mod dri;
mod page;
mod platform;
mod properties;

pub use content::{
    ContentBreakLine, ContentCode, ContentDivergentGroup, ContentDivergentInstance,
    ContentDriLink, ContentGroup, ContentHeader, ContentList, ContentNode, ContentResolvedLink,
    ContentTable, ContentText, Dci, Kind, PlatformHintedContent, Style, StyleSet,
};
pub use doc::DocTag;
pub use documentable::{Documentable, DocumentableKind, DocumentableNode};
pub use dri::Dri;
pub use page::{PageKind, PageNode};
pub use platform::{Platform, PlatformData, PlatformDependent, PlatformSet, UnknownPlatform};
pub use properties::{AdditionalModifiers, ExtraProperty, PropertyContainer};
