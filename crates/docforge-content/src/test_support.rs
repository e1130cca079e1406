//! Fixtures shared by unit tests.

use std::collections::BTreeSet;
use std::sync::Arc;

use docforge_model::{
    ContentGroup, ContentNode, ContentText, Dci, Documentable, DocumentableKind, DocumentableNode,
    Dri, Kind, PageKind, PageNode, Platform, PlatformData, PlatformSet, PropertyContainer,
    StyleSet,
};

use crate::builder::PageContentBuilder;
use crate::comments::DocTagToContentConverter;
use crate::signature::SignatureProvider;

/// Renders `fun <name>` as a single signature-kind text leaf.
pub(crate) struct FunSignatures;

impl SignatureProvider for FunSignatures {
    fn signature(&self, documentable: &dyn Documentable) -> ContentNode {
        ContentText {
            text: format!(
                "{}fun {}",
                self.additional_modifiers(documentable),
                documentable.name().unwrap_or_default()
            ),
            dci: Dci::single(documentable.dri().clone(), Kind::Signature),
            platforms: documentable.platform_data().clone(),
            style: StyleSet::new(),
            extra: PropertyContainer::empty(),
        }
        .into()
    }
}

pub(crate) fn page_builder() -> PageContentBuilder {
    PageContentBuilder::new(Arc::new(DocTagToContentConverter), Arc::new(FunSignatures))
}

pub(crate) fn dri(class: &str) -> Dri {
    Dri::package("p").with_class(class)
}

pub(crate) fn jvm() -> PlatformSet {
    PlatformSet::from([PlatformData::new("jvm", Platform::Jvm)])
}

pub(crate) fn js() -> PlatformSet {
    PlatformSet::from([PlatformData::new("js", Platform::Js)])
}

pub(crate) fn jvm_and_js() -> PlatformSet {
    jvm().into_iter().chain(js()).collect()
}

pub(crate) fn function(name: &str, platforms: PlatformSet) -> DocumentableNode {
    DocumentableNode::new(
        Dri::package("p").with_callable(name),
        name,
        DocumentableKind::Function,
        platforms,
    )
}

pub(crate) fn class(name: &str, platforms: PlatformSet) -> DocumentableNode {
    DocumentableNode::new(dri(name), name, DocumentableKind::Class, platforms)
}

/// Page with an empty `Main` group for `dri` on `platforms`.
pub(crate) fn page(name: &str, kind: PageKind, dri: Dri, platforms: PlatformSet) -> PageNode {
    let content = ContentGroup {
        children: Vec::new(),
        dci: Dci::single(dri.clone(), Kind::Main),
        platforms,
        style: StyleSet::new(),
        extra: PropertyContainer::empty(),
    };
    PageNode::new(name, kind, BTreeSet::from([dri]), content)
}
