//! Generated documentation pages.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::content::ContentNode;
use crate::documentable::Documentable;
use crate::dri::Dri;
use crate::platform::PlatformSet;

/// What a page documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    Module,
    Package,
    Classlike,
    Member,
}

/// One generated page and its subpages.
#[derive(Clone, Debug)]
pub struct PageNode {
    pub name: String,
    pub kind: PageKind,
    pub dri: BTreeSet<Dri>,
    pub content: ContentNode,
    pub children: Vec<PageNode>,
    /// Source entity this page projects; `None` for synthetic pages.
    pub documentable: Option<Arc<dyn Documentable>>,
    pub embedded_resources: Vec<String>,
}

impl PageNode {
    /// Create a page without children, documentable or resources.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: PageKind,
        dri: BTreeSet<Dri>,
        content: impl Into<ContentNode>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            dri,
            content: content.into(),
            children: Vec::new(),
            documentable: None,
            embedded_resources: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<PageNode>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_documentable(mut self, documentable: Arc<dyn Documentable>) -> Self {
        self.documentable = Some(documentable);
        self
    }

    /// Platforms covered by the page content.
    #[must_use]
    pub fn platforms(&self) -> &PlatformSet {
        self.content.platforms()
    }

    #[must_use]
    pub fn is_classlike(&self) -> bool {
        self.kind == PageKind::Classlike
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentGroup, Dci, Kind, StyleSet};
    use crate::platform::{Platform, PlatformData};
    use crate::properties::PropertyContainer;

    #[test]
    fn test_page_platforms_come_from_content() {
        let dri = Dri::package("p").with_class("C");
        let jvm = PlatformData::new("jvm", Platform::Jvm);
        let content = ContentGroup {
            children: Vec::new(),
            dci: Dci::single(dri.clone(), Kind::Main),
            platforms: PlatformSet::from([jvm.clone()]),
            style: StyleSet::new(),
            extra: PropertyContainer::empty(),
        };
        let page = PageNode::new("C", PageKind::Classlike, BTreeSet::from([dri]), content);

        assert!(page.is_classlike());
        assert_eq!(page.platforms(), &PlatformSet::from([jvm]));
        assert!(page.documentable.is_none());
        assert!(page.children.is_empty());
    }
}
