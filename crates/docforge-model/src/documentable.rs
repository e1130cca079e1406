//! Parsed source entities feeding the content builder.

use std::fmt;
use std::sync::Arc;

use crate::doc::DocTag;
use crate::dri::Dri;
use crate::platform::{PlatformDependent, PlatformSet};
use crate::properties::PropertyContainer;

/// Read-only view of a parsed source entity.
///
/// Implementations are produced by the source parsers, which are expected to
/// have populated identity and platforms before content is built.
pub trait Documentable: fmt::Debug + Send + Sync {
    fn dri(&self) -> &Dri;

    /// Simple name, `None` for anonymous entities.
    fn name(&self) -> Option<&str>;

    /// Platforms the entity is declared for.
    fn platform_data(&self) -> &PlatformSet;

    fn extra(&self) -> &PropertyContainer;
}

impl<D: Documentable + ?Sized> Documentable for Arc<D> {
    fn dri(&self) -> &Dri {
        (**self).dri()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }

    fn platform_data(&self) -> &PlatformSet {
        (**self).platform_data()
    }

    fn extra(&self) -> &PropertyContainer {
        (**self).extra()
    }
}

/// Kind of a [`DocumentableNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentableKind {
    Module,
    Package,
    Class,
    Interface,
    Object,
    Enum,
    Annotation,
    Function,
    Property,
    Parameter,
    TypeAlias,
}

impl DocumentableKind {
    /// Whether pages for this kind are class-like.
    #[must_use]
    pub fn is_classlike(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Object | Self::Enum | Self::Annotation
        )
    }
}

/// General-purpose documentable record.
#[derive(Clone, Debug)]
pub struct DocumentableNode {
    pub dri: Dri,
    pub name: Option<String>,
    pub kind: DocumentableKind,
    pub platform_data: PlatformSet,
    /// Documentation comment per platform.
    pub documentation: PlatformDependent<DocTag>,
    /// Visibility/modality keywords per platform (e.g. `public final`).
    pub modifiers: PlatformDependent<String>,
    pub children: Vec<Arc<DocumentableNode>>,
    pub extra: PropertyContainer,
}

impl DocumentableNode {
    /// Create a documentable with no documentation, modifiers or children.
    #[must_use]
    pub fn new(
        dri: Dri,
        name: impl Into<String>,
        kind: DocumentableKind,
        platform_data: PlatformSet,
    ) -> Self {
        Self {
            dri,
            name: Some(name.into()),
            kind,
            platform_data,
            documentation: PlatformDependent::new(),
            modifiers: PlatformDependent::new(),
            children: Vec::new(),
            extra: PropertyContainer::empty(),
        }
    }

    #[must_use]
    pub fn with_extra(mut self, extra: PropertyContainer) -> Self {
        self.extra = extra;
        self
    }
}

impl Documentable for DocumentableNode {
    fn dri(&self) -> &Dri {
        &self.dri
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn platform_data(&self) -> &PlatformSet {
        &self.platform_data
    }

    fn extra(&self) -> &PropertyContainer {
        &self.extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Platform, PlatformData};

    #[test]
    fn test_classlike_kinds() {
        assert!(DocumentableKind::Interface.is_classlike());
        assert!(!DocumentableKind::Function.is_classlike());
        assert!(!DocumentableKind::Package.is_classlike());
    }

    #[test]
    fn test_accessors() {
        let jvm = PlatformData::new("jvm", Platform::Jvm);
        let node = DocumentableNode::new(
            Dri::package("p").with_class("C"),
            "C",
            DocumentableKind::Class,
            PlatformSet::from([jvm.clone()]),
        );
        let d: &dyn Documentable = &node;
        assert_eq!(d.name(), Some("C"));
        assert_eq!(d.dri().class_names(), Some("C"));
        assert!(d.platform_data().contains(&jvm));
        assert!(d.extra().is_empty());
    }
}
