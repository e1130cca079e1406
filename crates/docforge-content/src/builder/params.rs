//! Scope defaults and per-call overrides.

use std::collections::BTreeSet;

use docforge_model::{Dci, Dri, Kind, PlatformSet, PropertyContainer, StyleSet};

/// Values a builder scope applies to every node it creates unless a call
/// overrides them.
#[derive(Clone, Debug, PartialEq)]
pub struct ScopeDefaults {
    pub dri: BTreeSet<Dri>,
    pub platforms: PlatformSet,
    pub styles: StyleSet,
    pub extra: PropertyContainer,
}

/// Per-call overrides of the scope defaults and of the operation's kind.
///
/// Unset fields fall back to the enclosing scope.
///
/// # Example
///
/// ```
/// use docforge_content::ContentParams;
/// use docforge_model::{Kind, Style, StyleSet};
///
/// let params = ContentParams::new()
///     .with_kind(Kind::Symbol)
///     .with_styles(StyleSet::from([Style::Monospace]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ContentParams {
    dri: Option<BTreeSet<Dri>>,
    platforms: Option<PlatformSet>,
    kind: Option<Kind>,
    styles: Option<StyleSet>,
    extra: Option<PropertyContainer>,
}

impl ContentParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dri(mut self, dri: BTreeSet<Dri>) -> Self {
        self.dri = Some(dri);
        self
    }

    #[must_use]
    pub fn with_single_dri(self, dri: Dri) -> Self {
        self.with_dri(BTreeSet::from([dri]))
    }

    #[must_use]
    pub fn with_platforms(mut self, platforms: PlatformSet) -> Self {
        self.platforms = Some(platforms);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: StyleSet) -> Self {
        self.styles = Some(styles);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: PropertyContainer) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Apply the overrides on top of `defaults`; `kind` is the operation's
    /// own default kind.
    pub(crate) fn resolve(self, defaults: &ScopeDefaults, kind: Kind) -> Resolved {
        Resolved {
            scope: ScopeDefaults {
                dri: self.dri.unwrap_or_else(|| defaults.dri.clone()),
                platforms: self.platforms.unwrap_or_else(|| defaults.platforms.clone()),
                styles: self.styles.unwrap_or_else(|| defaults.styles.clone()),
                extra: self.extra.unwrap_or_else(|| defaults.extra.clone()),
            },
            kind: self.kind.unwrap_or(kind),
        }
    }
}

/// Effective values for one operation.
#[derive(Clone, Debug)]
pub(crate) struct Resolved {
    pub(crate) scope: ScopeDefaults,
    pub(crate) kind: Kind,
}

impl Resolved {
    pub(crate) fn dci(&self) -> Dci {
        Dci::new(self.scope.dri.clone(), self.kind.clone())
    }
}
