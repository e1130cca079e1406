//! Scoped builder DSL for content trees.
//!
//! [`PageContentBuilder`] is the entry point. Each `content_for*` call opens a
//! [`DocumentableContentBuilder`] scope, hands it to a closure that appends
//! children in order, and freezes the scope into an immutable
//! [`ContentGroup`].
//!
//! Every scope carries [`ScopeDefaults`] (identity, platforms, styles,
//! extra). Operations use them for the nodes they create unless the `*_with`
//! form of the operation receives a [`ContentParams`] override. Nested scopes
//! start from the resolved values of the call that opened them, so a group
//! built without an identity override carries its parent's identity.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use docforge_content::{DocTagToContentConverter, PageContentBuilder, SignatureProvider};
//! use docforge_model::{
//!     ContentNode, Documentable, Dri, Kind, Platform, PlatformData, PlatformSet,
//! };
//!
//! struct NoSignatures;
//!
//! impl SignatureProvider for NoSignatures {
//!     fn signature(&self, documentable: &dyn Documentable) -> ContentNode {
//!         unimplemented!("{:?}", documentable.dri())
//!     }
//! }
//!
//! let builder = PageContentBuilder::new(
//!     Arc::new(DocTagToContentConverter),
//!     Arc::new(NoSignatures),
//! );
//! let platforms = PlatformSet::from([PlatformData::new("jvm", Platform::Jvm)]);
//!
//! let group = builder.content_for_dri(Dri::package("org.example"), platforms, |b| {
//!     b.header(1, |b| b.text("Package org.example"));
//!     b.text("Utilities for examples.");
//! });
//!
//! assert_eq!(group.dci.kind, Kind::Main);
//! assert_eq!(group.children.len(), 2);
//! ```

mod divergent;
mod params;

use std::collections::BTreeSet;
use std::sync::Arc;

use docforge_config::ContentConfig;
use docforge_model::{
    ContentDriLink, ContentGroup, ContentHeader, ContentNode, ContentResolvedLink, ContentTable,
    ContentText, Dci, DocTag, Documentable, Dri, Kind, PlatformDependent, PlatformHintedContent,
    PlatformSet, PropertyContainer, StyleSet,
};

use crate::comments::CommentsToContentConverter;
use crate::signature::SignatureProvider;

pub use divergent::{DivergentBuilder, DivergentInstanceBuilder};
pub use params::{ContentParams, ScopeDefaults};

pub(crate) use params::Resolved;

/// Entry point of the content DSL.
///
/// Holds the collaborators shared by every scope. Independent `content_for*`
/// calls share no mutable state and may run on different threads.
pub struct PageContentBuilder {
    comments_converter: Arc<dyn CommentsToContentConverter>,
    signature_provider: Arc<dyn SignatureProvider>,
    list_separator: String,
}

impl PageContentBuilder {
    /// Create a builder with default content settings.
    #[must_use]
    pub fn new(
        comments_converter: Arc<dyn CommentsToContentConverter>,
        signature_provider: Arc<dyn SignatureProvider>,
    ) -> Self {
        Self {
            comments_converter,
            signature_provider,
            list_separator: ContentConfig::default().list_separator,
        }
    }

    /// Apply content settings from configuration.
    #[must_use]
    pub fn with_config(mut self, config: &ContentConfig) -> Self {
        self.list_separator.clone_from(&config.list_separator);
        self
    }

    /// Build a group for a set of identities with kind `Main` and no styles or extra.
    pub fn content_for<'a>(
        &'a self,
        dri: BTreeSet<Dri>,
        platforms: PlatformSet,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) -> ContentGroup {
        self.content_for_with(dri, platforms, ContentParams::new(), block)
    }

    /// Build a group for a set of identities.
    ///
    /// `params` supplies kind, styles and extra; identity or platforms set in
    /// `params` take precedence over the positional arguments.
    pub fn content_for_with<'a>(
        &'a self,
        dri: BTreeSet<Dri>,
        platforms: PlatformSet,
        params: ContentParams,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) -> ContentGroup {
        let base = ScopeDefaults {
            dri,
            platforms,
            styles: StyleSet::new(),
            extra: PropertyContainer::empty(),
        };
        let group = self.build_scoped(params.resolve(&base, Kind::Main), block);
        tracing::trace!(
            dri = ?group.dci.dri,
            children = group.children.len(),
            "Built content group"
        );
        group
    }

    /// Build a group for a single identity.
    pub fn content_for_dri<'a>(
        &'a self,
        dri: Dri,
        platforms: PlatformSet,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) -> ContentGroup {
        self.content_for(BTreeSet::from([dri]), platforms, block)
    }

    /// Build a group for a documentable, using its identity and platforms.
    pub fn content_for_documentable<'a>(
        &'a self,
        documentable: &dyn Documentable,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) -> ContentGroup {
        self.content_for_documentable_with(documentable, ContentParams::new(), block)
    }

    /// Build a group for a documentable with overrides.
    pub fn content_for_documentable_with<'a>(
        &'a self,
        documentable: &dyn Documentable,
        params: ContentParams,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) -> ContentGroup {
        self.content_for_with(
            BTreeSet::from([documentable.dri().clone()]),
            documentable.platform_data().clone(),
            params,
            block,
        )
    }

    /// Run `block` in a fresh scope and freeze it.
    pub(crate) fn build_scoped<'a>(
        &'a self,
        resolved: Resolved,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) -> ContentGroup {
        let mut builder = DocumentableContentBuilder::new(self, resolved.scope);
        block(&mut builder);
        builder.build(resolved.kind)
    }
}

/// One scope of the content DSL.
///
/// Accumulates children in call order. The scope only exists for the
/// duration of the closure it was handed to.
pub struct DocumentableContentBuilder<'a> {
    page: &'a PageContentBuilder,
    defaults: ScopeDefaults,
    contents: Vec<ContentNode>,
}

impl<'a> DocumentableContentBuilder<'a> {
    fn new(page: &'a PageContentBuilder, defaults: ScopeDefaults) -> Self {
        Self {
            page,
            defaults,
            contents: Vec::new(),
        }
    }

    fn build(self, kind: Kind) -> ContentGroup {
        ContentGroup {
            children: self.contents,
            dci: Dci::new(self.defaults.dri, kind),
            platforms: self.defaults.platforms,
            style: self.defaults.styles,
            extra: self.defaults.extra,
        }
    }

    /// Values applied to nodes created in this scope.
    #[must_use]
    pub fn defaults(&self) -> &ScopeDefaults {
        &self.defaults
    }

    /// Append a prebuilt node.
    pub fn push(&mut self, node: impl Into<ContentNode>) {
        self.contents.push(node.into());
    }

    /// Append prebuilt nodes in order.
    pub fn extend(&mut self, nodes: impl IntoIterator<Item = ContentNode>) {
        self.contents.extend(nodes);
    }

    pub fn header(&mut self, level: u8, block: impl FnOnce(&mut DocumentableContentBuilder<'a>)) {
        self.header_with(level, ContentParams::new(), block);
    }

    /// Append a heading wrapping a nested group.
    pub fn header_with(
        &mut self,
        level: u8,
        params: ContentParams,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) {
        let group = self.nested(params, Kind::Main, block);
        self.contents.push(ContentHeader { level, group }.into());
    }

    pub fn text(&mut self, text: impl Into<String>) {
        self.text_with(text, ContentParams::new());
    }

    /// Append a text leaf. Blank text is appended too.
    pub fn text_with(&mut self, text: impl Into<String>, params: ContentParams) {
        let resolved = params.resolve(&self.defaults, Kind::Main);
        self.contents.push(create_text(text.into(), &resolved));
    }

    /// Render the signature of `documentable` without appending it.
    #[must_use]
    pub fn build_signature(&self, documentable: &dyn Documentable) -> ContentNode {
        self.page.signature_provider.signature(documentable)
    }

    pub fn link_table(&mut self, dris: &[Dri]) {
        self.link_table_with(dris, ContentParams::new());
    }

    /// Append a table with one row per identity, each a link labelled with
    /// the identity's class names (empty when it has none).
    pub fn link_table_with(&mut self, dris: &[Dri], params: ContentParams) {
        let resolved = params.resolve(&self.defaults, Kind::Main);
        let page = self.page;
        let rows = dris
            .iter()
            .map(|dri| {
                let row = Resolved {
                    scope: ScopeDefaults {
                        dri: BTreeSet::from([dri.clone()]),
                        ..resolved.scope.clone()
                    },
                    kind: resolved.kind.clone(),
                };
                page.build_scoped(row, |b| {
                    b.link(dri.class_names().unwrap_or_default(), dri.clone());
                })
            })
            .collect();
        self.contents.push(create_table(rows, resolved).into());
    }

    pub fn table(&mut self, operation: impl FnOnce(&mut Self) -> Vec<ContentGroup>) {
        self.table_with(ContentParams::new(), operation);
    }

    /// Append a table whose rows are the groups returned by `operation`.
    pub fn table_with(
        &mut self,
        params: ContentParams,
        operation: impl FnOnce(&mut Self) -> Vec<ContentGroup>,
    ) {
        let resolved = params.resolve(&self.defaults, Kind::Main);
        let rows = operation(self);
        self.contents.push(create_table(rows, resolved).into());
    }

    pub fn block<T: Documentable>(
        &mut self,
        name: &str,
        level: u8,
        elements: &[T],
        render_when_empty: bool,
        operation: impl FnMut(&mut DocumentableContentBuilder<'a>, &T),
    ) {
        self.block_with(
            name,
            level,
            elements,
            render_when_empty,
            ContentParams::new(),
            operation,
        );
    }

    /// Append a titled section with one table row per element.
    ///
    /// Nothing is appended for an empty `elements` unless `render_when_empty`
    /// is set. Each row is built by `operation` in a scope carrying the
    /// element's identity and platforms.
    pub fn block_with<T: Documentable>(
        &mut self,
        name: &str,
        level: u8,
        elements: &[T],
        render_when_empty: bool,
        params: ContentParams,
        mut operation: impl FnMut(&mut DocumentableContentBuilder<'a>, &T),
    ) {
        if !render_when_empty && elements.is_empty() {
            return;
        }

        self.header(level, |b| b.text(name));

        let resolved = params.resolve(&self.defaults, Kind::Main);
        let page = self.page;
        let rows = elements
            .iter()
            .map(|element| {
                let row = Resolved {
                    scope: ScopeDefaults {
                        dri: BTreeSet::from([element.dri().clone()]),
                        platforms: element.platform_data().clone(),
                        styles: resolved.scope.styles.clone(),
                        extra: resolved.scope.extra.clone(),
                    },
                    kind: resolved.kind.clone(),
                };
                page.build_scoped(row, |b| operation(b, element))
            })
            .collect();
        self.contents.push(create_table(rows, resolved).into());
    }

    /// Append `elements` separated by `separator`, framed by non-empty
    /// `prefix` and `suffix`. Appends nothing for an empty slice.
    pub fn list<T>(
        &mut self,
        elements: &[T],
        prefix: &str,
        suffix: &str,
        separator: &str,
        operation: impl FnMut(&mut Self, &T),
    ) {
        self.list_with(
            elements,
            prefix,
            suffix,
            separator,
            ContentParams::new(),
            operation,
        );
    }

    /// [`list`](Self::list) without framing, using the configured separator.
    pub fn list_default<T>(&mut self, elements: &[T], operation: impl FnMut(&mut Self, &T)) {
        let page = self.page;
        self.list(elements, "", "", &page.list_separator, operation);
    }

    /// [`list`](Self::list) with overrides applied to the framing and
    /// separator text.
    pub fn list_with<T>(
        &mut self,
        elements: &[T],
        prefix: &str,
        suffix: &str,
        separator: &str,
        params: ContentParams,
        mut operation: impl FnMut(&mut Self, &T),
    ) {
        let Some((last, init)) = elements.split_last() else {
            return;
        };

        if !prefix.is_empty() {
            self.text_with(prefix, params.clone());
        }
        for element in init {
            operation(self, element);
            self.text_with(separator, params.clone());
        }
        operation(self, last);
        if !suffix.is_empty() {
            self.text_with(suffix, params);
        }
    }

    pub fn link(&mut self, text: impl Into<String>, address: Dri) {
        self.link_with(text, address, ContentParams::new());
    }

    /// Append a link to `address` labelled with `text`.
    pub fn link_with(&mut self, text: impl Into<String>, address: Dri, params: ContentParams) {
        let resolved = params.resolve(&self.defaults, Kind::Main);
        let label = create_text(text.into(), &resolved);
        self.contents.push(
            ContentDriLink {
                children: vec![label],
                address,
                dci: resolved.dci(),
                platforms: resolved.scope.platforms,
                style: resolved.scope.styles,
                extra: resolved.scope.extra,
            }
            .into(),
        );
    }

    pub fn link_content(
        &mut self,
        address: Dri,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) {
        self.link_content_with(address, ContentParams::new(), block);
    }

    /// Append a link to `address` whose visible content is built by `block`.
    pub fn link_content_with(
        &mut self,
        address: Dri,
        params: ContentParams,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) {
        let resolved = params.clone().resolve(&self.defaults, Kind::Main);
        let content = self.nested(params, Kind::Main, block);
        self.contents.push(
            ContentDriLink {
                children: content.children,
                address,
                dci: resolved.dci(),
                platforms: resolved.scope.platforms,
                style: resolved.scope.styles,
                extra: resolved.scope.extra,
            }
            .into(),
        );
    }

    pub fn resolved_link(&mut self, text: impl Into<String>, address: impl Into<String>) {
        self.resolved_link_with(text, address, ContentParams::new());
    }

    /// Append a link to an external address.
    pub fn resolved_link_with(
        &mut self,
        text: impl Into<String>,
        address: impl Into<String>,
        params: ContentParams,
    ) {
        let resolved = params.resolve(&self.defaults, Kind::Main);
        let label = create_text(text.into(), &resolved);
        self.contents.push(
            ContentResolvedLink {
                children: vec![label],
                address: address.into(),
                dci: resolved.dci(),
                platforms: resolved.scope.platforms,
                style: resolved.scope.styles,
                extra: resolved.scope.extra,
            }
            .into(),
        );
    }

    pub fn comment(&mut self, doc_tag: &DocTag) {
        self.comment_with(doc_tag, ContentParams::new());
    }

    /// Convert a doc comment and append it wrapped in a group.
    ///
    /// The kind defaults to [`Kind::Comment`].
    pub fn comment_with(&mut self, doc_tag: &DocTag, params: ContentParams) {
        let resolved = params.resolve(&self.defaults, Kind::Comment);
        let dci = resolved.dci();
        let converter = &self.page.comments_converter;
        let platforms = &resolved.scope.platforms;
        let children = converter.build_content(doc_tag, &dci, platforms);
        self.contents.push(
            ContentGroup {
                children,
                dci,
                platforms: resolved.scope.platforms,
                style: resolved.scope.styles,
                extra: resolved.scope.extra,
            }
            .into(),
        );
    }

    pub fn group(&mut self, block: impl FnOnce(&mut DocumentableContentBuilder<'a>)) {
        self.group_with(ContentParams::new(), block);
    }

    /// Append a nested group.
    pub fn group_with(
        &mut self,
        params: ContentParams,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) {
        let group = self.build_group_with(params, block);
        self.contents.push(group.into());
    }

    pub fn divergent_group(&mut self, block: impl FnOnce(&mut DivergentBuilder<'a>)) {
        self.divergent_group_with(ContentParams::new(), block);
    }

    /// Append a divergent group built through a [`DivergentBuilder`].
    pub fn divergent_group_with(
        &mut self,
        params: ContentParams,
        block: impl FnOnce(&mut DivergentBuilder<'a>),
    ) {
        let resolved = params.resolve(&self.defaults, Kind::Main);
        let mut builder = DivergentBuilder::new(self.page, resolved);
        block(&mut builder);
        self.contents.push(builder.build().into());
    }

    /// Build a nested group and return it without appending.
    #[must_use]
    pub fn build_group(
        &self,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) -> ContentGroup {
        self.build_group_with(ContentParams::new(), block)
    }

    #[must_use]
    pub fn build_group_with(
        &self,
        params: ContentParams,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) -> ContentGroup {
        self.nested(params, Kind::Main, block)
    }

    pub fn platform_dependent_hint(
        &mut self,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) {
        self.platform_dependent_hint_with(ContentParams::new(), block);
    }

    /// Hint for a single identity other than the scope's.
    pub fn platform_dependent_hint_for(
        &mut self,
        dri: Dri,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) {
        let params = ContentParams::new().with_single_dri(dri);
        self.platform_dependent_hint_with(params, block);
    }

    /// Append a nested group marked as rendering differently per platform.
    pub fn platform_dependent_hint_with(
        &mut self,
        params: ContentParams,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) {
        let group = self.build_group_with(params, block);
        let platforms = group.platforms.clone();
        self.contents.push(
            PlatformHintedContent {
                inner: Box::new(group.into()),
                platforms,
            }
            .into(),
        );
    }

    /// Append one text leaf per platform in `platforms` that has a value
    /// whose transformed text is not blank. Each leaf is restricted to its
    /// own platform.
    pub fn platform_text<T>(
        &mut self,
        values: &PlatformDependent<T>,
        platforms: &PlatformSet,
        transform: impl Fn(&T) -> String,
    ) {
        for (platform, value) in values.iter().filter(|(p, _)| platforms.contains(*p)) {
            let text = transform(value);
            if !text.trim().is_empty() {
                let only = PlatformSet::from([platform.clone()]);
                let params = ContentParams::new().with_platforms(only);
                self.text_with(text, params);
            }
        }
    }

    /// [`platform_text`](Self::platform_text) over every platform with a value.
    pub fn platform_text_all<T>(
        &mut self,
        values: &PlatformDependent<T>,
        transform: impl Fn(&T) -> String,
    ) {
        self.platform_text(values, &values.keys(), transform);
    }

    fn nested(
        &self,
        params: ContentParams,
        kind: Kind,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) -> ContentGroup {
        let resolved = params.resolve(&self.defaults, kind);
        self.page.build_scoped(resolved, block)
    }
}

fn create_text(text: String, resolved: &Resolved) -> ContentNode {
    ContentText {
        text,
        dci: resolved.dci(),
        platforms: resolved.scope.platforms.clone(),
        style: resolved.scope.styles.clone(),
        extra: resolved.scope.extra.clone(),
    }
    .into()
}

fn create_table(rows: Vec<ContentGroup>, resolved: Resolved) -> ContentTable {
    ContentTable {
        header: Vec::new(),
        rows,
        dci: resolved.dci(),
        platforms: resolved.scope.platforms,
        style: resolved.scope.styles,
        extra: resolved.scope.extra,
    }
}
