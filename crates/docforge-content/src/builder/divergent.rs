//! Builders for content that differs per platform.

use std::collections::BTreeSet;

use docforge_model::{
    ContentDivergentGroup, ContentDivergentInstance, ContentGroup, Dci, Dri, Kind, PlatformSet,
};

use super::params::{ContentParams, Resolved, ScopeDefaults};
use super::{DocumentableContentBuilder, PageContentBuilder};
use crate::error::ContentError;

/// Collects the instances of one divergent group.
///
/// Instances inherit the group's kind, styles and extra unless the
/// `*_with` form overrides them; identity and platforms are always given
/// explicitly.
pub struct DivergentBuilder<'a> {
    page: &'a PageContentBuilder,
    main: Resolved,
    instances: Vec<ContentDivergentInstance>,
}

impl<'a> DivergentBuilder<'a> {
    pub(crate) fn new(page: &'a PageContentBuilder, main: Resolved) -> Self {
        Self {
            page,
            main,
            instances: Vec::new(),
        }
    }

    /// Append one instance.
    ///
    /// # Panics
    ///
    /// Panics if `block` returns without setting the divergent slot. Use
    /// [`try_instance`](Self::try_instance) to get the error instead.
    pub fn instance(
        &mut self,
        dri: BTreeSet<Dri>,
        platforms: PlatformSet,
        block: impl FnOnce(&mut DivergentInstanceBuilder<'a>),
    ) {
        self.instance_with(dri, platforms, ContentParams::new(), block);
    }

    /// [`instance`](Self::instance) with overrides.
    ///
    /// # Panics
    ///
    /// Panics if `block` returns without setting the divergent slot.
    pub fn instance_with(
        &mut self,
        dri: BTreeSet<Dri>,
        platforms: PlatformSet,
        params: ContentParams,
        block: impl FnOnce(&mut DivergentInstanceBuilder<'a>),
    ) {
        if let Err(err) = self.try_instance_with(dri, platforms, params, block) {
            panic!("{err}");
        }
    }

    /// Append one instance, failing if `block` leaves the divergent slot unset.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::MissingDivergent`]; nothing is appended then.
    pub fn try_instance(
        &mut self,
        dri: BTreeSet<Dri>,
        platforms: PlatformSet,
        block: impl FnOnce(&mut DivergentInstanceBuilder<'a>),
    ) -> Result<(), ContentError> {
        self.try_instance_with(dri, platforms, ContentParams::new(), block)
    }

    /// [`try_instance`](Self::try_instance) with overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::MissingDivergent`]; nothing is appended then.
    pub fn try_instance_with(
        &mut self,
        dri: BTreeSet<Dri>,
        platforms: PlatformSet,
        params: ContentParams,
        block: impl FnOnce(&mut DivergentInstanceBuilder<'a>),
    ) -> Result<(), ContentError> {
        let resolved = params
            .with_dri(dri)
            .with_platforms(platforms)
            .resolve(&self.main.scope, self.main.kind.clone());
        let mut builder = DivergentInstanceBuilder::new(self.page, resolved.scope);
        block(&mut builder);
        let instance = builder.try_build(resolved.kind)?;
        self.instances.push(instance);
        Ok(())
    }

    /// Freeze the group. Its platforms are the union of its instances'.
    pub(crate) fn build(self) -> ContentDivergentGroup {
        let platforms: PlatformSet = self
            .instances
            .iter()
            .flat_map(|instance| instance.platforms.iter().cloned())
            .collect();
        tracing::trace!(
            dri = ?self.main.scope.dri,
            instances = self.instances.len(),
            platforms = platforms.len(),
            "Built divergent group"
        );
        ContentDivergentGroup {
            instances: self.instances,
            dci: Dci::new(self.main.scope.dri, self.main.kind),
            platforms,
            style: self.main.scope.styles,
            extra: self.main.scope.extra,
        }
    }
}

/// Fills the `before`, `divergent` and `after` slots of one instance.
///
/// Setting a slot twice keeps the last value.
pub struct DivergentInstanceBuilder<'a> {
    page: &'a PageContentBuilder,
    defaults: ScopeDefaults,
    before: Option<ContentGroup>,
    divergent: Option<ContentGroup>,
    after: Option<ContentGroup>,
}

impl<'a> DivergentInstanceBuilder<'a> {
    fn new(page: &'a PageContentBuilder, defaults: ScopeDefaults) -> Self {
        Self {
            page,
            defaults,
            before: None,
            divergent: None,
            after: None,
        }
    }

    pub fn before(&mut self, block: impl FnOnce(&mut DocumentableContentBuilder<'a>)) {
        self.before_with(ContentParams::new(), block);
    }

    pub fn before_with(
        &mut self,
        params: ContentParams,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) {
        self.before = Some(self.slot(params, block));
    }

    pub fn divergent(&mut self, block: impl FnOnce(&mut DocumentableContentBuilder<'a>)) {
        self.divergent_with(ContentParams::new(), block);
    }

    pub fn divergent_with(
        &mut self,
        params: ContentParams,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) {
        self.divergent = Some(self.slot(params, block));
    }

    pub fn after(&mut self, block: impl FnOnce(&mut DocumentableContentBuilder<'a>)) {
        self.after_with(ContentParams::new(), block);
    }

    pub fn after_with(
        &mut self,
        params: ContentParams,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) {
        self.after = Some(self.slot(params, block));
    }

    fn slot(
        &self,
        params: ContentParams,
        block: impl FnOnce(&mut DocumentableContentBuilder<'a>),
    ) -> ContentGroup {
        let resolved = params.resolve(&self.defaults, Kind::Main);
        self.page.build_scoped(resolved, block)
    }

    fn try_build(self, kind: Kind) -> Result<ContentDivergentInstance, ContentError> {
        let Some(divergent) = self.divergent else {
            return Err(ContentError::MissingDivergent {
                dri: self.defaults.dri,
            });
        };
        Ok(ContentDivergentInstance {
            before: self.before,
            divergent,
            after: self.after,
            dci: Dci::new(self.defaults.dri, kind),
            platforms: self.defaults.platforms,
            style: self.defaults.styles,
            extra: self.defaults.extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dri, js, jvm, jvm_and_js, page_builder};
    use docforge_model::{ContentNode, Style, StyleSet};
    use pretty_assertions::assert_eq;

    fn only_divergent_group(group: &ContentGroup) -> &ContentDivergentGroup {
        assert_eq!(group.children.len(), 1);
        let ContentNode::DivergentGroup(divergent) = &group.children[0] else {
            panic!("expected divergent group, got {:?}", group.children[0]);
        };
        divergent
    }

    #[test]
    fn test_instances_keep_their_own_platforms() {
        let builder = page_builder();
        let main = dri("Main");
        let group = builder.content_for_dri(main.clone(), jvm_and_js(), |b| {
            b.divergent_group(|d| {
                d.instance(BTreeSet::from([dri("A")]), jvm(), |i| {
                    i.divergent(|b| b.text("jvm"));
                });
                d.instance(BTreeSet::from([dri("B")]), js(), |i| {
                    i.before(|b| b.text("before"));
                    i.divergent(|b| b.text("js"));
                    i.after(|b| b.text("after"));
                });
            });
        });

        let divergent = only_divergent_group(&group);
        assert_eq!(divergent.instances.len(), 2);
        assert_eq!(divergent.platforms, jvm_and_js());
        assert_eq!(divergent.dci, Dci::single(main, Kind::Main));

        let first = &divergent.instances[0];
        assert_eq!(first.platforms, jvm());
        assert_eq!(first.dci.dri, BTreeSet::from([dri("A")]));
        assert!(first.before.is_none());
        assert!(first.after.is_none());
        assert_eq!(first.divergent.platforms, jvm());

        let second = &divergent.instances[1];
        assert_eq!(second.platforms, js());
        assert!(second.before.is_some());
        assert!(second.after.is_some());
    }

    #[test]
    fn test_group_platforms_are_union_of_instances() {
        let builder = page_builder();
        let group = builder.content_for_dri(dri("Main"), jvm_and_js(), |b| {
            b.divergent_group(|d| {
                d.instance(BTreeSet::from([dri("A")]), jvm(), |i| {
                    i.divergent(|b| b.text("only jvm"));
                });
            });
        });
        assert_eq!(only_divergent_group(&group).platforms, jvm());
    }

    #[test]
    fn test_empty_divergent_group() {
        let builder = page_builder();
        let group = builder.content_for_dri(dri("Main"), jvm(), |b| b.divergent_group(|_| {}));
        let divergent = only_divergent_group(&group);
        assert!(divergent.instances.is_empty());
        assert!(divergent.platforms.is_empty());
    }

    #[test]
    fn test_last_slot_write_wins() {
        let builder = page_builder();
        let group = builder.content_for_dri(dri("Main"), jvm(), |b| {
            b.divergent_group(|d| {
                d.instance(BTreeSet::from([dri("A")]), jvm(), |i| {
                    i.divergent(|b| b.text("first"));
                    i.divergent(|b| b.text("second"));
                });
            });
        });
        let instance = &only_divergent_group(&group).instances[0];
        let text = instance.divergent.children[0].as_text().unwrap();
        assert_eq!(text.text, "second");
    }

    #[test]
    fn test_instance_inherits_group_kind_and_styles() {
        let builder = page_builder();
        let params = ContentParams::new()
            .with_kind(Kind::Functions)
            .with_styles(StyleSet::from([Style::Monospace]));
        let group = builder.content_for_dri(dri("Main"), jvm(), |b| {
            b.divergent_group_with(params, |d| {
                d.instance(BTreeSet::from([dri("A")]), jvm(), |i| {
                    i.divergent(|b| b.text("x"));
                });
            });
        });
        let divergent = only_divergent_group(&group);
        assert_eq!(divergent.dci.kind, Kind::Functions);
        let instance = &divergent.instances[0];
        assert_eq!(instance.dci.kind, Kind::Functions);
        assert_eq!(instance.style, StyleSet::from([Style::Monospace]));
    }

    #[test]
    fn test_try_instance_reports_missing_divergent() {
        let builder = page_builder();
        let mut outcome = None;
        let group = builder.content_for_dri(dri("Main"), jvm(), |b| {
            b.divergent_group(|d| {
                outcome = Some(d.try_instance(BTreeSet::from([dri("A")]), jvm(), |i| {
                    i.before(|b| b.text("no divergent"));
                }));
            });
        });

        let err = outcome.unwrap().unwrap_err();
        assert!(matches!(err, ContentError::MissingDivergent { .. }));
        assert!(only_divergent_group(&group).instances.is_empty());
    }

    #[test]
    #[should_panic(expected = "was built without divergent content")]
    fn test_instance_without_divergent_panics() {
        let builder = page_builder();
        builder.content_for_dri(dri("Main"), jvm(), |b| {
            b.divergent_group(|d| {
                d.instance(BTreeSet::from([dri("A")]), jvm(), |i| {
                    i.after(|b| b.text("orphan"));
                });
            });
        });
    }
}
