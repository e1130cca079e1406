//! Reconciliation of generated pages that describe the same entity.
//!
//! [`PageMerger`] walks a page tree and, among the children of every page,
//! groups pages of the same kind and name. Each group with more than one page
//! is handed to the configured [`PageMergerStrategy`] chain.

mod same_class_name;

use docforge_config::{MergeConfig, MergeStrategyName};
use docforge_model::{PageKind, PageNode};

use crate::error::MergeError;

pub use same_class_name::SameClassNamePageMergerStrategy;

/// Merges pages that clash under one path.
pub trait PageMergerStrategy: Send + Sync {
    /// Name used in configuration and logs.
    fn name(&self) -> &'static str;

    /// Whether this strategy accepts `pages`. The merger skips strategies
    /// that decline.
    fn can_merge(&self, pages: &[PageNode]) -> bool {
        !pages.is_empty()
    }

    /// Replace `pages`, generated under `path`, with their merged form.
    ///
    /// [`PageMerger`] detaches child pages before calling strategies and
    /// reattaches them to the output, so `pages` arrive without children.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError`] when the pages violate the strategy's contract.
    fn try_merge(
        &self,
        pages: Vec<PageNode>,
        path: &[String],
    ) -> Result<Vec<PageNode>, MergeError>;
}

/// Fallback strategy: reports the clash and keeps every page.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPageMergerStrategy;

impl PageMergerStrategy for DefaultPageMergerStrategy {
    fn name(&self) -> &'static str {
        "default"
    }

    fn try_merge(
        &self,
        pages: Vec<PageNode>,
        path: &[String],
    ) -> Result<Vec<PageNode>, MergeError> {
        if pages.len() > 1 {
            tracing::warn!(
                path = %path.join("/"),
                count = pages.len(),
                "Pages with the same name were not merged"
            );
        }
        Ok(pages)
    }
}

/// Page tree transformer applying a chain of merge strategies.
pub struct PageMerger {
    strategies: Vec<Box<dyn PageMergerStrategy>>,
}

impl PageMerger {
    /// Strategies run in order; each receives the previous one's output.
    #[must_use]
    pub fn new(strategies: Vec<Box<dyn PageMergerStrategy>>) -> Self {
        Self { strategies }
    }

    /// Build the strategy chain named in configuration.
    #[must_use]
    pub fn from_config(config: &MergeConfig) -> Self {
        let strategies = config
            .strategies
            .iter()
            .map(|name| -> Box<dyn PageMergerStrategy> {
                match name {
                    MergeStrategyName::SameClassName => Box::new(SameClassNamePageMergerStrategy),
                    MergeStrategyName::Default => Box::new(DefaultPageMergerStrategy),
                }
            })
            .collect();
        Self::new(strategies)
    }

    /// Names of the configured strategies, in order.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Merge clashing pages throughout the tree rooted at `root`.
    ///
    /// Sibling order follows the first occurrence of each name. The first
    /// page of a group is the one strategies treat as primary, so callers
    /// wanting stable output must supply siblings in a stable order.
    ///
    /// # Errors
    ///
    /// Propagates the first [`MergeError`] raised by a strategy.
    pub fn invoke(&self, root: PageNode) -> Result<PageNode, MergeError> {
        self.merge_children(root, &[])
    }

    fn merge_children(&self, mut page: PageNode, path: &[String]) -> Result<PageNode, MergeError> {
        let mut page_path = path.to_vec();
        page_path.push(page.name.clone());

        let mut merged = Vec::with_capacity(page.children.len());
        for group in group_by_name(std::mem::take(&mut page.children)) {
            let pages = if group.len() > 1 {
                self.merge_group(group, &page_path)?
            } else {
                group
            };
            for child in pages {
                merged.push(self.merge_children(child, &page_path)?);
            }
        }
        page.children = merged;
        Ok(page)
    }

    fn merge_group(
        &self,
        mut pages: Vec<PageNode>,
        parent: &[String],
    ) -> Result<Vec<PageNode>, MergeError> {
        let mut path = parent.to_vec();
        path.push(pages[0].name.clone());

        let detached: Vec<Vec<PageNode>> = pages
            .iter_mut()
            .map(|page| std::mem::take(&mut page.children))
            .collect();

        for strategy in &self.strategies {
            if pages.len() <= 1 {
                break;
            }
            if !strategy.can_merge(&pages) {
                continue;
            }
            tracing::debug!(
                path = %path.join("/"),
                strategy = strategy.name(),
                count = pages.len(),
                "Merging pages"
            );
            pages = strategy.try_merge(pages, &path)?;
        }
        Ok(reattach_children(pages, detached))
    }
}

impl Default for PageMerger {
    fn default() -> Self {
        Self::from_config(&MergeConfig::default())
    }
}

/// Give detached child pages back to the strategy output.
///
/// Pages keep their own children when the chain returned as many pages as it
/// received; otherwise all children go to the first output page, where the
/// next level of merging groups them.
fn reattach_children(mut pages: Vec<PageNode>, detached: Vec<Vec<PageNode>>) -> Vec<PageNode> {
    if pages.len() == detached.len() {
        for (page, children) in pages.iter_mut().zip(detached) {
            page.children.extend(children);
        }
    } else if let Some(first) = pages.first_mut() {
        first.children.extend(detached.into_iter().flatten());
    }
    pages
}

/// Group pages by kind and name, preserving first-encounter order.
fn group_by_name(pages: Vec<PageNode>) -> Vec<Vec<PageNode>> {
    let mut groups: Vec<((PageKind, String), Vec<PageNode>)> = Vec::new();
    for page in pages {
        let key = (page.kind, page.name.clone());
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.push(page),
            None => groups.push((key, vec![page])),
        }
    }
    groups.into_iter().map(|(_, group)| group).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dri, js, jvm, jvm_and_js, page};
    use docforge_model::{ContentNode, Dri, Kind, PlatformSet};
    use pretty_assertions::assert_eq;

    fn root(children: Vec<PageNode>) -> PageNode {
        page("root", PageKind::Module, Dri::top_level(), jvm()).with_children(children)
    }

    fn names(pages: &[PageNode]) -> Vec<&str> {
        pages.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_default_chain_from_config() {
        let merger = PageMerger::default();
        assert_eq!(merger.strategy_names(), vec!["same-class-name", "default"]);
    }

    #[test]
    fn test_from_config_keeps_order() {
        let config = MergeConfig {
            strategies: vec![MergeStrategyName::Default],
        };
        let merger = PageMerger::from_config(&config);
        assert_eq!(merger.strategy_names(), vec!["default"]);
    }

    #[test]
    fn test_classlike_pages_with_same_name_are_merged() {
        let tree = root(vec![
            page("Foo", PageKind::Classlike, dri("Foo"), jvm()),
            page("Bar", PageKind::Classlike, dri("Bar"), jvm()),
            page("Foo", PageKind::Classlike, dri("Foo"), js()),
        ]);

        let merged = PageMerger::default().invoke(tree).unwrap();

        assert_eq!(names(&merged.children), vec!["Foo", "Bar"]);
        let foo = &merged.children[0];
        assert_eq!(foo.platforms().len(), 2);
        let ContentNode::Group(content) = &foo.content else {
            panic!("expected group content");
        };
        assert_eq!(content.children.len(), 2);
        for child in &content.children {
            assert_eq!(child.dci().kind, Kind::Classlikes);
        }
    }

    #[test]
    fn test_member_overloads_are_kept() {
        let run = Dri::package("p").with_callable("run");
        let tree = root(vec![
            page("run", PageKind::Member, run.clone(), jvm()),
            page("run", PageKind::Member, run, js()),
        ]);

        let merged = PageMerger::default().invoke(tree).unwrap();
        assert_eq!(names(&merged.children), vec!["run", "run"]);
    }

    #[test]
    fn test_same_name_different_kind_is_not_a_clash() {
        let function = Dri::package("p").with_callable("Foo");
        let tree = root(vec![
            page("Foo", PageKind::Classlike, dri("Foo"), jvm()),
            page("Foo", PageKind::Member, function, jvm()),
        ]);
        let merged = PageMerger::default().invoke(tree).unwrap();
        assert_eq!(merged.children.len(), 2);
        assert_eq!(merged.children[0].kind, PageKind::Classlike);
        assert_eq!(merged.children[1].kind, PageKind::Member);
    }

    #[test]
    fn test_nested_children_are_merged() {
        let package = page("p", PageKind::Package, Dri::package("p"), jvm()).with_children(vec![
            page("Foo", PageKind::Classlike, dri("Foo"), jvm()),
            page("Foo", PageKind::Classlike, dri("Foo"), js()),
        ]);
        let merged = PageMerger::default().invoke(root(vec![package])).unwrap();

        let package = &merged.children[0];
        assert_eq!(names(&package.children), vec!["Foo"]);
    }

    fn member(class: &str, name: &str) -> Dri {
        Dri::package("p").with_class(class).with_callable(name)
    }

    fn foo_with(platforms: PlatformSet, children: Vec<PageNode>) -> PageNode {
        let foo = page("Foo", PageKind::Classlike, dri("Foo"), platforms);
        foo.with_children(children)
    }

    #[test]
    fn test_merged_class_keeps_member_pages() {
        let bar = member("Foo", "bar");
        let jvm_bar = page("bar", PageKind::Member, bar.clone(), jvm());
        let js_bar = page("bar", PageKind::Member, bar, js());
        let tree = root(vec![
            foo_with(jvm(), vec![jvm_bar]),
            foo_with(js(), vec![js_bar]),
        ]);

        let merged = PageMerger::default().invoke(tree).unwrap();

        assert_eq!(names(&merged.children), vec!["Foo"]);
        let foo = &merged.children[0];
        assert_eq!(names(&foo.children), vec!["bar", "bar"]);
        assert_eq!(foo.children[0].platforms(), &jvm());
        assert_eq!(foo.children[1].platforms(), &js());
    }

    #[test]
    fn test_nested_classes_of_merged_pages_are_merged() {
        let inner = dri("Foo.Inner");
        let jvm_inner = page("Inner", PageKind::Classlike, inner.clone(), jvm());
        let js_inner = page("Inner", PageKind::Classlike, inner, js());
        let tree = root(vec![
            foo_with(jvm(), vec![jvm_inner]),
            foo_with(js(), vec![js_inner]),
        ]);

        let merged = PageMerger::default().invoke(tree).unwrap();

        let foo = &merged.children[0];
        assert_eq!(names(&foo.children), vec!["Inner"]);
        assert_eq!(foo.children[0].platforms(), &jvm_and_js());
    }

    #[test]
    fn test_unmerged_pages_keep_their_own_children() {
        let config = MergeConfig {
            strategies: vec![MergeStrategyName::Default],
        };
        let a = page("a", PageKind::Member, member("Foo", "a"), jvm());
        let b = page("b", PageKind::Member, member("Foo", "b"), js());
        let tree = root(vec![foo_with(jvm(), vec![a]), foo_with(js(), vec![b])]);

        let merged = PageMerger::from_config(&config).invoke(tree).unwrap();

        assert_eq!(names(&merged.children), vec!["Foo", "Foo"]);
        assert_eq!(names(&merged.children[0].children), vec!["a"]);
        assert_eq!(names(&merged.children[1].children), vec!["b"]);
    }

    #[test]
    fn test_strategy_error_propagates() {
        struct Failing;

        impl PageMergerStrategy for Failing {
            fn name(&self) -> &'static str {
                "failing"
            }

            fn try_merge(
                &self,
                _pages: Vec<PageNode>,
                path: &[String],
            ) -> Result<Vec<PageNode>, MergeError> {
                Err(MergeError::Empty {
                    path: path.join("/"),
                })
            }
        }

        let tree = root(vec![
            page("Foo", PageKind::Classlike, dri("Foo"), jvm()),
            page("Foo", PageKind::Classlike, dri("Foo"), js()),
        ]);
        let merger = PageMerger::new(vec![Box::new(Failing)]);
        let err = merger.invoke(tree).unwrap_err();
        assert_eq!(err.to_string(), "no pages to merge at `root/Foo`");
    }

    #[test]
    fn test_default_strategy_returns_pages_unchanged() {
        let pages = vec![
            page("a", PageKind::Member, dri("A"), jvm()),
            page("a", PageKind::Member, dri("A"), js()),
        ];
        let out = DefaultPageMergerStrategy
            .try_merge(pages.clone(), &["root".to_owned()])
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].platforms(), pages[0].platforms());
        assert_eq!(out[1].platforms(), pages[1].platforms());
    }
}
