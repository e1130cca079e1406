use docforge_model::{
    ContentGroup, Dci, Kind, PageKind, PageNode, PlatformSet, PropertyContainer, StyleSet,
};

use super::PageMergerStrategy;
use crate::error::MergeError;

/// Merges class-like pages generated once per platform for the same class.
///
/// The result is a single synthetic page named and identified after the first
/// input page. Its content groups every input page's content under a
/// `Classlikes` child tagged with that page's identity and platforms. The
/// merged page has no documentable or embedded resources. [`PageMerger`]
/// gives it the input pages' children back.
///
/// The top-level group is a plain `Main` group over the union of the input
/// platforms. Nothing marks it as platform-hinted; renderers that show one
/// tab per platform read the platforms of each `Classlikes` child.
///
/// [`PageMerger`]: super::PageMerger
#[derive(Debug, Default, Clone, Copy)]
pub struct SameClassNamePageMergerStrategy;

impl PageMergerStrategy for SameClassNamePageMergerStrategy {
    fn name(&self) -> &'static str {
        "same-class-name"
    }

    fn can_merge(&self, pages: &[PageNode]) -> bool {
        !pages.is_empty() && pages.iter().all(PageNode::is_classlike)
    }

    fn try_merge(
        &self,
        pages: Vec<PageNode>,
        path: &[String],
    ) -> Result<Vec<PageNode>, MergeError> {
        let Some(first) = pages.first() else {
            return Err(MergeError::Empty {
                path: path.join("/"),
            });
        };
        if let Some(page) = pages.iter().find(|page| !page.is_classlike()) {
            return Err(MergeError::NotClasslike {
                path: path.join("/"),
                name: page.name.clone(),
            });
        }

        let name = first.name.clone();
        let dri = first.dri.clone();
        let platforms: PlatformSet = pages
            .iter()
            .flat_map(|page| page.platforms().iter().cloned())
            .collect();

        let children = pages
            .into_iter()
            .map(|page| {
                let PageNode { dri, content, .. } = page;
                ContentGroup {
                    dci: Dci::new(dri, Kind::Classlikes),
                    platforms: content.platforms().clone(),
                    style: content.style().clone(),
                    extra: content.extra().clone(),
                    children: vec![content],
                }
                .into()
            })
            .collect();

        let content = ContentGroup {
            children,
            dci: Dci::new(dri.clone(), Kind::Main),
            platforms,
            style: StyleSet::new(),
            extra: PropertyContainer::empty(),
        };
        Ok(vec![PageNode::new(name, PageKind::Classlike, dri, content)])
    }
}
