//! Conversion of parsed doc comments into content nodes.

use docforge_model::{
    ContentBreakLine, ContentCode, ContentDriLink, ContentGroup, ContentList, ContentNode,
    ContentResolvedLink, ContentText, Dci, DocTag, PlatformSet, PropertyContainer, Style, StyleSet,
};

/// Turns one documentation comment node into renderable content.
pub trait CommentsToContentConverter: Send + Sync {
    /// Convert `doc_tag`; every produced node carries `dci` and `platforms`.
    fn build_content(
        &self,
        doc_tag: &DocTag,
        dci: &Dci,
        platforms: &PlatformSet,
    ) -> Vec<ContentNode>;
}

/// Default converter mapping each [`DocTag`] to its natural content node.
///
/// Emphasis and paragraphs become styled groups. Emphasis also styles every
/// text and link nested inside it. Code becomes [`ContentCode`],
/// documentation links stay unresolved [`ContentDriLink`]s, and unknown
/// custom tags are replaced by their converted children.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocTagToContentConverter;

impl CommentsToContentConverter for DocTagToContentConverter {
    fn build_content(
        &self,
        doc_tag: &DocTag,
        dci: &Dci,
        platforms: &PlatformSet,
    ) -> Vec<ContentNode> {
        Conversion { dci, platforms }.convert(doc_tag, &StyleSet::new())
    }
}

struct Conversion<'a> {
    dci: &'a Dci,
    platforms: &'a PlatformSet,
}

impl Conversion<'_> {
    fn convert(&self, tag: &DocTag, styles: &StyleSet) -> Vec<ContentNode> {
        match tag {
            DocTag::Text(text) => vec![
                ContentText {
                    text: text.clone(),
                    dci: self.dci.clone(),
                    platforms: self.platforms.clone(),
                    style: styles.clone(),
                    extra: PropertyContainer::empty(),
                }
                .into(),
            ],
            DocTag::Paragraph(children) => {
                let paragraph = StyleSet::from([Style::Paragraph]);
                vec![self.group(children, paragraph, styles)]
            }
            DocTag::Bold(children) => self.emphasis(children, styles, Style::Strong),
            DocTag::Italic(children) => self.emphasis(children, styles, Style::Italic),
            DocTag::Strikethrough(children) => {
                self.emphasis(children, styles, Style::Strikethrough)
            }
            DocTag::CodeInline(children) => vec![self.code(children, "", false)],
            DocTag::CodeBlock { language, children } => vec![self.code(children, language, true)],
            DocTag::Link { href, children } => vec![
                ContentResolvedLink {
                    children: self.convert_all(children, styles),
                    address: href.clone(),
                    dci: self.dci.clone(),
                    platforms: self.platforms.clone(),
                    style: styles.clone(),
                    extra: PropertyContainer::empty(),
                }
                .into(),
            ],
            DocTag::DocumentationLink { dri, children } => vec![
                ContentDriLink {
                    children: self.convert_all(children, styles),
                    address: dri.clone(),
                    dci: self.dci.clone(),
                    platforms: self.platforms.clone(),
                    style: styles.clone(),
                    extra: PropertyContainer::empty(),
                }
                .into(),
            ],
            DocTag::UnorderedList(items) => vec![self.list(items, false)],
            DocTag::OrderedList(items) => vec![self.list(items, true)],
            DocTag::ListItem(children) => vec![self.group(children, styles.clone(), styles)],
            DocTag::Br => vec![
                ContentBreakLine {
                    dci: self.dci.clone(),
                    platforms: self.platforms.clone(),
                    style: StyleSet::new(),
                    extra: PropertyContainer::empty(),
                }
                .into(),
            ],
            DocTag::Custom { children, .. } => self.convert_all(children, styles),
        }
    }

    fn convert_all(&self, tags: &[DocTag], styles: &StyleSet) -> Vec<ContentNode> {
        tags.iter()
            .flat_map(|tag| self.convert(tag, styles))
            .collect()
    }

    /// Group whose style, and that of every node below it, adds `style` to
    /// the enclosing emphasis.
    fn emphasis(&self, children: &[DocTag], styles: &StyleSet, style: Style) -> Vec<ContentNode> {
        let mut nested = styles.clone();
        nested.insert(style);
        vec![self.group(children, nested.clone(), &nested)]
    }

    fn group(&self, children: &[DocTag], style: StyleSet, inherited: &StyleSet) -> ContentNode {
        ContentGroup {
            children: self.convert_all(children, inherited),
            dci: self.dci.clone(),
            platforms: self.platforms.clone(),
            style,
            extra: PropertyContainer::empty(),
        }
        .into()
    }

    fn code(&self, children: &[DocTag], language: &str, block: bool) -> ContentNode {
        ContentCode {
            children: self.convert_all(children, &StyleSet::new()),
            language: language.to_owned(),
            block,
            dci: self.dci.clone(),
            platforms: self.platforms.clone(),
            style: StyleSet::new(),
            extra: PropertyContainer::empty(),
        }
        .into()
    }

    fn list(&self, items: &[DocTag], ordered: bool) -> ContentNode {
        ContentList {
            children: self.convert_all(items, &StyleSet::new()),
            ordered,
            dci: self.dci.clone(),
            platforms: self.platforms.clone(),
            style: StyleSet::new(),
            extra: PropertyContainer::empty(),
        }
        .into()
    }
}
