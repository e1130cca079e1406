//! Renderable content tree.
//!
//! Every node carries a [`Dci`] (which entities and which page role it
//! represents), the platforms it applies to, a style set and extra
//! properties. Trees are produced by the content builder and traversed
//! read-only by renderers and link resolvers.

use std::collections::BTreeSet;

use crate::dri::Dri;
use crate::platform::PlatformSet;
use crate::properties::PropertyContainer;

/// Role of a content node within a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Kind {
    #[default]
    Main,
    Comment,
    BriefComment,
    Classlikes,
    Constructors,
    Functions,
    Properties,
    Packages,
    Symbol,
    Signature,
    Parameters,
    Modifiers,
    Annotations,
    Sample,
    Source,
    Empty,
    /// Kind contributed by a later pipeline stage.
    Custom(String),
}

/// Content identity: the entities a node documents plus its role.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dci {
    pub dri: BTreeSet<Dri>,
    pub kind: Kind,
}

impl Dci {
    #[must_use]
    pub fn new(dri: BTreeSet<Dri>, kind: Kind) -> Self {
        Self { dri, kind }
    }

    /// Identity of a single entity.
    #[must_use]
    pub fn single(dri: Dri, kind: Kind) -> Self {
        Self {
            dri: BTreeSet::from([dri]),
            kind,
        }
    }
}

/// Styling flag attached to a node.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Style {
    Bold,
    Italic,
    Strong,
    Strikethrough,
    Monospace,
    Paragraph,
    Block,
    Indented,
    RowTitle,
    TabbedContent,
    WithExtraAttributes,
    Custom(String),
}

/// Ordered set of styles carried by content nodes.
pub type StyleSet = BTreeSet<Style>;

/// Literal text leaf.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentText {
    pub text: String,
    pub dci: Dci,
    pub platforms: PlatformSet,
    pub style: StyleSet,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub extra: PropertyContainer,
}

/// Hard line break.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentBreakLine {
    pub dci: Dci,
    pub platforms: PlatformSet,
    pub style: StyleSet,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub extra: PropertyContainer,
}

/// Ordered sequence of children with no further semantics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentGroup {
    pub children: Vec<ContentNode>,
    pub dci: Dci,
    pub platforms: PlatformSet,
    pub style: StyleSet,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub extra: PropertyContainer,
}

/// Leveled heading wrapping one group.
///
/// Identity, platforms, style and extra are those of the wrapped group.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentHeader {
    pub level: u8,
    pub group: ContentGroup,
}

/// Code fragment, rendered inline or as a block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentCode {
    pub children: Vec<ContentNode>,
    pub language: String,
    pub block: bool,
    pub dci: Dci,
    pub platforms: PlatformSet,
    pub style: StyleSet,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub extra: PropertyContainer,
}

/// Table with a header row and one group per row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentTable {
    pub header: Vec<ContentNode>,
    pub rows: Vec<ContentGroup>,
    pub dci: Dci,
    pub platforms: PlatformSet,
    pub style: StyleSet,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub extra: PropertyContainer,
}

/// Ordered or unordered list; each child is one item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentList {
    pub children: Vec<ContentNode>,
    pub ordered: bool,
    pub dci: Dci,
    pub platforms: PlatformSet,
    pub style: StyleSet,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub extra: PropertyContainer,
}

/// Link to another documented entity, resolved to a location later.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentDriLink {
    pub children: Vec<ContentNode>,
    pub address: Dri,
    pub dci: Dci,
    pub platforms: PlatformSet,
    pub style: StyleSet,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub extra: PropertyContainer,
}

/// Link to an already known external address.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentResolvedLink {
    pub children: Vec<ContentNode>,
    pub address: String,
    pub dci: Dci,
    pub platforms: PlatformSet,
    pub style: StyleSet,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub extra: PropertyContainer,
}

/// Marks a subtree whose rendering may differ per platform.
///
/// Identity, style and extra are those of the inner node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlatformHintedContent {
    pub inner: Box<ContentNode>,
    pub platforms: PlatformSet,
}

/// One logical entity rendered differently per platform.
///
/// The platform set is the union of the instances' sets.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentDivergentGroup {
    pub instances: Vec<ContentDivergentInstance>,
    pub dci: Dci,
    pub platforms: PlatformSet,
    pub style: StyleSet,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub extra: PropertyContainer,
}

/// Per-platform variant inside a [`ContentDivergentGroup`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentDivergentInstance {
    pub before: Option<ContentGroup>,
    pub divergent: ContentGroup,
    pub after: Option<ContentGroup>,
    pub dci: Dci,
    pub platforms: PlatformSet,
    pub style: StyleSet,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub extra: PropertyContainer,
}

/// Any node of the content tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum ContentNode {
    Text(ContentText),
    BreakLine(ContentBreakLine),
    Header(ContentHeader),
    Code(ContentCode),
    Group(ContentGroup),
    Table(ContentTable),
    List(ContentList),
    DriLink(ContentDriLink),
    ResolvedLink(ContentResolvedLink),
    PlatformHinted(PlatformHintedContent),
    DivergentGroup(ContentDivergentGroup),
    DivergentInstance(ContentDivergentInstance),
}

impl ContentNode {
    #[must_use]
    pub fn dci(&self) -> &Dci {
        match self {
            Self::Text(n) => &n.dci,
            Self::BreakLine(n) => &n.dci,
            Self::Header(n) => &n.group.dci,
            Self::Code(n) => &n.dci,
            Self::Group(n) => &n.dci,
            Self::Table(n) => &n.dci,
            Self::List(n) => &n.dci,
            Self::DriLink(n) => &n.dci,
            Self::ResolvedLink(n) => &n.dci,
            Self::PlatformHinted(n) => n.inner.dci(),
            Self::DivergentGroup(n) => &n.dci,
            Self::DivergentInstance(n) => &n.dci,
        }
    }

    #[must_use]
    pub fn platforms(&self) -> &PlatformSet {
        match self {
            Self::Text(n) => &n.platforms,
            Self::BreakLine(n) => &n.platforms,
            Self::Header(n) => &n.group.platforms,
            Self::Code(n) => &n.platforms,
            Self::Group(n) => &n.platforms,
            Self::Table(n) => &n.platforms,
            Self::List(n) => &n.platforms,
            Self::DriLink(n) => &n.platforms,
            Self::ResolvedLink(n) => &n.platforms,
            Self::PlatformHinted(n) => &n.platforms,
            Self::DivergentGroup(n) => &n.platforms,
            Self::DivergentInstance(n) => &n.platforms,
        }
    }

    #[must_use]
    pub fn style(&self) -> &StyleSet {
        match self {
            Self::Text(n) => &n.style,
            Self::BreakLine(n) => &n.style,
            Self::Header(n) => &n.group.style,
            Self::Code(n) => &n.style,
            Self::Group(n) => &n.style,
            Self::Table(n) => &n.style,
            Self::List(n) => &n.style,
            Self::DriLink(n) => &n.style,
            Self::ResolvedLink(n) => &n.style,
            Self::PlatformHinted(n) => n.inner.style(),
            Self::DivergentGroup(n) => &n.style,
            Self::DivergentInstance(n) => &n.style,
        }
    }

    #[must_use]
    pub fn extra(&self) -> &PropertyContainer {
        match self {
            Self::Text(n) => &n.extra,
            Self::BreakLine(n) => &n.extra,
            Self::Header(n) => &n.group.extra,
            Self::Code(n) => &n.extra,
            Self::Group(n) => &n.extra,
            Self::Table(n) => &n.extra,
            Self::List(n) => &n.extra,
            Self::DriLink(n) => &n.extra,
            Self::ResolvedLink(n) => &n.extra,
            Self::PlatformHinted(n) => n.inner.extra(),
            Self::DivergentGroup(n) => &n.extra,
            Self::DivergentInstance(n) => &n.extra,
        }
    }

    /// Whether rendering this node would produce anything visible.
    ///
    /// Blank text and line breaks alone do not count.
    #[must_use]
    pub fn has_any_content(&self) -> bool {
        match self {
            Self::Text(n) => !n.text.trim().is_empty(),
            Self::BreakLine(_) => false,
            Self::Header(n) => n.group.has_any_content(),
            Self::Code(n) => any_content(&n.children),
            Self::Group(n) => n.has_any_content(),
            Self::Table(n) => {
                any_content(&n.header) || n.rows.iter().any(ContentGroup::has_any_content)
            }
            Self::List(n) => any_content(&n.children),
            Self::DriLink(n) => any_content(&n.children),
            Self::ResolvedLink(n) => any_content(&n.children),
            Self::PlatformHinted(n) => n.inner.has_any_content(),
            Self::DivergentGroup(n) => n
                .instances
                .iter()
                .any(|i| i.divergent.has_any_content()),
            Self::DivergentInstance(n) => n.divergent.has_any_content(),
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&ContentGroup> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&ContentText> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_table(&self) -> Option<&ContentTable> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_header(&self) -> Option<&ContentHeader> {
        match self {
            Self::Header(header) => Some(header),
            _ => None,
        }
    }
}

impl ContentGroup {
    #[must_use]
    pub fn has_any_content(&self) -> bool {
        any_content(&self.children)
    }
}

fn any_content(nodes: &[ContentNode]) -> bool {
    nodes.iter().any(ContentNode::has_any_content)
}

macro_rules! impl_into_node {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ContentNode {
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )*
    };
}

impl_into_node! {
    ContentText => Text,
    ContentBreakLine => BreakLine,
    ContentHeader => Header,
    ContentCode => Code,
    ContentGroup => Group,
    ContentTable => Table,
    ContentList => List,
    ContentDriLink => DriLink,
    ContentResolvedLink => ResolvedLink,
    PlatformHintedContent => PlatformHinted,
    ContentDivergentGroup => DivergentGroup,
    ContentDivergentInstance => DivergentInstance,
}
