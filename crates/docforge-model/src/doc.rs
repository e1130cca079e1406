//! Parsed documentation comments.

use crate::dri::Dri;

/// One node of a parsed documentation comment.
///
/// Produced by the source parsers and turned into content by a comment
/// converter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocTag {
    Text(String),
    Paragraph(Vec<DocTag>),
    Bold(Vec<DocTag>),
    Italic(Vec<DocTag>),
    Strikethrough(Vec<DocTag>),
    CodeInline(Vec<DocTag>),
    CodeBlock {
        language: String,
        children: Vec<DocTag>,
    },
    /// Link to an external address.
    Link {
        href: String,
        children: Vec<DocTag>,
    },
    /// Link to another documented entity.
    DocumentationLink {
        dri: Dri,
        children: Vec<DocTag>,
    },
    UnorderedList(Vec<DocTag>),
    OrderedList(Vec<DocTag>),
    ListItem(Vec<DocTag>),
    Br,
    /// Tag unknown to the core model (e.g. from a custom markup extension).
    Custom {
        name: String,
        children: Vec<DocTag>,
    },
}

impl DocTag {
    /// Convenience constructor for a text leaf.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Child tags, empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[DocTag] {
        match self {
            Self::Text(_) | Self::Br => &[],
            Self::Paragraph(children)
            | Self::Bold(children)
            | Self::Italic(children)
            | Self::Strikethrough(children)
            | Self::CodeInline(children)
            | Self::UnorderedList(children)
            | Self::OrderedList(children)
            | Self::ListItem(children)
            | Self::CodeBlock { children, .. }
            | Self::Link { children, .. }
            | Self::DocumentationLink { children, .. }
            | Self::Custom { children, .. } => children,
        }
    }

    /// Concatenated text of all leaves, with line breaks as `\n`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain_text(&mut out);
        out
    }

    fn write_plain_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Br => out.push('\n'),
            _ => {
                for child in self.children() {
                    child.write_plain_text(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_flattens_markup() {
        let tag = DocTag::Paragraph(vec![
            DocTag::text("Use "),
            DocTag::CodeInline(vec![DocTag::text("run")]),
            DocTag::Br,
            DocTag::Bold(vec![DocTag::text("now")]),
        ]);
        assert_eq!(tag.plain_text(), "Use run\nnow");
    }

    #[test]
    fn test_children_of_leaf_is_empty() {
        assert!(DocTag::text("x").children().is_empty());
        assert!(DocTag::Br.children().is_empty());
    }

    #[test]
    fn test_children_of_link() {
        let tag = DocTag::DocumentationLink {
            dri: Dri::package("p"),
            children: vec![DocTag::text("p")],
        };
        assert_eq!(tag.children(), &[DocTag::text("p")]);
    }
}
