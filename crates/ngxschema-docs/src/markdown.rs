//! # Description Rendering
//!
//! Directive descriptions are written in the documentation's own markup
//! (`para`, `literal`, `list`, `example`, ...). They are first classified into
//! the closed [`DescNode`] union, then laid out as a `comrak` AST and
//! formatted as CommonMark for the `markdownDescription` annotation that
//! editors show on hover.
//!
//! ## Mapping
//!
//! | Markup                                   | Markdown                      |
//! |------------------------------------------|-------------------------------|
//! | `emphasis`                               | strong                        |
//! | `literal`, `command`, `path`, `var`, ... | inline code                   |
//! | `value`                                  | emphasised inline code        |
//! | `link url=...`                           | link                          |
//! | `link id=...`                            | emphasis + `(code)` reference |
//! | `example`                                | fenced `nginx` code block     |
//! | `list type=bullet/enum/tag`              | bullet / ordered list         |
//! | `note`, comments                         | nothing                       |
//! | anything else                            | its text                      |

use std::cell::RefCell;

use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeLink, NodeList, NodeValue,
};
use comrak::{format_commonmark, Arena, ComrakOptions};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DocsError;
use crate::xml::{XmlElement, XmlNode};

static NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("valid regex"));

/// One node of a directive description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescNode {
    /// Comments and notes.
    Ignored,
    Text(String),
    Strong(String),
    Link { url: String, text: String },
    /// Cross-reference to another directive; `text` may be empty.
    Reference { id: String, text: String },
    Code(String),
    Value(String),
    /// Children are laid out as one or more paragraphs.
    Para(Vec<DescNode>),
    Example(String),
    BulletList(Vec<Vec<DescNode>>),
    OrderedList(Vec<Vec<DescNode>>),
    TagList(Vec<TagItem>),
    /// A list of a type that has no rendering; skipped with a warning.
    UnsupportedList(String),
}

/// One `tag-name`/`tag-desc` pair of a tag list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagItem {
    pub name: Vec<DescNode>,
    pub description: Vec<DescNode>,
}

impl DescNode {
    /// Classify a markup node.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::MissingTagDescription`] for a tag list whose
    /// `tag-name` is not followed by a `tag-desc`.
    pub fn from_xml(node: &XmlNode) -> Result<Self, DocsError> {
        match node {
            XmlNode::Comment => Ok(Self::Ignored),
            XmlNode::Text(text) => Ok(Self::Text(collapse_newlines(text))),
            XmlNode::Element(el) => Self::from_element(el),
        }
    }

    /// Classify a markup element.
    pub fn from_element(el: &XmlElement) -> Result<Self, DocsError> {
        let content = || collapse_newlines(&el.text_content());

        Ok(match el.name.as_str() {
            "emphasis" => Self::Strong(content()),
            "link" => match (el.attr("url"), el.attr("id")) {
                (Some(url), _) if !content().is_empty() => Self::Link {
                    url: url.to_string(),
                    text: content(),
                },
                (_, Some(id)) => Self::Reference {
                    id: id.to_string(),
                    text: content(),
                },
                _ => Self::Text(content()),
            },
            "c-def" | "c-func" | "command" | "header" | "literal" | "path" | "var" => {
                Self::Code(content())
            }
            "value" => Self::Value(content()),
            "para" | "listitem" => Self::Para(children(el)?),
            "http-status" => Self::Text(format!(
                "{} ({})",
                el.attr("code").unwrap_or_default(),
                el.attr("text").unwrap_or_default()
            )),
            "example" => Self::Example(el.text_content().trim().to_string()),
            "note" => Self::Ignored,
            "list" => match el.attr("type") {
                Some("bullet") => Self::BulletList(list_items(el)?),
                Some("enum") => Self::OrderedList(list_items(el)?),
                Some("tag") => Self::TagList(tag_items(el)?),
                other => Self::UnsupportedList(other.unwrap_or_default().to_string()),
            },
            _ => Self::Text(content()),
        })
    }

    fn trim(&mut self, start: bool) {
        let text = match self {
            Self::Text(t) | Self::Strong(t) | Self::Code(t) | Self::Value(t) => t,
            Self::Link { text, .. } | Self::Reference { text, .. } => text,
            _ => return,
        };
        let trimmed = if start { text.trim_start() } else { text.trim_end() };
        if trimmed.len() != text.len() {
            *text = trimmed.to_string();
        }
    }
}

/// Render the `para` elements of a directive as Markdown.
pub fn render_description(paras: &[&XmlElement]) -> Result<String, DocsError> {
    let nodes = paras
        .iter()
        .map(|para| DescNode::from_element(para))
        .collect::<Result<Vec<_>, _>>()?;
    render_markdown(&nodes)
}

/// Format description nodes as trimmed CommonMark.
pub fn render_markdown(nodes: &[DescNode]) -> Result<String, DocsError> {
    let arena = Arena::new();
    let root = new_node(&arena, NodeValue::Document);
    append_blocks(&arena, root, nodes);

    let mut output = Vec::new();
    format_commonmark(root, &ComrakOptions::default(), &mut output)
        .map_err(|e| DocsError::Render(e.to_string()))?;
    let markdown = String::from_utf8(output).map_err(|e| DocsError::Render(e.to_string()))?;

    // Consecutive lists are separated by an HTML comment.
    Ok(markdown.replace("<!-- end list -->\n\n", "").trim().to_string())
}

fn collapse_newlines(text: &str) -> String {
    NEWLINES.replace_all(text, " ").into_owned()
}

/// Classified children of a container, outer whitespace trimmed.
fn children(el: &XmlElement) -> Result<Vec<DescNode>, DocsError> {
    let mut nodes = el
        .children
        .iter()
        .map(DescNode::from_xml)
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(first) = nodes.first_mut() {
        first.trim(true);
    }
    if let Some(last) = nodes.last_mut() {
        last.trim(false);
    }
    Ok(nodes)
}

fn list_items(list: &XmlElement) -> Result<Vec<Vec<DescNode>>, DocsError> {
    list.children_named("listitem").map(children).collect()
}

fn tag_items(list: &XmlElement) -> Result<Vec<TagItem>, DocsError> {
    let elements: Vec<&XmlElement> = list.child_elements().collect();
    let mut items = Vec::new();

    for (i, el) in elements.iter().enumerate() {
        if el.name != "tag-name" {
            continue;
        }
        // Several names may share one description.
        let desc = elements[i + 1..]
            .iter()
            .find(|sibling| sibling.name == "tag-desc")
            .ok_or_else(|| DocsError::MissingTagDescription(el.text_content()))?;
        items.push(TagItem {
            name: children(el)?,
            description: children(desc)?,
        });
    }
    Ok(items)
}

// ---------------------------------------------------------------------------
// comrak AST construction
// ---------------------------------------------------------------------------

fn new_node<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

fn list_meta(list_type: ListType, tight: bool) -> NodeList {
    NodeList {
        list_type,
        marker_offset: 0,
        padding: 0,
        start: 1,
        delimiter: ListDelimType::Period,
        bullet_char: b'-',
        tight,
    }
}

/// Append `nodes` to a block container, wrapping runs of inline nodes into
/// paragraphs.
fn append_blocks<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, nodes: &[DescNode]) {
    let mut paragraph: Option<&'a AstNode<'a>> = None;

    for node in nodes {
        match node {
            DescNode::Ignored => {}
            DescNode::UnsupportedList(kind) => {
                tracing::warn!(list_type = %kind, "unsupported list type, skipping");
            }
            DescNode::Text(text) if text.is_empty() => {}
            DescNode::Para(children) => {
                paragraph = None;
                append_blocks(arena, parent, children);
            }
            DescNode::Example(code) => {
                paragraph = None;
                parent.append(new_node(
                    arena,
                    NodeValue::CodeBlock(NodeCodeBlock {
                        fenced: true,
                        fence_char: b'`',
                        fence_length: 3,
                        fence_offset: 0,
                        info: "nginx".to_string(),
                        literal: format!("{code}\n"),
                    }),
                ));
            }
            DescNode::BulletList(items) | DescNode::OrderedList(items) => {
                paragraph = None;
                let list_type = if matches!(node, DescNode::OrderedList(_)) {
                    ListType::Ordered
                } else {
                    ListType::Bullet
                };
                let list = new_node(arena, NodeValue::List(list_meta(list_type, true)));
                parent.append(list);
                for item in items {
                    let item_node = new_node(arena, NodeValue::Item(list_meta(list_type, true)));
                    list.append(item_node);
                    append_blocks(arena, item_node, item);
                }
            }
            DescNode::TagList(items) => {
                paragraph = None;
                let list = new_node(arena, NodeValue::List(list_meta(ListType::Bullet, false)));
                parent.append(list);
                for item in items {
                    let item_node =
                        new_node(arena, NodeValue::Item(list_meta(ListType::Bullet, false)));
                    list.append(item_node);

                    let name = new_node(arena, NodeValue::Paragraph);
                    let strong = new_node(arena, NodeValue::Strong);
                    item_node.append(name);
                    name.append(strong);
                    for part in &item.name {
                        append_inline(arena, strong, part);
                    }
                    append_blocks(arena, item_node, &item.description);
                }
            }
            inline => {
                let para = *paragraph.get_or_insert_with(|| {
                    let p = new_node(arena, NodeValue::Paragraph);
                    parent.append(p);
                    p
                });
                append_inline(arena, para, inline);
            }
        }
    }
}

fn append_inline<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, node: &DescNode) {
    let text = |t: &str| new_node(arena, NodeValue::Text(t.to_string()));
    let code = |t: &str| {
        new_node(
            arena,
            NodeValue::Code(NodeCode {
                num_backticks: 1,
                literal: t.to_string(),
            }),
        )
    };
    let wrap = |value: NodeValue, child: &'a AstNode<'a>| {
        let outer = new_node(arena, value);
        outer.append(child);
        outer
    };

    match node {
        DescNode::Text(t) if !t.is_empty() => parent.append(text(t)),
        DescNode::Strong(t) => parent.append(wrap(NodeValue::Strong, text(t))),
        DescNode::Link { url, text: label } => parent.append(wrap(
            NodeValue::Link(NodeLink {
                url: url.clone(),
                title: String::new(),
            }),
            text(label),
        )),
        DescNode::Reference { id, text: label } if label.is_empty() => parent.append(code(id)),
        DescNode::Reference { id, text: label } => {
            parent.append(wrap(NodeValue::Emph, text(label)));
            parent.append(text(" ("));
            parent.append(code(id));
            parent.append(text(")"));
        }
        DescNode::Code(t) => parent.append(code(t)),
        DescNode::Value(t) => parent.append(wrap(NodeValue::Emph, code(t))),
        // Block nodes are laid out by `append_blocks`.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    fn render(xml: &str) -> String {
        let para = parse_document(xml).unwrap();
        render_description(&[&para]).unwrap()
    }

    #[test]
    fn plain_text_is_joined_and_trimmed() {
        assert_eq!(
            render("<para>\nEnables or disables\ngzipping of responses.\n</para>"),
            "Enables or disables gzipping of responses."
        );
    }

    #[test]
    fn inline_code_and_values() {
        let md = render("<para>Sets <value>size</value> for <literal>proxy_pass</literal>.</para>");
        assert!(md.contains("`size`"), "{md}");
        assert!(md.contains("`proxy_pass`"), "{md}");
        assert!(md.starts_with("Sets "), "{md}");
    }

    #[test]
    fn emphasis_becomes_strong() {
        assert_eq!(render("<para><emphasis>Note</emphasis> this.</para>"), "**Note** this.");
    }

    #[test]
    fn links_by_url_and_id() {
        let md = render(
            "<para>See <link url=\"https://example.com/\">manual</link> and <link id=\"gzip\"/>.</para>",
        );
        assert!(md.contains("[manual](https://example.com/)"), "{md}");
        assert!(md.contains("`gzip`"), "{md}");

        let md = render("<para><link id=\"gzip\">the directive</link></para>");
        assert!(md.contains("the directive"), "{md}");
        assert!(md.contains("(`gzip`)"), "{md}");
    }

    #[test]
    fn http_status_is_code_and_text() {
        assert_eq!(
            render("<para>returns <http-status code=\"404\" text=\"Not Found\"/></para>"),
            "returns 404 (Not Found)"
        );
    }

    #[test]
    fn example_is_fenced_nginx_block() {
        let md = render("<para>\nExample:\n<example>\nlocation / {\n    gzip on;\n}\n</example>\n</para>");
        assert!(md.starts_with("Example:"), "{md}");
        assert!(md.contains("```nginx\nlocation / {\n    gzip on;\n}\n```"), "{md}");
    }

    #[test]
    fn notes_and_comments_are_dropped() {
        assert_eq!(
            render("<para>Kept.<!-- hidden --><note>Dropped.</note></para>"),
            "Kept."
        );
    }

    #[test]
    fn bullet_and_enum_lists() {
        let md = render(
            "<para><list type=\"bullet\"><listitem>one</listitem><listitem><emphasis>two</emphasis></listitem></list></para>",
        );
        assert!(md.contains("- one"), "{md}");
        assert!(md.contains("- **two**"), "{md}");

        let md = render("<para><list type=\"enum\"><listitem>first</listitem><listitem>second</listitem></list></para>");
        assert!(md.starts_with("1."), "{md}");
        assert!(md.contains("2."), "{md}");
        assert!(md.contains("second"), "{md}");
    }

    #[test]
    fn tag_list_pairs_names_with_descriptions() {
        let md = render(concat!(
            "<para><list type=\"tag\">\n",
            "<tag-name><literal>on</literal></tag-name>\n<tag-desc>enables;</tag-desc>\n",
            "<tag-name><literal>off</literal></tag-name>\n<tag-name><literal>none</literal></tag-name>\n",
            "<tag-desc>disables.</tag-desc>\n",
            "</list></para>"
        ));
        assert!(md.contains("**`on`**"), "{md}");
        assert!(md.contains("enables;"), "{md}");
        assert!(md.contains("**`none`**"), "{md}");
        assert_eq!(md.matches("disables.").count(), 2, "{md}");
    }

    #[test]
    fn tag_name_without_description_is_fatal() {
        let para = parse_document(
            "<para><list type=\"tag\"><tag-name>lonely</tag-name></list></para>",
        )
        .unwrap();
        assert_eq!(
            render_description(&[&para]),
            Err(DocsError::MissingTagDescription("lonely".into()))
        );
    }

    #[test]
    fn unsupported_list_is_skipped() {
        assert_eq!(
            render("<para>Before.<list type=\"table\"><listitem>x</listitem></list></para>"),
            "Before."
        );
    }

    #[test]
    fn multiple_paras_become_paragraphs() {
        let a = parse_document("<para>First.</para>").unwrap();
        let b = parse_document("<para>Second.</para>").unwrap();
        assert_eq!(render_description(&[&a, &b]).unwrap(), "First.\n\nSecond.");
    }

    #[test]
    fn unknown_element_renders_its_text() {
        assert_eq!(
            DescNode::from_element(&parse_document("<frobnicate>a\n\nb</frobnicate>").unwrap()).unwrap(),
            DescNode::Text("a b".into())
        );
    }

    #[test]
    fn empty_description_renders_empty() {
        assert_eq!(render_description(&[]).unwrap(), "");
    }
}
