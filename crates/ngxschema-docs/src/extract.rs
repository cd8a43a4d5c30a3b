//! # Directive Extraction
//!
//! Reads one module documentation file and produces a [`Directive`] per
//! documented directive.
//!
//! ```text
//! <module link="/en/docs/http/ngx_http_gzip_module.html">
//!   <section id="directives">
//!     <directive name="gzip">
//!       <syntax><literal>on</literal> | <literal>off</literal></syntax>
//!       <default>off</default>
//!       <context>http</context>
//!       <para>...</para>
//!     </directive>
//!   </section>
//! </module>
//! ```

use std::collections::BTreeSet;

use ngxschema_core::{normalize_context, tokenize_syntax, DefaultValue, Directive, SyntaxNode, ANY_CONTEXT};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DocsError;
use crate::markdown::render_description;
use crate::xml::{parse_document, XmlElement, XmlNode};

static MODULE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/ngx_([^/.]+)_module\.").expect("valid regex"));

const DOCS_ORIGIN: &str = "https://nginx.org";

/// True when `root` is a module documentation page.
pub fn is_module_document(root: &XmlElement) -> bool {
    root.name == "module"
}

/// Parse `xml` and extract its directives.
///
/// Returns `None` when the document is not a module page (e.g. an index or
/// an article), which callers skip.
pub fn directives_from_xml(xml: &str) -> Result<Option<Vec<Directive>>, DocsError> {
    let root = parse_document(xml)?;
    if !is_module_document(&root) {
        tracing::warn!(root = %root.name, "not a module document, skipping");
        return Ok(None);
    }
    extract_directives(&root).map(Some)
}

/// Extract all directives documented under a `module` root element.
///
/// # Errors
///
/// Any structural problem is fatal: missing `module`, `link`, `name` or
/// `syntax`, an unrecognised module link, an unsupported element inside a
/// syntax description, or an incomplete tag list in a description.
pub fn extract_directives(root: &XmlElement) -> Result<Vec<Directive>, DocsError> {
    if !is_module_document(root) {
        return Err(DocsError::MissingElement("module"));
    }
    let link = root
        .attr("link")
        .filter(|link| !link.is_empty())
        .ok_or_else(|| DocsError::MissingAttribute {
            element: "module".to_string(),
            attribute: "link",
        })?;
    let module = module_name_from_link(link)?;
    let doc_url = format!("{DOCS_ORIGIN}{link}");

    let directives = root
        .children_named("section")
        .filter(|section| section.attr("id") == Some("directives"))
        .flat_map(|section| section.children_named("directive"))
        .map(|el| extract_directive(el, &module, &doc_url))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(module = %module, directives = directives.len(), "processed module document");
    Ok(directives)
}

fn extract_directive(el: &XmlElement, module: &str, module_url: &str) -> Result<Directive, DocsError> {
    let name = el
        .attr("name")
        .filter(|name| !name.is_empty())
        .ok_or_else(|| DocsError::MissingAttribute {
            element: "directive".to_string(),
            attribute: "name",
        })?;

    let syntax_elements = el.descendants_named("syntax");
    if syntax_elements.is_empty() {
        return Err(DocsError::MissingElement("syntax"));
    }
    let syntax = syntax_elements
        .iter()
        .map(|syntax| syntax_nodes(syntax).map(|nodes| tokenize_syntax(&nodes)))
        .collect::<Result<Vec<_>, _>>()?;
    let block = syntax_elements
        .iter()
        .any(|syntax| syntax.attr("block").is_some_and(|b| !b.is_empty()));

    let default = if block {
        None
    } else {
        el.descendants_named("default")
            .first()
            .map(|d| DefaultValue::from_doc_text(&d.text_content()))
    };

    let mut context: BTreeSet<String> = el
        .descendants_named("context")
        .iter()
        .map(|c| normalize_context(&c.text_content()))
        .collect();
    if context.is_empty() {
        context.insert(ANY_CONTEXT.to_string());
    }

    let paras: Vec<&XmlElement> = el.children_named("para").collect();
    let description = render_description(&paras)?;

    let since = el
        .descendants_named("appeared-in")
        .first()
        .map(|a| a.text_content());

    Ok(Directive {
        module: module.to_string(),
        name: name.to_string(),
        syntax,
        block,
        default,
        context,
        description,
        since,
        doc_url: format!("{module_url}#{name}"),
    })
}

/// Syntax description children; comments carry no syntax.
fn syntax_nodes(syntax: &XmlElement) -> Result<Vec<SyntaxNode>, DocsError> {
    let mut nodes = Vec::with_capacity(syntax.children.len());
    for child in &syntax.children {
        match child {
            XmlNode::Element(el) => nodes.push(SyntaxNode::from_element(&el.name, el.text_content())?),
            XmlNode::Text(text) => nodes.push(SyntaxNode::Text(text.clone())),
            XmlNode::Comment => {}
        }
    }
    Ok(nodes)
}

fn module_name_from_link(link: &str) -> Result<String, DocsError> {
    MODULE_LINK
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| DocsError::UnexpectedModuleLink(link.to_string()))
}
