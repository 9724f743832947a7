use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::rc::Rc;
use thiserror::Error;

use super::utils::WHITESPACES;

/// Failure of an exactly-one-node lookup
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("element matching {0} not found")]
    NotFound(String),
    #[error("found more than one element matching {0}")]
    Ambiguous(String),
}

/// Parses (possibly malformed) HTML text into a DOM
pub fn html_to_dom(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// Element predicate on tag name, class token and id. Unset parts match anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Matcher<'a> {
    tag: Option<&'a str>,
    class: Option<&'a str>,
    id: Option<&'a str>,
}

impl<'a> Matcher<'a> {
    /// Matches any element
    pub const fn any() -> Self {
        Matcher {
            tag: None,
            class: None,
            id: None,
        }
    }

    pub const fn tag(tag: &'a str) -> Self {
        Matcher {
            tag: Some(tag),
            class: None,
            id: None,
        }
    }

    pub const fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    pub const fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    pub fn matches(&self, node: &Handle) -> bool {
        let Some(name) = get_node_name(node) else {
            return false;
        };

        self.tag.map_or(true, |tag| name == tag)
            && self.class.map_or(true, |class| node_has_class(node, class))
            && self
                .id
                .map_or(true, |id| get_node_attr(node, "id").as_deref() == Some(id))
    }
}

impl std::fmt::Display for Matcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag.unwrap_or("*"))?;
        if let Some(id) = self.id {
            write!(f, "#{id}")?;
        }
        if let Some(class) = self.class {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

/// One step of a path: which nodes to look at relative to the current one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step<'a> {
    Child(Matcher<'a>),
    Descendant(Matcher<'a>),
}

impl std::fmt::Display for Step<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Child(matcher) => write!(f, "/{matcher}"),
            Step::Descendant(matcher) => write!(f, "//{matcher}"),
        }
    }
}

fn describe(path: &[Step]) -> String {
    path.iter().map(|step| step.to_string()).collect()
}

/// Appends every descendant of `node` matching `matcher`, in document order
fn collect_descendants(node: &Handle, matcher: &Matcher, found_nodes: &mut Vec<Handle>) {
    for child_node in node.children.borrow().iter() {
        if matcher.matches(child_node) {
            found_nodes.push(child_node.clone());
        }
        collect_descendants(child_node, matcher, found_nodes);
    }
}

/// Evaluates `path` relative to `node` and returns the matching elements in document order
pub fn select(node: &Handle, path: &[Step]) -> Vec<Handle> {
    let mut current = vec![node.clone()];

    for step in path {
        let mut next: Vec<Handle> = Vec::new();

        for context in current.iter() {
            let mut found_nodes = Vec::new();
            match step {
                Step::Child(matcher) => {
                    for child_node in context.children.borrow().iter() {
                        if matcher.matches(child_node) {
                            found_nodes.push(child_node.clone());
                        }
                    }
                }
                Step::Descendant(matcher) => collect_descendants(context, matcher, &mut found_nodes),
            }

            // Nested contexts can reach the same node twice
            for found in found_nodes {
                if !next.iter().any(|seen| Rc::ptr_eq(seen, &found)) {
                    next.push(found);
                }
            }
        }

        current = next;
    }

    current
}

/// Returns the single element matching `path`; zero or several matches are an error
pub fn get_single(node: &Handle, path: &[Step]) -> Result<Handle, QueryError> {
    let mut found_nodes = select(node, path).into_iter();

    match (found_nodes.next(), found_nodes.next()) {
        (Some(found), None) => Ok(found),
        (None, _) => Err(QueryError::NotFound(describe(path))),
        (Some(_), Some(_)) => Err(QueryError::Ambiguous(describe(path))),
    }
}

/// Returns the single element anywhere below `node` carrying the given id
pub fn get_by_id(node: &Handle, id: &str) -> Result<Handle, QueryError> {
    get_single(node, &[Step::Descendant(Matcher::any().id(id))])
}

/// Text content of the first element matching `path`, or an empty string
pub fn extract_value(node: &Handle, path: &[Step]) -> String {
    select(node, path)
        .first()
        .map(get_node_text)
        .unwrap_or_default()
}

/// Attribute of the first element matching `path`, or an empty string
pub fn extract_attr(node: &Handle, path: &[Step], attr_name: &str) -> String {
    select(node, path)
        .first()
        .and_then(|found| get_node_attr(found, attr_name))
        .unwrap_or_default()
}

/// Text contents of every element matching `path`
pub fn extract_values(node: &Handle, path: &[Step]) -> Vec<String> {
    select(node, path).iter().map(get_node_text).collect()
}

/// Concatenates the text of the child nodes of every element matching `path`,
/// stopping at (and excluding) the first child for which `stop` holds
pub fn extract_content_until<F>(node: &Handle, path: &[Step], stop: F) -> String
where
    F: Fn(&Handle) -> bool,
{
    let mut buffer = String::new();

    for parent in select(node, path) {
        for child_node in parent.children.borrow().iter() {
            if stop(child_node) {
                return buffer;
            }
            buffer.push_str(&get_node_text(child_node));
        }
    }

    buffer
}

/// Tests whether the element's class attribute contains `class` as a whole token
pub fn node_has_class(node: &Handle, class: &str) -> bool {
    get_node_attr(node, "class")
        .map(|classes| classes.split(WHITESPACES).any(|token| token == class))
        .unwrap_or(false)
}

/// Concatenated text of the node and all of its descendants
pub fn get_node_text(node: &Handle) -> String {
    let mut text = String::new();
    push_node_text(node, &mut text);
    text
}

fn push_node_text(node: &Handle, text: &mut String) {
    match &node.data {
        NodeData::Text { contents } => text.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            for child_node in node.children.borrow().iter() {
                push_node_text(child_node, text);
            }
        }
        _ => {}
    }
}

/// Collapses every run of whitespace into a single space and trims the ends
pub fn merge_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Returns the value of an attribute of an element node
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// Returns the local tag name of an element node
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}
