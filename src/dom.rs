//! # Document Tree
//!
//! Thin capability layer over `html5ever` + `markup5ever_rcdom`. The binder only
//! ever queries, rewrites content and attributes, clones, detaches and appends
//! nodes through the functions in this module.
//!
//! ## Invariants
//!
//! 1. **Infallible parse**: any string parses, malformed markup is recovered by
//!    the HTML5 tree builder.
//! 2. **Descendant selection**: every `select_*` function searches the element
//!    descendants of the scope in document order and never matches the scope
//!    node itself.
//! 3. **Detached clones**: `clone_node` returns a deep copy with no parent.

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, parse_fragment, Attribute, LocalName, Namespace, QualName};
use lazy_static::lazy_static;
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use regex::Regex;
use tendril::StrTendril;

use crate::error::Result;
use crate::options::ParseMode;

lazy_static! {
    /// Markup that only makes sense as a whole document.
    static ref DOCUMENT_MARKER_RE: Regex =
        Regex::new(r"(?i)<(?:!doctype|html|head|body)\b").unwrap();
}

const HTML_NS: &str = "http://www.w3.org/1999/xhtml";

fn html_name(local: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NS), LocalName::from(local))
}

/// Resolve `Auto` against the markup about to be parsed.
pub fn detect_mode(markup: &str, mode: ParseMode) -> ParseMode {
    match mode {
        ParseMode::Auto if DOCUMENT_MARKER_RE.is_match(markup) => ParseMode::Document,
        ParseMode::Auto => ParseMode::Fragment,
        explicit => explicit,
    }
}

/// A parsed, mutable document.
pub struct Document {
    // Owns the tree; `root` points into it.
    _dom: RcDom,
    root: Handle,
    mode: ParseMode,
}

impl Document {
    pub fn parse(markup: &str, mode: ParseMode) -> Self {
        match detect_mode(markup, mode) {
            ParseMode::Fragment => {
                let dom = parse_fragment(
                    RcDom::default(),
                    Default::default(),
                    html_name("template"),
                    vec![],
                )
                .one(markup);
                // A <template> context accepts table parts and list items at the top
                // level. The nodes hang off a synthetic <html> element.
                let root = first_element_child(&dom.document).unwrap_or_else(|| dom.document.clone());
                Self {
                    _dom: dom,
                    root,
                    mode: ParseMode::Fragment,
                }
            }
            _ => {
                let dom = parse_document(RcDom::default(), Default::default()).one(markup);
                let root = dom.document.clone();
                Self {
                    _dom: dom,
                    root,
                    mode: ParseMode::Document,
                }
            }
        }
    }

    /// Scope for top-level binding: the document node or the fragment root.
    pub fn root(&self) -> &Handle {
        &self.root
    }

    /// The resolved mode, never `Auto`.
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    pub fn serialize(&self) -> Result<String> {
        serialize_children(&self.root)
    }
}

fn serialize_children(handle: &Handle) -> Result<String> {
    let mut bytes = Vec::new();
    let serializable: SerializableHandle = handle.clone().into();
    serialize(
        &mut bytes,
        &serializable,
        SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        },
    )?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ═══════════════════════════════════════════════════════════════════════════════
// NODE INSPECTION
// ═══════════════════════════════════════════════════════════════════════════════

pub fn is_element(handle: &Handle) -> bool {
    matches!(handle.data, NodeData::Element { .. })
}

pub fn tag_name(handle: &Handle) -> Option<&str> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

fn is_blank_text(handle: &Handle) -> bool {
    match &handle.data {
        NodeData::Text { contents } => contents.borrow().trim().is_empty(),
        _ => false,
    }
}

pub fn get_attribute(handle: &Handle, name: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

pub fn set_attribute(handle: &Handle, name: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &handle.data {
        let mut attrs = attrs.borrow_mut();
        match attrs.iter_mut().find(|attr| &*attr.name.local == name) {
            Some(attr) => attr.value = StrTendril::from(value),
            None => attrs.push(Attribute {
                name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
                value: StrTendril::from(value),
            }),
        }
    }
}

pub fn remove_attribute(handle: &Handle, name: &str) {
    if let NodeData::Element { attrs, .. } = &handle.data {
        attrs.borrow_mut().retain(|attr| &*attr.name.local != name);
    }
}

pub fn has_class_token(handle: &Handle, token: &str) -> bool {
    get_attribute(handle, "class")
        .map(|class| class.split_ascii_whitespace().any(|t| t == token))
        .unwrap_or(false)
}

/// Remove one token from the class list, dropping the attribute once it is empty.
pub fn remove_class_token(handle: &Handle, token: &str) {
    let Some(class) = get_attribute(handle, "class") else {
        return;
    };
    let remaining: Vec<&str> = class
        .split_ascii_whitespace()
        .filter(|t| *t != token)
        .collect();
    if remaining.is_empty() {
        remove_attribute(handle, "class");
    } else {
        set_attribute(handle, "class", &remaining.join(" "));
    }
}

/// Short start-tag rendering for diagnostics, e.g. `<ul id="artists">`.
pub fn describe(handle: &Handle) -> String {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let mut out = format!("<{}", name.local);
            for attr in attrs.borrow().iter() {
                let key = &*attr.name.local;
                if key == "id" || key == "class" {
                    out.push_str(&format!(" {}=\"{}\"", key, attr.value));
                }
            }
            out.push('>');
            out
        }
        NodeData::Document => "#document".to_string(),
        NodeData::Text { .. } => "#text".to_string(),
        NodeData::Comment { .. } => "#comment".to_string(),
        NodeData::Doctype { .. } => "#doctype".to_string(),
        NodeData::ProcessingInstruction { .. } => "#processing-instruction".to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SELECTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Element descendants of `scope` in document order.
pub fn descendant_elements(scope: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    let mut stack: Vec<Handle> = scope.children.borrow().iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        stack.extend(node.children.borrow().iter().rev().cloned());
        if is_element(&node) {
            out.push(node);
        }
    }
    out
}

fn find_descendant(scope: &Handle, pred: &dyn Fn(&Handle) -> bool) -> Option<Handle> {
    let mut stack: Vec<Handle> = scope.children.borrow().iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        if is_element(&node) && pred(&node) {
            return Some(node);
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    None
}

pub fn select_first_by_tag(scope: &Handle, tag: &str) -> Option<Handle> {
    find_descendant(scope, &|node| tag_name(node) == Some(tag))
}

pub fn select_all_by_id(scope: &Handle, id: &str) -> Vec<Handle> {
    descendant_elements(scope)
        .into_iter()
        .filter(|node| get_attribute(node, "id").as_deref() == Some(id))
        .collect()
}

/// Elements whose whole `class` attribute is exactly `class`.
pub fn select_all_by_class(scope: &Handle, class: &str) -> Vec<Handle> {
    descendant_elements(scope)
        .into_iter()
        .filter(|node| get_attribute(node, "class").as_deref() == Some(class))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// TREE MUTATION
// ═══════════════════════════════════════════════════════════════════════════════

/// First child node of any type.
pub fn first_child(handle: &Handle) -> Option<Handle> {
    handle.children.borrow().first().cloned()
}

pub fn first_element_child(handle: &Handle) -> Option<Handle> {
    handle.children.borrow().iter().find(|c| is_element(c)).cloned()
}

/// First child that is neither a comment nor whitespace-only text.
pub fn first_significant_child(handle: &Handle) -> Option<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .find(|c| !is_blank_text(c) && !matches!(c.data, NodeData::Comment { .. }))
        .cloned()
}

/// Detach every whitespace-only text child.
pub fn remove_blank_text_children(handle: &Handle) {
    let mut children = handle.children.borrow_mut();
    children.retain(|child| {
        let blank = is_blank_text(child);
        if blank {
            child.parent.set(None);
        }
        !blank
    });
}

pub fn children(handle: &Handle) -> Vec<Handle> {
    handle.children.borrow().clone()
}

pub fn parent(handle: &Handle) -> Option<Handle> {
    let weak = handle.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    handle.parent.set(weak);
    parent
}

pub fn remove_node(handle: &Handle) {
    if let Some(parent) = parent(handle) {
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, handle));
    }
    handle.parent.set(None);
}

pub fn append_child(container: &Handle, node: Handle) {
    remove_node(&node);
    node.parent.set(Some(Rc::downgrade(container)));
    container.children.borrow_mut().push(node);
}

fn clone_data(data: &NodeData) -> NodeData {
    match data {
        NodeData::Document => NodeData::Document,
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => NodeData::Doctype {
            name: name.clone(),
            public_id: public_id.clone(),
            system_id: system_id.clone(),
        },
        NodeData::Text { contents } => NodeData::Text {
            contents: RefCell::new(contents.borrow().clone()),
        },
        NodeData::Comment { contents } => NodeData::Comment {
            contents: contents.clone(),
        },
        NodeData::Element {
            name,
            attrs,
            template_contents,
            mathml_annotation_xml_integration_point,
        } => NodeData::Element {
            name: name.clone(),
            attrs: RefCell::new(attrs.borrow().clone()),
            template_contents: RefCell::new(template_contents.borrow().as_ref().map(clone_node)),
            mathml_annotation_xml_integration_point: *mathml_annotation_xml_integration_point,
        },
        NodeData::ProcessingInstruction { target, contents } => NodeData::ProcessingInstruction {
            target: target.clone(),
            contents: contents.clone(),
        },
    }
}

/// Deep copy with no parent.
pub fn clone_node(handle: &Handle) -> Handle {
    let copy = Node::new(clone_data(&handle.data));
    // (source, copy of its parent)
    let mut stack: Vec<(Handle, Handle)> = handle
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (child.clone(), copy.clone()))
        .collect();
    while let Some((source, parent)) = stack.pop() {
        let node = Node::new(clone_data(&source.data));
        append_child(&parent, node.clone());
        stack.extend(
            source
                .children
                .borrow()
                .iter()
                .rev()
                .map(|child| (child.clone(), node.clone())),
        );
    }
    copy
}

/// Serialized children of `handle`.
pub fn inner_content(handle: &Handle) -> Result<String> {
    serialize_children(handle)
}

/// Replace the children of an element with `markup`, parsed in the element's context.
/// A text node takes `markup` as its literal contents.
pub fn set_inner_content(handle: &Handle, markup: &str) {
    let context = match &handle.data {
        NodeData::Element { name, .. } => name.clone(),
        NodeData::Text { contents } => {
            *contents.borrow_mut() = StrTendril::from(markup);
            return;
        }
        _ => html_name("body"),
    };

    for child in handle.children.take() {
        child.parent.set(None);
    }

    if markup.is_empty() {
        return;
    }

    let fragment = parse_fragment(RcDom::default(), Default::default(), context, vec![]).one(markup);
    let Some(fragment_root) = first_element_child(&fragment.document) else {
        return;
    };
    for child in fragment_root.children.take() {
        child.parent.set(Some(Rc::downgrade(handle)));
        handle.children.borrow_mut().push(child);
    }
}
