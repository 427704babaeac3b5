//! A small headless document: an element tree the page builder fills in
//! and the controller mutates, serialisable back to HTML.

use std::io::Cursor;
use std::sync::Arc;

use parking_lot::Mutex;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use series_contracts::{DetailOutcome, NavLink, PageDocument};
use tracing::{debug, warn};

pub const APP_ROOT_ID: &str = "app-root";
pub const DETAIL_SECTION_ID: &str = "movie-detail-section";
pub const NAV_CONTAINER_ID: &str = "nav-bar-container";
pub const HIDDEN_CLASS: &str = "hidden";

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

type HtmlWriter = Writer<Cursor<Vec<u8>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    fn write_html(&self, writer: &mut HtmlWriter) -> anyhow::Result<()> {
        match self {
            Node::Element(element) => element.write_html(writer),
            Node::Text(text) => {
                writer.write_event(Event::Text(BytesText::new(text)))?;
                Ok(())
            }
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Element(element) => {
                for child in &element.children {
                    child.write_text(out);
                }
            }
            Node::Text(text) => out.push_str(text),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, classes: &str) -> Self {
        self.attr("class", classes)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.get_attribute("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {class}", existing.trim())
            }
            _ => class.to_string(),
        };
        self.set_attribute("class", classes);
    }

    pub fn remove_class(&mut self, class: &str) {
        let Some(existing) = self.get_attribute("class") else {
            return;
        };
        let remaining = existing
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute("class", remaining);
    }

    /// Depth-first search for a descendant (or self) with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.get_attribute("id") == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(element) => element.find_by_id(id),
            Node::Text(_) => None,
        })
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.get_attribute("id") == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            Node::Element(element) => element.find_by_id_mut(id),
            Node::Text(_) => None,
        })
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_text(&mut out);
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        if let Err(err) = self.write_html(&mut writer) {
            warn!(tag = %self.tag, error = %err, "failed to serialise element");
        }
        String::from_utf8_lossy(writer.into_inner().get_ref()).into_owned()
    }

    fn write_html(&self, writer: &mut HtmlWriter) -> anyhow::Result<()> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }
        writer.write_event(Event::Start(start))?;

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return Ok(());
        }

        for child in &self.children {
            child.write_html(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.tag.as_str())))?;
        Ok(())
    }
}

#[derive(Debug)]
struct DocumentState {
    root: Element,
}

/// The hosting page: an `#app-root` element plus the mount points the
/// controller writes to.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    state: Arc<Mutex<DocumentState>>,
    default_theme: Option<String>,
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HtmlDocument {
    pub fn new(default_theme: Option<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(DocumentState {
                root: Element::new("div").id(APP_ROOT_ID),
            })),
            default_theme,
        }
    }

    /// Snapshot of the app root.
    pub fn root(&self) -> Element {
        self.state.lock().root.clone()
    }

    pub fn element(&self, id: &str) -> Option<Element> {
        self.state.lock().root.find_by_id(id).cloned()
    }

    /// The whole page as HTML.
    pub fn to_html(&self) -> String {
        let mut body = Element::new("body");
        if let Some(theme) = &self.default_theme {
            body.set_attribute("data-default-theme", theme.as_str());
        }
        body.push(self.root());

        let head = Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(Element::new("title").text("Series"));
        let page = Element::new("html").attr("lang", "es").child(head).child(body);

        format!("<!DOCTYPE html>\n{}\n", page.to_html())
    }
}

impl PageDocument for HtmlDocument {
    type Node = Node;
    type NavLink = HtmlNavLink;

    fn append_to_root(&self, node: Node) {
        self.state.lock().root.push(node);
    }

    fn mount_navigation(&self, nav_bar: Node) {
        let container = Element::new("div").id(NAV_CONTAINER_ID).child(nav_bar);
        self.state.lock().root.push(container);
    }

    fn nav_link(&self, id: &str) -> Option<HtmlNavLink> {
        let state = self.state.lock();
        state
            .root
            .find_by_id(NAV_CONTAINER_ID)
            .and_then(|container| container.find_by_id(id))
            .map(|_| HtmlNavLink {
                state: Arc::clone(&self.state),
                id: id.to_string(),
            })
    }

    fn render_detail(&self, outcome: DetailOutcome<Node>) {
        let mut state = self.state.lock();
        let Some(section) = state.root.find_by_id_mut(DETAIL_SECTION_ID) else {
            warn!(
                outcome = outcome.label(),
                "#{} missing; nothing to render into", DETAIL_SECTION_ID
            );
            return;
        };

        match outcome {
            DetailOutcome::Cleared => section.clear_children(),
            DetailOutcome::Rendered(view) => section.push(view),
            DetailOutcome::Error(message) => {
                section.clear_children();
                section.push(
                    Element::new("p")
                        .class("text-center text-red-500")
                        .text(message),
                );
            }
        }
    }
}

/// Live handle to a link inside the navigation container.
#[derive(Debug, Clone)]
pub struct HtmlNavLink {
    state: Arc<Mutex<DocumentState>>,
    id: String,
}

impl HtmlNavLink {
    fn with_link<R>(&self, apply: impl FnOnce(&mut Element) -> R) -> Option<R> {
        let mut state = self.state.lock();
        state
            .root
            .find_by_id_mut(NAV_CONTAINER_ID)
            .and_then(|container| container.find_by_id_mut(&self.id))
            .map(apply)
    }
}

impl NavLink for HtmlNavLink {
    fn set_hidden(&self, hidden: bool) {
        let applied = self.with_link(|link| {
            if hidden {
                link.add_class(HIDDEN_CLASS);
            } else {
                link.remove_class(HIDDEN_CLASS);
            }
        });
        if applied.is_none() {
            debug!(id = %self.id, "nav link removed from document");
        }
    }

    fn is_hidden(&self) -> bool {
        self.with_link(|link| link.has_class(HIDDEN_CLASS))
            .unwrap_or(true)
    }
}
