//! A minimal element tree on top of `quick_xml` events.
//!
//! Everything that is not touched is written back byte for byte (attributes,
//! escaped text, comments, processing instructions, ...), so the parts of a
//! document that are not edited stay exactly as they were.

use std::io::Write;

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::document::DocumentError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Element(Element),
    Text(BytesText<'static>),
    Other(Event<'static>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    start: BytesStart<'static>,
    children: Vec<Node>,
    self_closing: bool,
}

impl Element {
    /// Creates an element with the same namespace prefix as `self`.
    #[must_use]
    fn sibling_of(&self, local_name: &str) -> Self {
        Self {
            start: BytesStart::new(format!("{}{}", self.prefix(), local_name)),
            children: Vec::new(),
            self_closing: true,
        }
    }

    /// The namespace prefix including the colon (like `w:`) or an empty string.
    #[must_use]
    fn prefix(&self) -> String {
        let name = self.start.name();
        match name.prefix() {
            Some(prefix) => format!("{}:", String::from_utf8_lossy(prefix.as_ref())),
            None => String::new(),
        }
    }

    #[must_use]
    pub(crate) fn is(&self, local_name: &[u8]) -> bool {
        self.start.local_name().as_ref() == local_name
    }

    /// Returns the value of the attribute with the `local_name`, ignoring its namespace.
    #[must_use]
    pub(crate) fn attribute(&self, local_name: &[u8]) -> Option<String> {
        self.start
            .attributes()
            .flatten()
            .find(|attribute| attribute.key.local_name().as_ref() == local_name)
            .map(|attribute| String::from_utf8_lossy(&attribute.value).into_owned())
    }

    pub(crate) fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub(crate) fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn child_elements<'a, 'b>(
        &'a self,
        local_name: &'b [u8],
    ) -> impl Iterator<Item = &'a Element> + 'b
    where
        'a: 'b,
    {
        self.children.iter().filter_map(move |node| match node {
            Node::Element(element) if element.is(local_name) => Some(element),
            _ => None,
        })
    }

    pub(crate) fn child_elements_mut<'a, 'b>(
        &'a mut self,
        local_name: &'b [u8],
    ) -> impl Iterator<Item = &'a mut Element> + 'b
    where
        'a: 'b,
    {
        self.children.iter_mut().filter_map(move |node| match node {
            Node::Element(element) if element.is(local_name) => Some(element),
            _ => None,
        })
    }

    #[must_use]
    pub(crate) fn count_children(&self, local_name: &[u8]) -> usize {
        self.child_elements(local_name).count()
    }

    #[must_use]
    pub(crate) fn nth_child(&self, local_name: &[u8], index: usize) -> Option<&Element> {
        self.child_elements(local_name).nth(index)
    }

    #[must_use]
    pub(crate) fn nth_child_mut(&mut self, local_name: &[u8], index: usize) -> Option<&mut Element> {
        self.child_elements_mut(local_name).nth(index)
    }

    #[must_use]
    pub(crate) fn first_child(&self, local_name: &[u8]) -> Option<&Element> {
        self.nth_child(local_name, 0)
    }

    /// Returns the index in `children` of every table cell in this row.
    ///
    /// A cell spanning multiple grid columns (`w:gridSpan`) is repeated once
    /// for every column, so the indices line up with the columns of the table.
    #[must_use]
    pub(crate) fn cell_positions(&self) -> Vec<usize> {
        let mut positions = Vec::new();

        for (position, node) in self.children.iter().enumerate() {
            let Node::Element(cell) = node else {
                continue;
            };

            if !cell.is(b"tc") {
                continue;
            }

            let span = cell
                .first_child(b"tcPr")
                .and_then(|properties| properties.first_child(b"gridSpan"))
                .and_then(|span| span.attribute(b"val"))
                .and_then(|value| value.parse::<usize>().ok())
                .unwrap_or(1)
                .max(1);

            positions.extend(std::iter::repeat(position).take(span));
        }

        positions
    }

    #[must_use]
    pub(crate) fn child_at_mut(&mut self, position: usize) -> Option<&mut Element> {
        match self.children.get_mut(position) {
            Some(Node::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// The text of a paragraph, tabs and line breaks are converted to `\t` and `\n`.
    #[must_use]
    pub(crate) fn paragraph_text(&self) -> String {
        let mut result = String::new();

        for run in self.runs() {
            for child in run.child_elements_any() {
                if child.is(b"t") {
                    for node in child.children() {
                        match node {
                            Node::Text(text) => match text.unescape() {
                                Ok(text) => result.push_str(&text),
                                Err(_) => result.push_str(&String::from_utf8_lossy(text)),
                            },
                            Node::Other(Event::CData(data)) => {
                                result.push_str(&String::from_utf8_lossy(data))
                            }
                            _ => {}
                        }
                    }
                } else if child.is(b"tab") {
                    result.push('\t');
                } else if child.is(b"br") || child.is(b"cr") {
                    result.push('\n');
                }
            }
        }

        result
    }

    /// The text of a table cell, its paragraphs are separated by `\n`.
    #[must_use]
    pub(crate) fn cell_text(&self) -> String {
        self.child_elements(b"p")
            .map(Element::paragraph_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The runs of a paragraph, including the ones in hyperlinks.
    fn runs(&self) -> Vec<&Element> {
        let mut runs = Vec::new();

        for child in self.child_elements_any() {
            if child.is(b"r") {
                runs.push(child);
            } else if child.is(b"hyperlink") {
                runs.extend(child.child_elements(b"r"));
            }
        }

        runs
    }

    fn child_elements_any(&self) -> impl Iterator<Item = &Element> + '_ {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Replaces the content of a paragraph with a single run containing `text`.
    ///
    /// The paragraph properties and the formatting of the first run are kept.
    pub(crate) fn set_paragraph_text(&mut self, text: &str) {
        let properties = self.first_child(b"pPr").cloned();
        let run_properties = self
            .runs()
            .first()
            .and_then(|run| run.first_child(b"rPr"))
            .cloned();

        let mut run = self.sibling_of("r");
        if let Some(run_properties) = run_properties {
            run.push(run_properties);
        }

        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                run.push(self.sibling_of("br"));
            }

            for (index, part) in line.split('\t').enumerate() {
                if index > 0 {
                    run.push(self.sibling_of("tab"));
                }

                if !part.is_empty() {
                    let mut content = self.sibling_of("t");
                    content.start.push_attribute(("xml:space", "preserve"));
                    content.push(Node::Text(BytesText::new(part).into_owned()));
                    run.push(content);
                }
            }
        }

        self.children.clear();
        if let Some(properties) = properties {
            self.push(properties);
        }
        self.push(run);
    }

    /// Replaces the content of a table cell with a single paragraph containing `text`.
    ///
    /// The cell properties and the formatting of the first paragraph are kept.
    pub(crate) fn set_cell_text(&mut self, text: &str) {
        let properties = self.first_child(b"tcPr").cloned();
        let mut paragraph = self
            .first_child(b"p")
            .cloned()
            .unwrap_or_else(|| self.sibling_of("p"));

        paragraph.set_paragraph_text(text);

        self.children.clear();
        if let Some(properties) = properties {
            self.push(properties);
        }
        self.push(paragraph);
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// Parses the xml into the nodes at the top level, which are the declaration
/// and the root element.
pub(crate) fn parse(xml: &str) -> Result<Vec<Node>, DocumentError> {
    let mut reader = Reader::from_str(xml);

    let mut open: Vec<Element> = Vec::new();
    let mut top_level = Vec::new();

    loop {
        let node = match reader.read_event()? {
            Event::Start(start) => {
                open.push(Element {
                    start: start.into_owned(),
                    children: Vec::new(),
                    self_closing: false,
                });
                continue;
            }
            Event::End(_) => Node::Element(open.pop().ok_or(DocumentError::MalformedXml)?),
            Event::Empty(start) => Node::Element(Element {
                start: start.into_owned(),
                children: Vec::new(),
                self_closing: true,
            }),
            Event::Text(text) => Node::Text(text.into_owned()),
            Event::Eof => break,
            other => Node::Other(other.into_owned()),
        };

        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => top_level.push(node),
        }
    }

    if !open.is_empty() {
        return Err(DocumentError::MalformedXml);
    }

    Ok(top_level)
}

pub(crate) fn serialize(nodes: &[Node]) -> Result<Vec<u8>, DocumentError> {
    let mut writer = Writer::new(Vec::new());

    for node in nodes {
        write_node(&mut writer, node)?;
    }

    Ok(writer.into_inner())
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> Result<(), DocumentError> {
    match node {
        Node::Element(element) => {
            if element.self_closing && element.children.is_empty() {
                writer.write_event(Event::Empty(element.start.clone()))?;
            } else {
                writer.write_event(Event::Start(element.start.clone()))?;
                for child in &element.children {
                    write_node(writer, child)?;
                }
                writer.write_event(Event::End(element.start.to_end()))?;
            }
        }
        Node::Text(text) => writer.write_event(Event::Text(text.clone()))?,
        Node::Other(event) => writer.write_event(event.clone())?,
    }

    Ok(())
}

/// Returns the root element of a parsed document.
pub(crate) fn root(nodes: &[Node]) -> Option<&Element> {
    nodes.iter().find_map(|node| match node {
        Node::Element(element) => Some(element),
        _ => None,
    })
}

pub(crate) fn root_mut(nodes: &mut [Node]) -> Option<&mut Element> {
    nodes.iter_mut().find_map(|node| match node {
        Node::Element(element) => Some(element),
        _ => None,
    })
}
