//! XML bytes to a small element tree.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::error::XmlError;

type XmlResult<T> = std::result::Result<T, XmlError>;

/// An element with its unescaped attributes and child elements. Text
/// content is not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// `point 'P1'` when the element is named, otherwise the element name.
    pub fn label(&self) -> String {
        match self.attribute("name") {
            Some(name) => format!("{} '{}'", self.name, name),
            None => self.name.clone(),
        }
    }
}

/// Parse `bytes` into the tree below the single root element.
pub(crate) fn read_tree(bytes: &[u8]) -> XmlResult<XmlElement> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Structure("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Structure(format!(
            "element '{}' is not closed",
            open.name
        )));
    }
    root.ok_or_else(|| XmlError::Structure("document has no root element".to_string()))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> XmlResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(XmlError::Structure(format!(
                "second root element '{}'",
                element.name
            )));
        }
    }
    Ok(())
}

fn element_from(start: &BytesStart<'_>) -> XmlResult<XmlElement> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
        let raw = std::str::from_utf8(&attribute.value)?;
        attributes.push((key, unescape(raw)?.into_owned()));
    }
    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree() {
        let root = read_tree(
            br#"<?xml version="1.0"?>
<model name="Plant1">
  <point name="P1"><property name="a" value="x &amp; y"/></point>
  <point name="P2"/>
</model>"#,
        )
        .unwrap();
        assert_eq!(root.name, "model");
        assert_eq!(root.children_named("point").count(), 2);
        let property = &root.children[0].children[0];
        assert_eq!(property.attribute("value"), Some("x & y"));
        assert_eq!(root.children[1].label(), "point 'P2'");
    }

    #[test]
    fn rejects_unclosed_and_empty_documents() {
        assert!(read_tree(b"<model><point name=\"P1\">").is_err());
        assert!(read_tree(b"").is_err());
        assert!(read_tree(b"<a/><b/>").is_err());
    }
}
