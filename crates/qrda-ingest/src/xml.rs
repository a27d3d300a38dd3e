//! XML decoding into document trees.
//!
//! Every element whose local name equals the configured row tag becomes one
//! [`Document`]. Inside a document:
//!
//! - element names are local names (namespace prefixes dropped)
//! - attributes become `_<qualified name>` fields; `xmlns` declarations are skipped
//! - an element with only text becomes [`Node::Text`]
//! - text next to attributes or children is stored under [`VALUE_FIELD`]
//! - repeated sibling elements become a [`Node::List`]

use std::fmt::Display;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};
use tracing::debug;

use qrda_model::Document;
use qrda_model::tree::{ATTRIBUTE_PREFIX, Fields, Node, VALUE_FIELD, insert_field};

use crate::error::{IngestError, Result};

/// Row tag of a QRDA document.
pub const DEFAULT_ROW_TAG: &str = "ClinicalDocument";

/// Options for XML decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Local name of the element that delimits one document.
    pub row_tag: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            row_tag: DEFAULT_ROW_TAG.to_string(),
        }
    }
}

impl IngestOptions {
    pub fn with_row_tag(mut self, row_tag: impl Into<String>) -> Self {
        self.row_tag = row_tag.into();
        self
    }
}

/// An element whose end tag has not been read yet.
struct OpenElement {
    name: String,
    fields: Fields,
    text: String,
}

impl OpenElement {
    fn into_node(self) -> (String, Node) {
        let text = self.text.trim();
        let mut fields = self.fields;
        let node = if fields.is_empty() && !text.is_empty() {
            Node::Text(text.to_string())
        } else {
            if !text.is_empty() {
                insert_field(&mut fields, VALUE_FIELD.to_string(), Node::text(text));
            }
            Node::Element(fields)
        };
        (self.name, node)
    }
}

/// Reads a file and decodes every document it holds.
pub fn load_documents(path: &Path, options: &IngestOptions) -> Result<Vec<Document>> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let xml = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let documents = parse_documents(&xml, &path.display().to_string(), options)?;
    debug!(
        path = %path.display(),
        document_count = documents.len(),
        "loaded documents"
    );
    Ok(documents)
}

/// Decodes every outermost row-tag element in `xml`.
///
/// `input` names the source in errors and document identities; when more
/// than one document is found each identity gets a `#n` suffix.
pub fn parse_documents(xml: &str, input: &str, options: &IngestOptions) -> Result<Vec<Document>> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut roots: Vec<Node> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            xml_error(input, format!("{e} at byte {}", reader.buffer_position()))
        })?;
        match event {
            Event::Start(start) => {
                let element = open_element(&start, input)?;
                if !stack.is_empty() || element.name == options.row_tag {
                    stack.push(element);
                }
            }
            Event::Empty(start) => {
                let element = open_element(&start, input)?;
                if !stack.is_empty() || element.name == options.row_tag {
                    close_element(element, &mut stack, &mut roots);
                }
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    close_element(element, &mut stack, &mut roots);
                }
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    let decoded = text.decode().map_err(|e| xml_error(input, e))?;
                    top.text.push_str(&decoded);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    let decoded = data.decode().map_err(|e| xml_error(input, e))?;
                    top.text.push_str(&decoded);
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(top) = stack.last_mut() {
                    let resolved = resolve_reference(&reference, input)?;
                    top.text.push_str(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(xml_error(input, "unexpected end of input inside an element"));
    }
    if roots.is_empty() {
        return Err(IngestError::NoDocuments {
            input: input.to_string(),
            row_tag: options.row_tag.clone(),
        });
    }

    let multiple = roots.len() > 1;
    Ok(roots
        .into_iter()
        .enumerate()
        .map(|(index, root)| {
            let source = if multiple {
                format!("{input}#{}", index + 1)
            } else {
                input.to_string()
            };
            Document::new(source, root)
        })
        .collect())
}

/// Finishes `element`, attaching it to its parent or to the document list.
fn close_element(element: OpenElement, stack: &mut [OpenElement], roots: &mut Vec<Node>) {
    let (name, node) = element.into_node();
    match stack.last_mut() {
        Some(parent) => insert_field(&mut parent.fields, name, node),
        None => roots.push(node),
    }
}

fn open_element(start: &BytesStart<'_>, input: &str) -> Result<OpenElement> {
    let name = utf8(start.local_name().as_ref(), input)?.to_string();
    let mut fields = Fields::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| xml_error(input, e))?;
        let key = utf8(attribute.key.as_ref(), input)?;
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let value = attribute
            .unescape_value()
            .map_err(|e| xml_error(input, e))?;
        insert_field(
            &mut fields,
            format!("{ATTRIBUTE_PREFIX}{key}"),
            Node::text(value.into_owned()),
        );
    }
    Ok(OpenElement {
        name,
        fields,
        text: String::new(),
    })
}

/// Resolves a character reference or one of the predefined XML entities.
///
/// Unknown entities are kept verbatim.
fn resolve_reference(reference: &BytesRef<'_>, input: &str) -> Result<String> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| xml_error(input, e))?
    {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(|e| xml_error(input, e))?;
    let resolved = match name.as_ref() {
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "apos" => "'".to_string(),
        "quot" => "\"".to_string(),
        other => format!("&{other};"),
    };
    Ok(resolved)
}

fn utf8<'a>(bytes: &'a [u8], input: &str) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| xml_error(input, e))
}

fn xml_error(input: &str, message: impl Display) -> IngestError {
    IngestError::XmlParse {
        input: input.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(xml: &str) -> Node {
        let mut documents =
            parse_documents(xml, "test.xml", &IngestOptions::default()).expect("parse");
        assert_eq!(documents.len(), 1);
        documents.remove(0).root
    }

    #[test]
    fn text_only_element_becomes_text() {
        let root = parse_one("<ClinicalDocument><title> Report </title></ClinicalDocument>");
        assert_eq!(root.field("title"), Some(&Node::text("Report")));
    }

    #[test]
    fn attributes_and_text_share_an_element() {
        let root =
            parse_one(r#"<ClinicalDocument><given qualifier="CL">Jane</given></ClinicalDocument>"#);
        let given = root.field("given").expect("given");
        assert_eq!(given.field("_qualifier"), Some(&Node::text("CL")));
        assert_eq!(given.as_text(), Some("Jane"));
    }

    #[test]
    fn entity_references_are_resolved() {
        let root = parse_one(
            "<ClinicalDocument><family>O&apos;Brien &amp; Co &#65;</family></ClinicalDocument>",
        );
        assert_eq!(root.field("family").and_then(Node::as_text), Some("O'Brien & Co A"));
    }

    #[test]
    fn namespaces_are_dropped_from_element_names() {
        let root = parse_one(
            r#"<cda:ClinicalDocument xmlns:cda="urn:hl7-org:v3" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
                 <cda:value xsi:type="PQ" value="120"/>
               </cda:ClinicalDocument>"#,
        );
        let value = root.field("value").expect("value");
        assert_eq!(value.field("_value"), Some(&Node::text("120")));
        assert_eq!(value.field("_xsi:type"), Some(&Node::text("PQ")));
        assert_eq!(root.field("_xmlns:cda"), None);
    }

    #[test]
    fn unclosed_document_is_an_error() {
        let err = parse_documents(
            "<ClinicalDocument><entry>",
            "broken.xml",
            &IngestOptions::default(),
        )
        .expect_err("should fail");
        assert!(matches!(err, IngestError::XmlParse { .. }));
    }
}
