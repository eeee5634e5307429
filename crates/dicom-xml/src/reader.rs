//! Streaming reader for Native DICOM Model documents.
//!
//! Only direct children of the root element are attributes. Items nested in
//! sequence (`SQ`) attributes are skipped, as are non-`Value` payloads such as
//! `InlineBinary`, `PersonName`, and `BulkData`.

use std::fmt::Display;

use dicom_model::AttributeSet;
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use tracing::trace;

use crate::error::{Result, XmlError};

const ATTRIBUTE_ELEMENT: &[u8] = b"DicomAttribute";
const VALUE_ELEMENT: &[u8] = b"Value";
const TAG_KEY: &[u8] = b"tag";
const KEYWORD_KEY: &[u8] = b"keyword";

/// Depth of an attribute element: root, then `DicomAttribute`.
const ATTRIBUTE_DEPTH: usize = 1;
/// Depth of text inside a `Value`: root, `DicomAttribute`, `Value`.
const VALUE_TEXT_DEPTH: usize = 3;

/// An attribute whose closing tag has not been read yet.
#[derive(Debug, Default)]
struct PendingAttribute {
    tag: Option<String>,
    keyword: Option<String>,
    value: Option<String>,
    value_seen: bool,
    capturing: bool,
}

impl PendingAttribute {
    fn commit(self, attrs: &mut AttributeSet) {
        attrs.insert_attribute(self.tag.as_deref(), self.keyword.as_deref(), self.value);
    }

    fn open_value(&mut self, empty: bool) {
        if self.value_seen {
            return;
        }
        self.value_seen = true;
        self.value = Some(String::new());
        self.capturing = !empty;
    }

    fn push_text(&mut self, text: &str) {
        if self.capturing
            && let Some(value) = self.value.as_mut()
        {
            value.push_str(text);
        }
    }
}

/// Parses one metadata document into an [`AttributeSet`].
///
/// The value of an attribute is the text of its first `Value` child. An
/// attribute without one has no value; an empty `<Value/>` has the value `""`.
///
/// # Errors
///
/// Returns [`XmlError`] for documents that are not well-formed XML.
pub fn parse(document: &str) -> Result<AttributeSet> {
    let mut reader = Reader::from_str(document);
    let mut attrs = AttributeSet::new();
    let mut open: Vec<String> = Vec::new();
    let mut root_seen = false;
    let mut pending: Option<PendingAttribute> = None;

    loop {
        let position = byte_offset(reader.buffer_position());
        let event = reader
            .read_event()
            .map_err(|error| syntax(byte_offset(reader.error_position()), error))?;
        match event {
            Event::Start(element) => {
                let depth = open.len();
                if depth == 0 {
                    check_single_root(&mut root_seen, position)?;
                } else if depth == ATTRIBUTE_DEPTH && is_named(&element, ATTRIBUTE_ELEMENT) {
                    pending = Some(read_identity(&element, &reader, position)?);
                } else if depth == ATTRIBUTE_DEPTH + 1
                    && is_named(&element, VALUE_ELEMENT)
                    && let Some(attribute) = pending.as_mut()
                {
                    attribute.open_value(false);
                }
                open.push(String::from_utf8_lossy(element.name().as_ref()).into_owned());
            }
            Event::Empty(element) => {
                let depth = open.len();
                if depth == 0 {
                    check_single_root(&mut root_seen, position)?;
                } else if depth == ATTRIBUTE_DEPTH && is_named(&element, ATTRIBUTE_ELEMENT) {
                    read_identity(&element, &reader, position)?.commit(&mut attrs);
                } else if depth == ATTRIBUTE_DEPTH + 1
                    && is_named(&element, VALUE_ELEMENT)
                    && let Some(attribute) = pending.as_mut()
                {
                    attribute.open_value(true);
                }
            }
            Event::End(_) => {
                let depth = open.len();
                open.pop();
                if depth == VALUE_TEXT_DEPTH {
                    if let Some(attribute) = pending.as_mut() {
                        attribute.capturing = false;
                    }
                } else if depth == ATTRIBUTE_DEPTH + 1
                    && let Some(attribute) = pending.take()
                {
                    attribute.commit(&mut attrs);
                }
            }
            Event::Text(text) => {
                let raw = text.into_inner();
                if open.is_empty() {
                    if !raw.iter().all(u8::is_ascii_whitespace) {
                        return Err(stray_content(root_seen, position));
                    }
                } else if open.len() == VALUE_TEXT_DEPTH
                    && let Some(attribute) = pending.as_mut()
                {
                    attribute.push_text(&String::from_utf8_lossy(&raw));
                }
            }
            Event::CData(data) => {
                if open.is_empty() {
                    return Err(stray_content(root_seen, position));
                }
                if open.len() == VALUE_TEXT_DEPTH
                    && let Some(attribute) = pending.as_mut()
                {
                    attribute.push_text(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::GeneralRef(reference) => {
                if open.is_empty() {
                    return Err(stray_content(root_seen, position));
                }
                let resolved = resolve_reference(&reference, position)?;
                if open.len() == VALUE_TEXT_DEPTH
                    && let Some(attribute) = pending.as_mut()
                {
                    attribute.push_text(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = open.pop() {
        return Err(XmlError::Unclosed { element });
    }
    if !root_seen {
        return Err(XmlError::MissingRoot);
    }
    trace!(
        tags = attrs.tag_count(),
        keywords = attrs.keyword_count(),
        "parsed metadata document"
    );
    Ok(attrs)
}

fn is_named(element: &BytesStart<'_>, name: &[u8]) -> bool {
    element.local_name().as_ref() == name
}

fn check_single_root(root_seen: &mut bool, position: u64) -> Result<()> {
    if *root_seen {
        return Err(XmlError::TrailingContent { position });
    }
    *root_seen = true;
    Ok(())
}

fn stray_content(root_seen: bool, position: u64) -> XmlError {
    if root_seen {
        XmlError::TrailingContent { position }
    } else {
        syntax(position, "content before root element")
    }
}

/// Reads the `tag` and `keyword` XML attributes of a `DicomAttribute`.
fn read_identity(
    element: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
    position: u64,
) -> Result<PendingAttribute> {
    let mut attribute = PendingAttribute::default();
    for xml_attr in element.attributes() {
        let xml_attr = xml_attr.map_err(|error| syntax(position, error))?;
        let slot = match xml_attr.key.local_name().as_ref() {
            TAG_KEY => &mut attribute.tag,
            KEYWORD_KEY => &mut attribute.keyword,
            _ => continue,
        };
        let value = xml_attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(|error| syntax(position, error))?;
        *slot = Some(value.into_owned());
    }
    Ok(attribute)
}

fn resolve_reference(reference: &BytesRef<'_>, position: u64) -> Result<String> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|error| syntax(position, error))?
    {
        return Ok(ch.to_string());
    }
    let name = String::from_utf8_lossy(reference);
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| XmlError::UnknownEntity {
            name: name.into_owned(),
            position,
        })
}

fn syntax(position: u64, error: impl Display) -> XmlError {
    XmlError::Syntax {
        position,
        message: error.to_string(),
    }
}

fn byte_offset<P: TryInto<u64>>(position: P) -> u64 {
    position.try_into().unwrap_or(u64::MAX)
}
