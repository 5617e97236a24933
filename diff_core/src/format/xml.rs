//! Thin XML bridge over quick-xml.
//!
//! The mapping follows the usual element-to-object convention: child
//! elements become object keys, repeated sibling names become arrays,
//! attributes become `@name` keys, and character data becomes either a plain
//! string (text-only elements) or a `#text` key (mixed content).
//! Serialization inverts the same convention.

use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use serde_json::{Map, Value};

use crate::errors::DiffCoreError;

struct PendingElement {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

pub(super) fn parse(text: &str) -> Result<Value, DiffCoreError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<PendingElement> = vec![];
    let mut root = Map::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|error| parse_error(&reader, &error))?;

        match event {
            Event::Start(start) => stack.push(open_element(&start, &reader)?),
            Event::Empty(start) => {
                let element = open_element(&start, &reader)?;
                close_element(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| DiffCoreError::Parse {
                    format: "XML",
                    message: "Unexpected closing tag".to_owned(),
                })?;
                close_element(element, &mut stack, &mut root);
            }
            Event::Text(data) => {
                let unescaped = data
                    .unescape()
                    .map_err(|error| parse_error(&reader, &error))?;
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry no document content.
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if !stack.is_empty() {
        return Err(DiffCoreError::Parse {
            format: "XML",
            message: format!("Unclosed element <{}>", stack[stack.len() - 1].name),
        });
    }

    if root.is_empty() {
        return Err(DiffCoreError::Parse {
            format: "XML",
            message: "No root element found".to_owned(),
        });
    }

    Ok(Value::Object(root))
}

fn open_element(
    start: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> Result<PendingElement, DiffCoreError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Map::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| parse_error(reader, &error))?;
        let key = format!("@{}", String::from_utf8_lossy(attribute.key.as_ref()));
        let value = attribute
            .unescape_value()
            .map_err(|error| parse_error(reader, &error))?
            .into_owned();
        attributes.insert(key, Value::String(value));
    }

    Ok(PendingElement {
        name,
        attributes,
        children: Map::new(),
        text: String::new(),
    })
}

fn close_element(element: PendingElement, stack: &mut Vec<PendingElement>, root: &mut Map<String, Value>) {
    let PendingElement {
        name,
        attributes,
        children,
        text,
    } = element;

    let value = if attributes.is_empty() && children.is_empty() {
        if text.is_empty() {
            Value::Null
        } else {
            Value::String(text)
        }
    } else {
        let mut map = attributes;
        map.extend(children);
        if !text.is_empty() {
            map.insert("#text".to_owned(), Value::String(text));
        }
        Value::Object(map)
    };

    let target = stack
        .last_mut()
        .map_or(root, |parent| &mut parent.children);
    insert_child(target, name, value);
}

/// Repeated sibling element names collapse into an array.
fn insert_child(target: &mut Map<String, Value>, name: String, value: Value) {
    match target.get_mut(&name) {
        Some(Value::Array(existing)) => existing.push(value),
        Some(existing) => {
            let previous = existing.take();
            *existing = Value::Array(vec![previous, value]);
        }
        None => {
            target.insert(name, value);
        }
    }
}

fn parse_error(reader: &Reader<&[u8]>, error: &dyn std::fmt::Display) -> DiffCoreError {
    DiffCoreError::Parse {
        format: "XML",
        message: format!("{error} at byte {}", reader.buffer_position()),
    }
}

pub(super) fn serialize(value: &Value) -> Result<String, DiffCoreError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    match value {
        // A single-key object whose value is an object already has a
        // natural root element; anything else gets a synthetic one.
        Value::Object(map) if map.len() == 1 && map.values().all(Value::is_object) => {
            for (name, child) in map {
                write_element(&mut writer, name, child)?;
            }
        }
        other => write_element(&mut writer, "root", other)?,
    }

    String::from_utf8(writer.into_inner()).map_err(|error| DiffCoreError::Serialize {
        format: "XML",
        message: error.to_string(),
    })
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &Value,
) -> Result<(), DiffCoreError> {
    match value {
        Value::Array(elements) => {
            for element in elements {
                write_element(writer, name, element)?;
            }
        }
        Value::Object(map) => {
            let mut start = BytesStart::new(name);
            for (key, attribute) in map {
                if let Some(attribute_name) = key.strip_prefix('@') {
                    start.push_attribute((attribute_name, scalar_text(attribute).as_str()));
                }
            }
            write_event(writer, Event::Start(start))?;

            for (key, child) in map {
                if !key.starts_with('@') && key != "#text" {
                    write_element(writer, key, child)?;
                }
            }

            if let Some(text) = map.get("#text") {
                write_event(writer, Event::Text(BytesText::new(&scalar_text(text))))?;
            }

            write_event(writer, Event::End(BytesEnd::new(name)))?;
        }
        scalar => {
            write_event(writer, Event::Start(BytesStart::new(name)))?;
            if !scalar.is_null() {
                write_event(writer, Event::Text(BytesText::new(&scalar_text(scalar))))?;
            }
            write_event(writer, Event::End(BytesEnd::new(name)))?;
        }
    }

    Ok(())
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), DiffCoreError> {
    writer
        .write_event(event)
        .map_err(|error| DiffCoreError::Serialize {
            format: "XML",
            message: error.to_string(),
        })
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
