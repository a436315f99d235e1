//! In-memory tree model for locale documents
//!
//! Locale schemas on both sides identify repeated sibling elements by
//! position, not by unique keys, so the tree preserves document order
//! everywhere: attribute order, child order, text placement. The tree is
//! built once per parsed document and never mutated afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Errors that can occur while loading or parsing a locale document.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("invalid attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("document has no root element")]
    NoRoot,
    #[error("unexpected closing tag </{0}>")]
    UnbalancedClose(String),
}

/// A single element of a parsed document.
///
/// `attributes` and `children` keep document order; callers may rely on
/// "the Nth child named X" being stable across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Direct children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// First descendant (including self) with the given tag, in document
    /// order.
    pub fn descendant(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        for child in &self.children {
            if let Some(found) = child.descendant(tag) {
                return Some(found);
            }
        }
        None
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// A parsed locale document together with the path it was loaded from and
/// the locale identifier derived from that path.
///
/// The source path matters: references to other locales are resolved as
/// sibling files of this document.
#[derive(Debug, Clone)]
pub struct LocaleDoc {
    pub root: Element,
    pub path: PathBuf,
    pub locale: String,
}

impl LocaleDoc {
    pub fn new(root: Element, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let locale = locale_from_path(&path);
        LocaleDoc { root, path, locale }
    }

    /// First element with the given category tag, in document order.
    pub fn category(&self, tag: &str) -> Option<&Element> {
        self.root.descendant(tag)
    }
}

/// Derive a locale identifier (`language[_TERRITORY][_subtag]`) from a
/// document path: `/data/ar_SA.xml` -> `ar_SA`.
pub fn locale_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Parse an XML string into an element tree.
///
/// Only elements, attributes and text are kept; comments, processing
/// instructions and doctypes are skipped. Text is trimmed; the first
/// non-empty text run of an element wins, matching the source schema's
/// convention of a single text node per data element.
pub fn parse_document(xml: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let mut el = Element::new(String::from_utf8_lossy(start.name().as_ref()));
                for attr in start.attributes() {
                    let attr = attr?;
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let value = attr.unescape_value()?.into_owned();
                    el.attributes.push((key, value));
                }
                stack.push(el);
            }
            Event::Empty(start) => {
                let mut el = Element::new(String::from_utf8_lossy(start.name().as_ref()));
                for attr in start.attributes() {
                    let attr = attr?;
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let value = attr.unescape_value()?.into_owned();
                    el.attributes.push((key, value));
                }
                attach(&mut stack, &mut root, el);
            }
            Event::Text(text) => {
                let value = text.unescape()?;
                let value = value.trim();
                if !value.is_empty() {
                    if let Some(current) = stack.last_mut() {
                        if current.text.is_none() {
                            current.text = Some(value.to_string());
                        }
                    }
                }
            }
            Event::End(end) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| {
                        ParseError::UnbalancedClose(
                            String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                        )
                    })?;
                attach(&mut stack, &mut root, el);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    root.ok_or(ParseError::NoRoot)
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, el: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None => {
            if root.is_none() {
                *root = Some(el);
            }
        }
    }
}

/// Load and parse a locale document from disk.
pub fn load_document(path: &Path) -> Result<LocaleDoc, ParseError> {
    let xml = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root = parse_document(&xml)?;
    Ok(LocaleDoc::new(root, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_with_text() {
        let root = parse_document(
            r#"<Locale version="1.0">
                 <LC_INFO>
                   <Language><LangID>en</LangID></Language>
                 </LC_INFO>
               </Locale>"#,
        )
        .unwrap();

        assert_eq!(root.tag, "Locale");
        assert_eq!(root.attr("version"), Some("1.0"));
        let lang_id = root.descendant("LangID").unwrap();
        assert_eq!(lang_id.text(), Some("en"));
    }

    #[test]
    fn preserves_sibling_order() {
        let root = parse_document(
            "<Days><Day>sun</Day><Day>mon</Day><Day>tue</Day></Days>",
        )
        .unwrap();
        let texts: Vec<&str> = root
            .children_named("Day")
            .filter_map(|d| d.text())
            .collect();
        assert_eq!(texts, vec!["sun", "mon", "tue"]);
    }

    #[test]
    fn preserves_attribute_order() {
        let root =
            parse_document(r#"<FormatElement msgid="d1" default="true" usage="DATE"/>"#).unwrap();
        let keys: Vec<&str> = root.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["msgid", "default", "usage"]);
    }

    #[test]
    fn first_text_run_wins() {
        let root = parse_document("<A>first<B/>second</A>").unwrap();
        assert_eq!(root.text(), Some("first"));
    }

    #[test]
    fn empty_document_is_an_error() {
        assert!(matches!(parse_document("<!-- nothing -->"), Err(ParseError::NoRoot)));
    }

    #[test]
    fn locale_id_from_path() {
        assert_eq!(locale_from_path(Path::new("/data/ar_SA.xml")), "ar_SA");
        assert_eq!(locale_from_path(Path::new("en.xml")), "en");
    }

    #[test]
    fn unescapes_entities() {
        let root = parse_document("<Marker>&lt;&amp;&gt;</Marker>").unwrap();
        assert_eq!(root.text(), Some("<&>"));
    }
}
