//! Position-based structural queries over a document tree
//!
//! The locale schemas have no unique identifiers for repeated siblings;
//! elements are identified by their tag, their ancestors' tags, and their
//! position among same-named siblings. Every query here is a pure function
//! over the tree it was constructed with, and every multi-result query
//! preserves document order. Where matches are ambiguous the tie-break is
//! fixed: first match in document order wins. Grouping queries report later
//! collisions as duplicate-key diagnostics and keep the first entry.
//!
//! Absence is never an error: a query over a tree that lacks the requested
//! pattern returns `None` or an empty collection. Most fields of real
//! locale documents are optional.

use std::collections::BTreeMap;

use crate::diag::Diagnostics;
use crate::tree::Element;

/// Ordered attribute list of one element, as found in the document.
pub type AttrList = Vec<(String, String)>;

/// Look up an attribute value in an [`AttrList`].
pub fn attr_value<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
}

/// An ancestor-chain requirement for grouped queries.
///
/// `tags` are checked walking upward from the matched element's parent;
/// a `None` entry matches any tag at that generation. The grouping key is
/// the value of `key_attr` on the outermost required ancestor (the one at
/// depth `tags.len()`). Matches whose chain is too short or whose grouping
/// ancestor lacks the key attribute are skipped.
#[derive(Debug, Clone, Copy)]
pub struct AncestorPattern<'p> {
    pub tags: &'p [Option<&'p str>],
    pub key_attr: &'p str,
}

struct Hit<'a> {
    el: &'a Element,
    /// Ancestors of `el`, nearest first (parent, grandparent, ...).
    ancestors: Vec<&'a Element>,
}

/// Read-only query handle over one document tree.
pub struct TreeQuery<'a> {
    root: &'a Element,
    diag: &'a Diagnostics,
}

impl<'a> TreeQuery<'a> {
    pub fn new(root: &'a Element, diag: &'a Diagnostics) -> Self {
        TreeQuery { root, diag }
    }

    /// All elements named `tag` (including the root), pre-order, which is
    /// document order.
    fn hits(&self, tag: &str) -> Vec<Hit<'a>> {
        let mut out = Vec::new();
        let mut stack: Vec<&'a Element> = Vec::new();
        collect(self.root, tag, &mut stack, &mut out);
        out
    }

    /// Text of the first element named `tag`, in document order.
    ///
    /// Callers assert the tag is unique in the document; when it is not,
    /// the first occurrence wins by contract.
    pub fn text_of(&self, tag: &str) -> Option<&'a str> {
        self.hits(tag).first().and_then(|h| h.el.text())
    }

    /// Text of the first element named `tag` whose direct parent is named
    /// `parent_tag` and which carries text.
    pub fn text_of_in(&self, parent_tag: &str, tag: &str) -> Option<&'a str> {
        self.hits(tag)
            .iter()
            .filter(|h| h.parent_is(parent_tag))
            .find_map(|h| h.el.text())
    }

    /// Text of every element named `tag` under a parent named `parent_tag`,
    /// in document order. Duplicates are preserved.
    pub fn all_text_of(&self, parent_tag: &str, tag: &str) -> Vec<String> {
        self.hits(tag)
            .iter()
            .filter(|h| h.parent_is(parent_tag))
            .filter_map(|h| h.el.text())
            .map(str::to_string)
            .collect()
    }

    /// Attribute lists of every element named `tag`, in document order.
    pub fn attributes_of(&self, tag: &str) -> Vec<AttrList> {
        self.hits(tag)
            .iter()
            .map(|h| h.el.attributes.clone())
            .collect()
    }

    /// Attribute lists of every element named `tag` under `parent_tag`,
    /// in document order.
    pub fn attributes_of_in(&self, parent_tag: &str, tag: &str) -> Vec<AttrList> {
        self.hits(tag)
            .iter()
            .filter(|h| h.parent_is(parent_tag))
            .map(|h| h.el.attributes.clone())
            .collect()
    }

    /// Value of `attr` on the first element named `tag` that carries it.
    pub fn attr_of(&self, tag: &str, attr: &str) -> Option<&'a str> {
        self.hits(tag).iter().find_map(|h| h.el.attr(attr))
    }

    /// Values of `attr` on every element named `tag` that carries it,
    /// in document order.
    pub fn attrs_of(&self, tag: &str, attr: &str) -> Vec<String> {
        self.hits(tag)
            .iter()
            .filter_map(|h| h.el.attr(attr))
            .map(str::to_string)
            .collect()
    }

    /// Whether any element named `tag` exists in the document.
    pub fn element_exists(&self, tag: &str) -> bool {
        !self.hits(tag).is_empty()
    }

    /// `ref` attribute of the first element named `tag` that carries one.
    pub fn ref_of(&self, tag: &str) -> Option<&'a str> {
        self.attr_of(tag, crate::names::oo::REF)
    }

    /// One attribute list per element named `tag` under `parent_tag`,
    /// keyed by the value of `key_attr` on the element itself.
    ///
    /// On a key collision the first element wins and a duplicate-key
    /// diagnostic is emitted for each later one; later entries are dropped,
    /// never overwritten.
    pub fn attributes_grouped_by(
        &self,
        parent_tag: &str,
        tag: &str,
        key_attr: &str,
    ) -> BTreeMap<String, AttrList> {
        let mut out = BTreeMap::new();
        for hit in self.hits(tag) {
            if !hit.parent_is(parent_tag) {
                continue;
            }
            let Some(key) = hit.el.attr(key_attr) else {
                continue;
            };
            if out.contains_key(key) {
                self.diag.duplicate_key(parent_tag, key, &hit.el.tag);
            } else {
                out.insert(key.to_string(), hit.el.attributes.clone());
            }
        }
        out
    }

    /// Text of elements named `tag` under `parent_tag`, keyed by the value
    /// of `key_attr` on the parent. First write wins.
    pub fn text_by_parent_attr(
        &self,
        parent_tag: &str,
        tag: &str,
        key_attr: &str,
    ) -> BTreeMap<String, String> {
        self.text_grouped_by_ancestor(
            tag,
            AncestorPattern {
                tags: &[Some(parent_tag)],
                key_attr,
            },
        )
    }

    /// Text of elements named `tag`, keyed by the value of `key_attr` on
    /// the element itself. Elements under a different parent are ignored.
    pub fn text_by_own_attr(
        &self,
        parent_tag: &str,
        tag: &str,
        key_attr: &str,
    ) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for hit in self.hits(tag) {
            if !hit.parent_is(parent_tag) {
                continue;
            }
            let (Some(key), Some(text)) = (hit.el.attr(key_attr), hit.el.text()) else {
                continue;
            };
            if out.contains_key(key) {
                self.diag.duplicate_key(parent_tag, key, text);
            } else {
                out.insert(key.to_string(), text.to_string());
            }
        }
        out
    }

    /// Generalized ancestor-chain grouping: text of elements named `tag`
    /// whose ancestor chain matches `pattern`, keyed by the pattern's key
    /// attribute. First write wins; collisions are reported.
    ///
    /// This is the lookup shape of deeply nested calendar data, where the
    /// only way to tell one month set from another is the `unoid` of an
    /// ancestor several generations up.
    pub fn text_grouped_by_ancestor(
        &self,
        tag: &str,
        pattern: AncestorPattern<'_>,
    ) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for hit in self.hits(tag) {
            let Some(ancestor) = hit.matching_ancestor(&pattern) else {
                continue;
            };
            let (Some(key), Some(text)) = (ancestor.attr(pattern.key_attr), hit.el.text()) else {
                continue;
            };
            if out.contains_key(key) {
                self.diag.duplicate_key(&hit.el.tag, key, text);
            } else {
                out.insert(key.to_string(), text.to_string());
            }
        }
        out
    }

    /// Two-level grouping for key/value element pairs nested under a keyed
    /// ancestor: outer key is the grouping ancestor's key attribute, inner
    /// key is the text of `key_tag`, inner value is the text of the first
    /// following sibling named `value_tag`.
    ///
    /// Calendar day, month and era names use this shape:
    /// `Calendar[unoid] > DaysOfWeek > Day > (DayID, DefaultAbbrvName)`.
    pub fn text_pairs_grouped_by_ancestor(
        &self,
        key_tag: &str,
        value_tag: &str,
        pattern: AncestorPattern<'_>,
    ) -> BTreeMap<String, BTreeMap<String, String>> {
        let mut out: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for hit in self.hits(key_tag) {
            let Some(ancestor) = hit.matching_ancestor(&pattern) else {
                continue;
            };
            let Some(outer_key) = ancestor.attr(pattern.key_attr) else {
                continue;
            };
            let Some(inner_key) = hit.el.text() else {
                continue;
            };
            let Some(value) = hit.following_sibling_text(value_tag) else {
                continue;
            };
            let inner = out.entry(outer_key.to_string()).or_default();
            if inner.contains_key(inner_key) {
                self.diag.duplicate_key(outer_key, inner_key, value);
            } else {
                inner.insert(inner_key.to_string(), value.to_string());
            }
        }
        out
    }

    /// Value of `attr` on the first element named `tag` whose parent is
    /// named `parent_tag` and carries `parent_key_attr` = `parent_key_value`.
    pub fn attr_where_parent(
        &self,
        parent_tag: &str,
        tag: &str,
        attr: &str,
        parent_key_attr: &str,
        parent_key_value: &str,
    ) -> Option<&'a str> {
        self.hits(tag)
            .iter()
            .filter(|h| h.parent_is(parent_tag))
            .filter(|h| {
                h.ancestors
                    .first()
                    .and_then(|p| p.attr(parent_key_attr))
                    .map(|v| v == parent_key_value)
                    .unwrap_or(false)
            })
            .find_map(|h| h.el.attr(attr))
    }

    /// Values of `attr` on elements named `tag`, keyed by the value of
    /// `parent_key_attr` on their parent (which must be named `parent_tag`).
    /// First write wins.
    pub fn attr_by_parent_key(
        &self,
        parent_tag: &str,
        tag: &str,
        attr: &str,
        parent_key_attr: &str,
    ) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for hit in self.hits(tag) {
            if !hit.parent_is(parent_tag) {
                continue;
            }
            let Some(key) = hit.ancestors.first().and_then(|p| p.attr(parent_key_attr)) else {
                continue;
            };
            let Some(value) = hit.el.attr(attr) else {
                continue;
            };
            if out.contains_key(key) {
                self.diag.duplicate_key(parent_tag, key, value);
            } else {
                out.insert(key.to_string(), value.to_string());
            }
        }
        out
    }
}

impl<'a> Hit<'a> {
    fn parent_is(&self, tag: &str) -> bool {
        self.ancestors.first().map(|p| p.tag == tag).unwrap_or(false)
    }

    /// The grouping ancestor when this hit's chain satisfies the pattern.
    fn matching_ancestor(&self, pattern: &AncestorPattern<'_>) -> Option<&'a Element> {
        if pattern.tags.is_empty() || self.ancestors.len() < pattern.tags.len() {
            return None;
        }
        for (required, actual) in pattern.tags.iter().zip(&self.ancestors) {
            if let Some(required) = required {
                if actual.tag != *required {
                    return None;
                }
            }
        }
        Some(self.ancestors[pattern.tags.len() - 1])
    }

    /// Text of the first later sibling named `tag`, scanning forward from
    /// this element's own position among its parent's children.
    fn following_sibling_text(&self, tag: &str) -> Option<&'a str> {
        let parent = self.ancestors.first()?;
        let pos = parent
            .children
            .iter()
            .position(|c| std::ptr::eq(c, self.el))?;
        parent.children[pos + 1..]
            .iter()
            .filter(|c| c.tag == tag)
            .find_map(|c| c.text())
    }
}

fn collect<'a>(
    el: &'a Element,
    tag: &str,
    ancestors: &mut Vec<&'a Element>,
    out: &mut Vec<Hit<'a>>,
) {
    if el.tag == tag {
        out.push(Hit {
            el,
            ancestors: ancestors.iter().rev().copied().collect(),
        });
    }
    ancestors.push(el);
    for child in &el.children {
        collect(child, tag, ancestors, out);
    }
    ancestors.pop();
}
