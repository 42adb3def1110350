//! A lightweight HTML adapter for translation markers.
//!
//! The document is scanned once with regular expressions into a flat list
//! of elements. Edits are recorded against those elements and spliced into
//! the original text on [`HtmlDocument::to_html`], so everything outside
//! the edited spans comes out byte-for-byte unchanged.

use std::{collections::BTreeMap, ops::Range, sync::LazyLock};

use regex::Regex;

use crate::core::{Locale, MarkedNode, TranslationTarget};

/// One ordered pass over comments and tags, so a comment is only a comment
/// where a tag could also start.
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)(?P<comment><!--.*?-->)|<(?P<end>/)?(?P<name>[A-Za-z][A-Za-z0-9:-]*)(?P<attrs>(?:\s+[^\s"'<>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'=<>`]+))?)*)\s*(?P<close>/)?>"#,
    )
    .unwrap()
});

static END_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</([A-Za-z][A-Za-z0-9:-]*)\s*>").unwrap());

static ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is raw text, never markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

#[derive(Debug, Clone)]
struct Attribute {
    name: String,
    value: String,
    span: Range<usize>,
}

#[derive(Debug, Clone)]
struct Element {
    name: String,
    tag: Range<usize>,
    /// Where a new attribute is inserted: just after the last existing one.
    attrs_end: usize,
    attrs: Vec<Attribute>,
    /// Byte range between the start and end tags; `None` for void,
    /// self-closing or unclosed elements.
    content: Option<Range<usize>>,
}

impl Element {
    fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Default, Clone)]
struct ElementEdit {
    text: Option<String>,
    attrs: Vec<(String, String)>,
}

enum Token {
    Start(usize),
    End { name: String, start: usize },
}

/// An HTML page or template whose marked elements can be translated.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    source: String,
    elements: Vec<Element>,
    edits: BTreeMap<usize, ElementEdit>,
    lang: Option<Locale>,
}

impl HtmlDocument {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let elements = scan_elements(&source);
        Self {
            source,
            elements,
            edits: BTreeMap::new(),
            lang: None,
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Whether any edit has been recorded since parsing.
    pub fn is_modified(&self) -> bool {
        !self.edits.is_empty() || self.lang.is_some()
    }

    /// Render the document with every recorded edit applied.
    pub fn to_html(&self) -> String {
        let mut splices = self.collect_splices();
        // Outer spans sort before the spans nested inside them.
        splices.sort_by(|a, b| a.0.start.cmp(&b.0.start).then(b.0.end.cmp(&a.0.end)));

        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for (range, replacement) in splices {
            // Inside a span whose content was already replaced: the node is
            // no longer part of the document.
            if range.start < cursor {
                continue;
            }
            out.push_str(&self.source[cursor..range.start]);
            out.push_str(&replacement);
            cursor = range.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }

    /// Whether the element sits inside another element whose text has been
    /// replaced, so nothing written to it reaches [`Self::to_html`].
    fn is_detached(&self, id: usize) -> bool {
        let start = self.elements[id].tag.start;
        self.edits.iter().any(|(other, edit)| {
            *other != id
                && edit.text.is_some()
                && self.elements[*other]
                    .content
                    .as_ref()
                    .is_some_and(|content| content.contains(&start))
        })
    }

    fn collect_splices(&self) -> Vec<(Range<usize>, String)> {
        let mut edits = self.edits.clone();
        if let Some(locale) = self.lang
            && let Some(root) = self.elements.iter().position(|e| e.name == "html")
        {
            upsert_attr(&mut edits.entry(root).or_default().attrs, "lang", locale.code());
        }

        let mut splices = Vec::new();
        for (id, edit) in &edits {
            let element = &self.elements[*id];
            for (name, value) in &edit.attrs {
                let rendered = format!("{}=\"{}\"", name, escape_attribute(value));
                match element.attribute(name) {
                    Some(existing) => splices.push((existing.span.clone(), rendered)),
                    None => splices.push((
                        element.attrs_end..element.attrs_end,
                        format!(" {}", rendered),
                    )),
                }
            }
            if let (Some(text), Some(content)) = (&edit.text, &element.content) {
                splices.push((content.clone(), escape_text(text)));
            }
        }
        splices
    }
}

impl TranslationTarget for HtmlDocument {
    fn marked_nodes(&self, attribute: &str) -> Vec<MarkedNode> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(id, element)| {
                element.attribute(attribute).map(|attr| MarkedNode {
                    id,
                    key: decode_entities(&attr.value),
                })
            })
            .collect()
    }

    fn set_text(&mut self, id: usize, text: &str) -> bool {
        let Some(element) = self.elements.get(id) else {
            return false;
        };
        if element.content.is_none() {
            log::debug!(
                "<{}> at byte {} has no content to replace",
                element.name,
                element.tag.start
            );
            return false;
        }
        if self.is_detached(id) {
            return false;
        }
        self.edits.entry(id).or_default().text = Some(text.to_string());
        true
    }

    fn set_attribute(&mut self, id: usize, name: &str, value: &str) -> bool {
        if id >= self.elements.len() || self.is_detached(id) {
            return false;
        }
        upsert_attr(&mut self.edits.entry(id).or_default().attrs, name, value);
        true
    }

    fn set_lang(&mut self, locale: Locale) {
        self.lang = Some(locale);
    }
}

fn upsert_attr(attrs: &mut Vec<(String, String)>, name: &str, value: &str) {
    match attrs.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
        Some(existing) => existing.1 = value.to_string(),
        None => attrs.push((name.to_string(), value.to_string())),
    }
}

fn scan_elements(source: &str) -> Vec<Element> {
    let mut elements: Vec<Element> = Vec::new();
    let mut tokens: Vec<Token> = Vec::new();
    let mut pos = 0;

    while let Some(caps) = TOKEN_REGEX.captures_at(source, pos) {
        let Some(whole) = caps.get(0) else { break };
        pos = whole.end();
        if caps.name("comment").is_some() {
            continue;
        }

        let name = caps["name"].to_ascii_lowercase();
        if caps.name("end").is_some() {
            tokens.push(Token::End {
                name,
                start: whole.start(),
            });
            continue;
        }

        let attrs_match = caps.name("attrs");
        let attrs_offset = attrs_match.map_or(whole.start(), |m| m.start());
        let attrs = attrs_match
            .map(|m| parse_attributes(m.as_str(), attrs_offset))
            .unwrap_or_default();
        let attrs_end = attrs_match.map_or(whole.start() + 1 + name.len(), |m| m.end());
        let self_closing = caps.name("close").is_some();
        let is_void = VOID_ELEMENTS.contains(&name.as_str());

        if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            // Nothing up to the matching end tag is markup, comments included.
            pos = raw_text_end(source, pos, &name).unwrap_or(source.len());
        }

        elements.push(Element {
            name,
            tag: whole.range(),
            attrs_end,
            attrs,
            // Filled in below for elements that can have content.
            content: (!self_closing && !is_void).then_some(0..0),
        });
        tokens.push(Token::Start(elements.len() - 1));
    }

    match_end_tags(&mut elements, &tokens);
    elements
}

/// Byte offset of the end tag closing a raw text element opened before `from`.
fn raw_text_end(source: &str, from: usize, name: &str) -> Option<usize> {
    END_TAG_REGEX
        .captures_iter(&source[from..])
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(0))
        .map(|m| from + m.start())
}

/// Pair each start tag with its end tag, counting nested same-name tags.
fn match_end_tags(elements: &mut [Element], tokens: &[Token]) {
    for (pos, token) in tokens.iter().enumerate() {
        let Token::Start(id) = token else { continue };
        if elements[*id].content.is_none() {
            continue;
        }

        let name = elements[*id].name.clone();
        let mut depth = 0usize;
        let mut content = None;
        for later in &tokens[pos + 1..] {
            match later {
                Token::Start(other)
                    if elements[*other].name == name && elements[*other].content.is_some() =>
                {
                    depth += 1;
                }
                Token::End { name: end_name, start } if *end_name == name => {
                    if depth == 0 {
                        content = Some(elements[*id].tag.end..*start);
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        elements[*id].content = content;
    }
}

fn parse_attributes(text: &str, offset: usize) -> Vec<Attribute> {
    ATTR_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            Some(Attribute {
                name: caps[1].to_ascii_lowercase(),
                value: value.to_string(),
                span: (offset + whole.start())..(offset + whole.end()),
            })
        })
        .collect()
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
