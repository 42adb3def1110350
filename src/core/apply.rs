use super::{Dictionary, Locale};

/// Attribute names that mark nodes for translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerAttributes {
    /// Holds the key whose translation replaces the node's text.
    pub text: String,
    /// Holds the key whose translation replaces the `placeholder` attribute.
    pub placeholder: String,
}

impl Default for MarkerAttributes {
    fn default() -> Self {
        Self {
            text: "data-i18n".to_string(),
            placeholder: "data-i18n-placeholder".to_string(),
        }
    }
}

/// A node carrying a marker attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedNode {
    /// Adapter-specific handle, passed back when writing.
    pub id: usize,
    pub key: String,
}

/// The adapter seam between the resolver and a concrete document model.
pub trait TranslationTarget {
    /// Nodes carrying `attribute`, in document order.
    fn marked_nodes(&self, attribute: &str) -> Vec<MarkedNode>;

    /// Replace the node's text. Returns `false` when the write cannot show
    /// up in the document, e.g. the node sits inside replaced text.
    fn set_text(&mut self, id: usize, text: &str) -> bool;

    /// Set an attribute, with the same return contract as [`Self::set_text`].
    fn set_attribute(&mut self, id: usize, name: &str, value: &str) -> bool;

    /// Record the active language on the document root, if there is one.
    fn set_lang(&mut self, _locale: Locale) {}
}

/// What [`apply_all`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub texts_applied: usize,
    pub placeholders_applied: usize,
    /// Translated nodes whose write the target dropped.
    pub detached: usize,
    /// Keys that resolved to themselves and were left showing as-is.
    pub untranslated: Vec<String>,
}

impl ApplyReport {
    pub fn applied(&self) -> usize {
        self.texts_applied + self.placeholders_applied
    }
}

/// Write every resolvable marked key into `target`.
///
/// A node is only touched when its key resolves to something other than
/// the key itself. Nothing here can fail, whatever shape the dictionary has.
pub fn apply_all<T: TranslationTarget + ?Sized>(
    target: &mut T,
    dictionary: &Dictionary,
    markers: &MarkerAttributes,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    for node in target.marked_nodes(&markers.text) {
        let translated = dictionary.resolve(&node.key);
        if translated == node.key {
            report.untranslated.push(node.key);
        } else if target.set_text(node.id, translated) {
            report.texts_applied += 1;
        } else {
            report.detached += 1;
        }
    }

    for node in target.marked_nodes(&markers.placeholder) {
        let translated = dictionary.resolve(&node.key);
        if translated == node.key {
            report.untranslated.push(node.key);
        } else if target.set_attribute(node.id, "placeholder", translated) {
            report.placeholders_applied += 1;
        } else {
            report.detached += 1;
        }
    }

    report
}
