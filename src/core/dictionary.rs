use serde_json::{Map, Value};

/// A per-locale translation dictionary.
///
/// The dictionary holds whatever JSON the translations endpoint returned.
/// Objects map keys to nested dictionaries or leaf strings; any other shape
/// (including `null`) is tolerated and simply resolves nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    root: Value,
}

/// One resolvable key path and its translated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub key: String,
    pub value: String,
}

impl Dictionary {
    /// The empty dictionary `{}`.
    pub fn empty() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content).map(Self::from_value)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Translate `key_path`, falling back to the key path itself.
    pub fn resolve<'a>(&'a self, key_path: &'a str) -> &'a str {
        resolve(&self.root, key_path)
    }

    pub fn lookup(&self, key_path: &str) -> Option<&str> {
        lookup(&self.root, key_path)
    }

    /// Number of resolvable key paths.
    pub fn len(&self) -> usize {
        self.flatten().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All resolvable key paths in document order.
    pub fn flatten(&self) -> Vec<FlatEntry> {
        let mut entries = Vec::new();
        flatten_value(&self.root, String::new(), &mut entries);
        entries
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for Dictionary {
    fn from(root: Value) -> Self {
        Self::from_value(root)
    }
}

/// Resolve a dotted key path against a dictionary tree.
///
/// Returns the translated string, or `key_path` unchanged when any segment
/// is missing, an intermediate node is not a container, or the terminal
/// value is not a string. Output equal to input is the not-found marker.
pub fn resolve<'a>(root: &'a Value, key_path: &'a str) -> &'a str {
    lookup(root, key_path).unwrap_or(key_path)
}

/// Walk `key_path` and return the terminal string, if there is one.
pub fn lookup<'a>(root: &'a Value, key_path: &str) -> Option<&'a str> {
    let mut current = root;
    for segment in key_path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(array_index(segment)?)?,
            _ => return None,
        };
    }
    current.as_str()
}

/// Arrays are addressed by canonical decimal indices only ("0", "12"),
/// never by forms like "01" or "+1".
fn array_index(segment: &str) -> Option<usize> {
    let index: usize = segment.parse().ok()?;
    (index.to_string() == segment).then_some(index)
}

fn flatten_value(value: &Value, prefix: String, result: &mut Vec<FlatEntry>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_value(val, join_key(&prefix, key), result);
            }
        }
        Value::Array(items) => {
            for (index, val) in items.iter().enumerate() {
                flatten_value(val, join_key(&prefix, &index.to_string()), result);
            }
        }
        // A bare string at the root has no key path that reaches it.
        Value::String(s) if !prefix.is_empty() => {
            result.push(FlatEntry {
                key: prefix,
                value: s.clone(),
            });
        }
        _ => {}
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
