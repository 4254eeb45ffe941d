//! Render option values and the ordered option mapping.

use std::borrow::Cow;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single render option value.
///
/// Serializes to JSON as the bare value (`"png"`, `true`, `1280`, `["a", "b"]`).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Free-form text, e.g. a URL or a CSS selector
    Text(String),
    /// Flag such as `full_page`
    Bool(bool),
    /// Whole number such as `width`
    Integer(i64),
    /// Fractional number such as `quality` or `delay`
    Float(f64),
    /// Repeated entries such as `header`
    List(Vec<String>),
}

impl OptionValue {
    /// Returns the value as it appears in a query string.
    ///
    /// Sequences contribute only their last element; an empty sequence
    /// contributes nothing and the key is left out of the query.
    #[must_use]
    pub fn query_value(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s)),
            Self::Bool(b) => Some(Cow::Owned(b.to_string())),
            Self::Integer(n) => Some(Cow::Owned(n.to_string())),
            Self::Float(n) => Some(Cow::Owned(n.to_string())),
            Self::List(items) => items.last().map(|s| Cow::Borrowed(s.as_str())),
        }
    }

    /// Returns the text if this is a [`OptionValue::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Ordered mapping of render option names to values.
///
/// Keys are owned strings; anything string-like converts into the same
/// key. Entries keep their first-insertion position, which matters because
/// the URL-encoded form of this mapping is what gets signed.
///
/// # Example
///
/// ```
/// use urlbox::options::RenderOptions;
///
/// let options = RenderOptions::new()
///     .with("url", "https://example.com")
///     .with("full_page", true)
///     .with(String::from("width"), 1280);
///
/// assert_eq!(
///     options.to_query_string(),
///     "url=https%3A%2F%2Fexample.com&full_page=true&width=1280"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    entries: Vec<(String, OptionValue)>,
}

impl RenderOptions {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds an option, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts an option and returns the previous value for that key.
    ///
    /// Replacing an existing key keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        let key = key.into();
        let value = value.into();

        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(existing, value));
        }

        self.entries.push((key, value));
        None
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Encodes the options as `application/x-www-form-urlencoded`.
    ///
    /// Keys are emitted in insertion order, so equal mappings always
    /// produce identical bytes.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());

        for (key, value) in &self.entries {
            if let Some(rendered) = value.query_value() {
                serializer.append_pair(key, &rendered);
            }
        }

        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for RenderOptions
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

impl Serialize for RenderOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
