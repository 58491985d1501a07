//! Ordered query parameters for the advisory endpoints.

/// Field name → value mapping serialised into a GET query string.
///
/// Entries keep their insertion order. Absent and empty values are carried
/// along so callers can build a mapping straight from form fields, and are
/// only dropped when the query string is produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) -> &mut Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    pub fn with_optional(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Entries that will actually be sent.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(key, value)| match value.as_deref() {
            Some(value) if !value.is_empty() => Some((key.as_str(), value)),
            _ => None,
        })
    }

    pub fn to_query(&self) -> String {
        self.present()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
