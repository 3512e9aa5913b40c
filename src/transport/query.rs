use urlencoding::encode;

/// Builds a query string from optional parameters.
///
/// Absent values are left out entirely; present values are percent-encoded.
/// Returns an empty string when nothing is present, otherwise `?k=v&...`.
#[derive(Debug, Default, Clone)]
pub struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &'static str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_path(&self, path: &str) -> String {
        format!("{}{}", path, self.render())
    }

    fn render(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }

        let joined = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{joined}")
    }
}
