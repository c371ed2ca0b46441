use std::collections::HashMap;

/// One CSV record keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    /// Build a row by pairing header names with record values.
    ///
    /// Values past the last header are dropped; headers past the last
    /// value are left unset and read back as empty.
    pub fn from_record<'a, H, V>(headers: H, values: V) -> Self
    where
        H: IntoIterator<Item = &'a str>,
        V: IntoIterator<Item = &'a str>,
    {
        let cells = headers
            .into_iter()
            .zip(values)
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        Self { cells }
    }

    /// Cell value for `column`, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map_or("", String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
