//! The authoritative naming catalog: table names mapped to their column names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Table name to column names, as read from a data dictionary file.
///
/// Keys and values are stored trimmed. Tables iterate in sorted order, which is
/// also the order table lookups try them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataDictionary {
    tables: BTreeMap<String, Vec<String>>,
}

impl DataDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column to a table, creating the table on first use.
    ///
    /// Blank table or column names are ignored.
    pub fn push_column(&mut self, table: &str, column: &str) {
        let table = table.trim();
        let column = column.trim();
        if table.is_empty() || column.is_empty() {
            return;
        }
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(column.to_string());
    }

    /// Table names in lookup order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Column names of a table, in dictionary row order.
    pub fn columns(&self, table: &str) -> Option<&[String]> {
        self.tables.get(table).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.tables
            .iter()
            .map(|(table, columns)| (table.as_str(), columns.as_slice()))
    }
}

impl FromIterator<(String, Vec<String>)> for DataDictionary {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for (table, columns) in iter {
            for column in columns {
                dictionary.push_column(&table, &column);
            }
        }
        dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_groups_columns() {
        let mut dictionary = DataDictionary::new();
        dictionary.push_column(" users ", " id ");
        dictionary.push_column("users", "first_name");
        dictionary.push_column("accounts", "id");
        dictionary.push_column("", "orphan");
        dictionary.push_column("users", "  ");

        assert_eq!(dictionary.table_names(), vec!["accounts", "users"]);
        assert_eq!(
            dictionary.columns("users"),
            Some(&["id".to_string(), "first_name".to_string()][..])
        );
        assert!(dictionary.columns("missing").is_none());
    }
}
