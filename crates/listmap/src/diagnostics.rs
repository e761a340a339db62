use core::fmt;

/// The warning shown next to a list which has duplicate keys.
pub const DUPLICATE_KEYS_WARNING: &str = "Duplicate keys will not be serialized.";

/// A report on the state of a [`ListMap`](crate::ListMap)'s list.
///
/// This is what a tool displaying the list needs: how many rows it has, and
/// which of them are not part of the map.
///
/// Created by [`ListMap::diagnostics`](crate::ListMap::diagnostics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    /// The number of rows in the list, duplicates included.
    pub rows: usize,
    /// The number of distinct keys in the map.
    pub distinct_keys: usize,
    /// Whether the list holds repeated keys or rows without a key.
    pub has_duplicate_keys: bool,
    /// Positions of the rows which are not part of the map, ascending.
    pub rejected_rows: Vec<usize>,
}

impl Diagnostics {
    /// Returns the warning to display for this list, if any.
    pub fn warning(&self) -> Option<&'static str> {
        if self.has_duplicate_keys {
            Some(DUPLICATE_KEYS_WARNING)
        } else {
            None
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows, {} distinct keys", self.rows, self.distinct_keys)?;
        if !self.rejected_rows.is_empty() {
            let rows = self
                .rejected_rows
                .iter()
                .map(|row| row.to_string())
                .collect::<Vec<_>>();
            write!(f, ", rejected rows: {}", rows.join(", "))?;
        }
        if let Some(warning) = self.warning() {
            write!(f, "\n{warning}")?;
        }
        Ok(())
    }
}
