//! Command-name enumerations supplied by a compiled schema directory.

/// One `name = value` entry of a command enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    /// Entry name, e.g. `load_res_req`.
    pub name: String,
    /// Declared numeric value.
    pub value: i64,
}

/// A named command enumeration, e.g. `GameSvrCmd`.
///
/// Entries keep their declaration order. Values are kept as declared; those
/// outside the `u16` command range are skipped when a table is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandEnumeration {
    name: String,
    entries: Vec<CommandEntry>,
}

impl CommandEnumeration {
    /// Creates an enumeration from `(name, value)` pairs.
    pub fn new<N, I>(name: impl Into<String>, entries: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, i64)>,
    {
        Self {
            name: name.into(),
            entries: entries
                .into_iter()
                .map(|(name, value)| CommandEntry {
                    name: name.into(),
                    value,
                })
                .collect(),
        }
    }

    /// Enumeration name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declaration_order() {
        let e = CommandEnumeration::new("GameSvrCmd", [("b_cmd", 2), ("a_cmd", 1)]);
        assert_eq!(e.name(), "GameSvrCmd");
        assert_eq!(e.len(), 2);
        assert_eq!(e.entries()[0].name, "b_cmd");
        assert_eq!(e.entries()[1].value, 1);
    }

    #[test]
    fn empty_enumeration() {
        let e = CommandEnumeration::new("ZoneSvrCmd", Vec::<(String, i64)>::new());
        assert!(e.is_empty());
    }
}
