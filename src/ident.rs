//! Lookup identifiers for `find`-style operations.

use std::fmt;

/// Identifier accepted by `find`-style lookups.
///
/// Procore records are addressed either by their numeric `id` or by a
/// human-friendly name field (`name` for companies and projects, `title`
/// for generic tools). The two lookup modes are explicit variants rather
/// than an untyped parameter, so a lookup always matches exactly one
/// field.
///
/// # Example
///
/// ```
/// use procore_api::Ident;
///
/// let by_id: Ident = 42.into();
/// let by_name: Ident = "Sandbox Test Project".into();
/// assert!(matches!(by_id, Ident::Id(42)));
/// assert!(matches!(by_name, Ident::Name(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ident {
    /// Match against the record's numeric `id`.
    Id(u64),
    /// Match against the record's name-like field.
    Name(String),
}

impl From<u64> for Ident {
    fn from(id: u64) -> Self {
        Ident::Id(id)
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::Name(name.to_string())
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Ident::Name(name)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ident::Id(id) => write!(f, "{id}"),
            Ident::Name(name) => f.write_str(name),
        }
    }
}
