//! SQL fragment builders shared by the entity models.
//!
//! The models build their statements from two fragment shapes: a partial
//! `SET` fragment for sparse updates ([`SetFragment`]) and a conjunctive
//! `WHERE` fragment for filtered searches ([`WhereFragment`]).
//!
//! ## Design
//!
//! - SQL is still explicit (strings), but the dynamic parts are structured.
//! - Placeholders are managed automatically ($1, $2, ...), and every
//!   fragment exposes the next free placeholder index so callers can append
//!   their own clauses without off-by-one arithmetic.
//! - Values are bound, never interpolated; builders perform no escaping.

pub mod set_fragment;
pub mod where_fragment;

pub use set_fragment::SetFragment;
pub use where_fragment::WhereFragment;


/// Translation table from external attribute names to storage column names.
///
/// Attributes absent from the table fall back to their own name, so only
/// fields whose API spelling differs from the column need an entry:
///
/// ```ignore
/// static COMPANY_FIELDS: FieldMap = FieldMap::new(&[
///     ("numEmployees", "num_employees"),
///     ("logoUrl", "logo_url"),
/// ]);
/// assert_eq!(COMPANY_FIELDS.column("numEmployees"), "num_employees");
/// assert_eq!(COMPANY_FIELDS.column("name"), "name");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldMap {
    /// A table with no entries; every attribute maps to itself.
    pub const EMPTY: FieldMap = FieldMap::new(&[]);

    /// Create a translation table from `(attribute, column)` pairs.
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Resolve the storage column for an attribute, falling back to the
    /// attribute name itself when no entry exists.
    pub fn column<'a>(&self, attr: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(name, _)| *name == attr)
            .map(|(_, column)| *column)
            .unwrap_or(attr)
    }
}
