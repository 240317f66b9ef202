//! Partial-update SET fragment builder.

use super::FieldMap;
use crate::error::{ModelError, ModelResult};
use tokio_postgres::types::ToSql;

/// Builds the `SET` fragment of a partial `UPDATE` from a sparse payload.
///
/// Each assignment is emitted in insertion order as `"column" = $n`, where
/// the column name is resolved through a [`FieldMap`] and `n` is the 1-based
/// position of the assignment. The fragment knows nothing about the
/// surrounding statement; the caller appends its `WHERE`-key placeholder at
/// [`SetFragment::next_index`].
///
/// # Example
///
/// ```ignore
/// let mut set = SetFragment::new(COMPANY_FIELDS);
/// set.set("name", "Acme Widgets")
///     .set_opt("numEmployees", Some(50));
///
/// let sql = format!(
///     "UPDATE companies SET {} WHERE handle = ${}",
///     set.clause()?,
///     set.next_index(),
/// );
/// let mut params = set.params_ref();
/// params.push(&handle);
/// ```
pub struct SetFragment {
    /// Attribute-to-column translation table
    map: FieldMap,
    /// `"column" = $n` assignments, in insertion order
    assignments: Vec<String>,
    /// Parameter values, parallel to `assignments`
    params: Vec<Box<dyn ToSql + Sync + Send>>,
}

impl SetFragment {
    /// Create an empty fragment using the given translation table.
    pub fn new(map: FieldMap) -> Self {
        Self {
            map,
            assignments: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Assign a column, binding the value at the next placeholder.
    pub fn set<T>(&mut self, attr: &str, value: T) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        let index = self.params.len() + 1;
        self.assignments
            .push(format!("\"{}\" = ${}", self.map.column(attr), index));
        self.params.push(Box::new(value));
        self
    }

    /// Assign an optional column (`None` => field left untouched).
    pub fn set_opt<T>(&mut self, attr: &str, value: Option<T>) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        if let Some(v) = value {
            self.set(attr, v);
        }
        self
    }

    /// Whether any assignment has been pushed.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of assignments (and parameters) in the fragment.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// The next free placeholder index.
    ///
    /// An `UPDATE ... WHERE key = $n` caller binds its key here, after the
    /// assignment parameters.
    pub fn next_index(&self) -> usize {
        self.params.len() + 1
    }

    /// Build the `SET` clause body (without the `SET` keyword).
    ///
    /// Fails with [`ModelError::EmptyPayload`] when nothing was assigned; an
    /// empty update is a caller error and no statement may be issued for it.
    pub fn clause(&self) -> ModelResult<String> {
        if self.assignments.is_empty() {
            return Err(ModelError::EmptyPayload);
        }
        Ok(self.assignments.join(", "))
    }

    /// Get parameter references for tokio-postgres, in assignment order.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|v| &**v as &(dyn ToSql + Sync))
            .collect()
    }
}
