//! Conjunctive WHERE fragment builder for filtered searches.

use tokio_postgres::types::ToSql;

/// Builds the body of a `WHERE` clause from optional filter predicates.
///
/// Conditions are joined with `AND` and bind their values at automatically
/// numbered placeholders. When no condition is added, [`WhereFragment::clause`]
/// returns an empty string and the caller omits the `WHERE` keyword entirely.
pub struct WhereFragment {
    /// Conditions (without leading AND)
    conditions: Vec<String>,
    /// Parameter values, in placeholder order
    params: Vec<Box<dyn ToSql + Sync + Send>>,
    /// Current parameter counter (starts from offset)
    param_count: usize,
}

impl std::fmt::Debug for WhereFragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhereFragment")
            .field("conditions", &self.conditions)
            .field("params", &format_args!("[{} values]", self.params.len()))
            .field("param_count", &self.param_count)
            .finish()
    }
}

impl WhereFragment {
    /// Create a fragment with placeholder numbering starting at `$1`.
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Create a fragment with placeholder numbering starting after `offset`.
    ///
    /// For example, `with_offset(2)` makes the first condition bind `$3`.
    pub fn with_offset(offset: usize) -> Self {
        Self {
            conditions: Vec::new(),
            params: Vec::new(),
            param_count: offset,
        }
    }

    fn add_condition<T>(&mut self, sql_template: &str, value: T)
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.param_count += 1;
        let placeholder = format!("${}", self.param_count);
        self.conditions
            .push(sql_template.replacen('$', &placeholder, 1));
        self.params.push(Box::new(value));
    }

    /// Add a case-insensitive contains match on a text column.
    ///
    /// The needle is wrapped with `%` wildcards before binding, so the
    /// emitted condition is `col ILIKE $n` with value `%needle%`.
    pub fn and_contains(&mut self, col: &str, needle: &str) -> &mut Self {
        self.add_condition(&format!("{} ILIKE $", col), format!("%{}%", needle));
        self
    }

    /// Add an inclusive lower bound: `col >= $n`.
    pub fn and_gte<T>(&mut self, col: &str, val: T) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.add_condition(&format!("{} >= $", col), val);
        self
    }

    /// Add an inclusive upper bound: `col <= $n`.
    pub fn and_lte<T>(&mut self, col: &str, val: T) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.add_condition(&format!("{} <= $", col), val);
        self
    }

    /// Add a condition with no bound parameter.
    ///
    /// # Safety
    ///
    /// This directly concatenates SQL. The caller must ensure safety.
    pub fn and_raw(&mut self, sql: &str) -> &mut Self {
        self.conditions.push(sql.to_string());
        self
    }

    // ==================== Option-friendly helpers ====================

    pub fn and_contains_opt(&mut self, col: &str, needle: Option<&str>) -> &mut Self {
        if let Some(n) = needle {
            self.and_contains(col, n);
        }
        self
    }

    pub fn and_gte_opt<T>(&mut self, col: &str, val: Option<T>) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        if let Some(v) = val {
            self.and_gte(col, v);
        }
        self
    }

    pub fn and_lte_opt<T>(&mut self, col: &str, val: Option<T>) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        if let Some(v) = val {
            self.and_lte(col, v);
        }
        self
    }

    /// Check if any condition has been added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// The next free placeholder index.
    pub fn next_index(&self) -> usize {
        self.param_count + 1
    }

    /// Build the clause body (without the `WHERE` keyword).
    ///
    /// Empty when no condition was added; never a dangling `AND`.
    pub fn clause(&self) -> String {
        self.conditions.join(" AND ")
    }

    /// Get parameter references for tokio-postgres, in placeholder order.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|v| &**v as &(dyn ToSql + Sync))
            .collect()
    }
}

impl Default for WhereFragment {
    fn default() -> Self {
        Self::new()
    }
}
