//! In-progress SQL query state
//!
//! [`SqlQuery`] is the mutation target of the filter core: predicate
//! fragments, named parameter bindings, and joins are appended to it while
//! a request is processed. It also owns the per-query name generators, so
//! parameter names and join aliases are unique within one query and two
//! concurrent queries never share state.

/// A parameter binding, either a single value or a whole list for
/// set-membership predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    One(String),
    Many(Vec<String>),
}

/// A join added to the query.
///
/// Rendered in association form (`LEFT JOIN base.association alias`), the
/// way ORM-level query languages express relation joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub base_alias: String,
    pub association: String,
    pub alias: String,
}

/// Accumulates predicates, params, and joins for one query build.
///
/// The join registry guarantees at most one join per
/// (base alias, association) pair: repeated `join_once` calls return the
/// alias created the first time.
#[derive(Debug)]
pub struct SqlQuery {
    resource: String,
    root_alias: String,
    predicates: Vec<String>,
    params: Vec<(String, ParamValue)>,
    joins: Vec<Join>,
    param_counter: usize,
    alias_counter: usize,
}

impl SqlQuery {
    pub fn new(resource: &str, root_alias: &str) -> Self {
        Self {
            resource: resource.to_string(),
            root_alias: root_alias.to_string(),
            predicates: Vec::new(),
            params: Vec::new(),
            joins: Vec::new(),
            param_counter: 0,
            alias_counter: 0,
        }
    }

    pub fn root_alias(&self) -> &str {
        &self.root_alias
    }

    /// Append a predicate fragment; fragments are ANDed together.
    ///
    /// Fragments containing OR must arrive pre-parenthesized.
    pub fn push_predicate(&mut self, expr: String) {
        self.predicates.push(expr);
    }

    /// Bind a named parameter referenced as `:name` in a fragment.
    pub fn bind(&mut self, name: String, value: ParamValue) {
        self.params.push((name, value));
    }

    /// Generate a parameter name unique within this query.
    ///
    /// The hint (typically the field name) is sanitized so dotted or
    /// otherwise exotic property names still yield valid identifiers.
    pub fn fresh_param(&mut self, hint: &str) -> String {
        self.param_counter += 1;
        format!("{}_p{}", sanitize(hint), self.param_counter)
    }

    /// Request a join for `association` off `base_alias`, reusing the alias
    /// if that exact join already exists in this query.
    pub fn join_once(&mut self, base_alias: &str, association: &str) -> String {
        if let Some(join) = self
            .joins
            .iter()
            .find(|j| j.base_alias == base_alias && j.association == association)
        {
            return join.alias.clone();
        }

        self.alias_counter += 1;
        let alias = format!("{}_a{}", sanitize(association), self.alias_counter);
        self.joins.push(Join {
            base_alias: base_alias.to_string(),
            association: association.to_string(),
            alias: alias.clone(),
        });
        alias
    }

    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    pub fn params(&self) -> &[(String, ParamValue)] {
        &self.params
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// The WHERE clause body, or an empty string when nothing was added.
    pub fn where_clause(&self) -> String {
        self.predicates.join(" AND ")
    }

    /// Render the full query text for inspection and tests.
    pub fn to_sql(&self) -> String {
        let mut sql = format!(
            "SELECT {} FROM {} {}",
            self.root_alias, self.resource, self.root_alias
        );
        for join in &self.joins {
            sql.push_str(&format!(
                " LEFT JOIN {}.{} {}",
                join.base_alias, join.association, join.alias
            ));
        }
        if !self.predicates.is_empty() {
            sql.push_str(&format!(" WHERE {}", self.where_clause()));
        }
        sql
    }
}

/// Keep alphanumerics and underscores; everything else becomes `_`.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_params_are_unique_per_query() {
        let mut query = SqlQuery::new("book", "o");
        assert_eq!(query.fresh_param("title"), "title_p1");
        assert_eq!(query.fresh_param("title"), "title_p2");
        assert_eq!(query.fresh_param("author.name"), "author_name_p3");
    }

    #[test]
    fn join_once_deduplicates() {
        let mut query = SqlQuery::new("book", "o");
        let first = query.join_once("o", "author");
        let second = query.join_once("o", "author");
        assert_eq!(first, second);
        assert_eq!(query.joins().len(), 1);

        // Same association off a different base alias is a distinct join.
        let nested = query.join_once(&first, "publisher");
        assert_ne!(nested, first);
        assert_eq!(query.joins().len(), 2);
    }

    #[test]
    fn to_sql_without_predicates() {
        let query = SqlQuery::new("book", "o");
        assert_eq!(query.to_sql(), "SELECT o FROM book o");
    }

    #[test]
    fn to_sql_with_join_and_predicates() {
        let mut query = SqlQuery::new("book", "o");
        let alias = query.join_once("o", "author");
        let param = query.fresh_param("name");
        query.push_predicate(format!("{}.name = :{}", alias, param));
        query.bind(param, ParamValue::One("it".to_string()));

        assert_eq!(
            query.to_sql(),
            "SELECT o FROM book o LEFT JOIN o.author author_a1 WHERE author_a1.name = :name_p1"
        );
        assert_eq!(
            query.params(),
            &[("name_p1".to_string(), ParamValue::One("it".to_string()))]
        );
    }

    #[test]
    fn predicates_join_with_and() {
        let mut query = SqlQuery::new("book", "o");
        query.push_predicate("o.a = :a_p1".to_string());
        query.push_predicate("o.b = :b_p2".to_string());
        assert_eq!(query.where_clause(), "o.a = :a_p1 AND o.b = :b_p2");
    }
}
