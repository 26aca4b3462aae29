//! Row filters in the remote store's query language.
//!
//! A `Query` collects the projection, filters, ordering and paging of one
//! request. The PostgREST backend renders it to URL query pairs; the memory
//! backend evaluates it directly.

use std::fmt::Display;

/// `column = value`, the only comparison the repositories issue.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Display) -> Self {
        Self {
            column: column.into(),
            value: value.to_string(),
        }
    }

    /// `eq.value`, the right-hand side of a top-level filter pair.
    pub fn render(&self) -> String {
        format!("eq.{}", self.value)
    }

    /// `column.eq.value`, the form used inside `or=(...)`.
    fn render_nested(&self) -> String {
        format!("{}.eq.{}", self.column, quote_reserved(&self.value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub select: Option<String>,
    pub filters: Vec<Filter>,
    /// Each group matches when any of its filters matches.
    pub any_of: Vec<Vec<Filter>>,
    pub order: Vec<Order>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = Some(columns.into());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.filter(Filter::eq(column, value))
    }

    pub fn or(mut self, filters: Vec<Filter>) -> Self {
        self.any_of.push(filters);
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// URL query pairs in PostgREST syntax. Values are not percent-encoded here.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(select) = &self.select {
            pairs.push(("select".to_string(), compact_select(select)));
        }

        for filter in &self.filters {
            pairs.push((filter.column.clone(), filter.render()));
        }

        for group in &self.any_of {
            let parts: Vec<String> = group.iter().map(Filter::render_nested).collect();
            pairs.push(("or".to_string(), format!("({})", parts.join(","))));
        }

        if !self.order.is_empty() {
            let parts: Vec<String> = self
                .order
                .iter()
                .map(|o| format!("{}.{}", o.column, if o.ascending { "asc" } else { "desc" }))
                .collect();
            pairs.push(("order".to_string(), parts.join(",")));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }

        pairs
    }
}

/// Wrap a value in double quotes when it contains characters reserved by the
/// filter grammar.
fn quote_reserved(value: &str) -> String {
    const RESERVED: &[char] = &[',', '.', ':', '(', ')', '"', '\\', ' '];
    if value.contains(RESERVED) {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escaped)
    } else {
        value.to_string()
    }
}

/// Strip the whitespace callers use to lay out multi-line select strings.
fn compact_select(select: &str) -> String {
    select.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_filters_order_and_paging() {
        let query = Query::new()
            .select("*, landlord:landlords!landlord_id(*)")
            .eq("status", "available")
            .order("created_at", false)
            .limit(20)
            .offset(40);

        assert_eq!(
            query.to_pairs(),
            vec![
                ("select".to_string(), "*,landlord:landlords!landlord_id(*)".to_string()),
                ("status".to_string(), "eq.available".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "20".to_string()),
                ("offset".to_string(), "40".to_string()),
            ]
        );
    }

    #[test]
    fn test_renders_or_groups() {
        let query = Query::new().or(vec![
            Filter::eq("tenant_id", "abc"),
            Filter::eq("landlord_id", "abc"),
        ]);

        assert_eq!(
            query.to_pairs(),
            vec![(
                "or".to_string(),
                "(tenant_id.eq.abc,landlord_id.eq.abc)".to_string()
            )]
        );
    }

    #[test]
    fn test_quotes_reserved_values_inside_or() {
        let query = Query::new().or(vec![Filter::eq("name", "a,b")]);
        assert_eq!(
            query.to_pairs(),
            vec![("or".to_string(), "(name.eq.\"a,b\")".to_string())]
        );
    }
}
