//! Table query model
//!
//! A [`Select`] names a table, an optional column projection, equality
//! filters, related-table embeds and an ordering. Every adapter interprets
//! the same model, and the REST adapter renders it into PostgREST query
//! parameters via [`Select::to_params`].

use serde_json::Value;

/// A row as exchanged with the store: a JSON object
pub type Row = Value;

/// Sort direction for one ordering column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// One ordering term
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Descending,
        }
    }

    fn to_param(&self) -> String {
        match self.direction {
            Direction::Ascending => format!("{}.asc", self.column),
            Direction::Descending => format!("{}.desc", self.column),
        }
    }
}

/// Equality filter on a single column
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether a row satisfies the filter; a missing column reads as null
    pub fn matches(&self, row: &Row) -> bool {
        row.get(&self.column).unwrap_or(&Value::Null) == &self.value
    }

    /// PostgREST operator form, e.g. `eq.open` or `is.null`
    pub fn to_param(&self) -> (String, String) {
        let operand = match &self.value {
            Value::Null => "is.null".to_string(),
            Value::String(s) => format!("eq.{}", s),
            other => format!("eq.{}", other),
        };
        (self.column.clone(), operand)
    }
}

/// A related row pulled in through a foreign key
///
/// `customer:security_customers(id,name)` in PostgREST terms: the row of
/// `table` whose `id` equals this row's `foreign_key` is attached under
/// `alias`.
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub alias: String,
    pub table: String,
    pub foreign_key: String,
    pub columns: Vec<String>,
}

impl Embed {
    pub fn new(
        alias: impl Into<String>,
        table: impl Into<String>,
        foreign_key: impl Into<String>,
        columns: &[&str],
    ) -> Self {
        Self {
            alias: alias.into(),
            table: table.into(),
            foreign_key: foreign_key.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn to_param(&self) -> String {
        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(",")
        };
        format!("{}:{}({})", self.alias, self.table, columns)
    }
}

/// A read against one table
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    /// Empty means every column
    pub columns: Vec<String>,
    pub embeds: Vec<Embed>,
    pub filters: Vec<Filter>,
    pub order: Vec<OrderBy>,
}

impl Select {
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            embeds: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Shorthand for an equality filter
    pub fn eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Filter::eq(column, value))
    }

    /// Adds the filter only when a value is given
    pub fn eq_opt<V: Into<Value>>(self, column: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.eq(column, value),
            None => self,
        }
    }

    pub fn order(mut self, order: OrderBy) -> Self {
        self.order.push(order);
        self
    }

    /// Whether a row passes every filter
    pub fn matches(&self, row: &Row) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    /// The `select=` parameter value
    pub fn select_param(&self) -> String {
        let mut parts = if self.columns.is_empty() {
            vec!["*".to_string()]
        } else {
            self.columns.clone()
        };
        parts.extend(self.embeds.iter().map(Embed::to_param));
        parts.join(",")
    }

    /// Query parameters for a PostgREST GET
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select_param())];
        params.extend(self.filters.iter().map(Filter::to_param));
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(OrderBy::to_param)
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), order));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_for_ticket_listing() {
        let select = Select::from("security_service_tickets")
            .embed(Embed::new(
                "customer",
                "security_customers",
                "customer_id",
                &["id", "name", "email", "phone"],
            ))
            .eq("status", "open")
            .order(OrderBy::desc("created_at"))
            .order(OrderBy::desc("id"));

        assert_eq!(
            select.to_params(),
            vec![
                (
                    "select".to_string(),
                    "*,customer:security_customers(id,name,email,phone)".to_string()
                ),
                ("status".to_string(), "eq.open".to_string()),
                ("order".to_string(), "created_at.desc,id.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_projection_and_null_filter() {
        let select = Select::from("security_admin_users")
            .columns(&["id", "email"])
            .filter(Filter::eq("name", Value::Null));

        let params = select.to_params();
        assert_eq!(params[0].1, "id,email");
        assert_eq!(params[1], ("name".to_string(), "is.null".to_string()));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_filter_matching() {
        let row = json!({ "status": "open", "count": 3 });

        assert!(Filter::eq("status", "open").matches(&row));
        assert!(!Filter::eq("status", "closed").matches(&row));
        assert!(Filter::eq("count", 3).matches(&row));
        assert!(Filter::eq("missing", Value::Null).matches(&row));
    }

    #[test]
    fn test_eq_opt_skips_none() {
        let select = Select::from("security_leads").eq_opt::<&str>("status", None);
        assert!(select.filters.is_empty());

        let select = Select::from("security_leads").eq_opt("status", Some("won"));
        assert_eq!(select.filters, vec![Filter::eq("status", "won")]);
    }
}
