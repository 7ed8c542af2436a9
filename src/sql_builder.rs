//! SQL builder with parameterized query construction.
//!
//! Values go through DuckDB's parameter binding (`?` placeholders), never
//! through string interpolation. Builder methods return `&mut Self` for
//! chaining. Common table expressions are nested builders, so a multi-stage
//! aggregation reads top to bottom the way it executes.
//!
//! # Example
//!
//! ```rust
//! use vendor_summary::SqlBuilder;
//! let mut freight = SqlBuilder::new("vendor_invoice");
//! freight
//!     .select(&["VendorNumber", "SUM(Freight) AS FreightCost"])
//!     .group_by(&["VendorNumber"]);
//! let (sql, params) = SqlBuilder::new("FreightSummary")
//!     .with("FreightSummary", &freight)
//!     .order_by(&["FreightCost DESC"])
//!     .limit(10)
//!     .build();
//! assert!(sql.starts_with("WITH FreightSummary AS ("));
//! assert!(params.is_empty());
//! ```

/// Builds parameterized SQL queries safely.
#[derive(Debug, Clone)]
pub struct SqlBuilder {
    ctes: Vec<(String, String)>,
    cte_params: Vec<String>,
    select_cols: Vec<String>,
    from_table: String,
    joins: Vec<String>,
    where_clauses: Vec<String>,
    params: Vec<String>,
    group_by_cols: Vec<String>,
    order_by_cols: Vec<String>,
    limit_val: Option<usize>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table, view or CTE name.
    ///
    /// An alias may be included, e.g. `"purchases p"`.
    pub fn new(table: &str) -> Self {
        Self {
            ctes: Vec::new(),
            cte_params: Vec::new(),
            select_cols: vec!["*".to_string()],
            from_table: table.to_string(),
            joins: Vec::new(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            group_by_cols: Vec::new(),
            order_by_cols: Vec::new(),
            limit_val: None,
        }
    }

    /// Prepend a named common table expression built by another builder.
    ///
    /// The inner builder's parameters are bound before this builder's own.
    pub fn with(&mut self, name: &str, query: &SqlBuilder) -> &mut Self {
        let (sql, params) = query.build();
        self.ctes.push((name.to_string(), sql));
        self.cte_params.extend(params);
        self
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add a JOIN clause.
    ///
    /// The clause should be a full JOIN expression, e.g.
    /// `"JOIN purchase_prices pp ON p.Brand = pp.Brand"`.
    pub fn join(&mut self, clause: &str) -> &mut Self {
        self.joins.push(clause.to_string());
        self
    }

    /// Add a WHERE condition with `?` placeholders for each param.
    pub fn where_clause(&mut self, condition: &str, params: &[&str]) -> &mut Self {
        self.where_clauses.push(condition.to_string());
        self.params.extend(params.iter().map(|p| p.to_string()));
        self
    }

    /// Add an equality condition: `{column} = ?`.
    pub fn where_eq(&mut self, column: &str, value: &str) -> &mut Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.params.push(value.to_string());
        self
    }

    /// Add GROUP BY columns.
    pub fn group_by(&mut self, cols: &[&str]) -> &mut Self {
        self.group_by_cols.extend(cols.iter().map(|c| c.to_string()));
        self
    }

    /// Add ORDER BY clauses (e.g. `"TotalPurchaseDollars DESC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols.extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    /// Set the maximum number of rows to return.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    /// Build the final SQL string and parameter list.
    pub fn build(&self) -> (String, Vec<String>) {
        let mut parts = Vec::new();

        if !self.ctes.is_empty() {
            let ctes: Vec<String> = self
                .ctes
                .iter()
                .map(|(name, sql)| format!("{} AS (\n{}\n)", name, sql))
                .collect();
            parts.push(format!("WITH {}", ctes.join(",\n")));
        }

        parts.push(format!("SELECT {}", self.select_cols.join(", ")));
        parts.push(format!("FROM {}", self.from_table));

        for j in &self.joins {
            parts.push(j.clone());
        }

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }

        if !self.group_by_cols.is_empty() {
            parts.push(format!("GROUP BY {}", self.group_by_cols.join(", ")));
        }

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        if let Some(n) = self.limit_val {
            parts.push(format!("LIMIT {}", n));
        }

        let mut params = self.cte_params.clone();
        params.extend(self.params.iter().cloned());
        (parts.join("\n"), params)
    }
}
