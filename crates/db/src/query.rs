//! Parameterised `WHERE` clause builder for raw ledger queries.

use chrono::NaiveDate;
use sea_orm::{DbBackend, Statement, Value};
use tally_core::reports::LedgerSelection;

/// `AND`-joined SQL conditions with their bound values.
///
/// Columns are trusted identifiers; every value goes through a `?`
/// placeholder.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    clauses: Vec<String>,
    values: Vec<Value>,
}

impl Conditions {
    /// Creates an empty condition set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a literal clause with no bound values.
    #[must_use]
    pub fn raw(mut self, clause: &str) -> Self {
        self.clauses.push(clause.to_string());
        self
    }

    /// `column = ?`
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.clauses.push(format!("{column} = ?"));
        self.values.push(value.into());
        self
    }

    /// `column < ?`
    #[must_use]
    pub fn before(mut self, column: &str, date: NaiveDate) -> Self {
        self.clauses.push(format!("{column} < ?"));
        self.values.push(date.into());
        self
    }

    /// `column BETWEEN ? AND ?`
    #[must_use]
    pub fn between(mut self, column: &str, from: NaiveDate, to: NaiveDate) -> Self {
        self.clauses.push(format!("{column} BETWEEN ? AND ?"));
        self.values.push(from.into());
        self.values.push(to.into());
        self
    }

    /// `column IN (?, ...)`. An empty list adds nothing.
    #[must_use]
    pub fn is_in(self, column: &str, values: &[String]) -> Self {
        self.list(column, "IN", values)
    }

    /// `column NOT IN (?, ...)`. An empty list adds nothing.
    #[must_use]
    pub fn not_in(self, column: &str, values: &[String]) -> Self {
        self.list(column, "NOT IN", values)
    }

    fn list(mut self, column: &str, op: &str, values: &[String]) -> Self {
        if values.is_empty() {
            return self;
        }

        let placeholders = vec!["?"; values.len()].join(", ");
        self.clauses.push(format!("{column} {op} ({placeholders})"));
        self.values
            .extend(values.iter().map(|v| Value::from(v.clone())));
        self
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns true if no clause was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Renders ` WHERE a AND b`, or an empty string.
    #[must_use]
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Builds `{select}{where}{tail}` for MariaDB/MySQL.
    #[must_use]
    pub fn statement(self, select: &str, tail: &str) -> Statement {
        let sql = format!("{select}{}{tail}", self.where_clause());
        Statement::from_sql_and_values(DbBackend::MySql, sql, self.values)
    }
}

/// Company, non-cancelled, account and party restrictions of a GL selection.
/// The date restriction is left to the caller.
#[must_use]
pub fn gl_scope(selection: &LedgerSelection) -> Conditions {
    let mut conditions = Conditions::new()
        .eq("company", selection.period.company.clone())
        .raw("is_cancelled = 0")
        .is_in("account", &selection.accounts);

    if let Some(party) = &selection.party {
        conditions = conditions
            .eq("party_type", party.party_type.clone())
            .is_in("party", &party.parties);
    }

    conditions
}
