//! Builds parameterized SELECT, INSERT, UPDATE, DELETE and search statements for one entity table.
//! Identifiers come from `EntityDef` and the sort whitelist only; every user value is a parameter.

use crate::entity::EntityDef;
use crate::model::{Pagination, Person, SortBy, SortColumn};
use crate::sql::params::SqlParam;

/// Column list shared by every read, in `Person` field order.
const COLUMNS: &str = "id, firstname, lastname, year";

/// Quote an identifier for PostgreSQL, doubling embedded quotes.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    fn push_param(&mut self, v: impl Into<SqlParam>) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v.into());
        n
    }
}

/// Escape LIKE metacharacters so the input matches as a literal substring.
pub fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Every row, in whatever order the database returns them.
pub fn select_all(entity: &EntityDef) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", COLUMNS, quoted(entity.table));
    q
}

/// SELECT by primary key.
pub fn select_by_id(entity: &EntityDef, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("SELECT {} FROM {} WHERE id = ${}", COLUMNS, quoted(entity.table), n);
    q
}

/// INSERT without id; the database assigns it and hands it back.
pub fn insert(entity: &EntityDef, person: &Person) -> QueryBuf {
    let mut q = QueryBuf::new();
    let first = q.push_param(person.first_name.as_str());
    let last = q.push_param(person.last_name.as_str());
    let year = q.push_param(person.year);
    q.sql = format!(
        "INSERT INTO {} (firstname, lastname, year) VALUES (${}, ${}, ${}) RETURNING id",
        quoted(entity.table),
        first,
        last,
        year
    );
    q
}

/// UPDATE by id: every field is overwritten.
pub fn update(entity: &EntityDef, person: &Person) -> QueryBuf {
    let mut q = QueryBuf::new();
    let first = q.push_param(person.first_name.as_str());
    let last = q.push_param(person.last_name.as_str());
    let year = q.push_param(person.year);
    let id = q.push_param(person.id);
    q.sql = format!(
        "UPDATE {} SET firstname = ${}, lastname = ${}, year = ${} WHERE id = ${}",
        quoted(entity.table),
        first,
        last,
        year,
        id
    );
    q
}

/// DELETE by id.
pub fn delete(entity: &EntityDef, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("DELETE FROM {} WHERE id = ${}", quoted(entity.table), n);
    q
}

/// Substring search over first and last name with ORDER BY, LIMIT and OFFSET.
///
/// Each returned row carries `total_count`, the number of matches before
/// pagination (`COUNT(*) OVER ()`), so the total needs no second query. When the
/// sort column is not `id`, `id ASC` breaks ties so consecutive pages are disjoint.
pub fn search(entity: &EntityDef, search: &str, pagination: &Pagination, sort_by: &SortBy) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pattern = q.push_param(format!("%{}%", escape_like(search)));
    let limit = q.push_param(pagination.limit());
    let offset = q.push_param(pagination.offset());

    let mut order = format!("{} {}", quoted(sort_by.column.column_name()), sort_by.direction.as_sql());
    if sort_by.column != SortColumn::Id {
        order.push_str(", \"id\" ASC");
    }

    q.sql = format!(
        "SELECT {cols}, COUNT(*) OVER () AS total_count FROM {table} \
         WHERE firstname ILIKE ${p} ESCAPE '\\' OR lastname ILIKE ${p} ESCAPE '\\' \
         ORDER BY {order} LIMIT ${limit} OFFSET ${offset}",
        cols = COLUMNS,
        table = quoted(entity.table),
        p = pattern,
        order = order,
        limit = limit,
        offset = offset,
    );
    q
}
