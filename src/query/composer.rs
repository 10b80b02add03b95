use chrono::{DateTime, Utc};
use sqlx::{Postgres, postgres::PgArguments, query::QueryAs};
use uuid::Uuid;

use crate::{
    cursor::{self, Cursor, SortKey},
    error::AppError,
    query::params::{ProductQueryParams, ProductSort, SortOrder},
};

/// Columns selected for every product query, in `ProductRow` order.
pub const PRODUCT_COLUMNS: &str = "p.product_id, p.name, p.description, p.brand, \
     p.model_number, p.sku, p.price::FLOAT8 AS price, p.availability, p.recommendation, \
     p.seller_id, p.product_type, p.category_id, p.created_at, p.updated_at, \
     c.name AS category_name, i.quantity, i.updated_at AS inventory_updated_at";

pub const PRODUCT_FROM: &str = "FROM products p \
     LEFT JOIN categories c ON p.category_id = c.category_id \
     LEFT JOIN inventory i ON p.product_id = i.product_id";

#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
    Text(String),
    Int(i32),
    BigInt(i64),
}

impl SqlArg {
    pub fn bind_to<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            SqlArg::Timestamp(value) => query.bind(value),
            SqlArg::Uuid(value) => query.bind(value),
            SqlArg::Text(value) => query.bind(value),
            SqlArg::Int(value) => query.bind(value),
            SqlArg::BigInt(value) => query.bind(value),
        }
    }
}

/// SQL text plus its positional arguments (`$1` is `args[0]`).
#[derive(Debug, Clone)]
pub struct ComposedQuery {
    pub sql: String,
    pub args: Vec<SqlArg>,
    pub limit: i64,
    pub sort: ProductSort,
}

impl ComposedQuery {
    pub fn query_as<'q, O>(&'q self) -> QueryAs<'q, Postgres, O, PgArguments>
    where
        O: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
    {
        self.args
            .iter()
            .cloned()
            .fold(sqlx::query_as::<_, O>(&self.sql), |query, arg| {
                arg.bind_to(query)
            })
    }
}

struct Builder {
    sql: String,
    args: Vec<SqlArg>,
}

impl Builder {
    fn new(base: String) -> Self {
        Self {
            sql: base,
            args: Vec::new(),
        }
    }

    fn bind(&mut self, arg: SqlArg) -> String {
        self.args.push(arg);
        format!("${}", self.args.len())
    }

    fn and(&mut self, predicate: &str) {
        self.sql.push_str(" AND ");
        self.sql.push_str(predicate);
    }
}

/// Build the listing query for `params`.
///
/// Predicates are appended in a fixed order (keyset, search, category,
/// seller, availability, recommendation, product type) and every caller
/// value is bound, never spliced into the text. One row more than the page
/// size is requested so the caller can tell whether another page exists.
pub fn compose(params: &ProductQueryParams) -> Result<ComposedQuery, AppError> {
    let sort = params.sort;
    let order = params.order;
    let limit = params.effective_limit();

    let mut b = Builder::new(format!("SELECT {PRODUCT_COLUMNS} {PRODUCT_FROM} WHERE 1=1"));

    if let Some(token) = params.cursor.as_deref().filter(|t| !t.trim().is_empty()) {
        let cursor = cursor::decode(token)?;
        push_keyset(&mut b, &cursor, sort, order)?;
    }

    if let Some(term) = params.search.as_deref().map(compact).filter(|t| !t.is_empty()) {
        let placeholder = b.bind(SqlArg::Text(format!("%{}%", escape_like(&term))));
        b.and(&format!(
            "regexp_replace(p.name, '{}', '', 'g') ILIKE {placeholder}",
            search_space_class()
        ));
    }

    if let Some(category_id) = params.category_id.filter(|id| *id != 0) {
        let placeholder = b.bind(SqlArg::Int(category_id));
        b.and(&format!("p.category_id = {placeholder}"));
    }

    if let Some(seller_id) = params.seller_id {
        let placeholder = b.bind(SqlArg::Uuid(seller_id));
        b.and(&format!("p.seller_id = {placeholder}"));
    }

    if let Some(availability) = params.availability.as_ref().filter(|a| !a.as_str().is_empty()) {
        let placeholder = b.bind(SqlArg::Text(availability.as_str().to_string()));
        b.and(&format!("p.availability = {placeholder}"));
    }

    if let Some(recommendation) = params
        .recommendation
        .as_ref()
        .filter(|r| !r.as_str().is_empty())
    {
        let placeholder = b.bind(SqlArg::Text(recommendation.as_str().to_string()));
        b.and(&format!("p.recommendation = {placeholder}"));
    }

    if let Some(product_type) = params.product_type {
        let placeholder = b.bind(SqlArg::Text(product_type.as_str().to_string()));
        b.and(&format!("p.product_type = {placeholder}"));
    }

    b.sql.push_str(&format!(
        " ORDER BY {} {}, p.product_id ASC",
        sort.as_sql(),
        order.as_sql()
    ));

    let placeholder = b.bind(SqlArg::BigInt(limit + 1));
    b.sql.push_str(&format!(" LIMIT {placeholder}"));

    Ok(ComposedQuery {
        sql: b.sql,
        args: b.args,
        limit,
        sort,
    })
}

/// Resume strictly after `cursor` in `(sort column, product_id ASC)` order.
fn push_keyset(
    b: &mut Builder,
    cursor: &Cursor,
    sort: ProductSort,
    order: SortOrder,
) -> Result<(), AppError> {
    let (column, anchor) = match (sort, &cursor.sort_key) {
        (ProductSort::CreatedAt, None) => ("p.created_at", b.bind(SqlArg::Timestamp(cursor.created_at))),
        (ProductSort::Name, Some(SortKey::Name(name))) => ("p.name", b.bind(SqlArg::Text(name.clone()))),
        (ProductSort::Price, Some(SortKey::Price(price))) => {
            let placeholder = b.bind(SqlArg::Text(price.to_string()));
            ("p.price", format!("{placeholder}::NUMERIC"))
        }
        _ => {
            return Err(AppError::InvalidCursor(
                "cursor does not match the requested sort".into(),
            ));
        }
    };
    let id = b.bind(SqlArg::Uuid(cursor.product_id));

    let predicate = match order {
        SortOrder::Asc => format!("({column}, p.product_id) > ({anchor}, {id})"),
        SortOrder::Desc => format!(
            "({column} < {anchor} OR ({column} = {anchor} AND p.product_id > {id}))"
        ),
    };
    b.and(&predicate);
    Ok(())
}

/// Characters ignored by name search, on the term and on the stored name
/// alike. Spelled out so the database does not fall back to its locale's
/// idea of `\s`.
pub const SEARCH_SPACES: &[char] = &[
    '\u{0009}', '\u{000A}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{0020}', '\u{0085}',
    '\u{00A0}', '\u{1680}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}',
    '\u{2005}', '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{2028}',
    '\u{2029}', '\u{202F}', '\u{205F}', '\u{3000}',
];

/// Postgres regex bracket expression matching exactly [`SEARCH_SPACES`].
pub fn search_space_class() -> String {
    let escapes: String = SEARCH_SPACES
        .iter()
        .map(|c| format!("\\u{:04X}", u32::from(*c)))
        .collect();
    format!("[{escapes}]")
}

/// Drop every character in [`SEARCH_SPACES`].
pub fn compact(text: &str) -> String {
    text.chars().filter(|c| !SEARCH_SPACES.contains(c)).collect()
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
