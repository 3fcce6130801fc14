//! Read-side queries over stored records.

use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use stats_core::limits::UNKNOWN_CONTINENT;
use stats_core::{
    Error, ListQuery, Page, RecordFilter, Result, SortField, SortOrder, Statistics, StoredRecord,
    TopQuery,
};

use crate::client::StoreClient;
use crate::entity::{Column, Entity};

fn query_error(op: &'static str) -> impl Fn(DbErr) -> Error {
    move |e| Error::database(format!("{} failed: {}", op, e))
}

/// Maps a sort field to its table column.
pub fn column_for(field: SortField) -> Column {
    match field {
        SortField::Id => Column::Id,
        SortField::Country => Column::Country,
        SortField::CountryCode => Column::CountryCode,
        SortField::Continent => Column::Continent,
        SortField::Population => Column::Population,
        SortField::TotalCases => Column::TotalCases,
        SortField::NewCases => Column::NewCases,
        SortField::TotalDeaths => Column::TotalDeaths,
        SortField::NewDeaths => Column::NewDeaths,
        SortField::TotalRecovered => Column::TotalRecovered,
        SortField::ActiveCases => Column::ActiveCases,
        SortField::CriticalCases => Column::CriticalCases,
        SortField::CasesPerMillion => Column::CasesPerMillion,
        SortField::DeathsPerMillion => Column::DeathsPerMillion,
        SortField::TotalTests => Column::TotalTests,
        SortField::TestsPerMillion => Column::TestsPerMillion,
        SortField::RecordedAt => Column::RecordedAt,
    }
}

/// Ties on the sort column break by ascending id.
fn ordered(select: Select<Entity>, field: SortField, order: SortOrder) -> Select<Entity> {
    let column = column_for(field);
    let select = match order {
        SortOrder::Asc => select.order_by_asc(column),
        SortOrder::Desc => select.order_by_desc(column),
    };
    select.order_by_asc(Column::Id)
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn filter_condition(filter: &RecordFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(country) = &filter.country {
        // Both sides fold through the store's LOWER() so they agree.
        let pattern = format!("%{}%", escape_like(country));
        condition = condition.add(Expr::cust_with_exprs(
            "LOWER($1) LIKE LOWER($2) ESCAPE $3",
            [
                SimpleExpr::from(Expr::col(Column::Country)),
                SimpleExpr::from(Expr::val(pattern)),
                SimpleExpr::from(Expr::val("\\")),
            ],
        ));
    }

    if let Some(continent) = &filter.continent {
        condition = condition.add(Column::Continent.eq(continent.as_str()));
    }

    condition
}

/// Filtered, sorted page of records.
///
/// A page whose offset cannot be expressed as a signed 64-bit SQL value is
/// past the end of any table and comes back empty.
pub async fn list_records(client: &StoreClient, query: &ListQuery) -> Result<Page<StoredRecord>> {
    let db = client.inner();
    let condition = filter_condition(&query.filter);

    let total = Entity::find()
        .filter(condition.clone())
        .count(db)
        .await
        .map_err(query_error("Record count"))?;

    let offset = query.offset();
    if i64::try_from(offset).is_err() || i64::try_from(query.per_page).is_err() {
        return Ok(Page::new(Vec::new(), total, query.page, query.per_page));
    }

    let rows = ordered(Entity::find().filter(condition), query.sort_by, query.order)
        .offset(offset)
        .limit(query.per_page)
        .all(db)
        .await
        .map_err(query_error("Record listing"))?;

    Ok(Page::new(
        rows.into_iter().map(StoredRecord::from).collect(),
        total,
        query.page,
        query.per_page,
    ))
}

#[derive(Debug, FromQueryResult)]
struct TotalsRow {
    total_cases: Option<i64>,
    total_deaths: Option<i64>,
    total_recovered: Option<i64>,
}

fn sum_of(column: Column) -> SimpleExpr {
    Func::cast_as(Func::sum(Expr::col(column)), Alias::new("BIGINT")).into()
}

/// Store-wide totals. An empty store yields all zeros.
pub async fn statistics(client: &StoreClient) -> Result<Statistics> {
    let db = client.inner();

    let total_records = Entity::find()
        .count(db)
        .await
        .map_err(query_error("Record count"))?;

    let totals = Entity::find()
        .select_only()
        .column_as(sum_of(Column::TotalCases), "total_cases")
        .column_as(sum_of(Column::TotalDeaths), "total_deaths")
        .column_as(sum_of(Column::TotalRecovered), "total_recovered")
        .into_model::<TotalsRow>()
        .one(db)
        .await
        .map_err(query_error("Statistics"))?;

    let (cases, deaths, recovered) = totals
        .map(|row| {
            (
                row.total_cases.unwrap_or(0),
                row.total_deaths.unwrap_or(0),
                row.total_recovered.unwrap_or(0),
            )
        })
        .unwrap_or((0, 0, 0));

    Ok(Statistics::new(total_records, cases, deaths, recovered))
}

/// Distinct known continents in ascending order.
pub async fn continents(client: &StoreClient) -> Result<Vec<String>> {
    Entity::find()
        .select_only()
        .column(Column::Continent)
        .distinct()
        .filter(Column::Continent.ne(UNKNOWN_CONTINENT))
        .filter(Column::Continent.ne(""))
        .order_by_asc(Column::Continent)
        .into_tuple::<String>()
        .all(client.inner())
        .await
        .map_err(query_error("Continent listing"))
}

/// Highest `limit` records by `metric`.
pub async fn top_records(client: &StoreClient, query: &TopQuery) -> Result<Vec<StoredRecord>> {
    let rows = ordered(Entity::find(), query.metric, SortOrder::Desc)
        .limit(query.limit)
        .all(client.inner())
        .await
        .map_err(query_error("Top records"))?;

    Ok(rows.into_iter().map(StoredRecord::from).collect())
}
