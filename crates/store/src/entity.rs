//! `stat_records` table.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{self, NotSet, Set, Unchanged};
use stats_core::{StatRecord, StoredRecord};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stat_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub country: String,
    pub country_code: String,
    #[sea_orm(indexed)]
    pub continent: String,
    pub population: i64,
    pub total_cases: i64,
    pub new_cases: i64,
    pub total_deaths: i64,
    pub new_deaths: i64,
    pub total_recovered: i64,
    pub active_cases: i64,
    pub critical_cases: i64,
    pub cases_per_million: f64,
    pub deaths_per_million: f64,
    pub total_tests: i64,
    pub tests_per_million: f64,
    pub recorded_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// New row for `record`; the id is assigned by the store.
    pub fn for_insert(record: &StatRecord, recorded_at: DateTime<Utc>) -> Self {
        Self::with_id(NotSet, record, recorded_at)
    }

    /// Full overwrite of the row `id` with `record`.
    pub fn for_update(id: i32, record: &StatRecord, recorded_at: DateTime<Utc>) -> Self {
        Self::with_id(Unchanged(id), record, recorded_at)
    }

    fn with_id(id: ActiveValue<i32>, record: &StatRecord, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id,
            country: Set(record.country.clone()),
            country_code: Set(record.country_code.clone()),
            continent: Set(record.continent.clone()),
            population: Set(record.population),
            total_cases: Set(record.total_cases),
            new_cases: Set(record.new_cases),
            total_deaths: Set(record.total_deaths),
            new_deaths: Set(record.new_deaths),
            total_recovered: Set(record.total_recovered),
            active_cases: Set(record.active_cases),
            critical_cases: Set(record.critical_cases),
            cases_per_million: Set(record.cases_per_million),
            deaths_per_million: Set(record.deaths_per_million),
            total_tests: Set(record.total_tests),
            tests_per_million: Set(record.tests_per_million),
            recorded_at: Set(recorded_at),
        }
    }
}

impl From<Model> for StoredRecord {
    fn from(model: Model) -> Self {
        StoredRecord {
            id: i64::from(model.id),
            record: StatRecord {
                country: model.country,
                country_code: model.country_code,
                continent: model.continent,
                population: model.population,
                total_cases: model.total_cases,
                new_cases: model.new_cases,
                total_deaths: model.total_deaths,
                new_deaths: model.new_deaths,
                total_recovered: model.total_recovered,
                active_cases: model.active_cases,
                critical_cases: model.critical_cases,
                cases_per_million: model.cases_per_million,
                deaths_per_million: model.deaths_per_million,
                total_tests: model.total_tests,
                tests_per_million: model.tests_per_million,
            },
            recorded_at: model.recorded_at,
        }
    }
}
