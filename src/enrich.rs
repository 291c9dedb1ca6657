//! Country enrichment behind a lookup seam.
//!
//! Reports want population, GDP per capita, and the full country name next to
//! each country's metrics. Those facts live in external databases, so the
//! pipeline talks to them through [`CountryDataSource`] and ships an
//! in-memory implementation for tests and offline runs. Lookup failures never
//! abort enrichment; they surface as diagnostics and leave the affected cells
//! missing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::column_map::standard;
use crate::error::PipelineResult;
use crate::observability::Diagnostic;
use crate::types::{Table, Value};

/// Result of looking up a single fact for a single country.
///
/// `value` and `diagnostic` are independent: a source that knows the country
/// but has no figure on file answers [`absent`](LookupOutcome::absent), which
/// carries neither.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome<T> {
    /// The fact, when the source had one.
    pub value: Option<T>,
    /// Human-readable failure description, when the lookup went wrong.
    pub diagnostic: Option<String>,
}

impl<T> LookupOutcome<T> {
    /// The source had the fact.
    pub fn found(value: T) -> Self {
        LookupOutcome { value: Some(value), diagnostic: None }
    }

    /// The source knows the country but has no figure for this fact.
    pub fn absent() -> Self {
        LookupOutcome { value: None, diagnostic: None }
    }

    /// The lookup failed; `message` says how.
    pub fn failed(message: impl Into<String>) -> Self {
        LookupOutcome { value: None, diagnostic: Some(message.into()) }
    }
}

/// Facts a source can know about one country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryFacts {
    pub population: Option<i64>,
    pub gdp_per_capita: Option<f64>,
    pub full_name: Option<String>,
}

/// Provider of per-country facts.
///
/// Implementations answer per field so one unavailable database does not take
/// the others down with it.
pub trait CountryDataSource {
    /// Full country name for a country identifier (name or ISO code).
    fn full_name(&self, country: &str) -> LookupOutcome<String>;

    /// Population, keyed by whatever name the population database uses.
    fn population(&self, country: &str) -> LookupOutcome<i64>;

    /// GDP per capita for a country identifier.
    fn gdp_per_capita(&self, country: &str) -> LookupOutcome<f64>;
}

/// [`CountryDataSource`] backed by a map, for tests and offline runs.
#[derive(Debug, Default)]
pub struct InMemoryCountryData {
    facts: HashMap<String, CountryFacts>,
}

impl InMemoryCountryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register facts under a country key. Lookups under any other key fail.
    pub fn insert(&mut self, country: impl Into<String>, facts: CountryFacts) {
        self.facts.insert(country.into(), facts);
    }

    fn field<T>(
        &self,
        country: &str,
        field: &str,
        get: impl Fn(&CountryFacts) -> Option<T>,
    ) -> LookupOutcome<T> {
        match self.facts.get(country) {
            Some(facts) => match get(facts) {
                Some(value) => LookupOutcome::found(value),
                None => LookupOutcome::absent(),
            },
            None => LookupOutcome::failed(format!("no {field} data for '{country}'")),
        }
    }
}

impl CountryDataSource for InMemoryCountryData {
    fn full_name(&self, country: &str) -> LookupOutcome<String> {
        self.field(country, "full name", |f| f.full_name.clone())
    }

    fn population(&self, country: &str) -> LookupOutcome<i64> {
        self.field(country, "population", |f| f.population)
    }

    fn gdp_per_capita(&self, country: &str) -> LookupOutcome<f64> {
        self.field(country, "GDP per capita", |f| f.gdp_per_capita)
    }
}

/// What [`enrich_with_country_data`] did.
#[derive(Debug, Default)]
pub struct EnrichReport {
    /// Distinct countries the source was asked about.
    pub countries_looked_up: usize,
    /// One entry per failed lookup.
    pub diagnostics: Vec<Diagnostic>,
}

/// Append `country_population`, `gdp_per_capita`, and `full_country_name`
/// columns, resolved once per distinct country.
///
/// The population lookup is keyed by the resolved full name when one exists,
/// falling back to the identifier the table had. Countries or fields the
/// source cannot answer leave missing cells and a diagnostic per failure.
pub fn enrich_with_country_data(
    table: &mut Table,
    source: &dyn CountryDataSource,
) -> PipelineResult<EnrichReport> {
    let country_idx = table.require_column(standard::COUNTRY)?;

    // Distinct countries in first-appearance order. Tables carry a handful of
    // countries, so a linear scan is fine.
    let mut countries: Vec<String> = Vec::new();
    for row in &table.rows {
        if let Some(name) = row[country_idx].as_str() {
            if !countries.iter().any(|c| c == name) {
                countries.push(name.to_string());
            }
        }
    }

    let mut report = EnrichReport { countries_looked_up: countries.len(), ..Default::default() };
    let mut resolved: HashMap<String, CountryFacts> = HashMap::new();
    for country in &countries {
        let full_name = source.full_name(country);
        if let Some(message) = full_name.diagnostic {
            report.diagnostics.push(Diagnostic::LookupFailure {
                entity: country.clone(),
                field: standard::FULL_COUNTRY_NAME.to_string(),
                message,
            });
        }

        // Population databases key on full names.
        let population_key = full_name.value.as_deref().unwrap_or(country);
        let population = source.population(population_key);
        if let Some(message) = population.diagnostic {
            report.diagnostics.push(Diagnostic::LookupFailure {
                entity: country.clone(),
                field: standard::COUNTRY_POPULATION.to_string(),
                message,
            });
        }

        let gdp = source.gdp_per_capita(country);
        if let Some(message) = gdp.diagnostic {
            report.diagnostics.push(Diagnostic::LookupFailure {
                entity: country.clone(),
                field: standard::GDP_PER_CAPITA.to_string(),
                message,
            });
        }

        resolved.insert(
            country.clone(),
            CountryFacts {
                population: population.value,
                gdp_per_capita: gdp.value,
                full_name: full_name.value,
            },
        );
    }

    let mut population_cells = Vec::with_capacity(table.row_count());
    let mut gdp_cells = Vec::with_capacity(table.row_count());
    let mut name_cells = Vec::with_capacity(table.row_count());
    for row in &table.rows {
        let facts = row[country_idx].as_str().and_then(|name| resolved.get(name));
        population_cells.push(facts.and_then(|f| f.population).map_or(Value::Missing, Value::Int));
        gdp_cells.push(facts.and_then(|f| f.gdp_per_capita).map_or(Value::Missing, Value::Float));
        name_cells
            .push(facts.and_then(|f| f.full_name.clone()).map_or(Value::Missing, Value::Text));
    }
    table.set_column(standard::COUNTRY_POPULATION, population_cells)?;
    table.set_column(standard::GDP_PER_CAPITA, gdp_cells)?;
    table.set_column(standard::FULL_COUNTRY_NAME, name_cells)?;

    Ok(report)
}
