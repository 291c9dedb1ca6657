//! `campaign-report-pipeline` is a small library that turns locale-formatted
//! advertising exports into percentage-of-total campaign reports.
//!
//! Ad-platform exports arrive as untyped tables with human-readable column
//! labels and Brazilian-formatted numbers (`"$1.234,56"`, `"12,5%"`). The
//! pipeline renames columns to a standard schema, types the cells by column
//! role, derives a campaign goal per row from the free-text ad-set name,
//! optionally joins in country facts, and aggregates one classified goal into
//! each group's share of the totals. The primary entrypoint is
//! [`report::build_goal_share_report`], configured via
//! [`report::ReportOptions`].
//!
//! Values that fail to parse degrade to [`types::Value::Missing`] and surface
//! as diagnostics through an optional [`observability::DiagnosticSink`];
//! only structural problems (unreadable input, absent required columns) are
//! errors.
//!
//! ## Quick example: raw export to report
//!
//! ```
//! use campaign_report_pipeline::report::{build_goal_share_report, ReportOptions};
//! use campaign_report_pipeline::types::{Table, Value};
//!
//! # fn main() -> Result<(), campaign_report_pipeline::PipelineError> {
//! let text = |s: &str| Value::Text(s.to_string());
//! let table = Table::with_rows(
//!     [
//!         "Ad Set Name",
//!         "Country",
//!         "Results",
//!         "Purchase (Facebook Pixel)",
//!         "Purchase Conversion Value (Facebook Pixel)",
//!         "Amount Spent (USD)",
//!     ],
//!     vec![
//!         vec![
//!             text("LC Conversion - 10/03/2024"),
//!             text("BR"),
//!             text("30"),
//!             text("3,0"),
//!             text("$1.500,00"),
//!             text("$300,00"),
//!         ],
//!         vec![
//!             text("LC Conversion - 15/03/2024"),
//!             text("US"),
//!             text("10"),
//!             text("1,0"),
//!             text("$500,00"),
//!             text("$100,00"),
//!         ],
//!     ],
//! )?;
//!
//! let options = ReportOptions { localize_output: true, ..Default::default() };
//! let report = build_goal_share_report(table, None, &options)?;
//!
//! // Grouped by country, localized for presentation.
//! assert_eq!(report.columns[0], "pais");
//! let pct = report.column_index("pct_results").unwrap();
//! assert_eq!(report.rows[0][pct], Value::Float(0.75));
//! assert_eq!(report.rows[1][pct], Value::Float(0.25));
//! # Ok(())
//! # }
//! ```
//!
//! ## Goal derivation
//!
//! Ad-set names carry the campaign goal by convention; [`campaign`] recovers
//! it and buckets it for reporting:
//!
//! ```
//! use campaign_report_pipeline::campaign::{
//!     campaign_goal, classify_goal, ClassifiedGoal, ClassifierConfig,
//! };
//!
//! let goal = campaign_goal("LC Cart- Conversion - 12/03/2024 - BR");
//! assert_eq!(goal, "LC Cart-Conversion");
//! assert_eq!(classify_goal(&goal, &ClassifierConfig::default()), ClassifiedGoal::Conversion);
//! ```
//!
//! ## Modules
//!
//! - [`source`]: tables in and out, as CSV files or raw value grids behind
//!   the [`source::RangeStore`] seam
//! - [`column_map`]: raw export / standard English / Portuguese column names
//! - [`clean`]: locale numeric parsing plus role-driven table cleaning
//! - [`campaign`]: campaign-goal derivation and classification
//! - [`aggregate`]: percentage-of-total aggregation per classified goal
//! - [`enrich`]: country facts behind the [`enrich::CountryDataSource`] seam
//! - [`report`]: the unified pipeline
//! - [`observability`]: diagnostics and the sinks that receive them
//! - [`types`]: the in-memory [`types::Table`] / [`types::Value`] model
//! - [`error`]: error types used across the pipeline

pub mod aggregate;
pub mod campaign;
pub mod clean;
pub mod column_map;
pub mod enrich;
pub mod error;
pub mod observability;
pub mod report;
pub mod source;
pub mod types;

pub use error::{PipelineError, PipelineResult};
