//! End-to-end report assembly.
//!
//! [`build_goal_share_report`] runs the whole pipeline in order: rename raw
//! export labels to the standard schema, clean cells by column role, derive
//! the goal columns, optionally enrich with country data, aggregate one
//! classified goal into percentage-of-total rows, and optionally localize the
//! result for presentation. Stages report their diagnostics to the options'
//! sink as they run.

use std::fmt;
use std::sync::Arc;

use crate::aggregate::percentages_by_goal;
use crate::campaign::{add_goal_columns, ClassifiedGoal, ClassifierConfig};
use crate::clean::{clean_columns, ColumnRoles};
use crate::column_map::{localize_columns, standard, to_standard_english, RenameDirection};
use crate::enrich::{enrich_with_country_data, CountryDataSource};
use crate::error::PipelineResult;
use crate::observability::{Diagnostic, DiagnosticSink};
use crate::types::Table;

/// Configuration for [`build_goal_share_report`].
pub struct ReportOptions {
    /// Dimension column to group by. Defaults to `country`; any column that
    /// exists after cleaning and enrichment works, including enriched ones.
    pub main_column: String,
    /// Which classified goal the report covers.
    pub goal_filter: ClassifiedGoal,
    /// Column roles for the cleaning stage.
    pub roles: ColumnRoles,
    /// Goal lists for the classification stage.
    pub classifier: ClassifierConfig,
    /// Rename the finished report to Portuguese presentation names.
    pub localize_output: bool,
    /// Receives diagnostics from every stage as they run.
    pub sink: Option<Arc<dyn DiagnosticSink>>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            main_column: standard::COUNTRY.to_string(),
            goal_filter: ClassifiedGoal::Conversion,
            roles: ColumnRoles::default(),
            classifier: ClassifierConfig::default(),
            localize_output: false,
            sink: None,
        }
    }
}

impl fmt::Debug for ReportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportOptions")
            .field("main_column", &self.main_column)
            .field("goal_filter", &self.goal_filter)
            .field("roles", &self.roles)
            .field("classifier", &self.classifier)
            .field("localize_output", &self.localize_output)
            .field("sink_set", &self.sink.is_some())
            .finish()
    }
}

/// Build a percentage-of-total report for one classified goal from a raw
/// export table.
///
/// ```
/// use campaign_report_pipeline::report::{build_goal_share_report, ReportOptions};
/// use campaign_report_pipeline::types::{Table, Value};
///
/// let table = Table::with_rows(
///     [
///         "Ad Set Name",
///         "Country",
///         "Results",
///         "Purchase (Facebook Pixel)",
///         "Purchase Conversion Value (Facebook Pixel)",
///         "Amount Spent (USD)",
///     ],
///     vec![
///         vec![
///             Value::Text("LC Conversion - 10/03/2024".into()),
///             Value::Text("BR".into()),
///             Value::Text("30".into()),
///             Value::Text("3,0".into()),
///             Value::Text("$1.500,00".into()),
///             Value::Text("$300,00".into()),
///         ],
///         vec![
///             Value::Text("LC Conversion - 15/03/2024".into()),
///             Value::Text("US".into()),
///             Value::Text("10".into()),
///             Value::Text("1,0".into()),
///             Value::Text("$500,00".into()),
///             Value::Text("$100,00".into()),
///         ],
///     ],
/// )?;
///
/// let report = build_goal_share_report(table, None, &ReportOptions::default())?;
///
/// let pct = report.column_index("pct_results").unwrap();
/// assert_eq!(report.rows[0][pct], Value::Float(0.75));
/// assert_eq!(report.rows[1][pct], Value::Float(0.25));
/// # Ok::<(), campaign_report_pipeline::PipelineError>(())
/// ```
pub fn build_goal_share_report(
    mut table: Table,
    country_data: Option<&dyn CountryDataSource>,
    options: &ReportOptions,
) -> PipelineResult<Table> {
    to_standard_english(&mut table);

    let cleaned = clean_columns(&mut table, &options.roles);
    forward(options, &cleaned.diagnostics);

    add_goal_columns(&mut table, &options.classifier)?;

    if let Some(source) = country_data {
        let enriched = enrich_with_country_data(&mut table, source)?;
        forward(options, &enriched.diagnostics);
    }

    let mut report = percentages_by_goal(&table, &options.main_column, options.goal_filter)?;
    if options.localize_output {
        localize_columns(&mut report, RenameDirection::ToPortuguese);
    }
    Ok(report)
}

fn forward(options: &ReportOptions, diagnostics: &[Diagnostic]) {
    if let Some(sink) = &options.sink {
        for diagnostic in diagnostics {
            sink.report(diagnostic);
        }
    }
}
