//! Filter explain command: shows parsed criteria and the grouped predicate.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use docgate_core::error::AppError;
use docgate_core::types::{FilterCriterion, SortDirection, SortSpec};
use docgate_entity::document::Document;
use docgate_query::{Searchable, SortKey, compile, parse};

/// Arguments for the explain command
#[derive(Debug, Args)]
pub struct ExplainArgs {
    /// Filter expression to explain
    pub filter: String,

    /// Sort field to resolve alongside the filter
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction (ASC or DESC)
    #[arg(long, default_value = "ASC")]
    pub direction: String,
}

/// One parsed criterion.
#[derive(Debug, Serialize, Tabled)]
struct CriterionRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Join")]
    connective: String,
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Operator")]
    operator: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl CriterionRow {
    fn new(position: usize, criterion: &FilterCriterion) -> Self {
        Self {
            position,
            connective: criterion.logical_operator.to_string(),
            property: criterion.property.clone(),
            operator: criterion.operator.to_string(),
            value: criterion.value.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Explanation {
    criteria: Vec<FilterCriterion>,
    predicate: String,
    sort: Option<String>,
}

/// Execute the explain command
pub fn execute(args: &ExplainArgs, format: OutputFormat) -> Result<(), AppError> {
    let schema = Document::schema();
    let criteria = parse(&args.filter);
    let predicate = compile(schema, &criteria)?;

    let sort = args.sort_by.as_ref().map(|field| {
        SortSpec::new(field.clone(), SortDirection::from(args.direction.as_str()))
    });
    let key = sort.as_ref().and_then(|spec| SortKey::resolve(schema, spec));
    if let (Some(spec), None) = (&sort, &key) {
        output::print_warning(&format!(
            "Sort field '{}' is not searchable; source order is kept",
            spec.field
        ));
    }

    match format {
        OutputFormat::Table => {
            let rows: Vec<CriterionRow> = criteria
                .iter()
                .enumerate()
                .map(|(i, c)| CriterionRow::new(i + 1, c))
                .collect();
            output::print_list(&rows, format);
            println!();
            output::print_kv("Predicate", &predicate.to_string());
            if let Some(key) = &key {
                output::print_kv("Sort", &key.to_string());
            }
        }
        OutputFormat::Json => {
            let explanation = Explanation {
                criteria,
                predicate: predicate.to_string(),
                sort: key.map(|k| k.to_string()),
            };
            output::print_item(&explanation, format);
        }
    }

    Ok(())
}
