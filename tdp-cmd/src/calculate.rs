//! Size a configuration, print its projections and export the CSV report.

use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;
use tdp_calc::{
    FileReportSink, PowerBudgetCalculator, PowerConfiguration, ProjectionBasis, ProjectionSummary,
};
use tdp_utils::dates;
use tdp_utils::numbers::format_grouped;

use crate::catalog::load_into;
use crate::parts::NO_PARTS_NOTICE;
use crate::project::render_summary;
use crate::selection::{collect_requests, SelectionRequest};
use crate::{BasisArgs, CatalogArgs};

#[derive(Debug, Clone)]
pub struct CalculateOptions {
    pub items: Vec<String>,
    pub selection: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub export: bool,
    pub date: Option<String>,
    pub json: bool,
}

#[derive(Serialize)]
struct CalculationOutput<'a> {
    items: &'a PowerConfiguration,
    summary: &'a ProjectionSummary,
}

/// Format the line items as a numbered table.
pub fn render_items(configuration: &PowerConfiguration) -> String {
    let mut out = String::new();
    for (index, item) in configuration.items().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {:<12} {:<40} {:>7} W x {:<3} = {:>9} W",
            index + 1,
            item.category.to_string(),
            item.name,
            item.unit_tdp_watts,
            item.quantity,
            format_grouped(item.total_tdp_watts(), 0)
        );
    }
    out
}

/// Add every request to `calc`, stopping at the first rejected one.
pub fn apply_requests(
    calc: &mut PowerBudgetCalculator,
    requests: &[SelectionRequest],
) -> anyhow::Result<()> {
    for request in requests {
        calc.add_component(request.category, &request.model, request.quantity)?;
    }
    Ok(())
}

fn report_date(raw: Option<&str>) -> anyhow::Result<NaiveDate> {
    match raw {
        Some(s) => dates::parse_date(s),
        None => Ok(dates::today()),
    }
}

pub async fn run_calculate(
    catalog: &CatalogArgs,
    basis: &BasisArgs,
    options: &CalculateOptions,
) -> anyhow::Result<()> {
    let basis: ProjectionBasis = basis.into();
    let date = report_date(options.date.as_deref())?;
    let requests = collect_requests(&options.items, options.selection.as_deref())?;
    if requests.is_empty() {
        anyhow::bail!("nothing selected: pass --item CATEGORY:MODEL[:QTY] or --selection FILE");
    }

    let mut calc = PowerBudgetCalculator::new(basis)?;
    let load = load_into(&mut calc, catalog).await?;
    if load.is_empty() {
        anyhow::bail!(NO_PARTS_NOTICE);
    }
    apply_requests(&mut calc, &requests)?;
    info!(
        "Configuration has {} line items, {} W total",
        calc.configuration().len(),
        calc.total_tdp_watts()
    );

    let summary = calc.summary()?;
    if options.json {
        let output = CalculationOutput {
            items: calc.configuration(),
            summary: &summary,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_items(calc.configuration()));
        println!();
        print!("{}", render_summary(&summary));
    }

    if options.export {
        let sink = FileReportSink::new(&options.output_dir);
        let document = calc.export_to(&sink, date)?;
        println!("Report written to {}", sink.path_for(&document).display());
    }
    Ok(())
}
