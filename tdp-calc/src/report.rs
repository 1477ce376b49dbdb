//! CSV report rendering and the report sink port.
//!
//! # Layout
//!
//! ```text
//! <BOM>No,Category,Model,Unit TDP (W),Quantity,Total TDP (W),Specifications
//! 1,GPU,NVIDIA H100 SXM5 80GB,700,2,1400,fp16_pf=1.979; fp64_tf=67
//!
//! Report date,2024-06-15
//! Total TDP (W),1400
//! Recommended PSU (W),1750
//! ...
//! ```
//!
//! The payload always starts with a UTF-8 byte-order mark so spreadsheet
//! applications decode non-Latin model names correctly.

use chrono::NaiveDate;
use csv::{Terminator, WriterBuilder};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use tdp_utils::dates::{date_stamped_filename, format_date};
use tdp_utils::numbers::format_fixed;

use crate::error::{CalcError, Result};
use crate::projection::ProjectionSummary;
use crate::selection::PowerConfiguration;

pub const REPORT_FILE_STEM: &str = "tdp_report";
pub const REPORT_MIME_TYPE: &str = "text/csv;charset=utf-8";
pub const UTF8_BOM: &str = "\u{feff}";

pub const ITEM_HEADER: [&str; 7] = [
    "No",
    "Category",
    "Model",
    "Unit TDP (W)",
    "Quantity",
    "Total TDP (W)",
    "Specifications",
];

/// A rendered report ready for download.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    /// Date-stamped, e.g. `tdp_report_2024-06-15.csv`
    pub filename: String,
    pub mime_type: &'static str,
    /// CSV text including the leading byte-order mark
    pub contents: String,
}

impl ReportDocument {
    pub fn as_bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }

    /// The CSV text without the byte-order mark.
    pub fn csv_body(&self) -> &str {
        self.contents.strip_prefix(UTF8_BOM).unwrap_or(&self.contents)
    }
}

/// Destination for finished reports.
pub trait ReportSink {
    fn deliver(&self, report: &ReportDocument) -> std::io::Result<()>;
}

/// Writes reports into a directory under their own file name.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    dir: PathBuf,
}

impl FileReportSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, report: &ReportDocument) -> PathBuf {
        self.dir.join(&report.filename)
    }
}

impl ReportSink for FileReportSink {
    fn deliver(&self, report: &ReportDocument) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(report);
        fs::write(&path, report.as_bytes())?;
        info!("Report written to {}", path.display());
        Ok(())
    }
}

fn write_error(e: impl std::fmt::Display) -> CalcError {
    CalcError::ReportWrite(e.to_string())
}

fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder.flexible(true).terminator(Terminator::Any(b'\n'));
    builder
}

/// Render `configuration` and its projections as a CSV report.
///
/// `summary` must have been computed from `configuration`. A summary whose
/// total TDP differs from the line items is rejected with
/// [`CalcError::SummaryMismatch`].
pub fn export_report(
    configuration: &PowerConfiguration,
    summary: &ProjectionSummary,
    date: NaiveDate,
) -> Result<ReportDocument> {
    if configuration.is_empty() {
        return Err(CalcError::EmptyConfiguration);
    }
    let configuration_tdp = configuration.total_tdp_watts();
    if summary.total_tdp_watts != configuration_tdp {
        return Err(CalcError::SummaryMismatch {
            configuration: configuration_tdp,
            summary: summary.total_tdp_watts,
        });
    }

    let mut buffer = Vec::new();
    buffer.extend_from_slice(UTF8_BOM.as_bytes());

    let mut wtr = writer_builder().from_writer(buffer);
    wtr.write_record(ITEM_HEADER).map_err(write_error)?;
    for (index, item) in configuration.items().iter().enumerate() {
        let specifications = item
            .specifications
            .as_ref()
            .map(|s| s.flatten("; "))
            .unwrap_or_default();
        wtr.write_record([
            (index + 1).to_string(),
            item.category.label().to_string(),
            item.name.clone(),
            item.unit_tdp_watts.to_string(),
            item.quantity.to_string(),
            item.total_tdp_watts().to_string(),
            specifications,
        ])
        .map_err(write_error)?;
    }
    let mut buffer = wtr.into_inner().map_err(write_error)?;
    // Blank separator line between the item table and the summary block
    buffer.push(b'\n');

    let basis = &summary.basis;
    let mut wtr = writer_builder().from_writer(buffer);
    let mut summary_rows = vec![
        ("Report date".to_string(), format_date(&date)),
        ("Total TDP (W)".to_string(), summary.total_tdp_watts.to_string()),
        (
            "Recommended PSU (W)".to_string(),
            summary.recommended_psu_watts.to_string(),
        ),
        ("PSU efficiency".to_string(), basis.psu_efficiency.to_string()),
        ("Tariff (per kWh)".to_string(), basis.tariff_per_kwh.to_string()),
    ];
    for projection in &summary.projections {
        summary_rows.push((
            format!("{} consumption (kWh)", projection.horizon),
            format_fixed(projection.energy_kwh, 2),
        ));
        summary_rows.push((
            format!("{} cost", projection.horizon),
            format_fixed(projection.cost, 2),
        ));
    }
    for (label, value) in &summary_rows {
        wtr.write_record([label, value]).map_err(write_error)?;
    }
    let buffer = wtr.into_inner().map_err(write_error)?;

    let contents = String::from_utf8(buffer).map_err(write_error)?;
    let filename = date_stamped_filename(REPORT_FILE_STEM, &date, "csv");
    info!(
        "Rendered report {} with {} line items",
        filename,
        configuration.len()
    );
    Ok(ReportDocument {
        filename,
        mime_type: REPORT_MIME_TYPE,
        contents,
    })
}
