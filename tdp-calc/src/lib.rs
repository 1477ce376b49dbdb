//! Power budget calculator.
//!
//! Maintains a configuration of selected hardware components, derives the
//! aggregate TDP, a recommended PSU rating and energy cost projections, and
//! renders the result as a CSV report. The catalog and the report
//! destination are passed in as ports ([`tdp_catalog::CatalogSource`],
//! [`report::ReportSink`]); the calculator holds no global state.

pub mod calculator;
pub mod error;
pub mod projection;
pub mod report;
pub mod selection;

pub use calculator::{CatalogLoad, CatalogWarning, PowerBudgetCalculator};
pub use error::CalcError;
pub use projection::{CostProjection, Horizon, ProjectionBasis, ProjectionSummary};
pub use report::{FileReportSink, ReportDocument, ReportSink};
pub use selection::{LineItemId, PowerConfiguration, SelectedComponent};
