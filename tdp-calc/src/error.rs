/// Error types for the power budget calculator
use tdp_catalog::ComponentCategory;
use thiserror::Error;

/// Every failure leaves the configuration exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Neither catalog partition could be fetched or parsed
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// A catalog-dependent operation was called before any catalog loaded
    #[error("The component catalog has not been loaded yet")]
    CatalogNotLoaded,

    /// No entry with this category and model in the loaded catalog
    #[error("Unknown component: {category} '{model}'")]
    UnknownComponent {
        category: ComponentCategory,
        model: String,
    },

    /// Quantity is not a whole number of at least 1
    #[error("Invalid quantity '{0}': must be a whole number of at least 1")]
    InvalidQuantity(String),

    /// PSU efficiency outside (0, 1]
    #[error("Invalid PSU efficiency {0}: must be greater than 0 and at most 1")]
    InvalidEfficiency(f64),

    /// Negative or non-finite hour count
    #[error("Invalid hours {0}: must be a non-negative number")]
    InvalidHours(f64),

    /// Negative or non-finite tariff
    #[error("Invalid tariff {0}: must be a non-negative rate per kWh")]
    InvalidTariff(f64),

    /// Negative or non-finite TDP passed to a projection
    #[error("Invalid TDP {0}: must be a non-negative number of watts")]
    InvalidTdp(f64),

    /// N-year horizon of zero years
    #[error("Invalid projection horizon: {0} years")]
    InvalidYears(u32),

    /// Export requested with no line items
    #[error("Nothing to export: the configuration is empty")]
    EmptyConfiguration,

    /// Report summary computed for a different total than the line items add up to
    #[error("Report summary is for {summary} W but the line items total {configuration} W")]
    SummaryMismatch { configuration: f64, summary: f64 },

    /// Rendering or delivering the report failed
    #[error("Failed to write report: {0}")]
    ReportWrite(String),
}

/// Type alias for Results using CalcError
pub type Result<T> = std::result::Result<T, CalcError>;
