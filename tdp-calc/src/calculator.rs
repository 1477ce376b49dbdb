//! The power budget calculator.
//!
//! One long-lived configuration, mutated by CRUD-style calls. Every
//! mutating call validates first and only then touches state, so a failed
//! call never leaves a partial change behind.

use chrono::NaiveDate;
use log::{debug, info, warn};
use std::fmt;
use tdp_catalog::{Catalog, CatalogPartition, CatalogSource, ComponentCategory};

use crate::error::{CalcError, Result};
use crate::projection::{self, ProjectionBasis, ProjectionSummary};
use crate::report::{self, ReportDocument, ReportSink};
use crate::selection::{validate_quantity, LineItemId, PowerConfiguration, SelectedComponent};

/// A catalog partition that failed while the other one loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogWarning {
    pub partition: CatalogPartition,
    pub message: String,
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not load {}: {}", self.partition, self.message)
    }
}

/// Outcome of a successful [`PowerBudgetCalculator::load_catalog`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogLoad {
    pub common_parts: usize,
    pub gpus: usize,
    pub warnings: Vec<CatalogWarning>,
}

impl CatalogLoad {
    /// True when the fetch worked but no parts are configured in the system.
    pub fn is_empty(&self) -> bool {
        self.common_parts == 0 && self.gpus == 0
    }

    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Holds the selected components and derives totals, PSU sizing and costs.
#[derive(Debug, Clone, Default)]
pub struct PowerBudgetCalculator {
    catalog: Option<Catalog>,
    configuration: PowerConfiguration,
    basis: ProjectionBasis,
    next_id: u64,
}

impl PowerBudgetCalculator {
    pub fn new(basis: ProjectionBasis) -> Result<Self> {
        basis.validate()?;
        Ok(Self {
            basis,
            ..Self::default()
        })
    }

    /// Fetch both catalog partitions from `source`.
    ///
    /// A partition that fails is reported as a warning as long as the other
    /// one loads. If both fail the previous catalog is kept and
    /// [`CalcError::CatalogUnavailable`] is returned.
    pub async fn load_catalog(&mut self, source: &dyn CatalogSource) -> Result<CatalogLoad> {
        let common = source.fetch(CatalogPartition::CommonParts).await;
        let gpus = source.fetch(CatalogPartition::Gpus).await;

        let (common_parts, gpus, warnings) = match (common, gpus) {
            (Err(common_err), Err(gpu_err)) => {
                warn!("Catalog unavailable: {}; {}", common_err, gpu_err);
                return Err(CalcError::CatalogUnavailable(format!(
                    "{}: {}; {}: {}",
                    CatalogPartition::CommonParts,
                    common_err,
                    CatalogPartition::Gpus,
                    gpu_err
                )));
            }
            (Ok(common), Ok(gpus)) => (common, gpus, Vec::new()),
            (Ok(common), Err(e)) => {
                let warning = CatalogWarning {
                    partition: CatalogPartition::Gpus,
                    message: e.to_string(),
                };
                (common, Vec::new(), vec![warning])
            }
            (Err(e), Ok(gpus)) => {
                let warning = CatalogWarning {
                    partition: CatalogPartition::CommonParts,
                    message: e.to_string(),
                };
                (Vec::new(), gpus, vec![warning])
            }
        };

        for warning in &warnings {
            warn!("{}", warning);
        }
        let load = CatalogLoad {
            common_parts: common_parts.len(),
            gpus: gpus.len(),
            warnings,
        };
        if load.is_empty() {
            warn!("Catalog loaded but no parts are configured in the system");
        } else {
            info!(
                "Catalog loaded: {} common parts, {} GPUs",
                load.common_parts, load.gpus
            );
        }
        self.catalog = Some(Catalog::new(common_parts, gpus));
        Ok(load)
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn configuration(&self) -> &PowerConfiguration {
        &self.configuration
    }

    pub fn basis(&self) -> &ProjectionBasis {
        &self.basis
    }

    pub fn set_basis(&mut self, basis: ProjectionBasis) -> Result<()> {
        basis.validate()?;
        self.basis = basis;
        Ok(())
    }

    /// Append a new line item copied from the catalog entry `model_name`.
    ///
    /// Adding the same entry twice yields two independent line items.
    pub fn add_component(
        &mut self,
        category: ComponentCategory,
        model_name: &str,
        quantity: u32,
    ) -> Result<SelectedComponent> {
        let catalog = self.catalog.as_ref().ok_or(CalcError::CatalogNotLoaded)?;
        let entry = catalog
            .find(category, model_name)
            .ok_or_else(|| CalcError::UnknownComponent {
                category,
                model: model_name.to_string(),
            })?;
        let quantity = validate_quantity(quantity)?;

        self.next_id += 1;
        let item = SelectedComponent::from_entry(LineItemId::new(self.next_id), entry, quantity);
        debug!(
            "Added {} {} x{} as {}",
            item.category, item.name, item.quantity, item.id
        );
        self.configuration.push(item.clone());
        Ok(item)
    }

    /// Remove a line item. Unknown ids are ignored.
    pub fn remove_component(&mut self, id: LineItemId) {
        match self.configuration.remove(id) {
            Some(item) => debug!("Removed {} ({})", item.name, id),
            None => debug!("Remove ignored, {} not in configuration", id),
        }
    }

    /// Replace a line item's quantity. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: LineItemId, quantity: u32) -> Result<()> {
        let quantity = validate_quantity(quantity)?;
        if !self.configuration.set_quantity(id, quantity) {
            debug!("Quantity update ignored, {} not in configuration", id);
        }
        Ok(())
    }

    pub fn clear_all(&mut self) {
        self.configuration.clear();
    }

    pub fn total_tdp_watts(&self) -> f64 {
        self.configuration.total_tdp_watts()
    }

    /// PSU rating for the current configuration at the basis efficiency.
    pub fn recommended_psu_watts(&self) -> Result<u64> {
        projection::recommended_psu_watts(self.total_tdp_watts(), self.basis.psu_efficiency)
    }

    pub fn summary(&self) -> Result<ProjectionSummary> {
        ProjectionSummary::compute(self.total_tdp_watts(), &self.basis)
    }

    /// Render the current configuration as a report stamped with `date`.
    pub fn export_report(&self, date: NaiveDate) -> Result<ReportDocument> {
        if self.configuration.is_empty() {
            return Err(CalcError::EmptyConfiguration);
        }
        report::export_report(&self.configuration, &self.summary()?, date)
    }

    /// Render the report and hand it to `sink`.
    pub fn export_to(&self, sink: &dyn ReportSink, date: NaiveDate) -> Result<ReportDocument> {
        let document = self.export_report(date)?;
        sink.deliver(&document)
            .map_err(|e| CalcError::ReportWrite(e.to_string()))?;
        Ok(document)
    }
}
