//! PSU sizing and energy cost projection.
//!
//! Everything here is a pure function of its inputs. Energy is
//! `(watts / 1000) * hours` kWh and cost is energy times a flat tariff
//! applied around the clock.

use serde::Serialize;
use std::fmt;

use crate::error::{CalcError, Result};

/// Default efficiency margin used to size the PSU.
pub const DEFAULT_PSU_EFFICIENCY: f64 = 0.8;
/// Default electricity tariff in currency units per kWh.
pub const DEFAULT_TARIFF_PER_KWH: f64 = 130.24;
/// Default N for the N-year horizon.
pub const DEFAULT_PROJECTION_YEARS: u32 = 5;

pub const HOURS_PER_DAY: f64 = 24.0;
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

fn check_tdp(total_tdp_watts: f64) -> Result<f64> {
    if total_tdp_watts.is_finite() && total_tdp_watts >= 0.0 {
        Ok(total_tdp_watts)
    } else {
        Err(CalcError::InvalidTdp(total_tdp_watts))
    }
}

fn check_tariff(tariff_per_kwh: f64) -> Result<f64> {
    if tariff_per_kwh.is_finite() && tariff_per_kwh >= 0.0 {
        Ok(tariff_per_kwh)
    } else {
        Err(CalcError::InvalidTariff(tariff_per_kwh))
    }
}

fn check_efficiency(efficiency: f64) -> Result<f64> {
    // NaN fails both comparisons and is rejected
    if efficiency > 0.0 && efficiency <= 1.0 {
        Ok(efficiency)
    } else {
        Err(CalcError::InvalidEfficiency(efficiency))
    }
}

/// `ceil(total_tdp_watts / efficiency)`.
pub fn recommended_psu_watts(total_tdp_watts: f64, efficiency: f64) -> Result<u64> {
    let efficiency = check_efficiency(efficiency)?;
    let total = check_tdp(total_tdp_watts)?;
    Ok((total / efficiency).ceil() as u64)
}

/// Energy drawn over `hours` at a constant `total_tdp_watts`, in kWh.
pub fn project_energy_kwh(total_tdp_watts: f64, hours: f64) -> Result<f64> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(CalcError::InvalidHours(hours));
    }
    let total = check_tdp(total_tdp_watts)?;
    Ok(total / 1000.0 * hours)
}

/// `(total_tdp_watts / 1000) * tariff_per_kwh * hours`.
pub fn project_energy_cost(total_tdp_watts: f64, tariff_per_kwh: f64, hours: f64) -> Result<f64> {
    project_energy_kwh(total_tdp_watts, hours)?;
    let tariff = check_tariff(tariff_per_kwh)?;
    Ok(total_tdp_watts / 1000.0 * tariff * hours)
}

/// Canonical projection horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    Hour,
    Day,
    /// 30 days
    Month,
    /// 365 days
    Year,
    Years(u32),
}

impl Horizon {
    pub fn hours(&self) -> f64 {
        match self {
            Horizon::Hour => 1.0,
            Horizon::Day => HOURS_PER_DAY,
            Horizon::Month => HOURS_PER_DAY * DAYS_PER_MONTH,
            Horizon::Year => HOURS_PER_DAY * DAYS_PER_YEAR,
            Horizon::Years(n) => HOURS_PER_DAY * DAYS_PER_YEAR * f64::from(*n),
        }
    }

    /// The horizons reported in every summary, shortest first.
    pub fn canonical(years: u32) -> [Horizon; 5] {
        [
            Horizon::Hour,
            Horizon::Day,
            Horizon::Month,
            Horizon::Year,
            Horizon::Years(years),
        ]
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Horizon::Hour => f.write_str("Hourly"),
            Horizon::Day => f.write_str("Daily"),
            Horizon::Month => f.write_str("Monthly"),
            Horizon::Year => f.write_str("Annual"),
            Horizon::Years(n) => write!(f, "{}-year", n),
        }
    }
}

/// Tariff, efficiency and N-year setting behind a projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionBasis {
    pub tariff_per_kwh: f64,
    pub psu_efficiency: f64,
    pub years: u32,
}

impl Default for ProjectionBasis {
    fn default() -> Self {
        Self {
            tariff_per_kwh: DEFAULT_TARIFF_PER_KWH,
            psu_efficiency: DEFAULT_PSU_EFFICIENCY,
            years: DEFAULT_PROJECTION_YEARS,
        }
    }
}

impl ProjectionBasis {
    pub fn validate(&self) -> Result<()> {
        check_tariff(self.tariff_per_kwh)?;
        check_efficiency(self.psu_efficiency)?;
        if self.years < 1 {
            return Err(CalcError::InvalidYears(self.years));
        }
        Ok(())
    }
}

/// Energy and cost over one horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostProjection {
    pub horizon: Horizon,
    pub hours: f64,
    pub energy_kwh: f64,
    pub cost: f64,
}

impl CostProjection {
    pub fn compute(total_tdp_watts: f64, tariff_per_kwh: f64, horizon: Horizon) -> Result<Self> {
        let hours = horizon.hours();
        Ok(Self {
            horizon,
            hours,
            energy_kwh: project_energy_kwh(total_tdp_watts, hours)?,
            cost: project_energy_cost(total_tdp_watts, tariff_per_kwh, hours)?,
        })
    }
}

/// Everything derived from a total TDP under a given basis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSummary {
    pub total_tdp_watts: f64,
    pub recommended_psu_watts: u64,
    pub basis: ProjectionBasis,
    pub projections: Vec<CostProjection>,
}

impl ProjectionSummary {
    pub fn compute(total_tdp_watts: f64, basis: &ProjectionBasis) -> Result<Self> {
        basis.validate()?;
        let recommended_psu_watts = recommended_psu_watts(total_tdp_watts, basis.psu_efficiency)?;
        let projections = Horizon::canonical(basis.years)
            .into_iter()
            .map(|horizon| CostProjection::compute(total_tdp_watts, basis.tariff_per_kwh, horizon))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            total_tdp_watts,
            recommended_psu_watts,
            basis: *basis,
            projections,
        })
    }

    pub fn projection(&self, horizon: Horizon) -> Option<&CostProjection> {
        self.projections.iter().find(|p| p.horizon == horizon)
    }
}
