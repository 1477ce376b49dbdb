//! Pure projection for a known total TDP, no catalog required.

use std::fmt::Write;
use tdp_calc::{ProjectionBasis, ProjectionSummary};
use tdp_utils::numbers::{format_fixed, format_grouped};

use crate::BasisArgs;

/// Format the PSU recommendation and per-horizon projections as text.
pub fn render_summary(summary: &ProjectionSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total TDP:           {} W", format_grouped(summary.total_tdp_watts, 0));
    let _ = writeln!(
        out,
        "Recommended PSU:     {} W (at {}% efficiency)",
        format_grouped(summary.recommended_psu_watts as f64, 0),
        format_fixed(summary.basis.psu_efficiency * 100.0, 0)
    );
    let _ = writeln!(out, "Tariff:              {} per kWh", summary.basis.tariff_per_kwh);
    for projection in &summary.projections {
        let _ = writeln!(
            out,
            "{:<10} {:>16} kWh {:>20}",
            projection.horizon.to_string(),
            format_grouped(projection.energy_kwh, 2),
            format_grouped(projection.cost, 2)
        );
    }
    out
}

pub fn run_project(watts: f64, basis: &BasisArgs, json: bool) -> anyhow::Result<()> {
    let basis: ProjectionBasis = basis.into();
    let summary = ProjectionSummary::compute(watts, &basis)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_summary_lists_every_horizon() {
        let summary = ProjectionSummary::compute(700.0, &ProjectionBasis::default()).unwrap();
        let text = render_summary(&summary);
        assert!(text.contains("Recommended PSU:     875 W (at 80% efficiency)"));
        assert!(text.contains("Daily"));
        assert!(text.contains("2,188.03"));
        assert!(text.contains("5-year"));
        assert_eq!(text.lines().count(), 3 + 5);
    }

    #[test]
    fn run_project_rejects_negative_watts() {
        let basis = BasisArgs {
            tariff: 130.24,
            efficiency: 0.8,
            years: 5,
        };
        assert!(run_project(-5.0, &basis, false).is_err());
    }
}
