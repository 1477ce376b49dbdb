use csv::ReaderBuilder;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use crate::category::ComponentCategory;
use crate::error::{CatalogError, Result};
use crate::specification::Specifications;

/// GPU throughput columns, in the order they are stored.
pub const GPU_SPEC_COLUMNS: [&str; 6] = [
    "fp64_tf", "tf32_pf", "fp16_pf", "fp8_pf", "int8_pops", "fp4_pf",
];

/// One purchasable hardware part as published by the catalog.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ComponentCatalogEntry {
    pub category: ComponentCategory,
    /// Display name; unique within a category only
    pub model_name: String,
    /// Rated power draw in watts, zero for passive parts
    pub tdp_watts: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Specifications>,
}

/// A column that must be present but may hold an empty value. A missing
/// column fails deserialization of the whole source.
fn required_column<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Raw row of the generic parts collection: `model_name, part_type, tdp`.
#[derive(Debug, Clone, Deserialize)]
pub struct PartRow {
    #[serde(deserialize_with = "required_column")]
    pub model_name: Option<String>,
    #[serde(deserialize_with = "required_column")]
    pub part_type: Option<String>,
    #[serde(deserialize_with = "required_column")]
    pub tdp: Option<f64>,
}

/// Raw row of the GPU collection. Throughput columns may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct GpuRow {
    #[serde(deserialize_with = "required_column")]
    pub model_name: Option<String>,
    #[serde(deserialize_with = "required_column")]
    pub tdp: Option<f64>,
    #[serde(default)]
    pub fp64_tf: Option<f64>,
    #[serde(default)]
    pub tf32_pf: Option<f64>,
    #[serde(default)]
    pub fp16_pf: Option<f64>,
    #[serde(default)]
    pub fp8_pf: Option<f64>,
    #[serde(default)]
    pub int8_pops: Option<f64>,
    #[serde(default)]
    pub fp4_pf: Option<f64>,
}

fn model_name(raw: Option<String>) -> Result<String> {
    match raw.map(|s| s.trim().to_string()) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(CatalogError::MissingModelName),
    }
}

fn tdp_watts(model: &str, raw: Option<f64>) -> Result<f64> {
    match raw {
        Some(w) if w.is_finite() && w >= 0.0 => Ok(w),
        other => Err(CatalogError::InvalidTdp {
            model: model.to_string(),
            value: other.map(|w| w.to_string()).unwrap_or_else(|| "null".to_string()),
        }),
    }
}

impl TryFrom<PartRow> for ComponentCatalogEntry {
    type Error = CatalogError;

    fn try_from(row: PartRow) -> Result<Self> {
        let model_name = model_name(row.model_name)?;
        let category = row.part_type.as_deref().unwrap_or("").parse::<ComponentCategory>()?;
        let tdp_watts = tdp_watts(&model_name, row.tdp)?;
        Ok(ComponentCatalogEntry {
            category,
            model_name,
            tdp_watts,
            specifications: None,
        })
    }
}

impl TryFrom<GpuRow> for ComponentCatalogEntry {
    type Error = CatalogError;

    fn try_from(row: GpuRow) -> Result<Self> {
        let model_name = model_name(row.model_name)?;
        let tdp_watts = tdp_watts(&model_name, row.tdp)?;
        let values = [
            row.fp64_tf,
            row.tf32_pf,
            row.fp16_pf,
            row.fp8_pf,
            row.int8_pops,
            row.fp4_pf,
        ];
        let mut specs = Specifications::new();
        for (key, value) in GPU_SPEC_COLUMNS.iter().zip(values) {
            if let Some(v) = value {
                specs.insert(*key, v);
            }
        }
        Ok(ComponentCatalogEntry {
            category: ComponentCategory::Gpu,
            model_name,
            tdp_watts,
            specifications: (!specs.is_empty()).then_some(specs),
        })
    }
}

/// Convert raw rows into entries, skipping rows that fail validation.
pub fn entries_from_rows<R>(rows: Vec<R>) -> Vec<ComponentCatalogEntry>
where
    R: TryInto<ComponentCatalogEntry, Error = CatalogError>,
{
    let total = rows.len();
    let entries: Vec<ComponentCatalogEntry> = rows
        .into_iter()
        .filter_map(|row| match row.try_into() {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping catalog row: {}", e);
                None
            }
        })
        .collect();
    if entries.len() < total {
        warn!("Skipped {} of {} catalog rows", total - entries.len(), total);
    }
    entries
}

fn read_rows<R: for<'de> Deserialize<'de>>(csv_object: &str) -> Result<Vec<R>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_object.as_bytes());
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

impl ComponentCatalogEntry {
    /// Parse a CSV string of generic parts.
    ///
    /// Expected CSV columns: model_name, part_type, tdp
    pub fn parse_parts_csv(csv_object: &str) -> Result<Vec<ComponentCatalogEntry>> {
        Ok(entries_from_rows(read_rows::<PartRow>(csv_object)?))
    }

    /// Parse a CSV string of GPUs.
    ///
    /// Expected CSV columns: model_name, tdp, fp64_tf, tf32_pf, fp16_pf, fp8_pf, int8_pops, fp4_pf
    pub fn parse_gpus_csv(csv_object: &str) -> Result<Vec<ComponentCatalogEntry>> {
        Ok(entries_from_rows(read_rows::<GpuRow>(csv_object)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::SpecValue;

    #[test]
    fn test_parse_parts_csv() {
        let csv_data = "\
model_name,part_type,tdp
AMD EPYC 9654,cpu,360
Dell PowerEdge R760xa 2U,chassis,0
고성능 공랭 쿨러 (2U),cooling,12
";
        let parts = ComponentCatalogEntry::parse_parts_csv(csv_data).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].category, ComponentCategory::Cpu);
        assert_eq!(parts[0].model_name, "AMD EPYC 9654");
        assert!((parts[0].tdp_watts - 360.0).abs() < f64::EPSILON);
        assert_eq!(parts[1].tdp_watts, 0.0);
        assert_eq!(parts[2].model_name, "고성능 공랭 쿨러 (2U)");
        assert!(parts.iter().all(|p| p.specifications.is_none()));
    }

    #[test]
    fn test_parse_parts_skips_invalid_rows() {
        let csv_data = "\
model_name,part_type,tdp
Good CPU,cpu,200
Bad Type,psu,100
Negative,gpu,-5
,disk,10
No TDP,disk,
";
        let parts = ComponentCatalogEntry::parse_parts_csv(csv_data).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].model_name, "Good CPU");
    }

    #[test]
    fn test_parse_gpus_csv_omits_null_columns() {
        let csv_data = "\
model_name,tdp,fp64_tf,tf32_pf,fp16_pf,fp8_pf,int8_pops,fp4_pf
NVIDIA H100 SXM5 80GB,700,67,0.989,1.979,3.958,3.958,
";
        let gpus = ComponentCatalogEntry::parse_gpus_csv(csv_data).unwrap();
        assert_eq!(gpus.len(), 1);
        let gpu = &gpus[0];
        assert_eq!(gpu.category, ComponentCategory::Gpu);
        let specs = gpu.specifications.as_ref().unwrap();
        assert_eq!(specs.len(), 5);
        assert_eq!(specs.get("fp64_tf"), Some(&SpecValue::Number(67.0)));
        assert!(specs.get("fp4_pf").is_none());
    }

    #[test]
    fn test_gpu_row_from_json() {
        let rows: Vec<GpuRow> = serde_json::from_str(
            r#"[{"model_name":"NVIDIA B200","tdp":1000,"fp64_tf":40,"tf32_pf":2.2,"fp16_pf":4.5,"fp8_pf":9,"int8_pops":9,"fp4_pf":18}]"#,
        )
        .unwrap();
        let gpus = entries_from_rows(rows);
        assert_eq!(gpus.len(), 1);
        assert_eq!(gpus[0].specifications.as_ref().unwrap().len(), 6);
    }

    #[test]
    fn test_wrong_csv_headers_are_an_error() {
        let result =
            ComponentCatalogEntry::parse_parts_csv("name,type,watts\nEPYC,cpu,360\nH100,gpu,700\n");
        assert!(matches!(result, Err(CatalogError::CsvParse(_))));
        let result = ComponentCatalogEntry::parse_gpus_csv("name,watts\nH100,700\n");
        assert!(matches!(result, Err(CatalogError::CsvParse(_))));
    }

    #[test]
    fn test_wrong_json_keys_are_an_error() {
        let parts = serde_json::from_str::<Vec<PartRow>>(r#"[{"name":"EPYC","watts":360}]"#);
        assert!(parts.is_err());
        let gpus = serde_json::from_str::<Vec<GpuRow>>(r#"[{"model":"H100","tdp":700}]"#);
        assert!(gpus.is_err());
    }

    #[test]
    fn test_null_values_in_present_columns_are_row_failures() {
        let rows: Vec<PartRow> = serde_json::from_str(
            r#"[{"model_name":"EPYC","part_type":"cpu","tdp":null},{"model_name":"Fan","part_type":"cooling","tdp":12}]"#,
        )
        .unwrap();
        let parts = entries_from_rows(rows);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].model_name, "Fan");
    }

    #[test]
    fn test_parse_empty_csv() {
        let parts = ComponentCatalogEntry::parse_parts_csv("model_name,part_type,tdp\n").unwrap();
        assert!(parts.is_empty());
    }
}
