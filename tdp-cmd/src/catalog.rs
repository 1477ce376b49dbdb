//! Resolve the command-line catalog options to a catalog source.

use anyhow::Context;
use log::{info, warn};
use std::path::Path;
use tdp_calc::{CatalogLoad, PowerBudgetCalculator};
use tdp_catalog::rest::RestCatalogSource;
use tdp_catalog::CatalogSource;
use tdp_db::CatalogDatabase;

use crate::CatalogArgs;

pub const PARTS_FILE: &str = "parts.csv";
pub const GPUS_FILE: &str = "gpus.csv";

/// Load `parts.csv` and `gpus.csv` from `dir` into an in-memory database.
///
/// A missing file leaves its partition empty. A file that does not parse is
/// an error.
pub fn load_directory(dir: &Path) -> anyhow::Result<CatalogDatabase> {
    let db = CatalogDatabase::new()?;
    let parts_path = dir.join(PARTS_FILE);
    if parts_path.exists() {
        db.load_parts(&std::fs::read_to_string(&parts_path)?)
            .with_context(|| format!("failed to load {}", parts_path.display()))?;
    } else {
        warn!("{} not found, no common parts loaded", parts_path.display());
    }
    let gpus_path = dir.join(GPUS_FILE);
    if gpus_path.exists() {
        db.load_gpus(&std::fs::read_to_string(&gpus_path)?)
            .with_context(|| format!("failed to load {}", gpus_path.display()))?;
    } else {
        warn!("{} not found, no GPUs loaded", gpus_path.display());
    }
    Ok(db)
}

/// Build the catalog source selected by `args`.
pub fn open_source(args: &CatalogArgs) -> anyhow::Result<Box<dyn CatalogSource>> {
    match &args.catalog_url {
        Some(url) => {
            let Some(api_key) = args.api_key.as_deref() else {
                anyhow::bail!("--catalog-url requires --api-key (or TDP_CATALOG_API_KEY)");
            };
            info!("Using hosted catalog at {}", url);
            Ok(Box::new(RestCatalogSource::new(url, api_key)?))
        }
        None => {
            info!("Using catalog fixtures in {}", args.catalog_dir.display());
            Ok(Box::new(load_directory(&args.catalog_dir)?))
        }
    }
}

/// Load the catalog into `calc`, surfacing partition warnings to the user.
pub async fn load_into(
    calc: &mut PowerBudgetCalculator,
    args: &CatalogArgs,
) -> anyhow::Result<CatalogLoad> {
    let source = open_source(args)?;
    let load = calc.load_catalog(source.as_ref()).await?;
    for warning in &load.warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixtures_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures")
    }

    #[test]
    fn loads_fixture_directory() {
        let db = load_directory(&fixtures_dir()).unwrap();
        assert_eq!(db.query_parts().unwrap().len(), 16);
        assert_eq!(db.query_gpus().unwrap().len(), 6);
    }

    #[test]
    fn missing_directory_yields_empty_catalog() {
        let db = load_directory(Path::new("/nonexistent/tdp-catalog")).unwrap();
        assert_eq!(db.count_parts().unwrap(), 0);
    }

    #[test]
    fn unparsable_file_is_an_error_not_an_empty_catalog() {
        let dir = std::env::temp_dir().join(format!("tdp-bad-catalog-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(PARTS_FILE), "name,type,watts\nEPYC,cpu,360\n").unwrap();
        match load_directory(&dir) {
            Ok(_) => panic!("a parts file with the wrong columns must not load"),
            Err(e) => assert!(e.to_string().contains(PARTS_FILE)),
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn catalog_url_requires_key() {
        let args = CatalogArgs {
            catalog_dir: fixtures_dir(),
            catalog_url: Some("https://db.example.com".to_string()),
            api_key: None,
        };
        assert!(open_source(&args).is_err());
    }

    #[tokio::test]
    async fn load_into_calculator_from_fixtures() {
        let args = CatalogArgs {
            catalog_dir: fixtures_dir(),
            catalog_url: None,
            api_key: None,
        };
        let mut calc = PowerBudgetCalculator::default();
        let load = load_into(&mut calc, &args).await.unwrap();
        assert_eq!(load.common_parts, 16);
        assert_eq!(load.gpus, 6);
        assert!(!load.is_partial());
    }
}
