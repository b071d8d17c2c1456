//! Lab, material, shade and impression catalog
//!
//! The built-in catalog is embedded from `catalog/`. A directory with the
//! same four files can replace it through `catalog_dir` in the config.

use std::path::Path;

use miette::Diagnostic;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::case_type::CaseType;
use crate::yaml::{parse_yaml, YamlError};

#[derive(Embed)]
#[folder = "catalog/"]
struct EmbeddedCatalog;

const LABS_FILE: &str = "labs.yaml";
const MATERIALS_FILE: &str = "materials.yaml";
const SHADES_FILE: &str = "shades.yaml";
const IMPRESSION_MATERIALS_FILE: &str = "impression_materials.yaml";

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    #[diagnostic(code(dlo::catalog::missing))]
    Missing(String),

    #[error("Catalog file {0} is not valid UTF-8")]
    #[diagnostic(code(dlo::catalog::encoding))]
    Encoding(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] YamlError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnaround_days: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Case types this material is offered for; empty means all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub case_types: Vec<CaseType>,
}

impl Material {
    pub fn applies_to(&self, case_type: CaseType) -> bool {
        self.case_types.is_empty() || self.case_types.contains(&case_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub labs: Vec<Lab>,
    pub materials: Vec<Material>,
    pub shades: Vec<String>,
    pub impression_materials: Vec<String>,
}

impl Catalog {
    /// The catalog compiled into the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_source(|name| {
            let file = EmbeddedCatalog::get(name)
                .ok_or_else(|| CatalogError::Missing(name.to_string()))?;
            String::from_utf8(file.data.into_owned())
                .map_err(|_| CatalogError::Encoding(name.to_string()))
        })
    }

    /// Load a catalog from a directory holding the four catalog files
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        Self::from_source(|name| {
            let path = dir.join(name);
            if !path.is_file() {
                return Err(CatalogError::Missing(path.display().to_string()));
            }
            std::fs::read_to_string(&path).map_err(|e| CatalogError::Parse(YamlError::Io(e)))
        })
    }

    /// Directory override if given, otherwise the embedded catalog
    pub fn load(dir: Option<&Path>) -> Result<Self, CatalogError> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }

    fn from_source(
        read: impl Fn(&str) -> Result<String, CatalogError>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            labs: parse_yaml(&read(LABS_FILE)?, LABS_FILE)?,
            materials: parse_yaml(&read(MATERIALS_FILE)?, MATERIALS_FILE)?,
            shades: parse_yaml(&read(SHADES_FILE)?, SHADES_FILE)?,
            impression_materials: parse_yaml(
                &read(IMPRESSION_MATERIALS_FILE)?,
                IMPRESSION_MATERIALS_FILE,
            )?,
        };
        tracing::debug!(
            labs = catalog.labs.len(),
            materials = catalog.materials.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn lab(&self, id: &str) -> Option<&Lab> {
        self.labs.iter().find(|lab| lab.id == id)
    }

    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Materials offered for a case type, in catalog order
    pub fn materials_for(&self, case_type: CaseType) -> Vec<&Material> {
        self.materials
            .iter()
            .filter(|m| m.applies_to(case_type))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shade::METAL_ONLY_MATERIALS;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.labs.is_empty());
        assert!(catalog.shades.contains(&"A2".to_string()));
        assert!(catalog.impression_materials.contains(&"PVS".to_string()));
    }

    #[test]
    fn test_metal_only_ids_exist_in_catalog() {
        let catalog = Catalog::embedded().unwrap();
        for id in METAL_ONLY_MATERIALS {
            assert!(catalog.material(id).is_some(), "missing material {}", id);
        }
    }

    #[test]
    fn test_every_case_type_has_a_material() {
        let catalog = Catalog::embedded().unwrap();
        for case_type in CaseType::all() {
            assert!(
                !catalog.materials_for(*case_type).is_empty(),
                "no material for {}",
                case_type
            );
        }
    }

    #[test]
    fn test_materials_for_filters() {
        let catalog = Catalog::embedded().unwrap();
        let ids: Vec<&str> = catalog
            .materials_for(CaseType::InlayOnlay)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert!(ids.contains(&"gold-inlay"));
        assert!(!ids.contains(&"zirconia-mono"));
    }

    #[test]
    fn test_from_dir_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LABS_FILE), "- id: a\n  name: A\n").unwrap();
        let err = Catalog::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Missing(_)));
    }

    #[test]
    fn test_from_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LABS_FILE), "- id: lab-x\n  name: X\n").unwrap();
        std::fs::write(
            dir.path().join(MATERIALS_FILE),
            "- id: resin\n  name: Resin\n",
        )
        .unwrap();
        std::fs::write(dir.path().join(SHADES_FILE), "- A1\n").unwrap();
        std::fs::write(dir.path().join(IMPRESSION_MATERIALS_FILE), "- PVS\n").unwrap();

        let catalog = Catalog::load(Some(dir.path())).unwrap();
        assert_eq!(catalog.lab("lab-x").unwrap().name, "X");
        assert_eq!(catalog.materials_for(CaseType::Crown).len(), 1);
    }
}
