use crate::error::{CropFitError, Result};
use crate::models::Crop;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(CatalogFormat::Yaml),
            Some("json") => Ok(CatalogFormat::Json),
            _ => Err(CropFitError::InvalidData(format!(
                "cannot tell catalog format of {:?}; use .yaml, .yml or .json",
                path
            ))),
        }
    }
}

/// A catalog file is either a bare list of crops or `{ crops: [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Crop>),
    Wrapped { crops: Vec<Crop> },
}

impl From<CatalogFile> for Vec<Crop> {
    fn from(file: CatalogFile) -> Self {
        match file {
            CatalogFile::List(crops) => crops,
            CatalogFile::Wrapped { crops } => crops,
        }
    }
}

pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<Vec<Crop>> {
    let file: CatalogFile = match format {
        CatalogFormat::Yaml => serde_yaml::from_str(content)?,
        CatalogFormat::Json => serde_json::from_str(content)?,
    };
    Ok(file.into())
}

pub fn load_catalog(path: &Path) -> Result<Vec<Crop>> {
    if !path.exists() {
        return Err(CropFitError::NotFound(format!(
            "crop catalog {:?}",
            path
        )));
    }
    let format = CatalogFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let crops = parse_catalog(&content, format)?;
    tracing::info!(path = %path.display(), crops = crops.len(), "Loaded crop catalog");
    Ok(crops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Month, SoilType};

    const YAML: &str = r#"
- name: tomato
  ph_min: 6.0
  ph_max: 6.8
  temp_min: 18
  temp_max: 29
  rain_min: 400
  rain_max: 800
  soil_type: loam
  growing_season: [February, March]
  crop_rotation: [onion, garlic]
- name: okra
"#;

    #[test]
    fn parses_yaml_list() {
        let crops = parse_catalog(YAML, CatalogFormat::Yaml).unwrap();
        assert_eq!(crops.len(), 2);
        assert_eq!(crops[0].soil_type, Some(SoilType::Loam));
        assert_eq!(crops[0].growing_season, vec![Month::February, Month::March]);
        assert!(crops[1].ph_range().is_unknown());
    }

    #[test]
    fn parses_wrapped_json() {
        let json = r#"{"crops": [{"name": "wheat", "phMin": 6.0, "phMax": 7.5}]}"#;
        let crops = parse_catalog(json, CatalogFormat::Json).unwrap();
        assert_eq!(crops.len(), 1);
        assert_eq!(crops[0].ph_max, 7.5);
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            CatalogFormat::from_path(Path::new("crops.YML")).unwrap(),
            CatalogFormat::Yaml
        );
        assert_eq!(
            CatalogFormat::from_path(Path::new("crops.json")).unwrap(),
            CatalogFormat::Json
        );
        assert!(CatalogFormat::from_path(Path::new("crops.csv")).is_err());
    }

    #[test]
    fn load_from_disk() {
        let path = std::env::temp_dir().join(format!("cropfit-catalog-{}.yaml", std::process::id()));
        std::fs::write(&path, YAML).unwrap();
        let crops = load_catalog(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(crops[0].name, "tomato");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_catalog(Path::new("/nonexistent/crops.yaml")).unwrap_err();
        assert!(matches!(err, CropFitError::NotFound(_)));
    }
}
