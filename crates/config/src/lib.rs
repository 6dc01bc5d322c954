//! Configuration models and loaders for the small-body orbit kernel.

use std::fs::File;
use std::path::{Path, PathBuf};

use neo_kepler::SolverSettings;
use neo_orbits::{ElementRecord, ElementsError, OrbitalElements};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// A named small body and its osculating elements.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ObjectConfig {
    pub name: String,
    #[serde(default)]
    pub designation: Option<String>,
    pub elements: ElementRecord,
}

impl ObjectConfig {
    /// Validate the raw record into propagatable elements.
    pub fn elements(&self) -> Result<OrbitalElements, ConfigError> {
        OrbitalElements::try_from(self.elements).map_err(|source| ConfigError::InvalidElements {
            name: self.name.clone(),
            source,
        })
    }

    fn matches(&self, query: &str) -> bool {
        let upper = query.to_uppercase();
        self.name.to_uppercase() == upper
            || self
                .designation
                .as_deref()
                .map(|d| d.to_uppercase() == upper)
                .unwrap_or(false)
    }
}

/// Default sampling grid used when the caller does not supply one.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SamplingDefaults {
    pub step_days: f64,
    pub step_count: usize,
}

impl Default for SamplingDefaults {
    fn default() -> Self {
        Self {
            step_days: 1.0,
            step_count: 365,
        }
    }
}

/// Kernel-wide settings file.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct KernelSettings {
    pub solver: SolverSettings,
    pub sampling: SamplingDefaults,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("object '{name}' has invalid elements: {source}")]
    InvalidElements {
        name: String,
        #[source]
        source: ElementsError,
    },
    #[error("object '{0}' not found in catalog")]
    NotFound(String),
    #[error("object catalog is empty")]
    EmptyCatalog,
}

/// Load object definitions from a YAML list, a TOML file, or a directory of TOML files.
pub fn load_objects<P: AsRef<Path>>(path: P) -> Result<Vec<ObjectConfig>, ConfigError> {
    let objects: Vec<ObjectConfig> = load_records(path.as_ref())?;
    debug!(count = objects.len(), path = %path.as_ref().display(), "loaded object catalog");
    Ok(objects)
}

/// Load kernel settings from a TOML file. Missing keys keep their defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<KernelSettings, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Find an object by name or designation (case-insensitive).
pub fn find_object<'a>(
    objects: &'a [ObjectConfig],
    query: &str,
) -> Result<&'a ObjectConfig, ConfigError> {
    if objects.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }
    objects
        .iter()
        .find(|object| object.matches(query))
        .ok_or_else(|| ConfigError::NotFound(query.to_string()))
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<PathBuf>, _>>()?;
    entries.retain(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false));
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const OBJECT_TOML: &str = r#"
name = "Test Body"
designation = "2000 AA"

[elements]
a = 2.5
e = 0.1
i = 5.0
om = 100.0
w = 200.0
ma = 30.0
epoch = 2460000.5
"#;

    #[test]
    fn loads_directory_of_toml_objects_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("b.toml"), OBJECT_TOML.replace("Test Body", "Beta")).unwrap();
        fs::write(dir.path().join("a.toml"), OBJECT_TOML.replace("Test Body", "Alpha")).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let objects = load_objects(dir.path()).expect("objects");
        let names: Vec<_> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Beta"]);
    }

    #[test]
    fn unreadable_catalog_entry_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.toml"), OBJECT_TOML).unwrap();
        fs::create_dir(dir.path().join("b.toml")).unwrap();

        assert!(matches!(load_objects(dir.path()), Err(ConfigError::Io(_))));
    }

    #[test]
    fn missing_catalog_directory_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("objects");
        assert!(matches!(load_objects(&missing), Err(ConfigError::Io(_))));
    }

    #[test]
    fn loads_yaml_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("objects.yaml");
        fs::write(
            &path,
            "- name: Yaml Body\n  elements: { a: 1.1, e: 0.05, i: 1.0, om: 2.0, w: 3.0, tp: 2460100.0 }\n",
        )
        .unwrap();
        let objects = load_objects(&path).expect("objects");
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].elements.tp, Some(2_460_100.0));
        assert!(objects[0].elements().is_ok());
    }

    #[test]
    fn find_object_matches_name_or_designation() {
        let object: ObjectConfig = toml::from_str(OBJECT_TOML).unwrap();
        let catalog = vec![object];
        assert_eq!(find_object(&catalog, "test body").unwrap().name, "Test Body");
        assert_eq!(find_object(&catalog, "2000 aa").unwrap().name, "Test Body");
        assert!(matches!(
            find_object(&catalog, "Nope"),
            Err(ConfigError::NotFound(_))
        ));
        assert!(matches!(find_object(&[], "x"), Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn invalid_elements_name_the_object() {
        let mut object: ObjectConfig = toml::from_str(OBJECT_TOML).unwrap();
        object.elements.e = 1.2;
        let err = object.elements().unwrap_err();
        assert!(err.to_string().contains("Test Body"), "{err}");
    }

    #[test]
    fn settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kernel.toml");
        fs::write(&path, "[solver]\nmax_iterations = 25\n").unwrap();
        let settings = load_settings(&path).expect("settings");
        assert_eq!(settings.solver.max_iterations, 25);
        assert_eq!(settings.solver.tolerance, SolverSettings::DEFAULT_TOLERANCE);
        assert_eq!(settings.sampling, SamplingDefaults::default());
    }
}
