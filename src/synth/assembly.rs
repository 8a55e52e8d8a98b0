//! Assembly output
//!
//! Writes synthesized stacks and a manifest describing them into an
//! output directory.

use super::stack::Stack;
use crate::domain::EnvironmentName;
use crate::error::SynthError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest file name inside an assembly directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Manifest schema version
pub const MANIFEST_VERSION: u32 = 1;

/// One stack in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub stack_name: String,
    pub environment: EnvironmentName,
    pub template_file: String,
    pub alarm_count: usize,
}

/// Assembly manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub stacks: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn from_stacks(stacks: &[Stack]) -> Self {
        Self {
            version: MANIFEST_VERSION,
            stacks: stacks
                .iter()
                .map(|s| ManifestEntry {
                    stack_name: s.name.clone(),
                    environment: s.environment,
                    template_file: s.template_file(),
                    alarm_count: s.alarm_count,
                })
                .collect(),
        }
    }

    /// Read a manifest back from an assembly directory
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, SynthError> {
        let path = dir.as_ref().join(MANIFEST_FILE);
        let contents = std::fs::read_to_string(&path).map_err(|source| SynthError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Stacks bound to an output directory
pub struct Assembly {
    dir: PathBuf,
    stacks: Vec<Stack>,
}

impl Assembly {
    pub fn new<P: Into<PathBuf>>(dir: P, stacks: Vec<Stack>) -> Self {
        Self {
            dir: dir.into(),
            stacks,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    /// Files `write` would create, manifest last
    pub fn planned_files(&self) -> Vec<PathBuf> {
        self.stacks
            .iter()
            .map(|s| self.dir.join(s.template_file()))
            .chain(std::iter::once(self.dir.join(MANIFEST_FILE)))
            .collect()
    }

    /// Write every template and the manifest
    pub fn write(&self) -> Result<Manifest, SynthError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| SynthError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;

        for stack in &self.stacks {
            let path = self.dir.join(stack.template_file());
            write_file(&path, &stack.template.to_json_pretty()?)?;
            log::info!("Wrote {}", path.display());
        }

        let manifest = Manifest::from_stacks(&self.stacks);
        let path = self.dir.join(MANIFEST_FILE);
        write_file(&path, &serde_json::to_string_pretty(&manifest)?)?;
        log::debug!("Wrote {}", path.display());

        Ok(manifest)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), SynthError> {
    std::fs::write(path, contents).map_err(|source| SynthError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::generator::AlarmGenerator;
    use tempfile::TempDir;

    fn stacks() -> Vec<Stack> {
        let envs = Config::default().resolve_environments(&[]).unwrap();
        AlarmGenerator::default()
            .generate_all(&envs)
            .unwrap()
            .iter()
            .map(|g| Stack::synthesize(g).unwrap())
            .collect()
    }

    #[test]
    fn test_planned_files() {
        let assembly = Assembly::new("out", stacks());
        let files = assembly.planned_files();
        assert_eq!(files.len(), 3);
        assert_eq!(files[2], PathBuf::from("out").join(MANIFEST_FILE));
    }

    #[test]
    fn test_write_assembly() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("assembly");
        let assembly = Assembly::new(&out, stacks());

        let manifest = assembly.write().unwrap();
        assert_eq!(manifest.stacks.len(), 2);
        for path in assembly.planned_files() {
            assert!(path.exists(), "{} missing", path.display());
        }

        let loaded = Manifest::load(&out).unwrap();
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.stacks[1].environment, EnvironmentName::Staging);
        assert_eq!(loaded.stacks[1].alarm_count, 33);

        let template: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(out.join(&loaded.stacks[0].template_file)).unwrap(),
        )
        .unwrap();
        assert_eq!(template["Resources"].as_object().unwrap().len(), 33);
    }

    #[test]
    fn test_manifest_field_names() {
        let manifest = Manifest::from_stacks(&stacks());
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["stacks"][0]["stackName"], "AHS-EHR-Dev-Monitoring-Stack");
        assert_eq!(json["stacks"][0]["environment"], "Dev");
    }
}
