use crate::error::Result;
use crate::models::PackageName;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// The parts of a `package.json` this tool reads
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub dependencies: Map<String, Value>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: Map<String, Value>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let manifest: Manifest = serde_json::from_str(&raw)?;
        debug!(
            path = %path.display(),
            dependencies = manifest.dependencies.len(),
            dev_dependencies = manifest.dev_dependencies.len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Regular then development dependency names, deduplicated
    pub fn package_names(&self) -> Vec<PackageName> {
        collect_dependencies(self.dependencies.keys(), self.dev_dependencies.keys())
    }
}

/// Union of two dependency name lists, keeping the first occurrence of each name.
pub fn collect_dependencies<R, D>(regular: R, dev: D) -> Vec<PackageName>
where
    R: IntoIterator,
    R::Item: AsRef<str>,
    D: IntoIterator,
    D::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    regular
        .into_iter()
        .map(|n| n.as_ref().to_string())
        .chain(dev.into_iter().map(|n| n.as_ref().to_string()))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
