//! Fragment loader
//!
//! Builds the merged deployment document from every fragment on disk plus
//! any deleted fragments recovered by the scope resolver, and feeds each
//! fragment to the resolver so it can collect target names.

use std::path::{Path, PathBuf};

use crate::config::LayoutConfig;
use crate::domain::entities::{Mapping, Node};
use crate::domain::services::merge_fragments;
use crate::domain::value_objects::TargetNames;
use crate::error::{ZitifyError, ZitifyResult};
use crate::infrastructure::FsFragmentSource;

use super::scope::ScopeResolution;

/// Merged document plus the scope it was loaded under.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDeployment {
    /// Merged model content (root key already unwrapped)
    pub model: Mapping,
    /// On-disk fragments in merge order
    pub fragments: Vec<PathBuf>,
    pub scope: ScopeResolution,
}

impl LoadedDeployment {
    pub fn target_names(&self) -> TargetNames {
        self.scope.target_names()
    }

    /// Render the merged model as a YAML document.
    pub fn to_yaml(&self) -> ZitifyResult<String> {
        Ok(serde_yaml_ng::to_string(&Node::Map(self.model.clone()))?)
    }
}

pub struct FragmentLoader<'a> {
    source: FsFragmentSource<'a>,
}

impl<'a> FragmentLoader<'a> {
    pub fn new(layout: &'a LayoutConfig) -> Self {
        Self {
            source: FsFragmentSource::new(layout),
        }
    }

    pub fn load(&self, base: &Path, mut scope: ScopeResolution) -> ZitifyResult<LoadedDeployment> {
        if !base.is_dir() {
            return Err(ZitifyError::DirectoryNotFound {
                path: base.to_path_buf(),
            });
        }

        let paths = self.source.discover(base)?;
        let mut fragments = Vec::with_capacity(paths.len() + scope.recovered().len());

        for rel in &paths {
            let fragment = self.source.read(base, rel)?;
            tracing::debug!(
                path = %rel.display(),
                change = ?scope.classify(rel),
                "read fragment"
            );
            scope.observe(&fragment);
            fragments.push(fragment);
        }
        fragments.extend(scope.recovered().iter().cloned());

        let model = merge_fragments(fragments);

        tracing::info!(
            fragments = paths.len(),
            recovered = scope.recovered().len(),
            "loaded deployment fragments"
        );

        Ok(LoadedDeployment {
            model,
            fragments: paths,
            scope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(base: &Path, rel: &str, content: &str) {
        let path = base.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn service_names(model: &Mapping) -> Vec<&str> {
        model["services"]
            .as_seq()
            .unwrap()
            .iter()
            .map(|s| s.as_map().unwrap()["name"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn load_merges_services_and_identities() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "deployments/services/web.yml",
            "ziti_deployment:\n  services:\n    - name: web\n",
        );
        write(
            dir.path(),
            "deployments/services/db.yaml",
            "services:\n  - name: db\n",
        );
        write(
            dir.path(),
            "deployments/identities/people.yml",
            "identities:\n  - name: alice\n",
        );
        write(dir.path(), "deployments/identities/empty.yml", "");

        let layout = LayoutConfig::default();
        let loaded = FragmentLoader::new(&layout)
            .load(dir.path(), ScopeResolution::disabled())
            .unwrap();

        assert_eq!(loaded.fragments.len(), 4);
        assert_eq!(service_names(&loaded.model), vec!["db", "web"]);
        assert_eq!(loaded.model["identities"].as_seq().unwrap().len(), 1);
        assert_eq!(loaded.target_names(), TargetNames::Unbounded);
    }

    #[test]
    fn to_yaml_renders_merged_model() {
        let dir = tempdir().unwrap();
        write(dir.path(), "deployments/services/a.yml", "services:\n  - name: a\n");
        write(dir.path(), "deployments/services/b.yml", "services:\n  - name: b\n");

        let layout = LayoutConfig::default();
        let loaded = FragmentLoader::new(&layout)
            .load(dir.path(), ScopeResolution::disabled())
            .unwrap();

        let yaml = loaded.to_yaml().unwrap();
        let reparsed: serde_yaml_ng::Value = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(reparsed["services"][1]["name"].as_str(), Some("b"));
    }

    #[test]
    fn load_missing_base_is_error() {
        let layout = LayoutConfig::default();
        let err = FragmentLoader::new(&layout)
            .load(Path::new("/nonexistent/zitify-base"), ScopeResolution::disabled())
            .unwrap_err();
        assert!(matches!(err, ZitifyError::DirectoryNotFound { .. }));
    }

    #[test]
    fn load_base_without_deployments_is_empty() {
        let dir = tempdir().unwrap();
        let layout = LayoutConfig::default();
        let loaded = FragmentLoader::new(&layout)
            .load(dir.path(), ScopeResolution::disabled())
            .unwrap();
        assert!(loaded.model.is_empty());
        assert!(loaded.fragments.is_empty());
    }

    #[test]
    fn load_respects_custom_root_key() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "deployments/services/web.yml",
            "openziti:\n  services:\n    - name: web\n",
        );
        let layout = LayoutConfig {
            root_key: "openziti".to_string(),
            ..LayoutConfig::default()
        };
        let loaded = FragmentLoader::new(&layout)
            .load(dir.path(), ScopeResolution::disabled())
            .unwrap();
        assert_eq!(service_names(&loaded.model), vec!["web"]);
    }
}
