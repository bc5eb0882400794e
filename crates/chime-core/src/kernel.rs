//! Kernel managing extension lifecycle.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use chime_protocols::error::ExtensionError;
use chime_protocols::extension::{Extension, ExtensionContext, ExtensionManifest};

use crate::registry::ToolRegistry;

/// Loads extensions, hands them the tool registry and shuts them down.
pub struct Kernel {
    tool_registry: Arc<ToolRegistry>,
    /// Extensions in load order.
    extensions: RwLock<Vec<Arc<dyn Extension>>>,
    work_dir: PathBuf,
}

impl Kernel {
    /// Create a new kernel.
    pub fn new(work_dir: PathBuf) -> Self {
        Self {
            tool_registry: Arc::new(ToolRegistry::new()),
            extensions: RwLock::new(Vec::new()),
            work_dir,
        }
    }

    /// Load and initialize an extension.
    pub async fn load_extension(
        &self,
        mut extension: Box<dyn Extension>,
        config: serde_json::Value,
    ) -> Result<(), ExtensionError> {
        let manifest = extension.manifest().clone();
        info!("Loading extension: {} v{}", manifest.name, manifest.version);

        if self.contains(&manifest.id) {
            return Err(ExtensionError::AlreadyRegistered(manifest.id));
        }
        self.check_dependencies(&manifest)?;

        let ctx = ExtensionContext::new(config, self.tool_registry.clone(), self.work_dir.clone());
        extension.initialize(ctx).await?;

        self.extensions.write().push(Arc::from(extension));
        info!("Extension loaded: {}", manifest.id);
        Ok(())
    }

    /// Shut down every extension in reverse load order.
    ///
    /// Individual failures are logged; the first one is returned after all
    /// extensions had their chance to stop.
    pub async fn stop(&self) -> Result<(), ExtensionError> {
        info!("Stopping kernel...");
        let extensions: Vec<Arc<dyn Extension>> = self.extensions.write().drain(..).collect();

        let mut first_error = None;
        for extension in extensions.iter().rev() {
            let id = &extension.manifest().id;
            if let Err(e) = extension.shutdown().await {
                warn!("Failed to shut down {}: {}", id, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            } else {
                info!("Extension stopped: {}", id);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.extensions.read().iter().any(|e| e.manifest().id == id)
    }

    fn check_dependencies(&self, manifest: &ExtensionManifest) -> Result<(), ExtensionError> {
        for dep in &manifest.dependencies {
            if !self.contains(dep) {
                return Err(ExtensionError::DependencyNotSatisfied {
                    extension: manifest.id.clone(),
                    dependency: dep.clone(),
                });
            }
        }
        Ok(())
    }

    /// Get the tool registry.
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// List all loaded extensions in load order.
    pub fn list_extensions(&self) -> Vec<ExtensionManifest> {
        self.extensions
            .read()
            .iter()
            .map(|e| e.manifest().clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
