//! Per-compilation backend state.

use std::sync::Arc;

use weft_common::SourceManager;
use weft_ir::descriptor::FileClassDescriptor;
use weft_ir::ir::IrFile;

use crate::config::BackendConfig;
use crate::error::SyntheticError;
use crate::synthetic::SyntheticDescriptorFactory;

/// State shared by every backend pass of one compilation run.
///
/// Owns the synthetic descriptor cache; dropping the session discards it.
/// Create one session per run and pass it down to lowering and codegen.
#[derive(Debug)]
pub struct BackendSession {
    config: BackendConfig,
    sources: Arc<SourceManager>,
    descriptors: SyntheticDescriptorFactory,
}

impl BackendSession {
    pub fn new(config: BackendConfig, sources: Arc<SourceManager>) -> Self {
        let descriptors = SyntheticDescriptorFactory::new(Arc::clone(&sources), config.clone());
        Self {
            config,
            sources,
            descriptors,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn sources(&self) -> &SourceManager {
        &self.sources
    }

    pub fn descriptors(&self) -> &SyntheticDescriptorFactory {
        &self.descriptors
    }

    /// Facade class for an IR file, in the file's own package.
    pub fn file_class(&self, file: &IrFile) -> Result<Arc<FileClassDescriptor>, SyntheticError> {
        self.descriptors
            .create_file_class(&file.entry, Arc::clone(&file.package))
    }
}
