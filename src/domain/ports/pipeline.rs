//! TokenPipeline port - the external transformation step
//!
//! A pipeline reads the config and token sources from the virtual filesystem
//! and writes generated files back into it. A successful run reports the
//! config it realized, which then drives output classification.

use crate::domain::entities::BuildConfig;
use crate::domain::value_objects::FilePath;
use crate::error::PadResult;

use super::virtual_fs::VirtualFs;

/// What a successful pipeline run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// The config the run was performed with
    pub config: BuildConfig,
    /// Every file written, in write order
    pub written: Vec<FilePath>,
}

/// A transformation from token sources to platform outputs
pub trait TokenPipeline {
    /// Run the pipeline with the config stored at `config_path`
    fn run(&self, fs: &dyn VirtualFs, config_path: &FilePath) -> PadResult<BuildReport>;
}
