//! Analyzer adapter.
//!
//! An analyzer inspects a model and reports which channels depend on each
//! other, as a mapping from unit name to [`UnitConfig`]. Graph tracing is
//! not done here: this module only defines the seam, a registry that
//! builds analyzers from plain configs, and [`ConfigAnalyzer`], which
//! replays a stored mapping.

mod config_analyzer;
mod registry;

pub use config_analyzer::ConfigAnalyzer;
pub use registry::{AnalyzerBuilder, AnalyzerRegistry};

use crate::channel::{InitArgs, UnitConfig};
use crate::error::Result;
use crate::nn::NamedModules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discovers groups of dependent channels in a model.
pub trait ChannelAnalyzer {
    /// Map each unit name to the config of that unit.
    ///
    /// # Errors
    ///
    /// Implementations report a model they cannot analyze as
    /// [`ChannelError::Analyzer`](crate::error::ChannelError::Analyzer).
    fn analyze(&self, model: &dyn NamedModules) -> Result<BTreeMap<String, UnitConfig>>;

    /// Analyzer name for logging.
    fn name(&self) -> &'static str;
}

/// Plain config naming an analyzer type and its parameters.
///
/// Serialized as `{"type": "<name>", ...params}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Registered analyzer type
    #[serde(rename = "type")]
    pub type_name: String,
    /// Remaining keys, handed to the builder
    #[serde(flatten)]
    pub params: InitArgs,
}

impl AnalyzerConfig {
    /// Config for `type_name` without parameters.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            params: InitArgs::new(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }
}

/// Builds analyzers from configs.
pub trait AnalyzerFactory {
    /// Build the analyzer described by `config`.
    ///
    /// # Errors
    ///
    /// Fails for unknown types or invalid parameters.
    fn build(&self, config: &AnalyzerConfig) -> Result<Box<dyn ChannelAnalyzer>>;

    /// Build the analyzer used when none is given.
    ///
    /// # Errors
    ///
    /// Fails if the factory has no default.
    fn build_default(&self) -> Result<Box<dyn ChannelAnalyzer>>;
}

/// Where [`init_from_channel_analyzer`](crate::channel::init_from_channel_analyzer)
/// gets its analyzer from.
pub enum AnalyzerSource<'a> {
    /// A ready analyzer.
    Instance(&'a dyn ChannelAnalyzer),
    /// A config, built through the factory.
    Config(AnalyzerConfig),
    /// The factory's default analyzer.
    Default,
}

impl<'a> From<&'a dyn ChannelAnalyzer> for AnalyzerSource<'a> {
    fn from(analyzer: &'a dyn ChannelAnalyzer) -> Self {
        Self::Instance(analyzer)
    }
}

impl From<AnalyzerConfig> for AnalyzerSource<'_> {
    fn from(config: AnalyzerConfig) -> Self {
        Self::Config(config)
    }
}

impl std::fmt::Debug for AnalyzerSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instance(analyzer) => write!(f, "Instance({})", analyzer.name()),
            Self::Config(config) => write!(f, "Config({})", config.type_name),
            Self::Default => write!(f, "Default"),
        }
    }
}
