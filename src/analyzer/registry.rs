//! Analyzer registry.

use super::{AnalyzerConfig, AnalyzerFactory, ChannelAnalyzer, ConfigAnalyzer};
use crate::channel::InitArgs;
use crate::error::{ChannelError, Result};
use std::collections::HashMap;
use std::fmt;

/// Builds an analyzer from the parameters of an [`AnalyzerConfig`].
pub type AnalyzerBuilder = Box<dyn Fn(&InitArgs) -> Result<Box<dyn ChannelAnalyzer>>>;

/// Analyzer builders keyed by type name.
///
/// Passed explicitly to the unit factories; there is no global registry.
///
/// # Example
///
/// ```
/// use aprender_channels::analyzer::{AnalyzerConfig, AnalyzerFactory, AnalyzerRegistry};
///
/// let registry = AnalyzerRegistry::with_defaults();
/// let analyzer = registry.build(&AnalyzerConfig::new("ConfigAnalyzer")).unwrap();
/// assert_eq!(analyzer.name(), "ConfigAnalyzer");
/// ```
#[derive(Default)]
pub struct AnalyzerRegistry {
    builders: HashMap<String, AnalyzerBuilder>,
    default_type: Option<String>,
}

impl AnalyzerRegistry {
    /// Empty registry without a default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
            default_type: None,
        }
    }

    /// Registry with [`ConfigAnalyzer`] registered and used as default.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ConfigAnalyzer::TYPE_NAME, |params| {
            Ok(Box::new(ConfigAnalyzer::from_params(params)?) as Box<dyn ChannelAnalyzer>)
        });
        registry.default_type = Some(ConfigAnalyzer::TYPE_NAME.to_string());
        registry
    }

    /// Register a builder, replacing any previous one under `type_name`.
    pub fn register<F>(&mut self, type_name: impl Into<String>, builder: F)
    where
        F: Fn(&InitArgs) -> Result<Box<dyn ChannelAnalyzer>> + 'static,
    {
        self.builders.insert(type_name.into(), Box::new(builder));
    }

    /// Use `type_name` for [`AnalyzerFactory::build_default`].
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::UnknownAnalyzer`] if nothing is registered
    /// under `type_name`.
    pub fn set_default(&mut self, type_name: &str) -> Result<()> {
        if !self.contains(type_name) {
            return Err(ChannelError::UnknownAnalyzer {
                type_name: type_name.to_string(),
            });
        }
        self.default_type = Some(type_name.to_string());
        Ok(())
    }

    /// Whether a builder is registered under `type_name`.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.builders.contains_key(type_name)
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.builders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl AnalyzerFactory for AnalyzerRegistry {
    fn build(&self, config: &AnalyzerConfig) -> Result<Box<dyn ChannelAnalyzer>> {
        let builder =
            self.builders
                .get(&config.type_name)
                .ok_or_else(|| ChannelError::UnknownAnalyzer {
                    type_name: config.type_name.clone(),
                })?;
        tracing::debug!(analyzer = %config.type_name, "building analyzer from config");
        builder(&config.params)
    }

    fn build_default(&self) -> Result<Box<dyn ChannelAnalyzer>> {
        let type_name = self
            .default_type
            .as_deref()
            .ok_or_else(|| ChannelError::UnknownAnalyzer {
                type_name: "<default>".to_string(),
            })?;
        self.build(&AnalyzerConfig::new(type_name))
    }
}

impl fmt::Debug for AnalyzerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerRegistry")
            .field("types", &self.type_names())
            .field("default_type", &self.default_type)
            .finish()
    }
}
