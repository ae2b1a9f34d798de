//! Analyzer that replays stored unit configs.

use super::ChannelAnalyzer;
use crate::channel::{ChannelUnit, InitArgs, UnitConfig};
use crate::error::Result;
use crate::nn::NamedModules;
use std::collections::BTreeMap;

/// Returns a fixed `unit name -> UnitConfig` mapping.
///
/// Used to rebuild units from a saved grouping without tracing the model
/// again. Built from `{"type": "ConfigAnalyzer", "units": {...}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigAnalyzer {
    units: BTreeMap<String, UnitConfig>,
}

impl ConfigAnalyzer {
    /// Registry type name.
    pub const TYPE_NAME: &'static str = "ConfigAnalyzer";

    /// Key of the unit mapping in the analyzer params.
    pub const UNITS_KEY: &'static str = "units";

    /// Replay `units`.
    #[must_use]
    pub fn new(units: BTreeMap<String, UnitConfig>) -> Self {
        Self { units }
    }

    /// Build from analyzer params; a missing `units` key means no units.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Serialization`](crate::error::ChannelError::Serialization)
    /// if `units` is not a mapping of unit configs.
    pub fn from_params(params: &InitArgs) -> Result<Self> {
        let units = match params.get(Self::UNITS_KEY) {
            Some(units) => serde_json::from_value(units.clone())?,
            None => BTreeMap::new(),
        };
        Ok(Self::new(units))
    }

    /// Snapshot existing units, keyed by unit name.
    ///
    /// Units with the same name overwrite each other; give them distinct
    /// names with [`ChannelUnit::set_name`] first.
    #[must_use]
    pub fn snapshot<'a>(units: impl IntoIterator<Item = &'a ChannelUnit>) -> Self {
        let units = units
            .into_iter()
            .map(|unit| (unit.name(), unit.config_template(true, true)))
            .collect();
        Self::new(units)
    }

    /// Stored unit configs.
    #[must_use]
    pub fn units(&self) -> &BTreeMap<String, UnitConfig> {
        &self.units
    }
}

impl ChannelAnalyzer for ConfigAnalyzer {
    fn analyze(&self, _model: &dyn NamedModules) -> Result<BTreeMap<String, UnitConfig>> {
        Ok(self.units.clone())
    }

    fn name(&self) -> &'static str {
        Self::TYPE_NAME
    }
}
