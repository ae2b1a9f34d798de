//! Construction of units from configs, other units and analyzers.
//!
//! Units are built in two phases: an empty shell from constructor
//! arguments, then its channel lists.

use super::channel::Channel;
use super::config::{required_usize, InitArgs, UnitConfig, NUM_CHANNELS_KEY};
use super::unit::{ChannelUnit, Unit};
use crate::analyzer::{AnalyzerFactory, AnalyzerSource, ChannelAnalyzer};
use crate::error::{ChannelError, Result};
use crate::nn::NamedModules;
use serde_json::Value;

/// Build a unit from a config, resolving channel layers in `model`.
///
/// `config` is left untouched. Channel configs may omit `start`/`end`,
/// which default to `0` and the configured `num_channels`; their
/// direction always follows the list they are listed in. Without a
/// `channels` section the unit is returned empty.
///
/// # Errors
///
/// Returns [`ChannelError::MissingInitArgs`] without `init_args`,
/// [`ChannelError::InvalidInitArg`] without a valid `num_channels`, and
/// any error from [`Channel::init_from_cfg`] or [`Unit::from_init_args`].
///
/// # Example
///
/// ```
/// use aprender_channels::channel::{init_from_cfg, ChannelConfig, ChannelUnit, UnitConfig};
/// use aprender_channels::nn::{Conv2d, ModuleDict};
///
/// let model = ModuleDict::new().add("layer1", Conv2d::new(3, 16, 3));
/// let config = UnitConfig::with_num_channels(16).with_output(ChannelConfig::named("layer1"));
///
/// let unit: ChannelUnit = init_from_cfg(&model, &config).unwrap();
/// assert_eq!(unit.output_related()[0].end(), 16);
/// ```
pub fn init_from_cfg<U: Unit>(model: &dyn NamedModules, config: &UnitConfig) -> Result<U> {
    let mut config = config.clone();
    let channels = config.channels.take();
    let init_args = config.init_args.ok_or(ChannelError::MissingInitArgs)?;
    let num_channels = required_usize(&init_args, NUM_CHANNELS_KEY)?;

    let mut unit = U::from_init_args(&init_args)?;
    if let Some(channels) = channels {
        for mut channel_config in channels.input_related {
            channel_config.fill_defaults(false, num_channels);
            let channel = Channel::init_from_cfg(model, &channel_config)?;
            unit.channel_unit_mut().add_input_related(channel);
        }
        for mut channel_config in channels.output_related {
            channel_config.fill_defaults(true, num_channels);
            let channel = Channel::init_from_cfg(model, &channel_config)?;
            unit.channel_unit_mut().add_output_related(channel);
        }
    }
    Ok(unit)
}

/// Build a unit of type `U` over the channels of `unit`.
///
/// The new unit gets `unit`'s channel count plus `extra_args`, and shares
/// (does not copy) `unit`'s channel lists.
///
/// # Errors
///
/// Any error from [`Unit::from_init_args`].
pub fn init_from_channel_unit<U: Unit>(
    unit: &ChannelUnit,
    mut extra_args: InitArgs,
) -> Result<U> {
    extra_args.insert(
        NUM_CHANNELS_KEY.to_string(),
        Value::from(unit.num_channels()),
    );
    let mut specialized = U::from_init_args(&extra_args)?;
    specialized.channel_unit_mut().share_channels_from(unit);
    Ok(specialized)
}

/// Run an analyzer on `model` and build one unit per returned config.
///
/// A config source is built through `factory`; [`AnalyzerSource::Default`]
/// asks `factory` for its default analyzer. Units come back in the
/// analyzer's key order.
///
/// # Errors
///
/// Fails if the analyzer cannot be built or run, or if any returned config
/// does not load.
pub fn init_from_channel_analyzer<U: Unit>(
    model: &dyn NamedModules,
    analyzer: AnalyzerSource<'_>,
    factory: &dyn AnalyzerFactory,
) -> Result<Vec<U>> {
    let built: Box<dyn ChannelAnalyzer>;
    let analyzer: &dyn ChannelAnalyzer = match analyzer {
        AnalyzerSource::Instance(analyzer) => analyzer,
        AnalyzerSource::Config(config) => {
            built = factory.build(&config)?;
            built.as_ref()
        }
        AnalyzerSource::Default => {
            built = factory.build_default()?;
            built.as_ref()
        }
    };

    let unit_configs = analyzer.analyze(model)?;
    tracing::debug!(
        analyzer = analyzer.name(),
        units = unit_configs.len(),
        "building channel units from analyzer output"
    );
    unit_configs
        .values()
        .map(|config| init_from_cfg(model, config))
        .collect()
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
