//! Channel dependency model for structured pruning.
//!
//! When channel `j` of one layer is pruned, every layer wired to it must
//! drop the matching channel too: the next layer's input, residual
//! branches, concatenation partners. This module records those groups.
//!
//! - [`Channel`]: a `[start, end)` slice of one layer's input or output
//!   channels.
//! - [`ChannelUnit`]: channels that must always keep the same count.
//! - [`UnitConfig`] / [`ChannelConfig`]: plain serializable form, so a
//!   grouping can be stored and rebuilt against a model by layer name
//!   without running the analysis again.
//! - [`init_from_cfg`], [`init_from_channel_unit`],
//!   [`init_from_channel_analyzer`]: unit construction, generic over
//!   [`Unit`] so specialized units such as [`MutableChannelUnit`] reuse it.
//!
//! # Example
//!
//! ```
//! use aprender_channels::channel::{ChannelConfig, ChannelUnit, UnitConfig};
//! use aprender_channels::nn::{Conv2d, ModuleDict};
//!
//! let model = ModuleDict::new()
//!     .add("conv1", Conv2d::new(3, 16, 3))
//!     .add("conv2", Conv2d::new(16, 32, 3));
//!
//! let config = UnitConfig::with_num_channels(16)
//!     .with_output(ChannelConfig::named("conv1"))
//!     .with_input(ChannelConfig::named("conv2"));
//!
//! let unit = ChannelUnit::init_from_cfg(&model, &config).unwrap();
//! assert_eq!(unit.name(), "conv1_(0, 16)_16");
//! assert_eq!(unit.config_template(true, true).num_channels().unwrap(), 16);
//! ```

#[allow(clippy::module_inception)]
mod channel;
mod config;
mod factory;
mod mutable;
mod unit;

pub use channel::{
    is_placeholder, Channel, ChannelIndex, NodeHandle, INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER,
};
pub use config::{
    read_unit_configs, write_unit_configs, ChannelConfig, ChannelsConfig, InitArgs, UnitConfig,
    NUM_CHANNELS_KEY,
};
pub use factory::{init_from_cfg, init_from_channel_analyzer, init_from_channel_unit};
pub use mutable::{MutableChannelUnit, CHOICE_KEY};
pub use unit::{ChannelUnit, Unit};
