//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use aprender_channels::prelude::*;
//! ```

pub use crate::analyzer::{
    AnalyzerConfig, AnalyzerFactory, AnalyzerRegistry, AnalyzerSource, ChannelAnalyzer,
    ConfigAnalyzer,
};
pub use crate::channel::{
    init_from_cfg, init_from_channel_analyzer, init_from_channel_unit, Channel, ChannelConfig,
    ChannelUnit, InitArgs, MutableChannelUnit, Unit, UnitConfig,
};
pub use crate::error::ChannelError;
pub use crate::nn::{
    BatchNorm2d, Conv2d, Dynamic, Identity, Linear, Module, ModuleDict, NamedModules, ReLU,
};
