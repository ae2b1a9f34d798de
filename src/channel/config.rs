//! Serializable unit and channel configs.
//!
//! The JSON shape is
//!
//! ```text
//! UnitConfig    := { init_args?: { num_channels: int, ... },
//!                    channels?:  { input_related: [ChannelConfig],
//!                                  output_related: [ChannelConfig] } }
//! ChannelConfig := { name: string, start?: int, end?: int,
//!                    is_output_channel?: bool }
//! ```
//!
//! A channel config inside a unit may omit `start`/`end`; loading fills
//! them with `0` and the unit's `num_channels`. Configs produced by
//! `config_template` always carry both.

use crate::error::{ChannelError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// Constructor arguments of a unit, kept as plain JSON values.
pub type InitArgs = serde_json::Map<String, Value>;

/// Key of the channel count inside [`InitArgs`].
pub const NUM_CHANNELS_KEY: &str = "num_channels";

/// Config of one [`Channel`](super::Channel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel (layer) name
    pub name: String,
    /// First channel, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    /// One past the last channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    /// Direction flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_output_channel: Option<bool>,
}

impl ChannelConfig {
    /// Config with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: None,
            end: None,
            is_output_channel: None,
        }
    }

    /// Set an explicit range.
    #[must_use]
    pub fn with_range(mut self, start: usize, end: usize) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Set the direction flag.
    #[must_use]
    pub fn with_output_channel(mut self, is_output_channel: bool) -> Self {
        self.is_output_channel = Some(is_output_channel);
        self
    }

    /// Fill a missing range with `[0, num_channels)` and stamp the
    /// direction given by the list the config sits in.
    pub(crate) fn fill_defaults(&mut self, is_output_channel: bool, num_channels: usize) {
        self.start.get_or_insert(0);
        self.end.get_or_insert(num_channels);
        self.is_output_channel = Some(is_output_channel);
    }
}

/// Channel lists of a unit config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelsConfig {
    /// Input-related channels
    #[serde(default)]
    pub input_related: Vec<ChannelConfig>,
    /// Output-related channels
    #[serde(default)]
    pub output_related: Vec<ChannelConfig>,
}

/// Config of one [`ChannelUnit`](super::ChannelUnit).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitConfig {
    /// Constructor arguments; must hold `num_channels` to be loadable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_args: Option<InitArgs>,
    /// Channel lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<ChannelsConfig>,
}

impl UnitConfig {
    /// Config with `init_args = { num_channels }` and no channels.
    #[must_use]
    pub fn with_num_channels(num_channels: usize) -> Self {
        let mut args = InitArgs::new();
        args.insert(NUM_CHANNELS_KEY.to_string(), Value::from(num_channels));
        Self {
            init_args: Some(args),
            channels: None,
        }
    }

    /// Append an input-related channel config.
    #[must_use]
    pub fn with_input(mut self, channel: ChannelConfig) -> Self {
        self.channels
            .get_or_insert_with(ChannelsConfig::default)
            .input_related
            .push(channel);
        self
    }

    /// Append an output-related channel config.
    #[must_use]
    pub fn with_output(mut self, channel: ChannelConfig) -> Self {
        self.channels
            .get_or_insert_with(ChannelsConfig::default)
            .output_related
            .push(channel);
        self
    }

    /// The configured channel count.
    ///
    /// # Errors
    ///
    /// Fails if `init_args` or its `num_channels` entry is missing or not
    /// a non-negative integer.
    pub fn num_channels(&self) -> Result<usize> {
        let args = self.init_args.as_ref().ok_or(ChannelError::MissingInitArgs)?;
        required_usize(args, NUM_CHANNELS_KEY)
    }

    /// Parse a config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Serialization`] on malformed input.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the config as JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Serialization`] if encoding fails.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Read a `unit name -> UnitConfig` mapping from JSON.
///
/// # Errors
///
/// Returns [`ChannelError::Io`] if `reader` fails and
/// [`ChannelError::Serialization`] on malformed JSON.
pub fn read_unit_configs<R: Read>(reader: R) -> Result<BTreeMap<String, UnitConfig>> {
    serde_json::from_reader(reader).map_err(stream_error)
}

/// Write a `unit name -> UnitConfig` mapping as pretty JSON.
///
/// # Errors
///
/// Returns [`ChannelError::Io`] if `writer` fails.
pub fn write_unit_configs<W: Write>(
    writer: W,
    configs: &BTreeMap<String, UnitConfig>,
) -> Result<()> {
    serde_json::to_writer_pretty(writer, configs).map_err(stream_error)
}

/// Split stream failures out of JSON failures.
fn stream_error(err: serde_json::Error) -> ChannelError {
    if err.is_io() {
        ChannelError::Io(err.into())
    } else {
        ChannelError::Serialization(err)
    }
}

/// Read a required non-negative integer argument.
pub(crate) fn required_usize(args: &InitArgs, key: &str) -> Result<usize> {
    optional_usize(args, key)?.ok_or_else(|| ChannelError::InvalidInitArg {
        key: key.to_string(),
        reason: "missing".to_string(),
    })
}

/// Read an optional non-negative integer argument.
pub(crate) fn optional_usize(args: &InitArgs, key: &str) -> Result<Option<usize>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| ChannelError::InvalidInitArg {
                key: key.to_string(),
                reason: format!("expected a non-negative integer, got {value}"),
            }),
    }
}
