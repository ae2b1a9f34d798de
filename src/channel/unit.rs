//! Groups of channels that share one channel count.

use super::channel::Channel;
use super::config::{required_usize, ChannelsConfig, InitArgs, UnitConfig, NUM_CHANNELS_KEY};
use super::factory;
use crate::analyzer::{AnalyzerFactory, AnalyzerSource};
use crate::error::Result;
use crate::nn::NamedModules;
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Base name token of a unit without channels.
const EMPTY_UNIT_TOKEN: &str = "unitx";

type ChannelList = Rc<RefCell<Vec<Channel>>>;

/// A set of dependent channels.
///
/// Every channel in a unit must keep the same number of active channels:
/// pruning one of them without the others breaks tensor shapes. Output
/// channels feed the dependency, input channels consume it.
///
/// The two channel lists are shared handles. A unit specialized through
/// [`init_from_channel_unit`](super::init_from_channel_unit) sees the same
/// lists as its source, and channels added through either are visible in
/// both.
///
/// # Example
///
/// ```
/// use aprender_channels::channel::{Channel, ChannelUnit};
///
/// let mut unit = ChannelUnit::new(16);
/// unit.add_output_related(Channel::output("conv1", None, (0, 16)).unwrap());
/// unit.add_input_related(Channel::input("conv2", None, (0, 16)).unwrap());
///
/// assert_eq!(unit.name(), "conv1_(0, 16)_16");
/// assert_eq!(unit.num_related(), 2);
/// ```
pub struct ChannelUnit {
    num_channels: usize,
    output_related: ChannelList,
    input_related: ChannelList,
    init_args: InitArgs,
    name: Option<String>,
}

impl ChannelUnit {
    /// Create an empty unit.
    #[must_use]
    pub fn new(num_channels: usize) -> Self {
        Self {
            num_channels,
            output_related: Rc::default(),
            input_related: Rc::default(),
            init_args: InitArgs::new(),
            name: None,
        }
    }

    /// Retain extra constructor arguments for re-instantiation.
    ///
    /// A `num_channels` entry is ignored; the unit's own count wins.
    #[must_use]
    pub fn with_init_args(mut self, mut args: InitArgs) -> Self {
        args.remove(NUM_CHANNELS_KEY);
        self.init_args = args;
        self
    }

    /// Build a unit from a config, resolving channel layers in `model`.
    ///
    /// # Errors
    ///
    /// See [`factory::init_from_cfg`](super::init_from_cfg).
    pub fn init_from_cfg(model: &dyn NamedModules, config: &UnitConfig) -> Result<Self> {
        factory::init_from_cfg(model, config)
    }

    /// Build one unit per entry produced by an analyzer.
    ///
    /// # Errors
    ///
    /// See [`factory::init_from_channel_analyzer`](super::init_from_channel_analyzer).
    pub fn init_from_channel_analyzer(
        model: &dyn NamedModules,
        analyzer: AnalyzerSource<'_>,
        registry: &dyn AnalyzerFactory,
    ) -> Result<Vec<Self>> {
        factory::init_from_channel_analyzer(model, analyzer, registry)
    }

    /// Shared channel count of the unit.
    #[must_use]
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Retained constructor arguments, without `num_channels`.
    #[must_use]
    pub fn init_args(&self) -> &InitArgs {
        &self.init_args
    }

    pub(crate) fn init_args_mut(&mut self) -> &mut InitArgs {
        &mut self.init_args
    }

    /// Output-related channels in insertion order.
    ///
    /// Returns a snapshot: the list is shared with specialized units, so no
    /// borrow of it outlives the call.
    #[must_use]
    pub fn output_related(&self) -> Vec<Channel> {
        self.output_related.borrow().clone()
    }

    /// Input-related channels in insertion order, as a snapshot.
    #[must_use]
    pub fn input_related(&self) -> Vec<Channel> {
        self.input_related.borrow().clone()
    }

    /// All channels, output-related first.
    #[must_use]
    pub fn channels(&self) -> Vec<Channel> {
        self.output_related
            .borrow()
            .iter()
            .chain(self.input_related.borrow().iter())
            .cloned()
            .collect()
    }

    /// Total number of channels in both lists.
    #[must_use]
    pub fn num_related(&self) -> usize {
        self.output_related.borrow().len() + self.input_related.borrow().len()
    }

    /// Add an output-related channel; an equal channel already present is kept.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is not an output channel.
    pub fn add_output_related(&mut self, channel: Channel) {
        assert!(
            channel.is_output_channel(),
            "{channel} is not an output channel"
        );
        push_unique(&self.output_related, channel);
    }

    /// Add an input-related channel; an equal channel already present is kept.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is an output channel.
    pub fn add_input_related(&mut self, channel: Channel) {
        assert!(
            !channel.is_output_channel(),
            "{channel} is not an input channel"
        );
        push_unique(&self.input_related, channel);
    }

    /// Whether every channel of the unit can be pruned.
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.output_related
            .borrow()
            .iter()
            .chain(self.input_related.borrow().iter())
            .all(Channel::is_mutable)
    }

    /// Whether both units hold the very same channel lists.
    #[must_use]
    pub fn shares_channels_with(&self, other: &ChannelUnit) -> bool {
        Rc::ptr_eq(&self.output_related, &other.output_related)
            && Rc::ptr_eq(&self.input_related, &other.input_related)
    }

    pub(crate) fn share_channels_from(&mut self, other: &ChannelUnit) {
        self.output_related = Rc::clone(&other.output_related);
        self.input_related = Rc::clone(&other.input_related);
    }

    /// Unit name.
    ///
    /// An explicit name set through [`ChannelUnit::set_name`] wins. Otherwise
    /// it is `<name>_<index>_<num_channels>` of the first channel (output
    /// lists first), e.g. `conv1_(0, 16)_16`, or `unitx_<num_channels>`
    /// when the unit is empty.
    #[must_use]
    pub fn name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let output = self.output_related.borrow();
        let input = self.input_related.borrow();
        let base = match output.first().or_else(|| input.first()) {
            Some(first) => format!("{}_{}", first.name(), first.index()),
            None => EMPTY_UNIT_TOKEN.to_string(),
        };
        format!("{base}_{}", self.num_channels)
    }

    /// Override the derived name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Alias of the unit; same as [`ChannelUnit::name`].
    #[must_use]
    pub fn alias(&self) -> String {
        self.name()
    }

    /// Config that rebuilds this unit through [`ChannelUnit::init_from_cfg`].
    ///
    /// `with_init_args` emits `num_channels` plus any retained arguments,
    /// `with_channels` emits both channel lists. Omitted sections stay
    /// absent.
    #[must_use]
    pub fn config_template(&self, with_init_args: bool, with_channels: bool) -> UnitConfig {
        let init_args = with_init_args.then(|| {
            let mut args = InitArgs::new();
            args.insert(NUM_CHANNELS_KEY.to_string(), Value::from(self.num_channels));
            args.extend(self.init_args.iter().map(|(k, v)| (k.clone(), v.clone())));
            args
        });
        let channels = with_channels.then(|| ChannelsConfig {
            input_related: self
                .input_related
                .borrow()
                .iter()
                .map(Channel::config_template)
                .collect(),
            output_related: self
                .output_related
                .borrow()
                .iter()
                .map(Channel::config_template)
                .collect(),
        });
        UnitConfig {
            init_args,
            channels,
        }
    }
}

fn push_unique(list: &ChannelList, channel: Channel) {
    let mut list = list.borrow_mut();
    if list.contains(&channel) {
        tracing::debug!(%channel, "channel already in unit, skipped");
    } else {
        list.push(channel);
    }
}

impl fmt::Debug for ChannelUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelUnit")
            .field("name", &self.name())
            .field("num_channels", &self.num_channels)
            .field("output_related", &self.output_related.borrow().len())
            .field("input_related", &self.input_related.borrow().len())
            .finish()
    }
}

impl fmt::Display for ChannelUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelUnit(name={})", self.name())
    }
}

/// A unit type that can be built from constructor arguments.
///
/// Implemented by [`ChannelUnit`] and by units that layer extra behavior on
/// top of one, such as [`MutableChannelUnit`](super::MutableChannelUnit).
/// The factory functions in this module are generic over it.
pub trait Unit: Sized {
    /// Build an empty unit. `args` always holds `num_channels`.
    ///
    /// # Errors
    ///
    /// Fails if an argument is missing or malformed.
    fn from_init_args(args: &InitArgs) -> Result<Self>;

    /// The underlying channel unit.
    fn channel_unit(&self) -> &ChannelUnit;

    /// The underlying channel unit, mutably.
    fn channel_unit_mut(&mut self) -> &mut ChannelUnit;
}

impl Unit for ChannelUnit {
    fn from_init_args(args: &InitArgs) -> Result<Self> {
        let num_channels = required_usize(args, NUM_CHANNELS_KEY)?;
        Ok(Self::new(num_channels).with_init_args(args.clone()))
    }

    fn channel_unit(&self) -> &ChannelUnit {
        self
    }

    fn channel_unit_mut(&mut self) -> &mut ChannelUnit {
        self
    }
}

#[cfg(test)]
#[path = "unit_tests.rs"]
mod tests;
