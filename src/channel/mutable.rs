//! Channel units with an adjustable active channel count.

use super::config::{optional_usize, required_usize, InitArgs, UnitConfig, NUM_CHANNELS_KEY};
use super::unit::{ChannelUnit, Unit};
use crate::error::{ChannelError, Result};
use serde_json::Value;

/// Init arg holding the active channel count.
pub const CHOICE_KEY: &str = "choice";

/// A [`ChannelUnit`] that tracks how many of its channels are active.
///
/// The choice is only bookkeeping: it records the count a search or
/// pruning step settled on, and round-trips through `init_args`.
///
/// # Example
///
/// ```
/// use aprender_channels::channel::{init_from_channel_unit, ChannelUnit, MutableChannelUnit};
/// use aprender_channels::channel::InitArgs;
///
/// let unit = ChannelUnit::new(32);
/// let mut mutable: MutableChannelUnit = init_from_channel_unit(&unit, InitArgs::new()).unwrap();
/// assert_eq!(mutable.current_choice(), 32);
///
/// mutable.set_current_choice(16).unwrap();
/// assert!(mutable.set_current_choice(64).is_err());
/// ```
#[derive(Debug)]
pub struct MutableChannelUnit {
    unit: ChannelUnit,
    current_choice: usize,
}

impl MutableChannelUnit {
    /// Create an empty unit with every channel active.
    #[must_use]
    pub fn new(num_channels: usize) -> Self {
        let mut unit = Self {
            unit: ChannelUnit::new(num_channels),
            current_choice: num_channels,
        };
        unit.record_choice();
        unit
    }

    /// Active channel count.
    #[must_use]
    pub fn current_choice(&self) -> usize {
        self.current_choice
    }

    /// Set the active channel count.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::InvalidChoice`] unless
    /// `1 <= choice <= num_channels` (or `choice == 0` for an empty unit).
    pub fn set_current_choice(&mut self, choice: usize) -> Result<()> {
        let num_channels = self.unit.num_channels();
        let valid = choice <= num_channels && (choice > 0 || num_channels == 0);
        if !valid {
            return Err(ChannelError::InvalidChoice {
                choice,
                num_channels,
            });
        }
        self.current_choice = choice;
        self.record_choice();
        Ok(())
    }

    /// Fraction of channels active.
    #[must_use]
    pub fn activated_ratio(&self) -> f32 {
        match self.unit.num_channels() {
            0 => 1.0,
            n => self.current_choice as f32 / n as f32,
        }
    }

    /// Whether every channel of the unit can be pruned.
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.unit.is_mutable()
    }

    /// Unit name.
    #[must_use]
    pub fn name(&self) -> String {
        self.unit.name()
    }

    /// Config that rebuilds this unit, choice included.
    #[must_use]
    pub fn config_template(&self, with_init_args: bool, with_channels: bool) -> UnitConfig {
        self.unit.config_template(with_init_args, with_channels)
    }

    fn record_choice(&mut self) {
        self.unit
            .init_args_mut()
            .insert(CHOICE_KEY.to_string(), Value::from(self.current_choice));
    }
}

impl Unit for MutableChannelUnit {
    fn from_init_args(args: &InitArgs) -> Result<Self> {
        let num_channels = required_usize(args, NUM_CHANNELS_KEY)?;
        let choice = optional_usize(args, CHOICE_KEY)?.unwrap_or(num_channels);

        let mut unit = Self {
            unit: ChannelUnit::new(num_channels).with_init_args(args.clone()),
            current_choice: num_channels,
        };
        unit.set_current_choice(choice)?;
        Ok(unit)
    }

    fn channel_unit(&self) -> &ChannelUnit {
        &self.unit
    }

    fn channel_unit_mut(&mut self) -> &mut ChannelUnit {
        &mut self.unit
    }
}
