//! Aprender Channels: channel dependency tracking for structured pruning.
//!
//! Structured pruning removes whole channels. A channel removed from one
//! layer's output must also disappear from every input it feeds, and from
//! every branch it is added to or concatenated with. This crate records
//! those dependencies so pruning and architecture search can resize
//! dependent channels together.
//!
//! # Quick Start
//!
//! ```
//! use aprender_channels::prelude::*;
//!
//! let model = ModuleDict::new()
//!     .add("conv1", Dynamic::new(Conv2d::new(3, 16, 3)))
//!     .add("relu", ReLU)
//!     .add("conv2", Dynamic::new(Conv2d::new(16, 32, 3)));
//!
//! // conv1's output feeds relu and conv2: one unit of 16 channels.
//! let config = UnitConfig::with_num_channels(16)
//!     .with_output(ChannelConfig::named("conv1"))
//!     .with_input(ChannelConfig::named("relu"))
//!     .with_input(ChannelConfig::named("conv2"));
//!
//! let unit = ChannelUnit::init_from_cfg(&model, &config).unwrap();
//! assert_eq!(unit.name(), "conv1_(0, 16)_16");
//! assert!(unit.is_mutable());
//!
//! // Specialize it and pick an active width.
//! let mut mutable: MutableChannelUnit = init_from_channel_unit(&unit, InitArgs::new()).unwrap();
//! mutable.set_current_choice(8).unwrap();
//! assert!(mutable.channel_unit().shares_channels_with(&unit));
//! ```
//!
//! # Modules
//!
//! - [`channel`]: [`Channel`](channel::Channel), [`ChannelUnit`](channel::ChannelUnit),
//!   their configs and factories
//! - [`analyzer`]: analyzer seam, registry and config replay
//! - [`nn`]: module registry boundary and layer descriptors
//! - [`error`]: error type
//!
//! # Logging
//!
//! Diagnostics go through [`tracing`]; install a subscriber to see them.

pub mod analyzer;
pub mod channel;
pub mod error;
pub mod nn;
pub mod prelude;

pub use error::{ChannelError, Result};
