//! A directional channel slice of one layer.

use super::config::ChannelConfig;
use crate::error::{ChannelError, Result};
use crate::nn::{Module, NamedModules};
use std::fmt;
use std::rc::{Rc, Weak};

/// Name of the channel standing for the network input.
pub const INPUT_PLACEHOLDER: &str = "input_placeholder";

/// Name of the channel standing for the network output.
pub const OUTPUT_PLACEHOLDER: &str = "output_placeholder";

/// Half-open channel range `[start, end)`.
///
/// Rendered as `(start, end)`; unit names embed this text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelIndex {
    start: usize,
    end: usize,
}

impl ChannelIndex {
    /// Create a range, or `None` when `start > end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// First channel (inclusive).
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last channel.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of channels covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers no channel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for ChannelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Opaque handle to a node of the dependency graph a channel came from.
///
/// Only compared, never dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub u64);

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A contiguous slice of one layer's input or output channels.
///
/// The layer is held through a weak reference: a `Channel` never keeps a
/// model alive, and a channel without a layer is valid (boundary
/// placeholders, or names the model does not register).
#[derive(Debug, Clone)]
pub struct Channel {
    name: String,
    module: Option<Weak<dyn Module>>,
    index: ChannelIndex,
    node: Option<NodeHandle>,
    is_output_channel: bool,
}

impl Channel {
    /// Create an output channel over `index = (start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::InvalidIndex`] if `start > end`.
    pub fn new(
        name: impl Into<String>,
        module: Option<&Rc<dyn Module>>,
        index: (usize, usize),
    ) -> Result<Self> {
        let name = name.into();
        let (start, end) = index;
        let index = ChannelIndex::new(start, end)
            .ok_or_else(|| ChannelError::InvalidIndex {
                name: name.clone(),
                start,
                end,
            })?;
        Ok(Self {
            name,
            module: module.map(Rc::downgrade),
            index,
            node: None,
            is_output_channel: true,
        })
    }

    /// Create an output channel.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::InvalidIndex`] if `start > end`.
    pub fn output(
        name: impl Into<String>,
        module: Option<&Rc<dyn Module>>,
        index: (usize, usize),
    ) -> Result<Self> {
        Self::new(name, module, index)
    }

    /// Create an input channel.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::InvalidIndex`] if `start > end`.
    pub fn input(
        name: impl Into<String>,
        module: Option<&Rc<dyn Module>>,
        index: (usize, usize),
    ) -> Result<Self> {
        Ok(Self::new(name, module, index)?.with_output_channel(false))
    }

    /// Set the direction flag.
    #[must_use]
    pub fn with_output_channel(mut self, is_output_channel: bool) -> Self {
        self.is_output_channel = is_output_channel;
        self
    }

    /// Attach a dependency-graph node.
    #[must_use]
    pub fn with_node(mut self, node: NodeHandle) -> Self {
        self.node = Some(node);
        self
    }

    /// Build a channel from a config, resolving its layer by name in `model`.
    ///
    /// An unresolved name is not an error: the channel keeps no layer.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::MissingField`] if `start`, `end` or
    /// `is_output_channel` is absent, and [`ChannelError::InvalidIndex`]
    /// if the range is reversed.
    pub fn init_from_cfg(model: &dyn NamedModules, config: &ChannelConfig) -> Result<Self> {
        let missing = |field| ChannelError::MissingField {
            field,
            context: format!("channel '{}'", config.name),
        };
        let start = config.start.ok_or_else(|| missing("start"))?;
        let end = config.end.ok_or_else(|| missing("end"))?;
        let is_output_channel = config
            .is_output_channel
            .ok_or_else(|| missing("is_output_channel"))?;

        let module = model.find_module(&config.name);
        if module.is_none() {
            tracing::debug!(channel = %config.name, "no module registered under channel name");
        }

        Ok(Self::new(config.name.clone(), module.as_ref(), (start, end))?
            .with_output_channel(is_output_channel))
    }

    /// Config that rebuilds this channel through [`Channel::init_from_cfg`].
    ///
    /// The layer itself is not stored; it is resolved again by name.
    #[must_use]
    pub fn config_template(&self) -> ChannelConfig {
        ChannelConfig {
            name: self.name.clone(),
            start: Some(self.index.start),
            end: Some(self.index.end),
            is_output_channel: Some(self.is_output_channel),
        }
    }

    /// Channel name; the layer name when backed by a layer.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The layer, if one was resolved and is still alive.
    #[must_use]
    pub fn module(&self) -> Option<Rc<dyn Module>> {
        self.module.as_ref().and_then(Weak::upgrade)
    }

    /// Whether a layer was resolved for this channel.
    #[must_use]
    pub fn has_module(&self) -> bool {
        self.module.is_some()
    }

    /// Channel range.
    #[must_use]
    pub fn index(&self) -> ChannelIndex {
        self.index
    }

    /// First channel (inclusive).
    #[must_use]
    pub fn start(&self) -> usize {
        self.index.start
    }

    /// One past the last channel.
    #[must_use]
    pub fn end(&self) -> usize {
        self.index.end
    }

    /// Dependency-graph node, if any.
    #[must_use]
    pub fn node(&self) -> Option<NodeHandle> {
        self.node
    }

    /// True for output channels, false for input channels.
    #[must_use]
    pub fn is_output_channel(&self) -> bool {
        self.is_output_channel
    }

    /// Number of channels in the slice.
    #[must_use]
    pub fn num_channels(&self) -> usize {
        self.index.len()
    }

    /// Whether this slice can be pruned.
    ///
    /// A layer-backed channel is prunable unless the layer owns parameters
    /// and cannot resize dynamically. A layer-less channel is prunable
    /// unless it is one of the network boundary placeholders.
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        match &self.module {
            Some(weak) => match weak.upgrade() {
                Some(module) => !module.has_parameters() || module.is_dynamic_channel(),
                None => {
                    tracing::warn!(channel = %self.name, "module dropped before mutability check");
                    false
                }
            },
            None => !is_placeholder(&self.name),
        }
    }
}

/// Whether `name` marks the network boundary.
#[must_use]
pub fn is_placeholder(name: &str) -> bool {
    name == INPUT_PLACEHOLDER || name == OUTPUT_PLACEHOLDER
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        let same_module = match (&self.module, &other.module) {
            (Some(a), Some(b)) => Weak::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.name == other.name
            && same_module
            && self.index == other.index
            && self.is_output_channel == other.is_output_channel
            && self.node == other.node
    }
}

impl Eq for Channel {}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Channel({}, index={}, is_output_channel={})",
            self.name, self.index, self.is_output_channel
        )
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
