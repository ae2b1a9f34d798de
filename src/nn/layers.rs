//! Lightweight layer descriptors.
//!
//! These carry shapes only, enough to answer the capability queries of
//! [`Module`]. Parameter counts follow the usual weight + bias layout.

use super::module::Module;

/// 2D convolution descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conv2d {
    /// Input channels
    pub in_channels: usize,
    /// Output channels
    pub out_channels: usize,
    /// Square kernel size
    pub kernel_size: usize,
    /// Whether a bias vector is present
    pub bias: bool,
}

impl Conv2d {
    /// Create a convolution with bias.
    #[must_use]
    pub fn new(in_channels: usize, out_channels: usize, kernel_size: usize) -> Self {
        Self {
            in_channels,
            out_channels,
            kernel_size,
            bias: true,
        }
    }

    /// Drop the bias vector.
    #[must_use]
    pub fn without_bias(mut self) -> Self {
        self.bias = false;
        self
    }
}

impl Module for Conv2d {
    fn num_parameters(&self) -> usize {
        let weight = self.out_channels * self.in_channels * self.kernel_size * self.kernel_size;
        weight + if self.bias { self.out_channels } else { 0 }
    }

    fn type_name(&self) -> &'static str {
        "Conv2d"
    }
}

/// Fully connected layer descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linear {
    /// Input features
    pub in_features: usize,
    /// Output features
    pub out_features: usize,
}

impl Linear {
    /// Create a linear layer with bias.
    #[must_use]
    pub fn new(in_features: usize, out_features: usize) -> Self {
        Self {
            in_features,
            out_features,
        }
    }
}

impl Module for Linear {
    fn num_parameters(&self) -> usize {
        self.in_features * self.out_features + self.out_features
    }

    fn type_name(&self) -> &'static str {
        "Linear"
    }
}

/// Batch normalization over channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchNorm2d {
    /// Normalized channels
    pub num_features: usize,
    /// Learnable scale and shift
    pub affine: bool,
}

impl BatchNorm2d {
    /// Create an affine batch norm.
    #[must_use]
    pub fn new(num_features: usize) -> Self {
        Self {
            num_features,
            affine: true,
        }
    }

    /// Disable the learnable affine transform.
    #[must_use]
    pub fn without_affine(mut self) -> Self {
        self.affine = false;
        self
    }
}

impl Module for BatchNorm2d {
    fn num_parameters(&self) -> usize {
        if self.affine {
            2 * self.num_features
        } else {
            0
        }
    }

    fn type_name(&self) -> &'static str {
        "BatchNorm2d"
    }
}

/// ReLU activation (no parameters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReLU;

impl Module for ReLU {
    fn num_parameters(&self) -> usize {
        0
    }

    fn type_name(&self) -> &'static str {
        "ReLU"
    }
}

/// Pass-through layer (no parameters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Module for Identity {
    fn num_parameters(&self) -> usize {
        0
    }

    fn type_name(&self) -> &'static str {
        "Identity"
    }
}

/// Tags a module as dynamically channel-resizable.
///
/// A wrapped module stays prunable even when it owns parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dynamic<M> {
    inner: M,
}

impl<M: Module> Dynamic<M> {
    /// Wrap a module.
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    /// The wrapped module.
    #[must_use]
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Module> Module for Dynamic<M> {
    fn num_parameters(&self) -> usize {
        self.inner.num_parameters()
    }

    fn is_dynamic_channel(&self) -> bool {
        true
    }

    fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conv2d_parameter_count() {
        assert_eq!(Conv2d::new(3, 16, 3).num_parameters(), 16 * 3 * 9 + 16);
        assert_eq!(Conv2d::new(3, 16, 3).without_bias().num_parameters(), 16 * 3 * 9);
    }

    #[test]
    fn test_linear_parameter_count() {
        assert_eq!(Linear::new(10, 4).num_parameters(), 44);
    }

    #[test]
    fn test_parameter_free_layers() {
        assert!(!ReLU.has_parameters());
        assert!(!Identity.has_parameters());
        assert!(!BatchNorm2d::new(8).without_affine().has_parameters());
        assert!(BatchNorm2d::new(8).has_parameters());
    }

    #[test]
    fn test_dynamic_wrapper_keeps_parameters() {
        let conv = Dynamic::new(Conv2d::new(8, 8, 1));
        assert!(conv.is_dynamic_channel());
        assert_eq!(conv.num_parameters(), conv.inner().num_parameters());
        assert_eq!(conv.type_name(), "Conv2d");
        assert!(!Conv2d::new(8, 8, 1).is_dynamic_channel());
    }
}
