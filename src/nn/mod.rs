//! Module registry boundary for channel tracking.
//!
//! Channel units never own layers. They refer to them by name through a
//! [`NamedModules`] registry and only ask two questions of each layer:
//! does it own learnable parameters, and can it resize its channels at
//! runtime.
//!
//! - **Traits**: [`Module`], [`NamedModules`]
//! - **Layers**: [`Conv2d`], [`Linear`], [`BatchNorm2d`], [`ReLU`], [`Identity`]
//! - **Tagging**: [`Dynamic`] marks any module as dynamically resizable
//! - **Containers**: [`ModuleDict`]
//!
//! # Example
//!
//! ```
//! use aprender_channels::nn::{Conv2d, Dynamic, ModuleDict, NamedModules, ReLU};
//!
//! let model = ModuleDict::new()
//!     .add("conv1", Conv2d::new(3, 16, 3))
//!     .add("relu", ReLU)
//!     .add("conv2", Dynamic::new(Conv2d::new(16, 32, 3)));
//!
//! assert!(model.find_module("conv1").is_some());
//! assert!(model.find_module("missing").is_none());
//! ```

mod container;
mod layers;
mod module;

pub use container::ModuleDict;
pub use layers::{BatchNorm2d, Conv2d, Dynamic, Identity, Linear, ReLU};
pub use module::{Module, NamedModules, ROOT_MODULE_NAME};
