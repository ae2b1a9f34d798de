//! Core module traits.

use std::fmt;
use std::rc::Rc;

/// Name under which a registry lists the model itself.
pub const ROOT_MODULE_NAME: &str = "";

/// A layer as seen by channel tracking.
///
/// Only parameter ownership and dynamic-resize capability matter here;
/// forward passes live elsewhere.
pub trait Module: fmt::Debug {
    /// Number of learnable parameters owned by this module.
    fn num_parameters(&self) -> usize;

    /// Whether the module owns any learnable parameters.
    fn has_parameters(&self) -> bool {
        self.num_parameters() != 0
    }

    /// Whether the module can change its channel count at runtime.
    fn is_dynamic_channel(&self) -> bool {
        false
    }

    /// Short layer kind, for logging.
    fn type_name(&self) -> &'static str;
}

/// A model that exposes its sub-modules by name.
pub trait NamedModules {
    /// All named modules, possibly including the root entry
    /// ([`ROOT_MODULE_NAME`]).
    fn named_modules(&self) -> Vec<(String, Rc<dyn Module>)>;

    /// Look up a sub-module by name, never matching the root entry.
    fn find_module(&self, name: &str) -> Option<Rc<dyn Module>> {
        self.named_modules()
            .into_iter()
            .find(|(n, _)| n != ROOT_MODULE_NAME && n == name)
            .map(|(_, m)| m)
    }
}
