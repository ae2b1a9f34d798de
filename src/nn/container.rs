//! Named module container.

use super::module::{Module, NamedModules};
use std::rc::Rc;

/// Ordered mapping from name to module.
///
/// Insertion order is preserved; inserting an existing name replaces the
/// module in place.
///
/// # Example
///
/// ```
/// use aprender_channels::nn::{Linear, ModuleDict, NamedModules};
///
/// let mut model = ModuleDict::new();
/// model.insert("fc1", Linear::new(784, 256));
/// model.insert("fc2", Linear::new(256, 10));
///
/// assert_eq!(model.len(), 2);
/// assert_eq!(model.find_module("fc2").map(|m| m.num_parameters()), Some(2570));
/// ```
#[derive(Debug, Default)]
pub struct ModuleDict {
    modules: Vec<(String, Rc<dyn Module>)>,
}

impl ModuleDict {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Add a module, returning self for chaining.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn add<M: Module + 'static>(mut self, name: impl Into<String>, module: M) -> Self {
        self.insert(name, module);
        self
    }

    /// Insert a module and return the shared handle to it.
    pub fn insert<M: Module + 'static>(
        &mut self,
        name: impl Into<String>,
        module: M,
    ) -> Rc<dyn Module> {
        let module: Rc<dyn Module> = Rc::new(module);
        self.insert_rc(name, Rc::clone(&module));
        module
    }

    /// Insert an already shared module.
    pub fn insert_rc(&mut self, name: impl Into<String>, module: Rc<dyn Module>) {
        let name = name.into();
        match self.modules.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = module,
            None => self.modules.push((name, module)),
        }
    }

    /// Get a module by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rc<dyn Module>> {
        self.modules.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    /// Module names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|(n, _)| n.as_str())
    }

    /// Number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if the container is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl NamedModules for ModuleDict {
    fn named_modules(&self) -> Vec<(String, Rc<dyn Module>)> {
        self.modules
            .iter()
            .map(|(n, m)| (n.clone(), Rc::clone(m)))
            .collect()
    }
}
