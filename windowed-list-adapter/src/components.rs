use alloc::collections::BTreeMap;
use alloc::string::String;

/// Tag under which the list component is defined.
pub const LIST_TAG: &str = "windowed-list";
/// Tag under which the end-of-list placeholder component is defined.
pub const PLACEHOLDER_TAG: &str = "windowed-list-placeholder";

/// What a defined component is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentRole {
    List,
    Placeholder,
}

/// A name → definition table with register-if-absent semantics.
///
/// Composing components share one registry and call [`ComponentRegistry::define_if_absent`]
/// instead of checking for existing definitions themselves. The first definition wins.
#[derive(Clone, Debug)]
pub struct ComponentRegistry<V> {
    defs: BTreeMap<String, V>,
}

impl<V> Default for ComponentRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ComponentRegistry<V> {
    pub fn new() -> Self {
        Self {
            defs: BTreeMap::new(),
        }
    }

    /// Returns the definition for `name`, creating it with `define` if it does not exist yet.
    ///
    /// The second value is `true` if this call created the definition.
    pub fn define_if_absent(&mut self, name: &str, define: impl FnOnce() -> V) -> (&V, bool) {
        let mut created = false;
        let def = self.defs.entry(String::from(name)).or_insert_with(|| {
            created = true;
            define()
        });
        (def, created)
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.defs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Defines the components a windowed list needs, once per registry.
///
/// Returns how many definitions were created by this call.
pub fn define_list_components(registry: &mut ComponentRegistry<ComponentRole>) -> usize {
    let mut created = 0;
    for (tag, role) in [
        (LIST_TAG, ComponentRole::List),
        (PLACEHOLDER_TAG, ComponentRole::Placeholder),
    ] {
        if registry.define_if_absent(tag, || role).1 {
            created += 1;
        }
    }
    created
}
