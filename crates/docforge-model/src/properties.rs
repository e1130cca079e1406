//! Type-indexed extra properties attached to nodes and documentables.
//!
//! Later pipeline stages attach metadata without changing node definitions.
//! The Rust type of a property is its key: a container holds at most one
//! value per property type, and lookup by a type that is absent yields `None`.
//!
//! # Example
//!
//! ```
//! use docforge_model::PropertyContainer;
//!
//! #[derive(Debug, PartialEq)]
//! struct SinceKotlin(String);
//!
//! let extra = PropertyContainer::empty().with(SinceKotlin("1.4".to_owned()));
//!
//! assert_eq!(extra.get::<SinceKotlin>(), Some(&SinceKotlin("1.4".to_owned())));
//! assert!(extra.get::<u32>().is_none());
//! ```

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A value that can be stored in a [`PropertyContainer`].
///
/// Implemented for every `'static` type that is `Debug + PartialEq + Send +
/// Sync`; the equality hook lets containers compare structurally.
pub trait ExtraProperty: Any + fmt::Debug + Send + Sync {
    /// Compare with another property of possibly different type.
    fn dyn_eq(&self, other: &dyn ExtraProperty) -> bool;

    /// Human-readable property kind, for diagnostics.
    fn kind_name(&self) -> &'static str;
}

impl<T> ExtraProperty for T
where
    T: Any + fmt::Debug + PartialEq + Send + Sync,
{
    fn dyn_eq(&self, other: &dyn ExtraProperty) -> bool {
        (other as &dyn Any)
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn kind_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Immutable, cheaply clonable heterogeneous map keyed by property type.
#[derive(Clone, Default)]
pub struct PropertyContainer {
    properties: BTreeMap<TypeId, Arc<dyn ExtraProperty>>,
}

impl PropertyContainer {
    /// Container without properties.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return a copy with `property` added, replacing any value of the same type.
    #[must_use]
    pub fn with<P: ExtraProperty>(&self, property: P) -> Self {
        let mut properties = self.properties.clone();
        properties.insert(TypeId::of::<P>(), Arc::new(property));
        Self { properties }
    }

    /// Return a copy without the property of type `P`.
    #[must_use]
    pub fn without<P: ExtraProperty>(&self) -> Self {
        let mut properties = self.properties.clone();
        properties.remove(&TypeId::of::<P>());
        Self { properties }
    }

    /// Look up the property of type `P`.
    #[must_use]
    pub fn get<P: ExtraProperty>(&self) -> Option<&P> {
        let property: &dyn ExtraProperty = self.properties.get(&TypeId::of::<P>())?.as_ref();
        (property as &dyn Any).downcast_ref::<P>()
    }

    #[must_use]
    pub fn contains<P: ExtraProperty>(&self) -> bool {
        self.properties.contains_key(&TypeId::of::<P>())
    }

    /// Combine two containers; properties of `other` win on conflicts.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut properties = self.properties.clone();
        properties.extend(
            other
                .properties
                .iter()
                .map(|(key, value)| (*key, Arc::clone(value))),
        );
        Self { properties }
    }

    /// Kind names of the stored properties.
    pub fn kind_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.values().map(|p| p.kind_name())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl PartialEq for PropertyContainer {
    fn eq(&self, other: &Self) -> bool {
        self.properties.len() == other.properties.len()
            && self.properties.iter().all(|(key, value)| {
                other
                    .properties
                    .get(key)
                    .is_some_and(|o| value.dyn_eq(o.as_ref()))
            })
    }
}

impl fmt::Debug for PropertyContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.properties.values()).finish()
    }
}

/// Modifiers that do not fit the regular visibility/modality model
/// (e.g. `Inline`, `Suspend`, `Override`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdditionalModifiers(pub Vec<String>);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Deprecated(bool);

    #[derive(Debug, PartialEq)]
    struct Since(&'static str);

    #[test]
    fn test_absent_property_is_none() {
        let extra = PropertyContainer::empty();
        assert!(extra.get::<Deprecated>().is_none());
        assert!(!extra.contains::<Deprecated>());
        assert!(extra.is_empty());
    }

    #[test]
    fn test_with_replaces_same_kind() {
        let extra = PropertyContainer::empty()
            .with(Deprecated(false))
            .with(Deprecated(true));
        assert_eq!(extra.len(), 1);
        assert_eq!(extra.get::<Deprecated>(), Some(&Deprecated(true)));
    }

    #[test]
    fn test_with_does_not_touch_original() {
        let base = PropertyContainer::empty().with(Since("1.0"));
        let derived = base.with(Deprecated(true));
        assert_eq!(base.len(), 1);
        assert_eq!(derived.len(), 2);
    }

    #[test]
    fn test_without_removes_kind() {
        let extra = PropertyContainer::empty()
            .with(Since("1.0"))
            .with(Deprecated(true))
            .without::<Since>();
        assert!(extra.get::<Since>().is_none());
        assert!(extra.contains::<Deprecated>());
    }

    #[test]
    fn test_merged_right_wins() {
        let left = PropertyContainer::empty()
            .with(Since("1.0"))
            .with(Deprecated(false));
        let right = PropertyContainer::empty().with(Since("2.0"));
        let merged = left.merged(&right);
        assert_eq!(merged.get::<Since>(), Some(&Since("2.0")));
        assert_eq!(merged.get::<Deprecated>(), Some(&Deprecated(false)));
    }

    #[test]
    fn test_structural_equality() {
        let a = PropertyContainer::empty().with(Since("1.0"));
        let b = PropertyContainer::empty().with(Since("1.0"));
        let c = PropertyContainer::empty().with(Since("1.1"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, PropertyContainer::empty());
    }

    #[test]
    fn test_kind_names() {
        let modifiers = AdditionalModifiers(vec!["Inline".to_owned()]);
        let extra = PropertyContainer::empty().with(modifiers);
        let names: Vec<&str> = extra.kind_names().collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with("AdditionalModifiers"));
    }
}
