//! Target platforms and per-platform values.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Compilation or runtime target family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Platform {
    Jvm,
    Js,
    Native,
    Common,
}

impl Platform {
    /// Lowercase key used in configuration files.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Jvm => "jvm",
            Self::Js => "js",
            Self::Native => "native",
            Self::Common => "common",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when parsing an unknown platform key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform `{0}`")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jvm" => Ok(Self::Jvm),
            "js" => Ok(Self::Js),
            "native" => Ok(Self::Native),
            "common" => Ok(Self::Common),
            _ => Err(UnknownPlatform(s.to_owned())),
        }
    }
}

/// One platform a piece of documentation applies to.
///
/// Ordered by name first so that platform sets iterate in a stable,
/// human-predictable order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlatformData {
    /// Display name of the source set (e.g. `jvmMain`).
    pub name: String,
    /// Target family.
    pub platform: Platform,
    /// Concrete targets compiled for this source set.
    pub targets: Vec<String>,
}

impl PlatformData {
    /// Create platform data with a single target named after the platform.
    #[must_use]
    pub fn new(name: impl Into<String>, platform: Platform) -> Self {
        Self {
            name: name.into(),
            platform,
            targets: vec![platform.key().to_owned()],
        }
    }

    /// Replace the target list.
    #[must_use]
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }
}

impl fmt::Display for PlatformData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Ordered set of platforms carried by content nodes.
pub type PlatformSet = BTreeSet<PlatformData>;

/// A value that may differ per platform.
///
/// A platform without an entry is a valid state, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformDependent<T> {
    values: BTreeMap<PlatformData, T>,
}

impl<T> Default for PlatformDependent<T> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<T> PlatformDependent<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value for a platform, returning the previous one.
    pub fn insert(&mut self, platform: PlatformData, value: T) -> Option<T> {
        self.values.insert(platform, value)
    }

    #[must_use]
    pub fn get(&self, platform: &PlatformData) -> Option<&T> {
        self.values.get(platform)
    }

    /// Platforms that have a value.
    #[must_use]
    pub fn keys(&self) -> PlatformSet {
        self.values.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlatformData, &T)> {
        self.values.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> FromIterator<(PlatformData, T)> for PlatformDependent<T> {
    fn from_iter<I: IntoIterator<Item = (PlatformData, T)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a PlatformDependent<T> {
    type Item = (&'a PlatformData, &'a T);
    type IntoIter = std::collections::btree_map::Iter<'a, PlatformData, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_str() {
        assert_eq!("JVM".parse::<Platform>(), Ok(Platform::Jvm));
        assert_eq!("native".parse::<Platform>(), Ok(Platform::Native));
        assert_eq!(
            "wasm".parse::<Platform>(),
            Err(UnknownPlatform("wasm".to_owned()))
        );
    }

    #[test]
    fn test_platform_data_default_target() {
        let js = PlatformData::new("jsMain", Platform::Js);
        assert_eq!(js.targets, vec!["js".to_owned()]);
        assert_eq!(js.to_string(), "jsMain");
    }

    #[test]
    fn test_platform_dependent_missing_entry() {
        let jvm = PlatformData::new("jvm", Platform::Jvm);
        let js = PlatformData::new("js", Platform::Js);
        let values: PlatformDependent<&str> = [(jvm.clone(), "final")].into_iter().collect();

        assert_eq!(values.get(&jvm), Some(&"final"));
        assert_eq!(values.get(&js), None);
        assert_eq!(values.keys(), PlatformSet::from([jvm]));
    }

    #[test]
    fn test_platform_dependent_iterates_in_name_order() {
        let jvm = PlatformData::new("jvm", Platform::Jvm);
        let js = PlatformData::new("js", Platform::Js);
        let mut values = PlatformDependent::new();
        values.insert(jvm, 1);
        values.insert(js, 2);

        let names: Vec<&str> = values.iter().map(|(p, _)| p.name.as_str()).collect();
        assert_eq!(names, vec!["js", "jvm"]);
    }
}
