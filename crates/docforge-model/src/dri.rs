//! Reference identities for documented entities.

use std::fmt;

/// Documentation reference identity.
///
/// Identifies a documentable entity (package, class, member) independently of
/// the platforms it is declared for. Absent segments are `None`; the
/// top-level identity has none at all.
///
/// # Example
///
/// ```
/// use docforge_model::Dri;
///
/// let dri = Dri::package("kotlinx.coroutines")
///     .with_class("Job")
///     .with_callable("cancel");
///
/// assert_eq!(dri.class_names(), Some("Job"));
/// assert_eq!(dri.to_string(), "kotlinx.coroutines/Job/cancel/");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dri {
    package_name: Option<String>,
    class_names: Option<String>,
    callable: Option<String>,
    extra: Option<String>,
}

impl Dri {
    /// Identity with no segments, used for module-level content.
    #[must_use]
    pub fn top_level() -> Self {
        Self::default()
    }

    /// Identity of a package.
    #[must_use]
    pub fn package(name: impl Into<String>) -> Self {
        Self {
            package_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the class names segment (dot-separated for nested classes).
    #[must_use]
    pub fn with_class(mut self, class_names: impl Into<String>) -> Self {
        self.class_names = Some(class_names.into());
        self
    }

    /// Set the callable segment.
    #[must_use]
    pub fn with_callable(mut self, callable: impl Into<String>) -> Self {
        self.callable = Some(callable.into());
        self
    }

    /// Set the extra discriminator (e.g. an enum entry or a receiver).
    #[must_use]
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    #[must_use]
    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref()
    }

    /// Simple class names of the entity, if it is (or lives in) a class.
    #[must_use]
    pub fn class_names(&self) -> Option<&str> {
        self.class_names.as_deref()
    }

    #[must_use]
    pub fn callable(&self) -> Option<&str> {
        self.callable.as_deref()
    }

    #[must_use]
    pub fn extra(&self) -> Option<&str> {
        self.extra.as_deref()
    }
}

impl fmt::Display for Dri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.package_name.as_deref().unwrap_or_default(),
            self.class_names.as_deref().unwrap_or_default(),
            self.callable.as_deref().unwrap_or_default(),
            self.extra.as_deref().unwrap_or_default(),
        )
    }
}
