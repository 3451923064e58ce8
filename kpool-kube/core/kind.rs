use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResource;
use std::fmt::Display;

use super::CORE_VERSION;

#[cfg(test)]
#[path = "./kind.tests.rs"]
mod kind_tests;

/// Represents user provided kubernetes kind in the form `name[.group][/version]`.\
/// **Note** that name can be a kind, plural, singular or short name of the resource.
#[derive(Default, Debug, Clone)]
pub struct Kind {
    name: String,
    group: Option<usize>,
    version: Option<usize>,
}

impl Kind {
    /// Creates new [`Kind`] instance.
    pub fn new(name: &str, group: &str, version: &str) -> Self {
        if group.is_empty() && (version.is_empty() || version == CORE_VERSION) {
            name.into()
        } else if version.is_empty() {
            format!("{name}.{group}").into()
        } else {
            format!("{name}.{group}/{version}").into()
        }
    }

    /// Returns kind as string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Returns kind's name.
    pub fn name(&self) -> &str {
        match (self.group, self.version) {
            (Some(group), _) => &self.name[..group],
            (None, Some(version)) => &self.name[..version],
            (None, None) => &self.name,
        }
    }

    /// Returns `true` if kind has group.
    pub fn has_group(&self) -> bool {
        self.group.is_some() && self.group.map(|g| g + 1) != self.version
    }

    /// Returns kind's group.
    pub fn group(&self) -> &str {
        if let Some(group) = self.group {
            let group = group + 1;
            if let Some(version) = self.version {
                if group < version { &self.name[group..version] } else { "" }
            } else {
                &self.name[group..]
            }
        } else {
            ""
        }
    }

    /// Returns `true` if kind has version.
    pub fn has_version(&self) -> bool {
        self.version.is_some()
    }

    /// Returns kind's version.
    pub fn version(&self) -> &str {
        if let Some(version) = self.version {
            &self.name[version + 1..]
        } else {
            ""
        }
    }

    /// Returns kind's api version, e.g. `apps/v1` or `v1`.\
    /// **Note** that it is meaningful only if kind has version.
    pub fn api_version(&self) -> String {
        if self.has_group() {
            format!("{}/{}", self.group(), self.version())
        } else {
            self.version().to_owned()
        }
    }

    /// Returns `true` if the provided [`APIResource`] is described by this kind's name.\
    /// **Note** that subresources never match.
    pub fn matches(&self, resource: &APIResource) -> bool {
        if resource.name.contains('/') {
            return false;
        }

        let name = self.name();
        name.eq_ignore_ascii_case(&resource.kind)
            || name.eq_ignore_ascii_case(&resource.name)
            || name.eq_ignore_ascii_case(&resource.singular_name)
            || resource
                .short_names
                .as_ref()
                .is_some_and(|short_names| short_names.iter().any(|s| name.eq_ignore_ascii_case(s)))
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<String> for Kind {
    fn from(mut value: String) -> Self {
        let version = value.find('/');
        let group = value.find('.').filter(|g| version.is_none_or(|v| *g < v));

        if let Some(group) = group
            && let Some(version) = version
            && group + 1 == version
            && &value[version + 1..] == CORE_VERSION
        {
            value.truncate(group);
            Self {
                name: value,
                group: None,
                version: None,
            }
        } else {
            Self {
                name: value,
                group,
                version,
            }
        }
    }
}

impl From<&str> for Kind {
    fn from(value: &str) -> Self {
        value.to_owned().into()
    }
}

impl From<Kind> for String {
    fn from(value: Kind) -> Self {
        value.name
    }
}
