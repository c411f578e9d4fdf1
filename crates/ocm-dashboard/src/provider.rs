//! Infrastructure provider identification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Recognized infrastructure providers plus the `Other` fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Amazon Web Services.
    Aws,
    /// Microsoft Azure.
    Azure,
    /// Bare metal.
    Baremetal,
    /// Google Cloud Platform.
    Gcp,
    /// IBM Cloud.
    Ibm,
    /// Red Hat cloud services.
    Redhatcloud,
    /// VMware vSphere.
    Vmware,
    /// Anything not recognized.
    Other,
}

/// Cloud label values and the provider each one names. Matching is exact.
const LABEL_TABLE: &[(&str, Provider)] = &[
    ("Amazon", Provider::Aws),
    ("Azure", Provider::Azure),
    ("Baremetal", Provider::Baremetal),
    ("Google", Provider::Gcp),
    ("IBM", Provider::Ibm),
    ("RedHat", Provider::Redhatcloud),
    ("VMware", Provider::Vmware),
];

impl Provider {
    /// Every provider, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Aws,
        Self::Azure,
        Self::Baremetal,
        Self::Gcp,
        Self::Ibm,
        Self::Redhatcloud,
        Self::Vmware,
        Self::Other,
    ];

    /// Map a cluster `cloud` label to a provider.
    ///
    /// Unrecognized labels, including the empty string, map to [`Provider::Other`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        LABEL_TABLE
            .iter()
            .find(|(known, _)| *known == label)
            .map_or(Self::Other, |(_, provider)| *provider)
    }

    /// Map an optional `cloud` label; a missing label is [`Provider::Other`].
    #[must_use]
    pub fn from_optional_label(label: Option<&str>) -> Self {
        label.map_or(Self::Other, Self::from_label)
    }

    /// The lowercase identifier used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Baremetal => "baremetal",
            Self::Gcp => "gcp",
            Self::Ibm => "ibm",
            Self::Redhatcloud => "redhatcloud",
            Self::Vmware => "vmware",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
