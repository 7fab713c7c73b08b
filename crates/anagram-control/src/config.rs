//! Static plugin identity.

/// Plugin metadata the host wrapper exports.
///
/// All builder methods are `const fn` so the configuration can live in a
/// `static`.
#[derive(Debug, Clone, Copy)]
pub struct PluginConfig {
    /// Plugin name displayed in the DAW.
    pub name: &'static str,

    /// Short restricted label (only `_`, `a-z`, `A-Z`, `0-9`).
    pub label: &'static str,

    /// Vendor/company name.
    pub vendor: &'static str,

    /// Vendor URL.
    pub url: &'static str,

    /// Plugin version string.
    pub version: &'static str,

    /// One-line description.
    pub description: &'static str,
}

impl PluginConfig {
    /// Create a new plugin configuration with default values.
    pub const fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            vendor: "Unknown Vendor",
            url: "",
            version: "1.0.0",
            description: "",
        }
    }

    /// Set the vendor name.
    pub const fn with_vendor(mut self, vendor: &'static str) -> Self {
        self.vendor = vendor;
        self
    }

    /// Set the vendor URL.
    pub const fn with_url(mut self, url: &'static str) -> Self {
        self.url = url;
        self
    }

    /// Set the version string.
    pub const fn with_version(mut self, version: &'static str) -> Self {
        self.version = version;
        self
    }

    /// Set the description.
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}
