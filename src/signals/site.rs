//! Site-level probe results supplied by the fetching boundary.
//!
//! The engine never touches the network. A caller that probed `robots.txt`,
//! the sitemap paths in [`SITEMAP_PATHS`] and both host variants passes the
//! outcome in; `None` means "not probed" and scores as absent for robots and
//! sitemap, and as no issue for the host variants.

use serde::{Deserialize, Serialize};

/// Sitemap locations a boundary should probe, in order.
pub const SITEMAP_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap-index.xml",
    "/wp-sitemap.xml",
];

/// Whether each host variant answered successfully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WwwProbe {
    pub www_exists: bool,
    pub non_www_exists: bool,
}

impl WwwProbe {
    /// Both variants serve content, so the site has duplicate hosts.
    #[must_use]
    pub fn has_issue(&self) -> bool {
        self.www_exists && self.non_www_exists
    }
}

/// Results of the site probes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteProbes {
    pub robots_txt: Option<bool>,
    pub sitemap: Option<bool>,
    pub www: Option<WwwProbe>,
}

impl SiteProbes {
    #[must_use]
    pub fn has_robots_txt(&self) -> bool {
        self.robots_txt.unwrap_or(false)
    }

    #[must_use]
    pub fn has_sitemap(&self) -> bool {
        self.sitemap.unwrap_or(false)
    }

    #[must_use]
    pub fn www_issue(&self) -> bool {
        self.www.is_some_and(|w| w.has_issue())
    }
}
