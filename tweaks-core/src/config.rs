//! Overlay configuration
//!
//! Options come either from the `initialize({ ... })` object passed by the
//! page or from the bootstrap defaults, optionally overridden by the page's
//! query string:
//!
//! - `tweaks=1|true` shows the panel, any other value hides it
//! - `tweaks_log=<level>` sets the console log level
//! - `tweaks_mirror=legacy|exact` picks the [`MirrorPolicy`]

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::variables::MirrorPolicy;

const MIRROR_PARAM: &str = "tweaks_mirror";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Master switch; `false` suppresses the panel at every viewport width.
    pub show: bool,
    pub mirror_policy: MirrorPolicy,
    /// `tracing` level name for the console subscriber.
    pub log_level: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            show: true,
            mirror_policy: MirrorPolicy::Legacy,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Deserialize, Default)]
struct QueryOverrides {
    tweaks: Option<String>,
    tweaks_log: Option<String>,
    tweaks_mirror: Option<String>,
}

impl OverlayConfig {
    /// Apply overrides from a `location.search` string (leading `?` optional).
    /// A malformed query leaves the config untouched.
    pub fn with_query(mut self, search: &str) -> Self {
        let query = search.strip_prefix('?').unwrap_or(search);
        let overrides: QueryOverrides = match serde_urlencoded::from_str(query) {
            Ok(o) => o,
            Err(e) => {
                warn!("Ignoring malformed query string: {e}");
                return self;
            }
        };

        if let Some(v) = overrides.tweaks {
            self.show = v == "1" || v == "true";
        }
        if let Some(level) = overrides.tweaks_log.filter(|l| !l.is_empty()) {
            self.log_level = level;
        }
        if let Some(mirror) = overrides.tweaks_mirror {
            match MirrorPolicy::parse(&mirror) {
                Some(policy) => self.mirror_policy = policy,
                None => warn!("Unknown {MIRROR_PARAM} value '{mirror}', keeping {:?}", self.mirror_policy),
            }
        }
        self
    }
}
