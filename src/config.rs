//! Enhancer configuration.
//!
//! Defaults come from the build (the `browser-override` feature) and can be
//! narrowed at runtime through environment variables. The browser rule cannot
//! be switched back on at runtime when the feature compiled it out.

use crate::rendering::RenderingType;
use anyhow::{Result, bail};
use std::env;

pub const ENV_OVERRIDE_BROWSER: &str = "DEVICECAPS_OVERRIDE_BROWSER";
pub const ENV_RENDERING_TYPE: &str = "DEVICECAPS_RENDERING_TYPE";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnhancerConfig {
    /// Write the detected browser name over the upstream `browser` value.
    pub override_browser: bool,
    /// Rendering type used when no upstream layer chose one.
    pub default_rendering: RenderingType,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            override_browser: cfg!(feature = "browser-override"),
            default_rendering: RenderingType::Html4,
        }
    }
}

impl EnhancerConfig {
    /// Load overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load overrides through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_OVERRIDE_BROWSER) {
            let enabled = !raw.trim().is_empty() && raw.trim() != "0";
            if enabled && !cfg!(feature = "browser-override") {
                bail!(
                    "{ENV_OVERRIDE_BROWSER}={raw} requested, but this build was compiled without the browser-override feature"
                );
            }
            config.override_browser = enabled;
        }

        if let Some(raw) = lookup(ENV_RENDERING_TYPE) {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                bail!("{ENV_RENDERING_TYPE} must not be empty");
            }
            config.default_rendering = RenderingType::parse(trimmed);
        }

        Ok(config)
    }
}
