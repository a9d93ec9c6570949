//! The enhancer's output map and the write rules that govern it.
//!
//! Every output key has one [`FieldPolicy`] in [`FIELD_POLICIES`], and the
//! enhancer writes through it. Most keys are sticky: an empty candidate never
//! clears a value an earlier step wrote. A few keys are always rewritten
//! because consumers expect them to be present, and the version keys have a
//! second fill policy so the permissive fallback cannot clobber a value the
//! strict parse already produced.

use crate::detection::ExistingCapabilities;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod keys {
    pub const REQUIRES_SPECIAL_VIEW_STATE_ENCODING: &str = "requiresSpecialViewStateEncoding";
    pub const REQUIRES_UNIQUE_FILE_PATH_SUFFIX: &str = "requiresUniqueFilePathSuffix";
    pub const REQUIRES_UNIQUE_HTML_CHECKBOX_NAMES: &str = "requiresUniqueHtmlCheckboxNames";
    pub const REQUIRES_UNIQUE_HTML_INPUT_NAMES: &str = "requiresUniqueHtmlInputNames";
    pub const REQUIRES_URL_ENCODED_POSTFIELD_VALUES: &str = "requiresUrlEncodedPostfieldValues";
    pub const REQUIRES_OUTPUT_OPTIMIZATION: &str = "requiresOutputOptimization";
    pub const REQUIRES_CONTROL_STATE_IN_SESSION: &str = "requiresControlStateInSession";
    pub const IS_MOBILE_DEVICE: &str = "isMobileDevice";
    pub const CRAWLER: &str = "crawler";
    pub const MOBILE_DEVICE_MODEL: &str = "mobileDeviceModel";
    pub const MOBILE_DEVICE_MANUFACTURER: &str = "mobileDeviceManufacturer";
    pub const PLATFORM: &str = "platform";
    pub const BROWSER: &str = "browser";
    pub const TYPE: &str = "type";
    pub const SCREEN_PIXELS_HEIGHT: &str = "screenPixelsHeight";
    pub const SCREEN_PIXELS_WIDTH: &str = "screenPixelsWidth";
    pub const SCREEN_CHARACTERS_HEIGHT: &str = "screenCharactersHeight";
    pub const SCREEN_CHARACTERS_WIDTH: &str = "screenCharactersWidth";
    pub const SCREEN_BIT_DEPTH: &str = "screenBitDepth";
    pub const IS_COLOR: &str = "isColor";
    pub const PREFERRED_IMAGE_MIME: &str = "preferredImageMime";
    pub const SUPPORTS_CALLBACK: &str = "supportsCallback";
    pub const SUPPORTS_CALLBACK_LEGACY: &str = "SupportsCallback";
    pub const CAN_INITIATE_VOICE_CALL: &str = "canInitiateVoiceCall";
    pub const JSCRIPT_VERSION: &str = "jscriptversion";
    pub const MAJOR_VERSION: &str = "majorversion";
    pub const MINOR_VERSION: &str = "minorversion";
    pub const VERSION: &str = "version";
    pub const JAVASCRIPT: &str = "javascript";
    pub const JAVASCRIPT_LEGACY: &str = "Javascript";
    pub const ECMASCRIPT_VERSION: &str = "ecmascriptversion";
    pub const W3C_DOM_VERSION: &str = "w3cdomversion";
    pub const COOKIES: &str = "cookies";
    pub const PREFERRED_RENDERING_TYPE: &str = "preferredRenderingType";
    pub const PREFERRED_RENDERING_MIME: &str = "preferredRenderingMime";
    pub const ADAPTERS: &str = "adapters";
    pub const TAG_WRITER: &str = "tagwriter";
}

/// Defaults used when neither detection nor the upstream layer has a value.
pub const DEFAULT_PROPERTY_VALUES: [(&str, &str); 4] = [
    (keys::SCREEN_PIXELS_HEIGHT, "480"),
    (keys::SCREEN_PIXELS_WIDTH, "640"),
    (keys::SCREEN_CHARACTERS_HEIGHT, "40"),
    (keys::SCREEN_CHARACTERS_WIDTH, "80"),
];

/// Hard-coded fallback for `key`, if one exists.
pub fn default_value(key: &str) -> Option<&'static str> {
    DEFAULT_PROPERTY_VALUES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

/// How a candidate value lands in the profile.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WritePolicy {
    /// Write only non-empty candidates; never clear.
    Sticky,
    /// Like `Sticky`, but only while the key is still absent or empty.
    FillEmpty,
    /// Replace whatever is there.
    Always,
    /// Write only if no earlier stage claimed the key.
    Unclaimed,
}

/// Write rules for one output key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldPolicy {
    pub key: &'static str,
    /// Policy of the rule that derives the key.
    pub write: WritePolicy,
    /// Policy of the second-chance fill, for keys that have one.
    pub fill: Option<WritePolicy>,
    /// Whether the upstream value is carried into the profile before any
    /// rule runs.
    pub seeded: bool,
}

impl FieldPolicy {
    const fn carried(key: &'static str, write: WritePolicy) -> Self {
        Self {
            key,
            write,
            fill: None,
            seeded: true,
        }
    }

    const fn derived(key: &'static str, write: WritePolicy) -> Self {
        Self {
            key,
            write,
            fill: None,
            seeded: false,
        }
    }

    /// Strict parse writes sticky; the permissive parse only fills gaps.
    const fn version(key: &'static str) -> Self {
        Self {
            key,
            write: WritePolicy::Sticky,
            fill: Some(WritePolicy::FillEmpty),
            seeded: false,
        }
    }
}

/// Every key the enhancer can emit, with the rules [`CapabilityProfile::set`]
/// and [`CapabilityProfile::fill`] apply to it.
pub const FIELD_POLICIES: &[FieldPolicy] = &[
    FieldPolicy::derived(keys::REQUIRES_SPECIAL_VIEW_STATE_ENCODING, WritePolicy::Always),
    FieldPolicy::derived(keys::REQUIRES_UNIQUE_FILE_PATH_SUFFIX, WritePolicy::Always),
    FieldPolicy::derived(keys::REQUIRES_UNIQUE_HTML_CHECKBOX_NAMES, WritePolicy::Always),
    FieldPolicy::derived(keys::REQUIRES_UNIQUE_HTML_INPUT_NAMES, WritePolicy::Always),
    FieldPolicy::derived(keys::REQUIRES_URL_ENCODED_POSTFIELD_VALUES, WritePolicy::Always),
    FieldPolicy::derived(keys::REQUIRES_OUTPUT_OPTIMIZATION, WritePolicy::Always),
    FieldPolicy::derived(keys::REQUIRES_CONTROL_STATE_IN_SESSION, WritePolicy::Always),
    FieldPolicy::carried(keys::IS_MOBILE_DEVICE, WritePolicy::Sticky),
    FieldPolicy::carried(keys::CRAWLER, WritePolicy::Sticky),
    FieldPolicy::carried(keys::MOBILE_DEVICE_MODEL, WritePolicy::Sticky),
    FieldPolicy::carried(keys::MOBILE_DEVICE_MANUFACTURER, WritePolicy::Sticky),
    FieldPolicy::carried(keys::PLATFORM, WritePolicy::Sticky),
    FieldPolicy::carried(keys::BROWSER, WritePolicy::Sticky),
    FieldPolicy::carried(keys::TYPE, WritePolicy::Sticky),
    FieldPolicy::carried(keys::SCREEN_PIXELS_HEIGHT, WritePolicy::Sticky),
    FieldPolicy::carried(keys::SCREEN_PIXELS_WIDTH, WritePolicy::Sticky),
    FieldPolicy::carried(keys::SCREEN_CHARACTERS_HEIGHT, WritePolicy::Sticky),
    FieldPolicy::carried(keys::SCREEN_CHARACTERS_WIDTH, WritePolicy::Sticky),
    FieldPolicy::carried(keys::SCREEN_BIT_DEPTH, WritePolicy::Sticky),
    FieldPolicy::carried(keys::IS_COLOR, WritePolicy::Sticky),
    FieldPolicy::carried(keys::PREFERRED_IMAGE_MIME, WritePolicy::Sticky),
    FieldPolicy::carried(keys::SUPPORTS_CALLBACK, WritePolicy::Sticky),
    FieldPolicy::carried(keys::SUPPORTS_CALLBACK_LEGACY, WritePolicy::Sticky),
    FieldPolicy::carried(keys::CAN_INITIATE_VOICE_CALL, WritePolicy::Sticky),
    FieldPolicy::carried(keys::JSCRIPT_VERSION, WritePolicy::Sticky),
    FieldPolicy::version(keys::MAJOR_VERSION),
    FieldPolicy::version(keys::MINOR_VERSION),
    FieldPolicy::version(keys::VERSION),
    // Tri-state keys: "no signal" reaches them as a `None` candidate.
    FieldPolicy::carried(keys::JAVASCRIPT, WritePolicy::Sticky),
    FieldPolicy::carried(keys::JAVASCRIPT_LEGACY, WritePolicy::Sticky),
    FieldPolicy::carried(keys::ECMASCRIPT_VERSION, WritePolicy::Sticky),
    FieldPolicy::derived(keys::W3C_DOM_VERSION, WritePolicy::Always),
    FieldPolicy::derived(keys::COOKIES, WritePolicy::Always),
    FieldPolicy::carried(keys::PREFERRED_RENDERING_TYPE, WritePolicy::Unclaimed),
    FieldPolicy::carried(keys::PREFERRED_RENDERING_MIME, WritePolicy::Always),
    FieldPolicy::carried(keys::ADAPTERS, WritePolicy::Sticky),
    FieldPolicy::derived(keys::TAG_WRITER, WritePolicy::Always),
];

/// Rules registered for `key`.
pub fn policy_for(key: &str) -> Option<&'static FieldPolicy> {
    FIELD_POLICIES.iter().find(|policy| policy.key == key)
}

/// Flat capability map produced by one transform call.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityProfile {
    values: BTreeMap<String, String>,
}

impl CapabilityProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.values
    }

    /// Apply `candidate` to `key` under `policy`; returns true if written.
    ///
    /// A `None` candidate is a no-op under every policy. `Always` is the only
    /// policy that stores an empty string.
    pub fn apply(&mut self, key: &str, candidate: Option<&str>, policy: WritePolicy) -> bool {
        let Some(value) = candidate else {
            return false;
        };
        let write = match policy {
            WritePolicy::Always => true,
            WritePolicy::Sticky => !value.is_empty(),
            WritePolicy::FillEmpty => {
                !value.is_empty() && self.get(key).map(str::is_empty).unwrap_or(true)
            }
            WritePolicy::Unclaimed => !value.is_empty() && !self.contains(key),
        };
        if write {
            self.values.insert(key.to_string(), value.to_string());
        }
        write
    }

    /// Apply `candidate` under the write policy registered for `key`;
    /// unregistered keys are sticky.
    pub fn set(&mut self, key: &str, candidate: Option<&str>) -> bool {
        let policy = policy_for(key).map_or(WritePolicy::Sticky, |field| field.write);
        self.apply(key, candidate, policy)
    }

    /// Apply `candidate` under the fill policy registered for `key`. Keys
    /// without one are left alone.
    pub fn fill(&mut self, key: &str, candidate: Option<&str>) -> bool {
        match policy_for(key).and_then(|field| field.fill) {
            Some(policy) => self.apply(key, candidate, policy),
            None => false,
        }
    }
}

impl ExistingCapabilities for CapabilityProfile {
    fn get(&self, key: &str) -> Option<&str> {
        CapabilityProfile::get(self, key)
    }
}

impl From<BTreeMap<String, String>> for CapabilityProfile {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}
