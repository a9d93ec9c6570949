//! Capability enhancement: turns a detection match result plus the
//! capabilities an upstream layer already knew into a [`CapabilityProfile`].
//!
//! The transform is pure and runs its rules in a fixed order because later
//! rules read what earlier ones wrote (`type` copies the manufacturer, the
//! tag writer reads the final rendering type). Every write goes through the
//! key's entry in [`crate::profile::FIELD_POLICIES`].

use crate::config::EnhancerConfig;
use crate::detection::{ExistingCapabilities, MatchResult};
use crate::profile::{CapabilityProfile, FIELD_POLICIES, WritePolicy, default_value, keys};
use crate::properties::{Literals, MIME_GIF, MIME_JPEG, MIME_PNG, Property, PropertyIndex};
use crate::rendering::{RenderingType, TagWriter};
use crate::strings::{StringHandle, StringTable};
use crate::summary::DeviceProperties;
use crate::version::{ClrVersion, PermissiveVersion};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, trace};

const STATIC_FLAGS: [&str; 7] = [
    keys::REQUIRES_SPECIAL_VIEW_STATE_ENCODING,
    keys::REQUIRES_UNIQUE_FILE_PATH_SUFFIX,
    keys::REQUIRES_UNIQUE_HTML_CHECKBOX_NAMES,
    keys::REQUIRES_UNIQUE_HTML_INPUT_NAMES,
    keys::REQUIRES_URL_ENCODED_POSTFIELD_VALUES,
    keys::REQUIRES_OUTPUT_OPTIMIZATION,
    keys::REQUIRES_CONTROL_STATE_IN_SESSION,
];

/// Bit depth assumed when the data set has none.
const DEFAULT_BITS_PER_PIXEL: i64 = 16;

/// Builds capability profiles from match results.
///
/// Owns the string table the match results index into; every handle the
/// enhancer compares against is registered in [`Enhancer::new`], so the table
/// may be frozen afterwards and shared across threads for concurrent
/// [`Enhancer::transform`] calls.
#[derive(Debug)]
pub struct Enhancer<S> {
    strings: S,
    index: PropertyIndex,
    literals: Literals,
    config: EnhancerConfig,
}

impl<S: StringTable> Enhancer<S> {
    pub fn new(strings: S) -> Result<Self> {
        Self::with_config(strings, EnhancerConfig::default())
    }

    pub fn with_config(mut strings: S, config: EnhancerConfig) -> Result<Self> {
        let index = PropertyIndex::register(&mut strings)
            .context("string table rejected property registration")?;
        let literals = Literals::register(&mut strings)
            .context("string table rejected literal registration")?;
        debug!(
            properties = Property::ALL.len(),
            override_browser = config.override_browser,
            rendering = config.default_rendering.as_str(),
            "capability enhancer ready"
        );
        Ok(Self {
            strings,
            index,
            literals,
            config,
        })
    }

    pub fn strings(&self) -> &S {
        &self.strings
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    pub fn property_index(&self) -> &PropertyIndex {
        &self.index
    }

    pub fn into_strings(self) -> S {
        self.strings
    }

    /// Produce the capability profile for one request.
    pub fn transform<M, E>(&self, result: &M, existing: &E) -> CapabilityProfile
    where
        M: MatchResult + ?Sized,
        E: ExistingCapabilities + ?Sized,
    {
        let mut profile = CapabilityProfile::new();

        // Upstream values for sticky keys survive any rule with no signal.
        for field in FIELD_POLICIES.iter().filter(|field| field.seeded) {
            profile.apply(field.key, existing.get(field.key), WritePolicy::Sticky);
        }

        for flag in STATIC_FLAGS {
            profile.set(flag, Some("true"));
        }

        self.apply_identity(&mut profile, result);
        self.apply_screen(&mut profile, result, existing);

        profile.set(keys::PREFERRED_IMAGE_MIME, self.preferred_image_mime(result));
        profile.set(keys::JSCRIPT_VERSION, self.javascript_version(result));

        self.apply_version(&mut profile, result, existing);

        match self.javascript_support(result) {
            Some(supported) => {
                let flag = bool_str(supported);
                profile.set(keys::JAVASCRIPT, Some(flag));
                profile.set(keys::JAVASCRIPT_LEGACY, Some(flag));
                let ecmascript = if supported { "3.0" } else { "0.0" };
                profile.set(keys::ECMASCRIPT_VERSION, Some(ecmascript));
            }
            None => trace!("no javascript signal; leaving javascript capabilities untouched"),
        }

        let dom = self.w3c_dom_version(result, existing.get(keys::W3C_DOM_VERSION));
        profile.set(keys::W3C_DOM_VERSION, Some(&dom));

        let cookies = self.cookie_support(result, existing.get(keys::COOKIES));
        profile.set(keys::COOKIES, Some(bool_str(cookies)));

        let callback = bool_str(self.supports_callback(result));
        profile.set(keys::SUPPORTS_CALLBACK, Some(callback));
        profile.set(keys::SUPPORTS_CALLBACK_LEGACY, Some(callback));

        self.apply_rendering(&mut profile);

        profile.set(keys::ADAPTERS, self.first_text(result, Property::Adapters));

        let rendering = profile
            .get(keys::PREFERRED_RENDERING_TYPE)
            .map(RenderingType::parse);
        let writer = TagWriter::for_rendering(rendering.as_ref());
        profile.set(keys::TAG_WRITER, Some(writer.class_name()));

        profile
    }

    /// Resolve every property the match result carries, plus detection
    /// metadata, into a name-sorted summary.
    pub fn describe<M>(&self, result: &M, detection_time: Option<Duration>) -> DeviceProperties
    where
        M: MatchResult + ?Sized,
    {
        let mut properties = DeviceProperties::new();
        for handle in result.property_handles() {
            let Some(name) = self.strings.resolve(handle) else {
                debug!(%handle, "skipping property with unknown name handle");
                continue;
            };
            let values = result
                .all_values(handle)
                .into_iter()
                .filter_map(|value| self.strings.resolve(value).map(str::to_string))
                .collect();
            properties.insert(name, values);
        }
        if let Some(elapsed) = detection_time {
            properties.record_detection_time(elapsed);
        }
        if let Some(confidence) = result.confidence() {
            properties.record_confidence(confidence);
        }
        if let Some(difference) = result.difference() {
            properties.record_difference(difference);
        }
        properties
    }

    fn apply_identity<M: MatchResult + ?Sized>(&self, profile: &mut CapabilityProfile, result: &M) {
        let mobile = bool_str(self.is_mobile(result));
        profile.set(keys::IS_MOBILE_DEVICE, Some(mobile));
        profile.set(keys::CAN_INITIATE_VOICE_CALL, Some(mobile));
        profile.set(keys::CRAWLER, self.tri_state(result, Property::IsCrawler).map(bool_str));
        profile.set(keys::MOBILE_DEVICE_MODEL, self.device_model(result));
        profile.set(
            keys::MOBILE_DEVICE_MANUFACTURER,
            self.first_text(result, Property::HardwareVendor),
        );
        profile.set(keys::PLATFORM, self.first_text(result, Property::PlatformName));

        self.apply_browser(profile, result);

        let manufacturer = profile
            .get(keys::MOBILE_DEVICE_MANUFACTURER)
            .map(str::to_string);
        profile.set(keys::TYPE, manufacturer.as_deref());
    }

    #[cfg(feature = "browser-override")]
    fn apply_browser<M: MatchResult + ?Sized>(&self, profile: &mut CapabilityProfile, result: &M) {
        if self.config.override_browser {
            profile.set(keys::BROWSER, self.first_text(result, Property::BrowserName));
        }
    }

    #[cfg(not(feature = "browser-override"))]
    fn apply_browser<M: MatchResult + ?Sized>(&self, _profile: &mut CapabilityProfile, _result: &M) {}

    fn apply_screen<M, E>(&self, profile: &mut CapabilityProfile, result: &M, existing: &E)
    where
        M: MatchResult + ?Sized,
        E: ExistingCapabilities + ?Sized,
    {
        for (key, property) in [
            (keys::SCREEN_PIXELS_HEIGHT, Property::ScreenPixelsHeight),
            (keys::SCREEN_PIXELS_WIDTH, Property::ScreenPixelsWidth),
        ] {
            let value = match self.screen_pixels(result, property) {
                Some(detected) => Some(detected),
                None => {
                    debug!(key, "screen size not detected; using upstream or default value");
                    upstream_or_default(key, existing)
                }
            };
            profile.set(key, value);
        }

        for key in [keys::SCREEN_CHARACTERS_HEIGHT, keys::SCREEN_CHARACTERS_WIDTH] {
            profile.set(key, upstream_or_default(key, existing));
        }

        let bits = self.bits_per_pixel(result);
        profile.set(keys::SCREEN_BIT_DEPTH, Some(&bits.to_string()));
        profile.set(keys::IS_COLOR, Some(bool_str(bits >= 4)));
    }

    fn apply_version<M, E>(&self, profile: &mut CapabilityProfile, result: &M, existing: &E)
    where
        M: MatchResult + ?Sized,
        E: ExistingCapabilities + ?Sized,
    {
        let detected = self
            .first_text(result, Property::BrowserVersion)
            .filter(|raw| !raw.is_empty());

        match detected {
            Some(raw) => match raw.parse::<ClrVersion>() {
                Ok(version) => {
                    profile.set(keys::MAJOR_VERSION, Some(&version.major.to_string()));
                    profile.set(keys::MINOR_VERSION, Some(&format!(".{}", version.minor)));
                    profile.set(keys::VERSION, Some(&version.to_string()));
                }
                Err(err) => {
                    debug!(%err, "falling back to permissive version extraction");
                    fill_version(profile, raw);
                }
            },
            None => {
                for key in [keys::MAJOR_VERSION, keys::MINOR_VERSION, keys::VERSION] {
                    profile.set(key, existing.get(key));
                }
                let raw = existing
                    .get(keys::VERSION)
                    .filter(|raw| !raw.is_empty())
                    .unwrap_or("0.0");
                fill_version(profile, raw);
            }
        }
    }

    /// Fixed rendering policy, applied only when no upstream layer decided.
    fn apply_rendering(&self, profile: &mut CapabilityProfile) {
        let rendering = &self.config.default_rendering;
        if profile.set(keys::PREFERRED_RENDERING_TYPE, Some(rendering.as_str())) {
            profile.set(keys::PREFERRED_RENDERING_MIME, Some(rendering.default_mime()));
        } else {
            trace!("rendering type already decided upstream");
        }
    }

    fn first_value<M: MatchResult + ?Sized>(
        &self,
        result: &M,
        property: Property,
    ) -> Option<StringHandle> {
        result.first_value(self.index.handle(property))
    }

    fn all_values<M: MatchResult + ?Sized>(&self, result: &M, property: Property) -> Vec<StringHandle> {
        result.all_values(self.index.handle(property))
    }

    fn first_text<'a, M: MatchResult + ?Sized>(
        &'a self,
        result: &M,
        property: Property,
    ) -> Option<&'a str> {
        self.first_value(result, property)
            .and_then(|handle| self.strings.resolve(handle))
    }

    /// `Some(true)`/`Some(false)` for a recognized literal, `None` otherwise.
    fn tri_state<M: MatchResult + ?Sized>(&self, result: &M, property: Property) -> Option<bool> {
        let value = self.first_value(result, property)?;
        if self.literals.is_true(value) {
            Some(true)
        } else if self.literals.is_false(value) {
            Some(false)
        } else {
            None
        }
    }

    fn is_mobile<M: MatchResult + ?Sized>(&self, result: &M) -> bool {
        self.first_value(result, Property::IsMobile)
            .map(|value| self.literals.is_true(value))
            .unwrap_or(false)
    }

    /// Any value other than a true literal counts as unsupported; no value at
    /// all is no signal.
    fn javascript_support<M: MatchResult + ?Sized>(&self, result: &M) -> Option<bool> {
        self.first_value(result, Property::Javascript)
            .map(|value| self.literals.is_true(value))
    }

    fn javascript_version<'a, M: MatchResult + ?Sized>(&'a self, result: &M) -> Option<&'a str> {
        self.first_text(result, Property::JavascriptVersion)
            .filter(|raw| raw.parse::<ClrVersion>().is_ok())
    }

    fn device_model<'a, M: MatchResult + ?Sized>(&'a self, result: &M) -> Option<&'a str> {
        self.first_text(result, Property::HardwareModel)
            .filter(|model| !model.is_empty())
            .or_else(|| self.first_text(result, Property::HardwareName))
    }

    fn screen_pixels<'a, M: MatchResult + ?Sized>(
        &'a self,
        result: &M,
        property: Property,
    ) -> Option<&'a str> {
        self.first_text(result, property)
            .filter(|raw| raw.parse::<u32>().is_ok())
    }

    fn bits_per_pixel<M: MatchResult + ?Sized>(&self, result: &M) -> i64 {
        self.first_text(result, Property::BitsPerPixel)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_BITS_PER_PIXEL)
    }

    /// PNG, then JPEG, then GIF; `None` if none are accepted.
    fn preferred_image_mime<M: MatchResult + ?Sized>(&self, result: &M) -> Option<&'static str> {
        let accepted = self.all_values(result, Property::CcppAccept);
        let preference: [(&[StringHandle], &'static str); 3] = [
            (self.literals.png.as_slice(), MIME_PNG),
            (self.literals.jpeg.as_slice(), MIME_JPEG),
            (self.literals.gif.as_slice(), MIME_GIF),
        ];
        preference
            .into_iter()
            .find(|(handles, _)| accepted.iter().any(|value| handles.contains(value)))
            .map(|(_, mime)| mime)
    }

    fn ajax_unsupported<M: MatchResult + ?Sized>(&self, result: &M) -> bool {
        self.all_values(result, Property::AjaxRequestType)
            .contains(&self.literals.ajax_not_supported)
    }

    fn supports_callback<M: MatchResult + ?Sized>(&self, result: &M) -> bool {
        !self.ajax_unsupported(result)
    }

    /// Start from the upstream DOM version and raise it to 2.0 when the
    /// device reports an Ajax request type other than "not supported".
    fn w3c_dom_version<M: MatchResult + ?Sized>(&self, result: &M, current: Option<&str>) -> String {
        let mut version = current
            .and_then(|raw| raw.parse::<ClrVersion>().ok())
            .unwrap_or(ClrVersion::new(0, 0));
        let ajax = self.all_values(result, Property::AjaxRequestType);
        if !ajax.is_empty() && !ajax.contains(&self.literals.ajax_not_supported) {
            version = ClrVersion::new(2, 0);
        }
        version.to_string_fields(2)
    }

    fn cookie_support<M: MatchResult + ?Sized>(&self, result: &M, current: Option<&str>) -> bool {
        self.first_text(result, Property::CookiesCapable)
            .and_then(parse_bool)
            .or_else(|| current.and_then(parse_bool))
            .unwrap_or_default()
    }
}

/// Upstream value when present and non-empty, else the hard-coded default.
fn upstream_or_default<'a, E>(key: &str, existing: &'a E) -> Option<&'a str>
where
    E: ExistingCapabilities + ?Sized,
{
    existing
        .get(key)
        .filter(|value| !value.is_empty())
        .or_else(|| default_value(key))
}

/// Permissive version fill; never replaces a value already in the profile.
fn fill_version(profile: &mut CapabilityProfile, raw: &str) {
    let extracted = PermissiveVersion::extract(raw);
    profile.fill(keys::MAJOR_VERSION, Some(&extracted.major));
    profile.fill(keys::MINOR_VERSION, Some(&extracted.minor));
    profile.fill(keys::VERSION, Some(&extracted.version()));
}

/// Case-insensitive `true`/`false`, surrounding whitespace ignored.
fn parse_bool(raw: &str) -> Option<bool> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{NoCapabilities, RecordedMatch};
    use crate::strings::InternTable;
    use std::collections::BTreeMap;

    struct Fixture {
        table: InternTable,
        result: RecordedMatch,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                table: InternTable::new(),
                result: RecordedMatch::new(),
            }
        }

        fn with(mut self, property: &str, values: &[&str]) -> Self {
            let prop = self.table.intern(property).unwrap();
            let handles = values
                .iter()
                .map(|value| self.table.intern(value).unwrap())
                .collect();
            self.result.set(prop, handles);
            self
        }

        fn enhance(self, existing: &BTreeMap<String, String>) -> CapabilityProfile {
            let enhancer = Enhancer::new(self.table).unwrap();
            enhancer.transform(&self.result, existing)
        }
    }

    fn existing(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_bool_matches_case_insensitively() {
        assert_eq!(parse_bool(" TRUE "), Some(true));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn crawler_is_tri_state() {
        let profile = Fixture::new().with("IsCrawler", &["False"]).enhance(&existing(&[]));
        assert_eq!(profile.get(keys::CRAWLER), Some("false"));

        let profile = Fixture::new().with("IsCrawler", &["Unknown"]).enhance(&existing(&[]));
        assert_eq!(profile.get(keys::CRAWLER), None);
    }

    #[test]
    fn device_model_falls_back_to_hardware_name() {
        let profile = Fixture::new()
            .with("HardwareName", &["Galaxy S"])
            .enhance(&existing(&[]));
        assert_eq!(profile.get(keys::MOBILE_DEVICE_MODEL), Some("Galaxy S"));

        let profile = Fixture::new()
            .with("HardwareModel", &["GT-I9000"])
            .with("HardwareName", &["Galaxy S"])
            .enhance(&existing(&[]));
        assert_eq!(profile.get(keys::MOBILE_DEVICE_MODEL), Some("GT-I9000"));
    }

    #[test]
    fn type_copies_manufacturer() {
        let profile = Fixture::new()
            .with("HardwareVendor", &["Nokia"])
            .enhance(&existing(&[]));
        assert_eq!(profile.get(keys::TYPE), Some("Nokia"));

        let profile = Fixture::new().enhance(&existing(&[]));
        assert_eq!(profile.get(keys::TYPE), None);
    }

    #[test]
    fn bit_depth_defaults_to_sixteen_and_drives_is_color() {
        let profile = Fixture::new().enhance(&existing(&[]));
        assert_eq!(profile.get(keys::SCREEN_BIT_DEPTH), Some("16"));
        assert_eq!(profile.get(keys::IS_COLOR), Some("true"));

        let profile = Fixture::new().with("BitsPerPixel", &["2"]).enhance(&existing(&[]));
        assert_eq!(profile.get(keys::SCREEN_BIT_DEPTH), Some("2"));
        assert_eq!(profile.get(keys::IS_COLOR), Some("false"));

        let profile = Fixture::new().with("BitsPerPixel", &["deep"]).enhance(&existing(&[]));
        assert_eq!(profile.get(keys::SCREEN_BIT_DEPTH), Some("16"));
    }

    #[test]
    fn screen_pixels_reject_negative_values() {
        let profile = Fixture::new()
            .with("ScreenPixelsHeight", &["-1"])
            .with("ScreenPixelsWidth", &["320"])
            .enhance(&existing(&[("screenPixelsHeight", "600")]));
        assert_eq!(profile.get(keys::SCREEN_PIXELS_HEIGHT), Some("600"));
        assert_eq!(profile.get(keys::SCREEN_PIXELS_WIDTH), Some("320"));
    }

    #[test]
    fn screen_defaults_apply_without_any_signal() {
        let enhancer = Enhancer::new(InternTable::new()).unwrap();
        let profile = enhancer.transform(&RecordedMatch::new(), &NoCapabilities);
        assert_eq!(profile.get(keys::SCREEN_PIXELS_HEIGHT), Some("480"));
        assert_eq!(profile.get(keys::SCREEN_PIXELS_WIDTH), Some("640"));
        assert_eq!(profile.get(keys::SCREEN_CHARACTERS_HEIGHT), Some("40"));
        assert_eq!(profile.get(keys::SCREEN_CHARACTERS_WIDTH), Some("80"));
    }

    #[test]
    fn jscript_version_requires_strict_version() {
        let profile = Fixture::new()
            .with("JavascriptVersion", &["1.5"])
            .enhance(&existing(&[]));
        assert_eq!(profile.get(keys::JSCRIPT_VERSION), Some("1.5"));

        let profile = Fixture::new()
            .with("JavascriptVersion", &["Unknown"])
            .enhance(&existing(&[]));
        assert_eq!(profile.get(keys::JSCRIPT_VERSION), None);
    }

    #[test]
    fn dom_version_upgrades_only_with_ajax_values() {
        let profile = Fixture::new()
            .with("AjaxRequestType", &["Standard"])
            .enhance(&existing(&[("w3cdomversion", "1.0")]));
        assert_eq!(profile.get(keys::W3C_DOM_VERSION), Some("2.0"));

        let profile = Fixture::new()
            .with("AjaxRequestType", &["AjaxRequestTypeNotSupported"])
            .enhance(&existing(&[("w3cdomversion", "1.0.0")]));
        assert_eq!(profile.get(keys::W3C_DOM_VERSION), Some("1.0"));

        let profile = Fixture::new().enhance(&existing(&[("w3cdomversion", "junk")]));
        assert_eq!(profile.get(keys::W3C_DOM_VERSION), Some("0.0"));
    }

    #[test]
    fn callback_follows_ajax_marker() {
        let profile = Fixture::new()
            .with("AjaxRequestType", &["Standard", "AjaxRequestTypeNotSupported"])
            .enhance(&existing(&[]));
        assert_eq!(profile.get(keys::SUPPORTS_CALLBACK), Some("false"));
        assert_eq!(profile.get(keys::SUPPORTS_CALLBACK_LEGACY), Some("false"));

        let profile = Fixture::new().enhance(&existing(&[]));
        assert_eq!(profile.get(keys::SUPPORTS_CALLBACK), Some("true"));
    }

    #[test]
    fn jpeg_alias_counts_as_jpeg() {
        let profile = Fixture::new()
            .with("CcppAccept", &["image/gif", "image/jpg"])
            .enhance(&existing(&[]));
        assert_eq!(profile.get(keys::PREFERRED_IMAGE_MIME), Some("image/jpeg"));

        let profile = Fixture::new()
            .with("CcppAccept", &["text/html"])
            .enhance(&existing(&[]));
        assert_eq!(profile.get(keys::PREFERRED_IMAGE_MIME), None);
    }

    #[test]
    fn strict_version_keeps_two_component_input() {
        let profile = Fixture::new()
            .with("BrowserVersion", &["10.1"])
            .enhance(&existing(&[]));
        assert_eq!(profile.get(keys::MAJOR_VERSION), Some("10"));
        assert_eq!(profile.get(keys::MINOR_VERSION), Some(".1"));
        assert_eq!(profile.get(keys::VERSION), Some("10.1"));
    }

    #[test]
    fn absent_version_copies_upstream_then_fills_gaps() {
        let profile = Fixture::new().enhance(&existing(&[("version", "5.2")]));
        assert_eq!(profile.get(keys::VERSION), Some("5.2"));
        assert_eq!(profile.get(keys::MAJOR_VERSION), Some("5"));
        assert_eq!(profile.get(keys::MINOR_VERSION), Some("2"));

        let profile = Fixture::new().enhance(&existing(&[
            ("majorversion", "4"),
            ("minorversion", ".01"),
            ("version", "4.01"),
        ]));
        assert_eq!(profile.get(keys::MAJOR_VERSION), Some("4"));
        assert_eq!(profile.get(keys::MINOR_VERSION), Some(".01"));

        let profile = Fixture::new().enhance(&existing(&[]));
        assert_eq!(profile.get(keys::VERSION), Some("0.0"));
        assert_eq!(profile.get(keys::MAJOR_VERSION), Some("0"));
        assert_eq!(profile.get(keys::MINOR_VERSION), Some("0"));
    }

    #[test]
    fn adapters_pass_through_when_present() {
        let profile = Fixture::new()
            .with("Adapters", &["patch.browser"])
            .enhance(&existing(&[]));
        assert_eq!(profile.get(keys::ADAPTERS), Some("patch.browser"));
        let profile = Fixture::new().with("Adapters", &[""]).enhance(&existing(&[]));
        assert_eq!(profile.get(keys::ADAPTERS), None);
    }

    #[cfg(feature = "browser-override")]
    #[test]
    fn browser_override_can_be_disabled_at_runtime() {
        let fixture = Fixture::new().with("BrowserName", &["Opera Mini"]);
        let config = EnhancerConfig {
            override_browser: false,
            ..EnhancerConfig::default()
        };
        let enhancer = Enhancer::with_config(fixture.table, config).unwrap();
        let profile = enhancer.transform(&fixture.result, &NoCapabilities);
        assert_eq!(profile.get(keys::BROWSER), None);

        let fixture = Fixture::new().with("BrowserName", &["Opera Mini"]);
        let profile = fixture.enhance(&existing(&[]));
        assert_eq!(profile.get(keys::BROWSER), Some("Opera Mini"));
    }

    #[test]
    fn describe_resolves_properties_and_metadata() {
        let mut fixture = Fixture::new()
            .with("PlatformName", &["Android"])
            .with("CcppAccept", &["image/png", "image/gif"]);
        fixture.result.set_difference(Some(0.25));
        fixture.result.set_confidence(Some(3));
        let enhancer = Enhancer::new(fixture.table).unwrap();
        let props = enhancer.describe(&fixture.result, Some(Duration::from_millis(4)));
        assert_eq!(props.get("PlatformName"), Some(&["Android".to_string()][..]));
        assert_eq!(props.get("CcppAccept").map(<[String]>::len), Some(2));
        assert_eq!(props.get("Confidence"), Some(&["3".to_string()][..]));
        assert_eq!(props.get("Difference"), Some(&["0.25".to_string()][..]));
        assert_eq!(props.get("DetectionTime"), Some(&["5".to_string()][..]));
    }
}
