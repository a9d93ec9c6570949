//! Well-known detection property names and the literal values compared by
//! handle.
//!
//! [`PropertyIndex`] is built once per enhancer. Every [`Property`] variant is
//! registered during construction, so lookups at transform time are
//! infallible array reads rather than string comparisons.

use crate::strings::{StringHandle, StringTable};
use anyhow::{Context, Result};

/// Detection properties the enhancer reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Property {
    AjaxRequestType,
    Javascript,
    JavascriptVersion,
    CookiesCapable,
    BrowserVersion,
    BrowserName,
    PlatformName,
    Adapters,
    ScreenPixelsHeight,
    ScreenPixelsWidth,
    BitsPerPixel,
    HardwareName,
    HardwareModel,
    HardwareVendor,
    IsMobile,
    IsCrawler,
    CcppAccept,
}

impl Property {
    pub const ALL: [Property; 17] = [
        Property::AjaxRequestType,
        Property::Javascript,
        Property::JavascriptVersion,
        Property::CookiesCapable,
        Property::BrowserVersion,
        Property::BrowserName,
        Property::PlatformName,
        Property::Adapters,
        Property::ScreenPixelsHeight,
        Property::ScreenPixelsWidth,
        Property::BitsPerPixel,
        Property::HardwareName,
        Property::HardwareModel,
        Property::HardwareVendor,
        Property::IsMobile,
        Property::IsCrawler,
        Property::CcppAccept,
    ];

    /// Name as stored in the detection data set.
    pub fn as_str(&self) -> &'static str {
        match self {
            Property::AjaxRequestType => "AjaxRequestType",
            Property::Javascript => "Javascript",
            Property::JavascriptVersion => "JavascriptVersion",
            Property::CookiesCapable => "CookiesCapable",
            Property::BrowserVersion => "BrowserVersion",
            Property::BrowserName => "BrowserName",
            Property::PlatformName => "PlatformName",
            Property::Adapters => "Adapters",
            Property::ScreenPixelsHeight => "ScreenPixelsHeight",
            Property::ScreenPixelsWidth => "ScreenPixelsWidth",
            Property::BitsPerPixel => "BitsPerPixel",
            Property::HardwareName => "HardwareName",
            Property::HardwareModel => "HardwareModel",
            Property::HardwareVendor => "HardwareVendor",
            Property::IsMobile => "IsMobile",
            Property::IsCrawler => "IsCrawler",
            Property::CcppAccept => "CcppAccept",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Marker value of `AjaxRequestType` for devices without XMLHttpRequest.
pub const AJAX_NOT_SUPPORTED: &str = "AjaxRequestTypeNotSupported";

pub const MIME_PNG: &str = "image/png";
pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_JPG: &str = "image/jpg";
pub const MIME_GIF: &str = "image/gif";

/// Typed handle for every [`Property`], resolved against one string table.
#[derive(Clone, Debug)]
pub struct PropertyIndex {
    handles: [StringHandle; Property::ALL.len()],
}

impl PropertyIndex {
    pub fn register<T: StringTable + ?Sized>(strings: &mut T) -> Result<Self> {
        let mut handles = [StringHandle(0); Property::ALL.len()];
        for property in Property::ALL {
            handles[property.slot()] = strings
                .intern(property.as_str())
                .with_context(|| format!("registering property {}", property.as_str()))?;
        }
        Ok(Self { handles })
    }

    pub fn handle(&self, property: Property) -> StringHandle {
        self.handles[property.slot()]
    }
}

/// Value literals compared by handle equality.
#[derive(Clone, Debug)]
pub struct Literals {
    pub truthy: [StringHandle; 2],
    pub falsy: [StringHandle; 2],
    pub ajax_not_supported: StringHandle,
    pub png: Vec<StringHandle>,
    pub jpeg: Vec<StringHandle>,
    pub gif: Vec<StringHandle>,
}

impl Literals {
    pub fn register<T: StringTable + ?Sized>(strings: &mut T) -> Result<Self> {
        let mut intern = |text: &str| {
            strings
                .intern(text)
                .with_context(|| format!("registering literal '{text}'"))
        };
        Ok(Self {
            truthy: [intern("True")?, intern("true")?],
            falsy: [intern("False")?, intern("false")?],
            ajax_not_supported: intern(AJAX_NOT_SUPPORTED)?,
            png: vec![intern(MIME_PNG)?],
            jpeg: vec![intern(MIME_JPEG)?, intern(MIME_JPG)?],
            gif: vec![intern(MIME_GIF)?],
        })
    }

    pub fn is_true(&self, handle: StringHandle) -> bool {
        self.truthy.contains(&handle)
    }

    pub fn is_false(&self, handle: StringHandle) -> bool {
        self.falsy.contains(&handle)
    }
}
