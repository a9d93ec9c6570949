//! Capability enhancement for device-detection results.
//!
//! A detection engine answers "what is this device?" with a match result that
//! indexes into an interned string table. This crate turns that answer, plus
//! whatever capabilities an upstream layer already established, into a flat
//! and stable capability profile (`isMobileDevice`, `screenPixelsWidth`,
//! `preferredImageMime`, `cookies`, ...) for presentation code.
//!
//! The public surface is small: build an [`Enhancer`] once over the engine's
//! [`StringTable`], then call [`Enhancer::transform`] per request. The
//! [`record`] module and the `enhance-record` helper cover the JSON form used
//! by fixtures and offline inspection.

pub mod config;
pub mod detection;
pub mod enhancer;
pub mod profile;
pub mod properties;
pub mod record;
pub mod rendering;
pub mod strings;
pub mod summary;
pub mod version;

pub use config::EnhancerConfig;
pub use detection::{ExistingCapabilities, MatchResult, NoCapabilities, RecordedMatch};
pub use enhancer::Enhancer;
pub use profile::{CapabilityProfile, FIELD_POLICIES, FieldPolicy, WritePolicy, keys, policy_for};
pub use properties::{Literals, Property, PropertyIndex};
pub use record::{DetectionRecord, InternedRecord, RECORD_SCHEMA_VERSION, RecordSchema};
pub use rendering::{RenderingType, TagWriter};
pub use strings::{InternTable, StringHandle, StringTable};
pub use summary::DeviceProperties;
pub use version::{ClrVersion, PermissiveVersion};
