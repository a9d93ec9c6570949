//! JSON detection records: a match result captured as text, plus the
//! upstream capabilities that accompanied it.
//!
//! Records are what the `enhance-record` helper and the integration suite
//! feed through the enhancer. Loading validates against
//! `schema/detection_record.schema.json`, interns every name and value into a
//! fresh [`InternTable`], and returns the pieces ready for
//! [`crate::Enhancer::new`].

use crate::detection::RecordedMatch;
use crate::strings::{InternTable, StringTable};
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const RECORD_SCHEMA_VERSION: &str = "detection_record_v1";

const EMBEDDED_RECORD_SCHEMA: &str = include_str!("../schema/detection_record.schema.json");

/// Serialized form of one detection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub schema_version: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub existing: BTreeMap<String, Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difference: Option<f64>,
}

/// A record with its strings interned.
#[derive(Debug)]
pub struct InternedRecord {
    pub strings: InternTable,
    pub result: RecordedMatch,
    pub existing: BTreeMap<String, Option<String>>,
}

impl DetectionRecord {
    /// Parse and schema-check a record from JSON text.
    pub fn parse(input: &str, schema: &RecordSchema) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            bail!("No detection record provided");
        }
        let value: Value =
            serde_json::from_str(trimmed).context("Unable to parse detection record JSON")?;
        Self::from_value(value, schema)
    }

    pub fn from_value(value: Value, schema: &RecordSchema) -> Result<Self> {
        schema.validate(&value)?;
        Self::from_value_unchecked(value)
    }

    /// Deserialize without consulting the schema; the version is still checked.
    pub fn from_value_unchecked(value: Value) -> Result<Self> {
        let record: DetectionRecord =
            serde_json::from_value(value).context("Unable to decode detection record")?;
        if record.schema_version != RECORD_SCHEMA_VERSION {
            bail!(
                "schema_version '{}' not supported (expected {})",
                record.schema_version,
                RECORD_SCHEMA_VERSION
            );
        }
        Ok(record)
    }

    pub fn load(path: &Path, schema: &RecordSchema) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading detection record {}", path.display()))?;
        Self::parse(&data, schema).with_context(|| format!("loading {}", path.display()))
    }

    /// Intern names and values into a new table in property-name order.
    pub fn intern(&self) -> Result<InternedRecord> {
        let mut strings = InternTable::new();
        let mut result = RecordedMatch::new();
        for (name, values) in &self.properties {
            if name.trim().is_empty() {
                bail!("detection record contains a property with an empty name");
            }
            let property = strings.intern(name)?;
            let mut handles = Vec::with_capacity(values.len());
            for value in values {
                handles.push(
                    strings
                        .intern(value)
                        .with_context(|| format!("interning value of {name}"))?,
                );
            }
            result.set(property, handles);
        }
        result.set_confidence(self.confidence);
        result.set_difference(self.difference);
        Ok(InternedRecord {
            strings,
            result,
            existing: self.existing.clone(),
        })
    }
}

/// Compiled record schema.
pub struct RecordSchema {
    compiled: JSONSchema,
    schema_version: String,
}

impl RecordSchema {
    /// The schema shipped inside the crate.
    pub fn embedded() -> Result<Self> {
        let value: Value = serde_json::from_str(EMBEDDED_RECORD_SCHEMA)
            .context("parsing embedded detection record schema")?;
        Self::from_value(value)
    }

    /// Load a schema from disk, for callers pinning a copy of their own.
    pub fn load(path: &Path) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("opening schema {}", path.display()))?;
        let value: Value = serde_json::from_str(&data)
            .with_context(|| format!("parsing schema {}", path.display()))?;
        Self::from_value(value).with_context(|| format!("loading schema {}", path.display()))
    }

    fn from_value(value: Value) -> Result<Self> {
        let schema_version = value
            .pointer("/properties/schema_version/const")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("schema missing schema_version const"))?;
        if schema_version != RECORD_SCHEMA_VERSION {
            bail!(
                "schema_version '{}' not in allowed set [\"{}\"]",
                schema_version,
                RECORD_SCHEMA_VERSION
            );
        }
        let compiled = JSONSchema::compile(&value)
            .map_err(|err| anyhow!("compiling detection record schema: {err}"))?;
        Ok(Self {
            compiled,
            schema_version,
        })
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    pub fn validate(&self, value: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(value) {
            let details = errors
                .map(|err| err.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            bail!("detection record failed schema validation:\n{}", details);
        }
        Ok(())
    }
}
