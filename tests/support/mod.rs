#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use devicecaps::{CapabilityProfile, Enhancer, InternTable, RecordedMatch, StringTable};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Builds a string table and match result side by side.
#[derive(Default)]
pub struct MatchFixture {
    pub table: InternTable,
    pub result: RecordedMatch,
}

impl MatchFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: &str, values: &[&str]) -> Self {
        let prop = self.table.intern(property).expect("intern property");
        let handles = values
            .iter()
            .map(|value| self.table.intern(value).expect("intern value"))
            .collect();
        self.result.set(prop, handles);
        self
    }

    pub fn build(self) -> (Enhancer<InternTable>, RecordedMatch) {
        let enhancer = Enhancer::new(self.table).expect("enhancer construction");
        (enhancer, self.result)
    }

    pub fn enhance(self, existing: &BTreeMap<String, String>) -> CapabilityProfile {
        let (enhancer, result) = self.build();
        enhancer.transform(&result, existing)
    }
}

pub fn existing(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn enhance_record_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_enhance-record"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
