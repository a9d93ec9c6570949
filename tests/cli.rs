// Exercises the enhance-record helper as a process: record in, JSON out.
mod support;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::io::Write;
use std::process::{Command, Stdio};
use support::{enhance_record_binary, fixture_path, run_command};
use tempfile::NamedTempFile;

fn helper() -> Command {
    let mut cmd = Command::new(enhance_record_binary());
    cmd.env_remove("DEVICECAPS_OVERRIDE_BROWSER")
        .env_remove("DEVICECAPS_RENDERING_TYPE")
        .env_remove("DEVICECAPS_LOG");
    cmd
}

#[test]
fn prints_profile_for_fixture_record() -> Result<()> {
    let mut cmd = helper();
    cmd.arg("--file").arg(fixture_path("feature_phone.json"));
    let output = run_command(cmd)?;
    let profile: Value = serde_json::from_slice(&output.stdout).context("stdout is JSON")?;

    assert_eq!(profile["isMobileDevice"], "true");
    assert_eq!(profile["preferredImageMime"], "image/gif");
    assert_eq!(profile["cookies"], "true");
    assert_eq!(profile["tagwriter"], "System.Web.UI.XhtmlTextWriter");
    assert!(profile.get("properties").is_none());
    Ok(())
}

#[test]
fn describe_adds_device_properties() -> Result<()> {
    let record = json!({
        "schema_version": "detection_record_v1",
        "properties": {
            "BrowserVersion": ["7.0.3"],
            "CcppAccept": ["image/gif", "image/png"]
        },
        "confidence": 1
    });
    let mut file = NamedTempFile::new().context("failed to allocate record file")?;
    serde_json::to_writer(&mut file, &record)?;

    let mut cmd = helper();
    cmd.arg("--describe").arg("--file").arg(file.path());
    let output = run_command(cmd)?;
    let value: Value = serde_json::from_slice(&output.stdout)?;

    assert_eq!(value["capabilities"]["version"], "7.0.3");
    assert_eq!(value["capabilities"]["minorversion"], ".0");
    assert_eq!(value["capabilities"]["preferredImageMime"], "image/png");
    assert_eq!(value["properties"]["CcppAccept"], json!(["image/gif", "image/png"]));
    assert_eq!(value["properties"]["Confidence"], json!(["1"]));
    assert!(value["properties"].get("DetectionTime").is_none());
    Ok(())
}

#[test]
fn reads_record_from_stdin() -> Result<()> {
    let mut child = helper()
        .arg("--stdin")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("spawning enhance-record")?;
    child
        .stdin
        .take()
        .context("stdin handle")?
        .write_all(br#"{"schema_version":"detection_record_v1","properties":{}}"#)?;
    let output = child.wait_with_output()?;
    assert!(output.status.success());
    let profile: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(profile["screenPixelsWidth"], "640");
    assert_eq!(profile["version"], "0.0");
    Ok(())
}

#[test]
fn invalid_record_fails_with_schema_details() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(br#"{"schema_version":"detection_record_v1","properties":{"IsMobile":true}}"#)?;

    let output = helper().arg("--file").arg(file.path()).output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("schema validation"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn rendering_type_comes_from_environment() -> Result<()> {
    let mut cmd = helper();
    cmd.env("DEVICECAPS_RENDERING_TYPE", "html32")
        .arg("--file")
        .arg(fixture_path("feature_phone.json"));
    let output = run_command(cmd)?;
    let profile: Value = serde_json::from_slice(&output.stdout)?;
    // The fixture's upstream layer already chose xhtml-mp.
    assert_eq!(profile["preferredRenderingType"], "xhtml-mp");

    let mut file = NamedTempFile::new()?;
    file.write_all(br#"{"schema_version":"detection_record_v1","properties":{}}"#)?;
    let mut cmd = helper();
    cmd.env("DEVICECAPS_RENDERING_TYPE", "html32")
        .arg("--file")
        .arg(file.path());
    let output = run_command(cmd)?;
    let profile: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(profile["preferredRenderingType"], "html32");
    assert_eq!(profile["tagwriter"], "System.Web.UI.Html32TextWriter");
    Ok(())
}
