use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .i18nizerc.json"));

    let content = test.read_file(".i18nizerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["componentsRoot"], "./src/components");
    assert_eq!(parsed["localesRoot"], "./public/static/locales");
    assert_eq!(parsed["baseLocale"], "en");
    assert_eq!(parsed["mockLocales"], serde_json::json!(["de"]));

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".i18nizerc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".i18nizerc.json already exists"));
    assert_eq!(test.read_file(".i18nizerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file(
        "src/components/Common/Greeting.jsx",
        "import React from 'react';\nconst Greeting = () => <p>Hello there</p>;\nexport default Greeting;\n",
    )?;

    let output = test.migrate_command().arg("--apply").output()?;

    assert!(
        output.status.success(),
        "Migrate should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.root().join("public/static/locales/en/Common.json").exists());

    Ok(())
}
