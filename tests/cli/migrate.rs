use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

const GREETING: &str = "import React from 'react';

const Greeting = () => <p>Hello there</p>;

export default Greeting;
";

const GREETING_MIGRATED: &str = "import { useTranslation } from 'react-i18next';
import React from 'react';

const Greeting = () => {
    const { t } = useTranslation('Common');
    return <p>{t('Greeting.hello_there')}</p>;
};

export default Greeting;
";

const CONFIG: &str = r#"{
    "componentsRoot": "./components",
    "localesRoot": "./locales",
    "mockLocales": ["de"]
}"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(".i18nizerc.json", CONFIG)?;
    test.write_file("components/Common/Greeting.jsx", GREETING)?;
    Ok(test)
}

#[test]
fn test_migrate_greeting() -> Result<()> {
    let test = project()?;

    let output = test.migrate_command().arg("--apply").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("✓ Translated: Common/Greeting.jsx (1 key)"));
    assert_eq!(
        test.read_file("components/Common/Greeting.jsx")?,
        GREETING_MIGRATED
    );
    assert_eq!(
        test.read_file("locales/en/Common.json")?,
        "{\n    \"Greeting\": {\n        \"hello_there\": \"Hello there\"\n    }\n}\n"
    );

    let mock = test.read_json("locales/de/Common.json")?;
    let text = mock["Greeting"]["hello_there"].as_str().unwrap_or_default();
    assert!(text.starts_with("de "), "unexpected mock text: {}", text);

    Ok(())
}

#[test]
fn test_dry_run_is_default() -> Result<()> {
    let test = project()?;

    let output = test.migrate_command().output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Would translate: Common/Greeting.jsx (1 key)"));
    assert!(out.contains("Run with --apply"));
    assert_eq!(test.read_file("components/Common/Greeting.jsx")?, GREETING);
    assert!(!test.root().join("locales").exists());

    Ok(())
}

#[test]
fn test_second_run_is_a_no_op() -> Result<()> {
    let test = project()?;
    test.migrate_command().arg("--apply").output()?;
    let catalog = test.read_file("locales/en/Common.json")?;

    let output = test.migrate_command().arg("--apply").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("nothing to translate"));
    assert_eq!(
        test.read_file("components/Common/Greeting.jsx")?,
        GREETING_MIGRATED
    );
    assert_eq!(test.read_file("locales/en/Common.json")?, catalog);

    Ok(())
}

#[test]
fn test_existing_catalog_values_win() -> Result<()> {
    let test = project()?;
    test.write_file(
        "locales/en/Common.json",
        r#"{ "Greeting": { "hello_there": "Hi!" }, "Legacy": { "kept": "Kept" } }"#,
    )?;

    let output = test.migrate_command().arg("--apply").output()?;

    assert!(output.status.success());
    assert_eq!(
        test.read_json("locales/en/Common.json")?,
        json!({
            "Greeting": { "hello_there": "Hi!" },
            "Legacy": { "kept": "Kept" }
        })
    );

    Ok(())
}

#[test]
fn test_attribute_filter() -> Result<()> {
    let test = CliTest::with_file(".i18nizerc.json", CONFIG)?;
    test.write_file(
        "components/Forms/Search.jsx",
        r#"import React from 'react';

export default function Search() {
    return <input className="search-box" placeholder="Search" aria-label="Search field" tooltip="Find anything here" />;
}
"#,
    )?;

    let output = test.migrate_command().arg("--apply").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let code = test.read_file("components/Forms/Search.jsx")?;
    assert!(code.contains(r#"className="search-box""#));
    assert!(code.contains(r#"aria-label="Search field""#));
    assert!(code.contains("placeholder={t('Search.search')}"));
    assert!(code.contains("tooltip={t('Search.find_anything_here')}"));
    assert_eq!(
        test.read_json("locales/en/Forms.json")?,
        json!({
            "Search": {
                "search": "Search",
                "find_anything_here": "Find anything here"
            }
        })
    );

    Ok(())
}

#[test]
fn test_non_components_are_untouched() -> Result<()> {
    let test = project()?;
    let helper = "export const greeting = 'Hello there';\n";
    test.write_file("components/Common/helpers.js", helper)?;
    test.write_file("components/Common/styles.css", ".a { color: red; }\n")?;

    let output = test.migrate_command().args(["--apply", "-v"]).output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("components/Common/helpers.js")?, helper);
    let out = stdout(&output);
    assert!(out.contains("skipped Common/helpers.js (not a component)"));
    assert!(!out.contains("styles.css"));

    Ok(())
}

#[test]
fn test_class_component_is_wrapped() -> Result<()> {
    let test = CliTest::with_file(".i18nizerc.json", CONFIG)?;
    test.write_file(
        "components/Customer/Profile.jsx",
        r#"import React, { Component } from "react";

class Profile extends Component {
    render() {
        return <h2>Your profile</h2>;
    }
}

export default Profile;
"#,
    )?;

    let output = test.migrate_command().arg("--apply").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let code = test.read_file("components/Customer/Profile.jsx")?;
    assert!(code.starts_with("import { withTranslation } from \"react-i18next\";\n"));
    assert!(code.contains("{this.props.t('Profile.your_profile')}"));
    assert!(code.contains("export default withTranslation(\"Customer\")(Profile);"));

    Ok(())
}

#[test]
fn test_only_filter() -> Result<()> {
    let test = project()?;
    test.write_file(
        "components/Customer/Card.jsx",
        "import React from 'react';\nexport default function Card() {\n    return <p>Customer card</p>;\n}\n",
    )?;

    let output = test
        .migrate_command()
        .args(["--apply", "--only", "/Customer"])
        .output()?;

    assert!(output.status.success());
    assert!(test.root().join("locales/en/Customer.json").exists());
    assert!(!test.root().join("locales/en/Common.json").exists());
    assert_eq!(test.read_file("components/Common/Greeting.jsx")?, GREETING);

    Ok(())
}

#[test]
fn test_broken_file_fails_run_and_is_untouched() -> Result<()> {
    let test = project()?;
    let broken = "import React from 'react';\nconst Broken = () => <p>Oops there</p\n";
    test.write_file("components/Common/Broken.jsx", broken)?;

    let output = test.migrate_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("✘ Failed: Common/Broken.jsx"));
    assert_eq!(test.read_file("components/Common/Broken.jsx")?, broken);
    assert_eq!(
        test.read_file("components/Common/Greeting.jsx")?,
        GREETING_MIGRATED
    );

    Ok(())
}

#[test]
fn test_observer_quirk_is_listed() -> Result<()> {
    let test = CliTest::with_file(".i18nizerc.json", CONFIG)?;
    test.write_file(
        "components/Common/Status.js",
        r#"import React from 'react';
import { observer } from 'mobx-react';

const Status = () => <span>All systems normal</span>;

export default observer(Status);
"#,
    )?;

    let output = test.migrate_command().arg("--apply").output()?;

    assert!(output.status.success());
    assert!(stdout(&output)
        .contains("The following files may contain observer errors:\n  Common/Status.js\n"));

    Ok(())
}

#[test]
fn test_missing_components_root_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".i18nizerc.json", CONFIG)?;

    let output = test.migrate_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read components directory"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".i18nizerc.json", r#"{ "ignores": ["[oops"] }"#)?;

    let output = test.migrate_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("ignores"));

    Ok(())
}
