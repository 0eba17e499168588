use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .hooklensrc.json"));

    let content = test.read_file(".hooklensrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["sourceRoot"], "./");
    assert_eq!(parsed["ignoreTestFiles"], true);
    assert_eq!(parsed["recordEveryCall"], false);
    assert_eq!(parsed["props"]["provider"], "builtin");
    assert!(content.contains("  "), "Config should be pretty-printed");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".hooklensrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".hooklensrc.json already exists"));
    assert_eq!(test.read_file(".hooklensrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file(
        "src/App.tsx",
        "export function App() { const [n, setN] = useState(0); return <p>{n}</p>; }",
    )?;

    let output = test.analyze_command().output()?;

    assert!(
        output.status.success(),
        "analyze should work with the initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("App  --> src/App.tsx"));

    Ok(())
}
