use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const COUNTER: &str = r#"import { useState, useEffect } from "react";

export function Counter({ step = 1 }: { step?: number }) {
  const [count, setCount] = useState(0);
  useEffect(() => { document.title = String(count); }, [count]);
  return <button onClick={() => setCount(count + step)}>{count}</button>;
}
"#;

const PROFILE: &str = r#"
export default function Profile() {
  const { user, loading } = useSelector((state) => state.user);
  const dispatch = useDispatch();
  const { theme } = useContext(ThemeContext);
  return loading ? null : <div className={theme}>{user.name}</div>;
}
"#;

#[test]
fn test_analyze_text_output() -> Result<()> {
    let test = CliTest::with_file("src/Counter.tsx", COUNTER)?;

    let output = test.analyze_command().output()?;
    let out = stdout(&output);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(out.contains("Counter  --> src/Counter.tsx"));
    assert!(out.contains("useState"));
    assert!(out.contains("deps [count]"));
    assert!(out.contains("count / setCount = 0  (4 uses)"));
    assert!(out.contains("step? number = 1"));
    assert!(out.contains("Analyzed 1 file - 1 component found"));

    Ok(())
}

#[test]
fn test_analyze_json_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/Counter.tsx", COUNTER)?;
    test.write_file("src/Profile.tsx", PROFILE)?;
    test.write_file("src/format.ts", "export const format = (n: number) => n.toFixed(2);")?;

    let (output, json) = test.analyze_json(&[])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let components = json.as_array().unwrap();
    assert_eq!(components.len(), 2);

    let counter = &components[0];
    assert_eq!(counter["name"], "Counter");
    assert_eq!(counter["filePath"], "src/Counter.tsx");
    assert_eq!(counter["hooks"][0]["name"], "useState");
    assert_eq!(counter["hooks"][0]["callLocation"]["line"], 4);
    assert_eq!(counter["hooks"][1]["dependencies"][0], "count");
    assert_eq!(counter["states"][0]["initialValue"], "0");
    assert_eq!(counter["props"][0]["name"], "step");
    assert_eq!(counter["props"][0]["required"], false);

    let profile = &components[1];
    assert_eq!(profile["name"], "Profile");
    assert_eq!(profile["contexts"][0]["name"], "ThemeContext");
    assert_eq!(profile["storeUsage"][0]["type"], "redux");
    assert_eq!(
        profile["storeUsage"][0]["selectors"][0],
        "state.user -> { user, loading }"
    );
    assert_eq!(profile["storeUsage"][0]["actions"][0], "dispatch");

    Ok(())
}

#[test]
fn test_analyze_explicit_paths() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/Counter.tsx", COUNTER)?;
    test.write_file("src/Profile.tsx", PROFILE)?;

    let (_, json) = test.analyze_json(&["src/Profile.tsx"])?;

    let components = json.as_array().unwrap();
    assert_eq!(components.len(), 1);
    assert_eq!(components[0]["filePath"], "src/Profile.tsx");

    Ok(())
}

#[test]
fn test_analyze_every_call() -> Result<()> {
    let test = CliTest::with_file(
        "Form.tsx",
        r#"
export const Form = () => {
  const [name, setName] = useState("");
  const [email, setEmail] = useState("");
  return null;
};
"#,
    )?;

    let (_, json) = test.analyze_json(&[])?;
    assert_eq!(json[0]["hooks"].as_array().unwrap().len(), 1);

    let (_, json) = test.analyze_json(&["--every-call"])?;
    assert_eq!(json[0]["hooks"].as_array().unwrap().len(), 2);
    assert_eq!(json[0]["states"][1]["name"], "email");
    assert_eq!(json[0]["states"][1]["initialValue"], "\"\"");

    Ok(())
}

#[test]
fn test_parse_error_is_reported_not_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/Counter.tsx", COUNTER)?;
    test.write_file("src/Broken.tsx", "export function Broken( { return <div>; }")?;

    let output = test.analyze_command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Analyzed 2 files - 1 component found"));
    assert!(stderr(&output).contains("1 file(s) could not be fully analyzed"));

    let output = test.analyze_command().arg("-v").output()?;
    assert!(stderr(&output).contains("src/Broken.tsx"));
    assert!(stderr(&output).contains("[parse]"));

    Ok(())
}

#[test]
fn test_ignores_test_files_and_node_modules() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/Counter.tsx", COUNTER)?;
    test.write_file("src/Counter.test.tsx", COUNTER)?;
    test.write_file("node_modules/lib/Widget.tsx", COUNTER)?;

    let (_, json) = test.analyze_json(&[])?;

    let paths: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["filePath"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(paths, vec!["src/Counter.tsx"]);

    Ok(())
}

#[test]
fn test_config_file_disables_props() -> Result<()> {
    let test = CliTest::with_file("src/Counter.tsx", COUNTER)?;
    test.write_file(".hooklensrc.json", r#"{ "props": { "provider": "none" } }"#)?;

    let (_, json) = test.analyze_json(&[])?;
    assert!(json[0]["props"].as_array().unwrap().is_empty());

    let (_, json) = test.analyze_json(&["--props", "builtin"])?;
    assert_eq!(json[0]["props"][0]["name"], "step");

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file("src/Counter.tsx", COUNTER)?;
    test.write_file(".hooklensrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.analyze_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_source_root_flag() -> Result<()> {
    let test = CliTest::with_file("web/src/Counter.tsx", COUNTER)?;

    let output = test
        .analyze_command()
        .args(["--source-root", "web", "--format", "json"])
        .output()?;

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json[0]["filePath"], "src/Counter.tsx");
    assert!(test.root().join("web").exists());

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("analyze"));
    assert!(out.contains("init"));

    Ok(())
}
