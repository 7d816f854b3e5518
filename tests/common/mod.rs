#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Runs the `workforce` binary inside an isolated working directory with its
/// own database file and no ambient configuration.
pub struct CliHarness {
    dir: TempDir,
    catalog_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct CliResult {
    pub code: Option<i32>,
    pub stdout: Value,
    pub stderr: String,
}

impl CliResult {
    pub fn payload(&self) -> &Value {
        &self.stdout["payload"]
    }

    pub fn error(&self) -> Result<Value, String> {
        serde_json::from_str(self.stderr.trim())
            .map_err(|err| format!("expected JSON error on stderr, got '{}': {err}", self.stderr))
    }
}

impl CliHarness {
    pub fn new() -> Result<Self, String> {
        let dir = TempDir::new().map_err(|err| format!("tempdir: {err}"))?;
        Ok(Self {
            dir,
            catalog_path: None,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn database_path(&self) -> PathBuf {
        self.dir.path().join("data").join("missions.db")
    }

    pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf, String> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).map_err(|err| format!("write {name}: {err}"))?;
        Ok(path)
    }

    pub fn with_catalog(mut self, contents: &str) -> Result<Self, String> {
        self.catalog_path = Some(self.write_file("catalog.json", contents)?);
        Ok(self)
    }

    /// Binary preconfigured for this harness; arguments are left to the caller.
    pub fn command(&self) -> Result<Command, String> {
        let mut command =
            Command::cargo_bin("workforce").map_err(|err| format!("binary missing: {err}"))?;
        command
            .current_dir(self.dir.path())
            .env("WORKFORCE_DATABASE_PATH", self.database_path())
            .env_remove("WORKFORCE_CATALOG_PATH")
            .env_remove("RUST_LOG");
        if let Some(catalog) = &self.catalog_path {
            command.env("WORKFORCE_CATALOG_PATH", catalog);
        }
        Ok(command)
    }

    pub fn run(&self, args: &[&str]) -> Result<CliResult, String> {
        let mut command = self.command()?;
        command.args(args);

        let output = command.output().map_err(|err| format!("spawn: {err}"))?;
        let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stdout = if raw.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&raw)
                .map_err(|err| format!("expected JSON on stdout, got '{raw}': {err}"))?
        };

        Ok(CliResult {
            code: output.status.code(),
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    pub fn run_ok(&self, args: &[&str]) -> Result<Value, String> {
        let result = self.run(args)?;
        if result.code != Some(0) {
            return Err(format!(
                "expected success for {args:?}, got {:?}: {}",
                result.code, result.stderr
            ));
        }
        Ok(result.payload().clone())
    }
}

pub fn agent_names(payload: &Value) -> Vec<String> {
    payload["agents"]
        .as_array()
        .map(|agents| {
            agents
                .iter()
                .filter_map(|agent| agent["name"].as_str().map(ToString::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub const WRITING_MISSION: &str = r#"{
    "mission_id": "mission-cli-1",
    "name": "Ownership primer",
    "description": "An article for newcomers",
    "intent_summary": "Teach borrowing",
    "category": { "id": 1, "name": "Writing" },
    "domain": "writing",
    "subcategory": { "id": "1.1", "name": "Artikel" },
    "intent_schema": { "purpose": "Educate", "target_audience": "new hires", "language": "en" },
    "preference_schema": { "tone": "Technical", "approx_length": "Medium" },
    "context_schema": { "references": ["https://doc.rust-lang.org/book/"] }
}"#;

pub const TEAM: &str = r#"[
    { "phaseId": "1.1.1", "phaseName": "Research",
      "agent": { "name": "Perplexity", "url": "https://www.perplexity.ai" } },
    { "phaseId": "1.1.2", "phaseName": "Drafting",
      "agent": { "name": "Claude", "url": "https://claude.ai" } }
]"#;
