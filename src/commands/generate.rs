use anyhow::{Context, Result};

use crate::annotations;
use crate::config::{Config, Trigger};
use crate::discovery;
use crate::github::{self, ChangedFilesApi, GhCli};
use crate::models::PluginRecord;
use crate::output;

/// Discover plugins under `root` and apply the trigger-context filter.
///
/// Pull requests narrow the matrix to plugins whose top-level directory was
/// touched; every other trigger keeps the full set. Single-plugin repos are
/// never filtered.
pub fn build_matrix(
    root: &std::path::Path,
    config: &Config,
    api: &dyn ChangedFilesApi,
) -> Result<Vec<PluginRecord>> {
    let mut records = discovery::discover_plugins(root)?;

    if !records.iter().any(|r| r.single) {
        match config.trigger {
            Trigger::PullRequest => {
                println!(
                    "{}",
                    annotations::notice("PR mode", "Adding plugins touched in this PR to matrix")
                );
                // Config::resolve guarantees the PR number for this trigger
                let pr_number = config
                    .pr_number
                    .as_deref()
                    .context("missing PR number in pull_request context")?;
                let files = api.changed_files(&config.repository, pr_number)?;
                let touched = github::changed_top_level_dirs(&files);
                records.retain(|record| touched.contains(&record.plugin));
            }
            Trigger::WorkflowDispatch => {
                println!(
                    "{}",
                    annotations::notice("Manual mode", "Adding all plugins to matrix")
                );
            }
            Trigger::Push => {
                println!(
                    "{}",
                    annotations::notice("Push mode", "Adding all plugins to matrix")
                );
            }
        }
    }

    Ok(records)
}

/// Run the full generate flow against the current directory and the real
/// GitHub API client.
pub fn generate_command(config: &Config) -> Result<()> {
    let root = std::env::current_dir()?;
    let records = build_matrix(&root, config, &GhCli)?;

    if records.is_empty() {
        println!("{}", annotations::notice_untitled("Empty matrix, no plugins found"));
    } else {
        let mut names: Vec<_> = records.iter().map(|r| r.plugin.as_str()).collect();
        names.sort_unstable();
        println!(
            "{}",
            annotations::notice("Plugins added to matrix", &names.join(", "))
        );
    }

    output::write_matrix(&config.github_output, &records)
        .context("failed to write matrix output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Trigger};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    struct FakeApi {
        files: Vec<String>,
    }

    impl ChangedFilesApi for FakeApi {
        fn changed_files(&self, _repository: &str, _pr_number: &str) -> crate::error::Result<Vec<String>> {
            Ok(self.files.clone())
        }
    }

    struct FailingApi;

    impl ChangedFilesApi for FailingApi {
        fn changed_files(&self, _repository: &str, _pr_number: &str) -> crate::error::Result<Vec<String>> {
            Err(crate::error::Error::RemoteCall("boom".to_string()))
        }
    }

    fn config(trigger: Trigger) -> Config {
        Config {
            repository: "indico/indico-plugins".to_string(),
            trigger,
            pr_number: matches!(trigger, Trigger::PullRequest).then(|| "7".to_string()),
            github_output: PathBuf::from("/dev/null"),
        }
    }

    fn plugin_dir(root: &TempDir, name: &str) {
        let dir = root.path().join(name);
        let pkg = dir.join(format!("indico_{name}"));
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("__init__.py"), "").unwrap();
        fs::write(
            dir.join("pyproject.toml"),
            "[project]\ndependencies = []\n",
        )
        .unwrap();
    }

    #[test]
    fn test_pull_request_filters_to_touched_plugins() {
        let root = tempdir().unwrap();
        plugin_dir(&root, "a");
        plugin_dir(&root, "b");
        plugin_dir(&root, "c");

        let api = FakeApi {
            files: vec![
                "a/x.py".to_string(),
                "c/y.py".to_string(),
                "toplevel.py".to_string(),
            ],
        };
        let records = build_matrix(root.path(), &config(Trigger::PullRequest), &api).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.plugin.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_pull_request_with_no_touched_plugins_is_empty() {
        let root = tempdir().unwrap();
        plugin_dir(&root, "a");

        let api = FakeApi {
            files: vec!["README.md".to_string()],
        };
        let records = build_matrix(root.path(), &config(Trigger::PullRequest), &api).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_push_keeps_all_plugins() {
        let root = tempdir().unwrap();
        plugin_dir(&root, "b");
        plugin_dir(&root, "a");

        let records = build_matrix(root.path(), &config(Trigger::Push), &FailingApi).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.plugin.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_workflow_dispatch_keeps_all_plugins() {
        let root = tempdir().unwrap();
        plugin_dir(&root, "a");

        let records =
            build_matrix(root.path(), &config(Trigger::WorkflowDispatch), &FailingApi).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_single_plugin_repo_skips_pr_filter() {
        let root = tempdir().unwrap();
        plugin_dir(&root, "solo");
        let solo = root.path().join("solo");

        // PR filter must not apply even though the API reports no files
        let api = FakeApi { files: Vec::new() };
        let records = build_matrix(&solo, &config(Trigger::PullRequest), &api).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].single);
    }

    #[test]
    fn test_api_failure_is_fatal_in_pr_mode() {
        let root = tempdir().unwrap();
        plugin_dir(&root, "a");

        let result = build_matrix(root.path(), &config(Trigger::PullRequest), &FailingApi);
        assert!(result.is_err());
    }
}
