//! Runtime configuration resolved once at startup
//!
//! All environment access happens here, through clap's env fallbacks; the
//! rest of the crate only ever sees a fully validated [`Config`].

use std::path::PathBuf;

use clap::Args;

use crate::error::{Error, Result};

/// CI trigger context, three-way dispatch on `GITHUB_EVENT_NAME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    PullRequest,
    WorkflowDispatch,
    /// Anything else (plain pushes, schedules, ...) builds the full matrix
    Push,
}

impl Trigger {
    pub fn from_event_name(event: &str) -> Self {
        match event {
            "pull_request" => Self::PullRequest,
            "workflow_dispatch" => Self::WorkflowDispatch,
            _ => Self::Push,
        }
    }
}

/// Raw inputs for `generate`, each flag falling back to the environment
/// variable GitHub Actions provides.
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Repository slug (owner/repo)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Pull request number (only consumed for pull_request events)
    #[arg(long, env = "PR_NUMBER")]
    pub pr_number: Option<String>,

    /// CI trigger event name
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event_name: Option<String>,

    /// File to append the matrix output line to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,
}

impl GenerateArgs {
    /// Same inputs as the clap env fallbacks, for the bare-invocation path
    /// where no subcommand (and thus no flag parsing) is involved.
    pub fn from_env() -> Self {
        Self {
            repository: std::env::var("GITHUB_REPOSITORY").ok(),
            pr_number: std::env::var("PR_NUMBER").ok(),
            event_name: std::env::var("GITHUB_EVENT_NAME").ok(),
            github_output: std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from),
        }
    }
}

/// Validated configuration passed explicitly to the matrix builder.
#[derive(Debug, Clone)]
pub struct Config {
    pub repository: String,
    pub trigger: Trigger,
    /// Present iff `trigger` is `PullRequest`
    pub pr_number: Option<String>,
    pub github_output: PathBuf,
}

impl Config {
    /// Single validation point for all required inputs.
    pub fn resolve(args: GenerateArgs) -> Result<Self> {
        let repository = args.repository.ok_or(Error::MissingEnv("GITHUB_REPOSITORY"))?;
        let event_name = args.event_name.ok_or(Error::MissingEnv("GITHUB_EVENT_NAME"))?;
        let github_output = args.github_output.ok_or(Error::MissingEnv("GITHUB_OUTPUT"))?;

        let trigger = Trigger::from_event_name(&event_name);
        let pr_number = match trigger {
            Trigger::PullRequest => Some(args.pr_number.ok_or(Error::MissingEnv("PR_NUMBER"))?),
            _ => None,
        };

        Ok(Self {
            repository,
            trigger,
            pr_number,
            github_output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> GenerateArgs {
        GenerateArgs {
            repository: Some("indico/indico-plugins".to_string()),
            pr_number: Some("42".to_string()),
            event_name: Some("push".to_string()),
            github_output: Some(PathBuf::from("/tmp/out")),
        }
    }

    #[test]
    fn test_trigger_dispatch() {
        assert_eq!(Trigger::from_event_name("pull_request"), Trigger::PullRequest);
        assert_eq!(
            Trigger::from_event_name("workflow_dispatch"),
            Trigger::WorkflowDispatch
        );
        assert_eq!(Trigger::from_event_name("push"), Trigger::Push);
        assert_eq!(Trigger::from_event_name("schedule"), Trigger::Push);
    }

    #[test]
    fn test_resolve_requires_repository() {
        let config = Config::resolve(GenerateArgs {
            repository: None,
            ..args()
        });
        assert!(matches!(config, Err(Error::MissingEnv("GITHUB_REPOSITORY"))));
    }

    #[test]
    fn test_pr_number_only_required_for_pull_requests() {
        let push = Config::resolve(GenerateArgs {
            pr_number: None,
            ..args()
        })
        .unwrap();
        assert_eq!(push.pr_number, None);

        let pr = Config::resolve(GenerateArgs {
            pr_number: None,
            event_name: Some("pull_request".to_string()),
            ..args()
        });
        assert!(matches!(pr, Err(Error::MissingEnv("PR_NUMBER"))));
    }

    #[test]
    fn test_pr_number_kept_for_pull_requests() {
        let config = Config::resolve(GenerateArgs {
            event_name: Some("pull_request".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(config.trigger, Trigger::PullRequest);
        assert_eq!(config.pr_number.as_deref(), Some("42"));
    }
}
