//! # Review Requests
//!
//! Opens merge requests (GitLab) or pull requests (GitHub) by shelling out to
//! the hosting service's own CLI: `glab` or `gh`. Neither tool is required.
//!
//! ## Selection
//!
//! Publishers are tried in a fixed priority order:
//!
//! 1.  The tool matching the host detected from the remote URL, if installed.
//! 2.  `glab`, if installed.
//! 3.  `gh`, if installed.
//! 4.  [`ManualInstructions`], which always succeeds and only tells the user
//!     what to create by hand.
//!
//! The host is recognised from substrings of the remote URL (`gitlab`,
//! `github`) or from a hostname equal to `GITLAB_HOST` / `GH_HOST`, the
//! variables the two CLIs themselves use for self-hosted instances.

use std::env;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};
use crate::git::GitOperations;

/// Hosting service inferred from a remote URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostingService {
    GitLab,
    GitHub,
    Unknown,
}

/// What the user asked to open.
#[derive(Debug, Clone, Copy)]
pub struct ReviewRequest<'a> {
    pub source_branch: &'a str,
    pub target_branch: &'a str,
    pub title: Option<&'a str>,
    pub draft: bool,
}

/// Result of handing a request to a publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The review tool ran and exited successfully.
    Submitted { tool: &'static str },
    /// No tool was available; the user has to open the request by hand.
    ManualActionRequired { suggested_title: String },
}

/// Something that can open a review request for a repository.
pub trait ReviewPublisher {
    /// Short name used in logs and messages.
    fn name(&self) -> &'static str;

    /// Open `request` for the repository at `dir`.
    fn open(&self, dir: &Path, request: &ReviewRequest<'_>) -> Result<ReviewOutcome>;
}

/// Answers whether an executable can be found.
pub trait ToolProbe {
    fn is_available(&self, program: &str) -> bool;
}

/// Looks programs up on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathProbe;

impl ToolProbe for PathProbe {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// `glab mr create`
#[derive(Debug, Default, Clone, Copy)]
pub struct GitLabCli;

impl GitLabCli {
    pub const PROGRAM: &'static str = "glab";

    pub fn args(&self, request: &ReviewRequest<'_>) -> Vec<String> {
        let mut args: Vec<String> = [
            "mr",
            "create",
            "--source-branch",
            request.source_branch,
            "--target-branch",
            request.target_branch,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        push_common_args(&mut args, request);
        args
    }
}

impl ReviewPublisher for GitLabCli {
    fn name(&self) -> &'static str {
        Self::PROGRAM
    }

    fn open(&self, dir: &Path, request: &ReviewRequest<'_>) -> Result<ReviewOutcome> {
        run_tool(Self::PROGRAM, dir, &self.args(request))
    }
}

/// `gh pr create`
#[derive(Debug, Default, Clone, Copy)]
pub struct GitHubCli;

impl GitHubCli {
    pub const PROGRAM: &'static str = "gh";

    pub fn args(&self, request: &ReviewRequest<'_>) -> Vec<String> {
        let mut args: Vec<String> = [
            "pr",
            "create",
            "--head",
            request.source_branch,
            "--base",
            request.target_branch,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        push_common_args(&mut args, request);
        args
    }
}

impl ReviewPublisher for GitHubCli {
    fn name(&self) -> &'static str {
        Self::PROGRAM
    }

    fn open(&self, dir: &Path, request: &ReviewRequest<'_>) -> Result<ReviewOutcome> {
        run_tool(Self::PROGRAM, dir, &self.args(request))
    }
}

/// Fallback when no review CLI is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualInstructions;

impl ReviewPublisher for ManualInstructions {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn open(&self, _dir: &Path, request: &ReviewRequest<'_>) -> Result<ReviewOutcome> {
        Ok(ReviewOutcome::ManualActionRequired {
            suggested_title: request
                .title
                .unwrap_or(request.source_branch)
                .to_string(),
        })
    }
}

fn push_common_args(args: &mut Vec<String>, request: &ReviewRequest<'_>) {
    if let Some(title) = request.title {
        args.push("--title".to_string());
        args.push(title.to_string());
    }
    if request.draft {
        args.push("--draft".to_string());
    }
}

/// Run an interactive review tool in `dir`, letting it share the terminal.
fn run_tool(program: &'static str, dir: &Path, args: &[String]) -> Result<ReviewOutcome> {
    debug!("Running MR command: {} {}", program, args.join(" "));
    let status = Command::new(program).args(args).current_dir(dir).status()?;
    if !status.success() {
        return Err(Error::ReviewCommand {
            tool: program.to_string(),
            code: status.code(),
        });
    }
    Ok(ReviewOutcome::Submitted { tool: program })
}

/// Detect the hosting service from `remote_url`, honouring `GH_HOST` and
/// `GITLAB_HOST`.
pub fn detect_host(remote_url: &str) -> HostingService {
    let gh_host = env::var("GH_HOST").ok();
    let gitlab_host = env::var("GITLAB_HOST").ok();
    detect_host_with(remote_url, gh_host.as_deref(), gitlab_host.as_deref())
}

/// [`detect_host`] with the self-hosted hostnames passed in explicitly.
pub fn detect_host_with(
    remote_url: &str,
    gh_host: Option<&str>,
    gitlab_host: Option<&str>,
) -> HostingService {
    let url = remote_url.to_lowercase();
    let hostname = extract_hostname(&url);
    let is_host = |configured: Option<&str>| {
        configured
            .zip(hostname.as_deref())
            .is_some_and(|(configured, host)| configured.eq_ignore_ascii_case(host))
    };

    if url.contains("gitlab") || is_host(gitlab_host) {
        HostingService::GitLab
    } else if url.contains("github") || is_host(gh_host) {
        HostingService::GitHub
    } else {
        HostingService::Unknown
    }
}

fn extract_hostname(url: &str) -> Option<String> {
    // scp-like syntax: user@host:path
    if !url.contains("://") {
        let (authority, _) = url.split_once(':')?;
        let host = authority.rsplit('@').next()?;
        return (!host.is_empty()).then(|| host.to_string());
    }

    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(ToString::to_string))
}

/// The tool to try first for `remote_url`.
///
/// An unrecognised host whose URL ends in `.git` leans towards `gh`.
fn preferred_tool(remote_url: &str, host: HostingService) -> Option<&'static str> {
    match host {
        HostingService::GitLab => Some(GitLabCli::PROGRAM),
        HostingService::GitHub => Some(GitHubCli::PROGRAM),
        HostingService::Unknown if remote_url.to_lowercase().ends_with(".git") => {
            Some(GitHubCli::PROGRAM)
        }
        HostingService::Unknown => None,
    }
}

/// Pick the publisher for a repository whose remote is `remote_url`.
pub fn select_publisher(
    remote_url: &str,
    host: HostingService,
    probe: &dyn ToolProbe,
) -> Box<dyn ReviewPublisher> {
    let priority = preferred_tool(remote_url, host)
        .into_iter()
        .chain([GitLabCli::PROGRAM, GitHubCli::PROGRAM]);

    for program in priority {
        if probe.is_available(program) {
            debug!("Using {program} for review requests ({host:?} remote)");
            return match program {
                GitLabCli::PROGRAM => Box::new(GitLabCli),
                _ => Box::new(GitHubCli),
            };
        }
    }

    debug!("No review CLI found on PATH");
    Box::new(ManualInstructions)
}

/// Open a review request for the repository at `dir`, choosing the tool from
/// the URL of `remote`.
pub fn create_review_request(
    git: &dyn GitOperations,
    probe: &dyn ToolProbe,
    dir: &Path,
    remote: &str,
    request: &ReviewRequest<'_>,
) -> Result<ReviewOutcome> {
    let remote_url = git.remote_url(dir, remote)?;
    let host = detect_host(&remote_url);
    let publisher = select_publisher(&remote_url, host, probe);
    publisher.open(dir, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::MockGit;
    use crate::git::GitOutput;
    use serial_test::serial;

    /// Reports a fixed set of programs as installed.
    struct Installed(&'static [&'static str]);

    impl ToolProbe for Installed {
        fn is_available(&self, program: &str) -> bool {
            self.0.contains(&program)
        }
    }

    fn request() -> ReviewRequest<'static> {
        ReviewRequest {
            source_branch: "feature-x",
            target_branch: "main",
            title: None,
            draft: false,
        }
    }

    fn chosen(url: &str, installed: &'static [&'static str]) -> &'static str {
        let host = detect_host_with(url, None, None);
        select_publisher(url, host, &Installed(installed)).name()
    }

    #[test]
    fn test_detect_host_substrings() {
        assert_eq!(
            detect_host_with("git@gitlab.com:team/lib.git", None, None),
            HostingService::GitLab
        );
        assert_eq!(
            detect_host_with("https://GitHub.com/team/lib", None, None),
            HostingService::GitHub
        );
        assert_eq!(
            detect_host_with("https://git.example.org/team/lib.git", None, None),
            HostingService::Unknown
        );
    }

    #[test]
    fn test_detect_host_self_hosted() {
        assert_eq!(
            detect_host_with(
                "git@code.corp.internal:team/lib.git",
                None,
                Some("code.corp.internal")
            ),
            HostingService::GitLab
        );
        assert_eq!(
            detect_host_with("https://ghe.corp.internal/team/lib", Some("ghe.corp.internal"), None),
            HostingService::GitHub
        );
    }

    #[test]
    #[serial]
    fn test_detect_host_reads_environment() {
        env::set_var("GH_HOST", "ghe.example.net");
        let host = detect_host("ssh://git@ghe.example.net/team/lib.git");
        env::remove_var("GH_HOST");
        assert_eq!(host, HostingService::GitHub);
    }

    #[test]
    fn test_extract_hostname() {
        assert_eq!(
            extract_hostname("git@gitlab.com:team/lib.git").as_deref(),
            Some("gitlab.com")
        );
        assert_eq!(
            extract_hostname("https://user@github.com/team/lib").as_deref(),
            Some("github.com")
        );
        assert_eq!(extract_hostname("/srv/git/lib.git"), None);
    }

    #[test]
    fn test_matching_tool_wins() {
        assert_eq!(chosen("git@gitlab.com:t/l.git", &["gh", "glab"]), "glab");
        assert_eq!(chosen("https://github.com/t/l", &["gh", "glab"]), "gh");
    }

    #[test]
    fn test_falls_back_to_other_tool() {
        assert_eq!(chosen("https://gitlab.com/t/l.git", &["gh"]), "gh");
        assert_eq!(chosen("https://github.com/t/l.git", &["glab"]), "glab");
    }

    #[test]
    fn test_unknown_host_priority() {
        assert_eq!(chosen("https://example.org/t/l.git", &["gh", "glab"]), "gh");
        assert_eq!(chosen("https://example.org/t/l", &["gh", "glab"]), "glab");
    }

    #[test]
    fn test_path_probe() {
        assert!(!PathProbe.is_available("submodule-workflow-no-such-tool"));
        #[cfg(unix)]
        assert!(PathProbe.is_available("sh"));
    }

    #[test]
    fn test_no_tools_degrades_to_manual() {
        assert_eq!(chosen("https://gitlab.com/t/l.git", &[]), "manual");
    }

    #[test]
    fn test_manual_suggests_title() {
        let outcome = ManualInstructions.open(Path::new("."), &request()).unwrap();
        assert_eq!(
            outcome,
            ReviewOutcome::ManualActionRequired {
                suggested_title: "feature-x".to_string()
            }
        );

        let titled = ReviewRequest {
            title: Some("Add parser"),
            ..request()
        };
        let outcome = ManualInstructions.open(Path::new("."), &titled).unwrap();
        assert_eq!(
            outcome,
            ReviewOutcome::ManualActionRequired {
                suggested_title: "Add parser".to_string()
            }
        );
    }

    #[test]
    fn test_glab_args() {
        let req = ReviewRequest {
            title: Some("Add parser"),
            draft: true,
            ..request()
        };
        assert_eq!(
            GitLabCli.args(&req),
            vec![
                "mr",
                "create",
                "--source-branch",
                "feature-x",
                "--target-branch",
                "main",
                "--title",
                "Add parser",
                "--draft"
            ]
        );
    }

    #[test]
    fn test_gh_args() {
        assert_eq!(
            GitHubCli.args(&request()),
            vec!["pr", "create", "--head", "feature-x", "--base", "main"]
        );
    }

    #[test]
    #[serial]
    fn test_create_review_request_without_tools() {
        let git = MockGit::new().respond(
            "remote get-url origin",
            GitOutput::ok("https://gitlab.com/team/lib.git\n"),
        );
        let outcome =
            create_review_request(&git, &Installed(&[]), Path::new("lib"), "origin", &request())
                .unwrap();
        assert!(matches!(outcome, ReviewOutcome::ManualActionRequired { .. }));
    }

    #[test]
    fn test_create_review_request_missing_remote() {
        let git = MockGit::new().respond(
            "remote get-url origin",
            GitOutput::failed("error: No such remote 'origin'"),
        );
        let err =
            create_review_request(&git, &Installed(&["gh"]), Path::new("lib"), "origin", &request())
                .unwrap_err();
        assert!(err.to_string().contains("No such remote"));
    }
}
