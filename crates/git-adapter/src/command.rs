//! Typed git commands and their argument vectors
//!
//! Each variant maps to exactly one `git` subcommand. Flag spelling and
//! argument order are what git expects and are not reinterpreted anywhere.

/// Number of commits `git log` shows when no count is given
pub const DEFAULT_LOG_COUNT: u32 = 10;

/// Pretty format passed to `git log`
pub const LOG_FORMAT: &str = "--pretty=format:%H %an %ad %s";

/// A single git operation with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCommand {
    /// `git status`
    Status,
    /// `git diff` (working tree against the index)
    DiffUnstaged,
    /// `git diff --cached`
    DiffStaged,
    /// `git diff <target>`
    Diff { target: String },
    /// `git commit -m <message>`
    Commit { message: String },
    /// `git add <files>...`
    Add { files: Vec<String> },
    /// `git reset`
    Reset,
    /// `git log` limited to `max_count` commits
    Log { max_count: u32 },
    /// `git branch <branch_name> [<start_point>]`
    CreateBranch {
        branch_name: String,
        start_point: Option<String>,
    },
    /// `git checkout <branch_name>`
    Checkout { branch_name: String },
    /// `git show <revision>`
    Show { revision: String },
    /// `git init`
    Init,
}

impl GitCommand {
    /// Build a `Log` command, falling back to [`DEFAULT_LOG_COUNT`].
    pub fn log(max_count: Option<u32>) -> Self {
        GitCommand::Log {
            max_count: max_count.unwrap_or(DEFAULT_LOG_COUNT),
        }
    }

    /// Build a `CreateBranch` command. An empty start point counts as none.
    pub fn create_branch(branch_name: impl Into<String>, start_point: Option<String>) -> Self {
        GitCommand::CreateBranch {
            branch_name: branch_name.into(),
            start_point: start_point.filter(|s| !s.is_empty()),
        }
    }

    /// The git subcommand this operation runs
    pub fn subcommand(&self) -> &'static str {
        match self {
            GitCommand::Status => "status",
            GitCommand::DiffUnstaged | GitCommand::DiffStaged | GitCommand::Diff { .. } => "diff",
            GitCommand::Commit { .. } => "commit",
            GitCommand::Add { .. } => "add",
            GitCommand::Reset => "reset",
            GitCommand::Log { .. } => "log",
            GitCommand::CreateBranch { .. } => "branch",
            GitCommand::Checkout { .. } => "checkout",
            GitCommand::Show { .. } => "show",
            GitCommand::Init => "init",
        }
    }

    /// The argument vector handed to the git binary.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.subcommand().to_string()];
        match self {
            GitCommand::Status
            | GitCommand::DiffUnstaged
            | GitCommand::Reset
            | GitCommand::Init => {}
            GitCommand::DiffStaged => args.push("--cached".to_string()),
            GitCommand::Diff { target } => args.push(target.clone()),
            GitCommand::Commit { message } => {
                args.push("-m".to_string());
                args.push(message.clone());
            }
            GitCommand::Add { files } => args.extend(files.iter().cloned()),
            GitCommand::Log { max_count } => {
                args.push(format!("-n {max_count}"));
                args.push(LOG_FORMAT.to_string());
            }
            GitCommand::CreateBranch {
                branch_name,
                start_point,
            } => {
                args.push(branch_name.clone());
                if let Some(start) = start_point {
                    args.push(start.clone());
                }
            }
            GitCommand::Checkout { branch_name } => args.push(branch_name.clone()),
            GitCommand::Show { revision } => args.push(revision.clone()),
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(GitCommand::Status, &["status"])]
    #[case(GitCommand::DiffUnstaged, &["diff"])]
    #[case(GitCommand::DiffStaged, &["diff", "--cached"])]
    #[case(GitCommand::Diff { target: "main".into() }, &["diff", "main"])]
    #[case(GitCommand::Commit { message: "fix: a thing".into() }, &["commit", "-m", "fix: a thing"])]
    #[case(GitCommand::Reset, &["reset"])]
    #[case(GitCommand::Checkout { branch_name: "dev".into() }, &["checkout", "dev"])]
    #[case(GitCommand::Show { revision: "HEAD~1".into() }, &["show", "HEAD~1"])]
    #[case(GitCommand::Init, &["init"])]
    fn args_match_git_vocabulary(#[case] command: GitCommand, #[case] expected: &[&str]) {
        assert_eq!(command.args(), expected);
    }

    #[test]
    fn log_uses_single_count_token_and_format() {
        assert_eq!(
            GitCommand::Log { max_count: 3 }.args(),
            vec!["log", "-n 3", "--pretty=format:%H %an %ad %s"]
        );
    }

    #[test]
    fn log_without_count_defaults_to_ten() {
        assert_eq!(GitCommand::log(None), GitCommand::Log { max_count: 10 });
        assert_eq!(GitCommand::log(None).args(), GitCommand::log(Some(10)).args());
    }

    #[test]
    fn add_flattens_files() {
        let command = GitCommand::Add {
            files: vec!["a.txt".into(), "dir/b.txt".into()],
        };
        assert_eq!(command.args(), vec!["add", "a.txt", "dir/b.txt"]);
    }

    #[test]
    fn add_with_no_files_has_no_trailing_tokens() {
        let command = GitCommand::Add { files: Vec::new() };
        assert_eq!(command.args(), vec!["add"]);
    }

    #[test]
    fn create_branch_with_and_without_start_point() {
        assert_eq!(
            GitCommand::create_branch("feature", None).args(),
            vec!["branch", "feature"]
        );
        assert_eq!(
            GitCommand::create_branch("feature", Some("main".into())).args(),
            vec!["branch", "feature", "main"]
        );
    }

    #[test]
    fn empty_start_point_is_dropped() {
        assert_eq!(
            GitCommand::create_branch("feature", Some(String::new())),
            GitCommand::CreateBranch {
                branch_name: "feature".into(),
                start_point: None,
            }
        );
    }

    #[test]
    fn arguments_are_not_split_or_quoted() {
        let command = GitCommand::Commit {
            message: "two words; $(rm -rf /)".into(),
        };
        assert_eq!(command.args()[2], "two words; $(rm -rf /)");
    }
}
