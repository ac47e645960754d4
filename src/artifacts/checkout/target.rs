use crate::errors::{VcError, VcResult};

/// The four mutually exclusive checkout modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutTarget {
    /// `-b <branch>`: create a branch at HEAD and switch to it
    NewBranch(String),
    /// `--<file>`: restore one file from HEAD
    FileFromHead(String),
    /// `-c <commit> --<file>`: restore one file from a historical commit
    FileFromCommit { commit: String, file: String },
    /// `<branch>`: switch to an existing branch
    Branch(String),
}

impl CheckoutTarget {
    /// Parse raw checkout arguments
    ///
    /// A file may be given glued to its dashes (`--a.txt`) or as a separate
    /// argument after `--`.
    pub fn try_parse<S: AsRef<str>>(args: &[S]) -> VcResult<Self> {
        let args = args.iter().map(|arg| arg.as_ref()).collect::<Vec<&str>>();

        match args.as_slice() {
            ["-b", branch] => Ok(Self::NewBranch(branch.to_string())),
            ["-c", commit, rest @ ..] => Ok(Self::FileFromCommit {
                commit: commit.to_string(),
                file: Self::parse_file(rest)?,
            }),
            [first, ..] if first.starts_with("--") => Ok(Self::FileFromHead(Self::parse_file(&args)?)),
            [branch] if !branch.starts_with('-') => Ok(Self::Branch(branch.to_string())),
            _ => Err(VcError::InvalidCheckout(args.join(" "))),
        }
    }

    fn parse_file(args: &[&str]) -> VcResult<String> {
        match args {
            ["--", file] if !file.is_empty() => Ok(file.to_string()),
            [glued] if glued.len() > 2 && glued.starts_with("--") => {
                Ok(glued.trim_start_matches("--").to_string())
            }
            _ => Err(VcError::InvalidCheckout(format!(
                "expected --<file>, got '{}'",
                args.join(" ")
            ))),
        }
    }
}
