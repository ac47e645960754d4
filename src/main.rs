use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use minivc::artifacts::core::Output;
use minivc::artifacts::objects::commit::Commit;
use minivc::artifacts::status::status_info::WorkspaceChange;
use minivc::commands::porcelain::checkout::CheckoutOutcome;
use minivc::{CheckoutTarget, LogScope, Repository, VcError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "minivc",
    version,
    about = "A small local version-control engine",
    long_about = "minivc keeps content-addressed snapshots of the files in a directory, \
    with branches, a staging area, checkout, reset and three-way merge.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        short = 'C',
        global = true,
        default_value = ".",
        help = "Run as if minivc was started in this directory"
    )]
    directory: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create a repository",
        long_about = "This command creates a repository with an empty root commit on the default branch."
    )]
    Init,
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stages files. `add .` stages every file allowed by the extension policy, \
        `add -f <file>` stages a single file."
    )]
    Add {
        #[arg(short = 'f', long = "file", help = "A single file to stage")]
        file: Option<PathBuf>,
        #[arg(index = 1, help = "Paths to stage; `.` stages everything")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "rm",
        about = "Schedule a file for removal",
        long_about = "This command unstages a file, schedules it for removal and deletes it from the working directory."
    )]
    Rm {
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "commit",
        about = "Record the staged changes",
        long_about = "This command creates a new commit on the current branch from the staging area."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged and unstaged changes")]
    Status,
    #[command(
        name = "log",
        about = "Show commit history",
        long_about = "This command shows the history of the current branch, or every commit with --global."
    )]
    Log {
        #[arg(long, help = "Follow the repository-wide chain instead of the branch")]
        global: bool,
    },
    #[command(
        name = "checkout",
        about = "Switch branches or restore files",
        long_about = "checkout -b <branch>        create a branch at HEAD and switch to it\n\
        checkout <branch>           switch to an existing branch\n\
        checkout --<file>           restore a file from HEAD\n\
        checkout -c <hash> --<file> restore a file from a commit"
    )]
    Checkout {
        #[arg(
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            required = true
        )]
        args: Vec<String>,
    },
    #[command(
        name = "branch",
        about = "List or delete branches",
        long_about = "Without arguments this command lists branches; with -d it deletes one."
    )]
    Branch {
        #[arg(short = 'd', long = "delete", help = "The branch to delete")]
        delete: Option<String>,
    },
    #[command(
        name = "reset",
        about = "Rewind the repository to a commit",
        long_about = "This command moves HEAD back to a commit on the global history, \
        dropping branches created after it and restoring its files."
    )]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into the current one",
        long_about = "This command stages the three-way merge of the given branch; commit to record it."
    )]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MINIVC_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => Ok(()),
        Err(error) => match error.downcast_ref::<VcError>() {
            Some(error) => {
                println!("error: {error}");
                if error.is_not_found() {
                    println!("hint: `minivc status` and `minivc log --global` show what exists");
                }
                if !error.is_precondition() {
                    tracing::warn!("the operation failed on I/O; check `minivc status` before retrying");
                }
                std::process::exit(1);
            }
            None => Err(error),
        },
    }
}

fn run(cli: &Cli) -> Result<()> {
    let directory = cli.directory.as_path();

    match &cli.command {
        Commands::Init => {
            let repository = Repository::init(directory)?;
            println!(
                "Initialized empty minivc repository in {}",
                repository.repository_dir().display()
            );
        }
        Commands::Add { file, paths } => {
            let mut repository = Repository::open(directory)?;
            let targets = file.iter().chain(paths.iter()).collect::<Vec<_>>();
            if targets.is_empty() {
                anyhow::bail!("nothing specified, nothing added; try `minivc add .`");
            }

            for target in targets {
                let report = if target == Path::new(".") {
                    repository.add_all()?
                } else {
                    repository.add(target)?
                };
                for file_name in report.skipped {
                    println!("skipping {file_name}: extension not tracked");
                }
            }
            repository.save()?;
        }
        Commands::Rm { file } => {
            let mut repository = Repository::open(directory)?;
            repository.remove(file)?;
            repository.save()?;
        }
        Commands::Commit { message } => {
            let mut repository = Repository::open(directory)?;
            let commit = repository.commit(message)?;
            repository.save()?;

            println!(
                "[{} {}] {}",
                commit.branch(),
                commit.hash().to_short_oid(),
                commit.short_message()
            );
        }
        Commands::Status => {
            let repository = Repository::open(directory)?;
            print_status(&repository)?;
        }
        Commands::Log { global } => {
            let repository = Repository::open(directory)?;
            let scope = if *global {
                LogScope::Global
            } else {
                LogScope::Branch
            };

            let mut output = Output::detect();
            for commit in repository.log(scope)? {
                write_commit(&mut output, &commit?)?;
            }
            output.finish()?;
        }
        Commands::Checkout { args } => {
            let mut repository = Repository::open(directory)?;
            let target = CheckoutTarget::try_parse(args)?;

            match repository.checkout(target)? {
                CheckoutOutcome::BranchCreated(branch) => {
                    println!("Switched to a new branch '{branch}'")
                }
                CheckoutOutcome::Switched(branch) => println!("Switched to branch '{branch}'"),
                CheckoutOutcome::FileRestored { file, commit } => {
                    println!("Restored {file} from {}", commit.to_short_oid())
                }
            }
            repository.save()?;
        }
        Commands::Branch { delete } => {
            let mut repository = Repository::open(directory)?;

            match delete {
                Some(name) => {
                    let head = repository.delete_branch(name)?;
                    repository.save()?;
                    println!("Deleted branch {name} (was {}).", head.to_short_oid());
                }
                None => {
                    for entry in repository.list_branches() {
                        if entry.is_current {
                            println!("* {}", entry.name.to_string().green());
                        } else {
                            println!("  {}", entry.name);
                        }
                    }
                }
            }
        }
        Commands::Reset { commit } => {
            let mut repository = Repository::open(directory)?;
            let report = repository.reset(commit)?;
            repository.save()?;

            for branch in &report.removed_branches {
                println!("Removed branch {branch}");
            }
            println!(
                "HEAD is now at {} on {}",
                report.landed.to_short_oid(),
                report.branch
            );
        }
        Commands::Merge { branch } => {
            let mut repository = Repository::open(directory)?;
            let report = repository.merge(branch)?;
            repository.save()?;

            println!(
                "Merging {branch} into {} from common ancestor {}",
                repository.current_branch(),
                report.ancestor.to_short_oid()
            );
            for file_name in &report.conflicts {
                println!("{} in {file_name}", "CONFLICT".red());
            }
            if report.conflicts.is_empty() {
                println!("Staged {} file(s); commit to finish the merge", report.staged.len());
            } else {
                println!("Encountered a merge conflict; fix the files and commit the result");
            }
        }
    }

    Ok(())
}

fn print_status(repository: &Repository) -> Result<()> {
    let status = repository.status()?;
    let mut stdout = std::io::stdout().lock();

    writeln!(stdout, "=== Branches ===")?;
    for branch in &status.branches {
        if *branch == status.current_branch {
            writeln!(stdout, "{}", format!("*{branch}").green())?;
        } else {
            writeln!(stdout, "{branch}")?;
        }
    }

    writeln!(stdout, "\n=== Staged Files ===")?;
    for file_name in &status.staged {
        writeln!(stdout, "{}", file_name.green())?;
    }

    writeln!(stdout, "\n=== Removed Files ===")?;
    for file_name in &status.removed {
        writeln!(stdout, "{}", file_name.green())?;
    }

    writeln!(stdout, "\n=== Modifications Not Staged For Commit ===")?;
    for (file_name, change) in &status.unstaged {
        let label = match change {
            WorkspaceChange::Modified => "modified",
            WorkspaceChange::Deleted => "deleted",
        };
        writeln!(stdout, "{}", format!("{file_name} ({label})").red())?;
    }

    writeln!(stdout, "\n=== Untracked Files ===")?;
    for file_name in &status.untracked {
        writeln!(stdout, "{}", file_name.red())?;
    }

    Ok(())
}

fn write_commit(output: &mut impl Write, commit: &Commit) -> Result<()> {
    writeln!(output, "{}", format!("commit {}", commit.hash()).yellow())?;
    if let (Some(prev), Some(merged)) = (commit.prev_commit(), commit.merge_parent()) {
        writeln!(
            output,
            "Merge: {} {}",
            prev.to_short_oid(),
            merged.to_short_oid()
        )?;
    }
    writeln!(output, "Branch: {}", commit.branch())?;
    writeln!(output, "Author: {}", commit.author().display_name())?;
    writeln!(output, "Date:   {}", commit.author().readable_timestamp())?;
    writeln!(output)?;
    for message_line in commit.message().lines() {
        writeln!(output, "    {message_line}")?;
    }
    writeln!(output)?;

    Ok(())
}
