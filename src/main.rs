use clap::error::ErrorKind;
use clap::{ArgGroup, Parser, Subcommand};
use kit::areas::repository::Repository;
use kit::commands::plumbing::cat_file::CatFileMode;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "kit",
    version = "0.1.0",
    about = "A minimal content-addressed version control system",
    long_about = "kit snapshots a directory tree into a content-addressed object store, \
    keeps a linear history of those snapshots and can restore any of them.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "status",
        about = "Show staged, modified, deleted and untracked files"
    )]
    Status {
        #[arg(long, help = "Print one machine-readable line per path")]
        porcelain: bool,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stores the content of the given files as blobs and records them in the index. \
        Directories are staged recursively; '.' stages the whole working directory."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1.., help = "Files or directories to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Record a snapshot of the working directory",
        long_about = "This command snapshots the working directory as a tree, creates a commit on top of HEAD \
        and moves HEAD to it. Without a message a default one is used."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: Option<String>,
    },
    #[command(name = "log", about = "Show the commit history from HEAD")]
    Log,
    #[command(name = "show", about = "Show a commit and the files of its root tree")]
    Show {
        #[arg(index = 1, help = "Commit id, full or abbreviated")]
        commit: String,
    },
    #[command(name = "diff", about = "Name the staged files changed in the working directory")]
    Diff,
    #[command(
        name = "checkout",
        about = "Restore the working directory to a commit (destructive)",
        long_about = "This command DELETES every file in the working directory except the repository storage \
        and ignored paths, then writes the tree of the given commit and moves HEAD to it. \
        It refuses to run while files differ from HEAD unless --force is given."
    )]
    Checkout {
        #[arg(long, help = "Discard files that differ from HEAD")]
        force: bool,
        #[arg(index = 1, help = "Commit id, full or abbreviated")]
        commit: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the content, size or type of an object",
        group(ArgGroup::new("mode").required(true).args(["print", "size", "object_type"]))
    )]
    CatFile {
        #[arg(short = 'p', help = "Pretty-print the object content")]
        print: bool,
        #[arg(short = 's', help = "Print the object size")]
        size: bool,
        #[arg(short = 't', help = "Print the object type")]
        object_type: bool,
        #[arg(index = 1, help = "Object id, full or abbreviated")]
        object: String,
    },
    #[command(name = "write-tree", about = "Store the working directory as tree objects")]
    WriteTree,
    #[command(name = "ls-tree", about = "List the entries of a tree or of a commit's tree")]
    LsTree {
        #[arg(long, help = "Print entry names only")]
        name_only: bool,
        #[arg(index = 1, help = "Tree or commit id, full or abbreviated")]
        object: String,
    },
}

fn main() -> ExitCode {
    init_tracing();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                return ExitCode::FAILURE;
            }
        },
    };

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("KIT_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;

    let repository = match &command {
        Commands::Init { path } => {
            let path = path.as_deref().unwrap_or(Path::new("."));
            Repository::new(&pwd.join(path), Box::new(std::io::stdout()))?
        }
        _ => Repository::open(&pwd, Box::new(std::io::stdout()))?,
    };

    let result = match command {
        Commands::Init { .. } => repository.init(),
        Commands::Status { porcelain } => repository.status(porcelain).map(drop),
        Commands::Add { paths } => repository.add(&paths),
        Commands::Commit { message } => repository.commit(message.as_deref()).map(drop),
        Commands::Log => repository.log(),
        Commands::Show { commit } => repository.show(&commit),
        Commands::Diff => repository.diff(),
        Commands::Checkout { force, commit } => repository.checkout(&commit, force).map(drop),
        Commands::HashObject { write, file } => repository.hash_object(&file, write).map(drop),
        Commands::CatFile {
            print,
            size,
            object_type,
            object,
        } => {
            let mode = match (print, size, object_type) {
                (_, true, _) => CatFileMode::Size,
                (_, _, true) => CatFileMode::Type,
                _ => CatFileMode::Print,
            };
            repository.cat_file(&object, mode)
        }
        Commands::WriteTree => repository.write_tree().map(drop),
        Commands::LsTree { name_only, object } => repository.ls_tree(&object, name_only),
    };

    repository.writer().flush()?;

    result
}
