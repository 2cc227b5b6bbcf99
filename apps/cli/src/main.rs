use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use webmaker_compose::FragmentKind;
use webmaker_project::{ProjectFile, ProjectStore};

#[derive(Parser)]
#[command(
    name = "webmaker-cli",
    about = "Utility commands for WebMaker projects",
    author,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 建立含預設片段的新專案檔。 / Create a project file with the starter fragments.
    New(NewArgs),
    /// 將專案組合成單一 HTML 文件。 / Compose a project into a single HTML document.
    Compose(ComposeArgs),
    /// 原樣印出專案中的單一片段。 / Print one fragment of a project verbatim.
    Show(ShowArgs),
}

#[derive(Args)]
struct NewArgs {
    /// 專案檔的寫入位置。 / Destination of the project file.
    path: PathBuf,

    /// 允許覆寫既有檔案。 / Allow overwriting an existing file.
    #[arg(long)]
    force: bool,
}

#[derive(Args)]
struct ComposeArgs {
    /// 要組合的專案檔。 / Project file to compose.
    path: PathBuf,

    /// 輸出的 HTML 檔；省略時印到標準輸出。 / Output HTML file; prints to stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ShowArgs {
    /// 要讀取的專案檔。 / Project file to read.
    path: PathBuf,

    /// 要印出的片段類型。 / Fragment kind to print.
    #[arg(long, value_enum)]
    kind: KindChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    Html,
    Css,
    #[value(alias = "javascript")]
    Js,
}

impl From<KindChoice> for FragmentKind {
    fn from(choice: KindChoice) -> Self {
        match choice {
            KindChoice::Html => FragmentKind::Html,
            KindChoice::Css => FragmentKind::Css,
            KindChoice::Js => FragmentKind::Js,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::New(args) => cmd_new(args),
        Commands::Compose(args) => cmd_compose(args),
        Commands::Show(args) => cmd_show(args),
    }
}

fn cmd_new(args: NewArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!(
            "refusing to overwrite {}; pass --force to replace it",
            args.path.display()
        );
    }
    let store = ProjectStore::new(&args.path);
    store
        .save(&ProjectFile::starter())
        .with_context(|| format!("failed to write project {}", args.path.display()))?;
    println!("created {}", args.path.display());
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> Result<()> {
    let store = ProjectStore::new(&args.path);
    let project = store
        .load()
        .with_context(|| format!("failed to load project {}", args.path.display()))?;
    let document = project.compose();

    match args.output {
        Some(output) => {
            fs::write(&output, document)
                .with_context(|| format!("failed to write document {}", output.display()))?;
            println!("wrote {}", output.display());
        }
        None => print!("{document}"),
    }
    Ok(())
}

fn cmd_show(args: ShowArgs) -> Result<()> {
    let store = ProjectStore::new(&args.path);
    let project = store
        .load()
        .with_context(|| format!("failed to load project {}", args.path.display()))?;
    let text = match FragmentKind::from(args.kind) {
        FragmentKind::Html => &project.html,
        FragmentKind::Css => &project.css,
        FragmentKind::Js => &project.js,
    };
    println!("{text}");
    Ok(())
}
