use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use coursebook::consts::{COURSES_KEY, default_db_path};
use coursebook::course::{CollectionState, Course, CourseCatalog};
use coursebook::loader::{CourseLoader, Page, PageParams};
use coursebook::logging;
use coursebook::storage::{SqliteStorage, Storage};

#[derive(Parser)]
#[command(
    name = "coursebook",
    version,
    about = "Load course pages from local storage."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// SQLite database path (use :memory: for ephemeral)
    #[arg(short, long)]
    db: Option<String>,

    /// Storage key holding the course collection
    #[arg(short, long, default_value = COURSES_KEY)]
    key: String,
}

#[derive(Subcommand)]
enum Command {
    /// Run a page loader and print its data as JSON
    Show {
        #[arg(value_enum)]
        page: Page,
        /// Course id
        id: String,
        /// Assignment id (assignment page only)
        assignment_id: Option<String>,
    },
    /// List stored courses
    List,
    /// Report whether the stored collection is readable
    Check,
    /// Replace the stored collection with a JSON file
    Import { file: PathBuf },
    /// Print the page table
    Pages,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    if let Command::Pages = cli.command {
        print_pages();
        return Ok(());
    }

    let db = match cli.db {
        Some(db) => db,
        None => {
            let path = default_db_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            path.to_string_lossy().into_owned()
        }
    };
    let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::open(&db)?);
    let catalog = CourseCatalog::new(storage, cli.key);

    match cli.command {
        Command::Show {
            page,
            id,
            assignment_id,
        } => {
            let params = PageParams { id, assignment_id };
            let data = CourseLoader::new(catalog).load(page, &params).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Command::List => {
            for course in catalog.courses().await? {
                println!("{}\t{}", course.id, course.name);
            }
        }
        Command::Check => match catalog.state().await? {
            CollectionState::Missing => println!("no courses stored under '{}'", catalog.key()),
            CollectionState::Loaded(courses) => {
                println!("{} course(s) stored under '{}'", courses.len(), catalog.key())
            }
            CollectionState::Corrupt(reason) => {
                bail!("collection under '{}' is corrupt: {reason}", catalog.key())
            }
        },
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let courses: Vec<Course> = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a JSON list of courses", file.display()))?;
            catalog.replace(&courses).await?;
            println!("imported {} course(s)", courses.len());
        }
        Command::Pages => print_pages(),
    }

    Ok(())
}

fn print_pages() {
    for page in Page::ALL {
        let options = page.options();
        let prerender = match options.prerender {
            Some(true) => "on",
            Some(false) => "off",
            None => "default",
        };
        println!(
            "{:<12} {:<44} {:?} prerender={prerender}",
            page.to_string(),
            page.route(),
            options.source,
        );
    }
}
