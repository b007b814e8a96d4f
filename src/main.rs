use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use study_centre::config::Config;
use study_centre::data::{read_catalog, validate_catalog, Severity};
use study_centre::export::export_site;
use study_centre::logging::{self, LogTarget};
use study_centre::routes::Router;
use study_centre::{load_catalog, AppOptions, StudyCentre};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file [default: ./study-centre.toml when present]
    #[arg(short, long, global = true, env = "STUDY_CENTRE_CONFIG")]
    config: Option<PathBuf>,

    /// Content file or directory, overriding the configuration
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse courses and take quizzes in the terminal
    Study {
        /// Open this page instead of the catalog, e.g. /hnc/module-8/section-1 or /exams/am2
        route: Option<String>,
    },
    /// Sit a timed mock exam
    Exam {
        /// Mock exam id
        #[arg(short, long)]
        exam: String,
        /// Number of questions to draw
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Seed for a repeatable draw
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write the courses out as static HTML pages
    Export {
        #[arg(short, long, default_value = "site")]
        out: PathBuf,
    },
    /// Validate content and report every problem found
    Check,
    /// List every course, module, section and mock exam route
    Routes,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(content) = args.content {
        config.content = content;
    }

    let command = args.command.unwrap_or(Command::Study { route: None });
    let target = match command {
        Command::Study { .. } | Command::Exam { .. } => LogTarget::File(config.logging.file.clone()),
        _ => LogTarget::Stderr,
    };
    logging::init(&config.logging.level, target)?;

    match command {
        Command::Study { route } => {
            let mut centre = StudyCentre::from_path(&config.content, app_options(&config, None, None))?;
            if let Some(route) = route {
                centre.open(&route)?;
            }
            centre.run()?;
        }
        Command::Exam { exam, count, seed } => {
            let mut centre = StudyCentre::from_path(&config.content, app_options(&config, count, seed))?;
            centre.start_exam(&exam)?;
            centre.run()?;
        }
        Command::Export { out } => {
            let catalog = load_catalog(&config.content)?;
            let router = Router::from_catalog(&catalog)?;
            let summary = export_site(&catalog, &router, &config.site, &out)
                .with_context(|| format!("exporting to {}", out.display()))?;
            println!("Wrote {} pages to {}", summary.pages, summary.root.display());
        }
        Command::Check => {
            let catalog = read_catalog(&config.content)?;
            let issues = validate_catalog(&catalog);
            for issue in &issues {
                println!("{issue}");
            }
            let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
            println!(
                "{} course(s), {} mock exam(s): {} error(s), {} warning(s)",
                catalog.courses.len(),
                catalog.exams.len(),
                errors,
                issues.len() - errors
            );
            if errors > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Routes => {
            let catalog = load_catalog(&config.content)?;
            let router = Router::from_catalog(&catalog)?;
            for (route, _) in router.pages() {
                println!("{route}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn app_options(config: &Config, count: Option<usize>, seed: Option<u64>) -> AppOptions {
    AppOptions {
        site_name: config.site.name.clone(),
        exam_count: count.or(config.exam.default_count),
        seed: seed.or(config.exam.seed),
    }
}
