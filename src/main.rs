#[macro_use]
extern crate log;

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;
use ticket_harvest::{
    ApiToken, CompareRequest, Config, Error, ErrorKind, GitHubComparator, Presenter, ResponseType,
    TicketPipeline, TicketValidator,
};

#[derive(Parser, Debug)]
#[command(
    name = "ticket-harvest",
    version,
    about = "List the tickets mentioned in the commits that one branch introduces over another"
)]
struct Cli {
    /// GitHub repository owner (organization or user)
    #[arg(long)]
    owner: String,
    /// GitHub repository name
    #[arg(long)]
    repo: String,
    /// The name of the target branch
    #[arg(long = "targetBranch")]
    target_branch: String,
    /// The name of the source branch
    #[arg(long = "sourceBranch", default_value = "develop")]
    source_branch: String,
    /// The type of the response
    #[arg(long = "responseType", value_enum, default_value_t = ResponseType::Jira)]
    response_type: ResponseType,
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Only keep tickets of the configured projects
    #[arg(long)]
    validate: bool,
}

impl Cli {
    /// Flags that were given without a value.
    fn missing_arguments(&self) -> Vec<String> {
        [
            ("--owner", &self.owner),
            ("--repo", &self.repo),
            ("--targetBranch", &self.target_branch),
            ("--sourceBranch", &self.source_branch),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(flag, _)| flag.to_string())
        .collect()
    }

    fn compare_request(&self) -> CompareRequest {
        // the source branch is the base of the comparison
        CompareRequest::new(
            &self.owner,
            &self.repo,
            &self.source_branch,
            &self.target_branch,
        )
    }
}

fn init() {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init();
}

async fn run(cli: Cli) -> Result<String, Error> {
    let missing = cli.missing_arguments();
    if !missing.is_empty() {
        return Err(Error::new(ErrorKind::MissingArgument(missing)));
    }

    let config = Config::load_or_default(cli.config.as_deref())?;
    let mut pipeline = TicketPipeline::from_config(&config)?;
    if cli.validate {
        pipeline = pipeline.with_validator(Some(TicketValidator::new(
            config.validation.prefixes.clone(),
        )));
    }
    let presenter = Presenter::new(&config.tracker);

    let token = ApiToken::discover(&config.github.token_file);
    let comparator = GitHubComparator::new(config.github, token)?;

    info!("fetching commits for repository {} from GitHub API", cli.repo);
    let tickets =
        ticket_harvest::tickets_between_branches(&comparator, &cli.compare_request(), &pipeline)
            .await?;
    info!("total tickets: {}", tickets.len());
    presenter.present(cli.response_type, tickets)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("could not start the async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        // The log may be switched off, so the final error always goes to stderr.
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
