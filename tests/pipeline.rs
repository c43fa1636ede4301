use log::LevelFilter;
use std::io;
use ticket_harvest::setup::config::ExtractionSettings;
use ticket_harvest::{
    BranchComparator, Commit, CompareRequest, Config, Error, ErrorKind, Presenter, ResponseType,
    TicketPipeline,
};

fn init() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(LevelFilter::Debug)
        .try_init();
}

/// Serves a fixed list of commits, or fails like an unreachable remote.
struct StubComparator(Option<Vec<Commit>>);

impl StubComparator {
    fn with_messages(messages: &[&str]) -> Self {
        let commits = messages
            .iter()
            .enumerate()
            .map(|(i, m)| Commit::new(format!("{i:07x}"), m.to_string()))
            .collect();
        Self(Some(commits))
    }

    fn failing() -> Self {
        Self(None)
    }
}

#[async_trait::async_trait]
impl BranchComparator for StubComparator {
    async fn compare(&self, request: &CompareRequest) -> ticket_harvest::Result<Vec<Commit>> {
        match &self.0 {
            Some(commits) => Ok(commits.clone()),
            None => Err(Error::remote_fetch(
                request.route(),
                io::Error::new(io::ErrorKind::NotFound, "404 Not Found"),
            )),
        }
    }
}

fn request() -> CompareRequest {
    CompareRequest::new("octo", "app", "develop", "release")
}

fn run(comparator: &StubComparator, config: &Config) -> ticket_harvest::Result<Vec<String>> {
    let pipeline = TicketPipeline::from_config(config)?;
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let tickets = runtime.block_on(ticket_harvest::tickets_between_branches(
        comparator,
        &request(),
        &pipeline,
    ))?;
    Ok(Presenter::sort(tickets)
        .iter()
        .map(|t| t.to_string())
        .collect())
}

#[test]
fn cherry_picked_messages_in_whole_message_mode() {
    init();
    let comparator =
        StubComparator::with_messages(&["Fix login bug", "Fix login bug", "Add AFE-123 handler"]);
    let config = Config {
        extraction: ExtractionSettings::WholeMessage,
        ..Config::default()
    };
    let tickets = run(&comparator, &config).unwrap();
    assert_eq!(tickets, vec!["Add AFE-123 handler", "Fix login bug"]);
}

#[test]
fn pattern_mode_collects_sorted_keys() {
    init();
    let comparator = StubComparator::with_messages(&[
        "TABT-4 bump version",
        "AFE-12 new onboarding\n\nalso touches RSB-3",
        "AFE-12 new onboarding\n\nalso touches RSB-3",
        "OPS-9 infrastructure",
        "Merge branch 'develop'",
    ]);
    let tickets = run(&comparator, &Config::default()).unwrap();
    assert_eq!(tickets, vec!["AFE-12", "OPS-9", "RSB-3", "TABT-4"]);
}

#[test]
fn validation_drops_unknown_projects() {
    init();
    let comparator =
        StubComparator::with_messages(&["TABT-4 bump version", "OPS-9 infrastructure"]);
    let mut config = Config::default();
    config.validation.enabled = true;
    let tickets = run(&comparator, &config).unwrap();
    assert_eq!(tickets, vec!["TABT-4"]);
}

#[test]
fn no_commits_no_tickets() {
    init();
    let comparator = StubComparator::with_messages(&[]);
    assert!(run(&comparator, &Config::default()).unwrap().is_empty());
}

#[test]
fn fetch_errors_are_propagated() {
    init();
    let error = run(&StubComparator::failing(), &Config::default()).unwrap_err();
    match error.kind() {
        ErrorKind::RemoteFetch { route, .. } => {
            assert_eq!(route, "/repos/octo/app/compare/develop...release")
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(error.exit_code(), 1);
}

#[test]
fn present_full_run() {
    init();
    let comparator = StubComparator::with_messages(&["SPB-2 a", "AFE-1 b"]);
    let config = Config::default();
    let pipeline = TicketPipeline::from_config(&config).unwrap();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let tickets = runtime
        .block_on(ticket_harvest::tickets_between_branches(
            &comparator,
            &request(),
            &pipeline,
        ))
        .unwrap();
    let output = Presenter::new(&config.tracker)
        .present(ResponseType::List, tickets)
        .unwrap();
    assert_eq!(output, "Tickets: AFE-1, SPB-2");
}
