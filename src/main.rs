mod config;

/// Version injected at compile time via SFCTL_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("SFCTL_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use serde::Serialize;
use sfclient::types::{
    ApplicationListQuery, ApplicationTypeListQuery, ChaosEventsFilter, ChaosEventsQuery,
    ChaosParameters, ContinuationToken, MaxResults, PagedData, PagingOptions, RepairTaskQuery,
    RepairTaskStateFilter, ServerTimeout,
};
use sfclient::{
    describe_error, static_security, ClaimsSecuritySettings, RawRequest, SecuritySettings,
    ServiceFabricClientBuilder, SharedClient, X509SecuritySettings,
};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command line client for Service Fabric clusters
#[derive(Parser, Debug)]
#[command(name = "sfctl", version, about, long_about = None)]
struct Args {
    /// Cluster gateway endpoint (repeatable)
    #[arg(short, long = "endpoint", global = true)]
    endpoints: Vec<String>,

    /// Bearer token for claims security
    #[arg(long, global = true, conflicts_with = "cert")]
    token: Option<String>,

    /// Client certificate (PEM) for X509 security
    #[arg(long, global = true, requires = "key")]
    cert: Option<PathBuf>,

    /// Private key (PEM) matching --cert
    #[arg(long, global = true, requires = "cert")]
    key: Option<PathBuf>,

    /// Server CA bundle (PEM)
    #[arg(long, global = true)]
    ca: Option<PathBuf>,

    /// Skip server certificate validation
    #[arg(long, global = true)]
    insecure: bool,

    /// Server-side timeout in seconds
    #[arg(long, global = true, default_value_t = ServerTimeout::DEFAULT_SECS)]
    timeout: u64,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Remember the given endpoints for later runs
    #[arg(long, global = true)]
    save: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List applications
    Apps {
        /// Only applications of this type
        #[arg(long)]
        type_name: Option<String>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// List application types
    AppTypes {
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Inspect or control chaos
    Chaos {
        #[command(subcommand)]
        action: ChaosAction,
    },
    /// Read chaos history
    ChaosEvents {
        /// Continue a previous read
        #[arg(long, conflicts_with_all = ["start", "end"])]
        continuation: Option<String>,
        /// Range start (RFC 3339)
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        /// Range end (RFC 3339), defaults to now
        #[arg(long)]
        end: Option<DateTime<Utc>>,
        /// Maximum events to return, 0 for all
        #[arg(long, default_value_t = 0)]
        max: u64,
    },
    /// List repair tasks
    Repairs {
        /// Task id prefix
        #[arg(long)]
        task_id: Option<String>,
        /// Executor name
        #[arg(long)]
        executor: Option<String>,
        /// Only tasks that have not completed
        #[arg(long)]
        active: bool,
    },
    /// List compose deployments
    Compose {
        #[command(flatten)]
        paging: PageArgs,
    },
    /// List mesh applications
    MeshApps,
    /// Send a request as-is and print the response body
    Raw {
        /// Path relative to the endpoint, e.g. "/$/GetClusterHealth"
        path: String,
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
        /// JSON body
        #[arg(long)]
        body: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ChaosAction {
    /// Show chaos status
    Status,
    /// Start a chaos run
    Start {
        /// Total run time in seconds
        #[arg(long)]
        time_to_run: Option<u64>,
        #[arg(long)]
        max_concurrent_faults: Option<u64>,
    },
    /// Stop chaos
    Stop,
    /// Show the chaos schedule
    Schedule,
}

#[derive(clap::Args, Debug, Clone)]
struct PageArgs {
    /// Maximum results per page, 0 lets the cluster decide
    #[arg(long, default_value_t = 0)]
    max: u64,
    /// Start from this continuation token
    #[arg(long)]
    continuation: Option<String>,
    /// Follow continuation tokens until the last page
    #[arg(long)]
    all: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("sfctl {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("sfctl").join("sfctl.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".sfctl").join("sfctl.log");
    }
    PathBuf::from("sfctl.log")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = match setup_logging(args.log_level) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: {err:#}");
            None
        }
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted");
            on_interrupt.cancel();
        }
    });

    if let Err(err) = run(args, &cancel).await {
        match err.downcast_ref::<sfclient::Error>() {
            Some(sf) => eprintln!("Error: {} ({err:#})", describe_error(sf)),
            None => eprintln!("Error: {err:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(args: Args, cancel: &CancellationToken) -> Result<()> {
    let mut config = Config::load();
    let endpoints = config.effective_endpoints(&args.endpoints);
    if args.save && !args.endpoints.is_empty() {
        config
            .set_endpoints(&args.endpoints)
            .context("Failed to save configuration")?;
    }

    let output = args.output.unwrap_or_else(|| match config.output.as_deref() {
        Some("yaml") => OutputFormat::Yaml,
        _ => OutputFormat::Json,
    });
    let ca = args.ca.clone().or_else(|| config.ca_path.clone());
    let timeout = ServerTimeout::from_secs(args.timeout);

    tracing::info!("Using endpoints: {:?}", endpoints);
    let client = connect(&args, &endpoints, ca, cancel).await?;

    match args.command {
        Command::Apps { type_name, paging } => {
            let apps = collect_pages(page_options(&paging, timeout), paging.all, |paging| {
                let query = ApplicationListQuery {
                    application_type_name: type_name.clone(),
                    paging,
                    ..Default::default()
                };
                let client = &client;
                async move {
                    client
                        .applications()
                        .get_application_info_list(&query, cancel)
                        .await
                }
            })
            .await
            .context("Failed to list applications")?;
            print(output, &apps)
        }
        Command::AppTypes { paging } => {
            let types = collect_pages(page_options(&paging, timeout), paging.all, |paging| {
                let query = ApplicationTypeListQuery {
                    paging,
                    ..Default::default()
                };
                let client = &client;
                async move {
                    client
                        .application_types()
                        .get_application_type_info_list(&query, cancel)
                        .await
                }
            })
            .await
            .context("Failed to list application types")?;
            print(output, &types)
        }
        Command::Chaos { action } => run_chaos(&client, action, timeout, output, cancel).await,
        Command::ChaosEvents {
            continuation,
            start,
            end,
            max,
        } => {
            let filter = match continuation {
                Some(token) => ChaosEventsFilter::Continue(ContinuationToken::new(token)),
                None => ChaosEventsFilter::TimeRange { start, end },
            };
            let query = ChaosEventsQuery {
                filter,
                max_results: MaxResults::new(max),
                server_timeout: timeout,
            };
            let segment = client
                .chaos()
                .get_chaos_events(&query, cancel)
                .await
                .context("Failed to read chaos events")?;
            print(output, &segment)
        }
        Command::Repairs {
            task_id,
            executor,
            active,
        } => {
            let query = RepairTaskQuery {
                task_id_filter: task_id,
                state_filter: if active {
                    RepairTaskStateFilter::ACTIVE
                } else {
                    RepairTaskStateFilter::DEFAULT
                },
                executor_filter: executor,
            };
            let tasks = client
                .repair_management()
                .get_repair_task_list(&query, cancel)
                .await
                .context("Failed to list repair tasks")?;
            print(output, &tasks)
        }
        Command::Compose { paging } => {
            let deployments = collect_pages(page_options(&paging, timeout), paging.all, |paging| {
                let client = &client;
                async move {
                    client
                        .compose_deployments()
                        .get_compose_deployment_status_list(&paging, cancel)
                        .await
                }
            })
            .await
            .context("Failed to list compose deployments")?;
            print(output, &deployments)
        }
        Command::MeshApps => {
            let apps = client
                .mesh_applications()
                .list(cancel)
                .await
                .context("Failed to list mesh applications")?;
            print(output, &apps.items)
        }
        Command::Raw {
            path,
            method,
            query,
            body,
        } => {
            let method: reqwest::Method = method
                .to_ascii_uppercase()
                .parse()
                .with_context(|| format!("Invalid method '{}'", method))?;
            let mut request = RawRequest::new(method);
            for (key, value) in query {
                request = request.with_query(key, value);
            }
            if let Some(body) = body {
                let json: serde_json::Value =
                    serde_json::from_str(&body).context("Body is not valid JSON")?;
                request = request.with_json(&json)?;
            }

            let response = client.send(&path, &|| request.clone(), cancel).await?;
            if !response.is_success() {
                eprintln!("HTTP {}", response.status);
            }
            println!("{}", response.text());
            Ok(())
        }
    }
}

async fn run_chaos(
    client: &SharedClient,
    action: ChaosAction,
    timeout: ServerTimeout,
    output: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let chaos = client.chaos();
    match action {
        ChaosAction::Status => {
            let status = chaos
                .get_chaos(timeout, cancel)
                .await
                .context("Failed to get chaos status")?;
            print(output, &status)
        }
        ChaosAction::Start {
            time_to_run,
            max_concurrent_faults,
        } => {
            let parameters = ChaosParameters {
                time_to_run_in_seconds: time_to_run.map(|s| s.to_string()),
                max_concurrent_faults,
                ..Default::default()
            };
            chaos
                .start_chaos(&parameters, timeout, cancel)
                .await
                .context("Failed to start chaos")?;
            println!("Chaos started");
            Ok(())
        }
        ChaosAction::Stop => {
            chaos
                .stop_chaos(timeout, cancel)
                .await
                .context("Failed to stop chaos")?;
            println!("Chaos stopped");
            Ok(())
        }
        ChaosAction::Schedule => {
            let schedule = chaos
                .get_chaos_schedule(timeout, cancel)
                .await
                .context("Failed to get chaos schedule")?;
            print(output, &schedule)
        }
    }
}

/// Build a client with the security mode selected by the flags.
async fn connect(
    args: &Args,
    endpoints: &[String],
    ca: Option<PathBuf>,
    cancel: &CancellationToken,
) -> Result<SharedClient> {
    let server_ca = ca
        .map(|path| std::fs::read(&path).with_context(|| format!("Failed to read CA {:?}", path)))
        .transpose()?;

    let builder = ServiceFabricClientBuilder::new()
        .use_endpoints(endpoints)
        .context("Invalid endpoint")?
        .use_client_timeout(Duration::from_secs(args.timeout + 30));

    let client = match (&args.token, &args.cert, &args.key) {
        (Some(token), _, _) => {
            let mut claims = ClaimsSecuritySettings::new(token.clone());
            claims.server_ca_pem = server_ca;
            claims.accept_invalid_server_certs = args.insecure;
            builder
                .use_claims_security(static_security(SecuritySettings::Claims(claims)))
                .build(cancel)
                .await
        }
        (None, Some(cert), Some(key)) => {
            let mut identity = std::fs::read(cert)
                .with_context(|| format!("Failed to read certificate {:?}", cert))?;
            identity.extend(
                std::fs::read(key).with_context(|| format!("Failed to read key {:?}", key))?,
            );
            let mut x509 = X509SecuritySettings::new(identity);
            x509.server_ca_pem = server_ca;
            x509.accept_invalid_server_certs = args.insecure;
            builder
                .use_x509_security(static_security(SecuritySettings::X509(x509)))
                .build(cancel)
                .await
        }
        _ => builder.use_no_security().build(cancel).await,
    };

    client.context("Failed to connect to cluster")
}

fn page_options(args: &PageArgs, timeout: ServerTimeout) -> PagingOptions {
    let mut paging = PagingOptions::new()
        .with_max_results(args.max)
        .with_server_timeout(timeout);
    if let Some(token) = &args.continuation {
        paging = paging.with_continuation_token(ContinuationToken::new(token.clone()));
    }
    paging
}

/// Fetch one page, or every page when `all` is set.
async fn collect_pages<T, F, Fut>(
    first: PagingOptions,
    all: bool,
    mut fetch: F,
) -> sfclient::Result<Vec<T>>
where
    F: FnMut(PagingOptions) -> Fut,
    Fut: Future<Output = sfclient::Result<PagedData<T>>>,
{
    let mut items = Vec::new();
    let mut paging = first;
    loop {
        let page = fetch(paging.clone()).await?;
        let next = paging.next_page(&page);
        items.extend(page.items);
        match next {
            Some(next) if all => paging = next,
            Some(next) => {
                if let Some(token) = next.continuation_token {
                    eprintln!("More results available: --continuation {}", token);
                }
                return Ok(items);
            }
            None => return Ok(items),
        }
    }
}

fn print<T: Serialize + ?Sized>(format: OutputFormat, value: &T) -> Result<()> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", text.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("api-version=6.0").unwrap(),
            ("api-version".to_string(), "6.0".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
    }

    #[test]
    fn test_repeatable_endpoints() {
        let args = Args::try_parse_from([
            "sfctl",
            "--endpoint",
            "http://a:19080",
            "--endpoint",
            "http://b:19080",
            "apps",
            "--all",
        ])
        .unwrap();
        assert_eq!(args.endpoints.len(), 2);
        assert!(matches!(args.command, Command::Apps { ref paging, .. } if paging.all));
    }

    #[test]
    fn test_chaos_events_continuation_conflicts_with_range() {
        let result = Args::try_parse_from([
            "sfctl",
            "chaos-events",
            "--continuation",
            "abc",
            "--start",
            "2024-01-01T00:00:00Z",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_collect_pages_follows_tokens() {
        let mut calls = 0;
        let items = collect_pages(PagingOptions::default(), true, |paging| {
            calls += 1;
            let page = match paging.continuation_token {
                None => PagedData {
                    continuation_token: Some(ContinuationToken::new("2")),
                    items: vec![1, 2],
                },
                Some(_) => PagedData {
                    continuation_token: Some(ContinuationToken::new("")),
                    items: vec![3],
                },
            };
            async move { Ok(page) }
        })
        .await
        .unwrap();
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(calls, 2);
    }
}
