//! Remote desktop status monitor.
//!
//! Polls session and network state every few seconds and serves the
//! committed status, history and current remote users over HTTP.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin rdpwatch-server
//! cargo run --bin rdpwatch-server -- --port 8080 --method network --rdp-port 3389
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use rdpwatch_server::{
    config::{
        DEFAULT_CENSUS_THRESHOLD, DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_CONFIRM_DELAY_MS,
        DEFAULT_HOST, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_PORT, DEFAULT_RDP_PORT, MonitorConfig,
    },
    domain::{DetectionMethod, EvidenceCollector, Locale},
    infrastructure::{CompositeEvidenceCollector, InMemoryConnectionStateRepository},
    ui::Server,
    usecase::{
        ForceCheckUseCase, GetHistoryUseCase, GetStatusUseCase, ListRemoteUsersUseCase,
        UpdateStatusUseCase,
    },
};
use rdpwatch_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "rdpwatch-server")]
#[command(about = "Remote desktop connection status monitor with HTTP API", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Seconds between background status checks
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    interval_secs: u64,

    /// Milliseconds to wait before re-checking a pending status change
    #[arg(long, default_value_t = DEFAULT_CONFIRM_DELAY_MS)]
    confirm_delay_ms: u64,

    /// Seconds before an inspection command is abandoned
    #[arg(long, default_value_t = DEFAULT_COMMAND_TIMEOUT_SECS)]
    command_timeout_secs: u64,

    /// Detection method to enable (repeatable): env, session-table, network, process-census
    #[arg(short = 'm', long = "method", value_delimiter = ',')]
    methods: Vec<DetectionMethod>,

    /// Local port whose established connections count as remote desktop sessions
    #[arg(long, default_value_t = DEFAULT_RDP_PORT)]
    rdp_port: u16,

    /// Only count session-table rows in the Active state
    #[arg(long)]
    strict_sessions: bool,

    /// Skip the session table unless remote desktop is enabled in the registry
    #[arg(long)]
    require_rdp_enabled: bool,

    /// Process census is positive when more processes than this match
    #[arg(long, default_value_t = DEFAULT_CENSUS_THRESHOLD)]
    census_threshold: usize,

    /// Allow the process census to be the only positive signal
    #[arg(long)]
    census_standalone: bool,

    /// Language of status phrases: zh-cn or en
    #[arg(short = 'l', long, default_value = "zh-cn")]
    locale: Locale,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn monitor_config(&self) -> MonitorConfig {
        let methods = if self.methods.is_empty() {
            MonitorConfig::default_methods()
        } else {
            self.methods.clone()
        };
        MonitorConfig {
            poll_interval: Duration::from_secs(self.interval_secs.max(1)),
            confirm_delay: Duration::from_millis(self.confirm_delay_ms),
            command_timeout: Duration::from_secs(self.command_timeout_secs.max(1)),
            methods,
            rdp_port: self.rdp_port,
            strict_sessions: self.strict_sessions,
            require_rdp_enabled: self.require_rdp_enabled,
            census_threshold: self.census_threshold,
            census_standalone: self.census_standalone,
            locale: self.locale,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = args.monitor_config();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. EvidenceCollector
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory state)
    let repository = Arc::new(InMemoryConnectionStateRepository::default());

    // 2. Create EvidenceCollector (OS commands and process introspection)
    let composite = CompositeEvidenceCollector::from_config(&config);
    tracing::info!(
        methods = ?composite.methods(),
        rdp_port = config.rdp_port,
        "Starting remote desktop status monitor"
    );
    let collector: Arc<dyn EvidenceCollector> = Arc::new(composite);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 3. Create UseCases
    let update_status_usecase = Arc::new(UpdateStatusUseCase::new(
        collector.clone(),
        repository.clone(),
        clock.clone(),
        config.confirm_delay,
    ));
    let force_check_usecase = Arc::new(ForceCheckUseCase::new(
        collector.clone(),
        repository.clone(),
        clock.clone(),
    ));
    let get_status_usecase = Arc::new(GetStatusUseCase::new(
        collector.clone(),
        repository.clone(),
    ));
    let get_history_usecase = Arc::new(GetHistoryUseCase::new(repository.clone()));
    let list_remote_users_usecase = Arc::new(ListRemoteUsersUseCase::new(collector, clock));

    // 4. Create and run the server
    let server = Server::new(
        update_status_usecase,
        force_check_usecase,
        get_status_usecase,
        get_history_usecase,
        list_remote_users_usecase,
        config.locale,
        config.poll_interval,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
