use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use voltroute_cli::logging::{init_logging, LoggingConfig};
use voltroute_cli::output::{
    render_mst, render_report, render_route, render_suggestion, OutputFormat,
};
use voltroute_lib::{
    compute_mst, load_network, search_route, Cost, Graph, OptimizerConfig, RouteKey,
    RouteOptimizer, RouteRequest, RouteTracker, SearchStrategy, SiteId,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Battery-constrained delivery routing")]
struct Cli {
    /// Network description (JSON) to load.
    #[arg(long, required = true)]
    network: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for a route that respects the battery limit.
    Route {
        /// Origin site id.
        #[arg(long = "from")]
        from: SiteId,
        /// Destination site id.
        #[arg(long = "to")]
        to: SiteId,
        /// Battery limit; defaults to the network's optimizer settings.
        #[arg(long)]
        battery: Option<Cost>,
        /// Search strategy (bfs, dijkstra, all-pairs).
        #[arg(long)]
        strategy: Option<SearchStrategy>,
    },
    /// Suggest a route, preferring previously used routes.
    Suggest {
        #[arg(long = "from")]
        from: SiteId,
        #[arg(long = "to")]
        to: SiteId,
        /// Previously used routes, e.g. `--seen 0,1,2 0,3,2`.
        #[arg(long, num_args = 1..)]
        seen: Vec<RouteKey>,
        #[arg(long)]
        battery: Option<Cost>,
    },
    /// Print the minimum spanning tree of the network.
    Mst,
    /// Report the busiest routes and segments among previously used routes.
    Report {
        #[arg(long, num_args = 1..)]
        seen: Vec<RouteKey>,
        /// Number of top routes that feed the report.
        #[arg(long)]
        top: Option<usize>,
    },
}

fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    let (graph, config) = load(&cli.network)?;

    let output = match cli.command {
        Command::Route {
            from,
            to,
            battery,
            strategy,
        } => handle_route(&graph, config, cli.format, from, to, battery, strategy)?,
        Command::Suggest {
            from,
            to,
            seen,
            battery,
        } => {
            let config = OptimizerConfig {
                battery_limit: battery.unwrap_or(config.battery_limit),
                ..config
            };
            handle_suggest(&graph, config, cli.format, from, to, &seen)?
        }
        Command::Mst => render_mst(cli.format, &compute_mst(&graph))?,
        Command::Report { seen, top } => {
            let config = OptimizerConfig {
                report_window: top.unwrap_or(config.report_window),
                ..config
            };
            handle_report(&graph, config, cli.format, &seen)?
        }
    };

    print!("{output}");
    Ok(())
}

fn load(path: &Path) -> Result<(Graph, OptimizerConfig)> {
    let description = load_network(path)
        .with_context(|| format!("failed to load network from {}", path.display()))?;
    let graph = description
        .build_graph()
        .with_context(|| format!("invalid network in {}", path.display()))?;
    let config = description.optimizer.unwrap_or_default();
    config
        .validate()
        .with_context(|| format!("invalid optimizer settings in {}", path.display()))?;
    info!(
        sites = graph.len(),
        connections = graph.connections().len(),
        "network loaded"
    );
    Ok((graph, config))
}

fn handle_route(
    graph: &Graph,
    config: OptimizerConfig,
    format: OutputFormat,
    from: SiteId,
    to: SiteId,
    battery: Option<Cost>,
    strategy: Option<SearchStrategy>,
) -> Result<String> {
    let strategy = strategy.unwrap_or(config.strategy);
    let limit = battery.unwrap_or(config.battery_limit);
    let request = RouteRequest::new(from, to, limit).with_strategy(strategy);

    let Some(route) = search_route(graph, &request)? else {
        bail!("no route from {from} to {to} within battery limit {limit}");
    };
    render_route(format, from, to, strategy, &route)
}

fn handle_suggest(
    graph: &Graph,
    config: OptimizerConfig,
    format: OutputFormat,
    from: SiteId,
    to: SiteId,
    seen: &[RouteKey],
) -> Result<String> {
    let tracker = replay_history(graph, seen)?;
    let optimizer = RouteOptimizer::new(config);

    let Some(suggestion) = optimizer.suggest_route(graph, &tracker, from, to)? else {
        bail!(
            "no route from {from} to {to} within battery limit {}",
            config.battery_limit
        );
    };
    render_suggestion(format, &suggestion)
}

fn handle_report(
    graph: &Graph,
    config: OptimizerConfig,
    format: OutputFormat,
    seen: &[RouteKey],
) -> Result<String> {
    let tracker = replay_history(graph, seen)?;
    let report = RouteOptimizer::new(config).optimization_report(&tracker);
    render_report(format, &report, &tracker.node_visit_stats())
}

/// Register each seen route, rejecting routes the network cannot carry.
fn replay_history(graph: &Graph, seen: &[RouteKey]) -> Result<RouteTracker> {
    let mut tracker = RouteTracker::new();
    for key in seen {
        let sites = key.sites();
        if let Some(&site) = sites.iter().find(|&&site| !graph.contains(site)) {
            bail!("seen route {key} visits unknown site {site}");
        }
        if sites
            .windows(2)
            .any(|pair| graph.connection_cost(pair[0], pair[1]).is_none())
        {
            bail!("seen route {key} uses a connection missing from the network");
        }
        let Some(cost) = graph.path_cost(sites) else {
            bail!("seen route {key} costs more than {}", Cost::MAX);
        };
        tracker.register_route(sites, cost)?;
    }
    Ok(tracker)
}
