use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::demo;
use crate::runtime_config::RuntimeConfig;
use crate::server::{AppService, HttpServer, ServerHandle};

/// Command-line interface for brrtlite
#[derive(Parser)]
#[command(name = "brrtlite", version)]
#[command(about = "Minimal HTTP/1.1 server on raw sockets", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the demo application
    Serve {
        /// Address and port to bind the server to
        #[arg(long)]
        addr: Option<String>,

        /// YAML runtime configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory served under the static prefix
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Directory holding `<name>.html` templates
        #[arg(long)]
        template_dir: Option<PathBuf>,
    },
    /// Print the demo route table
    Routes {
        /// YAML runtime configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Run the parsed command line.
pub fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve {
            addr,
            config,
            static_dir,
            template_dir,
        } => {
            let mut runtime = RuntimeConfig::load(config.as_deref())?;
            if let Some(addr) = addr {
                runtime.addr = addr;
            }
            if let Some(dir) = static_dir {
                runtime.static_dir = dir;
            }
            if let Some(dir) = template_dir {
                runtime.template_dir = dir;
            }
            serve(&runtime)
        }
        Commands::Routes { config } => {
            let runtime = RuntimeConfig::load(config.as_deref())?;
            demo::route_table(&runtime)?.freeze().dump_routes();
            Ok(())
        }
    }
}

/// Start the demo server from `config` and block until a shutdown signal.
pub fn serve(config: &RuntimeConfig) -> Result<()> {
    may::config().set_stack_size(config.stack_size);

    let router = Arc::new(demo::route_table(config)?.freeze());
    let dispatcher = Arc::new(demo::dispatcher(config));
    let service = AppService::new(router, dispatcher).with_max_request_size(config.max_request_size);

    let handle = HttpServer::new(service)
        .with_stack_size(config.stack_size)
        .start(config.addr.as_str())
        .with_context(|| format!("binding {}", config.addr))?;

    info!(
        addr = %handle.addr(),
        static_dir = %config.static_dir.display(),
        template_dir = %config.template_dir.display(),
        "brrtlite serving"
    );

    wait_for_shutdown(handle)
}

#[cfg(unix)]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM]).context("installing signal handlers")?;
    if let Some(signal) = signals.forever().next() {
        info!(signal = signal, "Shutdown signal received");
    }
    handle.stop();
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    handle
        .join()
        .map_err(|e| anyhow::anyhow!("server coroutine failed: {e:?}"))
}
