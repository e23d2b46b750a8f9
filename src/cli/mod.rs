//! # CLI Module
//!
//! Command-line entry points for the `brrtlite` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Run the demo application until SIGINT or SIGTERM:
//!
//! ```bash
//! brrtlite serve --addr 0.0.0.0:8080 --static-dir public --template-dir views
//! ```
//!
//! Options (each falls back to the config file, then `BRRTLITE_*` variables):
//! - `--addr <ADDR>` - listen address
//! - `--config <FILE>` - YAML runtime configuration
//! - `--static-dir <DIR>` - directory served under `/static`
//! - `--template-dir <DIR>` - directory of `<name>.html` templates
//!
//! ### `routes`
//!
//! Print the demo route table:
//!
//! ```bash
//! brrtlite routes
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
