// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::process::exit;

use clap::Parser;
use studydeck_core::error::Fallible;
use tokio::spawn;

use crate::cmd::build::build_site;
use crate::cmd::check::check_collection;
use crate::cmd::export::export_collection;
use crate::cmd::serve::ServerConfig;
use crate::cmd::serve::start_server;
use crate::utils::SERVER_START_TIMEOUT;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Build the static viewer into an output directory.
    Build {
        /// Path to the deck directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Output directory. By default, `dist` inside the deck directory.
        #[arg(long)]
        output: Option<String>,
    },
    /// Extract every card and print how many each strategy produced.
    Check {
        /// Path to the deck directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Export the card dataset as JSON.
    Export {
        /// Path to the deck directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Preview the viewer through a local web server.
    Serve {
        /// Path to the deck directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Build { directory, output } => build_site(directory, output),
        Command::Check { directory } => check_collection(directory),
        Command::Export { directory, output } => export_collection(directory, output),
        Command::Serve {
            directory,
            host,
            port,
            open_browser,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port, SERVER_START_TIMEOUT).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                directory,
                host,
                port,
            };
            start_server(config).await
        }
    }
}
