//! Command-line front end for solrq.
//!
//! Responses are printed to stdout as pretty JSON; tracing goes to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use solrq::params::{encode, RawParams, UpdateParams};
use solrq::{ClientConfig, Endpoint, Handler, SolrClient};
use tracing_subscriber::EnvFilter;

/// Query and update Apache Solr cores.
#[derive(Parser)]
#[command(name = "solrq", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the encoded query string for key=value pairs.
    Encode {
        /// Parameters as key=value; keys may repeat.
        pairs: Vec<String>,
    },

    /// Run a query and print the JSON response.
    Select {
        /// Core URL or configured endpoint name.
        endpoint: String,
        /// Parameters as key=value; keys may repeat.
        pairs: Vec<String>,
        /// Request handler path below the core.
        #[arg(long, default_value = "select")]
        handler: String,
    },

    /// Check that a core answers its ping handler.
    Ping {
        /// Core URL or configured endpoint name.
        endpoint: String,
    },

    /// Issue a hard commit.
    Commit {
        /// Core URL or configured endpoint name.
        endpoint: String,
    },

    /// Delete documents by id, or by query with --query.
    Delete {
        /// Core URL or configured endpoint name.
        endpoint: String,
        /// Unique keys to delete.
        ids: Vec<String>,
        /// Delete every document matching this query instead.
        #[arg(long, conflicts_with = "ids")]
        query: Option<String>,
        /// Commit after deleting.
        #[arg(long)]
        commit: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("solrq=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Command::Encode { pairs } = &cli.command {
        println!("{}", encode(&[&RawParams::from_assignments(pairs)]));
        return Ok(());
    }

    let config = ClientConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let client = SolrClient::new(config)?;

    match cli.command {
        Command::Encode { .. } => {}
        Command::Select {
            endpoint,
            pairs,
            handler,
        } => {
            let handler = match handler.as_str() {
                "select" => Handler::Select,
                other => Handler::Custom(other.to_owned()),
            };
            let response = client
                .request(
                    &Endpoint::parse(&endpoint),
                    &handler,
                    &[&RawParams::from_assignments(&pairs)],
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Ping { endpoint } => {
            if client.ping(&Endpoint::parse(&endpoint)).await? {
                println!("OK");
            } else {
                anyhow::bail!("{endpoint} did not report OK");
            }
        }
        Command::Commit { endpoint } => {
            client.commit(&Endpoint::parse(&endpoint)).await?;
            tracing::info!(%endpoint, "committed");
        }
        Command::Delete {
            endpoint,
            ids,
            query,
            commit,
        } => {
            let endpoint = Endpoint::parse(&endpoint);
            let params = UpdateParams {
                commit: commit.then_some(true),
                ..Default::default()
            };
            match query {
                Some(query) => client.delete_by_query(&endpoint, &query, &params).await?,
                None if ids.is_empty() => anyhow::bail!("give ids to delete or --query"),
                None => client.delete_by_ids(&endpoint, ids, &params).await?,
            };
            tracing::info!(%endpoint, "delete sent");
        }
    }

    Ok(())
}
