//! Terminal client for the Câmara bill lookup service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, Subcommand};

use camara_client::{ClientConfig, DadosAbertosClient, PortalClient};
use camara_consulta::{Consulta, ConsultaService};
use camara_core::{
    parse_reference, render_detail, render_disambiguation, render_search_results, RenderFormat,
};

#[derive(Parser)]
#[command(name = "camara")]
#[command(about = "Consulta de proposições da Câmara dos Deputados", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Timeout per remote call, in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Lista proposições por referência ou termo de busca
    Busca {
        /// Referência ("PL 2306/2020", "2306/2020") ou termo ("fake news")
        #[arg(required = true)]
        termo: Vec<String>,
    },
    /// Consulta completa de uma proposição
    Consulta {
        /// Referência ("PL 2306/2020", "2306/2020") ou termo de busca
        #[arg(required = true)]
        referencia: Vec<String>,

        /// Emite HTML em vez de texto
        #[arg(long)]
        html: bool,
    },
    /// Linha do tempo de tramitação raspada do portal
    Timeline {
        /// Id da proposição (ex: 2252323)
        id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ClientConfig {
        timeout: Duration::from_secs(cli.timeout_secs),
        ..ClientConfig::default()
    };
    let api = DadosAbertosClient::new(config.clone()).context("failed to build API client")?;
    let portal = PortalClient::new(config.clone()).context("failed to build portal client")?;
    let service = ConsultaService::new(Arc::new(api), Arc::new(portal), config);

    match cli.command {
        Commands::Busca { termo } => busca(&service, &termo.join(" ")).await,
        Commands::Consulta { referencia, html } => {
            consulta(&service, &referencia.join(" "), html).await
        }
        Commands::Timeline { id } => timeline(&service, id).await,
    }
}

async fn busca(service: &ConsultaService, termo: &str) -> Result<()> {
    let reference = parse_reference(termo)?;
    let results = service.resolve(&reference).await;

    println!("Resultados encontrados: {}", results.len());
    for (position, result) in results.iter().enumerate() {
        println!("\n{}. {}", position + 1, result.title);
        println!("ID: {}", result.id);
        println!("Link: {}", result.link);
    }
    Ok(())
}

async fn consulta(service: &ConsultaService, referencia: &str, html: bool) -> Result<()> {
    let format = if html {
        RenderFormat::Html
    } else {
        RenderFormat::PlainText
    };
    match service.consultar(referencia).await? {
        Consulta::Detail(detail) => println!("{}", render_detail(&detail, format)),
        Consulta::Ambiguous(candidates) => println!("{}", render_disambiguation(&candidates)),
        Consulta::Listing(results) => println!("{}", render_search_results(&results)),
    }
    Ok(())
}

async fn timeline(service: &ConsultaService, id: u64) -> Result<()> {
    let events = service.timeline(id).await;
    if events.is_empty() {
        println!("Nenhuma tramitação encontrada na página da proposição {id}.");
        return Ok(());
    }
    for event in &events {
        println!("Data: {}", event.raw_date);
        println!("Órgão: {}", event.committee_code.as_deref().unwrap_or("N/A"));
        println!("Despacho: {}", event.dispatch.as_deref().unwrap_or("N/A"));
        println!("------------------------");
    }
    Ok(())
}
