//! `aria` - an interactive REPL over the dispatch core.
//!
//! Reads one utterance per line from stdin and prints the final answer for
//! each turn. Useful for poking at the decision procedure without wiring up
//! a transport layer.

use anyhow::Result;
use aria::cli::Cli;
use aria::dispatch::Dispatcher;
use aria::memory::ConversationContext;
use aria::utils::config::Config;
use clap::Parser;
use owo_colors::OwoColorize;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "aria=debug" } else { "aria=warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.ollama_url {
        config.llm.ollama_url = url;
    }
    if let Some(model) = cli.model {
        config.llm.model = model;
    }

    let dispatcher = build_dispatcher(&config)?;
    let mut context = ConversationContext::with_window(config.history_window);

    let interactive = io::stdin().is_terminal();
    if interactive {
        println!(
            "aria - model {} at {} (/clear resets history, /quit exits)",
            config.llm.model, config.llm.ollama_url
        );
        prompt()?;
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        let utterance = line.trim();

        if utterance.is_empty() {
            if interactive {
                prompt()?;
            }
            continue;
        }
        if utterance == "/quit" || utterance == "/exit" {
            break;
        }
        if utterance == "/clear" {
            context.clear();
            if interactive {
                prompt()?;
            }
            continue;
        }

        match dispatcher.handle_turn(utterance, &mut context).await {
            Ok(answer) => {
                if cli.no_color {
                    println!("{}", answer);
                } else {
                    println!("{}", answer.cyan());
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "turn failed");
                eprintln!("The language model is unreachable. Is Ollama running?");
            }
        }

        if interactive {
            prompt()?;
        }
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("you> ");
    io::stdout().flush()?;
    Ok(())
}

#[cfg(feature = "ollama")]
fn build_dispatcher(config: &Config) -> Result<Dispatcher> {
    use aria::decision::{DecisionProcedure, DirectiveTemplate};
    use aria::llm::OllamaModel;
    use aria::tools::{CrossrefSearch, ToolRegistry};
    use std::sync::Arc;

    let model = Arc::new(OllamaModel::new(
        config.llm.ollama_url.clone(),
        config.llm.model.clone(),
    ));
    let search = Arc::new(CrossrefSearch::new(
        config.search.base_url.clone(),
        config.search.max_results,
    )?);

    let registry = Arc::new(ToolRegistry::with_builtin_tools(search));
    let decision = DecisionProcedure::new(model, DirectiveTemplate::current());

    Ok(Dispatcher::new(registry, decision))
}

#[cfg(not(feature = "ollama"))]
fn build_dispatcher(_config: &Config) -> Result<Dispatcher> {
    anyhow::bail!(
        "no model collaborator compiled in; rebuild with the `ollama` feature \
         or wire a LanguageModel implementation through the library API"
    )
}
