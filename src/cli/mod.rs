//! CLI module for the `aria` binary.
//!
//! Provides command-line argument parsing for the interactive REPL.
//! Uses clap for argument parsing and owo-colors for terminal output.

use clap::Parser;

/// A.R.I.A - Assistant Routing & Invocation Agent
///
/// The tool-selection and dispatch core of a voice-assistant backend,
/// exercised through an interactive read-eval-print loop.
#[derive(Parser, Debug)]
#[command(
    name = "aria",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "A.R.I.A - Assistant Routing & Invocation Agent",
    long_about = "The tool-selection and dispatch core of a voice-assistant backend.\n\
                  Each line you type is handled as one turn: the model decides between\n\
                  the calculator tool, the literature-search tool, or a direct answer.",
    after_help = "EXAMPLES:\n    \
                  aria                                  # REPL against http://localhost:11434\n    \
                  aria --model llama3.1:8b              # Pick the Ollama model\n    \
                  aria --ollama-url http://host:11434   # Point at a remote Ollama\n    \
                  echo 'what is sqrt(16)?' | aria       # One-shot via stdin"
)]
pub struct Cli {
    /// Base URL of the Ollama server
    #[arg(long, env = "ARIA_OLLAMA_URL")]
    pub ollama_url: Option<String>,

    /// Ollama model to run inference with
    #[arg(short, long, env = "ARIA_MODEL")]
    pub model: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
