use crate::config::Settings;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pokefinder", about = "Recommend a starter Pokemon from a free-text description")]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the web front end
    Serve {
        /// Address to listen on
        #[arg(long, env = "POKEFINDER_BIND", default_value = "0.0.0.0:8080")]
        bind: String,
    },
    /// Embed text files and load them into the candidate store
    Ingest {
        /// Glob pattern of description files, e.g. "data/*.txt"
        pattern: String,
    },
    /// Resolve one query and print the recommendation as JSON
    Recommend {
        /// Free-text description of the wanted Pokemon
        query: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmbeddingBackend, ModelBackend};
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_settings_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pokefinder",
            "recommend",
            "fast electric type",
            "--top-k",
            "5",
            "--embedding-provider",
            "openai",
            "--llm-provider",
            "gemini",
        ])
        .unwrap();
        assert_eq!(cli.settings.top_k, 5);
        assert_eq!(cli.settings.embedding_provider, EmbeddingBackend::OpenAi);
        assert_eq!(cli.settings.llm_provider, ModelBackend::Gemini);
        match cli.command {
            Commands::Recommend { query } => assert_eq!(query, "fast electric type"),
            _ => panic!("expected recommend"),
        }
    }
}
