use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory the app state and cached credential are stored in
    #[arg(short, long, default_value = ".recipe_chat")]
    pub data_dir: PathBuf,

    /// Start with a cuisine region filter (e.g. "italian", "thai", "all")
    #[arg(short, long)]
    pub region: Option<String>,

    /// Name of the environment variable holding the chat API key
    #[arg(long, default_value = "OPENROUTER_API_KEY")]
    pub api_key_env: String,

    /// Override the chat model
    #[arg(long)]
    pub model: Option<String>,

    /// Replace the built-in nutrition table with a CSV
    /// (columns: name,kcal,protein_g,carbs_g,fat_g)
    #[arg(long)]
    pub nutrition_csv: Option<PathBuf>,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
