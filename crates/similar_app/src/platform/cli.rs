use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use super::logging::LogDestination;

/// Follow a similar-books search and rate the candidates from the terminal.
#[derive(Parser, Debug)]
#[command(name = "similar_app", version)]
pub struct Args {
    /// File name of the book to find similar books for.
    #[arg(long)]
    pub file: String,
    /// Server root, e.g. `http://127.0.0.1:8000`.
    #[arg(long)]
    pub base_url: Option<String>,
    /// Number of candidates to request.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: Option<u32>,
    #[arg(long)]
    pub exclude_same_author: bool,
    /// Recompute even if results are cached on the server.
    #[arg(long)]
    pub force: bool,
    #[arg(long, value_enum, default_value_t = Variant::Ratings)]
    pub variant: Variant,
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
    #[arg(long)]
    pub verbose: bool,
    /// RON settings file; missing is fine.
    #[arg(long, default_value = "similar_app.ron")]
    pub config: PathBuf,
}

/// Which feedback controls the page carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Five-star ratings posted to `/similar/feedback`.
    Ratings,
    /// Like/dislike buttons posted to `/feedback`.
    Reactions,
}
