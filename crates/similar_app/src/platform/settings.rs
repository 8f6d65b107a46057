use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use similar_core::PageVariant;
use similar_engine::{ClientSettings, SearchQuery};

use super::cli::{Args, Variant};
use super::logging::LogDestination;

/// Optional settings file; every field can be overridden on the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub limit: Option<u32>,
    pub log: Option<LogDestination>,
}

/// Everything one run needs, after merging file and command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub client: ClientSettings,
    pub query: SearchQuery,
    pub variant: PageVariant,
    pub log: LogDestination,
    pub log_level: LevelFilter,
}

pub fn load_file_settings(path: &Path) -> Result<FileSettings> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(FileSettings::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read settings from {path:?}"))
        }
    };
    ron::from_str(&content).with_context(|| format!("failed to parse settings from {path:?}"))
}

pub fn resolve(args: &Args, file: FileSettings) -> Result<RunConfig> {
    let mut client = ClientSettings::default();
    if let Some(base_url) = args.base_url.clone().or(file.base_url) {
        client.base_url = base_url;
    }
    if let Some(secs) = file.connect_timeout_secs {
        client.connect_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = file.request_timeout_secs {
        client.request_timeout = Duration::from_secs(secs);
    }
    client
        .endpoint(&client.events_path)
        .with_context(|| format!("invalid base url {:?}", client.base_url))?;

    let limit = args.limit.or(file.limit).unwrap_or(SearchQuery::DEFAULT_LIMIT);
    if !(1..=SearchQuery::MAX_LIMIT).contains(&limit) {
        anyhow::bail!("limit must be between 1 and {}, got {limit}", SearchQuery::MAX_LIMIT);
    }

    let query = SearchQuery {
        file: args.file.clone(),
        limit,
        exclude_same_author: args.exclude_same_author,
        force: args.force,
    };

    let variant = match args.variant {
        Variant::Ratings => PageVariant::Ratings,
        Variant::Reactions => PageVariant::Reactions {
            source: args.file.clone(),
        },
    };

    Ok(RunConfig {
        client,
        query,
        variant,
        log: args.log.or(file.log).unwrap_or_default(),
        log_level: if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
    })
}
