//! Subcommand execution.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use dicom_core::{DicomDataset, InProcessBackend, MetadataBackend};
use dicom_model::{KeywordSpec, Locality, TagCriteria};
use tracing::{debug, info, info_span};

use crate::cli::{Command, DatasetArgs};
use crate::config::CliConfig;
use crate::input::{load_frame, write_csv};
use crate::logging::redact_value;

/// A validated request, ready to run against a dataset.
#[derive(Debug, Clone)]
pub enum Operation {
    Filter(TagCriteria),
    Drop(TagCriteria),
    Extract(KeywordSpec),
}

impl Operation {
    /// Parses and validates the subcommand's arguments.
    pub fn from_command(command: &Command) -> Result<Self> {
        Ok(match command {
            Command::Filter(args) => Self::Filter(parse_tags(&args.tags)?),
            Command::Drop(args) => Self::Drop(parse_tags(&args.tags)?),
            Command::Extract(args) => Self::Extract(
                KeywordSpec::new(args.keywords.iter().map(String::as_str))
                    .context("invalid --keyword")?,
            ),
        })
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Filter(_) => "filter",
            Self::Drop(_) => "drop",
            Self::Extract(_) => "extract",
        }
    }

    /// Applies the operation to `dataset` in place.
    pub fn apply(&self, dataset: &mut DicomDataset) -> Result<()> {
        match self {
            Self::Filter(criteria) => dataset.filter_by_tags(criteria)?,
            Self::Drop(criteria) => dataset.drop_rows_by_tags(criteria)?,
            Self::Extract(keywords) => dataset.extract_keywords(keywords)?,
        }
        Ok(())
    }
}

fn parse_tags(text: &str) -> Result<TagCriteria> {
    let criteria = TagCriteria::parse_json(text).context("invalid --tags")?;
    for (tag, value) in criteria.iter() {
        debug!(tag, value = redact_value(value), "tag criterion");
    }
    Ok(criteria)
}

/// What a run did, for the summary table.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub operation: &'static str,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub locality: Locality,
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: Vec<String>,
    pub columns_after: Vec<String>,
}

impl RunResult {
    /// Columns present after the run that were not there before.
    pub fn added_columns(&self) -> Vec<&str> {
        self.columns_after
            .iter()
            .filter(|name| !self.columns_before.contains(name))
            .map(String::as_str)
            .collect()
    }
}

/// Runs a subcommand end to end: load, apply, optionally write.
pub fn run(command: &Command) -> Result<RunResult> {
    let operation = Operation::from_command(command)?;
    let args = command.dataset();
    let span = info_span!("run", operation = operation.name(), input = %args.input.display());
    let _guard = span.enter();

    let config = CliConfig::resolve(args)?;
    run_with_config(&operation, args, &config)
}

/// Runs `operation` with an already resolved configuration.
pub fn run_with_config(
    operation: &Operation,
    args: &DatasetArgs,
    config: &CliConfig,
) -> Result<RunResult> {
    let frame = load_frame(&args.input, &config.frame)?;
    let columns_before = frame.column_names();
    let rows_before = frame.height();

    let backend: Arc<dyn MetadataBackend> = Arc::new(InProcessBackend::new());
    let mut dataset = if args.remote {
        DicomDataset::remote(frame, backend).context("upload to backend")?
    } else {
        DicomDataset::local(frame, backend)
    };
    let locality = dataset.locality();
    debug!(locality = %locality, "dataset ready");

    operation
        .apply(&mut dataset)
        .with_context(|| format!("{} failed", operation.name()))?;
    let (metadata, _) = dataset.into_frames()?.into_parts();
    let rows_after = metadata.height();
    let columns_after = metadata.column_names();

    if let Some(path) = &args.output {
        write_csv(&metadata.into_data(), path, &config.output.null_value)?;
        info!(path = %path.display(), rows = rows_after, "wrote output");
    }

    Ok(RunResult {
        operation: operation.name(),
        input: args.input.clone(),
        output: args.output.clone(),
        locality,
        rows_before,
        rows_after,
        columns_before,
        columns_after,
    })
}
