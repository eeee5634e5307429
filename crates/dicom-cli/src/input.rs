//! Loading metadata frames from disk and writing results back.
//!
//! A CSV input is read as-is and must carry the configured id and metadata
//! columns. A directory input turns every `*.xml` file into one record whose
//! id is the file stem; files are taken in name order.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dicom_core::{FrameConfig, MetadataFrame};
use polars::prelude::{Column, CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};
use tracing::{debug, warn};

/// Reads `path` as a CSV file or a directory of XML documents.
pub fn load_frame(path: &Path, config: &FrameConfig) -> Result<MetadataFrame> {
    let data = if path.is_dir() {
        read_xml_dir(path, config)?
    } else {
        read_csv(path)?
    };
    debug!(
        path = %path.display(),
        rows = data.height(),
        columns = data.width(),
        "loaded input"
    );
    MetadataFrame::new(data, config.clone())
        .with_context(|| format!("load metadata from {}", path.display()))
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .with_context(|| format!("read csv {}", path.display()))
}

fn read_xml_dir(dir: &Path, config: &FrameConfig) -> Result<DataFrame> {
    let files = list_xml_files(dir)?;
    if files.is_empty() {
        warn!(dir = %dir.display(), "no .xml files found");
    }
    let mut ids = Vec::with_capacity(files.len());
    let mut documents = Vec::with_capacity(files.len());
    for file in &files {
        let Some(stem) = file.file_stem().and_then(|stem| stem.to_str()) else {
            bail!("file name is not valid UTF-8: {}", file.display());
        };
        let document =
            fs::read_to_string(file).with_context(|| format!("read {}", file.display()))?;
        ids.push(stem.to_string());
        documents.push(document);
    }
    let data = DataFrame::new(vec![
        Column::new(config.id_column.as_str().into(), ids),
        Column::new(config.metadata_column.as_str().into(), documents),
    ])?;
    Ok(data)
}

fn list_xml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))? {
        let path = entry?.path();
        let is_xml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        if path.is_file() && is_xml {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Writes `data` as CSV, rendering null cells as `null_value`.
pub fn write_csv(data: &DataFrame, path: &Path, null_value: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut data = data.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_null_value(null_value.to_string())
        .finish(&mut data)
        .with_context(|| format!("write csv {}", path.display()))?;
    Ok(())
}
