//! End-to-end runs of the subcommands over files in a temp directory.

use std::fs;
use std::path::Path;

use clap::Parser;
use dicom_cli::cli::Cli;
use dicom_cli::commands::run;
use dicom_cli::input::load_frame;
use dicom_core::FrameConfig;
use dicom_model::Locality;
use tempfile::TempDir;

fn document(manufacturer: &str, study_date: Option<&str>) -> String {
    let date = study_date
        .map(|date| {
            format!(
                r#"<DicomAttribute keyword="StudyDate" tag="00080020" vr="DA"><Value number="1">{date}</Value></DicomAttribute>"#
            )
        })
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<NativeDicomModel>{date}<DicomAttribute keyword="Manufacturer" tag="00080070" vr="LO"><Value number="1">{manufacturer}</Value></DicomAttribute></NativeDicomModel>"#
    )
}

fn write_xml_dir(dir: &Path) {
    fs::write(dir.join("0.xml"), document("SIEMENS", Some("20200101"))).unwrap();
    fs::write(dir.join("1.xml"), document("GE", Some("20210315"))).unwrap();
    fs::write(dir.join("2.xml"), document("SIEMENS", None)).unwrap();
}

fn csv_field(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["dicom-meta"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn filter_directory_keeps_matching_rows() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("records");
    fs::create_dir(&input).unwrap();
    write_xml_dir(&input);
    let output = temp.path().join("out/filtered.csv");

    let cli = parse(&[
        "filter",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--tags",
        r#"{"00080070":"SIEMENS"}"#,
    ]);
    let result = run(&cli.command).unwrap();

    assert_eq!(result.operation, "filter");
    assert_eq!(result.locality, Locality::Local);
    assert_eq!(result.rows_before, 3);
    assert_eq!(result.rows_after, 2);
    let written = load_frame(&output, &FrameConfig::default()).unwrap();
    assert_eq!(
        written.ids().unwrap(),
        vec![Some("0".to_string()), Some("2".to_string())]
    );
}

#[test]
fn drop_remote_removes_matching_rows() {
    let temp = TempDir::new().unwrap();
    write_xml_dir(temp.path());

    let cli = parse(&[
        "drop",
        "--input",
        temp.path().to_str().unwrap(),
        "--remote",
        "--tags",
        r#"{"00080070":"SIEMENS"}"#,
    ]);
    let result = run(&cli.command).unwrap();

    assert_eq!(result.locality, Locality::Remote);
    assert_eq!(result.rows_after, 1);
    assert!(result.added_columns().is_empty());
}

#[test]
fn extract_from_csv_appends_columns_with_null_placeholder() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("meta.csv");
    let mut csv = String::from("id,metadata\n");
    csv.push_str(&format!("a,{}\n", csv_field(&document("SIEMENS", Some("20200101")))));
    csv.push_str(&format!("b,{}\n", csv_field(&document("GE", None))));
    fs::write(&input, csv).unwrap();
    let config = temp.path().join("dicom-meta.toml");
    fs::write(&config, "[output]\nnull_value = \"NA\"\n").unwrap();
    let output = temp.path().join("extracted.csv");

    let cli = parse(&[
        "extract",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "-k",
        "StudyDate",
        "-k",
        "Manufacturer",
    ]);
    let result = run(&cli.command).unwrap();

    assert_eq!(result.locality, Locality::Local);
    assert_eq!(result.rows_after, 2);
    assert_eq!(result.added_columns(), vec!["StudyDate", "Manufacturer"]);
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("20200101,SIEMENS"));
    assert!(written.contains("NA,GE"));
}

#[test]
fn invalid_tags_fail_before_reading_input() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.csv");

    let cli = parse(&[
        "filter",
        "--input",
        missing.to_str().unwrap(),
        "--tags",
        r#""00080070""#,
    ]);
    let error = run(&cli.command).unwrap_err();
    assert!(format!("{error:#}").contains("--tags"));
}

#[test]
fn custom_column_names_from_flags() {
    let temp = TempDir::new().unwrap();
    write_xml_dir(temp.path());

    let cli = parse(&[
        "extract",
        "--input",
        temp.path().to_str().unwrap(),
        "--id-column",
        "instance",
        "--metadata-column",
        "xml",
        "-k",
        "Manufacturer",
    ]);
    let result = run(&cli.command).unwrap();
    assert_eq!(
        result.columns_after,
        vec!["instance", "xml", "Manufacturer"]
    );
}
