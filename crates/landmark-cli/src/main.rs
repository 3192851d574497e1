//! `landmark` — validate GeoJSON documents from the command line.
//!
//! Decodes a document from a file (or stdin), feeds it through the
//! landmark-core grammar and reports either the recognized document kind or
//! the structured rejections. Text decoding happens here, at the boundary;
//! the core only ever sees decoded values.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::Value;

use landmark_core::{
    feature, feature_collection, geojson, geometry, leaves, validate, GeoJson, ValidationError,
};

#[derive(Parser)]
#[command(name = "landmark", version, about = "Validate GeoJSON (RFC 7946) documents")]
struct Cli {
    /// Input file, or `-` for stdin
    input: PathBuf,

    /// Which grammar the document must match
    #[arg(long, value_enum, default_value_t = Expect::Auto)]
    expect: Expect,

    /// Report format for rejections
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Expect {
    /// Any whole document: geometry, feature, or collection
    Auto,
    Geometry,
    Feature,
    FeatureCollection,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let document = match read_document(&cli.input) {
        Ok(document) => document,
        Err(error) => {
            eprintln!("error: {:#}", error);
            return ExitCode::from(2);
        }
    };
    tracing::debug!(input = %cli.input.display(), "document decoded");

    match check(&document, cli.expect) {
        Ok(summary) => {
            println!("ok: {}", summary);
            ExitCode::SUCCESS
        }
        Err(errors) => {
            report(&errors, cli.format);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_document(input: &Path) -> Result<Value> {
    let contents = if input == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?
    };
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", input.display()))
}

/// Validate against the selected grammar, summarizing what was recognized.
fn check(document: &Value, expect: Expect) -> Result<String, Vec<ValidationError>> {
    match expect {
        Expect::Auto => validate(&geojson(), document).map(|document| describe(&document)),
        Expect::Geometry => {
            validate(&geometry(), document).map(|geometry| geometry.geometry_type().to_string())
        }
        Expect::Feature => validate(&feature(), document).map(|_| "Feature".to_string()),
        Expect::FeatureCollection => validate(&feature_collection(), document)
            .map(|collection| describe_collection(collection.features.len())),
    }
}

fn describe(document: &GeoJson) -> String {
    match document {
        GeoJson::Geometry(geometry) => geometry.geometry_type().to_string(),
        GeoJson::Feature(_) => "Feature".to_string(),
        GeoJson::FeatureCollection(collection) => describe_collection(collection.features.len()),
    }
}

fn describe_collection(count: usize) -> String {
    match count {
        1 => "FeatureCollection with 1 feature".to_string(),
        n => format!("FeatureCollection with {} features", n),
    }
}

fn report(errors: &[ValidationError], format: Format) {
    match format {
        Format::Text => {
            for error in leaves(errors) {
                eprintln!("{}", error);
            }
        }
        Format::Json => match serde_json::to_string_pretty(errors) {
            Ok(json) => println!("{}", json),
            Err(error) => eprintln!("error: failed to encode report: {}", error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_auto_recognizes_geometries() {
        let document = json!({"type": "Point", "coordinates": [0.0, 0.0]});
        assert_eq!(check(&document, Expect::Auto).unwrap(), "Point");
    }

    #[test]
    fn test_check_auto_recognizes_collections() {
        let document = json!({"type": "FeatureCollection", "features": []});
        assert_eq!(
            check(&document, Expect::Auto).unwrap(),
            "FeatureCollection with 0 features"
        );
    }

    #[test]
    fn test_check_reports_rejections() {
        let document = json!({"type": "Feature", "geometry": null});
        let errors = check(&document, Expect::Feature).unwrap_err();
        assert!(leaves(&errors)
            .iter()
            .any(|e| e.path.to_string() == "/properties"));
    }

    #[test]
    fn test_expected_kind_is_enforced() {
        let document = json!({"type": "Point", "coordinates": [0.0, 0.0]});
        assert!(check(&document, Expect::FeatureCollection).is_err());
        assert!(check(&document, Expect::Geometry).is_ok());
    }

    #[test]
    fn test_describe_collection_singular() {
        assert_eq!(describe_collection(1), "FeatureCollection with 1 feature");
    }
}
