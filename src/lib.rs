//! seedfill: populate objects with seedable random data.
//!
//! The binary loads an [`ObjectSchema`] from YAML, applies the command-line
//! overrides to its parameters and either writes populated objects as JSON
//! Lines or reports which registry resolves every field.

pub mod args;
pub mod json;
pub mod output;

use anyhow::Context;
use args::{DescribeArgs, PopulateArgs};
use output::PopulateMetrics;
use seedfill_core::{FieldType, ObjectSchema, PopulateParameters};
use seedfill_generator::Populator;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Load and validate a schema file.
pub fn load_schema(path: &Path) -> anyhow::Result<ObjectSchema> {
    ObjectSchema::from_file(path)
        .with_context(|| format!("Failed to load schema from {path:?}"))
}

/// The schema's parameters with the command-line overrides applied.
pub fn populate_parameters(schema: &ObjectSchema, args: &PopulateArgs) -> PopulateParameters {
    let mut parameters = schema.parameters.clone();
    if let Some(seed) = args.seed {
        parameters.seed = Some(seed);
    }
    if let Some(depth) = args.depth {
        parameters.randomization_depth = depth;
    }
    parameters
        .excluded_fields
        .extend(args.exclude.iter().cloned());
    parameters
}

/// Run `seedfill populate`.
pub fn run_populate(args: &PopulateArgs) -> anyhow::Result<PopulateMetrics> {
    let schema = load_schema(&args.schema)?;
    let parameters = populate_parameters(&schema, args);

    tracing::info!(
        "Populating {} objects of type '{}' (seed={:?})",
        args.count,
        args.type_name,
        parameters.seed
    );

    let mut populator = Populator::new(schema, parameters)
        .context("Invalid population parameters")?;

    let metrics = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {path:?}"))?;
            let writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
            output::write_jsonl(&mut populator, &args.type_name, args.count, writer)
        }
        None => {
            let stdout = io::stdout().lock();
            output::write_jsonl(&mut populator, &args.type_name, args.count, stdout)
        }
    }
    .with_context(|| format!("Failed to populate type '{}'", args.type_name))?;

    Ok(metrics)
}

/// Run `seedfill describe`, writing the report to `out`.
pub fn run_describe<W: Write>(args: &DescribeArgs, mut out: W) -> anyhow::Result<()> {
    let schema = load_schema(&args.schema)?;

    let type_names: Vec<String> = match &args.type_name {
        Some(name) => vec![name.clone()],
        None => schema.type_names().into_iter().map(String::from).collect(),
    };

    let populator = Populator::from_schema(schema).context("Invalid population parameters")?;
    for type_name in &type_names {
        let resolutions = populator
            .describe(type_name)
            .with_context(|| format!("Failed to describe type '{type_name}'"))?;

        writeln!(out, "{type_name}")?;
        for resolution in &resolutions {
            let source = match (&resolution.registry, &resolution.field_type) {
                (Some(registry), _) => registry.as_str(),
                (None, FieldType::Object { .. }) => "(nested object)",
                (None, FieldType::Array { .. }) => "(collection)",
                (None, _) => "(null)",
            };
            writeln!(
                out,
                "  {:<32} {:<12} {}",
                resolution.path,
                type_label(&resolution.field_type),
                source
            )?;
            for failure in &resolution.failures {
                writeln!(out, "    ! {failure}")?;
            }
        }
    }

    Ok(())
}

/// Short name of a field type.
fn type_label(field_type: &FieldType) -> String {
    match serde_json::to_value(field_type) {
        Ok(serde_json::Value::String(name)) => name,
        Ok(serde_json::Value::Object(map)) => map
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or("complex")
            .to_string(),
        _ => "unknown".to_string(),
    }
}
