//! Minimal CLI: JSON → (typescript | shape)
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::Error;
use crate::normalize::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_FIELDS};
use crate::{CollisionPolicy, Limits, Options};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate TypeScript interfaces from sample JSON documents
#[derive(Parser, Debug)]
#[command(name = "json-ts", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit `export interface` declarations
    Ts(TsOut),
    /// print the normalized shape tree as JSON (debug view)
    Shape(ShapeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct LimitSettings {
    /// maximum container nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// maximum number of keys in a single object
    #[arg(long, default_value_t = DEFAULT_MAX_FIELDS)]
    max_fields: usize,
}

#[derive(clap::Parser, Debug)]
struct TsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    limits: LimitSettings,

    /// top-level interface name
    #[arg(long, default_value = crate::DEFAULT_ROOT_NAME)]
    root_type: String,

    /// fail when two different objects map to the same interface name
    /// (default: keep the first, drop the rest)
    #[arg(long, default_value_t = false)]
    strict_names: bool,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct ShapeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    limits: LimitSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// One JSON document and where it came from.
#[derive(Debug)]
struct Document {
    source: String,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> anyhow::Result<Vec<Document>> {
        let mut docs = Vec::new();
        for source_path in resolve_file_path_patterns(&self.input)? {
            let source_name = source_path.to_string_lossy().to_string();
            let source = read_source(&source_path)?;
            let before = docs.len();
            for (label, value) in split_documents(&source_name, &source, self.ndjson)? {
                for value in self.select(value).with_context(|| label.clone())? {
                    docs.push(Document { source: label.clone(), value });
                }
            }
            debug!(source = %source_name, documents = docs.len() - before, "loaded input");
        }
        Ok(docs)
    }

    /// Apply `--json-pointer`, then `--jq-expr`.
    fn select(&self, value: Value) -> crate::Result<Vec<Value>> {
        let value = match self.json_pointer.as_deref() {
            None => value,
            Some(pointer) => value
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| Error::PointerNotFound { pointer: pointer.to_string() })?,
        };
        match self.jq_expr.as_deref() {
            None => Ok(vec![value]),
            Some(jq_expr) => crate::jq_exec::run_jaq(jq_expr, &value),
        }
    }
}

impl LimitSettings {
    fn limits(&self) -> Limits {
        Limits::default()
            .with_max_depth(self.max_depth)
            .with_max_fields(self.max_fields)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Ts(target) => {
                let docs = target.input_settings.load_documents()?;
                let collision = if target.strict_names {
                    CollisionPolicy::Error
                } else {
                    CollisionPolicy::Drop
                };
                let options = Options::default()
                    .with_limits(target.limits.limits())
                    .with_collision(collision);

                // documents are independent; order of output follows input order
                let outputs = docs
                    .par_iter()
                    .map(|doc| {
                        crate::json_to_typescript(&doc.value, &target.root_type, &options)
                            .with_context(|| doc.source.clone())
                    })
                    .collect::<anyhow::Result<Vec<String>>>()?;

                let ts_src = join_outputs(&docs, &outputs);
                info!(documents = docs.len(), "generated declarations");
                write_output(target.out.as_deref(), &ts_src)
            }
            Command::Shape(target) => {
                let docs = target.input_settings.load_documents()?;
                let options = Options::default().with_limits(target.limits.limits());
                let shapes = docs
                    .par_iter()
                    .map(|doc| {
                        crate::infer_shape(&doc.value, &options)
                            .with_context(|| doc.source.clone())
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;

                let shape_src = match shapes.as_slice() {
                    [single] => serde_json::to_string_pretty(single)?,
                    many => serde_json::to_string_pretty(many)?,
                };
                write_output(target.out.as_deref(), &format!("{shape_src}\n"))
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

const STDIN_MARKER: &str = "-";

/// Parse one input into labelled documents; NDJSON lines are labelled
/// `source:line`.
fn split_documents(
    source_name: &str,
    source: &str,
    ndjson: bool,
) -> anyhow::Result<Vec<(String, Value)>> {
    if !ndjson {
        let value = crate::parse_json(source).with_context(|| source_name.to_string())?;
        return Ok(vec![(source_name.to_string(), value)]);
    }
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(ix, line)| {
            let label = format!("{source_name}:{}", ix + 1);
            let value = crate::parse_json(line).with_context(|| label.clone())?;
            Ok::<_, anyhow::Error>((label, value))
        })
        .collect()
}

/// A single document prints bare; several are each headed by a
/// `// <label>` comment line.
fn join_outputs(docs: &[Document], outputs: &[String]) -> String {
    if docs.len() == 1 {
        return outputs.concat();
    }
    docs.iter()
        .zip(outputs)
        .map(|(doc, out)| format!("// {}\n{out}", doc.source))
        .collect()
}

fn read_source(path: &Path) -> crate::Result<String> {
    let io_err = |source| Error::Io { path: path.to_path_buf(), source };
    if path.as_os_str() == STDIN_MARKER {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).map_err(io_err)
    }
}

fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(out, text).with_context(|| format!("writing {}", out.display()))?;
            info!(path = %out.display(), "wrote output");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> crate::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if pattern == STDIN_MARKER || !has_glob_chars(pattern) {
            out.push(PathBuf::from(pattern));
            continue;
        }
        let entries = glob::glob(pattern).map_err(|e| Error::Glob { message: e.to_string() })?;
        let before = out.len();
        for entry in entries {
            out.push(entry.map_err(|e| Error::Glob { message: e.to_string() })?);
        }
        if out.len() == before {
            return Err(Error::Glob { message: format!("glob pattern matched no files: {pattern}") });
        }
    }

    Ok(out)
}
