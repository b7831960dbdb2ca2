//! Command-line front end for `qshape-core`.
//!
//! Reads a JSON query document (the configuration keys plus a `queryAST`
//! object), compiles the configuration onto the AST and writes the extended
//! AST back as JSON.
//!
//! # CLI Usage
//!
//! ```bash
//! # Compile a document from a file
//! qshape compile --input request.json --pretty
//!
//! # Compile from stdin into a file
//! cat request.json | qshape compile --output ast.json
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::Context;
use qshape_core::{compile, QueryDocument};
use tracing::{debug, info};

/// Compiles one JSON query document and returns the extended AST as JSON.
///
/// # Errors
///
/// Fails when the document is not valid JSON of the expected shape, or when
/// the compiler rejects the configuration.
pub fn compile_document(input: &str, pretty: bool) -> anyhow::Result<String> {
    let QueryDocument {
        config,
        mut query_ast,
    } = serde_json::from_str(input).context("failed to parse query document")?;

    debug!(
        columns = query_ast.columns.len(),
        has_where = query_ast.where_clause.is_some(),
        "parsed query document"
    );

    compile(&config, &mut query_ast).context("failed to compile query shape")?;

    let output = if pretty {
        serde_json::to_string_pretty(&query_ast)
    } else {
        serde_json::to_string(&query_ast)
    }
    .context("failed to serialize query AST")?;
    Ok(output)
}

/// Reads the document from a file, or stdin when the path is absent or `-`.
///
/// # Errors
///
/// Fails when the input cannot be read.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Writes the result to a file, or stdout when the path is absent or `-`.
///
/// # Errors
///
/// Fails when the output cannot be written.
pub fn write_output(path: Option<&Path>, output: &str) -> anyhow::Result<()> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::write(path, output).with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote compiled AST to {}", path.display());
        }
        _ => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{output}").context("failed to write stdout")?;
        }
    }
    Ok(())
}
