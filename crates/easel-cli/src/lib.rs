//! CLI logic for the Easel canvas script tool.
//!
//! This module contains the core CLI logic: loading configuration and the
//! scene, painting it, and writing the result.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use easel::{EaselError, ScriptBuilder};

/// Run the Easel CLI application
///
/// This function reads the scene file, paints it as a canvas script (or an
/// HTML page with `--html`), and writes the result to the output file or
/// stdout.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `EaselError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed scene files
/// - Unusable paint configuration
/// - Incomplete output in strict mode
pub fn run(args: &Args) -> Result<(), EaselError> {
    info!(
        input_path = args.input,
        output_path:? = args.output,
        html = args.html;
        "Processing scene"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process scene using ScriptBuilder API
    let builder = ScriptBuilder::new(app_config).with_strict(args.strict);
    let scene = builder.parse(&source)?;
    let output = if args.html {
        builder.render_html(&scene)?
    } else {
        builder.render_script(&scene)?
    };

    // Write output
    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path; "Output written successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
