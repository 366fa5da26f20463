// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BDEngine inspector: decode a project, compute world transforms, print
//! the display entities.
//!
//! Usage:
//!   bdengine-inspect <path> [options]

use anyhow::Context;
use bdengine_engine::{
    display_entities, to_row_major, total_element_count, walk_forest, Element, Matrix4,
    SceneParser,
};
use std::path::PathBuf;

mod config;

use config::{Config, EncodingChoice};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,bdengine_engine=debug,bdengine_core=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return Ok(());
    }

    let path = PathBuf::from(&args[1]);
    let mut config = Config::from_env();

    for arg in &args[2..] {
        match arg.as_str() {
            "--json" => config.encoding = EncodingChoice::Json,
            "--container" => config.encoding = EncodingChoice::Container,
            "--fold-default-transforms" => config.fold_default_transforms = true,
            "--all" => config.show_all = true,
            other => anyhow::bail!("unknown option: {}", other),
        }
    }

    let encoding = config.encoding.resolve(&path);
    tracing::info!(
        path = %path.display(),
        ?encoding,
        policy = ?config.policy(),
        "Inspecting project"
    );

    let parser = SceneParser::with_policy(config.policy());
    let forest = parser
        .parse_file(&path, encoding)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let entities = display_entities(&forest);
    tracing::info!(
        roots = forest.len(),
        elements = total_element_count(&forest),
        display_entities = entities.len(),
        "Project loaded"
    );

    let selected: Vec<&Element> = if config.show_all {
        walk_forest(&forest).collect()
    } else {
        entities
    };

    for (index, element) in selected.iter().enumerate() {
        println!("[{}] {}", index, element);
        if let Some(world) = &element.world_transform {
            print_matrix(world, config.precision);
        }
    }

    Ok(())
}

fn print_matrix(matrix: &Matrix4<f64>, precision: usize) {
    let values = to_row_major(matrix);
    for row in values.chunks(4) {
        let cells: Vec<String> = row
            .iter()
            .map(|value| format!("{:>width$.precision$}", value, width = precision + 4))
            .collect();
        println!("    {}", cells.join(" "));
    }
}

fn print_usage() {
    println!("bdengine-inspect <path> [options]");
    println!();
    println!("Decodes a BDEngine project (.json or .bdengine) and prints the world");
    println!("transform of every display entity, row-major.");
    println!();
    println!("Options:");
    println!("  --json                     Force plain JSON decoding");
    println!("  --container                Force base64/gzip container decoding");
    println!("  --fold-default-transforms  Legacy propagation of collection default transforms");
    println!("  --all                      Print every element, not only display entities");
    println!();
    println!("Environment:");
    println!("  BDENGINE_ENCODING                auto | json | container (default auto)");
    println!("  BDENGINE_FOLD_DEFAULT_TRANSFORMS 1 to enable legacy propagation");
    println!("  BDENGINE_PRECISION               decimal places (default 6)");
    println!("  RUST_LOG                         tracing filter");
}
