use super::project::{ClassificationArgs, ProjectFile};
use super::render;
use crate::config::ConfigTable;
use crate::engine;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Show the artifact checklist for a classification
pub fn run(
    config: &ConfigTable,
    project: Option<&Path>,
    args: &ClassificationArgs,
    json: bool,
) -> Result<()> {
    let mut classification = match project {
        Some(path) => ProjectFile::load(path)?.inputs.classification(),
        None => Default::default(),
    };
    args.apply_to(&mut classification);

    let artifacts = engine::build_artifacts(config, &classification);

    if json {
        println!("{}", serde_json::to_string_pretty(&artifacts)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "📋 Artifacts for {} / {} PMO",
            classification.methodology, classification.pmo_type
        )
        .cyan()
        .bold()
    );
    render::print_artifacts(&artifacts);
    Ok(())
}
