use anyhow::{Context, Result};
use tracing::info;

use acoff_cli::project::{
    ProjectPaths, field_choices, field_values, load_project, load_records, load_settings,
    render_script, resolve, selectors,
};

use crate::cli::{ChoicesArgs, InstrumentArgs, ProjectArgs, ResolveArgs, ScriptArgs, ValuesArgs};
use crate::summary::{print_choices, print_values};

fn project_paths(args: &ProjectArgs) -> ProjectPaths<'_> {
    ProjectPaths {
        dictionary: &args.dictionary,
        mapping: args.mapping.as_deref(),
        repeating: &args.repeating,
    }
}

pub fn run_script(args: &ScriptArgs) -> Result<()> {
    let target = &args.target;
    let project = load_project(project_paths(&target.project))?;
    let settings = load_settings(&target.settings)?;
    match render_script(&project, &settings, &target.instrument, args.survey) {
        Some(output) => print!("{output}"),
        None => info!(instrument = %target.instrument, "nothing to render"),
    }
    Ok(())
}

pub fn run_selectors(args: &InstrumentArgs) -> Result<()> {
    let project = load_project(project_paths(&args.project))?;
    let settings = load_settings(&args.settings)?;
    for selector in selectors(&project, &settings, &args.instrument)? {
        println!("{selector}");
    }
    Ok(())
}

pub fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let project = load_project(project_paths(&args.project))?;
    let records = load_records(&args.records, &project)?;
    let resolved = resolve(&project, &records, &args.record, &args.field, args.raw)?;
    let json = serde_json::to_string_pretty(&resolved).context("serialize resolved field")?;
    println!("{json}");
    Ok(())
}

pub fn run_values(args: &ValuesArgs) -> Result<()> {
    let project = load_project(project_paths(&args.project))?;
    let records = load_records(&args.records, &project)?;
    let rows = field_values(
        &project,
        &records,
        &args.field,
        args.by_date,
        args.descending,
    )?;
    print_values(&args.field, &rows);
    Ok(())
}

pub fn run_choices(args: &ChoicesArgs) -> Result<()> {
    let project = load_project(project_paths(&args.project))?;
    let choices = field_choices(&project, &args.field)?;
    print_choices(&args.field, &choices);
    Ok(())
}
