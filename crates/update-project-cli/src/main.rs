//! Update Project CLI
//!
//! Runs the Jira "update project" step once, taking step inputs from flags
//! or a JSON file and connection settings from the environment.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use update_project_core::{LayeredEnvironment, MapEnvironment, ProcessEnvironment, StepInputs};
use update_project_jira::{project_result_template, UpdateProjectStep};

#[derive(Parser, Debug)]
#[command(name = "update-project")]
#[command(about = "Update a Jira project and print the reduced result", long_about = None)]
struct Args {
    /// Project id or key to update
    #[arg(long)]
    project_id_or_key: Option<String>,

    /// Comma separated list of properties to expand in the response
    #[arg(long)]
    expand: Option<String>,

    /// New project name
    #[arg(long)]
    name: Option<String>,

    /// New project description
    #[arg(long)]
    description: Option<String>,

    /// Project category id
    #[arg(long)]
    category_id: Option<i64>,

    /// Project URL
    #[arg(long)]
    url: Option<String>,

    /// Username of the project lead
    #[arg(long)]
    lead: Option<String>,

    /// JSON file holding step inputs; flags take precedence
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// JSON file holding jira_* settings, consulted before the process environment
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn step_inputs(&self) -> Result<StepInputs> {
        let mut inputs = match &self.inputs {
            Some(path) => StepInputs::load(path)
                .with_context(|| format!("Failed to read inputs from {}", path.display()))?,
            None => StepInputs::new(),
        };

        let flags: [(&str, Option<Value>); 7] = [
            ("projectIdOrKey", self.project_id_or_key.clone().map(Value::from)),
            ("expand", self.expand.clone().map(Value::from)),
            ("name", self.name.clone().map(Value::from)),
            ("description", self.description.clone().map(Value::from)),
            ("categoryId", self.category_id.map(Value::from)),
            ("url", self.url.clone().map(Value::from)),
            ("lead", self.lead.clone().map(Value::from)),
        ];
        for (name, value) in flags {
            if let Some(value) = value {
                inputs.set(name, value);
            }
        }

        Ok(inputs)
    }

    fn environment(&self) -> Result<MapEnvironment> {
        match &self.env_file {
            Some(path) => MapEnvironment::load(path)
                .with_context(|| format!("Failed to read environment from {}", path.display())),
            None => Ok(MapEnvironment::new()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // stdout carries the result, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(&args.log_level)
        .init();

    let inputs = args.step_inputs()?;
    let env = LayeredEnvironment::new(args.environment()?, ProcessEnvironment);
    let step = UpdateProjectStep::new(project_result_template());

    tracing::debug!("Running update-project step");
    match step.run(&inputs, &env).await {
        Ok(result) => {
            let output = result.unwrap_or(Value::Null);
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
