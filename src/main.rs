//! Command-line entry point.
//!
//! Usage: `tender-economics <project.yaml>`
//!
//! Reads a project file, runs the economics calculation and any listed
//! scenarios, and prints the results as JSON on stdout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info, warn};

use tender_economics::config::{AppConfig, ConfigError, ReferenceDataError};
use tender_economics::domain::analysis::{
    EconomicsOrchestrator, MarketComparator, Scenario, ScenarioEngine,
};
use tender_economics::domain::economics::{EconomicsResult, ProjectConfigSpec};
use tender_economics::domain::foundation::{EconomicsError, Money};

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: tender-economics <project.yaml>")]
    Usage,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] ReferenceDataError),

    #[error(transparent)]
    Economics(#[from] EconomicsError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Project file layout.
#[derive(Debug, Deserialize)]
struct ProjectFile {
    contract_amount: Money,
    #[serde(default)]
    template: Option<String>,
    project: ProjectConfigSpec,
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

#[derive(Debug, Serialize)]
struct ScenarioReport {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<EconomicsResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct Report {
    result: EconomicsResult,
    scenarios: Vec<ScenarioReport>,
}

fn init_tracing(config: &AppConfig) -> Result<(), ConfigError> {
    let filter = config.logging.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn read_project(path: &Path) -> Result<ProjectFile, ReferenceDataError> {
    let yaml = std::fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_str(&yaml)?)
}

fn run(path: PathBuf, config: &AppConfig) -> Result<Report, CliError> {
    let reference = config.reference_data()?;
    let templates = reference.template_catalog();
    let comparator = MarketComparator::new(reference.benchmark_catalog());

    let project = read_project(&path)?;
    let mut builder = project.project.into_builder();
    if let Some(name) = &project.template {
        let template = templates.get(name).map_err(EconomicsError::from)?;
        builder = builder.template(template);
    }
    let project_config = builder.build().map_err(EconomicsError::from)?;

    let orchestrator = EconomicsOrchestrator::new(config.analysis.clone());
    let base = orchestrator
        .calculate(project.contract_amount, project_config.clone())
        .map_err(EconomicsError::from)?;
    let result = match EconomicsOrchestrator::annotate(base.clone(), &comparator) {
        Ok(annotated) => annotated,
        Err(err) => {
            warn!(%err, "Skipping market comparison");
            base
        }
    };

    let engine = ScenarioEngine::new(EconomicsOrchestrator::new(config.analysis.clone()));
    let scenarios = engine
        .run_batch_parallel(&project_config, project.contract_amount, &project.scenarios)
        .into_iter()
        .zip(&project.scenarios)
        .map(|(outcome, scenario)| match outcome {
            Ok(result) => ScenarioReport {
                name: scenario.name.clone(),
                result: Some(result),
                error: None,
            },
            Err(err) => ScenarioReport {
                name: scenario.name.clone(),
                result: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    Ok(Report { result, scenarios })
}

fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("Invalid configuration: {}", err);
        return ExitCode::FAILURE;
    }
    if let Err(err) = init_tracing(&config) {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    let outcome = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or(CliError::Usage)
        .and_then(|path| {
            info!(path = %path.display(), "Evaluating project file");
            run(path, &config)
        })
        .and_then(|report| Ok(serde_json::to_string_pretty(&report)?));

    match outcome {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "Evaluation failed");
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
