// src/cli.rs
use std::io::Write;
use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};
use log::error;
use uuid::Uuid;

use crate::catalog;
use crate::flag::{parse_value, FlagDefinition, ValueType};
use crate::upsert::{UpsertOutcome, UpsertSummary, Upserter, ValueAssignment};
use crate::{AdminApi, AdminError, Client};

const RULE_WIDTH: usize = 80;

/// FeatureHub Admin - programmatic feature flag management
#[derive(Parser, Debug)]
#[command(name = "featurehub-admin")]
#[command(version)]
#[command(about = "FeatureHub Admin - programmatic feature flag management", long_about = None)]
pub struct Cli {
    /// FeatureHub Admin SDK base URL (e.g. https://app.featurehub.io/vanilla/{id})
    #[arg(short = 'u', long, global = true, env = "FEATUREHUB_ADMIN_SDK_URL")]
    pub base_url: Option<String>,

    /// Admin service account access token
    #[arg(
        short = 't',
        long,
        global = true,
        env = "FEATUREHUB_ADMIN_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Application UUID
    #[arg(short = 'a', long, global = true)]
    pub application_id: Option<String>,

    /// Environment UUID (only used to report default values that need setting)
    #[arg(short = 'e', long, global = true)]
    pub environment_id: Option<String>,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create all default feature flags
    CreateAll,
    /// Create a single feature flag
    Create {
        /// Feature key
        key: String,
        /// Feature name
        name: String,
        /// Feature description
        #[arg(short = 'd', long)]
        description: Option<String>,
        /// Feature type: BOOLEAN, STRING, NUMBER, JSON
        #[arg(short = 'T', long = "type", default_value = "BOOLEAN")]
        value_type: String,
        /// Default value
        #[arg(short = 'v', long)]
        value: Option<String>,
    },
    /// List all features for an application
    List,
}

struct Target {
    client: Client,
    application_id: Uuid,
    environment_id: Option<Uuid>,
}

fn parse_uuid(option: &str, raw: &str) -> Result<Uuid, AdminError> {
    Uuid::parse_str(raw.trim()).map_err(|e| {
        AdminError::ValidationError(format!("{} '{}' is not a UUID: {}", option, raw, e))
    })
}

fn required<'a>(option: &str, value: &'a Option<String>) -> Result<&'a str, AdminError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AdminError::ValidationError(format!("{} is required", option))),
    }
}

impl Cli {
    fn target(&self) -> Result<Target, AdminError> {
        let base_url = required("--base-url", &self.base_url)?;
        let token = required("--token", &self.token)?;
        let application_id = required("--application-id", &self.application_id)?;
        let application_id = parse_uuid("--application-id", application_id)?;
        let environment_id = self
            .environment_id
            .as_deref()
            .map(|raw| parse_uuid("--environment-id", raw))
            .transpose()?;

        let mut builder = Client::builder().with_base_url(base_url).with_token(token);
        if let Some(secs) = self.timeout_secs {
            builder = builder.with_timeout(Duration::from_secs(secs));
        }

        Ok(Target {
            client: builder.build()?,
            application_id,
            environment_id,
        })
    }
}

/// Builds the definition for the `create` subcommand without touching the network.
pub fn build_definition(
    key: &str,
    name: &str,
    description: Option<&str>,
    value_type: &str,
    value: Option<&str>,
) -> Result<FlagDefinition, AdminError> {
    let value_type: ValueType = value_type.parse()?;
    let mut definition = FlagDefinition::new(key, name, value_type);
    if let Some(description) = description {
        definition = definition.with_description(description);
    }
    if let Some(raw) = value {
        definition = definition.with_default_value(parse_value(raw, value_type)?);
    }
    Ok(definition)
}

/// Runs the parsed command line and returns the process exit code.
pub async fn run(cli: Cli, out: &mut impl Write) -> i32 {
    let command = match &cli.command {
        Some(command) => command,
        None => {
            return match Cli::command().write_help(out) {
                Ok(()) => 0,
                Err(e) => report_error("printing usage", &AdminError::from(e)),
            };
        }
    };

    let result = match command {
        Command::CreateAll => create_all(&cli, out).await,
        Command::Create {
            key,
            name,
            description,
            value_type,
            value,
        } => {
            let definition = build_definition(
                key,
                name,
                description.as_deref(),
                value_type,
                value.as_deref(),
            );
            match definition {
                Ok(definition) => create(&cli, &definition, out).await,
                Err(e) => Err(e),
            }
        }
        Command::List => list(&cli, out).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            report_error(&error_context(command, cli.application_id.as_deref()), &e)
        }
    }
}

/// Operation, key and application id of a failed command, for the error log.
pub(crate) fn error_context(command: &Command, application_id: Option<&str>) -> String {
    let operation = match command {
        Command::CreateAll => "creating feature flags".to_string(),
        Command::Create { key, .. } => format!("creating feature '{}'", key),
        Command::List => "listing features".to_string(),
    };
    match application_id {
        Some(id) => format!("{} for application {}", operation, id),
        None => operation,
    }
}

fn report_error(context: &str, e: &AdminError) -> i32 {
    error!("Error {}: {}", context, e);
    eprintln!("❌ Error: {}", e);
    1
}

fn rule(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn banner(out: &mut impl Write, title: &str) -> std::io::Result<()> {
    rule(out)?;
    writeln!(out, "{}", title)?;
    rule(out)
}

async fn create_all(cli: &Cli, out: &mut impl Write) -> Result<i32, AdminError> {
    let target = cli.target()?;

    banner(out, "CREATING ALL DEFAULT FEATURE FLAGS")?;
    writeln!(out, "Application ID: {}", target.application_id)?;
    match &target.environment_id {
        Some(id) => writeln!(out, "Environment ID: {}", id)?,
        None => writeln!(out, "Environment ID: (none)")?,
    }
    writeln!(out)?;

    let summary = Upserter::new(&target.client)
        .upsert_all(
            &target.application_id,
            target.environment_id.as_ref(),
            &catalog::default_flags(),
        )
        .await;

    write_summary(out, &summary)?;
    Ok(if summary.is_success() { 0 } else { 1 })
}

/// Renders the outcome of a bulk run.
pub fn write_summary(out: &mut impl Write, summary: &UpsertSummary) -> std::io::Result<()> {
    let created = summary.created();
    let existing = summary.existing();
    let failed = summary.failed();

    banner(out, "RESULTS")?;
    writeln!(out, "✅ Created: {} flags", created.len())?;
    writeln!(out, "⚠️  Already exists: {} flags", existing.len())?;
    writeln!(out, "❌ Failed: {} flags", failed.len())?;
    writeln!(out, "Total: {}", summary.total())?;
    writeln!(out)?;

    if !created.is_empty() {
        writeln!(out, "Created flags:")?;
        for key in &created {
            writeln!(out, "  ✅ {}", key)?;
        }
        writeln!(out)?;
    }

    if !existing.is_empty() {
        writeln!(out, "Already existing flags:")?;
        for key in &existing {
            writeln!(out, "  ⚠️  {}", key)?;
        }
        writeln!(out)?;
    }

    if !failed.is_empty() {
        writeln!(out, "Failed flags:")?;
        for (key, reason) in &failed {
            writeln!(out, "  ❌ {}: {}", key, reason)?;
        }
        writeln!(out)?;
    }

    let unassigned = summary.unassigned_values();
    if !unassigned.is_empty() {
        writeln!(out, "Default values not applied (environment values are unsupported,")?;
        writeln!(out, "set them via the dashboard):")?;
        for (key, value) in &unassigned {
            writeln!(out, "  • {} = {}", key, value)?;
        }
        writeln!(out)?;
    }

    rule(out)?;
    if failed.is_empty() {
        writeln!(out, "✅ Feature flag creation complete!")?;
    } else {
        writeln!(out, "❌ Feature flag creation finished with failures")?;
    }
    rule(out)
}

async fn create(
    cli: &Cli,
    definition: &FlagDefinition,
    out: &mut impl Write,
) -> Result<i32, AdminError> {
    let target = cli.target()?;

    let entry = Upserter::new(&target.client)
        .upsert(&target.application_id, target.environment_id.as_ref(), definition)
        .await;

    match &entry.outcome {
        UpsertOutcome::Created(_) => writeln!(out, "✅ Created feature: {}", entry.key)?,
        UpsertOutcome::AlreadyExists(_) => {
            writeln!(out, "⚠️  Feature already exists: {}", entry.key)?
        }
        UpsertOutcome::Failed(reason) => {
            writeln!(out, "❌ Failed to create feature: {}", entry.key)?;
            writeln!(out, "   Reason: {}", reason)?;
            return Ok(1);
        }
    }

    if let Some(flag) = entry.remote() {
        writeln!(out, "   ID: {}", flag.id.as_deref().unwrap_or("-"))?;
        writeln!(out, "   Name: {}", flag.name)?;
    }
    if let ValueAssignment::Unsupported { environment_id, value } = &entry.value_assignment {
        writeln!(
            out,
            "   Value {} was not applied to environment {}; set it via the dashboard",
            value, environment_id
        )?;
    }
    Ok(0)
}

async fn list(cli: &Cli, out: &mut impl Write) -> Result<i32, AdminError> {
    let target = cli.target()?;
    list_with(&target.client, &target.application_id, out).await
}

/// Prints every feature of an application.
pub async fn list_with<A: AdminApi + ?Sized>(
    api: &A,
    application_id: &Uuid,
    out: &mut impl Write,
) -> Result<i32, AdminError> {
    let features = api.list_flags(application_id).await?;

    banner(out, &format!("FEATURES FOR APPLICATION: {}", application_id))?;
    writeln!(out, "Total: {}", features.len())?;
    writeln!(out)?;

    for feature in &features {
        writeln!(out, "Key: {}", feature.key)?;
        writeln!(out, "  Name: {}", feature.name)?;
        match &feature.value_type {
            Some(value_type) => writeln!(out, "  Type: {}", value_type)?,
            None => writeln!(out, "  Type: -")?,
        }
        writeln!(out, "  ID: {}", feature.id.as_deref().unwrap_or("-"))?;
        writeln!(out)?;
    }
    Ok(0)
}
