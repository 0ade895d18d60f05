// src/upsert.rs
use log::{error, info, warn};
use uuid::Uuid;

use crate::flag::{FlagDefinition, FlagValue, RemoteFlag};
use crate::AdminApi;

#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    Created(RemoteFlag),
    AlreadyExists(RemoteFlag),
    Failed(String),
}

/// What happened to a requested environment default value.
///
/// FeatureHub environment values are not written by this tool; a requested
/// value is reported back as `Unsupported` so the caller can tell the operator
/// to set it in the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueAssignment {
    NotRequested,
    Unsupported { environment_id: Uuid, value: FlagValue },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpsertEntry {
    pub key: String,
    pub outcome: UpsertOutcome,
    pub value_assignment: ValueAssignment,
}

impl UpsertEntry {
    pub fn remote(&self) -> Option<&RemoteFlag> {
        match &self.outcome {
            UpsertOutcome::Created(flag) | UpsertOutcome::AlreadyExists(flag) => Some(flag),
            UpsertOutcome::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, UpsertOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpsertSummary {
    pub entries: Vec<UpsertEntry>,
}

impl UpsertSummary {
    pub fn created(&self) -> Vec<&str> {
        self.keys_where(|o| matches!(o, UpsertOutcome::Created(_)))
    }

    pub fn existing(&self) -> Vec<&str> {
        self.keys_where(|o| matches!(o, UpsertOutcome::AlreadyExists(_)))
    }

    pub fn failed(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .filter_map(|e| match &e.outcome {
                UpsertOutcome::Failed(reason) => Some((e.key.as_str(), reason.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn unassigned_values(&self) -> Vec<(&str, &FlagValue)> {
        self.entries
            .iter()
            .filter_map(|e| match &e.value_assignment {
                ValueAssignment::Unsupported { value, .. } => Some((e.key.as_str(), value)),
                ValueAssignment::NotRequested => None,
            })
            .collect()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn is_success(&self) -> bool {
        !self.entries.iter().any(UpsertEntry::is_failed)
    }

    fn keys_where(&self, pred: impl Fn(&UpsertOutcome) -> bool) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| pred(&e.outcome))
            .map(|e| e.key.as_str())
            .collect()
    }
}

/// Create-if-absent provisioning on top of an [`AdminApi`].
pub struct Upserter<'a, A: AdminApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: AdminApi + Sync + ?Sized> Upserter<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    pub async fn upsert(
        &self,
        application_id: &Uuid,
        environment_id: Option<&Uuid>,
        definition: &FlagDefinition,
    ) -> UpsertEntry {
        let outcome = self.ensure_exists(application_id, definition).await;

        let value_assignment = match (&outcome, environment_id, &definition.default_value) {
            (UpsertOutcome::Failed(_), _, _) => ValueAssignment::NotRequested,
            (_, Some(environment_id), Some(value)) => {
                assign_default_value(environment_id, definition, value)
            }
            _ => ValueAssignment::NotRequested,
        };

        UpsertEntry {
            key: definition.key.clone(),
            outcome,
            value_assignment,
        }
    }

    pub async fn upsert_all(
        &self,
        application_id: &Uuid,
        environment_id: Option<&Uuid>,
        definitions: &[FlagDefinition],
    ) -> UpsertSummary {
        let mut summary = UpsertSummary::default();
        for definition in definitions {
            let entry = self.upsert(application_id, environment_id, definition).await;
            summary.entries.push(entry);
        }
        summary
    }

    async fn ensure_exists(
        &self,
        application_id: &Uuid,
        definition: &FlagDefinition,
    ) -> UpsertOutcome {
        let existing = match self.api.list_flags(application_id).await {
            Ok(flags) => flags,
            Err(e) => {
                error!(
                    "Listing features for application {} before creating '{}' failed: {}",
                    application_id, definition.key, e
                );
                return UpsertOutcome::Failed(format!("listing flags: {}", e));
            }
        };

        // First match wins if the service ever reports a key twice.
        if let Some(flag) = existing.into_iter().find(|f| f.key == definition.key) {
            info!("Feature '{}' already exists, leaving it unchanged", definition.key);
            return UpsertOutcome::AlreadyExists(flag);
        }

        match self.api.create_flag(application_id, definition).await {
            Ok(flag) => UpsertOutcome::Created(flag),
            Err(e) => {
                error!(
                    "Creating feature '{}' for application {} failed: {}",
                    definition.key, application_id, e
                );
                UpsertOutcome::Failed(e.to_string())
            }
        }
    }
}

// Environment values are set through the FeatureHub dashboard for now.
fn assign_default_value(
    environment_id: &Uuid,
    definition: &FlagDefinition,
    value: &FlagValue,
) -> ValueAssignment {
    warn!(
        "Not setting '{}' = {} in environment {}: environment values are unsupported, \
         set it via the dashboard",
        definition.key,
        value,
        environment_id
    );
    ValueAssignment::Unsupported {
        environment_id: *environment_id,
        value: value.clone(),
    }
}
