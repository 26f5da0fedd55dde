//! Diesel row models for platform record persistence.

use super::schema::{deployments, metrics, ml_models, pipelines, projects, sboms};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for projects.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Surrogate key.
    pub id: i64,
    /// Unique name.
    pub name: String,
    /// Application template kind.
    pub project_type: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional repository location.
    pub repository_url: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Opaque configuration.
    pub config: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for projects.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Unique name.
    pub name: String,
    /// Application template kind.
    pub project_type: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional repository location.
    pub repository_url: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Opaque configuration.
    pub config: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Full overwrite of the mutable project columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectChangeset {
    /// Unique name.
    pub name: String,
    /// Application template kind.
    pub project_type: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional repository location.
    pub repository_url: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Opaque configuration.
    pub config: Option<Value>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for deployments.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = deployments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeploymentRow {
    /// Surrogate key.
    pub id: i64,
    /// Owning project.
    pub project_id: i64,
    /// Version label.
    pub version: String,
    /// Target environment.
    pub environment: String,
    /// Deployment status.
    pub status: String,
    /// Optional source commit.
    pub commit_sha: Option<String>,
    /// Optional requesting actor.
    pub deployed_by: Option<String>,
    /// Creation timestamp.
    pub deployed_at: DateTime<Utc>,
    /// Optional run time in seconds.
    pub duration_seconds: Option<i64>,
    /// Optional logs.
    pub logs: Option<String>,
    /// Optional failure description.
    pub error_message: Option<String>,
}

/// Insert model for deployments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = deployments)]
pub struct NewDeploymentRow {
    /// Owning project.
    pub project_id: i64,
    /// Version label.
    pub version: String,
    /// Target environment.
    pub environment: String,
    /// Deployment status.
    pub status: String,
    /// Optional source commit.
    pub commit_sha: Option<String>,
    /// Optional requesting actor.
    pub deployed_by: Option<String>,
    /// Creation timestamp.
    pub deployed_at: DateTime<Utc>,
}

/// Query result row for SBOM scans.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sboms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SbomRow {
    /// Surrogate key.
    pub id: i64,
    /// Owning project.
    pub project_id: i64,
    /// Scanned version label.
    pub version: String,
    /// Full scan payload.
    pub sbom_data: Value,
    /// Total vulnerabilities.
    pub vulnerabilities_count: i32,
    /// Critical vulnerabilities.
    pub critical_count: i32,
    /// High severity vulnerabilities.
    pub high_count: i32,
    /// Medium severity vulnerabilities.
    pub medium_count: i32,
    /// Low severity vulnerabilities.
    pub low_count: i32,
    /// Security score.
    pub security_score: f64,
    /// Scan timestamp.
    pub generated_at: DateTime<Utc>,
    /// Scanner name.
    pub scan_tool: String,
}

/// Insert model for SBOM scans.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sboms)]
pub struct NewSbomRow {
    /// Owning project.
    pub project_id: i64,
    /// Scanned version label.
    pub version: String,
    /// Full scan payload.
    pub sbom_data: Value,
    /// Total vulnerabilities.
    pub vulnerabilities_count: i32,
    /// Critical vulnerabilities.
    pub critical_count: i32,
    /// High severity vulnerabilities.
    pub high_count: i32,
    /// Medium severity vulnerabilities.
    pub medium_count: i32,
    /// Low severity vulnerabilities.
    pub low_count: i32,
    /// Security score.
    pub security_score: f64,
    /// Scan timestamp.
    pub generated_at: DateTime<Utc>,
    /// Scanner name.
    pub scan_tool: String,
}

/// Query result row for metric samples.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = metrics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MetricRow {
    /// Surrogate key.
    pub id: i64,
    /// Owning project.
    pub project_id: i64,
    /// CPU usage percentage.
    pub cpu_usage: Option<f64>,
    /// Memory usage percentage.
    pub memory_usage: Option<f64>,
    /// Disk usage percentage.
    pub disk_usage: Option<f64>,
    /// Request rate.
    pub requests_per_minute: i64,
    /// Error rate percentage.
    pub error_rate: f64,
    /// Mean response time in milliseconds.
    pub avg_response_time: Option<f64>,
    /// Sample timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Insert model for metric samples.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = metrics)]
pub struct NewMetricRow {
    /// Owning project.
    pub project_id: i64,
    /// CPU usage percentage.
    pub cpu_usage: Option<f64>,
    /// Memory usage percentage.
    pub memory_usage: Option<f64>,
    /// Disk usage percentage.
    pub disk_usage: Option<f64>,
    /// Request rate.
    pub requests_per_minute: i64,
    /// Error rate percentage.
    pub error_rate: f64,
    /// Mean response time in milliseconds.
    pub avg_response_time: Option<f64>,
    /// Sample timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Query result row for model registrations.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ml_models)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MlModelRow {
    /// Surrogate key.
    pub id: i64,
    /// Owning project.
    pub project_id: i64,
    /// Model name.
    pub name: String,
    /// Model version.
    pub version: String,
    /// Training framework.
    pub framework: Option<String>,
    /// Problem type.
    pub model_type: Option<String>,
    /// Tracking experiment identifier.
    pub experiment_id: Option<String>,
    /// Tracking run identifier.
    pub run_id: Option<String>,
    /// Artifact location.
    pub artifact_uri: Option<String>,
    /// Accuracy score.
    pub accuracy: Option<f64>,
    /// Precision score.
    pub precision: Option<f64>,
    /// Recall score.
    pub recall: Option<f64>,
    /// F1 score.
    pub f1_score: Option<f64>,
    /// Drift flag.
    pub drift_detected: String,
    /// Drift magnitude.
    pub drift_score: Option<f64>,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
    /// Most recent prediction timestamp.
    pub last_prediction_at: Option<DateTime<Utc>>,
    /// Opaque metadata.
    pub metadata: Option<Value>,
}

/// Insert model for model registrations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ml_models)]
pub struct NewMlModelRow {
    /// Owning project.
    pub project_id: i64,
    /// Model name.
    pub name: String,
    /// Model version.
    pub version: String,
    /// Training framework.
    pub framework: Option<String>,
    /// Problem type.
    pub model_type: Option<String>,
    /// Tracking experiment identifier.
    pub experiment_id: Option<String>,
    /// Tracking run identifier.
    pub run_id: Option<String>,
    /// Artifact location.
    pub artifact_uri: Option<String>,
    /// Accuracy score.
    pub accuracy: Option<f64>,
    /// Precision score.
    pub precision: Option<f64>,
    /// Recall score.
    pub recall: Option<f64>,
    /// F1 score.
    pub f1_score: Option<f64>,
    /// Drift flag.
    pub drift_detected: String,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
    /// Opaque metadata.
    pub metadata: Option<Value>,
}

/// Query result row for pipelines.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pipelines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PipelineRow {
    /// Surrogate key.
    pub id: i64,
    /// Owning project.
    pub project_id: i64,
    /// Pipeline name.
    pub name: String,
    /// Pipeline type.
    pub pipeline_type: String,
    /// Execution state.
    pub status: String,
    /// Pipeline configuration.
    pub config: Value,
    /// Start of the most recent run.
    pub last_run_at: Option<DateTime<Utc>>,
    /// Duration of the most recent run in seconds.
    pub last_run_duration: Option<i64>,
    /// Share of successful runs.
    pub success_rate: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for pipelines.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pipelines)]
pub struct NewPipelineRow {
    /// Owning project.
    pub project_id: i64,
    /// Pipeline name.
    pub name: String,
    /// Pipeline type.
    pub pipeline_type: String,
    /// Execution state.
    pub status: String,
    /// Pipeline configuration.
    pub config: Value,
    /// Share of successful runs.
    pub success_rate: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
