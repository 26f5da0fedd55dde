//! Diesel schema for platform record persistence.

diesel::table! {
    /// Projects, unique by name.
    projects (id) {
        /// Surrogate key.
        id -> Int8,
        /// Unique human-readable name.
        #[max_length = 100]
        name -> Varchar,
        /// Application template kind.
        project_type -> Text,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Optional source repository location.
        repository_url -> Nullable<Text>,
        /// Lifecycle status (`initializing`, `active`, `archived`, `error`).
        #[max_length = 50]
        status -> Varchar,
        /// Opaque project configuration.
        config -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Deployments of project versions.
    deployments (id) {
        /// Surrogate key.
        id -> Int8,
        /// Owning project.
        project_id -> Int8,
        /// Deployed version label.
        version -> Text,
        /// Target environment (`dev`, `staging`, `prod`).
        #[max_length = 50]
        environment -> Varchar,
        /// Deployment status (`pending`, `success`, `failed`, `rollback`).
        #[max_length = 50]
        status -> Varchar,
        /// Optional source commit.
        commit_sha -> Nullable<Text>,
        /// Optional actor that requested the deployment.
        deployed_by -> Nullable<Text>,
        /// Creation timestamp.
        deployed_at -> Timestamptz,
        /// Optional run time in seconds.
        duration_seconds -> Nullable<Int8>,
        /// Optional deployment logs.
        logs -> Nullable<Text>,
        /// Optional failure description.
        error_message -> Nullable<Text>,
    }
}

diesel::table! {
    /// Software bill of materials scans.
    sboms (id) {
        /// Surrogate key.
        id -> Int8,
        /// Owning project.
        project_id -> Int8,
        /// Scanned version label.
        version -> Text,
        /// Full scan payload.
        sbom_data -> Jsonb,
        /// Total vulnerabilities.
        vulnerabilities_count -> Int4,
        /// Critical vulnerabilities.
        critical_count -> Int4,
        /// High severity vulnerabilities.
        high_count -> Int4,
        /// Medium severity vulnerabilities.
        medium_count -> Int4,
        /// Low severity vulnerabilities.
        low_count -> Int4,
        /// Score between 0 and 100.
        security_score -> Float8,
        /// Scan timestamp.
        generated_at -> Timestamptz,
        /// Scanner name.
        scan_tool -> Text,
    }
}

diesel::table! {
    /// Runtime metric samples.
    metrics (id) {
        /// Surrogate key.
        id -> Int8,
        /// Owning project.
        project_id -> Int8,
        /// CPU usage percentage.
        cpu_usage -> Nullable<Float8>,
        /// Memory usage percentage.
        memory_usage -> Nullable<Float8>,
        /// Disk usage percentage.
        disk_usage -> Nullable<Float8>,
        /// Request rate.
        requests_per_minute -> Int8,
        /// Error rate percentage.
        error_rate -> Float8,
        /// Mean response time in milliseconds.
        avg_response_time -> Nullable<Float8>,
        /// Sample timestamp.
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Machine-learning model registrations.
    ml_models (id) {
        /// Surrogate key.
        id -> Int8,
        /// Owning project.
        project_id -> Int8,
        /// Model name.
        name -> Text,
        /// Model version.
        version -> Text,
        /// Training framework.
        framework -> Nullable<Text>,
        /// Problem type.
        model_type -> Nullable<Text>,
        /// Tracking experiment identifier.
        experiment_id -> Nullable<Text>,
        /// Tracking run identifier.
        run_id -> Nullable<Text>,
        /// Artifact location.
        artifact_uri -> Nullable<Text>,
        /// Accuracy score.
        accuracy -> Nullable<Float8>,
        /// Precision score.
        precision -> Nullable<Float8>,
        /// Recall score.
        recall -> Nullable<Float8>,
        /// F1 score.
        f1_score -> Nullable<Float8>,
        /// Drift flag stored as `true` or `false`.
        #[max_length = 5]
        drift_detected -> Varchar,
        /// Drift magnitude.
        drift_score -> Nullable<Float8>,
        /// Registration timestamp.
        registered_at -> Timestamptz,
        /// Most recent prediction timestamp.
        last_prediction_at -> Nullable<Timestamptz>,
        /// Opaque model metadata.
        metadata -> Nullable<Jsonb>,
    }
}

diesel::table! {
    /// Automation pipeline definitions.
    pipelines (id) {
        /// Surrogate key.
        id -> Int8,
        /// Owning project.
        project_id -> Int8,
        /// Pipeline name.
        name -> Text,
        /// Pipeline type (`ci`, `cd`, `security`, `ml`).
        #[max_length = 50]
        pipeline_type -> Varchar,
        /// Execution state (`idle`, `running`, `success`, `failed`).
        #[max_length = 50]
        status -> Varchar,
        /// Pipeline configuration.
        config -> Jsonb,
        /// Start of the most recent run.
        last_run_at -> Nullable<Timestamptz>,
        /// Duration of the most recent run in seconds.
        last_run_duration -> Nullable<Int8>,
        /// Share of successful runs.
        success_rate -> Float8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(deployments -> projects (project_id));
diesel::joinable!(sboms -> projects (project_id));
diesel::joinable!(metrics -> projects (project_id));
diesel::joinable!(ml_models -> projects (project_id));
diesel::joinable!(pipelines -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(
    projects,
    deployments,
    sboms,
    metrics,
    ml_models,
    pipelines,
);
