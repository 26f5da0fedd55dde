//! Fixed catalog of project templates.

use serde::Serialize;

/// Read-only description of a project template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
    /// Stable template identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Headline features.
    pub features: &'static [&'static str],
}

const TEMPLATES: [TemplateDescriptor; 4] = [
    TemplateDescriptor {
        id: "fastapi",
        name: "FastAPI",
        description: "Python FastAPI REST API with async support",
        features: &["REST API", "Async", "Auto-docs", "Type hints"],
    },
    TemplateDescriptor {
        id: "react",
        name: "React + Vite",
        description: "Modern React app with Vite and TailwindCSS",
        features: &["React 18", "Vite", "TailwindCSS", "Hot reload"],
    },
    TemplateDescriptor {
        id: "nodejs",
        name: "Node.js Express",
        description: "Express.js REST API with TypeScript",
        features: &["Express", "TypeScript", "JWT Auth", "Middleware"],
    },
    TemplateDescriptor {
        id: "fastapi-ml",
        name: "FastAPI + MLflow",
        description: "ML inference API with model tracking",
        features: &["FastAPI", "MLflow", "Model serving", "Tracking"],
    },
];

/// Returns every available template in display order.
#[must_use]
pub const fn templates() -> &'static [TemplateDescriptor] {
    &TEMPLATES
}

/// Looks up a template by identifier.
#[must_use]
pub fn find_template(id: &str) -> Option<&'static TemplateDescriptor> {
    TEMPLATES.iter().find(|template| template.id == id)
}
