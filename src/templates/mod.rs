//! Project template catalog and generation requests.

mod catalog;
mod generation;

pub use catalog::{TemplateDescriptor, find_template, templates};
pub use generation::{
    GenerateTemplateRequest, GenerationAck, GenerationStatus, TemplateError, request_generation,
};
