use crate::domain::{
    entities::{ProjectStructure, ServiceSelection},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Entities validate themselves at construction; this is the single entry
/// point the application layer calls before acting on one.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_selection(selection: &ServiceSelection) -> Result<(), DomainError> {
        selection.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
