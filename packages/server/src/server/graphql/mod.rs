//! GraphQL surface: schema, context, and error mapping.

pub mod context;
pub mod schema;

pub use context::GraphQLContext;
pub use schema::{create_schema, Schema};

use juniper::{FieldError, Object, Value};

use crate::common::DomainError;

/// Map a domain error onto a GraphQL field error.
///
/// Validation failures carry their field violations in the error extensions
/// so the form layer can highlight individual inputs; everything else
/// becomes a coded message.
pub fn field_error(err: DomainError) -> FieldError {
    match err {
        DomainError::Validation(violations) => {
            let entries = violations
                .into_iter()
                .map(|v| {
                    let mut entry = Object::with_capacity(2);
                    entry.add_field("field", Value::scalar(v.field));
                    entry.add_field("message", Value::scalar(v.message));
                    Value::Object(entry)
                })
                .collect();
            let mut extensions = Object::with_capacity(2);
            extensions.add_field("code", Value::scalar("VALIDATION"));
            extensions.add_field("violations", Value::List(entries));
            FieldError::new("Validation failed", Value::Object(extensions))
        }
        DomainError::Conflict(message) => FieldError::new(message, coded("CONFLICT")),
        DomainError::NotFound(message) => FieldError::new(message, coded("NOT_FOUND")),
        DomainError::Upstream(message) => FieldError::new(message, coded("UPSTREAM")),
        DomainError::Database(e) => {
            tracing::error!(error = %e, "Database error in resolver");
            FieldError::new("Internal error", coded("INTERNAL"))
        }
        DomainError::Internal(e) => {
            tracing::error!(error = %e, "Internal error in resolver");
            FieldError::new("Internal error", coded("INTERNAL"))
        }
    }
}

fn coded(code: &str) -> Value {
    let mut extensions = Object::with_capacity(1);
    extensions.add_field("code", Value::scalar(code.to_string()));
    Value::Object(extensions)
}
