// simpleform - declarative form schemas with per-field validation state
//
// A schema (compact strings such as "*email|you@example.com" or descriptor
// objects) is parsed once into FieldSpecs. A SimpleForm then owns one
// FieldState per spec and updates it on change, blur, option toggle and submit.

pub mod config;
pub mod error;
pub mod form;
pub mod schema;
pub mod state;
pub mod timer;
pub mod validation;
pub mod view;

// Re-export core types
pub use config::{AnimationConfig, FormConfig, FormTexts};
pub use error::{FormError, SchemaError};
pub use form::{
    BannerReveal, ChangeOutcome, ErrorBanner, FieldId, FormValues, SimpleForm, SubmitOutcome,
    SubmitReport,
};
pub use schema::{
    humanize_key, parse_type_str, ChangeHook, CompactSpec, FieldOverrides, FieldSpec, FieldType,
    Schema, SchemaEntry, Validator,
};
pub use state::FieldState;
pub use timer::{spawn_banner_reveal, submit_shared, SharedForm};
pub use validation::{check_field, Verdict};
pub use view::{FieldStatus, FieldView, FormView};
