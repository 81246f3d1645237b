pub mod fields;
pub mod form;
pub mod payload;

pub use fields::{ControlKind, Field, FieldInput, UnknownField};
pub use form::FormValues;
pub use payload::SubmissionPayload;
