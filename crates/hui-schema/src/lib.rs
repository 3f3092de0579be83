//! # hui-schema — Element Schemas & Validation
//!
//! Provides the JSON Schema side of annotation element validation: the
//! host's shared sub-schemas, its baseline element schemas, the textbox
//! schema builder, and the registry / validator pair plugins patch at
//! startup.
//!
//! ## Components
//!
//! - [`shared`] — named sub-schemas (user, label, group, coordinate, color).
//! - [`baseline`] — arrow, circle, ellipse, point, polyline, rectangle and
//!   rectanglegrid schemas.
//! - [`textbox`] — [`build_textbox_schema`], the closed textbox fragment.
//! - [`registry`] — the ordered `anyOf` list, unique per element type.
//! - [`validate`] — [`ElementValidator`], compiled with Draft 6 semantics.
//! - [`host`] — [`AnnotationSchemaHost`] and its idempotent patch.
//! - [`audit`] — reports element fragments that accept undeclared fields.
//!
//! ## Two ways to extend
//!
//! Compose once and compile an immutable validator:
//!
//! ```
//! use hui_schema::{build_textbox_schema, ElementSchemaRegistry, ElementValidator, SharedSchemas};
//!
//! let shared = SharedSchemas::large_image();
//! let registry = ElementSchemaRegistry::large_image(&shared)?
//!     .with_fragment(build_textbox_schema(&shared)?)?;
//! let validator = ElementValidator::compile(&registry)?;
//! assert!(validator.supports_type("textbox"));
//! # Ok::<(), hui_schema::SchemaError>(())
//! ```
//!
//! or patch a live host, which is what plugins do at load time:
//!
//! ```
//! use hui_schema::{AnnotationSchemaHost, PatchOutcome};
//!
//! let host = AnnotationSchemaHost::large_image()?;
//! assert_eq!(host.patch_textbox()?, PatchOutcome::Registered);
//! assert_eq!(host.patch_textbox()?, PatchOutcome::AlreadyRegistered);
//! # Ok::<(), hui_schema::SchemaError>(())
//! ```

pub mod audit;
pub mod baseline;
pub mod error;
pub mod host;
pub mod registry;
pub mod shared;
pub mod textbox;
pub mod validate;

pub use audit::{audit_closed_fragment, OpenSchemaFinding};
pub use error::SchemaError;
pub use host::{AnnotationSchemaHost, PatchOutcome};
pub use registry::{fragment_type_names, ElementSchemaRegistry};
pub use shared::SharedSchemas;
pub use textbox::{build_textbox_schema, TEXTBOX_TYPE};
pub use validate::{ElementValidator, SchemaValidationError, ValidationViolations, Violation};
