//! scenebridge-attr-core: turns scene-engine parameter declarations into
//! host-native attribute trees (engine-agnostic, host behind a trait).

pub mod builder;
pub mod compound;
pub mod config;
pub mod declared;
pub mod error;
pub mod host;
pub mod options;
pub mod range;
pub mod registry;
pub mod request;
pub mod table;
pub mod variant;

pub use builder::{finalize_flags, AttributeBuilder, Outcome};
pub use config::BuilderConfig;
pub use declared::{classify_type, Cardinality, Classified, DeclaredType, PortMode, TypeSpec};
pub use error::BuildError;
pub use host::{AttributeFlags, AttributeHost, NumericKind, TypedDataKind};
pub use options::{AttributeOptions, ScalarUnit};
pub use range::{resolve_range, NumericRange};
pub use registry::{AttrId, AttributeKind, AttributeNode, AttributeRegistry};
pub use request::{AttributeDeclaration, AttributeRequest};
pub use table::{legal_cardinalities, strategy_for, Strategy};
pub use variant::{Variant, VariantKind};
