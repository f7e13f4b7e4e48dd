//! Go interface code generation.
//!
//! This crate describes Go interfaces as plain values and renders them to
//! source text.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`interface`] - Interface and method descriptors
//! - [`types`] - Type expressions, parameters and package qualification
//! - [`imports`] - Import tracking and alias allocation
//! - [`file`] - Whole-file assembly
//! - [`naming`] - Go keywords and package alias guessing
//!
//! # Example
//!
//! ```
//! use ifacegen_codegen::{InterfaceDescriptor, MethodSignature, Param, TypeExpr};
//!
//! let greeter = InterfaceDescriptor::new(
//!     "example.com/greet",
//!     "Greeter",
//!     vec![
//!         MethodSignature::new("Greet")
//!             .param(Param::named("name", TypeExpr::string()))
//!             .returns(TypeExpr::string()),
//!     ],
//!     None,
//! );
//!
//! assert_eq!(
//!     greeter.build(),
//!     "type Greeter interface {\n\tGreet(name string) string\n}\n"
//! );
//! ```

pub mod builder;
pub mod file;
pub mod imports;
pub mod interface;
pub mod naming;
pub mod types;

pub use builder::{CodeBuilder, CodeFragment, Renderable};
pub use file::{GENERATED_HEADER, GoFile};
pub use imports::ImportSet;
pub use interface::{InterfaceDescriptor, MethodSignature, QualifiedRef};
pub use types::{ChanDir, DefaultQualifier, Param, Qualifier, TypeExpr};
