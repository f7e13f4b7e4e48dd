//! Interface manifests for ifacegen.
//!
//! A manifest (`ifacegen.toml`, or JSON with the same shape) lists the
//! interfaces of one Go package. Parsing validates names and types and
//! reports problems as [`miette`] diagnostics; [`Manifest::descriptors`]
//! lowers the result into [`ifacegen_codegen::InterfaceDescriptor`]s.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod type_expr;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    Format, InterfaceDef, Manifest, MethodDef, PackageConfig, ParamDef, ParseContext,
    parse_manifest,
};
pub use type_expr::parse_type;
