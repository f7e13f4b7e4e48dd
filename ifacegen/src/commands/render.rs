use std::io::Write;

use clap::Args;
use eyre::{Context, Result, bail};
use ifacegen_codegen::{GoFile, ImportSet, InterfaceDescriptor};
use ifacegen_manifest::Manifest;

use super::ManifestArgs;

#[derive(Args)]
pub struct RenderCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Print only the interface declarations, without package clause or imports
    #[arg(long)]
    pub bare: bool,

    /// Omit the "Code generated ... DO NOT EDIT." header
    #[arg(long)]
    pub no_header: bool,

    /// Render only the named interface (repeatable)
    #[arg(short, long = "interface", value_name = "NAME")]
    pub interfaces: Vec<String>,
}

impl RenderCommand {
    /// Run the render command
    pub fn run(&self) -> Result<()> {
        let manifest = self.manifest.load();
        let source = self.render(&manifest)?;

        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(source.as_bytes())
            .wrap_err("Failed to write generated source")?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(package = %manifest.package.name))]
    fn render(&self, manifest: &Manifest) -> Result<String> {
        let descriptors = self.select(manifest.descriptors())?;
        tracing::debug!(count = descriptors.len(), "rendering interfaces");

        let import_path = manifest.package.import_path();
        if self.bare {
            let local = ImportSet::new().with_local(import_path);
            let blocks: Vec<String> = descriptors.iter().map(|d| d.build_with(&local)).collect();
            return Ok(blocks.join("\n"));
        }

        let mut file = GoFile::new(&manifest.package.name)
            .path(import_path)
            .interfaces(descriptors);
        if self.no_header {
            file = file.without_header();
        }
        Ok(file.build())
    }

    /// Keep the requested interfaces, in manifest order.
    fn select(&self, descriptors: Vec<InterfaceDescriptor>) -> Result<Vec<InterfaceDescriptor>> {
        if self.interfaces.is_empty() {
            return Ok(descriptors);
        }
        for name in &self.interfaces {
            if !descriptors.iter().any(|d| d.name() == name) {
                bail!("Interface '{}' is not defined in the manifest", name);
            }
        }
        Ok(descriptors
            .into_iter()
            .filter(|d| self.interfaces.iter().any(|name| name == d.name()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, str::FromStr};

    use super::*;

    const MANIFEST: &str = r#"
[package]
name = "store"
path = "github.com/acme/store"

[[interfaces]]
name = "Store"
comment = "Store persists users."

[[interfaces.methods]]
name = "Get"
params = [{ name = "ctx", type = "context.Context" }, { name = "id", type = "string" }]
returns = [{ type = "*github.com/acme/store.User" }, { type = "error" }]

[[interfaces]]
name = "Closer"

[[interfaces.methods]]
name = "Close"
returns = [{ type = "error" }]
"#;

    fn command() -> RenderCommand {
        RenderCommand {
            manifest: ManifestArgs {
                manifest: PathBuf::from("ifacegen.toml"),
            },
            bare: false,
            no_header: true,
            interfaces: Vec::new(),
        }
    }

    #[test]
    fn test_render_file() {
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let source = command().render(&manifest).unwrap();
        assert_eq!(
            source,
            "package store\n\nimport \"context\"\n\n// Store persists users.\ntype Store interface {\n\tGet(ctx context.Context, id string) (*User, error)\n}\n\ntype Closer interface {\n\tClose() error\n}\n"
        );
    }

    #[test]
    fn test_render_bare_selected() {
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let cmd = RenderCommand {
            bare: true,
            interfaces: vec!["Closer".to_string()],
            ..command()
        };
        assert_eq!(
            cmd.render(&manifest).unwrap(),
            "type Closer interface {\n\tClose() error\n}\n"
        );
    }

    #[test]
    fn test_bare_matches_file_qualification() {
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let cmd = RenderCommand {
            bare: true,
            interfaces: vec!["Store".to_string()],
            ..command()
        };
        let bare = cmd.render(&manifest).unwrap();
        assert!(bare.contains("Get(ctx context.Context, id string) (*User, error)"));
        assert!(command().render(&manifest).unwrap().contains(&bare));
    }

    #[test]
    fn test_package_without_path_does_not_import_itself() {
        let src = r#"
[package]
name = "store"

[[interfaces]]
name = "S"

[[interfaces.methods]]
name = "Get"
returns = [{ type = "*store.User" }]
"#;
        let manifest = Manifest::from_str(src).unwrap();
        assert_eq!(
            command().render(&manifest).unwrap(),
            "package store\n\ntype S interface {\n\tGet() *User\n}\n"
        );
    }

    #[test]
    fn test_render_unknown_interface() {
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let cmd = RenderCommand {
            interfaces: vec!["Missing".to_string()],
            ..command()
        };
        let err = cmd.render(&manifest).unwrap_err();
        assert!(err.to_string().contains("'Missing'"));
    }
}
