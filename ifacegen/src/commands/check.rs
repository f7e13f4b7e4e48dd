use clap::Args;
use eyre::Result;

use super::ManifestArgs;

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = self.manifest.load();

        println!(
            "✓ {} is valid: package {}, {} interface(s), {} method(s)",
            self.manifest.manifest.display(),
            manifest.package.name,
            manifest.interfaces.len(),
            manifest.method_count()
        );
        for iface in &manifest.interfaces {
            println!("  {} ({})", iface.name, iface.methods.len());
        }
        Ok(())
    }
}
