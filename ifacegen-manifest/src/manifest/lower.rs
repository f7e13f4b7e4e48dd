//! Lowering of a validated manifest into interface descriptors.

use ifacegen_codegen::{InterfaceDescriptor, MethodSignature, Param, TypeExpr};

use super::{InterfaceDef, Manifest, MethodDef, ParamDef};
use crate::type_expr::parse_type;

impl Manifest {
    /// Build one descriptor per interface, in declaration order.
    pub fn descriptors(&self) -> Vec<InterfaceDescriptor> {
        let package = self.package.import_path();
        self.interfaces
            .iter()
            .map(|iface| iface.descriptor(package))
            .collect()
    }
}

impl InterfaceDef {
    /// Build the descriptor for this interface, living in `package`.
    pub fn descriptor(&self, package: &str) -> InterfaceDescriptor {
        InterfaceDescriptor::new(
            package,
            &self.name,
            self.methods.iter().map(MethodDef::signature).collect(),
            self.comment.clone(),
        )
    }
}

impl MethodDef {
    /// Build the signature for this method.
    pub fn signature(&self) -> MethodSignature {
        let signature = MethodSignature::new(&self.name)
            .params(self.params.iter().map(ParamDef::param))
            .returns_all(self.returns.iter().map(ParamDef::param));
        match &self.comment {
            Some(comment) => signature.comment(comment),
            None => signature,
        }
    }
}

impl ParamDef {
    /// Build the parameter; a type that does not parse is kept verbatim.
    pub fn param(&self) -> Param {
        let ty = parse_type(&self.ty).unwrap_or_else(|_| TypeExpr::raw(self.ty.trim()));
        match &self.name {
            Some(name) => Param::named(name, ty),
            None => Param::unnamed(ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use ifacegen_codegen::GoFile;

    use super::*;

    const STORE: &str = r#"
[package]
name = "store"
path = "github.com/acme/store"

[[interfaces]]
name = "Store"
comment = "Store persists users."

[[interfaces.methods]]
name = "Get"
comment = "Get loads a user by id."
params = [{ name = "ctx", type = "context.Context" }, { name = "id", type = "string" }]
returns = [{ type = "*github.com/acme/store.User" }, { type = "error" }]

[[interfaces.methods]]
name = "Close"

[[interfaces]]
name = "Empty"
"#;

    #[test]
    fn test_descriptors_in_order() {
        let manifest = Manifest::from_str(STORE).unwrap();
        let descriptors = manifest.descriptors();

        let names: Vec<_> = descriptors.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["Store", "Empty"]);
        assert_eq!(descriptors[0].qualified().package, "github.com/acme/store");
        assert_eq!(descriptors[0].doc(), Some("Store persists users."));

        let methods: Vec<_> = descriptors[0].methods().iter().map(|m| m.name()).collect();
        assert_eq!(methods, vec!["Get", "Close"]);
    }

    #[test]
    fn test_descriptor_renders() {
        let manifest = Manifest::from_str(STORE).unwrap();
        let store = &manifest.descriptors()[0];
        assert_eq!(
            store.build(),
            "// Store persists users.\ntype Store interface {\n\t// Get loads a user by id.\n\tGet(ctx context.Context, id string) (*store.User, error)\n\tClose()\n}\n"
        );
    }

    #[test]
    fn test_param_types_parsed() {
        let def = ParamDef {
            name: Some("users".to_string()),
            ty: "map[string][]*model.User".to_string(),
        };
        assert_eq!(
            def.param(),
            Param::named(
                "users",
                TypeExpr::map(
                    TypeExpr::string(),
                    TypeExpr::slice(TypeExpr::pointer(TypeExpr::qualified("model", "User")))
                )
            )
        );
    }

    #[test]
    fn test_func_param_imports_its_packages() {
        let src = r#"
[package]
name = "p"

[[interfaces]]
name = "Runner"

[[interfaces.methods]]
name = "Run"
params = [{ name = "f", type = "func(ctx context.Context) error" }]
"#;
        let manifest = Manifest::from_str(src).unwrap();
        let file = GoFile::new("p")
            .path(manifest.package.import_path())
            .without_header()
            .interfaces(manifest.descriptors())
            .build();
        assert_eq!(
            file,
            "package p\n\nimport \"context\"\n\ntype Runner interface {\n\tRun(f func(ctx context.Context) error)\n}\n"
        );
    }

    #[test]
    fn test_unparseable_type_kept_verbatim() {
        let def = ParamDef {
            name: None,
            ty: " [x]int ".to_string(),
        };
        assert_eq!(def.param(), Param::unnamed(TypeExpr::raw("[x]int")));
    }
}
