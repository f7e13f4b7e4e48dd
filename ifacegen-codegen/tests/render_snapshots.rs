//! Snapshot tests for rendered Go source.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use ifacegen_codegen::{GoFile, InterfaceDescriptor, MethodSignature, Param, TypeExpr};

fn user() -> TypeExpr {
    TypeExpr::qualified("github.com/acme/store", "User")
}

fn store() -> InterfaceDescriptor {
    InterfaceDescriptor::new(
        "github.com/acme/store",
        "Store",
        vec![
            MethodSignature::new("Get")
                .comment("Get loads a user by id.")
                .param(Param::named("ctx", TypeExpr::context()))
                .param(Param::named("id", TypeExpr::string()))
                .returns(TypeExpr::pointer(user()))
                .returns(TypeExpr::error()),
            MethodSignature::new("List")
                .param(Param::named("ctx", TypeExpr::context()))
                .param(Param::named(
                    "filters",
                    TypeExpr::variadic(TypeExpr::qualified("github.com/acme/store/query", "Filter")),
                ))
                .returns(Param::named("users", TypeExpr::slice(TypeExpr::pointer(user()))))
                .returns(Param::named("err", TypeExpr::error())),
            MethodSignature::new("Close")
                .comment("Close releases the connection pool.\n\nIt is safe to call more than once.")
                .returns(TypeExpr::error()),
        ],
        Some("Store persists users.".to_string()),
    )
}

fn watcher() -> InterfaceDescriptor {
    InterfaceDescriptor::new(
        "github.com/acme/store",
        "Watcher",
        vec![
            MethodSignature::new("Watch")
                .param(Param::named("ctx", TypeExpr::context()))
                .returns(TypeExpr::raw("<-chan Event")),
            MethodSignature::new("Stop"),
        ],
        None,
    )
}

#[test]
fn test_greeter_bare() {
    let greeter = InterfaceDescriptor::new(
        "example.com/greet",
        "Greeter",
        vec![
            MethodSignature::new("Greet")
                .param(Param::named("name", TypeExpr::string()))
                .returns(TypeExpr::string()),
        ],
        None,
    );
    insta::assert_snapshot!("greeter_bare", greeter.build());
}

#[test]
fn test_store_file() {
    let src = GoFile::new("store")
        .path("github.com/acme/store")
        .interfaces([store(), watcher()])
        .build();
    insta::assert_snapshot!("store_file", src);
}

#[test]
fn test_store_mock_package() {
    let src = GoFile::new("mocks").interface(store()).build();
    insta::assert_snapshot!("store_mock_package", src);
}

#[test]
fn test_rendering_twice_is_identical() {
    let file = GoFile::new("store").interfaces([store(), watcher()]);
    assert_eq!(file.build(), file.build());
}
