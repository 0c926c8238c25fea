use listing_explorer::adapters::source::builtin::BuiltinSource;
use listing_explorer::domain::catalog::Catalog;
use listing_explorer::domain::listing::Listing;
use listing_explorer::domain::session::{Role, Session, UserProfile};
use listing_explorer::mcp::server::ExplorerMcpServer;
use listing_explorer::ports::listing_source::load_catalog;

use rmcp::ServerHandler;

fn tenant_session() -> Session {
    Session::signed_in(UserProfile {
        id: "u2".into(),
        name: "Sam Lee".into(),
        email: "sam@example.com".into(),
        role: Role::Tenant,
    })
}

#[tokio::test]
async fn server_builds_from_loaded_catalog() {
    let catalog = load_catalog(&BuiltinSource).await.unwrap();
    let server = ExplorerMcpServer::new(catalog, tenant_session());
    let info = server.get_info();
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.resources.is_some());
}

#[test]
fn server_accepts_empty_catalog() {
    let catalog = Catalog::new(Vec::<Listing>::new()).unwrap();
    let server = ExplorerMcpServer::new(catalog, Session::anonymous());
    assert!(server.get_info().capabilities.tools.is_some());
}
