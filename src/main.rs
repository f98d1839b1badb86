use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use dotenvy::dotenv;
use log::info;

use ledger_node::api;
use ledger_node::config::NodeConfig;
use ledger_node::network::HttpTransport;
use ledger_node::node::Node;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = NodeConfig::parse();

    let transport = HttpTransport::new(config.peer_timeout())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let node = Node::new(Arc::new(transport));
    node.register_peers(&config.peers)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    info!(
        "⛓️ Starting ledger node {} at http://{}:{} (peers: {:?})",
        node.id(),
        config.host,
        config.port,
        node.peers()
    );

    let state = web::Data::new(node);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
