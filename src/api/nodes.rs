use actix_web::{HttpResponse, Responder, get, post, web};

use super::models::{NodesResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};
use crate::error::NodeError;
use crate::node::Node;

/// Register peer addresses (normalized before storing).
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<Node>,
    body: web::Json<RegisterNodesRequest>,
) -> Result<HttpResponse, NodeError> {
    let nodes = body
        .into_inner()
        .nodes
        .ok_or(NodeError::MissingField("nodes"))?;
    let total_nodes = state.register_peers(&nodes)?;

    Ok(HttpResponse::Created().json(RegisterNodesResponse {
        message: format!("{} peer address(es) registered", nodes.len()),
        total_nodes,
    }))
}

#[get("/nodes")]
pub async fn list_nodes(state: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().json(NodesResponse {
        nodes: state.peers(),
    })
}

/// Run the consensus pass on demand.
#[get("/nodes/resolve")]
pub async fn resolve(state: web::Data<Node>) -> impl Responder {
    let replaced = state.resolve().await;
    let chain = state.chain();
    let message = if replaced {
        "chain was replaced"
    } else {
        "chain is authoritative"
    };

    HttpResponse::Ok().json(ResolveResponse {
        message: message.to_string(),
        replaced,
        length: chain.len(),
        chain,
    })
}
