use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;

use super::models::{MessageResponse, MineResponse, NewBlockRequest, ValidateResponse};
use crate::error::NodeError;
use crate::network::ChainSnapshot;
use crate::node::Node;

/// Get the full chain with its length.
#[get("/chain")]
pub async fn get_chain(state: web::Data<Node>) -> impl Responder {
    let chain = state.chain();
    HttpResponse::Ok().json(ChainSnapshot {
        length: chain.len(),
        chain,
    })
}

/// Validate the local chain.
#[get("/chain/validate")]
pub async fn validate_chain(state: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().json(ValidateResponse {
        valid: state.is_chain_valid(),
        length: state.chain_len(),
    })
}

/// Mine a block from the pending pool, announce it and reconcile.
#[get("/mine")]
pub async fn mine_block(state: web::Data<Node>) -> Result<HttpResponse, NodeError> {
    let block = state.mine().await?;
    info!("MINER - block #{} mined (proof={})", block.index, block.proof);

    Ok(HttpResponse::Ok().json(MineResponse {
        message: "new block forged".to_string(),
        node: state.id().to_string(),
        index: block.index,
        timestamp: block.timestamp,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    }))
}

/// Accept a block announced by a peer, then reconcile.
#[post("/blocks/new")]
pub async fn new_block(
    state: web::Data<Node>,
    body: web::Json<NewBlockRequest>,
) -> Result<HttpResponse, NodeError> {
    let block = body.into_inner().into_block()?;
    let index = block.index;
    let replaced = state.append_external_block(block).await;

    let message = if replaced {
        format!("block #{index} received; chain replaced by a longer peer chain")
    } else {
        format!("block #{index} added to the chain")
    };
    Ok(HttpResponse::Created().json(MessageResponse { message }))
}
