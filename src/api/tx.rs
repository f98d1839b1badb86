use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{NewTransactionRequest, NewTransactionResponse, PendingResponse};
use crate::error::NodeError;
use crate::network::RELAY_HEADER;
use crate::node::Node;

/// Queue a transaction for the next block. Client submissions are relayed
/// to peers; submissions carrying the relay header are not.
#[post("/transactions/new")]
pub async fn post_transaction(
    req: HttpRequest,
    state: web::Data<Node>,
    body: web::Json<NewTransactionRequest>,
) -> Result<HttpResponse, NodeError> {
    let tx = body.into_inner().into_transaction()?;
    let relayed = req.headers().contains_key(RELAY_HEADER);
    debug!(
        "POST /transactions/new - {} -> {} ({}), relayed={}",
        tx.sender, tx.recipient, tx.amount, relayed
    );

    let position = state.submit_transaction(tx, relayed).await;
    Ok(HttpResponse::Created().json(NewTransactionResponse {
        message: format!("transaction will be added to block {position}"),
        position,
        pending: state.pending_transactions().len(),
    }))
}

/// List transactions waiting for the next block.
#[get("/transactions/pending")]
pub async fn get_pending(state: web::Data<Node>) -> impl Responder {
    let transactions = state.pending_transactions();
    HttpResponse::Ok().json(PendingResponse {
        size: transactions.len(),
        transactions,
    })
}
