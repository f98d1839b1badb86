use actix_web::{HttpResponse, Responder, get, web};

use crate::node::Node;

#[get("/health")]
pub async fn health_check(state: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().body(format!("ledger node {} is up and running 🦀", state.id()))
}
