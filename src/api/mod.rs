mod chain;
mod health;
pub mod models;
mod nodes;
mod tx;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::web::{self, ServiceConfig};
use actix_web::{HttpRequest, HttpResponse, ResponseError};

use crate::error::NodeError;
use models::ErrorResponse;

/// Mount every route at the root; peers call `/chain`, `/transactions/new`
/// and `/blocks/new` on each other by those exact paths.
pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(health::health_check)
        .service(chain::get_chain)
        .service(chain::validate_chain)
        .service(chain::mine_block)
        .service(chain::new_block)
        .service(tx::post_transaction)
        .service(tx::get_pending)
        .service(nodes::register_nodes)
        .service(nodes::list_nodes)
        .service(nodes::resolve);
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse {
        error: err.to_string(),
    };
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

impl ResponseError for NodeError {
    fn status_code(&self) -> StatusCode {
        match self {
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            NodeError::StaleHead { .. } => StatusCode::CONFLICT,
            NodeError::Peer { .. } | NodeError::UnusableResponse { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
