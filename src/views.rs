use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use log::{error, warn};

use crate::errors::AdmissionError;
use crate::metrics;
use crate::AffinityMutator;

// Simple health check endpoint
pub async fn health(_req: HttpRequest) -> HttpResponse {
    HttpResponse::new(StatusCode::OK)
}

// Decide on an affinity for the incoming pod and answer with the patching AdmissionReview
pub async fn mutate(data: web::Data<AffinityMutator>, body: web::Bytes) -> Result<HttpResponse, AdmissionError> {
    match data.review(&body) {
        Ok(review) => Ok(HttpResponse::Ok().content_type("application/json").body(review)),
        Err(err) => {
            if err.is_client_error() {
                warn!("Rejected admission review: {}", err);
            } else {
                error!("Failed to build admission response: {}", err);
            }
            metrics::error_happened(err.name());
            Err(err)
        }
    }
}

/// Register the webhook routes, shared by the server and the tests.
pub fn configure(mutator: web::Data<AffinityMutator>, max_body_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(mutator)
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .service(web::resource("/health").route(web::get().to(health)))
            .service(web::resource("/mutate").route(web::post().to(mutate)));
    }
}
