//! Optional Prometheus middleware.
//!
//! Prometheus collection is decided at startup, but `App::wrap` needs one
//! concrete middleware type. [`MetricsLayer`] boxes both outcomes behind the
//! same transform so the factory closure stays monomorphic.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::PrometheusMetrics;
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;

type BoxedShipmentService = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

/// Request metrics middleware, or a pass-through when collection is off.
#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Disabled, |inner| Self::Enabled(Arc::new(inner)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxedShipmentService;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self {
            Self::Enabled(metrics) => {
                let pending = Compat::new((**metrics).clone()).new_transform(service);
                Box::pin(async move { Ok(boxed::service(pending.await?)) })
            }
            Self::Disabled => {
                let passthrough =
                    service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Box::pin(async move { Ok(boxed::service(passthrough)) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use actix_web_prom::PrometheusMetricsBuilder;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[actix_rt::test]
    async fn disabled_layer_passes_requests_through() {
        let app = actix_test::init_service(
            App::new()
                .wrap(MetricsLayer::from_option(None))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/ping").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_rt::test]
    async fn enabled_layer_serves_the_metrics_endpoint() {
        let prometheus = PrometheusMetricsBuilder::new("shipments_test")
            .endpoint("/metrics")
            .build()
            .expect("prometheus middleware");
        let app = actix_test::init_service(
            App::new()
                .wrap(MetricsLayer::from_option(Some(prometheus)))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let ping =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/ping").to_request())
                .await;
        assert_eq!(ping.status(), StatusCode::OK);
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/metrics").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
