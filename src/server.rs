use crate::{
    classifier::Classifier,
    config::{AssetsConfig, Config},
    routes::{analyze, healthcheck, homepage},
};
use axum::{
    extract::DefaultBodyLimit,
    http::header::{HeaderName, CONTENT_TYPE},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::broadcast::Receiver, task::JoinHandle};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

#[derive(Clone)]
pub struct SharedState {
    pub classifier: Arc<dyn Classifier>,
    pub assets: AssetsConfig,
}

pub fn build_router(state: SharedState, max_body_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([HeaderName::from_static("x-requested-with"), CONTENT_TYPE]);

    let static_dir = state.assets.static_dir.clone();

    Router::new()
        .route("/", get(homepage))
        .route("/analyze", post(analyze))
        .route("/health_check", get(healthcheck))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors)
        .with_state(state)
}

pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    pub async fn new(classifier: Arc<dyn Classifier>, config: &Config) -> anyhow::Result<Self> {
        let addr = config.server.get_address();

        let app_state = SharedState {
            classifier,
            assets: config.assets.clone(),
        };

        let router = build_router(app_state, config.server.max_body_bytes);

        let listener = TcpListener::bind(addr).await?;

        Ok(Self { router, listener })
    }

    pub async fn run(
        self,
        shutdown_rx: Receiver<()>,
    ) -> anyhow::Result<JoinHandle<anyhow::Result<()>>> {
        tracing::info!("Starting app on {}", &self.listener.local_addr()?);

        let listener = self.listener;
        let router = self.router;
        let server_handle = tokio::spawn({
            let mut shutdown_rx = shutdown_rx.resubscribe();
            async move {
                let server = axum::serve(listener, router);
                server
                    .with_graceful_shutdown(async move {
                        shutdown_rx.recv().await.ok();
                    })
                    .await?;
                Ok(())
            }
        });

        Ok(server_handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Classifier, ClassifierError};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;
    use std::path::PathBuf;
    use tower::ServiceExt;

    /// Resolves the top-left pixel to a label so concurrent requests can
    /// be told apart; rejects anything that does not decode.
    struct PixelClassifier;

    #[async_trait]
    impl Classifier for PixelClassifier {
        async fn classify(&self, image_data: &[u8]) -> Result<String, ClassifierError> {
            let img = image::load_from_memory(image_data)
                .map_err(|e| ClassifierError::ImageDecode(e.to_string()))?;
            let pixel = img.to_rgb8().get_pixel(0, 0).0;
            Ok(format!("label_{}", pixel[0]))
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl Classifier for FailingClassifier {
        async fn classify(&self, _image_data: &[u8]) -> Result<String, ClassifierError> {
            Err(ClassifierError::Inference("session exploded".to_string()))
        }
    }

    fn test_router(classifier: Arc<dyn Classifier>) -> Router {
        let state = SharedState {
            classifier,
            assets: AssetsConfig {
                static_dir: PathBuf::from("./static"),
                index_file: PathBuf::from("./static/index.html"),
            },
        };
        build_router(state, 1024 * 1024)
    }

    fn png_bytes(red: u8) -> Vec<u8> {
        let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(8, 8, Rgb([red, 0, 0]));
        let mut image_data: Vec<u8> = Vec::new();
        img.write_to(&mut Cursor::new(&mut image_data), image::ImageFormat::Png)
            .unwrap();
        image_data
    }

    fn multipart_request(field_name: &str, payload: &[u8]) -> Request<Body> {
        let boundary = "test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
                 filename=\"upload.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn analyze_returns_result_json() {
        let router = test_router(Arc::new(PixelClassifier));

        let response = router
            .oneshot(multipart_request("file", &png_bytes(42)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({ "result": "label_42" }));
    }

    #[tokio::test]
    async fn analyze_rejects_undecodable_payload_and_keeps_serving() {
        let router = test_router(Arc::new(PixelClassifier));

        let response = router
            .clone()
            .oneshot(multipart_request("file", b"not an image"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // The next request on the same router still succeeds.
        let response = router
            .oneshot(multipart_request("file", &png_bytes(7)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn analyze_requires_a_file_field() {
        let router = test_router(Arc::new(PixelClassifier));

        let response = router
            .oneshot(multipart_request("attachment", &png_bytes(1)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analyze_maps_classifier_failure_to_internal_error() {
        let router = test_router(Arc::new(FailingClassifier));

        let response = router
            .oneshot(multipart_request("file", &png_bytes(1)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn concurrent_analyze_requests_get_their_own_results() {
        let router = test_router(Arc::new(PixelClassifier));

        let handles: Vec<_> = (0..10u8)
            .map(|i| {
                let router = router.clone();
                tokio::spawn(async move {
                    let response = router
                        .oneshot(multipart_request("file", &png_bytes(i)))
                        .await
                        .unwrap();
                    (i, body_json(response).await)
                })
            })
            .collect();

        for handle in handles {
            let (i, json) = handle.await.unwrap();
            assert_eq!(json["result"], format!("label_{}", i));
        }
    }

    #[tokio::test]
    async fn homepage_serves_the_index_unchanged_by_analyze_calls() {
        let router = test_router(Arc::new(PixelClassifier));
        let expected = std::fs::read_to_string("./static/index.html").unwrap();

        let home_request = || Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = router.clone().oneshot(home_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, expected.as_bytes());

        let response = router
            .clone()
            .oneshot(multipart_request("file", &png_bytes(3)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router.oneshot(home_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, expected.as_bytes());
    }

    #[tokio::test]
    async fn static_assets_are_passed_through() {
        let router = test_router(Arc::new(PixelClassifier));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/static/style.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, std::fs::read("./static/style.css").unwrap());
    }

    #[tokio::test]
    async fn healthcheck_is_available() {
        let router = test_router(Arc::new(PixelClassifier));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health_check")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
