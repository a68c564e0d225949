use crate::helpers::{json, spawn_app};

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app();

    let response = app.get("/health", None).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(json(response).await["status"], "ok");
}
