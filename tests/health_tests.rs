use anyhow::Result;

use housekeeping::health;

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, health::router()).await;
    });

    let response = reqwest::get(format!("http://{addr}/health")).await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await?, "OK");

    let missing = reqwest::get(format!("http://{addr}/status")).await?;
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}
