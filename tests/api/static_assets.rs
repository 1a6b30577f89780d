use crate::helpers::spawn_app;

#[tokio::test]
async fn root_serves_index() {
    let app = spawn_app().await;

    let resp = app.get("/").await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.text().await.unwrap().contains(r#"<div id="root">"#));
}

/// Client-side routes fall back to `index.html`
#[tokio::test]
async fn unknown_paths_fall_back_to_index() {
    let app = spawn_app().await;

    for path in ["/links", "/some/deep/route", "/missing.js"] {
        let resp = app.get(path).await;
        assert_eq!(resp.status().as_u16(), 200, "{path}");
        assert!(
            resp.text().await.unwrap().contains(r#"<div id="root">"#),
            "{path}"
        );
    }
}

#[tokio::test]
async fn missing_static_dir_is_not_found() {
    let app = crate::helpers::spawn_app_with(|cfg| {
        cfg.application.static_dir = "does-not-exist".into();
    })
    .await;

    let resp = app.get("/links").await;
    assert_eq!(resp.status().as_u16(), 404);
}
