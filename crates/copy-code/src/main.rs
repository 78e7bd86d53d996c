#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use tower_http::compression::CompressionLayer;
    use tower_http::services::ServeDir;

    let conf = get_configuration(None).context("Failed to load Leptos configuration")?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(copy_code::app::App);

    let site_root = leptos_options.site_root.clone();
    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            move || {
                use copy_code::app::{App, LOADER_JS};
                view! {
                    <!DOCTYPE html>
                    <html lang="en">
                        <head>
                            <meta charset="utf-8" />
                            <meta name="viewport" content="width=device-width, initial-scale=1" />
                            <meta name="description" content="Copy-to-clipboard buttons for code blocks, written in Rust and compiled to WASM." />
                            <title>"copy-code demo"</title>
                            <link rel="stylesheet" href="/pkg/copy-code.css" />
                            <script type="module" inner_html=LOADER_JS></script>
                        </head>
                        <body>
                            <App />
                        </body>
                    </html>
                }
            }
        })
        .fallback_service(ServeDir::new(&*site_root))
        .layer(CompressionLayer::new())
        .with_state(leptos_options);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("[copy-code] Listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("[copy-code] Server error: {}", e);
        return Err(e).context("Server error");
    }

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // The browser side is the `hydrate` lib; only the demo server has a main.
}
