use leptos::prelude::*;
use leptos_meta::provide_meta_context;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::pages::DemoPage;

/// Module script for the page shell. cargo-leptos emits `<output-name>.wasm`
/// (no `_bg` suffix), so the path has to be passed to `init` explicitly.
pub const LOADER_JS: &str = "import init from '/pkg/copy-code.js'; init({ module_or_path: '/pkg/copy-code.wasm' });";

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Router>
            <Routes fallback=|| view! { <p>"404 - Page not found"</p> }>
                <Route path=path!("/") view=DemoPage />
            </Routes>
        </Router>
    }
}
