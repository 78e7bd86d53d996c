use leptos::prelude::*;

use crate::components::CodeBlock;

/// (language, source) pairs rendered on the demo page.
pub const SAMPLES: &[(&str, &str)] = &[
    (
        "rust",
        "fn main() {\n    println!(\"hello from a copyable block\");\n}",
    ),
    ("shell", "cargo leptos watch"),
    (
        "toml",
        "[package.metadata.leptos]\noutput-name = \"copy-code\"\nsite-addr = \"127.0.0.1:3000\"",
    ),
];

#[component]
pub fn DemoPage() -> impl IntoView {
    view! {
        <main>
            <h1>"copy-code"</h1>
            <p>"Hover a code block and press the button in its corner to copy it."</p>

            {SAMPLES
                .iter()
                .map(|(language, code)| view! { <CodeBlock language=*language code=*code /> })
                .collect_view()}

            // Only matched by a descendant selector such as `pre code`,
            // and then skipped with a console warning.
            <h2>"Not eligible"</h2>
            <pre>
                <div class="wrapped">
                    <code>"wrapped() // no button: the <code> is not a direct child of <pre>"</code>
                </div>
            </pre>
        </main>
    }
}
