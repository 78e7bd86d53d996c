use leptos::prelude::*;

/// A `<pre><code>` block, the shape the copy buttons attach to
#[component]
pub fn CodeBlock(
    /// Language hint, rendered as a `language-*` class
    #[prop(into)]
    language: String,
    /// Literal source text
    #[prop(into)]
    code: String,
) -> impl IntoView {
    view! {
        <pre>
            <code class=format!("language-{}", language)>{code}</code>
        </pre>
    }
}
