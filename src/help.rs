//! Renders the HTML help page listing every registered primitive and the
//! current variable store, served for `GET /`.

use crate::debug::{escape_html, render_vars_table, HTML_FOOTER, HTML_HEADER};
use crate::engine::Engine;
use crate::registry::REGISTRY;

fn render_funcs_table() -> String {
    let mut entries: Vec<_> = REGISTRY.iter().collect();
    entries.sort_by_key(|(name, _)| *name);

    let mut out = String::from(
        "<table><thead><tr><th>Stack In</th><th>Function</th><th>Stack Out</th><th>Description</th></tr></thead><tbody>\n",
    );
    for (name, info) in entries {
        out.push_str(&format!(
            "<tr><td>{}</td><td><b>{}</b></td><td>{}</td><td>{}</td></tr>\n",
            escape_html(info.input),
            escape_html(name),
            escape_html(info.output),
            escape_html(info.desc)
        ));
    }
    out.push_str("</tbody></table>\n");
    out
}

pub fn render(engine: &Engine) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(HTML_HEADER);
    out.push_str("<h1>hashsrv</h1>");
    out.push_str("hashsrv is a web service that performs hashing, encryption, encoding, and compression. Available functions include:");
    out.push_str(&render_funcs_table());
    out.push_str(&render_vars_table(engine.variables()));
    out.push_str(HTML_FOOTER);
    out.into_bytes()
}
