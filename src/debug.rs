//! Human-readable HTML trace of a pipeline run. When debug mode is on, the
//! trace replaces the normal byte result and every `exec` step records the
//! incoming stack snapshot, the matched primitive's `(in, name, out)`, and
//! literal-push events.

use tracing::debug;

use crate::engine::Engine;
use crate::error::EngineError;

pub const HTML_HEADER: &str = r#"<html>
<head>
<title>hashsrv</title>
<style>
body {
	font-family: "Lucida Sans Unicode", "Lucida Grande", Sans-Serif;
	font-size: 14px;
}
h2 {
	font-family: "Lucida Sans Unicode", "Lucida Grande", Sans-Serif;
	font-size: 16px;
}
table
{
	font-family: "Lucida Sans Unicode", "Lucida Grande", Sans-Serif;
	font-size: 12px;
	margin: 45px;
	width: 800px;
	text-align: left;
	border-collapse: collapse;
	border: 1px solid #69c;
}
th
{
	padding: 12px 17px 12px 17px;
	font-weight: normal;
	font-size: 14px;
	color: #039;
	border-bottom: 1px dashed #69c;
}
td
{
	padding: 7px 17px 7px 17px;
	color: #669;
}
td.fixed
{
	width: 260px;
	padding: 7px 17px 7px 17px;
	color: #669;
	word-break: break-all;
}
tbody tr:hover td
{
	color: #339;
	background: #d0dafd;
}
</style>
</head>
<body>"#;

pub const HTML_FOOTER: &str = "\n</body>\n</html>";

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders a byte buffer the way the reference trace does: a quoted,
/// escaped text rendition alongside a lowercase space-separated hex dump.
pub fn render_bytes(b: &[u8]) -> (String, String) {
    let text = escape_html(&format!("{:?}", String::from_utf8_lossy(b)));
    let hex = b
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ");
    (text, hex)
}

pub fn render_stack_table(rows: &[Vec<u8>]) -> String {
    let mut out = String::from(
        "<table><thead><tr><th>Position</th><th>Length</th><th>Text</th><th>Bytes</th></tr></thead><tbody>\n",
    );
    for (i, v) in rows.iter().enumerate() {
        let (text, hex) = render_bytes(v);
        out.push_str(&format!(
            "<tr><td>{i}</td><td>{}</td><td class=\"fixed\">{text}</td><td>{hex}</td></tr>\n",
            v.len()
        ));
    }
    out.push_str("</tbody></table>\n");
    out
}

pub fn render_vars_table<'a>(vars: impl Iterator<Item = (&'a String, &'a Vec<u8>)>) -> String {
    let mut out = String::from(
        "Variables:<table><thead><tr><th>Name</th><th>Length</th><th>Text</th><th>Bytes</th></tr></thead><tbody>\n",
    );
    for (name, v) in vars {
        let (text, hex) = render_bytes(v);
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"fixed\">{text}</td><td>{hex}</td></tr>\n",
            escape_html(name),
            v.len()
        ));
    }
    out.push_str("</tbody></table>\n");
    out
}

impl Engine {
    pub(crate) fn log(&mut self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        debug!("{msg}");
        if self.debug_mode {
            self.log_buf
                .push_str(&format!("<h2>{}</h2>", escape_html(msg)));
        }
    }

    pub(crate) fn logf(&mut self, msg: impl AsRef<str>) {
        self.log(msg)
    }

    pub(crate) fn log_error(&mut self, err: &EngineError) {
        let msg = err.to_string();
        if self.debug_mode {
            self.log_buf
                .push_str(&format!("<h2>error: {}</h2>", escape_html(&msg)));
        }
    }

    pub(crate) fn log_stack(&mut self) {
        debug!(depth = self.stack.len(), "stack");
        if self.debug_mode {
            let snapshot = self.stack.snapshot().to_vec();
            let table = render_stack_table(&snapshot);
            self.log_buf.push_str(&table);
        }
    }
}
