//! # HTML Pages
//!
//! Server-rendered pages for the human-facing flow: upload form, intake
//! result, verification, and the explicit not-found page. Every
//! interpolated value goes through [`escape`].

use crate::issuer::IssuedProof;
use crate::resolver::{content_url, qr_url, VerificationView};

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:720px;margin:2rem auto;padding:0 1rem}\
code{word-break:break-all}img.original{max-width:600px;width:100%;border:1px solid #ddd}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Upload form.
pub fn index() -> String {
    layout(
        "RealSnap",
        "<h2>RealSnap</h2>\n\
<p>Upload an image to get a verification link and QR code.</p>\n\
<form action=\"/api/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
<input type=\"file\" name=\"file\" accept=\"image/*\" required>\n\
<button type=\"submit\">Upload</button>\n\
</form>",
    )
}

/// Intake result: verification link, inline QR, QR file, original.
pub fn issued(proof: &IssuedProof) -> String {
    let record = &proof.record;
    let verify = escape(&record.verify_ref);
    let qr_file = escape(&qr_url(&record.id));
    let original = escape(&content_url(record));
    let body = format!(
        "<h2>Upload OK</h2>\n\
<p><b>Verification link:</b> <a href=\"{verify}\" target=\"_blank\">{verify}</a></p>\n\
<p><b>SHA-256:</b> <code>{hash}</code></p>\n\
<p><b>QR code:</b></p>\n\
<img src=\"{qr}\" alt=\"QR code for {verify}\" width=\"320\" height=\"320\">\n\
<p>QR file: <a href=\"{qr_file}\" target=\"_blank\">{qr_file}</a></p>\n\
<p>Original file: <a href=\"{original}\" target=\"_blank\">{original}</a></p>\n\
<p><a href=\"/\">Back</a></p>",
        hash = record.integrity_hash.to_hex(),
        qr = escape(&proof.qr.data_url()),
    );
    layout("Upload OK", &body)
}

/// Verification page for a found record.
pub fn verification(view: &VerificationView) -> String {
    let record = &view.record;
    let original = escape(&view.content_url);
    let media_type = record
        .media_type
        .as_deref()
        .map(|m| format!("<p><b>Type:</b> {}</p>\n", escape(m)))
        .unwrap_or_default();
    let body = format!(
        "<h2>Verified by RealSnap</h2>\n\
<p><b>ID:</b> <code>{id}</code></p>\n\
<p><b>SHA-256:</b> <code>{hash}</code></p>\n\
<p><b>Recorded:</b> {created}</p>\n\
<p><b>Size:</b> {size} bytes</p>\n\
{media_type}\
<p><b>Stored original:</b></p>\n\
<img class=\"original\" src=\"{original}\" alt=\"original upload\">\n\
<p><a href=\"{original}\" target=\"_blank\">Open the original</a> · \
<a href=\"{qr}\" target=\"_blank\">QR code</a></p>",
        id = record.id,
        hash = record.integrity_hash.to_hex(),
        created = record.created_at,
        size = record.size_bytes,
        qr = escape(&view.qr_url),
    );
    layout("Verified by RealSnap", &body)
}

/// Explicit negative outcome for an unknown identifier.
pub fn not_found(raw_id: &str) -> String {
    let body = format!(
        "<h2>Not found</h2>\n\
<p>No original is recorded for ID <code>{}</code>.</p>\n\
<p><a href=\"/\">Back</a></p>",
        escape(raw_id)
    );
    layout("Not found", &body)
}
