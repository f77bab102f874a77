use std::path::Path;

use mime::Mime;

/// 拡張子から Content-Type を推定（不明な場合は application/octet-stream）
pub fn content_type_for(path: &Path) -> Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html" | "htm") => mime::TEXT_HTML_UTF_8,
        Some("css") => mime::TEXT_CSS_UTF_8,
        Some("js" | "mjs") => mime::TEXT_JAVASCRIPT,
        Some("json" | "map") => mime::APPLICATION_JSON,
        Some("txt") => mime::TEXT_PLAIN_UTF_8,
        Some("csv") => mime::TEXT_CSV_UTF_8,
        Some("xml") => mime::TEXT_XML,
        Some("svg") => mime::IMAGE_SVG,
        Some("png") => mime::IMAGE_PNG,
        Some("jpg" | "jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("bmp") => mime::IMAGE_BMP,
        Some("pdf") => mime::APPLICATION_PDF,
        Some("woff") => mime::FONT_WOFF,
        Some("woff2") => mime::FONT_WOFF2,
        Some("webp") => parse_or_binary("image/webp"),
        Some("ico") => parse_or_binary("image/x-icon"),
        Some("avif") => parse_or_binary("image/avif"),
        Some("wasm") => parse_or_binary("application/wasm"),
        Some("webmanifest") => parse_or_binary("application/manifest+json"),
        Some("mp4") => parse_or_binary("video/mp4"),
        Some("webm") => parse_or_binary("video/webm"),
        Some("mp3") => parse_or_binary("audio/mpeg"),
        Some("ttf") => parse_or_binary("font/ttf"),
        Some("otf") => parse_or_binary("font/otf"),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

fn parse_or_binary(essence: &str) -> Mime {
    essence.parse().unwrap_or(mime::APPLICATION_OCTET_STREAM)
}
