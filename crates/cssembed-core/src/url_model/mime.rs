//! MIME type inference from URL extension.

const WOFF: &str = "application/font-woff";
const JPEG: &str = "image/jpeg";

/// Returns the text after the last `.` of `url`, or `""` when that text
/// would span a `/` (i.e. the dot is not in the last path segment).
///
/// Query strings are not stripped: `font.woff2?v=3` has extension `woff2?v=3`.
pub fn extension(url: &str) -> &str {
    match url.rfind('.') {
        Some(i) => {
            let ext = &url[i + 1..];
            if ext.contains('/') {
                ""
            } else {
                ext
            }
        }
        None => "",
    }
}

/// MIME type for the fonts and images stylesheets typically reference.
pub fn mime_type_for(url: &str) -> Option<&'static str> {
    let ext = extension(url).to_ascii_lowercase();
    let mime = match ext.as_str() {
        "woff" | "woff2" => WOFF,
        "ttf" => "application/font-truetype",
        "eot" => "application/vnd.ms-fontobject",
        "png" => "image/png",
        "jpg" | "jpeg" => JPEG,
        "gif" => "image/gif",
        "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(mime)
}
