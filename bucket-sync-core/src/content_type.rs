//! Static extension → MIME type lookup for uploaded objects.

/// Content type used when the extension is unknown or absent.
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Resolve the MIME type for a storage key from its lowercase file extension.
/// Dotfiles and extensionless names map to the generic binary type.
pub fn content_type_for(key: &str) -> &'static str {
    let name = key.rsplit('/').next().unwrap_or(key);
    let ext = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => return APPLICATION_OCTET_STREAM,
    };
    match ext.as_str() {
        "html" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "jpg" | "jpeg" => "image/jpeg",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        _ => APPLICATION_OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_resolve() {
        assert_eq!(content_type_for("index.html"), "text/html");
        assert_eq!(content_type_for("css/style.css"), "text/css");
        assert_eq!(content_type_for("search.JSON"), "application/json");
        assert_eq!(content_type_for("img/logo.svg"), "image/svg+xml");
        assert_eq!(content_type_for("fonts/main.woff2"), "font/woff2");
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(content_type_for("data.xyz"), APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn extensionless_and_dotfiles_are_octet_stream() {
        assert_eq!(content_type_for("Makefile"), APPLICATION_OCTET_STREAM);
        assert_eq!(content_type_for("book/.nojekyll"), APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn only_final_component_is_considered() {
        assert_eq!(content_type_for("v1.2/readme"), APPLICATION_OCTET_STREAM);
    }
}
