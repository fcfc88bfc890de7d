//! Route labels for spans and metrics.

use uuid::Uuid;

/// Replace UUID path segments so every category or tree lookup shares one label.
pub(super) fn route_template(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_templated() {
        let path = format!("/api/category/tree/{}", Uuid::now_v7());

        assert_eq!(route_template(&path), "/api/category/tree/{uuid}");
    }

    #[test]
    fn static_paths_are_kept() {
        assert_eq!(route_template("/api/price/upsert"), "/api/price/upsert");
        assert_eq!(route_template("/"), "/");
    }
}
