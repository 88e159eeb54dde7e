//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Replace identifier segments with `{id}` so that spans and metric labels
/// stay low-cardinality.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::route_template;

    #[test]
    fn root_stays_root() {
        assert_eq!(route_template("/"), "/");
    }

    #[test]
    fn uuid_segments_are_collapsed() {
        let path = "/reviews/check/0190b7c6-3f3a-7b9e-9a51-6f1b2c3d4e5f/0190b7c6-4a2b-7c1d-8e9f-0a1b2c3d4e5f";

        assert_eq!(route_template(path), "/reviews/check/{id}/{id}");
    }

    #[test]
    fn named_segments_are_kept() {
        assert_eq!(
            route_template("/panier/add-to-cart"),
            "/panier/add-to-cart"
        );
    }
}
