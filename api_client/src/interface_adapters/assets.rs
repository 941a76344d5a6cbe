use url::Url;

use crate::domain::ClientError;

// Resolves image paths returned by the API against the asset origin.
#[derive(Clone, Debug)]
pub struct AssetResolver {
    base: Url,
}

impl AssetResolver {
    pub fn new(asset_base_url: &str) -> Result<Self, ClientError> {
        // A trailing slash keeps the base path when joining.
        let normalized = format!("{}/", asset_base_url.trim_end_matches('/'));
        let base = Url::parse(&normalized).map_err(|err| {
            ClientError::InvalidRequest(format!("asset base url {asset_base_url}: {err}"))
        })?;
        Ok(Self { base })
    }

    // Absolute URLs pass through; blank paths resolve to nothing.
    pub fn resolve(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        if let Ok(absolute) = Url::parse(path) {
            if matches!(absolute.scheme(), "http" | "https") {
                return Some(absolute.into());
            }
        }
        self.base
            .join(path.trim_start_matches('/'))
            .ok()
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_path_is_relative_then_it_is_joined_under_the_base_path() {
        let resolver = AssetResolver::new("https://cdn.example.com/storage").expect("resolver");

        assert_eq!(
            resolver.resolve("/images/dish.png").as_deref(),
            Some("https://cdn.example.com/storage/images/dish.png")
        );
        assert_eq!(
            resolver.resolve("images/dish.png").as_deref(),
            Some("https://cdn.example.com/storage/images/dish.png")
        );
    }

    #[test]
    fn when_path_is_absolute_then_it_is_returned_unchanged() {
        let resolver = AssetResolver::new("https://cdn.example.com").expect("resolver");

        assert_eq!(
            resolver.resolve("https://img.example.org/a.png").as_deref(),
            Some("https://img.example.org/a.png")
        );
    }

    #[test]
    fn when_path_is_blank_then_nothing_resolves() {
        let resolver = AssetResolver::new("https://cdn.example.com").expect("resolver");

        assert_eq!(resolver.resolve("  "), None);
    }

    #[test]
    fn when_base_is_invalid_then_construction_fails() {
        assert!(AssetResolver::new("::nope").is_err());
    }
}
