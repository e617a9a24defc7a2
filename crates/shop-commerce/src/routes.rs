//! Navigation targets.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A page a front end can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "page", content = "id", rename_all = "lowercase")]
pub enum Route {
    Home,
    Shop,
    Product(ProductId),
    Cart,
    Wishlist,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Shop => "/shop".to_string(),
            Route::Product(id) => format!("/product/{}", id),
            Route::Cart => "/cart".to_string(),
            Route::Wishlist => "/wishlist".to_string(),
        }
    }

    /// Parse a path back into a route.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Home),
            "/shop" => Some(Route::Shop),
            "/cart" => Some(Route::Cart),
            "/wishlist" => Some(Route::Wishlist),
            _ => trimmed
                .strip_prefix("/product/")
                .and_then(|id| id.parse::<u32>().ok())
                .map(|id| Route::Product(ProductId::new(id))),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::Product(ProductId::new(12)).to_string(), "/product/12");
        assert_eq!(Route::from_path("/product/3"), Some(Route::Product(ProductId::new(3))));
        assert_eq!(Route::from_path("/cart/"), Some(Route::Cart));
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path("/product/abc"), None);
    }
}
