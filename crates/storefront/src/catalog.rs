//! Static product catalog.
//!
//! The catalog is a JSON table compiled into the binary
//! (`crates/storefront/catalog/products.json`) and parsed once at startup.
//! Prices are written as display strings there and parsed into [`Price`]
//! during loading, so a bad entry stops the process before it serves traffic.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use armour_core::{Price, PriceError};

const EMBEDDED_CATALOG: &str = include_str!("../catalog/products.json");

/// Collection slug for the featured "Our Products" list.
pub const FEATURED: &str = "featured";

/// Errors that can occur loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("product '{product}' has an invalid price: {source}")]
    InvalidPrice {
        product: String,
        #[source]
        source: PriceError,
    },

    #[error("product id '{0}' appears more than once")]
    DuplicateProduct(String),

    #[error("collection slug '{0}' appears more than once")]
    DuplicateCollection(String),

    #[error("a product in '{0}' has an empty id")]
    EmptyProductId(String),
}

/// A product as shown on collection and product pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: Price,
    pub description: Option<String>,
    pub colors: Vec<String>,
    pub design: Option<String>,
    pub style: Option<String>,
    pub vibe: Option<String>,
    pub perfect_for: Option<String>,
}

/// A named list of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub slug: String,
    pub title: String,
    pub products: Vec<Product>,
}

/// All collections plus an id index.
#[derive(Debug, Clone)]
pub struct Catalog {
    collections: Vec<Collection>,
    /// product id -> (collection index, product index)
    index: HashMap<String, (usize, usize)>,
}

#[derive(Deserialize)]
struct RawCatalog {
    collections: Vec<RawCollection>,
}

#[derive(Deserialize)]
struct RawCollection {
    slug: String,
    title: String,
    products: Vec<RawProduct>,
}

#[derive(Deserialize)]
struct RawProduct {
    id: String,
    name: String,
    image: String,
    price: String,
    description: Option<String>,
    #[serde(default)]
    colors: Vec<String>,
    design: Option<String>,
    style: Option<String>,
    vibe: Option<String>,
    perfect_for: Option<String>,
}

impl RawProduct {
    fn into_product(self) -> Result<Product, CatalogError> {
        let price = Price::parse(&self.price).map_err(|source| CatalogError::InvalidPrice {
            product: self.id.clone(),
            source,
        })?;

        Ok(Product {
            id: self.id,
            name: self.name,
            image: self.image,
            price,
            description: self.description,
            colors: self.colors,
            design: self.design,
            style: self.style,
            vibe: self.vibe,
            perfect_for: self.perfect_for,
        })
    }
}

impl Catalog {
    /// Load the catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the embedded table is invalid.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Parse and validate a catalog table.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for malformed JSON, unparseable prices, empty
    /// ids, or ids and slugs that repeat.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;

        let mut collections = Vec::with_capacity(raw.collections.len());
        let mut index = HashMap::new();

        for (ci, raw_collection) in raw.collections.into_iter().enumerate() {
            if collections
                .iter()
                .any(|c: &Collection| c.slug == raw_collection.slug)
            {
                return Err(CatalogError::DuplicateCollection(raw_collection.slug));
            }

            let mut products = Vec::with_capacity(raw_collection.products.len());
            for (pi, raw_product) in raw_collection.products.into_iter().enumerate() {
                if raw_product.id.trim().is_empty() {
                    return Err(CatalogError::EmptyProductId(raw_collection.slug));
                }
                let product = raw_product.into_product()?;
                if index.insert(product.id.clone(), (ci, pi)).is_some() {
                    return Err(CatalogError::DuplicateProduct(product.id));
                }
                products.push(product);
            }

            collections.push(Collection {
                slug: raw_collection.slug,
                title: raw_collection.title,
                products,
            });
        }

        Ok(Self { collections, index })
    }

    #[must_use]
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    #[must_use]
    pub fn collection(&self, slug: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.slug == slug)
    }

    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        let &(ci, pi) = self.index.get(id)?;
        self.collections.get(ci)?.products.get(pi)
    }

    /// The collection a product belongs to.
    #[must_use]
    pub fn collection_of(&self, product_id: &str) -> Option<&Collection> {
        let &(ci, _) = self.index.get(product_id)?;
        self.collections.get(ci)
    }

    /// Total number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::load().unwrap();

        for slug in [FEATURED, "tshirts", "hoodies", "tacticaps", "cargos"] {
            let collection = catalog.collection(slug).unwrap();
            assert!(!collection.products.is_empty(), "{slug} is empty");
        }
        assert_eq!(catalog.collection(FEATURED).unwrap().title, "Our Products");
        assert_eq!(catalog.collection(FEATURED).unwrap().products.len(), 5);
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::load().unwrap();

        let tee = catalog.product("tactical-combat-tee").unwrap();
        assert_eq!(tee.name, "Tactical Combat Tee");
        assert_eq!(tee.price.to_string(), "₹899");
        assert_eq!(
            catalog.collection_of("tactical-combat-tee").unwrap().slug,
            FEATURED
        );

        let hoodie = catalog.product("army-camo-polo-hoodie").unwrap();
        assert_eq!(hoodie.colors, ["Green", "Black"]);
        assert_eq!(hoodie.perfect_for.as_deref(), Some("Outdoor Activities"));

        assert!(catalog.product("no-such-thing").is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{"collections":[
            {"slug":"a","title":"A","products":[
                {"id":"x","name":"X","image":"/x.jpg","price":"₹1"},
                {"id":"x","name":"X2","image":"/x.jpg","price":"₹2"}
            ]}
        ]}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateProduct(id)) if id == "x"
        ));
    }

    #[test]
    fn test_rejects_bad_price() {
        let json = r#"{"collections":[
            {"slug":"a","title":"A","products":[
                {"id":"x","name":"X","image":"/x.jpg","price":"call us"}
            ]}
        ]}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
