//! Product record and its wire shape.

use serde::{Deserialize, Serialize};

use super::form::{FormFields, FormReader, ValidationError};
use super::Entity;

/// Image shown when the backend has no thumbnail for a product.
pub const DEFAULT_PRODUCT_THUMBNAIL: &str =
    "https://cdn.dummyjson.com/products/images/placeholder/thumbnail.png";

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Assigned by the backend; `None` until creation succeeds.
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub rating: f64,
    pub stock: u32,
    pub brand: Option<String>,
    pub category: String,
    pub thumbnail: String,
    pub images: Vec<String>,
}

impl Entity for Product {
    const KIND: &'static str = "product";

    fn id(&self) -> Option<u64> {
        self.id
    }
}

/// JSON representation exchanged with the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Listing envelope returned by `GET /products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductListWire {
    #[serde(default)]
    pub products: Vec<ProductWire>,
    pub total: u64,
}

/// Build a product from backend data, filling defaults.
pub fn from_wire(wire: ProductWire) -> Product {
    let thumbnail = wire
        .thumbnail
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PRODUCT_THUMBNAIL.to_string());

    Product {
        id: wire.id,
        title: wire.title,
        description: wire.description,
        price: wire.price,
        discount_percentage: wire.discount_percentage,
        rating: wire.rating,
        stock: wire.stock,
        brand: wire.brand.filter(|b| !b.trim().is_empty()),
        category: wire.category,
        thumbnail,
        images: wire.images,
    }
}

/// Wire shape for create/update requests. Identity is never sent in the body.
pub fn to_wire(product: &Product) -> ProductWire {
    ProductWire {
        id: None,
        title: product.title.clone(),
        description: product.description.clone(),
        price: product.price,
        discount_percentage: product.discount_percentage,
        rating: product.rating,
        stock: product.stock,
        brand: product.brand.clone(),
        category: product.category.clone(),
        thumbnail: Some(product.thumbnail.clone()),
        images: product.images.clone(),
    }
}

/// Parse a submitted product form.
///
/// `title`, `description`, `price` and `category` are required. Decimals
/// must be finite; `price` and `discountPercentage` must not be negative and
/// `rating` stays within 0..=5.
pub fn from_form(fields: &FormFields) -> Result<Product, ValidationError> {
    let mut form = FormReader::new(fields);

    let title = form.required_text("title");
    let description = form.required_text("description");
    let price = form.required_decimal("price");
    let discount_percentage = form.optional_decimal("discountPercentage");
    let rating = form.optional_decimal("rating");
    let stock: u32 = form.optional_number("stock");
    let brand = form.optional_text("brand");
    let category = form.required_text("category");
    let thumbnail = form.optional_text("thumbnail");
    let images = form.list("images");

    form.check("price", price >= 0.0, "must not be negative");
    form.check(
        "discountPercentage",
        (0.0..=100.0).contains(&discount_percentage),
        "must be between 0 and 100",
    );
    form.check("rating", (0.0..=5.0).contains(&rating), "must be between 0 and 5");

    let product = from_wire(ProductWire {
        id: None,
        title,
        description,
        price,
        discount_percentage,
        rating,
        stock,
        brand,
        category,
        thumbnail,
        images,
    });
    form.finish(product)
}
