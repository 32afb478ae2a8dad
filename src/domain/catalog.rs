// src/domain/catalog.rs
// Catalog snapshot operations and environment seed lists

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::models::Product;

/// Which static seed list a fresh store starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogEnvironment {
    Production,
    Development,
}

/// The static default catalog for an environment. Used only to seed an
/// empty store; afterwards the persisted snapshot is authoritative.
pub fn seed_products(environment: CatalogEnvironment) -> Vec<Product> {
    let mut products = vec![
        Product {
            id: "platano".to_string(),
            name: "Pan de Plátano".to_string(),
            description: "Elaborado con plátanos reales para un dulzor natural".to_string(),
            price: dec!(40),
            stock: 20,
            image: "https://images.unsplash.com/photo-1586444248902-2f64eddc13df?w=400&q=80"
                .to_string(),
        },
        Product {
            id: "datil".to_string(),
            name: "Pan de Dátil".to_string(),
            description: "Enriquecido con dátiles para un impulso de energía natural".to_string(),
            price: dec!(40),
            stock: 20,
            image: "https://images.unsplash.com/photo-1509440159596-0249088772ff?w=400&q=80"
                .to_string(),
        },
        Product {
            id: "zanahoria".to_string(),
            name: "Pan de Zanahoria".to_string(),
            description: "Repleto de zanahorias para una nutrición adicional".to_string(),
            price: dec!(40),
            stock: 20,
            image: "https://images.unsplash.com/photo-1589367920969-ab8e050bbb04?w=400&q=80"
                .to_string(),
        },
    ];

    if environment == CatalogEnvironment::Development {
        products.push(Product {
            id: "prueba".to_string(),
            name: "Pan de Prueba".to_string(),
            description: "Producto de prueba para el entorno de desarrollo".to_string(),
            price: dec!(1),
            stock: 99,
            image: "https://images.unsplash.com/photo-1509440159596-0249088772ff?w=400&q=80"
                .to_string(),
        });
    }

    products
}

/// Look up a product by id in a snapshot.
pub fn find<'a>(snapshot: &'a [Product], product_id: &str) -> Option<&'a Product> {
    snapshot.iter().find(|product| product.id == product_id)
}

/// A new snapshot where the matching product's stock is `new_stock`.
///
/// All other products are unchanged; an unknown id yields an identical
/// snapshot. The input is never mutated, so holders of the old snapshot
/// keep what they read.
pub fn with_stock_level(snapshot: &[Product], product_id: &str, new_stock: u32) -> Vec<Product> {
    snapshot
        .iter()
        .map(|product| {
            if product.id == product_id {
                Product {
                    stock: new_stock,
                    ..product.clone()
                }
            } else {
                product.clone()
            }
        })
        .collect()
}

/// A new snapshot where the matching product's stock is decremented by
/// `quantity`, floored at zero.
pub fn with_stock_decremented(snapshot: &[Product], product_id: &str, quantity: u32) -> Vec<Product> {
    match find(snapshot, product_id) {
        Some(product) => {
            with_stock_level(snapshot, product_id, product.stock.saturating_sub(quantity))
        }
        None => snapshot.to_vec(),
    }
}
