//! Catalog seeding

use rust_decimal::Decimal;
use sqlx::PgPool;

struct Seed {
    id: &'static str,
    name: &'static str,
    price_cents: i64,
    description: &'static str,
    image: &'static str,
    category: &'static str,
    rating: Decimal,
}

fn catalog() -> Vec<Seed> {
    vec![
        Seed {
            id: "P001",
            name: "Sustainable Peace Journal",
            price_cents: 2499,
            description: "Handcrafted journal made from recycled materials, perfect for reflection and mindful writing.",
            image: "https://images.unsplash.com/photo-1577375729152-4c8b5fcda381?auto=format&fit=crop&q=80&w=800",
            category: "Stationery",
            rating: Decimal::new(48, 1),
        },
        Seed {
            id: "P002",
            name: "Justice Scales Artwork",
            price_cents: 8999,
            description: "Contemporary art print symbolizing balance and equality in modern society.",
            image: "https://images.unsplash.com/photo-1589994965851-a8f479c573a9?auto=format&fit=crop&q=80&w=800",
            category: "Art",
            rating: Decimal::new(49, 1),
        },
        Seed {
            id: "P003",
            name: "Unity Coffee Blend",
            price_cents: 1999,
            description: "Fair trade coffee blend supporting local farming communities worldwide.",
            image: "https://images.unsplash.com/photo-1459755486867-b55449bb39ff?auto=format&fit=crop&q=80&w=800",
            category: "Food",
            rating: Decimal::new(47, 1),
        },
        Seed {
            id: "P004",
            name: "Community Building Guide",
            price_cents: 3499,
            description: "Comprehensive guide for building strong, inclusive communities.",
            image: "https://images.unsplash.com/photo-1531545514256-b1400bc00f31?auto=format&fit=crop&q=80&w=800",
            category: "Books",
            rating: Decimal::new(46, 1),
        },
    ]
}

/// Inserts the starter catalog, leaving existing rows untouched.
pub async fn seed_catalog(db: &PgPool) -> Result<(), sqlx::Error> {
    for seed in catalog() {
        sqlx::query(
            "INSERT INTO products (id, name, price, description, image, category, rating) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) ON CONFLICT (id) DO NOTHING",
        )
        .bind(seed.id)
        .bind(seed.name)
        .bind(Decimal::new(seed.price_cents, 2))
        .bind(seed.description)
        .bind(seed.image)
        .bind(seed.category)
        .bind(seed.rating)
        .execute(db)
        .await?;
    }
    Ok(())
}
