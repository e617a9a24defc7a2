//! Built-in demo catalog.

use super::product::{Badge, Product, ProductFlag, Variant};
use crate::money::Money;

fn variant(name: &str, code: &str, sizes: &[(&str, i64, u32)]) -> Variant {
    sizes
        .iter()
        .fold(Variant::new(name, code), |v, &(size, price, stock)| {
            v.with_size(size, Money::inr(price), stock)
        })
}

/// Front and back shots per variant, under the product's image folder.
fn with_gallery(mut product: Product) -> Product {
    let id = product.id;
    for variant in &mut product.variants {
        let colour = crate::ids::slugify(&variant.color_name);
        variant.images = vec![
            format!("/images/products/{}/{}-front.jpg", id, colour),
            format!("/images/products/{}/{}-back.jpg", id, colour),
        ];
    }
    product
}

/// Letter sizes with the usual price steps: base, base, base+l, base+xl.
fn letter(base: i64, l: i64, xl: i64, stock: [u32; 4]) -> Vec<(&'static str, i64, u32)> {
    vec![
        ("S", base, stock[0]),
        ("M", base, stock[1]),
        ("L", base + l, stock[2]),
        ("XL", base + xl, stock[3]),
    ]
}

fn waist(base: i64, step: i64, stock: [u32; 4]) -> Vec<(&'static str, i64, u32)> {
    vec![
        ("30", base, stock[0]),
        ("32", base, stock[1]),
        ("34", base + step, stock[2]),
        ("36", base + step * 2, stock[3]),
    ]
}

fn shoe(base: i64, stock: [u32; 4]) -> Vec<(&'static str, i64, u32)> {
    vec![
        ("UK 7", base, stock[0]),
        ("UK 8", base, stock[1]),
        ("UK 9", base + 200, stock[2]),
        ("UK 10", base + 400, stock[3]),
    ]
}

/// The twelve-product demo catalog, in featured order.
pub fn demo_products() -> Vec<Product> {
    let best_seller = || Badge::new("Best Seller", "bg-blue-500");
    let premium = || Badge::new("Premium", "bg-amber-500");
    let new = || Badge::new("New", "bg-green-500");

    let oxford = Product::new(1, "Premium Cotton Oxford Shirt", Money::inr(2499), "Shirts")
        .with_badge(best_seller())
        .with_description("Breathable cotton oxford with a button-down collar and a tailored fit.")
        .with_variant(variant("White", "#FFFFFF", &letter(2499, 100, 200, [10, 15, 8, 5])))
        .with_variant(variant("Light Blue", "#87CEEB", &letter(2499, 100, 200, [7, 12, 6, 3])))
        .with_variant(variant("Black", "#000000", &letter(2499, 100, 200, [8, 10, 5, 0])))
        .with_rating(4.5, 128)
        .with_flag(ProductFlag::BestSeller);

    let chinos = Product::new(2, "Slim Fit Chinos", Money::inr(1999), "Pants")
        .with_description("Stretch cotton chinos cut slim through the leg.")
        .with_variant(variant("Navy", "#1E2F4D", &waist(1999, 100, [12, 15, 10, 5])))
        .with_variant(variant("Khaki", "#8C7D70", &waist(1999, 100, [8, 14, 7, 3])))
        .with_variant(variant("Charcoal", "#4A4A4A", &waist(1999, 100, [6, 10, 4, 0])))
        .with_rating(4.3, 96);

    let leather = Product::new(3, "Leather Jacket", Money::inr(7999), "Outerwear")
        .with_badge(premium())
        .with_description("Full-grain leather jacket with a quilted lining.")
        .with_variant(variant("Brown", "#6B4423", &letter(7999, 500, 1000, [5, 8, 6, 3])))
        .with_variant(variant("Black", "#000000", &letter(7999, 500, 1000, [4, 7, 5, 2])))
        .with_rating(4.8, 64);

    let denim = Product::new(4, "Premium Denim Jeans", Money::inr(3499), "Pants")
        .with_description("Mid-weight selvedge denim with a straight leg.")
        .with_variant(variant("Dark Blue", "#1E2F4D", &waist(3499, 200, [15, 20, 12, 8])))
        .with_variant(variant("Black", "#000000", &waist(3499, 200, [10, 15, 8, 5])))
        .with_variant(variant("Grey", "#4A4A4A", &waist(3499, 200, [8, 12, 6, 0])))
        .with_rating(4.6, 112);

    let sneakers = Product::new(5, "Casual Sneakers", Money::inr(4999), "Footwear")
        .with_badge(new())
        .with_description("Low-top leather sneakers on a cushioned rubber sole.")
        .with_variant(variant("White", "#FFFFFF", &shoe(4999, [10, 15, 8, 5])))
        .with_variant(variant("Black", "#000000", &shoe(4999, [8, 12, 6, 3])))
        .with_variant(variant("Red", "#E83A59", &shoe(4999, [5, 8, 4, 0])))
        .with_rating(4.7, 86)
        .with_flag(ProductFlag::New);

    let dress = Product::new(6, "Formal Dress Shirt", Money::inr(2999), "Shirts")
        .with_description("Crisp poplin dress shirt with a spread collar.")
        .with_variant(variant("White", "#FFFFFF", &letter(2999, 200, 400, [12, 18, 10, 6])))
        .with_variant(variant("Light Blue", "#87CEEB", &letter(2999, 200, 400, [10, 15, 8, 4])))
        .with_variant(variant("Pink", "#FFC0CB", &letter(2999, 200, 400, [8, 12, 6, 0])))
        .with_rating(4.4, 74);

    let sweater = Product::new(7, "Wool Blend Sweater", Money::inr(3499), "Knitwear")
        .with_description("Soft merino blend crew neck for layering.")
        .with_variant(variant("Navy", "#1E2F4D", &letter(3499, 200, 400, [8, 12, 6, 4])))
        .with_variant(variant("Brown", "#8B4513", &letter(3499, 200, 400, [6, 10, 5, 3])))
        .with_variant(variant("Grey", "#808080", &letter(3499, 200, 400, [7, 11, 5, 0])))
        .with_rating(4.5, 68);

    let blazer = Product::new(8, "Tailored Blazer", Money::inr(6999), "Formal")
        .with_badge(premium())
        .with_description("Half-canvassed blazer in a wool blend.")
        .with_variant(variant("Navy", "#1E2F4D", &letter(6999, 500, 1000, [6, 10, 5, 3])))
        .with_variant(variant("Black", "#000000", &letter(6999, 500, 1000, [5, 8, 4, 2])))
        .with_variant(variant("Grey", "#808080", &letter(6999, 500, 1000, [4, 7, 3, 0])))
        .with_rating(4.7, 52);

    let graphic = Product::new(9, "Graphic Print T-Shirt", Money::inr(1499), "T-Shirts")
        .with_badge(Badge::new("Trending", "bg-purple-500"))
        .with_description("Heavyweight cotton tee with a screen-printed graphic.")
        .with_variant(variant("White", "#FFFFFF", &letter(1499, 100, 200, [15, 20, 12, 8])))
        .with_variant(variant("Black", "#000000", &letter(1499, 100, 200, [12, 18, 10, 6])))
        .with_variant(variant("Grey", "#808080", &letter(1499, 100, 200, [10, 15, 8, 0])))
        .with_rating(4.2, 98)
        .with_flag(ProductFlag::Trending);

    let polo = Product::new(10, "Slim Fit Polo Shirt", Money::inr(1999), "Polos")
        .with_description("Pique cotton polo with a two-button placket.")
        .with_variant(variant("White", "#FFFFFF", &letter(1999, 100, 200, [12, 18, 10, 6])))
        .with_variant(variant("Navy", "#1E2F4D", &letter(1999, 100, 200, [10, 15, 8, 4])))
        .with_variant(variant("Red", "#E83A59", &letter(1999, 100, 200, [8, 12, 6, 0])))
        .with_rating(4.4, 82);

    let shorts = Product::new(11, "Linen Summer Shorts", Money::inr(1799), "Shorts")
        .with_description("Lightweight linen shorts with an elastic back waist.")
        .with_variant(variant("Beige", "#F5F5DC", &waist(1799, 100, [10, 15, 8, 5])))
        .with_variant(variant("Navy", "#1E2F4D", &waist(1799, 100, [8, 12, 6, 3])))
        .with_rating(4.3, 45);

    let bomber = Product::new(12, "Lightweight Bomber Jacket", Money::inr(4499), "Jackets")
        .with_badge(new())
        .with_description("Water-resistant bomber with ribbed cuffs and hem.")
        .with_variant(variant("Navy", "#1E2F4D", &letter(4499, 200, 400, [8, 12, 6, 4])))
        .with_variant(variant("Black", "#000000", &letter(4499, 200, 400, [7, 10, 5, 3])))
        .with_variant(variant("Grey", "#808080", &letter(4499, 200, 400, [6, 9, 4, 0])))
        .with_rating(4.6, 58)
        .with_flag(ProductFlag::New);

    [
        oxford, chinos, leather, denim, sneakers, dress, sweater, blazer, graphic, polo, shorts,
        bomber,
    ]
    .into_iter()
    .map(with_gallery)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_products_are_valid() {
        let products = demo_products();
        assert_eq!(products.len(), 12);
        for product in &products {
            product.validate().unwrap();
        }
    }

    #[test]
    fn test_oxford_shirt_data() {
        let products = demo_products();
        let oxford = &products[0];
        assert_eq!(oxford.name, "Premium Cotton Oxford Shirt");
        assert_eq!(oxford.size(0, 3).unwrap().price.amount, 2699);
        assert_eq!(oxford.size(2, 3).unwrap().stock, 0);
        assert_eq!(oxford.variants[1].images[0], "/images/products/1/lightblue-front.jpg");
    }
}
