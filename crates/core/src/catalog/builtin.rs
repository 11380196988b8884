use crate::domain::product::Product;

struct Seed {
    name: &'static str,
    price: &'static str,
    category: &'static str,
    location: Option<&'static str>,
}

const fn seed(
    name: &'static str,
    price: &'static str,
    category: &'static str,
    location: Option<&'static str>,
) -> Seed {
    Seed { name, price, category, location }
}

const SEEDS: &[Seed] = &[
    seed("Toyota Camry 2023", "$25,000", "car", Some("New York")),
    seed("Honda Civic 2023", "$22,500", "car", Some("California")),
    seed("Ford Mustang", "$35,000", "car", Some("Texas")),
    seed("BMW X5", "$55,000", "car", Some("Florida")),
    seed("iPhone 15 Pro", "$999", "phone", None),
    seed("Samsung Galaxy S24", "$899", "phone", None),
    seed("Google Pixel 8", "$699", "phone", None),
    seed("OnePlus 12", "$799", "phone", None),
    seed("MacBook Pro 16", "$2,499", "laptop", None),
    seed("Dell XPS 15", "$1,799", "laptop", None),
    seed("HP Spectre x360", "$1,399", "laptop", None),
    seed("Lenovo ThinkPad X1", "$1,599", "laptop", None),
    seed("AirPods Pro", "$249", "accessories", None),
    seed("Sony WH-1000XM5", "$399", "accessories", None),
    seed("Apple Watch Series 9", "$399", "accessories", None),
    seed("Samsung Galaxy Buds", "$149", "accessories", None),
];

/// Products shipped with the binary, without derived attributes.
pub(super) fn products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| {
            let product = Product::new(seed.name, seed.price, seed.category);
            match seed.location {
                Some(location) => product.with_location(location),
                None => product,
            }
        })
        .collect()
}
