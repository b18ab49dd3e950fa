//! `shopeasy search`

use std::io::Write;

use shopeasy_storefront::notify::Notifier;
use shopeasy_storefront::search::{Catalog, CategoryFilter};

use crate::error::AppError;

pub fn run(
    catalog: &Catalog,
    query: &str,
    filter: &CategoryFilter,
    currency_symbol: &str,
    notifier: &mut impl Notifier,
    out: &mut impl Write,
) -> Result<usize, AppError> {
    let hits = catalog.search_with(query, filter, notifier);
    for product in &hits {
        writeln!(
            out,
            "{:<16} {:<28} {:<12} {}",
            product.id,
            product.name,
            product.category,
            product.price.display_with(currency_symbol)
        )?;
    }
    Ok(hits.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopeasy_storefront::notify::{Notice, RecordingNotifier};

    use super::*;

    #[test]
    fn test_search_output() {
        let catalog = Catalog::from_yaml_str(
            "products:\n  - {id: mug, name: Ceramic Mug, price: 650, category: home}\n",
        )
        .unwrap();
        let mut notifier = RecordingNotifier::new();
        let mut out = Vec::new();

        let hits = run(&catalog, "MUG", &CategoryFilter::All, "₹", &mut notifier, &mut out).unwrap();
        assert_eq!(hits, 1);
        assert!(String::from_utf8(out).unwrap().contains("₹ 650"));

        let mut out = Vec::new();
        let filter = "electronics".parse().unwrap();
        assert_eq!(run(&catalog, "mug", &filter, "₹", &mut notifier, &mut out).unwrap(), 0);
        assert_eq!(notifier.notices(), [Notice::NoSearchResults]);
    }
}
