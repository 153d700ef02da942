//! Catalog inspection command.

use armour_storefront::catalog::{Catalog, CatalogError};

/// Load the embedded catalog and print one line per collection.
///
/// Fails with the same error the storefront would refuse to start with.
pub fn summary() -> Result<(), CatalogError> {
    let catalog = Catalog::load()?;

    #[allow(clippy::print_stdout)]
    {
        for collection in catalog.collections() {
            println!(
                "{:<10} {:>3} products  {}",
                collection.slug,
                collection.products.len(),
                collection.title
            );
        }
        println!("{} products total", catalog.len());
    }

    Ok(())
}
