//! Product grid pagination.

use crate::types::Product;

/// One pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    /// "Previous" arrow targeting this page number.
    Previous(usize),
    /// Numbered page button.
    Page { number: usize, active: bool },
    /// "Next" arrow targeting this page number.
    Next(usize),
}

/// The listing grid: the filtered product sequence plus pagination state.
///
/// The grid is the sole owner of the current page; replacing the product
/// set resets to page 1.
#[derive(Debug, Clone)]
pub struct ProductGrid {
    products: Vec<Product>,
    current_page: usize,
    page_size: usize,
}

impl ProductGrid {
    /// Empty grid with the given page size (minimum 1).
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            products: Vec::new(),
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replace the underlying product set and reset to page 1.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.current_page = 1;
    }

    /// The full (filtered) product sequence.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Current 1-based page number.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages; 0 when there are no products.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.products.len().div_ceil(self.page_size)
    }

    /// Jump to a page, clamped to the valid range.
    pub fn goto(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages().max(1));
    }

    /// Products on the current page.
    #[must_use]
    pub fn page_items(&self) -> &[Product] {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.products.len());
        self.products.get(start..end).unwrap_or_default()
    }

    /// Pagination controls; empty when a single page holds everything.
    #[must_use]
    pub fn pagination(&self) -> Vec<PageControl> {
        let total = self.total_pages();
        if total <= 1 {
            return Vec::new();
        }

        let mut controls = Vec::with_capacity(total + 2);
        if self.current_page > 1 {
            controls.push(PageControl::Previous(self.current_page - 1));
        }
        for number in 1..=total {
            controls.push(PageControl::Page {
                number,
                active: number == self.current_page,
            });
        }
        if self.current_page < total {
            controls.push(PageControl::Next(self.current_page + 1));
        }
        controls
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fasco_core::ProductId;
    use rust_decimal::Decimal;

    fn products(count: usize) -> Vec<Product> {
        (1..=count)
            .map(|i| Product {
                id: ProductId::new(i64::try_from(i).unwrap()),
                slug: format!("p-{i}"),
                title: format!("Product {i}"),
                brand: String::new(),
                price: Decimal::from(10),
                discounted_price: None,
                colors: Vec::new(),
                color_names: Vec::new(),
                sizes: Vec::new(),
                images: Vec::new(),
                image_url: None,
                tags: Vec::new(),
                collection: None,
                category: None,
                status: None,
                ratings: None,
                created_at: None,
                sales_count: None,
            })
            .collect()
    }

    #[test]
    fn test_twelve_products_split_nine_three() {
        let mut grid = ProductGrid::new(9);
        grid.set_products(products(12));

        assert_eq!(grid.total_pages(), 2);
        assert_eq!(grid.page_items().len(), 9);
        assert_eq!(grid.page_items()[0].slug, "p-1");

        grid.goto(2);
        assert_eq!(grid.page_items().len(), 3);
        assert_eq!(grid.page_items()[0].slug, "p-10");
    }

    #[test]
    fn test_set_products_resets_to_page_one() {
        let mut grid = ProductGrid::new(9);
        grid.set_products(products(12));
        grid.goto(2);

        grid.set_products(products(12));
        assert_eq!(grid.current_page(), 1);
    }

    #[test]
    fn test_goto_clamps_to_valid_pages() {
        let mut grid = ProductGrid::new(9);
        grid.set_products(products(12));

        grid.goto(99);
        assert_eq!(grid.current_page(), 2);
        grid.goto(0);
        assert_eq!(grid.current_page(), 1);
    }

    #[test]
    fn test_single_page_has_no_controls() {
        let mut grid = ProductGrid::new(9);
        grid.set_products(products(5));
        assert!(grid.pagination().is_empty());
    }

    #[test]
    fn test_pagination_controls_shape() {
        let mut grid = ProductGrid::new(9);
        grid.set_products(products(20));
        grid.goto(2);

        assert_eq!(
            grid.pagination(),
            vec![
                PageControl::Previous(1),
                PageControl::Page {
                    number: 1,
                    active: false
                },
                PageControl::Page {
                    number: 2,
                    active: true
                },
                PageControl::Page {
                    number: 3,
                    active: false
                },
                PageControl::Next(3),
            ]
        );
    }

    #[test]
    fn test_empty_grid() {
        let grid = ProductGrid::new(9);
        assert_eq!(grid.total_pages(), 0);
        assert!(grid.page_items().is_empty());
        assert!(grid.pagination().is_empty());
    }
}
