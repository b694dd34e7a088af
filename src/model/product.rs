use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::{AppError, AppErrorCode};

#[derive(Debug, Clone, PartialEq)]
pub enum StockProjection {
    InStock(u32),
    SoldOut,
}

#[derive(Debug, Clone)]
pub struct ProductEntryModel {
    pub id_: u64,
    pub seller_id: u32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    // locally projected available quantity, possibly stale
    pub stock: u32,
    pub best_seller: bool,
}

// Normalized keyed store of every product the session currently shows.
// A stock decrement is applied exactly once here, list surfaces read
// through the selector methods instead of holding their own copies.
pub struct ProductCatalogModel {
    entries: HashMap<u64, ProductEntryModel>,
}

impl Default for ProductCatalogModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCatalogModel {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn upsert(&mut self, entry: ProductEntryModel) {
        let _discard = self.entries.insert(entry.id_, entry);
    }

    pub fn get(&self, product_id: u64) -> Option<&ProductEntryModel> {
        self.entries.get(&product_id)
    }

    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    // optimistic one-unit decrement applied on add-to-cart, clamped at
    // zero so a product can never show a negative count
    pub fn project_stock_decrement(&mut self, product_id: u64) -> Result<StockProjection, AppError> {
        let entry = self.entries.get_mut(&product_id).ok_or(AppError {
            code: AppErrorCode::ProductNotExist,
            detail: Some(format!("product:{product_id}")),
        })?;
        if entry.stock == 0 {
            return Ok(StockProjection::SoldOut);
        }
        entry.stock -= 1;
        if entry.stock == 0 {
            Ok(StockProjection::SoldOut)
        } else {
            Ok(StockProjection::InStock(entry.stock))
        }
    }

    pub fn all(&self) -> Vec<&ProductEntryModel> {
        let mut out = self.entries.values().collect::<Vec<_>>();
        out.sort_by_key(|e| e.id_);
        out
    }

    pub fn best_sellers(&self) -> Vec<&ProductEntryModel> {
        let mut out = self
            .entries
            .values()
            .filter(|e| e.best_seller)
            .collect::<Vec<_>>();
        out.sort_by_key(|e| e.id_);
        out
    }

    // discard every projected count, the given entries are authoritative
    pub fn reconcile(&mut self, data: Vec<ProductEntryModel>) {
        self.entries = data.into_iter().map(|e| (e.id_, e)).collect();
    }
} // end of impl ProductCatalogModel
