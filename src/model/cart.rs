use rust_decimal::Decimal;

use crate::api::dto::{CartDto, CartLineDto, CartLineSyncDto};

#[derive(Debug, Clone)]
pub struct CartLineModel {
    pub product_id: u64,
    pub seller_id: u32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
}

// frozen copy of the line list, handed out by `clear()` so a failed
// server-side clear can roll the cart back
#[derive(Debug, Clone)]
pub struct CartSnapshot(Vec<CartLineModel>);

pub struct CartModel {
    pub owner: u32,
    lines: Vec<CartLineModel>,
}

impl From<CartLineDto> for CartLineModel {
    fn from(value: CartLineDto) -> Self {
        Self {
            product_id: value.product_id,
            seller_id: value.seller_id,
            name: value.name,
            description: value.description,
            price: value.price,
            image: value.image,
            quantity: value.quantity,
        }
    }
}
impl From<CartLineModel> for CartLineDto {
    fn from(value: CartLineModel) -> CartLineDto {
        CartLineDto {
            product_id: value.product_id,
            seller_id: value.seller_id,
            name: value.name,
            description: value.description,
            price: value.price,
            image: value.image,
            quantity: value.quantity,
        }
    }
}

impl From<&CartModel> for CartDto {
    fn from(value: &CartModel) -> CartDto {
        CartDto {
            lines: value
                .lines
                .iter()
                .cloned()
                .map(CartLineDto::from)
                .collect::<Vec<_>>(),
        }
    }
}

impl CartModel {
    pub fn new(owner: u32) -> Self {
        Self {
            owner,
            lines: Vec::new(),
        }
    }

    // merge semantics of a single add-to-cart action, one unit per call.
    // A line already holding the product keeps its position, only the
    // quantity grows; a brand-new product is appended at the end.
    pub fn add_item(&mut self, d: &CartLineSyncDto) {
        let result = self.lines.iter_mut().find(|obj| {
            obj.product_id == d.product_id && obj.seller_id == d.seller_id
        });
        if let Some(line) = result {
            line.quantity += 1;
        } else {
            self.lines.push(CartLineModel {
                product_id: d.product_id,
                seller_id: d.seller_id,
                name: d.name.clone(),
                description: d.description.clone(),
                price: d.price,
                image: d.image.clone(),
                quantity: 1,
            });
        }
    }

    pub fn lines(&self) -> &[CartLineModel] {
        &self.lines
    }
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .map(|ln| ln.price * Decimal::from(ln.quantity))
            .sum::<Decimal>()
    }

    pub fn clear(&mut self) -> CartSnapshot {
        let frozen = std::mem::take(&mut self.lines);
        CartSnapshot(frozen)
    }

    pub fn restore(&mut self, snapshot: CartSnapshot) {
        self.lines = snapshot.0;
    }

    // overwrite optimistic state with the authoritative snapshot
    // fetched on session start
    pub fn replace_from(&mut self, data: CartDto) {
        self.lines = data
            .lines
            .into_iter()
            .map(CartLineModel::from)
            .collect::<Vec<_>>();
    }
} // end of impl CartModel

impl CartSnapshot {
    pub fn num_lines(&self) -> usize {
        self.0.len()
    }
}
