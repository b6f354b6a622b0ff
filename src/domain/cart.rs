use uuid::Uuid;

use super::product::Product;

/// One product entry inside the order being constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub line_id: Uuid,
    pub product_id: String,
    pub title: String,
    pub sku: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub available_stock: u32,
    pub unit: String,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            line_id: Uuid::new_v4(),
            product_id: product.product_id.clone(),
            title: product.title.clone(),
            sku: product.sku.clone(),
            unit_price: product.unit_price,
            quantity: 1,
            available_stock: product.available_stock,
            unit: product.unit.clone(),
        }
    }

    /// Stock cap for quantity edits. A zero stock figure means the backend
    /// gave no usable count, so no cap applies.
    fn cap(&self) -> u32 {
        if self.available_stock > 0 {
            self.available_stock
        } else {
            u32::MAX
        }
    }
}

/// Result of merging a resolved product into the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Added,
    /// An existing line for the same product had its quantity incremented.
    Incremented,
    /// The existing line is already at its stock cap; nothing changed.
    StockExhausted,
}

/// The in-memory line-item list for the order being built.
///
/// Insertion order is display order. Lookup completions for different codes
/// may land in any order; every mutation resolves the target line by
/// `product_id` or `line_id` against current state, never a stale index.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Running total over current lines.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .map(|l| l.unit_price * u64::from(l.quantity))
            .sum()
    }

    /// Merge a resolved product into the cart: increment the matching line
    /// by one (capped at available stock), or append a new line.
    pub fn apply(&mut self, product: &Product) -> AddOutcome {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.product_id)
        {
            if line.quantity >= line.cap() {
                return AddOutcome::StockExhausted;
            }
            line.quantity += 1;
            return AddOutcome::Incremented;
        }
        self.lines.push(CartLine::from_product(product));
        AddOutcome::Added
    }

    /// Stepper increment: clamps to the stock cap.
    pub fn step_up(&mut self, line_id: Uuid) -> bool {
        match self.line_mut(line_id) {
            Some(line) if line.quantity < line.cap() => {
                line.quantity += 1;
                true
            }
            _ => false,
        }
    }

    /// Stepper decrement: quantity never drops below 1.
    pub fn step_down(&mut self, line_id: Uuid) -> bool {
        match self.line_mut(line_id) {
            Some(line) if line.quantity > 1 => {
                line.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Direct quantity entry: clamps to >= 1 only. The stock cap is enforced
    /// by the stepper, not here (manual override past known stock stays
    /// possible).
    pub fn set_quantity(&mut self, line_id: Uuid, quantity: u32) {
        if let Some(line) = self.line_mut(line_id) {
            line.quantity = quantity.max(1);
        }
    }

    /// Price entry: keeps digit characters only and coerces the rest to a
    /// non-negative integer. An unparseable or empty entry leaves the price
    /// at 0, which blocks submission.
    pub fn set_price(&mut self, line_id: Uuid, raw: &str) {
        if let Some(line) = self.line_mut(line_id) {
            let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
            line.unit_price = digits.parse().unwrap_or(0);
        }
    }

    pub fn remove(&mut self, line_id: Uuid) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.line_id != line_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn line_mut(&mut self, line_id: Uuid) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.line_id == line_id)
    }
}
