/// An order.
pub struct Order {
    /// Identifier.
    pub id: u64,
    pub lines: Vec<u64>,
}

pub struct Receipt(pub u64);

impl Order {
    pub fn total(&self) -> u64 {
        let mut sum = 0;
        for line in &self.lines {
            sum += line;
        }
        let discount = if sum > 100 { 10 } else { 0 };
        let shipping = 5;
        let tax = sum / 5;
        let total = sum - discount;
        total + shipping + tax
    }

    pub fn audited_total(&self) -> u64 {
        // start from the plain sum
        let mut sum = 0;
        for line in &self.lines {
            sum += line;
        }
        // flat shipping, no discounts
        let shipping = 5;
        let tax = sum / 5;
        let total = sum;
        total + shipping + tax
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
