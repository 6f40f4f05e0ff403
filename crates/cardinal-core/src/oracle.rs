/// External price collaborator consulted by the paid mint path.
pub trait PriceSource {
    /// Current mint price in cor.
    fn current_price(&self) -> u128;
}

/// Administrator-set price, the stand-in for the production oracle.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPriceOracle {
    current_price: u128,
}

impl BasicPriceOracle {
    pub fn set_current_price(&mut self, amount: u128) {
        self.current_price = amount;
    }
}

impl PriceSource for BasicPriceOracle {
    fn current_price(&self) -> u128 {
        self.current_price
    }
}
