use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::repository::Entity;
use super::errors::ProductError;

// ============================================================================
// Product Entity
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: String,
    name: String,
    price: Decimal,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, ProductError> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            price,
        };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> Result<(), ProductError> {
        if self.id.is_empty() {
            return Err(ProductError::EmptyId);
        }
        if self.name.is_empty() {
            return Err(ProductError::EmptyName);
        }
        if self.price <= Decimal::ZERO {
            return Err(ProductError::InvalidPrice);
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ProductError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ProductError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    pub fn change_price(&mut self, price: Decimal) -> Result<(), ProductError> {
        if price <= Decimal::ZERO {
            return Err(ProductError::InvalidPrice);
        }
        self.price = price;
        Ok(())
    }
}

impl Entity for Product {
    const KIND: &'static str = "Product";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_validation() {
        assert_eq!(Product::new("", "P", dec!(1)), Err(ProductError::EmptyId));
        assert_eq!(Product::new("1", "", dec!(1)), Err(ProductError::EmptyName));

        let err = Product::new("1", "P", dec!(-1)).unwrap_err();
        assert_eq!(err.to_string(), "Price must be greater than zero");
    }

    #[test]
    fn test_change_name() {
        let mut product = Product::new("123", "Product 1", dec!(100)).unwrap();
        product.change_name("Product 2").unwrap();
        assert_eq!(product.name(), "Product 2");
    }

    #[test]
    fn test_change_price() {
        let mut product = Product::new("123", "Product 1", dec!(100)).unwrap();
        product.change_price(dec!(150.50)).unwrap();
        assert_eq!(product.price(), dec!(150.50));

        assert_eq!(product.change_price(dec!(0)), Err(ProductError::InvalidPrice));
        assert_eq!(product.price(), dec!(150.50));
    }
}
