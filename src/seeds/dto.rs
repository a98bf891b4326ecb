use serde::Deserialize;

use crate::error::ApiError;

const NAME_MAX: usize = 100;
const CATEGORY_MAX: usize = 50;
const IMAGE_MAX: usize = 500;

#[derive(Debug, Deserialize)]
pub struct SeedCreate {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: i32,
    pub image: Option<String>,
}

impl SeedCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_name(&self.name)?;
        validate_category(&self.category)?;
        validate_price(self.price)?;
        validate_quantity(self.quantity)?;
        if let Some(image) = &self.image {
            validate_image(image)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub image: Option<String>,
}

impl SeedUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(image) = &self.image {
            validate_image(image)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl SearchQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        for (field, bound) in [("min_price", self.min_price), ("max_price", self.max_price)] {
            if let Some(v) = bound {
                if !v.is_finite() || v < 0.0 {
                    return Err(ApiError::Unprocessable(format!(
                        "{field} must be 0 or greater"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Empty-string params count as absent.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.filter(|s| !s.is_empty()),
            category: self.category.filter(|s| !s.is_empty()),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub quantity: i32,
}

impl RestockRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.quantity <= 0 {
            return Err(ApiError::Unprocessable(
                "quantity must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() || name.len() > NAME_MAX {
        return Err(ApiError::Unprocessable(format!(
            "name must be between 1 and {NAME_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), ApiError> {
    if category.is_empty() || category.len() > CATEGORY_MAX {
        return Err(ApiError::Unprocessable(format!(
            "category must be between 1 and {CATEGORY_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ApiError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ApiError::Unprocessable(
            "price must be greater than 0".into(),
        ));
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<(), ApiError> {
    if quantity < 0 {
        return Err(ApiError::Unprocessable(
            "quantity must be 0 or greater".into(),
        ));
    }
    Ok(())
}

fn validate_image(image: &str) -> Result<(), ApiError> {
    if image.len() > IMAGE_MAX {
        return Err(ApiError::Unprocessable(format!(
            "image must be at most {IMAGE_MAX} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, category: &str, price: f64, quantity: i32) -> SeedCreate {
        SeedCreate {
            name: name.into(),
            category: category.into(),
            price,
            quantity,
            image: None,
        }
    }

    #[test]
    fn create_accepts_valid_fields() {
        assert!(create("Sunflower Seed", "Flower", 1.50, 50).validate().is_ok());
        assert!(create("x", "y", 0.01, 0).validate().is_ok());
    }

    #[test]
    fn create_rejects_empty_and_oversized_strings() {
        assert!(create("", "Flower", 1.0, 1).validate().is_err());
        assert!(create(&"a".repeat(101), "Flower", 1.0, 1).validate().is_err());
        assert!(create("ok", "", 1.0, 1).validate().is_err());
        assert!(create("ok", &"b".repeat(51), 1.0, 1).validate().is_err());
    }

    #[test]
    fn create_rejects_bad_price_and_quantity() {
        assert!(create("ok", "ok", 0.0, 1).validate().is_err());
        assert!(create("ok", "ok", -2.0, 1).validate().is_err());
        assert!(create("ok", "ok", f64::NAN, 1).validate().is_err());
        assert!(create("ok", "ok", 1.0, -1).validate().is_err());
    }

    #[test]
    fn create_rejects_oversized_image() {
        let mut c = create("ok", "ok", 1.0, 1);
        c.image = Some("i".repeat(501));
        assert!(c.validate().is_err());
        c.image = Some("i".repeat(500));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn update_validates_only_supplied_fields() {
        assert!(SeedUpdate::default().validate().is_ok());
        let update = SeedUpdate {
            price: Some(3.0),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
        let update = SeedUpdate {
            price: Some(0.0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
        let update = SeedUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn restock_requires_positive_quantity() {
        assert!(RestockRequest { quantity: 1 }.validate().is_ok());
        assert!(RestockRequest { quantity: 50 }.validate().is_ok());
        assert!(RestockRequest { quantity: 0 }.validate().is_err());
        assert!(RestockRequest { quantity: -10 }.validate().is_err());
    }

    #[test]
    fn search_rejects_negative_price_bounds() {
        let q = SearchQuery {
            min_price: Some(-1.0),
            ..Default::default()
        };
        assert!(q.validate().is_err());
        let q = SearchQuery {
            max_price: Some(-0.5),
            ..Default::default()
        };
        assert!(q.validate().is_err());
        let q = SearchQuery {
            min_price: Some(0.0),
            max_price: Some(10.0),
            ..Default::default()
        };
        assert!(q.validate().is_ok());
        assert!(SearchQuery::default().validate().is_ok());
    }

    #[test]
    fn search_drops_empty_strings() {
        let q = SearchQuery {
            name: Some(String::new()),
            category: Some("Spice".into()),
            min_price: Some(2.0),
            max_price: None,
        }
        .normalized();
        assert!(q.name.is_none());
        assert_eq!(q.category.as_deref(), Some("Spice"));
        assert_eq!(q.min_price, Some(2.0));
    }
}
