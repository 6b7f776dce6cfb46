//! Items

use std::fmt;

use crate::prices::Price;

/// Opaque reference to an item's image. Never interpreted by the cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(Image);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Image {
    Resource(String),
    // Only reachable through `ImageRef::placeholder`
    Placeholder,
}

impl ImageRef {
    /// Creates a new image reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(Image::Resource(reference.into()))
    }

    /// The sentinel reference carried by synthesized items.
    pub fn placeholder() -> Self {
        Self(Image::Placeholder)
    }

    /// Returns `true` if this is the placeholder sentinel.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.0, Image::Placeholder)
    }

    /// Returns the resource reference, or `None` for the placeholder.
    pub fn as_str(&self) -> Option<&str> {
        match &self.0 {
            Image::Resource(reference) => Some(reference),
            Image::Placeholder => None,
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Image::Resource(reference) => f.write_str(reference),
            Image::Placeholder => f.write_str("<placeholder>"),
        }
    }
}

/// A purchasable catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogItem {
    name: String,
    unit_price: Price,
    image: ImageRef,
}

impl CatalogItem {
    /// Creates a new catalog item.
    pub fn new(name: impl Into<String>, unit_price: Price, image: ImageRef) -> Self {
        Self {
            name: name.into(),
            unit_price,
            image,
        }
    }

    /// Creates a zero priced stand-in for a name that is missing from the catalog.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::new(name, Price::ZERO, ImageRef::placeholder())
    }

    /// Returns the item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price of the item.
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Returns the image reference.
    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    /// Returns `true` if the item was synthesized rather than loaded from a catalog.
    pub fn is_placeholder(&self) -> bool {
        self.image.is_placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_named_like_the_sentinel_is_not_a_placeholder() {
        let image = ImageRef::new("placeholder");

        assert!(!image.is_placeholder());
        assert_ne!(image, ImageRef::placeholder());
        assert_eq!(image.as_str(), Some("placeholder"));
    }

    #[test]
    fn placeholder_has_zero_price_and_sentinel_image() {
        let item = CatalogItem::placeholder("Ghost");

        assert_eq!(item.name(), "Ghost");
        assert_eq!(item.unit_price(), Price::ZERO);
        assert!(item.image().is_placeholder());
        assert!(item.is_placeholder());
        assert_eq!(item.image().as_str(), None);
    }

    #[test]
    fn regular_items_are_not_placeholders() {
        let item = CatalogItem::new("Baguette", Price::from_units(40), ImageRef::new("baguette"));

        assert!(!item.is_placeholder());
        assert_eq!(item.image().as_str(), Some("baguette"));
    }
}
