//! Persisted cart.

use vault_store::ListSlot;

use crate::cart::{CartLine, CartLineKey, CartPatch, MAX_LINE_QUANTITY};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Cart lines kept in one storage slot.
///
/// Every mutation is a read-modify-write under the slot lock and returns
/// the list as written.
#[derive(Debug, Clone)]
pub struct CartStore {
    slot: ListSlot<CartLine>,
}

impl CartStore {
    pub fn new(slot: ListSlot<CartLine>) -> Self {
        Self { slot }
    }

    /// Current cart lines.
    pub fn get_cart(&self) -> Vec<CartLine> {
        self.slot.read()
    }

    /// Add `quantity` of a product variant.
    ///
    /// Merges into the existing line with the same key, otherwise appends a
    /// new line with `unit_price` and the current time. The line may not end
    /// up above [`MAX_LINE_QUANTITY`].
    pub async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: u32,
        size: &str,
        color: &str,
        unit_price: Money,
    ) -> Result<Vec<CartLine>, CommerceError> {
        if quantity == 0 || quantity > MAX_LINE_QUANTITY {
            return Err(CommerceError::InvalidQuantity(quantity.into()));
        }

        let key = CartLineKey::new(product_id, size, color);
        let lines = self
            .slot
            .update(|lines| {
                match lines.iter_mut().find(|line| line.matches(&key)) {
                    Some(line) => {
                        let merged = i64::from(line.quantity) + i64::from(quantity);
                        if merged > i64::from(MAX_LINE_QUANTITY) {
                            return Err(CommerceError::InvalidQuantity(merged));
                        }
                        line.quantity += quantity;
                    }
                    None => lines.push(CartLine::new(product_id, quantity, size, color, unit_price)),
                }
                Ok(lines.clone())
            })
            .await?;

        tracing::debug!(product_id = %product_id, size, color, quantity, "Added to cart");
        Ok(lines)
    }

    /// Apply a patch to the line with `key`; no-op if there is none.
    ///
    /// A patched quantity below 1 removes the line. One above
    /// [`MAX_LINE_QUANTITY`] fails with `InvalidQuantity` and changes nothing.
    pub async fn update_cart_item(
        &self,
        key: &CartLineKey,
        patch: CartPatch,
    ) -> Result<Vec<CartLine>, CommerceError> {
        let quantity = match patch.quantity {
            Some(q) if q > i64::from(MAX_LINE_QUANTITY) => {
                return Err(CommerceError::InvalidQuantity(q));
            }
            Some(q) if q < 1 => return Ok(self.remove_from_cart(key).await),
            Some(q) => u32::try_from(q).ok(),
            None => None,
        };

        let lines = self
            .slot
            .update(|lines| {
                if let Some(line) = lines.iter_mut().find(|line| line.matches(key)) {
                    if let Some(quantity) = quantity {
                        line.quantity = quantity;
                    }
                    if let Some(price) = patch.price {
                        line.price = price;
                    }
                }
                lines.clone()
            })
            .await;
        Ok(lines)
    }

    /// Remove the line with `key`.
    pub async fn remove_from_cart(&self, key: &CartLineKey) -> Vec<CartLine> {
        self.slot
            .update(|lines| {
                lines.retain(|line| !line.matches(key));
                lines.clone()
            })
            .await
    }

    /// Remove every line.
    pub async fn clear_cart(&self) {
        self.slot.replace(Vec::new()).await;
        tracing::debug!("Cart cleared");
    }

    /// Take the quantities of `ordered` out of the cart.
    ///
    /// Lines drop out once nothing is left of them. Units added after
    /// `ordered` was read stay in the cart.
    pub async fn remove_ordered(&self, ordered: &[CartLine]) -> Vec<CartLine> {
        self.slot
            .update(|lines| {
                for taken in ordered {
                    let key = taken.key();
                    if let Some(line) = lines.iter_mut().find(|line| line.matches(&key)) {
                        line.quantity = line.quantity.saturating_sub(taken.quantity);
                    }
                }
                lines.retain(|line| line.quantity > 0);
                lines.clone()
            })
            .await
    }

    /// Total quantity over stored lines.
    pub fn item_count(&self) -> u64 {
        self.get_cart().iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price times quantity over stored lines.
    pub fn cart_total(&self) -> Money {
        self.get_cart().iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_store::Storage;

    fn store() -> CartStore {
        CartStore::new(Storage::in_memory().slot("voguevault_cart"))
    }

    const PRICE: Money = Money::from_cents(4999);

    #[tokio::test]
    async fn test_add_merges_same_key() {
        let cart = store();
        cart.add_to_cart(ProductId::new(7), 2, "M", "Black", PRICE).await.unwrap();
        let lines = cart.add_to_cart(ProductId::new(7), 3, "M", "Black", PRICE).await.unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
        assert_eq!(cart.cart_total(), Money::from_cents(24995));
    }

    #[tokio::test]
    async fn test_add_different_variant_appends() {
        let cart = store();
        cart.add_to_cart(ProductId::new(7), 1, "M", "Black", PRICE).await.unwrap();
        let lines = cart.add_to_cart(ProductId::new(7), 1, "L", "Black", PRICE).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[tokio::test]
    async fn test_add_zero_quantity_rejected() {
        let cart = store();
        let err = cart.add_to_cart(ProductId::new(7), 0, "M", "Black", PRICE).await.unwrap_err();
        assert!(matches!(err, CommerceError::InvalidQuantity(0)));
        assert!(cart.get_cart().is_empty());
    }

    #[tokio::test]
    async fn test_merge_keeps_first_price() {
        let cart = store();
        cart.add_to_cart(ProductId::new(7), 1, "M", "Black", PRICE).await.unwrap();
        let lines = cart
            .add_to_cart(ProductId::new(7), 1, "M", "Black", Money::from_cents(1))
            .await
            .unwrap();
        assert_eq!(lines[0].price, PRICE);
    }

    #[tokio::test]
    async fn test_update_quantity_and_price() {
        let cart = store();
        let key = CartLineKey::new(7, "M", "Black");
        cart.add_to_cart(ProductId::new(7), 1, "M", "Black", PRICE).await.unwrap();

        let lines = cart.update_cart_item(&key, CartPatch::quantity(4)).await.unwrap();
        assert_eq!(lines[0].quantity, 4);

        let lines = cart
            .update_cart_item(&key, CartPatch::price(Money::from_cents(3999)))
            .await
            .unwrap();
        assert_eq!(lines[0].quantity, 4);
        assert_eq!(lines[0].price, Money::from_cents(3999));
    }

    #[tokio::test]
    async fn test_update_two_units_to_five() {
        let cart = store();
        let key = CartLineKey::new(7, "M", "Black");
        cart.add_to_cart(ProductId::new(7), 2, "M", "Black", PRICE).await.unwrap();

        let lines = cart.update_cart_item(&key, CartPatch::quantity(5)).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
        assert_eq!(cart.cart_total(), Money::from_cents(24995));
        assert_eq!(cart.cart_total().to_string(), "$249.95");
    }

    #[tokio::test]
    async fn test_quantity_above_cap_rejected() {
        let cart = store();
        let key = CartLineKey::new(7, "M", "Black");

        let err = cart
            .add_to_cart(ProductId::new(7), u32::MAX, "M", "Black", PRICE)
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::InvalidQuantity(q) if q == i64::from(u32::MAX)));
        assert!(cart.get_cart().is_empty());

        cart.add_to_cart(ProductId::new(7), MAX_LINE_QUANTITY, "M", "Black", PRICE).await.unwrap();
        let err = cart.add_to_cart(ProductId::new(7), 5, "M", "Black", PRICE).await.unwrap_err();
        assert!(matches!(err, CommerceError::InvalidQuantity(1004)));
        assert_eq!(cart.get_cart()[0].quantity, MAX_LINE_QUANTITY);

        let err = cart
            .update_cart_item(&key, CartPatch::quantity(i64::from(u32::MAX) + 5))
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::InvalidQuantity(_)));
        assert_eq!(cart.get_cart()[0].quantity, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_item_count_of_stored_lines_does_not_overflow() {
        let storage = Storage::in_memory();
        storage.slot::<CartLine>("voguevault_cart").write(&[
            CartLine::new(ProductId::new(7), u32::MAX, "M", "Black", PRICE),
            CartLine::new(ProductId::new(1), 1, "M", "Red", PRICE),
        ]);

        let cart = CartStore::new(storage.slot("voguevault_cart"));
        assert_eq!(cart.item_count(), u64::from(u32::MAX) + 1);
    }

    #[tokio::test]
    async fn test_remove_ordered_keeps_later_additions() {
        let cart = store();
        cart.add_to_cart(ProductId::new(7), 2, "M", "Black", PRICE).await.unwrap();
        cart.add_to_cart(ProductId::new(1), 1, "S", "Red", PRICE).await.unwrap();
        let ordered = cart.get_cart();

        // Arrives after the snapshot was taken.
        cart.add_to_cart(ProductId::new(7), 3, "M", "Black", PRICE).await.unwrap();
        cart.add_to_cart(ProductId::new(5), 1, "One Size", "Red", PRICE).await.unwrap();

        let lines = cart.remove_ordered(&ordered).await;
        assert_eq!(lines.len(), 2);
        assert!(lines[0].matches(&CartLineKey::new(7, "M", "Black")));
        assert_eq!(lines[0].quantity, 3);
        assert!(lines[1].matches(&CartLineKey::new(5, "One Size", "Red")));
        assert_eq!(cart.item_count(), 4);
    }

    #[tokio::test]
    async fn test_update_below_one_removes_line() {
        let cart = store();
        let key = CartLineKey::new(7, "M", "Black");
        cart.add_to_cart(ProductId::new(7), 2, "M", "Black", PRICE).await.unwrap();

        let lines = cart.update_cart_item(&key, CartPatch::quantity(0)).await.unwrap();
        assert!(lines.is_empty());

        cart.add_to_cart(ProductId::new(7), 2, "M", "Black", PRICE).await.unwrap();
        let lines = cart.update_cart_item(&key, CartPatch::quantity(-3)).await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_line_is_noop() {
        let cart = store();
        cart.add_to_cart(ProductId::new(7), 2, "M", "Black", PRICE).await.unwrap();
        let lines = cart
            .update_cart_item(&CartLineKey::new(1, "S", "Red"), CartPatch::quantity(9))
            .await
            .unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let cart = store();
        cart.add_to_cart(ProductId::new(7), 1, "M", "Black", PRICE).await.unwrap();
        cart.add_to_cart(ProductId::new(1), 1, "S", "Red", PRICE).await.unwrap();

        let lines = cart.remove_from_cart(&CartLineKey::new(7, "M", "Black")).await;
        assert!(lines.iter().all(|l| !l.matches(&CartLineKey::new(7, "M", "Black"))));
        assert_eq!(lines.len(), 1);

        cart.clear_cart().await;
        assert!(cart.get_cart().is_empty());
        assert_eq!(cart.cart_total(), Money::zero());
        assert_eq!(cart.item_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_adds_do_not_lose_updates() {
        let cart = store();
        let tasks: Vec<_> = (0..40)
            .map(|_| {
                let cart = cart.clone();
                tokio::spawn(async move {
                    cart.add_to_cart(ProductId::new(7), 1, "M", "Black", PRICE).await.unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let lines = cart.get_cart();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 40);
    }
}
