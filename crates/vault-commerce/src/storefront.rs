//! Storefront session.
//!
//! [`Storefront`] bundles the catalog with the cart, wishlist and order
//! stores of one [`Storage`]. Build one per session and pass it around.

use vault_store::Storage;

use crate::cart::{CartStore, CartView, CheckoutTotals, PricingPolicy};
use crate::catalog::Catalog;
use crate::checkout::{CheckoutFlow, NewOrder, Order, OrderItem, OrderStore, PaymentDetails, ShippingAddress};
use crate::config::StorefrontConfig;
use crate::enrich::enrich;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::wishlist::{WishlistStore, WishlistView};

/// One shopper's view of the store.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    cart: CartStore,
    wishlist: WishlistStore,
    orders: OrderStore,
    pricing: PricingPolicy,
}

impl Storefront {
    /// Open the configured slots of `storage`.
    pub fn new(catalog: Catalog, storage: &Storage, config: &StorefrontConfig) -> Self {
        Self {
            catalog,
            cart: CartStore::new(storage.slot(config.storage.cart_slot.as_str())),
            wishlist: WishlistStore::new(storage.slot(config.storage.wishlist_slot.as_str())),
            orders: OrderStore::new(
                storage.slot(config.storage.orders_slot.as_str()),
                config.orders.brand_tag.as_str(),
            ),
            pricing: config.pricing,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    /// Cart lines with their products. Lines for unknown products are left out.
    pub async fn cart_view(&self) -> CartView {
        CartView::new(enrich(self.cart.get_cart(), &self.catalog).await)
    }

    /// Wishlist entries with their products. Unknown products are left out.
    pub async fn wishlist_view(&self) -> WishlistView {
        enrich(self.wishlist.get_all(), &self.catalog).await
    }

    /// Add a catalog product to the cart at its current price.
    pub async fn add_product_to_cart(
        &self,
        product_id: ProductId,
        quantity: u32,
        size: &str,
        color: &str,
    ) -> Result<CartView, CommerceError> {
        let product = self.catalog.get(product_id)?;
        self.cart
            .add_to_cart(product_id, quantity, size, color, product.price)
            .await?;
        Ok(self.cart_view().await)
    }

    /// Toggle a catalog product on the wishlist. Returns whether it is saved.
    pub async fn toggle_wishlist(&self, product_id: ProductId) -> Result<bool, CommerceError> {
        self.catalog.get(product_id)?;
        Ok(self.wishlist.toggle(product_id).await)
    }

    /// Pricing breakdown for the current cart.
    pub async fn checkout_totals(&self) -> CheckoutTotals {
        self.pricing.totals(self.cart_view().await.total())
    }

    /// Place an order for the current cart.
    ///
    /// Both forms are validated together, so the error lists every bad
    /// field. On success the ordered lines leave the cart; anything added
    /// while the order was being placed stays.
    pub async fn place_order(
        &self,
        shipping: &ShippingAddress,
        payment: &PaymentDetails,
    ) -> Result<Order, CommerceError> {
        let lines = self.cart.get_cart();
        let view = CartView::new(enrich(lines.clone(), &self.catalog).await);
        if view.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let mut errors = shipping.field_errors();
        errors.extend(payment.field_errors());
        errors.into_result()?;

        let items = view.items.iter().map(OrderItem::from_cart).collect();
        let totals = self.pricing.totals(view.total());
        let order = self
            .orders
            .create_order(NewOrder::new(items, shipping.clone(), payment.mask(), totals))
            .await;

        self.cart.remove_ordered(&lines).await;
        Ok(order)
    }

    /// Place an order from a finished checkout flow and complete it.
    pub async fn checkout(&self, flow: &mut CheckoutFlow) -> Result<Order, CommerceError> {
        let (shipping, payment) = flow.ready()?;
        let order = self.place_order(shipping, payment).await?;
        flow.complete()?;
        Ok(order)
    }
}
