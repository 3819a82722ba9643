use crate::{
    models::{Book, Cart, CartData, CartItem, Identity, WishList, WishListUpdate},
    services::store::{parse_refs, BookStore},
    utils::{AppError, AppResult},
};

impl BookStore {
    // ==================== CART ====================

    pub async fn cart(&self, identity: &Identity) -> AppResult<Option<Cart>> {
        self.repo.find_cart(&identity.uid).await
    }

    /// Replaces the caller's cart items, creating the cart on first use.
    pub async fn set_cart(&self, identity: &Identity, input: CartData) -> AppResult<Cart> {
        if let Some(item) = input.items.iter().find(|item| item.quantity < 1) {
            return Err(AppError::Validation(format!(
                "Quantity for book {} must be at least 1",
                item.book_id
            )));
        }

        let items: Vec<CartItem> = input.items.into_iter().map(CartItem::from).collect();
        let cart = self.repo.upsert_cart_items(&identity.uid, &items).await?;

        log::info!("🛒 Cart of {} set to {} items", identity.uid, cart.items.len());
        Ok(cart)
    }

    // ==================== WISH LIST ====================

    pub async fn wish_list(&self, identity: &Identity) -> AppResult<Option<WishList>> {
        self.repo.find_wish_list(&identity.uid).await
    }

    /// Adds then removes, as two separate upserts on the caller's wish list.
    pub async fn update_wish_list(
        &self,
        identity: &Identity,
        input: WishListUpdate,
    ) -> AppResult<Option<WishList>> {
        let mut wish_list = None;

        if !input.add.is_empty() {
            wish_list = Some(self.repo.add_to_wish_list(&identity.uid, &input.add).await?);
        }
        if !input.remove.is_empty() {
            wish_list = Some(
                self.repo
                    .pull_from_wish_list(&identity.uid, &input.remove)
                    .await?,
            );
        }

        match wish_list {
            Some(wish_list) => Ok(Some(wish_list)),
            None => self.repo.find_wish_list(&identity.uid).await,
        }
    }

    pub async fn wish_list_books(&self, wish_list: &WishList) -> AppResult<Vec<Book>> {
        let ids = parse_refs(&wish_list.books_id);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.find_books(&ids).await
    }
}
