use crate::{
    models::{Identity, NewReview, Review},
    services::store::{now, parse_id, BookStore},
    utils::{AppError, AppResult},
};
use mongodb::bson::oid::ObjectId;

impl BookStore {
    pub async fn reviews(&self, book_id: &str) -> AppResult<Vec<Review>> {
        self.repo.find_reviews_by_book(book_id).await
    }

    /// The caller becomes the review's owner.
    pub async fn create_review(&self, identity: &Identity, input: NewReview) -> AppResult<Review> {
        let now = now();
        let review = Review {
            id: ObjectId::new(),
            content: input.content,
            book_id: input.book_id,
            user_id: identity.uid.clone(),
            created: now,
            updated: now,
        };
        self.repo.insert_review(&review).await?;

        log::info!(
            "✅ Review {} on book {} created by {}",
            review.id,
            review.book_id,
            identity.uid
        );
        Ok(review)
    }

    pub async fn update_review(
        &self,
        identity: &Identity,
        book_id: &str,
        review_id: &str,
        content: &str,
    ) -> AppResult<Review> {
        let id = self.owned_review(identity, book_id, review_id).await?;
        self.repo
            .update_review_content(id, &identity.uid, content, now())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("review {}", review_id)))
    }

    pub async fn remove_review(
        &self,
        identity: &Identity,
        book_id: &str,
        review_id: &str,
    ) -> AppResult<Review> {
        let id = self.owned_review(identity, book_id, review_id).await?;
        let review = self
            .repo
            .delete_review(id, &identity.uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("review {}", review_id)))?;

        log::info!("🗑️ Review {} removed by {}", review_id, identity.uid);
        Ok(review)
    }

    /// Looks the review up under its book and checks that the caller owns it.
    async fn owned_review(
        &self,
        identity: &Identity,
        book_id: &str,
        review_id: &str,
    ) -> AppResult<ObjectId> {
        let id = parse_id(review_id)?;
        let review = self
            .repo
            .find_review(id, book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("review {} on book {}", review_id, book_id)))?;

        if review.user_id != identity.uid {
            log::warn!(
                "⛔ User {} tried to modify review {} owned by {}",
                identity.uid,
                review_id,
                review.user_id
            );
            return Err(AppError::Authorization(
                "only the author of a review may change it".to_string(),
            ));
        }
        Ok(id)
    }
}
