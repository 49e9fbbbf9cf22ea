use std::collections::{HashMap, HashSet};

use crate::server::{
    data::Store,
    error::{auth::AuthError, AppError},
    model::{
        book::{Book, BookFields, BookPage, BookQuery, BookWithOwner},
        user::{User, UserRef},
    },
    util::{id::new_id, time},
};

pub struct BookService<'a> {
    store: &'a dyn Store,
}

impl<'a> BookService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Gets one page of the catalogue with owner names resolved.
    pub async fn list(&self, query: BookQuery) -> Result<BookPage, AppError> {
        let (books, total) = self.store.list_books(&query).await?;

        Ok(BookPage {
            books: self.with_owners(books).await?,
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    pub async fn get(&self, id: &str) -> Result<BookWithOwner, AppError> {
        let book = self.find(id).await?;
        let mut books = self.with_owners(vec![book]).await?;
        books
            .pop()
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Adds a book owned by `user`, with an empty rating.
    pub async fn create(&self, user: &User, fields: BookFields) -> Result<BookWithOwner, AppError> {
        let entity = fields.into_entity(new_id(), user.id.clone(), time::now());
        let book = self.store.insert_book(entity).await?;

        tracing::info!("User {} added book {}", user.id, book.id);

        Ok(BookWithOwner {
            book,
            owner: user.reference(),
        })
    }

    /// Replaces a book's editable fields. Only the owner may do this.
    pub async fn update(
        &self,
        user: &User,
        id: &str,
        fields: BookFields,
    ) -> Result<BookWithOwner, AppError> {
        let book = self.find(id).await?;
        ensure_owner(&book, user, "update this book")?;

        let book = self
            .store
            .update_book(id, &fields, time::now())
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        Ok(BookWithOwner {
            book,
            owner: user.reference(),
        })
    }

    /// Deletes a book and every review of it. Only the owner may do this.
    pub async fn delete(&self, user: &User, id: &str) -> Result<(), AppError> {
        let book = self.find(id).await?;
        ensure_owner(&book, user, "delete this book")?;

        if !self.store.delete_book(id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        let removed = self.store.delete_reviews_for_book(id).await?;

        tracing::info!("User {} deleted book {id} and {removed} reviews", user.id);

        Ok(())
    }

    /// The user's own books, newest first.
    pub async fn owned_by(&self, user: &User) -> Result<Vec<BookWithOwner>, AppError> {
        let books = self.store.books_by_owner(&user.id).await?;
        let owner = user.reference();

        Ok(books
            .into_iter()
            .map(|book| BookWithOwner {
                book,
                owner: owner.clone(),
            })
            .collect())
    }

    async fn find(&self, id: &str) -> Result<Book, AppError> {
        self.store
            .find_book(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Resolves owner names with one lookup; deleted owners become "Unknown User".
    async fn with_owners(&self, books: Vec<Book>) -> Result<Vec<BookWithOwner>, AppError> {
        let ids: Vec<String> = books
            .iter()
            .map(|b| b.added_by.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let owners: HashMap<String, UserRef> = self
            .store
            .find_users(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u.reference()))
            .collect();

        Ok(books
            .into_iter()
            .map(|book| {
                let owner = owners
                    .get(&book.added_by)
                    .cloned()
                    .unwrap_or_else(|| UserRef::unknown(&book.added_by));
                BookWithOwner { book, owner }
            })
            .collect())
    }
}

fn ensure_owner(book: &Book, user: &User, action: &'static str) -> Result<(), AuthError> {
    if book.is_owned_by(&user.id) {
        Ok(())
    } else {
        Err(AuthError::NotOwner {
            user_id: user.id.clone(),
            action,
        })
    }
}

#[cfg(test)]
mod test;
