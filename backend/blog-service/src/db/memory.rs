//! In-memory document store backed by concurrent hash maps.
//!
//! One `DashMap` per collection; documents are cloned on the way in and
//! out so no lock is held across an await point. Ordering guarantees are
//! those of a plain document store: last write wins at document level.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::models::{Comment, DocumentId, Post, User};

use super::{CommentStore, PostStore, StoreResult, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<DocumentId, User>,
    posts: DashMap<DocumentId, Post>,
    comments: DashMap<DocumentId, Comment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: &DocumentId) -> StoreResult<Option<User>> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().username == username)
            .map(|entry| entry.value().clone()))
    }

    async fn insert(&self, user: User) -> StoreResult<User> {
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn find_by_id(&self, id: &DocumentId) -> StoreResult<Option<Post>> {
        Ok(self.posts.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> StoreResult<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn insert(&self, post: Post) -> StoreResult<Post> {
        self.posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn update(&self, id: &DocumentId, post: Post) -> StoreResult<bool> {
        match self.posts.get_mut(id) {
            Some(mut entry) => {
                *entry = post;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &DocumentId) -> StoreResult<bool> {
        Ok(self.posts.remove(id).is_some())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn find_by_id(&self, id: &DocumentId) -> StoreResult<Option<Comment>> {
        Ok(self.comments.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_post(&self, post_id: &DocumentId) -> StoreResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|entry| entry.value().post == *post_id)
            .map(|entry| entry.value().clone())
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn insert(&self, comment: Comment) -> StoreResult<Comment> {
        self.comments.insert(comment.id.clone(), comment.clone());
        Ok(comment)
    }

    async fn update(&self, id: &DocumentId, comment: Comment) -> StoreResult<bool> {
        match self.comments.get_mut(id) {
            Some(mut entry) => {
                *entry = comment;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &DocumentId) -> StoreResult<bool> {
        Ok(self.comments.remove(id).is_some())
    }

    async fn delete_by_post(&self, post_id: &DocumentId) -> StoreResult<u64> {
        let doomed: Vec<DocumentId> = self
            .comments
            .iter()
            .filter(|entry| entry.value().post == *post_id)
            .map(|entry| entry.key().clone())
            .collect();
        let mut removed = 0;
        for id in doomed {
            if self.comments.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn user(username: &str) -> User {
        User {
            id: DocumentId::generate(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            date_of_birth: None,
            username: username.into(),
            password_hash: "hash".into(),
        }
    }

    fn post(author: &DocumentId) -> Post {
        let now = Utc::now();
        Post {
            id: DocumentId::generate(),
            author: author.clone(),
            title: "title".into(),
            content: "content".into(),
            published: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn comment(author: &DocumentId, post_id: &DocumentId) -> Comment {
        let now = Utc::now();
        Comment {
            id: DocumentId::generate(),
            author: author.clone(),
            post: post_id.clone(),
            text: "hello".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn users_are_found_by_username() {
        let store = MemoryStore::new();
        let ada = UserStore::insert(&store, user("ada")).await.unwrap();

        let found = store.find_by_username("ada").await.unwrap().unwrap();
        assert_eq!(found.id, ada.id);
        assert!(store.find_by_username("grace").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn post_update_and_delete_report_presence() {
        let store = MemoryStore::new();
        let author = DocumentId::generate();
        let stored = PostStore::insert(&store, post(&author)).await.unwrap();

        let mut changed = stored.clone();
        changed.title = "new title".into();
        assert!(PostStore::update(&store, &stored.id, changed.clone())
            .await
            .unwrap());

        let reloaded = PostStore::find_by_id(&store, &stored.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.title, "new title");

        assert!(PostStore::delete(&store, &stored.id).await.unwrap());
        assert!(!PostStore::delete(&store, &stored.id).await.unwrap());
        assert!(!PostStore::update(&store, &stored.id, changed).await.unwrap());
    }

    #[tokio::test]
    async fn comments_filter_by_post_and_cascade() {
        let store = MemoryStore::new();
        let author = DocumentId::generate();
        let first = PostStore::insert(&store, post(&author)).await.unwrap();
        let second = PostStore::insert(&store, post(&author)).await.unwrap();

        CommentStore::insert(&store, comment(&author, &first.id))
            .await
            .unwrap();
        CommentStore::insert(&store, comment(&author, &first.id))
            .await
            .unwrap();
        let other = CommentStore::insert(&store, comment(&author, &second.id))
            .await
            .unwrap();

        assert_eq!(store.find_by_post(&first.id).await.unwrap().len(), 2);
        assert_eq!(store.delete_by_post(&first.id).await.unwrap(), 2);
        assert!(store.find_by_post(&first.id).await.unwrap().is_empty());

        // the other post's thread is untouched
        let survivors = store.find_by_post(&second.id).await.unwrap();
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].id, other.id);
    }
}
