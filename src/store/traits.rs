use crate::model::{Id, Movie, MoviePatch};
use anyhow::Result;

#[async_trait::async_trait]
pub trait MovieStore: Send + Sync {
    /// List movies in collection order, optionally keeping only those tagged
    /// with `genre` (case-insensitive)
    async fn list_movies(&self, genre: Option<&str>) -> Result<Vec<Movie>>;
    async fn get_movie(&self, id: &Id) -> Result<Option<Movie>>;
    /// Append a movie; fails if its id is already taken
    async fn insert_movie(&self, movie: Movie) -> Result<()>;
    /// Merge a patch over a stored movie, returning the updated record
    async fn update_movie(&self, id: &Id, patch: MoviePatch) -> Result<Option<Movie>>;
    async fn delete_movie(&self, id: &Id) -> Result<bool>;
}
