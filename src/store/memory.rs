use crate::model::{Id, Movie, MoviePatch};
use crate::store::traits::MovieStore;
use anyhow::{anyhow, Result};
use parking_lot::RwLock;

/// Process-local ordered collection of movies
#[derive(Debug, Default)]
pub struct InMemoryStore {
    movies: RwLock<Vec<Movie>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-validated movies, rejecting duplicate ids
    pub fn with_movies(movies: Vec<Movie>) -> Result<Self> {
        let store = Self::new();
        {
            let mut guard = store.movies.write();
            for movie in movies {
                if guard.iter().any(|m| m.id == movie.id) {
                    return Err(anyhow!("Duplicate movie id '{}'", movie.id));
                }
                guard.push(movie);
            }
        }
        Ok(store)
    }
}

#[async_trait::async_trait]
impl MovieStore for InMemoryStore {
    async fn list_movies(&self, genre: Option<&str>) -> Result<Vec<Movie>> {
        let movies = self.movies.read();
        Ok(match genre {
            Some(genre) => movies.iter().filter(|m| m.has_genre(genre)).cloned().collect(),
            None => movies.clone(),
        })
    }

    async fn get_movie(&self, id: &Id) -> Result<Option<Movie>> {
        Ok(self.movies.read().iter().find(|m| &m.id == id).cloned())
    }

    async fn insert_movie(&self, movie: Movie) -> Result<()> {
        let mut movies = self.movies.write();
        if movies.iter().any(|m| m.id == movie.id) {
            return Err(anyhow!("Movie id '{}' already exists", movie.id));
        }
        movies.push(movie);
        Ok(())
    }

    async fn update_movie(&self, id: &Id, patch: MoviePatch) -> Result<Option<Movie>> {
        let mut movies = self.movies.write();
        Ok(movies.iter_mut().find(|m| &m.id == id).map(|movie| {
            movie.apply_patch(patch);
            movie.clone()
        }))
    }

    async fn delete_movie(&self, id: &Id) -> Result<bool> {
        let mut movies = self.movies.write();
        match movies.iter().position(|m| &m.id == id) {
            Some(index) => {
                movies.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Genre, NewMovie};

    fn movie(id: &str, title: &str, genre: Vec<Genre>) -> Movie {
        Movie::new_with_id(
            id.to_string(),
            NewMovie {
                title: title.to_string(),
                year: 2001,
                director: "Someone".to_string(),
                duration: 100,
                rate: 7.0,
                poster: "https://example.com/poster.jpg".to_string(),
                genre,
            },
        )
    }

    async fn count(store: &InMemoryStore) -> usize {
        store.list_movies(None).await.unwrap().len()
    }

    fn seeded() -> InMemoryStore {
        InMemoryStore::with_movies(vec![
            movie("a", "Alpha", vec![Genre::Action, Genre::Crime]),
            movie("b", "Beta", vec![Genre::Drama]),
            movie("c", "Gamma", vec![Genre::Crime]),
        ])
        .unwrap()
    }

    #[test]
    fn test_with_movies_rejects_duplicate_ids() {
        let result = InMemoryStore::with_movies(vec![
            movie("a", "Alpha", vec![]),
            movie("a", "Again", vec![]),
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_preserves_order_and_filters_by_genre() {
        let store = seeded();

        let all = store.list_movies(None).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let crime = store.list_movies(Some("cRiMe")).await.unwrap();
        let ids: Vec<&str> = crime.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        assert!(store.list_movies(Some("Horror")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_appends_and_rejects_existing_id() {
        let store = seeded();
        store
            .insert_movie(movie("d", "Delta", vec![Genre::Comedy]))
            .await
            .unwrap();
        assert_eq!(count(&store).await, 4);
        assert_eq!(store.list_movies(None).await.unwrap()[3].id, "d");

        assert!(store.insert_movie(movie("a", "Dup", vec![])).await.is_err());
        assert_eq!(count(&store).await, 4);
    }

    #[tokio::test]
    async fn test_update_merges_in_place() {
        let store = seeded();
        let updated = store
            .update_movie(
                &"b".to_string(),
                MoviePatch {
                    title: Some("Beta Prime".to_string()),
                    ..MoviePatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Beta Prime");
        assert_eq!(updated.genre, vec![Genre::Drama]);
        assert_eq!(
            store.get_movie(&"b".to_string()).await.unwrap(),
            Some(updated)
        );

        let missing = store
            .update_movie(&"zzz".to_string(), MoviePatch::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = seeded();
        assert!(!store.delete_movie(&"zzz".to_string()).await.unwrap());
        assert_eq!(count(&store).await, 3);

        assert!(store.delete_movie(&"b".to_string()).await.unwrap());
        assert_eq!(count(&store).await, 2);
        assert!(store.get_movie(&"b".to_string()).await.unwrap().is_none());
    }
}
