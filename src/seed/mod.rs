use crate::logic::MovieValidator;
use crate::model::Movie;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Movies bundled with the binary, used when no seed file is configured
pub const BUNDLED_MOVIES: &str = include_str!("movies.json");

/// Load seed movies from `path`, or the bundled collection when `None`
pub fn load_seed_movies<V: MovieValidator + ?Sized>(
    path: Option<&Path>,
    validator: &V,
) -> Result<Vec<Movie>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read seed file {}", path.display()))?;
            parse_seed_movies(&raw, validator)
                .with_context(|| format!("Invalid seed file {}", path.display()))
        }
        None => parse_seed_movies(BUNDLED_MOVIES, validator),
    }
}

/// Parse a JSON array of movies, running each through full validation
pub fn parse_seed_movies<V: MovieValidator + ?Sized>(raw: &str, validator: &V) -> Result<Vec<Movie>> {
    let records: Vec<Value> = serde_json::from_str(raw).context("Seed data must be a JSON array")?;

    let mut seen = HashSet::new();
    let mut movies = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("Seed movie #{} has no string id", index))?;

        if !seen.insert(id.to_string()) {
            return Err(anyhow!("Duplicate seed movie id '{}'", id));
        }

        let new_movie = validator
            .validate_full(record)
            .map_err(|e| anyhow!("Seed movie '{}' is invalid: {}", id, e))?;
        movies.push(Movie::new_with_id(id.to_string(), new_movie));
    }

    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::SchemaValidator;

    #[test]
    fn test_bundled_movies_are_valid() {
        let movies = load_seed_movies(None, &SchemaValidator::new()).unwrap();
        assert_eq!(movies.len(), 10);
        assert_eq!(movies[0].title, "The Shawshank Redemption");
    }

    #[test]
    fn test_rejects_invalid_record() {
        let raw = r#"[{"id": "x", "title": "Broken", "year": 1700}]"#;
        let err = parse_seed_movies(raw, &SchemaValidator::new()).unwrap_err();
        assert!(err.to_string().contains("Seed movie 'x' is invalid"));
    }

    #[test]
    fn test_rejects_duplicate_ids_and_missing_ids() {
        let movie = r#"{"id": "x", "title": "T", "year": 2000, "director": "D", "duration": 90,
            "poster": "https://example.com/p.jpg", "genre": []}"#;
        let raw = format!("[{},{}]", movie, movie);
        let err = parse_seed_movies(&raw, &SchemaValidator::new()).unwrap_err();
        assert!(err.to_string().contains("Duplicate seed movie id 'x'"));

        let err = parse_seed_movies(r#"[{"title": "T"}]"#, &SchemaValidator::new()).unwrap_err();
        assert!(err.to_string().contains("has no string id"));
    }

    #[test]
    fn test_missing_file() {
        let result = load_seed_movies(
            Some(Path::new("/definitely/not/here/movies.json")),
            &SchemaValidator::new(),
        );
        assert!(result.is_err());
    }
}
