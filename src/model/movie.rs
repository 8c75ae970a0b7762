use crate::model::{generate_id, Id};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_RATE: f64 = 5.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Crime,
    Comedy,
    Drama,
    Fantasy,
    Horror,
    Thriller,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Genre {
    pub const ALL: [Genre; 9] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Crime,
        Genre::Comedy,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Thriller,
        Genre::SciFi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Crime => "Crime",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Thriller => "Thriller",
            Genre::SciFi => "Sci-Fi",
        }
    }

    /// Exact (case-sensitive) lookup, matching the wire names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == name)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Id,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<Genre>,
    pub rate: f64,
}

/// A fully validated movie that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub rate: f64,
    pub poster: String,
    pub genre: Vec<Genre>,
}

/// Validated subset of movie fields; `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub duration: Option<u32>,
    pub rate: Option<f64>,
    pub poster: Option<String>,
    pub genre: Option<Vec<Genre>>,
}

impl Movie {
    pub fn new(new_movie: NewMovie) -> Self {
        Self::new_with_id(generate_id(), new_movie)
    }

    pub fn new_with_id(id: Id, new_movie: NewMovie) -> Self {
        Self {
            id,
            title: new_movie.title,
            year: new_movie.year,
            director: new_movie.director,
            duration: new_movie.duration,
            poster: new_movie.poster,
            genre: new_movie.genre,
            rate: new_movie.rate,
        }
    }

    pub fn apply_patch(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(director) = patch.director {
            self.director = director;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
        if let Some(poster) = patch.poster {
            self.poster = poster;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
    }

    pub fn has_genre(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.genre
            .iter()
            .any(|g| g.as_str().to_lowercase() == needle)
    }
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        *self == MoviePatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Movie {
        Movie::new_with_id(
            "m-1".to_string(),
            NewMovie {
                title: "The Matrix".to_string(),
                year: 1999,
                director: "Lana Wachowski".to_string(),
                duration: 136,
                rate: 8.7,
                poster: "https://example.com/matrix.jpg".to_string(),
                genre: vec![Genre::Action, Genre::SciFi],
            },
        )
    }

    #[test]
    fn test_genre_wire_names() {
        let json = serde_json::to_string(&vec![Genre::SciFi, Genre::Drama]).unwrap();
        assert_eq!(json, r#"["Sci-Fi","Drama"]"#);
        assert_eq!(Genre::from_name("Sci-Fi"), Some(Genre::SciFi));
        assert_eq!(Genre::from_name("sci-fi"), None);
        assert_eq!(Genre::from_name("Romance"), None);
    }

    #[test]
    fn test_has_genre_ignores_case() {
        let movie = sample();
        assert!(movie.has_genre("action"));
        assert!(movie.has_genre("SCI-FI"));
        assert!(!movie.has_genre("Drama"));
    }

    #[test]
    fn test_apply_patch_overrides_only_given_fields() {
        let mut movie = sample();
        let before = movie.clone();

        movie.apply_patch(MoviePatch {
            year: Some(2000),
            genre: Some(vec![Genre::Thriller]),
            ..MoviePatch::default()
        });

        assert_eq!(movie.year, 2000);
        assert_eq!(movie.genre, vec![Genre::Thriller]);
        assert_eq!(movie.id, before.id);
        assert_eq!(movie.title, before.title);
        assert_eq!(movie.director, before.director);
        assert_eq!(movie.duration, before.duration);
        assert_eq!(movie.rate, before.rate);
        assert_eq!(movie.poster, before.poster);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut movie = sample();
        let patch = MoviePatch::default();
        assert!(patch.is_empty());
        movie.apply_patch(patch);
        assert_eq!(movie, sample());
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["id", "title", "year", "director", "duration", "poster", "genre", "rate"] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        assert_eq!(obj.len(), 8);
    }
}
