use std::sync::LazyLock;

use regex::Regex;

static MOVIE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?:film|series)/(\d+)").expect("Invalid Regex"));

/// Pulls the numeric movie id out of a Kinopoisk link. The first
/// `/film/<id>` or `/series/<id>` segment wins; surrounding text is ignored.
pub fn extract_movie_id(text: &str) -> Option<&str> {
    MOVIE_ID_RE.captures(text).map(|c| c.get(1).unwrap().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_film_id() {
        assert_eq!(extract_movie_id("https://www.kinopoisk.ru/film/535341/"), Some("535341"));
    }

    #[test]
    fn extracts_series_id() {
        assert_eq!(extract_movie_id("https://www.kinopoisk.ru/series/4443734/"), Some("4443734"));
    }

    #[test]
    fn ignores_surrounding_text() {
        assert_eq!(
            extract_movie_id("check this out: www.kinopoisk.ru/film/326 (so good)"),
            Some("326")
        );
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(extract_movie_id("/film/111/ and also /series/222/"), Some("111"));
    }

    #[test]
    fn rejects_text_without_id() {
        assert_eq!(extract_movie_id("not a link"), None);
        assert_eq!(extract_movie_id("https://www.kinopoisk.ru/film/"), None);
        assert_eq!(extract_movie_id(""), None);
    }
}
