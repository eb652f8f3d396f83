use crate::{kinopoisk::MovieInfo, storage::RequestStats};

pub const START_TEXT: &str = "Hi! I look up Kinopoisk ratings for you.\n\n\
Send me a link like:\n\
https://www.kinopoisk.ru/film/535341/\n\n\
Commands:\n\
/start - get started\n\
/help - this message\n\
/stats - request statistics";

pub const LOOKING_UP_TEXT: &str = "\u{23f3} Looking up the movie...";

pub const BAD_LINK_TEXT: &str = "\u{274c} That does not look like a Kinopoisk movie link.\n\
Please send a full link like:\n\
https://www.kinopoisk.ru/film/326/";

pub const UNAVAILABLE_TEXT: &str = "\u{26a0}\u{fe0f} Could not fetch the movie info.\n\
The service may be temporarily unavailable.";

pub const OPEN_BUTTON_TEXT: &str = "\u{1f517} Open on Kinopoisk";

pub fn movie_reply(movie: &MovieInfo) -> String {
    let mut lines = vec![match movie.year {
        Some(year) => format!("\u{1f3ac} {} ({year})", movie.title),
        None => format!("\u{1f3ac} {}", movie.title),
    }];

    if let Some(rating) = movie.rating {
        lines.push(format!("\u{2b50} Kinopoisk rating: {rating}"));
        if rating >= 8.0 {
            lines.push("\u{1f525} A must-watch".to_string());
        } else if rating >= 6.0 {
            lines.push("\u{1f44d} A solid film".to_string());
        } else {
            lines.push("\u{1f937} An acquired taste".to_string());
        }
    } else {
        lines.push("Rating unavailable".to_string());
    }

    lines.join("\n")
}

pub fn stats_reply(stats: &RequestStats) -> String {
    let mut lines = vec![format!("Total requests: {}", stats.total)];

    if stats.top_movies.is_empty() {
        lines.push("No statistics yet - send a few links first \u{1f642}".to_string());
    } else {
        lines.push("\nTop movies by requests:".to_string());
        for (label, count) in &stats.top_movies {
            lines.push(format!("\u{2022} {label} \u{2014} {count}"));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinopoisk::MovieInfo;

    fn movie(rating: Option<f64>) -> MovieInfo {
        MovieInfo {
            title: "Film326".to_string(),
            year: Some(2001),
            rating,
            url: "https://www.kinopoisk.ru/film/326/".to_string(),
        }
    }

    #[test]
    fn high_rating_gets_must_watch_tag() {
        let reply = movie_reply(&movie(Some(8.0)));
        assert!(reply.contains("Film326 (2001)"));
        assert!(reply.contains("Kinopoisk rating: 8"));
        assert!(reply.contains("must-watch"));
    }

    #[test]
    fn mid_rating_gets_solid_tag() {
        let reply = movie_reply(&movie(Some(7.99)));
        assert!(reply.contains("solid film"));
        assert!(!reply.contains("must-watch"));
    }

    #[test]
    fn low_rating_gets_acquired_taste_tag() {
        let reply = movie_reply(&movie(Some(5.99)));
        assert!(reply.contains("acquired taste"));
        assert!(!reply.contains("solid film"));
    }

    #[test]
    fn missing_rating_gets_single_unavailable_line() {
        let reply = movie_reply(&movie(None));
        let lines: Vec<&str> = reply.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Rating unavailable");
    }

    #[test]
    fn title_line_omits_missing_year() {
        let mut m = movie(Some(9.1));
        m.year = None;
        let reply = movie_reply(&m);
        assert!(reply.contains("Film326\n"));
        assert!(!reply.contains("("));
    }

    #[test]
    fn stats_reply_lists_top_movies() {
        let stats = RequestStats {
            total: 12,
            top_movies: vec![("ID 326".to_string(), 7), ("ID 535341".to_string(), 5)],
        };
        let reply = stats_reply(&stats);
        assert!(reply.contains("Total requests: 12"));
        assert!(reply.contains("\u{2022} ID 326 \u{2014} 7"));
        assert!(reply.contains("\u{2022} ID 535341 \u{2014} 5"));
    }

    #[test]
    fn stats_reply_has_empty_state() {
        let stats = RequestStats { total: 0, top_movies: vec![] };
        let reply = stats_reply(&stats);
        assert!(reply.contains("Total requests: 0"));
        assert!(reply.contains("No statistics yet"));
    }
}
