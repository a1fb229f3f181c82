// ABOUTME: Extraction of a single movie page (microdata fields, plot, awards) into a Movie.
// ABOUTME: Title and id are required; every other field degrades to absent or a numeric default.

use scraper::{ElementRef, Html};

use crate::error::ClientError;
use crate::extractors::fields::{
    all_text, element_text, first_attr, first_text, parse_id, require_attr, require_text,
};
use crate::extractors::numeric::leading_int;
use crate::extractors::selectors::DETAIL;
use crate::model::{Awards, Movie, Rating};

const OP: &str = "ExtractDetail";

/// Branding the site appends to every synopsis.
const PLOT_SUFFIX: &str = " (FILMAFFINITY)";

/// Extract the full movie record from a detail page.
pub fn extract_movie(doc: &Html) -> Result<Movie, ClientError> {
    let root = doc.root_element();

    let id = parse_id(&require_attr(root, &DETAIL.id, "data-movie-id", OP, "id")?, OP)?;
    let title = require_text(root, &DETAIL.title, OP, "title")?;

    let rating = Rating::from_texts(
        first_text(root, &DETAIL.rating_average).as_deref(),
        first_text(root, &DETAIL.rating_count).as_deref(),
    );

    Ok(Movie {
        id,
        title,
        year: first_text(root, &DETAIL.year)
            .and_then(|t| leading_int(&t))
            .and_then(|y| u16::try_from(y).ok()),
        country: first_attr(root, &DETAIL.country, "alt"),
        poster: first_attr(root, &DETAIL.poster, "src").map(|src| large_poster(&src)),
        rating,
        directors: Some(all_text(root, &DETAIL.directors)),
        cast: Some(all_text(root, &DETAIL.cast)),
        genres: Some(all_text(root, &DETAIL.genres)),
        duration: first_text(root, &DETAIL.duration).and_then(|t| leading_int(&t)),
        plot: first_text(root, &DETAIL.plot).map(|p| strip_plot_suffix(&p)),
        awards: Some(extract_awards(root)),
        position: None,
    })
}

/// Swap the medium poster rendition for the large one.
fn large_poster(src: &str) -> String {
    src.replacen("mmed", "large", 1)
}

fn strip_plot_suffix(plot: &str) -> String {
    plot.replacen(PLOT_SUFFIX, "", 1).trim().to_string()
}

/// Awards read as "<year>: <description>. <metadata>" from each anchor's container.
fn extract_awards(root: ElementRef<'_>) -> Awards {
    let mut awards = Awards::new();

    // one leading year anchor per award line
    for anchor in root.select(&DETAIL.award_anchor) {
        let Some(container) = anchor.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        if let Some((year, description)) = parse_award_line(&element_text(container)) {
            awards.push(year, description);
        }
    }

    awards
}

fn parse_award_line(line: &str) -> Option<(String, String)> {
    let head = line.trim().split('.').next()?;
    let (year, description) = head.split_once(": ")?;
    let (year, description) = (year.trim(), description.trim());
    if year.is_empty() || description.is_empty() {
        return None;
    }
    Some((year.to_string(), description.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DETAIL_HTML: &str = r#"
        <html><body>
        <div id="left-column">
            <h1 id="main-title"><span itemprop="name">Titanic</span></h1>
            <div class="rate-movie-box" data-movie-id="190163"></div>
            <div id="movie-main-image-container">
                <a href="https://pics.filmaffinity.com/titanic-large.jpg">
                    <img src="https://pics.filmaffinity.com/titanic-321994924-mmed.jpg">
                </a>
            </div>
            <dl class="movie-info">
                <dd itemprop="datePublished">1997</dd>
                <dd itemprop="duration">194 min.</dd>
                <dd><span id="country-img"><img src="/imgs/countries/US.jpg" alt="Estados Unidos"></span></dd>
                <dd class="directors">
                    <span itemprop="director"><a><span itemprop="name">James Cameron</span></a></span>
                </dd>
                <dd>
                    <span itemprop="actor"><a><span itemprop="name">Leonardo DiCaprio</span></a></span>,
                    <span itemprop="actor"><a><span itemprop="name">Kate Winslet</span></a></span>,
                    <span itemprop="actor"><a><span itemprop="name">Billy Zane</span></a></span>
                </dd>
                <dd>
                    <span itemprop="genre"><a>Drama</a></span>.
                    <span itemprop="genre"><a>Romance</a></span>
                </dd>
                <dd itemprop="description">Jack, un joven artista, gana un pasaje en el Titanic. (FILMAFFINITY)</dd>
                <dd class="award">
                    <div class="margin-bottom"><a href="/es/awards.php?a=1">1997</a>: Premios Oscar: Mejor película. 14 nominaciones</div>
                    <div class="margin-bottom"><a href="/es/awards.php?a=2">1997</a>: Premios Oscar: <a>Mejor director</a>. Ver más</div>
                    <div class="margin-bottom"><a href="/es/awards.php?a=3">1998</a>: Globos de Oro: Mejor película - Drama</div>
                </dd>
            </dl>
            <div id="movie-rat-avg" itemprop="ratingValue">7,6</div>
            <span itemprop="ratingCount">187.432</span>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_extracts_detail_fields() {
        let doc = Html::parse_document(DETAIL_HTML);
        let movie = extract_movie(&doc).unwrap();

        assert_eq!(movie.id, 190163);
        assert_eq!(movie.title, "Titanic");
        assert_eq!(movie.year, Some(1997));
        assert_eq!(movie.country.as_deref(), Some("Estados Unidos"));
        assert_eq!(
            movie.poster.as_deref(),
            Some("https://pics.filmaffinity.com/titanic-321994924-large.jpg")
        );
        assert_eq!(movie.rating, Rating { average: Some(7.6), count: 187432 });
        assert_eq!(movie.directors, Some(vec!["James Cameron".to_string()]));
        assert_eq!(
            movie.cast,
            Some(vec![
                "Leonardo DiCaprio".to_string(),
                "Kate Winslet".to_string(),
                "Billy Zane".to_string()
            ])
        );
        assert_eq!(movie.genres, Some(vec!["Drama".to_string(), "Romance".to_string()]));
        assert_eq!(movie.duration, Some(194));
        assert_eq!(
            movie.plot.as_deref(),
            Some("Jack, un joven artista, gana un pasaje en el Titanic.")
        );
        assert_eq!(movie.position, None);
    }

    #[test]
    fn test_awards_accumulate_by_year() {
        let doc = Html::parse_document(DETAIL_HTML);
        let awards = extract_movie(&doc).unwrap().awards.unwrap();

        assert_eq!(awards.len(), 2);
        assert_eq!(
            awards.get("1997").unwrap(),
            &[
                "Premios Oscar: Mejor película".to_string(),
                "Premios Oscar: Mejor director".to_string()
            ]
        );
        assert_eq!(
            awards.get("1998").unwrap(),
            &["Globos de Oro: Mejor película - Drama".to_string()]
        );
    }

    #[test]
    fn test_award_lines_strip_trailing_period() {
        let doc = Html::parse_document(
            r#"<div data-movie-id="1"></div><h1 id="main-title"><span itemprop="name">X</span></h1>
            <dl><dd class="award">
                <div class="margin-bottom"><a>1998</a>: Best Picture.</div>
                <div class="margin-bottom"><a>1998</a>: Best Director.</div>
            </dd></dl>"#,
        );
        let awards = extract_movie(&doc).unwrap().awards.unwrap();
        assert_eq!(
            awards.get("1998").unwrap(),
            &["Best Picture".to_string(), "Best Director".to_string()]
        );
    }

    #[test]
    fn test_nested_award_anchors_count_once() {
        let doc = Html::parse_document(
            r#"<div data-movie-id="1"></div><h1 id="main-title"><span itemprop="name">X</span></h1>
            <dl><dd class="award">
                <div class="margin-bottom"><a>1998</a>: Oscar: <b><a>Mejor</a></b> <a>director</a>. Ver</div>
            </dd></dl>"#,
        );
        let awards = extract_movie(&doc).unwrap().awards.unwrap();
        assert_eq!(awards.len(), 1);
        assert_eq!(awards.get("1998").unwrap(), &["Oscar: Mejor director".to_string()]);
    }

    #[test]
    fn test_parse_award_line_rejects_unstructured_text() {
        assert_eq!(parse_award_line("Sin premios"), None);
        assert_eq!(parse_award_line(": nada."), None);
    }

    #[test]
    fn test_missing_optional_fields_degrade() {
        let doc = Html::parse_document(
            r#"<div data-movie-id="77"></div><h1 id="main-title"><span itemprop="name">Rara</span></h1>"#,
        );
        let movie = extract_movie(&doc).unwrap();

        assert_eq!(movie.id, 77);
        assert_eq!(movie.year, None);
        assert_eq!(movie.poster, None);
        assert_eq!(movie.rating, Rating { average: None, count: 0 });
        assert_eq!(movie.duration, None);
        assert_eq!(movie.plot, None);
        assert_eq!(movie.genres, Some(vec![]));
        assert!(movie.awards.unwrap().is_empty());
    }

    #[test]
    fn test_missing_title_is_extract_error() {
        let doc = Html::parse_document(r#"<div data-movie-id="77"></div>"#);
        let err = extract_movie(&doc).unwrap_err();
        assert!(err.is_extract());
    }

    #[test]
    fn test_missing_id_is_extract_error() {
        let doc =
            Html::parse_document(r#"<h1 id="main-title"><span itemprop="name">Rara</span></h1>"#);
        assert!(extract_movie(&doc).unwrap_err().is_extract());
    }
}
