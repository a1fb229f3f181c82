// ABOUTME: Pure renderers turning Movie records into Spanish speech (SSML), plain text, cards and list items.
// ABOUTME: Optional fields shrink the output when absent; nothing here can fail or touch the network.

//! Response formatting.
//!
//! Every function is pure: the same input always renders to the same bytes.
//! Text that ends up inside `<speak>` is XML-escaped, markup added here is not.

use std::fmt;

use filmbot_client::{Awards, Locale, Movie, MOBILE_BASE_URL};
use indexmap::IndexMap;
use quick_xml::escape::partial_escape;
use serde::Serialize;

pub const SUGGESTION_PLOT: &str = "🎞 Sinopsis";
pub const SUGGESTION_AWARDS: &str = "🏆 Premios";

const BUTTON_TITLE: &str = "Ver en FilmAffinity";
const CAST_SPOKEN: usize = 3;
const BREAK: &str = r#"<break time="1s"/>"#;
const SHORT_BREAK: &str = r#"<break time="500ms"/>"#;

/// How to spell out a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationStyle {
    /// "2 horas y 5 minutos"
    Long,
    /// "2h5min"
    Short,
}

/// Image shown on a card or list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub title: String,
    pub url: String,
}

/// Background used when an image does not fill the card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageDisplay {
    #[default]
    Default,
    White,
}

/// Rich card: title, subtitle, body text, optional link and image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BasicCard {
    pub title: String,
    pub subtitle: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<Button>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    pub display: ImageDisplay,
}

/// One entry of a selectable list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

/// Spell out `minutes` as hours and minutes. Zero components are omitted,
/// so `0` renders as an empty string.
pub fn readable_duration(minutes: u32, style: DurationStyle) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    match style {
        DurationStyle::Long => {
            let mut parts = Vec::with_capacity(2);
            if hours > 0 {
                parts.push(plural(hours, "hora", "horas"));
            }
            if mins > 0 {
                parts.push(plural(mins, "minuto", "minutos"));
            }
            parts.join(" y ")
        }
        DurationStyle::Short => {
            let mut out = String::new();
            if hours > 0 {
                out.push_str(&format!("{}h", hours));
            }
            if mins > 0 {
                out.push_str(&format!("{}min", mins));
            }
            out
        }
    }
}

fn plural(n: u32, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

/// Plain-text summary of a movie, one short sentence per known field.
pub fn describe_movie(movie: &Movie) -> String {
    let mut out = match movie.year {
        Some(year) => format!("{} ({}).", movie.title, year),
        None => format!("{}.", movie.title),
    };

    if let Some(average) = movie.rating.average {
        out.push_str(&format!(" Calificación: {} sobre 10.", average));
    }
    if let Some(duration) = movie.duration.filter(|d| *d > 0) {
        out.push_str(&format!(
            " Duración: {}.",
            readable_duration(duration, DurationStyle::Long)
        ));
    }
    if let Some(genres) = non_empty(&movie.genres) {
        out.push_str(&format!(" Género: {}.", genres.join(", ")));
    }
    if let Some(directors) = non_empty(&movie.directors) {
        out.push_str(&format!(" Dirigida por: {}.", directors.join(", ")));
    }
    if let Some(cast) = non_empty(&movie.cast) {
        let lead = &cast[..cast.len().min(CAST_SPOKEN)];
        out.push_str(&format!(" Protagonizada por: {}.", lead.join(", ")));
    }

    out
}

/// [`describe_movie`] wrapped for speech synthesis.
pub fn speech_for_movie(movie: &Movie) -> String {
    speak(&escape(&describe_movie(movie)))
}

/// Quoted titles joined as a spoken enumeration: `"A"; "B" y "C"`.
pub fn titles_sentence(movies: &[Movie]) -> String {
    let quoted: Vec<String> = movies.iter().map(|m| format!("\"{}\"", m.title)).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} y {}", rest.join("; "), last),
    }
}

/// Ranked titles for speech, each preceded by its chart position.
///
/// Entries without a position are numbered by their place in `movies`.
pub fn speech_for_top_list(movies: &[Movie]) -> String {
    let lines: Vec<String> = movies
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let position = m.position.unwrap_or(i as u32 + 1);
            format!("{}. \"{}\".", position, escape(&m.title))
        })
        .collect();
    speak(&lines.join(SHORT_BREAK))
}

/// Card with the movie's key facts, its plot and a link to the mobile site.
pub fn card_for_movie(movie: &Movie, locale: &Locale) -> BasicCard {
    let mut subtitle = Vec::with_capacity(3);
    if let Some(year) = movie.year {
        subtitle.push(format!("📅{}.", year));
    }
    if let Some(duration) = movie.duration.filter(|d| *d > 0) {
        subtitle.push(format!(
            "⌛️{}.",
            readable_duration(duration, DurationStyle::Long)
        ));
    }
    if let Some(average) = movie.rating.average {
        subtitle.push(format!("⭐️{}/10", average));
    }

    BasicCard {
        title: movie.title.clone(),
        subtitle: subtitle.join(" "),
        text: movie.plot.clone().unwrap_or_default(),
        button: Some(Button {
            title: BUTTON_TITLE.to_string(),
            url: mobile_url(movie.id, locale),
        }),
        image: poster(movie),
        display: ImageDisplay::White,
    }
}

/// Link to a movie on the mobile site.
pub fn mobile_url(id: u64, locale: &Locale) -> String {
    format!("{}/{}/movie.php?id={}", MOBILE_BASE_URL, locale, id)
}

/// List entries keyed by title, in input order.
///
/// A repeated title keeps its first position and the last movie's data.
pub fn list_items(movies: &[Movie]) -> IndexMap<String, ListItem> {
    let mut items = IndexMap::with_capacity(movies.len());
    for movie in movies {
        items.insert(
            movie.title.clone(),
            ListItem {
                title: movie.title.clone(),
                description: list_description(movie),
                image: poster(movie),
            },
        );
    }
    items
}

fn list_description(movie: &Movie) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(year) = movie.year {
        parts.push(format!("{}.", year));
    }
    if let Some(average) = movie.rating.average {
        parts.push(format!("Calificación: {}/10", average));
    }
    parts.join(" ")
}

/// Card with the plot, or `None` when the movie has none.
pub fn plot_card(movie: &Movie) -> Option<BasicCard> {
    let plot = movie.plot.as_deref().filter(|p| !p.is_empty())?;
    Some(BasicCard {
        title: movie.title.clone(),
        subtitle: SUGGESTION_PLOT.to_string(),
        text: plot.to_string(),
        ..Default::default()
    })
}

pub fn plot_speech(movie: &Movie) -> Option<String> {
    let plot = movie.plot.as_deref().filter(|p| !p.is_empty())?;
    Some(speak(&format!("<p>{}</p>{}", escape(plot), BREAK)))
}

/// Markdown body listing awards under a bold year heading.
pub fn awards_card_text(awards: &Awards) -> String {
    let mut text = String::new();
    for (year, list) in awards.iter() {
        text.push_str(&format!("📅 **{}**:  \n{}.  \n", year, list.join(".  \n")));
    }
    text
}

pub fn awards_card(movie: &Movie) -> Option<BasicCard> {
    let awards = movie.awards.as_ref().filter(|a| !a.is_empty())?;
    Some(BasicCard {
        title: movie.title.clone(),
        subtitle: SUGGESTION_AWARDS.to_string(),
        text: awards_card_text(awards),
        ..Default::default()
    })
}

/// Awards read year by year with a pause after each item.
pub fn awards_speech(awards: &Awards) -> String {
    let separator = format!(".{} ", BREAK);
    let years: Vec<String> = awards
        .iter()
        .map(|(year, list)| {
            let items: Vec<String> = list.iter().map(|a| escape(a)).collect();
            format!(
                "Año {}:{} {}.",
                escape(year),
                BREAK,
                items.join(separator.as_str())
            )
        })
        .collect();
    speak(&years.join(BREAK))
}

fn poster(movie: &Movie) -> Option<Image> {
    movie.poster.as_ref().map(|url| Image {
        url: url.clone(),
        alt: movie.title.clone(),
    })
}

fn non_empty(values: &Option<Vec<String>>) -> Option<&[String]> {
    values.as_deref().filter(|v| !v.is_empty())
}

fn escape(text: &str) -> String {
    partial_escape(text).into_owned()
}

fn speak(inner: &str) -> String {
    format!("<speak>{}</speak>", inner)
}

impl fmt::Display for BasicCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if !self.subtitle.is_empty() {
            writeln!(f, "{}", self.subtitle)?;
        }
        if !self.text.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.text.trim_end())?;
        }
        if let Some(button) = &self.button {
            writeln!(f)?;
            write!(f, "{}: {}", button.title, button.url)?;
        }
        Ok(())
    }
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "- {}", self.title)
        } else {
            write!(f, "- {} ({})", self.title, self.description)
        }
    }
}
