// ABOUTME: Conversation turn handlers: movie search, plot and awards follow-ups, and the top chart.
// ABOUTME: Each handler returns an ordered Reply; client failures become a closing apology.

use std::fmt;

use filmbot_client::{Client, ClientError, Locale, Movie};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::format::{
    awards_card, awards_speech, card_for_movie, list_items, plot_card, plot_speech,
    speech_for_movie, speech_for_top_list, titles_sentence, BasicCard, ListItem, SUGGESTION_AWARDS,
    SUGGESTION_PLOT,
};

pub const APOLOGY: &str =
    "Disculpa, estoy experimentando algunas dificultades. Por favor prueba un poco más tarde. ¡Gracias!";
pub const HERE_YOU_ARE: &str = "Aquí tienes:";
pub const WHAT_NEXT: &str = "¿Qué quieres hacer ahora?";
pub const NO_SELECTION: &str = "Lo siento, no has seleccionado ninguna película.";
pub const NO_PLOT: &str = "La película seleccionada no tiene sinopsis.";
pub const NO_AWARDS: &str = "La película seleccionada no tiene premios.";
pub const TOP_INTRO: &str = "Las películas mejor valoradas según tus criterios de búsqueda son:";
pub const TOP_EMPTY: &str = "Lo siento, no he encontrado películas con esos criterios.";
pub const TOP_TITLE: &str = "🔝 Top películas";

/// Results offered after an ambiguous search.
const RELEVANT_RESULTS: usize = 3;
const TOP_ON_SCREEN: usize = 10;
const TOP_BY_VOICE: usize = 5;

/// Titled list of selectable entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichList {
    pub title: String,
    pub items: IndexMap<String, ListItem>,
}

/// One element of a reply, rendered by the assistant in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Prompt {
    Text(String),
    /// SSML document.
    Speech(String),
    Card(BasicCard),
    List(RichList),
    Suggestions(Vec<String>),
}

/// What the assistant says back for one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reply {
    pub prompts: Vec<Prompt>,
    /// The conversation ends after this reply.
    pub close: bool,
}

impl Reply {
    fn ask(&mut self, prompt: Prompt) {
        self.prompts.push(prompt);
    }

    fn text(&mut self, text: impl Into<String>) {
        self.ask(Prompt::Text(text.into()));
    }

    fn apology() -> Self {
        Self {
            prompts: vec![Prompt::Text(APOLOGY.to_string())],
            close: true,
        }
    }
}

/// Per-session state carried between turns.
///
/// The caller owns it and hands it to each handler; nothing is shared
/// between sessions.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    /// The movie a follow-up question refers to.
    pub last_resolved_movie: Option<Movie>,
    /// The device can show cards and lists.
    pub has_screen: bool,
    pub locale: Locale,
}

impl Conversation {
    pub fn new(has_screen: bool) -> Self {
        Self {
            has_screen,
            ..Default::default()
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Search a title and describe what was found.
    ///
    /// The remembered movie is cleared first and only set again on a single hit.
    pub async fn search_movie(&mut self, client: &Client, query: &str) -> Reply {
        self.last_resolved_movie = None;

        let found = match client.search_movies(query, &self.locale).await {
            Ok(found) => found,
            Err(err) => return failed("search_movie", &err),
        };

        let mut reply = Reply::default();
        // the counter can lag behind the cards actually listed
        let total = found.count.max(found.results.len() as u32);

        if total == 1 && found.results.len() == 1 {
            let movie = &found.results[0];
            if self.has_screen {
                reply.text(HERE_YOU_ARE);
                reply.ask(Prompt::Card(card_for_movie(movie, &self.locale)));
            } else {
                reply.ask(Prompt::Speech(speech_for_movie(movie)));
            }
            reply.text(WHAT_NEXT);
            reply.ask(Prompt::Suggestions(vec![
                SUGGESTION_PLOT.to_string(),
                SUGGESTION_AWARDS.to_string(),
            ]));
            self.last_resolved_movie = found.results.into_iter().next();
        } else if !found.results.is_empty() {
            let relevant = &found.results[..found.results.len().min(RELEVANT_RESULTS)];
            reply.text(format!(
                "He encontrado {} películas que contienen \"{}\" en su título. Éstas son las más relevantes:",
                total, query
            ));
            if self.has_screen {
                reply.ask(Prompt::List(RichList {
                    title: format!("🔎 Resultados con \"{}\"", query),
                    items: list_items(relevant),
                }));
            } else {
                reply.text(titles_sentence(relevant));
            }
        } else {
            reply.text(format!(
                "Lo siento, no he encontrado ninguna película con el término de búsqueda \"{}\".",
                query
            ));
            reply.text(WHAT_NEXT);
        }

        reply
    }

    /// Read the plot of the remembered movie.
    pub fn movie_plot(&self) -> Reply {
        let mut reply = Reply::default();

        match &self.last_resolved_movie {
            None => reply.text(NO_SELECTION),
            Some(movie) => {
                let rendered = if self.has_screen {
                    plot_card(movie).map(Prompt::Card)
                } else {
                    plot_speech(movie).map(Prompt::Speech)
                };
                match rendered {
                    Some(prompt) => {
                        if self.has_screen {
                            reply.text(HERE_YOU_ARE);
                        }
                        reply.ask(prompt);
                    }
                    None => reply.text(NO_PLOT),
                }
            }
        }

        reply.text(WHAT_NEXT);
        reply
    }

    /// List the awards of the remembered movie.
    pub fn movie_awards(&self) -> Reply {
        let mut reply = Reply::default();

        match &self.last_resolved_movie {
            None => reply.text(NO_SELECTION),
            Some(movie) => match movie.awards.as_ref().filter(|a| !a.is_empty()) {
                None => reply.text(NO_AWARDS),
                Some(awards) => {
                    if self.has_screen {
                        reply.text(HERE_YOU_ARE);
                        if let Some(card) = awards_card(movie) {
                            reply.ask(Prompt::Card(card));
                        }
                    } else {
                        reply.ask(Prompt::Speech(awards_speech(awards)));
                    }
                }
            },
        }

        reply.text(WHAT_NEXT);
        reply
    }

    /// Best rated movies for the given filters, by name.
    pub async fn top_movies(
        &self,
        client: &Client,
        genre: Option<&str>,
        country: Option<&str>,
        year_from: Option<u16>,
        year_to: Option<u16>,
    ) -> Reply {
        let movies = match client
            .fetch_top_movies(genre, country, year_from, year_to, &self.locale)
            .await
        {
            Ok(movies) => movies,
            Err(err) => return failed("top_movies", &err),
        };

        let mut reply = Reply::default();
        if movies.is_empty() {
            reply.text(TOP_EMPTY);
            reply.text(WHAT_NEXT);
            return reply;
        }

        reply.text(TOP_INTRO);
        if self.has_screen {
            reply.ask(Prompt::List(RichList {
                title: TOP_TITLE.to_string(),
                items: list_items(&movies[..movies.len().min(TOP_ON_SCREEN)]),
            }));
        } else {
            reply.ask(Prompt::Speech(speech_for_top_list(
                &movies[..movies.len().min(TOP_BY_VOICE)],
            )));
        }
        reply
    }
}

fn failed(handler: &str, err: &ClientError) -> Reply {
    warn!(handler, code = %err.code, url = %err.url, error = %err, "conversation turn failed");
    Reply::apology()
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::Text(text) | Prompt::Speech(text) => write!(f, "{}", text),
            Prompt::Card(card) => write!(f, "{}", card),
            Prompt::List(list) => {
                write!(f, "{}", list.title)?;
                for item in list.items.values() {
                    write!(f, "\n{}", item)?;
                }
                Ok(())
            }
            Prompt::Suggestions(chips) => {
                let chips: Vec<String> = chips.iter().map(|c| format!("[{}]", c)).collect();
                write!(f, "{}", chips.join(" "))
            }
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, prompt) in self.prompts.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", prompt)?;
        }
        Ok(())
    }
}
