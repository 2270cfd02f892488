use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    forms::{FieldError, RateForm},
    store::Movie,
    tmdb::Candidate,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn list_page(movies: &[Movie]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-10" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { (movies.len()) " movies, ranked by your rating." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 text-sm font-semibold text-white hover:bg-blue-700" href="/add" { "Add movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet. Search for one to get started." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page(query: &str, error: Option<&str>) -> String {
    page(
        "Add Movie",
        html! {
            (card(html! {
                h1 class="text-2xl font-bold text-gray-900" { "Add a movie" }
                form class="mt-6 space-y-6" method="post" action="/add" {
                    div {
                        label class="block text-sm font-medium text-gray-700" for="title" { "Movie title" }
                        input class=(INPUT_CLASS) name="title" id="title" value=(query) required;
                        @if let Some(error) = error {
                            p class="mt-2 text-sm text-red-600" { (error) }
                        }
                    }
                    button class=(BUTTON_CLASS) type="submit" { "Search" }
                }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
            }))
        },
    )
}

pub fn select_page(query: &str, candidates: &[Candidate]) -> String {
    page(
        "Select Movie",
        html! {
            (card(html! {
                h1 class="text-2xl font-bold text-gray-900" { "Select a movie" }
                p class="mt-2 text-gray-600" { "Results for \"" (query) "\"" }
                @if candidates.is_empty() {
                    p class="mt-6 text-gray-600" { "Nothing matched. Try another title." }
                } @else {
                    ul class="mt-6 divide-y divide-gray-200" {
                        @for c in candidates {
                            li class="py-3" {
                                a class="text-blue-600 hover:text-blue-800" href=(format!("/append_movie?id_m={}", c.external_id)) {
                                    (c.title)
                                    @if !c.release_date.is_empty() {
                                        span class="ml-2 text-gray-500" { "(" (c.release_date) ")" }
                                    }
                                }
                            }
                        }
                    }
                }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/add" { "New search" }
            }))
        },
    )
}

pub fn edit_page(movie: &Movie, form: &RateForm, errors: &[FieldError]) -> String {
    let error_for = |field: &str| errors.iter().find(|e| e.field == field).map(|e| e.message.clone());

    page(
        "Rate Movie",
        html! {
            (card(html! {
                h1 class="text-2xl font-bold text-gray-900" { (movie.title) }
                p class="mt-2 text-gray-600" { "Rate and review" }
                form class="mt-6 space-y-6" method="post" action=(format!("/edit?id={}", movie.id)) {
                    div {
                        label class="block text-sm font-medium text-gray-700" for="rating" { "Your rating out of 10, e.g. 7.5" }
                        input class=(INPUT_CLASS) name="rating" id="rating" value=(form.rating);
                        @if let Some(msg) = error_for("rating") {
                            p class="mt-2 text-sm text-red-600" { (msg) }
                        }
                    }
                    div {
                        label class="block text-sm font-medium text-gray-700" for="review" { "Your review" }
                        input class=(INPUT_CLASS) name="review" id="review" value=(form.review);
                        @if let Some(msg) = error_for("review") {
                            p class="mt-2 text-sm text-red-600" { (msg) }
                        }
                    }
                    button class=(BUTTON_CLASS) type="submit" { "Done" }
                }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
            }))
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = if status == StatusCode::NOT_FOUND { "Not found" } else { "Error" };
    page(
        heading,
        html! {
            (card(html! {
                h1 class="text-2xl font-bold text-gray-900" { (heading) }
                p class="mt-4 text-gray-700" { (message) }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
            }))
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn card(inner: Markup) -> Markup {
    html! {
        div class="min-h-screen bg-gray-50 flex items-center justify-center" {
            div class="max-w-xl w-full px-6" {
                div class="bg-white shadow rounded-lg p-8" { (inner) }
            }
        }
    }
}

fn movie_card(movie: &Movie) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            @if !movie.img_url.is_empty() {
                img class="w-24 rounded" src=(movie.img_url) alt=(movie.title);
            }
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        span class="mr-2 text-gray-400" { "#" (movie.ranking) }
                        (movie.title)
                        @if let Some(year) = movie.year {
                            span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                        }
                    }
                    span class="text-lg font-semibold text-blue-600" { (format_rating(movie.rating)) }
                }
                @if !movie.review.is_empty() {
                    p class="mt-2 italic text-gray-700" { "\u{201C}" (movie.review) "\u{201D}" }
                }
                p class="mt-2 text-sm text-gray-600" { (movie.description) }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                }
            }
        }
    }
}

fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}
