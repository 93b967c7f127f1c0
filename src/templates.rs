use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{
    models::{ImportSummary, Movie},
    view::{CatalogView, Detail, Filter},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const DATASTAR_CDN: &str =
    "https://cdn.jsdelivr.net/npm/@sudodevnull/datastar@0.19.9/dist/datastar.js";

/// Query string for the catalog with the given filter and optional open detail.
pub fn catalog_query(filter: &Filter, detail: Option<i32>) -> String {
    let mut parts = Vec::new();
    if !filter.q.is_empty() {
        parts.push(format!("q={}", urlencoding::encode(&filter.q)));
    }
    if !filter.genre.is_empty() {
        parts.push(format!("genre={}", urlencoding::encode(&filter.genre)));
    }
    if let Some(id) = detail {
        parts.push(format!("detail={id}"));
    }
    if parts.is_empty() { String::new() } else { format!("?{}", parts.join("&")) }
}

pub fn index_page(filter: &Filter, detail: Option<i32>, message: Option<&str>) -> String {
    let catalog_url = format!("/catalog{}", catalog_query(filter, detail));

    page(
        "FilmHub",
        html! {
            div class="min-h-screen bg-neutral-900 text-white pb-10" {
                (header())

                div class="max-w-5xl mx-auto mt-8 flex flex-wrap justify-center gap-4 px-6" {
                    form class="flex gap-2 rounded-lg bg-neutral-800 p-2" method="post" action="/add" {
                        input class="rounded border border-neutral-600 bg-neutral-950 px-3 py-2" name="title" placeholder="Movie title from TMDB..." required;
                        button class="rounded bg-orange-500 px-4 py-2 font-bold text-neutral-900" type="submit" { "Add" }
                    }
                    a class="rounded bg-orange-500 px-4 py-2 font-bold text-neutral-900" href="/import" { "Import TOP 50 from TMDB" }
                }

                @if let Some(message) = message {
                    p class="mt-4 text-center font-bold text-orange-400" { (message) }
                }

                div id="content" class="mt-8" data-init=(PreEscaped(format!("@get('{}')", catalog_url))) {
                    p class="mt-10 text-center text-neutral-300" { "Loading movies..." }
                }
            }
        },
    )
}

pub fn catalog_fragment(view: &CatalogView) -> String {
    let filter = view.filter();
    let visible = view.visible();

    content_div(html! {
        div class="max-w-7xl mx-auto px-6" {
            form class="flex flex-wrap items-center gap-4" method="get" action="/" {
                input class="w-72 rounded border border-neutral-600 bg-neutral-800 px-4 py-2" type="text" name="q" value=(filter.q) placeholder="Search movies...";
                select class="rounded border border-neutral-600 bg-neutral-800 px-4 py-2 text-orange-400" name="genre" {
                    option value="" selected[filter.genre.is_empty()] { "All genres" }
                    @for genre in view.genre_options() {
                        option value=(genre) selected[genre == filter.genre] { (genre) }
                    }
                }
                button class="rounded bg-neutral-700 px-4 py-2" type="submit" { "Filter" }
            }

            @if visible.is_empty() {
                p class="mt-10 text-center text-xl" {
                    @if view.total() == 0 { "No movies in the catalog." } @else { "No movies match the filter." }
                }
            } @else {
                div class="mt-8 grid gap-8 grid-cols-[repeat(auto-fit,minmax(260px,1fr))]" {
                    @for movie in &visible {
                        (movie_card(view, movie))
                    }
                }
            }

            @if let Some(detail) = view.detail() {
                (detail_overlay(filter, &detail))
            }
        }
    })
}

pub fn importing_page() -> String {
    page(
        "Importing",
        html! {
            div class="min-h-screen bg-neutral-900 text-white" {
                (header())
                div id="content" class="max-w-xl mx-auto mt-16 px-6" data-init=(PreEscaped("@post('/import/run')")) {
                    div class="rounded-lg bg-neutral-800 p-8 text-center" {
                        div class="mx-auto h-12 w-12 rounded-full border-4 border-orange-200 border-t-orange-500 animate-spin" {}
                        p class="mt-6 font-bold text-orange-400" { "Importing the 50 top rated movies from TMDB..." }
                        p class="mt-2 text-sm text-neutral-400" { "This may take a minute." }
                    }
                }
            }
        },
    )
}

pub fn import_result_fragment(summary: &ImportSummary) -> String {
    content_div(html! {
        div class="max-w-xl mx-auto mt-16 px-6" {
            div class="rounded-lg bg-neutral-800 p-8" {
                h1 class="text-2xl font-bold text-orange-400" { "Import finished!" }
                p class="mt-4" { "Imported " (summary.imported_count) " movies." }
                @if !summary.failed_titles.is_empty() {
                    p class="mt-4 text-neutral-300" { "Failed to import:" }
                    ul class="mt-2 list-disc pl-6 text-sm text-neutral-400" {
                        @for title in &summary.failed_titles {
                            li { @if title.is_empty() { "(untitled)" } @else { (title) } }
                        }
                    }
                }
                a class="mt-6 inline-block text-orange-400 hover:text-orange-300" href="/" { "Back to catalog" }
            }
        }
    })
}

pub fn error_fragment(message: String) -> String {
    content_div(html! {
        div class="max-w-2xl mx-auto px-6 py-12" {
            div class="rounded-lg bg-neutral-800 p-8" {
                h1 class="text-2xl font-bold" { "Error" }
                p class="mt-4 text-neutral-300" { (message) }
                a class="mt-6 inline-block text-orange-400 hover:text-orange-300" href="/" { "Back" }
            }
        }
    })
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-neutral-900 text-white" {
                (header())
                div class="max-w-xl mx-auto mt-16 px-6" {
                    div class="rounded-lg bg-neutral-800 p-8" {
                        h1 class="text-2xl font-bold" { "Error" }
                        p class="mt-4 text-neutral-300" { (message) }
                        a class="mt-6 inline-block text-orange-400 hover:text-orange-300" href="/" { "Back" }
                    }
                }
            }
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
                script type="module" src=(DATASTAR_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn content_div(inner: Markup) -> String {
    html! { div id="content" { (inner) } }.into_string()
}

fn header() -> Markup {
    html! {
        div class="flex h-16 items-center border-b-2 border-orange-500 bg-neutral-950 px-8" {
            a class="text-3xl font-black tracking-wide" href="/" {
                span class="text-orange-500" { "FILM" } "HUB"
            }
        }
    }
}

fn movie_card(view: &CatalogView, movie: &Movie) -> Markup {
    let href = format!("/{}", catalog_query(view.filter(), Some(movie.id)));

    html! {
        a class="flex flex-col items-center overflow-hidden rounded-xl border-2 border-neutral-800 bg-neutral-900 shadow hover:scale-105 hover:border-orange-500 transition" href=(href) {
            img class="h-[390px] w-[260px] object-cover border-b-2 border-orange-500" src=(view.poster(movie.id)) alt=(movie.title);
            div class="mt-4 min-h-12 text-center text-xl font-bold" { (movie.title) }
            @if let Some(year) = movie.year {
                div class="font-bold text-orange-400" { (year) }
            }
            @if let Some(genre) = &movie.genre {
                div class="mt-1 text-center text-sm" { (genre) }
            }
            @if let Some(meta) = view.metadata(movie.id) {
                div class="my-3 flex flex-wrap justify-center gap-2" {
                    @for tag in &meta.genres {
                        span class="rounded bg-neutral-800 px-2 py-0.5 text-xs font-bold text-orange-400" { (tag) }
                    }
                }
            }
        }
    }
}

fn detail_overlay(filter: &Filter, detail: &Detail<'_>) -> Markup {
    let close = format!("/{}", catalog_query(filter, None));
    let movie = detail.movie;

    html! {
        div id="detail" class="fixed inset-0 z-50 flex items-center justify-center bg-black/70" {
            div class="relative flex w-[90vw] max-w-xl flex-col items-center rounded-2xl bg-neutral-900 p-8 shadow-2xl" {
                a class="absolute right-4 top-4 h-9 w-9 rounded-full bg-neutral-800 text-center text-2xl font-black text-orange-400" href=(close) { "×" }
                img class="mb-4 h-[330px] w-[220px] rounded-lg object-cover" src=(detail.poster) alt=(movie.title);
                h2 class="text-center text-3xl font-black" { (movie.title) }
                @if let Some(year) = movie.year {
                    div class="mt-2 text-lg font-bold text-orange-400" { (year) }
                }
                @if let Some(director) = &movie.director {
                    div class="mt-1 text-neutral-300" { (director) }
                }
                @if let Some(genre) = &movie.genre {
                    div class="mt-2 text-center" { (genre) }
                }
                @if let Some(meta) = detail.metadata {
                    @if !meta.synopsis.is_empty() {
                        p class="mt-4 text-center text-neutral-400" { (meta.synopsis) }
                    }
                    div class="mt-4 flex flex-wrap justify-center gap-2" {
                        @for tag in &meta.genres {
                            span class="rounded bg-neutral-800 px-3 py-1 font-bold text-orange-400" { (tag) }
                        }
                    }
                    @if !meta.cast.is_empty() {
                        p class="mt-4 text-center" { b { "Cast: " } (meta.cast.join(", ")) }
                    }
                }
            }
        }
    }
}
