use super::{build_orchestrator, AppContext};
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;
use reelnotes_core::MoviePage;
use reelnotes_models::Person;
use serde_json::json;

pub async fn run_show(id: &str, ctx: &AppContext, output: &Output) -> Result<()> {
    let orchestrator = build_orchestrator(ctx).await?;
    let page = orchestrator.movie_page(id).await?;
    render_page(&page, output);
    Ok(())
}

pub fn render_page(page: &MoviePage, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "type": "movie",
            "id": page.id,
            "movie": page.record,
            "reviews": page.reviews,
        }));
        return;
    }

    if output.is_quiet() {
        return;
    }

    let record = &page.record;

    println!();
    println!("{} {}", record.title.bright_cyan().bold(), format!("({})", page.id).bright_black());
    println!();

    let mut details = Table::new();
    details.load_preset(comfy_table::presets::UTF8_FULL);
    details.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    details.set_content_arrangement(ContentArrangement::Dynamic);
    details.set_header(vec![
        Cell::new("Movie").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    details.add_row(vec![Cell::new("Released"), Cell::new(&record.date_published)]);
    details.add_row(vec![Cell::new("Rated"), Cell::new(&record.content_rating)]);
    details.add_row(vec![Cell::new("Runtime"), Cell::new(&record.duration)]);
    details.add_row(vec![Cell::new("Genre"), Cell::new(record.genre_line())]);
    details.add_row(vec![
        Cell::new("Rating"),
        Cell::new(format!("{}/10 ({} votes)", record.rating_value, record.rating_count)),
    ]);
    details.add_row(vec![Cell::new("Directors"), Cell::new(people(&record.directors))]);
    details.add_row(vec![Cell::new("Stars"), Cell::new(people(&record.actors))]);
    details.add_row(vec![Cell::new("Poster"), Cell::new(&record.image_url)]);
    details.add_row(vec![Cell::new("Trailer"), Cell::new(&record.trailer_url)]);
    println!("{}", details);
    println!();
    println!("{}", record.description);
    println!();

    if page.reviews.is_empty() {
        println!("{}", "No reviews yet".bright_black());
        return;
    }

    let mut reviews = Table::new();
    reviews.load_preset(comfy_table::presets::UTF8_FULL);
    reviews.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    reviews.set_content_arrangement(ContentArrangement::Dynamic);
    reviews.set_header(vec![
        Cell::new("Author").add_attribute(Attribute::Bold),
        Cell::new("Date").add_attribute(Attribute::Bold),
        Cell::new("Review").add_attribute(Attribute::Bold),
    ]);
    for review in &page.reviews {
        reviews.add_row(vec![
            Cell::new(&review.author),
            Cell::new(&review.created_on),
            Cell::new(&review.content),
        ]);
    }
    println!("{}", reviews);
}

/// "Name <url>" per person, one per line
fn people(people: &[Person]) -> String {
    people
        .iter()
        .map(|p| format!("{} <{}>", p.name, p.profile_url))
        .collect::<Vec<_>>()
        .join("\n")
}
