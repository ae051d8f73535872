//! Public portfolio view.
//!
//! Turns category and project rows into the nested shape the public page
//! renders: every category with its projects, icons resolved, and no
//! nullable text left for the client to handle.

use std::collections::HashMap;

use serde::Serialize;

use crate::icons::resolve_icon;
use crate::types::DbId;

/// Number of category cards shown in the hero stack.
pub const MAX_DISPLAY_CARDS: usize = 3;

/// Category fields needed to build the public view.
#[derive(Debug, Clone)]
pub struct CategoryEntry {
    pub id: DbId,
    pub name: String,
    pub icon_name: String,
    pub content: Option<String>,
}

/// Project fields needed to build the public view.
#[derive(Debug, Clone)]
pub struct ProjectEntry {
    pub category_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub link_url: Option<String>,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDetail {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioCategory {
    pub id: DbId,
    pub name: String,
    pub icon: String,
    pub content: String,
    pub details: Vec<ProjectDetail>,
}

/// Summary card for the hero section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayCard {
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// Group `projects` under their categories.
///
/// Both inputs are expected in listing order; that order is preserved.
/// Projects whose category is not in `categories` are dropped.
pub fn assemble(categories: Vec<CategoryEntry>, projects: Vec<ProjectEntry>) -> Vec<PortfolioCategory> {
    let mut by_category: HashMap<DbId, Vec<ProjectDetail>> = HashMap::new();
    for project in projects {
        by_category
            .entry(project.category_id)
            .or_default()
            .push(ProjectDetail {
                title: project.title,
                description: project.description.unwrap_or_default(),
                tags: project.tags,
                link_url: project.link_url,
                image_urls: project.image_urls,
            });
    }

    categories
        .into_iter()
        .map(|category| PortfolioCategory {
            id: category.id,
            icon: resolve_icon(&category.icon_name).to_string(),
            details: by_category.remove(&category.id).unwrap_or_default(),
            name: category.name,
            content: category.content.unwrap_or_default(),
        })
        .collect()
}

/// Cards for the first [`MAX_DISPLAY_CARDS`] categories with their project counts.
pub fn display_cards(categories: &[PortfolioCategory]) -> Vec<DisplayCard> {
    categories
        .iter()
        .take(MAX_DISPLAY_CARDS)
        .map(|category| DisplayCard {
            icon: category.icon.clone(),
            title: category.name.clone(),
            description: project_count_label(category.details.len()),
        })
        .collect()
}

/// One label form for every count, matching the hero card copy.
fn project_count_label(count: usize) -> String {
    format!("{count} Projects")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::DEFAULT_ICON;

    fn category(id: DbId, name: &str, icon: &str) -> CategoryEntry {
        CategoryEntry {
            id,
            name: name.to_string(),
            icon_name: icon.to_string(),
            content: None,
        }
    }

    fn project(category_id: DbId, title: &str) -> ProjectEntry {
        ProjectEntry {
            category_id,
            title: title.to_string(),
            description: None,
            tags: vec!["Rust".to_string()],
            link_url: None,
            image_urls: vec!["/static/covers/a.png".to_string()],
        }
    }

    #[test]
    fn projects_are_grouped_in_listing_order() {
        let view = assemble(
            vec![category(2, "Design", "PictureInPictureIcon"), category(1, "Dev", "Laptop2Icon")],
            vec![project(1, "Alpha"), project(2, "System X"), project(1, "Beta")],
        );

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].name, "Design");
        assert_eq!(view[0].details.len(), 1);
        let dev_titles: Vec<_> = view[1].details.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(dev_titles, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn nullable_text_becomes_empty_and_unknown_icons_fall_back() {
        let view = assemble(vec![category(1, "Misc", "Nope")], vec![project(1, "Only")]);
        assert_eq!(view[0].icon, DEFAULT_ICON);
        assert_eq!(view[0].content, "");
        assert_eq!(view[0].details[0].description, "");
    }

    #[test]
    fn orphan_projects_are_dropped() {
        let view = assemble(vec![category(1, "Dev", "Laptop2Icon")], vec![project(9, "Lost")]);
        assert!(view[0].details.is_empty());
    }

    #[test]
    fn display_cards_are_capped_and_counted() {
        let view = assemble(
            vec![
                category(1, "A", "Laptop2Icon"),
                category(2, "B", "BarChart2"),
                category(3, "C", "BarChart2"),
                category(4, "D", "BarChart2"),
            ],
            vec![project(1, "x"), project(1, "y"), project(2, "z")],
        );

        let cards = display_cards(&view);
        assert_eq!(cards.len(), MAX_DISPLAY_CARDS);
        assert_eq!(cards[0].description, "2 Projects");
        assert_eq!(cards[1].description, "1 Projects");
        assert_eq!(cards[2].description, "0 Projects");
    }

    #[test]
    fn missing_link_is_omitted_from_json() {
        let view = assemble(vec![category(1, "Dev", "Laptop2Icon")], vec![project(1, "Alpha")]);
        let json = serde_json::to_value(&view[0].details[0]).unwrap();
        assert!(json.get("link_url").is_none());
        assert_eq!(json["tags"][0], "Rust");
    }
}
