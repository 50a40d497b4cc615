// ABOUTME: Layout of current iCanteen releases (2.17.20 and newer).
// ABOUTME: Days wrap their dishes in article.jidelnicekMain; each dish has a name, a place and a description.

use scraper::Html;

use super::{attr, day_containers, first, parse_date, required, select_all, text};
use crate::error::LayoutError;
use crate::menu::{Day, Dish, Menu};

pub(super) const LAYOUT: &str = "new-extended";

const DAY: &str = "div.jidelnicekDen";
const WRAPPER: &str = "article.jidelnicekMain";
const HEADER: &str = "div.jidelnicekTop";
const ITEM: &str = "article.jidelnicekMain div.jidelnicekItem";
const NAME: &str = ".jidWrapLeft .smallBoldTitle";
const PLACE: &str = ".jidWrapLeft .jidPlace";
const DESCRIPTION: &str = ".jidWrapCenter";

pub(super) fn parse(doc: &Html) -> Result<Menu, LayoutError> {
    let mut menu = Menu::new();

    // The wrapper is what tells this layout apart from the old extended one.
    // Unpublished days render without it and are skipped.
    let mut published = Vec::new();
    for container in day_containers(doc, LAYOUT, DAY)? {
        if first(container, WRAPPER)?.is_some() {
            published.push(container);
        }
    }
    if published.is_empty() {
        return Err(LayoutError::MissingAnchor {
            layout: LAYOUT,
            selector: WRAPPER,
        });
    }

    for container in published {
        let header = required(container, LAYOUT, HEADER)?;
        let date = parse_date(LAYOUT, attr(header, LAYOUT, "id")?, "day-", "%Y-%m-%d")?;
        let mut day = Day::new(date);

        for item in select_all(container, ITEM)? {
            let name = text(required(item, LAYOUT, NAME)?);
            let place = first(item, PLACE)?.map(text).unwrap_or_default();
            let description = text(required(item, LAYOUT, DESCRIPTION)?);
            day.push_dish(Dish::new(&name, &place, &description));
        }

        menu.push_day(day);
    }

    Ok(menu)
}
