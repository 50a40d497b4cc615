// ABOUTME: Layout of iCanteen 2.17.14 and 2.17.15 login pages.
// ABOUTME: Dishes sit in div.container blocks with a name and a description; no serving place is published.

use scraper::Html;

use super::{attr, day_containers, parse_date, required, select_all, text};
use crate::error::LayoutError;
use crate::menu::{Day, Dish, Menu};

pub(super) const LAYOUT: &str = "simple";

const DAY: &str = ".jidelnicekDen";
const HEADER: &str = ".jidelnicekTop";
const ITEM: &str = "div.container";
const NAME: &str = ".smallBoldTitle";
const DESCRIPTION: &str = ".column";

pub(super) fn parse(doc: &Html) -> Result<Menu, LayoutError> {
    let mut menu = Menu::new();
    let mut items_seen = 0;

    for container in day_containers(doc, LAYOUT, DAY)? {
        let header = required(container, LAYOUT, HEADER)?;
        let date = parse_date(LAYOUT, attr(header, LAYOUT, "id")?, "day-", "%Y-%m-%d")?;
        let mut day = Day::new(date);

        for item in select_all(container, ITEM)? {
            let name = text(required(item, LAYOUT, NAME)?);
            let description = text(required(item, LAYOUT, DESCRIPTION)?);
            day.push_dish(Dish::new(&name, "", &description));
            items_seen += 1;
        }

        menu.push_day(day);
    }

    // Headers alone also match newer and legacy pages; without a single
    // dish container this is not a simple layout page.
    if items_seen == 0 {
        return Err(LayoutError::MissingAnchor {
            layout: LAYOUT,
            selector: ITEM,
        });
    }

    Ok(menu)
}
