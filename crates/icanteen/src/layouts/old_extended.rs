// ABOUTME: Layout of legacy iCanteen 2.14 login pages (faces/login.jsp).
// ABOUTME: Dates come from the data-datum header attribute; dishes have a name and a description only.

use scraper::Html;

use super::{attr, day_containers, parse_date, required, select_all, text};
use crate::error::LayoutError;
use crate::menu::{Day, Dish, Menu};

pub(super) const LAYOUT: &str = "old-extended";

const DAY: &str = "div.jidelnicekDen";
const HEADER: &str = "div.jidelnicekTop";
const DATE_ATTR: &str = "data-datum";
const ITEM: &str = "div.jidelnicekItem";
const NAME: &str = ".smallBoldTitle";
const DESCRIPTION: &str = ".jidWrapCenter";

pub(super) fn parse(doc: &Html) -> Result<Menu, LayoutError> {
    let mut menu = Menu::new();

    for container in day_containers(doc, LAYOUT, DAY)? {
        let header = required(container, LAYOUT, HEADER)?;
        let date = parse_date(LAYOUT, attr(header, LAYOUT, DATE_ATTR)?, "", "%d.%m.%Y")?;
        let mut day = Day::new(date);

        for item in select_all(container, ITEM)? {
            let name = text(required(item, LAYOUT, NAME)?);
            let description = text(required(item, LAYOUT, DESCRIPTION)?);
            day.push_dish(Dish::new(&name, "", &description));
        }

        menu.push_day(day);
    }

    Ok(menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_legacy_date_attribute() {
        let page = r#"
            <div class="jidelnicekDen">
                <div class="jidelnicekTop semibold" data-datum="07.03.2024">Čtvrtek</div>
                <div class="jidelnicekItem">
                    <span class="smallBoldTitle">Oběd</span>
                    <div class="jidWrapCenter">*Čočka na kyselo, vejce</div>
                </div>
            </div>"#;

        let menu = parse(&Html::parse_document(page)).unwrap();
        let day = &menu.days()[0];
        assert_eq!(day.date(), NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
        assert_eq!(day.dishes()[0].description(), "Čočka na kyselo, vejce");
        assert_eq!(day.dishes()[0].place(), "");
    }

    #[test]
    fn item_missing_description_is_rejected() {
        let page = r#"
            <div class="jidelnicekDen">
                <div class="jidelnicekTop" data-datum="07.03.2024"></div>
                <div class="jidelnicekItem"><span class="smallBoldTitle">Oběd</span></div>
            </div>"#;
        assert!(matches!(
            parse(&Html::parse_document(page)),
            Err(LayoutError::MissingAnchor { selector: DESCRIPTION, .. })
        ));
    }
}
