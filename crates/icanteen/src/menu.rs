// ABOUTME: Menu data model produced by the layouts: Menu -> Day -> Dish.
// ABOUTME: Dish strings are trimmed and descriptions normalized at construction; validation lives in verify.

use chrono::NaiveDate;
use serde::Serialize;

use crate::normalize::normalize_description;

/// A single dish, e.g. "Oběd 1" served at "Jídelna".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dish {
    name: String,
    place: String,
    description: String,
}

impl Dish {
    /// Builds a dish, trimming every field and normalizing the description.
    pub fn new(name: &str, place: &str, description: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            place: place.trim().to_string(),
            description: normalize_description(description.trim()),
        }
    }

    /// The dish name, e.g. "Oběd 1".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the dish is served. Empty when the layout does not publish it.
    pub fn place(&self) -> &str {
        &self.place
    }

    /// What the dish consists of, e.g. "Polévka, kuře na paprice, rýže".
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// One day of the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Day {
    date: NaiveDate,
    dishes: Vec<Dish>,
}

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            dishes: Vec::new(),
        }
    }

    pub fn push_dish(&mut self, dish: Dish) {
        self.dishes.push(dish);
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub(crate) fn retain_dishes<F>(&mut self, keep: F)
    where
        F: FnMut(&Dish) -> bool,
    {
        self.dishes.retain(keep);
    }
}

/// A parsed food menu, days in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Menu {
    days: Vec<Day>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_day(&mut self, day: Day) {
        self.days.push(day);
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Day> {
        self.days.iter()
    }

    pub fn into_days(self) -> Vec<Day> {
        self.days
    }

    pub(crate) fn days_mut(&mut self) -> &mut Vec<Day> {
        &mut self.days
    }
}

impl<'a> IntoIterator for &'a Menu {
    type Item = &'a Day;
    type IntoIter = std::slice::Iter<'a, Day>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dish_fields_are_trimmed() {
        let dish = Dish::new("  Oběd 1\n", "\tJídelna ", "  Kuře ,rýže* ");
        assert_eq!(dish.name(), "Oběd 1");
        assert_eq!(dish.place(), "Jídelna");
        assert_eq!(dish.description(), "Kuře, rýže");
    }

    #[test]
    fn empty_place_is_kept_as_empty_string() {
        let dish = Dish::new("Oběd 2", "", "Knedlíky");
        assert_eq!(dish.place(), "");
    }

    #[test]
    fn menu_keeps_insertion_order() {
        let mut menu = Menu::new();
        let later = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        menu.push_day(Day::new(later));
        menu.push_day(Day::new(earlier));

        let dates: Vec<NaiveDate> = menu.iter().map(Day::date).collect();
        assert_eq!(dates, vec![later, earlier]);
        assert_eq!(menu.len(), 2);
        assert!(!menu.is_empty());
    }

    #[test]
    fn serializes_to_json() {
        let mut day = Day::new(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        day.push_dish(Dish::new("Oběd 1", "Jídelna", "Guláš"));
        let mut menu = Menu::new();
        menu.push_day(day);

        let json = serde_json::to_value(&menu).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "days": [{
                    "date": "2024-03-04",
                    "dishes": [{"name": "Oběd 1", "place": "Jídelna", "description": "Guláš"}]
                }]
            })
        );
    }
}
