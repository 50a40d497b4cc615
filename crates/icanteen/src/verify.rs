// ABOUTME: Post-parse cleanup: drops incomplete dishes and empty days from a parsed menu.
// ABOUTME: Only a menu left with no days at all is reported, as NoMenuError.

use tracing::debug;

use crate::error::NoMenuError;
use crate::menu::Menu;

/// Removes dishes missing a name or description, then days left without dishes.
///
/// Invalid entries are dropped silently. An empty result means the canteen
/// published nothing and is returned as [`NoMenuError`].
pub fn verify(mut menu: Menu) -> Result<Menu, NoMenuError> {
    let days = menu.days_mut();
    for day in days.iter_mut() {
        day.retain_dishes(|dish| !dish.name().is_empty() && !dish.description().is_empty());
    }

    let before = days.len();
    days.retain(|day| !day.dishes().is_empty());
    if days.len() != before {
        debug!(dropped = before - days.len(), "dropped days without dishes");
    }

    if menu.is_empty() {
        return Err(NoMenuError);
    }
    Ok(menu)
}
