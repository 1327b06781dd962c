use crate::cache::Catalog;
use crate::search::filter_cities;

impl Catalog {
    /// Автодополнение городов по текущему снимку.
    pub fn city_suggestions(&self, query: &str) -> Vec<&str> {
        filter_cities(self.cities(), query)
    }
}
