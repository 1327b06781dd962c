use crate::cache::Catalog;
use crate::models::Theater;
use crate::search::filter_theaters;

impl Catalog {
    /// Автодополнение кинотеатров по названию.
    pub fn theater_suggestions(&self, query: &str) -> Vec<&Theater> {
        filter_theaters(self.theaters(), query)
    }
}
