use std::collections::HashMap;

use mealvote_shared::mealplan::Ballot;

/// Number of recipes kept on a finalized meal plan, one per day of the week.
pub const MAX_RECIPES: usize = 7;

/// Recipe vote counts that remember the order recipes were first voted for.
///
/// Ranking sorts by count only, so equal counts stay in first-encountered order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VoteTally {
    order: Vec<String>,
    counts: HashMap<String, u32>,
}

impl VoteTally {
    pub fn from_ballots<'a>(ballots: impl IntoIterator<Item = &'a Ballot>) -> Self {
        let mut tally = Self::default();

        for ballot in ballots.into_iter().filter(|b| b.is_confirmed) {
            for recipe_id in ballot.recipe_ids.iter() {
                tally.vote(recipe_id);
            }
        }

        tally
    }

    pub fn vote(&mut self, recipe_id: &str) {
        match self.counts.get_mut(recipe_id) {
            Some(count) => *count += 1,
            None => {
                self.order.push(recipe_id.to_owned());
                self.counts.insert(recipe_id.to_owned(), 1);
            }
        }
    }

    pub fn count(&self, recipe_id: &str) -> u32 {
        self.counts.get(recipe_id).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in first-encountered order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.order
            .iter()
            .map(|id| (id.as_str(), self.count(id)))
    }

    pub fn ranked(&self, limit: usize) -> Vec<String> {
        let mut entries = self.iter().collect::<Vec<_>>();
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        entries
            .into_iter()
            .take(limit)
            .map(|(id, _)| id.to_owned())
            .collect()
    }
}
