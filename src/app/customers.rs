//! Customers view: local data provider, filtering, sorting, local paging
//!
//! The full list is loaded from the in-process provider exactly once and
//! pages are sliced locally. Filter and sort run over indices into the
//! loaded list so records are never cloned per frame.

use super::App;
use crate::customers::load_customers;
use crate::types::{Customer, CustomerSortColumn, SortDirection};
use tracing::info;

/// Contains-match over name and country, case-insensitive
pub(crate) fn filter_customers(customers: &[Customer], query: &str) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    customers
        .iter()
        .enumerate()
        .filter_map(|(i, c)| {
            if query.is_empty()
                || c.name.to_lowercase().contains(&query)
                || c.country.name.to_lowercase().contains(&query)
            {
                Some(i)
            } else {
                None
            }
        })
        .collect()
}

pub(crate) fn sort_customers(
    customers: &[Customer],
    indices: &mut [usize],
    column: CustomerSortColumn,
    direction: SortDirection,
) {
    indices.sort_by(|&a, &b| {
        let cmp = match column {
            CustomerSortColumn::Name => customers[a]
                .name
                .to_lowercase()
                .cmp(&customers[b].name.to_lowercase()),
            CustomerSortColumn::Country => customers[a]
                .country
                .name
                .to_lowercase()
                .cmp(&customers[b].country.name.to_lowercase()),
            CustomerSortColumn::Date => customers[a].date.cmp(&customers[b].date),
            CustomerSortColumn::Balance => customers[a]
                .balance
                .partial_cmp(&customers[b].balance)
                .unwrap_or(std::cmp::Ordering::Equal),
        };
        if direction == SortDirection::Descending {
            cmp.reverse()
        } else {
            cmp
        }
    });
}

impl App {
    /// Load the full list on first display of the customers view
    pub(crate) fn ensure_customers_loaded(&mut self) {
        if self.customers_loaded {
            return;
        }
        self.customers = load_customers();
        self.customers_loaded = true;
        info!(count = self.customers.len(), "Customer list loaded");
        self.apply_customer_filter();
    }

    /// Rebuild the filtered index list after a filter, sort, or load change
    pub(crate) fn apply_customer_filter(&mut self) {
        self.filtered_customers = filter_customers(&self.customers, &self.customer_filter);
        if let Some(column) = self.customer_sort {
            sort_customers(
                &self.customers,
                &mut self.filtered_customers,
                column,
                self.customer_sort_dir,
            );
        }
        self.customer_pages.set_total(self.filtered_customers.len() as u64);
    }

    /// Header click cycle: ascending, descending, unsorted
    pub(crate) fn toggle_customer_sort(&mut self, column: CustomerSortColumn) {
        if self.customer_sort == Some(column) {
            match self.customer_sort_dir {
                SortDirection::Ascending => self.customer_sort_dir = SortDirection::Descending,
                SortDirection::Descending => self.customer_sort = None,
            }
        } else {
            self.customer_sort = Some(column);
            self.customer_sort_dir = SortDirection::Ascending;
        }
        self.apply_customer_filter();
    }

    /// Indices (into `customers`) of the rows on the current page
    pub(crate) fn visible_customer_rows(&self) -> &[usize] {
        let len = self.filtered_customers.len();
        let start = ((self.customer_pages.page as usize).saturating_sub(1))
            * self.customer_pages.limit as usize;
        if start >= len {
            return &[];
        }
        let end = (start + self.customer_pages.limit as usize).min(len);
        &self.filtered_customers[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_keeps_every_record() {
        let customers = load_customers();
        let indices = filter_customers(&customers, "");
        assert_eq!(indices.len(), customers.len());
    }

    #[test]
    fn filter_matches_name_and_country_case_insensitive() {
        let customers = load_customers();
        let by_country = filter_customers(&customers, "FRANCE");
        assert!(!by_country.is_empty());
        for &i in &by_country {
            assert_eq!(customers[i].country.name, "France");
        }

        let by_name = filter_customers(&customers, "amy");
        for &i in &by_name {
            let c = &customers[i];
            assert!(
                c.name.to_lowercase().contains("amy")
                    || c.country.name.to_lowercase().contains("amy")
            );
        }
    }

    #[test]
    fn unmatched_query_yields_no_rows() {
        let customers = load_customers();
        assert!(filter_customers(&customers, "zzzzzz").is_empty());
    }

    #[test]
    fn sort_by_balance_descending() {
        let customers = load_customers();
        let mut indices = filter_customers(&customers, "");
        sort_customers(
            &customers,
            &mut indices,
            CustomerSortColumn::Balance,
            SortDirection::Descending,
        );
        for pair in indices.windows(2) {
            assert!(customers[pair[0]].balance >= customers[pair[1]].balance);
        }
    }

    #[test]
    fn sort_by_name_is_case_insensitive_ascending() {
        let customers = load_customers();
        let mut indices = filter_customers(&customers, "");
        sort_customers(
            &customers,
            &mut indices,
            CustomerSortColumn::Name,
            SortDirection::Ascending,
        );
        for pair in indices.windows(2) {
            assert!(
                customers[pair[0]].name.to_lowercase() <= customers[pair[1]].name.to_lowercase()
            );
        }
    }

    #[test]
    fn filtering_never_invents_indices() {
        let customers = load_customers();
        for &i in &filter_customers(&customers, "a") {
            assert!(i < customers.len());
        }
    }
}
